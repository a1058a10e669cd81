//! Element - single-node view with DOM-style accessors

use std::collections::HashMap;
use std::fmt;

use hq_dom::{DomTree, Namespace, NodeData, NodeId};

use crate::attribute::namespace_uri_for_prefix;
use crate::{Attribute, Selection};

/// One node of a document, DOM style
///
/// Wraps a one-node [`Selection`], so the base URL travels along with every
/// element reached from it.
#[derive(Clone)]
pub struct Element {
    sel: Selection,
}

impl Element {
    /// `sel` must hold exactly one node
    pub(crate) fn new(sel: Selection) -> Self {
        debug_assert_eq!(sel.len(), 1);
        Self { sel }
    }

    pub fn node_id(&self) -> NodeId {
        self.sel.node_ids()[0]
    }

    /// This element as a one-node selection
    pub fn selection(&self) -> &Selection {
        &self.sel
    }

    pub(crate) fn tree(&self) -> &DomTree {
        self.sel.tree()
    }

    fn data(&self) -> Option<&NodeData> {
        self.tree().get(self.node_id()).map(|n| &n.data)
    }

    fn wrap(&self, id: Option<NodeId>) -> Option<Element> {
        id.map(|id| self.sel.element_at(id))
    }

    fn wrap_all(&self, ids: impl Iterator<Item = NodeId>) -> Vec<Element> {
        ids.map(|id| self.sel.element_at(id)).collect()
    }

    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.tree().attr(self.node_id(), name)
    }

    // ------------------------------------------------------------------
    // Identity and content
    // ------------------------------------------------------------------

    /// `h1`, `#text`, `#comment`, `#document`, or the doctype name
    pub fn node_name(&self) -> String {
        match self.data() {
            Some(NodeData::Element(e)) => self.tree().resolve(e.name.local).to_string(),
            Some(NodeData::Text(_)) => "#text".to_string(),
            Some(NodeData::Comment(_)) => "#comment".to_string(),
            Some(NodeData::Document) | None => "#document".to_string(),
            Some(NodeData::Doctype { name, .. }) => self.tree().resolve(*name).to_string(),
            Some(NodeData::ProcessingInstruction { target, .. }) => {
                self.tree().resolve(*target).to_string()
            }
        }
    }

    /// Numeric DOM node type
    pub fn node_type(&self) -> u16 {
        self.tree()
            .get(self.node_id())
            .map_or(hq_dom::NodeType::Document.code(), |n| n.node_type().code())
    }

    /// Text of text and comment nodes
    pub fn node_value(&self) -> Option<String> {
        match self.data()? {
            NodeData::Text(t) | NodeData::Comment(t) => Some(t.clone()),
            _ => None,
        }
    }

    pub fn text_content(&self) -> String {
        self.tree().text_content(self.node_id())
    }

    pub fn inner_html(&self) -> String {
        hq_html::inner_html(self.tree(), self.node_id())
    }

    pub fn outer_html(&self) -> String {
        hq_html::outer_html(self.tree(), self.node_id())
    }

    /// `id` attribute or ""
    pub fn id(&self) -> String {
        self.attr("id").unwrap_or("").to_string()
    }

    pub fn class_name(&self) -> String {
        self.attr("class").unwrap_or("").to_string()
    }

    pub fn lang(&self) -> String {
        self.attr("lang").unwrap_or("").to_string()
    }

    /// Lowercase local name; "" for non-elements
    pub fn tag_name(&self) -> String {
        self.tree()
            .tag_name(self.node_id())
            .unwrap_or("")
            .to_string()
    }

    /// Whitespace-separated tokens of `class`
    pub fn class_list(&self) -> Vec<String> {
        self.attr("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn namespace_uri(&self) -> &'static str {
        let ns = self.tree().namespace(self.node_id()).unwrap_or_default();
        namespace_uri_for_prefix(ns.prefix())
    }

    /// True unless the element lives in a foreign (svg, math) namespace
    pub fn is_default_namespace(&self) -> bool {
        self.tree().namespace(self.node_id()).unwrap_or_default() == Namespace::Html
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attr(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn has_attributes(&self) -> bool {
        !self.tree().attrs(self.node_id()).is_empty()
    }

    /// Snapshot of every attribute, keyed by qualified name
    pub fn attributes(&self) -> HashMap<String, Attribute> {
        let id = self.node_id();
        self.tree()
            .attrs(id)
            .iter()
            .map(|a| {
                let attr = Attribute::snapshot(&self.sel, id, a);
                (attr.name(), attr)
            })
            .collect()
    }

    pub fn get_attribute_node(&self, name: &str) -> Option<Attribute> {
        self.attributes().remove(name)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn first_child(&self) -> Option<Element> {
        self.wrap(self.tree().first_child(self.node_id()))
    }

    pub fn last_child(&self) -> Option<Element> {
        self.wrap(self.tree().last_child(self.node_id()))
    }

    pub fn first_element_child(&self) -> Option<Element> {
        let tree = self.tree();
        self.wrap(tree.element_children(self.node_id()).next())
    }

    pub fn last_element_child(&self) -> Option<Element> {
        let tree = self.tree();
        self.wrap(tree.element_children(self.node_id()).last())
    }

    pub fn previous_sibling(&self) -> Option<Element> {
        self.wrap(self.tree().prev_sibling(self.node_id()))
    }

    pub fn next_sibling(&self) -> Option<Element> {
        self.wrap(self.tree().next_sibling(self.node_id()))
    }

    pub fn previous_element_sibling(&self) -> Option<Element> {
        let tree = self.tree();
        let found = tree
            .preceding_siblings(self.node_id())
            .find(|&s| tree.is_element(s));
        self.wrap(found)
    }

    pub fn next_element_sibling(&self) -> Option<Element> {
        let tree = self.tree();
        let found = tree
            .following_siblings(self.node_id())
            .find(|&s| tree.is_element(s));
        self.wrap(found)
    }

    /// Parent of any kind, document included
    pub fn parent_node(&self) -> Option<Element> {
        self.wrap(self.tree().parent(self.node_id()))
    }

    /// Parent only when it is an element
    pub fn parent_element(&self) -> Option<Element> {
        let tree = self.tree();
        self.wrap(tree.parent(self.node_id()).filter(|&p| tree.is_element(p)))
    }

    /// Nearest document ancestor
    pub fn owner_document(&self) -> Option<Element> {
        let tree = self.tree();
        let doc = tree
            .ancestors(self.node_id())
            .find(|&a| tree.get(a).is_some_and(|n| n.is_document()));
        self.wrap(doc)
    }

    pub fn child_element_count(&self) -> usize {
        self.tree().element_children(self.node_id()).count()
    }

    pub fn has_child_nodes(&self) -> bool {
        self.tree().first_child(self.node_id()).is_some()
    }

    /// All children, text and comments included
    pub fn child_nodes(&self) -> Vec<Element> {
        self.wrap_all(self.tree().children(self.node_id()))
    }

    /// Element children
    pub fn children(&self) -> Vec<Element> {
        self.wrap_all(self.tree().element_children(self.node_id()))
    }

    // ------------------------------------------------------------------
    // Queries and predicates
    // ------------------------------------------------------------------

    /// Descendant elements carrying `class_name` in their class list
    pub fn get_elements_by_class_name(&self, class_name: &str) -> Vec<Element> {
        let tree = self.tree();
        let found = tree.descendants(self.node_id()).filter(|&d| {
            tree.attr(d, "class")
                .is_some_and(|c| c.split_whitespace().any(|t| t == class_name))
        });
        self.wrap_all(found)
    }

    /// Descendant elements with the given tag (`*` for all)
    pub fn get_elements_by_tag_name(&self, tag: &str) -> Vec<Element> {
        let tree = self.tree();
        let found = tree.descendants(self.node_id()).filter(|&d| {
            tree.tag_name(d)
                .is_some_and(|t| tag == "*" || t.eq_ignore_ascii_case(tag))
        });
        self.wrap_all(found)
    }

    pub fn query_selector(&self, selector: &str) -> Option<Element> {
        self.sel.find(selector).get(0)
    }

    pub fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        self.sel.find(selector).get_all()
    }

    /// Whether the element itself satisfies `selector`
    pub fn matches(&self, selector: &str) -> bool {
        self.sel.is(selector)
    }

    /// Strict descendant test; an element does not contain itself
    pub fn contains(&self, other: &Element) -> bool {
        self.is_same_document(other) && self.tree().is_ancestor_of(self.node_id(), other.node_id())
    }

    pub fn is_same_node(&self, other: &Element) -> bool {
        self.is_same_document(other) && self.node_id() == other.node_id()
    }

    /// Structural equality by serialized markup
    pub fn is_equal_node(&self, other: &Element) -> bool {
        self.node_type() == other.node_type() && self.outer_html() == other.outer_html()
    }

    fn is_same_document(&self, other: &Element) -> bool {
        self.sel.same_document(&other.sel)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tree().is_element(self.node_id()) {
            f.write_str("[object html.Node]")
        } else {
            write!(f, "[object {}]", self.node_name())
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.node_id())
            .field("name", &self.node_name())
            .finish()
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_node(other)
    }
}

impl Eq for Element {}
