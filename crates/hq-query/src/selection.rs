//! Selection - an immutable, ordered node set
//!
//! Every method takes `&self` and returns a fresh value; the node list of a
//! Selection never changes after construction. Derived selections remember
//! their source so [`Selection::end`] can step back.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use hq_css::Selector;
use hq_dom::{Document, DomTree, NodeId};
use serde_json::Value;

use crate::attribute::resolve_url;
use crate::form::{self, FieldValue, FormValue};
use crate::matcher::{descendant_elements, Matcher, NodeSet, SelectorArg};
use crate::{data, Element};

/// An ordered, duplicate-free set of nodes plus a base URL
#[derive(Clone)]
pub struct Selection {
    doc: Rc<Document>,
    nodes: Vec<NodeId>,
    base_url: String,
    prev: Option<Rc<Selection>>,
}

impl Selection {
    /// The document node of `doc`
    pub(crate) fn root(doc: Rc<Document>, base_url: String) -> Self {
        let root = doc.root();
        Self {
            doc,
            nodes: vec![root],
            base_url,
            prev: None,
        }
    }

    /// Same document and base URL, new nodes, no history
    pub(crate) fn with_nodes(&self, nodes: Vec<NodeId>) -> Self {
        Self {
            doc: Rc::clone(&self.doc),
            nodes,
            base_url: self.base_url.clone(),
            prev: None,
        }
    }

    /// A selection derived from this one
    fn derive(&self, nodes: Vec<NodeId>) -> Self {
        Self {
            doc: Rc::clone(&self.doc),
            nodes,
            base_url: self.base_url.clone(),
            prev: Some(Rc::new(self.clone())),
        }
    }

    pub(crate) fn same_document(&self, other: &Selection) -> bool {
        Rc::ptr_eq(&self.doc, &other.doc)
    }

    pub(crate) fn shared_document(&self) -> &Rc<Document> {
        &self.doc
    }

    pub(crate) fn tree(&self) -> &DomTree {
        self.doc.tree()
    }

    /// The document node, with this selection's base URL
    pub(crate) fn document_selection(&self) -> Selection {
        self.with_nodes(vec![self.doc.root()])
    }

    pub(crate) fn element_at(&self, id: NodeId) -> Element {
        Element::new(self.with_nodes(vec![id]))
    }

    /// The parsed document this selection views
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Node handles in selection order
    pub fn node_ids(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Base URL for resolving relative attribute values ("" when unset)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// A copy carrying a different base URL
    pub fn with_base_url(&self, base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..self.clone()
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// jQuery `size()`
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The selection this one was derived from; empty at the root
    pub fn end(&self) -> Selection {
        match &self.prev {
            Some(prev) => (**prev).clone(),
            None => self.with_nodes(Vec::new()),
        }
    }

    // ------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------

    /// Descendants matching `selector`
    pub fn find<'a>(&self, selector: impl Into<SelectorArg<'a>>) -> Selection {
        let arg = selector.into();
        let nodes = match arg {
            SelectorArg::Str(source) => match Selector::parse(source) {
                Ok(sel) => sel.select(self.tree(), &self.nodes),
                Err(err) => {
                    tracing::warn!(%err, "selector matches nothing");
                    Vec::new()
                }
            },
            _ => {
                let matcher = Matcher::new(arg, self);
                let candidates = descendant_elements(self.tree(), &self.nodes);
                matcher.filter(self, &candidates)
            }
        };
        self.derive(nodes)
    }

    /// Nodes of this selection that match
    pub fn filter<'a>(&self, selector: impl Into<SelectorArg<'a>>) -> Selection {
        let matcher = Matcher::new(selector.into(), self);
        self.derive(matcher.filter(self, &self.nodes))
    }

    /// Nodes of this selection that do not match
    pub fn not<'a>(&self, selector: impl Into<SelectorArg<'a>>) -> Selection {
        let matcher = Matcher::new(selector.into(), self);
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .filter(|&(i, &id)| !matcher.matches(self, i, id))
            .map(|(_, &id)| id)
            .collect();
        self.derive(nodes)
    }

    /// Whether at least one node matches
    pub fn is<'a>(&self, selector: impl Into<SelectorArg<'a>>) -> bool {
        let matcher = Matcher::new(selector.into(), self);
        self.nodes
            .iter()
            .enumerate()
            .any(|(i, &id)| matcher.matches(self, i, id))
    }

    /// Nodes with at least one matching descendant
    pub fn has<'a>(&self, selector: impl Into<SelectorArg<'a>>) -> Selection {
        let matcher = Matcher::new(selector.into(), self);
        let tree = self.tree();
        let nodes = self
            .nodes
            .iter()
            .copied()
            .filter(|&id| {
                tree.descendants(id)
                    .filter(|&d| tree.is_element(d))
                    .enumerate()
                    .any(|(i, d)| matcher.matches(self, i, d))
            })
            .collect();
        self.derive(nodes)
    }

    /// For each node, the node itself or its nearest ancestor that matches
    pub fn closest<'a>(&self, selector: impl Into<SelectorArg<'a>>) -> Selection {
        let matcher = Matcher::new(selector.into(), self);
        let tree = self.tree();
        let mut out = NodeSet::new();
        for &id in &self.nodes {
            let found = std::iter::once(id)
                .chain(tree.ancestors(id))
                .filter(|&a| tree.is_element(a))
                .enumerate()
                .find(|&(i, a)| matcher.matches(self, i, a));
            if let Some((_, a)) = found {
                out.insert(a);
            }
        }
        self.derive(out.into_vec())
    }

    /// Union, keeping first occurrences in order
    pub fn add<'a>(&self, selector: impl Into<SelectorArg<'a>>) -> Selection {
        let arg = selector.into();
        let extra = match arg {
            SelectorArg::None => Vec::new(),
            SelectorArg::Str(_) | SelectorArg::Func(_) => {
                let matcher = Matcher::new(arg, self);
                let all = descendant_elements(self.tree(), &[self.doc.root()]);
                matcher.filter(self, &all)
            }
            SelectorArg::Selection(sel) if sel.same_document(self) => sel.nodes.clone(),
            SelectorArg::Element(elem) if elem.selection().same_document(self) => {
                vec![elem.node_id()]
            }
            SelectorArg::Selection(_) | SelectorArg::Element(_) => Vec::new(),
        };
        let mut nodes = NodeSet::new();
        nodes.extend(self.nodes.iter().copied());
        nodes.extend(extra);
        self.derive(nodes.into_vec())
    }

    // ------------------------------------------------------------------
    // Adjacency
    // ------------------------------------------------------------------

    /// Collect `walk(node)` for every node, de-duplicated
    fn collect<'t, I>(&'t self, walk: impl Fn(&'t DomTree, NodeId) -> I) -> Vec<NodeId>
    where
        I: Iterator<Item = NodeId>,
    {
        let tree = self.tree();
        let mut out = NodeSet::new();
        for &id in &self.nodes {
            for found in walk(tree, id) {
                out.insert(found);
            }
        }
        out.into_vec()
    }

    /// Walk from every node, stopping before the first match of `stop`
    fn collect_until<'t, I>(
        &'t self,
        walk: impl Fn(&'t DomTree, NodeId) -> I,
        stop: SelectorArg<'_>,
        filter: Option<&str>,
    ) -> Selection
    where
        I: Iterator<Item = NodeId>,
    {
        let stop = Matcher::new(stop, self);
        let tree = self.tree();
        let mut out = NodeSet::new();
        for &id in &self.nodes {
            for (i, found) in walk(tree, id).enumerate() {
                if stop.matches(self, i, found) {
                    break;
                }
                out.insert(found);
            }
        }
        match filter {
            Some(filter) => self.narrowed(out.into_vec(), filter),
            None => self.derive(out.into_vec()),
        }
    }

    fn narrowed(&self, nodes: Vec<NodeId>, selector: &str) -> Selection {
        let matcher = Matcher::new(SelectorArg::Str(selector), self);
        self.derive(matcher.filter(self, &nodes))
    }

    /// Immediately following element sibling of each node
    pub fn next(&self) -> Selection {
        self.derive(self.collect(|t, id| next_elements(t, id).take(1)))
    }

    pub fn next_filtered(&self, selector: &str) -> Selection {
        self.narrowed(self.collect(|t, id| next_elements(t, id).take(1)), selector)
    }

    /// All following element siblings
    pub fn next_all(&self) -> Selection {
        self.derive(self.collect(next_elements))
    }

    pub fn next_all_filtered(&self, selector: &str) -> Selection {
        self.narrowed(self.collect(next_elements), selector)
    }

    /// Following element siblings up to, not including, the first that
    /// matches `stop`; unbounded when `stop` is absent
    pub fn next_until<'a>(
        &self,
        stop: impl Into<SelectorArg<'a>>,
        filter: Option<&str>,
    ) -> Selection {
        self.collect_until(next_elements, stop.into(), filter)
    }

    /// Immediately preceding element sibling of each node
    pub fn prev(&self) -> Selection {
        self.derive(self.collect(|t, id| prev_elements(t, id).take(1)))
    }

    pub fn prev_filtered(&self, selector: &str) -> Selection {
        self.narrowed(self.collect(|t, id| prev_elements(t, id).take(1)), selector)
    }

    /// All preceding element siblings, nearest first
    pub fn prev_all(&self) -> Selection {
        self.derive(self.collect(prev_elements))
    }

    pub fn prev_all_filtered(&self, selector: &str) -> Selection {
        self.narrowed(self.collect(prev_elements), selector)
    }

    pub fn prev_until<'a>(
        &self,
        stop: impl Into<SelectorArg<'a>>,
        filter: Option<&str>,
    ) -> Selection {
        self.collect_until(prev_elements, stop.into(), filter)
    }

    /// Every other element child of each node's parent
    pub fn siblings(&self) -> Selection {
        self.derive(self.collect(sibling_elements))
    }

    pub fn siblings_filtered(&self, selector: &str) -> Selection {
        self.narrowed(self.collect(sibling_elements), selector)
    }

    /// Parent element of each node
    pub fn parent(&self) -> Selection {
        self.derive(self.collect(|t, id| parent_elements(t, id).take(1)))
    }

    pub fn parent_filtered(&self, selector: &str) -> Selection {
        self.narrowed(self.collect(|t, id| parent_elements(t, id).take(1)), selector)
    }

    /// Ancestor elements, nearest first; the document node is never included
    pub fn parents(&self) -> Selection {
        self.derive(self.collect(parent_elements))
    }

    pub fn parents_filtered(&self, selector: &str) -> Selection {
        self.narrowed(self.collect(parent_elements), selector)
    }

    pub fn parents_until<'a>(
        &self,
        stop: impl Into<SelectorArg<'a>>,
        filter: Option<&str>,
    ) -> Selection {
        self.collect_until(parent_elements, stop.into(), filter)
    }

    /// Element children
    pub fn children(&self) -> Selection {
        self.derive(self.collect(|t, id| t.element_children(id)))
    }

    pub fn children_filtered(&self, selector: &str) -> Selection {
        self.narrowed(self.collect(|t, id| t.element_children(id)), selector)
    }

    /// All children, text and comments included
    pub fn contents(&self) -> Selection {
        self.derive(self.collect(|t, id| t.children(id)))
    }

    pub fn contents_filtered(&self, selector: &str) -> Selection {
        self.narrowed(self.collect(|t, id| t.children(id)), selector)
    }

    // ------------------------------------------------------------------
    // Positional access
    // ------------------------------------------------------------------

    fn position(&self, index: isize) -> Option<usize> {
        let len = self.nodes.len() as isize;
        let index = if index < 0 { index + len } else { index };
        (0..len).contains(&index).then_some(index as usize)
    }

    /// The node at `index` (negative counts from the end); empty when out of range
    pub fn eq(&self, index: isize) -> Selection {
        let nodes = self
            .position(index)
            .map(|i| vec![self.nodes[i]])
            .unwrap_or_default();
        self.derive(nodes)
    }

    pub fn first(&self) -> Selection {
        self.eq(0)
    }

    pub fn last(&self) -> Selection {
        self.eq(-1)
    }

    /// Nodes in `start..end`; negative bounds count from the end and both
    /// bounds clamp to the selection
    pub fn slice(&self, start: isize, end: Option<isize>) -> Selection {
        let len = self.nodes.len() as isize;
        let clamp = |i: isize| (if i < 0 { i + len } else { i }).clamp(0, len) as usize;
        let start = clamp(start);
        let end = clamp(end.unwrap_or(len));
        let nodes = if start < end {
            self.nodes[start..end].to_vec()
        } else {
            Vec::new()
        };
        self.derive(nodes)
    }

    /// Element at `index` (negative counts from the end)
    pub fn get(&self, index: isize) -> Option<Element> {
        self.position(index).map(|i| self.element_at(self.nodes[i]))
    }

    /// Every node as an Element
    pub fn get_all(&self) -> Vec<Element> {
        self.nodes.iter().map(|&id| self.element_at(id)).collect()
    }

    /// One single-node selection per node
    pub fn to_array(&self) -> Vec<Selection> {
        self.nodes
            .iter()
            .map(|&id| self.with_nodes(vec![id]))
            .collect()
    }

    /// Position of the first node among its element siblings
    pub fn index(&self) -> Option<usize> {
        let tree = self.tree();
        let first = *self.nodes.first()?;
        Some(prev_elements(tree, first).count())
    }

    /// Position lookup against another set:
    ///
    /// - selector string: first node of this selection among the document's matches
    /// - selection: first node of this selection within `other`
    /// - element: the element within this selection
    /// - predicate: first node of this selection that passes
    pub fn index_of<'a>(&self, selector: impl Into<SelectorArg<'a>>) -> Option<usize> {
        let arg = selector.into();
        match arg {
            SelectorArg::None => self.index(),
            SelectorArg::Str(_) => {
                let first = *self.nodes.first()?;
                let matcher = Matcher::new(arg, self);
                let all = descendant_elements(self.tree(), &[self.doc.root()]);
                matcher.filter(self, &all).iter().position(|&id| id == first)
            }
            SelectorArg::Selection(other) => {
                let first = *self.nodes.first()?;
                if !other.same_document(self) {
                    return None;
                }
                other.nodes.iter().position(|&id| id == first)
            }
            SelectorArg::Element(elem) => {
                if !elem.selection().same_document(self) {
                    return None;
                }
                self.nodes.iter().position(|&id| id == elem.node_id())
            }
            SelectorArg::Func(_) => {
                let matcher = Matcher::new(arg, self);
                self.nodes
                    .iter()
                    .enumerate()
                    .position(|(i, &id)| matcher.matches(self, i, id))
            }
        }
    }

    // ------------------------------------------------------------------
    // Iteration
    // ------------------------------------------------------------------

    /// Call `f` for every node in order
    pub fn each(&self, mut f: impl FnMut(usize, Element)) -> &Self {
        for (i, &id) in self.nodes.iter().enumerate() {
            f(i, self.element_at(id));
        }
        self
    }

    /// Like [`each`](Self::each); the first error stops the iteration
    pub fn try_each<E>(&self, mut f: impl FnMut(usize, Element) -> Result<(), E>) -> Result<(), E> {
        for (i, &id) in self.nodes.iter().enumerate() {
            f(i, self.element_at(id))?;
        }
        Ok(())
    }

    /// Ordered projection; every return value is kept
    pub fn map<T>(&self, mut f: impl FnMut(usize, Element) -> T) -> Vec<T> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, &id)| f(i, self.element_at(id)))
            .collect()
    }

    // ------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------

    /// Raw attribute of the first node
    pub fn attr(&self, name: &str) -> Option<&str> {
        let first = *self.nodes.first()?;
        self.tree().attr(first, name)
    }

    pub fn attr_or(&self, name: &str, default: &str) -> String {
        self.attr(name).unwrap_or(default).to_string()
    }

    /// Attribute of the first node resolved against the base URL; "" when
    /// absent
    pub fn url_attr(&self, name: &str) -> String {
        match self.attr(name) {
            Some(value) => resolve_url(&self.base_url, value),
            None => String::new(),
        }
    }

    /// Inner markup of the first node
    pub fn html(&self) -> Option<String> {
        let first = *self.nodes.first()?;
        Some(hq_html::inner_html(self.tree(), first))
    }

    /// Combined text of every node
    pub fn text(&self) -> String {
        let tree = self.tree();
        self.nodes.iter().map(|&id| tree.text_content(id)).collect()
    }

    /// Form value of the first node
    pub fn val(&self) -> Option<FieldValue> {
        let first = *self.nodes.first()?;
        form::value_of(self.tree(), first)
    }

    /// Coerced value of `data-<kebab(name)>` on the first node
    pub fn data(&self, name: &str) -> Option<Value> {
        let first = *self.nodes.first()?;
        data::data_value(self.tree(), first, name)
    }

    /// Every `data-*` attribute of the first node, keyed by camelCase name.
    /// Attributes whose value coerces to nothing appear as `null`.
    pub fn data_all(&self) -> serde_json::Map<String, Value> {
        match self.nodes.first() {
            Some(&first) => data::data_map(self.tree(), first),
            None => serde_json::Map::new(),
        }
    }

    // ------------------------------------------------------------------
    // Forms
    // ------------------------------------------------------------------

    /// Successful controls as name/value pairs, document order
    pub fn serialize_array(&self) -> Vec<FormValue> {
        form::serialize_array(self)
    }

    /// Successful controls keyed by name; later duplicates overwrite earlier
    pub fn serialize_object(&self) -> BTreeMap<String, FieldValue> {
        self.serialize_array()
            .into_iter()
            .map(|fv| (fv.name, fv.value))
            .collect()
    }

    /// `application/x-www-form-urlencoded` query string
    pub fn serialize(&self) -> String {
        form::encode(&self.serialize_array())
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("nodes", &self.nodes)
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn next_elements(tree: &DomTree, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    tree.following_siblings(id).filter(|&s| tree.is_element(s))
}

fn prev_elements(tree: &DomTree, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    tree.preceding_siblings(id).filter(|&s| tree.is_element(s))
}

fn sibling_elements(tree: &DomTree, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    let parent = tree.parent(id);
    parent
        .into_iter()
        .flat_map(move |p| tree.element_children(p))
        .filter(move |&s| s != id)
}

fn parent_elements(tree: &DomTree, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    tree.ancestors(id).filter(|&a| tree.is_element(a))
}
