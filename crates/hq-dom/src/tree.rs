//! DOM tree (arena allocation)
//!
//! Links are plain indices, so walking the tree never touches a refcount and
//! every iterator here is allocation-free.

use crate::node::{Attribute, ElementData, Namespace, Node, NodeData, QualName};
use crate::{InternedString, NodeId, StringInterner};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        let mut nodes = Vec::with_capacity(256);
        nodes.push(Node::new(NodeData::Document));
        Self {
            nodes,
            interner: StringInterner::new(),
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve an interned name
    #[inline]
    pub fn resolve(&self, s: InternedString) -> &str {
        self.interner.get(s)
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Allocate an unlinked node
    pub fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create an HTML element
    pub fn create_element(&mut self, local: &str) -> NodeId {
        self.create_element_ns(Namespace::Html, local)
    }

    pub fn create_element_ns(&mut self, ns: Namespace, local: &str) -> NodeId {
        let local = self.interner.intern(local);
        let data = ElementData::new(QualName::new(ns, local));
        self.push_node(Node::new(NodeData::Element(data)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(Node::new(NodeData::Text(text.to_string())))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push_node(Node::new(NodeData::Comment(text.to_string())))
    }

    pub fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        let name = self.interner.intern(name);
        self.push_node(Node::new(NodeData::Doctype {
            name,
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        }))
    }

    pub fn create_processing_instruction(&mut self, target: &str, data: &str) -> NodeId {
        let target = self.interner.intern(target);
        self.push_node(Node::new(NodeData::ProcessingInstruction {
            target,
            data: data.to_string(),
        }))
    }

    /// Set an attribute on an element; ignored for other node kinds
    pub fn set_attr(&mut self, id: NodeId, prefix: Option<&str>, name: &str, value: &str) {
        let local = self.interner.intern(name);
        let prefix = prefix.map_or(InternedString::EMPTY, |p| self.interner.intern(p));
        if let Some(NodeData::Element(elem)) = self.get_mut(id).map(|n| &mut n.data) {
            elem.set_attr(Attribute {
                local,
                prefix,
                value: value.to_string(),
            });
        }
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(last) = self.get(parent).map(|p| p.last_child) else {
            return;
        };

        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            if let Some(prev) = self.get_mut(last) {
                prev.next_sibling = child;
            }
        }
        if let Some(p) = self.get_mut(parent) {
            if !p.first_child.is_valid() {
                p.first_child = child;
            }
            p.last_child = child;
        }
    }

    // ------------------------------------------------------------------
    // Links
    // ------------------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent.to_option()
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.first_child.to_option()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.last_child.to_option()
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.prev_sibling.to_option()
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.next_sibling.to_option()
    }

    // ------------------------------------------------------------------
    // Element helpers
    // ------------------------------------------------------------------

    #[inline]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    /// Lowercase local name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| self.resolve(e.name.local))
    }

    /// Whether `id` is an element with the given local name
    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag_name(id) == Some(tag)
    }

    pub fn namespace(&self, id: NodeId) -> Option<Namespace> {
        self.element(id).map(|e| e.name.ns)
    }

    /// Attribute value by name. Prefixed attributes are found by their
    /// qualified `prefix:local` form.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        let elem = self.element(id)?;
        if let Some(value) = self.interner.lookup(name).and_then(|l| elem.get_attr(l)) {
            return Some(value);
        }
        let (prefix, local) = name.split_once(':')?;
        elem.attrs
            .iter()
            .find(|a| self.resolve(a.prefix) == prefix && self.resolve(a.local) == local)
            .map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// Attributes of an element in source order (empty for other nodes)
    pub fn attrs(&self, id: NodeId) -> &[Attribute] {
        self.element(id)
            .map(|e| e.attrs.as_slice())
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Walking
    // ------------------------------------------------------------------

    /// Direct children, including text and comments
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// Element children only
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id).filter(move |&c| self.is_element(c))
    }

    /// Ancestors from the parent up to the document node
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// All strict descendants in document (pre-)order
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.first_child(id),
        }
    }

    /// Siblings after `id`, nearest first
    pub fn following_siblings(&self, id: NodeId) -> Siblings<'_> {
        Siblings {
            tree: self,
            next: self.next_sibling(id),
            forward: true,
        }
    }

    /// Siblings before `id`, nearest first
    pub fn preceding_siblings(&self, id: NodeId) -> Siblings<'_> {
        Siblings {
            tree: self,
            next: self.prev_sibling(id),
            forward: false,
        }
    }

    /// Whether `descendant` lies strictly below `ancestor`
    pub fn is_ancestor_of(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        self.ancestors(descendant).any(|a| a == ancestor)
    }

    /// Concatenated text of all descendant text nodes. Text and comment
    /// nodes return their own data.
    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.get(id) else {
            return String::new();
        };
        match &node.data {
            NodeData::Text(t) | NodeData::Comment(t) => t.clone(),
            NodeData::ProcessingInstruction { data, .. } => data.clone(),
            _ => {
                let mut out = String::new();
                for d in self.descendants(id) {
                    if let Some(text) = self.get(d).and_then(Node::as_text) {
                        out.push_str(text);
                    }
                }
                out
            }
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}

/// Iterator over the ancestors of a node
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Pre-order iterator over the strict descendants of a node
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;

        self.next = match self.tree.first_child(current) {
            Some(child) => Some(child),
            None => {
                // Climb until a sibling is found or we are back at the root
                let mut node = current;
                loop {
                    if node == self.root {
                        break None;
                    }
                    if let Some(sibling) = self.tree.next_sibling(node) {
                        break Some(sibling);
                    }
                    match self.tree.parent(node) {
                        Some(parent) if parent != self.root => node = parent,
                        _ => break None,
                    }
                }
            }
        };

        Some(current)
    }
}

/// Iterator along a sibling chain
pub struct Siblings<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
    forward: bool,
}

impl Iterator for Siblings<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = if self.forward {
            self.tree.next_sibling(current)
        } else {
            self.tree.prev_sibling(current)
        };
        Some(current)
    }
}
