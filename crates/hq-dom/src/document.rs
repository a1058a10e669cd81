//! Document - a parsed tree plus cached landmarks

use crate::{DomTree, NodeId};

/// A parsed HTML document
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Wrap a finished tree and locate `<html>`, `<head>` and `<body>`
    pub fn from_tree(tree: DomTree) -> Self {
        let mut doc = Self {
            tree,
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        };
        doc.finalize();
        doc
    }

    fn finalize(&mut self) {
        let tree = &self.tree;
        let html = tree
            .element_children(tree.root())
            .find(|&id| tree.is_tag(id, "html"));
        let Some(html) = html else {
            return;
        };

        self.html_element = html;
        for child in tree.element_children(html) {
            match tree.tag_name(child) {
                Some("head") if !self.head_element.is_valid() => self.head_element = child,
                Some("body") if !self.body_element.is_valid() => self.body_element = child,
                _ => {}
            }
        }
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// The `<html>` element
    pub fn document_element(&self) -> Option<NodeId> {
        self.html_element.to_option()
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head_element.to_option()
    }

    pub fn body(&self) -> Option<NodeId> {
        self.body_element.to_option()
    }

    /// Text of the first `<title>` in `<head>`
    pub fn title(&self) -> String {
        let Some(head) = self.head() else {
            return String::new();
        };
        self.tree
            .element_children(head)
            .find(|&id| self.tree.is_tag(id, "title"))
            .map(|id| self.tree.text_content(id))
            .unwrap_or_default()
    }

    /// First element carrying the given `id` attribute, in document order
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.root())
            .find(|&node| self.tree.attr(node, "id") == Some(id))
    }
}
