//! HTML5 parser
//!
//! html5ever builds an `RcDom`, which is then flattened into the arena. The
//! conversion keeps every node the tree builder produced, whitespace-only text
//! included, so child counts match what a browser reports.

use hq_dom::{Document, DomTree, Namespace, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::ParseError;

/// HTML5 parser
#[derive(Debug, Clone)]
pub struct HtmlParser {
    scripting: bool,
}

impl HtmlParser {
    pub fn new() -> Self {
        Self { scripting: true }
    }

    /// Whether the tree builder treats `<noscript>` content as raw text
    pub fn scripting(mut self, enabled: bool) -> Self {
        self.scripting = enabled;
        self
    }

    /// Parse an HTML string into a [`Document`]
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        tracing::debug!(bytes = html.len(), "parsing HTML document");

        let opts = ParseOpts {
            tree_builder: TreeBuilderOpts {
                scripting_enabled: self.scripting,
                ..Default::default()
            },
            ..Default::default()
        };
        let dom = parse_document(RcDom::default(), opts)
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let mut tree = DomTree::new();
        convert(&dom.document, &mut tree);

        tracing::debug!(nodes = tree.len(), "parsed HTML document");
        Ok(Document::from_tree(tree))
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten an RcDom into the arena. Iterative so hostile nesting depth can't
/// blow the stack.
fn convert(document: &Handle, tree: &mut DomTree) {
    let mut stack: Vec<(Handle, NodeId)> = document
        .children
        .borrow()
        .iter()
        .rev()
        .map(|child| (child.clone(), tree.root()))
        .collect();

    while let Some((handle, parent)) = stack.pop() {
        let Some(id) = convert_node(&handle, tree) else {
            continue;
        };
        tree.append_child(parent, id);

        let mut children: Vec<Handle> = handle.children.borrow().iter().cloned().collect();
        if let RcNodeData::Element { template_contents, .. } = &handle.data {
            // Template content is exposed as ordinary children
            if let Some(contents) = template_contents.borrow().as_ref() {
                children.extend(contents.children.borrow().iter().cloned());
            }
        }
        stack.extend(children.into_iter().rev().map(|child| (child, id)));
    }
}

fn convert_node(handle: &Handle, tree: &mut DomTree) -> Option<NodeId> {
    let id = match &handle.data {
        RcNodeData::Document => return None,
        RcNodeData::Doctype {
            name,
            public_id,
            system_id,
        } => tree.create_doctype(name, public_id, system_id),
        RcNodeData::Text { contents } => tree.create_text(&contents.borrow()),
        RcNodeData::Comment { contents } => tree.create_comment(contents),
        RcNodeData::ProcessingInstruction { target, contents } => {
            tree.create_processing_instruction(target, contents)
        }
        RcNodeData::Element { name, attrs, .. } => {
            let id = tree.create_element_ns(Namespace::from_uri(&name.ns), &name.local);
            for attr in attrs.borrow().iter() {
                tree.set_attr(id, attr.name.prefix.as_deref(), &attr.name.local, &attr.value);
            }
            id
        }
    };
    Some(id)
}
