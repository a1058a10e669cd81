//! DOM node representation
//!
//! Every node carries the five tree links as [`NodeId`]s; payload lives in
//! [`NodeData`].

use crate::{InternedString, NodeId};

/// A node in the arena
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE for the document)
    pub parent: NodeId,
    pub first_child: NodeId,
    /// Last child (O(1) append)
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
    pub data: NodeData,
}

impl Node {
    /// Create an unlinked node
    pub fn new(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    #[inline]
    pub fn is_document(&self) -> bool {
        matches!(self.data, NodeData::Document)
    }

    /// Element payload, if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Text payload, if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Numeric DOM node type
    pub fn node_type(&self) -> NodeType {
        match self.data {
            NodeData::Document => NodeType::Document,
            NodeData::Doctype { .. } => NodeType::DocumentType,
            NodeData::Element(_) => NodeType::Element,
            NodeData::Text(_) => NodeType::Text,
            NodeData::Comment(_) => NodeType::Comment,
            NodeData::ProcessingInstruction { .. } => NodeType::ProcessingInstruction,
        }
    }
}

/// Node payload
#[derive(Debug)]
pub enum NodeData {
    Document,
    Doctype {
        name: InternedString,
        public_id: String,
        system_id: String,
    },
    Element(ElementData),
    Text(String),
    Comment(String),
    ProcessingInstruction {
        target: InternedString,
        data: String,
    },
}

/// DOM node type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
}

impl NodeType {
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// Element namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
    MathMl,
}

impl Namespace {
    pub const HTML_URI: &'static str = "http://www.w3.org/1999/xhtml";
    pub const SVG_URI: &'static str = "http://www.w3.org/2000/svg";
    pub const MATHML_URI: &'static str = "http://www.w3.org/1998/Math/MathML";

    /// Map a namespace URI from the tree builder. Unknown URIs are treated as HTML.
    pub fn from_uri(uri: &str) -> Self {
        match uri {
            Self::SVG_URI => Self::Svg,
            Self::MATHML_URI => Self::MathMl,
            _ => Self::Html,
        }
    }

    /// Map a namespace prefix (`svg`, `math`); anything else is HTML
    pub fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "svg" => Self::Svg,
            "math" => Self::MathMl,
            _ => Self::Html,
        }
    }

    pub fn uri(self) -> &'static str {
        match self {
            Self::Html => Self::HTML_URI,
            Self::Svg => Self::SVG_URI,
            Self::MathMl => Self::MATHML_URI,
        }
    }

    /// Prefix used for foreign content; empty for HTML
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Html => "",
            Self::Svg => "svg",
            Self::MathMl => "math",
        }
    }
}

/// Namespace plus interned local name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualName {
    pub ns: Namespace,
    pub local: InternedString,
}

impl QualName {
    pub fn new(ns: Namespace, local: InternedString) -> Self {
        Self { ns, local }
    }
}

/// Element payload
#[derive(Debug)]
pub struct ElementData {
    pub name: QualName,
    /// Attributes in source order
    pub attrs: Vec<Attribute>,
}

impl ElementData {
    pub fn new(name: QualName) -> Self {
        Self {
            name,
            attrs: Vec::new(),
        }
    }

    /// Value of the first attribute with the given local name
    pub fn get_attr(&self, local: InternedString) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.local == local)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing an existing one with the same name
    pub fn set_attr(&mut self, attr: Attribute) {
        if let Some(existing) = self
            .attrs
            .iter_mut()
            .find(|a| a.local == attr.local && a.prefix == attr.prefix)
        {
            existing.value = attr.value;
            return;
        }
        self.attrs.push(attr);
    }
}

/// A single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub local: InternedString,
    /// `xlink`, `xml`, ... or EMPTY
    pub prefix: InternedString,
    pub value: String,
}
