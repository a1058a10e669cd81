//! hq DOM - arena-backed document tree
//!
//! Read-mostly node storage for parsed HTML. Nodes live in a single `Vec`
//! and link to each other through 4-byte [`NodeId`] indices, so selections
//! and elements can hold cheap, non-owning handles into the tree.

mod dataset;
mod document;
mod interner;
mod node;
mod tree;

pub use dataset::{to_camel_case, to_kebab_case, DATA_PREFIX};
pub use document::Document;
pub use interner::{InternedString, StringInterner};
pub use node::{Attribute, ElementData, Namespace, Node, NodeData, NodeType, QualName};
pub use tree::{Ancestors, Children, Descendants, DomTree, Siblings};

/// Node identifier (index into the arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The document node is always allocated first
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for a missing link
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this id points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Convert a link into an `Option`
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
