//! Selector-like arguments
//!
//! Every traversal method that takes "something to match against" accepts a
//! [`SelectorArg`] and resolves it once through [`Matcher::new`].

use std::collections::HashSet;
use std::fmt;

use hq_css::Selector;
use hq_dom::{DomTree, NodeId};
use serde_json::Value;

use crate::{Element, QueryError, Result, Selection};

/// Predicate form of a selector: `(index, candidate) -> keep`
pub type Predicate<'a> = &'a dyn Fn(usize, &Selection) -> bool;

/// A value accepted wherever a selector is expected
#[derive(Clone, Copy)]
pub enum SelectorArg<'a> {
    /// No argument; matches nothing, or means "unbounded" for the until-walks
    None,
    /// CSS selector source
    Str(&'a str),
    /// Match by node identity against another selection
    Selection(&'a Selection),
    /// Match by node identity against a single element
    Element(&'a Element),
    /// Called with the candidate's position and a one-node selection
    Func(Predicate<'a>),
}

impl<'a> SelectorArg<'a> {
    /// Whether no argument was given
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Map a dynamically typed script value onto a selector argument.
    ///
    /// Only strings and `null` carry meaning here; selections, elements and
    /// callbacks never come through JSON.
    pub fn from_json(value: &'a Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::None),
            Value::String(s) => Ok(Self::Str(s)),
            other => Err(QueryError::InvalidSelectorArg {
                kind: json_kind(other).to_string(),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Debug for SelectorArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Selection(s) => f.debug_tuple("Selection").field(&s.len()).finish(),
            Self::Element(e) => f.debug_tuple("Element").field(&e.node_id()).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl<'a> From<&'a str> for SelectorArg<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(s)
    }
}

impl<'a> From<&'a String> for SelectorArg<'a> {
    fn from(s: &'a String) -> Self {
        Self::Str(s)
    }
}

impl<'a> From<Option<&'a str>> for SelectorArg<'a> {
    fn from(s: Option<&'a str>) -> Self {
        s.map_or(Self::None, Self::Str)
    }
}

impl<'a> From<&'a Selection> for SelectorArg<'a> {
    fn from(s: &'a Selection) -> Self {
        Self::Selection(s)
    }
}

impl<'a> From<&'a Element> for SelectorArg<'a> {
    fn from(e: &'a Element) -> Self {
        Self::Element(e)
    }
}

/// A resolved [`SelectorArg`]
pub(crate) enum Matcher<'a> {
    Nothing,
    Css(Selector),
    Nodes(HashSet<NodeId>),
    Func(Predicate<'a>),
}

impl<'a> Matcher<'a> {
    /// Resolve an argument against `context`. Unparsable selectors and
    /// nodes from another document match nothing.
    pub(crate) fn new(arg: SelectorArg<'a>, context: &Selection) -> Self {
        match arg {
            SelectorArg::None => Self::Nothing,
            SelectorArg::Str(source) => match Selector::parse(source) {
                Ok(selector) => Self::Css(selector),
                Err(err) => {
                    tracing::warn!(%err, "selector matches nothing");
                    Self::Nothing
                }
            },
            SelectorArg::Selection(sel) if sel.same_document(context) => {
                Self::Nodes(sel.node_ids().iter().copied().collect())
            }
            SelectorArg::Element(elem) if elem.selection().same_document(context) => {
                Self::Nodes(HashSet::from([elem.node_id()]))
            }
            SelectorArg::Selection(_) | SelectorArg::Element(_) => {
                tracing::warn!("selection belongs to another document");
                Self::Nothing
            }
            SelectorArg::Func(f) => Self::Func(f),
        }
    }

    /// Whether `id`, seen as the `index`-th candidate, matches. `context`
    /// supplies the document and base URL for predicate callbacks.
    pub(crate) fn matches(&self, context: &Selection, index: usize, id: NodeId) -> bool {
        match self {
            Self::Nothing => false,
            Self::Css(selector) => selector.matches(context.tree(), id),
            Self::Nodes(nodes) => nodes.contains(&id),
            Self::Func(f) => f(index, &context.with_nodes(vec![id])),
        }
    }

    /// Positional filter over a candidate list
    pub(crate) fn filter(&self, context: &Selection, candidates: &[NodeId]) -> Vec<NodeId> {
        candidates
            .iter()
            .enumerate()
            .filter(|&(i, &id)| self.matches(context, i, id))
            .map(|(_, &id)| id)
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }
}

/// Node list that keeps only the first occurrence of each node
#[derive(Default)]
pub(crate) struct NodeSet {
    order: Vec<NodeId>,
    seen: HashSet<NodeId>,
}

impl NodeSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append `id` unless already present
    pub(crate) fn insert(&mut self, id: NodeId) {
        if self.seen.insert(id) {
            self.order.push(id);
        }
    }

    pub(crate) fn into_vec(self) -> Vec<NodeId> {
        self.order
    }
}

impl Extend<NodeId> for NodeSet {
    fn extend<I: IntoIterator<Item = NodeId>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

/// All element descendants of `roots`, document order per root, no duplicates
pub(crate) fn descendant_elements(tree: &DomTree, roots: &[NodeId]) -> Vec<NodeId> {
    let mut out = NodeSet::new();
    for &root in roots {
        out.extend(tree.descendants(root).filter(|&id| tree.is_element(id)));
    }
    out.into_vec()
}
