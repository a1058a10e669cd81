//! Form values and the successful-control algorithm

use hq_dom::{DomTree, NodeId};
use serde::Serialize;

use crate::Selection;

/// Control tags considered by form serialization
const CONTROLS: &str = "input,select,textarea,keygen";

/// Input types that never submit a value
const EXCLUDED_TYPES: &[&str] = &["submit", "button", "reset", "image", "file"];

/// Value read from a form control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    /// Selected options of a `select[multiple]`
    Multiple(Vec<String>),
}

impl FieldValue {
    /// The single value, or `None` for a multi-value field
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s),
            Self::Multiple(_) => None,
        }
    }

    /// Every value in order
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Single(s) => vec![s.as_str()],
            Self::Multiple(v) => v.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

/// One successful control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormValue {
    pub name: String,
    pub value: FieldValue,
}

/// Explicit `value` attribute, else the inner markup
pub(crate) fn value_or_html(tree: &DomTree, id: NodeId) -> String {
    match tree.attr(id, "value") {
        Some(v) => v.to_string(),
        None => hq_html::inner_html(tree, id),
    }
}

/// `option` descendants of a select, datalist or optgroup
pub(crate) fn options(tree: &DomTree, id: NodeId) -> Vec<NodeId> {
    tree.descendants(id)
        .filter(|&d| tree.is_tag(d, "option"))
        .collect()
}

/// Browser-style value of a control; `None` for nodes that have none
pub(crate) fn value_of(tree: &DomTree, id: NodeId) -> Option<FieldValue> {
    let value = match tree.tag_name(id)? {
        "input" => match tree.attr(id, "value") {
            Some(v) => v.to_string(),
            None => {
                let kind = tree.attr(id, "type").unwrap_or("").to_ascii_lowercase();
                if kind == "checkbox" || kind == "radio" {
                    "on".to_string()
                } else {
                    String::new()
                }
            }
        },
        "button" | "option" => value_or_html(tree, id),
        "textarea" => hq_html::inner_html(tree, id),
        "select" => {
            let opts = options(tree, id);
            let mut selected = opts.iter().filter(|&&o| tree.has_attr(o, "selected"));
            if tree.has_attr(id, "multiple") {
                return Some(FieldValue::Multiple(
                    selected.map(|&o| value_or_html(tree, o)).collect(),
                ));
            }
            match selected.next().or(opts.first()) {
                Some(&o) => value_or_html(tree, o),
                None => String::new(),
            }
        }
        _ => return None,
    };
    Some(FieldValue::Single(value))
}

/// Whether a control submits a value
fn is_successful(tree: &DomTree, id: NodeId) -> bool {
    let name = tree.attr(id, "name").unwrap_or("");
    let kind = tree.attr(id, "type").unwrap_or("").to_ascii_lowercase();
    let disabled = tree.attr(id, "disabled").unwrap_or("false") != "false";
    let checked = tree.attr(id, "checked").unwrap_or("false") != "false";

    let successful = !name.is_empty()
        && !disabled
        && !EXCLUDED_TYPES.contains(&kind.as_str())
        && (checked || (kind != "checkbox" && kind != "radio"));
    if !successful {
        tracing::trace!(name, kind = %kind, disabled, checked, "control not submitted");
    }
    successful
}

pub(crate) fn serialize_array(sel: &Selection) -> Vec<FormValue> {
    let controls = if sel.is("form") {
        sel.find(CONTROLS)
    } else {
        sel.filter(CONTROLS)
    };
    let tree = sel.tree();
    controls
        .node_ids()
        .iter()
        .copied()
        .filter(|&id| is_successful(tree, id))
        .map(|id| FormValue {
            name: tree.attr(id, "name").unwrap_or("").to_string(),
            value: value_of(tree, id).unwrap_or(FieldValue::Single(String::new())),
        })
        .collect()
}

/// `name=value&...` with multi-value fields repeated per value
pub(crate) fn encode(values: &[FormValue]) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for fv in values {
        for v in fv.value.values() {
            query.append_pair(&fv.name, v);
        }
    }
    query.finish()
}
