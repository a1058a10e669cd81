//! `data-*` attribute values
//!
//! Values are typed the way jQuery's `.data()` does it: JSON for object and
//! array literals, booleans, numbers only when they print back unchanged,
//! strings otherwise.

use hq_dom::{to_camel_case, to_kebab_case, DomTree, NodeId, DATA_PREFIX};
use serde_json::{Map, Number, Value};

/// Coerce one attribute value; `None` means "no value"
pub(crate) fn coerce(raw: &str) -> Option<Value> {
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with('{') || raw.starts_with('[') {
        return Some(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())));
    }
    match raw {
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        "null" | "undefined" => return None,
        _ => {}
    }
    Some(number(raw).unwrap_or_else(|| Value::String(raw.to_string())))
}

/// A number whose shortest rendering is exactly `raw`
fn number(raw: &str) -> Option<Value> {
    let f: f64 = raw.parse().ok()?;
    if !f.is_finite() || f.to_string() != raw {
        return None;
    }
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        return Some(Value::from(f as i64));
    }
    Number::from_f64(f).map(Value::Number)
}

pub(crate) fn data_value(tree: &DomTree, id: NodeId, name: &str) -> Option<Value> {
    let key = format!("{DATA_PREFIX}{}", to_kebab_case(name));
    tree.attr(id, &key).and_then(coerce)
}

/// Every `data-*` key; keys without a value map to `null`
pub(crate) fn data_map(tree: &DomTree, id: NodeId) -> Map<String, Value> {
    let mut out = Map::new();
    for attr in tree.attrs(id) {
        let Some(suffix) = tree.resolve(attr.local).strip_prefix(DATA_PREFIX) else {
            continue;
        };
        if suffix.is_empty() {
            continue;
        }
        let value = coerce(&attr.value).unwrap_or(Value::Null);
        out.insert(to_camel_case(suffix), value);
    }
    out
}
