//! HTML serialization (innerHTML/outerHTML)
//!
//! Follows the HTML fragment serialization algorithm: void elements get no end
//! tag, raw-text elements are written unescaped and attribute values are
//! always quoted.

use hq_dom::{DomTree, NodeData, NodeId};

/// Void elements (no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text children are not escaped
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Serialize the children of a node
pub fn inner_html(tree: &DomTree, node_id: NodeId) -> String {
    let mut output = String::new();
    serialize_children(tree, node_id, &mut output);
    output
}

/// Serialize a node including itself
pub fn outer_html(tree: &DomTree, node_id: NodeId) -> String {
    let mut output = String::new();
    serialize_node(tree, node_id, &mut output);
    output
}

fn serialize_node(tree: &DomTree, node_id: NodeId, output: &mut String) {
    let Some(node) = tree.get(node_id) else {
        return;
    };

    match &node.data {
        NodeData::Document => serialize_children(tree, node_id, output),
        NodeData::Element(elem) => {
            let tag = tree.resolve(elem.name.local);

            output.push('<');
            output.push_str(tag);
            for attr in &elem.attrs {
                output.push(' ');
                let prefix = tree.resolve(attr.prefix);
                if !prefix.is_empty() {
                    output.push_str(prefix);
                    output.push(':');
                }
                output.push_str(tree.resolve(attr.local));
                output.push_str("=\"");
                escape_attribute(&attr.value, output);
                output.push('"');
            }
            output.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            if RAW_TEXT_ELEMENTS.contains(&tag) {
                for child in tree.children(node_id) {
                    if let Some(text) = tree.get(child).and_then(|n| n.as_text()) {
                        output.push_str(text);
                    }
                }
            } else {
                serialize_children(tree, node_id, output);
            }

            output.push_str("</");
            output.push_str(tag);
            output.push('>');
        }
        NodeData::Text(text) => escape_text(text, output),
        NodeData::Comment(text) => {
            output.push_str("<!--");
            output.push_str(text);
            output.push_str("-->");
        }
        NodeData::Doctype { name, .. } => {
            output.push_str("<!DOCTYPE ");
            output.push_str(tree.resolve(*name));
            output.push('>');
        }
        NodeData::ProcessingInstruction { target, data } => {
            output.push_str("<?");
            output.push_str(tree.resolve(*target));
            if !data.is_empty() {
                output.push(' ');
                output.push_str(data);
            }
            output.push('>');
        }
    }
}

fn serialize_children(tree: &DomTree, parent_id: NodeId, output: &mut String) {
    for child_id in tree.children(parent_id) {
        serialize_node(tree, child_id, output);
    }
}

/// Escape text content
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// Escape an attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            '"' => output.push_str("&quot;"),
            _ => output.push(c),
        }
    }
}
