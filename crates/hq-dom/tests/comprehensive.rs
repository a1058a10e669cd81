//! Comprehensive tests for hq-dom
//!
//! Tree linking, walking order and name handling.

use hq_dom::{to_camel_case, to_kebab_case, DomTree, Namespace, NodeId, NodeType, StringInterner};

// ============================================================================
// STRING INTERNER
// ============================================================================

#[test]
fn test_string_interner_deduplication() {
    let mut interner = StringInterner::new();

    let id1 = interner.intern("hello");
    let id2 = interner.intern("hello");
    assert_eq!(id1, id2, "Same string should return same ID");

    let id3 = interner.intern("world");
    assert_ne!(id1, id3, "Different strings should have different IDs");
}

#[test]
fn test_string_interner_memory_efficiency() {
    let mut interner = StringInterner::new();
    let before = interner.len();

    for _ in 0..1000 {
        interner.intern("div");
        interner.intern("span");
        interner.intern("data-role");
    }

    assert_eq!(interner.len(), before + 1, "only data-role is new");
}

// ============================================================================
// TREE STRUCTURE
// ============================================================================

#[test]
fn test_dom_tree_creation() {
    let mut tree = DomTree::new();

    let div = tree.create_element("div");
    let span = tree.create_element("span");
    let text = tree.create_text("Hello, World!");

    tree.append_child(tree.root(), div);
    tree.append_child(div, span);
    tree.append_child(span, text);

    assert_eq!(tree.len(), 4); // root + div + span + text

    let div_node = tree.get(div).unwrap();
    assert_eq!(div_node.parent, tree.root());
    assert_eq!(div_node.first_child, span);

    let span_node = tree.get(span).unwrap();
    assert_eq!(span_node.parent, div);
    assert_eq!(span_node.first_child, text);
    assert_eq!(tree.get(text).unwrap().node_type(), NodeType::Text);
}

#[test]
fn test_dom_tree_siblings() {
    let mut tree = DomTree::new();

    let div = tree.create_element("div");
    let child1 = tree.create_element("p");
    let child2 = tree.create_element("p");
    let child3 = tree.create_element("p");

    tree.append_child(tree.root(), div);
    tree.append_child(div, child1);
    tree.append_child(div, child2);
    tree.append_child(div, child3);

    let node1 = tree.get(child1).unwrap();
    assert_eq!(node1.next_sibling, child2);
    assert!(!node1.prev_sibling.is_valid());

    let node3 = tree.get(child3).unwrap();
    assert_eq!(node3.prev_sibling, child2);
    assert!(!node3.next_sibling.is_valid());

    assert_eq!(tree.last_child(div), Some(child3));
    assert_eq!(tree.children(div).count(), 3);
}

#[test]
fn test_missing_links_are_none() {
    let tree = DomTree::new();
    assert_eq!(tree.parent(tree.root()), None);
    assert_eq!(tree.first_child(tree.root()), None);
    assert!(tree.get(NodeId::NONE).is_none());
    assert_eq!(tree.text_content(NodeId::NONE), "");
}

#[test]
fn test_deep_tree_walk() {
    let mut tree = DomTree::new();
    let mut parent = tree.root();
    for _ in 0..500 {
        let child = tree.create_element("div");
        tree.append_child(parent, child);
        parent = child;
    }
    assert_eq!(tree.descendants(tree.root()).count(), 500);
    assert_eq!(tree.ancestors(parent).count(), 500);
}

#[test]
fn test_foreign_namespace() {
    let mut tree = DomTree::new();
    let svg = tree.create_element_ns(Namespace::Svg, "svg");
    tree.append_child(tree.root(), svg);
    assert_eq!(tree.namespace(svg), Some(Namespace::Svg));
    assert_eq!(tree.tag_name(svg), Some("svg"));
}

// ============================================================================
// DATA ATTRIBUTE NAMES
// ============================================================================

#[test]
fn test_data_name_round_trip() {
    for name in ["numA", "testB", "opts", "userFirstName"] {
        assert_eq!(to_camel_case(&to_kebab_case(name)), name);
    }
}
