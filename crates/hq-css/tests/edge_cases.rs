//! Edge case tests for hq-css
//!
//! Selector grammar corners, namespaces and matching against odd trees.

use hq_css::{ElementRef, Selector, SelectorError};
use hq_html::parse;

fn count(html: &str, selector: &str) -> usize {
    let doc = parse(html).unwrap();
    let tree = doc.tree();
    Selector::parse(selector)
        .unwrap()
        .select(tree, &[tree.root()])
        .len()
}

// ============================================================================
// PARSE ERRORS
// ============================================================================

#[test]
fn test_error_mentions_source() {
    let err = Selector::parse("div >").unwrap_err();
    let SelectorError::Invalid { selector, .. } = &err;
    assert_eq!(selector, "div >");
    assert!(err.to_string().starts_with("invalid selector 'div >'"));
}

#[test]
fn test_pseudo_elements_rejected() {
    assert!(Selector::parse("p::before").is_err());
}

#[test]
fn test_unknown_pseudo_class_rejected() {
    assert!(Selector::parse("a:visited").is_err());
    assert!(Selector::parse("a:focus").is_err());
}

#[test]
fn test_pseudo_class_names_case_insensitive() {
    assert_eq!(count("<input type=checkbox checked>", "input:CHECKED"), 1);
}

// ============================================================================
// COMBINATORS AND GROUPS
// ============================================================================

#[test]
fn test_selector_group_document_order() {
    let doc = parse("<h1>a</h1><p>b</p><h1>c</h1>").unwrap();
    let tree = doc.tree();
    let found = Selector::parse("p, h1")
        .unwrap()
        .select(tree, &[tree.root()]);
    let names: Vec<_> = found.iter().map(|&id| tree.text_content(id)).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_sibling_combinators() {
    let html = "<div><h2>t</h2><p>1</p><span>x</span><p>2</p></div>";
    assert_eq!(count(html, "h2 + p"), 1);
    assert_eq!(count(html, "h2 ~ p"), 2);
    assert_eq!(count(html, "div > p"), 2);
}

#[test]
fn test_is_and_where() {
    let html = "<section><p>a</p></section><article><p>b</p></article><aside><p>c</p></aside>";
    assert_eq!(count(html, ":is(section, article) p"), 2);
    assert_eq!(count(html, ":where(aside) > p"), 1);
}

#[test]
fn test_root_matches_html() {
    let doc = parse("<p>x</p>").unwrap();
    let tree = doc.tree();
    let found = Selector::parse(":root").unwrap().select(tree, &[tree.root()]);
    assert_eq!(found, vec![doc.document_element().unwrap()]);
}

// ============================================================================
// WHITESPACE, TEXT AND EMPTINESS
// ============================================================================

#[test]
fn test_empty_ignores_comments_not_whitespace() {
    assert_eq!(count("<div><!-- c --></div>", "div:empty"), 1);
    assert_eq!(count("<div> </div>", "div:empty"), 0);
}

#[test]
fn test_class_whitespace_separated() {
    let html = "<p class=\"  one\ttwo\nthree \">x</p>";
    assert_eq!(count(html, ".one.two.three"), 1);
}

#[test]
fn test_id_case_sensitive() {
    assert_eq!(count("<p id=Main>x</p>", "#main"), 0);
    assert_eq!(count("<p id=Main>x</p>", "#Main"), 1);
}

// ============================================================================
// NAMESPACES
// ============================================================================

#[test]
fn test_svg_elements_selectable() {
    let html = r#"<svg><circle r="1"/><rect/></svg>"#;
    assert_eq!(count(html, "svg circle"), 1);
    assert_eq!(count(html, "svg > *"), 2);
}

#[test]
fn test_element_ref_rejects_text() {
    let doc = parse("<p>hi</p>").unwrap();
    let tree = doc.tree();
    let p = Selector::parse("p").unwrap().select(tree, &[tree.root()])[0];
    assert!(ElementRef::new(tree, p).is_some());
    assert!(ElementRef::new(tree, tree.first_child(p).unwrap()).is_none());
}

// ============================================================================
// FILTER
// ============================================================================

#[test]
fn test_filter_preserves_order_and_drops_non_elements() {
    let doc = parse("<ul><li class=a>1</li><li>2</li><li class=a>3</li></ul>").unwrap();
    let tree = doc.tree();
    let ul = Selector::parse("ul").unwrap().select(tree, &[tree.root()])[0];
    let children: Vec<_> = tree.children(ul).collect();
    let filtered = Selector::parse(".a").unwrap().filter(tree, &children);
    let texts: Vec<_> = filtered.iter().map(|&id| tree.text_content(id)).collect();
    assert_eq!(texts, vec!["1", "3"]);
}
