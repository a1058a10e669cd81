//! Edge case tests for hq-html
//!
//! Malformed markup, odd inputs and serializer round trips.

use hq_html::{inner_html, outer_html, parse, HtmlParser};

// ============================================================================
// EMPTY AND MINIMAL INPUT
// ============================================================================

#[test]
fn test_parse_empty() {
    let doc = parse("").unwrap();
    // html5ever always synthesizes html/head/body
    assert!(doc.document_element().is_some());
    assert!(doc.body().is_some());
}

#[test]
fn test_parse_null_bytes() {
    let doc = parse("Hello\0World").unwrap();
    assert!(doc.tree().len() > 1);
}

#[test]
fn test_parse_only_doctype() {
    let doc = parse("<!DOCTYPE html>").unwrap();
    let tree = doc.tree();
    let first = tree.first_child(tree.root()).unwrap();
    assert_eq!(outer_html(tree, first), "<!DOCTYPE html>");
}

// ============================================================================
// MALFORMED HTML
// ============================================================================

#[test]
fn test_parse_unclosed_tags() {
    let doc = parse("<div><p><span>text").unwrap();
    let body = doc.body().unwrap();
    assert_eq!(inner_html(doc.tree(), body), "<div><p><span>text</span></p></div>");
}

#[test]
fn test_parse_mismatched_tags() {
    let doc = parse("<div><p></div></p>").unwrap();
    assert!(doc.tree().len() > 1);
}

#[test]
fn test_parse_deep_nesting() {
    let html = "<div>".repeat(2000);
    let doc = parse(&html).unwrap();
    assert!(doc.tree().len() > 2000);
}

// ============================================================================
// SERIALIZATION
// ============================================================================

#[test]
fn test_inner_html_round_trip() {
    let doc = parse(r#"<body><span id="s"><b>test content</b></span></body>"#).unwrap();
    let span = doc.get_element_by_id("s").unwrap();
    assert_eq!(inner_html(doc.tree(), span), "<b>test content</b>");
    assert_eq!(outer_html(doc.tree(), span), r#"<span id="s"><b>test content</b></span>"#);
}

#[test]
fn test_entities_are_reescaped() {
    let doc = parse("<body><p id=\"p\">a &amp; b &lt; c</p></body>").unwrap();
    let p = doc.get_element_by_id("p").unwrap();
    assert_eq!(doc.tree().text_content(p), "a & b < c");
    assert_eq!(inner_html(doc.tree(), p), "a &amp; b &lt; c");
}

#[test]
fn test_comments_preserved() {
    let doc = parse("<body><div id=\"d\"><!-- note --></div></body>").unwrap();
    let d = doc.get_element_by_id("d").unwrap();
    assert_eq!(inner_html(doc.tree(), d), "<!-- note -->");
}

#[test]
fn test_template_content_as_children() {
    let doc = parse("<body><template id=\"t\"><p>x</p></template></body>").unwrap();
    let t = doc.get_element_by_id("t").unwrap();
    assert_eq!(inner_html(doc.tree(), t), "<p>x</p>");
}

#[test]
fn test_noscript_without_scripting() {
    let doc = HtmlParser::new()
        .scripting(false)
        .parse("<body><noscript><p id=\"n\">fallback</p></noscript></body>")
        .unwrap();
    assert!(doc.get_element_by_id("n").is_some());
}
