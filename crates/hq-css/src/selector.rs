//! Compiled selector lists

use std::collections::HashSet;
use std::fmt;

use hq_dom::{DomTree, NodeId};
use selectors::context::{
    MatchingContext, MatchingForInvalidation, MatchingMode, NeedsSelectorFlags, QuirksMode,
    SelectorCaches,
};
use selectors::parser::{ParseRelative, SelectorList};

use crate::{ElementRef, HqSelectors, SelectorError};

/// A compiled, comma-separated selector group
#[derive(Clone)]
pub struct Selector {
    source: String,
    selectors: SelectorList<HqSelectors>,
}

impl Selector {
    /// Compile a selector group
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let mut input = cssparser::ParserInput::new(source);
        let mut parser = cssparser::Parser::new(&mut input);
        let selectors = SelectorList::parse(&HqSelectors, &mut parser, ParseRelative::No)
            .map_err(|e| SelectorError::Invalid {
                selector: source.to_string(),
                reason: format!("{:?}", e.kind),
            })?;
        Ok(Self {
            source: source.to_string(),
            selectors,
        })
    }

    /// The source text this selector was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `id` is an element matching any selector in the group
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        let Some(element) = ElementRef::new(tree, id) else {
            return false;
        };
        let mut caches = SelectorCaches::default();
        let mut context = MatchingContext::new(
            MatchingMode::Normal,
            None,
            &mut caches,
            QuirksMode::NoQuirks,
            NeedsSelectorFlags::No,
            MatchingForInvalidation::No,
        );
        self.selectors.slice().iter().any(|selector| {
            selectors::matching::matches_selector(selector, 0, None, &element, &mut context)
        })
    }

    /// Matching strict descendants of `roots`, in document order per root,
    /// without duplicates
    pub fn select(&self, tree: &DomTree, roots: &[NodeId]) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = Vec::new();
        let mut seen = HashSet::new();
        for &root in roots {
            for id in tree.descendants(root) {
                if !seen.contains(&id) && self.matches(tree, id) {
                    seen.insert(id);
                    out.push(id);
                }
            }
        }
        out
    }

    /// The subset of `nodes` that match, order preserved
    pub fn filter(&self, tree: &DomTree, nodes: &[NodeId]) -> Vec<NodeId> {
        nodes
            .iter()
            .copied()
            .filter(|&id| self.matches(tree, id))
            .collect()
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Selector").field(&self.source).finish()
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> hq_dom::Document {
        hq_html::parse(html).unwrap()
    }

    fn tags(tree: &DomTree, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|&id| tree.tag_name(id).unwrap_or("").to_string())
            .collect()
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Selector::parse("div[").is_err());
        assert!(Selector::parse(":hover-nope").is_err());
        assert!(Selector::parse("").is_err());
    }

    #[test]
    fn test_type_and_class() {
        let d = doc("<div class='a b'><p class='b'>x</p><span>y</span></div>");
        let tree = d.tree();
        let sel = Selector::parse(".b").unwrap();
        let found = sel.select(tree, &[tree.root()]);
        assert_eq!(tags(tree, &found), vec!["div", "p"]);
    }

    #[test]
    fn test_select_excludes_roots() {
        let d = doc("<div><div><div></div></div></div>");
        let tree = d.tree();
        let sel = Selector::parse("div").unwrap();
        let all = sel.select(tree, &[tree.root()]);
        assert_eq!(all.len(), 3);
        let below_first = sel.select(tree, &all[..1]);
        assert_eq!(below_first, all[1..].to_vec());
    }

    #[test]
    fn test_select_dedups_overlapping_roots() {
        let d = doc("<ul><li><ul><li>a</li></ul></li></ul>");
        let tree = d.tree();
        let ul = Selector::parse("ul").unwrap().select(tree, &[tree.root()]);
        let li = Selector::parse("li").unwrap().select(tree, &ul);
        assert_eq!(li.len(), 2);
    }

    #[test]
    fn test_select_repeated_roots_keep_first_order() {
        let d = doc("<div><b>1</b><b>2</b></div><p><b>3</b></p>");
        let tree = d.tree();
        let roots = Selector::parse("div,p").unwrap().select(tree, &[tree.root()]);
        let sel = Selector::parse("b").unwrap();
        let found = sel.select(tree, &[roots[1], roots[0], roots[1]]);
        let text: Vec<String> = found.iter().map(|&id| tree.text_content(id)).collect();
        assert_eq!(text, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_attribute_operators() {
        let d = doc(r#"<a href="http://x.io/a.pdf" lang="en-US">a</a><a href="/b">b</a>"#);
        let tree = d.tree();
        let root = [tree.root()];
        assert_eq!(Selector::parse("a[href$='.pdf']").unwrap().select(tree, &root).len(), 1);
        assert_eq!(Selector::parse("a[href^='/']").unwrap().select(tree, &root).len(), 1);
        assert_eq!(Selector::parse("a[lang|=en]").unwrap().select(tree, &root).len(), 1);
        assert_eq!(Selector::parse("a[href]").unwrap().select(tree, &root).len(), 2);
    }

    #[test]
    fn test_structural_pseudo_classes() {
        let d = doc("<ul><li>1</li><li>2</li><li>3</li></ul><p></p>");
        let tree = d.tree();
        let root = [tree.root()];
        let first = Selector::parse("li:first-child").unwrap().select(tree, &root);
        assert_eq!(tree.text_content(first[0]), "1");
        let odd = Selector::parse("li:nth-child(odd)").unwrap().select(tree, &root);
        assert_eq!(odd.len(), 2);
        assert_eq!(Selector::parse("p:empty").unwrap().select(tree, &root).len(), 1);
        assert_eq!(Selector::parse("li:not(:last-child)").unwrap().select(tree, &root).len(), 2);
    }

    #[test]
    fn test_form_state_pseudo_classes() {
        let d = doc(
            r#"<form>
                <input type="checkbox" checked>
                <input type="radio">
                <input name="x" disabled>
                <textarea readonly></textarea>
                <select required><option selected>a</option><option>b</option></select>
            </form>"#,
        );
        let tree = d.tree();
        let root = [tree.root()];
        let count = |s: &str| Selector::parse(s).unwrap().select(tree, &root).len();
        assert_eq!(count(":checked"), 2);
        assert_eq!(count("input:disabled"), 1);
        assert_eq!(count("input:enabled"), 2);
        assert_eq!(count("option:selected"), 1);
        assert_eq!(count(":required"), 1);
        assert_eq!(count("textarea:read-only"), 1);
        assert_eq!(count("input:read-write"), 2);
    }

    #[test]
    fn test_link_pseudo_class() {
        let d = doc(r#"<a href="/x">x</a><a name="y">y</a>"#);
        let tree = d.tree();
        let links = Selector::parse(":link").unwrap().select(tree, &[tree.root()]);
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_matches_non_element() {
        let d = doc("<p>text</p>");
        let tree = d.tree();
        let p = Selector::parse("p").unwrap().select(tree, &[tree.root()])[0];
        let text = tree.first_child(p).unwrap();
        assert!(!Selector::parse("*").unwrap().matches(tree, text));
        assert!(!Selector::parse("*").unwrap().matches(tree, tree.root()));
    }

    #[test]
    fn test_as_str_and_from_str() {
        let sel: Selector = "div > p".parse().unwrap();
        assert_eq!(sel.as_str(), "div > p");
    }
}
