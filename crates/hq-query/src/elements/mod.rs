//! Tag-specific element behavior
//!
//! Behavior shared by unrelated tags lives in capability traits
//! ([`HrefCapable`], [`FormAssociated`], [`FormField`], [`TableCell`],
//! [`TableSection`]). Each tag gets a thin typed view, reached through
//! `Element::as_*`, that implements the traits it supports:
//!
//! ```text
//! Element ──as_anchor()──► AnchorElement ──impl──► HrefCapable
//!         ──as_input()───► InputElement  ──impl──► FormAssociated + FormField
//!         ──as_table_cell()──► TableCellElement ──► TableCell
//! ```

use crate::attribute::resolve_url;
use crate::{Element, Selection};

/// Declare typed views over [`Element`] for a set of tags
macro_rules! element_views {
    ($($(#[$meta:meta])* $name:ident => $as_fn:ident [$($tag:literal),+];)+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy)]
            pub struct $name<'a>(&'a $crate::Element);

            impl $crate::elements::ElementView for $name<'_> {
                fn element(&self) -> &$crate::Element {
                    self.0
                }
            }

            impl std::ops::Deref for $name<'_> {
                type Target = $crate::Element;

                fn deref(&self) -> &$crate::Element {
                    self.0
                }
            }

            impl $crate::Element {
                #[doc = concat!("View as [`", stringify!($name), "`] when the tag matches")]
                pub fn $as_fn(&self) -> Option<$name<'_>> {
                    matches!(self.tag_name().as_str(), $($tag)|+).then_some($name(self))
                }
            }
        )+
    };
}

mod forms;
mod href;
mod media;
mod table;

pub use forms::{
    ButtonElement, DataListElement, FieldSetElement, FormAssociated, FormElement, FormField,
    InputElement, KeygenElement, LabelElement, LegendElement, MeterElement, ObjectElement,
    OptionElement, OutputElement, ProgressElement, SelectElement, TextAreaElement,
};
pub use href::{AnchorElement, AreaElement, HrefCapable};
pub use media::{CanvasElement, ImageElement, MapElement, MediaElement};
pub use table::{
    TableCell, TableCellElement, TableColElement, TableElement, TableRowElement, TableSection,
    TableSectionElement,
};

/// Access to the wrapped element from a typed view
pub trait ElementView {
    fn element(&self) -> &Element;
}

/// Behavior groups shared across tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// URL decomposition of `href` (`a`, `area`)
    Href,
    /// Owning form and labels
    FormAssociated,
    /// `form*` submission overrides (`button`, `input`)
    FormField,
    TableCell,
    TableSection,
}

/// Capabilities a tag supports; empty for tags without shared behavior
pub fn capabilities_for(tag: &str) -> &'static [Capability] {
    use Capability::*;
    match tag {
        "a" | "area" => &[Href],
        "button" | "input" => &[FormAssociated, FormField],
        "select" | "textarea" | "fieldset" | "label" | "legend" | "object" | "output"
        | "keygen" | "meter" | "progress" => &[FormAssociated],
        "td" | "th" => &[TableCell],
        "thead" | "tbody" | "tfoot" => &[TableSection],
        _ => &[],
    }
}

impl Element {
    pub fn capabilities(&self) -> &'static [Capability] {
        capabilities_for(&self.tag_name())
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Attribute value, "" when absent
    pub fn attr_as_string(&self, name: &str) -> String {
        self.attr(name).unwrap_or("").to_string()
    }

    /// Integer attribute; `default` when absent or not an integer
    pub fn attr_as_int(&self, name: &str, default: i64) -> i64 {
        self.attr(name)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    pub fn attr_is_present(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// The attribute value if it is one of `options`, else the first option
    pub fn attr_as_enum(&self, name: &str, options: &[&'static str]) -> &'static str {
        let value = self.attr(name).unwrap_or("");
        options
            .iter()
            .copied()
            .find(|&o| o == value)
            .or_else(|| options.first().copied())
            .unwrap_or("")
    }

    /// Attribute resolved against the base URL, "" when absent
    pub fn attr_as_url(&self, name: &str) -> String {
        self.attr(name)
            .map(|v| resolve_url(self.selection().base_url(), v))
            .unwrap_or_default()
    }

    /// Whitespace-separated tokens of an attribute
    pub fn split_attr(&self, name: &str) -> Vec<String> {
        self.attr(name)
            .map(|v| v.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Elements matching `selector` anywhere in the document
    pub(crate) fn document_find(&self, selector: &str) -> Selection {
        self.selection().document_selection().find(selector)
    }

    /// Nearest strict ancestor matching `selector`
    pub(crate) fn ancestor(&self, selector: &str) -> Option<Element> {
        self.selection().parents_filtered(selector).get(0)
    }

    /// Descendants matching `selector`, as elements
    pub(crate) fn find_all(&self, selector: &str) -> Vec<Element> {
        self.selection().find(selector).get_all()
    }

    /// Position of this element among `list`
    pub(crate) fn position_in(&self, list: &Selection) -> Option<usize> {
        list.index_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_html;

    #[test]
    fn test_capabilities_for() {
        assert_eq!(capabilities_for("a"), &[Capability::Href]);
        assert!(capabilities_for("input").contains(&Capability::FormField));
        assert!(capabilities_for("select").contains(&Capability::FormAssociated));
        assert!(!capabilities_for("select").contains(&Capability::FormField));
        assert!(capabilities_for("div").is_empty());
    }

    #[test]
    fn test_attr_helpers() {
        let doc = parse_html(r#"<i a="12" b="x" c=" 7 " rel="one  two"></i>"#).unwrap();
        let i = doc.find("i").get(0).unwrap();
        assert_eq!(i.attr_as_int("a", 0), 12);
        assert_eq!(i.attr_as_int("b", 5), 5);
        assert_eq!(i.attr_as_int("c", 0), 7);
        assert_eq!(i.attr_as_int("missing", -1), -1);
        assert_eq!(i.attr_as_string("missing"), "");
        assert!(i.attr_is_present("b"));
        assert_eq!(i.split_attr("rel"), vec!["one", "two"]);
    }

    #[test]
    fn test_attr_as_enum_defaults_to_first() {
        let doc = parse_html(r#"<i x="b" y="z"></i>"#).unwrap();
        let i = doc.find("i").get(0).unwrap();
        assert_eq!(i.attr_as_enum("x", &["a", "b"]), "b");
        assert_eq!(i.attr_as_enum("y", &["a", "b"]), "a");
        assert_eq!(i.attr_as_enum("none", &["a", "b"]), "a");
    }

    #[test]
    fn test_views_match_tag() {
        let doc = parse_html("<a href=x>x</a><div></div>").unwrap();
        assert!(doc.find("a").get(0).unwrap().as_anchor().is_some());
        assert!(doc.find("div").get(0).unwrap().as_anchor().is_none());
    }
}
