//! `selectors::Element` implementation for the arena DOM

use std::fmt;

use cssparser::{CowRcStr, ParseError, SourceLocation, ToCss};
use hq_dom::{DomTree, Namespace, Node, NodeData, NodeId};
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::context::MatchingContext;
use selectors::matching::ElementSelectorFlags;
use selectors::parser::SelectorParseErrorKind;
use selectors::{OpaqueElement, SelectorImpl};

/// Selector implementation marker for the `selectors` crate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HqSelectors;

/// String type used for every selector atom (names, ids, values, namespaces)
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct CssString(pub String);

impl precomputed_hash::PrecomputedHash for CssString {
    fn precomputed_hash(&self) -> u32 {
        let mut h: u32 = 0;
        for byte in self.0.bytes() {
            h = h.wrapping_mul(31).wrapping_add(byte as u32);
        }
        h
    }
}

impl ToCss for CssString {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(&self.0)
    }
}

impl From<String> for CssString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'a> From<&'a str> for CssString {
    fn from(s: &'a str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for CssString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Pseudo-elements never match a static document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoElement {}

impl ToCss for PseudoElement {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl selectors::parser::PseudoElement for PseudoElement {
    type Impl = HqSelectors;

    fn accepts_state_pseudo_classes(&self) -> bool {
        false
    }

    fn valid_after_slotted(&self) -> bool {
        false
    }
}

/// State pseudo-classes answerable from markup alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonTSPseudoClass {
    Checked,
    Selected,
    Disabled,
    Enabled,
    Link,
    AnyLink,
    Required,
    Optional,
    ReadOnly,
    ReadWrite,
}

impl selectors::parser::NonTSPseudoClass for NonTSPseudoClass {
    type Impl = HqSelectors;

    fn is_active_or_hover(&self) -> bool {
        false
    }

    fn is_user_action_state(&self) -> bool {
        false
    }
}

impl ToCss for NonTSPseudoClass {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(match self {
            Self::Checked => ":checked",
            Self::Selected => ":selected",
            Self::Disabled => ":disabled",
            Self::Enabled => ":enabled",
            Self::Link => ":link",
            Self::AnyLink => ":any-link",
            Self::Required => ":required",
            Self::Optional => ":optional",
            Self::ReadOnly => ":read-only",
            Self::ReadWrite => ":read-write",
        })
    }
}

impl SelectorImpl for HqSelectors {
    type ExtraMatchingData<'a> = ();
    type AttrValue = CssString;
    type Identifier = CssString;
    type LocalName = CssString;
    type NamespaceUrl = CssString;
    type NamespacePrefix = CssString;
    type BorrowedLocalName = CssString;
    type BorrowedNamespaceUrl = CssString;
    type NonTSPseudoClass = NonTSPseudoClass;
    type PseudoElement = PseudoElement;
}

impl<'i> selectors::parser::Parser<'i> for HqSelectors {
    type Impl = HqSelectors;
    type Error = SelectorParseErrorKind<'i>;

    fn parse_is_and_where(&self) -> bool {
        true
    }

    fn parse_non_ts_pseudo_class(
        &self,
        location: SourceLocation,
        name: CowRcStr<'i>,
    ) -> Result<NonTSPseudoClass, ParseError<'i, Self::Error>> {
        let pc = match name.to_ascii_lowercase().as_str() {
            "checked" => NonTSPseudoClass::Checked,
            "selected" => NonTSPseudoClass::Selected,
            "disabled" => NonTSPseudoClass::Disabled,
            "enabled" => NonTSPseudoClass::Enabled,
            "link" => NonTSPseudoClass::Link,
            "any-link" => NonTSPseudoClass::AnyLink,
            "required" => NonTSPseudoClass::Required,
            "optional" => NonTSPseudoClass::Optional,
            "read-only" => NonTSPseudoClass::ReadOnly,
            "read-write" => NonTSPseudoClass::ReadWrite,
            _ => {
                return Err(location.new_custom_error(
                    SelectorParseErrorKind::UnsupportedPseudoClassOrElement(name),
                ))
            }
        };
        Ok(pc)
    }
}

/// Tags that can be disabled
const DISABLEABLE: &[&str] = &[
    "button", "input", "select", "textarea", "optgroup", "option", "fieldset",
];

/// Namespace URI of a prefixed (foreign) attribute
fn attr_namespace(prefix: &str) -> &'static str {
    match prefix {
        "xlink" => "http://www.w3.org/1999/xlink",
        "xml" => "http://www.w3.org/XML/1998/namespace",
        "xmlns" => "http://www.w3.org/2000/xmlns/",
        _ => "",
    }
}

/// An element of a [`DomTree`] as seen by the selector matcher
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    pub tree: &'a DomTree,
    pub id: NodeId,
}

impl<'a> ElementRef<'a> {
    /// Wrap `id` if it is an element
    pub fn new(tree: &'a DomTree, id: NodeId) -> Option<Self> {
        tree.is_element(id).then_some(Self { tree, id })
    }

    fn node(&self) -> Option<&'a Node> {
        self.tree.get(self.id)
    }

    fn tag(&self) -> &'a str {
        self.tree.tag_name(self.id).unwrap_or("")
    }

    fn attr(&self, name: &str) -> Option<&'a str> {
        self.tree.attr(self.id, name)
    }

    fn has_attr(&self, name: &str) -> bool {
        self.tree.has_attr(self.id, name)
    }

    fn is_hyperlink(&self) -> bool {
        matches!(self.tag(), "a" | "area" | "link") && self.has_attr("href")
    }

    fn is_disabled(&self) -> bool {
        DISABLEABLE.contains(&self.tag()) && self.has_attr("disabled")
    }

    fn is_checked(&self) -> bool {
        match self.tag() {
            "input" => {
                let kind = self.attr("type").unwrap_or("").to_ascii_lowercase();
                (kind == "checkbox" || kind == "radio") && self.has_attr("checked")
            }
            "option" => self.has_attr("selected"),
            _ => false,
        }
    }

    fn is_read_write(&self) -> bool {
        matches!(self.tag(), "input" | "textarea")
            && !self.has_attr("readonly")
            && !self.has_attr("disabled")
    }
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("name", &self.tree.tag_name(self.id))
            .finish()
    }
}

impl<'a> selectors::Element for ElementRef<'a> {
    type Impl = HqSelectors;

    fn opaque(&self) -> OpaqueElement {
        // Arena slots never move while a match is running
        match self.node() {
            Some(node) => OpaqueElement::new(node),
            None => OpaqueElement::new(self.tree),
        }
    }

    fn parent_element(&self) -> Option<Self> {
        let parent = self.tree.parent(self.id)?;
        Self::new(self.tree, parent)
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        self.tree
            .preceding_siblings(self.id)
            .find_map(|id| Self::new(self.tree, id))
    }

    fn next_sibling_element(&self) -> Option<Self> {
        self.tree
            .following_siblings(self.id)
            .find_map(|id| Self::new(self.tree, id))
    }

    fn first_element_child(&self) -> Option<Self> {
        self.tree
            .children(self.id)
            .find_map(|id| Self::new(self.tree, id))
    }

    fn is_html_element_in_html_document(&self) -> bool {
        self.tree.namespace(self.id) == Some(Namespace::Html)
    }

    fn has_local_name(&self, name: &CssString) -> bool {
        self.tag() == name.0
    }

    fn has_namespace(&self, ns: &CssString) -> bool {
        self.tree
            .namespace(self.id)
            .is_some_and(|n| n.uri() == ns.0)
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.tag() == other.tag() && self.tree.namespace(self.id) == other.tree.namespace(other.id)
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&CssString>,
        local_name: &CssString,
        operation: &AttrSelectorOperation<&CssString>,
    ) -> bool {
        self.tree.attrs(self.id).iter().any(|attr| {
            if self.tree.resolve(attr.local) != local_name.0 {
                return false;
            }
            let ns_match = match ns {
                NamespaceConstraint::Any => true,
                NamespaceConstraint::Specific(url) => {
                    attr_namespace(self.tree.resolve(attr.prefix)) == url.0
                }
            };
            ns_match && operation.eval_str(&attr.value)
        })
    }

    fn match_non_ts_pseudo_class(
        &self,
        pc: &NonTSPseudoClass,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match pc {
            NonTSPseudoClass::Checked => self.is_checked(),
            NonTSPseudoClass::Selected => self.tag() == "option" && self.has_attr("selected"),
            NonTSPseudoClass::Disabled => self.is_disabled(),
            NonTSPseudoClass::Enabled => DISABLEABLE.contains(&self.tag()) && !self.is_disabled(),
            NonTSPseudoClass::Link | NonTSPseudoClass::AnyLink => self.is_hyperlink(),
            NonTSPseudoClass::Required => {
                matches!(self.tag(), "input" | "select" | "textarea") && self.has_attr("required")
            }
            NonTSPseudoClass::Optional => {
                matches!(self.tag(), "input" | "select" | "textarea") && !self.has_attr("required")
            }
            NonTSPseudoClass::ReadOnly => !self.is_read_write(),
            NonTSPseudoClass::ReadWrite => self.is_read_write(),
        }
    }

    fn match_pseudo_element(
        &self,
        pe: &PseudoElement,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match *pe {}
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn is_link(&self) -> bool {
        self.is_hyperlink()
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(&self, id: &CssString, case_sensitivity: CaseSensitivity) -> bool {
        self.attr("id")
            .is_some_and(|own| case_sensitivity.eq(own.as_bytes(), id.0.as_bytes()))
    }

    fn has_class(&self, name: &CssString, case_sensitivity: CaseSensitivity) -> bool {
        self.attr("class").is_some_and(|classes| {
            classes
                .split_ascii_whitespace()
                .any(|c| case_sensitivity.eq(c.as_bytes(), name.0.as_bytes()))
        })
    }

    fn imported_part(&self, _name: &CssString) -> Option<CssString> {
        None
    }

    fn is_part(&self, _name: &CssString) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        self.tree.children(self.id).all(|child| match self.tree.get(child).map(|n| &n.data) {
            Some(NodeData::Element(_)) => false,
            Some(NodeData::Text(t)) => t.is_empty(),
            _ => true,
        })
    }

    fn is_root(&self) -> bool {
        self.tree
            .parent(self.id)
            .and_then(|p| self.tree.get(p))
            .is_some_and(Node::is_document)
    }

    fn add_element_unique_hashes(&self, _filter: &mut selectors::bloom::BloomFilter) -> bool {
        false
    }

    fn has_custom_state(&self, _name: &CssString) -> bool {
        false
    }
}
