//! String interner for tag and attribute names
//!
//! A parsed page repeats a handful of names ("div", "class", "href") many
//! thousands of times. Each distinct name is stored once and referenced by a
//! 4-byte [`InternedString`].

use std::collections::HashMap;

/// Interned string id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub u32);

impl InternedString {
    /// The empty string, always interned first
    pub const EMPTY: InternedString = InternedString(0);
}

/// Name table shared by every node of one tree
#[derive(Debug)]
pub struct StringInterner {
    strings: Vec<Box<str>>,
    map: HashMap<Box<str>, u32>,
}

/// Names seeded into every interner so form handling never allocates them
const COMMON_NAMES: &[&str] = &[
    "html", "head", "body", "div", "span", "p", "a", "img", "ul", "ol", "li",
    "table", "tr", "td", "th", "thead", "tbody", "tfoot", "form", "input",
    "button", "select", "option", "optgroup", "textarea", "label", "keygen",
    "id", "class", "href", "src", "action", "name", "value", "type",
    "disabled", "checked", "selected", "multiple",
];

impl StringInterner {
    /// Create an interner with common HTML names pre-interned
    pub fn new() -> Self {
        let mut interner = Self {
            strings: Vec::with_capacity(128),
            map: HashMap::with_capacity(128),
        };
        interner.intern("");
        for name in COMMON_NAMES {
            interner.intern(name);
        }
        interner
    }

    /// Intern a string, returning the existing id when already known
    pub fn intern(&mut self, s: &str) -> InternedString {
        if let Some(&idx) = self.map.get(s) {
            return InternedString(idx);
        }
        let idx = self.strings.len() as u32;
        self.strings.push(s.into());
        self.map.insert(s.into(), idx);
        InternedString(idx)
    }

    /// Look up a string without interning it
    pub fn lookup(&self, s: &str) -> Option<InternedString> {
        self.map.get(s).map(|&idx| InternedString(idx))
    }

    /// Resolve an id back to its string
    #[inline]
    pub fn get(&self, id: InternedString) -> &str {
        self.strings.get(id.0 as usize).map_or("", |s| &**s)
    }

    /// Number of distinct strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
