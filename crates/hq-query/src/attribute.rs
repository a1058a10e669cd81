//! Attribute snapshots and URL resolution

use std::fmt;
use std::rc::{Rc, Weak};

use hq_dom::{Document, Namespace, NodeId};
use url::Url;

use crate::{Element, Selection};

/// Resolve `reference` against `base`. With no base, or when either side
/// fails to parse, the reference is returned unchanged.
pub(crate) fn resolve_url(base: &str, reference: &str) -> String {
    if base.is_empty() {
        return reference.to_string();
    }
    match Url::parse(base).and_then(|b| b.join(reference)) {
        Ok(url) => url.into(),
        Err(err) => {
            tracing::trace!(%err, base, reference, "URL left unresolved");
            reference.to_string()
        }
    }
}

/// Parse `reference` as an absolute URL, resolving against `base` if set
pub(crate) fn parse_url(base: &str, reference: &str) -> Option<Url> {
    if base.is_empty() {
        return Url::parse(reference).ok();
    }
    Url::parse(base).and_then(|b| b.join(reference)).ok()
}

/// Namespace URI for an attribute or element prefix
pub(crate) fn namespace_uri_for_prefix(prefix: &str) -> &'static str {
    match prefix {
        "xlink" => "http://www.w3.org/1999/xlink",
        "xml" => "http://www.w3.org/XML/1998/namespace",
        "xmlns" => "http://www.w3.org/2000/xmlns/",
        other => Namespace::from_prefix(other).uri(),
    }
}

/// A read-only copy of one attribute, taken when it was requested
#[derive(Clone)]
pub struct Attribute {
    name: String,
    prefix: String,
    value: String,
    owner_id: NodeId,
    owner_doc: Weak<Document>,
    base_url: String,
}

impl Attribute {
    pub(crate) fn snapshot(owner: &Selection, owner_id: NodeId, attr: &hq_dom::Attribute) -> Self {
        let tree = owner.tree();
        Self {
            name: tree.resolve(attr.local).to_string(),
            prefix: tree.resolve(attr.prefix).to_string(),
            value: attr.value.clone(),
            owner_id,
            owner_doc: Rc::downgrade(owner.shared_document()),
            base_url: owner.base_url().to_string(),
        }
    }

    /// Qualified name (`prefix:local` for foreign attributes)
    pub fn name(&self) -> String {
        if self.prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{}:{}", self.prefix, self.name)
        }
    }

    pub fn local_name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Namespace of a prefixed attribute; `None` for plain ones
    pub fn namespace_uri(&self) -> Option<&'static str> {
        (!self.prefix.is_empty()).then(|| namespace_uri_for_prefix(&self.prefix))
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The element carrying this attribute, while its document is alive
    pub fn owner_element(&self) -> Option<Element> {
        let doc = self.owner_doc.upgrade()?;
        let root = Selection::root(doc, self.base_url.clone());
        Some(root.element_at(self.owner_id))
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name())
            .field("value", &self.value)
            .field("owner", &self.owner_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(
            resolve_url("http://example.com/subdir/", "relpath"),
            "http://example.com/subdir/relpath"
        );
        assert_eq!(
            resolve_url("http://example.com/a/b", "c"),
            "http://example.com/a/c"
        );
    }

    #[test]
    fn test_resolve_absolute_and_scheme_relative() {
        assert_eq!(
            resolve_url("http://example.com/", "/abspath"),
            "http://example.com/abspath"
        );
        assert_eq!(
            resolve_url("https://example.com/x", "//cdn.example.org/lib.js"),
            "https://cdn.example.org/lib.js"
        );
        assert_eq!(
            resolve_url("http://example.com/", "ftp://files.example.com/f"),
            "ftp://files.example.com/f"
        );
    }

    #[test]
    fn test_resolve_fragment_and_query() {
        assert_eq!(
            resolve_url("http://example.com/p?q=1", "#top"),
            "http://example.com/p?q=1#top"
        );
        assert_eq!(
            resolve_url("http://example.com/p?q=1", "?q=2"),
            "http://example.com/p?q=2"
        );
    }

    #[test]
    fn test_resolve_degrades() {
        assert_eq!(resolve_url("", "relpath"), "relpath");
        assert_eq!(resolve_url("not a base", "relpath"), "relpath");
        assert_eq!(resolve_url("http://example.com/", "http://[::1"), "http://[::1");
    }

    #[test]
    fn test_namespace_uri_for_prefix() {
        assert_eq!(namespace_uri_for_prefix("svg"), Namespace::SVG_URI);
        assert_eq!(namespace_uri_for_prefix("math"), Namespace::MATHML_URI);
        assert_eq!(namespace_uri_for_prefix(""), Namespace::HTML_URI);
        assert_eq!(namespace_uri_for_prefix("xlink"), "http://www.w3.org/1999/xlink");
    }
}
