//! hq Query - jQuery-style access to parsed HTML
//!
//! A document is parsed once into a root [`Selection`]; every traversal
//! returns a new Selection, and single nodes are exposed as [`Element`]s.
//!
//! ```text
//! parse_html ──► Selection ──find/filter/next/parents/...──► Selection
//!                    │                                          │
//!                    ├─ attr / url_attr / data / val            ├─ get(i) ──► Element
//!                    └─ serialize / serialize_array / object    └─ each / map
//! ```
//!
//! The tree is never mutated; selections are cheap views holding
//! [`NodeId`](hq_dom::NodeId) handles into a shared [`Document`](hq_dom::Document).

mod attribute;
mod data;
mod element;
pub mod elements;
mod form;
mod matcher;
mod selection;

pub use attribute::Attribute;
pub use element::Element;
pub use form::{FieldValue, FormValue};
pub use matcher::SelectorArg;
pub use selection::Selection;

use std::rc::Rc;

use hq_html::{HtmlParser, ParseError};

/// Errors raised by the query layer
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("failed to parse HTML: {0}")]
    Parse(#[from] ParseError),

    #[error("cannot use a '{kind}' as a selector")]
    InvalidSelectorArg { kind: String },

    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, QueryError>;

/// Parse a document into a root selection with no base URL
pub fn parse_html(html: &str) -> Result<Selection> {
    parse_with(&HtmlParser::new(), html, String::new())
}

/// Parse a document whose relative URLs resolve against `base_url`
pub fn parse_html_with_url(html: &str, base_url: &str) -> Result<Selection> {
    url::Url::parse(base_url).map_err(|source| QueryError::InvalidBaseUrl {
        url: base_url.to_string(),
        source,
    })?;
    parse_with(&HtmlParser::new(), html, base_url.to_string())
}

/// Parse with a configured parser
pub fn parse_with(parser: &HtmlParser, html: &str, base_url: String) -> Result<Selection> {
    let doc = parser.parse(html)?;
    tracing::debug!(nodes = doc.tree().len(), base_url = %base_url, "document ready");
    Ok(Selection::root(Rc::new(doc), base_url))
}
