//! hq HTML
//!
//! HTML5 parsing built on html5ever, converted into the [`hq_dom`] arena, and
//! markup serialization for `innerHTML`/`outerHTML`.

mod parser;
mod serializer;

pub use parser::HtmlParser;
pub use serializer::{inner_html, outer_html};

use hq_dom::Document;

/// Parse an HTML string with default options
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),
}
