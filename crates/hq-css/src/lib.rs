//! hq CSS - selector engine
//!
//! Compiles selector strings with the `selectors` crate and matches them
//! against the [`hq_dom`] arena.
//!
//! ```text
//! "form input[name]" -> Selector::parse -> SelectorList<HqSelectors>
//!                                              |
//!                     DomTree + NodeId -> ElementRef -> matches / select
//! ```

mod element_ref;
mod selector;

pub use element_ref::{ElementRef, HqSelectors};
pub use selector::Selector;

/// Selector compilation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("invalid selector '{selector}': {reason}")]
    Invalid { selector: String, reason: String },
}
