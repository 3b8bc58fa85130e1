//! Inline constructs that own their delimiters.
//!
//! The scanner asks these types for `[[`, `]]`, `|` and the backtick; it never
//! hardcodes them.

pub mod code_span;
pub mod wikilink;

pub use code_span::CodeSpan;
pub use wikilink::WikiLink;
