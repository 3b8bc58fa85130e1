//! # Markup
//!
//! Conversion between a block's raw text and its rendered form.
//!
//! ## Modules
//!
//! - **`types`**: `Span` and `InlineNode`
//! - **`kinds`**: inline constructs owning their delimiters (`CodeSpan`, `WikiLink`)
//! - **`cursor`**: byte cursor used by the scanner
//! - **`parser`**: `parse_inline()`, code spans take precedence over links
//! - **`html`**: the `MarkupConverter` trait and the lossless `HtmlMarkup`
//! - **`links`**: cross-reference lookup and page titles

pub mod cursor;
pub mod html;
pub mod kinds;
pub mod links;
pub mod parser;
pub mod types;

pub use html::{HtmlMarkup, LINK_CLASS, MarkupConverter, URL_CLASS, find_urls};
pub use kinds::{CodeSpan, WikiLink};
pub use links::{LinkRef, link_at, page_title};
pub use parser::parse_inline;
pub use types::{InlineNode, Span};
