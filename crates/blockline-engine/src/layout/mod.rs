//! # Layout
//!
//! Visual-line geometry for block text.
//!
//! Everything here is a pure function of `(text, width, offset)`. Wrapping is
//! delegated to a [`TextSurface`] so the engine agrees with the input element
//! about where lines break; [`LineMetrics`] only interprets the boundaries.
//!
//! ## Modules
//!
//! - **`line_metrics`**: `VisualLine`, `LineInfo` and caret-to-line lookup
//! - **`surface`**: the `TextSurface` primitive and a character-cell implementation

pub mod line_metrics;
pub mod surface;

pub use line_metrics::{LineInfo, LineMetrics, VisualLine, current_line_info};
pub use surface::{MonospaceSurface, Point, TextSurface};
