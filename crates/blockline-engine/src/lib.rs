pub mod caret;
pub mod controller;
pub mod editing;
pub mod io;
pub mod layout;
pub mod markup;
pub mod text;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use caret::{CaretReconciler, CrossBlockMove, DEFAULT_SEARCH_RADIUS, Direction};
pub use controller::{
    ControllerSettings, EditorController, EditorHooks, Key, KeyOutcome, LinkPress, PointerOutcome,
    PointerPress,
};
pub use editing::{Block, CaretRequest, Document, EditingBlock, PendingPlacement, Transition};
pub use io::*;
pub use layout::{LineInfo, LineMetrics, MonospaceSurface, Point, TextSurface, VisualLine};
pub use markup::{HtmlMarkup, LinkRef, MarkupConverter};
