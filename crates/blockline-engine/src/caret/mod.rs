//! # Caret reconciliation
//!
//! Decides where the caret lands when an arrow key leaves the active block,
//! and corrects vertical moves so the caret keeps its on-screen column.
//!
//! Arrow keys are only taken over at the block's edge in the key's
//! direction: the first visual line for Up, the last for Down, offset 0 for
//! Left and the end of trimmed text for Right. Everywhere else the input
//! element moves the caret itself.

use serde::Serialize;

use crate::editing::{CaretRequest, Document, PendingPlacement};
use crate::layout::{LineMetrics, TextSurface};
use crate::markup::MarkupConverter;
use crate::text::char_len;

/// Offsets searched either side of a tentative caret position.
pub const DEFAULT_SEARCH_RADIUS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A planned move of the caret into a neighbouring block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrossBlockMove {
    pub target: usize,
    pub request: CaretRequest,
    /// Caret x before the move; set for vertical moves only.
    pub anchor_x: Option<f32>,
}

/// Caret placement across blocks for one surface and width.
pub struct CaretReconciler<'a, S: TextSurface + ?Sized> {
    surface: &'a S,
    width: f32,
    search_radius: usize,
}

impl<'a, S: TextSurface + ?Sized> CaretReconciler<'a, S> {
    pub fn new(surface: &'a S, width: f32) -> Self {
        Self {
            surface,
            width,
            search_radius: DEFAULT_SEARCH_RADIUS,
        }
    }

    pub fn with_search_radius(mut self, search_radius: usize) -> Self {
        self.search_radius = search_radius;
        self
    }

    /// Plans the cross-block move for an arrow key.
    ///
    /// `None` means the caret is not at the relevant edge, or there is no
    /// neighbour in that direction, and the key should not be intercepted.
    pub fn plan<M: MarkupConverter + ?Sized>(
        &self,
        doc: &Document,
        markup: &M,
        direction: Direction,
    ) -> Option<CrossBlockMove> {
        let index = doc.active_index()?;
        let editor = doc.active()?;
        let text = editor.text();
        let caret = editor.caret();

        match direction {
            Direction::Up => {
                let metrics = LineMetrics::measure(self.surface, text, self.width);
                if !metrics.is_on_first_line(caret) {
                    return None;
                }
                let target = doc.previous(index)?;
                let anchor_x = self.surface.caret_x(text, self.width, caret);
                let target_text = doc.raw_text(target, markup)?;
                Some(CrossBlockMove {
                    target,
                    request: CaretRequest::At(self.up_offset(&target_text, caret)),
                    anchor_x: Some(anchor_x),
                })
            }
            Direction::Down => {
                let metrics = LineMetrics::measure(self.surface, text, self.width);
                if !metrics.is_on_last_line(caret) {
                    return None;
                }
                let target = doc.next(index)?;
                let anchor_x = self.surface.caret_x(text, self.width, caret);
                let relative = metrics.line_info(caret).relative_caret_pos;
                let target_text = doc.raw_text(target, markup)?;
                Some(CrossBlockMove {
                    target,
                    request: CaretRequest::At(self.down_offset(&target_text, relative)),
                    anchor_x: Some(anchor_x),
                })
            }
            Direction::Right => {
                if !editor.caret_at_content_end() {
                    return None;
                }
                Some(CrossBlockMove {
                    target: doc.next(index)?,
                    request: CaretRequest::Start,
                    anchor_x: None,
                })
            }
            Direction::Left => {
                if !editor.caret_at_start() {
                    return None;
                }
                Some(CrossBlockMove {
                    target: doc.previous(index)?,
                    request: CaretRequest::End,
                    anchor_x: None,
                })
            }
        }
    }

    /// Tentative caret in the last visual line of `target_text` when moving
    /// up from column `caret` of the first line below it.
    pub fn up_offset(&self, target_text: &str, caret: usize) -> usize {
        let metrics = LineMetrics::measure(self.surface, target_text, self.width);
        let preceding = metrics.preceding_last_line();
        (preceding + caret).min(preceding + metrics.last().len())
    }

    /// Tentative caret in the first visual line of `target_text` when moving
    /// down from `relative` characters into the last line above it.
    pub fn down_offset(&self, target_text: &str, relative: usize) -> usize {
        let metrics = LineMetrics::measure(self.surface, target_text, self.width);
        relative.min(metrics.first().len())
    }

    /// Nudges `tentative` to the offset whose caret x is closest to `anchor_x`.
    ///
    /// Candidates lie within the search radius, clamped to the text, and are
    /// scanned from the lowest offset up with a strict comparison, so the
    /// smaller offset wins a tie.
    pub fn align(&self, text: &str, tentative: usize, anchor_x: f32) -> usize {
        let len = char_len(text);
        let tentative = tentative.min(len);
        let low = tentative.saturating_sub(self.search_radius);
        let high = (tentative + self.search_radius).min(len);

        let mut best = tentative;
        let mut best_diff = f32::INFINITY;
        for offset in low..=high {
            let x = self.surface.caret_x(text, self.width, offset);
            let diff = (anchor_x - x).abs();
            if diff < best_diff {
                best = offset;
                best_diff = diff;
            }
        }
        best
    }

    /// Final caret for a block whose placement was deferred until mount.
    pub fn place(&self, text: &str, pending: PendingPlacement) -> usize {
        let caret = pending.request.resolve(text);
        match pending.anchor_x {
            Some(anchor_x) => self.align(text, caret, anchor_x),
            None => caret,
        }
    }
}
