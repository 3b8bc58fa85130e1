use serde::Serialize;

use crate::layout::TextSurface;

/// A wrapped display segment of a block's text.
///
/// Lines are contiguous: each line starts where the previous one ended, so
/// the whitespace a soft wrap breaks on belongs to the line before the break.
/// `content_end` marks where that separator starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisualLine {
    /// First character offset of the line.
    pub start: usize,
    /// Exclusive end offset, including any wrap separator.
    pub end: usize,
    /// Exclusive end offset of the visible content.
    pub content_end: usize,
}

impl VisualLine {
    pub fn new(start: usize, end: usize, content_end: usize) -> Self {
        Self {
            start,
            end,
            content_end: content_end.clamp(start, end),
        }
    }

    /// A line with no wrap separator.
    pub fn unbroken(start: usize, end: usize) -> Self {
        Self::new(start, end, end)
    }

    /// Length of the line's content, separator excluded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content_end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `offset` falls in `[start, end)`.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Position of a caret relative to the visual lines of its block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineInfo {
    pub line_index: usize,
    pub relative_caret_pos: usize,
}

/// Finds the visual line holding `caret`.
///
/// An offset at the exact end of the text belongs to the last line.
pub fn current_line_info(caret: usize, lines: &[VisualLine]) -> LineInfo {
    let found = lines.iter().position(|line| line.contains(caret));
    let line_index = found.unwrap_or_else(|| lines.len().saturating_sub(1));
    let start = lines.get(line_index).map_or(0, |line| line.start);
    LineInfo {
        line_index,
        relative_caret_pos: caret.saturating_sub(start),
    }
}

/// Visual lines of one block's text at one width.
///
/// Always holds at least one line; empty text wraps to a single `[0, 0)` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineMetrics {
    lines: Vec<VisualLine>,
}

impl LineMetrics {
    /// Asks the surface how it wraps `text` at `width`.
    pub fn measure<S: TextSurface + ?Sized>(surface: &S, text: &str, width: f32) -> Self {
        Self::from_lines(surface.wrap(text, width))
    }

    pub fn from_lines(lines: Vec<VisualLine>) -> Self {
        if lines.is_empty() {
            return Self {
                lines: vec![VisualLine::unbroken(0, 0)],
            };
        }
        Self { lines }
    }

    pub fn lines(&self) -> &[VisualLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn first(&self) -> VisualLine {
        self.lines[0]
    }

    pub fn last(&self) -> VisualLine {
        self.lines[self.lines.len() - 1]
    }

    pub fn line_info(&self, caret: usize) -> LineInfo {
        current_line_info(caret, &self.lines)
    }

    pub fn is_on_first_line(&self, caret: usize) -> bool {
        self.line_info(caret).line_index == 0
    }

    pub fn is_on_last_line(&self, caret: usize) -> bool {
        self.line_info(caret).line_index == self.lines.len() - 1
    }

    /// Length of everything before the last line, separators included.
    pub fn preceding_last_line(&self) -> usize {
        self.last().start
    }
}
