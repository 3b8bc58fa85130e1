use unicode_width::UnicodeWidthChar;

use crate::layout::{VisualLine, current_line_info};
use crate::text::char_len;

/// A pointer position relative to a block's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The concrete text-input primitive a block is edited in.
///
/// The engine never re-derives font metrics: wrapping, caret geometry and
/// hit-testing are all answered by the surface that actually displays the
/// text, so caret decisions agree with what the user sees.
pub trait TextSurface {
    /// Visual lines of `text` when laid out `width` units wide.
    fn wrap(&self, text: &str, width: f32) -> Vec<VisualLine>;

    /// Horizontal coordinate of a caret placed at `offset`.
    fn caret_x(&self, text: &str, width: f32, offset: usize) -> f32;

    /// Caret offset closest to a pointer position.
    fn offset_at(&self, text: &str, width: f32, point: Point) -> usize;
}

/// Character-cell surface, as used by terminals and monospace text areas.
///
/// Wraps greedily at whitespace. Whitespace hangs past the right edge the
/// way it does in a browser textarea; words longer than a line are broken
/// at the edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceSurface {
    pub cell_width: f32,
    pub line_height: f32,
    pub tab_width: usize,
}

impl Default for MonospaceSurface {
    fn default() -> Self {
        Self {
            cell_width: 1.0,
            line_height: 1.0,
            tab_width: 4,
        }
    }
}

impl MonospaceSurface {
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Whole columns that fit in `width`; never less than one.
    pub fn columns(&self, width: f32) -> usize {
        let cell = self.cell_width.max(f32::EPSILON);
        ((width / cell).floor() as usize).max(1)
    }

    fn char_columns(&self, c: char) -> usize {
        if c == '\t' {
            return self.tab_width;
        }
        c.width().unwrap_or(0)
    }

    fn span_columns(&self, chars: &[char]) -> usize {
        chars.iter().map(|&c| self.char_columns(c)).sum()
    }
}

impl TextSurface for MonospaceSurface {
    fn wrap(&self, text: &str, width: f32) -> Vec<VisualLine> {
        let cols = self.columns(width);
        let chars: Vec<char> = text.chars().collect();
        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut col = 0;
        let mut run_start = 0;
        // (content end, offset after the whitespace run) of the latest soft break
        let mut wrap_opp: Option<(usize, usize)> = None;

        for (i, &c) in chars.iter().enumerate() {
            if c == '\n' {
                lines.push(VisualLine::new(line_start, i + 1, i));
                line_start = i + 1;
                col = 0;
                wrap_opp = None;
                continue;
            }

            let w = self.char_columns(c);
            if c.is_whitespace() {
                let continues_run = i > line_start && chars[i - 1].is_whitespace();
                if !continues_run {
                    run_start = i;
                }
                col += w;
                if chars.get(i + 1).is_some_and(|next| !next.is_whitespace()) {
                    wrap_opp = Some((run_start, i + 1));
                }
                continue;
            }

            if col + w > cols && col > 0 {
                if let Some((content_end, at)) = wrap_opp.take().filter(|&(_, at)| at > line_start)
                {
                    lines.push(VisualLine::new(line_start, at, content_end));
                    col = self.span_columns(&chars[at..i]);
                    line_start = at;
                }
                if col + w > cols && col > 0 {
                    lines.push(VisualLine::unbroken(line_start, i));
                    line_start = i;
                    col = 0;
                }
            }
            col += w;
        }

        lines.push(VisualLine::unbroken(line_start, chars.len()));
        lines
    }

    fn caret_x(&self, text: &str, width: f32, offset: usize) -> f32 {
        let chars: Vec<char> = text.chars().collect();
        let offset = offset.min(chars.len());
        let lines = self.wrap(text, width);
        let info = current_line_info(offset, &lines);
        let start = lines[info.line_index].start;
        self.span_columns(&chars[start..offset]) as f32 * self.cell_width
    }

    fn offset_at(&self, text: &str, width: f32, point: Point) -> usize {
        let chars: Vec<char> = text.chars().collect();
        let lines = self.wrap(text, width);
        let row = (point.y / self.line_height.max(f32::EPSILON)).floor().max(0.0) as usize;
        let row = row.min(lines.len() - 1);
        let line = lines[row];
        let limit = if row == lines.len() - 1 {
            line.end
        } else {
            line.content_end
        };

        let mut x = 0.0;
        for (offset, &c) in chars.iter().enumerate().take(limit).skip(line.start) {
            let w = self.char_columns(c) as f32 * self.cell_width;
            if point.x < x + w / 2.0 {
                return offset;
            }
            x += w;
        }
        limit.min(char_len(text))
    }
}
