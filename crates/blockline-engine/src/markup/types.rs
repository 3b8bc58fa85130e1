/// A byte range `[start, end)` into a block's raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    pub fn contains(self, byte: usize) -> bool {
        self.start <= byte && byte < self.end
    }

    pub fn slice(self, text: &str) -> &str {
        &text[self.start..self.end]
    }
}

/// Inline piece of a block, stored as spans so rendering is lossless.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineNode {
    Text(Span),
    CodeSpan {
        /// Including the backticks.
        full: Span,
        inner: Span,
    },
    WikiLink {
        /// Including `[[` and `]]`.
        full: Span,
        target: Span,
        alias: Option<Span>,
    },
}

impl InlineNode {
    pub fn full(&self) -> Span {
        match self {
            InlineNode::Text(sp) => *sp,
            InlineNode::CodeSpan { full, .. } => *full,
            InlineNode::WikiLink { full, .. } => *full,
        }
    }
}
