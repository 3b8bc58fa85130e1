use std::borrow::Cow;

use serde::Serialize;

use crate::markup::MarkupConverter;
use crate::text::{char_len, insert_at_char, trimmed_len};

/// Where the caret should land when a block enters editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CaretRequest {
    /// Offset 0; used when no position is given.
    #[default]
    Start,
    /// End of the text with trailing whitespace ignored.
    End,
    /// An explicit offset, clamped to the text.
    At(usize),
}

impl CaretRequest {
    pub fn resolve(self, text: &str) -> usize {
        match self {
            CaretRequest::Start => 0,
            CaretRequest::End => trimmed_len(text),
            CaretRequest::At(offset) => offset.min(char_len(text)),
        }
    }
}

/// Caret placement waiting for the input element to be laid out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PendingPlacement {
    pub request: CaretRequest,
    /// Horizontal caret coordinate before a vertical move, to be matched.
    pub anchor_x: Option<f32>,
}

/// A block exposed as raw text with a live caret.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditingBlock {
    text: String,
    caret: usize,
    pending: Option<PendingPlacement>,
}

impl EditingBlock {
    /// An editor whose caret is already placed.
    pub fn new(text: impl Into<String>, caret: usize) -> Self {
        let text = text.into();
        let caret = caret.min(char_len(&text));
        Self {
            text,
            caret,
            pending: None,
        }
    }

    /// An editor that has been attached but not yet measured.
    ///
    /// The caret holds the unadjusted request until the placement completes.
    pub fn mounting(text: impl Into<String>, request: CaretRequest, anchor_x: Option<f32>) -> Self {
        let text = text.into();
        let caret = request.resolve(&text);
        Self {
            text,
            caret,
            pending: Some(PendingPlacement { request, anchor_x }),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn len(&self) -> usize {
        char_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn pending(&self) -> Option<PendingPlacement> {
        self.pending
    }

    pub fn is_placed(&self) -> bool {
        self.pending.is_none()
    }

    pub(crate) fn take_pending(&mut self) -> Option<PendingPlacement> {
        self.pending.take()
    }

    pub fn set_caret(&mut self, offset: usize) {
        self.caret = offset.min(self.len());
    }

    /// Replaces the text, keeping the caret inside it.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.caret = self.caret.min(self.len());
    }

    /// Inserts at the caret and moves the caret past the insertion.
    pub fn insert(&mut self, s: &str) {
        insert_at_char(&mut self.text, self.caret, s);
        self.caret += char_len(s);
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    pub fn content_len(&self) -> usize {
        trimmed_len(&self.text)
    }

    pub fn caret_at_start(&self) -> bool {
        self.caret == 0
    }

    /// Caret sits exactly at the end of the trimmed text.
    pub fn caret_at_content_end(&self) -> bool {
        self.caret == self.content_len()
    }

    /// Caret sits at the end of the trimmed text or at the very end.
    pub fn caret_at_either_end(&self) -> bool {
        self.caret_at_content_end() || self.caret == self.len()
    }

    pub(crate) fn into_text(self) -> String {
        self.text
    }
}

/// One line-like unit of the document.
///
/// A block has no identity beyond its position in the [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    /// Static presentation; holds the rendered markup.
    Rendered { markup: String },
    /// Editable presentation.
    Editing(EditingBlock),
}

impl Block {
    pub fn rendered(markup: impl Into<String>) -> Self {
        Block::Rendered {
            markup: markup.into(),
        }
    }

    pub fn from_text<M: MarkupConverter + ?Sized>(text: &str, markup: &M) -> Self {
        Block::rendered(markup.text_to_markup(text))
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Block::Editing(_))
    }

    pub fn as_editing(&self) -> Option<&EditingBlock> {
        match self {
            Block::Editing(editor) => Some(editor),
            Block::Rendered { .. } => None,
        }
    }

    pub fn as_editing_mut(&mut self) -> Option<&mut EditingBlock> {
        match self {
            Block::Editing(editor) => Some(editor),
            Block::Rendered { .. } => None,
        }
    }

    pub fn markup(&self) -> Option<&str> {
        match self {
            Block::Rendered { markup } => Some(markup),
            Block::Editing(_) => None,
        }
    }

    /// The block's raw text, converting from markup when rendered.
    pub fn raw_text<'a, M: MarkupConverter + ?Sized>(&'a self, markup: &M) -> Cow<'a, str> {
        match self {
            Block::Rendered { markup: html } => Cow::Owned(markup.markup_to_text(html)),
            Block::Editing(editor) => Cow::Borrowed(editor.text()),
        }
    }
}
