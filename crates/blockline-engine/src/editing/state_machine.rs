//! Rendered ⇄ editing transitions and the structural edits that reshape the
//! block sequence.
//!
//! Structural edits only ever start from the active editing block. Entering
//! editing on a block blurs whichever block was active before, so the
//! single-editor invariant holds after every operation.

use crate::editing::{Block, CaretRequest, Document, EditingBlock};
use crate::markup::MarkupConverter;
use crate::text::{split_at_char, trimmed_len};

/// Focus movement produced by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Block that is now editing.
    pub focused: usize,
    /// Block that went back to rendered and needs persisting.
    pub blurred: Option<usize>,
}

impl Document {
    /// Switches `index` into editing with a pending caret placement.
    ///
    /// Any other editing block is blurred first. Returns `None` when the
    /// index is out of range.
    pub fn begin_edit<M: MarkupConverter + ?Sized>(
        &mut self,
        index: usize,
        request: CaretRequest,
        anchor_x: Option<f32>,
        markup: &M,
    ) -> Option<Transition> {
        if index >= self.blocks.len() {
            return None;
        }

        let blurred = match self.active_index() {
            Some(active) if active == index => None,
            Some(_) => self.end_edit(markup),
            None => None,
        };

        let text = self.blocks[index].raw_text(markup).into_owned();
        log::debug!("block {index}: entering edit with {request:?}");
        self.blocks[index] = Block::Editing(EditingBlock::mounting(text, request, anchor_x));
        Some(Transition {
            focused: index,
            blurred,
        })
    }

    /// Returns the active block to its rendered form.
    ///
    /// Blank blocks are kept. Returns the index that was blurred.
    pub fn end_edit<M: MarkupConverter + ?Sized>(&mut self, markup: &M) -> Option<usize> {
        let index = self.active_index()?;
        let placeholder = Block::rendered(String::new());
        let Block::Editing(editor) = std::mem::replace(&mut self.blocks[index], placeholder) else {
            return None;
        };
        let text = editor.into_text();
        log::debug!("block {index}: leaving edit ({} chars)", text.chars().count());
        self.blocks[index] = Block::rendered(markup.text_to_markup(&text));
        Some(index)
    }

    /// Enter: moves everything from the caret onwards into a new block below.
    ///
    /// The new block takes focus with its caret at 0, and the focus hand-off
    /// blurs the block that was split.
    pub fn split_active<M: MarkupConverter + ?Sized>(&mut self, markup: &M) -> Option<Transition> {
        let index = self.active_index()?;
        let editor = self.blocks[index].as_editing_mut()?;
        let (keep, yank) = split_at_char(editor.text(), editor.caret());
        let (keep, yank) = (keep.to_string(), yank.to_string());
        editor.set_text(keep);

        let blurred = self.end_edit(markup);
        self.blocks
            .insert(index + 1, Block::Editing(EditingBlock::new(yank, 0)));
        log::debug!("block {index}: split, new block {}", index + 1);
        Some(Transition {
            focused: index + 1,
            blurred,
        })
    }

    /// Tab: inserts a tab character before the caret.
    pub fn insert_tab(&mut self) -> bool {
        match self.active_mut() {
            Some(editor) => {
                editor.insert("\t");
                true
            }
            None => false,
        }
    }

    /// Backspace at offset 0: appends the active block to the previous one.
    ///
    /// The previous block takes focus with its caret where its trimmed text
    /// ended, and the active block is removed. `None` when the caret is not
    /// at 0 or there is no previous block.
    pub fn merge_into_previous<M: MarkupConverter + ?Sized>(
        &mut self,
        markup: &M,
    ) -> Option<Transition> {
        let index = self.active_index()?;
        let editor = self.blocks[index].as_editing()?;
        if !editor.caret_at_start() {
            return None;
        }
        let Some(prev) = self.previous(index) else {
            log::trace!("block {index}: backspace at first block");
            return None;
        };

        let prev_text = self.blocks[prev].raw_text(markup).into_owned();
        let merge_point = trimmed_len(&prev_text);
        let merged = prev_text + editor.text();

        self.blocks.remove(index);
        self.blocks[prev] = Block::Editing(EditingBlock::mounting(
            merged,
            CaretRequest::At(merge_point),
            None,
        ));
        log::debug!("block {index}: merged into block {prev} at {merge_point}");
        Some(Transition {
            focused: prev,
            blurred: None,
        })
    }

    /// Delete at the end of content: pulls the next block's text up.
    ///
    /// The caret does not move. `None` when the caret is neither at the end
    /// of the trimmed text nor at the very end, or there is no next block.
    pub fn merge_next_into_active<M: MarkupConverter + ?Sized>(
        &mut self,
        markup: &M,
    ) -> Option<usize> {
        let index = self.active_index()?;
        if !self.blocks[index].as_editing()?.caret_at_either_end() {
            return None;
        }
        let Some(next) = self.next(index) else {
            log::trace!("block {index}: delete at last block");
            return None;
        };

        let next_text = self.blocks.remove(next).raw_text(markup).into_owned();
        self.blocks[index].as_editing_mut()?.push_str(&next_text);
        log::debug!("block {next}: merged into block {index}");
        Some(index)
    }
}
