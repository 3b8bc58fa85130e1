use serde::Serialize;

use crate::editing::{Block, EditingBlock};
use crate::markup::MarkupConverter;

/// An outline page: an ordered stack of blocks.
///
/// Adjacency is positional. Neighbours are found by index arithmetic, never
/// through stored links, so splicing blocks in or out cannot leave dangling
/// references. At most one block is in editing mode at a time; the
/// transitions in `state_machine` maintain that.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub(crate) blocks: Vec<Block>,
}

impl Document {
    /// One rendered block per source line.
    ///
    /// An empty source still yields a single empty block so there is
    /// something to click into.
    pub fn from_source<M: MarkupConverter + ?Sized>(source: &str, markup: &M) -> Self {
        let mut blocks: Vec<Block> = source
            .lines()
            .map(|line| Block::from_text(line, markup))
            .collect();
        if blocks.is_empty() {
            blocks.push(Block::from_text("", markup));
        }
        Self { blocks }
    }

    /// Rendered blocks from raw texts.
    pub fn from_texts<I, S, M>(texts: I, markup: &M) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        M: MarkupConverter + ?Sized,
    {
        Self {
            blocks: texts
                .into_iter()
                .map(|text| Block::from_text(text.as_ref(), markup))
                .collect(),
        }
    }

    /// Raw texts joined one per line, the inverse of [`Document::from_source`].
    pub fn to_source<M: MarkupConverter + ?Sized>(&self, markup: &M) -> String {
        self.raw_texts(markup).join("\n")
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn raw_text<M: MarkupConverter + ?Sized>(&self, index: usize, markup: &M) -> Option<String> {
        self.blocks
            .get(index)
            .map(|block| block.raw_text(markup).into_owned())
    }

    pub fn raw_texts<M: MarkupConverter + ?Sized>(&self, markup: &M) -> Vec<String> {
        self.blocks
            .iter()
            .map(|block| block.raw_text(markup).into_owned())
            .collect()
    }

    /// Index of the block currently being edited.
    pub fn active_index(&self) -> Option<usize> {
        self.blocks.iter().position(Block::is_editing)
    }

    pub fn active(&self) -> Option<&EditingBlock> {
        self.blocks.iter().find_map(Block::as_editing)
    }

    pub fn active_mut(&mut self) -> Option<&mut EditingBlock> {
        self.blocks.iter_mut().find_map(Block::as_editing_mut)
    }

    pub fn editing_count(&self) -> usize {
        self.blocks.iter().filter(|block| block.is_editing()).count()
    }

    pub fn previous(&self, index: usize) -> Option<usize> {
        index
            .checked_sub(1)
            .filter(|&prev| prev < self.blocks.len())
    }

    pub fn next(&self, index: usize) -> Option<usize> {
        let next = index + 1;
        (next < self.blocks.len()).then_some(next)
    }
}
