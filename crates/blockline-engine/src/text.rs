//! Character-offset helpers.
//!
//! Caret offsets count Unicode scalar values, never bytes, so every slice of
//! block text goes through these conversions.

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Length of `text` with trailing whitespace removed ("end of content").
pub fn trimmed_len(text: &str) -> usize {
    char_len(text.trim_end())
}

/// Byte index of the character at `offset`, clamped to the end of `text`.
pub fn byte_index(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

/// Splits `text` at a character offset.
pub fn split_at_char(text: &str, offset: usize) -> (&str, &str) {
    text.split_at(byte_index(text, offset))
}

/// Inserts `insert` before the character at `offset`.
pub fn insert_at_char(text: &mut String, offset: usize, insert: &str) {
    let idx = byte_index(text, offset);
    text.insert_str(idx, insert);
}
