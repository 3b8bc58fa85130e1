/// Inline code. A raw zone: no cross-references are recognised inside it.
pub struct CodeSpan;

impl CodeSpan {
    pub const TICK: u8 = b'`';
}
