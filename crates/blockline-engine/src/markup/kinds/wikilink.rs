/// Cross-reference to another page, `[[Title]]` or `[[Title|alias]]`.
pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static [u8; 2] = b"[[";
    pub const CLOSE: &'static [u8; 2] = b"]]";
    pub const ALIAS: u8 = b'|';
    pub const OPEN_STR: &'static str = "[[";
    pub const CLOSE_STR: &'static str = "]]";
}
