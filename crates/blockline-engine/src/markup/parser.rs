use super::{
    cursor::Cursor,
    kinds::{CodeSpan, WikiLink},
    types::{InlineNode, Span},
};

/// Splits a block's raw text into inline nodes covering all of it.
///
/// Code spans are tried first and suppress cross-references inside them, so
/// `` `[[x]]` `` is one code span. Unclosed constructs stay plain text.
pub fn parse_inline(s: &str) -> Vec<InlineNode> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = cur.pos();

    fn flush_text(out: &mut Vec<InlineNode>, start: usize, end: usize) {
        if end > start {
            out.push(InlineNode::Text(Span::new(start, end)));
        }
    }

    while !cur.eof() {
        let node = try_parse_code_span(&mut cur).or_else(|| try_parse_wikilink(&mut cur));
        if let Some(node) = node {
            flush_text(&mut out, text_start, node.full().start);
            text_start = node.full().end;
            out.push(node);
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, text_start, cur.pos());
    out
}

fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if cur.peek() != Some(CodeSpan::TICK) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump();
    let inner_start = cur.pos();

    while !cur.eof() && cur.peek() != Some(CodeSpan::TICK) {
        cur.bump();
    }
    let inner_end = cur.pos();

    if cur.peek() != Some(CodeSpan::TICK) {
        *cur = saved;
        return None;
    }
    cur.bump();

    Some(InlineNode::CodeSpan {
        full: Span::new(start, cur.pos()),
        inner: Span::new(inner_start, inner_end),
    })
}

fn try_parse_wikilink(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if !cur.starts_with(WikiLink::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(WikiLink::OPEN.len());
    let target_start = cur.pos();

    while !cur.eof() && cur.peek() != Some(WikiLink::ALIAS) && !cur.starts_with(WikiLink::CLOSE)
    {
        cur.bump();
    }
    let target = Span::new(target_start, cur.pos());

    let mut alias = None;
    if cur.peek() == Some(WikiLink::ALIAS) {
        cur.bump();
        let alias_start = cur.pos();
        while !cur.eof() && !cur.starts_with(WikiLink::CLOSE) {
            cur.bump();
        }
        alias = Some(Span::new(alias_start, cur.pos()));
    }

    if !cur.starts_with(WikiLink::CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump_n(WikiLink::CLOSE.len());

    Some(InlineNode::WikiLink {
        full: Span::new(start, cur.pos()),
        target,
        alias,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_is_one_node() {
        assert_eq!(
            parse_inline("hello world"),
            vec![InlineNode::Text(Span::new(0, 11))]
        );
    }

    #[test]
    fn empty_text_has_no_nodes() {
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn wikilink_between_text() {
        assert_eq!(
            parse_inline("see [[Page]] now"),
            vec![
                InlineNode::Text(Span::new(0, 4)),
                InlineNode::WikiLink {
                    full: Span::new(4, 12),
                    target: Span::new(6, 10),
                    alias: None,
                },
                InlineNode::Text(Span::new(12, 16)),
            ]
        );
    }

    #[test]
    fn wikilink_with_alias() {
        assert_eq!(
            parse_inline("[[target|alias]]"),
            vec![InlineNode::WikiLink {
                full: Span::new(0, 16),
                target: Span::new(2, 8),
                alias: Some(Span::new(9, 14)),
            }]
        );
    }

    #[test]
    fn code_span_suppresses_wikilink() {
        assert_eq!(
            parse_inline("`[[not a link]]`"),
            vec![InlineNode::CodeSpan {
                full: Span::new(0, 16),
                inner: Span::new(1, 15),
            }]
        );
    }

    #[test]
    fn unclosed_constructs_stay_text() {
        assert_eq!(
            parse_inline("[[unclosed `tick"),
            vec![InlineNode::Text(Span::new(0, 16))]
        );
    }

    #[test]
    fn multibyte_text_around_links_keeps_boundaries() {
        let text = "é [[Café]] ü";
        let nodes = parse_inline(text);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1].full().slice(text), "[[Café]]");
    }
}
