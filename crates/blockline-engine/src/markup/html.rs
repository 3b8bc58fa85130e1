use std::sync::OnceLock;

use regex::Regex;

use super::{InlineNode, Span, parse_inline};

/// Converts between a block's stored rendered form and its raw editable text.
pub trait MarkupConverter {
    /// Raw text of a rendered block, used when it enters editing.
    fn markup_to_text(&self, markup: &str) -> String;

    /// Rendered form of raw text, used when a block leaves editing.
    fn text_to_markup(&self, text: &str) -> String;
}

/// CSS class carried by cross-reference elements.
pub const LINK_CLASS: &str = "link";
/// CSS class carried by bare URLs.
pub const URL_CLASS: &str = "url";

/// HTML rendering of block text.
///
/// Cross-references render as `<span class="link">`, code spans as `<code>`
/// and bare URLs as anchors. Every element keeps its full source text as its
/// visible content, so stripping tags and decoding entities gives the raw
/// text back exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlMarkup;

impl MarkupConverter for HtmlMarkup {
    fn markup_to_text(&self, markup: &str) -> String {
        let stripped = tag_regex().replace_all(markup, "");
        html_escape::decode_html_entities(&stripped).into_owned()
    }

    fn text_to_markup(&self, text: &str) -> String {
        let mut html = String::with_capacity(text.len());
        for node in parse_inline(text) {
            match node {
                InlineNode::Text(span) => push_text_with_urls(&mut html, span.slice(text)),
                InlineNode::CodeSpan { full, .. } => {
                    html.push_str("<code>");
                    html.push_str(&html_escape::encode_text(full.slice(text)));
                    html.push_str("</code>");
                }
                InlineNode::WikiLink { full, .. } => {
                    html.push_str("<span class=\"");
                    html.push_str(LINK_CLASS);
                    html.push_str("\">");
                    html.push_str(&html_escape::encode_text(full.slice(text)));
                    html.push_str("</span>");
                }
            }
        }
        html
    }
}

fn tag_regex() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"))
}

fn url_regex() -> &'static Regex {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    URL_REGEX.get_or_init(|| Regex::new(r"https?://[^\s<>\[\]]+").expect("Invalid URL regex"))
}

/// Byte spans of bare URLs, without trailing sentence punctuation.
pub fn find_urls(text: &str) -> Vec<Span> {
    url_regex()
        .find_iter(text)
        .filter_map(|m| {
            let trimmed = m
                .as_str()
                .trim_end_matches(['.', ',', ':', ';', '!', '?', ')', ']', '}']);
            (!trimmed.is_empty()).then(|| Span::new(m.start(), m.start() + trimmed.len()))
        })
        .collect()
}

fn push_text_with_urls(html: &mut String, text: &str) {
    let mut pos = 0;
    for url in find_urls(text) {
        html.push_str(&html_escape::encode_text(&text[pos..url.start]));
        let href = url.slice(text);
        html.push_str("<a class=\"");
        html.push_str(URL_CLASS);
        html.push_str("\" href=\"");
        html.push_str(&html_escape::encode_double_quoted_attribute(href));
        html.push_str("\">");
        html.push_str(&html_escape::encode_text(href));
        html.push_str("</a>");
        pos = url.end;
    }
    html.push_str(&html_escape::encode_text(&text[pos..]));
}
