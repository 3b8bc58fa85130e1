use super::{InlineNode, WikiLink, parse_inline};
use crate::text::byte_index;

/// A cross-reference element found in a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    /// Visible text of the element, brackets included.
    pub element_text: String,
    /// Page the element points at.
    pub title: String,
}

/// Page title named by a link element's text.
///
/// Brackets are removed and an alias after `|` is dropped.
pub fn page_title(element_text: &str) -> String {
    let inner = element_text
        .replace(WikiLink::OPEN_STR, "")
        .replace(WikiLink::CLOSE_STR, "");
    let target = match inner.split_once(char::from(WikiLink::ALIAS)) {
        Some((target, _alias)) => target,
        None => inner.as_str(),
    };
    target.trim().to_string()
}

/// The cross-reference under character `offset` of `text`, if any.
pub fn link_at(text: &str, offset: usize) -> Option<LinkRef> {
    let byte = byte_index(text, offset);
    parse_inline(text).into_iter().find_map(|node| match node {
        InlineNode::WikiLink { full, .. } if full.contains(byte) => {
            let element_text = full.slice(text).to_string();
            Some(LinkRef {
                title: page_title(&element_text),
                element_text,
            })
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("[[Daily Notes]]", "Daily Notes")]
    #[case("[[Page|shown]]", "Page")]
    #[case("[[ spaced ]]", "spaced")]
    #[case("no brackets", "no brackets")]
    fn titles_from_element_text(#[case] element: &str, #[case] title: &str) {
        assert_eq!(page_title(element), title);
    }

    #[test]
    fn link_at_hits_inside_brackets_only() {
        let text = "go [[Home]] now";
        assert_eq!(link_at(text, 2), None);
        assert_eq!(
            link_at(text, 3),
            Some(LinkRef {
                element_text: "[[Home]]".to_string(),
                title: "Home".to_string(),
            })
        );
        assert!(link_at(text, 10).is_some());
        assert_eq!(link_at(text, 11), None);
    }

    #[test]
    fn link_at_counts_characters() {
        let text = "ééé [[Ü]]";
        assert_eq!(link_at(text, 4).map(|l| l.title), Some("Ü".to_string()));
    }

    #[test]
    fn links_inside_code_are_ignored() {
        assert!(link_at("`[[x]]`", 3).is_none());
        assert!(link_at("`[[x]]` [[y]]", 10).is_some());
    }
}
