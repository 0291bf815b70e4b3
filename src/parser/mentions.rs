//! Plain-text mention scanning

use super::spans::{Span, SpanSet};

/// Find literal, case-sensitive occurrences of `term` in `content` that do
/// not start inside a reference span or a URL span.
///
/// Matches are non-overlapping and in order of appearance. An empty term
/// yields nothing.
pub fn find_mentions_outside_links(
    content: &str,
    term: &str,
    link_spans: &SpanSet,
    url_spans: &SpanSet,
) -> Vec<Span> {
    if term.is_empty() {
        return Vec::new();
    }

    content
        .match_indices(term)
        .map(|(start, matched)| Span::new(start, start + matched.len()))
        .filter(|span| !link_spans.contains(span.start) && !url_spans.contains(span.start))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::refs::{extract_refs, ref_spans};
    use crate::parser::spans::url_spans;

    fn mentions(content: &str, term: &str) -> Vec<Span> {
        let refs = extract_refs(content);
        find_mentions_outside_links(content, term, &ref_spans(&refs), &url_spans(content))
    }

    #[test]
    fn test_plain_mention() {
        let found = mentions("- Mention Target here", "Target");
        assert_eq!(found, vec![Span::new(10, 16)]);
    }

    #[test]
    fn test_empty_term() {
        assert!(mentions("anything", "").is_empty());
    }

    #[test]
    fn test_case_sensitive() {
        assert!(mentions("a target", "Target").is_empty());
    }

    #[test]
    fn test_skips_bracketed_reference() {
        let content = "[[Target]] and Target";
        let found = mentions(content, "Target");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, content.rfind("Target").unwrap());
    }

    #[test]
    fn test_skips_hashtag_and_attribute() {
        assert!(mentions("#Target", "Target").is_empty());
        assert!(mentions("- Target:: value", "Target").is_empty());
    }

    #[test]
    fn test_skips_urls() {
        assert!(mentions("see https://example.com/Target", "Target").is_empty());
    }

    #[test]
    fn test_multiple_mentions() {
        assert_eq!(mentions("Foo, Foo\nFoo", "Foo").len(), 3);
    }
}
