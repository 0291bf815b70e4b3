//! Span utilities - sorted byte ranges claimed by links and URLs

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // A URL runs until the next whitespace character
    static ref URL_RE: Regex = Regex::new(r"https?://\S+").unwrap();
}

/// A half-open byte range `[start, end)` in a document's raw text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Whether `pos` falls inside this span
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }
}

/// A set of spans kept sorted by start offset.
///
/// Spans may overlap (a hash-tag inside a bracketed reference, for instance),
/// so lookups walk the list from the front and stop at the first span that
/// starts after the queried position.
#[derive(Debug, Clone, Default)]
pub struct SpanSet {
    spans: Vec<Span>,
}

impl SpanSet {
    pub fn new(spans: impl IntoIterator<Item = Span>) -> Self {
        let mut spans: Vec<Span> = spans.into_iter().collect();
        spans.sort_by_key(|s| s.start);
        SpanSet { spans }
    }

    /// Whether some span has `start <= pos < end`
    pub fn contains(&self, pos: usize) -> bool {
        for span in &self.spans {
            if span.contains(pos) {
                return true;
            }
            if span.start > pos {
                break;
            }
        }
        false
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Spans of every `http://` / `https://` token in `content`
pub fn url_spans(content: &str) -> SpanSet {
    SpanSet::new(
        URL_RE
            .find_iter(content)
            .map(|m| Span::new(m.start(), m.end())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_with_unsorted_input() {
        let set = SpanSet::new(vec![Span::new(10, 15), Span::new(0, 4)]);

        assert!(set.contains(0));
        assert!(set.contains(3));
        assert!(!set.contains(4));
        assert!(set.contains(10));
        assert!(!set.contains(15));
        assert!(!set.contains(100));
    }

    #[test]
    fn test_contains_overlapping_spans() {
        // A short span nested inside a longer one that starts earlier
        let set = SpanSet::new(vec![Span::new(0, 20), Span::new(5, 8)]);

        assert!(set.contains(12));
        assert!(set.contains(6));
    }

    #[test]
    fn test_empty_set() {
        let set = SpanSet::default();
        assert!(set.is_empty());
        assert!(!set.contains(0));
    }

    #[test]
    fn test_url_spans() {
        let content = "see https://example.com/Target and http://x.org/a?b=c done";
        let set = url_spans(content);

        assert_eq!(set.len(), 2);
        let target = content.find("Target").unwrap();
        assert!(set.contains(target));
        assert!(!set.contains(content.find("done").unwrap()));
    }
}
