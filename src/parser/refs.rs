//! Reference parsing ([[wikilinks]], #tags and `- Key:: value` attributes)

use lazy_static::lazy_static;
use regex::Regex;

use super::spans::{Span, SpanSet};

/// Which syntax produced a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RefKind {
    /// `[[Name]]`
    Bracketed,

    /// `#Name`
    HashTag,

    /// `- Name:: value`
    Attribute,
}

/// A parsed reference
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reference {
    /// The raw target (as written)
    pub target_raw: String,

    /// Syntax the reference was written in
    pub kind: RefKind,

    /// Byte offset where the whole match starts in the document
    pub start: usize,

    /// Byte offset where the whole match ends in the document
    pub end: usize,
}

impl Reference {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

lazy_static! {
    // Everything up to the first `]` or newline. Nested brackets are not
    // special: the first closing pair ends the match.
    pub(crate) static ref WIKILINK_RE: Regex = Regex::new(r"\[\[([^\]\n]+)\]\]").unwrap();

    pub(crate) static ref HASHTAG_RE: Regex = Regex::new(r"#([a-zA-Z0-9_-]+)").unwrap();

    // `  - key:: value`. The key may hold single colons but never `::`, so
    // only the first double colon on the line ends it.
    pub(crate) static ref ATTRIBUTE_RE: Regex =
        Regex::new(r"(?m)^( *- )((?:[^:\n]|:[^:\n])+)::").unwrap();
}

/// Extract every reference from a document, in a fixed order:
/// bracketed references, then hash-tags, then attributes.
pub fn extract_refs(content: &str) -> Vec<Reference> {
    let mut refs = Vec::new();

    for cap in WIKILINK_RE.captures_iter(content) {
        let full_match = cap.get(0).unwrap();
        refs.push(Reference {
            target_raw: cap[1].to_string(),
            kind: RefKind::Bracketed,
            start: full_match.start(),
            end: full_match.end(),
        });
    }

    for cap in HASHTAG_RE.captures_iter(content) {
        let full_match = cap.get(0).unwrap();
        refs.push(Reference {
            target_raw: cap[1].to_string(),
            kind: RefKind::HashTag,
            start: full_match.start(),
            end: full_match.end(),
        });
    }

    for cap in ATTRIBUTE_RE.captures_iter(content) {
        let full_match = cap.get(0).unwrap();
        refs.push(Reference {
            target_raw: cap[2].to_string(),
            kind: RefKind::Attribute,
            start: full_match.start(),
            end: full_match.end(),
        });
    }

    refs
}

/// Sorted spans of a document's references, for containment checks
pub fn ref_spans(refs: &[Reference]) -> SpanSet {
    SpanSet::new(refs.iter().map(Reference::span))
}
