//! Cross-reference builder - backlink and unlinked-mention indexes

use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::parser::{
    extract_aliases, extract_refs, find_mentions_outside_links, ref_spans, url_spans, Reference,
    Span, SpanSet,
};

use super::{display_name, Corpus, NOTE_EXTENSION};

/// Everything extracted from one note before any text is rewritten.
/// All offsets refer to the note's original raw text.
#[derive(Debug, Clone, Default)]
pub struct ParsedNote {
    /// Explicit references, in extraction order
    pub refs: Vec<Reference>,

    /// Sorted spans of `refs`
    pub ref_spans: SpanSet,

    /// Sorted spans of URLs
    pub url_spans: SpanSet,

    /// Alternate names declared with `Aliases::`
    pub aliases: Vec<String>,
}

impl ParsedNote {
    pub fn parse(content: &str) -> Self {
        let refs = extract_refs(content);
        ParsedNote {
            ref_spans: ref_spans(&refs),
            url_spans: url_spans(content),
            aliases: extract_aliases(content),
            refs,
        }
    }
}

/// `source` explicitly references `target`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backlink {
    pub target: String,
    pub source: String,
    pub reference: Reference,
}

/// `source` mentions `term`, a name of `target`, as plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlinkedMention {
    pub target: String,
    pub term: String,
    pub source: String,
    pub span: Span,
}

/// Both indexes for a whole corpus, keyed by target note
#[derive(Debug, Clone, Default)]
pub struct CrossRefIndex {
    pub notes: BTreeMap<String, ParsedNote>,
    pub backlinks: BTreeMap<String, Vec<Backlink>>,
    pub unlinked: BTreeMap<String, Vec<UnlinkedMention>>,
}

impl CrossRefIndex {
    /// Parse every note once, then build both indexes from the original text
    pub fn build(corpus: &Corpus) -> Self {
        let notes = parse_notes(corpus);
        let backlinks = build_back_links(corpus, &notes);
        let unlinked = build_unlinked_links(corpus, &notes);

        debug!(
            notes = notes.len(),
            backlinks = backlinks.values().map(Vec::len).sum::<usize>(),
            unlinked = unlinked.values().map(Vec::len).sum::<usize>(),
            "built cross-reference index"
        );

        CrossRefIndex { notes, backlinks, unlinked }
    }

    pub fn backlinks_for(&self, key: &str) -> &[Backlink] {
        self.backlinks.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn unlinked_for(&self, key: &str) -> &[UnlinkedMention] {
        self.unlinked.get(key).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Backlink index alone, without scanning for unlinked mentions
pub fn get_back_links(corpus: &Corpus) -> BTreeMap<String, Vec<Backlink>> {
    build_back_links(corpus, &parse_notes(corpus))
}

/// Run the per-note extraction over the whole corpus
pub fn parse_notes(corpus: &Corpus) -> BTreeMap<String, ParsedNote> {
    corpus
        .iter()
        .map(|(key, content)| (key.clone(), ParsedNote::parse(content)))
        .collect()
}

/// Index every reference whose `target_raw` + extension names a note in the
/// corpus. A note linking to itself is not recorded.
pub fn build_back_links(
    corpus: &Corpus,
    notes: &BTreeMap<String, ParsedNote>,
) -> BTreeMap<String, Vec<Backlink>> {
    let mut back_links: BTreeMap<String, Vec<Backlink>> = BTreeMap::new();

    for (source, note) in notes {
        for reference in &note.refs {
            let target = format!("{}{}", reference.target_raw, NOTE_EXTENSION);
            if &target == source || !corpus.contains_key(&target) {
                continue;
            }
            back_links.entry(target.clone()).or_default().push(Backlink {
                target,
                source: source.clone(),
                reference: reference.clone(),
            });
        }
    }

    back_links
}

/// Index plain-text mentions of every note's name and aliases in every other
/// note, outside references and URLs. Two terms matching the same span of a
/// source produce a single entry.
pub fn build_unlinked_links(
    corpus: &Corpus,
    notes: &BTreeMap<String, ParsedNote>,
) -> BTreeMap<String, Vec<UnlinkedMention>> {
    let mut unlinked: BTreeMap<String, Vec<UnlinkedMention>> = BTreeMap::new();

    let terms_by_target: Vec<(&String, Vec<String>)> = notes
        .iter()
        .map(|(key, note)| (key, mention_terms(key, note)))
        .collect();

    for (source, content) in corpus {
        let Some(source_note) = notes.get(source) else {
            continue;
        };

        for (target, terms) in &terms_by_target {
            if *target == source {
                continue;
            }

            let mut seen: HashSet<Span> = HashSet::new();
            for term in terms {
                let found = find_mentions_outside_links(
                    content,
                    term,
                    &source_note.ref_spans,
                    &source_note.url_spans,
                );
                for span in found {
                    if !seen.insert(span) {
                        continue;
                    }
                    unlinked.entry((*target).clone()).or_default().push(UnlinkedMention {
                        target: (*target).clone(),
                        term: term.clone(),
                        source: source.clone(),
                        span,
                    });
                }
            }
        }
    }

    unlinked
}

/// The note's bare name followed by its aliases, without duplicates
fn mention_terms(key: &str, note: &ParsedNote) -> Vec<String> {
    let mut terms = vec![display_name(key).to_string()];
    for alias in &note.aliases {
        if !terms.contains(alias) {
            terms.push(alias.clone());
        }
    }
    terms
}
