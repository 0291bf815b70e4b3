//! Index module - backlink and unlinked-mention indexes over a corpus

mod builder;

use std::collections::BTreeMap;

pub use builder::{get_back_links, Backlink, CrossRefIndex, UnlinkedMention};

/// Document key (path-like, `/`-separated) to raw text
pub type Corpus = BTreeMap<String, String>;

/// Extension every note key carries
pub const NOTE_EXTENSION: &str = ".md";

/// A note's name as written in links: its key without the extension
pub fn display_name(key: &str) -> &str {
    key.strip_suffix(NOTE_EXTENSION).unwrap_or(key)
}
