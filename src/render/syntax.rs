//! In-document syntax rewriting: todo markers and references to markdown links

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::index::NOTE_EXTENSION;
use crate::parser::{ATTRIBUTE_RE, HASHTAG_RE, WIKILINK_RE};

lazy_static! {
    static ref TODO_RE: Regex = Regex::new(r"\{\{\[\[TODO\]\]\}\} *").unwrap();
    static ref DONE_RE: Regex = Regex::new(r"\{\{\[\[DONE\]\]\}\} *").unwrap();
}

/// `{{[[TODO]]}}` becomes `[ ] ` and `{{[[DONE]]}}` becomes `[x] `
pub fn format_to_do(contents: &str) -> String {
    let contents = TODO_RE.replace_all(contents, "[ ] ");
    DONE_RE.replace_all(&contents, "[x] ").into_owned()
}

/// One `../` per hierarchy separator in the key
pub fn link_prefix(key: &str) -> String {
    "../".repeat(key.matches('/').count())
}

/// Rewrite `[[Name]]`, `#Name` and `- Key:: value` into markdown links, in
/// that order. Every link target is `{link_prefix}Name.md`.
///
/// Recursive references like `[[[[a]] b]]` are not handled.
pub fn format_link(string: &str, link_prefix: &str) -> String {
    let string = WIKILINK_RE.replace_all(string, |caps: &Captures| {
        format!("[{0}](<{1}{0}{2}>)", &caps[1], link_prefix, NOTE_EXTENSION)
    });

    let string = HASHTAG_RE.replace_all(&string, |caps: &Captures| {
        format!("[{0}](<{1}{0}{2}>)", &caps[1], link_prefix, NOTE_EXTENSION)
    });

    let string = ATTRIBUTE_RE.replace_all(&string, |caps: &Captures| {
        format!(
            "{0}**[{1}](<{2}{1}{3}>):**",
            &caps[1], &caps[2], link_prefix, NOTE_EXTENSION
        )
    });

    string.into_owned()
}
