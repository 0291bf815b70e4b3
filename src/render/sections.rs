//! Backlinks and unlinked references sections appended to a note

use std::collections::{BTreeMap, HashSet};

use crate::index::{display_name, Backlink, Corpus, UnlinkedMention, NOTE_EXTENSION};
use crate::parser::extract_line_with_children;

/// Append `# Backlinks (n)` with one heading per source note and the quoted
/// context of each reference, ordered by (source name, offset).
///
/// Contexts are cut from the sources' original text, so this must run before
/// any note is rewritten.
pub fn add_back_links(
    content: &str,
    back_links: &[Backlink],
    corpus: &Corpus,
    link_prefix: &str,
) -> String {
    let mut entries: Vec<(&str, &Backlink)> = back_links
        .iter()
        .map(|link| (display_name(&link.source), link))
        .collect();
    entries.sort_by(|(a_name, a), (b_name, b)| {
        (*a_name, a.reference.start, &a.source, &a.reference)
            .cmp(&(*b_name, b.reference.start, &b.source, &b.reference))
    });
    entries.dedup();

    if entries.is_empty() {
        return content.to_string();
    }

    let mut new_lines: Vec<String> = Vec::new();
    let mut file_before: Option<&str> = None;
    for (name, link) in &entries {
        if file_before != Some(*name) {
            new_lines.push(format!("## {}", source_link(name, link_prefix)));
        }
        file_before = Some(*name);

        let text = corpus.get(&link.source).map(String::as_str).unwrap_or_default();
        new_lines.push(extract_line_with_children(
            text,
            link.reference.start,
            link.reference.end,
        ));
        new_lines.push(String::new());
    }

    format!(
        "{}\n# Backlinks ({})\n{}\n",
        content,
        entries.len(),
        new_lines.join("\n")
    )
}

/// Append `# Unlinked references (n)`, grouped by matched term (alphabetical)
/// and then by source note. Mentions quoting the same block of the same
/// source under one term are shown once; `n` counts the blocks shown.
pub fn add_unlinked_links(
    content: &str,
    unlinked_links: &[UnlinkedMention],
    corpus: &Corpus,
    link_prefix: &str,
) -> String {
    let mut by_term: BTreeMap<&str, Vec<(&str, &UnlinkedMention)>> = BTreeMap::new();
    for mention in unlinked_links {
        by_term
            .entry(mention.term.as_str())
            .or_default()
            .push((display_name(&mention.source), mention));
    }

    let mut new_lines: Vec<String> = Vec::new();
    let mut count = 0;
    for (term, mut entries) in by_term {
        entries.sort_by(|(a_name, a), (b_name, b)| {
            (*a_name, a.span.start, &a.source).cmp(&(*b_name, b.span.start, &b.source))
        });

        let mut seen: HashSet<(&str, String)> = HashSet::new();
        let mut blocks: Vec<(&str, String)> = Vec::new();
        for (name, mention) in entries {
            let text = corpus.get(&mention.source).map(String::as_str).unwrap_or_default();
            let block = extract_line_with_children(text, mention.span.start, mention.span.end);
            if seen.insert((mention.source.as_str(), block.clone())) {
                blocks.push((name, block));
            }
        }

        new_lines.push(format!("## {}", term));
        let mut file_before: Option<&str> = None;
        for (name, block) in blocks {
            if file_before != Some(name) {
                new_lines.push(format!("### {}", source_link(name, link_prefix)));
            }
            file_before = Some(name);

            new_lines.push(block);
            new_lines.push(String::new());
            count += 1;
        }
    }

    if count == 0 {
        return content.to_string();
    }

    format!(
        "{}\n# Unlinked references ({})\n{}\n",
        content,
        count,
        new_lines.join("\n")
    )
}

fn source_link(name: &str, link_prefix: &str) -> String {
    format!("[{0}](<{1}{0}{2}>)", name, link_prefix, NOTE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::CrossRefIndex;

    fn corpus(entries: &[(&str, &str)]) -> Corpus {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_back_links() {
        let corpus = corpus(&[("A.md", "text")]);
        assert_eq!(add_back_links("text", &[], &corpus, ""), "text");
    }

    #[test]
    fn test_back_links_grouped_by_source() {
        let corpus = corpus(&[
            ("Zed.md", "- z [[T]]"),
            ("Alpha.md", "- first [[T]]\n- second [[T]]"),
            ("T.md", "body"),
        ]);
        let index = CrossRefIndex::build(&corpus);
        let out = add_back_links("body", index.backlinks_for("T.md"), &corpus, "");

        assert_eq!(
            out,
            "body\n# Backlinks (3)\n\
             ## [Alpha](<Alpha.md>)\n- first [[T]]\n\n- second [[T]]\n\n\
             ## [Zed](<Zed.md>)\n- z [[T]]\n\n"
        );
    }

    #[test]
    fn test_back_links_heading_uses_prefix() {
        let corpus = corpus(&[("Src.md", "[[sub/T]]"), ("sub/T.md", "x")]);
        let index = CrossRefIndex::build(&corpus);
        let out = add_back_links("x", index.backlinks_for("sub/T.md"), &corpus, "../");

        assert!(out.contains("## [Src](<../Src.md>)"));
    }

    #[test]
    fn test_unlinked_grouped_by_term() {
        let corpus = corpus(&[
            ("Src.md", "- About Robert\n- Bobby again"),
            ("Robert.md", "- Aliases:: Bobby"),
        ]);
        let index = CrossRefIndex::build(&corpus);
        let out = add_unlinked_links("me", index.unlinked_for("Robert.md"), &corpus, "");

        assert_eq!(
            out,
            "me\n# Unlinked references (2)\n\
             ## Bobby\n### [Src](<Src.md>)\n- Bobby again\n\n\
             ## Robert\n### [Src](<Src.md>)\n- About Robert\n\n"
        );
    }

    #[test]
    fn test_unlinked_same_block_shown_once() {
        let corpus = corpus(&[
            ("Src.md", "- Widget and Widget\n  - child Widget\n"),
            ("Widget.md", "w"),
        ]);
        let index = CrossRefIndex::build(&corpus);
        let mentions = index.unlinked_for("Widget.md");
        let out = add_unlinked_links("w", mentions, &corpus, "");

        assert_eq!(mentions.len(), 3);
        assert!(out.contains("# Unlinked references (2)"));
        assert_eq!(out.matches("### [Src](<Src.md>)").count(), 1);
    }
}
