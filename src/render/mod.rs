//! Render module - turns a corpus of notes into cross-linked markdown

mod sections;
mod syntax;

use tracing::debug;

use crate::index::{Corpus, CrossRefIndex};

pub use sections::{add_back_links, add_unlinked_links};
pub use syntax::{format_link, format_to_do, link_prefix};

/// Which generated sections to append to each note
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub backlinks: bool,
    pub unlinked_references: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            backlinks: true,
            unlinked_references: true,
        }
    }
}

/// Format every note of the corpus.
///
/// Both indexes are built from the original text first: the sections quote
/// other notes by byte offset, so nothing may be rewritten before that.
/// Notes whose output is empty are dropped.
pub fn format_markdown(contents: &Corpus, options: RenderOptions) -> Corpus {
    let index = CrossRefIndex::build(contents);

    let mut out = Corpus::new();
    for (file_name, content) in contents {
        let prefix = link_prefix(file_name);
        let mut content = content.clone();

        if options.backlinks {
            content = add_back_links(&content, index.backlinks_for(file_name), contents, &prefix);
        }
        if options.unlinked_references {
            content = add_unlinked_links(&content, index.unlinked_for(file_name), contents, &prefix);
        }

        // Todo markers first, they are made of references themselves
        let content = format_to_do(&content);
        let content = format_link(&content, &prefix);

        if content.is_empty() {
            debug!(note = %file_name, "dropping empty note");
            continue;
        }
        out.insert(file_name.clone(), content);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(entries: &[(&str, &str)]) -> Corpus {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn format(entries: &[(&str, &str)]) -> Corpus {
        format_markdown(&corpus(entries), RenderOptions::default())
    }

    #[test]
    fn test_child_context_in_backlinks() {
        let formatted = format(&[
            ("A.md", "- Parent [[B]]\n  - Child\n    - Grandchild\n      - Great grandchild\n"),
            ("B.md", "content"),
        ]);
        let target = &formatted["B.md"];

        assert!(target.contains("# Backlinks (1)"));
        assert!(target.contains("- Parent [B](<B.md>)\n  - Child\n    - Grandchild"));
        assert!(!target.contains("Great"));
    }

    #[test]
    fn test_nested_indent_preserved() {
        let formatted = format(&[
            ("Source.md", "  - Nested [[Target]]\n    - Child\n"),
            ("Target.md", "Content"),
        ]);

        assert!(formatted["Target.md"].contains("- Nested [Target](<Target.md>)\n  - Child"));
    }

    #[test]
    fn test_dedents_base_indent_to_avoid_code_block() {
        let formatted = format(&[
            ("Source.md", "    - Deep [[Target]]\n      - Child\n"),
            ("Target.md", "Content"),
        ]);
        let target = &formatted["Target.md"];

        assert!(target.contains("\n- Deep [Target](<Target.md>)\n  - Child"));
    }

    #[test]
    fn test_plain_text_mentions() {
        let formatted = format(&[
            ("Source.md", "- Mention Target\n  - Child\n"),
            ("Target.md", "Content"),
        ]);
        let target = &formatted["Target.md"];

        assert!(target.contains("# Unlinked references (1)"));
        assert!(target.contains("- Mention Target\n  - Child"));
        assert!(!target.contains("# Backlinks"));
    }

    #[test]
    fn test_ignores_existing_links() {
        let formatted = format(&[("A.md", "- [[Target]]\n"), ("Target.md", "content")]);
        let target = &formatted["Target.md"];

        assert!(target.contains("# Backlinks (1)"));
        assert!(!target.contains("# Unlinked references"));
    }

    #[test]
    fn test_mention_inside_url_ignored() {
        let formatted = format(&[
            ("Source.md", "see https://example.com/Target"),
            ("Target.md", "content"),
        ]);

        assert_eq!(formatted["Target.md"], "content");
    }

    #[test]
    fn test_nested_note_uses_parent_prefix() {
        let formatted = format(&[("folder/Note.md", "see [[X]] and #tag")]);

        assert_eq!(
            formatted["folder/Note.md"],
            "see [X](<../X.md>) and [tag](<../tag.md>)"
        );
    }

    #[test]
    fn test_todo_rendered_before_links() {
        let formatted = format(&[("Tasks.md", "- {{[[TODO]]}} write\n- {{[[DONE]]}}read")]);

        assert_eq!(formatted["Tasks.md"], "- [ ] write\n- [x] read");
    }

    #[test]
    fn test_empty_note_dropped() {
        let formatted = format(&[("Empty.md", ""), ("Full.md", "text")]);

        assert!(!formatted.contains_key("Empty.md"));
        assert!(formatted.contains_key("Full.md"));
    }

    #[test]
    fn test_sections_can_be_disabled() {
        let contents = corpus(&[
            ("Source.md", "- [[Target]] and Target"),
            ("Target.md", "content"),
        ]);
        let options = RenderOptions {
            backlinks: false,
            unlinked_references: false,
        };
        let formatted = format_markdown(&contents, options);

        assert_eq!(formatted["Target.md"], "content");
    }

    #[test]
    fn test_backlinks_then_unlinked_order() {
        let formatted = format(&[
            ("Source.md", "- [[Target]]\n- plain Target"),
            ("Target.md", "content"),
        ]);
        let target = &formatted["Target.md"];

        let backlinks = target.find("# Backlinks (1)").unwrap();
        let unlinked = target.find("# Unlinked references (1)").unwrap();
        assert!(backlinks < unlinked);
        assert!(target.contains("## Target\n### [Source](<Source.md>)\n- plain Target"));
    }
}
