//! CLI command implementations

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Config;
use crate::index::{display_name, get_back_links, Corpus, CrossRefIndex, NOTE_EXTENSION};
use crate::parser::{extract_line_with_children, line_number, RefKind, Reference};
use crate::render::format_markdown;
use crate::vault::{read_markdown_directory, save_files};

/// One backlink or mention, as printed by `backlinks` / `unlinked`
#[derive(Debug, Serialize)]
struct EntryRow<'a> {
    source: &'a str,
    line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    term: Option<&'a str>,
    context: String,
}

/// Format a directory of notes into another directory
pub fn format(config: &Config, source: Option<PathBuf>, destination: Option<PathBuf>) -> Result<()> {
    let source = resolve_source(source, config)?;
    let destination = destination
        .or_else(|| config.destination.clone())
        .context("No destination directory given and none configured")?;

    println!("Formatting notes: {}", source.display());

    let contents = load(&source)?;
    let formatted = format_markdown(&contents, config.render_options());

    save_files(&destination, &formatted)
        .with_context(|| format!("Failed to write notes to {}", destination.display()))?;

    let dropped = contents.len() - formatted.len();
    info!(
        read = contents.len(),
        written = formatted.len(),
        dropped,
        destination = %destination.display(),
        "formatted notes"
    );

    println!("✓ Wrote {} notes to {}", formatted.len(), destination.display());
    if dropped > 0 {
        println!("  {} empty notes skipped", dropped);
    }

    Ok(())
}

/// Show the notes that explicitly reference a note
pub fn backlinks(config: &Config, source: Option<PathBuf>, note: &str, json: bool) -> Result<()> {
    let contents = load(&resolve_source(source, config)?)?;
    let target = note_key(note);

    let back_links = get_back_links(&contents);
    let links = back_links.get(&target).map(Vec::as_slice).unwrap_or_default();

    let rows: Vec<EntryRow> = links
        .iter()
        .map(|link| {
            let text = source_text(&contents, &link.source);
            EntryRow {
                source: &link.source,
                line: line_number(text, link.reference.start),
                term: None,
                context: extract_line_with_children(text, link.reference.start, link.reference.end),
            }
        })
        .collect();

    print_rows(&rows, json, &format!("Backlinks to '{}'", display_name(&target)))
}

/// Show plain-text mentions of a note that are not linked
pub fn unlinked(config: &Config, source: Option<PathBuf>, note: &str, json: bool) -> Result<()> {
    let contents = load(&resolve_source(source, config)?)?;
    let target = note_key(note);

    let index = CrossRefIndex::build(&contents);

    let rows: Vec<EntryRow> = index
        .unlinked_for(&target)
        .iter()
        .map(|mention| {
            let text = source_text(&contents, &mention.source);
            EntryRow {
                source: &mention.source,
                line: line_number(text, mention.span.start),
                term: Some(mention.term.as_str()),
                context: extract_line_with_children(text, mention.span.start, mention.span.end),
            }
        })
        .collect();

    print_rows(
        &rows,
        json,
        &format!("Unlinked references to '{}'", display_name(&target)),
    )
}

/// Show statistics about a directory of notes
pub fn stats(config: &Config, source: Option<PathBuf>) -> Result<()> {
    let contents = load(&resolve_source(source, config)?)?;
    let index = CrossRefIndex::build(&contents);

    let refs: Vec<&Reference> = index.notes.values().flat_map(|n| &n.refs).collect();
    let count_kind = |kind: RefKind| refs.iter().filter(|r| r.kind == kind).count();
    let aliased = index.notes.values().filter(|n| !n.aliases.is_empty()).count();
    let backlink_count: usize = index.backlinks.values().map(Vec::len).sum();
    let unlinked_count: usize = index.unlinked.values().map(Vec::len).sum();

    println!("Note Statistics");
    println!("===============");
    println!("Notes:       {}", contents.len());
    println!("Aliased:     {}", aliased);
    println!("References:  {}", refs.len());
    println!("  [[links]]  {}", count_kind(RefKind::Bracketed));
    println!("  #tags      {}", count_kind(RefKind::HashTag));
    println!("  attributes {}", count_kind(RefKind::Attribute));
    println!("Backlinks:   {}", backlink_count);
    println!("Unlinked:    {}", unlinked_count);

    Ok(())
}

/// Create the default config file
pub fn config_init() -> Result<()> {
    let path = Config::create_default()?;
    println!("✓ Config file: {}", path.display());
    Ok(())
}

fn resolve_source(source: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    source
        .or_else(|| config.source.clone())
        .context("No source directory given and none configured")
}

fn load(source: &Path) -> Result<Corpus> {
    let contents = read_markdown_directory(source)
        .with_context(|| format!("Failed to read notes from {}", source.display()))?;
    info!(notes = contents.len(), source = %source.display(), "loaded notes");
    Ok(contents)
}

fn source_text<'a>(contents: &'a Corpus, key: &str) -> &'a str {
    contents.get(key).map(String::as_str).unwrap_or_default()
}

// `Note` and `Note.md` name the same note
fn note_key(note: &str) -> String {
    if note.ends_with(NOTE_EXTENSION) {
        note.to_string()
    } else {
        format!("{}{}", note, NOTE_EXTENSION)
    }
}

fn print_rows(rows: &[EntryRow], json: bool, title: &str) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No entries found.");
        return Ok(());
    }

    println!("{} ({}):\n", title, rows.len());
    for row in rows {
        match row.term {
            Some(term) => println!("  ← {}:{} [{}]", row.source, row.line, term),
            None => println!("  ← {}:{}", row.source, row.line),
        }
        for line in row.context.lines() {
            println!("      {}", line);
        }
    }

    Ok(())
}
