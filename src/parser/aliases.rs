//! Alias parsing (`Aliases:: a, b, c`)

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ALIASES_RE: Regex = Regex::new(r"(?im)^ *(?:- )?aliases::(.*)$").unwrap();
}

/// Extract the alternate names a document declares for itself.
///
/// Every `Aliases::` line contributes its comma-separated values, trimmed,
/// in order of appearance. Duplicates keep their first position.
pub fn extract_aliases(content: &str) -> Vec<String> {
    let mut aliases: Vec<String> = Vec::new();

    for cap in ALIASES_RE.captures_iter(content) {
        for part in cap[1].split(',') {
            let alias = strip_brackets(part.trim());
            if alias.is_empty() {
                continue;
            }
            if !aliases.iter().any(|a| a == alias) {
                aliases.push(alias.to_string());
            }
        }
    }

    aliases
}

// Aliases written as `[[Name]]` mean the bare name
fn strip_brackets(value: &str) -> &str {
    value
        .strip_prefix("[[")
        .and_then(|v| v.strip_suffix("]]"))
        .map(str::trim)
        .unwrap_or(value)
}
