//! Context extraction - the quoted block shown under a backlink or mention

/// Return the line containing `start..end` plus up to two levels of nested
/// children below it.
///
/// Blank lines inside the block are kept as they are. The block stops at the
/// first line indented at or above the matched line, at a dedent below the
/// first child level, or at a third nesting level. When the matched line is
/// itself indented, that indentation is removed from every kept line so the
/// block renders at top level instead of as preformatted text.
pub fn extract_line_with_children(text: &str, start: usize, end: usize) -> String {
    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[end..].find('\n').map_or(text.len(), |i| end + i);

    let current_line = text[line_start..line_end].trim_end();
    let base_indent = leading_spaces(current_line);

    let mut lines = vec![current_line];
    let mut first_child_indent: Option<usize> = None;
    let mut second_child_indent: Option<usize> = None;

    let rest = if line_end < text.len() { &text[line_end + 1..] } else { "" };
    for line in rest.split('\n') {
        if is_blank(line) {
            lines.push(line);
            continue;
        }

        let indent = leading_spaces(line);
        if indent <= base_indent {
            break;
        }

        let first = *first_child_indent.get_or_insert(indent);
        if indent < first {
            break;
        }
        if indent > first && second_child_indent.is_none() {
            second_child_indent = Some(indent);
        }
        if second_child_indent.map_or(false, |second| indent > second) {
            break;
        }

        lines.push(line);
    }

    if base_indent > 0 {
        for line in lines.iter_mut() {
            *line = strip_leading_spaces(*line, base_indent);
        }
    }

    while lines.len() > 1 && lines.last().map_or(false, |l| is_blank(l)) {
        lines.pop();
    }

    lines.join("\n")
}

/// 1-based line number of a byte offset
pub fn line_number(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Strip up to `count` leading spaces, keeping relative indentation.
/// Blank lines are returned untouched.
fn strip_leading_spaces(line: &str, count: usize) -> &str {
    if is_blank(line) {
        return line;
    }
    let to_remove = leading_spaces(line).min(count);
    &line[to_remove..]
}
