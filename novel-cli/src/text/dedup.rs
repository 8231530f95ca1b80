//! Removal of duplicated chapter headings.
//!
//! Scraped or merged novel files often carry the same heading twice,
//! sometimes with different indentation. Duplicates are detected among
//! the *filtered sequence of boundary lines*: two headings are adjacent
//! even when body text sits between them, and body text itself is never
//! considered for removal.

use super::{leading_indent, ChapterPattern};

/// A boundary line tagged during the first pass.
struct BoundaryEntry {
    /// Index into the original line sequence.
    index: usize,
    trimmed: String,
    indent: usize,
}

/// Remove duplicated chapter headings from `lines`.
///
/// Tag-then-filter, two passes:
/// 1. record every boundary line with its trimmed content and indent;
/// 2. walk the tagged entries pairwise; identical trimmed content keeps
///    the entry with the smaller-or-equal indentation (ties keep the
///    earlier line) and drops the other from both the entry list and
///    the output.
///
/// Dropping the loser from the entry list (rather than skipping past
/// it) is what makes runs of three or more identical headings collapse
/// to a single survivor, and makes the whole pass idempotent.
pub fn deduplicate_lines(lines: Vec<String>, pattern: &ChapterPattern) -> Vec<String> {
    let mut entries: Vec<BoundaryEntry> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| pattern.is_boundary(line))
        .map(|(index, line)| BoundaryEntry {
            index,
            trimmed: line.trim().to_string(),
            indent: leading_indent(line),
        })
        .collect();

    let mut deleted = vec![false; lines.len()];

    let mut i = 0;
    while i + 1 < entries.len() {
        if entries[i].trimmed != entries[i + 1].trimmed {
            i += 1;
            continue;
        }
        if entries[i].indent <= entries[i + 1].indent {
            deleted[entries[i + 1].index] = true;
            entries.remove(i + 1);
        } else {
            deleted[entries[i].index] = true;
            entries.remove(i);
        }
        // The survivor stays at position i and is compared against the
        // next entry on the following iteration.
    }

    lines
        .into_iter()
        .enumerate()
        .filter(|(index, _)| !deleted[*index])
        .map(|(_, line)| line)
        .collect()
}
