//! Changeset parsing: fenced-block content into a typed [`Changeset`].
//!
//! Two sub-parsers, selected by the [`ChangesetKind`] the caller is probing
//! for; a run probes exactly one kind. The files grammar is informal and
//! human-authored, so parsing favors availability over strictness: malformed
//! records are skipped, never fatal. That leniency is a deliberate policy,
//! not an oversight.

use tracing::warn;

use crate::domain::{Changeset, ChangesetKind, FileEntry};

/// Parse extracted block content into a changeset.
///
/// Returns `None` for whitespace-only diff content and for a files block
/// with no well-formed records — absence, not an error.
pub fn parse_changeset(block: &str, kind: ChangesetKind) -> Option<Changeset> {
    match kind {
        ChangesetKind::Patch => {
            if block.trim().is_empty() {
                None
            } else {
                Some(Changeset::Diff {
                    text: block.to_string(),
                })
            }
        }
        ChangesetKind::Files => {
            let entries = parse_file_records(block);
            if entries.is_empty() {
                None
            } else {
                Some(Changeset::Files { entries })
            }
        }
    }
}

/// Split a ```files block into records on `---` separator lines and parse
/// each. Records are accumulated in document order; a duplicated path is
/// left in place so sequential application gives last-write-wins.
fn parse_file_records(block: &str) -> Vec<FileEntry> {
    let mut entries = Vec::new();
    let mut record: Vec<&str> = Vec::new();

    for raw in block.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim_end() == "---" {
            flush_record(&record, &mut entries);
            record.clear();
        } else {
            record.push(line);
        }
    }
    flush_record(&record, &mut entries);

    entries
}

fn flush_record(lines: &[&str], entries: &mut Vec<FileEntry>) {
    if lines.iter().all(|l| l.trim().is_empty()) {
        return;
    }
    match parse_record(lines) {
        Some(entry) => entries.push(entry),
        None => {
            warn!(
                record_head = lines.first().map(|l| l.trim()).unwrap_or(""),
                "skipping malformed file record"
            );
        }
    }
}

/// Parse one record: a `path:` line, a `content: |` marker line, then the
/// block-literal content. Either piece missing disqualifies the record.
fn parse_record(lines: &[&str]) -> Option<FileEntry> {
    let marker = lines.iter().position(|l| {
        l.trim()
            .strip_prefix("content:")
            .is_some_and(|rest| rest.trim() == "|")
    })?;

    let path = lines[..marker]
        .iter()
        .find_map(|l| l.trim().strip_prefix("path:"))
        .map(|v| v.trim().to_string())
        .filter(|p| !p.is_empty())?;

    Some(FileEntry {
        path,
        content: block_literal(&lines[marker + 1..]),
    })
}

/// Block-literal semantics for the lines after the `content: |` marker:
/// one leading blank line is dropped exactly once, every line is dedented by
/// the first non-empty line's indentation, and the result carries a trailing
/// newline.
fn block_literal(lines: &[&str]) -> String {
    let body = match lines.first() {
        Some(first) if first.trim().is_empty() => &lines[1..],
        _ => lines,
    };

    if body.is_empty() {
        return String::new();
    }

    let indent = body
        .iter()
        .find(|l| !l.trim().is_empty())
        .map(|l| &l[..l.len() - l.trim_start().len()])
        .unwrap_or("");

    let mut content = String::new();
    for line in body {
        content.push_str(line.strip_prefix(indent).unwrap_or(line));
        content.push('\n');
    }
    content
}
