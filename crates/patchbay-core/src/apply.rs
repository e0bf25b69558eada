//! Changeset application against a working-tree root.
//!
//! Application is sequential and not transactional: a failure partway
//! through a files changeset leaves prior entries written. Callers that
//! need atomicity must snapshot the tree beforehand.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::warn;

use crate::domain::{is_safe_relative_path, ApplicationResult, Changeset, FileEntry};
use crate::git;

/// Apply a parsed changeset to the tree rooted at `root`.
///
/// `None` is the valid no-changeset state and yields
/// [`ApplicationResult::NoOp`] immediately, which the reporter maps to a
/// successful exit so downstream "open a PR only if there are changes"
/// automation behaves.
pub fn apply_changeset(changeset: Option<&Changeset>, root: &Path) -> ApplicationResult {
    match changeset {
        None => ApplicationResult::NoOp,
        Some(Changeset::Diff { text }) => apply_diff(text, root),
        Some(Changeset::Files { entries }) => apply_files(entries, root),
    }
}

fn apply_diff(text: &str, root: &Path) -> ApplicationResult {
    match git::apply_patch(text, root) {
        Ok(outcome) if outcome.success => ApplicationResult::Applied {
            paths: paths_in_diff(text),
        },
        Ok(outcome) => ApplicationResult::failed(outcome.diagnostic, text),
        Err(e) => ApplicationResult::failed(e.to_string(), text),
    }
}

fn apply_files(entries: &[FileEntry], root: &Path) -> ApplicationResult {
    let mut touched = BTreeSet::new();

    for entry in entries {
        if !is_safe_relative_path(&entry.path) {
            warn!(path = %entry.path, "skipping file entry with unsafe path");
            continue;
        }

        let dest = root.join(&entry.path);
        if let Some(parent) = dest.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return ApplicationResult::failed(
                    format!("failed to create {}: {e}", parent.display()),
                    &format!("path: {}", entry.path),
                );
            }
        }
        if let Err(e) = std::fs::write(&dest, entry.content.as_bytes()) {
            return ApplicationResult::failed(
                format!("failed to write {}: {e}", entry.path),
                &format!("path: {}", entry.path),
            );
        }

        touched.insert(entry.path.clone());
    }

    ApplicationResult::Applied { paths: touched }
}

/// Recover the touched-path set from a unified diff's `---`/`+++` headers.
///
/// `a/`/`b/` prefixes are stripped; a `/dev/null` target (deletion) resolves
/// to the source side of the header pair.
fn paths_in_diff(diff: &str) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    let mut source: Option<String> = None;

    for line in diff.lines() {
        if let Some(rest) = line.strip_prefix("--- ") {
            source = Some(header_path(rest));
        } else if let Some(rest) = line.strip_prefix("+++ ") {
            let target = header_path(rest);
            if target != "/dev/null" {
                paths.insert(target);
            } else if let Some(old) = source.take() {
                if old != "/dev/null" {
                    paths.insert(old);
                }
            }
        }
    }

    paths
}

/// Normalize one diff header operand: drop the `a/`/`b/` prefix and any
/// tab-separated metadata suffix.
fn header_path(raw: &str) -> String {
    let stem = raw.split('\t').next().unwrap_or(raw).trim();
    stem.strip_prefix("a/")
        .or_else(|| stem.strip_prefix("b/"))
        .unwrap_or(stem)
        .to_string()
}
