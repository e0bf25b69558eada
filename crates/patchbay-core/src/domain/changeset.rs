//! Typed changeset representations and application outcomes.
//!
//! A [`Changeset`] is the parsed form of "what to change", derived from a
//! fenced block before any filesystem work happens. Absence of a changeset is
//! a valid state and is modelled as `Option<Changeset>::None` by callers.

use std::collections::BTreeSet;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

/// Maximum number of characters of offending input carried in a failure.
///
/// Keeps large patches out of logs; triage gets a bounded preview instead.
pub const PREVIEW_LIMIT: usize = 200;

/// Which changeset grammar a run probes for.
///
/// Mode selection is external configuration, never inferred from the text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChangesetKind {
    /// A unified-diff document in a ```patches block.
    Patch,

    /// Explicit (path, content) records in a ```files block.
    Files,
}

impl ChangesetKind {
    /// Fence name probed for in the issue/comment text.
    pub fn fence_name(&self) -> &'static str {
        match self {
            ChangesetKind::Patch => "patches",
            ChangesetKind::Files => "files",
        }
    }
}

/// One file record from a ```files block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileEntry {
    /// Working-tree-relative destination path.
    pub path: String,

    /// Full replacement content for the file.
    pub content: String,
}

/// Parsed changeset, ready for application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Changeset {
    /// Unified-diff text, applied via the external patch primitive.
    Diff { text: String },

    /// Ordered file writes. Document order is preserved so that a duplicated
    /// path resolves to last-write-wins on application.
    Files { entries: Vec<FileEntry> },
}

/// Outcome of applying (or declining to apply) a changeset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApplicationResult {
    /// Changeset applied; carries every path actually touched.
    Applied { paths: BTreeSet<String> },

    /// No changeset was present. Maps to a successful exit.
    NoOp,

    /// Application failed. Fatal for the run.
    Failed {
        reason: String,
        input_preview: String,
    },
}

impl ApplicationResult {
    /// Build a failure, bounding the offending input to [`PREVIEW_LIMIT`]
    /// characters.
    pub fn failed(reason: impl Into<String>, offending_input: &str) -> Self {
        ApplicationResult::Failed {
            reason: reason.into(),
            input_preview: truncate_chars(offending_input, PREVIEW_LIMIT),
        }
    }

    /// Whether this outcome maps to a zero exit code.
    pub fn is_success(&self) -> bool {
        !matches!(self, ApplicationResult::Failed { .. })
    }
}

/// Truncate to at most `max` characters, safe on multi-byte boundaries.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Validate the files-mode path invariant: relative, inside the working
/// tree, no parent traversal.
///
/// Violations are skipped per-entry by the applicator, not fatal to the
/// whole changeset.
pub fn is_safe_relative_path(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    Path::new(path).components().all(|c| match c {
        Component::Normal(_) | Component::CurDir => true,
        Component::ParentDir | Component::RootDir | Component::Prefix(_) => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fence_names_match_operating_modes() {
        assert_eq!(ChangesetKind::Patch.fence_name(), "patches");
        assert_eq!(ChangesetKind::Files.fence_name(), "files");
    }

    #[test]
    fn failed_preview_is_bounded_to_200_chars() {
        let long = "x".repeat(500);
        let result = ApplicationResult::failed("boom", &long);
        match result {
            ApplicationResult::Failed { input_preview, .. } => {
                assert_eq!(input_preview.chars().count(), PREVIEW_LIMIT);
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn failed_preview_respects_multibyte_boundaries() {
        let long = "é".repeat(300);
        let result = ApplicationResult::failed("boom", &long);
        match result {
            ApplicationResult::Failed { input_preview, .. } => {
                assert_eq!(input_preview.chars().count(), PREVIEW_LIMIT);
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn short_input_preview_is_verbatim() {
        let result = ApplicationResult::failed("boom", "tiny");
        match result {
            ApplicationResult::Failed { input_preview, .. } => {
                assert_eq!(input_preview, "tiny");
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn safe_paths_accepted() {
        assert!(is_safe_relative_path("a/b.txt"));
        assert!(is_safe_relative_path("./src/lib.rs"));
        assert!(is_safe_relative_path("deeply/nested/dir/file"));
    }

    #[test]
    fn traversal_and_absolute_paths_rejected() {
        assert!(!is_safe_relative_path("../../etc/passwd"));
        assert!(!is_safe_relative_path("a/../../b"));
        assert!(!is_safe_relative_path("/etc/passwd"));
        assert!(!is_safe_relative_path(""));
    }

    #[test]
    fn no_op_is_success() {
        assert!(ApplicationResult::NoOp.is_success());
        assert!(ApplicationResult::Applied {
            paths: BTreeSet::new()
        }
        .is_success());
        assert!(!ApplicationResult::failed("r", "i").is_success());
    }
}
