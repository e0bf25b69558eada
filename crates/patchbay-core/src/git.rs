//! Git integration: the external patch-application primitive.
//!
//! The diff path of the applicator delegates to `git apply` with
//! whitespace-tolerant settings, so trailing-space and CRLF noise in an
//! issue-authored patch does not reject an otherwise clean diff. This is the
//! engine's only process-spawning side effect.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use crate::domain::{PatchbayError, Result};

/// Outcome of one patch-primitive invocation.
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    /// Whether the primitive accepted and applied the diff.
    pub success: bool,

    /// Diagnostic text captured from the primitive (stderr, falling back to
    /// stdout). Empty on clean success.
    pub diagnostic: String,
}

/// Apply unified-diff text to the working tree rooted at `workdir`.
///
/// The diff is written to a scratch file and handed to
/// `git apply --whitespace=fix`. Returns an error only when the primitive
/// cannot be spawned or the scratch file cannot be written; a diff the
/// primitive rejects comes back as a non-success [`PatchOutcome`].
pub fn apply_patch(diff_text: &str, workdir: &Path) -> Result<PatchOutcome> {
    let mut scratch = tempfile::NamedTempFile::new()?;
    scratch.write_all(diff_text.as_bytes())?;
    // git apply rejects a patch whose final hunk line lacks a newline.
    if !diff_text.ends_with('\n') {
        scratch.write_all(b"\n")?;
    }
    scratch.flush()?;

    let output = Command::new("git")
        .arg("apply")
        .arg("--whitespace=fix")
        .arg(scratch.path())
        .current_dir(workdir)
        .output()
        .map_err(|e| PatchbayError::GitError(format!("failed to run git apply: {e}")))?;

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

    Ok(PatchOutcome {
        success: output.status.success(),
        diagnostic: if stderr.is_empty() { stdout } else { stderr },
    })
}

/// Check whether a directory is inside a git work tree.
pub fn is_git_repo(dir: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(dir)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::process::Command as StdCommand;

    fn run_git(repo_dir: &Path, args: &[&str]) {
        let output = StdCommand::new("git")
            .args(args)
            .current_dir(repo_dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn make_git_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        run_git(dir.path(), &["init"]);
        run_git(dir.path(), &["config", "user.name", "test-user"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        dir
    }

    const REWRITE_DIFF: &str = "--- a/x.txt\n+++ b/x.txt\n@@ -1 +1 @@\n-old\n+new\n";

    #[test]
    fn clean_diff_applies() {
        let repo = make_git_repo();
        std::fs::write(repo.path().join("x.txt"), "old\n").unwrap();
        run_git(repo.path(), &["add", "x.txt"]);
        run_git(repo.path(), &["commit", "-m", "seed"]);

        let outcome = apply_patch(REWRITE_DIFF, repo.path()).unwrap();
        assert!(outcome.success, "diagnostic: {}", outcome.diagnostic);
        assert_eq!(
            std::fs::read_to_string(repo.path().join("x.txt")).unwrap(),
            "new\n"
        );
    }

    #[test]
    fn diff_without_trailing_newline_applies() {
        let repo = make_git_repo();
        std::fs::write(repo.path().join("x.txt"), "old\n").unwrap();

        let trimmed = REWRITE_DIFF.trim_end();
        let outcome = apply_patch(trimmed, repo.path()).unwrap();
        assert!(outcome.success, "diagnostic: {}", outcome.diagnostic);
    }

    #[test]
    fn rejected_diff_reports_diagnostic() {
        let repo = make_git_repo();
        let outcome = apply_patch("this is not a diff\n", repo.path()).unwrap();
        assert!(!outcome.success);
        assert!(!outcome.diagnostic.is_empty());
    }

    #[test]
    fn is_git_repo_true_for_repo() {
        let repo = make_git_repo();
        assert!(is_git_repo(repo.path()));
    }

    #[test]
    fn is_git_repo_false_for_non_repo() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_git_repo(dir.path()));
    }
}
