//! The extraction/application pipeline for one invocation.
//!
//! Loader → Extractor → Parser → Applicator, strictly sequential. Every
//! stage short-circuits to absence rather than raising when its
//! precondition isn't met; only genuine application failures surface as
//! [`ApplicationResult::Failed`].

use std::path::Path;

use tracing::debug;

use crate::apply::apply_changeset;
use crate::domain::{ApplicationResult, Changeset, ChangesetKind, TriggerContext};
use crate::extract::extract_block;
use crate::obs;
use crate::parse::parse_changeset;

/// Locate and parse the changeset for a context, probing the issue body
/// first and the triggering comment body second; the first fenced hit wins.
pub fn changeset_for_context(
    ctx: &TriggerContext,
    kind: ChangesetKind,
) -> Option<Changeset> {
    let block = extract_block(&ctx.issue_body, kind.fence_name()).or_else(|| {
        ctx.comment_body
            .as_deref()
            .and_then(|comment| extract_block(comment, kind.fence_name()))
    })?;

    parse_changeset(&block, kind)
}

/// Run the full pipeline for one trigger context.
///
/// `ctx` is `None` when the loader found no usable event payload; the run
/// then resolves to [`ApplicationResult::NoOp`]. All process state (the
/// working-tree root, the mode) arrives as explicit parameters so the engine
/// stays testable without a process environment.
pub fn execute(
    ctx: Option<&TriggerContext>,
    kind: ChangesetKind,
    workdir: &Path,
) -> ApplicationResult {
    let Some(ctx) = ctx else {
        debug!("no trigger context; nothing to do");
        return ApplicationResult::NoOp;
    };

    obs::emit_run_started(ctx.issue_number, kind.fence_name());

    let changeset = changeset_for_context(ctx, kind);
    apply_changeset(changeset.as_ref(), workdir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(issue_body: &str, comment_body: Option<&str>) -> TriggerContext {
        TriggerContext {
            issue_number: 5,
            title: "test issue".to_string(),
            issue_body: issue_body.to_string(),
            comment_body: comment_body.map(str::to_string),
        }
    }

    #[test]
    fn no_context_is_no_op() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            execute(None, ChangesetKind::Files, dir.path()),
            ApplicationResult::NoOp
        );
    }

    #[test]
    fn body_without_blocks_is_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context("just a bug report, no fences", None);
        assert_eq!(
            execute(Some(&ctx), ChangesetKind::Files, dir.path()),
            ApplicationResult::NoOp
        );
    }

    #[test]
    fn issue_body_is_probed_before_comment() {
        let ctx = context(
            "```files\npath: from-issue.txt\ncontent: |\n  a\n```",
            Some("```files\npath: from-comment.txt\ncontent: |\n  b\n```"),
        );

        match changeset_for_context(&ctx, ChangesetKind::Files) {
            Some(Changeset::Files { entries }) => {
                assert_eq!(entries[0].path, "from-issue.txt");
            }
            other => panic!("expected files changeset, got {:?}", other),
        }
    }

    #[test]
    fn comment_body_is_probed_when_issue_has_no_block() {
        let ctx = context(
            "prose only",
            Some("```files\npath: from-comment.txt\ncontent: |\n  b\n```"),
        );

        match changeset_for_context(&ctx, ChangesetKind::Files) {
            Some(Changeset::Files { entries }) => {
                assert_eq!(entries[0].path, "from-comment.txt");
            }
            other => panic!("expected files changeset, got {:?}", other),
        }
    }

    #[test]
    fn kind_selects_which_fence_is_probed() {
        let ctx = context(
            "```files\npath: f.txt\ncontent: |\n  x\n```\n```patches\n--- a/y\n+++ b/y\n```",
            None,
        );

        assert!(matches!(
            changeset_for_context(&ctx, ChangesetKind::Patch),
            Some(Changeset::Diff { .. })
        ));
        assert!(matches!(
            changeset_for_context(&ctx, ChangesetKind::Files),
            Some(Changeset::Files { .. })
        ));
    }

    #[test]
    fn files_changeset_is_applied_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context("```files\npath: out.txt\ncontent: |\n  done\n```", None);

        match execute(Some(&ctx), ChangesetKind::Files, dir.path()) {
            ApplicationResult::Applied { paths } => assert!(paths.contains("out.txt")),
            other => panic!("expected Applied, got {:?}", other),
        }
        assert_eq!(
            std::fs::read_to_string(dir.path().join("out.txt")).unwrap(),
            "done\n"
        );
    }
}
