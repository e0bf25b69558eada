//! Plan directive: the optional ```plan block accompanying a changeset.
//!
//! Authors may annotate an issue with a plan block whose `mode:` line labels
//! the kind of change (enhancement, bugfix, refactor, ...). The mode feeds
//! the branch name suggested to the downstream branch/PR collaborator; it
//! never affects extraction or application.

use chrono::Utc;
use regex::Regex;

use crate::domain::TriggerContext;
use crate::extract::extract_block;

/// Fence name of the plan block.
pub const PLAN_FENCE: &str = "plan";

/// Mode used when no plan block or no `mode:` line is present.
pub const DEFAULT_MODE: &str = "enhancement";

/// Parsed plan directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDirective {
    /// Change-kind label from the plan's `mode:` line.
    pub mode: String,
}

impl Default for PlanDirective {
    fn default() -> Self {
        PlanDirective {
            mode: DEFAULT_MODE.to_string(),
        }
    }
}

/// Parse a plan block's content into a directive.
///
/// The `mode:` line is matched case-insensitively anywhere in the block;
/// anything else in the plan is free-form prose for human readers.
pub fn parse_plan(block: &str) -> PlanDirective {
    if let Ok(re) = Regex::new(r"(?i)mode:\s*(\w+)") {
        if let Some(caps) = re.captures(block) {
            if let Some(mode) = caps.get(1) {
                return PlanDirective {
                    mode: mode.as_str().to_lowercase(),
                };
            }
        }
    }
    PlanDirective::default()
}

/// Extract and parse the plan directive for a trigger context, probing the
/// issue body first and the comment body second (same source order as
/// changeset extraction).
pub fn plan_for_context(ctx: &TriggerContext) -> PlanDirective {
    extract_block(&ctx.issue_body, PLAN_FENCE)
        .or_else(|| {
            ctx.comment_body
                .as_deref()
                .and_then(|c| extract_block(c, PLAN_FENCE))
        })
        .map(|block| parse_plan(&block))
        .unwrap_or_default()
}

/// Suggest a working-branch name for this run.
///
/// Timestamped so repeated runs against the same issue never collide.
pub fn branch_slug(mode: &str) -> String {
    format!("patchbay/{}-{}", Utc::now().timestamp_millis(), mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(issue_body: &str, comment_body: Option<&str>) -> TriggerContext {
        TriggerContext {
            issue_number: 1,
            title: "t".to_string(),
            issue_body: issue_body.to_string(),
            comment_body: comment_body.map(str::to_string),
        }
    }

    #[test]
    fn mode_line_is_parsed() {
        let plan = parse_plan("Refactor the widget.\nmode: refactor\n");
        assert_eq!(plan.mode, "refactor");
    }

    #[test]
    fn mode_matching_is_case_insensitive() {
        assert_eq!(parse_plan("MODE: Bugfix").mode, "bugfix");
    }

    #[test]
    fn missing_mode_defaults() {
        assert_eq!(parse_plan("no directives here").mode, DEFAULT_MODE);
    }

    #[test]
    fn absent_plan_block_defaults() {
        let ctx = context("nothing fenced", None);
        assert_eq!(plan_for_context(&ctx).mode, DEFAULT_MODE);
    }

    #[test]
    fn issue_body_plan_wins_over_comment() {
        let ctx = context(
            "```plan\nmode: refactor\n```",
            Some("```plan\nmode: bugfix\n```"),
        );
        assert_eq!(plan_for_context(&ctx).mode, "refactor");
    }

    #[test]
    fn comment_plan_used_when_issue_has_none() {
        let ctx = context("prose only", Some("```plan\nmode: docs\n```"));
        assert_eq!(plan_for_context(&ctx).mode, "docs");
    }

    #[test]
    fn branch_slug_embeds_mode() {
        let slug = branch_slug("refactor");
        assert!(slug.starts_with("patchbay/"));
        assert!(slug.ends_with("-refactor"));
    }
}
