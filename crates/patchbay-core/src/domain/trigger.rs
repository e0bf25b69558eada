//! Trigger context: the issue/comment identity and bodies for one run.
//!
//! The event payload lives wherever the invoking environment put it (for
//! GitHub Actions that is the file named by `GITHUB_EVENT_PATH`); the engine
//! never reads the environment itself. An absent or unparsable payload is an
//! explicit "no context" signal, not an error — the run then resolves to a
//! no-op.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimal data needed to decide what changeset, if any, to apply.
///
/// Constructed once per invocation and read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriggerContext {
    /// Issue (or discussion) number the run was triggered for.
    pub issue_number: u64,

    /// Issue title, empty when the payload omits it.
    pub title: String,

    /// Issue body. Probed for fenced blocks before the comment body.
    pub issue_body: String,

    /// Body of the triggering comment, when the event carries one.
    pub comment_body: Option<String>,
}

// Payload shapes below mirror the webhook JSON this engine is fed. Every
// field is optional; missing sub-objects degrade to defaults.

#[derive(Debug, Clone, Default, Deserialize)]
struct IssuePayload {
    #[serde(default)]
    number: Option<u64>,

    #[serde(default)]
    title: Option<String>,

    #[serde(default)]
    body: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CommentPayload {
    #[serde(default)]
    body: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EventPayload {
    #[serde(default)]
    issue: Option<IssuePayload>,

    /// Discussion-triggered events carry the same shape under `discussion`.
    #[serde(default)]
    discussion: Option<IssuePayload>,

    #[serde(default)]
    comment: Option<CommentPayload>,
}

impl TriggerContext {
    fn from_payload(payload: EventPayload) -> Self {
        let issue = payload.issue.or(payload.discussion).unwrap_or_default();
        TriggerContext {
            issue_number: issue.number.unwrap_or(0),
            title: issue.title.unwrap_or_default(),
            issue_body: issue.body.unwrap_or_default(),
            comment_body: payload.comment.and_then(|c| c.body),
        }
    }
}

/// Load the trigger context from an event payload file.
///
/// Returns `None` when the file is absent, unreadable, or not valid JSON.
/// A payload that parses but lacks the `issue`/`discussion` object still
/// yields a context with defaulted fields; downstream extraction then finds
/// nothing and the run resolves to a no-op.
pub fn load_trigger_context(path: &Path) -> Option<TriggerContext> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no event payload");
            return None;
        }
    };

    let payload: EventPayload = match serde_json::from_str(&raw) {
        Ok(payload) => payload,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "event payload is not valid JSON");
            return None;
        }
    };

    Some(TriggerContext::from_payload(payload))
}
