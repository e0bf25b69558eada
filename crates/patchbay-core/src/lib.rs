//! Patchbay Core Library
//!
//! Extracts structured changesets from fenced blocks in issue/comment text
//! and applies them to a git working tree, producing the exit-code contract
//! consumed by downstream commit/PR automation.
//!
//! Pipeline: trigger-context loading → fenced-block extraction → changeset
//! parsing → application → reporting. See [`engine::execute`] for the
//! single-invocation entry point.

pub mod apply;
pub mod domain;
pub mod engine;
pub mod extract;
pub mod git;
pub mod obs;
pub mod parse;
pub mod plan;
pub mod report;
pub mod telemetry;

pub use apply::apply_changeset;
pub use domain::{
    is_safe_relative_path, load_trigger_context, ApplicationResult, Changeset, ChangesetKind,
    FileEntry, PatchbayError, Result, TriggerContext, PREVIEW_LIMIT,
};
pub use engine::{changeset_for_context, execute};
pub use extract::extract_block;
pub use git::{apply_patch, is_git_repo, PatchOutcome};
pub use parse::parse_changeset;
pub use plan::{branch_slug, parse_plan, plan_for_context, PlanDirective, DEFAULT_MODE};
pub use report::{report, status_code};
pub use telemetry::init_tracing;

/// Patchbay version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
