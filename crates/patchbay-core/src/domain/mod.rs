//! Domain models for Patchbay.
//!
//! Canonical definitions for the core entities:
//! - `TriggerContext`: Issue/comment identity and bodies for one run
//! - `Changeset`: Parsed representation of "what to change"
//! - `ApplicationResult`: Outcome of applying a changeset

pub mod changeset;
pub mod error;
pub mod trigger;

// Re-export main types and errors
pub use changeset::{
    is_safe_relative_path, ApplicationResult, Changeset, ChangesetKind, FileEntry, PREVIEW_LIMIT,
};
pub use error::{PatchbayError, Result};
pub use trigger::{load_trigger_context, TriggerContext};
