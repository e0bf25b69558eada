//! Domain-level error taxonomy for Patchbay.
//!
//! Absence (no trigger context, no fenced block, empty changeset) is never an
//! error in this engine; those states are modelled with `Option` and resolve
//! to a no-op. The variants here cover the genuinely fatal paths: the patch
//! primitive and the filesystem.

/// Patchbay domain errors.
#[derive(Debug, thiserror::Error)]
pub enum PatchbayError {
    #[error("patch rejected: {0}")]
    PatchRejected(String),

    #[error("git error: {0}")]
    GitError(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Patchbay domain operations.
pub type Result<T> = std::result::Result<T, PatchbayError>;
