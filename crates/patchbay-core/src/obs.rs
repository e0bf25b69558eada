//! Structured observability hooks for run lifecycle events.
//!
//! Emission functions for the key moments of a run: start, changeset
//! applied, nothing to apply, application failed. Events are emitted at
//! `info!`/`error!` level; configure verbosity via `RUST_LOG` or the CLI
//! flags (see [`crate::telemetry::init_tracing`]).

use tracing::{error, info};

/// Emit event: run started for an issue, with the probed changeset kind.
pub fn emit_run_started(issue_number: u64, kind: &str) {
    info!(event = "run.started", issue = issue_number, kind = %kind);
}

/// Emit event: changeset applied, with the touched-path count.
pub fn emit_changeset_applied(path_count: usize) {
    info!(event = "run.applied", paths = path_count);
}

/// Emit event: no changeset present; the run is a no-op.
pub fn emit_no_changeset() {
    info!(event = "run.no_op");
}

/// Emit event: application failed (fatal for the run).
pub fn emit_apply_failed(reason: &str) {
    error!(event = "run.failed", reason = %reason);
}
