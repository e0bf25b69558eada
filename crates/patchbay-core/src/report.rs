//! Outcome reporting: application result to exit code and diagnostics.
//!
//! The exit code is the engine's sole control signal to the surrounding
//! commit/PR automation, so the mapping is a strict contract: no-op is a
//! legitimate terminal state and must exit zero.

use std::process::ExitCode;

use crate::domain::{ApplicationResult, PREVIEW_LIMIT};
use crate::obs;

/// Exit status for an application outcome: 0 for applied or no-op, 1 for
/// failure.
pub fn status_code(result: &ApplicationResult) -> u8 {
    if result.is_success() {
        0
    } else {
        1
    }
}

/// Report the outcome and produce the process exit code.
///
/// Emits exactly one outcome line: applied / no-op on stdout, failure on
/// stderr with the bounded input preview. Long inputs are never dumped in
/// full.
pub fn report(result: &ApplicationResult) -> ExitCode {
    match result {
        ApplicationResult::Applied { paths } => {
            obs::emit_changeset_applied(paths.len());
            println!("applied: {} path(s) touched", paths.len());
        }
        ApplicationResult::NoOp => {
            obs::emit_no_changeset();
            println!("nothing to apply");
        }
        ApplicationResult::Failed {
            reason,
            input_preview,
        } => {
            obs::emit_apply_failed(reason);
            eprintln!("failed: {}", reason.trim());
            eprintln!(
                "offending input (first {} chars): {}",
                PREVIEW_LIMIT, input_preview
            );
        }
    }
    ExitCode::from(status_code(result))
}
