//! CLI error surface and exit-code policy.
//!
//! Exit codes:
//! - 0: success
//! - 1: recoverable error (I/O, malformed CSV); rerunnable after a local fix
//! - 2: input-integrity violation (multiple base years, conflicting pivot
//!   cells); requires upstream data correction, never retried as-is

use ghg_pathways_core::PathwayError;
use thiserror::Error;

/// Errors surfaced by the command handlers.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed wide table in '{path}': {detail}")]
    MalformedTable { path: String, detail: String },

    #[error(transparent)]
    Pathway(#[from] PathwayError),
}

/// Process exit code for an error.
pub fn exit_code(err: &CliError) -> i32 {
    match err {
        CliError::Pathway(e) if e.is_integrity_violation() => 2,
        _ => 1,
    }
}
