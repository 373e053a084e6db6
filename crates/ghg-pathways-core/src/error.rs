//! Error types for ghg-pathways-core.
//!
//! The error taxonomy mirrors how failures propagate through the pipeline:
//!
//! - [`IntegrityError`]: input-data contract violations. Fatal; the run
//!   aborts before any output is written and the violating company is
//!   identified. Requires upstream data correction, never retried.
//! - [`TableError`]: conflicting cells detected while pivoting to a wide
//!   table. Also fatal, since a silent overwrite would corrupt output.
//! - [`ParseError`]: unrecognized wire values (scope, target type).
//!
//! Missing-data gaps (an unpaired sub-scope target, an absent baseline) are
//! *not* errors: they fall under the documented degenerate-case rules and
//! produce a smaller or zero-weight contribution. Consistency mismatches
//! between historical and target-derived values are collected in a
//! [`crate::reconcile::ConsistencyReport`] and never abort the run.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PathwayError>;

/// Top-level unified error type for the pathways engine.
///
/// All stage errors convert into this type via `From` implementations so the
/// pipeline entry points can return a single error surface.
#[derive(Debug, Error)]
pub enum PathwayError {
    /// Input-data contract violation. Fatal, no partial output.
    #[error("integrity violation: {0}")]
    Integrity(#[from] IntegrityError),

    /// Conflicting cells while building a wide table.
    #[error("table error: {0}")]
    Table(#[from] TableError),

    /// Unrecognized wire value.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl PathwayError {
    /// True when the error is an input-integrity violation that upstream
    /// data owners must fix (process exit code 2 in the CLI).
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::Integrity(_) | Self::Table(_))
    }
}

/// Input-data contract violations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IntegrityError {
    /// A company declares targets against more than one base year.
    ///
    /// The trajectory builder anchors every company at a single base-year
    /// point, so this cannot be recovered from.
    #[error("company '{company}' declares multiple base years: {years:?}")]
    MultipleBaseYears { company: String, years: Vec<i32> },

    /// A target's end year does not lie after its base year.
    #[error("company '{company}' target ends in {end_year} but is based in {base_year}")]
    InvertedYears {
        company: String,
        base_year: i32,
        end_year: i32,
    },
}

/// Wide-table construction failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableError {
    /// Two values were produced for the same (year, column) cell and they
    /// disagree. Equal duplicates collapse silently; this fires only on a
    /// genuine conflict that a silent overwrite would hide.
    #[error(
        "conflicting values for ({year}, '{column}'): existing {existing}, incoming {incoming}"
    )]
    DuplicateCell {
        year: i32,
        column: String,
        existing: f64,
        incoming: f64,
    },
}

/// Unrecognized wire values in input rows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Scope string not one of `S1`, `S2`, `S3`, `S1+S2`, `S1+S2+S3`.
    #[error("invalid scope '{0}'")]
    InvalidScope(String),

    /// Target type string not `Absolute` or `Intensity`.
    #[error("invalid target type '{0}'")]
    InvalidTargetType(String),
}
