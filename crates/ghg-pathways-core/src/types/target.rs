//! One company's stated reduction commitment.

use serde::{Deserialize, Serialize};

use super::scope::{Scope, TargetType};

/// A single target declaration: one row of the normalized target table.
///
/// Baselines are the absolute emissions of each sub-scope at `base_year`;
/// any of them may be absent in the source data. The record is converted,
/// not updated in place, once the trajectory builder consumes it.
///
/// # Invariant
///
/// Across all retained targets of one company there is at most one
/// `base_year`. The trajectory builder enforces this before emitting any
/// output (see [`crate::error::IntegrityError::MultipleBaseYears`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDeclaration {
    pub company_id: String,
    pub company_name: String,
    pub scope: Scope,
    pub target_type: TargetType,
    /// Fractional reduction committed to, relative to baseline, in [0, 1].
    pub reduction_ambition: f64,
    pub base_year: i32,
    pub end_year: i32,
    pub base_year_ghg_s1: Option<f64>,
    pub base_year_ghg_s2: Option<f64>,
    pub base_year_ghg_s3: Option<f64>,
}

impl TargetDeclaration {
    /// Combined S1+S2 baseline: the sum of the sub-scope baselines that are
    /// present. Absent baselines contribute zero, matching the degenerate
    /// zero-weight rule of the scope combiner.
    pub fn combined_s1s2_baseline(&self) -> f64 {
        self.base_year_ghg_s1.unwrap_or(0.0) + self.base_year_ghg_s2.unwrap_or(0.0)
    }

    /// Baseline of the declaration's own sub-scope, used as its weight when
    /// combining separately-declared S1 and S2 targets. `None` for
    /// aggregated scopes and for S3.
    pub fn own_sub_scope_baseline(&self) -> Option<f64> {
        match self.scope {
            Scope::S1 => self.base_year_ghg_s1,
            Scope::S2 => self.base_year_ghg_s2,
            _ => None,
        }
    }
}
