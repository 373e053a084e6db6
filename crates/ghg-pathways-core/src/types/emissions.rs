//! Emission series types: historical records and trajectory points.

use serde::{Deserialize, Serialize};

use super::scope::Scope;

/// One externally reported emissions measurement. Immutable; years are at
/// or before the historical cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalEmissionRecord {
    pub company_name: String,
    pub year: i32,
    pub scope: Scope,
    /// Absolute reported emissions for the scope, in tonnes CO2e.
    pub emissions: f64,
}

/// One point of a target-derived trajectory. Exactly two points exist per
/// retained target: the base year (relative = 1.0) and the end year
/// (relative = 1 − reduction ambition). No interpolation between points is
/// performed; consumers interpolate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub company_name: String,
    pub year: i32,
    /// Emissions as a fraction of baseline, in [0, 1]; 1.0 = baseline.
    pub relative_emissions: f64,
    /// Absolute emissions: relative × combined S1+S2 baseline.
    pub emissions: f64,
}

/// Whether a reconciled value came from reported history or from a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Historical,
    Target,
}

impl SeriesKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Historical => "historical",
            Self::Target => "target",
        }
    }
}
