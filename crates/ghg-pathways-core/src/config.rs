//! Pipeline configuration and named constants.
//!
//! All tunables that were magic literals in the source analysis are
//! centralized here so tests and the CLI share one definition.

use serde::{Deserialize, Serialize};

/// Named constants with their provenance.
pub mod constants {
    /// Tolerance for treating two reduction ambitions as identical during
    /// deduplication.
    ///
    /// The collapse rule ("a later target with the same ambition as an
    /// earlier one is already implied") originally used exact float
    /// equality. Input ambitions are two-decimal fractions, so any pair
    /// closer than this differs only by rounding noise.
    pub const AMBITION_TOLERANCE: f64 = 1e-6;

    /// Decimal places kept for relative emissions (1.0 = baseline).
    pub const RELATIVE_DECIMALS: u32 = 2;

    /// Decimal places kept for absolute target-derived emissions.
    pub const EMISSION_DECIMALS: u32 = 2;

    /// Decimal places kept for reconciled emissions. Historical reporting
    /// is whole-tonne, so reconciliation compares at zero decimals.
    pub const RECONCILED_DECIMALS: u32 = 0;

    /// Default cutoff year: rows with `year > LAST_HISTORICAL_YEAR` are
    /// classified as projections.
    pub const LAST_HISTORICAL_YEAR: i32 = 2022;
}

/// Configuration for one pipeline invocation.
///
/// Each invocation is independent; the config is plain data and may be
/// shared freely across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Tolerance used by the deduplicator's ambition-equality test.
    pub ambition_tolerance: f64,
    /// Rounding applied to relative emissions.
    pub relative_decimals: u32,
    /// Rounding applied to absolute target-derived emissions.
    pub emission_decimals: u32,
    /// Rounding applied before and after reconciliation.
    pub reconciled_decimals: u32,
    /// Years strictly after this are projections.
    pub last_historical_year: i32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ambition_tolerance: constants::AMBITION_TOLERANCE,
            relative_decimals: constants::RELATIVE_DECIMALS,
            emission_decimals: constants::EMISSION_DECIMALS,
            reconciled_decimals: constants::RECONCILED_DECIMALS,
            last_historical_year: constants::LAST_HISTORICAL_YEAR,
        }
    }
}

/// Round to a fixed number of decimal places, half away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_matches_expected_places() {
        assert_eq!(round_to(1.0 / 3.0, 2), 0.33);
        assert_eq!(round_to(81.4, 0), 81.0);
        assert_eq!(round_to(1.0, 2), 1.0);
    }

    #[test]
    fn default_config_uses_documented_constants() {
        let config = PipelineConfig::default();
        assert_eq!(config.ambition_tolerance, constants::AMBITION_TOLERANCE);
        assert_eq!(config.last_historical_year, 2022);
    }
}
