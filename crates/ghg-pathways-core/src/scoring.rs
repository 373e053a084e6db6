//! Boundary to the external temperature-scoring engine.
//!
//! Score computation is opaque and external: this crate's job ends at
//! producing correct scope-combined, deduplicated emission series. The
//! types and traits here pin down the handoff — a weighted portfolio plus
//! a data provider go in, a score table comes out — without implementing
//! any scoring.

use serde::{Deserialize, Serialize};

use crate::types::{Scope, TargetDeclaration};

/// Scopes the external engine scores.
pub const SCORED_SCOPES: [Scope; 3] = [Scope::S1S2, Scope::S1S2S3, Scope::S3];

/// Time horizon of a temperature score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    Short,
    Mid,
    Long,
}

impl TimeFrame {
    pub fn all() -> [TimeFrame; 3] {
        [Self::Short, Self::Mid, Self::Long]
    }
}

/// One portfolio position handed to the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioCompany {
    pub company_id: String,
    pub company_name: String,
    /// Investment weight in the portfolio aggregation.
    pub investment_value: f64,
}

/// Equal-weight portfolio over the given (id, name) pairs: 1 USD per
/// position, so portfolio aggregation reduces to a plain average.
pub fn uniform_portfolio(
    companies: impl IntoIterator<Item = (String, String)>,
) -> Vec<PortfolioCompany> {
    companies
        .into_iter()
        .map(|(company_id, company_name)| PortfolioCompany {
            company_id,
            company_name,
            investment_value: 1.0,
        })
        .collect()
}

/// Per-company fundamental data the scoring engine may consult.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyFundamentals {
    pub company_id: String,
    pub ghg_s1s2: Option<f64>,
    pub ghg_s3: Option<f64>,
}

/// Source of target and fundamental data, keyed by company.
pub trait ScoreDataProvider {
    /// All target declarations for the company, empty when unknown.
    fn targets(&self, company_id: &str) -> Vec<TargetDeclaration>;

    /// Fundamental data for the company, if available.
    fn fundamentals(&self, company_id: &str) -> Option<CompanyFundamentals>;
}

/// One scored (company, time frame, scope) cell returned by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub company_id: String,
    pub company_name: String,
    pub time_frame: TimeFrame,
    pub scope: Scope,
    /// Implied temperature rise in °C.
    pub score: f64,
    /// The scope's underlying emissions figure used by the engine.
    pub emissions: Option<f64>,
}

/// The external scoring engine.
pub trait TemperatureScorer {
    /// Score every portfolio position for every requested time frame and
    /// scope in [`SCORED_SCOPES`].
    fn calculate(
        &self,
        portfolio: &[PortfolioCompany],
        provider: &dyn ScoreDataProvider,
    ) -> Vec<ScoreRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_portfolio_assigns_one_usd_each() {
        let portfolio = uniform_portfolio(vec![
            ("pl01".to_string(), "Acme".to_string()),
            ("pl02".to_string(), "Beta".to_string()),
        ]);
        assert_eq!(portfolio.len(), 2);
        assert!(portfolio.iter().all(|p| p.investment_value == 1.0));
    }

    #[test]
    fn scored_scopes_are_the_aggregates_plus_s3() {
        assert!(SCORED_SCOPES.iter().all(|s| s.is_combined() || *s == Scope::S3));
        assert_eq!(TimeFrame::all().len(), 3);
    }
}
