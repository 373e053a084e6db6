//! Pipeline orchestration: raw target rows in, wide tables out.
//!
//! Stage order: overlay → absolute-type filter → scope combination →
//! combined-scope filter → deduplication → trajectory build → pivot.
//! The whole run is a deterministic pure transform over static input;
//! running it twice on unchanged input produces byte-identical tables.

use tracing::info;

use crate::combine::combine_sub_scope_targets;
use crate::config::PipelineConfig;
use crate::dedupe::collapse_redundant;
use crate::error::Result;
use crate::overlay::{self, OverlayRule};
use crate::reconcile::{self, Reconciliation};
use crate::table::WideTable;
use crate::trajectory::{build_points, pivot_points, TrajectoryTables};
use crate::types::{HistoricalEmissionRecord, TargetDeclaration, TargetType};

/// The target-normalization and reconciliation engine.
///
/// One instance per input variant; instances are independent and hold no
/// state across runs.
#[derive(Debug, Clone)]
pub struct TargetPipeline {
    config: PipelineConfig,
    rules: Vec<OverlayRule>,
}

impl TargetPipeline {
    /// Pipeline with the documented default overlay rules.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            rules: overlay::default_rules(),
        }
    }

    /// Replace the overlay rule table, e.g. with an empty one for inputs
    /// that carry no known exceptions.
    pub fn with_rules(mut self, rules: Vec<OverlayRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run normalization: overlay, combination, deduplication, trajectory
    /// expansion, and the wide pivots.
    pub fn process(&self, mut targets: Vec<TargetDeclaration>) -> Result<TrajectoryTables> {
        let input_count = targets.len();
        let corrected = overlay::apply(&self.rules, &mut targets);

        // Only absolute targets have a directly usable reduction
        // trajectory; overlay-admitted intensity targets were already
        // rewritten to Absolute.
        targets.retain(|t| t.target_type == TargetType::Absolute);

        let mut targets = combine_sub_scope_targets(targets);
        targets.retain(|t| t.scope.is_combined());

        let targets = collapse_redundant(targets, self.config.ambition_tolerance);

        info!(
            input = input_count,
            corrected,
            retained = targets.len(),
            "targets normalized"
        );

        let points = build_points(&targets, &self.config)?;
        let tables = pivot_points(&points)?;
        Ok(tables)
    }

    /// Merge a target-derived absolute table with historical records and
    /// run the consistency check.
    pub fn reconcile(
        &self,
        targets: &WideTable,
        historical: &[HistoricalEmissionRecord],
    ) -> Result<Reconciliation> {
        let result = reconcile::reconcile(targets, historical, &self.config)?;
        info!(
            mismatches = result.report.mismatches.len(),
            consistent = result.report.is_consistent(),
            "historical reconciliation finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Scope;

    fn target(
        name: &str,
        scope: Scope,
        target_type: TargetType,
        ambition: f64,
        end_year: i32,
        s1: Option<f64>,
        s2: Option<f64>,
    ) -> TargetDeclaration {
        TargetDeclaration {
            company_id: name.to_lowercase(),
            company_name: name.to_string(),
            scope,
            target_type,
            reduction_ambition: ambition,
            base_year: 2020,
            end_year,
            base_year_ghg_s1: s1,
            base_year_ghg_s2: s2,
            base_year_ghg_s3: None,
        }
    }

    #[test]
    fn intensity_targets_are_filtered_unless_admitted() {
        let pipeline = TargetPipeline::new(PipelineConfig::default());
        let tables = pipeline
            .process(vec![target(
                "Orlen",
                Scope::S1S2,
                TargetType::Intensity,
                0.4,
                2030,
                Some(60.0),
                Some(40.0),
            )])
            .unwrap();
        assert!(tables.relative.is_empty());
    }

    #[test]
    fn admitted_intensity_target_flows_through() {
        let pipeline = TargetPipeline::new(PipelineConfig::default());
        let tables = pipeline
            .process(vec![target(
                "Grupa Kęty",
                Scope::S1S2,
                TargetType::Intensity,
                0.4,
                2030,
                Some(60.0),
                Some(40.0),
            )])
            .unwrap();
        assert_eq!(tables.relative.get(2030, "Grupa Kęty"), Some(0.6));
    }

    #[test]
    fn sub_scope_targets_combine_then_survive_scope_filter() {
        let pipeline = TargetPipeline::new(PipelineConfig::default());
        let tables = pipeline
            .process(vec![
                target("Acme", Scope::S1, TargetType::Absolute, 0.4, 2030, Some(75.0), None),
                target("Acme", Scope::S2, TargetType::Absolute, 0.2, 2030, None, Some(25.0)),
            ])
            .unwrap();
        // Combined ambition 0.35 -> relative 0.65, absolute 65.
        assert_eq!(tables.relative.get(2030, "Acme"), Some(0.65));
        assert_eq!(tables.absolute.get(2030, "Acme"), Some(65.0));
        assert_eq!(tables.absolute.get(2020, "Acme"), Some(100.0));
    }

    #[test]
    fn standalone_s3_targets_never_reach_the_trajectory() {
        let pipeline = TargetPipeline::new(PipelineConfig::default());
        let tables = pipeline
            .process(vec![target(
                "Acme",
                Scope::S3,
                TargetType::Absolute,
                0.4,
                2030,
                Some(60.0),
                Some(40.0),
            )])
            .unwrap();
        assert!(tables.relative.is_empty());
    }

    #[test]
    fn process_is_deterministic() {
        let pipeline = TargetPipeline::new(PipelineConfig::default());
        let input = vec![
            target("Beta", Scope::S1S2, TargetType::Absolute, 0.3, 2030, Some(50.0), Some(50.0)),
            target("Acme", Scope::S1S2, TargetType::Absolute, 0.9, 2050, Some(60.0), Some(40.0)),
        ];
        let first = pipeline.process(input.clone()).unwrap();
        let second = pipeline.process(input).unwrap();
        assert_eq!(first.relative.to_csv(), second.relative.to_csv());
        assert_eq!(first.absolute.to_csv(), second.absolute.to_csv());
    }
}
