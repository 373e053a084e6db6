//! End-to-end properties of the normalization and reconciliation pipeline.

use ghg_pathways_core::config::PipelineConfig;
use ghg_pathways_core::ingest::{self, RawTargetRow};
use ghg_pathways_core::pipeline::TargetPipeline;
use ghg_pathways_core::types::{HistoricalEmissionRecord, Scope, TargetDeclaration, TargetType};
use ghg_pathways_core::{IntegrityError, PathwayError};

fn declaration(
    name: &str,
    scope: Scope,
    ambition: f64,
    base_year: i32,
    end_year: i32,
    s1: Option<f64>,
    s2: Option<f64>,
) -> TargetDeclaration {
    TargetDeclaration {
        company_id: name.to_lowercase().replace(' ', "_"),
        company_name: name.to_string(),
        scope,
        target_type: TargetType::Absolute,
        reduction_ambition: ambition,
        base_year,
        end_year,
        base_year_ghg_s1: s1,
        base_year_ghg_s2: s2,
        base_year_ghg_s3: None,
    }
}

fn historical(name: &str, year: i32, emissions: f64) -> HistoricalEmissionRecord {
    HistoricalEmissionRecord {
        company_name: name.to_string(),
        year,
        scope: Scope::S1S2,
        emissions,
    }
}

#[test]
fn multiple_base_years_abort_the_whole_run() {
    let pipeline = TargetPipeline::new(PipelineConfig::default());
    let err = pipeline
        .process(vec![
            declaration("Acme", Scope::S1S2, 0.3, 2018, 2030, Some(60.0), Some(40.0)),
            declaration("Acme", Scope::S1S2, 0.9, 2020, 2050, Some(60.0), Some(40.0)),
        ])
        .unwrap_err();
    match err {
        PathwayError::Integrity(IntegrityError::MultipleBaseYears { company, years }) => {
            assert_eq!(company, "Acme");
            assert_eq!(years, vec![2018, 2020]);
        }
        other => panic!("expected MultipleBaseYears, got {other:?}"),
    }
}

#[test]
fn trajectory_round_trip_matches_documented_example() {
    // base 2020, end 2030, ambition 0.5, baseline 100 ->
    // (2020, 1.0, 100) and (2030, 0.5, 50).
    let pipeline = TargetPipeline::new(PipelineConfig::default());
    let tables = pipeline
        .process(vec![declaration(
            "Acme",
            Scope::S1S2,
            0.5,
            2020,
            2030,
            Some(60.0),
            Some(40.0),
        )])
        .unwrap();
    assert_eq!(tables.relative.get(2020, "Acme"), Some(1.0));
    assert_eq!(tables.absolute.get(2020, "Acme"), Some(100.0));
    assert_eq!(tables.relative.get(2030, "Acme"), Some(0.5));
    assert_eq!(tables.absolute.get(2030, "Acme"), Some(50.0));
}

#[test]
fn net_zero_target_collapse_keeps_2030_over_2050() {
    let pipeline = TargetPipeline::new(PipelineConfig::default());
    let tables = pipeline
        .process(vec![
            declaration("Acme", Scope::S1S2S3, 0.9, 2020, 2050, Some(60.0), Some(40.0)),
            declaration("Acme", Scope::S1S2, 0.9, 2020, 2030, Some(60.0), Some(40.0)),
        ])
        .unwrap();
    assert_eq!(tables.relative.get(2030, "Acme"), Some(0.1));
    assert_eq!(tables.relative.get(2050, "Acme"), None);
}

#[test]
fn mismatch_cells_average_and_report() {
    let pipeline = TargetPipeline::new(PipelineConfig::default());
    let tables = pipeline
        .process(vec![declaration(
            "Acme",
            Scope::S1S2,
            0.5,
            2021,
            2030,
            Some(50.0),
            Some(32.0),
        )])
        .unwrap();
    // Target-derived base point at 2021 is 82; historical reports 80.
    let result = pipeline
        .reconcile(&tables.absolute, &[historical("Acme", 2021, 80.0)])
        .unwrap();
    assert_eq!(result.report.mismatches.len(), 1);
    let mismatch = &result.report.mismatches[0];
    assert_eq!(mismatch.company_name, "Acme");
    assert_eq!(mismatch.year, 2021);
    assert_eq!(mismatch.historical, 80.0);
    assert_eq!(mismatch.target_derived, 82.0);
    assert_eq!(result.amended.get(2021, "Acme"), Some(81.0));
}

#[test]
fn consistent_overlap_leaves_report_empty() {
    let pipeline = TargetPipeline::new(PipelineConfig::default());
    let tables = pipeline
        .process(vec![declaration(
            "Acme",
            Scope::S1S2,
            0.5,
            2021,
            2030,
            Some(50.0),
            Some(30.0),
        )])
        .unwrap();
    let result = pipeline
        .reconcile(&tables.absolute, &[historical("Acme", 2021, 80.0)])
        .unwrap();
    assert!(result.report.is_consistent());
    assert_eq!(result.amended.get(2021, "Acme"), Some(80.0));
}

#[test]
fn full_pipeline_is_idempotent() {
    let pipeline = TargetPipeline::new(PipelineConfig::default());
    let input = vec![
        declaration("Beta", Scope::S1, 0.4, 2020, 2030, Some(75.0), None),
        declaration("Beta", Scope::S2, 0.2, 2020, 2030, None, Some(25.0)),
        declaration("Acme", Scope::S1S2, 0.5, 2020, 2030, Some(60.0), Some(40.0)),
        declaration("Acme", Scope::S1S2S3, 0.9, 2020, 2050, Some(60.0), Some(40.0)),
    ];
    let history = vec![
        historical("Acme", 2019, 104.0),
        historical("Acme", 2020, 100.0),
        historical("Beta", 2020, 100.0),
    ];

    let run = |input: Vec<TargetDeclaration>| {
        let tables = pipeline.process(input).unwrap();
        let reconciled = pipeline.reconcile(&tables.absolute, &history).unwrap();
        (
            tables.relative.to_csv(),
            tables.absolute.to_csv(),
            reconciled.amended.to_csv(),
            reconciled.split.to_csv(),
        )
    };

    assert_eq!(run(input.clone()), run(input));
}

#[test]
fn single_target_company_still_gets_both_points() {
    // Boundary: even with no separate base-year row in the input, the
    // base point is materialized alongside the end point.
    let pipeline = TargetPipeline::new(PipelineConfig::default());
    let tables = pipeline
        .process(vec![declaration(
            "Solo",
            Scope::S1S2,
            0.25,
            2019,
            2035,
            None,
            Some(40.0),
        )])
        .unwrap();
    assert_eq!(tables.relative.get(2019, "Solo"), Some(1.0));
    assert_eq!(tables.relative.get(2035, "Solo"), Some(0.75));
    assert_eq!(tables.absolute.get(2019, "Solo"), Some(40.0));
    assert_eq!(tables.absolute.get(2035, "Solo"), Some(30.0));
}

#[test]
fn raw_rows_flow_through_ingest_into_the_pipeline() {
    let rows = vec![
        RawTargetRow {
            company_id: "acme".to_string(),
            company_name: "Acme".to_string(),
            scope: Some(" S1+S2".to_string()),
            target_type: Some("Absolute".to_string()),
            reduction_ambition: Some(0.5),
            base_year: Some(2020),
            end_year: Some(2030),
            base_year_ghg_s1: Some(60.0),
            base_year_ghg_s2: Some(40.0),
            base_year_ghg_s3: None,
        },
        // Second target of the same company missing its baselines; the
        // fill-forward recovers them from the first row.
        RawTargetRow {
            company_id: "acme".to_string(),
            company_name: "Acme".to_string(),
            scope: Some("S1+S2+S3".to_string()),
            target_type: Some("Absolute".to_string()),
            reduction_ambition: Some(0.9),
            base_year: Some(2020),
            end_year: Some(2050),
            base_year_ghg_s1: None,
            base_year_ghg_s2: None,
            base_year_ghg_s3: Some(500.0),
        },
        // Row with no scope is rejected, not dropped silently.
        RawTargetRow {
            company_id: "beta".to_string(),
            company_name: "Beta".to_string(),
            ..RawTargetRow::default()
        },
    ];

    let (mut targets, issues) = ingest::validate_targets(&rows);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].row, 2);

    ingest::fill_baselines(&mut targets);
    let targets = ingest::drop_exact_duplicates(targets);

    let pipeline = TargetPipeline::new(PipelineConfig::default());
    let tables = pipeline.process(targets).unwrap();
    assert_eq!(tables.absolute.get(2020, "Acme"), Some(100.0));
    assert_eq!(tables.absolute.get(2030, "Acme"), Some(50.0));
    assert_eq!(tables.absolute.get(2050, "Acme"), Some(10.0));
}
