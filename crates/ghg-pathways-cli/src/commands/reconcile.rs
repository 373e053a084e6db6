//! `reconcile`: merge target trajectories with historical emissions.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use ghg_pathways_core::config::PipelineConfig;
use ghg_pathways_core::pipeline::TargetPipeline;

use crate::error::CliError;
use crate::io;

pub const AMENDED_FILE: &str = "emission_targets_amended.csv";
pub const SPLIT_FILE: &str = "emission_targets_amended_and_split.csv";
pub const MISMATCH_CSV_FILE: &str = "mismatch.csv";
pub const MISMATCH_JSON_FILE: &str = "mismatch.json";

#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Wide absolute emissions-targets CSV (from `process-targets`).
    #[arg(long)]
    pub targets: PathBuf,

    /// Long-format historical emissions CSV
    /// (`company_name,year,scope,emissions`).
    #[arg(long)]
    pub historical: PathBuf,

    /// Directory the output tables are written to.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Years strictly after this are projections.
    #[arg(long)]
    pub cutoff_year: Option<i32>,
}

pub fn run(args: &ReconcileArgs) -> Result<(), CliError> {
    let targets = io::read_wide_table(&args.targets)?;
    let historical = io::read_historical_records(&args.historical)?;

    let mut config = PipelineConfig::default();
    if let Some(cutoff) = args.cutoff_year {
        config.last_historical_year = cutoff;
    }

    let pipeline = TargetPipeline::new(config);
    let result = pipeline.reconcile(&targets, &historical)?;

    fs::create_dir_all(&args.out_dir)?;
    io::write_wide_table(&args.out_dir.join(AMENDED_FILE), &result.amended)?;
    io::write_wide_table(&args.out_dir.join(SPLIT_FILE), &result.split)?;

    if !result.report.is_consistent() {
        for mismatch in &result.report.mismatches {
            warn!(
                company = %mismatch.company_name,
                year = mismatch.year,
                historical = mismatch.historical,
                target_derived = mismatch.target_derived,
                "inconsistent S1+S2 emission data"
            );
        }
        io::write_mismatches(
            &args.out_dir.join(MISMATCH_CSV_FILE),
            &result.report.mismatches,
        )?;
        let json = serde_json::to_string_pretty(&result.report)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(args.out_dir.join(MISMATCH_JSON_FILE), json)?;
    }

    info!(
        mismatches = result.report.mismatches.len(),
        out_dir = %args.out_dir.display(),
        "reconciled tables written"
    );
    Ok(())
}
