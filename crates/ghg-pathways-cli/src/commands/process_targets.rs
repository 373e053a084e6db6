//! `process-targets`: raw target CSV in, wide trajectory tables out.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use ghg_pathways_core::config::PipelineConfig;
use ghg_pathways_core::ingest;
use ghg_pathways_core::pipeline::TargetPipeline;

use crate::error::CliError;
use crate::io;

/// Output file names, fixed so downstream tooling can rely on them.
pub const RELATIVE_TARGETS_FILE: &str = "relative_emissions_targets.csv";
pub const ABSOLUTE_TARGETS_FILE: &str = "emissions_targets.csv";

#[derive(Debug, Args)]
pub struct ProcessTargetsArgs {
    /// Raw target table CSV.
    #[arg(long)]
    pub targets: PathBuf,

    /// Directory the output tables are written to.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

pub fn run(args: &ProcessTargetsArgs) -> Result<(), CliError> {
    let rows = io::read_target_rows(&args.targets)?;
    let (mut targets, issues) = ingest::validate_targets(&rows);
    for issue in &issues {
        warn!(
            row = issue.row,
            company = %issue.company_name,
            field = issue.field,
            "invalid target row: {}",
            issue.detail
        );
    }

    ingest::fill_baselines(&mut targets);
    let targets = ingest::drop_exact_duplicates(targets);

    let pipeline = TargetPipeline::new(PipelineConfig::default());
    let tables = pipeline.process(targets)?;

    fs::create_dir_all(&args.out_dir)?;
    io::write_wide_table(&args.out_dir.join(RELATIVE_TARGETS_FILE), &tables.relative)?;
    io::write_wide_table(&args.out_dir.join(ABSOLUTE_TARGETS_FILE), &tables.absolute)?;

    info!(
        companies = tables.absolute.columns().count(),
        out_dir = %args.out_dir.display(),
        "trajectory tables written"
    );
    Ok(())
}
