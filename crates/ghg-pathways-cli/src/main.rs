//! GHG Pathways CLI
//!
//! Commands:
//!
//! - `process-targets`: normalize raw corporate climate targets into
//!   year × company trajectory tables
//! - `reconcile`: merge trajectories with historical emissions, check
//!   consistency, and split historical vs. projected segments

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use ghg_pathways_cli::commands;
use ghg_pathways_cli::exit_code;

/// GHG Pathways - corporate emission-target normalization and reconciliation
#[derive(Parser)]
#[command(name = "ghg-pathways")]
#[command(version)]
#[command(about = "Normalize corporate GHG targets and reconcile them with reported emissions")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize raw targets into trajectory tables
    ProcessTargets(commands::process_targets::ProcessTargetsArgs),
    /// Merge trajectories with historical emissions
    Reconcile(commands::reconcile::ReconcileArgs),
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::ProcessTargets(args) => commands::process_targets::run(args),
        Commands::Reconcile(args) => commands::reconcile::run(args),
    };

    if let Err(err) = result {
        error!("{}", err);
        std::process::exit(exit_code(&err));
    }
}
