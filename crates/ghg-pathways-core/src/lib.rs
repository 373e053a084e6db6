//! GHG Pathways Core Library
//!
//! Reconstructs per-company greenhouse-gas emission trajectories from
//! heterogeneous corporate climate targets and reconciles them against
//! historically reported emissions.
//!
//! # Architecture
//!
//! The engine is a synchronous batch pipeline over in-memory tables:
//!
//! 1. [`overlay`] — named per-company corrections applied as data
//! 2. [`combine`] — baseline-weighted synthesis of S1+S2 targets from
//!    separately declared S1 and S2 targets
//! 3. [`dedupe`] — collapse of targets made redundant by an earlier,
//!    shorter-horizon target with the same reduction ambition
//! 4. [`trajectory`] — expansion of each surviving target into a two-point
//!    (base-year, end-year) relative-emissions trajectory
//! 5. [`reconcile`] — union with historical emissions, consistency
//!    checking, and historical/projection splitting
//!
//! [`pipeline::TargetPipeline`] wires the stages together; [`scoring`]
//! defines the boundary to the external temperature-scoring engine.
//!
//! # Example
//!
//! ```
//! use ghg_pathways_core::config::PipelineConfig;
//! use ghg_pathways_core::pipeline::TargetPipeline;
//!
//! let pipeline = TargetPipeline::new(PipelineConfig::default());
//! let tables = pipeline.process(Vec::new()).unwrap();
//! assert!(tables.relative.is_empty());
//! ```

pub mod combine;
pub mod config;
pub mod dedupe;
pub mod error;
pub mod ingest;
pub mod overlay;
pub mod pipeline;
pub mod reconcile;
pub mod scoring;
pub mod table;
pub mod trajectory;
pub mod types;

// Re-exports for convenience
pub use config::PipelineConfig;
pub use error::{IntegrityError, PathwayError, Result, TableError};
pub use pipeline::TargetPipeline;
pub use table::WideTable;
pub use types::{HistoricalEmissionRecord, Scope, TargetDeclaration, TargetType};
