//! CLI command handlers.
//!
//! - `process_targets`: normalize raw target declarations into the
//!   relative and absolute wide trajectory tables
//! - `reconcile`: merge a trajectory table with historical emissions and
//!   emit the amended, split, and mismatch artifacts

pub mod process_targets;
pub mod reconcile;
