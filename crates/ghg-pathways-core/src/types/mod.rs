//! Domain types for the target-normalization engine.

mod emissions;
mod scope;
mod target;

pub use emissions::{HistoricalEmissionRecord, SeriesKind, TrajectoryPoint};
pub use scope::{Scope, TargetType};
pub use target::TargetDeclaration;
