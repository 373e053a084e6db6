//! Trajectory Builder: expand surviving targets into two-point
//! relative-emissions trajectories and pivot them to wide tables.
//!
//! Every surviving target yields exactly two points: the base year at
//! relative 1.0 and the end year at relative `1 − reduction_ambition`.
//! Absolute emissions are relative × the combined S1+S2 baseline. The
//! one-base-year-per-company invariant is enforced here, before any output
//! is produced; a violation identifies the offending company and aborts
//! the run.

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::config::{round_to, PipelineConfig};
use crate::error::{IntegrityError, TableError};
use crate::table::WideTable;
use crate::types::{TargetDeclaration, TrajectoryPoint};

/// The two published wide views of the target-derived trajectory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrajectoryTables {
    /// Year × company, values in [0, 1], 1.0 = baseline.
    pub relative: WideTable,
    /// Year × company, absolute emissions.
    pub absolute: WideTable,
}

/// Assert the one-base-year-per-company invariant.
///
/// Hard input-data error when violated; callers must not write output
/// after it fires.
pub fn assert_single_base_year(targets: &[TargetDeclaration]) -> Result<(), IntegrityError> {
    let mut base_years: BTreeMap<&str, BTreeSet<i32>> = BTreeMap::new();
    for target in targets {
        base_years
            .entry(target.company_name.as_str())
            .or_default()
            .insert(target.base_year);
    }
    for (company, years) in base_years {
        if years.len() > 1 {
            return Err(IntegrityError::MultipleBaseYears {
                company: company.to_string(),
                years: years.into_iter().collect(),
            });
        }
    }
    Ok(())
}

/// Expand targets into trajectory points.
///
/// One base-year point is emitted per company (all its targets share the
/// base year by the invariant above), plus one end-year point per target.
pub fn build_points(
    targets: &[TargetDeclaration],
    config: &PipelineConfig,
) -> Result<Vec<TrajectoryPoint>, IntegrityError> {
    assert_single_base_year(targets)?;

    let mut points = Vec::with_capacity(targets.len() * 2);
    // One base point per distinct (company, baseline). Targets of one
    // company normally share the baseline, collapsing to a single point;
    // disagreeing baselines yield two base points and the pivot rejects
    // the conflicting cell downstream.
    let mut base_emitted: BTreeSet<(&str, u64)> = BTreeSet::new();

    for target in targets {
        let baseline = target.combined_s1s2_baseline();
        let base_emissions = round_to(baseline, config.emission_decimals);
        if base_emitted.insert((target.company_name.as_str(), base_emissions.to_bits())) {
            points.push(TrajectoryPoint {
                company_name: target.company_name.clone(),
                year: target.base_year,
                relative_emissions: 1.0,
                emissions: base_emissions,
            });
        }
        let relative = round_to(1.0 - target.reduction_ambition, config.relative_decimals);
        points.push(TrajectoryPoint {
            company_name: target.company_name.clone(),
            year: target.end_year,
            relative_emissions: relative,
            emissions: round_to(relative * baseline, config.emission_decimals),
        });
    }

    debug!(
        targets = targets.len(),
        points = points.len(),
        "trajectory points built"
    );
    Ok(points)
}

/// Pivot trajectory points into the relative and absolute wide tables.
///
/// Fails loudly on conflicting duplicate (year, company) cells; equal
/// duplicates (the shared base-year point) collapse.
pub fn pivot_points(points: &[TrajectoryPoint]) -> Result<TrajectoryTables, TableError> {
    let mut tables = TrajectoryTables::default();
    for point in points {
        tables
            .relative
            .insert(point.year, &point.company_name, point.relative_emissions)?;
        tables
            .absolute
            .insert(point.year, &point.company_name, point.emissions)?;
    }
    Ok(tables)
}
