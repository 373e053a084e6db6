//! Target Deduplicator: collapse targets already implied by an earlier one.
//!
//! A long-term net-zero target adds nothing when the company already holds
//! a nearer-term target with the same reduction ambition; the later
//! trajectory is implied by the earlier, more immediate commitment. Per
//! company, targets are sorted by ascending end year (stable, so ties keep
//! input order) and a target is discarded when an earlier-kept target has
//! the same ambition within [`crate::config::constants::AMBITION_TOLERANCE`].
//!
//! The equality test is a heuristic: targets whose ambitions differ only by
//! rounding noise are treated as identical, and targets that differ by more
//! than the tolerance are kept even if they are arguably the same
//! commitment. The tolerance makes that trade-off explicit instead of
//! relying on exact float equality.

use std::collections::BTreeMap;
use tracing::debug;

use crate::types::TargetDeclaration;

/// Collapse redundant targets, keeping the earliest qualifying occurrence
/// of each distinct ambition per company.
pub fn collapse_redundant(
    targets: Vec<TargetDeclaration>,
    tolerance: f64,
) -> Vec<TargetDeclaration> {
    // Stable sort by (company, end_year) keeps input order for ties.
    let mut sorted = targets;
    sorted.sort_by(|a, b| {
        a.company_name
            .cmp(&b.company_name)
            .then(a.end_year.cmp(&b.end_year))
    });

    let mut kept_ambitions: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut kept = Vec::with_capacity(sorted.len());

    for target in sorted {
        let ambitions = kept_ambitions
            .entry(target.company_name.clone())
            .or_default();
        let redundant = ambitions
            .iter()
            .any(|&a| (a - target.reduction_ambition).abs() < tolerance);
        if redundant {
            debug!(
                company = %target.company_name,
                end_year = target.end_year,
                ambition = target.reduction_ambition,
                "target discarded, already implied by an earlier commitment"
            );
            continue;
        }
        ambitions.push(target.reduction_ambition);
        kept.push(target);
    }

    kept
}
