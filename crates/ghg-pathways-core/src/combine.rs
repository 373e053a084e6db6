//! Scope Combiner: synthesize S1+S2 targets from separately-declared S1
//! and S2 targets.
//!
//! Companies that declare their sub-scope targets separately lack a native
//! combined target, but downstream stages only consume aggregated scopes.
//! For each (company, base_year, end_year) grouping present in *both*
//! sub-scopes, the combined ambition is the baseline-weighted average of
//! the sub-scope ambitions. A weighted average, not a simple one: the
//! scope with larger baseline emissions dominates the combined trend.
//!
//! Degenerate cases are defined, not crashes:
//! - a sub-scope with zero or missing baseline contributes zero weight and
//!   is excluded from both numerator and denominator;
//! - a grouping present in only one sub-scope produces no combined target
//!   (expected, the company simply has no derivable S1+S2 commitment for
//!   that horizon);
//! - a grouping whose weights sum to zero produces no combined target.

use std::collections::BTreeMap;
use tracing::debug;

use crate::types::{Scope, TargetDeclaration, TargetType};

/// Combine separately-declared S1/S2 targets into synthesized S1+S2
/// targets.
///
/// Sub-scope rows that took part in a combination are discarded; rows of
/// all other scopes pass through untouched. Sub-scope rows with no
/// counterpart also pass through (the scope filter downstream removes
/// them).
pub fn combine_sub_scope_targets(targets: Vec<TargetDeclaration>) -> Vec<TargetDeclaration> {
    // Group sub-scope rows; targets with differing base/end years are
    // never combined.
    type GroupKey = (String, i32, i32);
    let mut groups: BTreeMap<GroupKey, Vec<TargetDeclaration>> = BTreeMap::new();
    let mut passthrough = Vec::with_capacity(targets.len());

    for target in targets {
        if target.scope.is_sub_scope() {
            let key = (
                target.company_name.clone(),
                target.base_year,
                target.end_year,
            );
            groups.entry(key).or_default().push(target);
        } else {
            passthrough.push(target);
        }
    }

    let mut combined = Vec::new();
    let mut uncombined = Vec::new();

    for ((company, base_year, end_year), group) in groups {
        let has_s1 = group.iter().any(|t| t.scope == Scope::S1);
        let has_s2 = group.iter().any(|t| t.scope == Scope::S2);
        if !(has_s1 && has_s2) {
            debug!(
                company = %company,
                base_year,
                end_year,
                "unpaired sub-scope targets, no combined target derived"
            );
            uncombined.extend(group);
            continue;
        }

        let mut weighted_ambition = 0.0;
        let mut total_weight = 0.0;
        for target in &group {
            let weight = target.own_sub_scope_baseline().unwrap_or(0.0);
            if weight > 0.0 {
                weighted_ambition += target.reduction_ambition * weight;
                total_weight += weight;
            }
        }
        if total_weight <= 0.0 {
            debug!(
                company = %company,
                base_year,
                end_year,
                "all sub-scope baselines zero or missing, no combined target derived"
            );
            uncombined.extend(group);
            continue;
        }

        let baseline_s1 = group
            .iter()
            .find(|t| t.scope == Scope::S1)
            .and_then(|t| t.base_year_ghg_s1);
        let baseline_s2 = group
            .iter()
            .find(|t| t.scope == Scope::S2)
            .and_then(|t| t.base_year_ghg_s2);
        let company_id = group[0].company_id.clone();

        combined.push(TargetDeclaration {
            company_id,
            company_name: company,
            scope: Scope::S1S2,
            target_type: TargetType::Absolute,
            reduction_ambition: weighted_ambition / total_weight,
            base_year,
            end_year,
            base_year_ghg_s1: baseline_s1,
            base_year_ghg_s2: baseline_s2,
            base_year_ghg_s3: None,
        });
    }

    passthrough.extend(combined);
    passthrough.extend(uncombined);
    passthrough
}
