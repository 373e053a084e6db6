//! Company Rule Overlay: named per-company corrections applied as data.
//!
//! A handful of companies need semantic corrections before the generic
//! pipeline can treat their targets uniformly. Each correction is a
//! (company, condition, action) triple so the full exception list can be
//! listed and audited without reading pipeline code; adding or removing an
//! exception is a data change, not a new branch.
//!
//! Rules for companies absent from the input are silent no-ops.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Scope, TargetDeclaration, TargetType};

/// Predicate selecting which of a company's rows a rule touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleCondition {
    /// Row's target type equals the given type.
    TargetTypeIs(TargetType),
    /// Row's scope equals the given scope.
    ScopeIs(Scope),
}

impl RuleCondition {
    fn matches(&self, target: &TargetDeclaration) -> bool {
        match self {
            Self::TargetTypeIs(t) => target.target_type == *t,
            Self::ScopeIs(s) => target.scope == *s,
        }
    }
}

/// Correction applied to a matching row. Only `scope` and `target_type`
/// are ever mutated; all other fields pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleAction {
    /// Treat an intensity target as if it were absolute: its reduction
    /// trajectory is accepted as equivalent for this analysis.
    AdmitIntensityTarget,
    /// Relabel the row's scope, e.g. a standalone S1 target promoted to
    /// S1+S2 where the company's S2 emissions are known to be immaterial.
    RelabelScope(Scope),
}

/// One named per-company correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayRule {
    pub company_name: String,
    pub condition: RuleCondition,
    pub action: RuleAction,
}

impl OverlayRule {
    fn apply(&self, target: &mut TargetDeclaration) -> bool {
        if target.company_name != self.company_name || !self.condition.matches(target) {
            return false;
        }
        match &self.action {
            RuleAction::AdmitIntensityTarget => target.target_type = TargetType::Absolute,
            RuleAction::RelabelScope(scope) => target.scope = *scope,
        }
        true
    }
}

/// The documented exception list.
///
/// - Grupa Kęty's intensity target is admitted as if absolute.
/// - Enea's standalone S1 targets are relabeled S1+S2: its S2 emissions
///   are immaterial, a documented simplifying approximation rather than a
///   general rule.
pub fn default_rules() -> Vec<OverlayRule> {
    vec![
        OverlayRule {
            company_name: "Grupa Kęty".to_string(),
            condition: RuleCondition::TargetTypeIs(TargetType::Intensity),
            action: RuleAction::AdmitIntensityTarget,
        },
        OverlayRule {
            company_name: "Enea".to_string(),
            condition: RuleCondition::ScopeIs(Scope::S1),
            action: RuleAction::RelabelScope(Scope::S1S2),
        },
    ]
}

/// Apply the rules in one pass over the target table. Returns the number
/// of rows corrected.
pub fn apply(rules: &[OverlayRule], targets: &mut [TargetDeclaration]) -> usize {
    let mut applied = 0;
    for target in targets.iter_mut() {
        for rule in rules {
            if rule.apply(target) {
                debug!(
                    company = %target.company_name,
                    action = ?rule.action,
                    "overlay rule applied"
                );
                applied += 1;
            }
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(name: &str, scope: Scope, target_type: TargetType) -> TargetDeclaration {
        TargetDeclaration {
            company_id: "X".to_string(),
            company_name: name.to_string(),
            scope,
            target_type,
            reduction_ambition: 0.3,
            base_year: 2020,
            end_year: 2030,
            base_year_ghg_s1: Some(10.0),
            base_year_ghg_s2: Some(5.0),
            base_year_ghg_s3: None,
        }
    }

    #[test]
    fn intensity_admission_rewrites_target_type() {
        let mut targets = vec![target("Grupa Kęty", Scope::S1S2, TargetType::Intensity)];
        let applied = apply(&default_rules(), &mut targets);
        assert_eq!(applied, 1);
        assert_eq!(targets[0].target_type, TargetType::Absolute);
        assert_eq!(targets[0].scope, Scope::S1S2);
    }

    #[test]
    fn scope_relabel_touches_only_matching_scope() {
        let mut targets = vec![
            target("Enea", Scope::S1, TargetType::Absolute),
            target("Enea", Scope::S3, TargetType::Absolute),
        ];
        let applied = apply(&default_rules(), &mut targets);
        assert_eq!(applied, 1);
        assert_eq!(targets[0].scope, Scope::S1S2);
        assert_eq!(targets[1].scope, Scope::S3);
    }

    #[test]
    fn unmatched_companies_pass_through_unchanged() {
        let original = target("Orlen", Scope::S1, TargetType::Intensity);
        let mut targets = vec![original.clone()];
        let applied = apply(&default_rules(), &mut targets);
        assert_eq!(applied, 0);
        assert_eq!(targets[0], original);
    }

    #[test]
    fn rules_for_absent_companies_are_silent_no_ops() {
        // Input with neither named company present: nothing fails, nothing
        // changes.
        let mut targets = vec![target("Orlen", Scope::S1S2, TargetType::Absolute)];
        let before = targets.clone();
        let applied = apply(&default_rules(), &mut targets);
        assert_eq!(applied, 0);
        assert_eq!(targets, before);

        let mut empty: Vec<TargetDeclaration> = Vec::new();
        assert_eq!(apply(&default_rules(), &mut empty), 0);
    }
}
