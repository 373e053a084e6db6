//! Raw target-row validation and baseline fill-forward.
//!
//! The upstream workbook export leaves gaps the engine has to account for:
//! rows missing mandatory fields, stray whitespace in scope strings, and
//! baseline GHG columns populated on some of a company's rows but not all.
//! Validation never drops rows silently; every rejected row is reported
//! with its index and the offending field.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{Scope, TargetDeclaration, TargetType};

/// One raw row of the target table, before validation. All fields that the
/// source can leave blank are optional here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTargetRow {
    pub company_id: String,
    pub company_name: String,
    pub scope: Option<String>,
    pub target_type: Option<String>,
    pub reduction_ambition: Option<f64>,
    pub base_year: Option<i32>,
    pub end_year: Option<i32>,
    pub base_year_ghg_s1: Option<f64>,
    pub base_year_ghg_s2: Option<f64>,
    pub base_year_ghg_s3: Option<f64>,
}

/// Why a raw row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowIssue {
    /// Zero-based index of the row in the input.
    pub row: usize,
    pub company_name: String,
    /// Field that was missing or unparseable.
    pub field: &'static str,
    pub detail: String,
}

/// Validate raw rows into [`TargetDeclaration`]s.
///
/// A row is invalid when `scope`, `target_type`, `reduction_ambition`,
/// `base_year`, or `end_year` is absent or unparseable. Scope strings are
/// whitespace-trimmed before parsing. Invalid rows are returned as issues,
/// never silently discarded.
pub fn validate_targets(rows: &[RawTargetRow]) -> (Vec<TargetDeclaration>, Vec<RowIssue>) {
    let mut valid = Vec::with_capacity(rows.len());
    let mut issues = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        match validate_row(index, row) {
            Ok(target) => valid.push(target),
            Err(issue) => {
                warn!(
                    row = issue.row,
                    company = %issue.company_name,
                    field = issue.field,
                    "rejected target row: {}",
                    issue.detail
                );
                issues.push(issue);
            }
        }
    }

    (valid, issues)
}

fn validate_row(index: usize, row: &RawTargetRow) -> Result<TargetDeclaration, RowIssue> {
    let issue = |field: &'static str, detail: String| RowIssue {
        row: index,
        company_name: row.company_name.clone(),
        field,
        detail,
    };

    let scope: Scope = row
        .scope
        .as_deref()
        .ok_or_else(|| issue("scope", "missing".to_string()))?
        .parse()
        .map_err(|e| issue("scope", format!("{}", e)))?;

    let target_type: TargetType = row
        .target_type
        .as_deref()
        .ok_or_else(|| issue("target_type", "missing".to_string()))?
        .parse()
        .map_err(|e| issue("target_type", format!("{}", e)))?;

    let reduction_ambition = row
        .reduction_ambition
        .ok_or_else(|| issue("reduction_ambition", "missing".to_string()))?;
    if !(0.0..=1.0).contains(&reduction_ambition) {
        return Err(issue(
            "reduction_ambition",
            format!("{} outside [0, 1]", reduction_ambition),
        ));
    }

    let base_year = row
        .base_year
        .ok_or_else(|| issue("base_year", "missing".to_string()))?;
    let end_year = row
        .end_year
        .ok_or_else(|| issue("end_year", "missing".to_string()))?;
    if end_year <= base_year {
        return Err(issue(
            "end_year",
            format!("{} not after base year {}", end_year, base_year),
        ));
    }

    Ok(TargetDeclaration {
        company_id: row.company_id.clone(),
        company_name: row.company_name.clone(),
        scope,
        target_type,
        reduction_ambition,
        base_year,
        end_year,
        base_year_ghg_s1: row.base_year_ghg_s1,
        base_year_ghg_s2: row.base_year_ghg_s2,
        base_year_ghg_s3: row.base_year_ghg_s3,
    })
}

/// Propagate known baselines across rows of the same (company_id,
/// base_year).
///
/// Companies often report their base-year GHG figures on one target row and
/// leave the columns blank on the rest. Each missing baseline is filled
/// from any row of the same company and base year that carries a value.
/// Conflicting non-missing values are left untouched; the first value seen
/// in input order wins for filling.
pub fn fill_baselines(targets: &mut [TargetDeclaration]) {
    use std::collections::BTreeMap;

    let mut known: BTreeMap<(String, i32), [Option<f64>; 3]> = BTreeMap::new();
    for target in targets.iter() {
        let entry = known
            .entry((target.company_id.clone(), target.base_year))
            .or_default();
        let values = [
            target.base_year_ghg_s1,
            target.base_year_ghg_s2,
            target.base_year_ghg_s3,
        ];
        for (slot, value) in entry.iter_mut().zip(values) {
            if slot.is_none() {
                *slot = value;
            }
        }
    }

    for target in targets.iter_mut() {
        if let Some(entry) = known.get(&(target.company_id.clone(), target.base_year)) {
            if target.base_year_ghg_s1.is_none() {
                target.base_year_ghg_s1 = entry[0];
            }
            if target.base_year_ghg_s2.is_none() {
                target.base_year_ghg_s2 = entry[1];
            }
            if target.base_year_ghg_s3.is_none() {
                target.base_year_ghg_s3 = entry[2];
            }
        }
    }
}

/// Drop exact duplicate declarations, keeping the first occurrence.
pub fn drop_exact_duplicates(targets: Vec<TargetDeclaration>) -> Vec<TargetDeclaration> {
    let mut seen: Vec<TargetDeclaration> = Vec::with_capacity(targets.len());
    for target in targets {
        if !seen.contains(&target) {
            seen.push(target);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row() -> RawTargetRow {
        RawTargetRow {
            company_id: "PL0001".to_string(),
            company_name: "Acme".to_string(),
            scope: Some("S1+S2".to_string()),
            target_type: Some("Absolute".to_string()),
            reduction_ambition: Some(0.3),
            base_year: Some(2020),
            end_year: Some(2030),
            base_year_ghg_s1: Some(70.0),
            base_year_ghg_s2: Some(30.0),
            base_year_ghg_s3: None,
        }
    }

    #[test]
    fn valid_row_passes() {
        let (valid, issues) = validate_targets(&[raw_row()]);
        assert_eq!(valid.len(), 1);
        assert!(issues.is_empty());
        assert_eq!(valid[0].scope, Scope::S1S2);
        assert_eq!(valid[0].target_type, TargetType::Absolute);
    }

    #[test]
    fn missing_mandatory_fields_are_reported_with_index() {
        let mut missing_scope = raw_row();
        missing_scope.scope = None;
        let mut missing_ambition = raw_row();
        missing_ambition.reduction_ambition = None;

        let (valid, issues) = validate_targets(&[raw_row(), missing_scope, missing_ambition]);
        assert_eq!(valid.len(), 1);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].row, 1);
        assert_eq!(issues[0].field, "scope");
        assert_eq!(issues[1].row, 2);
        assert_eq!(issues[1].field, "reduction_ambition");
    }

    #[test]
    fn scope_whitespace_is_tolerated() {
        let mut row = raw_row();
        row.scope = Some("  S1+S2+S3 ".to_string());
        let (valid, issues) = validate_targets(&[row]);
        assert!(issues.is_empty());
        assert_eq!(valid[0].scope, Scope::S1S2S3);
    }

    #[test]
    fn inverted_years_are_rejected() {
        let mut row = raw_row();
        row.end_year = Some(2019);
        let (valid, issues) = validate_targets(&[row]);
        assert!(valid.is_empty());
        assert_eq!(issues[0].field, "end_year");
    }

    #[test]
    fn ambition_outside_unit_interval_is_rejected() {
        let mut row = raw_row();
        row.reduction_ambition = Some(1.5);
        let (_, issues) = validate_targets(&[row]);
        assert_eq!(issues[0].field, "reduction_ambition");
    }

    #[test]
    fn baselines_fill_across_rows_of_same_company_and_base_year() {
        let (mut targets, _) = validate_targets(&[raw_row(), {
            let mut second = raw_row();
            second.end_year = Some(2050);
            second.base_year_ghg_s1 = None;
            second.base_year_ghg_s2 = None;
            second
        }]);
        fill_baselines(&mut targets);
        assert_eq!(targets[1].base_year_ghg_s1, Some(70.0));
        assert_eq!(targets[1].base_year_ghg_s2, Some(30.0));
    }

    #[test]
    fn fill_does_not_cross_base_years() {
        let mut other_base = raw_row();
        other_base.base_year = Some(2015);
        other_base.end_year = Some(2025);
        other_base.base_year_ghg_s1 = None;
        other_base.base_year_ghg_s2 = None;

        let (mut targets, _) = validate_targets(&[raw_row(), other_base]);
        fill_baselines(&mut targets);
        assert_eq!(targets[1].base_year_ghg_s1, None);
    }

    #[test]
    fn exact_duplicates_collapse_to_first() {
        let (targets, _) = validate_targets(&[raw_row(), raw_row()]);
        let unique = drop_exact_duplicates(targets);
        assert_eq!(unique.len(), 1);
    }
}
