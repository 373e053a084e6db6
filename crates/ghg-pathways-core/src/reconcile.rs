//! Historical Merger & Consistency Checker.
//!
//! Unions the target-derived absolute series with independently reported
//! historical emissions, reconciles overlapping cells by mean, collects
//! mismatches into a diagnostics report (never aborting the run), and
//! publishes the result both as a plain year × company table and as a
//! "split" view whose projected segments are separately-named columns.
//!
//! Historical input is restricted to the aggregated S1+S2 scope and to
//! companies present in the target table. Values on both sides are rounded
//! to whole tonnes before comparison: historical reporting has no
//! sub-tonne precision, and comparing at higher precision would flag
//! nothing but rounding artifacts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::config::{round_to, PipelineConfig};
use crate::error::TableError;
use crate::table::WideTable;
use crate::types::{HistoricalEmissionRecord, Scope, SeriesKind};

/// Column suffix marking projected segments in the split view.
pub const PROJECTION_SUFFIX: &str = " (proj.)";

/// One cell where historical and target-derived emissions disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mismatch {
    pub company_name: String,
    pub year: i32,
    pub historical: f64,
    pub target_derived: f64,
}

/// Diagnostics artifact of the consistency check. Empty when historical
/// and target-derived values agree everywhere they overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub generated_at: DateTime<Utc>,
    pub mismatches: Vec<Mismatch>,
}

impl ConsistencyReport {
    fn new(mismatches: Vec<Mismatch>) -> Self {
        Self {
            generated_at: Utc::now(),
            mismatches,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// One reconciled (company, year) observation in long form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledRow {
    pub company_name: String,
    pub year: i32,
    pub emissions: f64,
    /// Historical when a reported observation exists for the cell,
    /// target otherwise.
    pub kind: SeriesKind,
    /// True once the year is past the last real historical observation,
    /// even for target years that precede the cutoff.
    pub projection: bool,
}

/// Output of the reconciliation stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Plain year × company table of reconciled emissions.
    pub amended: WideTable,
    /// Split view: historical segments under the company name, projected
    /// segments under `company + " (proj.)"`, with one bridge row at the
    /// boundary carrying the last historical value into the projected
    /// column so plots connect without interpolation.
    pub split: WideTable,
    /// The same series in long form, sorted by (year, company).
    pub rows: Vec<ReconciledRow>,
    pub report: ConsistencyReport,
}

#[derive(Debug, Default, Clone, Copy)]
struct CellValues {
    historical: Option<f64>,
    target: Option<f64>,
}

impl CellValues {
    fn reconciled(&self) -> Option<f64> {
        match (self.historical, self.target) {
            (Some(h), Some(t)) => Some((h + t) / 2.0),
            (Some(h), None) => Some(h),
            (None, Some(t)) => Some(t),
            (None, None) => None,
        }
    }
}

/// Merge the target-derived series with historical records and check
/// consistency.
///
/// Mismatching cells are reconciled to the mean and reported, not
/// resolved silently and not fatal.
pub fn reconcile(
    targets: &WideTable,
    historical: &[HistoricalEmissionRecord],
    config: &PipelineConfig,
) -> Result<Reconciliation, TableError> {
    let mut cells: BTreeMap<(i32, String), CellValues> = BTreeMap::new();

    for (year, company, value) in targets.iter() {
        let entry = cells.entry((year, company.to_string())).or_default();
        entry.target = Some(round_to(value, config.reconciled_decimals));
    }

    for record in historical {
        if record.scope != Scope::S1S2 || !targets.has_column(&record.company_name) {
            continue;
        }
        let entry = cells
            .entry((record.year, record.company_name.clone()))
            .or_default();
        entry.historical = Some(round_to(record.emissions, config.reconciled_decimals));
    }

    let mut mismatches = Vec::new();
    let mut amended = WideTable::new();
    let mut rows = Vec::new();
    let mut reconciled_cells: BTreeMap<(i32, String), f64> = BTreeMap::new();

    for ((year, company), values) in &cells {
        if let (Some(h), Some(t)) = (values.historical, values.target) {
            if h != t {
                mismatches.push(Mismatch {
                    company_name: company.clone(),
                    year: *year,
                    historical: h,
                    target_derived: t,
                });
            }
        }
        if let Some(value) = values.reconciled() {
            let value = round_to(value, config.reconciled_decimals);
            amended.insert(*year, company, value)?;
            rows.push(ReconciledRow {
                company_name: company.clone(),
                year: *year,
                emissions: value,
                kind: if values.historical.is_some() {
                    SeriesKind::Historical
                } else {
                    SeriesKind::Target
                },
                projection: *year > config.last_historical_year,
            });
            reconciled_cells.insert((*year, company.clone()), value);
        }
    }

    if !mismatches.is_empty() {
        warn!(
            count = mismatches.len(),
            "historical and target-derived S1+S2 emissions disagree"
        );
    }

    let split = split_projection(&reconciled_cells, config)?;
    debug!(
        companies = amended.columns().count(),
        years = amended.years().count(),
        "reconciled series built"
    );

    Ok(Reconciliation {
        amended,
        split,
        rows,
        report: ConsistencyReport::new(mismatches),
    })
}

/// Build the split view: historical and projected segments as distinct
/// columns, bridged at the last historical year.
fn split_projection(
    cells: &BTreeMap<(i32, String), f64>,
    config: &PipelineConfig,
) -> Result<WideTable, TableError> {
    let cutoff = config.last_historical_year;
    let mut split = WideTable::new();
    // Last non-projection (year, value) per company, for the bridge row.
    let mut last_historical: BTreeMap<&str, (i32, f64)> = BTreeMap::new();

    for ((year, company), &value) in cells {
        let projection = *year > cutoff;
        if projection {
            split.insert(*year, &format!("{}{}", company, PROJECTION_SUFFIX), value)?;
        } else {
            split.insert(*year, company, value)?;
            let entry = last_historical
                .entry(company.as_str())
                .or_insert((*year, value));
            if *year >= entry.0 {
                *entry = (*year, value);
            }
        }
    }

    // Bridge row: the last historical point repeated in the projected
    // column so the two segments connect.
    for (company, (year, value)) in last_historical {
        split.insert(year, &format!("{}{}", company, PROJECTION_SUFFIX), value)?;
    }

    Ok(split)
}
