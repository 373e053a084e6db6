//! Year-indexed wide table: years as rows, one column per company.
//!
//! The pivot from point lists to wide tables is modeled explicitly as an
//! "index set × key set → value" mapping with duplicate-key detection.
//! Conflicting duplicates raise a named error instead of overwriting
//! silently; exactly equal duplicates collapse, because the shared
//! base-year row of a company is legitimately derived once per target.
//!
//! All storage is `BTreeMap`-backed so iteration order, and therefore any
//! rendered output, is deterministic: running the pipeline twice on the
//! same input yields byte-identical tables.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::TableError;

/// Sparse year × company table of emission values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WideTable {
    columns: BTreeSet<String>,
    cells: BTreeMap<i32, BTreeMap<String, f64>>,
}

impl WideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one cell. Equal duplicates are a no-op; conflicting
    /// duplicates return [`TableError::DuplicateCell`].
    pub fn insert(&mut self, year: i32, column: &str, value: f64) -> Result<(), TableError> {
        let row = self.cells.entry(year).or_default();
        if let Some(&existing) = row.get(column) {
            if existing != value {
                return Err(TableError::DuplicateCell {
                    year,
                    column: column.to_string(),
                    existing,
                    incoming: value,
                });
            }
            return Ok(());
        }
        row.insert(column.to_string(), value);
        self.columns.insert(column.to_string());
        Ok(())
    }

    pub fn get(&self, year: i32, column: &str) -> Option<f64> {
        self.cells.get(&year).and_then(|row| row.get(column)).copied()
    }

    /// Column names in ascending lexicographic order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(column)
    }

    /// Row years in ascending order.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.cells.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in deterministic (year, column) order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &str, f64)> {
        self.cells.iter().flat_map(|(&year, row)| {
            row.iter().map(move |(column, &value)| (year, column.as_str(), value))
        })
    }

    /// CSV-shaped header: `year` first, then companies sorted by name.
    pub fn header(&self) -> Vec<String> {
        let mut header = Vec::with_capacity(self.columns.len() + 1);
        header.push("year".to_string());
        header.extend(self.columns.iter().cloned());
        header
    }

    /// CSV-shaped rows in ascending year order. Missing cells are `None`.
    pub fn rows(&self) -> Vec<(i32, Vec<Option<f64>>)> {
        self.cells
            .iter()
            .map(|(&year, row)| {
                let values = self
                    .columns
                    .iter()
                    .map(|column| row.get(column).copied())
                    .collect();
                (year, values)
            })
            .collect()
    }

    /// Render the table as CSV text. Missing cells are empty fields;
    /// values print without trailing zeros (`81` not `81.0`).
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.header().join(","));
        out.push('\n');
        for (year, values) in self.rows() {
            out.push_str(&year.to_string());
            for value in values {
                out.push(',');
                if let Some(v) = value {
                    out.push_str(&format_value(v));
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Compact numeric formatting for rendered tables.
fn format_value(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}
