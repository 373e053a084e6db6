//! CSV adapters at the engine boundary.
//!
//! Readers deserialize the documented row formats via serde; the wide
//! tables are written through [`WideTable::to_csv`] so output bytes are
//! exactly the engine's deterministic rendering.

use std::fs;
use std::path::Path;

use ghg_pathways_core::ingest::RawTargetRow;
use ghg_pathways_core::reconcile::Mismatch;
use ghg_pathways_core::types::HistoricalEmissionRecord;
use ghg_pathways_core::WideTable;

use crate::error::CliError;

/// Read raw target rows. Blank cells deserialize to `None` and are
/// reported later by validation, not here.
pub fn read_target_rows(path: &Path) -> Result<Vec<RawTargetRow>, CliError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Read long-format historical emission records
/// (`company_name,year,scope,emissions`).
pub fn read_historical_records(path: &Path) -> Result<Vec<HistoricalEmissionRecord>, CliError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

/// Read a wide year × company table produced by `process-targets`.
pub fn read_wide_table(path: &Path) -> Result<WideTable, CliError> {
    let malformed = |detail: String| CliError::MalformedTable {
        path: path.display().to_string(),
        detail,
    };

    let mut reader = csv::Reader::from_path(path)?;
    let header = reader.headers()?.clone();
    if header.get(0) != Some("year") {
        return Err(malformed("first column must be 'year'".to_string()));
    }
    let companies: Vec<String> = header.iter().skip(1).map(str::to_string).collect();

    let mut table = WideTable::new();
    for record in reader.records() {
        let record = record?;
        let year: i32 = record
            .get(0)
            .unwrap_or_default()
            .parse()
            .map_err(|e| malformed(format!("bad year: {}", e)))?;
        for (company, cell) in companies.iter().zip(record.iter().skip(1)) {
            if cell.is_empty() {
                continue;
            }
            let value: f64 = cell
                .parse()
                .map_err(|e| malformed(format!("bad value for '{}': {}", company, e)))?;
            table
                .insert(year, company, value)
                .map_err(ghg_pathways_core::PathwayError::from)?;
        }
    }
    Ok(table)
}

/// Write a wide table as CSV.
pub fn write_wide_table(path: &Path, table: &WideTable) -> Result<(), CliError> {
    fs::write(path, table.to_csv())?;
    Ok(())
}

/// Write mismatch diagnostics rows as CSV.
pub fn write_mismatches(path: &Path, mismatches: &[Mismatch]) -> Result<(), CliError> {
    let mut writer = csv::Writer::from_path(path)?;
    for mismatch in mismatches {
        writer.serialize(mismatch)?;
    }
    writer.flush()?;
    Ok(())
}
