//! CSV reading operations.

use std::{fs::File, io::Cursor, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, CsvReader}};
use serde_json::{Map, Value};
use tracing::info;

use crate::election::ElectionRecord;

/// Read a results table from a CSV file with a header row.
/// Every cell is read as text so identifiers keep their leading zeros; empty cells are left out.
pub(crate) fn read_records_csv(path: &Path) -> Result<Vec<ElectionRecord>> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(file)
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))?;

    let records = dataframe_to_records(&df)?;
    info!(path = %path.display(), records = records.len(), "loaded results table");
    Ok(records)
}

/// Read a results table from CSV text.
pub fn records_from_csv_str(csv: &str) -> Result<Vec<ElectionRecord>> {
    let df = CsvReader::new(Cursor::new(csv.as_bytes()))
        .with_options(CsvReadOptions::default().with_has_header(true).with_infer_schema_length(Some(0)))
        .finish()
        .context("[io::csv::read] Failed to read CSV from string")?;
    dataframe_to_records(&df)
}

/// One record per row, keyed by trimmed column name.
fn dataframe_to_records(df: &DataFrame) -> Result<Vec<ElectionRecord>> {
    let mut rows = vec![Map::new(); df.height()];

    for column in df.get_columns() {
        let name = column.name().trim().to_string();
        let values = column.as_materialized_series().str()
            .with_context(|| format!("[io::csv::read] Column {name:?} is not text"))?;

        for (row, cell) in rows.iter_mut().zip(values.into_iter()) {
            if let Some(cell) = cell.map(str::trim).filter(|s| !s.is_empty()) {
                row.insert(name.clone(), Value::String(cell.to_string()));
            }
        }
    }

    Ok(rows.into_iter().map(ElectionRecord::new).collect())
}
