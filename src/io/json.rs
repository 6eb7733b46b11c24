//! Rows from a JSON array of objects, the shape spreadsheet libraries emit
//! when converting a sheet to records.

use std::{fs, path::Path};

use serde_json::Value;
use tracing::debug;

use crate::{error::{PlotError, Result}, io::Table};

/// Read spreadsheet rows from a JSON file.
pub fn read_rows_json(path: &Path) -> Result<Table> {
    let bytes = fs::read(path)?;
    read_rows_json_bytes(&bytes)
}

/// Read spreadsheet rows from JSON bytes holding an array of objects.
///
/// Cell values are kept as they are. Columns are the keys of the first row,
/// in order. Anything other than an array of objects fails as a whole.
pub fn read_rows_json_bytes(bytes: &[u8]) -> Result<Table> {
    let records: Vec<Value> = serde_json::from_slice(bytes)
        .map_err(|e| PlotError::Parse(e.to_string()))?;

    let rows = records.into_iter()
        .enumerate()
        .map(|(i, record)| match record {
            Value::Object(row) => Ok(row),
            other => Err(PlotError::Parse(format!("record {} is not an object: {other}", i + 1))),
        })
        .collect::<Result<Vec<_>>>()?;

    let columns = rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default();

    let table = Table::new(rows, columns);
    debug!(rows = table.rows.len(), columns = table.columns.len(), "read JSON rows");
    Ok(table)
}
