//! CSV reading operations.

use std::{fs, io::Cursor, path::Path};

use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, CsvReader}};
use serde_json::Value;
use tracing::debug;

use crate::{error::{PlotError, Result}, feature::Row, io::Table};

/// Read spreadsheet rows from a CSV file with a header row.
pub fn read_rows_csv(path: &Path) -> Result<Table> {
    let bytes = fs::read(path)?;
    read_rows_csv_bytes(&bytes)
}

/// Read spreadsheet rows from CSV bytes with a header row.
///
/// Every cell is read as text; numeric parsing is left to coordinate
/// extraction. Empty cells are left out of the row, and columns follow header
/// order. Malformed input fails as a whole.
pub fn read_rows_csv_bytes(bytes: &[u8]) -> Result<Table> {
    let options = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0));

    let df = CsvReader::new(Cursor::new(bytes))
        .with_options(options)
        .finish()
        .map_err(|e| PlotError::Parse(e.to_string()))?;

    let table = frame_to_table(&df)?;
    debug!(rows = table.rows.len(), columns = table.columns.len(), "read CSV rows");
    Ok(table)
}

/// Convert a DataFrame of string columns into rows.
fn frame_to_table(df: &DataFrame) -> Result<Table> {
    let columns = df.get_column_names().iter()
        .map(|name| name.to_string())
        .collect::<Vec<_>>();

    let cells = df.get_columns().iter()
        .map(|column| column.str())
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let rows = (0..df.height())
        .map(|i| {
            columns.iter().zip(&cells)
                .filter_map(|(name, cells)| {
                    cells.get(i)
                        .filter(|cell| !cell.is_empty())
                        .map(|cell| (name.clone(), Value::String(cell.to_string())))
                })
                .collect::<Row>()
        })
        .collect();

    Ok(Table::new(rows, columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_rows_as_text_in_header_order() {
        let csv = "name,lat1,lng1\nNorth,10.5,20.25\nSouth,,-3\n";
        let table = read_rows_csv_bytes(csv.as_bytes()).unwrap();

        assert_eq!(table.columns, ["name", "lat1", "lng1"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0]["lat1"], json!("10.5"));
        assert_eq!(table.rows[0].keys().collect::<Vec<_>>(), ["name", "lat1", "lng1"]);
        // empty cells are left out
        assert!(table.rows[1].get("lat1").is_none());
        assert_eq!(table.rows[1]["lng1"], json!("-3"));
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        fs::write(&path, "a,b\n1,2\n").unwrap();

        let table = read_rows_csv(&path).unwrap();
        assert_eq!(table.rows[0]["b"], json!("2"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(read_rows_csv(&dir.path().join("nope.csv")), Err(PlotError::Io(_))));
    }
}
