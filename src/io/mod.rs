//! IO for the plotting pipeline, organized by format.
//!
//! # Modules
//!
//! - `csv` - spreadsheet rows from CSV files or bytes
//! - `json` - spreadsheet rows from a JSON array of objects
//! - `sink` - delivery of exported buffers as named files

mod csv;
mod json;
mod sink;
mod table;

pub use csv::{read_rows_csv, read_rows_csv_bytes};
pub use json::{read_rows_json, read_rows_json_bytes};
pub use sink::{deliver, DiskSink, ExportSink, MemSink};
pub use table::Table;
