//! Error types for sheetplot.

use thiserror::Error;

/// Faults raised by the plotting pipeline.
#[derive(Error, Debug)]
pub enum PlotError {
    /// Point configuration is incomplete or an edit to it is invalid.
    /// A batch rejected with this error has not touched the collection.
    #[error("invalid point configuration: {0}")]
    Validation(String),

    /// Undo or redo requested with an empty stack.
    #[error("nothing to {0}")]
    EmptyHistory(&'static str),

    #[error("no features to export")]
    EmptyExport,

    /// Spreadsheet input could not be turned into rows.
    #[error("failed to parse spreadsheet input: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("table error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, PlotError>;
