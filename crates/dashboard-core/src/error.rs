use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the sales dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension is not a spreadsheet format we can open.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(PathBuf),

    /// The spreadsheet reader rejected the workbook.
    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    /// The requested worksheet does not exist in the workbook.
    #[error("Worksheet not found: {0}")]
    SheetNotFound(String),

    /// The workbook contains no worksheets at all.
    #[error("Workbook has no worksheets")]
    NoWorksheets,

    /// A required schema column is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A present value could not be cast to the column's declared type.
    #[error("Cannot convert {value:?} in column {column} (row {row}) to {expected}")]
    TypeCoercion {
        column: String,
        row: usize,
        value: String,
        expected: &'static str,
    },

    /// A Sale_Date value did not match any recognised date format.
    #[error("Invalid date {value:?} in row {row}")]
    DateParse { row: usize, value: String },

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A summary could not be serialised to JSON.
    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Whether this error stems from the content of the loaded file (schema or
    /// values) rather than from the environment.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            DashboardError::MissingColumn(_)
                | DashboardError::TypeCoercion { .. }
                | DashboardError::DateParse { .. }
        )
    }
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
