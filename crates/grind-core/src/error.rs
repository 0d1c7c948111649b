use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// All errors produced by GrindGraph.
#[derive(Error, Debug)]
pub enum GrindError {
    /// One of the expected CSV exports does not exist at its configured path.
    #[error("Data file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// A file exists but could not be opened or read.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV record could not be read or deserialized into its typed row.
    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column header is absent.
    #[error("Missing required column \"{column}\" in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A calendar date string did not match any recognised format.
    #[error("Invalid date format: {0}")]
    DateParse(String),

    /// A sleep timestamp string did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// A filter was requested with its start date after its end date.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GrindError {
    /// `true` when the error means a source file is absent.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, GrindError::MissingFile(_))
    }
}

/// Convenience alias used throughout the GrindGraph crates.
pub type Result<T> = std::result::Result<T, GrindError>;
