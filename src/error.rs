//! Error types for jobtrace
//!
//! This module defines the error hierarchy for the loader:
//! - Configuration and CLI errors
//! - SQLite database errors
//! - Ingestion errors for the two input formats
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Two tiers of failure: conditions that mean the input or the store is
//!   structurally broken (unreadable file, malformed JSON/CSV, missing
//!   header column, bad timestamp, missing correlation id, any
//!   transaction/prepare/DDL failure) propagate as errors all the way to
//!   `main` and terminate the process; a single row's insert failing after
//!   a successful parse is the one recoverable case, logged and skipped so
//!   an isolated bad row cannot abort an otherwise-good batch
//! - Preserve error chains for debugging

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the jobtrace application
#[derive(Error, Debug)]
pub enum TraceError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database errors
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    /// Ingestion errors
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A summary input path given on the command line does not exist
    #[error("Input file does not exist: '{path}'")]
    InputFileMissing { path: PathBuf },

    /// Database location is unusable
    #[error("Invalid database path '{path}': {reason}")]
    InvalidDatabasePath { path: PathBuf, reason: String },
}

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Store-level SQLite failure (open, DDL, transaction begin, statement
    /// prepare, commit). Always fatal: the store itself is broken, not the
    /// data being loaded.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A single row failed to insert after its statement was prepared.
    /// The only recoverable database error; callers log and skip the row.
    #[error("Failed to insert row: {0}")]
    RowInsert(rusqlite::Error),

    /// Closing the database connection failed
    #[error("Failed to close database: {0}")]
    Close(rusqlite::Error),
}

impl DbError {
    /// Check if this error is an isolated per-row insert failure that the
    /// caller may log and skip
    pub fn is_row_error(&self) -> bool {
        matches!(self, DbError::RowInsert(_))
    }
}

/// Ingestion errors for the summary (JSON) and log (CSV) paths
#[derive(Error, Debug)]
pub enum IngestError {
    /// Input stream could not be read
    #[error("Failed to read input: {0}")]
    Read(#[from] std::io::Error),

    /// Summary input was not valid JSON of the expected shape
    #[error("Invalid summary document: {0}")]
    Json(#[from] serde_json::Error),

    /// Log input was not structurally valid CSV
    #[error("Invalid log export: {0}")]
    Csv(#[from] csv::Error),

    /// A job name did not contain a correlation id
    #[error("No correlation id found in job name '{job_name}'")]
    MissingCorrelationId { job_name: String },

    /// The log export header lacks a required column
    #[error("Column '{column}' not found in header {header:?}")]
    MissingColumn {
        column: &'static str,
        header: Vec<String>,
    },

    /// A log row's date column did not match the expected timestamp pattern
    #[error("Row {row}: invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        row: usize,
        value: String,
        source: chrono::ParseError,
    },

    /// An epoch-millisecond field could not be represented as a timestamp
    #[error("Epoch timestamp {millis} ms is out of range")]
    TimestampOutOfRange { millis: i64 },

    /// Database failure while loading parsed records
    #[error("Database error: {0}")]
    Db(#[from] DbError),
}

/// Result type alias for TraceError
pub type Result<T> = std::result::Result<T, TraceError>;

/// Result type alias for DbError
pub type DbResult<T> = std::result::Result<T, DbError>;

/// Result type alias for IngestError
pub type IngestResult<T> = std::result::Result<T, IngestError>;
