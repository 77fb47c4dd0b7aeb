//! Error types for indicator ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading indicator files.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file does not exist.
    #[error("indicator file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited text.
    #[error("failed to parse {table}: {message}")]
    CsvParse { table: String, message: String },

    /// Input has no non-blank rows.
    #[error("{table} is empty")]
    EmptyCsv { table: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
