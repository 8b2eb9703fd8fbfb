//! Error types for hc-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in hc-core
#[derive(Debug, Error)]
pub enum Error {
    /// An input path was empty, missing, or not a regular file
    #[error("file not found: '{}'", path.display())]
    NotFound { path: PathBuf },

    /// Loaded data is not usable (e.g. the roster parsed to zero rows)
    #[error("validation failed: {0}")]
    Validation(String),

    /// An operation was attempted without the configuration it needs
    #[error("configuration error: {0}")]
    Config(String),

    /// A field editor could not parse the user-supplied value
    #[error("invalid input for {field}: '{input}'")]
    InvalidInput { field: String, input: String },

    /// An internal precondition was broken by the caller
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A column is not part of the record's header set
    #[error("column '{column}' not found")]
    MissingColumn { column: String },

    /// A record index is past the end of its record set
    #[error("record index {index} out of range (len {len})")]
    RecordOutOfRange { index: usize, len: usize },

    /// Direct team moves are not allowed for this export
    #[error("player move disabled: {0}")]
    MoveDisabled(String),

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True when an optional input simply was not supplied
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub(crate) fn invalid_input(field: impl Into<String>, input: impl Into<String>) -> Self {
        Error::InvalidInput {
            field: field.into(),
            input: input.into(),
        }
    }

    pub(crate) fn missing_column(column: impl Into<String>) -> Self {
        Error::MissingColumn {
            column: column.into(),
        }
    }
}
