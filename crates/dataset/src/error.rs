//! Error types for dataset loading.

use thiserror::Error;

/// Errors that can occur while loading or validating a dataset file.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// File could not be opened or read
    #[error("failed to read dataset file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File content was not valid JSON for the expected shape
    #[error("failed to parse dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Dataset-level validation failed
    #[error("dataset validation failed: {0}")]
    Validation(String),
}

/// Convenience type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, DatasetError>;
