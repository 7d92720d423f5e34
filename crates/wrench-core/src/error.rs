//! Error types for the intervention tracker library.

use std::path::PathBuf;

use thiserror::Error;

use crate::store::StoreError;

/// Comprehensive error type for tracker operations.
///
/// Note that the repository's public operations never return this type:
/// per the degradation policy, reads collapse to empty outcomes and
/// writes to outcome structs. `TrackerError` surfaces from construction
/// paths (builder, store setup) and from input validation.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Document store errors (connection, query, schema)
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl TrackerError {
    /// Creates an input validation error for a named field.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        TrackerError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
