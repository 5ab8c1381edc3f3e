//! Core error types for pompompom-core.
//!
//! Nothing here is fatal to a running session. File errors are recovered by
//! the caller (skip the row, fall back to defaults) and validation errors
//! leave the in-memory state untouched.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pompompom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The file does not exist. Expected on first run.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Malformed task row or settings file
    #[error("File format error: {0}")]
    Format(#[from] FileFormatError),

    /// Rejected user input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl CoreError {
    /// True for a missing file, which callers treat as "use defaults".
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound(_))
    }
}

/// Problems with the contents of a task or settings file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileFormatError {
    /// A task row that could not be used. `line` is 1-based and counts the header.
    #[error("line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    /// The settings file is not valid JSON/TOML.
    #[error("cannot parse {}: {message}", .path.display())]
    Syntax { path: PathBuf, message: String },

    /// A recognized settings key carrying an unusable value.
    #[error("invalid value for '{key}': {message}")]
    InvalidSetting { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// Counts and durations must be at least 1
    #[error("'{field}' must be a positive integer, got {value}")]
    NotPositive { field: String, value: String },

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("unknown settings key: {0}")]
    UnknownKey(String),
}

impl ValidationError {
    pub(crate) fn not_positive(field: &str, value: impl ToString) -> Self {
        ValidationError::NotPositive {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
