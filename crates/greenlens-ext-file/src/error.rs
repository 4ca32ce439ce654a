//! Error types for file loading and export.

use std::path::Path;

use greenlens_core::CoreError;
use thiserror::Error;

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors that can occur when reading datasets or writing exports.
#[derive(Error, Debug)]
pub enum FileError {
    /// The file could not be read or written.
    #[error("I/O error on {path}: {message}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error message.
        message: String,
    },

    /// The file content is not a valid dataset.
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// File path, or `<inline>` for in-memory input.
        path: String,
        /// Underlying error message.
        message: String,
    },

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(String),

    /// The dataset violates a store rule (e.g. duplicate portfolio ids).
    #[error(transparent)]
    Store(#[from] CoreError),
}

impl FileError {
    /// Create an I/O error for a path.
    #[must_use]
    pub fn io(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    /// Create a parse error for a path.
    #[must_use]
    pub fn parse(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Create a CSV error.
    #[must_use]
    pub fn csv(err: impl std::fmt::Display) -> Self {
        Self::Csv(err.to_string())
    }
}
