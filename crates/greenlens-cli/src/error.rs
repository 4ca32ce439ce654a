//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A bond id that is not in the dataset.
    #[error("Unknown bond: {0}")]
    UnknownBond(String),

    /// A subject id that did not resolve.
    #[error("Nothing found for {kind} '{id}'")]
    NotFound {
        /// Subject kind.
        kind: String,
        /// Requested id.
        id: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
