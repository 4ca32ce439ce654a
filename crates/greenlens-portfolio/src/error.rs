//! Error types for the aggregation engine.
//!
//! Missing reference rows, missing ESG detail and unparseable KPI values are
//! data-quality degradations and never surface here. Errors are reserved for
//! caller mistakes: unknown subject kinds and invalid configuration.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur when configuring or addressing the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The comparison subject kind is not one of bond, portfolio, issuer.
    #[error("Unknown subject kind '{value}': expected bond, portfolio or issuer")]
    UnknownSubjectKind {
        /// The rejected value.
        value: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// The reason the configuration is invalid.
        reason: String,
    },
}

impl EngineError {
    /// Create an unknown subject kind error.
    #[must_use]
    pub fn unknown_subject_kind(value: impl Into<String>) -> Self {
        Self::UnknownSubjectKind {
            value: value.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
