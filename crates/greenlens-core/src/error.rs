//! Error types for the portfolio/watchlist store.
//!
//! Reference lookups never fail; only store mutations and record validation do.

use thiserror::Error;

/// Result type for store operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by store mutations and record validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// No portfolio with the given id.
    #[error("Portfolio not found: {id}")]
    PortfolioNotFound {
        /// The portfolio id.
        id: String,
    },

    /// No watchlist with the given id.
    #[error("Watchlist not found: {id}")]
    WatchlistNotFound {
        /// The watchlist id.
        id: String,
    },

    /// The portfolio does not hold the given bond.
    #[error("Bond '{bond_id}' is not held in portfolio '{portfolio_id}'")]
    HoldingNotFound {
        /// The portfolio id.
        portfolio_id: String,
        /// The bond id.
        bond_id: String,
    },

    /// A record with the same id already exists.
    #[error("Duplicate id: {id}")]
    DuplicateId {
        /// The conflicting id.
        id: String,
    },

    /// The bond is already held in the portfolio.
    #[error("Bond '{bond_id}' is already held in portfolio '{portfolio_id}'")]
    DuplicateHolding {
        /// The portfolio id.
        portfolio_id: String,
        /// The bond id.
        bond_id: String,
    },

    /// Invalid holding weight (negative).
    #[error("Invalid weight for bond '{bond_id}': {value}")]
    InvalidWeight {
        /// The bond id.
        bond_id: String,
        /// The rejected weight.
        value: String,
    },

    /// Invalid name (empty after trimming).
    #[error("Invalid name: {reason}")]
    InvalidName {
        /// Why the name was rejected.
        reason: String,
    },
}

impl CoreError {
    /// Create a portfolio-not-found error.
    #[must_use]
    pub fn portfolio_not_found(id: impl Into<String>) -> Self {
        Self::PortfolioNotFound { id: id.into() }
    }

    /// Create a watchlist-not-found error.
    #[must_use]
    pub fn watchlist_not_found(id: impl Into<String>) -> Self {
        Self::WatchlistNotFound { id: id.into() }
    }

    /// Create a duplicate id error.
    #[must_use]
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    /// Create an invalid name error.
    #[must_use]
    pub fn invalid_name(reason: impl Into<String>) -> Self {
        Self::InvalidName {
            reason: reason.into(),
        }
    }
}
