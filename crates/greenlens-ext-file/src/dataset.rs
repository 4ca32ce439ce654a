//! JSON dataset files.
//!
//! A dataset bundles the reference catalogs with the user's portfolios and
//! watchlists in one camelCase JSON document:
//!
//! ```json
//! {
//!   "bonds": [...],
//!   "esgDetails": [...],
//!   "issuers": [...],
//!   "portfolios": [...],
//!   "watchlists": [...]
//! }
//! ```
//!
//! Every section is optional.

use std::path::Path;

use greenlens_core::{
    Bond, BondEsgDetail, Catalog, InMemoryPortfolioStore, Issuer, Portfolio, PortfolioSource,
    ReferenceData, Watchlist,
};
use serde::{Deserialize, Serialize};

use crate::error::{FileError, FileResult};

/// Raw dataset document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    /// Bond records.
    pub bonds: Vec<Bond>,

    /// ESG detail records, at most one per bond.
    pub esg_details: Vec<BondEsgDetail>,

    /// Issuer records.
    pub issuers: Vec<Issuer>,

    /// User portfolios.
    pub portfolios: Vec<Portfolio>,

    /// User watchlists.
    pub watchlists: Vec<Watchlist>,
}

impl Dataset {
    /// Reads a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::Io`] if the file cannot be read and
    /// [`FileError::Parse`] if it is not a valid dataset.
    pub fn load(path: impl AsRef<Path>) -> FileResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| FileError::io(path, e))?;
        let dataset: Self = serde_json::from_str(&content)
            .map_err(|e| FileError::parse(path.display().to_string(), e))?;

        tracing::info!(
            path = %path.display(),
            bonds = dataset.bonds.len(),
            esg_details = dataset.esg_details.len(),
            issuers = dataset.issuers.len(),
            portfolios = dataset.portfolios.len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    /// Parses a dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::Parse`] if the string is not a valid dataset.
    pub fn from_json_str(json: &str) -> FileResult<Self> {
        serde_json::from_str(json).map_err(|e| FileError::parse("<inline>", e))
    }

    /// Writes the dataset as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::Io`] if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> FileResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|e| FileError::parse("<dataset>", e))?;
        std::fs::write(path, json).map_err(|e| FileError::io(path, e))?;
        tracing::info!(path = %path.display(), "Saved dataset");
        Ok(())
    }

    /// Builds the reference catalogs and the portfolio store.
    ///
    /// Later duplicates of a bond, detail or issuer key replace earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::Store`] if two portfolios or two watchlists share
    /// an id.
    pub fn into_parts(self) -> FileResult<(ReferenceData, InMemoryPortfolioStore)> {
        let reference = ReferenceData::from_records(self.bonds, self.esg_details, self.issuers);

        let orphaned = reference
            .esg_details
            .records()
            .into_iter()
            .filter(|d| reference.bonds.find(&d.bond_id).is_none())
            .count();
        if orphaned > 0 {
            tracing::debug!(orphaned, "ESG details without a matching bond");
        }

        let mut store = InMemoryPortfolioStore::new();
        for portfolio in self.portfolios {
            store.insert_portfolio(portfolio)?;
        }
        for watchlist in self.watchlists {
            store.insert_watchlist(watchlist)?;
        }

        Ok((reference, store))
    }

    /// Captures the current catalogs and store back into a dataset.
    #[must_use]
    pub fn from_parts(reference: &ReferenceData, store: &InMemoryPortfolioStore) -> Self {
        Self {
            bonds: reference.bonds.records().into_iter().cloned().collect(),
            esg_details: reference.esg_details.records().into_iter().cloned().collect(),
            issuers: reference.issuers.records().into_iter().cloned().collect(),
            portfolios: store.portfolios().into_iter().cloned().collect(),
            watchlists: store.watchlists().into_iter().cloned().collect(),
        }
    }
}

/// Loads a dataset file straight into catalogs and a store.
///
/// # Errors
///
/// See [`Dataset::load`] and [`Dataset::into_parts`].
pub fn load_dataset(path: impl AsRef<Path>) -> FileResult<(ReferenceData, InMemoryPortfolioStore)> {
    Dataset::load(path)?.into_parts()
}
