//! Keyed reference catalogs.
//!
//! These types define the read-only side of the engine's inputs:
//! - [`Catalog`]: a key→value store with a non-throwing `find`
//! - [`InMemoryCatalog`]: the default, deterministic implementation
//! - [`ReferenceSource`]: the lookups the engine needs (bonds, ESG detail, issuers)
//! - [`ReferenceData`]: the bundle of the three catalogs
//!
//! Iteration order is always key order, so anything computed from a catalog is
//! reproducible call to call.

use std::collections::BTreeMap;

use crate::types::{Bond, BondEsgDetail, Issuer};

/// A record that knows its own catalog key.
pub trait Keyed {
    /// Returns the catalog key.
    fn key(&self) -> &str;
}

impl Keyed for Bond {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for BondEsgDetail {
    fn key(&self) -> &str {
        &self.bond_id
    }
}

impl Keyed for Issuer {
    fn key(&self) -> &str {
        &self.name
    }
}

/// A strict key→value store.
///
/// Absence is reported as `None`, never as an error.
pub trait Catalog<T> {
    /// Looks up a record by key.
    fn find(&self, key: &str) -> Option<&T>;

    /// Returns all records in key order.
    fn records(&self) -> Vec<&T>;

    /// Returns the number of records.
    fn len(&self) -> usize;

    /// Returns true if the catalog holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A catalog backed by an ordered map.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog<T> {
    records: BTreeMap<String, T>,
}

impl<T> Default for InMemoryCatalog<T> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }
}

impl<T: Keyed> InMemoryCatalog<T> {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, replacing any record with the same key.
    ///
    /// Returns the replaced record.
    pub fn insert(&mut self, record: T) -> Option<T> {
        self.records.insert(record.key().to_string(), record)
    }
}

impl<T: Keyed> FromIterator<T> for InMemoryCatalog<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for record in iter {
            catalog.insert(record);
        }
        catalog
    }
}

impl<T> Catalog<T> for InMemoryCatalog<T> {
    fn find(&self, key: &str) -> Option<&T> {
        self.records.get(key)
    }

    fn records(&self) -> Vec<&T> {
        self.records.values().collect()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

// =============================================================================
// REFERENCE SOURCE
// =============================================================================

/// Read-only lookups over bonds, ESG detail and issuers.
pub trait ReferenceSource {
    /// Looks up a bond by id.
    fn bond(&self, id: &str) -> Option<&Bond>;

    /// Looks up the ESG detail for a bond. Partial coverage is expected.
    fn esg_detail(&self, bond_id: &str) -> Option<&BondEsgDetail>;

    /// Looks up an issuer by exact name.
    fn issuer(&self, name: &str) -> Option<&Issuer>;

    /// Returns every bond whose issuer field equals `name` exactly, in id order.
    fn bonds_for_issuer(&self, name: &str) -> Vec<&Bond>;
}

/// The three reference catalogs bundled together.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    /// Bonds by id.
    pub bonds: InMemoryCatalog<Bond>,

    /// ESG detail by bond id.
    pub esg_details: InMemoryCatalog<BondEsgDetail>,

    /// Issuers by name.
    pub issuers: InMemoryCatalog<Issuer>,
}

impl ReferenceData {
    /// Creates empty reference data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds reference data from record lists.
    #[must_use]
    pub fn from_records(
        bonds: impl IntoIterator<Item = Bond>,
        esg_details: impl IntoIterator<Item = BondEsgDetail>,
        issuers: impl IntoIterator<Item = Issuer>,
    ) -> Self {
        Self {
            bonds: bonds.into_iter().collect(),
            esg_details: esg_details.into_iter().collect(),
            issuers: issuers.into_iter().collect(),
        }
    }
}

impl ReferenceSource for ReferenceData {
    fn bond(&self, id: &str) -> Option<&Bond> {
        self.bonds.find(id)
    }

    fn esg_detail(&self, bond_id: &str) -> Option<&BondEsgDetail> {
        self.esg_details.find(bond_id)
    }

    fn issuer(&self, name: &str) -> Option<&Issuer> {
        self.issuers.find(name)
    }

    fn bonds_for_issuer(&self, name: &str) -> Vec<&Bond> {
        self.bonds
            .records()
            .into_iter()
            .filter(|b| b.issuer == name)
            .collect()
    }
}
