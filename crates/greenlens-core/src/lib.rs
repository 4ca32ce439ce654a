//! # Greenlens Core
//!
//! Source records for ESG bond research.
//!
//! This crate holds the reference data the aggregation engine reads from and the
//! portfolio/watchlist store the browsing session writes to.
//!
//! ## Design Philosophy
//!
//! - **Explicit presence**: every lookup returns `Option`; a missing bond or a bond
//!   without ESG detail is a valid state, never an error
//! - **Resolve once**: impact KPI values are classified as numeric or unparseable
//!   when they are deserialized, not at every aggregation site
//! - **Injected collaborators**: the engine receives a [`ReferenceSource`] and a
//!   [`PortfolioSource`] instead of reaching for ambient state
//!
//! ## Module Overview
//!
//! - [`types`] - Bonds, ESG detail, issuers, portfolios, watchlists
//! - [`catalog`] - Keyed catalogs and the [`ReferenceData`] bundle
//! - [`store`] - The in-memory portfolio/watchlist store
//! - [`error`] - Store and validation errors

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod error;
pub mod store;
pub mod types;

pub use catalog::{Catalog, InMemoryCatalog, Keyed, ReferenceData, ReferenceSource};
pub use error::{CoreError, CoreResult};
pub use store::{InMemoryPortfolioStore, PortfolioSource};
pub use types::{
    Bond, BondEsgDetail, DataProvenance, DocumentKind, EsgDocument, ExternalReview, ImpactKpi,
    Issuer, KpiValue, Portfolio, PortfolioHolding, Project, ReviewKind, SdgAllocation,
    TaxonomyAlignment, UseOfProceedsCategory, Watchlist,
};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use greenlens_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::catalog::{Catalog, InMemoryCatalog, Keyed, ReferenceData, ReferenceSource};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::store::{InMemoryPortfolioStore, PortfolioSource};
    pub use crate::types::*;

    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
}
