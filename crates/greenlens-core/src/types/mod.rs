//! Domain types for ESG bond research.
//!
//! - [`Bond`]: Financial identity of a bond (immutable reference data)
//! - [`BondEsgDetail`]: Per-bond ESG detail (SDG/UoP allocations, reviews, documents)
//! - [`ImpactKpi`] / [`KpiValue`]: Reported outcome metrics
//! - [`Issuer`]: Aggregation root keyed by issuer name
//! - [`Portfolio`] / [`Watchlist`]: User-owned collections

mod bond;
mod esg;
mod issuer;
mod kpi;
mod portfolio;

pub use bond::Bond;
pub use esg::{
    BondEsgDetail, DataProvenance, DocumentKind, EsgDocument, ExternalReview, Project, ReviewKind,
    SdgAllocation, TaxonomyAlignment, UseOfProceedsCategory,
};
pub use issuer::Issuer;
pub use kpi::{ImpactKpi, KpiValue};
pub use portfolio::{Portfolio, PortfolioHolding, Watchlist};
