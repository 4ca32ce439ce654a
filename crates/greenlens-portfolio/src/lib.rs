//! # Greenlens Portfolio
//!
//! ESG aggregation and comparison engine for sustainable bonds.
//!
//! This crate collapses three structurally different sources - a single bond,
//! a portfolio of weighted holdings, and every bond of an issuer - into one
//! comparable [`ComparisonSubject`].
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every calculation takes immutable inputs and returns a
//!   freshly allocated result; identical inputs give identical outputs
//! - **Degrade, don't fail**: missing bonds are skipped, missing ESG detail
//!   contributes zero, unparseable KPI values are dropped
//! - **Zero-safe**: every division by an empty total yields 0, never NaN
//! - **Combinable KPIs only**: impact KPIs are combined only when name and unit
//!   match exactly
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use greenlens_portfolio::prelude::*;
//!
//! let config = AggregationConfig::default();
//! let subjects = resolve_comparison_subjects(
//!     SubjectKind::Portfolio,
//!     &["core", "satellite"],
//!     &reference,
//!     Some(&store),
//!     &config,
//! );
//!
//! let categories = all_uop_categories(&subjects);
//! let kpis = comparable_kpis(&subjects, config.min_comparable_subjects);
//! ```
//!
//! ## Module Overview
//!
//! - [`bucketing`] - SDG, use-of-proceeds, geography and currency breakdowns
//! - [`analytics`] - Impact KPI and coverage aggregation
//! - [`comparison`] - Subject resolution and comparability filters
//! - [`types`] - Weighted holdings, breakdown entries, configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod bucketing;
pub mod comparison;
pub mod error;
pub mod types;

pub use error::{EngineError, EngineResult};

pub use types::{
    resolve_holdings, AggregationConfig, BreakdownEntry, CategoryAllocation, ExposureEntry,
    SdgBreakdown, WeightedHolding, UNALLOCATED_CATEGORY,
};

pub use bucketing::{
    bucket_by_country, bucket_by_currency, bucket_by_exposure, bucket_by_sdg, bucket_by_uop,
    total_financed,
};

pub use analytics::{aggregate_impact_kpis, calculate_coverage, AggregatedKpi, CoverageSummary};

pub use comparison::{
    all_sdgs, all_uop_categories, comparable_kpis, resolve_comparison_subjects, BondAdapter,
    ComparableKpi, ComparisonSubject, IssuerAdapter, PortfolioAdapter, PresenceStatus,
    SdgPresence, SubjectAdapter, SubjectKind,
};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use greenlens_portfolio::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{EngineError, EngineResult};

    pub use crate::types::{
        resolve_holdings, AggregationConfig, BreakdownEntry, CategoryAllocation, ExposureEntry,
        SdgBreakdown, WeightedHolding,
    };

    pub use crate::bucketing::{
        bucket_by_country, bucket_by_currency, bucket_by_sdg, bucket_by_uop, total_financed,
    };

    pub use crate::analytics::{
        aggregate_impact_kpis, calculate_coverage, AggregatedKpi, CoverageSummary,
    };

    pub use crate::comparison::{
        all_sdgs, all_uop_categories, comparable_kpis, resolve_comparison_subjects,
        ComparableKpi, ComparisonSubject, PresenceStatus, SdgPresence, SubjectAdapter,
        SubjectKind,
    };

    pub use greenlens_core::prelude::*;
}
