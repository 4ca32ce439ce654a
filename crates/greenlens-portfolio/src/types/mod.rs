//! Domain types for ESG aggregation.
//!
//! This module provides:
//!
//! - [`WeightedHolding`]: A resolved bond with its optional ESG detail and weight fraction
//! - [`SdgBreakdown`], [`CategoryAllocation`], [`ExposureEntry`]: Breakdown entries
//! - [`AggregationConfig`]: Configuration for aggregation and comparison

mod breakdown;
mod config;
mod holding;

pub use breakdown::{
    BreakdownEntry, CategoryAllocation, ExposureEntry, SdgBreakdown, UNALLOCATED_CATEGORY,
};
pub(crate) use breakdown::{percentage_of, rank_by_amount};
pub use config::AggregationConfig;
pub use holding::{resolve_holdings, WeightedHolding};
