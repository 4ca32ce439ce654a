//! KPI and coverage aggregation.
//!
//! - [`aggregate_impact_kpis`]: groups impact KPIs by name and unit, sums them
//!   and normalizes per unit of capital financed
//! - [`calculate_coverage`]: documentation and review completeness

mod coverage;
mod kpi;

pub use coverage::*;
pub use kpi::*;
