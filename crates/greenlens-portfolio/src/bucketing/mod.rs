//! Aggregation primitives.
//!
//! Four independent reducers over a list of [`WeightedHolding`]s:
//!
//! - **SDG**: allocation by Sustainable Development Goal
//! - **Use of proceeds**: allocation by ICMA category
//! - **Geography**: outstanding exposure by country
//! - **Currency**: outstanding exposure by currency label
//!
//! Each entry's amount is the sum of `amount × weight` over holdings sharing the
//! key, its percentage is that amount over the breakdown total, and entries come
//! out largest first. A zero total gives every entry a percentage of exactly 0.
//!
//! A holding without ESG detail contributes nothing to SDG and UoP breakdowns
//! but still counts for geography and currency, which read the bond record.
//!
//! [`WeightedHolding`]: crate::types::WeightedHolding

mod exposure;
mod sdg;
mod uop;

pub use exposure::*;
pub use sdg::*;
pub use uop::*;
