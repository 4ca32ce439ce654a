//! Breakdown entries produced by the aggregation primitives.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Name of the synthetic use-of-proceeds category for unallocated proceeds.
pub const UNALLOCATED_CATEGORY: &str = "Unallocated";

/// Common view over breakdown entries.
pub trait BreakdownEntry {
    /// Returns the bucket label.
    fn label(&self) -> String;

    /// Returns the weighted amount.
    fn amount(&self) -> Decimal;

    /// Returns the share of the breakdown total (0-100).
    fn percentage(&self) -> f64;
}

/// One SDG in an SDG breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdgBreakdown {
    /// SDG number (1-17).
    pub sdg_number: u8,

    /// SDG name.
    pub sdg_name: String,

    /// Weighted allocation amount.
    pub amount: Decimal,

    /// Share of all SDG amounts (0-100).
    pub percentage: f64,
}

impl BreakdownEntry for SdgBreakdown {
    fn label(&self) -> String {
        format!("SDG {}: {}", self.sdg_number, self.sdg_name)
    }

    fn amount(&self) -> Decimal {
        self.amount
    }

    fn percentage(&self) -> f64 {
        self.percentage
    }
}

/// One category in a use-of-proceeds breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    /// Category name.
    pub category: String,

    /// Weighted allocated amount.
    pub amount: Decimal,

    /// Share of total proceeds (0-100).
    pub percentage: f64,

    /// True for the synthetic [`UNALLOCATED_CATEGORY`] entry.
    pub is_synthetic: bool,
}

impl BreakdownEntry for CategoryAllocation {
    fn label(&self) -> String {
        self.category.clone()
    }

    fn amount(&self) -> Decimal {
        self.amount
    }

    fn percentage(&self) -> f64 {
        self.percentage
    }
}

/// One bucket in a geography or currency exposure breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureEntry {
    /// Country or currency label.
    pub key: String,

    /// Weighted outstanding amount.
    pub amount: Decimal,

    /// Share of total exposure (0-100).
    pub percentage: f64,

    /// Number of bonds in the bucket.
    pub bond_count: usize,
}

impl BreakdownEntry for ExposureEntry {
    fn label(&self) -> String {
        self.key.clone()
    }

    fn amount(&self) -> Decimal {
        self.amount
    }

    fn percentage(&self) -> f64 {
        self.percentage
    }
}

/// Returns `amount / total * 100`, or exactly 0 when the total is zero.
pub(crate) fn percentage_of(amount: Decimal, total: Decimal) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (amount / total * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
}

/// Orders accumulated amounts by amount descending.
///
/// Ties keep key order, so the result is deterministic.
pub(crate) fn rank_by_amount<K: Ord, V>(
    buckets: BTreeMap<K, V>,
    amount: impl Fn(&V) -> Decimal,
) -> Vec<(K, V)> {
    let mut ranked: Vec<(K, V)> = buckets.into_iter().collect();
    ranked.sort_by(|a, b| amount(&b.1).cmp(&amount(&a.1)));
    ranked
}
