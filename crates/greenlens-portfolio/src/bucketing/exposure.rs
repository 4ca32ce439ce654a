//! Geography and currency exposure.
//!
//! Exposure reads the bond record, not ESG detail, so bonds without ESG data
//! still count.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::types::{percentage_of, rank_by_amount, ExposureEntry, WeightedHolding};

/// Buckets weighted outstanding amounts by country.
#[must_use]
pub fn bucket_by_country(holdings: &[WeightedHolding<'_>]) -> Vec<ExposureEntry> {
    bucket_by_exposure(holdings, |h| h.bond.country.clone())
}

/// Buckets weighted outstanding amounts by currency label.
///
/// Amounts in different currencies are summed as-is; no FX conversion applies.
#[must_use]
pub fn bucket_by_currency(holdings: &[WeightedHolding<'_>]) -> Vec<ExposureEntry> {
    bucket_by_exposure(holdings, |h| h.bond.currency.clone())
}

/// Generic exposure bucketing by a classifier function.
///
/// # Example
///
/// ```rust,ignore
/// // Exposure by sector
/// let by_sector = bucket_by_exposure(&holdings, |h| h.bond.sector.clone());
/// ```
#[must_use]
pub fn bucket_by_exposure<F>(holdings: &[WeightedHolding<'_>], classifier: F) -> Vec<ExposureEntry>
where
    F: Fn(&WeightedHolding<'_>) -> String,
{
    let mut buckets: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();
    for h in holdings {
        let entry = buckets.entry(classifier(h)).or_default();
        entry.0 += h.weighted_outstanding();
        entry.1 += 1;
    }

    let total: Decimal = buckets.values().map(|(amount, _)| *amount).sum();

    rank_by_amount(buckets, |(amount, _)| *amount)
        .into_iter()
        .map(|(key, (amount, bond_count))| ExposureEntry {
            key,
            amount,
            percentage: percentage_of(amount, total),
            bond_count,
        })
        .collect()
}
