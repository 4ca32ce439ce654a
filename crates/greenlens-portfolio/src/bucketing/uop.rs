//! Use-of-proceeds breakdown.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::types::{
    percentage_of, rank_by_amount, AggregationConfig, CategoryAllocation, WeightedHolding,
    UNALLOCATED_CATEGORY,
};

/// Returns the weighted sum of allocated UoP amounts across holdings.
///
/// This is the capital denominator for normalized KPI values. Unallocated
/// proceeds are not part of it.
#[must_use]
pub fn total_financed(holdings: &[WeightedHolding<'_>]) -> Decimal {
    holdings
        .iter()
        .filter_map(|h| h.esg.map(|esg| esg.total_allocated() * h.weight))
        .sum()
}

/// Aggregates use-of-proceeds categories across holdings.
///
/// Percentages are taken over total proceeds: allocated amounts plus the
/// weighted unallocated residual of each detail. Without a residual the listed
/// percentages close to 100. With a residual they close to the allocated share
/// (e.g. 95), unless `include_unallocated_as_category` is set, in which case the
/// residual is listed as a synthetic [`UNALLOCATED_CATEGORY`] entry.
#[must_use]
pub fn bucket_by_uop(
    holdings: &[WeightedHolding<'_>],
    config: &AggregationConfig,
) -> Vec<CategoryAllocation> {
    let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut unallocated = Decimal::ZERO;

    for h in holdings {
        let Some(esg) = h.esg else { continue };
        for category in &esg.use_of_proceeds {
            *buckets.entry(category.category.clone()).or_default() +=
                category.allocated_amount * h.weight;
        }
        unallocated += esg.unallocated() * h.weight;
    }

    let allocated: Decimal = buckets.values().copied().sum();
    let total = allocated + unallocated;

    let mut entries: Vec<CategoryAllocation> = rank_by_amount(buckets, |amount| *amount)
        .into_iter()
        .map(|(category, amount)| CategoryAllocation {
            category,
            amount,
            percentage: percentage_of(amount, total),
            is_synthetic: false,
        })
        .collect();

    if config.include_unallocated_as_category && unallocated > Decimal::ZERO {
        let synthetic = CategoryAllocation {
            category: UNALLOCATED_CATEGORY.to_string(),
            amount: unallocated,
            percentage: percentage_of(unallocated, total),
            is_synthetic: true,
        };
        let at = entries
            .iter()
            .position(|e| e.amount < unallocated)
            .unwrap_or(entries.len());
        entries.insert(at, synthetic);
    }

    entries
}
