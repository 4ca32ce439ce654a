//! SDG allocation breakdown.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::types::{percentage_of, rank_by_amount, SdgBreakdown, WeightedHolding};

/// Aggregates SDG allocations across holdings.
///
/// Entries are keyed by SDG number; the name is taken from the first holding
/// that reports the goal. Callers that display by goal number can re-sort.
#[must_use]
pub fn bucket_by_sdg(holdings: &[WeightedHolding<'_>]) -> Vec<SdgBreakdown> {
    let mut buckets: BTreeMap<u8, (String, Decimal)> = BTreeMap::new();

    for h in holdings {
        let Some(esg) = h.esg else { continue };
        for sdg in &esg.sdg_allocations {
            let entry = buckets
                .entry(sdg.sdg_number)
                .or_insert_with(|| (sdg.sdg_name.clone(), Decimal::ZERO));
            entry.1 += sdg.allocation_amount * h.weight;
        }
    }

    let total: Decimal = buckets.values().map(|(_, amount)| *amount).sum();

    rank_by_amount(buckets, |(_, amount)| *amount)
        .into_iter()
        .map(|(sdg_number, (sdg_name, amount))| SdgBreakdown {
            sdg_number,
            sdg_name,
            amount,
            percentage: percentage_of(amount, total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenlens_core::{Bond, BondEsgDetail, SdgAllocation};
    use rust_decimal_macros::dec;

    fn bond(id: &str) -> Bond {
        Bond {
            id: id.into(),
            isin: format!("XS00000000{id}"),
            name: format!("Bond {id}"),
            issuer: "Issuer".into(),
            country: "NL".into(),
            sector: "Financial".into(),
            currency: "EUR".into(),
            outstanding_amount: dec!(1_000),
            coupon: None,
            issue_date: None,
            maturity_date: None,
            is_green: true,
            is_sustainability: false,
            is_climate_aligned: false,
            credit_rating: None,
        }
    }

    fn sdg(number: u8, name: &str, amount: Decimal) -> SdgAllocation {
        SdgAllocation {
            sdg_number: number,
            sdg_name: name.into(),
            allocation_amount: amount,
            allocation_percentage: 0.0,
        }
    }

    #[test]
    fn test_bucket_by_sdg_empty() {
        assert!(bucket_by_sdg(&[]).is_empty());
    }

    #[test]
    fn test_bucket_by_sdg_weighted() {
        let b1 = bond("1");
        let b2 = bond("2");
        let mut e1 = BondEsgDetail::new("1");
        e1.sdg_allocations = vec![sdg(7, "Clean Energy", dec!(600)), sdg(13, "Climate", dec!(400))];
        let mut e2 = BondEsgDetail::new("2");
        e2.sdg_allocations = vec![sdg(7, "Clean Energy", dec!(200))];

        let holdings = vec![
            WeightedHolding::weighted(&b1, Some(&e1), dec!(0.5)),
            WeightedHolding::weighted(&b2, Some(&e2), dec!(1)),
        ];
        let dist = bucket_by_sdg(&holdings);

        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].sdg_number, 7);
        assert_eq!(dist[0].amount, dec!(500));
        assert!((dist[0].percentage - 500.0 / 700.0 * 100.0).abs() < 1e-9);
        assert_eq!(dist[1].sdg_number, 13);
        assert_eq!(dist[1].amount, dec!(200));
    }

    #[test]
    fn test_bucket_by_sdg_all_zero() {
        let b1 = bond("1");
        let mut e1 = BondEsgDetail::new("1");
        e1.sdg_allocations = vec![sdg(6, "Water", Decimal::ZERO), sdg(11, "Cities", Decimal::ZERO)];
        let holdings = vec![WeightedHolding::full(&b1, Some(&e1))];

        let dist = bucket_by_sdg(&holdings);
        assert_eq!(dist.len(), 2);
        assert!(dist.iter().all(|d| d.percentage == 0.0));
    }

    #[test]
    fn test_holding_without_esg_contributes_nothing() {
        let b1 = bond("1");
        let holdings = vec![WeightedHolding::full(&b1, None)];
        assert!(bucket_by_sdg(&holdings).is_empty());
    }
}
