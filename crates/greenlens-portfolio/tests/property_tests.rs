//! Property-based tests for aggregation invariants.
//!
//! These tests verify properties that should hold for any reference set:
//! - Breakdown percentages close to 100 whenever the total is positive
//! - Empty or all-zero inputs yield percentages of exactly zero
//! - Scaling every portfolio weight scales amounts and leaves percentages alone
//! - Resolution is deterministic
//! - A KPI is comparable iff enough distinct subjects report it

mod common;

use std::collections::{BTreeMap, BTreeSet};

use greenlens_portfolio::prelude::*;
use proptest::prelude::*;

// =============================================================================
// GENERATORS
// =============================================================================

const CATEGORIES: [&str; 4] = [
    "Renewable Energy",
    "Clean Transportation",
    "Green Buildings",
    "Water Management",
];
const KPI_NAMES: [&str; 3] = ["GHG emissions avoided", "Energy saved", "Capacity"];
const KPI_UNITS: [&str; 2] = ["t", "MWh"];
const CURRENCIES: [&str; 3] = ["EUR", "USD", "GBP"];
const COUNTRIES: [&str; 3] = ["DE", "FR", "US"];

#[derive(Debug, Clone)]
struct BondSpec {
    outstanding: u32,
    currency: usize,
    country: usize,
    esg: Option<EsgSpec>,
}

#[derive(Debug, Clone)]
struct EsgSpec {
    uop: Vec<(usize, u32)>,
    sdgs: Vec<(u8, u32)>,
    kpis: Vec<(usize, usize, u32)>,
    unallocated: u32,
}

fn arb_esg(max_amount: u32) -> impl Strategy<Value = EsgSpec> {
    (
        prop::collection::vec((0..CATEGORIES.len(), 0..=max_amount), 0..4),
        prop::collection::vec((1u8..=17, 0..=max_amount), 0..4),
        prop::collection::vec((0..KPI_NAMES.len(), 0..KPI_UNITS.len(), 0u32..1_000), 0..4),
        0..=max_amount,
    )
        .prop_map(|(uop, sdgs, kpis, unallocated)| EsgSpec {
            uop,
            sdgs,
            kpis,
            unallocated,
        })
}

fn arb_bond(max_amount: u32) -> impl Strategy<Value = BondSpec> {
    (
        0..=max_amount,
        0..CURRENCIES.len(),
        0..COUNTRIES.len(),
        prop::option::of(arb_esg(max_amount)),
    )
        .prop_map(|(outstanding, currency, country, esg)| BondSpec {
            outstanding,
            currency,
            country,
            esg,
        })
}

fn arb_bonds(max_amount: u32) -> impl Strategy<Value = Vec<BondSpec>> {
    prop::collection::vec(arb_bond(max_amount), 1..6)
}

fn build_reference(specs: &[BondSpec]) -> ReferenceData {
    let mut bonds = Vec::new();
    let mut details = Vec::new();

    for (i, spec) in specs.iter().enumerate() {
        let id = i.to_string();
        bonds.push(common::bond(
            &id,
            &format!("Bond {i}"),
            "Issuer",
            COUNTRIES[spec.country],
            CURRENCIES[spec.currency],
            Decimal::from(spec.outstanding),
        ));

        if let Some(esg) = &spec.esg {
            let mut detail = BondEsgDetail::new(&id);
            detail.use_of_proceeds = esg
                .uop
                .iter()
                .enumerate()
                .map(|(j, (cat, amount))| {
                    let kpis = if j == 0 {
                        esg.kpis
                            .iter()
                            .map(|(n, u, v)| {
                                ImpactKpi::new(KPI_NAMES[*n], f64::from(*v), KPI_UNITS[*u])
                            })
                            .collect()
                    } else {
                        vec![]
                    };
                    common::category(CATEGORIES[*cat], Decimal::from(*amount), 0.0, kpis)
                })
                .collect();
            detail.sdg_allocations = esg
                .sdgs
                .iter()
                .map(|(n, amount)| common::sdg(*n, &format!("Goal {n}"), Decimal::from(*amount)))
                .collect();
            detail.unallocated_amount = Some(Decimal::from(esg.unallocated));
            details.push(detail);
        }
    }

    ReferenceData::from_records(bonds, details, vec![])
}

fn portfolio_store(count: usize, weights: &[u32], scale: u32) -> InMemoryPortfolioStore {
    let mut portfolio = Portfolio::new("p", "Generated");
    for i in 0..count {
        let weight = weights.get(i).copied().unwrap_or(100) * scale;
        portfolio = portfolio.with_holding(
            PortfolioHolding::new(i.to_string()).with_weight(Decimal::from(weight)),
        );
    }
    let mut store = InMemoryPortfolioStore::new();
    store.insert_portfolio(portfolio).unwrap();
    store
}

fn resolve_portfolio(
    reference: &ReferenceData,
    store: &InMemoryPortfolioStore,
    config: &AggregationConfig,
) -> ComparisonSubject {
    resolve_comparison_subjects(SubjectKind::Portfolio, &["p"], reference, Some(store), config)
        .remove(0)
}

fn assert_closure<E: BreakdownEntry>(entries: &[E]) -> Result<(), TestCaseError> {
    let total: Decimal = entries.iter().map(BreakdownEntry::amount).sum();
    let sum: f64 = entries.iter().map(BreakdownEntry::percentage).sum();
    if total > Decimal::ZERO {
        prop_assert!((sum - 100.0).abs() < 1e-6, "percentages sum to {sum}");
    } else {
        prop_assert!(entries.iter().all(|e| e.percentage() == 0.0));
    }
    Ok(())
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every breakdown closes to 100 when its total is positive. The UoP
    /// breakdown closes only when the residual is listed.
    #[test]
    fn prop_percentage_closure(
        specs in arb_bonds(10_000),
        weights in prop::collection::vec(0u32..200, 0..6),
    ) {
        let reference = build_reference(&specs);
        let store = portfolio_store(specs.len(), &weights, 1);
        let config = AggregationConfig::new().with_unallocated_category(true);
        let subject = resolve_portfolio(&reference, &store, &config);

        assert_closure(&subject.sdg_allocation)?;
        assert_closure(&subject.uop_allocation)?;
        assert_closure(&subject.geography)?;
        assert_closure(&subject.currency_exposure)?;
    }

    /// All-zero amounts never produce NaN.
    #[test]
    fn prop_zero_safety(specs in arb_bonds(0)) {
        let reference = build_reference(&specs);
        let store = portfolio_store(specs.len(), &[], 1);
        let subject = resolve_portfolio(&reference, &store, &AggregationConfig::default());

        for e in &subject.sdg_allocation {
            prop_assert_eq!(e.percentage, 0.0);
        }
        for e in &subject.uop_allocation {
            prop_assert_eq!(e.percentage, 0.0);
        }
        for e in subject.geography.iter().chain(&subject.currency_exposure) {
            prop_assert_eq!(e.percentage, 0.0);
        }
        for k in &subject.impact_kpis {
            prop_assert_eq!(k.normalized_value, 0.0);
        }
        prop_assert!(!subject.coverage.framework_pct().is_nan());
    }

    /// Scaling every weight by k scales amounts by k; percentages stay put.
    #[test]
    fn prop_weight_linearity(
        specs in arb_bonds(10_000),
        weights in prop::collection::vec(1u32..100, 6),
        k in 2u32..5,
    ) {
        let reference = build_reference(&specs);
        let config = AggregationConfig::default();
        let base = resolve_portfolio(&reference, &portfolio_store(specs.len(), &weights, 1), &config);
        let scaled = resolve_portfolio(&reference, &portfolio_store(specs.len(), &weights, k), &config);
        let factor = Decimal::from(k);

        prop_assert_eq!(base.sdg_allocation.len(), scaled.sdg_allocation.len());
        for (a, b) in base.sdg_allocation.iter().zip(&scaled.sdg_allocation) {
            let b = scaled.sdg_for(a.sdg_number).unwrap_or(b);
            prop_assert_eq!(a.amount * factor, b.amount);
            prop_assert!((a.percentage - b.percentage).abs() < 1e-9);
        }
        for a in &base.uop_allocation {
            let b = scaled.uop_for(&a.category).unwrap();
            prop_assert_eq!(a.amount * factor, b.amount);
            prop_assert!((a.percentage - b.percentage).abs() < 1e-9);
        }
        for (a, b) in base.geography.iter().zip(&scaled.geography) {
            prop_assert_eq!(&a.key, &b.key);
            prop_assert_eq!(a.amount * factor, b.amount);
        }
        prop_assert_eq!(base.total_financed * factor, scaled.total_financed);
        prop_assert_eq!(base.total_issuance, scaled.total_issuance);
    }

    /// Identical inputs give identical outputs.
    #[test]
    fn prop_determinism(specs in arb_bonds(10_000)) {
        let reference = build_reference(&specs);
        let ids: Vec<String> = (0..specs.len()).map(|i| i.to_string()).collect();
        let config = AggregationConfig::new().with_unallocated_category(true);

        let first = resolve_comparison_subjects(SubjectKind::Bond, &ids[..], &reference, None, &config);
        let second = resolve_comparison_subjects(SubjectKind::Bond, &ids[..], &reference, None, &config);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(comparable_kpis(&first, 2), comparable_kpis(&second, 2));
        prop_assert_eq!(all_sdgs(&first), all_sdgs(&second));
    }

    /// A KPI key is comparable iff at least two distinct subjects report it,
    /// and dropping a subject never adds keys.
    #[test]
    fn prop_kpi_comparability_symmetry(specs in arb_bonds(10_000)) {
        let reference = build_reference(&specs);
        let ids: Vec<String> = (0..specs.len()).map(|i| i.to_string()).collect();
        let subjects = resolve_comparison_subjects(
            SubjectKind::Bond, &ids[..], &reference, None, &AggregationConfig::default(),
        );

        let mut presence: BTreeMap<(String, String), usize> = BTreeMap::new();
        for s in &subjects {
            let keys: BTreeSet<_> = s.impact_kpis.iter().map(|k| (k.name.clone(), k.unit.clone())).collect();
            for key in keys {
                *presence.entry(key).or_default() += 1;
            }
        }

        let comparable: BTreeSet<_> = comparable_kpis(&subjects, 2)
            .into_iter()
            .map(|k| (k.name, k.unit))
            .collect();
        let expected: BTreeSet<_> = presence
            .iter()
            .filter(|(_, count)| **count >= 2)
            .map(|(key, _)| key.clone())
            .collect();
        prop_assert_eq!(&comparable, &expected);

        if !subjects.is_empty() {
            let fewer: BTreeSet<_> = comparable_kpis(&subjects[1..], 2)
                .into_iter()
                .map(|k| (k.name, k.unit))
                .collect();
            prop_assert!(fewer.is_subset(&comparable));
        }
    }
}
