//! Shared reference fixture for engine integration and property tests.

#![allow(dead_code)]

use greenlens_core::prelude::*;

// =============================================================================
// BUILDERS
// =============================================================================

pub fn bond(
    id: &str,
    name: &str,
    issuer: &str,
    country: &str,
    currency: &str,
    outstanding: Decimal,
) -> Bond {
    Bond {
        id: id.into(),
        isin: format!("XS{:0>10}", id),
        name: name.into(),
        issuer: issuer.into(),
        country: country.into(),
        sector: "Financial".into(),
        currency: currency.into(),
        outstanding_amount: outstanding,
        coupon: None,
        issue_date: None,
        maturity_date: None,
        is_green: true,
        is_sustainability: false,
        is_climate_aligned: true,
        credit_rating: Some("AAA".into()),
    }
}

pub fn category(
    name: &str,
    amount: Decimal,
    pct: f64,
    kpis: Vec<ImpactKpi>,
) -> UseOfProceedsCategory {
    UseOfProceedsCategory {
        category: name.into(),
        allocated_amount: amount,
        allocated_percentage: pct,
        projects: vec![],
        impact_kpis: kpis,
    }
}

pub fn sdg(number: u8, name: &str, amount: Decimal) -> SdgAllocation {
    SdgAllocation {
        sdg_number: number,
        sdg_name: name.into(),
        allocation_amount: amount,
        allocation_percentage: 0.0,
    }
}

pub fn document(title: &str, kind: DocumentKind) -> EsgDocument {
    EsgDocument {
        title: title.into(),
        kind,
        date: None,
        url: None,
    }
}

pub fn spo(provider: &str) -> ExternalReview {
    ExternalReview {
        provider: provider.into(),
        kind: ReviewKind::Spo,
        date: None,
        opinion: Some("Dark Green".into()),
    }
}

// =============================================================================
// FIXTURE
// =============================================================================

/// EIB Climate Awareness Bond: 5bn EUR, 95% allocated, 5% residual.
pub fn eib_detail() -> BondEsgDetail {
    let mut d = BondEsgDetail::new("1");
    d.use_of_proceeds = vec![
        category(
            "Renewable Energy",
            dec!(2_500_000_000),
            50.0,
            vec![
                ImpactKpi::new("GHG emissions avoided", 1_200_000.0, "tCO2e/year"),
                ImpactKpi::new("Renewable capacity installed", 850.0, "MW"),
            ],
        ),
        category(
            "Clean Transportation",
            dec!(1_500_000_000),
            30.0,
            vec![ImpactKpi::new("GHG emissions avoided", 300_000.0, "tCO2e/year")],
        ),
        category(
            "Green Buildings",
            dec!(750_000_000),
            15.0,
            vec![ImpactKpi::new("Floor area certified", 120_000.0, "m2")],
        ),
    ];
    d.unallocated_amount = Some(dec!(250_000_000));
    d.unallocated_percentage = Some(5.0);
    d.sdg_allocations = vec![
        sdg(7, "Affordable and Clean Energy", dec!(2_500_000_000)),
        sdg(11, "Sustainable Cities and Communities", dec!(750_000_000)),
        sdg(13, "Climate Action", dec!(1_500_000_000)),
    ];
    d.frameworks = vec!["EIB CAB Framework".into(), "EU GBS".into()];
    d.external_reviews = vec![spo("Cicero")];
    d.documents = vec![
        document("CAB Framework", DocumentKind::Framework),
        document("CAB Impact Report 2023", DocumentKind::ImpactReport),
        document("CAB Allocation Report 2023", DocumentKind::AllocationReport),
    ];
    d.data_provenance.completeness = 95.0;
    d
}

pub fn kfw_detail() -> BondEsgDetail {
    let mut d = BondEsgDetail::new("2");
    d.use_of_proceeds = vec![
        category(
            "Renewable Energy",
            dec!(2_000_000_000),
            66.67,
            vec![ImpactKpi::new("GHG emissions avoided", 500_000.0, "tCO2e/year")],
        ),
        category("Green Buildings", dec!(1_000_000_000), 33.33, vec![]),
    ];
    d.sdg_allocations = vec![
        sdg(7, "Affordable and Clean Energy", dec!(2_000_000_000)),
        sdg(11, "Sustainable Cities and Communities", dec!(1_000_000_000)),
    ];
    d.frameworks = vec!["KfW Green Bond Framework".into(), "EU GBS".into()];
    d.external_reviews = vec![spo("ISS ESG")];
    d.documents = vec![document("KfW Framework", DocumentKind::Framework)];
    d.data_provenance.completeness = 85.0;
    d
}

pub fn orsted_detail() -> BondEsgDetail {
    let mut d = BondEsgDetail::new("3");
    let mut pending = ImpactKpi::new("Households supplied", 0.0, "households");
    pending.value = KpiValue::parse("pending");
    d.use_of_proceeds = vec![
        category(
            "Renewable Energy",
            dec!(600_000_000),
            75.0,
            vec![
                ImpactKpi::new("GHG emissions avoided", 400_000.0, "tCO2e/year"),
                ImpactKpi::new("Renewable capacity installed", 1.1, "GW"),
                pending,
            ],
        ),
        category("Energy Efficiency", dec!(200_000_000), 25.0, vec![]),
    ];
    d.sdg_allocations = vec![sdg(7, "Affordable and Clean Energy", dec!(600_000_000))];
    d.external_reviews = vec![spo("Cicero")];
    d.documents = vec![document("Green Finance Framework", DocumentKind::Framework)];
    d.data_provenance.completeness = 70.0;
    d
}

pub fn eib_usd_detail() -> BondEsgDetail {
    let mut d = BondEsgDetail::new("5");
    d.use_of_proceeds = vec![category(
        "Renewable Energy",
        dec!(1_000_000_000),
        100.0,
        vec![ImpactKpi::new("GHG emissions avoided", 200_000.0, "tCO2e/year")],
    )];
    d.sdg_allocations = vec![sdg(7, "Affordable and Clean Energy", dec!(1_000_000_000))];
    d.data_provenance.completeness = 60.0;
    d
}

pub const EIB: &str = "European Investment Bank";

/// Five bonds, four with ESG detail, two issuer records.
pub fn reference() -> ReferenceData {
    ReferenceData::from_records(
        vec![
            bond("1", "EIB Climate Awareness Bond 2030", EIB, "LU", "EUR", dec!(5_000_000_000)),
            bond("2", "KfW Green Bond 2029", "KfW", "DE", "EUR", dec!(3_000_000_000)),
            bond("3", "Ørsted Green Bond 2031", "Ørsted", "DK", "EUR", dec!(1_200_000_000)),
            bond("4", "Apple Green Bond 2027", "Apple", "US", "USD", dec!(1_000_000_000)),
            bond("5", "EIB Climate Awareness Bond 2028 USD", EIB, "LU", "USD", dec!(2_000_000_000)),
        ],
        vec![eib_detail(), kfw_detail(), orsted_detail(), eib_usd_detail()],
        vec![
            Issuer {
                name: EIB.into(),
                country: "LU".into(),
                sector: "Supranational".into(),
                total_sustainable_issuance: dec!(7_000_000_000),
                currency: "EUR".into(),
                frameworks: vec!["EIB CAB Framework".into()],
            },
            Issuer {
                name: "KfW".into(),
                country: "DE".into(),
                sector: "Agency".into(),
                total_sustainable_issuance: dec!(3_000_000_000),
                currency: "EUR".into(),
                frameworks: vec![],
            },
        ],
    )
}

/// Store with the 60/40 portfolio of bonds '1' and '3'.
pub fn store() -> InMemoryPortfolioStore {
    let mut store = InMemoryPortfolioStore::new();
    store
        .insert_portfolio(
            Portfolio::new("p-core", "Core Green")
                .with_holding(PortfolioHolding::new("1").with_weight(dec!(60)))
                .with_holding(PortfolioHolding::new("3").with_weight(dec!(40))),
        )
        .unwrap();
    store
        .insert_portfolio(
            Portfolio::new("p-wide", "Wide")
                .with_holding(PortfolioHolding::new("2"))
                .with_holding(PortfolioHolding::new("4"))
                .with_holding(PortfolioHolding::new("5").with_weight(dec!(25)))
                .with_holding(PortfolioHolding::new("retired-bond")),
        )
        .unwrap();
    store
}
