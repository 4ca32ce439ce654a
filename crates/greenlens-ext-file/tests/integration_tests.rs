//! Integration tests for greenlens-ext-file against the demo dataset.

use greenlens_core::{PortfolioSource, ReferenceSource};
use greenlens_ext_file::{
    breakdown_to_csv, kpis_to_csv, load_dataset, subjects_to_csv, Dataset, ABSENT, UTF8_BOM,
};
use greenlens_portfolio::prelude::*;

const DEMO: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/greenlens-demo.json");

fn demo() -> (ReferenceData, InMemoryPortfolioStore) {
    load_dataset(DEMO).expect("demo dataset should load")
}

#[test]
fn test_demo_dataset_loads() {
    let (reference, store) = demo();

    assert_eq!(reference.bonds.len(), 5);
    assert_eq!(reference.esg_details.len(), 4);
    assert!(reference.esg_detail("4").is_none());
    assert_eq!(reference.bonds_for_issuer("European Investment Bank").len(), 2);
    assert_eq!(store.portfolios().len(), 2);
    assert_eq!(store.watchlists().len(), 1);
    assert_eq!(store.portfolio("p-core").unwrap().holding_count(), 2);
}

#[test]
fn test_kpi_values_resolved_at_load() {
    let (reference, _) = demo();

    let detail = reference.esg_detail("1").unwrap();
    let floor_area = detail
        .category_kpis()
        .find(|k| k.name == "Floor area certified")
        .unwrap();
    assert!(!floor_area.value.is_numeric());

    let capacity = detail
        .category_kpis()
        .find(|k| k.unit == "MW")
        .unwrap();
    assert_eq!(capacity.value.as_f64(), Some(850.0));
}

#[test]
fn test_demo_bond_matches_reported_allocation() {
    let (reference, _) = demo();
    let subjects = resolve_comparison_subjects(
        SubjectKind::Bond,
        &["1"],
        &reference,
        None,
        &AggregationConfig::default(),
    );

    let uop: Vec<_> = subjects[0]
        .uop_allocation
        .iter()
        .map(|c| (c.category.as_str(), c.percentage.round()))
        .collect();
    assert_eq!(
        uop,
        vec![
            ("Renewable Energy", 50.0),
            ("Clean Transportation", 30.0),
            ("Green Buildings", 15.0),
        ]
    );
}

#[test]
fn test_subjects_csv() {
    let (reference, store) = demo();
    let subjects = resolve_comparison_subjects(
        SubjectKind::Portfolio,
        &["p-core", "p-wide"],
        &reference,
        Some(&store),
        &AggregationConfig::default(),
    );

    let csv = subjects_to_csv(&subjects, 2).unwrap();
    assert!(csv.starts_with(UTF8_BOM));

    let lines: Vec<&str> = csv.trim_start_matches(UTF8_BOM).lines().collect();
    assert_eq!(lines.len(), 3);

    let header: Vec<&str> = lines[0].split(',').collect();
    assert_eq!(header[0], "Subject");
    assert!(header.contains(&"UoP: Energy Efficiency (%)"));
    assert!(header.contains(&"GHG emissions avoided (tCO2e/year)"));

    // Energy Efficiency is only financed through bond '3' in p-core
    let column = header
        .iter()
        .position(|h| *h == "UoP: Energy Efficiency (%)")
        .unwrap();
    let wide: Vec<&str> = lines[2].split(',').collect();
    assert_eq!(wide[0], "Wide");
    assert_eq!(wide[column], ABSENT);
}

#[test]
fn test_breakdown_and_kpi_csv() {
    let (reference, store) = demo();
    let subject = resolve_comparison_subjects(
        SubjectKind::Portfolio,
        &["p-core"],
        &reference,
        Some(&store),
        &AggregationConfig::default(),
    )
    .remove(0);

    let sdg = breakdown_to_csv(&subject.sdg_allocation).unwrap();
    let first_row = sdg.lines().nth(1).unwrap();
    assert!(first_row.starts_with("SDG 7: Affordable and Clean Energy,1740000000,"));

    let kpis = kpis_to_csv(&subject.impact_kpis).unwrap();
    assert!(kpis.contains("IFI Harmonised Framework"));
    assert!(!kpis.contains("Households supplied"));
}

#[test]
fn test_roundtrip_preserves_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("copy.json");

    let original = Dataset::load(DEMO).unwrap();
    original.save(&path).unwrap();
    let copy = Dataset::load(&path).unwrap();

    assert_eq!(copy.bonds, original.bonds);
    assert_eq!(copy.portfolios, original.portfolios);
}
