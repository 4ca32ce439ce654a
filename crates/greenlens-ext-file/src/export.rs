//! CSV export of resolved subjects and breakdowns.
//!
//! Output starts with a UTF-8 byte order mark so spreadsheet tools pick the
//! right encoding. A field is quoted only when it contains a comma, a quote or
//! a line break; embedded quotes are doubled.

use greenlens_portfolio::{
    all_sdgs, all_uop_categories, comparable_kpis, AggregatedKpi, BreakdownEntry,
    ComparisonSubject,
};
use rust_decimal::Decimal;

use crate::error::{FileError, FileResult};

/// UTF-8 byte order mark.
pub const UTF8_BOM: &str = "\u{feff}";

/// Placeholder for a value a subject does not report.
pub const ABSENT: &str = "—";

fn write_csv(header: &[String], rows: &[Vec<String>]) -> FileResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(header).map_err(FileError::csv)?;
    for row in rows {
        writer.write_record(row).map_err(FileError::csv)?;
    }

    let bytes = writer.into_inner().map_err(FileError::csv)?;
    let body = String::from_utf8(bytes).map_err(FileError::csv)?;
    Ok(format!("{UTF8_BOM}{body}"))
}

fn amount(value: Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}

fn pct(value: f64) -> String {
    format!("{value:.2}")
}

fn number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        rounded.to_string()
    }
}

/// Flattens subjects into one comparison table.
///
/// One row per subject. Summary columns come first, then one column per
/// use-of-proceeds category and per SDG present in any subject, then one column
/// per KPI reported by at least `min_comparable_subjects` subjects. Absent
/// values are written as [`ABSENT`].
///
/// # Errors
///
/// Returns [`FileError::Csv`] if serialization fails.
pub fn subjects_to_csv(
    subjects: &[ComparisonSubject],
    min_comparable_subjects: usize,
) -> FileResult<String> {
    let categories = all_uop_categories(subjects);
    let sdgs = all_sdgs(subjects);
    let kpis = comparable_kpis(subjects, min_comparable_subjects);

    let mut header: Vec<String> = [
        "Subject",
        "Type",
        "Details",
        "Currency",
        "Bonds",
        "Total Issuance",
        "Total Financed",
        "Avg Completeness",
        "Framework Docs",
        "SPO Reviews",
        "Impact Reports",
        "Allocation Reports",
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    header.extend(categories.iter().map(|c| format!("UoP: {c} (%)")));
    header.extend(
        sdgs.iter()
            .map(|s| format!("SDG {}: {} (%)", s.sdg_number, s.sdg_name)),
    );
    header.extend(kpis.iter().map(|k| format!("{} ({})", k.name, k.unit)));

    let rows: Vec<Vec<String>> = subjects
        .iter()
        .map(|s| {
            let mut row = vec![
                s.label.clone(),
                s.kind.to_string(),
                s.sub_label.clone().unwrap_or_else(|| ABSENT.to_string()),
                s.currency.clone(),
                s.bond_count.to_string(),
                amount(s.total_issuance),
                amount(s.total_financed),
                s.coverage.avg_completeness.to_string(),
                s.coverage.framework_documents.to_string(),
                s.coverage.spo_reviews.to_string(),
                s.coverage.impact_reports.to_string(),
                s.coverage.allocation_reports.to_string(),
            ];
            row.extend(categories.iter().map(|c| {
                s.uop_for(c)
                    .map_or_else(|| ABSENT.to_string(), |e| pct(e.percentage))
            }));
            row.extend(sdgs.iter().map(|sdg| {
                s.sdg_for(sdg.sdg_number)
                    .map_or_else(|| ABSENT.to_string(), |e| pct(e.percentage))
            }));
            row.extend(kpis.iter().map(|k| {
                s.kpi_for(&k.name, &k.unit)
                    .map_or_else(|| ABSENT.to_string(), |v| number(v.total_value))
            }));
            row
        })
        .collect();

    write_csv(&header, &rows)
}

/// Writes any breakdown as a label/amount/percentage table.
///
/// # Errors
///
/// Returns [`FileError::Csv`] if serialization fails.
pub fn breakdown_to_csv<E: BreakdownEntry>(entries: &[E]) -> FileResult<String> {
    let header = vec![
        "Label".to_string(),
        "Amount".to_string(),
        "Percentage".to_string(),
    ];
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| vec![e.label(), amount(e.amount()), pct(e.percentage())])
        .collect();
    write_csv(&header, &rows)
}

/// Writes aggregated KPIs, raw and normalized.
///
/// # Errors
///
/// Returns [`FileError::Csv`] if serialization fails.
pub fn kpis_to_csv(kpis: &[AggregatedKpi]) -> FileResult<String> {
    let header: Vec<String> = [
        "KPI",
        "Unit",
        "Total",
        "Per 1M Financed",
        "Reports",
        "Methodology",
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    let rows: Vec<Vec<String>> = kpis
        .iter()
        .map(|k| {
            vec![
                k.name.clone(),
                k.unit.clone(),
                number(k.total_value),
                number(k.normalized_value),
                k.bond_count.to_string(),
                k.methodology.clone().unwrap_or_else(|| ABSENT.to_string()),
            ]
        })
        .collect();
    write_csv(&header, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenlens_portfolio::{CategoryAllocation, ExposureEntry};
    use rust_decimal_macros::dec;

    #[test]
    fn test_bom_and_header() {
        let csv = breakdown_to_csv::<ExposureEntry>(&[]).unwrap();
        assert!(csv.starts_with(UTF8_BOM));
        assert_eq!(csv.trim_start_matches(UTF8_BOM).trim_end(), "Label,Amount,Percentage");
    }

    #[test]
    fn test_quoting_only_when_needed() {
        let entries = vec![
            CategoryAllocation {
                category: "Water, Waste \"Circular\"".into(),
                amount: dec!(1_500.456),
                percentage: 75.0,
                is_synthetic: false,
            },
            CategoryAllocation {
                category: "Green Buildings".into(),
                amount: dec!(500),
                percentage: 25.0,
                is_synthetic: false,
            },
        ];

        let csv = breakdown_to_csv(&entries).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], "\"Water, Waste \"\"Circular\"\"\",1500.46,75.00");
        assert_eq!(lines[2], "Green Buildings,500,25.00");
    }

    #[test]
    fn test_kpis_absent_methodology() {
        let kpis = vec![AggregatedKpi {
            name: "GHG emissions avoided".into(),
            unit: "tCO2e/year".into(),
            total_value: 1_500_000.0,
            normalized_value: 315.789_473_684,
            bond_count: 2,
            methodology: None,
        }];

        let csv = kpis_to_csv(&kpis).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[1],
            "GHG emissions avoided,tCO2e/year,1500000,315.79,2,—"
        );
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(12.0), "12");
        assert_eq!(number(0.444), "0.44");
        assert_eq!(amount(dec!(2_500_000_000.00)), "2500000000");
        assert_eq!(pct(100.0 / 3.0), "33.33");
    }
}
