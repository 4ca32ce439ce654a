//! Compare command implementation.
//!
//! Resolves several subjects of one kind and prints them side by side.

use std::collections::BTreeSet;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use greenlens_ext_file::subjects_to_csv;
use greenlens_portfolio::{
    all_sdgs, all_uop_categories, comparable_kpis, AggregationConfig, ComparableKpi,
    ComparisonSubject, SdgPresence, SubjectKind,
};

use crate::cli::{AggregationOverrides, GlobalOptions, OutputFormat};
use crate::commands::{load_config, Session};
use crate::output::{
    format_amount, format_pct, format_value, print_header, print_json, print_matrix,
    print_output, print_warning, ABSENT,
};

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Subject kind: bond, portfolio or issuer
    pub kind: SubjectKind,

    /// Bond ids, portfolio ids or issuer names
    #[arg(required = true)]
    pub ids: Vec<String>,

    #[command(flatten)]
    pub overrides: AggregationOverrides,
}

/// Everything the comparison view shows, for JSON output.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonReport<'a> {
    subjects: &'a [ComparisonSubject],
    uop_categories: Vec<String>,
    sdgs: Vec<SdgPresence>,
    comparable_kpis: Vec<ComparableKpi>,
}

#[derive(Tabled, Serialize)]
struct SummaryRow {
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Details")]
    details: String,
    #[tabled(rename = "Ccy")]
    currency: String,
    #[tabled(rename = "Bonds")]
    bonds: usize,
    #[tabled(rename = "Issuance")]
    issuance: String,
    #[tabled(rename = "Financed")]
    financed: String,
    #[tabled(rename = "Completeness")]
    completeness: String,
}

impl SummaryRow {
    fn new(subject: &ComparisonSubject) -> Self {
        Self {
            subject: subject.label.clone(),
            details: subject
                .sub_label
                .clone()
                .unwrap_or_else(|| ABSENT.to_string()),
            currency: subject.currency.clone(),
            bonds: subject.bond_count,
            issuance: format_amount(subject.total_issuance),
            financed: format_amount(subject.total_financed),
            completeness: format!("{}%", subject.coverage.avg_completeness),
        }
    }
}

/// Execute the compare command.
pub fn execute(args: CompareArgs, globals: &GlobalOptions, format: OutputFormat) -> Result<()> {
    let config = load_config(globals.config.as_deref(), &args.overrides)?;
    let session = Session::load(globals)?;
    let subjects = session.resolve(args.kind, &args.ids, &config);

    if !globals.quiet {
        let requested: BTreeSet<&str> = args.ids.iter().map(String::as_str).collect();
        let missing = requested.len().saturating_sub(subjects.len());
        if missing > 0 {
            print_warning(&format!("{missing} {} id(s) did not resolve", args.kind));
        }
        if subjects.len() < 2 {
            print_warning("Fewer than two subjects resolved; nothing to compare against");
        }
    }

    match format {
        OutputFormat::Json => print_json(&ComparisonReport {
            subjects: &subjects,
            uop_categories: all_uop_categories(&subjects),
            sdgs: all_sdgs(&subjects),
            comparable_kpis: comparable_kpis(&subjects, config.min_comparable_subjects),
        }),
        OutputFormat::Csv => {
            print!("{}", subjects_to_csv(&subjects, config.min_comparable_subjects)?);
            Ok(())
        }
        OutputFormat::Table => print_comparison(&subjects, &config),
    }
}

fn header_row(first: &str, subjects: &[ComparisonSubject]) -> Vec<String> {
    let mut row = vec![first.to_string()];
    row.extend(subjects.iter().map(|s| s.label.clone()));
    row
}

fn print_comparison(subjects: &[ComparisonSubject], config: &AggregationConfig) -> Result<()> {
    print_header("Summary");
    let rows: Vec<SummaryRow> = subjects.iter().map(SummaryRow::new).collect();
    print_output(&rows, OutputFormat::Table)?;

    print_header("Use of Proceeds");
    let mut matrix = vec![header_row("Category", subjects)];
    for category in all_uop_categories(subjects) {
        let mut row = vec![category.clone()];
        row.extend(subjects.iter().map(|s| {
            s.uop_for(&category)
                .map_or_else(|| ABSENT.to_string(), |e| format_pct(e.percentage))
        }));
        matrix.push(row);
    }
    print_matrix(matrix);

    print_header("SDG Alignment");
    let mut matrix = vec![header_row("SDG", subjects)];
    matrix[0].insert(1, "Presence".to_string());
    for sdg in all_sdgs(subjects) {
        let mut row = vec![
            format!("{} {}", sdg.sdg_number, sdg.sdg_name),
            format!("{:?}", sdg.status),
        ];
        row.extend(subjects.iter().map(|s| {
            s.sdg_for(sdg.sdg_number)
                .map_or_else(|| ABSENT.to_string(), |e| format_pct(e.percentage))
        }));
        matrix.push(row);
    }
    print_matrix(matrix);

    print_header("Impact KPIs");
    let mut matrix = vec![header_row("KPI", subjects)];
    for kpi in comparable_kpis(subjects, config.min_comparable_subjects) {
        let mut row = vec![format!("{} ({})", kpi.name, kpi.unit)];
        row.extend(subjects.iter().map(|s| {
            s.kpi_for(&kpi.name, &kpi.unit)
                .map_or_else(|| ABSENT.to_string(), |k| format_value(k.total_value))
        }));
        matrix.push(row);
    }
    print_matrix(matrix);

    print_header("Disclosure Coverage");
    let mut matrix = vec![header_row("Document", subjects)];
    let measures: [(&str, fn(&ComparisonSubject) -> f64); 5] = [
        ("ESG data", |s| s.coverage.esg_data_pct()),
        ("Framework", |s| s.coverage.framework_pct()),
        ("Second-party opinion", |s| s.coverage.spo_pct()),
        ("Impact report", |s| s.coverage.impact_report_pct()),
        ("Allocation report", |s| s.coverage.allocation_report_pct()),
    ];
    for (label, measure) in measures {
        let mut row = vec![label.to_string()];
        row.extend(subjects.iter().map(|s| format_pct(measure(s))));
        matrix.push(row);
    }
    print_matrix(matrix);

    Ok(())
}
