//! Breakdown command implementation.
//!
//! Shows a single dimension of one resolved subject.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use greenlens_ext_file::{breakdown_to_csv, kpis_to_csv};
use greenlens_portfolio::{AggregatedKpi, BreakdownEntry, CoverageSummary, SubjectKind};

use crate::cli::{AggregationOverrides, GlobalOptions, OutputFormat};
use crate::commands::{load_config, Session};
use crate::error::CliError;
use crate::output::{
    format_amount, format_pct, format_value, print_header, print_json, print_output, KeyValue,
    ABSENT,
};

/// Arguments for the breakdown command.
#[derive(Args, Debug)]
pub struct BreakdownArgs {
    /// Subject kind: bond, portfolio or issuer
    pub kind: SubjectKind,

    /// Bond id, portfolio id or issuer name
    pub id: String,

    /// Dimension to show
    #[arg(long, value_enum, default_value = "uop")]
    pub by: Dimension,

    #[command(flatten)]
    pub overrides: AggregationOverrides,
}

/// Breakdown dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Dimension {
    /// Use-of-proceeds categories
    Uop,
    /// UN Sustainable Development Goals
    Sdg,
    /// Country of issuer
    Country,
    /// Bond currency
    Currency,
    /// Impact KPIs
    Kpis,
    /// Disclosure coverage
    Coverage,
}

impl Dimension {
    fn title(self) -> &'static str {
        match self {
            Self::Uop => "Use of Proceeds",
            Self::Sdg => "SDG Alignment",
            Self::Country => "Geography",
            Self::Currency => "Currency Exposure",
            Self::Kpis => "Impact KPIs",
            Self::Coverage => "Disclosure Coverage",
        }
    }
}

#[derive(Tabled, Serialize)]
struct BreakdownRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled, Serialize)]
struct KpiRow {
    #[tabled(rename = "KPI")]
    name: String,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Per 1M")]
    normalized: String,
    #[tabled(rename = "Reports")]
    reports: usize,
    #[tabled(rename = "Methodology")]
    methodology: String,
}

/// Execute the breakdown command.
pub fn execute(args: BreakdownArgs, globals: &GlobalOptions, format: OutputFormat) -> Result<()> {
    let config = load_config(globals.config.as_deref(), &args.overrides)?;
    let session = Session::load(globals)?;

    let subject = session
        .resolve(args.kind, std::slice::from_ref(&args.id), &config)
        .into_iter()
        .next()
        .ok_or_else(|| CliError::NotFound {
            kind: args.kind.to_string(),
            id: args.id.clone(),
        })?;

    if format == OutputFormat::Table {
        print_header(&format!("{} - {}", subject.label, args.by.title()));
    }

    match args.by {
        Dimension::Uop => print_entries(&subject.uop_allocation, format),
        Dimension::Sdg => print_entries(&subject.sdg_allocation, format),
        Dimension::Country => print_entries(&subject.geography, format),
        Dimension::Currency => print_entries(&subject.currency_exposure, format),
        Dimension::Kpis => print_kpis(&subject.impact_kpis, format),
        Dimension::Coverage => print_coverage(&subject.coverage, format),
    }
}

fn print_entries<E: BreakdownEntry + Serialize>(entries: &[E], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(entries),
        OutputFormat::Csv => {
            print!("{}", breakdown_to_csv(entries)?);
            Ok(())
        }
        OutputFormat::Table => {
            let rows: Vec<BreakdownRow> = entries
                .iter()
                .map(|e| BreakdownRow {
                    label: e.label(),
                    amount: format_amount(e.amount()),
                    share: format_pct(e.percentage()),
                })
                .collect();
            print_output(&rows, format)
        }
    }
}

fn print_kpis(kpis: &[AggregatedKpi], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(kpis),
        OutputFormat::Csv => {
            print!("{}", kpis_to_csv(kpis)?);
            Ok(())
        }
        OutputFormat::Table => {
            let rows: Vec<KpiRow> = kpis
                .iter()
                .map(|k| KpiRow {
                    name: k.name.clone(),
                    unit: k.unit.clone(),
                    total: format_value(k.total_value),
                    normalized: format_value(k.normalized_value),
                    reports: k.bond_count,
                    methodology: k.methodology.clone().unwrap_or_else(|| ABSENT.to_string()),
                })
                .collect();
            print_output(&rows, format)
        }
    }
}

fn print_coverage(coverage: &CoverageSummary, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(coverage);
    }

    let count = |n: usize, pct: f64| format!("{n} ({})", format_pct(pct));
    let list = |items: &[String]| {
        if items.is_empty() {
            ABSENT.to_string()
        } else {
            items.join(", ")
        }
    };

    let rows = vec![
        KeyValue::new("Bonds", coverage.total_bonds.to_string()),
        KeyValue::new(
            "With ESG data",
            count(coverage.bonds_with_esg_data, coverage.esg_data_pct()),
        ),
        KeyValue::new(
            "Framework documents",
            count(coverage.framework_documents, coverage.framework_pct()),
        ),
        KeyValue::new(
            "Second-party opinions",
            count(coverage.spo_reviews, coverage.spo_pct()),
        ),
        KeyValue::new(
            "Impact reports",
            count(coverage.impact_reports, coverage.impact_report_pct()),
        ),
        KeyValue::new(
            "Allocation reports",
            count(coverage.allocation_reports, coverage.allocation_report_pct()),
        ),
        KeyValue::new("Avg completeness", format!("{}%", coverage.avg_completeness)),
        KeyValue::new("Frameworks", list(&coverage.frameworks)),
        KeyValue::new("SPO providers", list(&coverage.spo_providers)),
    ];
    print_output(&rows, format)
}
