//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands::{
    BreakdownArgs, CompareArgs, ExportArgs, PortfolioArgs, WatchlistArgs,
};

/// Greenlens - ESG bond research and comparison CLI
#[derive(Parser)]
#[command(name = "greenlens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Dataset file (JSON)
    #[arg(
        short,
        long,
        env = "GREENLENS_DATA",
        default_value = "data/greenlens-demo.json",
        global = true
    )]
    pub data: PathBuf,

    /// Aggregation settings file (TOML)
    #[arg(short, long, env = "GREENLENS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Returns the options shared by every command.
    pub fn globals(&self) -> GlobalOptions {
        GlobalOptions {
            data: self.data.clone(),
            config: self.config.clone(),
            quiet: self.quiet,
        }
    }
}

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub data: PathBuf,
    pub config: Option<PathBuf>,
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compare bonds, portfolios or issuers side by side
    Compare(CompareArgs),

    /// Show one breakdown (UoP, SDG, geography, currency, KPIs) of a subject
    Breakdown(BreakdownArgs),

    /// Export a comparison as CSV
    Export(ExportArgs),

    /// Manage portfolios
    Portfolio(PortfolioArgs),

    /// Manage watchlists
    Watchlist(WatchlistArgs),
}

/// Overrides for the aggregation settings file.
#[derive(Args, Debug, Clone, Default)]
pub struct AggregationOverrides {
    /// List unallocated proceeds as an "Unallocated" category
    #[arg(long)]
    pub include_unallocated: bool,

    /// Minimum number of subjects a KPI must appear in to be compared
    #[arg(long)]
    pub min_comparable: Option<usize>,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
