//! Greenlens CLI - compare ESG bonds, portfolios and issuers.
//!
//! # Usage
//!
//! ```bash
//! # Compare two bonds side by side
//! greenlens --data data/greenlens-demo.json compare bond 1 3
//!
//! # SDG breakdown of a portfolio
//! greenlens breakdown portfolio p-core --by sdg
//!
//! # Export a comparison to CSV
//! greenlens export issuer "European Investment Bank" KfW --output compare.csv
//!
//! # Add a holding and save the dataset
//! greenlens portfolio add p-core 2 --weight 25
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "debug"
    } else {
        "warn,greenlens=info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = cli.format;
    let globals = cli.globals();

    match cli.command {
        Commands::Compare(args) => commands::compare::execute(args, &globals, format)?,
        Commands::Breakdown(args) => commands::breakdown::execute(args, &globals, format)?,
        Commands::Export(args) => commands::export::execute(args, &globals)?,
        Commands::Portfolio(args) => commands::portfolio::execute(args, &globals, format)?,
        Commands::Watchlist(args) => commands::watchlist::execute(args, &globals, format)?,
    }

    Ok(())
}
