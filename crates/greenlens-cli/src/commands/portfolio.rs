//! Portfolio command implementation.
//!
//! Lists, inspects and edits the portfolios stored in the dataset file.
//! Every edit is written back to `--data`.

use anyhow::Result;
use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use greenlens_core::{PortfolioSource, ReferenceSource};

use crate::cli::{GlobalOptions, OutputFormat};
use crate::commands::Session;
use crate::error::CliError;
use crate::output::{print_header, print_json, print_output, print_success, ABSENT};

/// Arguments for the portfolio command.
#[derive(Args, Debug)]
pub struct PortfolioArgs {
    #[command(subcommand)]
    pub command: PortfolioCommand,
}

/// Portfolio subcommands.
#[derive(Subcommand, Debug)]
pub enum PortfolioCommand {
    /// List all portfolios
    List,

    /// Show the holdings of a portfolio
    Show {
        /// Portfolio id
        id: String,
    },

    /// Create an empty portfolio
    Create {
        /// Portfolio name
        name: String,

        /// Free-text description
        #[arg(long)]
        description: Option<String>,
    },

    /// Rename a portfolio
    Rename {
        /// Portfolio id
        id: String,

        /// New name
        name: String,
    },

    /// Delete a portfolio
    Delete {
        /// Portfolio id
        id: String,
    },

    /// Add a bond to a portfolio
    Add {
        /// Portfolio id
        id: String,

        /// Bond id
        bond: String,

        /// Weight in percent (default: full face value)
        #[arg(long)]
        weight: Option<Decimal>,
    },

    /// Remove a bond from a portfolio
    Remove {
        /// Portfolio id
        id: String,

        /// Bond id
        bond: String,
    },

    /// Set or clear the weight of a holding
    Weight {
        /// Portfolio id
        id: String,

        /// Bond id
        bond: String,

        /// Weight in percent; omit to reset to full face value
        weight: Option<Decimal>,
    },
}

#[derive(Tabled, Serialize)]
struct PortfolioRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Holdings")]
    holdings: usize,
    #[tabled(rename = "Updated")]
    updated: String,
}

#[derive(Tabled, Serialize)]
struct HoldingRow {
    #[tabled(rename = "Bond")]
    bond_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Ccy")]
    currency: String,
    #[tabled(rename = "Weight")]
    weight: String,
}

/// Execute the portfolio command.
pub fn execute(args: PortfolioArgs, globals: &GlobalOptions, format: OutputFormat) -> Result<()> {
    let mut session = Session::load(globals)?;

    let message = match args.command {
        PortfolioCommand::List => {
            let rows: Vec<PortfolioRow> = session
                .store
                .portfolios()
                .into_iter()
                .map(|p| PortfolioRow {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    holdings: p.holding_count(),
                    updated: p.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();
            return print_output(&rows, format);
        }
        PortfolioCommand::Show { id } => return show(&session, &id, format),
        PortfolioCommand::Create { name, description } => {
            let id = session.store.create_portfolio(&name, description)?;
            format!("Created portfolio '{}' ({id})", name.trim())
        }
        PortfolioCommand::Rename { id, name } => {
            session.store.rename_portfolio(&id, &name)?;
            format!("Renamed portfolio {id}")
        }
        PortfolioCommand::Delete { id } => {
            let removed = session.store.delete_portfolio(&id)?;
            format!("Deleted portfolio '{}'", removed.name)
        }
        PortfolioCommand::Add { id, bond, weight } => {
            session.require_bond(&bond)?;
            session.store.add_holding(&id, &bond, weight)?;
            format!("Added {bond} to {id}")
        }
        PortfolioCommand::Remove { id, bond } => {
            session.store.remove_holding(&id, &bond)?;
            format!("Removed {bond} from {id}")
        }
        PortfolioCommand::Weight { id, bond, weight } => {
            session.store.set_weight(&id, &bond, weight)?;
            match weight {
                Some(w) => format!("Set weight of {bond} in {id} to {w}%"),
                None => format!("Reset weight of {bond} in {id}"),
            }
        }
    };

    session.save(globals)?;
    if !globals.quiet {
        print_success(&message);
    }
    Ok(())
}

fn show(session: &Session, id: &str, format: OutputFormat) -> Result<()> {
    let portfolio = session
        .store
        .portfolio(id)
        .ok_or_else(|| CliError::NotFound {
            kind: "portfolio".to_string(),
            id: id.to_string(),
        })?;

    if format == OutputFormat::Json {
        return print_json(portfolio);
    }

    let rows: Vec<HoldingRow> = portfolio
        .holdings
        .iter()
        .map(|h| {
            let bond = session.reference.bond(&h.bond_id);
            HoldingRow {
                bond_id: h.bond_id.clone(),
                name: bond.map_or_else(|| ABSENT.to_string(), |b| b.name.clone()),
                currency: bond.map_or_else(|| ABSENT.to_string(), |b| b.currency.clone()),
                weight: format!("{}%", h.weight_pct().normalize()),
            }
        })
        .collect();

    if format == OutputFormat::Table {
        print_header(&portfolio.name);
        if let Some(description) = &portfolio.description {
            println!("{description}");
        }
    }
    print_output(&rows, format)
}
