//! Watchlist command implementation.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::commands::Session;
use crate::output::{print_output, print_success, print_warning};

/// Arguments for the watchlist command.
#[derive(Args, Debug)]
pub struct WatchlistArgs {
    #[command(subcommand)]
    pub command: WatchlistCommand,
}

/// Watchlist subcommands.
#[derive(Subcommand, Debug)]
pub enum WatchlistCommand {
    /// List all watchlists
    List,

    /// Create an empty watchlist
    Create {
        /// Watchlist name
        name: String,
    },

    /// Delete a watchlist
    Delete {
        /// Watchlist id
        id: String,
    },

    /// Start watching a bond
    Watch {
        /// Watchlist id
        id: String,

        /// Bond id
        bond: String,
    },

    /// Stop watching a bond
    Unwatch {
        /// Watchlist id
        id: String,

        /// Bond id
        bond: String,
    },
}

#[derive(Tabled, Serialize)]
struct WatchlistRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Bonds")]
    bonds: String,
}

/// Execute the watchlist command.
pub fn execute(args: WatchlistArgs, globals: &GlobalOptions, format: OutputFormat) -> Result<()> {
    let mut session = Session::load(globals)?;

    let message = match args.command {
        WatchlistCommand::List => {
            let rows: Vec<WatchlistRow> = session
                .store
                .watchlists()
                .into_iter()
                .map(|w| WatchlistRow {
                    id: w.id.clone(),
                    name: w.name.clone(),
                    bonds: w.bond_ids.join(", "),
                })
                .collect();
            return print_output(&rows, format);
        }
        WatchlistCommand::Create { name } => {
            let id = session.store.create_watchlist(&name)?;
            format!("Created watchlist '{}' ({id})", name.trim())
        }
        WatchlistCommand::Delete { id } => {
            let removed = session.store.delete_watchlist(&id)?;
            format!("Deleted watchlist '{}'", removed.name)
        }
        WatchlistCommand::Watch { id, bond } => {
            session.require_bond(&bond)?;
            if !session.store.watch(&id, &bond)? {
                if !globals.quiet {
                    print_warning(&format!("{bond} is already on {id}"));
                }
                return Ok(());
            }
            format!("Watching {bond} on {id}")
        }
        WatchlistCommand::Unwatch { id, bond } => {
            if !session.store.unwatch(&id, &bond)? {
                if !globals.quiet {
                    print_warning(&format!("{bond} is not on {id}"));
                }
                return Ok(());
            }
            format!("Stopped watching {bond} on {id}")
        }
    };

    session.save(globals)?;
    if !globals.quiet {
        print_success(&message);
    }
    Ok(())
}
