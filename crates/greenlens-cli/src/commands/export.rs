//! Export command implementation.
//!
//! Writes a flattened comparison table as CSV.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use greenlens_ext_file::subjects_to_csv;
use greenlens_portfolio::SubjectKind;

use crate::cli::{AggregationOverrides, GlobalOptions};
use crate::commands::{load_config, Session};
use crate::output::{print_success, print_warning};

/// Arguments for the export command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Subject kind: bond, portfolio or issuer
    pub kind: SubjectKind,

    /// Bond ids, portfolio ids or issuer names
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Output file. Writes to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: AggregationOverrides,
}

/// Execute the export command.
pub fn execute(args: ExportArgs, globals: &GlobalOptions) -> Result<()> {
    let config = load_config(globals.config.as_deref(), &args.overrides)?;
    let session = Session::load(globals)?;
    let subjects = session.resolve(args.kind, &args.ids, &config);

    if subjects.is_empty() && !globals.quiet {
        print_warning("No subjects resolved; exporting the header only");
    }

    let csv = subjects_to_csv(&subjects, config.min_comparable_subjects)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), subjects = subjects.len(), "Exported comparison");
            if !globals.quiet {
                print_success(&format!(
                    "Exported {} subject(s) to {}",
                    subjects.len(),
                    path.display()
                ));
            }
        }
        None => print!("{csv}"),
    }

    Ok(())
}
