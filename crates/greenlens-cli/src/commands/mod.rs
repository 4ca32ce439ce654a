//! CLI command implementations.

pub mod breakdown;
pub mod compare;
pub mod export;
pub mod portfolio;
pub mod watchlist;

// Re-export submodules for convenience
pub use breakdown::BreakdownArgs;
pub use compare::CompareArgs;
pub use export::ExportArgs;
pub use portfolio::PortfolioArgs;
pub use watchlist::WatchlistArgs;

use std::path::Path;

use anyhow::Result;
use greenlens_core::{InMemoryPortfolioStore, ReferenceData, ReferenceSource};
use greenlens_ext_file::{load_dataset, Dataset};
use greenlens_portfolio::{
    resolve_comparison_subjects, AggregationConfig, ComparisonSubject, SubjectKind,
};

use crate::cli::{AggregationOverrides, GlobalOptions};
use crate::error::{CliError, CliResult};

/// Reads the aggregation settings file, if any, and applies flag overrides.
pub fn load_config(
    path: Option<&Path>,
    overrides: &AggregationOverrides,
) -> CliResult<AggregationConfig> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
            toml::from_str::<AggregationConfig>(&content)
                .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?
        }
        None => AggregationConfig::default(),
    };

    if overrides.include_unallocated {
        config = config.with_unallocated_category(true);
    }
    if let Some(min) = overrides.min_comparable {
        config = config.with_min_comparable_subjects(min);
    }

    config
        .validate()
        .map_err(|e| CliError::Config(e.to_string()))?;
    tracing::debug!(?config, "Aggregation settings");
    Ok(config)
}

/// Reference catalogs and the portfolio store loaded from `--data`.
pub struct Session {
    pub reference: ReferenceData,
    pub store: InMemoryPortfolioStore,
}

impl Session {
    /// Loads the dataset named by the global options.
    pub fn load(globals: &GlobalOptions) -> Result<Self> {
        let (reference, store) = load_dataset(&globals.data)?;
        Ok(Self { reference, store })
    }

    /// Writes catalogs and store back to the dataset file.
    pub fn save(&self, globals: &GlobalOptions) -> Result<()> {
        Dataset::from_parts(&self.reference, &self.store).save(&globals.data)?;
        Ok(())
    }

    /// Resolves subjects against this session's data.
    pub fn resolve(
        &self,
        kind: SubjectKind,
        ids: &[String],
        config: &AggregationConfig,
    ) -> Vec<ComparisonSubject> {
        resolve_comparison_subjects(kind, ids, &self.reference, Some(&self.store), config)
    }

    /// Checks that a bond exists in the reference catalog.
    pub fn require_bond(&self, bond_id: &str) -> CliResult<()> {
        if self.reference.bond(bond_id).is_none() {
            return Err(CliError::UnknownBond(bond_id.to_string()));
        }
        Ok(())
    }
}
