//! Configuration for aggregation and comparison.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Configuration for aggregation and comparison.
///
/// All fields have defaults, so a partial TOML/JSON document deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Emit unallocated proceeds as a synthetic "Unallocated" use-of-proceeds
    /// category. When false, the residual still counts in the percentage
    /// denominator but is not listed.
    pub include_unallocated_as_category: bool,

    /// Capital basis for normalized KPI values (per 1,000,000 financed).
    pub kpi_normalization_basis: Decimal,

    /// Minimum number of subjects a KPI must appear in to be comparable.
    pub min_comparable_subjects: usize,

    /// Currency label used when a subject has no bond to take one from.
    pub fallback_currency: String,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            include_unallocated_as_category: false,
            kpi_normalization_basis: dec!(1_000_000),
            min_comparable_subjects: 2,
            fallback_currency: "EUR".to_string(),
        }
    }
}

impl AggregationConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether unallocated proceeds become a synthetic category.
    #[must_use]
    pub fn with_unallocated_category(mut self, include: bool) -> Self {
        self.include_unallocated_as_category = include;
        self
    }

    /// Sets the KPI normalization basis.
    #[must_use]
    pub fn with_normalization_basis(mut self, basis: Decimal) -> Self {
        self.kpi_normalization_basis = basis;
        self
    }

    /// Sets the KPI comparability threshold.
    #[must_use]
    pub fn with_min_comparable_subjects(mut self, min: usize) -> Self {
        self.min_comparable_subjects = min;
        self
    }

    /// Sets the fallback currency label.
    #[must_use]
    pub fn with_fallback_currency(mut self, currency: impl Into<String>) -> Self {
        self.fallback_currency = currency.into();
        self
    }

    /// Checks the configuration for values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the normalization basis is not
    /// positive, the comparability threshold is zero, or the fallback currency
    /// is blank.
    pub fn validate(&self) -> EngineResult<()> {
        if self.kpi_normalization_basis <= Decimal::ZERO {
            return Err(EngineError::invalid_config(
                "kpi_normalization_basis must be positive",
            ));
        }
        if self.min_comparable_subjects == 0 {
            return Err(EngineError::invalid_config(
                "min_comparable_subjects must be at least 1",
            ));
        }
        if self.fallback_currency.trim().is_empty() {
            return Err(EngineError::invalid_config(
                "fallback_currency must not be empty",
            ));
        }
        Ok(())
    }
}
