//! Impact KPI aggregation.
//!
//! KPI aggregation is weight-agnostic. For portfolios the caller applies each
//! holding's weight to the raw KPI values before they get here (see
//! [`WeightedHolding::weighted_detail`]).
//!
//! [`WeightedHolding::weighted_detail`]: crate::types::WeightedHolding::weighted_detail

use std::collections::BTreeMap;

use greenlens_core::{BondEsgDetail, KpiValue};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::AggregationConfig;

/// An impact KPI combined across bonds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedKpi {
    /// Indicator name.
    pub name: String,

    /// Unit.
    pub unit: String,

    /// Sum of reported values.
    pub total_value: f64,

    /// `total_value` per normalization basis of capital financed
    /// (per 1,000,000 by default). Zero when nothing was financed.
    pub normalized_value: f64,

    /// Number of numeric reports that were summed.
    pub bond_count: usize,

    /// Methodology of the first report that disclosed one.
    pub methodology: Option<String>,
}

impl AggregatedKpi {
    /// Returns the `name|unit` comparability key.
    #[must_use]
    pub fn comparability_key(&self) -> String {
        format!("{}|{}", self.name, self.unit)
    }
}

#[derive(Default)]
struct KpiAccumulator {
    total: f64,
    count: usize,
    methodology: Option<String>,
}

/// Aggregates category-level impact KPIs across ESG details.
///
/// KPIs are grouped by exact `(name, unit)`. Numeric values are summed;
/// unparseable values are dropped and not counted. Results are ordered by
/// `bond_count` descending, then `total_value` descending, so the most widely
/// reported, largest indicators come first.
///
/// # Arguments
///
/// * `details` - ESG details, already weight-applied for portfolios
/// * `total_financed` - Sum of UoP allocated amounts over the same details
/// * `config` - Supplies the normalization basis
#[must_use]
pub fn aggregate_impact_kpis<'a, I>(
    details: I,
    total_financed: Decimal,
    config: &AggregationConfig,
) -> Vec<AggregatedKpi>
where
    I: IntoIterator<Item = &'a BondEsgDetail>,
{
    let mut groups: BTreeMap<(String, String), KpiAccumulator> = BTreeMap::new();

    for detail in details {
        for kpi in detail.category_kpis() {
            let value = match &kpi.value {
                KpiValue::Numeric(v) => *v,
                KpiValue::Unparseable(raw) => {
                    tracing::debug!(
                        bond_id = %detail.bond_id,
                        kpi = %kpi.name,
                        value = %raw,
                        "Dropping unparseable KPI value"
                    );
                    continue;
                }
            };

            let acc = groups
                .entry((kpi.name.clone(), kpi.unit.clone()))
                .or_default();
            acc.total += value;
            acc.count += 1;
            if acc.methodology.is_none() {
                acc.methodology = kpi.methodology.clone();
            }
        }
    }

    let scale = normalization_factor(total_financed, config.kpi_normalization_basis);

    let mut result: Vec<AggregatedKpi> = groups
        .into_iter()
        .map(|((name, unit), acc)| AggregatedKpi {
            name,
            unit,
            total_value: acc.total,
            normalized_value: acc.total * scale,
            bond_count: acc.count,
            methodology: acc.methodology,
        })
        .collect();

    result.sort_by(|a, b| {
        b.bond_count.cmp(&a.bond_count).then_with(|| {
            b.total_value
                .partial_cmp(&a.total_value)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });

    result
}

/// Returns `basis / total_financed`, or 0 when nothing was financed.
fn normalization_factor(total_financed: Decimal, basis: Decimal) -> f64 {
    if total_financed <= Decimal::ZERO {
        return 0.0;
    }
    (basis / total_financed).to_f64().unwrap_or(0.0)
}
