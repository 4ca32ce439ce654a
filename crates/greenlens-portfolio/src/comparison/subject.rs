//! The unified comparison subject.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::{AggregatedKpi, CoverageSummary};
use crate::error::EngineError;
use crate::types::{CategoryAllocation, ExposureEntry, SdgBreakdown};

/// Kind of entity a comparison subject was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    /// A single bond, counted at full value.
    Bond,
    /// A user portfolio of weighted holdings.
    Portfolio,
    /// Every bond of one issuer, counted at full value.
    Issuer,
}

impl SubjectKind {
    /// Returns the lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bond => "bond",
            Self::Portfolio => "portfolio",
            Self::Issuer => "issuer",
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubjectKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bond" | "bonds" => Ok(Self::Bond),
            "portfolio" | "portfolios" => Ok(Self::Portfolio),
            "issuer" | "issuers" => Ok(Self::Issuer),
            _ => Err(EngineError::unknown_subject_kind(s)),
        }
    }
}

/// A bond, portfolio or issuer collapsed into one comparable shape.
///
/// Built fresh for every comparison and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSubject {
    /// Bond id, portfolio id or issuer name.
    pub id: String,

    /// What the subject was resolved from.
    pub kind: SubjectKind,

    /// Display label.
    pub label: String,

    /// Secondary label (issuer for a bond, holding count for a portfolio,
    /// country and sector for an issuer).
    pub sub_label: Option<String>,

    /// Currency label. No FX conversion is performed.
    pub currency: String,

    /// Number of resolved bonds.
    pub bond_count: usize,

    /// Face-value issuance. Never weight-scaled.
    pub total_issuance: Decimal,

    /// Weighted sum of use-of-proceeds allocated amounts.
    pub total_financed: Decimal,

    /// Use-of-proceeds breakdown.
    pub uop_allocation: Vec<CategoryAllocation>,

    /// SDG breakdown.
    pub sdg_allocation: Vec<SdgBreakdown>,

    /// Aggregated impact KPIs.
    pub impact_kpis: Vec<AggregatedKpi>,

    /// Documentation and review coverage.
    pub coverage: CoverageSummary,

    /// Country exposure.
    pub geography: Vec<ExposureEntry>,

    /// Currency exposure.
    pub currency_exposure: Vec<ExposureEntry>,
}

impl ComparisonSubject {
    /// Returns the use-of-proceeds entry for a category.
    #[must_use]
    pub fn uop_for(&self, category: &str) -> Option<&CategoryAllocation> {
        self.uop_allocation.iter().find(|c| c.category == category)
    }

    /// Returns the SDG entry for an SDG number.
    #[must_use]
    pub fn sdg_for(&self, sdg_number: u8) -> Option<&SdgBreakdown> {
        self.sdg_allocation
            .iter()
            .find(|s| s.sdg_number == sdg_number)
    }

    /// Returns the aggregated KPI with this exact name and unit.
    #[must_use]
    pub fn kpi_for(&self, name: &str, unit: &str) -> Option<&AggregatedKpi> {
        self.impact_kpis
            .iter()
            .find(|k| k.name == name && k.unit == unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_kind_parse() {
        assert_eq!("bond".parse::<SubjectKind>().unwrap(), SubjectKind::Bond);
        assert_eq!(" Portfolio ".parse::<SubjectKind>().unwrap(), SubjectKind::Portfolio);
        assert_eq!("issuers".parse::<SubjectKind>().unwrap(), SubjectKind::Issuer);

        let err = "fund".parse::<SubjectKind>().unwrap_err();
        assert_eq!(err, EngineError::unknown_subject_kind("fund"));
    }

    #[test]
    fn test_subject_kind_display_roundtrip() {
        for kind in [SubjectKind::Bond, SubjectKind::Portfolio, SubjectKind::Issuer] {
            assert_eq!(kind.to_string().parse::<SubjectKind>().unwrap(), kind);
        }
    }
}
