//! Per-bond ESG detail.
//!
//! Issuer-reported percentages are trusted as given. Nothing here re-validates
//! that `allocated_percentage` values plus `unallocated_percentage` close to 100;
//! the engine only recomputes derived aggregates.

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ImpactKpi;

// =============================================================================
// ALLOCATIONS
// =============================================================================

/// Allocation of proceeds to one UN Sustainable Development Goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdgAllocation {
    /// SDG number (1-17).
    pub sdg_number: u8,

    /// SDG name (e.g. "Affordable and Clean Energy").
    pub sdg_name: String,

    /// Amount allocated.
    pub allocation_amount: Decimal,

    /// Issuer-reported share of proceeds (0-100).
    #[serde(default)]
    pub allocation_percentage: f64,
}

/// A financed project inside a use-of-proceeds category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project name.
    pub name: String,

    /// Project location.
    #[serde(default)]
    pub country: Option<String>,

    /// Amount allocated to the project.
    #[serde(default)]
    pub allocated_amount: Option<Decimal>,

    /// Delivery status (e.g. "Operational").
    #[serde(default)]
    pub status: Option<String>,

    /// Project-level KPIs.
    #[serde(default, rename = "impactKPIs")]
    pub impact_kpis: Vec<ImpactKpi>,
}

/// An ICMA use-of-proceeds category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseOfProceedsCategory {
    /// Category name (e.g. "Renewable Energy").
    pub category: String,

    /// Amount allocated to the category.
    pub allocated_amount: Decimal,

    /// Issuer-reported share of proceeds (0-100).
    #[serde(default)]
    pub allocated_percentage: f64,

    /// Projects financed under this category.
    #[serde(default)]
    pub projects: Vec<Project>,

    /// Category-level KPIs. These are the KPIs the engine aggregates.
    #[serde(default, rename = "impactKPIs")]
    pub impact_kpis: Vec<ImpactKpi>,
}

// =============================================================================
// REVIEWS AND DOCUMENTS
// =============================================================================

/// Type of external review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewKind {
    /// Second-Party Opinion.
    #[serde(rename = "SPO")]
    Spo,
    /// Post-issuance verification.
    Verification,
    /// Certification (e.g. Climate Bonds Standard).
    Certification,
    /// ESG rating.
    Rating,
    /// Anything else.
    #[serde(other)]
    Other,
}

/// An external review of the bond or its framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalReview {
    /// Review provider (e.g. "Sustainalytics").
    pub provider: String,

    /// Review type.
    #[serde(rename = "type")]
    pub kind: ReviewKind,

    /// Publication date.
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Headline opinion.
    #[serde(default)]
    pub opinion: Option<String>,
}

/// Type of bond document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Green/sustainability bond framework.
    Framework,
    /// Impact report.
    #[serde(rename = "Impact Report")]
    ImpactReport,
    /// Allocation report.
    #[serde(rename = "Allocation Report")]
    AllocationReport,
    /// Prospectus.
    Prospectus,
    /// Anything else.
    #[serde(other)]
    Other,
}

/// A published document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsgDocument {
    /// Document title.
    pub title: String,

    /// Document type.
    #[serde(rename = "type")]
    pub kind: DocumentKind,

    /// Publication date.
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Link to the document.
    #[serde(default)]
    pub url: Option<String>,
}

/// EU Taxonomy alignment figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyAlignment {
    /// Share of proceeds taxonomy-eligible (0-100).
    pub eligible_percentage: f64,

    /// Share of proceeds taxonomy-aligned (0-100).
    pub aligned_percentage: f64,

    /// Do-no-significant-harm assessment passed.
    #[serde(default)]
    pub dnsh_compliant: Option<bool>,
}

/// Where the ESG data came from and how complete it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProvenance {
    /// Data source.
    #[serde(default)]
    pub source: Option<String>,

    /// Last update.
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,

    /// Completeness score (0-100).
    #[serde(default)]
    pub completeness: f64,
}

// =============================================================================
// DETAIL
// =============================================================================

/// ESG detail for one bond.
///
/// At most one per bond; absence means "no ESG data" and is a valid state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondEsgDetail {
    /// Id of the bond this detail belongs to (catalog key).
    pub bond_id: String,

    /// SDG allocations.
    #[serde(default)]
    pub sdg_allocations: Vec<SdgAllocation>,

    /// Use-of-proceeds categories.
    #[serde(default)]
    pub use_of_proceeds: Vec<UseOfProceedsCategory>,

    /// Proceeds not yet allocated.
    #[serde(default)]
    pub unallocated_amount: Option<Decimal>,

    /// Share of proceeds not yet allocated (0-100).
    #[serde(default)]
    pub unallocated_percentage: Option<f64>,

    /// Frameworks the bond is aligned with.
    #[serde(default)]
    pub frameworks: Vec<String>,

    /// External reviews.
    #[serde(default)]
    pub external_reviews: Vec<ExternalReview>,

    /// EU Taxonomy alignment.
    #[serde(default)]
    pub taxonomy: Option<TaxonomyAlignment>,

    /// Published documents.
    #[serde(default)]
    pub documents: Vec<EsgDocument>,

    /// Provenance and completeness.
    #[serde(default)]
    pub data_provenance: DataProvenance,
}

impl BondEsgDetail {
    /// Creates an empty detail for a bond.
    #[must_use]
    pub fn new(bond_id: impl Into<String>) -> Self {
        Self {
            bond_id: bond_id.into(),
            sdg_allocations: Vec::new(),
            use_of_proceeds: Vec::new(),
            unallocated_amount: None,
            unallocated_percentage: None,
            frameworks: Vec::new(),
            external_reviews: Vec::new(),
            taxonomy: None,
            documents: Vec::new(),
            data_provenance: DataProvenance::default(),
        }
    }

    /// Returns the sum of allocated amounts across all UoP categories.
    #[must_use]
    pub fn total_allocated(&self) -> Decimal {
        self.use_of_proceeds.iter().map(|c| c.allocated_amount).sum()
    }

    /// Returns the unallocated residual amount.
    ///
    /// Uses the reported amount when present. Otherwise derives it from
    /// `unallocated_percentage` relative to the reported allocated percentages,
    /// so a 5% residual next to 95% allocated adds 5/95 of the allocated total.
    #[must_use]
    pub fn unallocated(&self) -> Decimal {
        if let Some(amount) = self.unallocated_amount {
            return amount;
        }

        let Some(pct) = self.unallocated_percentage.filter(|p| *p > 0.0) else {
            return Decimal::ZERO;
        };

        let allocated_pct: f64 = self
            .use_of_proceeds
            .iter()
            .map(|c| c.allocated_percentage)
            .sum();
        if allocated_pct <= 0.0 {
            return Decimal::ZERO;
        }

        match (Decimal::from_f64(pct), Decimal::from_f64(allocated_pct)) {
            (Some(pct), Some(allocated_pct)) => self
                .total_allocated()
                .checked_mul(pct)
                .and_then(|v| v.checked_div(allocated_pct))
                .unwrap_or(Decimal::ZERO),
            _ => Decimal::ZERO,
        }
    }

    /// Returns true if at least one document of the given kind is published.
    #[must_use]
    pub fn has_document(&self, kind: DocumentKind) -> bool {
        self.documents.iter().any(|d| d.kind == kind)
    }

    /// Returns true if at least one external review of the given kind exists.
    #[must_use]
    pub fn has_review(&self, kind: ReviewKind) -> bool {
        self.external_reviews.iter().any(|r| r.kind == kind)
    }

    /// Returns the providers of all reviews of the given kind.
    pub fn review_providers(&self, kind: ReviewKind) -> impl Iterator<Item = &str> {
        self.external_reviews
            .iter()
            .filter(move |r| r.kind == kind)
            .map(|r| r.provider.as_str())
    }

    /// Returns every category-level KPI across all UoP categories.
    pub fn category_kpis(&self) -> impl Iterator<Item = &ImpactKpi> {
        self.use_of_proceeds
            .iter()
            .flat_map(|c| c.impact_kpis.iter())
    }

    /// Returns a copy with every amount and numeric KPI value multiplied by
    /// `factor`.
    ///
    /// Percentages, documents and reviews are left untouched.
    #[must_use]
    pub fn scaled(&self, factor: Decimal) -> Self {
        Self {
            sdg_allocations: self
                .sdg_allocations
                .iter()
                .map(|s| SdgAllocation {
                    allocation_amount: s.allocation_amount * factor,
                    ..s.clone()
                })
                .collect(),
            use_of_proceeds: self
                .use_of_proceeds
                .iter()
                .map(|c| UseOfProceedsCategory {
                    allocated_amount: c.allocated_amount * factor,
                    projects: c
                        .projects
                        .iter()
                        .map(|p| Project {
                            allocated_amount: p.allocated_amount.map(|a| a * factor),
                            impact_kpis: p.impact_kpis.iter().map(|k| k.scaled(factor)).collect(),
                            ..p.clone()
                        })
                        .collect(),
                    impact_kpis: c.impact_kpis.iter().map(|k| k.scaled(factor)).collect(),
                    ..c.clone()
                })
                .collect(),
            unallocated_amount: self.unallocated_amount.map(|a| a * factor),
            ..self.clone()
        }
    }
}
