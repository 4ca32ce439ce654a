//! Documentation and external review coverage.

use std::collections::BTreeSet;

use greenlens_core::{BondEsgDetail, DocumentKind, ReviewKind};
use serde::{Deserialize, Serialize};

/// Documentation and review completeness across a set of bonds.
///
/// Counts are denominated against `total_bonds`, which the caller supplies
/// (1 for a single bond, the number of resolved holdings for a portfolio).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSummary {
    /// Denominator for every count below.
    pub total_bonds: usize,

    /// Bonds with an ESG detail record.
    pub bonds_with_esg_data: usize,

    /// Bonds with at least one framework document.
    pub framework_documents: usize,

    /// Bonds with at least one second-party opinion.
    pub spo_reviews: usize,

    /// Bonds with at least one impact report.
    pub impact_reports: usize,

    /// Bonds with at least one allocation report.
    pub allocation_reports: usize,

    /// Mean data completeness (0-100), rounded. Zero for an empty set.
    pub avg_completeness: u32,

    /// Distinct framework names, sorted.
    pub frameworks: Vec<String>,

    /// Distinct SPO provider names, sorted.
    pub spo_providers: Vec<String>,
}

impl CoverageSummary {
    /// Share of bonds with ESG detail (0-100).
    #[must_use]
    pub fn esg_data_pct(&self) -> f64 {
        self.pct(self.bonds_with_esg_data)
    }

    /// Share of bonds with a framework document (0-100).
    #[must_use]
    pub fn framework_pct(&self) -> f64 {
        self.pct(self.framework_documents)
    }

    /// Share of bonds with an SPO (0-100).
    #[must_use]
    pub fn spo_pct(&self) -> f64 {
        self.pct(self.spo_reviews)
    }

    /// Share of bonds with an impact report (0-100).
    #[must_use]
    pub fn impact_report_pct(&self) -> f64 {
        self.pct(self.impact_reports)
    }

    /// Share of bonds with an allocation report (0-100).
    #[must_use]
    pub fn allocation_report_pct(&self) -> f64 {
        self.pct(self.allocation_reports)
    }

    fn pct(&self, count: usize) -> f64 {
        if self.total_bonds == 0 {
            return 0.0;
        }
        count as f64 / self.total_bonds as f64 * 100.0
    }
}

/// Computes documentation and review coverage.
///
/// # Arguments
///
/// * `details` - ESG details of the bonds in the set (bonds without detail
///   are simply absent)
/// * `total_bonds` - Number of bonds in the set, including those without detail
#[must_use]
pub fn calculate_coverage<'a, I>(details: I, total_bonds: usize) -> CoverageSummary
where
    I: IntoIterator<Item = &'a BondEsgDetail>,
{
    let mut summary = CoverageSummary {
        total_bonds,
        ..CoverageSummary::default()
    };
    let mut frameworks = BTreeSet::new();
    let mut spo_providers = BTreeSet::new();
    let mut completeness_sum = 0.0;

    for detail in details {
        summary.bonds_with_esg_data += 1;

        if detail.has_document(DocumentKind::Framework) {
            summary.framework_documents += 1;
        }
        if detail.has_review(ReviewKind::Spo) {
            summary.spo_reviews += 1;
        }
        if detail.has_document(DocumentKind::ImpactReport) {
            summary.impact_reports += 1;
        }
        if detail.has_document(DocumentKind::AllocationReport) {
            summary.allocation_reports += 1;
        }

        frameworks.extend(detail.frameworks.iter().cloned());
        spo_providers.extend(detail.review_providers(ReviewKind::Spo).map(str::to_string));
        completeness_sum += detail.data_provenance.completeness;
    }

    if summary.bonds_with_esg_data > 0 {
        let mean = completeness_sum / summary.bonds_with_esg_data as f64;
        summary.avg_completeness = mean.round().clamp(0.0, f64::from(u32::MAX)) as u32;
    }
    summary.frameworks = frameworks.into_iter().collect();
    summary.spo_providers = spo_providers.into_iter().collect();

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use greenlens_core::{EsgDocument, ExternalReview};

    fn document(kind: DocumentKind) -> EsgDocument {
        EsgDocument {
            title: "doc".into(),
            kind,
            date: None,
            url: None,
        }
    }

    fn spo(provider: &str) -> ExternalReview {
        ExternalReview {
            provider: provider.into(),
            kind: ReviewKind::Spo,
            date: None,
            opinion: None,
        }
    }

    fn detail(id: &str, completeness: f64) -> BondEsgDetail {
        let mut d = BondEsgDetail::new(id);
        d.data_provenance.completeness = completeness;
        d
    }

    #[test]
    fn test_counts_and_distinct_providers() {
        let mut a = detail("1", 90.0);
        a.documents = vec![
            document(DocumentKind::Framework),
            document(DocumentKind::Framework),
            document(DocumentKind::ImpactReport),
        ];
        a.external_reviews = vec![spo("Sustainalytics")];
        a.frameworks = vec!["ICMA GBP".into(), "EU GBS".into()];

        let mut b = detail("2", 75.0);
        b.documents = vec![document(DocumentKind::AllocationReport)];
        b.external_reviews = vec![spo("Sustainalytics"), spo("Cicero")];
        b.frameworks = vec!["ICMA GBP".into()];

        let summary = calculate_coverage([&a, &b], 3);

        assert_eq!(summary.total_bonds, 3);
        assert_eq!(summary.bonds_with_esg_data, 2);
        assert_eq!(summary.framework_documents, 1);
        assert_eq!(summary.spo_reviews, 2);
        assert_eq!(summary.impact_reports, 1);
        assert_eq!(summary.allocation_reports, 1);
        assert_eq!(summary.avg_completeness, 83);
        assert_eq!(summary.frameworks, vec!["EU GBS", "ICMA GBP"]);
        assert_eq!(summary.spo_providers, vec!["Cicero", "Sustainalytics"]);
        assert_relative_eq!(summary.spo_pct(), 200.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_set_is_zero() {
        let summary = calculate_coverage(std::iter::empty::<&BondEsgDetail>(), 0);
        assert_eq!(summary.avg_completeness, 0);
        assert_eq!(summary.framework_pct(), 0.0);
        assert!(!summary.esg_data_pct().is_nan());
        assert!(summary.frameworks.is_empty());
    }

    #[test]
    fn test_bonds_without_detail_dilute_pct() {
        let mut a = detail("1", 100.0);
        a.documents = vec![document(DocumentKind::ImpactReport)];

        let summary = calculate_coverage([&a], 4);
        assert_relative_eq!(summary.impact_report_pct(), 25.0);
        assert_relative_eq!(summary.esg_data_pct(), 25.0);
        assert_eq!(summary.avg_completeness, 100);
    }
}
