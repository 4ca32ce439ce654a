//! Resolution of bonds, portfolios and issuers into comparison subjects.
//!
//! Each adapter decides which holdings make up the subject and at what weight;
//! the aggregation itself is shared. Ids that fail to resolve are dropped, so a
//! bad id shortens the result instead of failing the call.

use std::collections::BTreeSet;

use greenlens_core::{Bond, PortfolioSource, ReferenceSource};
use rust_decimal::Decimal;

use super::subject::{ComparisonSubject, SubjectKind};
use crate::analytics::{aggregate_impact_kpis, calculate_coverage};
use crate::bucketing::{
    bucket_by_country, bucket_by_currency, bucket_by_sdg, bucket_by_uop, total_financed,
};
use crate::types::{resolve_holdings, AggregationConfig, WeightedHolding};

// =============================================================================
// ADAPTER CONTRACT
// =============================================================================

/// Resolves one kind of entity into a [`ComparisonSubject`].
pub trait SubjectAdapter {
    /// The kind of subject this adapter produces.
    fn kind(&self) -> SubjectKind;

    /// Resolves an id, or returns `None` if it does not exist.
    fn resolve(&self, id: &str) -> Option<ComparisonSubject>;
}

/// Identity fields that differ per adapter.
struct SubjectHeader {
    id: String,
    kind: SubjectKind,
    label: String,
    sub_label: Option<String>,
    currency: Option<String>,
}

/// Runs every primitive over the resolved holdings.
///
/// KPI values reach the aggregator already scaled by each holding's weight.
fn build_subject(
    header: SubjectHeader,
    holdings: &[WeightedHolding<'_>],
    total_issuance: Decimal,
    config: &AggregationConfig,
) -> ComparisonSubject {
    let financed = total_financed(holdings);

    let weighted_details: Vec<_> = holdings
        .iter()
        .filter_map(WeightedHolding::weighted_detail)
        .collect();
    let impact_kpis = aggregate_impact_kpis(weighted_details.iter().map(|d| &**d), financed, config);

    let coverage = calculate_coverage(holdings.iter().filter_map(|h| h.esg), holdings.len());
    let currency_exposure = bucket_by_currency(holdings);

    let currency = header
        .currency
        .or_else(|| currency_exposure.first().map(|e| e.key.clone()))
        .unwrap_or_else(|| config.fallback_currency.clone());

    ComparisonSubject {
        id: header.id,
        kind: header.kind,
        label: header.label,
        sub_label: header.sub_label,
        currency,
        bond_count: holdings.len(),
        total_issuance,
        total_financed: financed,
        uop_allocation: bucket_by_uop(holdings, config),
        sdg_allocation: bucket_by_sdg(holdings),
        impact_kpis,
        coverage,
        geography: bucket_by_country(holdings),
        currency_exposure,
    }
}

fn face_value<'a>(bonds: impl IntoIterator<Item = &'a Bond>) -> Decimal {
    bonds.into_iter().map(|b| b.outstanding_amount).sum()
}

// =============================================================================
// ADAPTERS
// =============================================================================

/// Resolves a single bond at full value.
#[derive(Clone, Copy)]
pub struct BondAdapter<'a> {
    reference: &'a dyn ReferenceSource,
    config: &'a AggregationConfig,
}

impl<'a> BondAdapter<'a> {
    /// Creates a bond adapter.
    #[must_use]
    pub fn new(reference: &'a dyn ReferenceSource, config: &'a AggregationConfig) -> Self {
        Self { reference, config }
    }
}

impl SubjectAdapter for BondAdapter<'_> {
    fn kind(&self) -> SubjectKind {
        SubjectKind::Bond
    }

    fn resolve(&self, id: &str) -> Option<ComparisonSubject> {
        let holding = WeightedHolding::lookup(self.reference, id)?;
        let bond = holding.bond;

        let header = SubjectHeader {
            id: bond.id.clone(),
            kind: SubjectKind::Bond,
            label: bond.name.clone(),
            sub_label: Some(bond.issuer.clone()),
            currency: Some(bond.currency.clone()),
        };

        Some(build_subject(
            header,
            &[holding],
            bond.outstanding_amount,
            self.config,
        ))
    }
}

/// Resolves a portfolio, applying each holding's weight to every amount.
///
/// `total_issuance` is the unweighted face value of the resolved bonds.
#[derive(Clone, Copy)]
pub struct PortfolioAdapter<'a> {
    reference: &'a dyn ReferenceSource,
    portfolios: &'a dyn PortfolioSource,
    config: &'a AggregationConfig,
}

impl<'a> PortfolioAdapter<'a> {
    /// Creates a portfolio adapter.
    #[must_use]
    pub fn new(
        reference: &'a dyn ReferenceSource,
        portfolios: &'a dyn PortfolioSource,
        config: &'a AggregationConfig,
    ) -> Self {
        Self {
            reference,
            portfolios,
            config,
        }
    }
}

impl SubjectAdapter for PortfolioAdapter<'_> {
    fn kind(&self) -> SubjectKind {
        SubjectKind::Portfolio
    }

    fn resolve(&self, id: &str) -> Option<ComparisonSubject> {
        let portfolio = self.portfolios.portfolio(id)?;
        let holdings = resolve_holdings(&portfolio.holdings, self.reference);

        if holdings.is_empty() {
            tracing::warn!(
                portfolio_id = %portfolio.id,
                holdings = portfolio.holding_count(),
                "Portfolio has no resolvable bonds"
            );
        }

        let header = SubjectHeader {
            id: portfolio.id.clone(),
            kind: SubjectKind::Portfolio,
            label: portfolio.name.clone(),
            sub_label: Some(format!("{} holdings", portfolio.holding_count())),
            currency: None,
        };
        let issuance = face_value(holdings.iter().map(|h| h.bond));

        Some(build_subject(header, &holdings, issuance, self.config))
    }
}

/// Resolves every bond of an issuer at full value.
///
/// An issuer resolves when it has a reference record or at least one bond.
#[derive(Clone, Copy)]
pub struct IssuerAdapter<'a> {
    reference: &'a dyn ReferenceSource,
    config: &'a AggregationConfig,
}

impl<'a> IssuerAdapter<'a> {
    /// Creates an issuer adapter.
    #[must_use]
    pub fn new(reference: &'a dyn ReferenceSource, config: &'a AggregationConfig) -> Self {
        Self { reference, config }
    }
}

impl SubjectAdapter for IssuerAdapter<'_> {
    fn kind(&self) -> SubjectKind {
        SubjectKind::Issuer
    }

    fn resolve(&self, id: &str) -> Option<ComparisonSubject> {
        let issuer = self.reference.issuer(id);
        let bonds = self.reference.bonds_for_issuer(id);
        if issuer.is_none() && bonds.is_empty() {
            return None;
        }

        let holdings: Vec<WeightedHolding<'_>> = bonds
            .iter()
            .map(|b| WeightedHolding::full(b, self.reference.esg_detail(&b.id)))
            .collect();

        let header = SubjectHeader {
            id: id.to_string(),
            kind: SubjectKind::Issuer,
            label: id.to_string(),
            sub_label: issuer.map(|i| i.descriptor()),
            currency: issuer.map(|i| i.currency.clone()),
        };

        Some(build_subject(
            header,
            &holdings,
            face_value(bonds.iter().copied()),
            self.config,
        ))
    }
}

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Resolves ids of one kind into comparison subjects, in input order.
///
/// Ids that fail to resolve are skipped, and a repeated id resolves only at its
/// first occurrence. Portfolio ids need a portfolio source; without one no
/// portfolio resolves.
///
/// # Example
///
/// ```rust,ignore
/// let subjects = resolve_comparison_subjects(
///     SubjectKind::Bond,
///     &["1", "3"],
///     &reference,
///     None,
///     &AggregationConfig::default(),
/// );
/// ```
#[must_use]
pub fn resolve_comparison_subjects<S: AsRef<str>>(
    kind: SubjectKind,
    ids: &[S],
    reference: &dyn ReferenceSource,
    portfolios: Option<&dyn PortfolioSource>,
    config: &AggregationConfig,
) -> Vec<ComparisonSubject> {
    let adapter: Box<dyn SubjectAdapter + '_> = match kind {
        SubjectKind::Bond => Box::new(BondAdapter::new(reference, config)),
        SubjectKind::Issuer => Box::new(IssuerAdapter::new(reference, config)),
        SubjectKind::Portfolio => match portfolios {
            Some(store) => Box::new(PortfolioAdapter::new(reference, store, config)),
            None => {
                tracing::debug!("No portfolio source supplied; portfolio ids cannot resolve");
                return Vec::new();
            }
        },
    };

    let mut seen = BTreeSet::new();
    ids.iter()
        .map(AsRef::as_ref)
        .filter(|id| seen.insert(*id))
        .filter_map(|id| {
            let subject = adapter.resolve(id);
            if subject.is_none() {
                tracing::debug!(kind = %adapter.kind(), id, "Comparison subject not found");
            }
            subject
        })
        .collect()
}
