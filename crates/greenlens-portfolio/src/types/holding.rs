//! Holdings resolved against reference data.

use std::borrow::Cow;

use greenlens_core::{Bond, BondEsgDetail, PortfolioHolding, ReferenceSource};
use rust_decimal::Decimal;

/// A holding resolved to its bond, optional ESG detail and weight fraction.
///
/// The weight is a fraction (`0.6` for a 60% holding). Bonds and issuers use
/// a weight of one.
#[derive(Debug, Clone, Copy)]
pub struct WeightedHolding<'a> {
    /// The held bond.
    pub bond: &'a Bond,

    /// The bond's ESG detail, if any.
    pub esg: Option<&'a BondEsgDetail>,

    /// Weight fraction applied to every amount.
    pub weight: Decimal,
}

impl<'a> WeightedHolding<'a> {
    /// Creates a holding counted at full value.
    #[must_use]
    pub fn full(bond: &'a Bond, esg: Option<&'a BondEsgDetail>) -> Self {
        Self {
            bond,
            esg,
            weight: Decimal::ONE,
        }
    }

    /// Creates a holding with an explicit weight fraction.
    #[must_use]
    pub fn weighted(bond: &'a Bond, esg: Option<&'a BondEsgDetail>, weight: Decimal) -> Self {
        Self { bond, esg, weight }
    }

    /// Resolves a bond id against reference data at full value.
    #[must_use]
    pub fn lookup<R>(reference: &'a R, bond_id: &str) -> Option<Self>
    where
        R: ReferenceSource + ?Sized,
    {
        let bond = reference.bond(bond_id)?;
        Some(Self::full(bond, reference.esg_detail(bond_id)))
    }

    /// Returns the bond's outstanding amount scaled by the weight.
    #[must_use]
    pub fn weighted_outstanding(&self) -> Decimal {
        self.bond.outstanding_amount * self.weight
    }

    /// Returns the ESG detail with the weight applied to every amount and
    /// numeric KPI value.
    ///
    /// Borrows when the weight is one.
    #[must_use]
    pub fn weighted_detail(&self) -> Option<Cow<'a, BondEsgDetail>> {
        let esg = self.esg?;
        if self.weight == Decimal::ONE {
            Some(Cow::Borrowed(esg))
        } else {
            Some(Cow::Owned(esg.scaled(self.weight)))
        }
    }
}

/// Resolves portfolio holdings against reference data.
///
/// Holdings whose bond is missing from the reference set are skipped.
#[must_use]
pub fn resolve_holdings<'a, R>(
    holdings: &[PortfolioHolding],
    reference: &'a R,
) -> Vec<WeightedHolding<'a>>
where
    R: ReferenceSource + ?Sized,
{
    holdings
        .iter()
        .filter_map(|h| match reference.bond(&h.bond_id) {
            Some(bond) => Some(WeightedHolding::weighted(
                bond,
                reference.esg_detail(&h.bond_id),
                h.weight_fraction(),
            )),
            None => {
                tracing::debug!(bond_id = %h.bond_id, "Skipping holding with unknown bond");
                None
            }
        })
        .collect()
}
