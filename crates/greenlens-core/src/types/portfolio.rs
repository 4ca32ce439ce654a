//! User-owned portfolios and watchlists.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bond held in a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioHolding {
    /// Id of the held bond.
    pub bond_id: String,

    /// Weight in percent. `None` counts the full face value (100).
    #[serde(default)]
    pub weight: Option<Decimal>,

    /// When the holding was added.
    pub added_at: DateTime<Utc>,
}

impl PortfolioHolding {
    /// Creates a holding with no explicit weight.
    #[must_use]
    pub fn new(bond_id: impl Into<String>) -> Self {
        Self {
            bond_id: bond_id.into(),
            weight: None,
            added_at: Utc::now(),
        }
    }

    /// Sets the weight in percent.
    #[must_use]
    pub fn with_weight(mut self, weight: Decimal) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Returns the weight in percent, defaulting to 100.
    #[must_use]
    pub fn weight_pct(&self) -> Decimal {
        self.weight.unwrap_or(Decimal::ONE_HUNDRED)
    }

    /// Returns the weight as a fraction: `(weight ?? 100) / 100`.
    #[must_use]
    pub fn weight_fraction(&self) -> Decimal {
        self.weight_pct() / Decimal::ONE_HUNDRED
    }
}

/// A named collection of weighted bond holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Holdings in insertion order.
    #[serde(default)]
    pub holdings: Vec<PortfolioHolding>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Portfolio {
    /// Creates an empty portfolio.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            holdings: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Adds a holding (builder style, no duplicate check).
    #[must_use]
    pub fn with_holding(mut self, holding: PortfolioHolding) -> Self {
        self.holdings.push(holding);
        self
    }

    /// Returns the number of holdings.
    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.holdings.len()
    }

    /// Returns true if the portfolio has no holdings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Returns the holding for a bond, if held.
    #[must_use]
    pub fn holding(&self, bond_id: &str) -> Option<&PortfolioHolding> {
        self.holdings.iter().find(|h| h.bond_id == bond_id)
    }

    /// Returns true if the bond is held.
    #[must_use]
    pub fn contains(&self, bond_id: &str) -> bool {
        self.holding(bond_id).is_some()
    }
}

/// A named set of bonds to keep an eye on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Watchlist {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Watched bond ids (set semantics, insertion order).
    #[serde(default)]
    pub bond_ids: Vec<String>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Watchlist {
    /// Creates an empty watchlist.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bond_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Returns true if the bond is watched.
    #[must_use]
    pub fn contains(&self, bond_id: &str) -> bool {
        self.bond_ids.iter().any(|b| b == bond_id)
    }
}
