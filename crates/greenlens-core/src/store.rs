//! The portfolio/watchlist store.
//!
//! This is the only mutable collaborator of the engine. It is owned by a single
//! browsing session; the engine only ever sees it through [`PortfolioSource`],
//! one consistent snapshot per call.

use std::collections::BTreeMap;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::{Portfolio, PortfolioHolding, Watchlist};

/// Read-only access to portfolios.
pub trait PortfolioSource {
    /// Looks up a portfolio by id.
    fn portfolio(&self, id: &str) -> Option<&Portfolio>;

    /// Returns all portfolios in id order.
    fn portfolios(&self) -> Vec<&Portfolio>;
}

/// In-memory CRUD store for portfolios and watchlists.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPortfolioStore {
    portfolios: BTreeMap<String, Portfolio>,
    watchlists: BTreeMap<String, Watchlist>,
}

fn validate_name(name: &str) -> CoreResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid_name("name must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_weight(bond_id: &str, weight: Option<Decimal>) -> CoreResult<()> {
    match weight {
        Some(w) if w < Decimal::ZERO => Err(CoreError::InvalidWeight {
            bond_id: bond_id.to_string(),
            value: w.to_string(),
        }),
        _ => Ok(()),
    }
}

impl InMemoryPortfolioStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // PORTFOLIOS
    // =========================================================================

    /// Inserts a fully formed portfolio (e.g. loaded from a file).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateId`] if the id is taken.
    pub fn insert_portfolio(&mut self, portfolio: Portfolio) -> CoreResult<()> {
        if self.portfolios.contains_key(&portfolio.id) {
            return Err(CoreError::duplicate_id(portfolio.id));
        }
        for h in &portfolio.holdings {
            validate_weight(&h.bond_id, h.weight)?;
        }
        self.portfolios.insert(portfolio.id.clone(), portfolio);
        Ok(())
    }

    /// Creates an empty portfolio and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidName`] for a blank name.
    pub fn create_portfolio(
        &mut self,
        name: &str,
        description: Option<String>,
    ) -> CoreResult<String> {
        let name = validate_name(name)?;
        let id = Uuid::new_v4().to_string();
        let mut portfolio = Portfolio::new(id.clone(), name);
        portfolio.description = description;
        self.portfolios.insert(id.clone(), portfolio);
        Ok(id)
    }

    /// Renames a portfolio.
    ///
    /// # Errors
    ///
    /// Returns an error if the portfolio is unknown or the name is blank.
    pub fn rename_portfolio(&mut self, id: &str, name: &str) -> CoreResult<()> {
        let name = validate_name(name)?;
        let portfolio = self.portfolio_mut(id)?;
        portfolio.name = name;
        portfolio.updated_at = Utc::now();
        Ok(())
    }

    /// Deletes a portfolio and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PortfolioNotFound`] if the portfolio is unknown.
    pub fn delete_portfolio(&mut self, id: &str) -> CoreResult<Portfolio> {
        self.portfolios
            .remove(id)
            .ok_or_else(|| CoreError::portfolio_not_found(id))
    }

    /// Adds a bond to a portfolio. `weight` is in percent; `None` means 100.
    ///
    /// # Errors
    ///
    /// Returns an error if the portfolio is unknown, the bond is already held,
    /// or the weight is negative.
    pub fn add_holding(
        &mut self,
        portfolio_id: &str,
        bond_id: &str,
        weight: Option<Decimal>,
    ) -> CoreResult<()> {
        validate_weight(bond_id, weight)?;
        let portfolio = self.portfolio_mut(portfolio_id)?;
        if portfolio.contains(bond_id) {
            return Err(CoreError::DuplicateHolding {
                portfolio_id: portfolio_id.to_string(),
                bond_id: bond_id.to_string(),
            });
        }
        portfolio.holdings.push(PortfolioHolding {
            bond_id: bond_id.to_string(),
            weight,
            added_at: Utc::now(),
        });
        portfolio.updated_at = Utc::now();
        Ok(())
    }

    /// Removes a bond from a portfolio.
    ///
    /// # Errors
    ///
    /// Returns an error if the portfolio is unknown or does not hold the bond.
    pub fn remove_holding(&mut self, portfolio_id: &str, bond_id: &str) -> CoreResult<()> {
        let portfolio = self.portfolio_mut(portfolio_id)?;
        let before = portfolio.holdings.len();
        portfolio.holdings.retain(|h| h.bond_id != bond_id);
        if portfolio.holdings.len() == before {
            return Err(CoreError::HoldingNotFound {
                portfolio_id: portfolio_id.to_string(),
                bond_id: bond_id.to_string(),
            });
        }
        portfolio.updated_at = Utc::now();
        Ok(())
    }

    /// Sets (or clears) the weight of a holding.
    ///
    /// # Errors
    ///
    /// Returns an error if the portfolio or holding is unknown, or the weight
    /// is negative.
    pub fn set_weight(
        &mut self,
        portfolio_id: &str,
        bond_id: &str,
        weight: Option<Decimal>,
    ) -> CoreResult<()> {
        validate_weight(bond_id, weight)?;
        let portfolio = self.portfolio_mut(portfolio_id)?;
        let holding = portfolio
            .holdings
            .iter_mut()
            .find(|h| h.bond_id == bond_id)
            .ok_or_else(|| CoreError::HoldingNotFound {
                portfolio_id: portfolio_id.to_string(),
                bond_id: bond_id.to_string(),
            })?;
        holding.weight = weight;
        portfolio.updated_at = Utc::now();
        Ok(())
    }

    fn portfolio_mut(&mut self, id: &str) -> CoreResult<&mut Portfolio> {
        self.portfolios
            .get_mut(id)
            .ok_or_else(|| CoreError::portfolio_not_found(id))
    }

    // =========================================================================
    // WATCHLISTS
    // =========================================================================

    /// Inserts a fully formed watchlist (e.g. loaded from a file).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateId`] if the id is taken.
    pub fn insert_watchlist(&mut self, watchlist: Watchlist) -> CoreResult<()> {
        if self.watchlists.contains_key(&watchlist.id) {
            return Err(CoreError::duplicate_id(watchlist.id));
        }
        self.watchlists.insert(watchlist.id.clone(), watchlist);
        Ok(())
    }

    /// Creates an empty watchlist and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidName`] for a blank name.
    pub fn create_watchlist(&mut self, name: &str) -> CoreResult<String> {
        let name = validate_name(name)?;
        let id = Uuid::new_v4().to_string();
        self.watchlists
            .insert(id.clone(), Watchlist::new(id.clone(), name));
        Ok(id)
    }

    /// Deletes a watchlist and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::WatchlistNotFound`] if the watchlist is unknown.
    pub fn delete_watchlist(&mut self, id: &str) -> CoreResult<Watchlist> {
        self.watchlists
            .remove(id)
            .ok_or_else(|| CoreError::watchlist_not_found(id))
    }

    /// Adds a bond to a watchlist. Returns false if it was already watched.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::WatchlistNotFound`] if the watchlist is unknown.
    pub fn watch(&mut self, watchlist_id: &str, bond_id: &str) -> CoreResult<bool> {
        let watchlist = self.watchlist_mut(watchlist_id)?;
        if watchlist.contains(bond_id) {
            return Ok(false);
        }
        watchlist.bond_ids.push(bond_id.to_string());
        Ok(true)
    }

    /// Removes a bond from a watchlist. Returns false if it was not watched.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::WatchlistNotFound`] if the watchlist is unknown.
    pub fn unwatch(&mut self, watchlist_id: &str, bond_id: &str) -> CoreResult<bool> {
        let watchlist = self.watchlist_mut(watchlist_id)?;
        let before = watchlist.bond_ids.len();
        watchlist.bond_ids.retain(|b| b != bond_id);
        Ok(watchlist.bond_ids.len() != before)
    }

    /// Looks up a watchlist by id.
    #[must_use]
    pub fn watchlist(&self, id: &str) -> Option<&Watchlist> {
        self.watchlists.get(id)
    }

    /// Returns all watchlists in id order.
    #[must_use]
    pub fn watchlists(&self) -> Vec<&Watchlist> {
        self.watchlists.values().collect()
    }

    fn watchlist_mut(&mut self, id: &str) -> CoreResult<&mut Watchlist> {
        self.watchlists
            .get_mut(id)
            .ok_or_else(|| CoreError::watchlist_not_found(id))
    }
}

impl PortfolioSource for InMemoryPortfolioStore {
    fn portfolio(&self, id: &str) -> Option<&Portfolio> {
        self.portfolios.get(id)
    }

    fn portfolios(&self) -> Vec<&Portfolio> {
        self.portfolios.values().collect()
    }
}
