//! Issuer reference record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An issuer of sustainable bonds, keyed by name.
///
/// The issuer's bond set is derived, not stored: every bond whose `issuer`
/// field equals [`Issuer::name`] exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issuer {
    /// Issuer name (catalog key).
    pub name: String,

    /// Country of incorporation.
    pub country: String,

    /// Sector.
    pub sector: String,

    /// Reported total sustainable issuance.
    #[serde(default)]
    pub total_sustainable_issuance: Decimal,

    /// Reporting currency label.
    pub currency: String,

    /// Frameworks the issuer reports against.
    #[serde(default)]
    pub frameworks: Vec<String>,
}

impl Issuer {
    /// Returns the "country · sector" descriptor used as a sub-label.
    #[must_use]
    pub fn descriptor(&self) -> String {
        format!("{} · {}", self.country, self.sector)
    }
}
