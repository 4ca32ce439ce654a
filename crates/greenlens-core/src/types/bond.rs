//! Bond reference record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bond's financial and sustainability identity.
///
/// Immutable reference data. The currency is carried as a plain label; no FX
/// conversion is ever applied to amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bond {
    /// Catalog key.
    pub id: String,

    /// ISIN.
    pub isin: String,

    /// Display name (e.g. "EIB Climate Awareness Bond 2030").
    pub name: String,

    /// Issuer name. Issuer membership is an exact match on this field.
    pub issuer: String,

    /// Country of the issuer (geography bucket key).
    pub country: String,

    /// Issuer sector.
    pub sector: String,

    /// Currency label (e.g. "EUR").
    pub currency: String,

    /// Outstanding face amount in the bond's currency.
    pub outstanding_amount: Decimal,

    /// Annual coupon in percent.
    #[serde(default)]
    pub coupon: Option<f64>,

    /// Issue date.
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,

    /// Maturity date.
    #[serde(default)]
    pub maturity_date: Option<NaiveDate>,

    /// Labelled green bond.
    #[serde(default)]
    pub is_green: bool,

    /// Labelled sustainability bond.
    #[serde(default)]
    pub is_sustainability: bool,

    /// Certified climate-aligned.
    #[serde(default)]
    pub is_climate_aligned: bool,

    /// Composite credit rating (e.g. "AAA").
    #[serde(default)]
    pub credit_rating: Option<String>,
}

impl Bond {
    /// Returns the sustainability label used in listings.
    #[must_use]
    pub fn label(&self) -> &'static str {
        if self.is_green {
            "Green"
        } else if self.is_sustainability {
            "Sustainability"
        } else if self.is_climate_aligned {
            "Climate-Aligned"
        } else {
            "Conventional"
        }
    }

    /// Returns true if the bond carries any sustainability flag.
    #[must_use]
    pub fn is_labelled(&self) -> bool {
        self.is_green || self.is_sustainability || self.is_climate_aligned
    }
}
