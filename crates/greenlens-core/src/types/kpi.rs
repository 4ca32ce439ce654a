//! Impact KPIs.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A reported KPI value, classified once at ingestion.
///
/// Source data mixes numbers and strings. Strings that parse as a finite float
/// after trimming become [`KpiValue::Numeric`]; anything else is kept verbatim
/// as [`KpiValue::Unparseable`] and never enters arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KpiValue {
    /// A usable numeric value.
    Numeric(f64),
    /// A value that could not be read as a number.
    Unparseable(String),
}

impl KpiValue {
    /// Classifies a textual value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Self::Numeric(v),
            _ => Self::Unparseable(raw.to_string()),
        }
    }

    /// Returns the numeric value, if any.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            Self::Unparseable(_) => None,
        }
    }

    /// Returns true if the value is numeric.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }

    /// Multiplies a numeric value; unparseable values are returned unchanged.
    #[must_use]
    pub fn scaled(&self, factor: Decimal) -> Self {
        match self {
            Self::Numeric(v) => Self::Numeric(v * factor.to_f64().unwrap_or(0.0)),
            Self::Unparseable(s) => Self::Unparseable(s.clone()),
        }
    }
}

impl From<f64> for KpiValue {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Self::Numeric(value)
        } else {
            Self::Unparseable(value.to_string())
        }
    }
}

impl Default for KpiValue {
    fn default() -> Self {
        Self::Unparseable(String::new())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKpiValue {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl<'de> Deserialize<'de> for KpiValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawKpiValue::deserialize(deserializer)? {
            RawKpiValue::Number(v) => Self::from(v),
            RawKpiValue::Text(s) => Self::parse(&s),
            RawKpiValue::Other(_) => Self::default(),
        })
    }
}

/// A reported, unit-bearing outcome metric.
///
/// Two KPIs are combinable iff [`ImpactKpi::comparability_key`] matches:
/// the name and the unit, both by exact string equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactKpi {
    /// Indicator name (e.g. "GHG emissions avoided").
    pub name: String,

    /// Reported value. Missing, null or non-scalar values are unparseable.
    #[serde(default)]
    pub value: KpiValue,

    /// Unit (e.g. "tCO2e/year").
    pub unit: String,

    /// Reporting year.
    #[serde(default)]
    pub reporting_year: Option<i32>,

    /// Calculation methodology, if disclosed.
    #[serde(default)]
    pub methodology: Option<String>,
}

impl ImpactKpi {
    /// Creates a numeric KPI.
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: KpiValue::from(value),
            unit: unit.into(),
            reporting_year: None,
            methodology: None,
        }
    }

    /// Sets the methodology.
    #[must_use]
    pub fn with_methodology(mut self, methodology: impl Into<String>) -> Self {
        self.methodology = Some(methodology.into());
        self
    }

    /// Sets the reporting year.
    #[must_use]
    pub fn with_reporting_year(mut self, year: i32) -> Self {
        self.reporting_year = Some(year);
        self
    }

    /// Returns the `name|unit` key under which KPIs are combined.
    #[must_use]
    pub fn comparability_key(&self) -> String {
        format!("{}|{}", self.name, self.unit)
    }

    /// Returns a copy with the value multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: Decimal) -> Self {
        Self {
            value: self.value.scaled(factor),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_numeric_strings() {
        assert_eq!(KpiValue::parse("1200"), KpiValue::Numeric(1200.0));
        assert_eq!(KpiValue::parse("  3.5 "), KpiValue::Numeric(3.5));
        assert_eq!(KpiValue::parse("-2e3"), KpiValue::Numeric(-2000.0));
    }

    #[test]
    fn test_parse_unparseable() {
        assert!(!KpiValue::parse("n/a").is_numeric());
        assert!(!KpiValue::parse("1,200").is_numeric());
        assert!(!KpiValue::parse("450 MW").is_numeric());
        assert!(!KpiValue::parse("").is_numeric());
        assert!(!KpiValue::parse("NaN").is_numeric());
        assert!(!KpiValue::parse("inf").is_numeric());
    }

    #[test]
    fn test_deserialize_mixed() {
        let values: Vec<KpiValue> = serde_json::from_str(r#"[42, 1.5, "17", "pending"]"#).unwrap();
        assert_eq!(values[0], KpiValue::Numeric(42.0));
        assert_eq!(values[1], KpiValue::Numeric(1.5));
        assert_eq!(values[2], KpiValue::Numeric(17.0));
        assert_eq!(values[3], KpiValue::Unparseable("pending".into()));
    }

    #[test]
    fn test_deserialize_non_scalar_is_unparseable() {
        let values: Vec<KpiValue> =
            serde_json::from_str(r#"[null, true, {"amount": 3}, [1, 2]]"#).unwrap();
        assert!(values.iter().all(|v| !v.is_numeric()));

        let kpi: ImpactKpi =
            serde_json::from_str(r#"{"name": "GHG", "value": null, "unit": "t"}"#).unwrap();
        assert_eq!(kpi.value, KpiValue::default());

        let kpi: ImpactKpi = serde_json::from_str(r#"{"name": "GHG", "unit": "t"}"#).unwrap();
        assert!(!kpi.value.is_numeric());
    }

    #[test]
    fn test_serialize_untagged() {
        let json = serde_json::to_string(&KpiValue::Numeric(2.5)).unwrap();
        assert_eq!(json, "2.5");
        let json = serde_json::to_string(&KpiValue::Unparseable("tbd".into())).unwrap();
        assert_eq!(json, "\"tbd\"");
    }

    #[test]
    fn test_scaled() {
        let kpi = ImpactKpi::new("GHG emissions avoided", 1000.0, "tCO2e/year");
        let scaled = kpi.scaled(dec!(0.6));
        assert_relative_eq!(scaled.value.as_f64().unwrap(), 600.0, epsilon = 1e-9);
        assert_eq!(scaled.unit, kpi.unit);

        let text = KpiValue::Unparseable("n/a".into());
        assert_eq!(text.scaled(dec!(0.5)), text);
    }

    #[test]
    fn test_comparability_key() {
        let a = ImpactKpi::new("Renewable capacity", 10.0, "MW");
        let b = ImpactKpi::new("Renewable capacity", 99.0, "GW");
        assert_eq!(a.comparability_key(), "Renewable capacity|MW");
        assert_ne!(a.comparability_key(), b.comparability_key());
    }
}
