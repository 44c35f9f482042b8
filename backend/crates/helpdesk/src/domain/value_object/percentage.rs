//! KPI percentages and the derived status

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Upper bound of a stored percentage (five digits, two decimals)
pub const PERCENTAGE_MAX: f64 = 999.99;

/// A percentage rounded to two decimals, within `0..=999.99`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Percentage(f64);

impl Percentage {
    pub fn new(field: &'static str, value: f64) -> AppResult<Self> {
        if !value.is_finite() {
            return Err(AppError::bad_request(format!("{field} must be a number")));
        }

        // `+ 0.0` turns a rounded `-0.0` into `0.0`
        let rounded = (value * 100.0).round() / 100.0 + 0.0;
        if value < 0.0 || rounded > PERCENTAGE_MAX {
            return Err(AppError::bad_request(format!(
                "{field} must be between 0 and {PERCENTAGE_MAX}"
            )));
        }

        Ok(Self(rounded))
    }

    pub fn from_db(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Whether the achieved percentage reached the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KpiStatus {
    Met,
    #[serde(rename = "Not Met")]
    NotMet,
}

impl KpiStatus {
    /// `Met` iff achieved >= indicator.
    pub fn evaluate(indicator: Percentage, achieved: Percentage) -> Self {
        if achieved.value() >= indicator.value() {
            KpiStatus::Met
        } else {
            KpiStatus::NotMet
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            KpiStatus::Met => "Met",
            KpiStatus::NotMet => "Not Met",
        }
    }

    pub fn from_db(value: &str) -> Self {
        if value == "Met" {
            KpiStatus::Met
        } else {
            KpiStatus::NotMet
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(value: f64) -> Percentage {
        Percentage::new("value", value).unwrap()
    }

    #[test]
    fn test_percentage_bounds() {
        assert!(Percentage::new("indicatorPercentage", 0.0).is_ok());
        assert!(Percentage::new("indicatorPercentage", 999.99).is_ok());
        assert!(Percentage::new("indicatorPercentage", 1000.0).is_err());
        assert!(Percentage::new("indicatorPercentage", -0.5).is_err());
        assert!(Percentage::new("indicatorPercentage", f64::NAN).is_err());
        assert!(Percentage::new("indicatorPercentage", f64::INFINITY).is_err());
    }

    #[test]
    fn test_percentage_rounds_to_two_decimals() {
        assert_eq!(pct(87.456).value(), 87.46);
        assert_eq!(pct(90.0).value(), 90.0);
    }

    #[test]
    fn test_small_negative_is_rejected_not_rounded_to_zero() {
        assert!(Percentage::new("achievedPercentage", -0.004).is_err());

        let zero = pct(-0.0);
        assert!(zero.value().is_sign_positive());
        assert_eq!(serde_json::to_string(&zero).unwrap(), "0.0");
    }

    #[test]
    fn test_status_boundary() {
        assert_eq!(KpiStatus::evaluate(pct(90.0), pct(90.0)), KpiStatus::Met);
        assert_eq!(KpiStatus::evaluate(pct(90.0), pct(95.5)), KpiStatus::Met);
        assert_eq!(KpiStatus::evaluate(pct(90.0), pct(89.99)), KpiStatus::NotMet);
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&KpiStatus::Met).unwrap(), "\"Met\"");
        assert_eq!(serde_json::to_string(&KpiStatus::NotMet).unwrap(), "\"Not Met\"");
        assert_eq!(KpiStatus::from_db(KpiStatus::NotMet.as_str()), KpiStatus::NotMet);
    }
}
