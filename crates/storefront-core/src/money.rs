//! Money type for prices and totals.
//!
//! Amounts are held as integer cents so that summing `0.3 * 2 + 0.1 * 3`
//! yields exactly `0.90`. On the wire a price is a plain decimal number
//! (`0.25`), matching the REST bodies the backend speaks.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const CENTS_PER_UNIT: i64 = 100;

/// A non-negative monetary amount in cents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Zero.
    pub const ZERO: Money = Money { cents: 0 };

    /// Create from cents. Negative input is clamped to zero.
    pub const fn from_cents(cents: i64) -> Self {
        Self {
            cents: if cents < 0 { 0 } else { cents },
        }
    }

    /// Create from a decimal amount, rounding to the nearest cent.
    ///
    /// ```
    /// use storefront_core::Money;
    /// let price = Money::from_decimal(0.35).unwrap();
    /// assert_eq!(price.cents(), 35);
    /// assert!(Money::from_decimal(-1.0).is_err());
    /// ```
    pub fn from_decimal(amount: f64) -> Result<Self, CommerceError> {
        if !amount.is_finite() {
            return Err(CommerceError::InvalidPrice(amount.to_string()));
        }
        if amount < 0.0 {
            return Err(CommerceError::InvalidPrice(format!(
                "{amount} is negative"
            )));
        }
        let scaled = (amount * CENTS_PER_UNIT as f64).round();
        if scaled > i64::MAX as f64 {
            return Err(CommerceError::Overflow);
        }
        Ok(Self {
            cents: scaled as i64,
        })
    }

    /// Amount in cents.
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.cents as f64 / CENTS_PER_UNIT as f64
    }

    /// Format with a currency symbol (e.g. "$0.25").
    pub fn display(&self) -> String {
        format!("${}", self.display_amount())
    }

    /// Format without symbol (e.g. "0.25").
    pub fn display_amount(&self) -> String {
        format!(
            "{}.{:02}",
            self.cents / CENTS_PER_UNIT,
            self.cents % CENTS_PER_UNIT
        )
    }

    /// Add, returning `None` on overflow.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.cents.checked_add(other.cents).map(Money::from_cents)
    }

    /// Multiply by a quantity, returning `None` on overflow.
    pub fn checked_mul(&self, quantity: u64) -> Option<Money> {
        i64::try_from(quantity)
            .ok()
            .and_then(|q| self.cents.checked_mul(q))
            .map(Money::from_cents)
    }

    /// Sum amounts, returning `None` on overflow.
    pub fn try_sum(iter: impl IntoIterator<Item = Money>) -> Option<Money> {
        iter.into_iter()
            .try_fold(Money::ZERO, |acc, m| acc.checked_add(m))
    }
}

impl TryFrom<f64> for Money {
    type Error = CommerceError;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Money::from_decimal(amount)
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> f64 {
        money.to_decimal()
    }
}

impl FromStr for Money {
    type Err = CommerceError;

    /// Parse user input such as `"0.25"`, `"$1.50"` or `"2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let amount: f64 = digits
            .parse()
            .map_err(|_| CommerceError::InvalidPrice(s.to_string()))?;
        Money::from_decimal(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(0.3).unwrap().cents(), 30);
        assert_eq!(Money::from_decimal(0.1).unwrap().cents(), 10);
        assert_eq!(Money::from_decimal(49.99).unwrap().cents(), 4999);
        assert_eq!(Money::from_decimal(0.0).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_money_rejects_bad_decimal() {
        assert!(Money::from_decimal(-0.01).is_err());
        assert!(Money::from_decimal(f64::NAN).is_err());
        assert!(Money::from_decimal(f64::INFINITY).is_err());
        assert_eq!(Money::from_decimal(1e300), Err(CommerceError::Overflow));
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(25).display(), "$0.25");
        assert_eq!(Money::from_cents(1050).display_amount(), "10.50");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_cents(30).checked_mul(2).unwrap();
        let b = Money::from_cents(10).checked_mul(3).unwrap();
        assert_eq!(a.checked_add(b), Some(Money::from_cents(90)));
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
        assert_eq!(Money::from_cents(2).checked_mul(u64::MAX), None);
    }

    #[test]
    fn test_money_try_sum() {
        let total = Money::try_sum([Money::from_cents(10), Money::from_cents(25)]);
        assert_eq!(total, Some(Money::from_cents(35)));
        assert_eq!(Money::try_sum(Vec::new()), Some(Money::ZERO));
    }

    #[test]
    fn test_money_parse() {
        assert_eq!("0.25".parse::<Money>().unwrap().cents(), 25);
        assert_eq!(" $1.5 ".parse::<Money>().unwrap().cents(), 150);
        assert_eq!("2".parse::<Money>().unwrap().cents(), 200);
        assert!("abc".parse::<Money>().is_err());
        assert!("-3".parse::<Money>().is_err());
    }

    #[test]
    fn test_money_wire_format() {
        let json = serde_json::to_string(&Money::from_cents(35)).unwrap();
        assert_eq!(json, "0.35");
        let back: Money = serde_json::from_str("0.35").unwrap();
        assert_eq!(back.cents(), 35);
        assert!(serde_json::from_str::<Money>("-1.0").is_err());
    }

    #[test]
    fn test_negative_cents_clamped() {
        assert_eq!(Money::from_cents(-5), Money::ZERO);
    }
}
