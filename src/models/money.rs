//! Money type for representing currency amounts
//!
//! Amounts are stored as whole cents in an `i64`, so sums over many records
//! stay exact. The hosted store hands out decimal numbers (`180.5`); those are
//! converted once, at ingress, with [`Money::from_decimal`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Largest magnitude accepted from a decimal source, in cents
/// (one trillion currency units)
pub const MAX_DECIMAL_CENTS: i64 = 100_000_000_000_000;

/// A monetary amount in cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use fintrack::models::Money;
    /// let amount = Money::from_cents(18050); // 180.50
    /// assert_eq!(amount.to_string(), "$180.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units and cents
    pub const fn from_units_cents(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
    }

    /// Convert a decimal amount to cents, rounding half away from zero
    ///
    /// Returns `None` for NaN, infinities and values whose magnitude exceeds
    /// [`MAX_DECIMAL_CENTS`].
    ///
    /// # Examples
    /// ```
    /// use fintrack::models::Money;
    /// assert_eq!(Money::from_decimal(180.5).unwrap().cents(), 18050);
    /// assert!(Money::from_decimal(f64::NAN).is_none());
    /// ```
    pub fn from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents.abs() > MAX_DECIMAL_CENTS as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the amount as a decimal number of currency units
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Whole units, truncated toward zero
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Express `self` as a percentage of `whole`
    ///
    /// Returns 0 when `whole` is zero.
    pub fn percent_of(&self, whole: Money) -> f64 {
        if whole.is_zero() {
            return 0.0;
        }
        self.0 as f64 / whole.0 as f64 * 100.0
    }

    /// Parse a money amount from user input
    ///
    /// Accepts "1200", "180.5", "180.50", "$1,200.00" and a leading minus sign.
    /// Digits past the second decimal place are truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.trim().to_string());

        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest).replace(',', "");

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (rest.as_str(), ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction[..2].parse().map_err(|_| invalid())?,
        };

        let total = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(invalid)?;
        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.units().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Serde helpers for optional amounts stored as decimal numbers
///
/// Used where a file is meant to be edited by hand (`"monthly_budget": 1500.0`)
/// rather than holding raw cents.
pub mod decimal_opt {
    use super::Money;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Money>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(money) => serializer.serialize_some(&money.to_decimal()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Money>, D::Error> {
        match Option::<f64>::deserialize(deserializer)? {
            Some(value) => Money::from_decimal(value)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid amount: {}", value))),
            None => Ok(None),
        }
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
