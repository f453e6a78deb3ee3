//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The input string is not a decimal amount.
    #[error("invalid price: {0:?}")]
    Invalid(String),
}

/// A price in the shop's single display currency.
///
/// Backed by [`Decimal`] so line totals and cart totals stay exact under
/// repeated addition. The shop trades in one currency, so there is no
/// currency code; display always uses a `$` prefix with two fractional
/// digits.
///
/// ## Examples
///
/// ```
/// use sweetshop_core::Price;
///
/// let unit = Price::parse("$6.50").unwrap();
/// assert_eq!((unit * 3).to_string(), "$19.50");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Parse a `Price` from catalog text.
    ///
    /// The catalog displays prices as `$6.50`, so a leading `$` is
    /// accepted and stripped.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Invalid`] if the remainder is not a decimal
    /// number.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount = s.trim();
        let amount = amount.strip_prefix('$').unwrap_or(amount);
        Decimal::from_str(amount)
            .map(Self)
            .map_err(|_| PriceError::Invalid(s.to_owned()))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
