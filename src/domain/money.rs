//! Money type
//!
//! Domain primitive for currency values. Every value is validated and rounded
//! at construction time, so aggregates built from `Money` are always finite,
//! non-negative and carry at most two decimal places.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;

/// Currency precision (cents)
const SCALE: u32 = 2;

/// Money represents a non-negative currency value with two decimal places.
///
/// # Invariants
/// - Value is never negative
/// - Value is rounded half away from zero to 2 decimal places
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use retail_iq::domain::Money;
///
/// let price = Money::new(Decimal::new(19999, 3)).unwrap();
/// assert_eq!(price.value(), Decimal::new(2000, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money(Decimal);

/// Errors that can occur when creating Money
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("Money must not be negative (got {0})")]
    Negative(Decimal),

    #[error("Money must be a finite number")]
    NotFinite,

    #[error("Invalid money format: {0}")]
    ParseError(String),
}

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Create a new Money value, rounding to cents.
    ///
    /// # Errors
    /// - `MoneyError::Negative` if value < 0
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(MoneyError::Negative(value));
        }
        Ok(Self(round_cents(value)))
    }

    /// Create Money from a float (e.g. a random price draw).
    pub fn from_f64(value: f64) -> Result<Self, MoneyError> {
        if !value.is_finite() {
            return Err(MoneyError::NotFinite);
        }
        let decimal = Decimal::from_f64(value).ok_or(MoneyError::NotFinite)?;
        Self::new(decimal)
    }

    /// Create Money from whole cents.
    pub fn from_cents(cents: u64) -> Self {
        Self(Decimal::new(cents as i64, SCALE))
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Lossy conversion for statistics and charting.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Divide by a count, yielding zero instead of failing when the count is zero.
    pub fn per(&self, count: u64) -> Money {
        if count == 0 {
            return Money::ZERO;
        }
        Money(round_cents(self.0 / Decimal::from(count)))
    }

    /// Multiply by a non-negative factor.
    pub fn scaled(&self, factor: f64) -> Result<Money, MoneyError> {
        if !factor.is_finite() {
            return Err(MoneyError::NotFinite);
        }
        let factor = Decimal::from_f64(factor).ok_or(MoneyError::NotFinite)?;
        Money::new(self.0 * factor)
    }

    /// Total for `quantity` units of this unit price after a fractional
    /// discount (0.0..=1.0). Rounded once, after multiplying.
    pub fn line_total(&self, discount: f64, quantity: u32) -> Result<Money, MoneyError> {
        let discount = discount.clamp(0.0, 1.0);
        let keep = Decimal::from_f64(1.0 - discount).ok_or(MoneyError::NotFinite)?;
        Money::new(self.0 * keep * Decimal::from(quantity))
    }
}

fn round_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(SCALE);
    rounded
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s).map_err(|e| MoneyError::ParseError(e.to_string()))?;
        Money::new(decimal)
    }
}

impl TryFrom<String> for Money {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Money::from_str(&value)
    }
}

impl From<Money> for String {
    fn from(money: Money) -> Self {
        money.to_string()
    }
}

// Sums of non-negative values stay non-negative, so addition is infallible.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Self::Output {
        Money(round_cents(self.0 * Decimal::from(rhs)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
