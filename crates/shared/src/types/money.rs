//! Money type with a fixed two-digit decimal scale.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` and always stores exactly
//! [`Money::SCALE`] fractional digits.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors raised by exact money arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The value carries more fractional digits than the target scale allows.
    #[error("{value} cannot be represented exactly with {scale} decimal places")]
    InexactScale {
        /// The offending value.
        value: Decimal,
        /// The scale it had to fit.
        scale: u32,
    },

    /// The operation exceeded the representable range.
    #[error("arithmetic overflow")]
    Overflow,
}

/// A monetary amount stored at scale 2.
///
/// Arithmetic never rounds: an operation whose exact result does not fit the
/// requested scale fails with [`MoneyError::InexactScale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    /// Storage and display scale for every amount.
    pub const SCALE: u32 = 2;

    /// Creates a money value, rescaling to two decimal places.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::InexactScale`] if `amount` has more than two
    /// significant fractional digits.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        Self::at_scale(amount, Self::SCALE)
    }

    /// A zero amount.
    #[must_use]
    pub fn zero() -> Self {
        Self(Decimal::new(0, Self::SCALE))
    }

    /// Returns the underlying decimal (always scale 2).
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Adds `other`, requiring the exact sum to fit `scale` fractional digits.
    ///
    /// The result is stored at [`Money::SCALE`].
    pub fn add_exact(&self, other: Self, scale: u32) -> Result<Self, MoneyError> {
        let sum = self.0.checked_add(other.0).ok_or(MoneyError::Overflow)?;
        Self::require_scale(sum, scale)?;
        Self::new(sum)
    }

    /// Subtracts `other`, requiring the exact difference to fit `scale`
    /// fractional digits.
    pub fn sub_exact(&self, other: Self, scale: u32) -> Result<Self, MoneyError> {
        let difference = self.0.checked_sub(other.0).ok_or(MoneyError::Overflow)?;
        Self::require_scale(difference, scale)?;
        Self::new(difference)
    }

    fn require_scale(value: Decimal, scale: u32) -> Result<(), MoneyError> {
        if value.normalize().scale() > scale {
            return Err(MoneyError::InexactScale { value, scale });
        }
        Ok(())
    }

    fn at_scale(amount: Decimal, scale: u32) -> Result<Self, MoneyError> {
        Self::require_scale(amount, scale)?;
        let mut scaled = amount;
        scaled.rescale(scale);
        // rescale silently caps the scale when the mantissa would overflow
        if scaled.scale() != scale || scaled != amount {
            return Err(MoneyError::Overflow);
        }
        Ok(Self(scaled))
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}
