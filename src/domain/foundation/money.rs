//! Money value object stored as whole cents.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Add;

use super::ValidationError;

/// A non-negative monetary amount with two decimal places.
///
/// Stored as integer cents so sums never drift; serialized as a plain
/// number (`1234.5` for 1234.50) so downstream consumers can decode it
/// without knowing about this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(u64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from whole cents.
    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Creates an amount from a decimal value, rounding half away from zero
    /// to the nearest cent.
    pub fn try_from_f64(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_format("money", "amount is not finite"));
        }
        if value < 0.0 {
            return Err(ValidationError::invalid_format("money", "amount is negative"));
        }
        Ok(Self((value * 100.0).round() as u64))
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> u64 {
        self.0
    }

    /// Returns the amount as a decimal value.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns true for a zero amount.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::try_from_f64(value).map_err(serde::de::Error::custom)
    }
}
