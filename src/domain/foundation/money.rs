//! Money value object stored as integer minor units (cents).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Non-negative monetary amount in cents.
///
/// All pricing arithmetic happens on integers; fractional dollars
/// never enter the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents, rejecting negative amounts.
    pub fn from_cents(cents: i64) -> Result<Self, ValidationError> {
        if cents < 0 {
            return Err(ValidationError::invalid_format(
                "amount_cents",
                format!("amount cannot be negative, got {}", cents),
            ));
        }
        Ok(Self(cents))
    }

    /// Zero amount.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Adds two amounts.
    pub fn plus(&self, other: Money) -> Money {
        Money(self.0 + other.0)
    }

    /// Prorates this amount, treated as an hourly rate, over the given
    /// number of minutes. Rounds half-up to the nearest cent.
    pub fn prorate_hourly(&self, minutes: u32) -> Money {
        Money((self.0 * minutes as i64 + 30) / 60)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
