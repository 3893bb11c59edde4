//! Price value object
//!
//! A non-negative decimal amount. Decimal arithmetic avoids the rounding
//! surprises of binary floating point for currency values.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Non-negative catalog price
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Zero price
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a validated price
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the amount is negative.
    pub fn new(amount: Decimal) -> Result<Self, DomainError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::ValidationError(format!(
                "price must not be negative, got {amount}"
            )));
        }
        Ok(Self(amount))
    }

    /// The decimal amount
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
