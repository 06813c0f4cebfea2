//! Discounts

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::round_currency;

/// Errors related to discount construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// The percentage is outside the 0-100 range.
    #[error("discount must be between 0 and 100 percent, got {0}")]
    OutOfRange(u8),
}

/// A whole-number discount percentage between 0 and 100 inclusive.
///
/// Negotiated per cart entry when the item is added; both the checkout total
/// and the recorded purchase price derive from it. Out-of-range input is
/// rejected at construction, never clamped silently.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct DiscountPercent(u8);

impl DiscountPercent {
    /// No discount.
    pub const ZERO: Self = Self(0);

    /// Create a validated percentage.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::OutOfRange`] if `percent` exceeds 100.
    pub fn new(percent: u8) -> Result<Self, DiscountError> {
        if percent > 100 {
            return Err(DiscountError::OutOfRange(percent));
        }

        Ok(Self(percent))
    }

    /// The raw percentage value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// The retained fraction of the list price, `1 - percent/100`.
    #[must_use]
    pub fn retained_fraction(self) -> Decimal {
        (Decimal::ONE_HUNDRED - Decimal::from(self.0)) / Decimal::ONE_HUNDRED
    }
}

impl TryFrom<u8> for DiscountPercent {
    type Error = DiscountError;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        Self::new(percent)
    }
}

impl From<DiscountPercent> for u8 {
    fn from(discount: DiscountPercent) -> Self {
        discount.0
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// The price actually charged for a list price under a discount.
#[must_use]
pub fn discounted_price(list_price: Decimal, discount: DiscountPercent) -> Decimal {
    round_currency(list_price * discount.retained_fraction())
}
