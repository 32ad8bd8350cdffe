//! # Fuel Price
//!
//! Non-negative decimal price per unit of fuel, in local currency.

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative fuel price.
///
/// # Invariants
///
/// - Never negative
///
/// # Examples
///
/// ```
/// use fuel_locator::domain::value_objects::FuelPrice;
/// use rust_decimal::Decimal;
///
/// let price = FuelPrice::new(Decimal::new(1189, 2)).unwrap();
/// assert_eq!(price.to_string(), "11.89");
///
/// assert!(FuelPrice::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FuelPrice(Decimal);

impl FuelPrice {
    /// Zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a validated price.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if `value` is negative.
    pub fn new(value: Decimal) -> DomainResult<Self> {
        Self::for_field("price", value)
    }

    /// Creates a validated price, naming `field` in the error.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if `value` is negative.
    pub fn for_field(field: &'static str, value: Decimal) -> DomainResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::invalid_price(field, value));
        }
        Ok(Self(value.normalize()))
    }

    /// Returns the underlying decimal.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for FuelPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
