//! # Domain Enums
//!
//! Fuel types sold at a station.

use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fuel a station prices.
///
/// # Examples
///
/// ```
/// use fuel_locator::domain::value_objects::FuelType;
///
/// let fuel: FuelType = "diesel".parse().unwrap();
/// assert_eq!(fuel, FuelType::Diesel);
/// assert_eq!(fuel.price_field(), "dieselPrice");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    /// Gazoil.
    Gazoil,
    /// Diesel.
    Diesel,
}

impl FuelType {
    /// Returns the lowercase name of this fuel.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gazoil => "gazoil",
            Self::Diesel => "diesel",
        }
    }

    /// Returns the wire name of this fuel's price field.
    #[must_use]
    pub const fn price_field(&self) -> &'static str {
        match self {
            Self::Gazoil => "gazoilPrice",
            Self::Diesel => "dieselPrice",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FuelType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gazoil" => Ok(Self::Gazoil),
            "diesel" => Ok(Self::Diesel),
            other => Err(DomainError::invalid_field(
                "fuel",
                format!("unknown fuel '{other}'"),
            )),
        }
    }
}
