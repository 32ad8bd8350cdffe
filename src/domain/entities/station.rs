//! # Station Entity
//!
//! Fuel stations as the directory holds them, and the candidates submitted
//! for registration.
//!
//! - [`StationCandidate`]: unvalidated registration input, every field optional
//! - [`NewStation`]: a candidate that passed validation, ready to persist
//! - [`StationRecord`]: a persisted station with its assigned identifier
//!
//! # Examples
//!
//! ```
//! use fuel_locator::domain::entities::station::{NewStation, StationCandidate};
//! use fuel_locator::domain::value_objects::StoredLocation;
//! use rust_decimal::Decimal;
//!
//! let candidate = StationCandidate {
//!     name: Some("Afriquia Maarif".to_string()),
//!     address: Some("Bd Zerktouni, Casablanca".to_string()),
//!     location: Some(StoredLocation::new(-7.6322, 33.5883)),
//!     gazoil_price: Some(Decimal::new(1189, 2)),
//!     diesel_price: Some(Decimal::new(1245, 2)),
//! };
//!
//! let station = NewStation::try_from(candidate).unwrap();
//! assert_eq!(station.name(), "Afriquia Maarif");
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{FuelPrice, FuelType, GeoPoint, StationId, StoredLocation};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registration input before validation.
///
/// Every field is optional so that a missing field is reported as a
/// validation failure rather than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationCandidate {
    /// Display name.
    pub name: Option<String>,
    /// Display address.
    pub address: Option<String>,
    /// Coordinates, unchecked.
    pub location: Option<StoredLocation>,
    /// Gazoil price, unchecked.
    pub gazoil_price: Option<Decimal>,
    /// Diesel price, unchecked.
    pub diesel_price: Option<Decimal>,
}

/// A validated station awaiting persistence.
///
/// # Invariants
///
/// - `name` and `address` are non-blank and trimmed
/// - `location` is a valid [`GeoPoint`]
/// - both prices are non-negative
#[derive(Debug, Clone, PartialEq)]
pub struct NewStation {
    name: String,
    address: String,
    location: GeoPoint,
    gazoil_price: FuelPrice,
    diesel_price: FuelPrice,
}

impl NewStation {
    /// Creates a validated station from already-typed parts.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingField` if `name` or `address` is blank.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        location: GeoPoint,
        gazoil_price: FuelPrice,
        diesel_price: FuelPrice,
    ) -> DomainResult<Self> {
        Ok(Self {
            name: required_text("name", Some(name.into()))?,
            address: required_text("address", Some(address.into()))?,
            location,
            gazoil_price,
            diesel_price,
        })
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the location.
    #[must_use]
    pub fn location(&self) -> GeoPoint {
        self.location
    }

    /// Returns the gazoil price.
    #[must_use]
    pub fn gazoil_price(&self) -> FuelPrice {
        self.gazoil_price
    }

    /// Returns the diesel price.
    #[must_use]
    pub fn diesel_price(&self) -> FuelPrice {
        self.diesel_price
    }

    /// Attaches the identifier assigned by the directory.
    #[must_use]
    pub fn into_record(self, id: StationId) -> StationRecord {
        StationRecord {
            id,
            name: self.name,
            address: self.address,
            location: Some(self.location.into()),
            gazoil_price: self.gazoil_price,
            diesel_price: self.diesel_price,
        }
    }
}

impl TryFrom<StationCandidate> for NewStation {
    type Error = DomainError;

    fn try_from(candidate: StationCandidate) -> Result<Self, Self::Error> {
        let name = required_text("name", candidate.name)?;
        let address = required_text("address", candidate.address)?;
        let location = candidate
            .location
            .ok_or(DomainError::MissingField("location"))
            .and_then(GeoPoint::try_from)?;
        let gazoil_price = required_price(FuelType::Gazoil, candidate.gazoil_price)?;
        let diesel_price = required_price(FuelType::Diesel, candidate.diesel_price)?;

        Ok(Self {
            name,
            address,
            location,
            gazoil_price,
            diesel_price,
        })
    }
}

/// A station as held by the directory.
///
/// The location is kept exactly as stored. Records written through
/// [`NewStation`] always carry a valid one, but imported data may not, so
/// readers go through [`StationRecord::point`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    id: StationId,
    name: String,
    address: String,
    location: Option<StoredLocation>,
    gazoil_price: FuelPrice,
    diesel_price: FuelPrice,
}

impl StationRecord {
    /// Reassembles a record read back from storage.
    #[must_use]
    pub fn from_parts(
        id: StationId,
        name: impl Into<String>,
        address: impl Into<String>,
        location: Option<StoredLocation>,
        gazoil_price: FuelPrice,
        diesel_price: FuelPrice,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            location,
            gazoil_price,
            diesel_price,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub fn id(&self) -> StationId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the location exactly as stored.
    #[must_use]
    pub fn stored_location(&self) -> Option<StoredLocation> {
        self.location
    }

    /// Returns the location if it is present and valid.
    #[must_use]
    pub fn point(&self) -> Option<GeoPoint> {
        self.location.and_then(|l| GeoPoint::try_from(l).ok())
    }

    /// Returns the gazoil price.
    #[must_use]
    pub fn gazoil_price(&self) -> FuelPrice {
        self.gazoil_price
    }

    /// Returns the diesel price.
    #[must_use]
    pub fn diesel_price(&self) -> FuelPrice {
        self.diesel_price
    }

    /// Returns the price of the given fuel.
    #[must_use]
    pub fn price_of(&self, fuel: FuelType) -> FuelPrice {
        match fuel {
            FuelType::Gazoil => self.gazoil_price,
            FuelType::Diesel => self.diesel_price,
        }
    }
}

impl fmt::Display for StationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station({} '{}')", self.id, self.name)
    }
}

fn required_text(field: &'static str, value: Option<String>) -> DomainResult<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(DomainError::MissingField(field))
}

fn required_price(fuel: FuelType, value: Option<Decimal>) -> DomainResult<FuelPrice> {
    let field = fuel.price_field();
    value
        .ok_or(DomainError::MissingField(field))
        .and_then(|v| FuelPrice::for_field(field, v))
}
