//! # Geographic Point
//!
//! Validated longitude/latitude pair.
//!
//! Coordinates are always carried in named fields. Positional forms such as
//! GeoJSON's `[longitude, latitude]` arrays are converted at the boundary
//! and never travel further into the crate.
//!
//! # Examples
//!
//! ```
//! use fuel_locator::domain::value_objects::GeoPoint;
//!
//! let casablanca = GeoPoint::new(-7.5898, 33.5731).unwrap();
//! assert_eq!(casablanca.longitude(), -7.5898);
//! assert_eq!(casablanca.latitude(), 33.5731);
//!
//! assert!(GeoPoint::new(-7.5898, 95.0).is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum valid longitude in degrees.
pub const MIN_LONGITUDE: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const MAX_LONGITUDE: f64 = 180.0;
/// Minimum valid latitude in degrees.
pub const MIN_LATITUDE: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const MAX_LATITUDE: f64 = 90.0;

/// A point on the Earth's surface.
///
/// # Invariants
///
/// - `longitude` is finite and within `[-180, 180]`
/// - `latitude` is finite and within `[-90, 90]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    longitude: f64,
    latitude: f64,
}

impl GeoPoint {
    /// Creates a validated point.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinate` if either coordinate is not
    /// finite or lies outside its range.
    pub fn new(longitude: f64, latitude: f64) -> DomainResult<Self> {
        check_axis("longitude", longitude, MIN_LONGITUDE, MAX_LONGITUDE)?;
        check_axis("latitude", latitude, MIN_LATITUDE, MAX_LATITUDE)?;
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Parses a point from optional textual coordinates.
    ///
    /// Used for query-string input where either value may be absent or
    /// not a number at all.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingField` if a coordinate is absent,
    /// `DomainError::InvalidField` if it is not a number, and
    /// `DomainError::InvalidCoordinate` if it is out of range.
    pub fn parse(longitude: Option<&str>, latitude: Option<&str>) -> DomainResult<Self> {
        let longitude = parse_number("lng", longitude)?;
        let latitude = parse_number("lat", latitude)?;
        Self::new(longitude, latitude)
    }

    /// Returns the longitude in degrees.
    #[inline]
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns the latitude in degrees.
    #[inline]
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(lng={:.6}, lat={:.6})", self.longitude, self.latitude)
    }
}

impl TryFrom<StoredLocation> for GeoPoint {
    type Error = DomainError;

    fn try_from(value: StoredLocation) -> Result<Self, Self::Error> {
        Self::new(value.longitude, value.latitude)
    }
}

impl<'de> Deserialize<'de> for GeoPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = StoredLocation::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// A coordinate pair exactly as the directory stores it.
///
/// Nothing is guaranteed about the values; convert with
/// `GeoPoint::try_from` before doing any geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredLocation {
    /// Longitude in degrees, unchecked.
    pub longitude: f64,
    /// Latitude in degrees, unchecked.
    pub latitude: f64,
}

impl StoredLocation {
    /// Creates a stored location without validation.
    #[must_use]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<GeoPoint> for StoredLocation {
    fn from(point: GeoPoint) -> Self {
        Self::new(point.longitude, point.latitude)
    }
}

fn check_axis(axis: &'static str, value: f64, min: f64, max: f64) -> DomainResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(DomainError::invalid_coordinate(axis, value, min, max))
    }
}

/// Parses a required decimal number from text.
pub(crate) fn parse_number(field: &'static str, raw: Option<&str>) -> DomainResult<f64> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(DomainError::MissingField(field))?;

    raw.parse::<f64>()
        .map_err(|_| DomainError::invalid_field(field, format!("'{raw}' is not a number")))
}
