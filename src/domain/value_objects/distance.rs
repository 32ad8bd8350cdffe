//! # Great-Circle Distance
//!
//! Spherical distance between two [`GeoPoint`]s and the search radius that
//! bounds a proximity query.
//!
//! Distances use the haversine formula on a sphere of radius
//! [`EARTH_RADIUS_METERS`] (6 378 100 m), the same sphere a spherical
//! `$geoNear` query uses, so results agree with stores that index GeoJSON
//! points that way.
//!
//! # Examples
//!
//! ```
//! use fuel_locator::domain::value_objects::{GeoPoint, great_circle_distance};
//!
//! let a = GeoPoint::new(-7.60, 33.50).unwrap();
//! let b = GeoPoint::new(-7.60, 33.60).unwrap();
//!
//! let meters = great_circle_distance(&a, &b);
//! assert!((meters - 11_131.95).abs() < 1.0);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::geo_point::{
    GeoPoint, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE, parse_number,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sphere radius used for all distance computations, in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_378_100.0;

/// Returns the great-circle distance between two points, in metres.
///
/// The result is non-negative, symmetric, and exactly `0.0` for identical
/// points.
#[must_use]
pub fn great_circle_distance(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let d_lat = (to.latitude() - from.latitude()).to_radians();
    let d_lng = (to.longitude() - from.longitude()).to_radians();

    let a = ((d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_METERS * a.sqrt().asin()
}

/// Radius of a proximity search, in metres.
///
/// # Invariants
///
/// - Finite and strictly positive
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SearchRadius(f64);

impl SearchRadius {
    /// Default radius of a nearby search: 15 km.
    pub const DEFAULT: Self = Self(15_000.0);

    /// Default upper bound on a caller-supplied radius: 100 km.
    pub const DEFAULT_MAX: Self = Self(100_000.0);

    /// Creates a validated radius.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRadius` if `meters` is not a positive
    /// finite number.
    pub fn new(meters: f64) -> DomainResult<Self> {
        if meters.is_finite() && meters > 0.0 {
            Ok(Self(meters))
        } else {
            Err(DomainError::InvalidRadius(meters))
        }
    }

    /// Parses a radius from query-string text.
    ///
    /// Returns `Ok(None)` when no radius was supplied.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidField` for non-numeric text and
    /// `DomainError::InvalidRadius` for non-positive values.
    pub fn parse(raw: Option<&str>) -> DomainResult<Option<Self>> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(None),
            Some(text) => {
                let meters = parse_number("radius", Some(text))?;
                Self::new(meters).map(Some)
            }
        }
    }

    /// Returns the radius in metres.
    #[inline]
    #[must_use]
    pub fn meters(&self) -> f64 {
        self.0
    }

    /// Returns true if `distance_meters` lies within this radius (inclusive).
    #[inline]
    #[must_use]
    pub fn contains(&self, distance_meters: f64) -> bool {
        distance_meters <= self.0
    }
}

impl TryFrom<f64> for SearchRadius {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SearchRadius> for f64 {
    fn from(radius: SearchRadius) -> Self {
        radius.0
    }
}

impl fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.0)
    }
}

/// Latitude/longitude rectangle enclosing a search circle.
///
/// Directories use it as an index-friendly prefilter. It is conservative:
/// every point within the circle lies inside the box, the converse does not
/// hold, so exact filtering still happens on the great-circle distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    /// Southern edge in degrees.
    pub min_latitude: f64,
    /// Northern edge in degrees.
    pub max_latitude: f64,
    /// Western edge in degrees.
    pub min_longitude: f64,
    /// Eastern edge in degrees.
    pub max_longitude: f64,
}

/// Padding added to every edge to absorb floating-point error.
const BOUNDS_PADDING_DEGREES: f64 = 1e-6;

impl GeoBounds {
    /// Computes the box enclosing the circle of `radius` around `center`.
    ///
    /// Returns `None` when the circle touches a pole or crosses the
    /// antimeridian; a single rectangle cannot describe those cases and the
    /// caller should scan without a prefilter.
    #[must_use]
    pub fn around(center: &GeoPoint, radius: SearchRadius) -> Option<Self> {
        let angular = radius.meters() / EARTH_RADIUS_METERS;
        let lat = center.latitude().to_radians();
        let lng = center.longitude().to_radians();

        let min_lat = (lat - angular).to_degrees() - BOUNDS_PADDING_DEGREES;
        let max_lat = (lat + angular).to_degrees() + BOUNDS_PADDING_DEGREES;
        if min_lat <= MIN_LATITUDE || max_lat >= MAX_LATITUDE {
            return None;
        }

        let ratio = angular.sin() / lat.cos();
        if !(0.0..1.0).contains(&ratio) {
            return None;
        }
        let d_lng = ratio.asin();

        let min_lng = (lng - d_lng).to_degrees() - BOUNDS_PADDING_DEGREES;
        let max_lng = (lng + d_lng).to_degrees() + BOUNDS_PADDING_DEGREES;
        if min_lng < MIN_LONGITUDE || max_lng > MAX_LONGITUDE {
            return None;
        }

        Some(Self {
            min_latitude: min_lat,
            max_latitude: max_lat,
            min_longitude: min_lng,
            max_longitude: max_lng,
        })
    }

    /// Returns true if the point lies inside the box.
    #[must_use]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&point.latitude())
            && (self.min_longitude..=self.max_longitude).contains(&point.longitude())
    }
}
