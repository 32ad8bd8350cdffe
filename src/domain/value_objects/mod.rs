//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Geography
//!
//! - [`GeoPoint`]: Validated longitude/latitude pair
//! - [`StoredLocation`]: Unchecked coordinates as persisted
//! - [`SearchRadius`]: Positive search radius in metres
//! - [`GeoBounds`]: Bounding box used as a directory prefilter
//! - [`great_circle_distance`]: Haversine distance in metres
//!
//! ## Pricing
//!
//! - [`FuelPrice`]: Non-negative decimal price
//! - [`FuelType`]: Gazoil or Diesel
//!
//! ## Identity
//!
//! - [`StationId`]: UUID-based station identifier

pub mod distance;
pub mod enums;
pub mod geo_point;
pub mod ids;
pub mod price;

pub use distance::{EARTH_RADIUS_METERS, GeoBounds, SearchRadius, great_circle_distance};
pub use enums::FuelType;
pub use geo_point::{GeoPoint, StoredLocation};
pub use ids::StationId;
pub use price::FuelPrice;
