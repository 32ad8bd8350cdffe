//! # Data Transfer Objects
//!
//! Raw request shapes accepted by the application services.

use serde::{Deserialize, Serialize};

/// A nearby-stations request exactly as the caller sent it.
///
/// All fields are text so that absence and malformed numbers are reported
/// by the ranking service as invalid queries, not by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearbyRequest {
    /// Latitude in degrees.
    pub lat: Option<String>,
    /// Longitude in degrees.
    pub lng: Option<String>,
    /// Optional radius override, in metres.
    pub radius: Option<String>,
    /// Optional order: `distance`, `gazoil` or `diesel`.
    pub sort: Option<String>,
}

impl NearbyRequest {
    /// Creates a request for the given coordinates with no overrides.
    #[must_use]
    pub fn new(lat: impl Into<String>, lng: impl Into<String>) -> Self {
        Self {
            lat: Some(lat.into()),
            lng: Some(lng.into()),
            radius: None,
            sort: None,
        }
    }

    /// Sets the radius override.
    #[must_use]
    pub fn with_radius(mut self, radius: impl Into<String>) -> Self {
        self.radius = Some(radius.into());
        self
    }

    /// Sets the order.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}
