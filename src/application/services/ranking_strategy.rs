//! # Ranking Strategy
//!
//! Strategies for ordering nearby stations.
//!
//! This module provides the [`RankingStrategy`] trait and its
//! implementations. [`NearestFirstStrategy`] is the authoritative order
//! returned by default: distance ascending, then gazoil price ascending.
//! Every strategy sorts stably, so stations that compare equal keep the
//! order in which the directory returned them and the output is a pure
//! function of the input.

use crate::domain::entities::StationRecord;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{FuelType, GeoPoint, great_circle_distance};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A station with its distance from the query point.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStation {
    station: StationRecord,
    location: GeoPoint,
    distance_meters: f64,
}

impl RankedStation {
    /// Measures `station` from `origin`.
    ///
    /// Returns `None` if the station has no valid location.
    #[must_use]
    pub fn measure(station: StationRecord, origin: &GeoPoint) -> Option<Self> {
        let location = station.point()?;
        let distance_meters = great_circle_distance(origin, &location);
        Some(Self {
            station,
            location,
            distance_meters,
        })
    }

    /// Returns the underlying station.
    #[must_use]
    pub fn station(&self) -> &StationRecord {
        &self.station
    }

    /// Returns the validated station location.
    #[must_use]
    pub fn location(&self) -> GeoPoint {
        self.location
    }

    /// Returns the great-circle distance from the query point, in metres.
    #[must_use]
    pub fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    /// Consumes the ranked station, returning the underlying record.
    #[must_use]
    pub fn into_station(self) -> StationRecord {
        self.station
    }
}

impl fmt::Display for RankedStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RankedStation({} at {:.1}m gazoil={})",
            self.station,
            self.distance_meters,
            self.station.gazoil_price()
        )
    }
}

/// Trait for ranking strategies.
///
/// Implementations define a total order over stations. [`rank`] sorts
/// stably with that order.
///
/// [`rank`]: RankingStrategy::rank
pub trait RankingStrategy: Send + Sync + fmt::Debug {
    /// Compares two stations; `Less` means `a` ranks ahead of `b`.
    fn compare(&self, a: &RankedStation, b: &RankedStation) -> Ordering;

    /// Sorts the given stations, best first.
    fn rank(&self, mut stations: Vec<RankedStation>) -> Vec<RankedStation> {
        stations.sort_by(|a, b| self.compare(a, b));
        stations
    }

    /// Returns the name of this ranking strategy.
    fn name(&self) -> &'static str;
}

/// Nearest station first; equal distances go to the cheapest gazoil.
///
/// This is the default order of every nearby search.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestFirstStrategy;

impl NearestFirstStrategy {
    /// Creates a new nearest-first strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RankingStrategy for NearestFirstStrategy {
    fn compare(&self, a: &RankedStation, b: &RankedStation) -> Ordering {
        a.distance_meters
            .total_cmp(&b.distance_meters)
            .then_with(|| a.station.gazoil_price().cmp(&b.station.gazoil_price()))
    }

    fn name(&self) -> &'static str {
        "NearestFirst"
    }
}

/// Cheapest price of one fuel first; equal prices go to the nearest.
#[derive(Debug, Clone, Copy)]
pub struct CheapestFuelStrategy {
    /// The fuel whose price decides the order.
    pub fuel: FuelType,
}

impl CheapestFuelStrategy {
    /// Creates a cheapest-first strategy for `fuel`.
    #[must_use]
    pub const fn new(fuel: FuelType) -> Self {
        Self { fuel }
    }
}

impl RankingStrategy for CheapestFuelStrategy {
    fn compare(&self, a: &RankedStation, b: &RankedStation) -> Ordering {
        a.station
            .price_of(self.fuel)
            .cmp(&b.station.price_of(self.fuel))
            .then_with(|| a.distance_meters.total_cmp(&b.distance_meters))
    }

    fn name(&self) -> &'static str {
        match self.fuel {
            FuelType::Gazoil => "CheapestGazoil",
            FuelType::Diesel => "CheapestDiesel",
        }
    }
}

static NEAREST_FIRST: NearestFirstStrategy = NearestFirstStrategy::new();
static CHEAPEST_GAZOIL: CheapestFuelStrategy = CheapestFuelStrategy::new(FuelType::Gazoil);
static CHEAPEST_DIESEL: CheapestFuelStrategy = CheapestFuelStrategy::new(FuelType::Diesel);

/// Order requested by the caller of a nearby search.
///
/// Parsed from the `sort` query parameter: `distance` (the default),
/// `gazoil` or `diesel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RankingOrder {
    /// Nearest first, then cheapest gazoil.
    #[default]
    Distance,
    /// Cheapest of the given fuel first, then nearest.
    Cheapest(FuelType),
}

impl RankingOrder {
    /// Parses an optional `sort` value; absent or blank means [`RankingOrder::Distance`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidField` for an unknown order.
    pub fn parse(raw: Option<&str>) -> DomainResult<Self> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(Self::Distance),
            Some(text) => text.parse(),
        }
    }

    /// Returns the strategy implementing this order.
    #[must_use]
    pub fn strategy(self) -> &'static dyn RankingStrategy {
        match self {
            Self::Distance => &NEAREST_FIRST,
            Self::Cheapest(FuelType::Gazoil) => &CHEAPEST_GAZOIL,
            Self::Cheapest(FuelType::Diesel) => &CHEAPEST_DIESEL,
        }
    }
}

impl FromStr for RankingOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if normalized == "distance" {
            return Ok(Self::Distance);
        }
        normalized.parse::<FuelType>().map(Self::Cheapest).map_err(|_| {
            DomainError::invalid_field(
                "sort",
                format!("unknown order '{s}' (expected distance, gazoil or diesel)"),
            )
        })
    }
}

impl fmt::Display for RankingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distance => f.write_str("distance"),
            Self::Cheapest(fuel) => write!(f, "{fuel}"),
        }
    }
}
