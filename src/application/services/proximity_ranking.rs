//! # Proximity Ranking Service
//!
//! Finds the stations near a point and registers new ones.
//!
//! This module provides the [`ProximityRankingService`], which reads
//! candidates from a [`StationRepository`], measures each one from the query
//! point, drops those outside the search radius and orders the rest with a
//! [`RankingStrategy`]. The service keeps no state between calls: every
//! search is a single read against the directory and every registration a
//! single write.
//!
//! # Pipeline
//!
//! ```text
//! NearbyRequest ──parse──▶ ProximityQuery ──directory──▶ candidates
//!     │                                                     │
//!     └─ InvalidQuery (no read)          measure ─▶ filter radius ─▶ rank
//! ```
//!
//! # Examples
//!
//! ```
//! use fuel_locator::application::dto::NearbyRequest;
//! use fuel_locator::application::services::ProximityRankingService;
//! use fuel_locator::infrastructure::persistence::in_memory::InMemoryStationRepository;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let service = ProximityRankingService::with_defaults(Arc::new(InMemoryStationRepository::new()));
//! let nearby = service
//!     .find_nearby(&NearbyRequest::new("33.5731", "-7.5898"))
//!     .await
//!     .unwrap();
//! assert!(nearby.is_empty());
//! # });
//! ```

use crate::application::dto::NearbyRequest;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::ranking_strategy::{
    RankedStation, RankingOrder, RankingStrategy,
};
use crate::domain::entities::{NewStation, StationCandidate, StationRecord};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{GeoPoint, SearchRadius};
use crate::infrastructure::persistence::StationRepository;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for proximity ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingConfig {
    default_radius: SearchRadius,
    max_radius: SearchRadius,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_radius: SearchRadius::DEFAULT,
            max_radius: SearchRadius::DEFAULT_MAX,
        }
    }
}

impl RankingConfig {
    /// Creates a configuration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidField` if `default_radius` exceeds
    /// `max_radius`.
    pub fn new(default_radius: SearchRadius, max_radius: SearchRadius) -> DomainResult<Self> {
        if default_radius > max_radius {
            return Err(DomainError::invalid_field(
                "default_radius_meters",
                format!("{default_radius} exceeds the maximum of {max_radius}"),
            ));
        }
        Ok(Self {
            default_radius,
            max_radius,
        })
    }

    /// Returns the radius used when the caller supplies none.
    #[must_use]
    pub fn default_radius(&self) -> SearchRadius {
        self.default_radius
    }

    /// Returns the largest radius a caller may request.
    #[must_use]
    pub fn max_radius(&self) -> SearchRadius {
        self.max_radius
    }
}

/// A validated nearby-stations query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityQuery {
    /// Where the caller is.
    pub origin: GeoPoint,
    /// Radius override; `None` means the configured default.
    pub radius: Option<SearchRadius>,
    /// Result order.
    pub order: RankingOrder,
}

impl ProximityQuery {
    /// Creates a query around `origin` with the default radius and order.
    #[must_use]
    pub fn new(origin: GeoPoint) -> Self {
        Self {
            origin,
            radius: None,
            order: RankingOrder::Distance,
        }
    }

    /// Sets the radius override.
    #[must_use]
    pub fn with_radius(mut self, radius: SearchRadius) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Sets the result order.
    #[must_use]
    pub fn with_order(mut self, order: RankingOrder) -> Self {
        self.order = order;
        self
    }
}

/// Service ranking the stations around a point.
#[derive(Debug, Clone)]
pub struct ProximityRankingService {
    directory: Arc<dyn StationRepository>,
    config: RankingConfig,
}

impl ProximityRankingService {
    /// Creates a new service.
    #[must_use]
    pub fn new(directory: Arc<dyn StationRepository>, config: RankingConfig) -> Self {
        Self { directory, config }
    }

    /// Creates a new service with default configuration.
    #[must_use]
    pub fn with_defaults(directory: Arc<dyn StationRepository>) -> Self {
        Self::new(directory, RankingConfig::default())
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Validates a raw request.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidQuery` if a coordinate is missing or
    /// malformed, the radius is not a positive number within the configured
    /// maximum, or the order is unknown.
    pub fn parse_query(&self, request: &NearbyRequest) -> ApplicationResult<ProximityQuery> {
        let origin = GeoPoint::parse(request.lng.as_deref(), request.lat.as_deref())
            .map_err(ApplicationError::invalid_query)?;
        let radius =
            SearchRadius::parse(request.radius.as_deref()).map_err(ApplicationError::invalid_query)?;
        let order =
            RankingOrder::parse(request.sort.as_deref()).map_err(ApplicationError::invalid_query)?;

        Ok(ProximityQuery {
            origin,
            radius,
            order,
        })
    }

    /// Returns every station within the radius of the requested point.
    ///
    /// Parses the request, then behaves like [`rank_nearby`]. A malformed
    /// request never reaches the directory.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidQuery` for a malformed request and
    /// `ApplicationError::DirectoryUnavailable` if the directory fails.
    ///
    /// [`rank_nearby`]: ProximityRankingService::rank_nearby
    pub async fn find_nearby(&self, request: &NearbyRequest) -> ApplicationResult<Vec<RankedStation>> {
        let query = self.parse_query(request)?;
        self.rank_nearby(&query).await
    }

    /// Returns every station within the radius of `query.origin`, ordered.
    ///
    /// Each result carries its great-circle distance from the origin.
    /// Stations without a valid location are skipped. An empty vector means
    /// no station is in range.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidQuery` if the radius exceeds the
    /// configured maximum and `ApplicationError::DirectoryUnavailable` if the
    /// directory fails.
    pub async fn rank_nearby(&self, query: &ProximityQuery) -> ApplicationResult<Vec<RankedStation>> {
        let radius = self.resolve_radius(query.radius)?;
        let strategy = query.order.strategy();

        debug!(
            origin = %query.origin,
            radius = %radius,
            strategy = strategy.name(),
            "ranking nearby stations"
        );

        let candidates = self
            .directory
            .find_candidates(&query.origin, radius)
            .await
            .inspect_err(|e| warn!(error = %e, "station directory query failed"))?;

        let total = candidates.len();
        let within: Vec<RankedStation> = candidates
            .into_iter()
            .filter_map(|station| {
                let id = station.id();
                let ranked = RankedStation::measure(station, &query.origin);
                if ranked.is_none() {
                    debug!(station_id = %id, "skipping station without a valid location");
                }
                ranked
            })
            .filter(|ranked| radius.contains(ranked.distance_meters()))
            .collect();

        let ranked = strategy.rank(within);

        debug!(
            candidates = total,
            returned = ranked.len(),
            "nearby stations ranked"
        );

        Ok(ranked)
    }

    /// Validates and persists a new station.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidStation` if a field is missing or
    /// out of range (nothing is written), and
    /// `ApplicationError::DirectoryUnavailable` if the write fails.
    pub async fn register_station(&self, candidate: StationCandidate) -> ApplicationResult<StationRecord> {
        let station = NewStation::try_from(candidate).map_err(ApplicationError::invalid_station)?;

        let record = self
            .directory
            .insert(station)
            .await
            .inspect_err(|e| warn!(error = %e, "station directory insert failed"))?;

        info!(station_id = %record.id(), name = record.name(), "station registered");
        Ok(record)
    }

    fn resolve_radius(&self, requested: Option<SearchRadius>) -> ApplicationResult<SearchRadius> {
        match requested {
            None => Ok(self.config.default_radius),
            Some(radius) if radius > self.config.max_radius => {
                Err(ApplicationError::invalid_query(DomainError::invalid_field(
                    "radius",
                    format!("{radius} exceeds the maximum of {}", self.config.max_radius),
                )))
            }
            Some(radius) => Ok(radius),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{
        EARTH_RADIUS_METERS, FuelPrice, FuelType, StationId, StoredLocation,
        great_circle_distance,
    };
    use crate::infrastructure::persistence::in_memory::InMemoryStationRepository;
    use crate::infrastructure::persistence::{RepositoryError, RepositoryResult};
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Directory double counting calls, optionally failing every one.
    #[derive(Debug, Default)]
    struct RecordingDirectory {
        inner: InMemoryStationRepository,
        fail: bool,
        reads: AtomicUsize,
        writes: AtomicUsize,
    }

    impl RecordingDirectory {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl StationRepository for RecordingDirectory {
        async fn find_candidates(
            &self,
            near: &GeoPoint,
            radius: SearchRadius,
        ) -> RepositoryResult<Vec<StationRecord>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RepositoryError::connection("connection refused"));
            }
            self.inner.find_candidates(near, radius).await
        }

        async fn insert(&self, station: NewStation) -> RepositoryResult<StationRecord> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RepositoryError::connection("connection refused"));
            }
            self.inner.insert(station).await
        }

        async fn get(&self, id: &StationId) -> RepositoryResult<Option<StationRecord>> {
            self.inner.get(id).await
        }

        async fn count(&self) -> RepositoryResult<u64> {
            self.inner.count().await
        }
    }

    /// A station due north of (0, 0) at `meters`.
    fn station_at(name: &str, meters: f64, gazoil: i64) -> StationRecord {
        let lat = (meters / EARTH_RADIUS_METERS).to_degrees();
        StationRecord::from_parts(
            StationId::new_v4(),
            name,
            "addr",
            Some(StoredLocation::new(0.0, lat)),
            FuelPrice::new(Decimal::new(gazoil, 0)).unwrap(),
            FuelPrice::new(Decimal::new(12, 0)).unwrap(),
        )
    }

    fn service_with(records: Vec<StationRecord>) -> ProximityRankingService {
        ProximityRankingService::with_defaults(Arc::new(
            InMemoryStationRepository::with_records(records),
        ))
    }

    fn at_origin() -> NearbyRequest {
        NearbyRequest::new("0", "0")
    }

    fn names(ranked: &[RankedStation]) -> Vec<&str> {
        ranked.iter().map(|r| r.station().name()).collect()
    }

    fn candidate() -> StationCandidate {
        StationCandidate {
            name: Some("Winxo Hay Riad".to_string()),
            address: Some("Av. Annakhil, Rabat".to_string()),
            location: Some(StoredLocation::new(-6.87, 33.96)),
            gazoil_price: Some(Decimal::new(1175, 2)),
            diesel_price: Some(Decimal::new(1230, 2)),
        }
    }

    #[tokio::test]
    async fn radius_cutoff_and_order() {
        let service = service_with(vec![
            station_at("S3", 20_000.0, 1),
            station_at("S2", 5_000.0, 9),
            station_at("S1", 0.0, 10),
        ]);

        let ranked = service.find_nearby(&at_origin()).await.unwrap();
        assert_eq!(names(&ranked), ["S1", "S2"]);
        assert_eq!(ranked[0].distance_meters(), 0.0);
        assert!((ranked[1].distance_meters() - 5_000.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn equal_distance_cheaper_gazoil_first() {
        let service = service_with(vec![
            station_at("S4", 3_000.0, 12),
            station_at("S5", 3_000.0, 8),
        ]);

        let ranked = service.find_nearby(&at_origin()).await.unwrap();
        assert_eq!(names(&ranked), ["S5", "S4"]);
    }

    #[tokio::test]
    async fn empty_directory_is_empty_result() {
        let service = service_with(Vec::new());
        let ranked = service.find_nearby(&at_origin()).await.unwrap();
        assert!(ranked.is_empty());
    }

    #[tokio::test]
    async fn station_exactly_at_radius_is_included() {
        let edge = station_at("edge", 7_500.0, 10);
        let origin = GeoPoint::new(0.0, 0.0).unwrap();
        let exact = great_circle_distance(&origin, &edge.point().unwrap());
        let service = service_with(vec![edge]);

        let ranked = service
            .find_nearby(&at_origin().with_radius(exact.to_string()))
            .await
            .unwrap();
        assert_eq!(names(&ranked), ["edge"]);
    }

    #[tokio::test]
    async fn radius_override() {
        let service = service_with(vec![
            station_at("near", 1_000.0, 10),
            station_at("far", 20_000.0, 10),
        ]);

        let narrow = service
            .find_nearby(&at_origin().with_radius("500"))
            .await
            .unwrap();
        assert!(narrow.is_empty());

        let wide = service
            .find_nearby(&at_origin().with_radius("25000"))
            .await
            .unwrap();
        assert_eq!(names(&wide), ["near", "far"]);
    }

    #[tokio::test]
    async fn radius_above_maximum_is_invalid() {
        let directory = Arc::new(RecordingDirectory::default());
        let service = ProximityRankingService::with_defaults(directory.clone());

        let err = service
            .find_nearby(&at_origin().with_radius("150000"))
            .await
            .unwrap_err();
        assert!(err.is_invalid_query());
        assert_eq!(directory.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn configured_default_radius() {
        let directory = Arc::new(InMemoryStationRepository::with_records(vec![station_at(
            "mid", 8_000.0, 10,
        )]));
        let config = RankingConfig::new(
            SearchRadius::new(5_000.0).unwrap(),
            SearchRadius::new(50_000.0).unwrap(),
        )
        .unwrap();
        let service = ProximityRankingService::new(directory, config);

        assert!(service.find_nearby(&at_origin()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sort_by_cheapest_gazoil() {
        let service = service_with(vec![
            station_at("near-dear", 1_000.0, 12),
            station_at("far-cheap", 9_000.0, 8),
        ]);

        let ranked = service
            .find_nearby(&at_origin().with_sort("gazoil"))
            .await
            .unwrap();
        assert_eq!(names(&ranked), ["far-cheap", "near-dear"]);
    }

    #[tokio::test]
    async fn malformed_locations_are_excluded() {
        let missing = StationRecord::from_parts(
            StationId::new_v4(),
            "missing",
            "addr",
            None,
            FuelPrice::ZERO,
            FuelPrice::ZERO,
        );
        let out_of_range = StationRecord::from_parts(
            StationId::new_v4(),
            "out-of-range",
            "addr",
            Some(StoredLocation::new(0.0, 95.0)),
            FuelPrice::ZERO,
            FuelPrice::ZERO,
        );
        let service = service_with(vec![missing, out_of_range, station_at("ok", 10.0, 10)]);

        let ranked = service
            .find_nearby(&at_origin().with_radius("100000"))
            .await
            .unwrap();
        assert_eq!(names(&ranked), ["ok"]);
    }

    #[tokio::test]
    async fn non_numeric_latitude_never_reads() {
        let directory = Arc::new(RecordingDirectory::default());
        let service = ProximityRankingService::with_defaults(directory.clone());

        let err = service
            .find_nearby(&NearbyRequest::new("abc", "-7.6"))
            .await
            .unwrap_err();
        assert!(err.is_invalid_query());
        assert_eq!(directory.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_longitude_never_reads() {
        let directory = Arc::new(RecordingDirectory::default());
        let service = ProximityRankingService::with_defaults(directory.clone());

        let request = NearbyRequest {
            lat: Some("33.5".to_string()),
            ..NearbyRequest::default()
        };
        let err = service.find_nearby(&request).await.unwrap_err();
        assert!(err.is_invalid_query());
        assert!(err.to_string().contains("lng"));
        assert_eq!(directory.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_sort_is_invalid() {
        let service = service_with(Vec::new());
        let err = service
            .find_nearby(&at_origin().with_sort("rating"))
            .await
            .unwrap_err();
        assert!(err.is_invalid_query());
    }

    #[tokio::test]
    async fn directory_failure_is_not_empty_result() {
        let directory = Arc::new(RecordingDirectory::failing());
        let service = ProximityRankingService::with_defaults(directory.clone());

        let err = service.find_nearby(&at_origin()).await.unwrap_err();
        assert!(err.is_directory_unavailable());
        assert_eq!(directory.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn repeated_queries_are_identical() {
        let service = service_with(vec![
            station_at("a", 3_000.0, 9),
            station_at("b", 3_000.0, 9),
            station_at("c", 1_000.0, 11),
            station_at("d", 3_000.0, 7),
        ]);

        let first = service.find_nearby(&at_origin()).await.unwrap();
        let second = service.find_nearby(&at_origin()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(names(&first), ["c", "d", "a", "b"]);
    }

    #[tokio::test]
    async fn register_valid_station() {
        let directory = Arc::new(RecordingDirectory::default());
        let service = ProximityRankingService::with_defaults(directory.clone());

        let record = service.register_station(candidate()).await.unwrap();
        assert_eq!(record.name(), "Winxo Hay Riad");
        assert_eq!(directory.writes.load(Ordering::SeqCst), 1);

        let stored = directory.get(&record.id()).await.unwrap();
        assert_eq!(stored, Some(record));
    }

    #[tokio::test]
    async fn register_negative_price_never_writes() {
        let directory = Arc::new(RecordingDirectory::default());
        let service = ProximityRankingService::with_defaults(directory.clone());

        let mut bad = candidate();
        bad.gazoil_price = Some(Decimal::new(-1, 0));
        let err = service.register_station(bad).await.unwrap_err();

        assert!(err.is_invalid_station());
        assert_eq!(directory.writes.load(Ordering::SeqCst), 0);
        assert_eq!(directory.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn register_missing_name_never_writes() {
        let directory = Arc::new(RecordingDirectory::default());
        let service = ProximityRankingService::with_defaults(directory.clone());

        let mut bad = candidate();
        bad.name = None;
        let err = service.register_station(bad).await.unwrap_err();

        assert!(err.is_invalid_station());
        assert_eq!(directory.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn register_directory_failure() {
        let directory = Arc::new(RecordingDirectory::failing());
        let service = ProximityRankingService::with_defaults(directory);

        let err = service.register_station(candidate()).await.unwrap_err();
        assert!(err.is_directory_unavailable());
    }

    #[tokio::test]
    async fn registered_station_is_found() {
        let service = service_with(Vec::new());
        let record = service.register_station(candidate()).await.unwrap();

        let ranked = service
            .find_nearby(&NearbyRequest::new("33.96", "-6.87").with_sort("diesel"))
            .await
            .unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].station().id(), record.id());
        assert_eq!(ranked[0].station().price_of(FuelType::Diesel).get(), Decimal::new(123, 1));
    }

    #[test]
    fn config_rejects_default_above_max() {
        let result = RankingConfig::new(
            SearchRadius::new(20_000.0).unwrap(),
            SearchRadius::new(10_000.0).unwrap(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn config_defaults() {
        let config = RankingConfig::default();
        assert_eq!(config.default_radius().meters(), 15_000.0);
        assert_eq!(config.max_radius().meters(), 100_000.0);
    }

    #[test]
    fn parse_query_fields() {
        let service = service_with(Vec::new());
        let query = service
            .parse_query(&NearbyRequest::new("33.5", "-7.6").with_radius("2000").with_sort("diesel"))
            .unwrap();
        assert_eq!(query.origin.latitude(), 33.5);
        assert_eq!(query.origin.longitude(), -7.6);
        assert_eq!(query.radius, Some(SearchRadius::new(2_000.0).unwrap()));
        assert_eq!(query.order, RankingOrder::Cheapest(FuelType::Diesel));
    }
}
