//! Property tests for nearby-station ranking.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use fuel_locator::application::services::{ProximityQuery, ProximityRankingService};
use fuel_locator::domain::entities::StationRecord;
use fuel_locator::domain::value_objects::{
    FuelPrice, GeoPoint, SearchRadius, StationId, StoredLocation, great_circle_distance,
};
use fuel_locator::infrastructure::persistence::in_memory::InMemoryStationRepository;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;

/// Offset from the query point in degrees, gazoil price in cents, and
/// whether the stored location is usable.
type StationShape = (f64, f64, i64, bool);

fn station_shape() -> impl Strategy<Value = StationShape> {
    (-0.6f64..0.6, -0.6f64..0.6, 0i64..400, prop::bool::weighted(0.85))
}

fn build(origin: GeoPoint, shapes: &[StationShape]) -> Vec<StationRecord> {
    shapes
        .iter()
        .enumerate()
        .map(|(i, &(d_lng, d_lat, cents, valid))| {
            let location = if valid {
                Some(StoredLocation::new(
                    origin.longitude() + d_lng,
                    origin.latitude() + d_lat,
                ))
            } else if i % 2 == 0 {
                None
            } else {
                Some(StoredLocation::new(f64::NAN, origin.latitude()))
            };
            StationRecord::from_parts(
                StationId::new_v4(),
                format!("station-{i}"),
                "addr",
                location,
                // Coarse prices so that equal-distance ties still hit the price.
                FuelPrice::new(Decimal::new(1000 + cents / 100 * 100, 2)).unwrap(),
                FuelPrice::new(Decimal::new(1100, 2)).unwrap(),
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn ranking_properties(
        lng in -170.0f64..170.0,
        lat in -60.0f64..60.0,
        radius in 1_000.0f64..60_000.0,
        shapes in prop::collection::vec(station_shape(), 0..40),
    ) {
        let origin = GeoPoint::new(lng, lat).unwrap();
        let radius = SearchRadius::new(radius).unwrap();
        let records = build(origin, &shapes);

        let expected: HashSet<StationId> = records
            .iter()
            .filter_map(|r| r.point().map(|p| (r.id(), great_circle_distance(&origin, &p))))
            .filter(|(_, d)| *d <= radius.meters())
            .map(|(id, _)| id)
            .collect();
        let malformed: HashSet<StationId> = records
            .iter()
            .filter(|r| r.point().is_none())
            .map(StationRecord::id)
            .collect();

        let service = ProximityRankingService::with_defaults(Arc::new(
            InMemoryStationRepository::with_records(records),
        ));
        let query = ProximityQuery::new(origin).with_radius(radius);

        let first = tokio_test::block_on(service.rank_nearby(&query)).unwrap();
        let second = tokio_test::block_on(service.rank_nearby(&query)).unwrap();

        // Same input, same output.
        prop_assert_eq!(&first, &second);

        // Exactly the stations within the radius, none of the malformed ones.
        let returned: HashSet<StationId> = first.iter().map(|r| r.station().id()).collect();
        prop_assert_eq!(returned.len(), first.len());
        prop_assert_eq!(&returned, &expected);
        prop_assert!(returned.is_disjoint(&malformed));

        for ranked in &first {
            prop_assert!(ranked.distance_meters() >= 0.0);
            prop_assert!(ranked.distance_meters() <= radius.meters());
        }

        // Distance ascending, gazoil ascending among equal distances.
        for pair in first.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.distance_meters() <= b.distance_meters());
            if a.distance_meters() == b.distance_meters() {
                prop_assert!(a.station().gazoil_price() <= b.station().gazoil_price());
            }
        }
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_itself(
        lng1 in -180.0f64..=180.0,
        lat1 in -90.0f64..=90.0,
        lng2 in -180.0f64..=180.0,
        lat2 in -90.0f64..=90.0,
    ) {
        let a = GeoPoint::new(lng1, lat1).unwrap();
        let b = GeoPoint::new(lng2, lat2).unwrap();

        prop_assert_eq!(great_circle_distance(&a, &a), 0.0);
        let ab = great_circle_distance(&a, &b);
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - great_circle_distance(&b, &a)).abs() < 1e-6);
    }
}

#[test]
fn duplicate_locations_keep_retrieval_order() {
    let origin = GeoPoint::new(-7.6, 33.5).unwrap();
    let price = FuelPrice::new(Decimal::new(1189, 2)).unwrap();
    let records: Vec<StationRecord> = (0..5)
        .map(|i| {
            StationRecord::from_parts(
                StationId::new_v4(),
                format!("twin-{i}"),
                "addr",
                Some(StoredLocation::new(-7.61, 33.51)),
                price,
                price,
            )
        })
        .collect();
    let ids: Vec<StationId> = records.iter().map(StationRecord::id).collect();

    let service = ProximityRankingService::with_defaults(Arc::new(
        InMemoryStationRepository::with_records(records),
    ));
    let ranked = tokio_test::block_on(service.rank_nearby(&ProximityQuery::new(origin))).unwrap();

    let returned: Vec<StationId> = ranked.iter().map(|r| r.station().id()).collect();
    assert_eq!(returned, ids);
}
