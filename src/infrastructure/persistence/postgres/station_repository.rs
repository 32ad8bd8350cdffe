//! # PostgreSQL Station Repository
//!
//! PostgreSQL implementation of [`StationRepository`] using sqlx.
//!
//! Candidate lookup narrows the scan with a latitude/longitude bounding box
//! over the `(latitude, longitude)` index. When the search circle touches a
//! pole or crosses the antimeridian the box is skipped and every row is
//! returned. Rows come back in insertion order (`seq`).

use super::schema::SCHEMA;
use crate::domain::entities::{NewStation, StationRecord};
use crate::domain::value_objects::{
    FuelPrice, GeoBounds, GeoPoint, SearchRadius, StationId, StoredLocation,
};
use crate::infrastructure::persistence::traits::{
    RepositoryError, RepositoryResult, StationRepository,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

/// PostgreSQL implementation of [`StationRepository`].
///
/// # Examples
///
/// ```ignore
/// use fuel_locator::infrastructure::persistence::postgres::PostgresStationRepository;
///
/// let repo = PostgresStationRepository::connect("postgres://...", 5).await?;
/// repo.migrate().await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresStationRepository {
    pool: PgPool,
}

impl PostgresStationRepository {
    /// Creates a repository over an existing pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a new pool.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Connection` if the database is unreachable.
    pub async fn connect(url: &str, max_connections: u32) -> RepositoryResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| RepositoryError::connection(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Applies the station schema.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Query` if the DDL fails.
    pub async fn migrate(&self) -> RepositoryResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl StationRepository for PostgresStationRepository {
    async fn find_candidates(
        &self,
        near: &GeoPoint,
        radius: SearchRadius,
    ) -> RepositoryResult<Vec<StationRecord>> {
        let rows: Vec<StationRow> = match GeoBounds::around(near, radius) {
            Some(bounds) => {
                sqlx::query_as(
                    r#"
                    SELECT id, name, address, longitude, latitude,
                           gazoil_price, diesel_price
                    FROM stations
                    WHERE latitude BETWEEN $1 AND $2
                      AND longitude BETWEEN $3 AND $4
                    ORDER BY seq ASC
                    "#,
                )
                .bind(bounds.min_latitude)
                .bind(bounds.max_latitude)
                .bind(bounds.min_longitude)
                .bind(bounds.max_longitude)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(
                    r#"
                    SELECT id, name, address, longitude, latitude,
                           gazoil_price, diesel_price
                    FROM stations
                    ORDER BY seq ASC
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(StationRow::try_into_record).collect()
    }

    async fn insert(&self, station: NewStation) -> RepositoryResult<StationRecord> {
        let id = StationId::new_v4();
        let location = station.location();

        sqlx::query(
            r#"
            INSERT INTO stations (
                id, name, address, longitude, latitude,
                gazoil_price, diesel_price
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id.get())
        .bind(station.name())
        .bind(station.address())
        .bind(location.longitude())
        .bind(location.latitude())
        .bind(station.gazoil_price().get())
        .bind(station.diesel_price().get())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(station.into_record(id))
    }

    async fn get(&self, id: &StationId) -> RepositoryResult<Option<StationRecord>> {
        let row: Option<StationRow> = sqlx::query_as(
            r#"
            SELECT id, name, address, longitude, latitude,
                   gazoil_price, diesel_price
            FROM stations
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(StationRow::try_into_record).transpose()
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM stations")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}

/// Row type for station queries.
#[derive(Debug, sqlx::FromRow)]
struct StationRow {
    id: Uuid,
    name: String,
    address: String,
    longitude: Option<f64>,
    latitude: Option<f64>,
    gazoil_price: Decimal,
    diesel_price: Decimal,
}

impl StationRow {
    /// Converts the row into a StationRecord.
    fn try_into_record(self) -> RepositoryResult<StationRecord> {
        let location = match (self.longitude, self.latitude) {
            (Some(longitude), Some(latitude)) => Some(StoredLocation::new(longitude, latitude)),
            _ => None,
        };
        let gazoil_price = FuelPrice::for_field("gazoil_price", self.gazoil_price)
            .map_err(|e| RepositoryError::serialization(e.to_string()))?;
        let diesel_price = FuelPrice::for_field("diesel_price", self.diesel_price)
            .map_err(|e| RepositoryError::serialization(e.to_string()))?;

        Ok(StationRecord::from_parts(
            StationId::new(self.id),
            self.name,
            self.address,
            location,
            gazoil_price,
            diesel_price,
        ))
    }
}

fn map_sqlx_error(error: sqlx::Error) -> RepositoryError {
    match error {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => RepositoryError::connection(error.to_string()),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            RepositoryError::serialization(error.to_string())
        }
        other => RepositoryError::query(other.to_string()),
    }
}
