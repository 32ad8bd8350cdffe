//! # REST Handlers
//!
//! Request handlers, request/response bodies and error mapping for the
//! station endpoints.

use crate::application::dto::NearbyRequest;
use crate::application::error::ApplicationError;
use crate::application::services::{ProximityRankingService, RankedStation};
use crate::domain::entities::{StationCandidate, StationRecord};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{StationId, StoredLocation};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// Application State
// ============================================================================

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The ranking service backing both station endpoints.
    pub ranking: ProximityRankingService,
}

impl AppState {
    /// Creates the state around a ranking service.
    #[must_use]
    pub fn new(ranking: ProximityRankingService) -> Self {
        Self { ranking }
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// Location accepted on registration.
///
/// Either named fields or a GeoJSON point. The GeoJSON form is converted to
/// named fields here and goes no further.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LocationInput {
    /// `{ "longitude": .., "latitude": .. }`
    Named {
        /// Longitude in degrees.
        longitude: f64,
        /// Latitude in degrees.
        latitude: f64,
    },
    /// `{ "type": "Point", "coordinates": [lng, lat] }`
    GeoJson {
        /// GeoJSON geometry type; only `Point` is accepted.
        #[serde(rename = "type")]
        kind: String,
        /// `[longitude, latitude]`.
        coordinates: Vec<f64>,
    },
}

impl TryFrom<LocationInput> for StoredLocation {
    type Error = DomainError;

    fn try_from(input: LocationInput) -> DomainResult<Self> {
        match input {
            LocationInput::Named {
                longitude,
                latitude,
            } => Ok(Self::new(longitude, latitude)),
            LocationInput::GeoJson { kind, coordinates } => {
                if kind != "Point" {
                    return Err(DomainError::invalid_field(
                        "location",
                        format!("unsupported geometry type '{kind}'"),
                    ));
                }
                match coordinates.as_slice() {
                    [longitude, latitude] => Ok(Self::new(*longitude, *latitude)),
                    other => Err(DomainError::invalid_field(
                        "location",
                        format!("expected [longitude, latitude], got {} values", other.len()),
                    )),
                }
            }
        }
    }
}

/// Request body for registering a station.
///
/// Prices may be JSON numbers or strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterStationRequest {
    /// Display name.
    pub name: Option<String>,
    /// Display address.
    pub address: Option<String>,
    /// Location in either accepted shape.
    pub location: Option<LocationInput>,
    /// Gazoil price.
    pub gazoil_price: Option<Decimal>,
    /// Diesel price.
    pub diesel_price: Option<Decimal>,
}

impl TryFrom<RegisterStationRequest> for StationCandidate {
    type Error = DomainError;

    fn try_from(request: RegisterStationRequest) -> DomainResult<Self> {
        Ok(Self {
            name: request.name,
            address: request.address,
            location: request.location.map(StoredLocation::try_from).transpose()?,
            gazoil_price: request.gazoil_price,
            diesel_price: request.diesel_price,
        })
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// A station as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResponse {
    /// Identifier.
    pub id: StationId,
    /// Display name.
    pub name: String,
    /// Display address.
    pub address: String,
    /// Longitude in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Latitude in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Gazoil price.
    #[serde(with = "rust_decimal::serde::float")]
    pub gazoil_price: Decimal,
    /// Diesel price.
    #[serde(with = "rust_decimal::serde::float")]
    pub diesel_price: Decimal,
}

impl From<&StationRecord> for StationResponse {
    fn from(record: &StationRecord) -> Self {
        let location = record.stored_location();
        Self {
            id: record.id(),
            name: record.name().to_string(),
            address: record.address().to_string(),
            longitude: location.map(|l| l.longitude),
            latitude: location.map(|l| l.latitude),
            gazoil_price: record.gazoil_price().get(),
            diesel_price: record.diesel_price().get(),
        }
    }
}

/// A nearby station with its distance from the query point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyStationResponse {
    /// The station.
    #[serde(flatten)]
    pub station: StationResponse,
    /// Great-circle distance from the query point, in metres.
    pub distance_meters: f64,
}

impl From<&RankedStation> for NearbyStationResponse {
    fn from(ranked: &RankedStation) -> Self {
        let mut station = StationResponse::from(ranked.station());
        station.longitude = Some(ranked.location().longitude());
        station.latitude = Some(ranked.location().latitude());
        Self {
            station,
            distance_meters: ranked.distance_meters(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable description.
    pub message: String,
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidQuery(_) | Self::InvalidStation(_) => StatusCode::BAD_REQUEST,
            Self::DirectoryUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        let body = ErrorResponse {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /api/stations`
///
/// # Errors
///
/// `400` for a malformed query, `503` if the directory fails.
pub async fn find_nearby(
    State(state): State<Arc<AppState>>,
    query: Result<Query<NearbyRequest>, QueryRejection>,
) -> Result<Json<Vec<NearbyStationResponse>>, ApplicationError> {
    let Query(request) = query.map_err(|rejection| {
        ApplicationError::invalid_query(DomainError::invalid_field(
            "query",
            rejection.body_text(),
        ))
    })?;

    let ranked = state.ranking.find_nearby(&request).await?;
    Ok(Json(ranked.iter().map(NearbyStationResponse::from).collect()))
}

/// `POST /api/stations`
///
/// # Errors
///
/// `400` for a malformed body or candidate, `503` if the directory fails.
pub async fn register_station(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterStationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StationResponse>), ApplicationError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection.body_text(), "rejected station body");
        ApplicationError::invalid_station(DomainError::invalid_field(
            "body",
            rejection.body_text(),
        ))
    })?;

    let candidate = StationCandidate::try_from(request).map_err(ApplicationError::invalid_station)?;
    let record = state.ranking.register_station(candidate).await?;

    Ok((StatusCode::CREATED, Json(StationResponse::from(&record))))
}

/// `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
