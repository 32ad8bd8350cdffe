//! # REST API
//!
//! REST endpoints using axum.
//!
//! # Endpoints
//!
//! ## Stations
//! - `GET /api/stations?lat=..&lng=..[&radius=..][&sort=..]` - Nearby stations, ranked
//! - `POST /api/stations` - Register a station
//!
//! ## Health
//! - `GET /api/health` - Health check endpoint
//!
//! # Usage
//!
//! ```ignore
//! use fuel_locator::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::new(ranking_service));
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    AppState, ErrorResponse, HealthResponse, LocationInput, NearbyStationResponse,
    RegisterStationRequest, StationResponse,
};
pub use routes::create_router;
