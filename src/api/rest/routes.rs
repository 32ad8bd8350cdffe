//! # REST Routes
//!
//! Router construction for the REST API.

use super::handlers::{self, AppState};
use axum::Router;
use axum::http::Method;
use axum::http::header::CONTENT_TYPE;
use axum::routing::get;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Creates the REST API router.
///
/// The station endpoints are reachable from any origin; the browser
/// frontend is served separately.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            "/api/stations",
            get(handlers::find_nearby).post(handlers::register_station),
        )
        .route("/api/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
