//! # Fuel Locator
//!
//! Backend for locating fuel stations near a point.
//!
//! Given a latitude and longitude, the service returns every registered
//! station within a search radius (15 km by default), each annotated with
//! its great-circle distance, nearest first with ties going to the cheapest
//! gazoil. Stations are registered with a name, an address, a location and
//! two fuel prices.
//!
//! # Architecture
//!
//! ```text
//! api::rest ──▶ application::services::ProximityRankingService
//!                       │                 │
//!                       ▼                 ▼
//!               domain (values,    infrastructure::persistence
//!               geometry)          (in-memory / PostgreSQL)
//! ```
//!
//! - [`domain`]: coordinates, prices, distances and station entities
//! - [`application`]: the ranking service and its errors
//! - [`infrastructure`]: station directory implementations
//! - [`api`]: the axum REST boundary
//! - [`config`]: layered runtime configuration

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
