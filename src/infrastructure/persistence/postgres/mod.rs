//! # PostgreSQL Repositories
//!
//! sqlx-backed implementations of the repository ports.

pub mod schema;
pub mod station_repository;

pub use schema::SCHEMA;
pub use station_repository::PostgresStationRepository;
