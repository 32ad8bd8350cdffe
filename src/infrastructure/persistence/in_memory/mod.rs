//! # In-Memory Repositories
//!
//! In-memory implementations for testing without database dependencies.
//!
//! ## Available Repositories
//!
//! - [`InMemoryStationRepository`]: Station directory
//!
//! ## Thread Safety
//!
//! All implementations use `Arc<RwLock<_>>` for thread-safe access.

pub mod station_repository;

pub use station_repository::InMemoryStationRepository;
