//! # Persistence Layer
//!
//! The station directory and its implementations.
//!
//! ## Repository Traits (Ports)
//!
//! - [`StationRepository`]: Persistence for station records
//!
//! ## Implementations
//!
//! - `in_memory`: In-memory implementation for tests and database-less runs
//! - `postgres`: PostgreSQL implementation

pub mod in_memory;
pub mod postgres;
pub mod traits;

pub use traits::{RepositoryError, RepositoryResult, StationRepository};
