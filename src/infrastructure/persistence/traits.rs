//! # Repository Traits
//!
//! Port definitions for the station directory.
//!
//! The ranking service only talks to the directory through
//! [`StationRepository`]. Implementations can use different backends such
//! as PostgreSQL or in-memory storage.
//!
//! # Examples
//!
//! ```ignore
//! use fuel_locator::infrastructure::persistence::traits::StationRepository;
//!
//! async fn total(repo: &impl StationRepository) {
//!     let count = repo.count().await.unwrap();
//!     println!("{count} stations registered");
//! }
//! ```

use crate::domain::entities::{NewStation, StationRecord};
use crate::domain::value_objects::{GeoPoint, SearchRadius, StationId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if the store could not be reached at all.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for fuel stations.
///
/// This is the station directory: it owns storage, indexing and write
/// durability. Callers never mutate records after insert.
#[async_trait]
pub trait StationRepository: Send + Sync + fmt::Debug {
    /// Returns the stations that may lie within `radius` of `near`.
    ///
    /// The result is a superset: an implementation may prefilter with an
    /// index, but it must never omit a station whose stored location is
    /// within the radius. Records with missing or malformed locations may be
    /// included; the caller discards them. The order must be stable across
    /// calls for the same directory contents.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be queried.
    async fn find_candidates(
        &self,
        near: &GeoPoint,
        radius: SearchRadius,
    ) -> RepositoryResult<Vec<StationRecord>>;

    /// Persists a new station and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails.
    async fn insert(&self, station: NewStation) -> RepositoryResult<StationRecord>;

    /// Gets a station by ID.
    ///
    /// Returns `None` if the station does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be queried.
    async fn get(&self, id: &StationId) -> RepositoryResult<Option<StationRecord>>;

    /// Counts all stations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be queried.
    async fn count(&self) -> RepositoryResult<u64>;
}
