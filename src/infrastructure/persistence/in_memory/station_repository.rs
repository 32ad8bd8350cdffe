//! # In-Memory Station Repository
//!
//! In-memory implementation of [`StationRepository`].
//!
//! Stations are kept in insertion order, which is also the retrieval order
//! reported by [`StationRepository::find_candidates`]. Used by tests and by
//! the server when no database is configured.

use crate::domain::entities::{NewStation, StationRecord};
use crate::domain::value_objects::{GeoPoint, SearchRadius, StationId};
use crate::infrastructure::persistence::traits::{RepositoryResult, StationRepository};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`StationRepository`].
///
/// Uses a thread-safe `Vec` for storage; clones share the same storage.
#[derive(Debug, Clone)]
pub struct InMemoryStationRepository {
    storage: Arc<RwLock<Vec<StationRecord>>>,
}

impl InMemoryStationRepository {
    /// Creates a new empty in-memory station repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a repository pre-loaded with records, kept in the given order.
    ///
    /// Records are stored as-is, including any with malformed locations.
    #[must_use]
    pub fn with_records(records: Vec<StationRecord>) -> Self {
        Self {
            storage: Arc::new(RwLock::new(records)),
        }
    }

    /// Returns the number of stations in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a record as-is.
    pub async fn push(&self, record: StationRecord) {
        let mut storage = self.storage.write().await;
        storage.push(record);
    }

    /// Clears all stations from the repository.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        storage.clear();
    }
}

impl Default for InMemoryStationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StationRepository for InMemoryStationRepository {
    async fn find_candidates(
        &self,
        _near: &GeoPoint,
        _radius: SearchRadius,
    ) -> RepositoryResult<Vec<StationRecord>> {
        let storage = self.storage.read().await;
        Ok(storage.clone())
    }

    async fn insert(&self, station: NewStation) -> RepositoryResult<StationRecord> {
        let record = station.into_record(StationId::new_v4());
        let mut storage = self.storage.write().await;
        storage.push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: &StationId) -> RepositoryResult<Option<StationRecord>> {
        let storage = self.storage.read().await;
        Ok(storage.iter().find(|r| r.id() == *id).cloned())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.len() as u64)
    }
}
