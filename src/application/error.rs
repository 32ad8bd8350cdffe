//! # Application Errors
//!
//! Error types for the application layer.
//!
//! These errors are what callers of the ranking service see. Validation
//! failures are split by operation so that a bad query and a bad
//! registration stay distinguishable, and every directory failure is
//! surfaced as [`ApplicationError::DirectoryUnavailable`], never as an
//! empty result.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── InvalidQuery(DomainError)            - Bad coordinates, radius or sort order
//! ├── InvalidStation(DomainError)          - Bad registration candidate
//! └── DirectoryUnavailable(RepositoryError) - Station directory failed
//! ```
//!
//! # Examples
//!
//! ```
//! use fuel_locator::application::error::ApplicationError;
//! use fuel_locator::domain::errors::DomainError;
//! use fuel_locator::infrastructure::persistence::RepositoryError;
//!
//! let err = ApplicationError::invalid_query(DomainError::missing_field("lat"));
//! assert!(err.is_invalid_input());
//!
//! let err: ApplicationError = RepositoryError::connection("refused").into();
//! assert!(err.is_directory_unavailable());
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The proximity query was malformed. Nothing was read.
    #[error("invalid query: {0}")]
    InvalidQuery(#[source] DomainError),

    /// The registration candidate was malformed. Nothing was written.
    #[error("invalid station: {0}")]
    InvalidStation(#[source] DomainError),

    /// The station directory could not be reached or failed the request.
    #[error("station directory unavailable: {0}")]
    DirectoryUnavailable(#[from] RepositoryError),
}

impl ApplicationError {
    /// Creates an invalid query error.
    #[must_use]
    pub fn invalid_query(cause: DomainError) -> Self {
        Self::InvalidQuery(cause)
    }

    /// Creates an invalid station error.
    #[must_use]
    pub fn invalid_station(cause: DomainError) -> Self {
        Self::InvalidStation(cause)
    }

    /// Returns true if the caller can fix this by changing the input.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidQuery(_) | Self::InvalidStation(_))
    }

    /// Returns true if this is an invalid query error.
    #[must_use]
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, Self::InvalidQuery(_))
    }

    /// Returns true if this is an invalid station error.
    #[must_use]
    pub fn is_invalid_station(&self) -> bool {
        matches!(self, Self::InvalidStation(_))
    }

    /// Returns true if the station directory failed.
    #[must_use]
    pub fn is_directory_unavailable(&self) -> bool {
        matches!(self, Self::DirectoryUnavailable(_))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
