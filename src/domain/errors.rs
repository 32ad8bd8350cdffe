//! # Domain Errors
//!
//! Validation failures raised while constructing domain values.
//!
//! Every value object in this crate validates itself on construction and
//! reports failures through [`DomainError`]. The application layer decides
//! whether a given failure is a bad query or a bad station.
//!
//! # Examples
//!
//! ```
//! use fuel_locator::domain::errors::DomainError;
//!
//! let err = DomainError::missing_field("lat");
//! assert!(err.to_string().contains("lat"));
//! ```

use thiserror::Error;

/// Error type for domain validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A coordinate is not a finite number inside its geographic range.
    #[error("invalid {axis}: {value} (expected a finite value in [{min}, {max}])")]
    InvalidCoordinate {
        /// Which axis failed (`longitude` or `latitude`).
        axis: &'static str,
        /// The rejected value.
        value: f64,
        /// Lower bound, inclusive.
        min: f64,
        /// Upper bound, inclusive.
        max: f64,
    },

    /// A fuel price is negative.
    #[error("invalid {field}: {value} (must be non-negative)")]
    InvalidPrice {
        /// Which price failed.
        field: &'static str,
        /// The rejected value, as text.
        value: String,
    },

    /// A search radius is not a positive finite number of metres.
    #[error("invalid radius: {0} (must be a positive number of metres)")]
    InvalidRadius(f64),

    /// A required field was not supplied.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field was supplied but could not be understood.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl DomainError {
    /// Creates an invalid coordinate error.
    #[must_use]
    pub fn invalid_coordinate(axis: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::InvalidCoordinate {
            axis,
            value,
            min,
            max,
        }
    }

    /// Creates an invalid price error.
    #[must_use]
    pub fn invalid_price(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidPrice {
            field,
            value: value.to_string(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField(field)
    }

    /// Creates an invalid field error.
    #[must_use]
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for domain validation.
pub type DomainResult<T> = Result<T, DomainError>;
