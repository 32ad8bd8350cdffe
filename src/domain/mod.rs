//! # Domain Layer
//!
//! Stations, coordinates, prices and the geometry between them. Nothing in
//! this layer performs I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
