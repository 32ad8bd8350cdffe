//! # Domain Entities
//!
//! - [`StationRecord`]: A station held by the directory
//! - [`NewStation`]: A validated station awaiting persistence
//! - [`StationCandidate`]: Raw registration input

pub mod station;

pub use station::{NewStation, StationCandidate, StationRecord};
