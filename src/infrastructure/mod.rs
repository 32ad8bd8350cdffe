//! # Infrastructure Layer
//!
//! Adapters to external systems. The only one is the station directory.

pub mod persistence;
