//! # Application Layer
//!
//! Use cases of the fuel locator, independent of transport and storage.

pub mod dto;
pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
