//! # API Layer
//!
//! Transport boundary of the fuel locator.

pub mod rest;
