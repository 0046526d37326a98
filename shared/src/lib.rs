//! Shared types and models for the Weather Health Alerts service
//!
//! This crate holds the provider-independent weather reading, the static
//! health rule tables, and the pure evaluation logic over them.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
