//! HTTP handlers for the Weather Health Alerts service

pub mod health;
pub mod weather;

pub use health::*;
pub use weather::*;
