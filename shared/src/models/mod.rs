//! Domain models for the Weather Health Alerts service

mod health;
mod weather;

pub use health::*;
pub use weather::*;
