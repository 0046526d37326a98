//! Business logic services for the Weather Health Alerts service

pub mod mapping;
pub mod weather;

pub use mapping::HealthMappings;
pub use weather::WeatherService;
