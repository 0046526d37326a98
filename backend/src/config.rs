//! Configuration management for the Weather Health Alerts service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code (plain `PORT`, `WEATHERAPI_KEY` and
//!    `WEATHERBIT_API_KEY` variables are honored here)
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with WHS__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::external::ProviderKind;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather provider configuration
    pub weather: WeatherConfig,

    /// Locations of the health rule tables
    pub mappings: MappingsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Which upstream provider answers lookups
    pub provider: ProviderKind,

    /// City used when a request names none
    pub default_city: String,

    /// Upstream request timeout in seconds
    pub timeout_secs: u64,

    /// Extra attempts after a network-level failure
    pub retry_attempts: u32,

    /// WeatherAPI.com key
    #[serde(default)]
    pub weatherapi_key: String,

    pub weatherapi_base_url: String,

    /// Weatherbit key
    #[serde(default)]
    pub weatherbit_key: String,

    pub weatherbit_base_url: String,

    pub open_meteo_base_url: String,

    pub geocoding_base_url: String,

    pub air_quality_base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MappingsConfig {
    /// Threshold-to-alert rule table (JSON)
    pub rules_path: String,

    /// Alert-to-prevention table (JSON)
    pub preventions_path: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("WHS_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<i64>().ok())
            .unwrap_or(3000);

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", port)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.provider", "weatherapi")?
            .set_default("weather.default_city", "Chennai")?
            .set_default("weather.timeout_secs", 10)?
            .set_default("weather.retry_attempts", 1)?
            .set_default(
                "weather.weatherapi_key",
                std::env::var("WEATHERAPI_KEY").unwrap_or_default(),
            )?
            .set_default("weather.weatherapi_base_url", "https://api.weatherapi.com/v1")?
            .set_default(
                "weather.weatherbit_key",
                std::env::var("WEATHERBIT_API_KEY").unwrap_or_default(),
            )?
            .set_default("weather.weatherbit_base_url", "https://api.weatherbit.io/v2.0")?
            .set_default("weather.open_meteo_base_url", "https://api.open-meteo.com/v1")?
            .set_default(
                "weather.geocoding_base_url",
                "https://geocoding-api.open-meteo.com/v1",
            )?
            .set_default(
                "weather.air_quality_base_url",
                "https://air-quality-api.open-meteo.com/v1",
            )?
            .set_default("mappings.rules_path", "data/weather_health_mapping.json")?
            .set_default("mappings.preventions_path", "data/prevention.json")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WHS__ prefix)
            .add_source(
                Environment::with_prefix("WHS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            default_city: "Chennai".to_string(),
            timeout_secs: 10,
            retry_attempts: 1,
            weatherapi_key: String::new(),
            weatherapi_base_url: "https://api.weatherapi.com/v1".to_string(),
            weatherbit_key: String::new(),
            weatherbit_base_url: "https://api.weatherbit.io/v2.0".to_string(),
            open_meteo_base_url: "https://api.open-meteo.com/v1".to_string(),
            geocoding_base_url: "https://geocoding-api.open-meteo.com/v1".to_string(),
            air_quality_base_url: "https://air-quality-api.open-meteo.com/v1".to_string(),
        }
    }
}

impl Default for MappingsConfig {
    fn default() -> Self {
        Self {
            rules_path: "data/weather_health_mapping.json".to_string(),
            preventions_path: "data/prevention.json".to_string(),
        }
    }
}
