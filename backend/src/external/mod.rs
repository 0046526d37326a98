//! External weather provider integrations
//!
//! Every provider resolves a [`Place`] into a [`WeatherReading`]; the rest of
//! the service only sees the [`WeatherProvider`] trait.

pub mod http;
pub mod open_meteo;
pub mod weatherapi;
pub mod weatherbit;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;
use shared::{Place, WeatherReading};

use crate::config::WeatherConfig;
use crate::error::AppResult;

pub use http::UpstreamClient;
pub use open_meteo::OpenMeteoProvider;
pub use weatherapi::WeatherApiProvider;
pub use weatherbit::WeatherbitProvider;

/// A source of current weather readings
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Short provider name for logs and health output
    fn name(&self) -> &'static str;

    /// Fetch and normalize current conditions for a place
    async fn fetch(&self, place: &Place) -> AppResult<WeatherReading>;
}

/// Configured provider variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ProviderKind {
    /// Direct query with built-in air quality (WeatherAPI.com)
    #[default]
    #[serde(rename = "weatherapi")]
    WeatherApi,
    /// Geocode first, then fetch by coordinates (Open-Meteo)
    #[serde(rename = "open-meteo")]
    OpenMeteo,
    /// Legacy city-only lookup (Weatherbit)
    #[serde(rename = "weatherbit")]
    Weatherbit,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::WeatherApi => "weatherapi",
            ProviderKind::OpenMeteo => "open-meteo",
            ProviderKind::Weatherbit => "weatherbit",
        };
        f.write_str(name)
    }
}

/// Build the provider selected in configuration
pub fn build_provider(config: &WeatherConfig) -> AppResult<Arc<dyn WeatherProvider>> {
    let http = UpstreamClient::new(
        Duration::from_secs(config.timeout_secs),
        config.retry_attempts,
    )?;

    let provider: Arc<dyn WeatherProvider> = match config.provider {
        ProviderKind::WeatherApi => Arc::new(WeatherApiProvider::new(
            http,
            config.weatherapi_key.clone(),
            config.weatherapi_base_url.clone(),
        )?),
        ProviderKind::OpenMeteo => Arc::new(OpenMeteoProvider::new(
            http,
            config.open_meteo_base_url.clone(),
            config.geocoding_base_url.clone(),
            config.air_quality_base_url.clone(),
        )),
        ProviderKind::Weatherbit => Arc::new(WeatherbitProvider::new(
            http,
            config.weatherbit_key.clone(),
            config.weatherbit_base_url.clone(),
        )?),
    };

    tracing::info!("Using weather provider: {}", config.provider);
    Ok(provider)
}

/// Parse a provider's local timestamp, falling back to the current UTC time
pub(crate) fn parse_observed_at(value: &str, format: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, format).unwrap_or_else(|e| {
        tracing::warn!("Unparsable observation time {:?}: {}", value, e);
        Utc::now().naive_utc()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_parse_observed_at() {
        let parsed = parse_observed_at("2026-10-17 9:05", "%Y-%m-%d %H:%M");
        assert_eq!(parsed.format("%d %b %Y %H:%M").to_string(), "17 Oct 2026 09:05");
    }

    #[test]
    fn test_build_provider_requires_key() {
        let config = WeatherConfig::default();
        match build_provider(&config) {
            Err(AppError::Configuration(_)) => {}
            Err(other) => panic!("unexpected error: {:?}", other),
            Ok(_) => panic!("provider built without an API key"),
        }
    }

    #[test]
    fn test_open_meteo_needs_no_key() {
        let config = WeatherConfig {
            provider: ProviderKind::OpenMeteo,
            ..WeatherConfig::default()
        };
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.name(), "open-meteo");
    }

    #[test]
    fn test_provider_kind_display() {
        assert_eq!(ProviderKind::WeatherApi.to_string(), "weatherapi");
        assert_eq!(ProviderKind::OpenMeteo.to_string(), "open-meteo");
        assert_eq!(ProviderKind::Weatherbit.to_string(), "weatherbit");
    }
}
