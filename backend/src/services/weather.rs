//! Weather service: fetch a reading, classify it, and shape the report

use std::sync::Arc;

use shared::{evaluate, resolve, Place};

use crate::error::AppResult;
use crate::external::WeatherProvider;
use crate::models::WeatherReport;
use crate::services::HealthMappings;

/// Weather service combining a provider with the health rule tables
#[derive(Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    mappings: Arc<HealthMappings>,
}

impl WeatherService {
    /// Create a new WeatherService instance
    pub fn new(provider: Arc<dyn WeatherProvider>, mappings: Arc<HealthMappings>) -> Self {
        Self { provider, mappings }
    }

    /// Build the health report for a place
    ///
    /// Provider failures are returned untouched and nothing is evaluated.
    pub async fn report(&self, place: &Place) -> AppResult<WeatherReport> {
        let reading = self.provider.fetch(place).await.map_err(|e| {
            tracing::debug!(
                "{} lookup for {} failed: {}",
                self.provider.name(),
                place.query(", "),
                e
            );
            e
        })?;

        let alerts = evaluate(&reading, &self.mappings.rules);
        tracing::info!(
            "{} ({}): {} health alerts",
            reading.city,
            self.provider.name(),
            alerts.len()
        );

        if alerts.is_empty() {
            return Ok(WeatherReport::unavailable(&reading));
        }

        let preventions = resolve(&alerts, &self.mappings.preventions);
        Ok(WeatherReport::success(&reading, alerts, preventions))
    }
}
