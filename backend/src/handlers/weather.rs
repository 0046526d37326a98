//! HTTP handler for the weather health report endpoint

use axum::{extract::State, Json};
use serde::Deserialize;
use shared::{normalize_optional, validate_place_name, Place};

use crate::error::{AppError, AppResult};
use crate::models::WeatherReport;
use crate::services::WeatherService;
use crate::AppState;

/// Request body for a weather report
#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
    pub country: Option<String>,
}

impl WeatherQuery {
    /// Validate the query and resolve it into a place, defaulting the city
    pub fn into_place(self, default_city: &str) -> AppResult<Place> {
        let city = normalize_optional(self.city).unwrap_or_else(|| default_city.to_string());
        let country = normalize_optional(self.country);

        validate_field("city", &city)?;
        if let Some(country) = &country {
            validate_field("country", country)?;
        }

        Ok(Place::new(city, country))
    }
}

fn validate_field(field: &str, value: &str) -> AppResult<()> {
    validate_place_name(value).map_err(|msg| AppError::Validation {
        field: field.to_string(),
        message: msg.to_string(),
    })
}

/// Fetch current weather for a place and attach health advice
///
/// A missing or unparsable body is treated as an empty query.
pub async fn get_weather_report(
    State(state): State<AppState>,
    body: Option<Json<WeatherQuery>>,
) -> AppResult<Json<WeatherReport>> {
    let query = body.map(|Json(query)| query).unwrap_or_default();
    let place = query.into_place(&state.config.weather.default_city)?;

    let service = WeatherService::new(state.provider.clone(), state.mappings.clone());
    let report = service.report(&place).await?;
    Ok(Json(report))
}
