//! Weatherbit client: legacy city-only current conditions lookup

use async_trait::async_trait;
use serde::Deserialize;
use shared::{AirQuality, Place, WeatherReading};

use super::{parse_observed_at, UpstreamClient, WeatherProvider};
use crate::error::{AppError, AppResult};

const OB_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Weatherbit reports wind in m/s
const MPS_TO_KMH: f64 = 3.6;

/// Weatherbit provider
#[derive(Clone)]
pub struct WeatherbitProvider {
    http: UpstreamClient,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    #[serde(default)]
    data: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    city_name: String,
    country_code: Option<String>,
    temp: f64,
    rh: f64,
    wind_spd: f64,
    uv: Option<f64>,
    aqi: Option<f64>,
    weather: Option<ObservationWeather>,
    ob_time: String,
}

#[derive(Debug, Deserialize)]
struct ObservationWeather {
    description: String,
}

/// Convert m/s to km/h, rounded to one decimal
fn mps_to_kmh(speed: f64) -> f64 {
    (speed * MPS_TO_KMH * 10.0).round() / 10.0
}

impl WeatherbitProvider {
    /// Create a new provider; the API key is mandatory
    pub fn new(http: UpstreamClient, api_key: String, base_url: String) -> AppResult<Self> {
        if api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "Weatherbit API key not configured".to_string(),
            ));
        }

        Ok(Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn convert_observation(observation: Observation) -> WeatherReading {
        WeatherReading {
            temperature: observation.temp,
            humidity: observation.rh,
            wind_speed: mps_to_kmh(observation.wind_spd),
            uv: observation.uv,
            aqi: observation
                .aqi
                .filter(|aqi| aqi.is_finite() && *aqi >= 0.0)
                .map(|aqi| AirQuality::UsAqi(aqi.round() as u32)),
            description: observation
                .weather
                .map(|w| w.description)
                .unwrap_or_default(),
            city: observation.city_name,
            country: observation.country_code,
            observed_at: parse_observed_at(&observation.ob_time, OB_TIME_FORMAT),
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherbitProvider {
    fn name(&self) -> &'static str {
        "weatherbit"
    }

    async fn fetch(&self, place: &Place) -> AppResult<WeatherReading> {
        let url = format!("{}/current", self.base_url);
        let query = [("key", self.api_key.clone()), ("city", place.query(","))];

        let response: CurrentResponse = self.http.get_json(&url, &query).await?;
        let observation = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| AppError::provider("Failed to fetch weather from Weatherbit"))?;

        Ok(Self::convert_observation(observation))
    }
}
