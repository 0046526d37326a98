//! WeatherAPI.com client: current conditions by direct place query
//!
//! Air quality comes back in the same response as a US-EPA category index.

use async_trait::async_trait;
use serde::Deserialize;
use shared::{capitalize_first, AirQuality, Place, WeatherReading};

use super::{parse_observed_at, UpstreamClient, WeatherProvider};
use crate::error::{AppError, AppResult};

const LOCALTIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// WeatherAPI.com provider
#[derive(Clone)]
pub struct WeatherApiProvider {
    http: UpstreamClient,
    api_key: String,
    base_url: String,
}

/// WeatherAPI.com response for current.json
#[derive(Debug, Deserialize)]
struct CurrentResponse {
    location: ApiLocation,
    current: ApiCurrent,
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    name: String,
    country: String,
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct ApiCurrent {
    temp_c: f64,
    humidity: f64,
    wind_kph: f64,
    uv: Option<f64>,
    condition: Option<ApiCondition>,
    air_quality: Option<ApiAirQuality>,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiAirQuality {
    #[serde(rename = "us-epa-index")]
    us_epa_index: Option<u8>,
}

impl WeatherApiProvider {
    /// Create a new provider; the API key is mandatory
    pub fn new(http: UpstreamClient, api_key: String, base_url: String) -> AppResult<Self> {
        if api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "WeatherAPI key not configured".to_string(),
            ));
        }

        Ok(Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn convert_response(data: CurrentResponse) -> WeatherReading {
        let current = data.current;

        WeatherReading {
            temperature: current.temp_c,
            humidity: current.humidity,
            wind_speed: current.wind_kph,
            uv: current.uv,
            aqi: current
                .air_quality
                .and_then(|aq| aq.us_epa_index)
                .map(AirQuality::EpaIndex),
            description: current.condition.map(|c| c.text).unwrap_or_default(),
            city: capitalize_first(&data.location.name),
            country: Some(data.location.country).filter(|c| !c.is_empty()),
            observed_at: parse_observed_at(&data.location.localtime, LOCALTIME_FORMAT),
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    fn name(&self) -> &'static str {
        "weatherapi"
    }

    async fn fetch(&self, place: &Place) -> AppResult<WeatherReading> {
        let url = format!("{}/current.json", self.base_url);
        let query = [
            ("key", self.api_key.clone()),
            ("q", place.query(",")),
            ("aqi", "yes".to_string()),
        ];

        tracing::debug!("Fetching WeatherAPI conditions for {}", place.query(","));
        let data: CurrentResponse = self.http.get_json(&url, &query).await?;

        Ok(Self::convert_response(data))
    }
}
