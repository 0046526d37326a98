//! Open-Meteo client: geocode the place, then fetch by coordinates
//!
//! No API key is needed. Air quality lives on a separate endpoint and is
//! best-effort: if it fails the reading simply carries no AQI.

use async_trait::async_trait;
use serde::Deserialize;
use shared::{capitalize_first, describe_weather_code, AirQuality, Coordinates, Place, WeatherReading};

use super::{parse_observed_at, UpstreamClient, WeatherProvider};
use crate::error::{AppError, AppResult};

const CURRENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,wind_speed_10m,uv_index,apparent_temperature,weather_code";

/// Candidates to inspect when a country must be matched
const GEOCODE_CANDIDATES: u32 = 10;

/// Open-Meteo provider
#[derive(Clone)]
pub struct OpenMeteoProvider {
    http: UpstreamClient,
    base_url: String,
    geocoding_base_url: String,
    air_quality_base_url: String,
}

/// A geocoded place
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub name: String,
    pub country: Option<String>,
    pub coordinates: Coordinates,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    country: Option<String>,
    country_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: ForecastCurrent,
}

#[derive(Debug, Deserialize)]
struct ForecastCurrent {
    time: String,
    temperature_2m: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    uv_index: Option<f64>,
    weather_code: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    current: AirQualityCurrent,
}

#[derive(Debug, Deserialize)]
struct AirQualityCurrent {
    us_aqi: Option<f64>,
}

impl GeocodingResult {
    fn matches_country(&self, country: &str) -> bool {
        let wanted = country.to_lowercase();
        self.country.as_deref().map(str::to_lowercase).as_deref() == Some(wanted.as_str())
            || self.country_code.as_deref().map(str::to_lowercase).as_deref() == Some(wanted.as_str())
    }
}

impl OpenMeteoProvider {
    /// Create a new provider against the given forecast, geocoding and air quality hosts
    pub fn new(
        http: UpstreamClient,
        base_url: String,
        geocoding_base_url: String,
        air_quality_base_url: String,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            geocoding_base_url: geocoding_base_url.trim_end_matches('/').to_string(),
            air_quality_base_url: air_quality_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a place name to coordinates
    ///
    /// When a country is given, the first candidate in that country wins
    /// (matched by name or ISO code). No candidate is a `GeocodeMiss`.
    pub async fn geocode(&self, place: &Place) -> AppResult<GeocodedPlace> {
        let url = format!("{}/search", self.geocoding_base_url);
        let count = if place.country.is_some() { GEOCODE_CANDIDATES } else { 1 };
        let query = [("name", place.city.clone()), ("count", count.to_string())];

        let response: GeocodingResponse = self.http.get_json(&url, &query).await?;
        let results = response.results.unwrap_or_default();

        let found = match &place.country {
            Some(country) => results.into_iter().find(|r| r.matches_country(country)),
            None => results.into_iter().next(),
        };
        let found = found.ok_or_else(|| AppError::GeocodeMiss(place.query(", ")))?;

        let (Some(latitude), Some(longitude)) = (found.latitude, found.longitude) else {
            return Err(AppError::Configuration(
                "Latitude and longitude required".to_string(),
            ));
        };

        Ok(GeocodedPlace {
            name: found.name,
            country: found.country,
            coordinates: Coordinates::new(latitude, longitude),
        })
    }

    async fn fetch_current(&self, coordinates: Coordinates) -> AppResult<ForecastCurrent> {
        let url = format!("{}/forecast", self.base_url);
        let query = [
            ("latitude", coordinates.latitude.to_string()),
            ("longitude", coordinates.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("wind_speed_unit", "kmh".to_string()),
            ("timezone", "auto".to_string()),
        ];

        let response: ForecastResponse = self.http.get_json(&url, &query).await?;
        Ok(response.current)
    }

    async fn fetch_air_quality(&self, coordinates: Coordinates) -> Option<AirQuality> {
        let url = format!("{}/air-quality", self.air_quality_base_url);
        let query = [
            ("latitude", coordinates.latitude.to_string()),
            ("longitude", coordinates.longitude.to_string()),
            ("current", "us_aqi".to_string()),
        ];

        match self.http.get_json::<AirQualityResponse>(&url, &query).await {
            Ok(response) => response
                .current
                .us_aqi
                .filter(|aqi| aqi.is_finite() && *aqi >= 0.0)
                .map(|aqi| AirQuality::UsAqi(aqi.round() as u32)),
            Err(e) => {
                tracing::warn!("Air quality lookup failed, continuing without AQI: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    fn name(&self) -> &'static str {
        "open-meteo"
    }

    async fn fetch(&self, place: &Place) -> AppResult<WeatherReading> {
        let geo = self.geocode(place).await?;
        tracing::debug!(
            "Geocoded {} to {}, {}",
            place.query(", "),
            geo.coordinates.latitude,
            geo.coordinates.longitude
        );

        let (current, aqi) = tokio::join!(
            self.fetch_current(geo.coordinates),
            self.fetch_air_quality(geo.coordinates)
        );
        let current = current?;

        Ok(WeatherReading {
            temperature: current.temperature_2m,
            humidity: current.relative_humidity_2m,
            wind_speed: current.wind_speed_10m,
            uv: current.uv_index,
            aqi,
            description: current
                .weather_code
                .map(describe_weather_code)
                .unwrap_or_default()
                .to_string(),
            city: capitalize_first(&geo.name),
            country: geo.country,
            observed_at: parse_observed_at(&current.time, CURRENT_TIME_FORMAT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(country: &str, code: &str) -> GeocodingResult {
        GeocodingResult {
            name: "Paris".to_string(),
            latitude: Some(48.85),
            longitude: Some(2.35),
            country: Some(country.to_string()),
            country_code: Some(code.to_string()),
        }
    }

    #[test]
    fn test_matches_country_by_name_or_code() {
        let paris = result("France", "FR");
        assert!(paris.matches_country("france"));
        assert!(paris.matches_country("fr"));
        assert!(!paris.matches_country("United States"));
    }
}
