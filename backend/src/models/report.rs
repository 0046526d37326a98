//! Weather report envelope and display formatting
//!
//! This is the only place where units are appended to numbers.

use serde::Serialize;
use shared::WeatherReading;

/// Envelope status for a completed lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// At least one health alert fired
    Success,
    /// No alerts; weather only
    Unavailable,
}

/// Weather fields as shown to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherData {
    pub temperature: f64,
    pub humidity: String,
    pub wind_speed: String,
    pub uv: Option<f64>,
    pub aqi: Option<u32>,
    pub description: String,
    pub datetime: String,
    pub city: String,
    pub country: Option<String>,
    pub day: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_health_issues: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preventions: Option<Vec<String>>,
}

/// Response body of the weather endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub message: ReportStatus,
    pub data: WeatherData,
}

impl WeatherData {
    fn from_reading(reading: &WeatherReading) -> Self {
        Self {
            temperature: reading.temperature,
            humidity: format!("{}%", reading.humidity),
            wind_speed: format!("{} km/h", reading.wind_speed),
            uv: reading.uv,
            aqi: reading.aqi.map(|aqi| aqi.value()),
            description: reading.description.clone(),
            datetime: reading.observed_at.format("%d %b %Y").to_string(),
            city: reading.city.clone(),
            country: reading.country.clone(),
            day: reading.observed_at.format("%A").to_string(),
            possible_health_issues: None,
            preventions: None,
        }
    }
}

impl WeatherReport {
    /// Report carrying health issues and their preventions
    pub fn success(reading: &WeatherReading, alerts: Vec<String>, preventions: Vec<String>) -> Self {
        let mut data = WeatherData::from_reading(reading);
        data.possible_health_issues = Some(alerts);
        data.preventions = Some(preventions);

        Self {
            message: ReportStatus::Success,
            data,
        }
    }

    /// Report with weather fields only
    pub fn unavailable(reading: &WeatherReading) -> Self {
        Self {
            message: ReportStatus::Unavailable,
            data: WeatherData::from_reading(reading),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::AirQuality;

    fn reading() -> WeatherReading {
        let mut reading = WeatherReading::new(31.0, 75.0, 12.6)
            .with_uv(7.0)
            .with_aqi(AirQuality::EpaIndex(2))
            .with_description("Partly cloudy");
        reading.city = "Chennai".to_string();
        reading.country = Some("India".to_string());
        reading.observed_at = NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        reading
    }

    #[test]
    fn test_units_are_formatted_at_the_boundary() {
        let report = WeatherReport::unavailable(&reading());
        assert_eq!(report.data.humidity, "75%");
        assert_eq!(report.data.wind_speed, "12.6 km/h");
        assert_eq!(report.data.aqi, Some(2));
    }

    #[test]
    fn test_date_formatting() {
        let report = WeatherReport::unavailable(&reading());
        assert_eq!(report.data.datetime, "17 Oct 2026");
        assert_eq!(report.data.day, "Saturday");
    }

    #[test]
    fn test_unavailable_omits_health_fields() {
        let json = serde_json::to_value(WeatherReport::unavailable(&reading())).unwrap();
        assert_eq!(json["message"], "unavailable");
        assert!(json["data"].get("possible_health_issues").is_none());
        assert!(json["data"].get("preventions").is_none());
    }

    #[test]
    fn test_success_includes_health_fields() {
        let report = WeatherReport::success(
            &reading(),
            vec!["Sunburn".to_string()],
            vec!["Apply SPF 30 sunscreen".to_string()],
        );
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["message"], "success");
        assert_eq!(json["data"]["possible_health_issues"][0], "Sunburn");
        assert_eq!(json["data"]["preventions"][0], "Apply SPF 30 sunscreen");
    }
}
