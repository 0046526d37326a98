//! Weather reading models

use chrono::NaiveDateTime;

/// Air quality on the scale the upstream provider reports it in
///
/// The two scales are not interchangeable: an EPA index of 5 is "very
/// unhealthy" while a US AQI of 5 is clean air. Each provider adapter picks
/// one and the rule table carries a threshold for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirQuality {
    /// US-EPA category index, 1 (good) to 6 (hazardous)
    EpaIndex(u8),
    /// Numeric US AQI, 0 to 500
    UsAqi(u32),
}

impl AirQuality {
    /// Raw number as reported upstream
    pub fn value(&self) -> u32 {
        match self {
            AirQuality::EpaIndex(index) => u32::from(*index),
            AirQuality::UsAqi(aqi) => *aqi,
        }
    }
}

/// Normalized snapshot of current conditions for one place
///
/// Numeric fields are kept in fixed units (°C, %, km/h). Display strings
/// are produced when the response is shaped, never here.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub uv: Option<f64>,
    pub aqi: Option<AirQuality>,
    pub description: String,
    pub city: String,
    pub country: Option<String>,
    /// Local time of the observation at the place
    pub observed_at: NaiveDateTime,
}

impl WeatherReading {
    /// Reading with only the always-present numeric fields set
    pub fn new(temperature: f64, humidity: f64, wind_speed: f64) -> Self {
        Self {
            temperature,
            humidity,
            wind_speed,
            uv: None,
            aqi: None,
            description: String::new(),
            city: String::new(),
            country: None,
            observed_at: NaiveDateTime::default(),
        }
    }

    pub fn with_uv(mut self, uv: f64) -> Self {
        self.uv = Some(uv);
        self
    }

    pub fn with_aqi(mut self, aqi: AirQuality) -> Self {
        self.aqi = Some(aqi);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Converts a WMO weather interpretation code to a condition label
pub fn describe_weather_code(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 => "Snow",
        77 => "Snow grains",
        80 | 81 | 82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "",
    }
}
