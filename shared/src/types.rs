//! Common types used across the service

/// GPS coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A place to look up, as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub city: String,
    pub country: Option<String>,
}

impl Place {
    pub fn new(city: impl Into<String>, country: Option<String>) -> Self {
        Self {
            city: city.into(),
            country,
        }
    }

    /// Join city and country with `separator`, or return the bare city
    pub fn query(&self, separator: &str) -> String {
        match &self.country {
            Some(country) => format!("{}{}{}", self.city, separator, country),
            None => self.city.clone(),
        }
    }
}

/// Uppercase the first character of a display name
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
