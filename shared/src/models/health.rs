//! Health rule tables and the alert evaluation over them
//!
//! The rule table maps weather readings to alert tags; the prevention table
//! maps alert tags to advice. Both are loaded once and only ever read.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::weather::{AirQuality, WeatherReading};

/// Default EPA index bound for the very poor air quality tier
pub const DEFAULT_VERY_POOR_EPA_INDEX: u8 = 5;

/// Default EPA index bound for the poor air quality tier
pub const DEFAULT_POOR_EPA_INDEX: u8 = 3;

/// Ordered sequence of alert tags for one reading, duplicates kept
pub type AlertSet = Vec<String>;

/// One severity level within a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTier {
    pub threshold: f64,
    #[serde(default)]
    pub alerts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRules {
    pub very_high: RuleTier,
    pub high: RuleTier,
    pub very_cold: RuleTier,
    pub moderate_cold: RuleTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumidityRules {
    pub very_high: RuleTier,
    pub high: RuleTier,
    pub low: RuleTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindRules {
    pub very_high: RuleTier,
    pub high: RuleTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvRules {
    pub very_high: RuleTier,
    pub high: RuleTier,
}

/// Air quality tier carrying a bound for each supported scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityTier {
    /// Numeric US AQI bound
    pub aqi: u32,
    /// EPA category index bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u8>,
    #[serde(default)]
    pub alerts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityRules {
    pub very_poor: AirQualityTier,
    pub poor: AirQualityTier,
}

/// Threshold-to-alert mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    pub temperature: TemperatureRules,
    pub humidity: HumidityRules,
    pub wind: WindRules,
    pub uv_index: UvRules,
    pub air_quality: AirQualityRules,
    /// Substring key to alerts, in file order
    #[serde(default)]
    pub conditions: IndexMap<String, Vec<String>>,
}

/// Alert-to-prevention mapping, in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreventionTable(IndexMap<String, Vec<String>>);

impl PreventionTable {
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    pub fn get(&self, alert: &str) -> Option<&Vec<String>> {
        self.0.get(alert)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    AtLeast,
    AtMost,
}

impl RuleTier {
    fn matches(&self, value: f64, bound: Bound) -> bool {
        match bound {
            Bound::AtLeast => value >= self.threshold,
            Bound::AtMost => value <= self.threshold,
        }
    }
}

/// Append the alerts of the first tier that matches; later tiers are skipped
fn extend_first_match(alerts: &mut AlertSet, value: f64, tiers: &[(&RuleTier, Bound)]) {
    if let Some((tier, _)) = tiers.iter().find(|(tier, bound)| tier.matches(value, *bound)) {
        alerts.extend(tier.alerts.iter().cloned());
    }
}

fn air_quality_tier<'a>(aqi: AirQuality, rules: &'a AirQualityRules) -> Option<&'a AirQualityTier> {
    let (value, very_poor, poor) = match aqi {
        AirQuality::EpaIndex(index) => (
            u32::from(index),
            u32::from(rules.very_poor.index.unwrap_or(DEFAULT_VERY_POOR_EPA_INDEX)),
            u32::from(rules.poor.index.unwrap_or(DEFAULT_POOR_EPA_INDEX)),
        ),
        AirQuality::UsAqi(aqi) => (aqi, rules.very_poor.aqi, rules.poor.aqi),
    };

    // Zero means "not reported" for every provider we talk to
    if value == 0 {
        None
    } else if value >= very_poor {
        Some(&rules.very_poor)
    } else if value >= poor {
        Some(&rules.poor)
    } else {
        None
    }
}

/// Map a reading to its alert tags
///
/// Categories are checked independently and concatenated in the order
/// temperature, humidity, wind, uv, air quality, conditions. Within a
/// threshold category only the first matching tier contributes. Absent
/// optional fields are skipped.
pub fn evaluate(reading: &WeatherReading, rules: &RuleTable) -> AlertSet {
    let mut alerts = AlertSet::new();

    let temperature = &rules.temperature;
    extend_first_match(
        &mut alerts,
        reading.temperature,
        &[
            (&temperature.very_high, Bound::AtLeast),
            (&temperature.high, Bound::AtLeast),
            (&temperature.very_cold, Bound::AtMost),
            (&temperature.moderate_cold, Bound::AtMost),
        ],
    );

    let humidity = &rules.humidity;
    extend_first_match(
        &mut alerts,
        reading.humidity,
        &[
            (&humidity.very_high, Bound::AtLeast),
            (&humidity.high, Bound::AtLeast),
            (&humidity.low, Bound::AtMost),
        ],
    );

    extend_first_match(
        &mut alerts,
        reading.wind_speed,
        &[
            (&rules.wind.very_high, Bound::AtLeast),
            (&rules.wind.high, Bound::AtLeast),
        ],
    );

    if let Some(uv) = reading.uv.filter(|uv| *uv != 0.0) {
        extend_first_match(
            &mut alerts,
            uv,
            &[
                (&rules.uv_index.very_high, Bound::AtLeast),
                (&rules.uv_index.high, Bound::AtLeast),
            ],
        );
    }

    if let Some(tier) = reading.aqi.and_then(|aqi| air_quality_tier(aqi, &rules.air_quality)) {
        alerts.extend(tier.alerts.iter().cloned());
    }

    let condition = reading.description.to_lowercase();
    for (key, tags) in &rules.conditions {
        let key = key.to_lowercase();
        if !key.is_empty() && condition.contains(&key) {
            alerts.extend(tags.iter().cloned());
        }
    }

    alerts
}

/// Collect prevention advice for a set of alerts
///
/// Output follows the prevention table's key order, not the alert order.
pub fn resolve(alerts: &[String], preventions: &PreventionTable) -> Vec<String> {
    preventions
        .iter()
        .filter(|(tag, _)| alerts.iter().any(|alert| alert == *tag))
        .flat_map(|(_, advice)| advice.iter().cloned())
        .collect()
}
