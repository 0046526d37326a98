//! Integration tests for the weather provider adapters using wiremock.
//!
//! These tests verify each adapter against a mock upstream server.

use std::time::Duration;

use serde_json::json;
use weather_health::error::AppError;
use weather_health::external::{
    OpenMeteoProvider, UpstreamClient, WeatherApiProvider, WeatherProvider, WeatherbitProvider,
};
use weather_health::models::AirQuality;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared::Place;

fn http() -> UpstreamClient {
    UpstreamClient::new(Duration::from_secs(5), 1).unwrap()
}

fn weatherapi(server: &MockServer) -> WeatherApiProvider {
    WeatherApiProvider::new(http(), "test-key".to_string(), server.uri()).unwrap()
}

fn open_meteo(server: &MockServer) -> OpenMeteoProvider {
    OpenMeteoProvider::new(http(), server.uri(), server.uri(), server.uri())
}

fn weatherbit(server: &MockServer) -> WeatherbitProvider {
    WeatherbitProvider::new(http(), "test-key".to_string(), server.uri()).unwrap()
}

fn weatherapi_body() -> serde_json::Value {
    json!({
        "location": {"name": "chennai", "country": "India", "localtime": "2026-10-17 14:30"},
        "current": {
            "temp_c": 36.2,
            "humidity": 70,
            "wind_kph": 18.0,
            "uv": 8.0,
            "condition": {"text": "Partly cloudy"},
            "air_quality": {"us-epa-index": 3}
        }
    })
}

// ---------------------------------------------------------------------------
// WeatherAPI.com
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_weatherapi_fetch_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "Chennai,India"))
        .and(query_param("aqi", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weatherapi_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = weatherapi(&mock_server);
    let place = Place::new("Chennai", Some("India".to_string()));
    let reading = provider.fetch(&place).await.unwrap();

    assert_eq!(reading.temperature, 36.2);
    assert_eq!(reading.humidity, 70.0);
    assert_eq!(reading.wind_speed, 18.0);
    assert_eq!(reading.uv, Some(8.0));
    assert_eq!(reading.aqi, Some(AirQuality::EpaIndex(3)));
    assert_eq!(reading.city, "Chennai");
    assert_eq!(reading.country.as_deref(), Some("India"));
}

#[tokio::test]
async fn test_weatherapi_error_body_passes_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 1006, "message": "No matching location found."}
        })))
        // 4xx responses are never retried
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = weatherapi(&mock_server);
    let err = provider.fetch(&Place::new("Atlantis", None)).await.unwrap_err();

    match err {
        AppError::Provider { status, details } => {
            assert_eq!(status, Some(400));
            assert_eq!(details["error"]["code"], 1006);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_weatherapi_requires_key() {
    let result = WeatherApiProvider::new(http(), "  ".to_string(), "http://localhost".to_string());
    assert!(matches!(result, Err(AppError::Configuration(_))));
}

#[tokio::test]
async fn test_timeout_is_retried_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(weatherapi_body())
                .set_delay(Duration::from_millis(500)),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = UpstreamClient::new(Duration::from_millis(100), 1).unwrap();
    let provider =
        WeatherApiProvider::new(client, "test-key".to_string(), mock_server.uri()).unwrap();

    let err = provider.fetch(&Place::new("Chennai", None)).await.unwrap_err();
    assert!(matches!(err, AppError::Provider { status: None, .. }));
}

// ---------------------------------------------------------------------------
// Open-Meteo
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_open_meteo_geocode_then_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"name": "Paris", "latitude": 33.66, "longitude": -95.55,
                 "country": "United States", "country_code": "US"},
                {"name": "Paris", "latitude": 48.85, "longitude": 2.35,
                 "country": "France", "country_code": "FR"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", "48.85"))
        .and(query_param("longitude", "2.35"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": {
                "time": "2026-10-17T09:15",
                "temperature_2m": 8.4,
                "relative_humidity_2m": 93,
                "wind_speed_10m": 22.1,
                "uv_index": 1.2,
                "apparent_temperature": 5.0,
                "weather_code": 61
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/air-quality"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": {"time": "2026-10-17T09:00", "us_aqi": 57}
        })))
        .mount(&mock_server)
        .await;

    let provider = open_meteo(&mock_server);
    let place = Place::new("Paris", Some("France".to_string()));
    let reading = provider.fetch(&place).await.unwrap();

    assert_eq!(reading.temperature, 8.4);
    assert_eq!(reading.humidity, 93.0);
    assert_eq!(reading.wind_speed, 22.1);
    assert_eq!(reading.aqi, Some(AirQuality::UsAqi(57)));
    assert_eq!(reading.description, "Rain");
    assert_eq!(reading.city, "Paris");
    assert_eq!(reading.country.as_deref(), Some("France"));
    assert_eq!(reading.observed_at.format("%Y-%m-%d %H:%M").to_string(), "2026-10-17 09:15");
}

#[tokio::test]
async fn test_open_meteo_geocode_miss_skips_forecast() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"generationtime_ms": 0.5})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let provider = open_meteo(&mock_server);
    let err = provider.fetch(&Place::new("Nowhereville", None)).await.unwrap_err();
    assert!(matches!(err, AppError::GeocodeMiss(_)));
}

#[tokio::test]
async fn test_open_meteo_country_mismatch_skips_forecast() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", "Paris"))
        .and(query_param("count", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"name": "Paris", "latitude": 33.66, "longitude": -95.55,
                 "country": "United States", "country_code": "US"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let provider = open_meteo(&mock_server);
    let place = Place::new("Paris", Some("France".to_string()));
    let err = provider.fetch(&place).await.unwrap_err();

    match err {
        AppError::GeocodeMiss(query) => assert_eq!(query, "Paris, France"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_open_meteo_forecast_failure_wins_over_air_quality() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"name": "Lima", "latitude": -12.05, "longitude": -77.04, "country": "Peru"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": true, "reason": "Internal error"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/air-quality"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": {"time": "2026-10-17T12:00", "us_aqi": 40}
        })))
        .mount(&mock_server)
        .await;

    let provider = open_meteo(&mock_server);
    let err = provider.fetch(&Place::new("Lima", None)).await.unwrap_err();

    match err {
        AppError::Provider { status, details } => {
            assert_eq!(status, Some(500));
            assert_eq!(details["reason"], "Internal error");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_open_meteo_missing_coordinates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"name": "Somewhere", "country": "Nowhere"}]
        })))
        .mount(&mock_server)
        .await;

    let provider = open_meteo(&mock_server);
    let err = provider.fetch(&Place::new("Somewhere", None)).await.unwrap_err();
    assert!(matches!(err, AppError::Configuration(_)));
}

#[tokio::test]
async fn test_open_meteo_air_quality_failure_is_soft() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"name": "lagos", "latitude": 6.45, "longitude": 3.39, "country": "Nigeria"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": {
                "time": "2026-10-17T12:00",
                "temperature_2m": 31.0,
                "relative_humidity_2m": 80,
                "wind_speed_10m": 9.0
            }
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/air-quality"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let provider = open_meteo(&mock_server);
    let reading = provider.fetch(&Place::new("Lagos", None)).await.unwrap();

    assert!(reading.aqi.is_none());
    assert!(reading.uv.is_none());
    assert_eq!(reading.city, "Lagos");
    assert_eq!(reading.description, "");
}

// ---------------------------------------------------------------------------
// Weatherbit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_weatherbit_fetch_converts_wind() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current"))
        .and(query_param("key", "test-key"))
        .and(query_param("city", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "data": [{
                "city_name": "London",
                "country_code": "GB",
                "temp": 11.0,
                "rh": 88,
                "wind_spd": 20.0,
                "uv": 2.5,
                "aqi": 35,
                "weather": {"description": "Moderate rain", "code": 501},
                "ob_time": "2026-10-17 16:45"
            }]
        })))
        .mount(&mock_server)
        .await;

    let provider = weatherbit(&mock_server);
    let reading = provider.fetch(&Place::new("London", None)).await.unwrap();

    assert_eq!(reading.wind_speed, 72.0);
    assert_eq!(reading.aqi, Some(AirQuality::UsAqi(35)));
    assert_eq!(reading.description, "Moderate rain");
}

#[tokio::test]
async fn test_weatherbit_empty_data_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0, "data": []})))
        .mount(&mock_server)
        .await;

    let provider = weatherbit(&mock_server);
    let err = provider.fetch(&Place::new("London", None)).await.unwrap_err();
    assert!(matches!(err, AppError::Provider { .. }));
}

#[tokio::test]
async fn test_weatherbit_no_content_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let provider = weatherbit(&mock_server);
    let err = provider.fetch(&Place::new("Qwxyz", None)).await.unwrap_err();
    assert!(matches!(err, AppError::Provider { status: Some(204), .. }));
}
