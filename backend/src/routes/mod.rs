//! Route definitions for the Weather Health Alerts service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Liveness probe
        .route("/", get(handlers::api_info))
        // Weather health report
        .route("/weather", post(handlers::get_weather_report))
}
