//! Weather Health Alerts - backend library
//!
//! Looks up current weather for a place, classifies it against static
//! health rules, and returns possible health issues with preventive advice.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use config::Config;

use external::WeatherProvider;
use services::HealthMappings;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub provider: Arc<dyn WeatherProvider>,
    pub mappings: Arc<HealthMappings>,
}

impl AppState {
    pub fn new(
        config: Config,
        provider: Arc<dyn WeatherProvider>,
        mappings: HealthMappings,
    ) -> Self {
        Self {
            config: Arc::new(config),
            provider,
            mappings: Arc::new(mappings),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
