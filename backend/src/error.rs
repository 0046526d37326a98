//! Error handling for the Weather Health Alerts service
//!
//! Every failure is rendered as the `{"message": ..., "error": ...}`
//! envelope the weather endpoint promises its callers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Place not found: {0}")]
    GeocodeMiss(String),

    // Upstream errors
    #[error("Weather provider error: {details}")]
    Provider {
        status: Option<u16>,
        details: Value,
    },

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Provider failure without an upstream HTTP status (transport, parsing, empty data)
    pub fn provider(details: impl Into<String>) -> Self {
        AppError::Provider {
            status: None,
            details: Value::String(details.into()),
        }
    }

    /// Provider failure carrying the upstream status and body
    ///
    /// JSON bodies are passed through as-is; anything else is kept as text.
    pub fn upstream(status: u16, body: &str) -> Self {
        let details = serde_json::from_str(body)
            .unwrap_or_else(|_| Value::String(format!("Upstream returned status {}: {}", status, body)));
        AppError::Provider {
            status: Some(status),
            details,
        }
    }
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: &'static str,
    pub error: Value,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: "failed",
                    error: serde_json::json!({ "field": field, "message": message }),
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: "failed",
                    error: Value::String(msg.clone()),
                },
            ),
            AppError::GeocodeMiss(_) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: "unavailable",
                    error: Value::String("Unable to fetch place details".to_string()),
                },
            ),
            AppError::Provider { details, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    message: "failed",
                    error: details.clone(),
                },
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    message: "failed",
                    error: Value::String("An internal server error occurred".to_string()),
                },
            ),
        };

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
