//! HTTP plumbing shared by the provider adapters
//!
//! Network-level failures (connect errors, timeouts) are retried a bounded
//! number of times. Upstream HTTP error statuses are never retried.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// User agent string for upstream requests
pub const USER_AGENT: &str = concat!("weather-health-server/", env!("CARGO_PKG_VERSION"));

/// Delay before the first retry; doubles on each further attempt
const INITIAL_RETRY_DELAY_MS: u64 = 100;

/// Upper bound on a single backoff delay
const MAX_RETRY_DELAY_MS: u64 = 5_000;

/// Upper bound on configured retries
pub const MAX_RETRY_ATTEMPTS: u32 = 5;

/// Upstream HTTP client with timeout and retry policy applied
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    retry_attempts: u32,
}

impl UpstreamClient {
    /// Create a client with the given request timeout and retry budget
    ///
    /// The retry budget is clamped to [`MAX_RETRY_ATTEMPTS`].
    pub fn new(timeout: Duration, retry_attempts: u32) -> AppResult<Self> {
        if retry_attempts > MAX_RETRY_ATTEMPTS {
            tracing::warn!(
                "retry_attempts {} exceeds the maximum, using {}",
                retry_attempts,
                MAX_RETRY_ATTEMPTS
            );
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            retry_attempts: retry_attempts.min(MAX_RETRY_ATTEMPTS),
        })
    }

    /// Retries this client will make after a network-level failure
    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    /// GET `url` with `query` parameters and deserialize the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let mut attempt = 0;
        let response = loop {
            match self.client.get(url).query(query).send().await {
                Ok(response) => break response,
                Err(e) if is_transient(&e) && attempt < self.retry_attempts => {
                    let delay = retry_delay(attempt);
                    attempt += 1;
                    tracing::warn!(
                        "Upstream request failed ({}), retry {}/{} in {:?}",
                        e.without_url(),
                        attempt,
                        self.retry_attempts,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                // The URL carries the API key, so it never reaches the caller
                Err(e) => {
                    return Err(AppError::provider(format!(
                        "Weather API request failed: {}",
                        e.without_url()
                    )))
                }
            }
        };

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Err(AppError::Provider {
                status: Some(status.as_u16()),
                details: serde_json::Value::String("Weather API returned no data".to_string()),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(status.as_u16(), &body));
        }

        response.json::<T>().await.map_err(|e| {
            AppError::provider(format!("Failed to parse weather response: {}", e.without_url()))
        })
    }
}

fn is_transient(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout()
}

/// Exponential backoff for the given zero-based attempt, capped
fn retry_delay(attempt: u32) -> Duration {
    let delay_ms = INITIAL_RETRY_DELAY_MS.saturating_mul(2u64.saturating_pow(attempt));
    Duration::from_millis(delay_ms.min(MAX_RETRY_DELAY_MS))
}
