//! Arrival feed HTTP client.

use std::future::Future;

use crate::board::{ArrivalSource, TransportError};
use crate::domain::{ServiceRecord, StopId};

use super::convert::convert_services;
use super::error::ArrivalsError;
use super::types::ArrivalsResponse;

/// Default base URL for the public arrival feed.
const DEFAULT_BASE_URL: &str = "https://sg-bus-arrivals.vercel.app";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the arrivals client.
#[derive(Debug, Clone)]
pub struct ArrivalsConfig {
    /// Base URL for the feed (defaults to the public proxy)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ArrivalsConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted feed).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ArrivalsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Arrival feed HTTP client.
#[derive(Debug, Clone)]
pub struct ArrivalsClient {
    http: reqwest::Client,
    base_url: String,
}

impl ArrivalsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ArrivalsConfig) -> Result<Self, ArrivalsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch and convert the current arrivals for a stop.
    ///
    /// An empty list is a valid result; distinguishing "no services"
    /// from "fetch failed" is the caller's concern and the reason this
    /// returns `Ok(vec![])` rather than an error for an empty board.
    pub async fn get_arrivals(&self, stop: &StopId) -> Result<Vec<ServiceRecord>, ArrivalsError> {
        let url = format!("{}/arrivals", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("id", stop.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArrivalsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: ArrivalsResponse =
            serde_json::from_str(&body).map_err(|e| ArrivalsError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok(convert_services(parsed))
    }
}

impl ArrivalSource for ArrivalsClient {
    fn fetch_arrivals(
        &self,
        stop: &StopId,
    ) -> impl Future<Output = Result<Vec<ServiceRecord>, TransportError>> + Send {
        async move {
            self.get_arrivals(stop)
                .await
                .map_err(|e| TransportError::new(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = ArrivalsConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(5);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_defaults() {
        let config = ArrivalsConfig::new();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn client_creation() {
        let client = ArrivalsClient::new(ArrivalsConfig::new());
        assert!(client.is_ok());
    }

    // Integration tests against the live feed would make real HTTP
    // requests; they belong behind #[ignore] and are not run in CI.
}
