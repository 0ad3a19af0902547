//! Stop location API client.

use std::future::Future;

use serde::Deserialize;
use tracing::warn;

use crate::board::{StopLocationSource, TransportError};
use crate::domain::{GeoPoint, StopId};

use super::error::StopsError;

/// Default base URL for the stop location API.
const DEFAULT_BASE_URL: &str = "https://sg-bus-arrivals.vercel.app";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Minimal DTO for a stop lookup - we only need the coordinates.
#[derive(Debug, Clone, Deserialize)]
pub struct StopDto {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Configuration for the stop location client.
#[derive(Debug, Clone)]
pub struct StopsConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StopsConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
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

impl Default for StopsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the stop location API.
#[derive(Debug, Clone)]
pub struct StopLocationClient {
    http: reqwest::Client,
    base_url: String,
}

impl StopLocationClient {
    /// Create a new client with the given configuration.
    pub fn new(config: StopsConfig) -> Result<Self, StopsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Look up a stop's location.
    ///
    /// HTTP 404 means "no known location for this stop" and is not an
    /// error; so is a response with missing or unusable coordinates.
    pub async fn get_stop_location(&self, stop: &StopId) -> Result<Option<GeoPoint>, StopsError> {
        let url = format!("{}/stop", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("id", stop.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StopsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let dto: StopDto = response
            .json()
            .await
            .map_err(|e| StopsError::Json {
                message: e.to_string(),
            })?;

        Ok(Self::to_point(stop, dto))
    }

    fn to_point(stop: &StopId, dto: StopDto) -> Option<GeoPoint> {
        let (Some(lat), Some(lon)) = (dto.lat, dto.lon) else {
            return None;
        };

        match GeoPoint::new(lat, lon) {
            Ok(point) => Some(point),
            Err(e) => {
                warn!(%stop, error = %e, "discarding malformed stop location");
                None
            }
        }
    }
}

impl StopLocationSource for StopLocationClient {
    fn locate_stop(
        &self,
        stop: &StopId,
    ) -> impl Future<Output = Result<Option<GeoPoint>, TransportError>> + Send {
        async move {
            self.get_stop_location(stop)
                .await
                .map_err(|e| TransportError::new(e.to_string()))
        }
    }
}
