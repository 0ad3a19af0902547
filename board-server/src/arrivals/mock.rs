//! Mock arrival source for development without network access.
//!
//! Loads sample arrival responses from JSON files and serves them as
//! if they were live feed responses.

use std::collections::HashMap;
use std::future::Future;
use std::path::Path;

use crate::board::{ArrivalSource, TransportError};
use crate::domain::{ServiceRecord, StopId};

use super::convert::convert_services;
use super::error::ArrivalsError;
use super::types::ArrivalsResponse;

/// Mock arrival source that serves data from JSON files.
///
/// Useful for development and demos when the public feed is down or
/// unreachable. Each file holds one feed response in the live wire
/// format.
#[derive(Debug, Clone)]
pub struct MockArrivalSource {
    /// Pre-loaded responses, keyed by stop.
    responses: HashMap<StopId, ArrivalsResponse>,
}

impl MockArrivalSource {
    /// Create a mock source by loading JSON files from a directory.
    ///
    /// Expects files named `{stopId}.json` (e.g., `83139.json`).
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, ArrivalsError> {
        let data_dir = data_dir.as_ref();
        let mut responses = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| ArrivalsError::MockData {
            message: format!("failed to read mock data directory {data_dir:?}: {e}"),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| ArrivalsError::MockData {
                message: format!("failed to read directory entry: {e}"),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            // Extract the stop ID from the filename ("83139.json" -> "83139")
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| ArrivalsError::MockData {
                    message: format!("invalid filename: {path:?}"),
                })?;

            let stop = StopId::parse(stem).map_err(|e| ArrivalsError::MockData {
                message: format!("invalid stop ID in filename {path:?}: {e}"),
            })?;

            let json = std::fs::read_to_string(&path).map_err(|e| ArrivalsError::MockData {
                message: format!("failed to read {path:?}: {e}"),
            })?;

            let response: ArrivalsResponse =
                serde_json::from_str(&json).map_err(|e| ArrivalsError::MockData {
                    message: format!("failed to parse {path:?}: {e}"),
                })?;

            responses.insert(stop, response);
        }

        if responses.is_empty() {
            return Err(ArrivalsError::MockData {
                message: format!("no mock arrival files found in {data_dir:?}"),
            });
        }

        Ok(Self { responses })
    }

    /// Get the converted arrivals for a stop.
    ///
    /// Mimics the real `ArrivalsClient::get_arrivals` interface.
    pub fn get_arrivals(&self, stop: &StopId) -> Result<Vec<ServiceRecord>, ArrivalsError> {
        let response = self
            .responses
            .get(stop)
            .ok_or_else(|| ArrivalsError::Api {
                status: 404,
                message: format!(
                    "no mock data for stop {stop}; available: {:?}",
                    self.available_stops()
                ),
            })?;

        Ok(convert_services(response.clone()))
    }

    /// List the stops present in the mock data.
    pub fn available_stops(&self) -> Vec<String> {
        let mut stops: Vec<String> = self.responses.keys().map(|s| s.to_string()).collect();
        stops.sort();
        stops
    }
}

impl ArrivalSource for MockArrivalSource {
    fn fetch_arrivals(
        &self,
        stop: &StopId,
    ) -> impl Future<Output = Result<Vec<ServiceRecord>, TransportError>> + Send {
        let result = self
            .get_arrivals(stop)
            .map_err(|e| TransportError::new(e.to_string()));
        async move { result }
    }
}
