//! Arrival feed error types.

/// Errors from the arrival feed HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ArrivalsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed returned an error status code
    #[error("feed error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        /// Leading slice of the offending body, for log context.
        body: Option<String>,
    },

    /// Mock data could not be loaded
    #[error("mock data error: {message}")]
    MockData { message: String },
}
