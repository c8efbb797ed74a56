//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response body: {0}")]
    InvalidResponse(String),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Chart pipeline errors.
///
/// Degenerate domains and non-finite samples are handled inside the pipeline
/// and never show up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Series {index} has no samples")]
    EmptySeries { index: usize },

    #[error("Expected 1 or 2 series, got {0}")]
    UnsupportedSeriesCount(usize),

    #[error("Invalid chart dimensions {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("Horizontal padding {padding} leaves no room in width {width}")]
    InvalidPadding { padding: f64, width: f64 },
}

impl ChartError {
    /// Whether the UI should show the "insufficient data" placeholder
    /// instead of surfacing the error.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, ChartError::EmptySeries { .. })
    }
}

impl SdkError {
    /// Fetch failures and empty series both render as "no data".
    pub fn is_insufficient_data(&self) -> bool {
        match self {
            SdkError::Chart(e) => e.is_insufficient_data(),
            SdkError::Http(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series_is_insufficient_data() {
        assert!(ChartError::EmptySeries { index: 1 }.is_insufficient_data());
        assert!(!ChartError::UnsupportedSeriesCount(3).is_insufficient_data());
    }

    #[test]
    fn test_http_failure_is_insufficient_data() {
        let err = SdkError::from(HttpError::Timeout);
        assert!(err.is_insufficient_data());
        assert!(!SdkError::Validation("bad".into()).is_insufficient_data());
    }

    #[test]
    fn test_chart_error_display() {
        let err = SdkError::from(ChartError::EmptySeries { index: 0 });
        assert_eq!(err.to_string(), "Chart error: Series 0 has no samples");
    }
}
