use thiserror::Error;

/// Failures of a single lookup (fetch, then build).
///
/// Every variant aborts snapshot construction; nothing is ever defaulted.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider did not recognize the location (or it was empty).
    #[error("Location was not recognized by the weather provider")]
    InvalidLocation,

    /// The payload is missing a field or index the snapshot needs.
    #[error("Malformed weather payload: {0}")]
    MalformedPayload(String),

    /// Transport failure, timeout or an error status from the provider.
    #[error("Network error: {0}")]
    Network(String),
}

impl WeatherError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        WeatherError::MalformedPayload(msg.into())
    }

    /// Whether running the same lookup again might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WeatherError::Network(_))
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key in its query.
        let err = err.without_url();
        if err.is_timeout() {
            WeatherError::Network(format!("request timed out: {err}"))
        } else {
            WeatherError::Network(err.to_string())
        }
    }
}
