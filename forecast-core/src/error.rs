use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single geocoding or weather request.
///
/// `what` names the request that failed ("geocoding", "weather") so the
/// message reads on its own when surfaced to a user.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Failed to reach OpenWeather ({what}): {source}")]
    Transport {
        what: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The configured endpoint could not be turned into a request URL.
    #[error("Invalid OpenWeather {what} endpoint: {source}")]
    InvalidEndpoint {
        what: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse OpenWeather {what} JSON: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("OpenWeather {what} request failed with status {status}: {body}")]
    Api {
        what: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("City not found: {city}")]
    NotFound { city: String },
}

impl WeatherError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, WeatherError::NotFound { .. })
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
