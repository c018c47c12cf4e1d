use reqwest::StatusCode;
use thiserror::Error;

/// Every way a lookup can end without a result.
///
/// All variants are terminal for the query that produced them and are shown
/// to the user as a single line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("Please enter a city name")]
    EmptyQuery,

    #[error("City not found. Please check the city name.")]
    NotFound,

    #[error("Invalid API key.")]
    Unauthorized,

    /// Any other non-success status.
    #[error("Failed to fetch weather data.")]
    Http(u16),

    /// Network failure, unreadable body or malformed JSON. Carries the
    /// underlying message as-is.
    #[error("{0}")]
    Transport(String),
}

impl WeatherError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => WeatherError::NotFound,
            StatusCode::UNAUTHORIZED => WeatherError::Unauthorized,
            other => WeatherError::Http(other.as_u16()),
        }
    }
}

// reqwest includes the request URL, and with it the API key, in its message.
impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Transport(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Transport(err.to_string())
    }
}
