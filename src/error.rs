use reqwest::StatusCode;
use thiserror::Error;

/// How loudly a failure is surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Everything that can stop a search from updating the display.
///
/// The `Display` text of each variant is the exact message shown in the
/// modal dialog.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Please enter a city name.")]
    EmptyCity,

    #[error("API Key is missing. Check .env file.")]
    MissingApiKey,

    #[error("City not found.")]
    CityNotFound,

    #[error("HTTP Error: {0}")]
    Http(StatusCode),

    #[error("Network Error: {0}")]
    Network(reqwest::Error),

    #[error("An error occurred: {0}")]
    Unexpected(String),
}

impl WeatherError {
    pub fn title(&self) -> &'static str {
        match self {
            WeatherError::EmptyCity => "Input Error",
            WeatherError::MissingApiKey => "Configuration Error",
            _ => "Error",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            WeatherError::EmptyCity => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

// reqwest puts the full request URL, `appid` included, into its message
impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Network(err.without_url())
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Unexpected(err.to_string())
    }
}

/// Icon failures never reach the user as a dialog; they only swap the image
/// for placeholder text.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("icon request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("icon request returned {0}")]
    Status(StatusCode),

    #[error("icon could not be decoded: {0}")]
    Decode(#[from] image::ImageError),
}
