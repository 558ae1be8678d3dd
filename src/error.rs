use std::fmt;

/// Custom error type for NGSI operations
#[derive(Debug)]
pub enum NgsiError {
    /// HTTP request never completed
    Http(reqwest::Error),
    /// Broker returned a non-success status
    Api { status: u16, message: String },
    /// Total-count header missing or not an integer
    CountUnavailable(String),
    /// Safe-string or JSON decoding of a response body failed
    Decode(String),
    /// GeoJSON FeatureCollection envelope did not match
    GeoJsonFraming(String),
    /// Writing to the output sink failed
    Output(String),
    /// Failed to build credentials
    Credentials(String),
    /// Configuration error
    Config(String),
}

impl fmt::Display for NgsiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NgsiError::Http(e) => write!(f, "HTTP request failed: {}", e),
            NgsiError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            NgsiError::CountUnavailable(msg) => write!(f, "ResultsCount error: {}", msg),
            NgsiError::Decode(msg) => write!(f, "JSON error: {}", msg),
            NgsiError::GeoJsonFraming(msg) => write!(f, "GeoJSON error: {}", msg),
            NgsiError::Output(msg) => write!(f, "Output error: {}", msg),
            NgsiError::Credentials(msg) => write!(f, "{}", msg),
            NgsiError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for NgsiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NgsiError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NgsiError {
    fn from(err: reqwest::Error) -> Self {
        NgsiError::Http(err)
    }
}

impl From<serde_json::Error> for NgsiError {
    fn from(err: serde_json::Error) -> Self {
        NgsiError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for NgsiError {
    fn from(err: std::io::Error) -> Self {
        NgsiError::Output(err.to_string())
    }
}

/// Result type alias for NGSI operations
pub type Result<T> = std::result::Result<T, NgsiError>;
