use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoutError>;

/// Everything that can abort a scouting run
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to fetch {url}: HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to fetch {url}: {message}")]
    Network { url: String, message: String },

    #[error("Oracle request failed: {0}")]
    Oracle(String),

    #[error("Could not identify a login entry point on {0}")]
    LocatorNotFound(String),

    #[error("No authentication form found on {0}")]
    ExtractorNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScoutError {
    /// True for failures of the page fetch itself (status or transport)
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            ScoutError::HttpStatus { .. } | ScoutError::Network { .. }
        )
    }
}
