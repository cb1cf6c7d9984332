use thiserror::Error;

/// Common error type for partnerdash components.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sample: {0}")]
    InvalidSample(String),

    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl Error {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result type alias using partnerdash's Error.
pub type Result<T> = std::result::Result<T, Error>;
