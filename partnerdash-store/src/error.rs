//! Error types for the data-access layer.

use thiserror::Error;

/// Result type alias using [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors returned by a [`DataSource`](crate::DataSource).
#[derive(Error, Debug)]
pub enum StoreError {
    /// The addressed record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A draft or update failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The remote backend answered with a non-success status.
    #[error("Remote error (status {status}): {message}")]
    Remote { status: u16, message: String },

    /// The request never got a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Media could not be prepared for upload.
    #[error("Media error: {0}")]
    Media(String),

    /// Store configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Create a not-found error.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a media error.
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error reports a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<partnerdash_common::Error> for StoreError {
    fn from(err: partnerdash_common::Error) -> Self {
        match err {
            partnerdash_common::Error::Validation(msg) => Self::Validation(msg),
            partnerdash_common::Error::Config(msg) => Self::Config(msg),
            other => Self::Decode(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<image::ImageError> for StoreError {
    fn from(err: image::ImageError) -> Self {
        Self::Media(err.to_string())
    }
}
