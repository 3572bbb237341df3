//! Error types for Shutter.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Query errors
    #[error("Photo not found: {0}")]
    PhotoNotFound(String),

    #[error("Album not found: {0}")]
    AlbumNotFound(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Form errors
    #[error("Validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    // Transport errors
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True for errors the user can resolve before anything was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::PhotoNotFound(_) | Error::AlbumNotFound(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
