//! Error types for noteshare.

use thiserror::Error;

/// Result type alias using noteshare's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for noteshare operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Note not found, or hidden from the requester's visibility scope.
    /// The two cases are deliberately indistinguishable so the existence
    /// of pending/private notes does not leak.
    #[error("Note not found: {0}")]
    NoteNotFound(uuid::Uuid),

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(uuid::Uuid),

    /// Malformed or out-of-bounds input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Forbidden (authenticated but not authorized)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
