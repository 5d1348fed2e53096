//! Error types for box computation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TBoxError>;

#[derive(Debug, Error)]
pub enum TBoxError {
    /// A required argument is missing, empty, or of the wrong shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Timestamps are not strictly increasing, or sequences overlap.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A type tag or box shape the dispatch tables do not know how to handle.
    #[error("Unknown {kind} for bounding box function {operation}")]
    InternalTypeError {
        kind: String,
        operation: &'static str,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TBoxError {
    /// Build an internal type error, reporting it through the log facade.
    pub(crate) fn internal_type(kind: impl Into<String>, operation: &'static str) -> Self {
        let kind = kind.into();
        log::error!(
            "Unknown {} for bounding box function {}",
            kind,
            operation
        );
        TBoxError::InternalTypeError { kind, operation }
    }

    /// Build an invalid input error, reporting it through the log facade.
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        let message = message.into();
        log::warn!("Rejecting input: {}", message);
        TBoxError::InvalidInput(message)
    }
}
