//! Error types for Showroom

use thiserror::Error;

/// Result type alias for Showroom operations
pub type Result<T> = std::result::Result<T, ShowroomError>;

/// Main error type shared across the workspace
#[derive(Error, Debug)]
pub enum ShowroomError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ShowroomError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
