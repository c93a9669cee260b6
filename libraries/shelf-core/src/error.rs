/// Core error types for Shelf
use thiserror::Error;

use crate::validation::ValidationError;

/// Result type alias using `ShelfError`
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Core error type for Shelf
#[derive(Error, Debug)]
pub enum ShelfError {
    /// Data-access failures reported by the store or its client
    #[error("Data access error: {0}")]
    Storage(String),

    /// Request rejected before it reached the store
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Field constraint violations
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ShelfError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the error was caused by the caller rather than the store
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::Validation(_))
    }
}
