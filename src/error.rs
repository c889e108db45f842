//! Error types for the filegate gateway.

use thiserror::Error;

/// Common error type for gateway operations.
#[derive(Error, Debug)]
pub enum FilegateError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input (folder or file names).
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, FilegateError>;
