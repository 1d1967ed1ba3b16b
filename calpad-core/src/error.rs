//! Error types for the calpad ecosystem.

use thiserror::Error;

/// Errors that can occur in calpad operations.
#[derive(Error, Debug)]
pub enum CalpadError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),

    #[error("Assistant error: {0}")]
    Assistant(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for calpad operations.
pub type CalpadResult<T> = Result<T, CalpadError>;
