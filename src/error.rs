//! Error types for the triage consultation engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, ConsultationError>;

#[derive(Error, Debug)]
pub enum ConsultationError {

    // =============================
    // Engine Errors
    // =============================

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Backend not configured: {0}")]
    BackendUnavailable(String),

    #[error("Instructions error: {0}")]
    InstructionsError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
