//! Error types for phish-rs

use thiserror::Error;

/// Result type alias for classifier operations
pub type Result<T> = std::result::Result<T, PhishError>;

/// Classifier error types
#[derive(Error, Debug)]
pub enum PhishError {
    /// Input was empty or whitespace only
    #[error("Please provide the email content.")]
    EmptyInput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A model artifact is malformed or inconsistent
    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// Vectorizer output size does not match the classifier weights
    #[error("Feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Inference error: {0}")]
    Inference(String),
}

impl PhishError {
    /// True for errors caused by the caller's input rather than the service
    pub fn is_validation(&self) -> bool {
        matches!(self, PhishError::EmptyInput)
    }
}
