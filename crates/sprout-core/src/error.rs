//! Error types for design input handling.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while reading design input.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The input is valid JSON but not a node tree or API response.
    #[error("Invalid design input: {0}")]
    InvalidDesign(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
