//! Error types for registry persistence and source scanning.

use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur while reading or writing component mappings.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Directory traversal error.
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),
}
