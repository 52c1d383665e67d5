//! Error types for the command-line interface.

use std::path::PathBuf;

use sprout_codegen::RegistryError;
use sprout_core::CoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end a CLI run.
#[derive(Error, Debug)]
pub enum CliError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The design input could not be read.
    #[error(transparent)]
    Design(#[from] CoreError),

    /// The component registry could not be written or the source tree walked.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// JSON error while writing the asset manifest.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file is not valid TOML for this tool.
    #[error("Failed to parse TOML configuration: {0}")]
    ConfigParse(String),

    /// An explicitly requested configuration file does not exist.
    #[error("Missing configuration file: {0}")]
    MissingConfig(PathBuf),
}
