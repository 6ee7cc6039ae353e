//! Error types for blocks-cli

use std::path::PathBuf;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from blocks-core
    #[error(transparent)]
    Core(#[from] blocks_core::Error),

    /// Error from blocks-meta
    #[error(transparent)]
    Meta(#[from] blocks_meta::Error),

    /// Output could not be encoded
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Input could not be read
    #[error("Failed to read {path}: {source}")]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
