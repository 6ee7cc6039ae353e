//! Error types for blocks-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid {format} metadata at {path}: {message}")]
    InvalidMetadata {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported metadata format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("File too large: {path} is {size} bytes (max {max})")]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error(transparent)]
    Registry(#[from] blocks_core::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
