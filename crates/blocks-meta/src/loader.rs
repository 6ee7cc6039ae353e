//! Loader for block type metadata files
//!
//! Metadata can live in any directory layout; the loader walks it
//! recursively, typically finding one `block.json` per block directory:
//!
//! ```text
//! blocks/
//!   like-button/
//!     block.json
//!   share.toml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::metadata::BlockTypeMetadata;
use crate::{Error, Result};

/// Largest metadata or config file accepted.
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Loads [`BlockTypeMetadata`] from files, detecting the format from the
/// extension (`.json`, `.toml`, `.yaml`/`.yml`).
#[derive(Debug, Clone)]
pub struct MetadataLoader {
    max_size: u64,
}

impl MetadataLoader {
    pub fn new() -> Self {
        Self {
            max_size: MAX_FILE_SIZE,
        }
    }

    /// Override the per-file size limit.
    pub fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }

    /// Load one metadata file.
    pub fn load_file(&self, path: &Path) -> Result<BlockTypeMetadata> {
        let content = read_limited(path, self.max_size)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let invalid = |format: &str, message: String| Error::InvalidMetadata {
            path: path.to_path_buf(),
            format: format.into(),
            message,
        };

        match extension.as_str() {
            "json" => serde_json::from_str(&content).map_err(|e| invalid("JSON", e.to_string())),
            "toml" => toml::from_str(&content).map_err(|e| invalid("TOML", e.to_string())),
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|e| invalid("YAML", e.to_string()))
            }
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    /// Load every metadata file under `dir`, recursively.
    ///
    /// Files are visited in path order so the result is reproducible.
    /// A missing directory yields an empty list. Files that fail to parse are
    /// skipped with a warning; unreadable directories are errors.
    pub fn load_dir(&self, dir: &Path) -> Result<Vec<BlockTypeMetadata>> {
        let mut files = Vec::new();
        if dir.exists() {
            collect_files(dir, &mut files)?;
        }
        files.sort();

        let mut definitions = Vec::new();
        for path in files {
            match self.load_file(&path) {
                Ok(meta) => {
                    tracing::debug!(block_type = %meta.name, path = ?path, "loaded block metadata");
                    definitions.push(meta);
                }
                Err(e) => {
                    // Log warning but continue loading other files
                    tracing::warn!("Failed to load {:?}: {}", path, e);
                }
            }
        }

        Ok(definitions)
    }
}

impl Default for MetadataLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn is_metadata_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_lowercase().as_str(), "json" | "toml" | "yaml" | "yml"))
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else if is_metadata_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// Read a text file, refusing anything over `max` bytes.
pub(crate) fn read_limited(path: &Path, max: u64) -> Result<String> {
    let size = fs::metadata(path).map_err(|e| Error::io(path, e))?.len();
    if size > max {
        return Err(Error::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max,
        });
    }
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
