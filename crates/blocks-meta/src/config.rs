//! Configuration types and loading for `blocks.toml`
//!
//! ```toml
//! [render]
//! max_depth = 512
//!
//! [auto_insert]
//! hook_point = "render"
//! metadata_dir = "blocks"
//! ```
//!
//! Every key is optional; a missing file is the default configuration.

use std::path::{Path, PathBuf};

use blocks_core::{DEFAULT_MAX_DEPTH, HookPoint, SerializeOptions};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::loader::{MAX_FILE_SIZE, read_limited};

/// Conventional configuration file name.
pub const CONFIG_FILE: &str = "blocks.toml";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub auto_insert: AutoInsertConfig,
}

/// Serializer limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Deepest nesting the serializer and rewriter will descend into
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

/// Where auto-insert directives come from and when they run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AutoInsertConfig {
    /// Stage at which metadata-declared directives are applied
    #[serde(default)]
    pub hook_point: HookPoint,
    /// Directory of block type metadata, relative to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `path`.
    ///
    /// A missing file yields [`Config::default`]. A relative
    /// `metadata_dir` is resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = ?path, "no configuration file, using defaults");
            return Ok(Self::default());
        }

        let content = read_limited(path, MAX_FILE_SIZE)?;
        let mut config: Config = toml::from_str(&content).map_err(|e| Error::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if config.render.max_depth == 0 {
            return Err(Error::InvalidConfig {
                path: path.to_path_buf(),
                message: "render.max_depth must be at least 1".into(),
            });
        }

        if let (Some(dir), Some(base)) = (&config.auto_insert.metadata_dir, path.parent())
            && dir.is_relative()
        {
            config.auto_insert.metadata_dir = Some(base.join(dir));
        }

        Ok(config)
    }

    /// Serializer options derived from `[render]`.
    pub fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions {
            max_depth: self.render.max_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.render.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.auto_insert.hook_point, HookPoint::Tree);
        assert!(config.auto_insert.metadata_dir.is_none());
    }

    #[test]
    fn test_partial_table_uses_defaults() {
        let config: Config = toml::from_str("[auto_insert]\nhook_point = \"render\"\n").unwrap();
        assert_eq!(config.auto_insert.hook_point, HookPoint::Render);
        assert_eq!(config.render.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_relative_metadata_dir_resolved() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "[auto_insert]\nmetadata_dir = \"blocks\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.auto_insert.metadata_dir,
            Some(temp.path().join("blocks"))
        );
    }

    #[test]
    fn test_zero_depth_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "[render]\nmax_depth = 0\n").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(Error::InvalidConfig { .. })
        ));
    }
}
