//! [`MetadataDir`] builder for block type metadata fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// A temporary directory of block type metadata files.
///
/// # Example
///
/// ```rust,no_run
/// use blocks_test_utils::MetadataDir;
///
/// let dir = MetadataDir::new();
/// dir.block_json("like-button", "acme/like-button", &[("core/comment-template", "lastChild")]);
/// assert!(dir.path().join("like-button.json").exists());
/// ```
pub struct MetadataDir {
    temp_dir: TempDir,
}

impl Default for MetadataDir {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root of the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `{file}.json` declaring `name` with `anchor -> position` rules.
    pub fn block_json(&self, file: &str, name: &str, rules: &[(&str, &str)]) -> PathBuf {
        let auto_insert: serde_json::Map<String, Value> = rules
            .iter()
            .map(|(anchor, position)| (anchor.to_string(), json!({ "position": position })))
            .collect();
        self.raw(
            &format!("{file}.json"),
            &json!({ "name": name, "autoInsert": auto_insert }).to_string(),
        )
    }

    /// Write a file with arbitrary contents, creating parent directories.
    pub fn raw(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("MetadataDir::raw: failed to create {parent:?}: {e}"));
        }
        fs::write(&path, contents)
            .unwrap_or_else(|e| panic!("MetadataDir::raw: failed to write {path:?}: {e}"));
        path
    }
}
