//! Command implementations for blocks-cli

pub mod check;
pub mod render;
pub mod serialize;

pub use check::run_check;
pub use render::{run_render, run_rewrite};
pub use serialize::run_serialize;

use std::io::Read;
use std::path::Path;

use blocks_core::{BlockNode, DirectiveRegistry, HookPoint};
use blocks_meta::{Config, load_registry};

use crate::error::{CliError, Result};

/// A block tree read from disk.
#[derive(Debug)]
pub struct Document {
    /// Top-level blocks
    pub blocks: Vec<BlockNode>,
    /// Whether the input was a single block object rather than an array
    pub single: bool,
}

/// Read a JSON block tree from `path`, or standard input for `-`.
pub fn read_document(path: &Path) -> Result<Document> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|source| CliError::Input {
                path: path.to_path_buf(),
                source,
            })?;
        buffer
    } else {
        std::fs::read_to_string(path).map_err(|source| CliError::Input {
            path: path.to_path_buf(),
            source,
        })?
    };
    parse_document(&content)
        .map_err(|e| CliError::user(format!("Invalid block tree in {}: {e}", path.display())))
}

fn parse_document(content: &str) -> std::result::Result<Document, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if value.is_array() {
        Ok(Document {
            blocks: serde_json::from_value(value)?,
            single: false,
        })
    } else {
        Ok(Document {
            blocks: vec![serde_json::from_value(value)?],
            single: true,
        })
    }
}

/// Build the directive registry for `point`.
///
/// An explicit `--metadata` directory must exist; a directory named only in
/// the config file is allowed to be missing.
pub fn load_directives(
    config: &Config,
    metadata: Option<&Path>,
    point: HookPoint,
) -> Result<DirectiveRegistry> {
    if let Some(dir) = metadata {
        if !dir.is_dir() {
            return Err(CliError::user(format!(
                "Metadata directory not found: {}",
                dir.display()
            )));
        }
        return Ok(load_registry(dir, point)?);
    }

    match &config.auto_insert.metadata_dir {
        Some(dir) => {
            if !dir.is_dir() {
                tracing::warn!(path = ?dir, "configured metadata directory does not exist");
            }
            Ok(load_registry(dir, point)?)
        }
        None => {
            tracing::debug!("no metadata directory configured, no directives loaded");
            Ok(DirectiveRegistry::new())
        }
    }
}
