//! Block type metadata and configuration for block auto-insertion.
//!
//! This crate loads per-block-type metadata (the `autoInsert` declarations
//! of `block.json`-style files), turns it into a
//! [`DirectiveRegistry`](blocks_core::DirectiveRegistry), and reads the
//! workspace `blocks.toml` configuration.

pub mod config;
pub mod error;
pub mod loader;
pub mod metadata;
pub mod registry;

pub use config::{AutoInsertConfig, CONFIG_FILE, Config, RenderConfig};
pub use error::{Error, Result};
pub use loader::{MAX_FILE_SIZE, MetadataLoader};
pub use metadata::{AutoInsertRule, BlockTypeMetadata};
pub use registry::{build_registry, load_registry};
