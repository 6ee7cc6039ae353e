//! Directive registry construction from block type metadata
//!
//! Each `autoInsert` entry becomes one [`Directive`](blocks_core::Directive)
//! that inserts an attribute-carrying, childless instance of the declaring
//! block type.

use std::path::Path;

use blocks_core::{DirectiveRegistry, HookPoint};

use crate::Result;
use crate::loader::MetadataLoader;
use crate::metadata::BlockTypeMetadata;

/// Build a registry from loaded metadata, attaching every directive to `point`.
///
/// Block types register in the order given. Any invalid declaration fails
/// the whole build.
///
/// # Example
///
/// ```
/// use blocks_core::HookPoint;
/// use blocks_meta::{BlockTypeMetadata, build_registry};
///
/// let types = vec![BlockTypeMetadata::new("acme/like").with_rule("core/post-content", "after")];
/// let registry = build_registry(&types, HookPoint::Tree).unwrap();
/// assert_eq!(registry.len(), 1);
/// ```
pub fn build_registry(types: &[BlockTypeMetadata], point: HookPoint) -> Result<DirectiveRegistry> {
    let mut builder = DirectiveRegistry::builder();
    for block_type in types {
        builder.register_auto_insert(&block_type.name, block_type.rules(), point)?;
    }
    let registry = builder.build();
    tracing::debug!(
        block_types = types.len(),
        directives = registry.len(),
        %point,
        "built directive registry"
    );
    Ok(registry)
}

/// Load every metadata file under `dir` and build a registry from it.
pub fn load_registry(dir: &Path, point: HookPoint) -> Result<DirectiveRegistry> {
    let types = MetadataLoader::new().load_dir(dir)?;
    build_registry(&types, point)
}
