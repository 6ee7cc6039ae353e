//! Render and rewrite command implementations

use std::path::Path;

use blocks_core::{BlockNode, DirectiveRegistry, HookPoint, Rewriter, Serializer};
use blocks_meta::Config;

use super::{load_directives, read_document};
use crate::error::Result;

/// Apply directives at the chosen hook point and print the markup.
pub fn run_render(
    config: &Config,
    input: &Path,
    metadata: Option<&Path>,
    hook_point: Option<HookPoint>,
) -> Result<()> {
    let document = read_document(input)?;
    let point = hook_point.unwrap_or(config.auto_insert.hook_point);
    let registry = load_directives(config, metadata, point)?;
    tracing::debug!(%point, directives = registry.len(), "rendering");

    let html = render(config, &registry, point, document.blocks)?;
    println!("{html}");
    Ok(())
}

/// Serialize `blocks`, applying `registry` at `point`.
pub fn render(
    config: &Config,
    registry: &DirectiveRegistry,
    point: HookPoint,
    blocks: Vec<BlockNode>,
) -> Result<String> {
    let options = config.serialize_options();
    let html = match point {
        HookPoint::Tree => {
            let rewritten = Rewriter::new(registry)
                .with_max_depth(options.max_depth)
                .rewrite_all(blocks)?;
            Serializer::new()
                .with_options(options)
                .serialize_all(&rewritten)?
        }
        HookPoint::Render => Serializer::with_registry(registry)
            .with_options(options)
            .serialize_all(&blocks)?,
    };
    Ok(html)
}

/// Apply tree-point directives and print the rewritten tree as JSON.
///
/// A single-block input stays a single object unless a top-level insertion
/// turned it into a list.
pub fn run_rewrite(config: &Config, input: &Path, metadata: Option<&Path>) -> Result<()> {
    let document = read_document(input)?;
    let registry = load_directives(config, metadata, HookPoint::Tree)?;

    let mut root = BlockNode::root(document.blocks);
    let inserted = Rewriter::new(&registry)
        .with_max_depth(config.render.max_depth)
        .rewrite_document(&mut root)?;
    tracing::info!(inserted, "rewrote block tree");

    let mut blocks = root.into_children();
    let json = if document.single && blocks.len() == 1 {
        let block = blocks.remove(0);
        serde_json::to_string_pretty(&block)?
    } else {
        serde_json::to_string_pretty(&blocks)?
    };
    println!("{json}");
    Ok(())
}
