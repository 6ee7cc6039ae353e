//! Check command implementation

use std::path::Path;

use blocks_core::{BlockNode, Serializer};
use blocks_meta::Config;
use colored::Colorize;

use super::read_document;
use crate::error::{CliError, Result};

/// Size summary of a block tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub blocks: usize,
    pub nodes: usize,
    pub depth: usize,
    pub freeform: usize,
}

impl TreeStats {
    pub fn collect(blocks: &[BlockNode]) -> Self {
        Self {
            blocks: blocks.len(),
            nodes: blocks.iter().map(BlockNode::node_count).sum(),
            depth: blocks.iter().map(BlockNode::depth).max().unwrap_or(0),
            freeform: blocks.iter().filter(|b| b.is_freeform()).count(),
        }
    }
}

/// Validate a block tree and print its size.
///
/// Marker/child parity is enforced while reading; the tree is also
/// serialized once so the depth limit is checked too.
pub fn run_check(config: &Config, input: &Path) -> Result<()> {
    let document = read_document(input)?;
    if !document.blocks.iter().all(BlockNode::is_consistent) {
        return Err(CliError::user("Block tree has mismatched child markers"));
    }

    let html = Serializer::new()
        .with_options(config.serialize_options())
        .serialize_all(&document.blocks)?;
    let stats = TreeStats::collect(&document.blocks);

    println!("{} {}", "OK".green().bold(), input.display());
    println!();
    println!("{}:   {}", "Blocks".dimmed(), stats.blocks);
    println!("{}:    {}", "Nodes".dimmed(), stats.nodes);
    println!("{}:    {}", "Depth".dimmed(), stats.depth);
    println!("{}: {}", "Freeform".dimmed(), stats.freeform);
    println!("{}:   {} bytes", "Markup".dimmed(), html.len());
    Ok(())
}
