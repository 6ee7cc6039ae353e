//! Pre-render tree rewriting.
//!
//! Applies [`HookPoint::Tree`] directives to a parsed tree in place. Each
//! node's children are rewritten before the node itself, so blocks inserted
//! at a node are never revisited in the same pass. The result is the same
//! tree the serializer would produce for the same directives at
//! [`HookPoint::Render`]: a node's directives only look at its own name and
//! the names of its direct children, and rewriting a child never renames it.

use tracing::debug;

use crate::error::{Error, Result};
use crate::node::BlockNode;
use crate::registry::{DirectiveRegistry, HookPoint};
use crate::serializer::DEFAULT_MAX_DEPTH;

/// Walks a tree once, splicing tree-point directives.
#[derive(Debug, Clone, Copy)]
pub struct Rewriter<'r> {
    registry: &'r DirectiveRegistry,
    max_depth: usize,
}

impl<'r> Rewriter<'r> {
    pub fn new(registry: &'r DirectiveRegistry) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the nesting limit (builder pattern).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Rewrite one subtree. Returns the number of blocks inserted.
    pub fn rewrite(&self, node: &mut BlockNode) -> Result<usize> {
        let inserted = self.rewrite_node(node, 0)?;
        debug!(inserted, "rewrote block tree");
        Ok(inserted)
    }

    /// Rewrite a document root built with [`BlockNode::root`].
    ///
    /// The root's children sit at depth 0; the root itself does not count
    /// toward the depth limit. Returns the number of blocks inserted.
    pub fn rewrite_document(&self, root: &mut BlockNode) -> Result<usize> {
        let inserted = self.rewrite_children(root, 0)?;
        debug!(inserted, "rewrote document");
        Ok(inserted)
    }

    /// Rewrite a top-level block list.
    ///
    /// The list is treated as the children of a nameless document root, so
    /// `before`/`after` directives anchored on top-level blocks apply.
    pub fn rewrite_all(&self, nodes: Vec<BlockNode>) -> Result<Vec<BlockNode>> {
        let mut root = BlockNode::root(nodes);
        self.rewrite_document(&mut root)?;
        Ok(root.into_children())
    }

    fn rewrite_node(&self, node: &mut BlockNode, depth: usize) -> Result<usize> {
        if depth >= self.max_depth {
            return Err(Error::too_deep(node.name(), self.max_depth));
        }
        self.rewrite_children(node, depth + 1)
    }

    /// Rewrite the children of `node`, which sit at `depth`, then `node`.
    fn rewrite_children(&self, node: &mut BlockNode, depth: usize) -> Result<usize> {
        let mut inserted = 0;
        for child in node.children_mut() {
            inserted += self.rewrite_node(child, depth)?;
        }

        let fresh = self.registry.apply(node, HookPoint::Tree);
        Ok(inserted + fresh.into_iter().filter(|&f| f).count())
    }
}

/// Rewrite a top-level block list with default limits.
pub fn rewrite_all(nodes: Vec<BlockNode>, registry: &DirectiveRegistry) -> Result<Vec<BlockNode>> {
    Rewriter::new(registry).rewrite_all(nodes)
}
