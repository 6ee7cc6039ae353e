//! Comment-delimited block serializer.
//!
//! Renders a block as
//!
//! ```text
//! <!-- wp:{name} {attrs} -->{inner}<!-- /wp:{name} -->
//! ```
//!
//! where `{attrs}` (and its trailing space) is left out for empty
//! attributes, a block with empty inner markup collapses to a single void
//! comment `<!-- wp:{name} {attrs} /-->`, and the `core/` namespace is
//! dropped from names. Freeform (nameless) blocks render their inner markup
//! with no delimiters.

use crate::attrs::{self, Attributes};
use crate::error::{Error, Result};
use crate::node::{BlockNode, RawPart};
use crate::registry::{DirectiveRegistry, HookPoint};

/// Nesting limit applied when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 512;

const CORE_NAMESPACE: &str = "core/";

/// Serializer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Deepest nesting accepted before failing with [`Error::TooDeep`]
    pub max_depth: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Block serializer, optionally splicing render-time directives.
#[derive(Debug, Clone, Default)]
pub struct Serializer<'r> {
    registry: Option<&'r DirectiveRegistry>,
    options: SerializeOptions,
}

impl<'r> Serializer<'r> {
    /// Serializer that emits the tree exactly as given.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializer that applies the registry's [`HookPoint::Render`]
    /// directives to every node on the way out.
    ///
    /// The input tree is never modified; a matching node's own layout is
    /// copied before splicing. Blocks inserted this way are emitted as-is,
    /// without running directives on them in turn.
    pub fn with_registry(registry: &'r DirectiveRegistry) -> Self {
        Self {
            registry: Some(registry),
            options: SerializeOptions::default(),
        }
    }

    /// Override the options (builder pattern).
    pub fn with_options(mut self, options: SerializeOptions) -> Self {
        self.options = options;
        self
    }

    /// Serialize one block and its descendants.
    pub fn serialize(&self, node: &BlockNode) -> Result<String> {
        let mut out = String::new();
        self.write_block(node, 0, true, &mut out)?;
        Ok(out)
    }

    /// Serialize a top-level block list, concatenated without separators.
    ///
    /// Top-level blocks are treated as children of a nameless document
    /// root, so `before`/`after` directives anchored on top-level blocks
    /// apply here too. The root itself does not count toward the depth
    /// limit.
    pub fn serialize_all(&self, nodes: &[BlockNode]) -> Result<String> {
        let mut out = String::new();
        self.write_children(&BlockNode::root_shell(nodes), nodes, 0, true, &mut out)?;
        Ok(out)
    }

    fn write_block(
        &self,
        node: &BlockNode,
        depth: usize,
        run_directives: bool,
        out: &mut String,
    ) -> Result<()> {
        if depth >= self.options.max_depth {
            return Err(Error::too_deep(node.name(), self.options.max_depth));
        }

        let mut inner = String::new();
        self.write_children(node, node.children(), depth + 1, run_directives, &mut inner)?;
        write_delimited(node.name(), node.attributes(), &inner, out)
    }

    /// Write the raw content of `node`, whose children are `originals` and
    /// sit at `depth`. `node` only provides the layout: its name, its parts
    /// and the names of its children.
    fn write_children(
        &self,
        node: &BlockNode,
        originals: &[BlockNode],
        depth: usize,
        run_directives: bool,
        out: &mut String,
    ) -> Result<()> {
        let spliced = self.splice_render_directives(node, run_directives);
        let (layout, inserted) = match &spliced {
            Some((shell, inserted)) => (shell, inserted.as_slice()),
            None => (node, &[][..]),
        };

        let mut originals = originals.iter();
        let mut cursor = 0;
        for part in layout.parts() {
            match part {
                RawPart::Text(text) => out.push_str(text),
                RawPart::Child => {
                    let fresh = inserted.get(cursor).copied().unwrap_or(false);
                    // Insertions never reorder existing children.
                    let child = if fresh {
                        layout.children().get(cursor)
                    } else {
                        originals.next()
                    };
                    if let Some(child) = child {
                        self.write_block(child, depth, run_directives && !fresh, out)?;
                    }
                    cursor += 1;
                }
            }
        }
        Ok(())
    }

    /// Splice render-point directives into a shell of `node`.
    ///
    /// Returns `None` when nothing matches. Only the shell is copied, never
    /// the subtrees below it.
    fn splice_render_directives(
        &self,
        node: &BlockNode,
        run_directives: bool,
    ) -> Option<(BlockNode, Vec<bool>)> {
        let registry = self.registry.filter(|_| run_directives)?;
        if !registry.touches(node, HookPoint::Render) {
            return None;
        }
        let mut shell = node.shell();
        let inserted = registry.apply(&mut shell, HookPoint::Render);
        Some((shell, inserted))
    }
}

/// Serialize one block with no directives and default options.
pub fn serialize(node: &BlockNode) -> Result<String> {
    Serializer::new().serialize(node)
}

/// Serialize a block list with no directives and default options.
pub fn serialize_all(nodes: &[BlockNode]) -> Result<String> {
    Serializer::new().serialize_all(nodes)
}

/// Name as written inside delimiters.
pub fn serialized_name(name: &str) -> &str {
    name.strip_prefix(CORE_NAMESPACE).unwrap_or(name)
}

fn write_delimited(
    name: Option<&str>,
    attributes: &Attributes,
    inner: &str,
    out: &mut String,
) -> Result<()> {
    let Some(name) = name else {
        out.push_str(inner);
        return Ok(());
    };
    let name = serialized_name(name);

    out.push_str("<!-- wp:");
    out.push_str(name);
    out.push(' ');
    if !attributes.is_empty() {
        out.push_str(&attrs::to_comment_json(attributes)?);
        out.push(' ');
    }

    if inner.is_empty() {
        out.push_str("/-->");
    } else {
        out.push_str("-->");
        out.push_str(inner);
        out.push_str("<!-- /wp:");
        out.push_str(name);
        out.push_str(" -->");
    }
    Ok(())
}
