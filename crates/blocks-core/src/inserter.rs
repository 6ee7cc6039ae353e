//! Structural insertion of one block relative to an anchor.

use tracing::trace;

use crate::node::BlockNode;
use crate::position::Position;

/// One auto-insertion rule: put `block` at `position` relative to every
/// block named `anchor`.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    anchor: String,
    position: Position,
    block: BlockNode,
}

impl Directive {
    pub fn new(anchor: impl Into<String>, position: Position, block: BlockNode) -> Self {
        Self {
            anchor: anchor.into(),
            position,
            block,
        }
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// The block inserted on every match.
    pub fn block(&self) -> &BlockNode {
        &self.block
    }

    /// Whether applying this directive to `node` would insert anything.
    ///
    /// Child positions match the anchor itself; sibling positions match the
    /// parent of a direct child named like the anchor.
    pub fn matches(&self, node: &BlockNode) -> bool {
        if self.position.is_child() {
            node.name() == Some(self.anchor.as_str())
        } else {
            node.child_position(&self.anchor).is_some()
        }
    }

    /// Apply the directive to `node` only, without descending.
    ///
    /// Returns the child index the inserted block landed at, or `None` when
    /// the anchor was not found.
    pub fn apply(&self, node: &mut BlockNode) -> Option<usize> {
        let index = match self.position {
            Position::FirstChild | Position::LastChild => {
                if node.name() != Some(self.anchor.as_str()) {
                    return None;
                }
                if self.position == Position::FirstChild {
                    node.prepend_child(self.block.clone());
                    0
                } else {
                    node.append_child(self.block.clone());
                    node.children().len() - 1
                }
            }
            Position::Before | Position::After => {
                let Some(k) = node.child_position(&self.anchor) else {
                    trace!(anchor = %self.anchor, "anchor not among children, skipping");
                    return None;
                };
                let index = if self.position == Position::Before {
                    k
                } else {
                    k + 1
                };
                node.insert_child(index, self.block.clone());
                index
            }
        };

        trace!(
            anchor = %self.anchor,
            position = %self.position,
            inserted = ?self.block.name(),
            index,
            "inserted block"
        );
        Some(index)
    }
}

/// Build a function that applies a single insertion rule to one node.
///
/// The returned closure does not walk the tree. Callers invoke it once per
/// node; invoking it twice on the same node inserts twice.
///
/// # Example
/// ```
/// use blocks_core::{BlockNode, Position, make_inserter, serialize};
///
/// let like = make_inserter("core/comment-template", Position::LastChild, BlockNode::new("my/like"));
/// let template = like(BlockNode::new("core/comment-template"));
/// assert_eq!(
///     serialize(&template).unwrap(),
///     "<!-- wp:comment-template --><!-- wp:my/like /--><!-- /wp:comment-template -->"
/// );
/// ```
pub fn make_inserter(
    anchor: impl Into<String>,
    position: Position,
    block: BlockNode,
) -> impl Fn(BlockNode) -> BlockNode {
    let directive = Directive::new(anchor, position, block);
    move |mut node| {
        directive.apply(&mut node);
        node
    }
}
