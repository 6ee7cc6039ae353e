//! Directive registry.
//!
//! Directives are registered once, at startup, from block type metadata and
//! are read-only afterwards. Each directive is attached to exactly one
//! [`HookPoint`], so it is either applied while rewriting the parsed tree or
//! while serializing it, never both.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attrs::Attributes;
use crate::error::{Error, Result};
use crate::inserter::Directive;
use crate::node::BlockNode;
use crate::position::Position;

/// Stage at which a directive is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookPoint {
    /// Rewrite the parsed tree before rendering. Affects editor state and
    /// any listing built from the tree.
    #[default]
    Tree,
    /// Splice while serializing. Affects rendered output only.
    Render,
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree => write!(f, "tree"),
            Self::Render => write!(f, "render"),
        }
    }
}

impl FromStr for HookPoint {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tree" => Ok(Self::Tree),
            "render" => Ok(Self::Render),
            _ => Err(format!("unknown hook point '{s}' (expected tree or render)")),
        }
    }
}

/// A directive together with the block type that declared it.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Block type that asked to be inserted
    pub block_type: String,
    /// The rule itself
    pub directive: Directive,
    /// Where the rule is applied
    pub point: HookPoint,
}

/// Immutable, ordered set of directives.
///
/// Built with [`RegistryBuilder`] and shared by reference with the
/// serializer and the tree rewriter.
#[derive(Debug, Clone, Default)]
pub struct DirectiveRegistry {
    entries: Vec<Registration>,
    by_anchor: HashMap<String, Vec<usize>>,
}

impl DirectiveRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Number of registered directives.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over registrations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.iter()
    }

    /// Registrations whose anchor is `anchor`, in registration order.
    pub fn for_anchor<'a>(&'a self, anchor: &str) -> impl Iterator<Item = &'a Registration> + 'a {
        self.by_anchor
            .get(anchor)
            .into_iter()
            .flatten()
            .map(|&i| &self.entries[i])
    }

    /// Whether any directive at `point` matches `node`.
    ///
    /// Only directives anchored on the node's own name or on one of its
    /// direct children's names are considered.
    pub fn touches(&self, node: &BlockNode, point: HookPoint) -> bool {
        node.name()
            .into_iter()
            .chain(node.children().iter().filter_map(BlockNode::name))
            .flat_map(|name| self.for_anchor(name))
            .any(|r| r.point == point && r.directive.matches(node))
    }

    /// Apply every directive registered at `point` to `node`, in
    /// registration order, without descending.
    ///
    /// Returns one flag per resulting child, `true` for children inserted by
    /// this call. Callers use the flags to avoid visiting inserted blocks in
    /// the same pass.
    pub fn apply(&self, node: &mut BlockNode, point: HookPoint) -> Vec<bool> {
        let mut inserted = vec![false; node.children().len()];
        if !self.touches(node, point) {
            return inserted;
        }

        for registration in self.entries.iter().filter(|r| r.point == point) {
            if let Some(index) = registration.directive.apply(node) {
                inserted.insert(index, true);
            }
        }
        inserted
    }
}

/// Collects directives before freezing them into a [`DirectiveRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<Registration>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an already-built directive for `block_type`.
    pub fn register(
        &mut self,
        block_type: impl Into<String>,
        directive: Directive,
        point: HookPoint,
    ) -> Result<&mut Self> {
        let block_type = block_type.into();
        if directive.anchor().is_empty() {
            return Err(Error::EmptyAnchor { block_type });
        }

        let duplicate = self.entries.iter().any(|r| {
            r.block_type == block_type
                && r.directive.anchor() == directive.anchor()
                && r.directive.position() == directive.position()
        });
        if duplicate {
            return Err(Error::DuplicateDirective {
                block_type,
                anchor: directive.anchor().to_string(),
                position: directive.position().to_string(),
            });
        }

        debug!(
            block_type = %block_type,
            anchor = %directive.anchor(),
            position = %directive.position(),
            point = %point,
            "registered auto-insert directive"
        );
        self.entries.push(Registration {
            block_type,
            directive,
            point,
        });
        Ok(self)
    }

    /// Register the auto-insert declarations of one block type.
    ///
    /// Each declaration is `(anchor, position, attributes)`, with `position`
    /// spelled as in block metadata (`before`, `after`, `firstChild`,
    /// `lastChild`). The inserted block is an empty `block_type` block
    /// carrying `attributes`.
    ///
    /// Declarations are validated before any is registered, so an invalid
    /// position leaves the builder untouched.
    pub fn register_auto_insert<'a, I>(
        &mut self,
        block_type: &str,
        declarations: I,
        point: HookPoint,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a Attributes)>,
    {
        let mut directives = Vec::new();
        for (anchor, position, attributes) in declarations {
            let position = Position::parse(position).ok_or_else(|| Error::InvalidPosition {
                value: position.to_string(),
                block_type: block_type.to_string(),
            })?;
            let block = BlockNode::new(block_type).with_attributes(attributes.clone());
            directives.push(Directive::new(anchor, position, block));
        }

        for directive in directives {
            self.register(block_type, directive, point)?;
        }
        Ok(self)
    }

    /// Freeze the collected directives.
    pub fn build(self) -> DirectiveRegistry {
        let mut by_anchor: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, registration) in self.entries.iter().enumerate() {
            by_anchor
                .entry(registration.directive.anchor().to_string())
                .or_default()
                .push(i);
        }
        debug!(directives = self.entries.len(), "built directive registry");

        DirectiveRegistry {
            entries: self.entries,
            by_anchor,
        }
    }
}
