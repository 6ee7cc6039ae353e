//! Block type metadata schema - loaded from `block.json`, TOML or YAML files
//!
//! Only the keys that drive auto-insertion are modelled; anything else in a
//! `block.json` is ignored.
//!
//! # Example JSON
//!
//! ```json
//! {
//!   "name": "acme/like-button",
//!   "title": "Like Button",
//!   "autoInsert": {
//!     "core/comment-template": "lastChild",
//!     "core/post-content": { "position": "after", "attrs": { "size": "small" } }
//!   }
//! }
//! ```
//!
//! # Example TOML
//!
//! ```toml
//! name = "acme/like-button"
//!
//! [autoInsert]
//! "core/comment-template" = "lastChild"
//!
//! [autoInsert."core/post-content"]
//! position = "after"
//! attrs = { size = "small" }
//! ```

use std::collections::BTreeMap;

use blocks_core::Attributes;
use serde::{Deserialize, Serialize};

/// Metadata for one block type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTypeMetadata {
    /// Namespaced block name (e.g., "acme/like-button")
    pub name: String,
    /// Human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Anchor block name -> where to insert this block relative to it.
    /// Kept sorted by anchor so registration order is reproducible.
    #[serde(default, alias = "blockHooks")]
    pub auto_insert: BTreeMap<String, AutoInsertRule>,
}

impl BlockTypeMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            auto_insert: BTreeMap::new(),
        }
    }

    /// Add an auto-insert rule (builder pattern).
    pub fn with_rule(mut self, anchor: impl Into<String>, position: impl Into<String>) -> Self {
        self.auto_insert.insert(
            anchor.into(),
            AutoInsertRule {
                position: position.into(),
                attrs: Attributes::new(),
            },
        );
        self
    }

    /// Declarations as `(anchor, position, attributes)`, the shape
    /// [`RegistryBuilder::register_auto_insert`](blocks_core::RegistryBuilder::register_auto_insert)
    /// expects.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &str, &Attributes)> {
        self.auto_insert
            .iter()
            .map(|(anchor, rule)| (anchor.as_str(), rule.position.as_str(), &rule.attrs))
    }
}

/// Where and with which attributes to insert a block.
///
/// Accepts either a bare position string or a `{ position, attrs }` table.
/// The position is kept as written and validated when the registry is
/// built, so the error can name the offending block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RuleRepr")]
pub struct AutoInsertRule {
    /// `before`, `after`, `firstChild` or `lastChild`
    pub position: String,
    /// Attributes of the inserted block
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attrs: Attributes,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RuleRepr {
    Position(String),
    Detailed {
        position: String,
        #[serde(default, deserialize_with = "blocks_core::attrs::deserialize_lenient")]
        attrs: Attributes,
    },
}

impl From<RuleRepr> for AutoInsertRule {
    fn from(repr: RuleRepr) -> Self {
        match repr {
            RuleRepr::Position(position) => Self {
                position,
                attrs: Attributes::new(),
            },
            RuleRepr::Detailed { position, attrs } => Self { position, attrs },
        }
    }
}
