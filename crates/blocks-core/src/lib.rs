//! Block tree serialization and auto-insertion.
//!
//! A parsed document is a tree of [`BlockNode`]s. Each node interleaves
//! literal markup with child markers; this crate turns such a tree back into
//! comment-delimited markup and splices extra blocks into it.
//!
//! ```text
//! <!-- wp:group {"align":"wide"} -->
//! <div><!-- wp:paragraph --><p>Hi</p><!-- /wp:paragraph --></div>
//! <!-- /wp:group -->
//! ```
//!
//! # Auto-insertion
//!
//! A [`Directive`] inserts a block before, after, or as the first or last
//! child of every block with a given name. Directives are collected once in
//! a [`DirectiveRegistry`] and applied at one of two [`HookPoint`]s:
//!
//! - [`HookPoint::Tree`]: the [`Rewriter`] changes the parsed tree, so the
//!   insertion is visible to anything that reads the tree afterwards.
//! - [`HookPoint::Render`]: the [`Serializer`] splices while writing, leaving
//!   the tree untouched.
//!
//! Both produce identical markup for the same directives.
//!
//! ```
//! use blocks_core::{Attributes, BlockNode, DirectiveRegistry, HookPoint, Serializer};
//!
//! let attrs = Attributes::new();
//! let mut builder = DirectiveRegistry::builder();
//! builder
//!     .register_auto_insert("acme/like", [("core/post-content", "after", &attrs)], HookPoint::Render)
//!     .unwrap();
//! let registry = builder.build();
//!
//! let page = vec![BlockNode::new("core/post-content")];
//! let html = Serializer::with_registry(&registry).serialize_all(&page).unwrap();
//! assert_eq!(html, "<!-- wp:post-content /--><!-- wp:acme/like /-->");
//! ```

pub mod attrs;
pub mod error;
pub mod inserter;
pub mod node;
pub mod position;
pub mod registry;
pub mod rewrite;
pub mod serializer;

pub use attrs::Attributes;
pub use error::{Error, Result};
pub use inserter::{Directive, make_inserter};
pub use node::{BlockNode, RawPart};
pub use position::Position;
pub use registry::{DirectiveRegistry, HookPoint, Registration, RegistryBuilder};
pub use rewrite::{Rewriter, rewrite_all};
pub use serializer::{
    DEFAULT_MAX_DEPTH, SerializeOptions, Serializer, serialize, serialize_all, serialized_name,
};
