//! Block node model.
//!
//! A node keeps two parallel sequences: its `children`, and its raw content
//! parts, which interleave literal markup with [`RawPart::Child`] markers.
//! The number of markers always equals the number of children, and the n-th
//! marker stands for the n-th child. Every mutation that adds or removes a
//! child goes through [`BlockNode::splice`] (or its inverse), which updates
//! both sequences together.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::attrs::{self, Attributes};
use crate::error::{Error, Result, display_name};

/// One entry of a node's raw content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPart {
    /// Literal markup emitted verbatim.
    Text(String),
    /// Placeholder for the next unconsumed child.
    Child,
}

impl RawPart {
    /// Whether this part is a child marker.
    pub fn is_marker(&self) -> bool {
        matches!(self, RawPart::Child)
    }
}

/// A block in the tree.
///
/// Fields are private so the marker/child parity cannot be broken from the
/// outside. Use the builder methods or [`BlockNode::from_parts`] to construct
/// nodes, and [`insert_child`](BlockNode::insert_child),
/// [`prepend_child`](BlockNode::prepend_child),
/// [`append_child`](BlockNode::append_child) or
/// [`remove_child`](BlockNode::remove_child) to change them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "WireBlock")]
pub struct BlockNode {
    name: Option<String>,
    attributes: Attributes,
    children: Vec<BlockNode>,
    parts: Vec<RawPart>,
}

impl BlockNode {
    /// Create an empty named block.
    ///
    /// An empty name is treated as no name, making the node freeform.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: normalize_name(Some(name.into())),
            attributes: Attributes::new(),
            children: Vec::new(),
            parts: Vec::new(),
        }
    }

    /// Create a nameless node holding a single run of markup.
    pub fn freeform(text: impl Into<String>) -> Self {
        Self {
            name: None,
            attributes: Attributes::new(),
            children: Vec::new(),
            parts: vec![RawPart::Text(text.into())],
        }
    }

    /// Create a nameless container whose raw content is one marker per child.
    ///
    /// Used to treat a top-level block list as the children of an implicit
    /// document root.
    pub fn root(children: Vec<BlockNode>) -> Self {
        let parts = vec![RawPart::Child; children.len()];
        Self {
            name: None,
            attributes: Attributes::new(),
            children,
            parts,
        }
    }

    /// Root over name-only stand-ins for `children`.
    pub(crate) fn root_shell(children: &[BlockNode]) -> Self {
        Self::root(children.iter().map(BlockNode::stand_in).collect())
    }

    /// Copy of this node's layout: name, raw parts and one name-only
    /// stand-in per child. Attributes and grandchildren are left behind.
    pub(crate) fn shell(&self) -> Self {
        Self {
            name: self.name.clone(),
            attributes: Attributes::new(),
            children: self.children.iter().map(BlockNode::stand_in).collect(),
            parts: self.parts.clone(),
        }
    }

    fn stand_in(&self) -> Self {
        Self {
            name: self.name.clone(),
            attributes: Attributes::new(),
            children: Vec::new(),
            parts: Vec::new(),
        }
    }

    /// Build a node from raw sequences, validating marker/child parity.
    pub fn from_parts(
        name: Option<String>,
        attributes: Attributes,
        children: Vec<BlockNode>,
        parts: Vec<RawPart>,
    ) -> Result<Self> {
        let name = normalize_name(name);
        let markers = parts.iter().filter(|p| p.is_marker()).count();
        if markers != children.len() {
            return Err(Error::MarkerMismatch {
                name: display_name(name.as_deref()).to_string(),
                markers,
                children: children.len(),
            });
        }

        Ok(Self {
            name,
            attributes,
            children,
            parts,
        })
    }

    /// Replace all attributes (builder pattern).
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set one attribute (builder pattern).
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Append literal markup (builder pattern).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    /// Append a child and its marker (builder pattern).
    pub fn with_child(mut self, child: BlockNode) -> Self {
        self.append_child(child);
        self
    }

    /// The block name, `None` for freeform content.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether this node has no name and serializes without delimiters.
    pub fn is_freeform(&self) -> bool {
        self.name.is_none()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn children(&self) -> &[BlockNode] {
        &self.children
    }

    /// Mutable access to the children.
    ///
    /// A slice cannot grow or shrink, so parity is preserved.
    pub fn children_mut(&mut self) -> &mut [BlockNode] {
        &mut self.children
    }

    pub fn parts(&self) -> &[RawPart] {
        &self.parts
    }

    /// Consume the node, returning its children.
    pub fn into_children(self) -> Vec<BlockNode> {
        self.children
    }

    /// Concatenated literal markup, with child markers skipped.
    pub fn inner_html(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                RawPart::Text(text) => Some(text.as_str()),
                RawPart::Child => None,
            })
            .collect()
    }

    /// Number of child markers in the raw content.
    pub fn marker_count(&self) -> usize {
        self.parts.iter().filter(|p| p.is_marker()).count()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(BlockNode::node_count).sum::<usize>()
    }

    /// Height of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(BlockNode::depth).max().unwrap_or(0)
    }

    /// Whether every node in this subtree has as many markers as children.
    pub fn is_consistent(&self) -> bool {
        self.marker_count() == self.children.len()
            && self.children.iter().all(BlockNode::is_consistent)
    }

    /// Index of the first direct child named `name`.
    pub fn child_position(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|c| c.name() == Some(name))
    }

    /// Offset in the raw content of the marker with the given ordinal, or the
    /// end of the raw content when `ordinal` is past the last marker.
    pub fn marker_offset(&self, ordinal: usize) -> usize {
        self.parts
            .iter()
            .enumerate()
            .filter(|(_, part)| part.is_marker())
            .nth(ordinal)
            .map(|(offset, _)| offset)
            .unwrap_or(self.parts.len())
    }

    /// Append literal markup to the raw content.
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.parts.push(RawPart::Text(text.into()));
    }

    /// Insert `child` at child index `index`.
    ///
    /// The marker lands where the marker of the child currently at `index`
    /// sits, so the new child renders exactly where that child used to start.
    /// Inserting at `children().len()` puts the marker at the very end of the
    /// raw content.
    ///
    /// # Panics
    /// Panics if `index > children().len()`.
    pub fn insert_child(&mut self, index: usize, child: BlockNode) {
        assert!(
            index <= self.children.len(),
            "child index {index} out of range for {} children",
            self.children.len()
        );
        let offset = self.marker_offset(index);
        self.splice(index, offset, child);
    }

    /// Insert `child` as the first child, with its marker at the very start
    /// of the raw content (ahead of any leading markup).
    pub fn prepend_child(&mut self, child: BlockNode) {
        self.splice(0, 0, child);
    }

    /// Insert `child` as the last child, with its marker at the very end of
    /// the raw content (after any trailing markup).
    pub fn append_child(&mut self, child: BlockNode) {
        let (index, offset) = (self.children.len(), self.parts.len());
        self.splice(index, offset, child);
    }

    /// Remove the child at `index` together with its marker.
    ///
    /// Returns `None` when there is no such child.
    pub fn remove_child(&mut self, index: usize) -> Option<BlockNode> {
        if index >= self.children.len() {
            return None;
        }
        let offset = self.marker_offset(index);
        self.parts.remove(offset);
        Some(self.children.remove(index))
    }

    /// The only place children and markers grow. Callers pick an `offset`
    /// whose marker ordinal equals `index`.
    fn splice(&mut self, index: usize, offset: usize, child: BlockNode) {
        debug_assert!(offset <= self.parts.len());
        debug_assert_eq!(
            self.parts[..offset].iter().filter(|p| p.is_marker()).count(),
            index
        );
        self.children.insert(index, child);
        self.parts.insert(offset, RawPart::Child);
    }
}

fn normalize_name(name: Option<String>) -> Option<String> {
    name.filter(|n| !n.is_empty())
}

/// Parser output shape: `blockName`, `attrs`, `innerBlocks`, `innerContent`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBlock {
    #[serde(default)]
    block_name: Option<String>,
    #[serde(default, deserialize_with = "attrs::deserialize_lenient")]
    attrs: Attributes,
    #[serde(default)]
    inner_blocks: Vec<BlockNode>,
    #[serde(default)]
    inner_content: Vec<Option<String>>,
}

impl TryFrom<WireBlock> for BlockNode {
    type Error = Error;

    fn try_from(wire: WireBlock) -> Result<Self> {
        let parts = wire
            .inner_content
            .into_iter()
            .map(|chunk| chunk.map_or(RawPart::Child, RawPart::Text))
            .collect();
        BlockNode::from_parts(wire.block_name, wire.attrs, wire.inner_blocks, parts)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireBlockRef<'a> {
    block_name: Option<&'a str>,
    attrs: &'a Attributes,
    inner_blocks: &'a [BlockNode],
    #[serde(rename = "innerHTML")]
    inner_html: String,
    inner_content: Vec<Option<&'a str>>,
}

impl Serialize for BlockNode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        WireBlockRef {
            block_name: self.name(),
            attrs: &self.attributes,
            inner_blocks: &self.children,
            inner_html: self.inner_html(),
            inner_content: self
                .parts
                .iter()
                .map(|part| match part {
                    RawPart::Text(text) => Some(text.as_str()),
                    RawPart::Child => None,
                })
                .collect(),
        }
        .serialize(serializer)
    }
}
