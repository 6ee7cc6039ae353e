//! Error types for blocks-core

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid auto-insert position \"{value}\" declared by block type {block_type}")]
    InvalidPosition { value: String, block_type: String },

    #[error("Block type {block_type} declares an auto-insert rule with an empty anchor")]
    EmptyAnchor { block_type: String },

    #[error("Block type {block_type} is already auto-inserted {position} {anchor}")]
    DuplicateDirective {
        block_type: String,
        anchor: String,
        position: String,
    },

    #[error("Block tree too deep at {name}: exceeds {max_depth} levels (possible cycle)")]
    TooDeep { name: String, max_depth: usize },

    #[error("Block {name} has {markers} child markers in its raw content but {children} children")]
    MarkerMismatch {
        name: String,
        markers: usize,
        children: usize,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn too_deep(name: Option<&str>, max_depth: usize) -> Self {
        Self::TooDeep {
            name: display_name(name).to_string(),
            max_depth,
        }
    }
}

/// Name used in diagnostics for a possibly nameless block.
pub(crate) fn display_name(name: Option<&str>) -> &str {
    name.unwrap_or("<freeform>")
}
