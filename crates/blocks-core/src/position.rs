//! Relative insertion positions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where an auto-inserted block goes relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Position {
    /// Sibling immediately before the anchor
    Before,
    /// Sibling immediately after the anchor
    After,
    /// First child of the anchor
    FirstChild,
    /// Last child of the anchor
    LastChild,
}

impl Position {
    /// Parse a position from block metadata.
    ///
    /// Accepts the camelCase metadata spelling (`firstChild`) as well as the
    /// snake_case spelling used in diagnostics (`first_child`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "before" => Some(Self::Before),
            "after" => Some(Self::After),
            "firstChild" | "first_child" => Some(Self::FirstChild),
            "lastChild" | "last_child" => Some(Self::LastChild),
            _ => None,
        }
    }

    /// Whether the inserted block becomes a child of the anchor, as opposed
    /// to a sibling.
    pub fn is_child(self) -> bool {
        matches!(self, Self::FirstChild | Self::LastChild)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
            Self::FirstChild => write!(f, "first_child"),
            Self::LastChild => write!(f, "last_child"),
        }
    }
}
