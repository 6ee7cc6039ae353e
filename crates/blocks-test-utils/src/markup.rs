//! Minimal block delimiter parser for round-trip tests.
//!
//! Understands exactly what the serializer writes:
//! ```text
//! <!-- wp:NAME {ATTRS} -->inner<!-- /wp:NAME -->
//! <!-- wp:NAME {ATTRS} /-->
//! ```
//! Names without a namespace are read as `core/NAME`. Top-level markup
//! between blocks becomes freeform blocks. It is not a production parser:
//! there is no recovery from mismatched delimiters.

use std::sync::LazyLock;

use blocks_core::attrs::normalize;
use blocks_core::{Attributes, BlockNode, RawPart};
use regex::Regex;

/// Matches one delimiter comment.
///
/// Groups: 1 closer slash, 2 namespace, 3 name, 4 attributes, 5 void slash.
static DELIMITER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)<!--\s+(/)?wp:([a-z][a-z0-9_-]*/)?([a-z][a-z0-9_-]*)\s+(\{.*?\}\s+)?(/)?-->",
    )
    .expect("Invalid delimiter regex")
});

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Closing delimiter for {found} at byte {position} without an open block")]
    UnexpectedCloser { found: String, position: usize },

    #[error("Closing delimiter for {found} at byte {position} while {expected} is open")]
    MismatchedCloser {
        expected: String,
        found: String,
        position: usize,
    },

    #[error("Block {name} is never closed")]
    Unclosed { name: String },

    #[error("Invalid attributes at byte {position}: {source}")]
    Attributes {
        position: usize,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Block(#[from] blocks_core::Error),
}

struct Frame {
    name: String,
    attributes: Attributes,
    children: Vec<BlockNode>,
    parts: Vec<RawPart>,
}

#[derive(Default)]
struct Builder {
    stack: Vec<Frame>,
    output: Vec<BlockNode>,
}

impl Builder {
    fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.stack.last_mut() {
            Some(frame) => frame.parts.push(RawPart::Text(text.to_string())),
            None => self.output.push(BlockNode::freeform(text)),
        }
    }

    fn attach(&mut self, node: BlockNode) {
        match self.stack.last_mut() {
            Some(frame) => {
                frame.children.push(node);
                frame.parts.push(RawPart::Child);
            }
            None => self.output.push(node),
        }
    }

    fn close(&mut self, name: String, position: usize) -> Result<(), ParseError> {
        let frame = self.stack.pop().ok_or_else(|| ParseError::UnexpectedCloser {
            found: name.clone(),
            position,
        })?;
        if frame.name != name {
            return Err(ParseError::MismatchedCloser {
                expected: frame.name,
                found: name,
                position,
            });
        }
        let node =
            BlockNode::from_parts(Some(frame.name), frame.attributes, frame.children, frame.parts)?;
        self.attach(node);
        Ok(())
    }
}

/// Parse serialized markup back into a top-level block list.
pub fn parse(document: &str) -> Result<Vec<BlockNode>, ParseError> {
    let mut builder = Builder::default();
    let mut last = 0;

    for caps in DELIMITER_REGEX.captures_iter(document) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        builder.text(&document[last..whole.start()]);
        last = whole.end();

        let namespace = caps.get(2).map_or("core/", |m| m.as_str());
        let name = format!("{namespace}{}", &caps[3]);

        if caps.get(1).is_some() {
            builder.close(name, whole.start())?;
            continue;
        }

        let attributes = match caps.get(4) {
            Some(raw) => {
                let value = serde_json::from_str(raw.as_str().trim_end()).map_err(|source| {
                    ParseError::Attributes {
                        position: raw.start(),
                        source,
                    }
                })?;
                normalize(value)
            }
            None => Attributes::new(),
        };

        if caps.get(5).is_some() {
            builder.attach(BlockNode::new(name).with_attributes(attributes));
        } else {
            builder.stack.push(Frame {
                name,
                attributes,
                children: Vec::new(),
                parts: Vec::new(),
            });
        }
    }
    builder.text(&document[last..]);

    if let Some(open) = builder.stack.pop() {
        return Err(ParseError::Unclosed { name: open.name });
    }
    Ok(builder.output)
}
