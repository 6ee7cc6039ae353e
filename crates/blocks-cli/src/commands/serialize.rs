//! Serialize command implementation

use std::path::Path;

use blocks_core::Serializer;
use blocks_meta::Config;

use super::read_document;
use crate::error::Result;

/// Print the markup for a block tree exactly as given.
pub fn run_serialize(config: &Config, input: &Path) -> Result<()> {
    let document = read_document(input)?;
    let html = Serializer::new()
        .with_options(config.serialize_options())
        .serialize_all(&document.blocks)?;
    println!("{html}");
    Ok(())
}
