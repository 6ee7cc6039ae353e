//! Proptest strategies for arbitrary block trees.
//!
//! Generated markup never contains `<!--`, so it cannot be confused with
//! block delimiters by [`crate::markup::parse`].

use blocks_core::{Attributes, BlockNode};
use proptest::prelude::*;
use serde_json::Value;

/// Block names, half of them in the `core/` namespace.
pub fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9-]{0,6}".prop_map(|n| format!("core/{n}")),
        "[a-z]{1,4}/[a-z][a-z0-9-]{0,6}",
    ]
}

/// Literal markup fragments.
pub fn arb_text() -> impl Strategy<Value = String> {
    "[a-z <>/=\n]{0,10}"
}

/// Attribute values, including strings that need comment-safe escaping.
pub fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i32>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[ -~]{0,10}".prop_map(Value::from),
        Just(Value::Null),
    ]
}

pub fn arb_attributes() -> impl Strategy<Value = Attributes> {
    prop::collection::vec(("[a-z]{1,5}", arb_value()), 0..3)
        .prop_map(|pairs| pairs.into_iter().collect())
}

/// Named block trees up to four levels deep with text between children.
pub fn arb_block() -> impl Strategy<Value = BlockNode> {
    let leaf = (arb_name(), arb_attributes(), arb_text()).prop_map(|(name, attributes, text)| {
        BlockNode::new(name).with_attributes(attributes).with_text(text)
    });

    leaf.prop_recursive(3, 24, 4, |inner| {
        (
            arb_name(),
            arb_attributes(),
            prop::collection::vec((arb_text(), inner), 0..4),
            arb_text(),
        )
            .prop_map(|(name, attributes, children, tail)| {
                let mut node = BlockNode::new(name).with_attributes(attributes);
                for (text, child) in children {
                    node.push_text(text);
                    node.append_child(child);
                }
                node.push_text(tail);
                node
            })
    })
}

/// Top-level block lists, optionally separated by freeform markup.
pub fn arb_document() -> impl Strategy<Value = Vec<BlockNode>> {
    prop::collection::vec(
        prop_oneof![
            3 => arb_block(),
            1 => "[a-z \n]{1,6}".prop_map(BlockNode::freeform),
        ],
        0..5,
    )
}
