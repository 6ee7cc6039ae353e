//! Property tests: tree-point and render-point application agree.
//!
//! The same directive set is registered twice, once per hook point. Rewriting
//! the tree and serializing must give the same markup as splicing while
//! serializing, and neither may leave a node with mismatched markers.

use std::collections::BTreeSet;

use blocks_core::{Attributes, BlockNode, DirectiveRegistry, HookPoint, Rewriter, Serializer};
use blocks_test_utils::strategy::{arb_document, arb_name};
use blocks_test_utils::tree::assert_parity;
use proptest::prelude::*;

type Declaration = (String, String, &'static str);

fn collect_names(nodes: &[BlockNode], out: &mut Vec<String>) {
    for node in nodes {
        if let Some(name) = node.name() {
            out.push(name.to_string());
        }
        collect_names(node.children(), out);
    }
}

fn build(decls: &BTreeSet<Declaration>, point: HookPoint) -> DirectiveRegistry {
    let attrs = Attributes::new();
    let mut builder = DirectiveRegistry::builder();
    for (block_type, anchor, position) in decls {
        builder
            .register_auto_insert(block_type, [(anchor.as_str(), *position, &attrs)], point)
            .unwrap();
    }
    builder.build()
}

/// A document plus directives anchored mostly on names it contains.
fn arb_case() -> impl Strategy<Value = (Vec<BlockNode>, BTreeSet<Declaration>)> {
    arb_document().prop_flat_map(|doc| {
        let mut names = Vec::new();
        collect_names(&doc, &mut names);
        names.push("absent/anchor".to_string());

        let decl = (
            prop_oneof![Just("zz/new".to_string()), arb_name()],
            prop::sample::select(names),
            prop::sample::select(vec!["before", "after", "firstChild", "lastChild"]),
        );
        (Just(doc), prop::collection::btree_set(decl, 0..5))
    })
}

proptest! {
    #[test]
    fn prop_tree_and_render_points_agree((doc, decls) in arb_case()) {
        let tree_registry = build(&decls, HookPoint::Tree);
        let render_registry = build(&decls, HookPoint::Render);

        let rewritten = Rewriter::new(&tree_registry).rewrite_all(doc.clone()).unwrap();
        for node in &rewritten {
            assert_parity(node);
        }

        let from_tree = Serializer::new().serialize_all(&rewritten).unwrap();
        let from_render = Serializer::with_registry(&render_registry)
            .serialize_all(&doc)
            .unwrap();
        prop_assert_eq!(from_tree, from_render);
    }

    #[test]
    fn prop_render_point_leaves_input_untouched((doc, decls) in arb_case()) {
        let registry = build(&decls, HookPoint::Render);
        let before = doc.clone();
        Serializer::with_registry(&registry).serialize_all(&doc).unwrap();
        prop_assert_eq!(doc, before);
    }
}
