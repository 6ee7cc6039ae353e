//! Integration tests for structural insertion.

use blocks_core::{
    Attributes, BlockNode, DirectiveRegistry, HookPoint, Position, RawPart, Rewriter, Serializer,
    make_inserter, serialize,
};
use blocks_test_utils::tree::{
    assert_parity, child_names, comments_template, count_named, group, interleaved, paragraph,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn abc() -> BlockNode {
    interleaved(
        "acme/row",
        vec![
            BlockNode::new("acme/a"),
            BlockNode::new("acme/b"),
            BlockNode::new("acme/c"),
        ],
        "x",
    )
}

fn registry(decls: &[(&str, &str, &str)], point: HookPoint) -> DirectiveRegistry {
    let attrs = Attributes::new();
    let mut builder = DirectiveRegistry::builder();
    for (block_type, anchor, position) in decls {
        builder
            .register_auto_insert(block_type, [(*anchor, *position, &attrs)], point)
            .unwrap();
    }
    builder.build()
}

#[test]
fn test_after_middle_child_keeps_text_in_place() {
    let insert = make_inserter("acme/b", Position::After, BlockNode::new("acme/new"));
    let row = insert(abc());

    assert_eq!(child_names(&row), vec!["acme/a", "acme/b", "acme/new", "acme/c"]);
    assert_eq!(
        serialize(&row).unwrap(),
        "<!-- wp:acme/row --><!-- wp:acme/a /-->x<!-- wp:acme/b /-->x<!-- wp:acme/new /--><!-- wp:acme/c /--><!-- /wp:acme/row -->"
    );
    assert_parity(&row);
}

#[rstest]
#[case::before_first("acme/a", Position::Before, "<!-- wp:acme/new /--><!-- wp:acme/a /-->x<!-- wp:acme/b /-->x<!-- wp:acme/c /-->")]
#[case::before_middle("acme/b", Position::Before, "<!-- wp:acme/a /-->x<!-- wp:acme/new /--><!-- wp:acme/b /-->x<!-- wp:acme/c /-->")]
#[case::after_last("acme/c", Position::After, "<!-- wp:acme/a /-->x<!-- wp:acme/b /-->x<!-- wp:acme/c /--><!-- wp:acme/new /-->")]
fn test_sibling_insertion_by_marker_ordinal(
    #[case] anchor: &str,
    #[case] position: Position,
    #[case] inner: &str,
) {
    let row = make_inserter(anchor, position, BlockNode::new("acme/new"))(abc());

    assert_eq!(
        serialize(&row).unwrap(),
        format!("<!-- wp:acme/row -->{inner}<!-- /wp:acme/row -->")
    );
    assert_eq!(row.marker_count(), 4);
}

#[test]
fn test_first_child_of_empty_node() {
    let insert = make_inserter("acme/x", Position::FirstChild, paragraph("y"));
    let x = insert(BlockNode::new("acme/x"));

    assert_eq!(x.children(), &[paragraph("y")]);
    assert_eq!(x.parts(), &[RawPart::Child]);
    assert_eq!(
        serialize(&x).unwrap(),
        format!(
            "<!-- wp:acme/x -->{}<!-- /wp:acme/x -->",
            serialize(&paragraph("y")).unwrap()
        )
    );
}

#[rstest]
#[case(Position::Before)]
#[case(Position::After)]
#[case(Position::FirstChild)]
#[case(Position::LastChild)]
fn test_missing_anchor_serializes_identically(#[case] position: Position) {
    let tree = group(vec![paragraph("one"), comments_template()]);
    let expected = serialize(&tree).unwrap();

    let insert = make_inserter("acme/absent", position, BlockNode::new("acme/new"));
    assert_eq!(serialize(&insert(tree)).unwrap(), expected);
}

#[test]
fn test_double_application_doubles_node_count() {
    let insert = make_inserter(
        "core/comment-template",
        Position::LastChild,
        BlockNode::new("acme/like"),
    );
    let template = comments_template().children()[0].clone();

    let once = insert(template.clone());
    let twice = insert(insert(template));

    assert_eq!(count_named(&once, "acme/like"), 1);
    assert_eq!(count_named(&twice, "acme/like"), 2);
    assert_parity(&twice);
}

#[rstest]
#[case(HookPoint::Tree)]
#[case(HookPoint::Render)]
fn test_one_insertion_per_anchor_per_pass(#[case] point: HookPoint) {
    let registry = registry(
        &[
            ("acme/like", "core/comment-template", "lastChild"),
            ("acme/sep", "core/paragraph", "after"),
        ],
        point,
    );
    let page = vec![group(vec![
        paragraph("a"),
        comments_template(),
        group(vec![paragraph("b"), comments_template()]),
    ])];

    let html = match point {
        HookPoint::Tree => {
            let rewritten = Rewriter::new(&registry).rewrite_all(page).unwrap();
            assert_eq!(rewritten.iter().map(|n| count_named(n, "acme/like")).sum::<usize>(), 2);
            assert_eq!(rewritten.iter().map(|n| count_named(n, "acme/sep")).sum::<usize>(), 2);
            rewritten.iter().for_each(assert_parity);
            Serializer::new().serialize_all(&rewritten).unwrap()
        }
        HookPoint::Render => Serializer::with_registry(&registry).serialize_all(&page).unwrap(),
    };

    assert_eq!(html.matches("<!-- wp:acme/like /-->").count(), 2);
    assert_eq!(html.matches("<!-- wp:acme/sep /-->").count(), 2);
}

#[test]
fn test_sibling_position_matches_first_anchor_only() {
    let registry = registry(&[("acme/sep", "core/paragraph", "after")], HookPoint::Tree);
    let mut tree = group(vec![paragraph("a"), paragraph("b")]);
    Rewriter::new(&registry).rewrite(&mut tree).unwrap();

    assert_eq!(
        child_names(&tree),
        vec!["core/paragraph", "acme/sep", "core/paragraph"]
    );
}
