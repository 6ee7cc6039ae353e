//! End-to-end tests for the full flow:
//! markup -> parsed tree -> JSON wire format -> metadata registry -> markup.

use blocks_core::{BlockNode, HookPoint, Rewriter, Serializer, serialize_all};
use blocks_meta::{Config, load_registry};
use blocks_test_utils::MetadataDir;
use blocks_test_utils::markup::parse;
use blocks_test_utils::tree::count_named;
use pretty_assertions::assert_eq;
use std::fs;

const TEMPLATE: &str = concat!(
    "<!-- wp:group {\"tagName\":\"main\"} --><main class=\"wp-block-group\">",
    "<!-- wp:post-title /-->",
    "<!-- wp:post-content /-->",
    "<!-- wp:comments --><div class=\"wp-block-comments\">",
    "<!-- wp:comment-template --><ol><!-- wp:comment-content /--></ol><!-- /wp:comment-template -->",
    "</div><!-- /wp:comments -->",
    "</main><!-- /wp:group -->",
    "\n"
);

fn setup_metadata() -> MetadataDir {
    let dir = MetadataDir::new();
    dir.block_json(
        "like-button",
        "acme/like-button",
        &[("core/comment-template", "lastChild")],
    );
    dir.raw(
        "byline/block.toml",
        r#"
name = "acme/byline"

[autoInsert."core/post-title"]
position = "after"
attrs = { format = "short" }
"#,
    );
    dir
}

fn render(blocks: Vec<BlockNode>, point: HookPoint, dir: &MetadataDir) -> String {
    let registry = load_registry(dir.path(), point).unwrap();
    match point {
        HookPoint::Tree => {
            let rewritten = Rewriter::new(&registry).rewrite_all(blocks).unwrap();
            serialize_all(&rewritten).unwrap()
        }
        HookPoint::Render => Serializer::with_registry(&registry)
            .serialize_all(&blocks)
            .unwrap(),
    }
}

#[test]
fn test_markup_round_trips_without_directives() {
    let blocks = parse(TEMPLATE).unwrap();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[1].is_freeform());
    assert_eq!(serialize_all(&blocks).unwrap(), TEMPLATE);
}

#[test]
fn test_json_wire_format_round_trip() {
    let blocks = parse(TEMPLATE).unwrap();
    let json = serde_json::to_string(&blocks).unwrap();
    let decoded: Vec<BlockNode> = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, blocks);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["blockName"], "core/group");
    assert_eq!(value[0]["attrs"]["tagName"], "main");
    assert_eq!(value[1]["blockName"], serde_json::Value::Null);
}

#[test]
fn test_metadata_directives_render_identically_at_both_points() {
    let dir = setup_metadata();
    let tree = render(parse(TEMPLATE).unwrap(), HookPoint::Tree, &dir);
    let late = render(parse(TEMPLATE).unwrap(), HookPoint::Render, &dir);

    assert_eq!(tree, late);
    assert_eq!(
        tree,
        concat!(
            "<!-- wp:group {\"tagName\":\"main\"} --><main class=\"wp-block-group\">",
            "<!-- wp:post-title /-->",
            "<!-- wp:acme/byline {\"format\":\"short\"} /-->",
            "<!-- wp:post-content /-->",
            "<!-- wp:comments --><div class=\"wp-block-comments\">",
            "<!-- wp:comment-template --><ol><!-- wp:comment-content /--></ol>",
            "<!-- wp:acme/like-button /--><!-- /wp:comment-template -->",
            "</div><!-- /wp:comments -->",
            "</main><!-- /wp:group -->",
            "\n"
        )
    );
}

#[test]
fn test_rendered_output_reparses_with_inserted_blocks() {
    let dir = setup_metadata();
    let html = render(parse(TEMPLATE).unwrap(), HookPoint::Render, &dir);
    let reparsed = parse(&html).unwrap();

    assert_eq!(count_named(&reparsed[0], "acme/like-button"), 1);
    assert_eq!(count_named(&reparsed[0], "acme/byline"), 1);
    assert_eq!(serialize_all(&reparsed).unwrap(), html);
}

#[test]
fn test_config_drives_hook_point_and_metadata_dir() {
    let dir = setup_metadata();
    let config_path = dir.path().join("blocks.toml");
    fs::write(
        &config_path,
        format!(
            "[auto_insert]\nhook_point = \"render\"\nmetadata_dir = {:?}\n",
            dir.path().to_string_lossy()
        ),
    )
    .unwrap();

    let config = Config::load(&config_path).unwrap();
    assert_eq!(config.auto_insert.hook_point, HookPoint::Render);

    let metadata_dir = config.auto_insert.metadata_dir.as_deref().unwrap();
    let registry = load_registry(metadata_dir, config.auto_insert.hook_point).unwrap();
    assert_eq!(registry.len(), 2);

    let html = Serializer::with_registry(&registry)
        .with_options(config.serialize_options())
        .serialize_all(&parse(TEMPLATE).unwrap())
        .unwrap();
    assert!(html.contains("<!-- wp:acme/like-button /-->"));
}
