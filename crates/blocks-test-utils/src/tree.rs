//! Block tree builders and structural assertions.

use blocks_core::BlockNode;

/// `core/paragraph` wrapping `text` in `<p>`.
pub fn paragraph(text: &str) -> BlockNode {
    BlockNode::new("core/paragraph").with_text(format!("<p>{text}</p>"))
}

/// `core/group` wrapping `children` in a `<div>`, one per line.
pub fn group(children: Vec<BlockNode>) -> BlockNode {
    let mut node = BlockNode::new("core/group").with_text("<div class=\"wp-block-group\">");
    for child in children {
        node = node.with_text("\n").with_child(child);
    }
    node.with_text("\n</div>")
}

/// Block named `name` whose children are separated by `separator` text:
/// `child, separator, child, separator, child`.
pub fn interleaved(name: &str, children: Vec<BlockNode>, separator: &str) -> BlockNode {
    let mut node = BlockNode::new(name);
    for (i, child) in children.into_iter().enumerate() {
        if i > 0 {
            node.push_text(separator);
        }
        node.append_child(child);
    }
    node
}

/// Chain of `core/group` blocks `levels` deep around a paragraph.
pub fn nested(levels: usize) -> BlockNode {
    (0..levels).fold(paragraph("leaf"), |inner, _| {
        BlockNode::new("core/group").with_child(inner)
    })
}

/// A comments section resembling a block theme template.
pub fn comments_template() -> BlockNode {
    BlockNode::new("core/comments")
        .with_text("<div class=\"wp-block-comments\">")
        .with_child(
            BlockNode::new("core/comment-template")
                .with_text("<ol>")
                .with_child(BlockNode::new("core/comment-author-name"))
                .with_child(BlockNode::new("core/comment-content"))
                .with_text("</ol>"),
        )
        .with_text("</div>")
}

/// Number of blocks named `name` anywhere in the subtree.
pub fn count_named(node: &BlockNode, name: &str) -> usize {
    let own = usize::from(node.name() == Some(name));
    own + node
        .children()
        .iter()
        .map(|c| count_named(c, name))
        .sum::<usize>()
}

/// Names of the direct children, nameless ones as `"<freeform>"`.
pub fn child_names(node: &BlockNode) -> Vec<&str> {
    node.children()
        .iter()
        .map(|c| c.name().unwrap_or("<freeform>"))
        .collect()
}

/// Panics with the path to the first node whose marker count differs from
/// its child count.
pub fn assert_parity(node: &BlockNode) {
    fn walk(node: &BlockNode, path: &mut Vec<String>) {
        path.push(node.name().unwrap_or("<freeform>").to_string());
        assert_eq!(
            node.marker_count(),
            node.children().len(),
            "marker/child mismatch at {}",
            path.join(" > ")
        );
        for child in node.children() {
            walk(child, path);
        }
        path.pop();
    }

    walk(node, &mut Vec::new());
}
