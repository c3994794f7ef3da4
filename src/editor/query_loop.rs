//! Query loop rewrite
//!
//! Inside a query loop a card shows the current post, so its standard blocks
//! are swapped for their post counterparts: images become the featured image,
//! the first heading the post title, the first paragraph the excerpt, and
//! buttons a read-more link.

use crate::block::{BlockNode, ContentNode, Value};

const IMAGE: &str = "core/image";
const HEADING: &str = "core/heading";
const PARAGRAPH: &str = "core/paragraph";
const BUTTON: &str = "core/button";

const FEATURED_IMAGE: &str = "core/post-featured-image";
const POST_TITLE: &str = "core/post-title";
const POST_EXCERPT: &str = "core/post-excerpt";
const READ_MORE: &str = "core/read-more";

#[derive(Debug, Default)]
struct Rewriter {
    heading_replaced: bool,
    paragraph_replaced: bool,
    changed: bool,
}

impl Rewriter {
    fn rewrite_all(&mut self, nodes: &[ContentNode]) -> Vec<ContentNode> {
        nodes.iter().map(|node| self.rewrite(node)).collect()
    }

    fn rewrite(&mut self, node: &ContentNode) -> ContentNode {
        match node.type_id.as_str() {
            IMAGE => {
                self.changed = true;
                BlockNode::new(FEATURED_IMAGE).with_attributes(node.attributes.clone())
            }
            HEADING if !self.heading_replaced => {
                self.heading_replaced = true;
                self.changed = true;
                let mut title = BlockNode::new(POST_TITLE);
                if let Some(level) = node.attr("level") {
                    title.attributes.insert("level".to_string(), level.clone());
                }
                title.with_attr("isLink", Value::Bool(true))
            }
            PARAGRAPH if !self.paragraph_replaced => {
                self.paragraph_replaced = true;
                self.changed = true;
                BlockNode::new(POST_EXCERPT)
            }
            BUTTON => {
                self.changed = true;
                BlockNode::new(READ_MORE)
            }
            _ if node.is_container() => ContentNode {
                type_id: node.type_id.clone(),
                attributes: node.attributes.clone(),
                children: self.rewrite_all(&node.children),
            },
            _ => node.clone(),
        }
    }
}

/// Rewrite standard blocks into post blocks
///
/// Returns `None` when nothing needed rewriting, so callers can skip the
/// commit and avoid re-triggering themselves.
pub fn rewrite_for_query_loop(nodes: &[ContentNode]) -> Option<Vec<ContentNode>> {
    let mut rewriter = Rewriter::default();
    let rewritten = rewriter.rewrite_all(nodes);
    rewriter.changed.then_some(rewritten)
}
