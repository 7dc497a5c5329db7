//! Two-level comment tree assembly.
//!
//! # Invariants
//! - Roots are the parentless comments of the page, in input order.
//! - Children keep their relative input order under their parent.
//! - Deleted comments keep their node; only the content is masked.
//! - Replies to replies are not nested and do not appear in the output.

use crate::model::comment::{Comment, CommentId, NestedComment};
use std::collections::HashMap;

/// Builds the presentation tree for one page of flat comments.
pub fn build_comment_tree(comments: &[Comment]) -> Vec<NestedComment> {
    let mut children_by_parent: HashMap<CommentId, Vec<&Comment>> = HashMap::new();
    for comment in comments {
        if let Some(parent_id) = comment.parent_comment_id {
            children_by_parent.entry(parent_id).or_default().push(comment);
        }
    }

    comments
        .iter()
        .filter(|comment| comment.parent_comment_id.is_none())
        .map(|root| {
            let mut node = NestedComment::leaf(root);
            node.children = children_by_parent
                .get(&root.id)
                .map(|children| children.iter().map(|child| NestedComment::leaf(child)).collect())
                .unwrap_or_default();
            node
        })
        .collect()
}
