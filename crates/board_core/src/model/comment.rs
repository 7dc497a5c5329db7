//! Comment domain model.
//!
//! # Responsibility
//! - Represent flat comment rows and their soft-delete lifecycle.
//! - Define the two-level presentation node built for readers.
//!
//! # Invariants
//! - `post_id` and `parent_comment_id` never change after creation.
//! - A parent, when present, belongs to the same post.
//! - Deleted comments keep their row; only the presented content is masked.

use crate::model::post::PostId;
use serde::Serialize;

/// Storage identity of a comment.
pub type CommentId = i64;

/// Text shown in place of a soft-deleted comment's content.
pub const DELETED_COMMENT_PLACEHOLDER: &str = "[Deleted Comment]";

/// Soft-delete lifecycle of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommentState {
    Active,
    /// Tombstoned at `at` (Unix epoch milliseconds).
    Deleted { at: i64 },
}

impl CommentState {
    /// Maps the nullable `deleted_at` column into a state.
    pub fn from_deleted_at(deleted_at: Option<i64>) -> Self {
        match deleted_at {
            Some(at) => Self::Deleted { at },
            None => Self::Active,
        }
    }

    pub fn deleted_at(self) -> Option<i64> {
        match self {
            Self::Active => None,
            Self::Deleted { at } => Some(at),
        }
    }

    pub fn is_deleted(self) -> bool {
        matches!(self, Self::Deleted { .. })
    }
}

/// Comment row as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub parent_comment_id: Option<CommentId>,
    pub content: String,
    pub author: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub state: CommentState,
}

impl Comment {
    /// Content as readers may see it.
    pub fn visible_content(&self) -> &str {
        match self.state {
            CommentState::Active => &self.content,
            CommentState::Deleted { .. } => DELETED_COMMENT_PLACEHOLDER,
        }
    }
}

/// Insert payload for a new comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: PostId,
    pub parent_comment_id: Option<CommentId>,
    pub content: String,
    pub author: String,
}

/// Presentation node: a top-level comment with its direct replies.
///
/// Replies are leaves; their `children` is always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NestedComment {
    pub id: CommentId,
    pub author: String,
    /// Already masked for deleted comments.
    pub content: String,
    pub created_at: i64,
    pub parent_comment_id: Option<CommentId>,
    pub children: Vec<NestedComment>,
}

impl NestedComment {
    /// Builds a leaf node with masked content.
    pub fn leaf(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            author: comment.author.clone(),
            content: comment.visible_content().to_string(),
            created_at: comment.created_at,
            parent_comment_id: comment.parent_comment_id,
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Comment, CommentState, DELETED_COMMENT_PLACEHOLDER};

    fn comment(state: CommentState) -> Comment {
        Comment {
            id: 1,
            post_id: 1,
            parent_comment_id: None,
            content: "hello".to_string(),
            author: "Bob".to_string(),
            created_at: 0,
            state,
        }
    }

    #[test]
    fn visible_content_masks_deleted_comments() {
        assert_eq!(comment(CommentState::Active).visible_content(), "hello");
        assert_eq!(
            comment(CommentState::Deleted { at: 10 }).visible_content(),
            DELETED_COMMENT_PLACEHOLDER
        );
    }

    #[test]
    fn state_maps_nullable_column_both_ways() {
        assert_eq!(CommentState::from_deleted_at(None), CommentState::Active);
        let deleted = CommentState::from_deleted_at(Some(42));
        assert!(deleted.is_deleted());
        assert_eq!(deleted.deleted_at(), Some(42));
    }
}
