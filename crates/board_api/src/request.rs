//! Deserializable request payloads.
//!
//! Paging fields are optional on the wire; the handler fills `page = 1` and
//! the configured default limit.

use board_core::{CommentId, CreateComment, CreatePost};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub author: String,
    pub password: String,
}

impl From<CreatePostRequest> for CreatePost {
    fn from(value: CreatePostRequest) -> Self {
        Self {
            title: value.title,
            content: value.content,
            author: value.author,
            password: value.password,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReadPostsRequest {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub author: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeletePostRequest {
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub parent_comment_id: Option<CommentId>,
}

impl From<CreateCommentRequest> for CreateComment {
    fn from(value: CreateCommentRequest) -> Self {
        Self {
            content: value.content,
            author: value.author,
            parent_comment_id: value.parent_comment_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReadCommentsRequest {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
