//! Post domain model.

use crate::model::credential::PasswordHash;
use serde::Serialize;

/// Storage identity of a post.
pub type PostId = i64;

/// Published post as persisted.
///
/// `author` is fixed at creation; updates only touch `title` and `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: String,
    /// Never leaves the core through serialization.
    #[serde(skip_serializing)]
    pub password_hash: PasswordHash,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

/// Insert payload for a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
    pub password_hash: PasswordHash,
}
