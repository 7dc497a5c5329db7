//! Core domain logic for the discussion board.
//! This crate is the single source of truth for post/comment mutation rules,
//! comment tree presentation and keyword alert fan-out.

pub mod alert;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod pagination;
pub mod repo;
pub mod search;
pub mod service;

pub use alert::dispatcher::{matching_alerts, AlertDispatcher, DispatchSummary};
pub use alert::sink::{
    notification_text, LogNotificationSink, MemorySink, NotificationSink, SinkError,
};
pub use config::{ConfigError, CoreConfig};
pub use error::ErrorKind;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::alert::{AlertId, KeywordAlert, Notification};
pub use model::comment::{
    Comment, CommentId, CommentState, NestedComment, NewComment, DELETED_COMMENT_PLACEHOLDER,
};
pub use model::credential::PasswordHash;
pub use model::post::{NewPost, Post, PostId};
pub use pagination::{Page, PageError, PageRequest, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use repo::alert_repo::{KeywordRegistry, SqliteKeywordRegistry};
pub use repo::comment_repo::{CommentRepository, SqliteCommentRepository};
pub use repo::post_repo::{PostFilter, PostRepository, SqlitePostRepository};
pub use repo::{RepoError, RepoResult};
pub use service::comment_service::{CommentService, CommentServiceError, CreateComment};
pub use service::comment_tree::build_comment_tree;
pub use service::post_service::{CreatePost, PostQuery, PostService, PostServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
