//! Use-case API over the board core.
//!
//! # Responsibility
//! - Expose one function per board use-case with stable request/response
//!   shapes.
//! - Reduce every core error to an [`ErrorKind`] inside the envelope.
//!
//! # Invariants
//! - Handlers never panic and never return `Err`; failures live in the
//!   envelope.
//! - Every call emits exactly one `event=api_call` line carrying op, status
//!   and duration. Request bodies and passwords are never logged.

use crate::envelope::ApiResponse;
use crate::request::{
    CreateCommentRequest, CreatePostRequest, DeletePostRequest, ReadCommentsRequest,
    ReadPostsRequest, UpdatePostRequest,
};
use board_core::db::DbResult;
use board_core::{
    AlertDispatcher, Comment, CommentId, CommentService, CommentServiceError, CoreConfig,
    ErrorKind, NestedComment, NotificationSink, Page, Post, PostId, PostQuery, PostService,
    PostServiceError, SqliteCommentRepository, SqliteKeywordRegistry, SqlitePostRepository,
};
use log::{info, warn};
use rusqlite::Connection;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;

const FIRST_PAGE: u32 = 1;

type SqlitePostService<'conn> =
    PostService<SqlitePostRepository<'conn>, SqliteKeywordRegistry<'conn>>;
type SqliteCommentService<'conn> =
    CommentService<SqliteCommentRepository<'conn>, SqliteKeywordRegistry<'conn>>;

/// Error that can be reported through the envelope.
trait Classified: Display {
    fn kind(&self) -> ErrorKind;
}

impl Classified for PostServiceError {
    fn kind(&self) -> ErrorKind {
        PostServiceError::kind(self)
    }
}

impl Classified for CommentServiceError {
    fn kind(&self) -> ErrorKind {
        CommentServiceError::kind(self)
    }
}

/// Board request handler bound to one SQLite connection.
pub struct BoardApi {
    conn: Connection,
    sink: Arc<dyn NotificationSink>,
    default_limit: u32,
}

impl BoardApi {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection, sink: Arc<dyn NotificationSink>, default_limit: u32) -> Self {
        Self {
            conn,
            sink,
            default_limit,
        }
    }

    /// Opens the configured database and applies `default_page_limit`.
    pub fn open(config: &CoreConfig, sink: Arc<dyn NotificationSink>) -> DbResult<Self> {
        let conn = config.open_db()?;
        Ok(Self::new(conn, sink, config.default_page_limit))
    }

    /// Borrow of the underlying connection, mainly for alert registration.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn create_post(&self, request: CreatePostRequest) -> ApiResponse<Post> {
        respond("create_post", || {
            self.post_service()?.create(request.into())
        })
    }

    pub fn read_posts(&self, request: ReadPostsRequest) -> ApiResponse<Page<Post>> {
        let query = PostQuery {
            page: request.page.unwrap_or(FIRST_PAGE),
            limit: request.limit.unwrap_or(self.default_limit),
            author: request.author,
            title: request.title,
        };
        respond("read_posts", || self.post_service()?.read(query))
    }

    pub fn update_post(&self, post_id: PostId, request: UpdatePostRequest) -> ApiResponse<Post> {
        respond("update_post", || {
            self.post_service()?.update(
                post_id,
                request.title,
                request.content,
                &request.password,
            )
        })
    }

    /// Deletes a post and its comments; `data` is always `null`.
    pub fn delete_post(&self, post_id: PostId, request: DeletePostRequest) -> ApiResponse<()> {
        respond_done("delete_post", || {
            self.post_service()?.delete(post_id, &request.password)
        })
    }

    pub fn create_comment(
        &self,
        post_id: PostId,
        request: CreateCommentRequest,
    ) -> ApiResponse<Comment> {
        respond("create_comment", || {
            self.comment_service()?.create(post_id, request.into())
        })
    }

    /// One page of the post's comments as a two-level tree.
    pub fn read_comments(
        &self,
        post_id: PostId,
        request: ReadCommentsRequest,
    ) -> ApiResponse<Page<NestedComment>> {
        let page = request.page.unwrap_or(FIRST_PAGE);
        let limit = request.limit.unwrap_or(self.default_limit);
        respond("read_comments", || {
            self.comment_service()?
                .read_tree_by_post(post_id, page, limit)
        })
    }

    /// Soft-deletes a comment; `data` is always `null`.
    pub fn delete_comment(&self, post_id: PostId, comment_id: CommentId) -> ApiResponse<()> {
        respond_done("delete_comment", || {
            self.comment_service()?.delete(post_id, comment_id)
        })
    }

    fn post_service(&self) -> Result<SqlitePostService<'_>, PostServiceError> {
        let repo = SqlitePostRepository::try_new(&self.conn)?;
        let registry = SqliteKeywordRegistry::try_new(&self.conn)?;
        Ok(PostService::new(
            repo,
            AlertDispatcher::new(registry, Arc::clone(&self.sink)),
        ))
    }

    fn comment_service(&self) -> Result<SqliteCommentService<'_>, CommentServiceError> {
        let repo = SqliteCommentRepository::try_new(&self.conn)?;
        let registry = SqliteKeywordRegistry::try_new(&self.conn)?;
        Ok(CommentService::new(
            repo,
            AlertDispatcher::new(registry, Arc::clone(&self.sink)),
        ))
    }
}

fn respond<T, E: Classified>(
    op: &'static str,
    handler: impl FnOnce() -> Result<T, E>,
) -> ApiResponse<T> {
    let started = Instant::now();
    let result = handler();
    log_call(op, started, result.as_ref().err());
    match result {
        Ok(data) => ApiResponse::success(data),
        Err(err) => ApiResponse::failure(err.kind(), err.to_string()),
    }
}

fn respond_done<E: Classified>(
    op: &'static str,
    handler: impl FnOnce() -> Result<(), E>,
) -> ApiResponse<()> {
    let started = Instant::now();
    let result = handler();
    log_call(op, started, result.as_ref().err());
    match result {
        Ok(()) => ApiResponse::done(),
        Err(err) => ApiResponse::failure(err.kind(), err.to_string()),
    }
}

fn log_call<E: Classified>(op: &str, started: Instant, err: Option<&E>) {
    let duration_ms = started.elapsed().as_millis();
    match err {
        None => info!("event=api_call module=api op={op} status=ok duration_ms={duration_ms}"),
        Some(err) => warn!(
            "event=api_call module=api op={op} status=error error_kind={} duration_ms={duration_ms}",
            err.kind()
        ),
    }
}
