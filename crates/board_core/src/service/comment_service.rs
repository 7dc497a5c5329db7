//! Comment use-case service.
//!
//! # Responsibility
//! - Validate post and parent-comment references before persisting replies.
//! - Serve paginated comment pages, flat or assembled into a tree.
//! - Soft-delete comments scoped to their post.
//!
//! # Invariants
//! - A parent must exist and belong to the same post; a soft-deleted parent
//!   still qualifies.
//! - A comment addressed through the wrong post is reported as not found.
//! - Alert dispatch runs after persistence and never fails the call.

use crate::alert::dispatcher::AlertDispatcher;
use crate::error::ErrorKind;
use crate::model::comment::{Comment, CommentId, NestedComment, NewComment};
use crate::model::post::PostId;
use crate::pagination::{Page, PageError, PageRequest};
use crate::repo::alert_repo::KeywordRegistry;
use crate::repo::comment_repo::CommentRepository;
use crate::repo::RepoError;
use crate::service::comment_tree::build_comment_tree;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for comment use-cases.
#[derive(Debug)]
pub enum CommentServiceError {
    PostNotFound(PostId),
    /// Parent is missing or attached to another post.
    InvalidParent {
        parent_comment_id: CommentId,
        post_id: PostId,
    },
    /// Comment is missing or attached to another post.
    CommentNotFound {
        comment_id: CommentId,
        post_id: PostId,
    },
    InvalidPage(PageError),
    Repo(RepoError),
}

impl CommentServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PostNotFound(_) | Self::CommentNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidParent { .. } | Self::InvalidPage(_) => ErrorKind::BadRequest,
            Self::Repo(_) => ErrorKind::StorageUnavailable,
        }
    }
}

impl Display for CommentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PostNotFound(_) => write!(f, "post not found"),
            Self::InvalidParent { .. } => write!(f, "parent comment not found or mismatched"),
            Self::CommentNotFound { .. } => write!(f, "comment not found"),
            Self::InvalidPage(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPage(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CommentServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<PageError> for CommentServiceError {
    fn from(value: PageError) -> Self {
        Self::InvalidPage(value)
    }
}

/// Reply request under one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateComment {
    pub content: String,
    pub author: String,
    pub parent_comment_id: Option<CommentId>,
}

/// Comment service facade over repository and alert dispatcher.
pub struct CommentService<C: CommentRepository, K: KeywordRegistry> {
    repo: C,
    alerts: AlertDispatcher<K>,
}

impl<C: CommentRepository, K: KeywordRegistry> CommentService<C, K> {
    pub fn new(repo: C, alerts: AlertDispatcher<K>) -> Self {
        Self { repo, alerts }
    }

    /// Attaches a comment to a post, optionally under a parent comment.
    pub fn create(
        &self,
        post_id: PostId,
        request: CreateComment,
    ) -> Result<Comment, CommentServiceError> {
        if !self.repo.post_exists(post_id)? {
            warn!("event=comment_create module=service status=not_found post_id={post_id}");
            return Err(CommentServiceError::PostNotFound(post_id));
        }

        if let Some(parent_comment_id) = request.parent_comment_id {
            self.ensure_parent_in_post(parent_comment_id, post_id)?;
        }

        let saved = self.repo.save_comment(&NewComment {
            post_id,
            parent_comment_id: request.parent_comment_id,
            content: request.content,
            author: request.author,
        })?;
        info!(
            "event=comment_create module=service status=ok post_id={post_id} comment_id={}",
            saved.id
        );

        self.alerts.dispatch(&saved.content, &saved.author);
        Ok(saved)
    }

    /// Returns one flat page of the post's comments, deleted ones included.
    pub fn read_by_post(
        &self,
        post_id: PostId,
        page: u32,
        limit: u32,
    ) -> Result<Page<Comment>, CommentServiceError> {
        let request = PageRequest::new(page, limit)?;
        let (items, total) = self.repo.find_comments_by_post(post_id, &request)?;
        Ok(Page::new(request, total, items))
    }

    /// Returns one page of the post's comments assembled into a two-level tree.
    ///
    /// Paging applies to the flat rows; `total` counts flat rows.
    pub fn read_tree_by_post(
        &self,
        post_id: PostId,
        page: u32,
        limit: u32,
    ) -> Result<Page<NestedComment>, CommentServiceError> {
        let flat = self.read_by_post(post_id, page, limit)?;
        Ok(flat.map_items(|comments| build_comment_tree(&comments)))
    }

    /// Soft-deletes a comment that belongs to `post_id`.
    pub fn delete(&self, post_id: PostId, comment_id: CommentId) -> Result<(), CommentServiceError> {
        let belongs = self
            .repo
            .find_comment_by_id(comment_id)?
            .is_some_and(|comment| comment.post_id == post_id);
        if !belongs {
            warn!(
                "event=comment_delete module=service status=not_found post_id={post_id} comment_id={comment_id}"
            );
            return Err(CommentServiceError::CommentNotFound {
                comment_id,
                post_id,
            });
        }

        match self.repo.soft_delete_comment(comment_id) {
            Ok(_) => {
                info!(
                    "event=comment_delete module=service status=ok post_id={post_id} comment_id={comment_id}"
                );
                Ok(())
            }
            Err(RepoError::CommentNotFound(_)) => Err(CommentServiceError::CommentNotFound {
                comment_id,
                post_id,
            }),
            Err(err) => Err(err.into()),
        }
    }

    fn ensure_parent_in_post(
        &self,
        parent_comment_id: CommentId,
        post_id: PostId,
    ) -> Result<(), CommentServiceError> {
        let valid = self
            .repo
            .find_comment_by_id(parent_comment_id)?
            .is_some_and(|parent| parent.post_id == post_id);
        if valid {
            return Ok(());
        }
        warn!(
            "event=comment_create module=service status=rejected reason=invalid_parent post_id={post_id} parent_comment_id={parent_comment_id}"
        );
        Err(CommentServiceError::InvalidParent {
            parent_comment_id,
            post_id,
        })
    }
}
