//! Post use-case service.
//!
//! # Responsibility
//! - Create, list, update and delete posts.
//! - Gate every mutation on the per-request password.
//! - Trigger keyword alerts for newly published post content.
//!
//! # Invariants
//! - The password is checked fresh on every mutating call.
//! - A rejected mutation leaves the post untouched.
//! - `author` is immutable after creation; update alerts use the stored one.
//! - Alert dispatch runs after persistence and never fails the call.

use crate::alert::dispatcher::AlertDispatcher;
use crate::error::ErrorKind;
use crate::model::credential::PasswordHash;
use crate::model::post::{NewPost, Post, PostId};
use crate::pagination::{Page, PageError, PageRequest};
use crate::repo::alert_repo::KeywordRegistry;
use crate::repo::post_repo::{PostFilter, PostRepository};
use crate::repo::RepoError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for post use-cases.
#[derive(Debug)]
pub enum PostServiceError {
    PostNotFound(PostId),
    /// Password mismatch. Deliberately carries no detail about the mismatch.
    IncorrectPassword(PostId),
    InvalidPage(PageError),
    Repo(RepoError),
}

impl PostServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PostNotFound(_) => ErrorKind::NotFound,
            Self::IncorrectPassword(_) => ErrorKind::Forbidden,
            Self::InvalidPage(_) => ErrorKind::BadRequest,
            Self::Repo(_) => ErrorKind::StorageUnavailable,
        }
    }
}

impl Display for PostServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PostNotFound(_) => write!(f, "post not found"),
            Self::IncorrectPassword(_) => write!(f, "incorrect password"),
            Self::InvalidPage(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PostServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPage(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for PostServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::PostNotFound(id) => Self::PostNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<PageError> for PostServiceError {
    fn from(value: PageError) -> Self {
        Self::InvalidPage(value)
    }
}

/// Publish request for a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    pub author: String,
    pub password: String,
}

/// Listing query for posts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub page: u32,
    pub limit: u32,
    pub author: Option<String>,
    pub title: Option<String>,
}

/// Post service facade over repository and alert dispatcher.
pub struct PostService<R: PostRepository, K: KeywordRegistry> {
    repo: R,
    alerts: AlertDispatcher<K>,
}

impl<R: PostRepository, K: KeywordRegistry> PostService<R, K> {
    pub fn new(repo: R, alerts: AlertDispatcher<K>) -> Self {
        Self { repo, alerts }
    }

    /// Publishes a post, then alerts keyword owners about its content.
    pub fn create(&self, request: CreatePost) -> Result<Post, PostServiceError> {
        let new_post = NewPost {
            title: request.title,
            content: request.content,
            author: request.author,
            password_hash: PasswordHash::from_plaintext(&request.password),
        };
        let saved = self.repo.save_post(&new_post)?;
        info!(
            "event=post_create module=service status=ok post_id={}",
            saved.id
        );

        self.alerts.dispatch(&saved.content, &saved.author);
        Ok(saved)
    }

    /// Loads one post.
    pub fn get(&self, id: PostId) -> Result<Post, PostServiceError> {
        self.get_post_or_fail(id)
    }

    /// Lists posts newest first with optional author/title filters.
    pub fn read(&self, query: PostQuery) -> Result<Page<Post>, PostServiceError> {
        let page = PageRequest::new(query.page, query.limit)?;
        let filter = PostFilter {
            page,
            author: query.author,
            title: query.title,
        };
        let (items, total) = self.repo.find_posts_by_filter(&filter)?;
        Ok(Page::new(page, total, items))
    }

    /// Replaces title and content when `password` matches.
    pub fn update(
        &self,
        id: PostId,
        title: impl Into<String>,
        content: impl Into<String>,
        password: &str,
    ) -> Result<Post, PostServiceError> {
        let post = self.get_post_or_fail(id)?;
        self.ensure_password(&post, password)?;

        let title = title.into();
        let content = content.into();
        let saved = self.repo.update_post(post.id, &title, &content)?;
        info!(
            "event=post_update module=service status=ok post_id={}",
            saved.id
        );

        self.alerts.dispatch(&saved.content, &post.author);
        Ok(saved)
    }

    /// Removes a post and, by cascade, its comments when `password` matches.
    pub fn delete(&self, id: PostId, password: &str) -> Result<(), PostServiceError> {
        let post = self.get_post_or_fail(id)?;
        self.ensure_password(&post, password)?;

        self.repo.remove_post(post.id)?;
        info!("event=post_delete module=service status=ok post_id={id}");
        Ok(())
    }

    fn get_post_or_fail(&self, id: PostId) -> Result<Post, PostServiceError> {
        self.repo.find_post_by_id(id)?.ok_or_else(|| {
            warn!("event=post_lookup module=service status=not_found post_id={id}");
            PostServiceError::PostNotFound(id)
        })
    }

    fn ensure_password(&self, post: &Post, password: &str) -> Result<(), PostServiceError> {
        if post.password_hash.verify(password) {
            return Ok(());
        }
        warn!(
            "event=post_auth module=service status=rejected post_id={}",
            post.id
        );
        Err(PostServiceError::IncorrectPassword(post.id))
    }
}
