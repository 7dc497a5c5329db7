//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the persistence boundary consumed by board services.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`PostNotFound`,
//!   `CommentNotFound`) in addition to DB transport errors.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::alert::AlertId;
use crate::model::comment::CommentId;
use crate::model::post::PostId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod alert_repo;
pub mod comment_repo;
pub mod post_repo;
mod schema;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error shared by post, comment and keyword-alert repositories.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    PostNotFound(PostId),
    CommentNotFound(CommentId),
    AlertNotFound(AlertId),
    /// Connection has not been migrated to the board schema.
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted row cannot be converted into a valid domain record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::PostNotFound(id) => write!(f, "post not found: {id}"),
            Self::CommentNotFound(id) => write!(f, "comment not found: {id}"),
            Self::AlertNotFound(id) => write!(f, "keyword alert not found: {id}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "board repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "board repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted board data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
