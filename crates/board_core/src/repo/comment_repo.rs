//! Comment repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide comment create/lookup/soft-delete and per-post listing.
//! - Answer post existence checks so comment services need no post repo.
//!
//! # Invariants
//! - Rows are never physically deleted here; `deleted_at` is the tombstone.
//! - Soft delete keeps the first deletion timestamp.
//! - Per-post listing includes tombstoned rows, ordered
//!   `created_at DESC, id DESC`.

use crate::db::NOW_EPOCH_MS_SQL;
use crate::model::comment::{Comment, CommentId, CommentState, NewComment};
use crate::model::post::PostId;
use crate::pagination::PageRequest;
use crate::repo::post_repo::{count_to_u64, post_exists, skip_as_i64};
use crate::repo::schema::ensure_table_ready;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const COMMENT_SELECT_SQL: &str = "SELECT
    id,
    post_id,
    parent_comment_id,
    content,
    author,
    created_at,
    deleted_at
FROM comments";

const COMMENT_COLUMNS: &[&str] = &[
    "id",
    "post_id",
    "parent_comment_id",
    "content",
    "author",
    "created_at",
    "deleted_at",
];

/// Persistence boundary for comments.
pub trait CommentRepository {
    /// Returns whether the post exists.
    fn post_exists(&self, post_id: PostId) -> RepoResult<bool>;
    /// Loads a comment regardless of its deletion state.
    fn find_comment_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>>;
    /// Inserts a comment and returns the stored row.
    fn save_comment(&self, comment: &NewComment) -> RepoResult<Comment>;
    /// Tombstones a comment and returns the updated row.
    fn soft_delete_comment(&self, id: CommentId) -> RepoResult<Comment>;
    /// Returns one page of the post's comments plus their total count.
    fn find_comments_by_post(
        &self,
        post_id: PostId,
        page: &PageRequest,
    ) -> RepoResult<(Vec<Comment>, u64)>;
}

/// SQLite-backed comment repository.
pub struct SqliteCommentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCommentRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "posts", &["id"])?;
        ensure_table_ready(conn, "comments", COMMENT_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl CommentRepository for SqliteCommentRepository<'_> {
    fn post_exists(&self, post_id: PostId) -> RepoResult<bool> {
        post_exists(self.conn, post_id)
    }

    fn find_comment_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMMENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_comment_row(row)?)),
            None => Ok(None),
        }
    }

    fn save_comment(&self, comment: &NewComment) -> RepoResult<Comment> {
        self.conn.execute(
            "INSERT INTO comments (post_id, parent_comment_id, content, author)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                comment.post_id,
                comment.parent_comment_id,
                comment.content.as_str(),
                comment.author.as_str(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        self.find_comment_by_id(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("inserted comment {id} missing in read-back"))
        })
    }

    fn soft_delete_comment(&self, id: CommentId) -> RepoResult<Comment> {
        let changed = self.conn.execute(
            &format!(
                "UPDATE comments
                 SET deleted_at = COALESCE(deleted_at, {NOW_EPOCH_MS_SQL})
                 WHERE id = ?1;"
            ),
            [id],
        )?;

        if changed == 0 {
            return Err(RepoError::CommentNotFound(id));
        }

        self.find_comment_by_id(id)?
            .ok_or(RepoError::CommentNotFound(id))
    }

    fn find_comments_by_post(
        &self,
        post_id: PostId,
        page: &PageRequest,
    ) -> RepoResult<(Vec<Comment>, u64)> {
        let total: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM comments WHERE post_id = ?1;",
            [post_id],
            |row| row.get(0),
        )?;

        let mut stmt = self.conn.prepare(&format!(
            "{COMMENT_SELECT_SQL}
             WHERE post_id = ?1
             ORDER BY created_at DESC, id DESC
             LIMIT ?2 OFFSET ?3;"
        ))?;
        let mut rows = stmt.query(params![
            post_id,
            i64::from(page.limit()),
            skip_as_i64(page)?
        ])?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next()? {
            comments.push(parse_comment_row(row)?);
        }

        Ok((comments, count_to_u64(total)?))
    }
}

fn parse_comment_row(row: &Row<'_>) -> RepoResult<Comment> {
    Ok(Comment {
        id: row.get("id")?,
        post_id: row.get("post_id")?,
        parent_comment_id: row.get("parent_comment_id")?,
        content: row.get("content")?,
        author: row.get("author")?,
        created_at: row.get("created_at")?,
        state: CommentState::from_deleted_at(row.get("deleted_at")?),
    })
}
