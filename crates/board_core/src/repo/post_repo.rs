//! Post repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide post CRUD and filtered listing over the `posts` table.
//! - Keep title full-text matching (`posts_fts`) inside the persistence
//!   boundary.
//!
//! # Invariants
//! - Listing is ordered `created_at DESC, id DESC`.
//! - `total` counts every row matching the filters, ignoring pagination.
//! - Removing a post removes its comments through the FK cascade.

use crate::db::NOW_EPOCH_MS_SQL;
use crate::model::credential::PasswordHash;
use crate::model::post::{NewPost, Post, PostId};
use crate::pagination::PageRequest;
use crate::repo::schema::ensure_table_ready;
use crate::repo::{RepoError, RepoResult};
use crate::search::fts::{title_match, TitleMatch};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const POST_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    author,
    password_hash,
    created_at,
    updated_at
FROM posts";

const POST_COLUMNS: &[&str] = &[
    "id",
    "title",
    "content",
    "author",
    "password_hash",
    "created_at",
    "updated_at",
];

/// Filter and paging options for post listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub page: PageRequest,
    /// Exact author match.
    pub author: Option<String>,
    /// Full-text match against the title.
    pub title: Option<String>,
}

/// Persistence boundary for posts.
pub trait PostRepository {
    fn find_post_by_id(&self, id: PostId) -> RepoResult<Option<Post>>;
    /// Inserts a post and returns the stored row.
    fn save_post(&self, post: &NewPost) -> RepoResult<Post>;
    /// Overwrites title/content and bumps `updated_at`.
    fn update_post(&self, id: PostId, title: &str, content: &str) -> RepoResult<Post>;
    fn remove_post(&self, id: PostId) -> RepoResult<()>;
    /// Returns one page of matching posts plus the total match count.
    fn find_posts_by_filter(&self, filter: &PostFilter) -> RepoResult<(Vec<Post>, u64)>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "posts", POST_COLUMNS)?;
        ensure_table_ready(conn, "posts_fts", &["title"])?;
        Ok(Self { conn })
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn find_post_by_id(&self, id: PostId) -> RepoResult<Option<Post>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_post_row(row)?)),
            None => Ok(None),
        }
    }

    fn save_post(&self, post: &NewPost) -> RepoResult<Post> {
        self.conn.execute(
            "INSERT INTO posts (title, content, author, password_hash)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                post.title.as_str(),
                post.content.as_str(),
                post.author.as_str(),
                post.password_hash.as_str(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        self.find_post_by_id(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("inserted post {id} missing in read-back"))
        })
    }

    fn update_post(&self, id: PostId, title: &str, content: &str) -> RepoResult<Post> {
        let changed = self.conn.execute(
            &format!(
                "UPDATE posts
                 SET
                    title = ?2,
                    content = ?3,
                    updated_at = {NOW_EPOCH_MS_SQL}
                 WHERE id = ?1;"
            ),
            params![id, title, content],
        )?;

        if changed == 0 {
            return Err(RepoError::PostNotFound(id));
        }

        self.find_post_by_id(id)?
            .ok_or(RepoError::PostNotFound(id))
    }

    fn remove_post(&self, id: PostId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM posts WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::PostNotFound(id));
        }
        Ok(())
    }

    fn find_posts_by_filter(&self, filter: &PostFilter) -> RepoResult<(Vec<Post>, u64)> {
        let mut where_sql = String::from(" WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(author) = filter.author.as_ref() {
            where_sql.push_str(" AND author = ?");
            bind_values.push(Value::Text(author.clone()));
        }

        if let Some(title) = filter.title.as_deref() {
            match title_match(title) {
                TitleMatch::Any => {}
                TitleMatch::Expression(expr) => {
                    where_sql.push_str(
                        " AND id IN (SELECT rowid FROM posts_fts WHERE posts_fts MATCH ?)",
                    );
                    bind_values.push(Value::Text(expr));
                }
                TitleMatch::Nothing => return Ok((Vec::new(), 0)),
            }
        }

        let total: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM posts{where_sql};"),
            params_from_iter(bind_values.iter()),
            |row| row.get(0),
        )?;

        let mut list_values = bind_values;
        list_values.push(Value::Integer(i64::from(filter.page.limit())));
        list_values.push(Value::Integer(skip_as_i64(&filter.page)?));

        let mut stmt = self.conn.prepare(&format!(
            "{POST_SELECT_SQL}{where_sql} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?;"
        ))?;
        let mut rows = stmt.query(params_from_iter(list_values))?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }

        Ok((posts, count_to_u64(total)?))
    }
}

/// Checks whether a post row exists. Shared with the comment repository.
pub(crate) fn post_exists(conn: &Connection, id: PostId) -> RepoResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM posts WHERE id = ?1;", [id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

pub(crate) fn skip_as_i64(page: &PageRequest) -> RepoResult<i64> {
    i64::try_from(page.skip())
        .map_err(|_| RepoError::InvalidData(format!("page offset {} out of range", page.skip())))
}

pub(crate) fn count_to_u64(count: i64) -> RepoResult<u64> {
    u64::try_from(count).map_err(|_| RepoError::InvalidData(format!("negative row count {count}")))
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let id: PostId = row.get("id")?;
    let stored_hash: String = row.get("password_hash")?;
    let password_hash = PasswordHash::from_stored(stored_hash).ok_or_else(|| {
        RepoError::InvalidData(format!("malformed password hash in posts.password_hash for post {id}"))
    })?;

    Ok(Post {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
        author: row.get("author")?,
        password_hash,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
