//! Keyword registry contract and SQLite implementation.
//!
//! # Responsibility
//! - Expose every registered (owner, keyword) watch to the dispatcher.
//! - Offer owner-management helpers for tooling; board services only read.
//!
//! # Invariants
//! - No uniqueness: duplicate (owner, keyword) rows are legal and independent.
//! - `all_alerts` returns rows in insertion (`id ASC`) order.

use crate::model::alert::{AlertId, KeywordAlert};
use crate::repo::schema::ensure_table_ready;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

/// Read-only view of registered keyword watches.
pub trait KeywordRegistry {
    fn all_alerts(&self) -> RepoResult<Vec<KeywordAlert>>;
}

impl<T: KeywordRegistry + ?Sized> KeywordRegistry for &T {
    fn all_alerts(&self) -> RepoResult<Vec<KeywordAlert>> {
        (**self).all_alerts()
    }
}

impl KeywordRegistry for Vec<KeywordAlert> {
    fn all_alerts(&self) -> RepoResult<Vec<KeywordAlert>> {
        Ok(self.clone())
    }
}

/// SQLite-backed keyword registry.
pub struct SqliteKeywordRegistry<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeywordRegistry<'conn> {
    /// Constructs a registry from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "keyword_alerts", &["id", "owner", "keyword"])?;
        Ok(Self { conn })
    }

    /// Registers a new watch and returns it.
    pub fn register_alert(&self, owner: &str, keyword: &str) -> RepoResult<KeywordAlert> {
        self.conn.execute(
            "INSERT INTO keyword_alerts (owner, keyword) VALUES (?1, ?2);",
            params![owner, keyword],
        )?;
        Ok(KeywordAlert {
            id: self.conn.last_insert_rowid(),
            owner: owner.to_string(),
            keyword: keyword.to_string(),
        })
    }

    /// Removes one watch by id.
    pub fn remove_alert(&self, id: AlertId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM keyword_alerts WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::AlertNotFound(id));
        }
        Ok(())
    }

    /// Lists watches of one owner in insertion order.
    pub fn alerts_for_owner(&self, owner: &str) -> RepoResult<Vec<KeywordAlert>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner, keyword
             FROM keyword_alerts
             WHERE owner = ?1
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([owner])?;
        collect_alerts(&mut rows)
    }
}

impl KeywordRegistry for SqliteKeywordRegistry<'_> {
    fn all_alerts(&self) -> RepoResult<Vec<KeywordAlert>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, owner, keyword FROM keyword_alerts ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        collect_alerts(&mut rows)
    }
}

fn collect_alerts(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<KeywordAlert>> {
    let mut alerts = Vec::new();
    while let Some(row) = rows.next()? {
        alerts.push(parse_alert_row(row)?);
    }
    Ok(alerts)
}

fn parse_alert_row(row: &Row<'_>) -> RepoResult<KeywordAlert> {
    Ok(KeywordAlert {
        id: row.get("id")?,
        owner: row.get("owner")?,
        keyword: row.get("keyword")?,
    })
}
