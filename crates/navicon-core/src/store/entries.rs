//! Catalog entry operations: add, list, icon assignment, remove.

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::db::{unix_timestamp, Store};
use super::types::{CatalogEntry, EntryId};
use crate::favicon::IconResult;

const ENTRY_COLUMNS: &str = "id, title, url, icon, icon_id, created_at, updated_at";

fn entry_from_row(row: &SqliteRow) -> CatalogEntry {
    CatalogEntry {
        id: row.get("id"),
        title: row.get("title"),
        url: row.get("url"),
        icon: row.get("icon"),
        icon_id: row.get("icon_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl Store {
    /// Insert a new catalog entry without an icon.
    pub async fn add_entry(&self, title: &str, url: &str) -> Result<EntryId> {
        let now = unix_timestamp();
        let row_id = sqlx::query(
            r#"
            INSERT INTO navigations (title, url, icon, icon_id, created_at, updated_at)
            VALUES (?1, ?2, NULL, NULL, ?3, ?4)
            "#,
        )
        .bind(title)
        .bind(url)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(row_id)
    }

    /// List all entries, newest first.
    pub async fn list_entries(&self) -> Result<Vec<CatalogEntry>> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM navigations ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(entry_from_row).collect())
    }

    pub async fn get_entry(&self, id: EntryId) -> Result<Option<CatalogEntry>> {
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM navigations WHERE id = ?1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(entry_from_row))
    }

    /// Entries lacking an icon reference (NULL/empty `icon` or NULL `icon_id`),
    /// oldest first, at most `limit`.
    pub async fn list_entries_missing_icon(&self, limit: u32) -> Result<Vec<CatalogEntry>> {
        let sql = format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM navigations
            WHERE icon IS NULL OR icon = '' OR icon_id IS NULL
            ORDER BY id ASC
            LIMIT ?1
            "#
        );
        let rows = sqlx::query(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(entry_from_row).collect())
    }

    /// Point an entry at a resolved icon.
    pub async fn set_entry_icon(&self, id: EntryId, icon: &IconResult) -> Result<()> {
        let now = unix_timestamp();
        let r = sqlx::query(
            r#"
            UPDATE navigations
            SET icon = ?1,
                icon_id = ?2,
                updated_at = ?3
            WHERE id = ?4
            "#,
        )
        .bind(&icon.retrieval_url)
        .bind(icon.id)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if r.rows_affected() == 0 {
            anyhow::bail!("no catalog entry with id {id}");
        }
        Ok(())
    }

    /// Permanently remove an entry. Returns false if it did not exist.
    ///
    /// The icon blob it referenced stays in place.
    pub async fn remove_entry(&self, id: EntryId) -> Result<bool> {
        let r = sqlx::query(
            r#"
            DELETE FROM navigations
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(r.rows_affected() > 0)
    }
}
