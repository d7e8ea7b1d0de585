//! Icon blob operations: insert and fetch.

use anyhow::Result;
use sqlx::Row;

use super::db::{unix_timestamp, Store};
use super::types::{IconBlob, IconId};
use crate::checksum::sha256_hex;
use crate::favicon::IconSink;

impl Store {
    /// Insert a new icon blob and return its id.
    pub async fn insert_icon(&self, data: &[u8], mime_type: &str) -> Result<IconId> {
        let now = unix_timestamp();
        let digest = sha256_hex(data);

        let row_id = sqlx::query(
            r#"
            INSERT INTO icons (data, mime_type, sha256, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(data)
        .bind(mime_type)
        .bind(digest)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(row_id)
    }

    /// Fetch a stored icon by id.
    pub async fn get_icon(&self, id: IconId) -> Result<Option<IconBlob>> {
        let row = sqlx::query(
            r#"
            SELECT id, data, mime_type, sha256, created_at
            FROM icons
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(IconBlob {
            id: row.get("id"),
            data: row.get("data"),
            mime_type: row.get("mime_type"),
            sha256: row.get("sha256"),
            created_at: row.get("created_at"),
        }))
    }

    /// Number of stored icon blobs.
    pub async fn count_icons(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM icons")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }
}

impl IconSink for Store {
    async fn save_icon(&self, data: &[u8], mime_type: &str) -> Result<IconId> {
        self.insert_icon(data, mime_type).await
    }
}
