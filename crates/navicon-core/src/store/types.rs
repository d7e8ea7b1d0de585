//! Types used by the icon/catalog store.

use serde::Serialize;

/// Icon blob identifier.
pub type IconId = i64;

/// Catalog entry identifier.
pub type EntryId = i64;

/// Stored icon payload.
#[derive(Debug, Clone)]
pub struct IconBlob {
    pub id: IconId,
    pub data: Vec<u8>,
    pub mime_type: String,
    /// Lowercase hex SHA-256 of `data`.
    pub sha256: String,
    pub created_at: i64,
}

/// A bookmarked site in the catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: EntryId,
    pub title: String,
    pub url: String,
    /// Retrieval URL of the entry's icon, if any.
    pub icon: Option<String>,
    pub icon_id: Option<IconId>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl CatalogEntry {
    /// True when the batch driver should try to resolve an icon for this entry.
    pub fn lacks_icon(&self) -> bool {
        self.icon.as_deref().map_or(true, str::is_empty) || self.icon_id.is_none()
    }
}
