//! `navicon export-icon <id> <path>` – write a stored icon to disk.

use anyhow::{Context, Result};
use navicon_core::store::Store;
use std::path::Path;

pub async fn run_export_icon(store: &Store, id: i64, path: &Path) -> Result<()> {
    let icon = store
        .get_icon(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no icon with id {id}"))?;
    tokio::fs::write(path, &icon.data)
        .await
        .with_context(|| format!("write {}", path.display()))?;
    println!(
        "Wrote icon {id} ({}, {} bytes) to {}",
        icon.mime_type,
        icon.data.len(),
        path.display()
    );
    Ok(())
}
