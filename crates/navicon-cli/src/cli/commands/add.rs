//! `navicon add <title> <url>` – add a catalog entry.

use anyhow::{Context, Result};
use navicon_core::store::Store;

pub async fn run_add(store: &Store, title: &str, url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("invalid URL: {url}"))?;
    let id = store.add_entry(title, url).await?;
    println!("Added entry {id}: {title} ({url})");
    Ok(())
}
