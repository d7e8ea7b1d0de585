//! `navicon list` – show catalog entries.

use anyhow::Result;
use navicon_core::store::Store;

pub async fn run_list(store: &Store) -> Result<()> {
    let entries = store.list_entries().await?;
    if entries.is_empty() {
        println!("No entries in catalog.");
        return Ok(());
    }
    println!("{:<6} {:<8} {:<24} {}", "ID", "ICON", "TITLE", "URL");
    for e in entries {
        let icon = match (e.lacks_icon(), e.icon_id) {
            (false, Some(id)) => id.to_string(),
            _ => "-".to_string(),
        };
        println!("{:<6} {:<8} {:<24} {}", e.id, icon, e.title, e.url);
    }
    Ok(())
}
