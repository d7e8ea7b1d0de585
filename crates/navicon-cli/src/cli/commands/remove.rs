//! `navicon remove <id>` – remove a catalog entry.

use anyhow::Result;
use navicon_core::store::Store;

pub async fn run_remove(store: &Store, id: i64) -> Result<()> {
    if !store.remove_entry(id).await? {
        anyhow::bail!("no catalog entry with id {id}");
    }
    println!("Removed entry {id}");
    Ok(())
}
