//! `navicon resolve <url>` – resolve one page's icon, optionally attaching it to an entry.

use anyhow::Result;
use navicon_core::config::NaviconConfig;
use navicon_core::favicon::{ResolveOptions, Resolver};
use navicon_core::http::HttpClient;
use navicon_core::store::Store;

pub async fn run_resolve(
    store: &Store,
    cfg: &NaviconConfig,
    url: &str,
    entry: Option<i64>,
) -> Result<()> {
    if let Some(id) = entry {
        if store.get_entry(id).await?.is_none() {
            anyhow::bail!("no catalog entry with id {id}");
        }
    }

    let resolver = Resolver::new(
        HttpClient::from_config(cfg),
        store.clone(),
        ResolveOptions::from_config(cfg),
    );

    let Some(icon) = resolver.resolve(url).await? else {
        println!("No usable icon found for {url}");
        return Ok(());
    };

    println!("Stored icon {} for {url}: {}", icon.id, icon.retrieval_url);
    if let Some(id) = entry {
        store.set_entry_icon(id, &icon).await?;
        println!("Attached icon {} to entry {id}", icon.id);
    }
    Ok(())
}
