//! `navicon update` – run the icon batch over entries missing an icon.

use anyhow::Result;
use navicon_core::batch::{run_batch, BatchOptions};
use navicon_core::config::NaviconConfig;
use navicon_core::favicon::{ResolveOptions, Resolver};
use navicon_core::http::HttpClient;
use navicon_core::store::Store;

pub async fn run_update(
    store: &Store,
    cfg: &NaviconConfig,
    limit: Option<u32>,
    json: bool,
) -> Result<()> {
    let mut opts = BatchOptions::from_config(cfg);
    if let Some(limit) = limit {
        opts.limit = limit;
    }
    let resolver = Resolver::new(
        HttpClient::from_config(cfg),
        store.clone(),
        ResolveOptions::from_config(cfg),
    );

    let summary = run_batch(store, &resolver, &opts).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if summary.total == 0 {
        println!("No entries need an icon.");
        return Ok(());
    }
    for r in &summary.results {
        match (&r.icon_url, &r.error) {
            (Some(url), _) if r.success => println!("  ok    {:<6} {} -> {}", r.id, r.title, url),
            (_, Some(err)) => println!("  fail  {:<6} {}: {}", r.id, r.title, err),
            _ => println!("  fail  {:<6} {}", r.id, r.title),
        }
    }
    println!(
        "Processed {}: {} updated, {} failed",
        summary.total, summary.updated, summary.failed
    );
    Ok(())
}
