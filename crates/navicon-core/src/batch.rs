//! Batch icon maintenance over catalog entries that lack an icon.
//!
//! Entries are processed strictly one after another with a fixed pause in
//! between, so a run never hammers the target sites. A failing entry is
//! recorded and the run moves on.

use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Duration;

use crate::config::NaviconConfig;
use crate::favicon::{IconResult, IconSink, Resolver};
use crate::http::PageFetcher;
use crate::store::{CatalogEntry, EntryId, Store};

/// Error text recorded for entries where no candidate yielded an icon.
pub const NO_ICON_FOUND: &str = "no usable icon found";

#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum number of entries selected for one run.
    pub limit: u32,
    /// Pause between consecutive entries.
    pub delay: Duration,
}

impl BatchOptions {
    pub fn from_config(cfg: &NaviconConfig) -> Self {
        Self {
            limit: cfg.batch_limit,
            delay: cfg.batch_delay(),
        }
    }
}

/// Per-entry outcome.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    pub id: EntryId,
    pub title: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub updated: usize,
    pub failed: usize,
    pub results: Vec<BatchItemResult>,
}

impl BatchSummary {
    fn record(&mut self, item: BatchItemResult) {
        self.total += 1;
        if item.success {
            self.updated += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(item);
    }
}

/// Resolves icons for up to `opts.limit` entries missing one.
///
/// Only the initial selection query can fail the run; per-entry failures
/// (including store errors while saving) end up in the summary.
pub async fn run_batch<F, S>(
    store: &Store,
    resolver: &Resolver<F, S>,
    opts: &BatchOptions,
) -> Result<BatchSummary>
where
    F: PageFetcher,
    S: IconSink,
{
    let entries = store
        .list_entries_missing_icon(opts.limit)
        .await
        .context("select entries missing an icon")?;
    tracing::info!(count = entries.len(), "entries need an icon");

    let mut summary = BatchSummary::default();
    let last = entries.len().saturating_sub(1);

    for (i, entry) in entries.into_iter().enumerate() {
        tracing::debug!(entry_id = entry.id, url = %entry.url, "processing {}", entry.title);

        let item = match update_entry(store, resolver, &entry).await {
            Ok(icon) => {
                tracing::info!(entry_id = entry.id, "updated icon for {}", entry.title);
                BatchItemResult {
                    id: entry.id,
                    title: entry.title,
                    success: true,
                    icon_url: Some(icon.retrieval_url),
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(entry_id = entry.id, "icon update for {} failed: {:#}", entry.title, e);
                BatchItemResult {
                    id: entry.id,
                    title: entry.title,
                    success: false,
                    icon_url: None,
                    error: Some(format!("{e:#}")),
                }
            }
        };
        summary.record(item);

        if i < last && !opts.delay.is_zero() {
            tokio::time::sleep(opts.delay).await;
        }
    }

    tracing::info!(
        total = summary.total,
        updated = summary.updated,
        failed = summary.failed,
        "icon batch finished"
    );
    Ok(summary)
}

async fn update_entry<F, S>(
    store: &Store,
    resolver: &Resolver<F, S>,
    entry: &CatalogEntry,
) -> Result<IconResult>
where
    F: PageFetcher,
    S: IconSink,
{
    let icon = resolver
        .resolve(&entry.url)
        .await?
        .ok_or_else(|| anyhow::anyhow!(NO_ICON_FOUND))?;
    store.set_entry_icon(entry.id, &icon).await?;
    Ok(icon)
}
