//! Top-level resolution: candidates -> first usable icon -> persisted blob.

use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;

use super::candidates::candidate_urls;
use super::fetch::fetch_icon;
use super::{FetchedIcon, IconResult};
use crate::config::NaviconConfig;
use crate::http::PageFetcher;
use crate::store::IconId;

/// Destination for resolved icon payloads.
///
/// Implemented by [`crate::store::Store`]. Errors from the sink are the only
/// failures that escape [`Resolver::resolve`].
pub trait IconSink: Send + Sync {
    fn save_icon(
        &self,
        data: &[u8],
        mime_type: &str,
    ) -> impl Future<Output = Result<IconId>> + Send;
}

/// Resolution tunables derived from [`NaviconConfig`].
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Bodies below this many bytes are rejected.
    pub min_icon_bytes: usize,
    /// Prefix of the retrieval URL; the blob id is appended as a path segment.
    pub icon_route: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self::from_config(&NaviconConfig::default())
    }
}

impl ResolveOptions {
    pub fn from_config(cfg: &NaviconConfig) -> Self {
        Self {
            min_icon_bytes: cfg.min_icon_bytes,
            icon_route: cfg.icon_route().to_string(),
        }
    }

    pub fn retrieval_url(&self, id: IconId) -> String {
        format!("{}/{}", self.icon_route, id)
    }
}

/// Resolves and persists site icons.
///
/// Single best-effort pass per call: no retries, no caching. Resolving the
/// same page twice stores two blobs.
pub struct Resolver<F, S> {
    fetcher: Arc<F>,
    sink: S,
    opts: ResolveOptions,
}

impl<F, S> Resolver<F, S>
where
    F: PageFetcher,
    S: IconSink,
{
    pub fn new(fetcher: F, sink: S, opts: ResolveOptions) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            sink,
            opts,
        }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.opts
    }

    /// Finds, downloads and stores an icon for `page_url`.
    ///
    /// Returns `Ok(None)` when no candidate produced a usable icon. Network
    /// trouble never surfaces as an error; a failing sink does.
    pub async fn resolve(&self, page_url: &str) -> Result<Option<IconResult>> {
        let Some((candidate, icon)) = self.find_icon(page_url).await? else {
            tracing::warn!(url = %page_url, "failed to download any icon");
            return Ok(None);
        };

        let id = self
            .sink
            .save_icon(&icon.data, &icon.mime_type)
            .await
            .with_context(|| format!("store icon downloaded from {candidate}"))?;

        tracing::info!(
            url = %page_url,
            candidate = %candidate,
            icon_id = id,
            bytes = icon.data.len(),
            mime = %icon.mime_type,
            "saved icon"
        );

        Ok(Some(IconResult {
            id,
            retrieval_url: self.opts.retrieval_url(id),
        }))
    }

    /// Runs candidate extraction and the download cascade on the blocking pool.
    async fn find_icon(&self, page_url: &str) -> Result<Option<(String, FetchedIcon)>> {
        let fetcher = Arc::clone(&self.fetcher);
        let page_url = page_url.to_string();
        let min_bytes = self.opts.min_icon_bytes;

        let found = tokio::task::spawn_blocking(move || {
            let candidates = candidate_urls(fetcher.as_ref(), &page_url);
            if candidates.is_empty() {
                tracing::warn!(url = %page_url, "no icon URLs found");
            }
            candidates.into_iter().find_map(|candidate| {
                fetch_icon(fetcher.as_ref(), &candidate, min_bytes).map(|icon| (candidate, icon))
            })
        })
        .await
        .context("icon download task panicked")?;

        Ok(found)
    }
}
