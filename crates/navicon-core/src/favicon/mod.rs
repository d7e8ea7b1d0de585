//! Favicon resolution pipeline.
//!
//! Given a page URL: build an ordered list of candidate icon URLs, download
//! them one at a time until one yields a plausible image, persist that image
//! through an [`IconSink`] and report where it can be retrieved.

mod candidates;
mod fetch;
mod mime;
mod resolve;

pub use candidates::{candidate_urls, normalize_href, page_origin};
pub use fetch::fetch_icon;
pub use mime::{icon_mime_type, mime_from_extension, FALLBACK_MIME};
pub use resolve::{IconSink, ResolveOptions, Resolver};

use serde::Serialize;

use crate::store::IconId;

/// Icon payload downloaded from a candidate URL.
#[derive(Debug, Clone)]
pub struct FetchedIcon {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// Outcome of a successful resolution: the stored blob id and the path it is
/// served from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconResult {
    #[serde(rename = "iconId")]
    pub id: IconId,
    #[serde(rename = "iconUrl")]
    pub retrieval_url: String,
}
