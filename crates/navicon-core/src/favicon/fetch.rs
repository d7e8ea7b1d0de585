//! Downloads a single candidate icon.

use super::mime::icon_mime_type;
use super::FetchedIcon;
use crate::http::{classify, PageFetcher};

/// Downloads `candidate` and returns its bytes and MIME type.
///
/// Network errors, non-2xx statuses and bodies smaller than `min_bytes`
/// all come back as `None`.
pub fn fetch_icon<F: PageFetcher + ?Sized>(
    fetcher: &F,
    candidate: &str,
    min_bytes: usize,
) -> Option<FetchedIcon> {
    let response = match fetcher.get(candidate) {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!(
                candidate = %candidate,
                kind = classify(&e).as_str(),
                "icon fetch failed: {}",
                e
            );
            return None;
        }
    };

    let mime_type = icon_mime_type(response.headers.content_type(), candidate);

    if response.body.len() < min_bytes {
        tracing::warn!(
            candidate = %candidate,
            bytes = response.body.len(),
            "downloaded icon is too small"
        );
        return None;
    }

    Some(FetchedIcon {
        data: response.body,
        mime_type,
    })
}
