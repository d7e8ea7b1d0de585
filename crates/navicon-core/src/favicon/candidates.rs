//! Candidate icon URLs for a page: the conventional `/favicon.ico` first,
//! then whatever `<link rel=...>` icons the page markup declares.

use lol_html::{element, HtmlRewriter, Settings};

use crate::http::{classify, PageFetcher};

/// `rel` values that declare an icon, highest priority first.
const ICON_RELS: [&str; 4] = [
    "icon",
    "shortcut icon",
    "apple-touch-icon",
    "apple-touch-icon-precomposed",
];

/// Builds the ordered candidate list for `page_url`.
///
/// Never fails: a malformed URL yields an empty list, and a page that cannot
/// be fetched or parsed yields just the conventional favicon.
pub fn candidate_urls<F: PageFetcher + ?Sized>(fetcher: &F, page_url: &str) -> Vec<String> {
    let Some(origin) = page_origin(page_url) else {
        tracing::warn!(url = %page_url, "cannot derive origin; no icon candidates");
        return Vec::new();
    };

    let mut candidates = vec![format!("{origin}/favicon.ico")];

    let response = match fetcher.get(page_url) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(
                url = %page_url,
                kind = classify(&e).as_str(),
                "failed to fetch page markup: {}",
                e
            );
            return candidates;
        }
    };

    for href in icon_hrefs(&response.body, page_url) {
        let url = normalize_href(&origin, &href);
        if !candidates.contains(&url) {
            candidates.push(url);
        }
    }

    tracing::debug!(url = %page_url, count = candidates.len(), "icon candidates");
    candidates
}

/// `scheme://host[:port]` of an absolute http(s) URL.
pub fn page_origin(page_url: &str) -> Option<String> {
    let parsed = url::Url::parse(page_url).ok()?;
    let origin = parsed.origin();
    if !origin.is_tuple() {
        return None;
    }
    Some(origin.ascii_serialization())
}

/// Turns a `<link href>` into an absolute URL against `origin`.
pub fn normalize_href(origin: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else if href.starts_with("//") {
        format!("https:{href}")
    } else if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        format!("{origin}/{href}")
    }
}

fn rel_rank(rel: &str) -> Option<usize> {
    let rel = rel.trim();
    ICON_RELS.iter().position(|r| r.eq_ignore_ascii_case(rel))
}

/// Extracts icon `href`s from HTML, ordered by rel priority and then by
/// document order.
///
/// A parse error stops extraction but keeps the hrefs seen before it.
pub(crate) fn icon_hrefs(html: &[u8], page_url: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = Vec::new();

    let outcome = {
        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![element!("link[rel][href]", |el| {
                    let rank = el.get_attribute("rel").as_deref().and_then(rel_rank);
                    if let (Some(rank), Some(href)) = (rank, el.get_attribute("href")) {
                        let href = href.trim().to_string();
                        if !href.is_empty() {
                            found.push((rank, href));
                        }
                    }
                    Ok(())
                })],
                // Real-world markup is often ambiguous; don't bail on it.
                strict: false,
                ..Settings::default()
            },
            |_: &[u8]| {},
        );
        match rewriter.write(html) {
            Ok(()) => rewriter.end(),
            Err(e) => Err(e),
        }
    };

    if let Err(e) = outcome {
        tracing::warn!(
            url = %page_url,
            kept = found.len(),
            "failed to parse page markup: {}",
            e
        );
    }

    // Stable sort keeps document order within each rel.
    found.sort_by_key(|(rank, _)| *rank);
    found.into_iter().map(|(_, href)| href).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{FetchError, HttpResponse, ResponseHeaders};

    struct CannedPage(Result<&'static str, u32>);

    impl PageFetcher for CannedPage {
        fn get(&self, _url: &str) -> Result<HttpResponse, FetchError> {
            match self.0 {
                Ok(html) => Ok(HttpResponse {
                    status: 200,
                    headers: ResponseHeaders::default(),
                    body: html.as_bytes().to_vec(),
                }),
                Err(code) => Err(FetchError::Http(code)),
            }
        }
    }

    #[test]
    fn root_relative_icon_follows_conventional_favicon() {
        let page = CannedPage(Ok(r#"<html><head><link rel="icon" href="/x.png"></head></html>"#));
        let c = candidate_urls(&page, "https://example.com");
        assert_eq!(
            c,
            vec![
                "https://example.com/favicon.ico".to_string(),
                "https://example.com/x.png".to_string(),
            ]
        );
    }

    #[test]
    fn protocol_relative_href_gets_https() {
        assert_eq!(
            normalize_href("https://example.com", "//cdn.example.com/icon.png"),
            "https://cdn.example.com/icon.png"
        );
    }

    #[test]
    fn href_normalization_cases() {
        let o = "https://example.com";
        assert_eq!(
            normalize_href(o, "https://other.net/i.png"),
            "https://other.net/i.png"
        );
        assert_eq!(normalize_href(o, "/a/i.png"), "https://example.com/a/i.png");
        assert_eq!(normalize_href(o, "img/i.png"), "https://example.com/img/i.png");
    }

    #[test]
    fn rel_priority_then_document_order() {
        let html = br#"
            <link rel="apple-touch-icon" href="/touch.png">
            <link rel="stylesheet" href="/style.css">
            <link rel="shortcut icon" href="/short.ico">
            <link rel="icon" href="/a.png">
            <link rel="icon" href="/b.svg">
            <link rel="apple-touch-icon-precomposed" href="/pre.png">
        "#;
        assert_eq!(
            icon_hrefs(html, "https://example.com"),
            vec!["/a.png", "/b.svg", "/short.ico", "/touch.png", "/pre.png"]
        );
    }

    #[test]
    fn rel_match_is_case_insensitive_and_trimmed() {
        let html = br#"<link rel=" Shortcut Icon " href="/s.ico"><link rel="icon" href="  ">"#;
        assert_eq!(icon_hrefs(html, "https://example.com"), vec!["/s.ico"]);
    }

    #[test]
    fn page_failure_degrades_to_conventional_favicon() {
        let page = CannedPage(Err(500));
        assert_eq!(
            candidate_urls(&page, "https://example.com/some/page?q=1"),
            vec!["https://example.com/favicon.ico".to_string()]
        );
    }

    #[test]
    fn malformed_url_yields_no_candidates() {
        let page = CannedPage(Ok("<html></html>"));
        assert!(candidate_urls(&page, "not a url").is_empty());
        assert!(candidate_urls(&page, "data:text/plain,hi").is_empty());
    }

    #[test]
    fn duplicate_of_conventional_favicon_is_dropped() {
        let page = CannedPage(Ok(r#"<link rel="icon" href="/favicon.ico">"#));
        assert_eq!(
            candidate_urls(&page, "http://example.com:8080/"),
            vec!["http://example.com:8080/favicon.ico".to_string()]
        );
    }

    #[test]
    fn ambiguous_body_markup_keeps_head_icons() {
        for tail in ["<select><noscript>", "<select><xmp>", "<select><iframe>"] {
            let html = format!(
                r#"<html><head><link rel="icon" href="/x.png"></head><body>{tail}</body></html>"#
            );
            assert_eq!(
                icon_hrefs(html.as_bytes(), "https://example.com"),
                vec!["/x.png"],
                "markup tail: {tail}"
            );
        }

        let page = CannedPage(Ok(
            r#"<head><link rel="icon" href="/x.png"></head><body><select><noscript></noscript></select></body>"#,
        ));
        assert_eq!(
            candidate_urls(&page, "https://example.com"),
            vec![
                "https://example.com/favicon.ico".to_string(),
                "https://example.com/x.png".to_string(),
            ]
        );
    }
}
