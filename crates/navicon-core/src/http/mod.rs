//! Blocking HTTP GET used for page markup and icon payloads.
//!
//! Uses the curl crate (libcurl). Every request carries a browser-like
//! User-Agent, follows redirects and is bounded by an overall timeout.

mod error;
mod parse;

pub use error::{classify, classify_curl_error, FailureKind, FetchError};

use crate::config::NaviconConfig;
use std::str;
use std::time::Duration;

/// Headers of the final response (after redirects). Names are lowercased.
#[derive(Debug, Clone, Default)]
pub struct ResponseHeaders {
    fields: Vec<(String, String)>,
}

impl ResponseHeaders {
    /// Build from raw header lines as reported by curl (status lines included).
    pub fn from_lines(lines: &[String]) -> Self {
        parse::parse_headers(lines)
    }

    /// First value for `name` (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get("content-type")
    }
}

/// A successful (2xx) response with its body fully read into memory.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub headers: ResponseHeaders,
    pub body: Vec<u8>,
}

/// Anything that can GET a URL and hand back a 2xx response.
///
/// Implemented by [`HttpClient`]; tests substitute canned responses.
/// Calls block the current thread; async callers go through `spawn_blocking`.
pub trait PageFetcher: Send + Sync + 'static {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// Used in place of a zero timeout.
pub const MIN_TIMEOUT: Duration = Duration::from_secs(1);

/// libcurl-backed GET with a fixed User-Agent and timeouts.
#[derive(Debug, Clone)]
pub struct HttpClient {
    user_agent: String,
    timeout: Duration,
    connect_timeout: Duration,
}

impl HttpClient {
    /// Zero durations fall back to [`MIN_TIMEOUT`]; libcurl would treat them as unbounded.
    pub fn new(user_agent: impl Into<String>, timeout: Duration, connect_timeout: Duration) -> Self {
        let bounded = |d: Duration| if d.is_zero() { MIN_TIMEOUT } else { d };
        Self {
            user_agent: user_agent.into(),
            timeout: bounded(timeout),
            connect_timeout: bounded(connect_timeout),
        }
    }

    pub fn from_config(cfg: &NaviconConfig) -> Self {
        Self::new(cfg.user_agent.clone(), cfg.fetch_timeout(), cfg.connect_timeout())
    }
}

impl PageFetcher for HttpClient {
    /// Performs a GET and returns the final response.
    ///
    /// Non-2xx statuses are returned as [`FetchError::Http`].
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let parsed = url::Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }

        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(parsed.as_str())?;
        easy.useragent(&self.user_agent)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout.min(self.timeout))?;
        easy.timeout(self.timeout)?;
        // Let libcurl decode gzip/deflate/br as advertised by the server.
        easy.accept_encoding("")?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }

        Ok(HttpResponse {
            status: code,
            headers: ResponseHeaders::from_lines(&header_lines),
            body,
        })
    }
}
