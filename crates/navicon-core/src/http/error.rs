//! GET error type and failure classification.

use thiserror::Error;

/// Error returned by a single GET (bad URL, curl failure, or HTTP error).
/// Kept typed so callers can classify failures before logging them.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL did not parse as an absolute http(s) URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// Curl reported an error (timeout, connection, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
}

/// Coarse failure category, used as a structured log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Operation timed out (connect/read).
    Timeout,
    /// Network-level failure (connection refused, DNS, reset).
    Connection,
    /// Server answered with a non-2xx status.
    HttpStatus(u32),
    /// Malformed URL.
    InvalidUrl,
    Other,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Connection => "connection",
            FailureKind::HttpStatus(_) => "http_status",
            FailureKind::InvalidUrl => "invalid_url",
            FailureKind::Other => "other",
        }
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_operation_timedout() {
        return FailureKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_ssl_connect_error()
    {
        return FailureKind::Connection;
    }
    FailureKind::Other
}

/// Classify a fetch error into a FailureKind.
pub fn classify(e: &FetchError) -> FailureKind {
    match e {
        FetchError::InvalidUrl(_) => FailureKind::InvalidUrl,
        FetchError::Curl(ce) => classify_curl_error(ce),
        FetchError::Http(code) => FailureKind::HttpStatus(*code),
    }
}
