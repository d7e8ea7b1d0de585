//! Parse HTTP response header lines into ResponseHeaders.

use super::ResponseHeaders;

/// Parse collected header lines into ResponseHeaders.
///
/// With redirects followed, curl reports the header block of every hop; a
/// status line (`HTTP/...`) starts a new block, so only the final response's
/// headers are kept.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseHeaders {
    let mut fields: Vec<(String, String)> = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            fields.clear();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            fields.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    ResponseHeaders { fields }
}
