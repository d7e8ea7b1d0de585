//! Minimal HTTP/1.1 server that serves a fixed set of paths for integration tests.
//!
//! Each path maps to a status, optional Content-Type and body; anything else
//! is a 404. The request path and User-Agent of every request are recorded.
//! A route may answer after a delay, or never answer at all.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
    /// Wait this long before answering.
    pub delay: Duration,
    /// Keep the connection open without ever answering.
    pub stall: bool,
}

impl Route {
    pub fn ok(content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type),
            body: body.into(),
            delay: Duration::ZERO,
            stall: false,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: Some("text/html"),
            body: b"<html><body>error</body></html>".to_vec(),
            delay: Duration::ZERO,
            stall: false,
        }
    }

    /// Accepts the request and then goes silent.
    pub fn stall() -> Self {
        Self {
            stall: true,
            ..Self::status(200)
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request seen by the server: (path, user agent).
pub type Seen = Arc<Mutex<Vec<(String, Option<String>)>>>;

pub struct SiteServer {
    /// Origin, e.g. "http://127.0.0.1:12345" (no trailing slash).
    pub origin: String,
    pub seen: Seen,
}

impl SiteServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }

    pub fn paths_seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> SiteServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect(),
    );
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let seen_srv = Arc::clone(&seen);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let seen = Arc::clone(&seen_srv);
            thread::spawn(move || handle(stream, &routes, &seen));
        }
    });
    SiteServer {
        origin: format!("http://127.0.0.1:{}", port),
        seen,
    }
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, Route>, seen: &Seen) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (path, user_agent) = parse_request(request);
    seen.lock().unwrap().push((path.clone(), user_agent));

    let route = routes.get(&path).cloned().unwrap_or_else(|| Route::status(404));
    if route.stall {
        thread::sleep(Duration::from_secs(10));
        return;
    }
    if !route.delay.is_zero() {
        thread::sleep(route.delay);
    }
    let reason = match route.status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let content_type = route
        .content_type
        .map(|ct| format!("Content-Type: {}\r\n", ct))
        .unwrap_or_default();
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        route.status,
        reason,
        route.body.len(),
        content_type
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&route.body);
}

/// Returns (path, optional User-Agent).
fn parse_request(request: &str) -> (String, Option<String>) {
    let mut path = String::new();
    let mut user_agent = None;
    for line in request.lines() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if path.is_empty() {
            path = line.split_whitespace().nth(1).unwrap_or("/").to_string();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("user-agent") {
                user_agent = Some(value.trim().to_string());
            }
        }
    }
    (path, user_agent)
}
