//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed table of routes. Each route answers GET with a status,
//! optional Content-Type, body, optional redirect and optional delay.
//! Unknown paths get 404.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub path: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
    pub location: Option<String>,
    pub delay: Option<Duration>,
}

impl Route {
    /// 200 OK with the given content type and body.
    pub fn image(path: &str, content_type: &str, body: &[u8]) -> Self {
        Self {
            path: path.to_string(),
            status: 200,
            content_type: Some(content_type.to_string()),
            body: body.to_vec(),
            location: None,
            delay: None,
        }
    }

    /// Bare status with a short text body and no Content-Type.
    pub fn status(path: &str, status: u16) -> Self {
        Self {
            path: path.to_string(),
            status,
            content_type: None,
            body: format!("status {}", status).into_bytes(),
            location: None,
            delay: None,
        }
    }

    /// 302 to `location` (absolute path on the same server).
    pub fn redirect(path: &str, location: &str) -> Self {
        Self {
            path: path.to_string(),
            status: 302,
            content_type: Some("text/html".to_string()),
            body: b"moved".to_vec(),
            location: Some(location.to_string()),
            delay: None,
        }
    }

    /// Sleep before answering (to trigger client timeouts).
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start(routes: Vec<Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> =
        Arc::new(routes.into_iter().map(|r| (r.path.clone(), r)).collect());
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// A port on localhost with nothing listening.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/gone.jpg", port)
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>) {
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
    let (method, path) = parse_request_line(request);
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }

    let not_found = Route::status(path, 404);
    let route = routes.get(path).unwrap_or(&not_found);
    if let Some(d) = route.delay {
        thread::sleep(d);
    }

    let mut response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        route.status,
        reason(route.status),
        route.body.len()
    );
    if let Some(ct) = &route.content_type {
        response.push_str(&format!("Content-Type: {}\r\n", ct));
    }
    if let Some(loc) = &route.location {
        response.push_str(&format!("Location: {}\r\n", loc));
    }
    response.push_str("\r\n");
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&route.body);
}

/// Returns (method, path) from the request line, path without query string.
fn parse_request_line(request: &str) -> (&str, &str) {
    let line = request.lines().next().unwrap_or("");
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("/");
    let path = target.split('?').next().unwrap_or(target);
    (method, path)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        302 => "Found",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
