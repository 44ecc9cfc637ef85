//! Incremental parsing of HTTP response header lines from libcurl.

use std::str;

/// Status and content type of the response currently being received.
///
/// libcurl reports the header block of every response it sees, including
/// redirects; a new status line resets the state so the final response wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ResponseHead {
    pub status: Option<u32>,
    pub content_type: Option<String>,
}

impl ResponseHead {
    /// Feed one raw header line as delivered to curl's header callback.
    pub(crate) fn push_line(&mut self, raw: &[u8]) {
        let line = match str::from_utf8(raw) {
            Ok(s) => s.trim(),
            Err(_) => return,
        };
        if line.is_empty() {
            return;
        }
        if line.starts_with("HTTP/") {
            *self = ResponseHead {
                status: parse_status_line(line),
                content_type: None,
            };
            return;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-type") {
                self.content_type = Some(value.trim().to_string());
            }
        }
    }

    pub(crate) fn is_ok(&self) -> bool {
        self.status == Some(200)
    }
}

/// `HTTP/1.1 200 OK` → `Some(200)`; also handles `HTTP/2 404`.
fn parse_status_line(line: &str) -> Option<u32> {
    line.split_whitespace().nth(1)?.parse().ok()
}
