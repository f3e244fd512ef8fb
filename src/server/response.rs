use serde_json::Value;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::warn;

/// Maximum inline headers before heap allocation.
/// Most responses carry well under 16 headers.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage for the hot path.
///
/// Header names use `Arc<str>` because they are often repeated
/// (Content-Type and friends) and `Arc::clone()` is an O(1) atomic
/// increment; values stay `String` as per-response data.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

pub fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Buffered response handle filled during dispatch.
///
/// The host server flushes the buffer to the wire after `handle` returns.
/// `committed` marks the point of no return: once set, status and headers
/// are considered sent and any further error can only be logged, never
/// delivered to the client.
#[derive(Debug, Default)]
pub struct Response {
    status: u16,
    headers: HeaderVec,
    body: Vec<u8>,
    committed: bool,
}

impl Response {
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: HeaderVec::new(),
            body: Vec::new(),
            committed: false,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or replace a header. Ignored once the response is committed.
    pub fn set_header(&mut self, name: &str, value: String) {
        if self.committed {
            warn!(header = name, "header set after response was committed");
            return;
        }
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }

    pub fn set_status(&mut self, status: u16) {
        if self.committed {
            warn!(status, "status set after response was committed");
            return;
        }
        self.status = status;
    }

    /// Send an error status with a plain-text message and commit.
    pub fn send_error(&mut self, status: u16, message: &str) {
        if self.committed {
            warn!(status, message, "error sent after response was committed");
            return;
        }
        self.status = status;
        self.set_header("content-type", "text/plain".to_string());
        self.body = message.as_bytes().to_vec();
        self.committed = true;
    }

    /// Write a JSON body with the given status and commit.
    pub fn write_json(&mut self, status: u16, body: &Value) {
        if self.committed {
            warn!(status, "body written after response was committed");
            return;
        }
        self.status = status;
        self.set_header("content-type", "application/json".to_string());
        self.body = serde_json::to_vec(body).unwrap_or_default();
        self.committed = true;
    }

    /// Write a plain-text body with the given status and commit.
    pub fn write_text(&mut self, status: u16, body: &str) {
        if self.committed {
            warn!(status, "body written after response was committed");
            return;
        }
        self.status = status;
        self.set_header("content-type", "text/plain".to_string());
        self.body = body.as_bytes().to_vec();
        self.committed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(404), "Not Found");
    }

    #[test]
    fn test_send_error_commits() {
        let mut res = Response::new();
        res.send_error(404, "Not Found Page! /x");
        assert!(res.is_committed());
        assert_eq!(res.status(), 404);
        assert_eq!(res.body_string(), "Not Found Page! /x");
    }

    #[test]
    fn test_committed_response_is_immutable() {
        let mut res = Response::new();
        res.write_json(200, &json!({"ok": true}));
        res.send_error(500, "late failure");
        assert_eq!(res.status(), 200);
        assert_eq!(res.body_string(), "{\"ok\":true}");
    }
}
