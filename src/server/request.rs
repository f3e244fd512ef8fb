use http::Method;
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// Parsed HTTP request data handed to the dispatcher.
///
/// The host server adapts its native request into this shape once, before
/// dispatch. Query parameters hold single values; repeated or list-valued
/// parameters use the comma-separated form (`values=1.0,2.5`).
#[derive(Debug, Default)]
pub struct Request {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path with the context-path prefix already stripped
    pub path: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    /// Parsed cookies from the Cookie header
    pub cookies: HashMap<String, String>,
    /// Parsed query string parameters
    pub query_params: HashMap<String, String>,
    /// Path parameters extracted by the route resolver
    pub path_params: HashMap<String, String>,
    /// Parsed JSON body (if content-type is application/json)
    pub body: Option<Value>,
    /// Session attributes shared across requests of one client
    session: HashMap<String, Value>,
    /// Per-request typed attributes (e.g. the bound response model)
    attributes: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl Request {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            ..Default::default()
        }
    }

    /// Parse and attach a query string (`page=2&rows=10`).
    pub fn with_query_string(mut self, query: &str) -> Self {
        self.query_params = parse_query_params(query);
        self
    }

    /// Attach a parsed JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up a request parameter by name, query string first, then path
    /// parameters.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.query_params
            .get(name)
            .or_else(|| self.path_params.get(name))
            .map(String::as_str)
    }

    /// Get a header by name (case-insensitive per RFC 7230).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn session_attribute(&self, name: &str) -> Option<&Value> {
        self.session.get(name)
    }

    pub fn set_session_attribute(&mut self, name: &str, value: Value) {
        self.session.insert(name.to_string(), value);
    }

    /// Store a typed per-request attribute under a well-known key.
    pub fn set_attribute(&mut self, name: &str, value: Arc<dyn Any + Send + Sync>) {
        self.attributes.insert(name.to_string(), value);
    }

    /// Read back a typed attribute. Returns `None` when the key is absent
    /// or holds a different type.
    pub fn attribute<T: Any + Send + Sync>(&self, name: &str) -> Option<&T> {
        self.attributes
            .get(name)
            .and_then(|a| a.downcast_ref::<T>())
    }
}

/// Parse cookies out of an extracted (lowercase-keyed) header map.
pub fn parse_cookies(headers: &HashMap<String, String>) -> HashMap<String, String> {
    headers
        .get("cookie")
        .map(|c| {
            c.split(';')
                .filter_map(|pair| {
                    let mut parts = pair.trim().splitn(2, '=');
                    let name = parts.next()?.trim().to_string();
                    let value = parts.next().unwrap_or("").trim().to_string();
                    Some((name, value))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Parse query string parameters from a path or bare query string.
///
/// Accepts either `/users?limit=10` or just `limit=10`; names and values
/// are URL-decoded.
pub fn parse_query_params(path_or_query: &str) -> HashMap<String, String> {
    let query = match path_or_query.find('?') {
        Some(pos) => &path_or_query[pos + 1..],
        None if path_or_query.starts_with('/') => return HashMap::new(),
        None => path_or_query,
    };
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Strip the context-path prefix from a request URI, once.
///
/// `strip_context_path("/app/user/1", "/app")` is `/user/1`; a URI that
/// does not start with the context path is returned unchanged.
pub fn strip_context_path<'a>(uri: &'a str, context_path: &str) -> &'a str {
    if context_path.is_empty() {
        return uri;
    }
    match uri.strip_prefix(context_path) {
        Some(rest) if rest.starts_with('/') || rest.is_empty() => rest,
        _ => uri,
    }
}
