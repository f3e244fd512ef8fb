//! # Server Boundary Module
//!
//! Request and response handles for the dispatch core.
//!
//! The core is host-server agnostic: whatever HTTP stack actually accepts
//! connections parses its native request into a [`Request`] and hands the
//! dispatcher a mutable [`Response`] to fill. Nothing here owns a socket.
//!
//! [`Request`] carries the parsed inbound data (method, path, headers,
//! cookies, query parameters, JSON body) plus the two pieces of mutable
//! per-request state the core needs: a session attribute map and a typed
//! attribute map where the dispatcher publishes the response model under
//! [`crate::model::MODEL_KEY`].
//!
//! [`Response`] buffers status, headers and body, and tracks whether the
//! response is committed — once the first byte is considered sent, the
//! status line can no longer be rewritten and late failures are only
//! logged.

mod request;
mod response;

pub use request::{parse_cookies, parse_query_params, strip_context_path, Request};
pub use response::{status_reason, HeaderVec, Response, MAX_INLINE_HEADERS};
