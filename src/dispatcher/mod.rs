//! # Dispatcher Module
//!
//! The root orchestrator of the dispatch core.
//!
//! ## Request Flow
//!
//! `handle(method, uri, request, response)` runs a fixed sequence of
//! validation gates, each short-circuiting to an error response on the
//! first failure:
//!
//! 1. URI non-empty — else server-error status.
//! 2. Route table and configuration present — else server-error status.
//! 3. Route resolves to a descriptor — else 404.
//! 4. Request verb supported by the descriptor — else server-error status.
//! 5. A model factory is registered for the descriptor's output-model
//!    type — else server-error status.
//! 6. The factory produces a model bound to (view, view path) — else
//!    server-error status. The model is attached to the request under
//!    [`crate::model::MODEL_KEY`].
//!
//! After the gates pass, an invocation context is constructed and the
//! interceptor chain runs. On success the model submits the response;
//! submission failures are logged, never re-raised. A validation failure
//! sends its own status and resolved message. Any other failure is
//! logged with full detail and converted to the generic server-error
//! status — unless the response is already committed, in which case it
//! is only logged.

mod core;

pub use core::Dispatcher;
