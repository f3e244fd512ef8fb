//! # Model Module
//!
//! Output-rendering abstractions consumed by the dispatcher.
//!
//! A [`Model`] collects data during chain execution and writes the final
//! response when the dispatcher calls [`Model::submit`]. Models are
//! produced by a [`ModelFactory`] selected by the route descriptor's
//! output-model type; the factory binds the model to the configured
//! [`View`] and the descriptor's view path at creation time.
//!
//! The dispatch core treats `submit` as an opaque side effect: submission
//! failures are logged, never re-raised, and do not change an already
//! written status.
//!
//! Two concrete models ship with the crate:
//!
//! - [`JsonModel`] (`"json"`) — a status code plus a data map, serialized
//!   as a JSON object on submit.
//! - [`PageModel`] (`"page"`) — a data map handed to the configured view
//!   together with the route's view path.

mod core;
mod json;
mod page;

pub use core::{Model, ModelFactory, NullView, View, MODEL_KEY};
pub use json::{JsonModel, JsonModelFactory, JSON_MODEL};
pub use page::{PageModel, PageModelFactory, PAGE_MODEL};
