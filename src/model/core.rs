use crate::server::{Request, Response};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Request-attribute key under which the dispatcher publishes the bound
/// model before the interceptor chain runs. Downstream consumers (views,
/// interceptors) read it back with `request.attribute::<Arc<dyn Model>>`.
pub const MODEL_KEY: &str = "routier.model";

/// An output-rendering model bound to one request.
///
/// Handlers populate the model through [`Model::put`] (and may adjust the
/// status); the dispatcher calls [`Model::submit`] exactly once after the
/// chain completes successfully. Implementations use interior mutability:
/// a model is driven by a single request flow, never shared across
/// requests.
pub trait Model: Send + Sync {
    /// Stage a named value for rendering.
    fn put(&self, key: &str, value: Value);

    /// Override the status sent on submit.
    fn set_status(&self, status: u16);

    /// Write the final response. Treated as opaque by the dispatcher;
    /// failures are logged and swallowed.
    fn submit(&self, request: &Request, response: &mut Response) -> anyhow::Result<()>;
}

/// Rendering engine collaborator used by view-path based models.
///
/// The dispatch core never interprets view paths itself; it only carries
/// them from the route descriptor to the view.
pub trait View: Send + Sync {
    fn render(
        &self,
        view_path: &str,
        data: &Map<String, Value>,
        request: &Request,
        response: &mut Response,
    ) -> anyhow::Result<()>;
}

/// Placeholder view for deployments that only serve data models.
///
/// Rendering through it fails, which surfaces as a logged submission
/// error on any route that was (mis)configured with a page model.
pub struct NullView;

impl View for NullView {
    fn render(
        &self,
        view_path: &str,
        _data: &Map<String, Value>,
        _request: &Request,
        _response: &mut Response,
    ) -> anyhow::Result<()> {
        anyhow::bail!("no view engine configured (view path '{view_path}')")
    }
}

/// Produces a model bound to the configured view and a route's view path.
///
/// Factories are registered on the dispatch configuration keyed by the
/// output-model type name a route descriptor declares. Returning `None`
/// is a configuration failure the dispatcher reports before the chain
/// runs.
pub trait ModelFactory: Send + Sync {
    fn create(&self, view: &Arc<dyn View>, view_path: &str) -> Option<Arc<dyn Model>>;
}
