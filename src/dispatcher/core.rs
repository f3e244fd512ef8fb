use crate::argument::{ArgumentResolver, ArgumentResolverRegistry};
use crate::config::DispatchConfig;
use crate::error::DispatchError;
use crate::ids::RequestId;
use crate::invocation::{Interceptor, InterceptorRegistry, InvocationContext};
use crate::model::MODEL_KEY;
use crate::router::RouteResolver;
use crate::server::{Request, Response};
use http::Method;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Orchestrates resolution, validation, chain execution and response
/// submission for one request at a time.
///
/// The dispatcher and its registries are process-wide, read-only after
/// startup, and safely shared across concurrent requests; all mutable
/// per-request state lives in the invocation context.
pub struct Dispatcher {
    routes: Option<Arc<dyn RouteResolver>>,
    config: Option<Arc<DispatchConfig>>,
    resolvers: ArgumentResolverRegistry,
    interceptors: InterceptorRegistry,
}

impl Dispatcher {
    /// A dispatcher with the default argument resolvers and no routes or
    /// configuration yet. Both must be set before serving; the gate
    /// checks report their absence as configuration failures.
    pub fn new() -> Self {
        Self {
            routes: None,
            config: None,
            resolvers: ArgumentResolverRegistry::with_defaults(),
            interceptors: InterceptorRegistry::new(),
        }
    }

    pub fn set_routes(&mut self, routes: Arc<dyn RouteResolver>) {
        self.routes = Some(routes);
    }

    pub fn set_config(&mut self, config: Arc<DispatchConfig>) {
        self.config = Some(config);
    }

    pub fn register_interceptor(&mut self, name: &str, interceptor: Arc<dyn Interceptor>) {
        self.interceptors.register(name, interceptor);
    }

    pub fn register_argument_resolver(&mut self, resolver: Arc<dyn ArgumentResolver>) {
        self.resolvers.register(resolver);
    }

    /// Handle one request, side-effecting on `response`.
    ///
    /// `uri` is the request path with any context-path prefix already
    /// stripped (see [`crate::server::strip_context_path`]).
    pub fn handle(&self, method: Method, uri: &str, request: &mut Request, response: &mut Response) {
        let request_id = RequestId::new();
        if let Err(e) = self.dispatch(request_id, &method, uri, request, response) {
            self.fail(request_id, uri, response, e);
        }
    }

    /// The gate sequence plus chain execution. Every failure is a
    /// [`DispatchError`] consumed by [`Self::fail`].
    fn dispatch(
        &self,
        request_id: RequestId,
        method: &Method,
        uri: &str,
        request: &mut Request,
        response: &mut Response,
    ) -> Result<(), DispatchError> {
        // Gate 1: the URI itself.
        if uri.is_empty() {
            return Err(DispatchError::configuration("empty request uri"));
        }

        // Gate 2: required collaborators.
        let routes = self
            .routes
            .as_ref()
            .ok_or_else(|| DispatchError::configuration("no route resolver configured"))?;
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| DispatchError::configuration("no dispatch configuration set"))?;

        // Gate 3: route resolution.
        let resolution = routes.resolve(uri).ok_or(DispatchError::RouteNotFound)?;
        let descriptor = resolution.descriptor;
        for (name, value) in resolution.path_params {
            request.path_params.insert(name.to_string(), value);
        }

        // Gate 4: verb support.
        if !descriptor.supports(method) {
            return Err(DispatchError::UnsupportedMethod);
        }

        // Gate 5: a model factory for the declared output-model type.
        let factory = config.factory(&descriptor.model_type).ok_or_else(|| {
            DispatchError::configuration("no model factory registered for the output-model type")
        })?;

        // Gate 6: a model bound to (view, view path).
        let model = factory
            .create(config.view(), &descriptor.view_path)
            .ok_or_else(|| DispatchError::configuration("model factory produced no model"))?;
        request.set_attribute(MODEL_KEY, Arc::new(model.clone()));

        info!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            handler_name = %descriptor.handler_name,
            "Request dispatched to handler chain"
        );

        {
            let mut ctx = InvocationContext::new(
                descriptor.clone(),
                model.clone(),
                request,
                response,
                &self.resolvers,
                &self.interceptors,
            );
            let outcome = ctx.invoke();
            debug!(
                request_id = %request_id,
                state = ?ctx.state(),
                "Handler chain finished"
            );
            outcome?;
        }

        if let Err(e) = model.submit(request, response) {
            // The status has already been decided; a submission failure
            // can only be logged.
            error!(
                request_id = %request_id,
                uri = %uri,
                error = %e,
                "Model submission failed"
            );
        } else {
            info!(
                request_id = %request_id,
                uri = %uri,
                status = response.status(),
                "Response submitted"
            );
        }
        Ok(())
    }

    /// Translate a [`DispatchError`] into a status code and client
    /// message. The single error path for every variant, gate failures
    /// and chain failures alike.
    fn fail(&self, request_id: RequestId, uri: &str, response: &mut Response, error: DispatchError) {
        let config = self.config.as_ref();
        let error_status = config.map(|c| c.error_status()).unwrap_or(500);

        match error {
            DispatchError::RouteNotFound => {
                error!(request_id = %request_id, uri = %uri, "No route matched");
                response.send_error(404, &format!("Not Found Page! {uri}"));
            }
            DispatchError::UnsupportedMethod => {
                error!(
                    request_id = %request_id,
                    uri = %uri,
                    "Request method not in the descriptor's supported set"
                );
                response.send_error(error_status, &format!("No Support Method! {uri}"));
            }
            DispatchError::ConfigurationMissing { detail } => {
                error!(request_id = %request_id, uri = %uri, detail, "Configuration missing");
                response.send_error(error_status, &format!("Server Error! {uri}"));
            }
            DispatchError::Validation(e) => {
                let message = match config {
                    Some(c) => e.resolved_message(c.message_source(), c.locale()),
                    None => e.resolved_message(None, "en"),
                };
                info!(
                    request_id = %request_id,
                    uri = %uri,
                    status = e.status(),
                    field = ?e.field(),
                    code = ?e.code(),
                    message = %message,
                    "Validation failure"
                );
                response.send_error(e.status(), &message);
            }
            DispatchError::Unhandled(e) => {
                error!(
                    request_id = %request_id,
                    uri = %uri,
                    error = %e,
                    "Unhandled dispatch failure"
                );
                if !response.is_committed() {
                    response.send_error(error_status, &e.to_string());
                }
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
