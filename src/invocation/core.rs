use crate::argument::ArgumentResolverRegistry;
use crate::error::DispatchError;
use crate::model::Model;
use crate::router::RouteDescriptor;
use crate::server::{Request, Response};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Target callable of a route.
///
/// Handlers receive the resolved parameter values in declaration order
/// plus the invocation context for model and request/response access.
/// Errors returned here are the handler's own failure and reach the
/// dispatcher's error gates unwrapped.
pub trait Handler: Send + Sync {
    fn invoke(
        &self,
        args: &[Value],
        ctx: &mut InvocationContext<'_>,
    ) -> Result<Value, DispatchError>;
}

/// A chain-of-responsibility participant.
///
/// An interceptor either re-enters `ctx.invoke()` to continue the chain
/// or returns its own value to short-circuit request handling.
pub trait Interceptor: Send + Sync {
    fn invoke(&self, ctx: &mut InvocationContext<'_>) -> Result<Value, DispatchError>;
}

/// Service-locator collaborator resolving interceptor identifiers to
/// instances. Registered instances are shared across requests and must
/// be stateless (or internally synchronized).
#[derive(Default)]
pub struct InterceptorRegistry {
    entries: HashMap<String, Arc<dyn Interceptor>>,
}

impl InterceptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, interceptor: Arc<dyn Interceptor>) {
        if self
            .entries
            .insert(name.to_string(), interceptor)
            .is_some()
        {
            warn!(interceptor = name, "Replaced existing interceptor registration");
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Interceptor>> {
        self.entries.get(name).cloned()
    }
}

/// Progress of one request through the chain.
///
/// `Failed` is reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    NotStarted,
    InterceptorsRunning,
    HandlerInvoked,
    Completed,
    Failed,
}

/// Per-request mutable state coordinating resolution, chain execution
/// and handler invocation.
///
/// Owned exclusively by the dispatcher for the request's lifetime and
/// discarded after response submission; never shared across requests.
pub struct InvocationContext<'a> {
    descriptor: Arc<RouteDescriptor>,
    model: Arc<dyn Model>,
    request: &'a mut Request,
    response: &'a mut Response,
    resolvers: &'a ArgumentResolverRegistry,
    interceptor_registry: &'a InterceptorRegistry,
    // Lazily memoized derived state, each computed at most once.
    instance: Option<Arc<dyn Handler>>,
    interceptors: Option<Vec<Arc<dyn Interceptor>>>,
    values: Option<Vec<Value>>,
    cursor: usize,
    depth: usize,
    state: ExecutionState,
}

impl<'a> InvocationContext<'a> {
    pub fn new(
        descriptor: Arc<RouteDescriptor>,
        model: Arc<dyn Model>,
        request: &'a mut Request,
        response: &'a mut Response,
        resolvers: &'a ArgumentResolverRegistry,
        interceptor_registry: &'a InterceptorRegistry,
    ) -> Self {
        Self {
            descriptor,
            model,
            request,
            response,
            resolvers,
            interceptor_registry,
            instance: None,
            interceptors: None,
            values: None,
            cursor: 0,
            depth: 0,
            state: ExecutionState::NotStarted,
        }
    }

    pub fn descriptor(&self) -> &Arc<RouteDescriptor> {
        &self.descriptor
    }

    pub fn model(&self) -> &Arc<dyn Model> {
        &self.model
    }

    pub fn request(&self) -> &Request {
        self.request
    }

    pub fn request_mut(&mut self) -> &mut Request {
        self.request
    }

    pub fn response_mut(&mut self) -> &mut Response {
        self.response
    }

    pub fn uri(&self) -> &str {
        &self.request.path
    }

    pub fn view_path(&self) -> &str {
        &self.descriptor.view_path
    }

    pub fn state(&self) -> ExecutionState {
        self.state
    }

    /// The handler instance, produced by the route's factory on first
    /// access and cached for the rest of the request.
    pub fn instance(&mut self) -> Arc<dyn Handler> {
        if let Some(handler) = &self.instance {
            return handler.clone();
        }
        let handler = (self.descriptor.handler)();
        self.instance = Some(handler.clone());
        handler
    }

    /// Resolved parameter values in declaration order, computed once.
    ///
    /// Resolution delegates each parameter descriptor to the argument
    /// resolver registry; a descriptor no resolver supports is a
    /// configuration error surfaced here, at invocation time.
    pub fn parameter_values(&mut self) -> Result<Vec<Value>, DispatchError> {
        if self.values.is_none() {
            let descriptor = self.descriptor.clone();
            let resolvers = self.resolvers;
            let request: &Request = self.request;
            let values = descriptor
                .parameters
                .iter()
                .map(|p| resolvers.resolve(p, request))
                .collect::<Result<Vec<Value>, DispatchError>>()?;
            debug!(
                handler_name = %descriptor.handler_name,
                value_count = values.len(),
                "Parameter values resolved"
            );
            self.values = Some(values);
        }
        Ok(self.values.clone().unwrap_or_default())
    }

    /// The materialized interceptor chain, resolved once from the
    /// descriptor's identifier list in declared order.
    pub fn interceptors(&mut self) -> Result<&[Arc<dyn Interceptor>], DispatchError> {
        if self.interceptors.is_none() {
            let mut chain = Vec::with_capacity(self.descriptor.interceptor_names.len());
            for name in &self.descriptor.interceptor_names {
                let interceptor = self.interceptor_registry.lookup(name).ok_or_else(|| {
                    DispatchError::configuration(format!("interceptor '{name}' is not registered"))
                })?;
                chain.push(interceptor);
            }
            self.interceptors = Some(chain);
        }
        Ok(self.interceptors.as_deref().unwrap_or_default())
    }

    /// Advance the chain: invoke the next interceptor, or — once the
    /// cursor is exhausted — the handler with its resolved parameters.
    ///
    /// Interceptors call this re-entrantly to continue the chain; not
    /// calling it aborts handling and makes the interceptor's return
    /// value the final result. The terminal state (`Completed` or
    /// `Failed`) is set when the outermost call unwinds, so a successful
    /// short-circuit still completes the state machine.
    pub fn invoke(&mut self) -> Result<Value, DispatchError> {
        if self.state == ExecutionState::NotStarted {
            self.state = ExecutionState::InterceptorsRunning;
        }

        self.depth += 1;
        let result = self.invoke_next();
        self.depth -= 1;
        if self.depth == 0 {
            self.state = if result.is_ok() {
                ExecutionState::Completed
            } else {
                ExecutionState::Failed
            };
        }
        result
    }

    fn invoke_next(&mut self) -> Result<Value, DispatchError> {
        self.interceptors()?;
        let next = self
            .interceptors
            .as_ref()
            .and_then(|chain| chain.get(self.cursor))
            .cloned();

        if let Some(link) = next {
            self.cursor += 1;
            debug!(
                handler_name = %self.descriptor.handler_name,
                cursor = self.cursor,
                "Interceptor invoked"
            );
            return link.invoke(self);
        }

        self.state = ExecutionState::HandlerInvoked;
        let handler = self.instance();
        let values = self.parameter_values()?;

        debug!(
            handler_name = %self.descriptor.handler_name,
            arg_count = values.len(),
            "Handler invoked"
        );
        handler.invoke(&values, self)
    }
}
