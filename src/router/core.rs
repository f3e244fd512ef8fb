use crate::invocation::Handler;
use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum number of path parameters before heap allocation.
/// Most routes have well under 8 (`/users/{id}/posts/{post_id}`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Names use `Arc<str>` since they come from the static route table and
/// clone in O(1); values are per-request data from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Produces the handler instance for one request.
///
/// The invocation context calls the factory at most once per request and
/// memoizes the result. A factory returning a fresh `Arc` gives
/// per-request instances; a factory cloning a shared `Arc` opts into
/// cross-request sharing and must then be stateless.
pub type HandlerFactory = Arc<dyn Fn() -> Arc<dyn Handler> + Send + Sync>;

/// Declared kind of one handler parameter.
///
/// Argument resolvers match on this through their `supports` capability
/// test; the kind set is the crate's static stand-in for reflective
/// parameter type inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// The session value stored under the well-known session key.
    Session,
    /// Paging parameters parsed from `page` and `rows`.
    Paging,
    /// Comma-separated integer array from a named request parameter.
    LongArray,
    /// Comma-separated float array from a named request parameter.
    FloatArray,
    /// Plain text value of a named request parameter.
    Text,
}

/// Immutable description of one handler parameter: declared kind,
/// declared name (where one exists) and ordinal position.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    pub name: Option<Arc<str>>,
    pub kind: ParamKind,
    pub index: usize,
}

/// Immutable metadata for one registered handler.
///
/// Built once at startup, shared read-only across all requests. The
/// interceptor list order is invocation order; the parameter list order
/// matches handler declaration order (positional binding).
pub struct RouteDescriptor {
    pub handler_name: Arc<str>,
    pub path_pattern: Arc<str>,
    pub methods: Vec<Method>,
    pub model_type: Arc<str>,
    pub view_path: Arc<str>,
    pub interceptor_names: Vec<Arc<str>>,
    pub parameters: Vec<ParameterDescriptor>,
    pub handler: HandlerFactory,
}

impl RouteDescriptor {
    pub fn builder(handler_name: &str) -> RouteBuilder {
        RouteBuilder::new(handler_name)
    }

    pub fn supports(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }
}

impl fmt::Debug for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDescriptor")
            .field("handler_name", &self.handler_name)
            .field("path_pattern", &self.path_pattern)
            .field("methods", &self.methods)
            .field("model_type", &self.model_type)
            .field("view_path", &self.view_path)
            .field("interceptor_names", &self.interceptor_names)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Route registration error
///
/// Returned by [`RouteBuilder::build`] when a registration record is
/// incomplete or violates a descriptor invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteConfigError {
    /// No handler factory was supplied for the route.
    MissingHandler { handler_name: String },
    /// The supported-verb set must be non-empty.
    NoSupportedMethods { handler_name: String },
    /// The path pattern was empty or did not start with `/`.
    InvalidPathPattern { handler_name: String, pattern: String },
}

impl fmt::Display for RouteConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteConfigError::MissingHandler { handler_name } => {
                write!(f, "route '{handler_name}' has no handler factory")
            }
            RouteConfigError::NoSupportedMethods { handler_name } => {
                write!(
                    f,
                    "route '{handler_name}' declares no supported HTTP methods"
                )
            }
            RouteConfigError::InvalidPathPattern {
                handler_name,
                pattern,
            } => {
                write!(
                    f,
                    "route '{handler_name}' has invalid path pattern '{pattern}' \
                    (must be non-empty and start with '/')"
                )
            }
        }
    }
}

impl std::error::Error for RouteConfigError {}

/// Builder for [`RouteDescriptor`] registration records.
pub struct RouteBuilder {
    handler_name: String,
    path_pattern: String,
    methods: Vec<Method>,
    model_type: String,
    view_path: String,
    interceptor_names: Vec<Arc<str>>,
    parameters: Vec<ParameterDescriptor>,
    handler: Option<HandlerFactory>,
}

impl RouteBuilder {
    pub fn new(handler_name: &str) -> Self {
        Self {
            handler_name: handler_name.to_string(),
            path_pattern: String::new(),
            methods: Vec::new(),
            model_type: "json".to_string(),
            view_path: String::new(),
            interceptor_names: Vec::new(),
            parameters: Vec::new(),
            handler: None,
        }
    }

    pub fn path(mut self, pattern: &str) -> Self {
        self.path_pattern = pattern.to_string();
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
        self
    }

    pub fn model_type(mut self, model_type: &str) -> Self {
        self.model_type = model_type.to_string();
        self
    }

    pub fn view_path(mut self, view_path: &str) -> Self {
        self.view_path = view_path.to_string();
        self
    }

    /// Append an interceptor. Declaration order is invocation order.
    pub fn interceptor(mut self, name: &str) -> Self {
        self.interceptor_names.push(Arc::from(name));
        self
    }

    /// Append an unnamed parameter. Declaration order is binding order.
    pub fn param(self, kind: ParamKind) -> Self {
        self.push_param(kind, None)
    }

    /// Append a named parameter (resolved against request parameters).
    pub fn param_named(self, kind: ParamKind, name: &str) -> Self {
        self.push_param(kind, Some(Arc::from(name)))
    }

    fn push_param(mut self, kind: ParamKind, name: Option<Arc<str>>) -> Self {
        let index = self.parameters.len();
        self.parameters.push(ParameterDescriptor { name, kind, index });
        self
    }

    /// Per-request handler provisioning; the factory runs at most once
    /// per invocation context.
    pub fn handler_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn Handler> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(factory));
        self
    }

    /// Share one stateless handler instance across all requests.
    pub fn shared_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handler = Some(Arc::new(move || handler.clone()));
        self
    }

    pub fn build(self) -> Result<RouteDescriptor, RouteConfigError> {
        let handler = self.handler.ok_or_else(|| RouteConfigError::MissingHandler {
            handler_name: self.handler_name.clone(),
        })?;
        if self.methods.is_empty() {
            return Err(RouteConfigError::NoSupportedMethods {
                handler_name: self.handler_name,
            });
        }
        if self.path_pattern.is_empty() || !self.path_pattern.starts_with('/') {
            return Err(RouteConfigError::InvalidPathPattern {
                handler_name: self.handler_name,
                pattern: self.path_pattern,
            });
        }
        Ok(RouteDescriptor {
            handler_name: Arc::from(self.handler_name.as_str()),
            path_pattern: Arc::from(self.path_pattern.as_str()),
            methods: self.methods,
            model_type: Arc::from(self.model_type.as_str()),
            view_path: Arc::from(self.view_path.as_str()),
            interceptor_names: self.interceptor_names,
            parameters: self.parameters,
            handler,
        })
    }
}

/// Successful resolution: the matched descriptor plus any path
/// parameters extracted from the URI.
#[derive(Debug, Clone)]
pub struct RouteResolution {
    pub descriptor: Arc<RouteDescriptor>,
    pub path_params: ParamVec,
}

/// Pure lookup from a request URI to a route descriptor.
///
/// Must be deterministic: identical URIs yield the same descriptor for
/// the lifetime of the table. Verb support is checked by the dispatcher,
/// not here.
pub trait RouteResolver: Send + Sync {
    fn resolve(&self, uri: &str) -> Option<RouteResolution>;
}

/// Default [`RouteResolver`]: literal paths by map lookup, `{param}`
/// patterns by compiled regex in registration order.
#[derive(Default)]
pub struct RouteTable {
    exact: HashMap<String, Arc<RouteDescriptor>>,
    patterns: Vec<(Regex, Vec<Arc<str>>, Arc<RouteDescriptor>)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor. A later registration for the same literal
    /// path replaces the earlier one; overlapping patterns resolve in
    /// registration order.
    pub fn register(&mut self, descriptor: RouteDescriptor) {
        let descriptor = Arc::new(descriptor);
        let pattern = descriptor.path_pattern.to_string();

        info!(
            handler_name = %descriptor.handler_name,
            path_pattern = %pattern,
            methods = ?descriptor.methods,
            "Route registered"
        );

        if pattern.contains('{') {
            let (regex, param_names) = Self::path_to_regex(&pattern);
            self.patterns.push((regex, param_names, descriptor));
        } else if let Some(old) = self.exact.insert(pattern.clone(), descriptor) {
            warn!(
                handler_name = %old.handler_name,
                path = %pattern,
                "Replaced existing route registration"
            );
        }
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.patterns.is_empty()
    }

    /// Convert a path pattern to a regex and its ordered parameter names.
    ///
    /// `/users/{id}` becomes `^/users/([^/]+)$` with names `["id"]`.
    fn path_to_regex(path: &str) -> (Regex, Vec<Arc<str>>) {
        let mut pattern = String::with_capacity(path.len() + 5);
        pattern.push('^');
        let mut param_names = Vec::with_capacity(path.matches('{').count());

        for segment in path.split('/') {
            if segment.starts_with('{') && segment.ends_with('}') {
                let name = segment.trim_start_matches('{').trim_end_matches('}');
                pattern.push_str("/([^/]+)");
                param_names.push(Arc::from(name));
            } else if !segment.is_empty() {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }

        pattern.push('$');
        let regex = Regex::new(&pattern).expect("failed to compile path pattern regex");
        (regex, param_names)
    }
}

impl RouteResolver for RouteTable {
    fn resolve(&self, uri: &str) -> Option<RouteResolution> {
        debug!(uri = %uri, "Route resolution attempt");

        if let Some(descriptor) = self.exact.get(uri) {
            debug!(uri = %uri, handler_name = %descriptor.handler_name, "Route matched (exact)");
            return Some(RouteResolution {
                descriptor: descriptor.clone(),
                path_params: ParamVec::new(),
            });
        }

        for (regex, names, descriptor) in &self.patterns {
            if let Some(caps) = regex.captures(uri) {
                let mut path_params = ParamVec::new();
                for (i, name) in names.iter().enumerate() {
                    if let Some(m) = caps.get(i + 1) {
                        path_params.push((name.clone(), m.as_str().to_string()));
                    }
                }
                debug!(
                    uri = %uri,
                    handler_name = %descriptor.handler_name,
                    path_params = ?path_params,
                    "Route matched (pattern)"
                );
                return Some(RouteResolution {
                    descriptor: descriptor.clone(),
                    path_params,
                });
            }
        }

        warn!(uri = %uri, "No route matched");
        None
    }
}
