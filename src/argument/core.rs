use crate::error::DispatchError;
use crate::router::ParameterDescriptor;
use crate::server::Request;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// A strategy producing one handler parameter's value from the request.
///
/// Resolvers are polymorphic over the `supports` capability test; the
/// registry selects the first registered resolver that accepts the
/// descriptor.
pub trait ArgumentResolver: Send + Sync {
    fn supports(&self, param: &ParameterDescriptor) -> bool;

    fn resolve(&self, param: &ParameterDescriptor, request: &Request)
        -> Result<Value, DispatchError>;
}

/// Ordered set of argument resolvers; first match wins.
pub struct ArgumentResolverRegistry {
    resolvers: Vec<Arc<dyn ArgumentResolver>>,
}

impl ArgumentResolverRegistry {
    /// An empty registry. Parameters only resolve through resolvers
    /// registered explicitly.
    pub fn new() -> Self {
        Self {
            resolvers: Vec::new(),
        }
    }

    /// A registry pre-populated with the shipped resolvers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(super::SessionArgumentResolver));
        registry.register(Arc::new(super::PagingArgumentResolver));
        registry.register(Arc::new(super::ArrayArgumentResolver));
        registry.register(Arc::new(super::TextArgumentResolver));
        registry
    }

    /// Append a resolver. Registration order is selection order.
    pub fn register(&mut self, resolver: Arc<dyn ArgumentResolver>) {
        self.resolvers.push(resolver);
    }

    /// Produce the value for one parameter descriptor.
    ///
    /// No matching resolver is a configuration error: binding fails fast
    /// instead of passing a silent null into the handler.
    pub fn resolve(
        &self,
        param: &ParameterDescriptor,
        request: &Request,
    ) -> Result<Value, DispatchError> {
        for resolver in &self.resolvers {
            if resolver.supports(param) {
                let value = resolver.resolve(param, request)?;
                debug!(
                    index = param.index,
                    kind = ?param.kind,
                    "Argument resolved"
                );
                return Ok(value);
            }
        }
        Err(DispatchError::configuration(format!(
            "no argument resolver supports parameter {} (kind {:?}, name {:?})",
            param.index, param.kind, param.name
        )))
    }
}

impl Default for ArgumentResolverRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
