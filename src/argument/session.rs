use super::ArgumentResolver;
use crate::error::DispatchError;
use crate::router::{ParamKind, ParameterDescriptor};
use crate::server::Request;
use serde_json::Value;

/// Session attribute under which the host's authentication layer stores
/// the signed-in session value.
pub const SESSION_KEY: &str = "routier.session";

/// Resolves session-typed parameters to the value stored under
/// [`SESSION_KEY`]. An absent session resolves to `null`.
pub struct SessionArgumentResolver;

impl ArgumentResolver for SessionArgumentResolver {
    fn supports(&self, param: &ParameterDescriptor) -> bool {
        param.kind == ParamKind::Session
    }

    fn resolve(
        &self,
        _param: &ParameterDescriptor,
        request: &Request,
    ) -> Result<Value, DispatchError> {
        Ok(request
            .session_attribute(SESSION_KEY)
            .cloned()
            .unwrap_or(Value::Null))
    }
}
