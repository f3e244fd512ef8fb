use super::ArgumentResolver;
use crate::error::DispatchError;
use crate::router::{ParamKind, ParameterDescriptor};
use crate::server::Request;
use serde_json::Value;

/// Resolves text-typed parameters to the plain value of the request
/// parameter with the declared name. An absent parameter resolves to
/// `null`; primitive coercion belongs to the handler.
pub struct TextArgumentResolver;

impl ArgumentResolver for TextArgumentResolver {
    fn supports(&self, param: &ParameterDescriptor) -> bool {
        param.kind == ParamKind::Text
    }

    fn resolve(
        &self,
        param: &ParameterDescriptor,
        request: &Request,
    ) -> Result<Value, DispatchError> {
        let name = param.name.as_deref().ok_or_else(|| {
            DispatchError::configuration(format!(
                "text parameter {} has no declared name",
                param.index
            ))
        })?;
        Ok(request
            .parameter(name)
            .map(|v| Value::String(v.to_string()))
            .unwrap_or(Value::Null))
    }
}
