use super::ArgumentResolver;
use crate::error::{DispatchError, ValidateError};
use crate::router::{ParamKind, ParameterDescriptor};
use crate::server::Request;
use serde_json::Value;

/// Resolves comma-separated numeric arrays from a named request
/// parameter, coercing element-wise.
///
/// Coercion is all-or-nothing: one unparseable element fails the whole
/// array as a validation error, never a partial result. A missing
/// parameter resolves to an empty array.
pub struct ArrayArgumentResolver;

impl ArrayArgumentResolver {
    fn parse_elements(
        raw: &str,
        param: &ParameterDescriptor,
    ) -> Result<Vec<Value>, DispatchError> {
        let name = param.name.as_deref().unwrap_or("?");
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|element| match param.kind {
                ParamKind::LongArray => element
                    .parse::<i64>()
                    .map(Value::from)
                    .map_err(|_| bad_element(name, element)),
                _ => element
                    .parse::<f64>()
                    .map(Value::from)
                    .map_err(|_| bad_element(name, element)),
            })
            .collect()
    }
}

fn bad_element(name: &str, element: &str) -> DispatchError {
    DispatchError::Validation(
        ValidateError::bad_request(&format!(
            "invalid numeric value '{element}' for parameter '{name}'"
        ))
        .with_field(name),
    )
}

impl ArgumentResolver for ArrayArgumentResolver {
    fn supports(&self, param: &ParameterDescriptor) -> bool {
        matches!(param.kind, ParamKind::LongArray | ParamKind::FloatArray)
    }

    fn resolve(
        &self,
        param: &ParameterDescriptor,
        request: &Request,
    ) -> Result<Value, DispatchError> {
        let name = param.name.as_deref().ok_or_else(|| {
            DispatchError::configuration(format!(
                "array parameter {} has no declared name",
                param.index
            ))
        })?;
        let raw = request.parameter(name).unwrap_or("");
        let elements = Self::parse_elements(raw, param)?;
        Ok(Value::Array(elements))
    }
}
