use super::ArgumentResolver;
use crate::error::DispatchError;
use crate::router::{ParamKind, ParameterDescriptor};
use crate::server::Request;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Paging parameters carried as a handler argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    pub page: i64,
    pub rows: i64,
}

/// Lenient numeric coercion: missing or unparseable input yields the
/// sentinel `0`, never an error.
fn cast_to_i64(value: Option<&str>) -> i64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// Resolves paging-typed parameters from the `page` and `rows` request
/// parameters.
pub struct PagingArgumentResolver;

impl ArgumentResolver for PagingArgumentResolver {
    fn supports(&self, param: &ParameterDescriptor) -> bool {
        param.kind == ParamKind::Paging
    }

    fn resolve(
        &self,
        _param: &ParameterDescriptor,
        request: &Request,
    ) -> Result<Value, DispatchError> {
        let paging = Paging {
            page: cast_to_i64(request.parameter("page")),
            rows: cast_to_i64(request.parameter("rows")),
        };
        Ok(json!({ "page": paging.page, "rows": paging.rows }))
    }
}
