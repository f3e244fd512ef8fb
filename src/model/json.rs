use super::{Model, ModelFactory, View};
use crate::server::{Request, Response};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex};

/// Model type name routes use to select this factory.
pub const JSON_MODEL: &str = "json";

/// Response model that serializes its data map as a JSON object.
pub struct JsonModel {
    status: AtomicU16,
    data: Mutex<Map<String, Value>>,
}

impl JsonModel {
    pub fn new() -> Self {
        Self {
            status: AtomicU16::new(200),
            data: Mutex::new(Map::new()),
        }
    }

    /// Snapshot of the staged data, mainly for tests and interceptors.
    pub fn data(&self) -> Map<String, Value> {
        self.data.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

impl Default for JsonModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for JsonModel {
    fn put(&self, key: &str, value: Value) {
        if let Ok(mut data) = self.data.lock() {
            data.insert(key.to_string(), value);
        }
    }

    fn set_status(&self, status: u16) {
        self.status.store(status, Ordering::Relaxed);
    }

    fn submit(&self, _request: &Request, response: &mut Response) -> anyhow::Result<()> {
        let body = Value::Object(self.data());
        response.write_json(self.status.load(Ordering::Relaxed), &body);
        Ok(())
    }
}

/// Factory for [`JsonModel`]; ignores the view since JSON needs none.
pub struct JsonModelFactory;

impl ModelFactory for JsonModelFactory {
    fn create(&self, _view: &Arc<dyn View>, _view_path: &str) -> Option<Arc<dyn Model>> {
        Some(Arc::new(JsonModel::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use serde_json::json;

    #[test]
    fn test_json_model_submit() {
        let model = JsonModel::new();
        model.put("name", json!("ferris"));
        model.set_status(201);

        let req = Request::new(Method::GET, "/");
        let mut res = Response::new();
        model.submit(&req, &mut res).unwrap();

        assert_eq!(res.status(), 201);
        assert_eq!(res.body_string(), "{\"name\":\"ferris\"}");
        assert_eq!(res.header("content-type"), Some("application/json"));
    }
}
