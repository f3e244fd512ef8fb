use super::{Model, ModelFactory, View};
use crate::server::{Request, Response};
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};

/// Model type name routes use to select this factory.
pub const PAGE_MODEL: &str = "page";

/// Response model that delegates rendering to the configured view.
///
/// Holds the view and view path it was bound to at creation; `submit`
/// hands both, plus the staged data, to the view engine.
pub struct PageModel {
    view: Arc<dyn View>,
    view_path: String,
    data: Mutex<Map<String, Value>>,
}

impl PageModel {
    pub fn new(view: Arc<dyn View>, view_path: &str) -> Self {
        Self {
            view,
            view_path: view_path.to_string(),
            data: Mutex::new(Map::new()),
        }
    }

    pub fn view_path(&self) -> &str {
        &self.view_path
    }
}

impl Model for PageModel {
    fn put(&self, key: &str, value: Value) {
        if let Ok(mut data) = self.data.lock() {
            data.insert(key.to_string(), value);
        }
    }

    fn set_status(&self, _status: u16) {
        // Page responses always render with the view's status handling.
    }

    fn submit(&self, request: &Request, response: &mut Response) -> anyhow::Result<()> {
        let data = self.data.lock().map(|d| d.clone()).unwrap_or_default();
        self.view.render(&self.view_path, &data, request, response)
    }
}

/// Factory for [`PageModel`]; binds the configured view and the route's
/// view path into each created model.
pub struct PageModelFactory;

impl ModelFactory for PageModelFactory {
    fn create(&self, view: &Arc<dyn View>, view_path: &str) -> Option<Arc<dyn Model>> {
        Some(Arc::new(PageModel::new(view.clone(), view_path)))
    }
}
