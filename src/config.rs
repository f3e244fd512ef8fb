//! Dispatch configuration.
//!
//! Holds everything the dispatcher needs beyond the route table: the
//! model factory registry, the view engine, the optional validation
//! message source, the locale and the generic server-error status used
//! for configuration/support failures and uncaught errors.
//!
//! Built programmatically at startup, then shared read-only across all
//! requests.
//!
//! ## Environment Variables
//!
//! ### `ROUTIER_ERROR_STATUS`
//!
//! Overrides the generic server-error status (decimal, e.g. `503`).
//! Default: `500`.

use crate::error::MessageSource;
use crate::model::{
    JsonModelFactory, ModelFactory, NullView, PageModelFactory, View, JSON_MODEL, PAGE_MODEL,
};
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

const DEFAULT_ERROR_STATUS: u16 = 500;

/// Process-wide dispatch configuration, read-only after startup.
pub struct DispatchConfig {
    error_status: u16,
    view: Arc<dyn View>,
    factories: HashMap<String, Arc<dyn ModelFactory>>,
    message_source: Option<Arc<dyn MessageSource>>,
    locale: String,
}

impl DispatchConfig {
    /// Configuration with the shipped model factories (`"json"`,
    /// `"page"`), a null view and the environment-derived error status.
    pub fn new() -> Self {
        let mut factories: HashMap<String, Arc<dyn ModelFactory>> = HashMap::new();
        factories.insert(JSON_MODEL.to_string(), Arc::new(JsonModelFactory));
        factories.insert(PAGE_MODEL.to_string(), Arc::new(PageModelFactory));
        Self {
            error_status: error_status_from_env(),
            view: Arc::new(NullView),
            factories,
            message_source: None,
            locale: "en".to_string(),
        }
    }

    pub fn set_error_status(&mut self, status: u16) {
        self.error_status = status;
    }

    pub fn set_view(&mut self, view: Arc<dyn View>) {
        self.view = view;
    }

    /// Register a model factory under an output-model type name.
    pub fn register_factory(&mut self, model_type: &str, factory: Arc<dyn ModelFactory>) {
        self.factories.insert(model_type.to_string(), factory);
    }

    pub fn set_message_source(&mut self, source: Arc<dyn MessageSource>) {
        self.message_source = Some(source);
    }

    pub fn set_locale(&mut self, locale: &str) {
        self.locale = locale.to_string();
    }

    /// Generic server-error status for configuration/support failures
    /// and uncaught errors.
    pub fn error_status(&self) -> u16 {
        self.error_status
    }

    pub fn view(&self) -> &Arc<dyn View> {
        &self.view
    }

    pub fn factory(&self, model_type: &str) -> Option<&Arc<dyn ModelFactory>> {
        self.factories.get(model_type)
    }

    pub fn message_source(&self) -> Option<&dyn MessageSource> {
        self.message_source.as_deref()
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn error_status_from_env() -> u16 {
    match env::var("ROUTIER_ERROR_STATUS") {
        Ok(val) => val.trim().parse().unwrap_or(DEFAULT_ERROR_STATUS),
        Err(_) => DEFAULT_ERROR_STATUS,
    }
}
