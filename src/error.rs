//! Failure taxonomy for the dispatch core.
//!
//! Every way a request can fail is one of the [`DispatchError`] variants.
//! The first three are produced by the dispatcher's own gate checks; the
//! last two surface from interceptor or handler execution. The dispatcher
//! translates each variant into a status code and client-visible message
//! at the response boundary, never earlier.

use serde_json::Value;
use std::fmt;

/// Well-known status used when a validation failure carries no status.
pub const DEFAULT_VALIDATION_STATUS: u16 = 400;

/// Resolves message keys to localized, argument-formatted text.
///
/// A validation message of the form `{some.key}` is looked up through the
/// configured source with the failure's positional arguments and locale.
/// Returning `None` means the key is unknown; the raw message is then sent
/// verbatim.
pub trait MessageSource: Send + Sync {
    fn format(&self, key: &str, args: &[Value], locale: &str) -> Option<String>;
}

/// A validation message, classified at the failure site.
///
/// `Raw` text is sent to the client as-is. A `Template` was written as
/// `{key}` and is resolved against a [`MessageSource`] just before the
/// response is written; if no source is configured (or the key is
/// unknown) the original raw text — braces included — is sent instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationMessage {
    Raw(String),
    Template { key: String, raw: String },
}

impl ValidationMessage {
    /// Classify a message string. Whitespace is trimmed first and an empty
    /// message falls back to `"Bad Request"`.
    pub fn parse(message: &str) -> Self {
        let raw = message.trim();
        let raw = if raw.is_empty() { "Bad Request" } else { raw };
        if raw.len() > 2 && raw.starts_with('{') && raw.ends_with('}') {
            ValidationMessage::Template {
                key: raw[1..raw.len() - 1].to_string(),
                raw: raw.to_string(),
            }
        } else {
            ValidationMessage::Raw(raw.to_string())
        }
    }

    /// Resolve to the final client-visible text.
    pub fn resolve(
        &self,
        source: Option<&dyn MessageSource>,
        args: &[Value],
        locale: &str,
    ) -> String {
        match self {
            ValidationMessage::Raw(raw) => raw.clone(),
            ValidationMessage::Template { key, raw } => source
                .and_then(|s| s.format(key, args, locale))
                .unwrap_or_else(|| raw.clone()),
        }
    }

    /// The raw form as written at the failure site.
    pub fn raw(&self) -> &str {
        match self {
            ValidationMessage::Raw(raw) => raw,
            ValidationMessage::Template { raw, .. } => raw,
        }
    }
}

/// A validation failure raised by a handler or interceptor.
///
/// Carries its own status code; the dispatcher sends it to the client
/// with the resolved message and stops processing.
#[derive(Debug, Clone)]
pub struct ValidateError {
    status: u16,
    code: Option<i32>,
    message: ValidationMessage,
    args: Vec<Value>,
    field: Option<String>,
}

impl ValidateError {
    pub fn new(message: &str, status: u16) -> Self {
        Self {
            status,
            code: None,
            message: ValidationMessage::parse(message),
            args: Vec::new(),
            field: None,
        }
    }

    /// Validation failure with the default 400 status.
    pub fn bad_request(message: &str) -> Self {
        Self::new(message, DEFAULT_VALIDATION_STATUS)
    }

    pub fn with_code(mut self, code: i32) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    pub fn with_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn message(&self) -> &ValidationMessage {
        &self.message
    }

    /// Final client-visible message, resolved against an optional source.
    pub fn resolved_message(&self, source: Option<&dyn MessageSource>, locale: &str) -> String {
        self.message.resolve(source, &self.args, locale)
    }
}

impl fmt::Display for ValidateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed ({}): {}", self.status, self.message.raw())
    }
}

impl std::error::Error for ValidateError {}

/// Everything that can terminate a dispatch before a normal submission.
#[derive(Debug)]
pub enum DispatchError {
    /// No route descriptor matched the request URI (404).
    RouteNotFound,
    /// A route matched but the request verb is not in its supported set.
    UnsupportedMethod,
    /// A required collaborator or registration is absent. `detail` is for
    /// the logs; the client only sees the generic server-error message.
    ConfigurationMissing { detail: String },
    /// A handler or interceptor rejected the request with its own status.
    Validation(ValidateError),
    /// Any other failure surfacing from chain execution.
    Unhandled(anyhow::Error),
}

impl DispatchError {
    pub fn configuration(detail: impl Into<String>) -> Self {
        DispatchError::ConfigurationMissing {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::RouteNotFound => write!(f, "no route matched the request uri"),
            DispatchError::UnsupportedMethod => {
                write!(f, "request method not supported by the matched route")
            }
            DispatchError::ConfigurationMissing { detail } => {
                write!(f, "configuration missing: {detail}")
            }
            DispatchError::Validation(e) => write!(f, "{e}"),
            DispatchError::Unhandled(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Validation(e) => Some(e),
            DispatchError::Unhandled(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<ValidateError> for DispatchError {
    fn from(e: ValidateError) -> Self {
        DispatchError::Validation(e)
    }
}

impl From<anyhow::Error> for DispatchError {
    fn from(e: anyhow::Error) -> Self {
        DispatchError::Unhandled(e)
    }
}
