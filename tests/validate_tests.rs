//! Tests for validation failures and message-source resolution.

use routier::error::{ValidateError, ValidationMessage};
use routier::MessageSource;
use serde_json::{json, Value};

mod tracing_util;
use tracing_util::TestTracing;

struct Catalog;

impl MessageSource for Catalog {
    fn format(&self, key: &str, args: &[Value], locale: &str) -> Option<String> {
        match (key, locale) {
            ("user.notfound", "en") => {
                let id = args.first().and_then(Value::as_i64).unwrap_or_default();
                Some(format!("User {id} missing"))
            }
            ("user.notfound", "de") => {
                let id = args.first().and_then(Value::as_i64).unwrap_or_default();
                Some(format!("Benutzer {id} fehlt"))
            }
            _ => None,
        }
    }
}

#[test]
fn test_template_resolves_with_args() {
    let _tracing = TestTracing::init();
    let err = ValidateError::new("{user.notfound}", 404).with_args(vec![json!(42)]);
    assert_eq!(err.resolved_message(Some(&Catalog), "en"), "User 42 missing");
}

#[test]
fn test_locale_is_passed_through() {
    let _tracing = TestTracing::init();
    let err = ValidateError::new("{user.notfound}", 404).with_args(vec![json!(7)]);
    assert_eq!(err.resolved_message(Some(&Catalog), "de"), "Benutzer 7 fehlt");
}

#[test]
fn test_unknown_key_falls_back_to_raw() {
    let _tracing = TestTracing::init();
    let err = ValidateError::new("{order.invalid}", 400);
    assert_eq!(err.resolved_message(Some(&Catalog), "en"), "{order.invalid}");
}

#[test]
fn test_no_source_sends_braces_verbatim() {
    let _tracing = TestTracing::init();
    let err = ValidateError::new("{user.notfound}", 404);
    assert_eq!(err.resolved_message(None, "en"), "{user.notfound}");
}

#[test]
fn test_raw_message_ignores_the_source() {
    let _tracing = TestTracing::init();
    let err = ValidateError::bad_request("user id must be positive");
    assert_eq!(
        err.resolved_message(Some(&Catalog), "en"),
        "user id must be positive"
    );
}

#[test]
fn test_bad_request_default_status() {
    let _tracing = TestTracing::init();
    let err = ValidateError::bad_request("nope");
    assert_eq!(err.status(), 400);
    assert_eq!(err.code(), None);
    assert_eq!(err.field(), None);
}

#[test]
fn test_code_and_field_are_carried() {
    let _tracing = TestTracing::init();
    let err = ValidateError::new("{user.notfound}", 404)
        .with_code(1001)
        .with_field("user_id");
    assert_eq!(err.code(), Some(1001));
    assert_eq!(err.field(), Some("user_id"));
}

#[test]
fn test_blank_message_defaults_to_bad_request_text() {
    let _tracing = TestTracing::init();
    let err = ValidateError::bad_request("   ");
    assert_eq!(err.resolved_message(None, "en"), "Bad Request");
    assert_eq!(
        *err.message(),
        ValidationMessage::Raw("Bad Request".to_string())
    );
}

#[test]
fn test_braces_alone_are_not_a_template() {
    let _tracing = TestTracing::init();
    assert_eq!(
        ValidationMessage::parse("{}"),
        ValidationMessage::Raw("{}".to_string())
    );
}
