//! Tests for the dispatcher's validation gates and error translation.
//!
//! # Test Coverage
//!
//! - Gate ordering: empty URI, missing collaborators, route resolution,
//!   verb support, model factory lookup, model creation
//! - Success path: chain execution followed by model submission
//! - Error path: validation failures, unhandled failures, committed
//!   responses that can no longer be rewritten

use http::Method;
use routier::error::ValidateError;
use routier::invocation::{Handler, InvocationContext};
use routier::model::{Model, ModelFactory, View, MODEL_KEY};
use routier::server::{Request, Response};
use routier::{
    DispatchConfig, DispatchError, Dispatcher, MessageSource, ParamKind, RouteDescriptor,
    RouteTable,
};
use serde_json::{json, Value};
use std::sync::Arc;

mod tracing_util;
use tracing_util::TestTracing;

struct GreetingHandler;

impl Handler for GreetingHandler {
    fn invoke(
        &self,
        _args: &[Value],
        ctx: &mut InvocationContext<'_>,
    ) -> Result<Value, DispatchError> {
        ctx.model().put("greeting", json!("hello"));
        Ok(Value::Null)
    }
}

struct EchoIdHandler;

impl Handler for EchoIdHandler {
    fn invoke(
        &self,
        args: &[Value],
        ctx: &mut InvocationContext<'_>,
    ) -> Result<Value, DispatchError> {
        ctx.model().put("id", args[0].clone());
        Ok(Value::Null)
    }
}

struct FailingHandler;

impl Handler for FailingHandler {
    fn invoke(
        &self,
        _args: &[Value],
        _ctx: &mut InvocationContext<'_>,
    ) -> Result<Value, DispatchError> {
        Err(anyhow::anyhow!("backend exploded").into())
    }
}

struct RejectingHandler;

impl Handler for RejectingHandler {
    fn invoke(
        &self,
        _args: &[Value],
        _ctx: &mut InvocationContext<'_>,
    ) -> Result<Value, DispatchError> {
        Err(ValidateError::new("{user.notfound}", 404)
            .with_args(vec![json!(42)])
            .with_field("id")
            .into())
    }
}

struct CommitThenFailHandler;

impl Handler for CommitThenFailHandler {
    fn invoke(
        &self,
        _args: &[Value],
        ctx: &mut InvocationContext<'_>,
    ) -> Result<Value, DispatchError> {
        ctx.response_mut().write_json(200, &json!({ "ok": true }));
        Err(anyhow::anyhow!("failure after the body went out").into())
    }
}

fn route(name: &str, pattern: &str, handler: Arc<dyn Handler>) -> RouteDescriptor {
    RouteDescriptor::builder(name)
        .path(pattern)
        .method(Method::GET)
        .shared_handler(handler)
        .build()
        .unwrap()
}

fn build_dispatcher(table: RouteTable) -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    dispatcher.set_routes(Arc::new(table));
    dispatcher.set_config(Arc::new(DispatchConfig::new()));
    dispatcher
}

#[test]
fn test_success_submits_json_model() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table.register(route("greet", "/greet", Arc::new(GreetingHandler)));
    let dispatcher = build_dispatcher(table);

    let mut request = Request::new(Method::GET, "/greet");
    let mut response = Response::new();
    dispatcher.handle(Method::GET, "/greet", &mut request, &mut response);

    assert_eq!(response.status(), 200);
    assert_eq!(response.body_string(), "{\"greeting\":\"hello\"}");
    assert_eq!(response.header("content-type"), Some("application/json"));
}

#[test]
fn test_route_not_found_is_404_with_uri() {
    let _tracing = TestTracing::init();
    let dispatcher = build_dispatcher(RouteTable::new());

    let mut request = Request::new(Method::GET, "/missing/page");
    let mut response = Response::new();
    dispatcher.handle(Method::GET, "/missing/page", &mut request, &mut response);

    assert_eq!(response.status(), 404);
    assert_eq!(response.body_string(), "Not Found Page! /missing/page");
}

#[test]
fn test_unsupported_method_uses_error_status() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table.register(route("greet", "/greet", Arc::new(GreetingHandler)));
    let dispatcher = build_dispatcher(table);

    let mut request = Request::new(Method::POST, "/greet");
    let mut response = Response::new();
    dispatcher.handle(Method::POST, "/greet", &mut request, &mut response);

    assert_eq!(response.status(), 500);
    assert_eq!(response.body_string(), "No Support Method! /greet");
}

#[test]
fn test_empty_uri_is_server_error() {
    let _tracing = TestTracing::init();
    let dispatcher = build_dispatcher(RouteTable::new());

    let mut request = Request::new(Method::GET, "");
    let mut response = Response::new();
    dispatcher.handle(Method::GET, "", &mut request, &mut response);

    assert_eq!(response.status(), 500);
    assert!(response.body_string().contains("Server Error!"));
}

#[test]
fn test_missing_collaborators_is_server_error() {
    let _tracing = TestTracing::init();
    let dispatcher = Dispatcher::new();

    let mut request = Request::new(Method::GET, "/any");
    let mut response = Response::new();
    dispatcher.handle(Method::GET, "/any", &mut request, &mut response);

    assert_eq!(response.status(), 500);
    assert!(response.body_string().contains("Server Error! /any"));
}

#[test]
fn test_unregistered_model_type_is_server_error() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table.register(
        RouteDescriptor::builder("greet")
            .path("/greet")
            .method(Method::GET)
            .model_type("csv")
            .shared_handler(Arc::new(GreetingHandler))
            .build()
            .unwrap(),
    );
    let dispatcher = build_dispatcher(table);

    let mut request = Request::new(Method::GET, "/greet");
    let mut response = Response::new();
    dispatcher.handle(Method::GET, "/greet", &mut request, &mut response);

    assert_eq!(response.status(), 500);
    assert!(response.body_string().contains("Server Error!"));
}

struct NoneFactory;

impl ModelFactory for NoneFactory {
    fn create(&self, _view: &Arc<dyn View>, _view_path: &str) -> Option<Arc<dyn Model>> {
        None
    }
}

#[test]
fn test_factory_returning_no_model_is_server_error() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table.register(
        RouteDescriptor::builder("greet")
            .path("/greet")
            .method(Method::GET)
            .model_type("broken")
            .shared_handler(Arc::new(GreetingHandler))
            .build()
            .unwrap(),
    );

    let mut config = DispatchConfig::new();
    config.register_factory("broken", Arc::new(NoneFactory));
    let mut dispatcher = Dispatcher::new();
    dispatcher.set_routes(Arc::new(table));
    dispatcher.set_config(Arc::new(config));

    let mut request = Request::new(Method::GET, "/greet");
    let mut response = Response::new();
    dispatcher.handle(Method::GET, "/greet", &mut request, &mut response);

    assert_eq!(response.status(), 500);
    assert!(response.body_string().contains("Server Error!"));
}

#[test]
fn test_model_attached_to_request_attributes() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table.register(route("greet", "/greet", Arc::new(GreetingHandler)));
    let dispatcher = build_dispatcher(table);

    let mut request = Request::new(Method::GET, "/greet");
    let mut response = Response::new();
    dispatcher.handle(Method::GET, "/greet", &mut request, &mut response);

    assert!(request.attribute::<Arc<dyn Model>>(MODEL_KEY).is_some());
}

#[test]
fn test_path_params_reach_the_handler() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table.register(
        RouteDescriptor::builder("user_detail")
            .path("/users/{id}")
            .method(Method::GET)
            .param_named(ParamKind::Text, "id")
            .shared_handler(Arc::new(EchoIdHandler))
            .build()
            .unwrap(),
    );
    let dispatcher = build_dispatcher(table);

    let mut request = Request::new(Method::GET, "/users/1234");
    let mut response = Response::new();
    dispatcher.handle(Method::GET, "/users/1234", &mut request, &mut response);

    assert_eq!(response.status(), 200);
    assert_eq!(response.body_string(), "{\"id\":\"1234\"}");
}

#[test]
fn test_unhandled_failure_uses_error_status_and_message() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table.register(route("boom", "/boom", Arc::new(FailingHandler)));
    let dispatcher = build_dispatcher(table);

    let mut request = Request::new(Method::GET, "/boom");
    let mut response = Response::new();
    dispatcher.handle(Method::GET, "/boom", &mut request, &mut response);

    assert_eq!(response.status(), 500);
    assert_eq!(response.body_string(), "backend exploded");
}

#[test]
fn test_committed_response_survives_late_failure() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table.register(route("late", "/late", Arc::new(CommitThenFailHandler)));
    let dispatcher = build_dispatcher(table);

    let mut request = Request::new(Method::GET, "/late");
    let mut response = Response::new();
    dispatcher.handle(Method::GET, "/late", &mut request, &mut response);

    assert_eq!(response.status(), 200);
    assert_eq!(response.body_string(), "{\"ok\":true}");
}

#[test]
fn test_validation_failure_without_source_is_verbatim() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table.register(route("reject", "/reject", Arc::new(RejectingHandler)));
    let dispatcher = build_dispatcher(table);

    let mut request = Request::new(Method::GET, "/reject");
    let mut response = Response::new();
    dispatcher.handle(Method::GET, "/reject", &mut request, &mut response);

    assert_eq!(response.status(), 404);
    assert_eq!(response.body_string(), "{user.notfound}");
}

struct TestMessages;

impl MessageSource for TestMessages {
    fn format(&self, key: &str, args: &[Value], _locale: &str) -> Option<String> {
        match key {
            "user.notfound" => {
                let id = args.first().and_then(Value::as_i64).unwrap_or_default();
                Some(format!("User {id} missing"))
            }
            _ => None,
        }
    }
}

#[test]
fn test_validation_failure_resolved_through_message_source() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table.register(route("reject", "/reject", Arc::new(RejectingHandler)));

    let mut config = DispatchConfig::new();
    config.set_message_source(Arc::new(TestMessages));
    let mut dispatcher = Dispatcher::new();
    dispatcher.set_routes(Arc::new(table));
    dispatcher.set_config(Arc::new(config));

    let mut request = Request::new(Method::GET, "/reject");
    let mut response = Response::new();
    dispatcher.handle(Method::GET, "/reject", &mut request, &mut response);

    assert_eq!(response.status(), 404);
    assert_eq!(response.body_string(), "User 42 missing");
}
