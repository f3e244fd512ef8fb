//! # Routier
//!
//! **Routier** is the request-dispatch core of an MVC layer: it resolves
//! an incoming (method, URI) pair to a registered handler, assembles a
//! per-request invocation context, runs a short-circuitable chain of
//! interceptors, binds handler parameters through a pluggable resolver
//! registry, invokes the handler and routes its result — or any failure —
//! to a response-producing model.
//!
//! ## Overview
//!
//! Routier is host-server agnostic. Whatever HTTP stack accepts
//! connections parses its native request into a [`server::Request`] and
//! calls [`Dispatcher::handle`] with a mutable [`server::Response`] to
//! fill; the core itself is fully synchronous, one `handle` invocation
//! per inbound request.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`router`]** - Immutable route descriptors and URI → descriptor resolution
//! - **[`dispatcher`]** - Gate validation, orchestration and error translation
//! - **[`invocation`]** - Per-request context and the interceptor chain runner
//! - **[`argument`]** - Capability-matched handler parameter resolvers
//! - **[`model`]** - Response models, model factories and the view boundary
//! - **[`server`]** - Request/response handles shared with the host server
//! - **[`config`]** - Process-wide dispatch configuration
//! - **[`error`]** - The failure taxonomy and validation message resolution
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host as Host Server
//!     participant Dispatcher
//!     participant Resolver as Route Resolver
//!     participant Factory as Model Factory
//!     participant Chain as Interceptor Chain
//!     participant Handler
//!     participant Model
//!
//!     Host->>Dispatcher: handle(method, uri, request, response)
//!     Dispatcher->>Resolver: resolve(uri)
//!
//!     alt No Route Match
//!         Dispatcher-->>Host: 404 Not Found
//!     end
//!
//!     Dispatcher->>Dispatcher: verb supported?
//!     Dispatcher->>Factory: create(view, view_path)
//!     Dispatcher->>Chain: ctx.invoke()
//!
//!     Chain->>Chain: interceptor 1 .. n (may short-circuit)
//!     Chain->>Handler: invoke(resolved args, ctx)
//!     Handler-->>Chain: result
//!
//!     alt Validation Failure
//!         Dispatcher-->>Host: declared status + resolved message
//!     else Unhandled Failure
//!         Dispatcher-->>Host: server-error status (if uncommitted)
//!     end
//!
//!     Dispatcher->>Model: submit(request, response)
//!     Model-->>Host: rendered response
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use routier::{DispatchConfig, Dispatcher, RouteDescriptor, RouteTable};
//! use http::Method;
//! use std::sync::Arc;
//!
//! let mut table = RouteTable::new();
//! table.register(
//!     RouteDescriptor::builder("user_detail")
//!         .path("/users/{id}")
//!         .method(Method::GET)
//!         .param_named(routier::ParamKind::Text, "id")
//!         .shared_handler(Arc::new(UserDetailHandler))
//!         .build()?,
//! );
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.set_routes(Arc::new(table));
//! dispatcher.set_config(Arc::new(DispatchConfig::new()));
//!
//! // per request, from the host server:
//! dispatcher.handle(method, uri, &mut request, &mut response);
//! ```
//!
//! ## Key Architectural Patterns
//!
//! 1. **Static registration**: Routes are typed registration records —
//!    no runtime type inspection anywhere on the dispatch path.
//! 2. **Chain-of-responsibility**: A single `invoke()` entry point serves
//!    interceptors and the terminal handler step; an interceptor that
//!    never re-enters the context aborts handling with its own result.
//! 3. **Strict binding**: A parameter no resolver supports fails fast at
//!    invocation time instead of passing a silent null.
//! 4. **Boundary-resolved messages**: Validation message templates are
//!    looked up against the message source just before the response is
//!    written, never earlier.
//! 5. **Commit-aware errors**: Failures after the response has started
//!    transmitting are logged, never allowed to rewrite the status.

pub mod argument;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod ids;
pub mod invocation;
pub mod model;
pub mod router;
pub mod server;

pub use config::DispatchConfig;
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, MessageSource, ValidateError, ValidationMessage};
pub use invocation::{ExecutionState, Handler, Interceptor, InvocationContext};
pub use router::{
    ParamKind, ParameterDescriptor, RouteBuilder, RouteConfigError, RouteDescriptor,
    RouteResolver, RouteTable,
};
