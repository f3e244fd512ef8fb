//! # Router Module
//!
//! Route descriptors and route resolution for the dispatch core.
//!
//! ## Overview
//!
//! A [`RouteDescriptor`] is the immutable registration record for one
//! handler: the handler factory, the supported HTTP verbs, the
//! output-model type, the view path, the ordered interceptor list and the
//! ordered parameter descriptors. Descriptors are built once at startup
//! through [`RouteBuilder`] and shared read-only across all requests.
//!
//! Resolution is the [`RouteResolver`] contract: a pure, deterministic
//! lookup from a request URI to a descriptor. The crate ships
//! [`RouteTable`], which matches literal paths by map lookup and
//! `{param}` patterns by compiled regex in registration order, extracting
//! path parameters into the [`RouteResolution`].
//!
//! Verb checking is deliberately *not* part of resolution: the dispatcher
//! distinguishes "no such route" (404) from "route exists but not for
//! this verb" (server-error status), so the resolver matches on URI
//! alone and the descriptor carries the supported verb set.

mod core;

pub use core::{
    HandlerFactory, ParamKind, ParamVec, ParameterDescriptor, RouteBuilder, RouteConfigError,
    RouteDescriptor, RouteResolution, RouteResolver, RouteTable, MAX_INLINE_PARAMS,
};
