//! # Invocation Module
//!
//! Per-request invocation context and the interceptor chain runner.
//!
//! ## Overview
//!
//! An [`InvocationContext`] is created by the dispatcher once all gate
//! checks pass and lives exactly as long as the request. It combines the
//! matched route descriptor, the bound model and the raw request/response
//! handles with lazily memoized derived state: the handler instance, the
//! materialized interceptor chain and the resolved parameter values. Each
//! lazy field is computed at most once; because a context is owned by a
//! single request flow, memoization is a plain `Option` field with no
//! locking.
//!
//! ## Chain execution
//!
//! [`InvocationContext::invoke`] is the single entry point serving both
//! interceptors and the terminal handler step. A cursor tracks the next
//! unconsumed interceptor: if one remains, it is invoked and decides
//! whether to call `ctx.invoke()` again (continuing the chain) or return
//! its own value (short-circuiting — the handler and all later
//! interceptors are skipped). When the cursor is exhausted, the handler
//! runs with the resolved parameter values.
//!
//! ```rust,ignore
//! struct CacheInterceptor;
//!
//! impl Interceptor for CacheInterceptor {
//!     fn invoke(&self, ctx: &mut InvocationContext<'_>) -> Result<Value, DispatchError> {
//!         if let Some(hit) = lookup_cache(ctx.request()) {
//!             return Ok(hit); // handler never runs
//!         }
//!         ctx.invoke() // delegate to the rest of the chain
//!     }
//! }
//! ```

mod core;

pub use core::{
    ExecutionState, Handler, Interceptor, InterceptorRegistry, InvocationContext,
};
