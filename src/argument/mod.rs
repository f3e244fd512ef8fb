//! # Argument Module
//!
//! Capability-matched argument resolvers for handler parameters.
//!
//! Each handler parameter is described by a
//! [`crate::router::ParameterDescriptor`]; the
//! [`ArgumentResolverRegistry`] walks its resolvers in registration order
//! and the first whose `supports` test accepts the descriptor produces
//! the value. Binding is strict: a parameter no resolver supports is a
//! configuration error raised at invocation time, never a silent `null`.
//!
//! Shipped resolvers:
//!
//! - [`SessionArgumentResolver`] — the session value stored under
//!   [`SESSION_KEY`].
//! - [`PagingArgumentResolver`] — `page`/`rows` query parameters with
//!   lenient numeric coercion (sentinel `0` on parse failure).
//! - [`ArrayArgumentResolver`] — comma-separated numeric arrays, coerced
//!   element-wise; one bad element fails the whole array.
//! - [`TextArgumentResolver`] — the plain text value of a named request
//!   parameter.

mod array;
mod core;
mod paging;
mod session;
mod text;

pub use array::ArrayArgumentResolver;
pub use core::{ArgumentResolver, ArgumentResolverRegistry};
pub use paging::{Paging, PagingArgumentResolver};
pub use session::{SessionArgumentResolver, SESSION_KEY};
pub use text::TextArgumentResolver;
