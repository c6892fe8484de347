//! Type resolution.
//!
//! A member's declared type is a [`TypeExpr`](crate::info::TypeExpr) that may
//! mention the generic parameters of the declaring type. [`resolve`] turns it
//! into a [`TypeDescriptor`](crate::info::TypeDescriptor) using the
//! [`BindingContext`] of the enclosing scope:
//!
//! - a bare parameter takes its binding, or falls back to its declared bound;
//! - a parameterized type resolves each argument and rebuilds the descriptor;
//! - a wildcard resolves to its first bound with a concrete resolution, in
//!   declaration order;
//! - a parameter met again while its own bound is being resolved stops there
//!   and yields the bound with erased arguments.
//!
//! [`reconcile`] then merges the resolved descriptor with the descriptor of
//! the member's storage type.

// -----------------------------------------------------------------------------
// Modules

mod context;
mod reconcile;
mod resolver;

// -----------------------------------------------------------------------------
// Exports

pub use context::{Binding, BindingContext};
pub use reconcile::reconcile;
pub use resolver::resolve;
