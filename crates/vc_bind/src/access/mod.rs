//! Runtime access to bindable values.
//!
//! - [`Bind`]: static side, provides the [`TypeInfo`](crate::info::TypeInfo).
//! - [`DynBind`]: object safe side, casts a value to its access kind through
//!   [`BindRef`] and [`BindMut`].
//! - [`Object`], [`Sequence`], [`MapAccess`], [`Variants`]: access per kind.
//! - [`DynValue`]: an owned value whose type is only known at runtime.

// -----------------------------------------------------------------------------
// Modules

mod bind;
mod dyn_value;
mod kind;
mod ops;

// -----------------------------------------------------------------------------
// Exports

pub use bind::{Bind, DynBind, downcast_value};
pub use dyn_value::DynValue;
pub use kind::{BindMut, BindRef};
pub use ops::{MapAccess, Object, Sequence, Variants};
