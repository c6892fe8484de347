//! Registry of bindable types.
//!
//! - [`TypeRegistry`]: maps [`TypeId`](core::any::TypeId)s, resolved
//!   [`TypeDescriptor`](crate::info::TypeDescriptor)s and raw types to their
//!   [`TypeInfo`](crate::info::TypeInfo). Decoding a value whose storage is
//!   [`DynValue`](crate::DynValue) looks the resolved type up here.
//! - [`TypeRegistryArc`]: a shared, lockable registry.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, [`TypeRegistry::new`] also registers every
//! non-generic type annotated with `#[bind(auto_register)]`. Registration is
//! collected at link time by the [`inventory`] crate.

// -----------------------------------------------------------------------------
// Modules

mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use type_registry::{TypeRegistry, TypeRegistryArc};
