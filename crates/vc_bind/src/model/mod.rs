//! Class and property models.
//!
//! A [`ClassModel`] describes how one resolved object type is read and
//! written: its ordered [`PropertyModel`]s and an optional [`CreatorModel`].
//!
//! ## Building
//!
//! 1. Properties of parent fields come first, in parent declaration order.
//!    A property declared again by a more derived type replaces the
//!    inherited one in place, even when only an accessor is redeclared.
//! 2. A field with a `STATIC`, `TRANSIENT` or `SYNTHETIC` modifier never
//!    becomes a property.
//! 3. A property is readable through its visible getter, else its visible
//!    field; writable through its visible setter, else its visible field.
//!    A transient customization removes the corresponding side. Properties
//!    with neither side are dropped.
//! 4. Member types are resolved against the generic bindings of the
//!    requested descriptor.
//! 5. The explicit order of the type comes first; the remaining properties
//!    follow the ordering strategy applied to their write names.
//! 6. Write names must be unique among readable properties and read names
//!    among writable ones.
//! 7. Designated creators are eligible if any exist, otherwise every creator
//!    is. At most one may be eligible and all its parameters need a name.

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod cache;
mod class;
mod property;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use builder::build;

// -----------------------------------------------------------------------------
// Exports

pub use cache::ModelCache;
pub use class::{ClassModel, CreatorModel, CreatorParamModel};
pub use property::{Access, Held, Member, PropertyModel, SideModel};
