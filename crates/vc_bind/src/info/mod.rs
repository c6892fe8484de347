//! Static type information.
//!
//! - [`Type`] / [`RawType`]: identity of a concrete type and of its definition.
//! - [`TypeInfo`]: the shape of a bindable type. Object types carry
//!   [`ObjectInfo`] with their fields, accessors, creators and generics.
//! - [`TypeExpr`]: a declared member type, possibly mentioning generic
//!   parameters of the declaring type.
//! - [`TypeDescriptor`]: a fully resolved type, used as cache key.
//! - [`Customization`]: one layer of binding customization.

// -----------------------------------------------------------------------------
// Modules

mod containers;
mod creator;
mod customization;
mod descriptor;
mod expr;
mod generics;
mod members;
mod modifiers;
mod object;
mod scalar;
mod ty;
mod type_info;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use generics::impl_generic_fn;
pub(crate) use ty::impl_type_fn;

// -----------------------------------------------------------------------------
// Exports

pub use containers::{FromEntriesFn, FromItemsFn, FromOptionFn};
pub use containers::{MapInfo, OptionalInfo, SequenceInfo};
pub use creator::{CreatorArgs, CreatorFn, CreatorInfo, CreatorParam};
pub use customization::Customization;
pub use descriptor::{BoundKind, MapKind, ScalarKind, SequenceKind, TypeDescriptor};
pub use expr::TypeExpr;
pub use generics::{GenericParam, Generics};
pub use members::{AccessorInfo, AccessorKind, FieldInfo};
pub use modifiers::Modifiers;
pub use object::{DefaultFn, ObjectInfo};
pub use scalar::{EnumInfo, FromVariantFn, OpaqueInfo, ScalarInfo};
pub use ty::{RawType, Type};
pub use type_info::{KindError, TypeInfo, TypeKind};
