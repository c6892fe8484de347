//! Static storage of type information.
//!
//! [`Bind::type_info`](crate::Bind::type_info) returns a `&'static TypeInfo`;
//! implementations keep it in a `static` cell inside the function.
//!
//! - [`NonGenericTypeInfoCell`]: for non-generic types, a plain [`OnceLock`].
//! - [`GenericTypeInfoCell`]: for generic types. The `static` inside a generic
//!   function is shared by every instantiation, so the cell maps each
//!   [`TypeId`] to its own leaked entry.
//!
//! # Example
//!
//! ```
//! use vc_bind::cell::GenericTypeInfoCell;
//! use vc_bind::info::{TypeInfo, OpaqueInfo};
//! use vc_bind::{Bind, DynBind, access::{BindMut, BindRef}};
//!
//! struct Marker<T>(core::marker::PhantomData<T>);
//!
//! impl<T: Send + Sync + 'static> Bind for Marker<T> {
//!     fn type_info() -> &'static TypeInfo {
//!         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
//!         CELL.get_or_insert::<Self>(|| TypeInfo::Dynamic(OpaqueInfo::new::<Self>()))
//!     }
//! }
//! # impl<T: Send + Sync + 'static> DynBind for Marker<T> {
//! #     fn dyn_type_info(&self) -> &'static TypeInfo { Self::type_info() }
//! #     fn bind_ref(&self) -> BindRef<'_> { BindRef::Value(self) }
//! #     fn bind_mut(&mut self) -> BindMut<'_> { BindMut::Value(self) }
//! # }
//!
//! assert!(<Marker<u8>>::type_info().type_is::<Marker<u8>>());
//! assert!(<Marker<i8>>::type_info().type_is::<Marker<i8>>());
//! ```

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::hash::{FixedHashState, TypeIdMap};
use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// Static storage of the [`TypeInfo`] of a non-generic type.
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, initializing it with `f` on first use.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
    {
        self.0.get_or_init(f)
    }
}

impl Default for NonGenericTypeInfoCell {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// GenericTypeInfoCell

/// Static storage of the [`TypeInfo`]s of all instantiations of a generic type.
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::with_hasher(FixedHashState)))
    }

    /// Returns the info of `G`, initializing it with `f` on first use.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeInfo,
    ) -> &TypeInfo {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            // `f` may request other infos from this cell, so it runs unlocked.
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: TypeInfo) -> &'static TypeInfo {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(type_id)
            .or_insert_with(|| Box::leak(Box::new(value)))
    }
}

impl Default for GenericTypeInfoCell {
    fn default() -> Self {
        Self::new()
    }
}
