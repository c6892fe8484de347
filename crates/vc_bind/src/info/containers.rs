use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::error::BindError;
use crate::info::{MapKind, SequenceKind, Type, TypeInfo, impl_type_fn};
use crate::{Bind, DynBind};

/// Builds a sequence from decoded items.
pub type FromItemsFn = fn(Vec<Box<dyn DynBind>>) -> Result<Box<dyn DynBind>, BindError>;

/// Builds a map from decoded entries.
pub type FromEntriesFn =
    fn(Vec<(Box<dyn DynBind>, Box<dyn DynBind>)>) -> Result<Box<dyn DynBind>, BindError>;

/// Builds an optional from a decoded inner value.
pub type FromOptionFn = fn(Option<Box<dyn DynBind>>) -> Result<Box<dyn DynBind>, BindError>;

// -----------------------------------------------------------------------------
// SequenceInfo

/// Type information of arrays and collections.
#[derive(Clone)]
pub struct SequenceInfo {
    ty: Type,
    kind: SequenceKind,
    item: fn() -> &'static TypeInfo,
    from_items: FromItemsFn,
}

impl SequenceInfo {
    impl_type_fn!(ty);

    #[inline]
    pub fn new<T: Bind, Item: Bind>(kind: SequenceKind, from_items: FromItemsFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
            item: Item::type_info,
            from_items,
        }
    }

    #[inline]
    pub const fn kind(&self) -> SequenceKind {
        self.kind
    }

    #[inline]
    pub fn item(&self) -> &'static TypeInfo {
        (self.item)()
    }

    #[inline]
    pub fn from_items(&self, items: Vec<Box<dyn DynBind>>) -> Result<Box<dyn DynBind>, BindError> {
        (self.from_items)(items)
    }
}

impl fmt::Debug for SequenceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceInfo")
            .field("ty", &self.ty)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// MapInfo

/// Type information of maps.
#[derive(Clone)]
pub struct MapInfo {
    ty: Type,
    kind: MapKind,
    key: fn() -> &'static TypeInfo,
    value: fn() -> &'static TypeInfo,
    from_entries: FromEntriesFn,
}

impl MapInfo {
    impl_type_fn!(ty);

    #[inline]
    pub fn new<T: Bind, K: Bind, V: Bind>(kind: MapKind, from_entries: FromEntriesFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
            key: K::type_info,
            value: V::type_info,
            from_entries,
        }
    }

    #[inline]
    pub const fn kind(&self) -> MapKind {
        self.kind
    }

    #[inline]
    pub fn key(&self) -> &'static TypeInfo {
        (self.key)()
    }

    #[inline]
    pub fn value(&self) -> &'static TypeInfo {
        (self.value)()
    }

    #[inline]
    pub fn from_entries(
        &self,
        entries: Vec<(Box<dyn DynBind>, Box<dyn DynBind>)>,
    ) -> Result<Box<dyn DynBind>, BindError> {
        (self.from_entries)(entries)
    }
}

impl fmt::Debug for MapInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapInfo")
            .field("ty", &self.ty)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// OptionalInfo

/// Type information of `Option<T>`.
#[derive(Clone)]
pub struct OptionalInfo {
    ty: Type,
    some: fn() -> &'static TypeInfo,
    from_option: FromOptionFn,
}

impl OptionalInfo {
    impl_type_fn!(ty);

    #[inline]
    pub fn new<T: Bind, Inner: Bind>(from_option: FromOptionFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            some: Inner::type_info,
            from_option,
        }
    }

    /// Type information of the wrapped value.
    #[inline]
    pub fn some(&self) -> &'static TypeInfo {
        (self.some)()
    }

    #[inline]
    pub fn from_option(
        &self,
        value: Option<Box<dyn DynBind>>,
    ) -> Result<Box<dyn DynBind>, BindError> {
        (self.from_option)(value)
    }
}

impl fmt::Debug for OptionalInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionalInfo")
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}
