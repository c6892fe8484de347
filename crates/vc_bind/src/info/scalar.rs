use alloc::boxed::Box;
use core::fmt;

use crate::info::{RawType, ScalarKind, Type, impl_type_fn};
use crate::{Bind, DynBind};

// -----------------------------------------------------------------------------
// ScalarInfo

/// Type information of a built-in scalar.
#[derive(Debug, Clone)]
pub struct ScalarInfo {
    ty: Type,
    kind: ScalarKind,
}

impl ScalarInfo {
    impl_type_fn!(ty);

    #[inline]
    pub fn new<T: Bind>(kind: ScalarKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
        }
    }

    #[inline]
    pub const fn kind(&self) -> ScalarKind {
        self.kind
    }
}

// -----------------------------------------------------------------------------
// EnumInfo

/// Builds the value of the variant at an index.
pub type FromVariantFn = fn(usize) -> Option<Box<dyn DynBind>>;

/// Type information of an enum with unit variants only.
///
/// Variants are written as their JSON names, in declaration order.
#[derive(Clone)]
pub struct EnumInfo {
    ty: Type,
    raw: RawType,
    variants: Box<[&'static str]>,
    from_index: FromVariantFn,
}

impl EnumInfo {
    impl_type_fn!(ty);

    #[inline]
    pub fn new<T: Bind>(
        raw_path: &'static str,
        variants: impl Into<Box<[&'static str]>>,
        from_index: FromVariantFn,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            raw: RawType::new(raw_path),
            variants: variants.into(),
            from_index,
        }
    }

    #[inline]
    pub const fn raw(&self) -> RawType {
        self.raw
    }

    /// JSON names of the variants.
    #[inline]
    pub fn variants(&self) -> &[&'static str] {
        &self.variants
    }

    #[inline]
    pub fn variant_name(&self, index: usize) -> Option<&'static str> {
        self.variants.get(index).copied()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|variant| *variant == name)
    }

    /// Builds the variant at `index`.
    #[inline]
    pub fn from_index(&self, index: usize) -> Option<Box<dyn DynBind>> {
        (self.from_index)(index)
    }
}

impl fmt::Debug for EnumInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumInfo")
            .field("ty", &self.ty)
            .field("variants", &self.variants)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// OpaqueInfo

/// Type information of a type without inner structure: raw trees and
/// dynamic values.
#[derive(Debug, Clone)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    impl_type_fn!(ty);

    #[inline]
    pub fn new<T: Bind>() -> Self {
        Self { ty: Type::of::<T>() }
    }
}
