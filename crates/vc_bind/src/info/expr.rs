use alloc::boxed::Box;
use core::fmt;

use crate::Bind;
use crate::info::{BoundKind, TypeInfo};

/// A declared type as written at a member declaration.
///
/// Unlike a [`TypeDescriptor`](crate::info::TypeDescriptor), an expression may
/// refer to the generic parameters of the declaring type. The
/// [resolver](crate::resolve) turns it into a descriptor using the binding
/// context of the enclosing scope.
///
/// `TypeInfo`s are reached through function pointers so that building an
/// expression never forces the type information of other types.
#[derive(Clone)]
pub enum TypeExpr {
    /// A bare generic parameter, e.g. `T`.
    Param(&'static str),
    /// A type that does not mention any generic parameter.
    Concrete(fn() -> &'static TypeInfo),
    /// A parameterized type whose arguments mention generic parameters,
    /// e.g. `Vec<T>`. The function returns the instantiation used by the
    /// current declaration; the argument expressions are resolved and replace
    /// its argument slots.
    Parameterized(fn() -> &'static TypeInfo, Box<[TypeExpr]>),
    /// A wildcard with one or more bounds, in declaration order.
    Wildcard(BoundKind, Box<[TypeExpr]>),
}

impl TypeExpr {
    /// The expression of a concrete type.
    #[inline]
    pub fn of<T: Bind>() -> Self {
        Self::Concrete(T::type_info)
    }

    /// A bare generic parameter.
    #[inline]
    pub const fn param(name: &'static str) -> Self {
        Self::Param(name)
    }

    /// `T`'s instantiation with argument expressions.
    #[inline]
    pub fn parameterized<T: Bind>(args: impl Into<Box<[TypeExpr]>>) -> Self {
        Self::Parameterized(T::type_info, args.into())
    }

    /// An upper-bounded wildcard.
    #[inline]
    pub fn upper(bounds: impl Into<Box<[TypeExpr]>>) -> Self {
        Self::Wildcard(BoundKind::Upper, bounds.into())
    }

    /// A lower-bounded wildcard.
    #[inline]
    pub fn lower(bounds: impl Into<Box<[TypeExpr]>>) -> Self {
        Self::Wildcard(BoundKind::Lower, bounds.into())
    }

    /// Returns `true` if the expression refers to the parameter `name`.
    pub fn mentions(&self, name: &str) -> bool {
        match self {
            Self::Param(param) => *param == name,
            Self::Concrete(_) => false,
            Self::Parameterized(_, args) | Self::Wildcard(_, args) => {
                args.iter().any(|arg| arg.mentions(name))
            }
        }
    }
}

impl fmt::Debug for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Param(name) => f.write_str(name),
            Self::Concrete(info) => f.write_str(info().type_path()),
            Self::Parameterized(info, args) => f
                .debug_tuple(info().type_path())
                .field(&&args[..])
                .finish(),
            Self::Wildcard(kind, bounds) => f.debug_tuple("Wildcard").field(kind).field(&&bounds[..]).finish(),
        }
    }
}
