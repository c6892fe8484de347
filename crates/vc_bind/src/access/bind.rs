use alloc::boxed::Box;
use core::any::{Any, TypeId};

use crate::access::{BindMut, BindRef, DynValue};
use crate::error::{BindError, ConstructionError};
use crate::info::TypeInfo;
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// Bind

/// A type that can be converted to and from JSON.
///
/// Implemented for the supported standard types, and for user types through
/// [the derive macro](crate::Bind).
///
/// # Example
///
/// ```
/// use vc_bind::Bind;
/// use vc_bind::info::TypeKind;
///
/// #[derive(Bind, Default)]
/// struct Circle {
///     pub radius: f64,
/// }
///
/// assert_eq!(Circle::type_info().kind(), TypeKind::Object);
/// assert_eq!(<Vec<Circle>>::type_info().kind(), TypeKind::Array);
/// ```
pub trait Bind: DynBind + Sized {
    /// Returns the static type information.
    fn type_info() -> &'static TypeInfo;

    /// Registers the types this type depends on.
    ///
    /// Called by [`TypeRegistry::register`] the first time the type is added.
    #[inline]
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}

// -----------------------------------------------------------------------------
// DynBind

/// The object safe counterpart of [`Bind`].
pub trait DynBind: Any + Send + Sync {
    /// Returns the type information of the underlying type.
    fn dyn_type_info(&self) -> &'static TypeInfo;

    /// Casts to the access kind by reference.
    fn bind_ref(&self) -> BindRef<'_>;

    /// Casts to the access kind by mutable reference.
    fn bind_mut(&mut self) -> BindMut<'_>;
}

impl dyn DynBind {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        // Any::type_id(self)
        <dyn Any>::type_id(self) == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Returns the type path of the underlying value.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.dyn_type_info().type_path()
    }
}

impl core::fmt::Debug for dyn DynBind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("DynBind").field(&self.type_path()).finish()
    }
}

/// Unboxes a value as `T`.
///
/// A value of any other type requested as [`DynValue`] is wrapped instead.
///
/// # Example
///
/// ```
/// use vc_bind::{DynBind, DynValue};
/// use vc_bind::access::downcast_value;
///
/// let value: Box<dyn DynBind> = Box::new(7_u16);
/// assert_eq!(downcast_value::<u16>(value).unwrap(), 7);
///
/// let value: Box<dyn DynBind> = Box::new(7_u16);
/// let wrapped = downcast_value::<DynValue>(value).unwrap();
/// assert_eq!(wrapped.downcast_ref::<u16>(), Some(&7));
///
/// let value: Box<dyn DynBind> = Box::new(7_u16);
/// assert!(downcast_value::<String>(value).is_err());
/// ```
pub fn downcast_value<T: Bind>(value: Box<dyn DynBind>) -> Result<T, BindError> {
    let actual = value.type_path();
    if !value.is::<T>() && TypeId::of::<T>() == TypeId::of::<DynValue>() {
        let wrapped: Box<dyn Any> = Box::new(DynValue::from_boxed(value));
        return wrapped
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| mismatch::<T>(actual));
    }

    let value: Box<dyn Any> = value;
    value
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| mismatch::<T>(actual))
}

fn mismatch<T: Bind>(actual: &str) -> BindError {
    ConstructionError::TypeMismatch {
        expected: T::type_info().type_path().into(),
        actual: actual.into(),
    }
    .into()
}
