use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::access::{BindMut, BindRef};
use crate::cell::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo};
use crate::{Bind, DynBind};

/// An owned value whose type is decided at runtime.
///
/// Used as the storage of members whose declared type is only known through
/// the generic bindings of the enclosing type, e.g. `Holder<DynValue>` read as
/// a `Holder<Circle>`. The value is encoded through its runtime type; decoding
/// without a resolved type yields a [`serde_json::Value`].
///
/// # Example
///
/// ```
/// use vc_bind::DynValue;
///
/// let value = DynValue::new(3.5_f64);
/// assert_eq!(value.downcast_ref::<f64>(), Some(&3.5));
/// assert_eq!(value.get().type_path(), "f64");
/// ```
pub struct DynValue(Box<dyn DynBind>);

impl DynValue {
    #[inline]
    pub fn new<T: Bind>(value: T) -> Self {
        Self::from_boxed(Box::new(value))
    }

    /// Wraps a boxed value. A boxed `DynValue` is returned as is.
    pub fn from_boxed(value: Box<dyn DynBind>) -> Self {
        if !value.is::<DynValue>() {
            return Self(value);
        }
        let value: Box<dyn Any> = value;
        match value.downcast::<DynValue>() {
            Ok(inner) => *inner,
            Err(_) => unreachable!("checked by `is`"),
        }
    }

    #[inline]
    pub fn get(&self) -> &dyn DynBind {
        &*self.0
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut dyn DynBind {
        &mut *self.0
    }

    #[inline]
    pub fn downcast_ref<T: Bind>(&self) -> Option<&T> {
        self.get().downcast_ref::<T>()
    }

    #[inline]
    pub fn into_inner(self) -> Box<dyn DynBind> {
        self.0
    }
}

impl Default for DynValue {
    /// A JSON `null`.
    fn default() -> Self {
        Self(Box::new(serde_json::Value::Null))
    }
}

impl fmt::Debug for DynValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DynValue").field(&self.get().type_path()).finish()
    }
}

impl Bind for DynValue {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Dynamic(OpaqueInfo::new::<Self>()))
    }
}

impl DynBind for DynValue {
    #[inline]
    fn dyn_type_info(&self) -> &'static TypeInfo {
        <Self as Bind>::type_info()
    }

    #[inline]
    fn bind_ref(&self) -> BindRef<'_> {
        BindRef::Dynamic(self.get())
    }

    #[inline]
    fn bind_mut(&mut self) -> BindMut<'_> {
        self.get_mut().bind_mut()
    }
}
