use core::any::Any;

use crate::DynBind;
use crate::access::{MapAccess, Object, Sequence, Variants};

/// An immutable view of a value, by access kind.
pub enum BindRef<'a> {
    /// Scalars and raw trees, accessed through their concrete type.
    Value(&'a dyn Any),
    Enum(&'a dyn Variants),
    Sequence(&'a dyn Sequence),
    Map(&'a dyn MapAccess),
    Optional(Option<&'a dyn DynBind>),
    Object(&'a dyn Object),
    /// The inner value of a [`DynValue`](crate::DynValue).
    Dynamic(&'a dyn DynBind),
}

/// A mutable view of a value, by access kind.
///
/// Only objects expose their members; every other kind is replaced as a whole.
pub enum BindMut<'a> {
    Value(&'a mut dyn Any),
    Object(&'a mut dyn Object),
}

impl<'a> BindRef<'a> {
    /// Returns the object view, if the value is an object.
    #[inline]
    pub fn as_object(&self) -> Option<&'a dyn Object> {
        match self {
            Self::Object(object) => Some(*object),
            _ => None,
        }
    }
}

impl<'a> BindMut<'a> {
    #[inline]
    pub fn into_object(self) -> Option<&'a mut dyn Object> {
        match self {
            Self::Object(object) => Some(object),
            Self::Value(_) => None,
        }
    }
}
