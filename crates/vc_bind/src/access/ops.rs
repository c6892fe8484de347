use alloc::boxed::Box;

use crate::DynBind;
use crate::error::BindError;

// -----------------------------------------------------------------------------
// Object

/// Member access of an object type.
///
/// Field indices follow [`ObjectInfo::fields`](crate::info::ObjectInfo::fields);
/// getter and setter indices count the accessors of each direction.
pub trait Object {
    fn field_at(&self, index: usize) -> Option<&dyn DynBind>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn DynBind>;

    /// Replaces the field at `index`.
    ///
    /// Fails if the index is out of range or the value has the wrong type.
    fn set_field_at(&mut self, index: usize, value: Box<dyn DynBind>) -> Result<(), BindError>;

    /// Invokes the getter at `index`; getters return owned values.
    fn call_getter(&self, _index: usize) -> Option<Box<dyn DynBind>> {
        None
    }

    fn call_setter(&mut self, index: usize, value: Box<dyn DynBind>) -> Result<(), BindError>;
}

// -----------------------------------------------------------------------------
// Sequence

/// Item access of arrays and collections.
pub trait Sequence {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the items in storage order.
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn DynBind> + '_>;
}

// -----------------------------------------------------------------------------
// MapAccess

/// Entry access of maps.
pub trait MapAccess {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the entries in storage order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn DynBind, &dyn DynBind)> + '_>;
}

// -----------------------------------------------------------------------------
// Variants

/// Variant access of unit-only enums.
pub trait Variants {
    /// Index of the current variant in declaration order.
    fn variant_index(&self) -> usize;
}
