use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

// -----------------------------------------------------------------------------
// Type

/// The identity of one concrete Rust type: its [`TypeId`] and full type path.
///
/// # Example
///
/// ```
/// # use core::any::TypeId;
/// use vc_bind::info::Type;
///
/// let ty = Type::of::<Vec<u8>>();
/// assert_eq!(ty.id(), TypeId::of::<Vec<u8>>());
/// assert_eq!(ty.path(), "alloc::vec::Vec<u8>");
/// ```
#[derive(Copy, Clone)]
pub struct Type {
    type_id: TypeId,
    type_path: &'static str,
}

impl Type {
    /// Creates the [`Type`] of `T`.
    #[inline]
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: core::any::type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the full type path, generic arguments included.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.type_path
    }

    /// Check if this is the type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_path)
    }
}

// -----------------------------------------------------------------------------
// RawType

/// The identity of a type definition, independent of its generic arguments.
///
/// `Holder<Circle>` and `Holder<Square>` share one raw type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawType {
    path: &'static str,
}

impl RawType {
    /// Creates a raw type from a path without generic arguments,
    /// e.g. `"my_crate::shapes::Holder"`.
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self { path }
    }

    /// Returns the path.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the last path segment.
    pub fn name(&self) -> &'static str {
        match self.path.rfind("::") {
            Some(index) => &self.path[index + 2..],
            None => self.path,
        }
    }

    /// Returns the module path, empty for a single segment path.
    pub fn module(&self) -> &'static str {
        match self.path.rfind("::") {
            Some(index) => &self.path[..index],
            None => "",
        }
    }
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

// -----------------------------------------------------------------------------
// impl_type_fn

macro_rules! impl_type_fn {
    ($field:ident) => {
        /// Returns the underlying `Type`.
        #[inline(always)]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.$field
        }

        /// Returns the `TypeId`.
        #[inline]
        pub const fn type_id(&self) -> ::core::any::TypeId {
            self.$field.id()
        }

        /// Returns the full type path.
        #[inline]
        pub const fn type_path(&self) -> &'static str {
            self.$field.path()
        }

        /// Check if the given type matches this one.
        #[inline]
        pub fn type_is<T: ::core::any::Any>(&self) -> bool {
            self.$field.is::<T>()
        }
    };
}

pub(crate) use impl_type_fn;

#[cfg(test)]
mod tests {
    use super::RawType;

    #[test]
    fn raw_type_segments() {
        let raw = RawType::new("shapes::geo::Holder");
        assert_eq!(raw.name(), "Holder");
        assert_eq!(raw.module(), "shapes::geo");

        let bare = RawType::new("Holder");
        assert_eq!(bare.name(), "Holder");
        assert_eq!(bare.module(), "");
    }
}
