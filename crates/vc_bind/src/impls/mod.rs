//! [`Bind`](crate::Bind) implementations of foreign types.
//!
//! ## Implemented Menu
//!
//! - scalars:
//!     - `bool`, `char`, `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`
//!     - `String`, `serde_json::Number`
//! - chrono:
//!     - `DateTime<Utc>`, `DateTime<FixedOffset>`, `NaiveDate`, `NaiveDateTime`, `NaiveTime`
//! - arrays: `Vec<T>`, `Box<[T]>`, `[T; N]`
//! - collections: `VecDeque<T>`, `LinkedList<T>`, `HashSet<T, S>`, `BTreeSet<T>`
//! - maps: `HashMap<K, V, S>`, `BTreeMap<K, V>`
//! - `Option<T>`
//! - `serde_json::Value`, as a raw tree
//!
//! [`DynValue`](crate::DynValue) is implemented next to its definition.

// -----------------------------------------------------------------------------
// Modules

mod maps;
mod option;
mod scalars;
mod sequences;
mod temporal;
mod tree;

// -----------------------------------------------------------------------------
// Helpers

/// Implements [`DynBind`](crate::DynBind) with the given access kind.
macro_rules! impl_dyn_bind {
    ($ref_kind:ident, $mut_kind:ident) => {
        #[inline]
        fn dyn_type_info(&self) -> &'static $crate::info::TypeInfo {
            <Self as $crate::Bind>::type_info()
        }

        #[inline]
        fn bind_ref(&self) -> $crate::access::BindRef<'_> {
            $crate::access::BindRef::$ref_kind(self)
        }

        #[inline]
        fn bind_mut(&mut self) -> $crate::access::BindMut<'_> {
            $crate::access::BindMut::$mut_kind(self)
        }
    };
}

pub(crate) use impl_dyn_bind;
