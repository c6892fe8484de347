use alloc::string::String;
use alloc::sync::Arc;
use core::any::TypeId;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::hash::{HashMap, TypeIdMap};
use crate::info::{RawType, TypeDescriptor, TypeInfo};
use crate::{Bind, DynValue};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of bindable types.
///
/// # Example
///
/// ```
/// use vc_bind::Bind;
/// use vc_bind::registry::TypeRegistry;
///
/// #[derive(Bind, Default)]
/// struct Circle {
///     pub radius: f64,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Vec<Circle>>();
///
/// let descriptor = Circle::type_info().descriptor();
/// let info = registry.get_by_descriptor(&descriptor).unwrap();
/// assert!(info.type_is::<Circle>());
/// ```
pub struct TypeRegistry {
    by_id: TypeIdMap<&'static TypeInfo>,
    by_descriptor: HashMap<TypeDescriptor, &'static TypeInfo>,
    by_raw: HashMap<RawType, &'static TypeInfo>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a empty [`TypeRegistry`].
    #[inline]
    pub fn empty() -> Self {
        Self {
            by_id: TypeIdMap::default(),
            by_descriptor: HashMap::default(),
            by_raw: HashMap::default(),
        }
    }

    /// Create a type registry with the scalars, raw trees and dynamic values,
    /// plus every auto registered type.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<u128>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<i128>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry.register::<serde_json::Number>();
        registry.register::<serde_json::Value>();
        registry.register::<DynValue>();
        registry.register::<chrono::DateTime<chrono::Utc>>();
        registry.register::<chrono::DateTime<chrono::FixedOffset>>();
        registry.register::<chrono::NaiveDate>();
        registry.register::<chrono::NaiveDateTime>();
        registry.register::<chrono::NaiveTime>();
        registry.auto_register();
        registry
    }

    /// Adds a type without its dependencies.
    ///
    /// Returns `false` if the type was already present. When another type with
    /// the same descriptor is present, the first one keeps the descriptor.
    pub fn add(&mut self, info: &'static TypeInfo) -> bool {
        if self.by_id.contains_key(&info.type_id()) {
            return false;
        }
        self.by_id.insert(info.type_id(), info);

        let descriptor = info.descriptor();
        match self.by_descriptor.get(&descriptor) {
            Some(existing) => log::warn!(
                "`{}` and `{}` share the descriptor `{descriptor}`, keeping the first",
                existing.type_path(),
                info.type_path(),
            ),
            None => {
                self.by_descriptor.insert(descriptor, info);
            }
        }

        if let Ok(object) = info.as_object() {
            self.by_raw.entry(object.raw()).or_insert(info);
        }
        true
    }

    /// Registers `T` and, the first time only, its dependencies.
    pub fn register<T: Bind>(&mut self) {
        if self.add(T::type_info()) {
            T::register_dependencies(self);
        }
    }

    #[inline]
    pub fn register_by_val<T: Bind>(&mut self, _: &T) {
        self.register::<T>();
    }

    /// Registers every type annotated with `#[bind(auto_register)]`.
    ///
    /// Returns `false` when the `auto_register` feature is disabled.
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) -> bool {
        crate::__macro_exports::auto_register::register_types(self);
        true
    }

    /// Registers every type annotated with `#[bind(auto_register)]`.
    ///
    /// Returns `false` when the `auto_register` feature is disabled.
    #[cfg(not(feature = "auto_register"))]
    #[inline(always)]
    pub fn auto_register(&mut self) -> bool {
        false
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.by_id.contains_key(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.by_id.get(&type_id).copied()
    }

    /// Finds the type whose instantiation has the given descriptor.
    ///
    /// Wildcards are looked up through their bound.
    pub fn get_by_descriptor(&self, descriptor: &TypeDescriptor) -> Option<&'static TypeInfo> {
        self.by_descriptor
            .get(descriptor.unwrap_wildcard())
            .copied()
    }

    /// Finds the first registered instantiation of an object type.
    #[inline]
    pub fn get_by_raw(&self, raw: RawType) -> Option<&'static TypeInfo> {
        self.by_raw.get(&raw).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static TypeInfo> + '_ {
        self.by_id.values().copied()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

/// A shared [`TypeRegistry`].
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    /// The wrapped [`TypeRegistry`].
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `T` unless it is already present.
    ///
    /// Only takes the write lock for types not seen before.
    pub fn ensure<T: Bind>(&self) {
        if !self.read().contains(TypeId::of::<T>()) {
            self.write().register::<T>();
        }
    }
}

impl core::fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.read().iter().map(TypeInfo::type_path))
            .finish()
    }
}
