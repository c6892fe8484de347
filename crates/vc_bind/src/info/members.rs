use core::any::Any;

use crate::Bind;
use crate::info::{Customization, Modifiers, Type, TypeExpr, TypeInfo, impl_type_fn};

// -----------------------------------------------------------------------------
// FieldInfo

/// A named field of an object type.
///
/// The `index` is the field's position in the declaring type; it is the key
/// used by [`Object::field_at`](crate::access::Object::field_at).
#[derive(Clone, Debug)]
pub struct FieldInfo {
    ty: Type,
    name: &'static str,
    index: usize,
    type_info: fn() -> &'static TypeInfo,
    declared: TypeExpr,
    modifiers: Modifiers,
    parent: bool,
    customization: Customization,
}

impl FieldInfo {
    impl_type_fn!(ty);

    /// A field of type `T`, declared as `T` itself.
    #[inline]
    pub fn new<T: Bind>(name: &'static str, index: usize) -> Self {
        Self {
            ty: Type::of::<T>(),
            name,
            index,
            type_info: T::type_info,
            declared: TypeExpr::of::<T>(),
            modifiers: Modifiers::empty(),
            parent: false,
            customization: Customization::new(),
        }
    }

    /// Replaces the declared type expression.
    #[inline]
    pub fn with_declared(mut self, declared: TypeExpr) -> Self {
        self.declared = declared;
        self
    }

    #[inline]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[inline]
    pub fn with_customization(mut self, customization: Customization) -> Self {
        self.customization = customization;
        self
    }

    /// Marks the field as holding the ancestor part of the declaring type.
    #[inline]
    pub fn as_parent(mut self) -> Self {
        self.parent = true;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub const fn declared(&self) -> &TypeExpr {
        &self.declared
    }

    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    #[inline]
    pub const fn is_parent(&self) -> bool {
        self.parent
    }

    #[inline]
    pub const fn customization(&self) -> &Customization {
        &self.customization
    }
}

// -----------------------------------------------------------------------------
// AccessorInfo

/// Direction of an accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Getter,
    Setter,
}

/// A getter or setter method contributing to the property `name`.
///
/// Getters return owned values. The `index` counts accessors of the same kind
/// and is the key of [`Object::call_getter`](crate::access::Object::call_getter)
/// and [`Object::call_setter`](crate::access::Object::call_setter).
#[derive(Clone, Debug)]
pub struct AccessorInfo {
    ty: Type,
    name: &'static str,
    kind: AccessorKind,
    index: usize,
    type_info: fn() -> &'static TypeInfo,
    modifiers: Modifiers,
    customization: Customization,
}

impl AccessorInfo {
    impl_type_fn!(ty);

    /// A getter. The function only drives type inference.
    #[inline]
    pub fn getter<S: Any, T: Bind>(name: &'static str, index: usize, _: fn(&S) -> T) -> Self {
        Self::of::<T>(name, AccessorKind::Getter, index)
    }

    /// A setter. The function only drives type inference.
    #[inline]
    pub fn setter<S: Any, T: Bind>(name: &'static str, index: usize, _: fn(&mut S, T)) -> Self {
        Self::of::<T>(name, AccessorKind::Setter, index)
    }

    /// An accessor of value type `T`.
    #[inline]
    pub fn of<T: Bind>(name: &'static str, kind: AccessorKind, index: usize) -> Self {
        Self {
            ty: Type::of::<T>(),
            name,
            kind,
            index,
            type_info: T::type_info,
            modifiers: Modifiers::PUBLIC,
            customization: Customization::new(),
        }
    }

    #[inline]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[inline]
    pub fn with_customization(mut self, customization: Customization) -> Self {
        self.customization = customization;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn kind(&self) -> AccessorKind {
        self.kind
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    #[inline]
    pub const fn customization(&self) -> &Customization {
        &self.customization
    }
}
