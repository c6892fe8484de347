use alloc::boxed::Box;
use core::fmt;

use crate::info::{AccessorInfo, AccessorKind, CreatorInfo, Customization, FieldInfo};
use crate::info::{Generics, RawType, Type, impl_generic_fn, impl_type_fn};
use crate::{Bind, DynBind};

/// Builds a default instance of an object type.
pub type DefaultFn = fn() -> Box<dyn DynBind>;

/// Type information of a struct with named fields.
///
/// Besides its fields, an object type may declare accessors (getters and
/// setters contributing to a property), creators, an explicit property order
/// and a type level customization layer.
///
/// # Example
///
/// ```
/// use vc_bind::Bind;
///
/// #[derive(Bind, Default)]
/// #[bind(order("b", "a"))]
/// struct Pair {
///     pub a: i32,
///     pub b: i32,
/// }
///
/// let info = Pair::type_info().as_object().unwrap();
/// assert_eq!(info.raw().name(), "Pair");
/// assert_eq!(info.field("b").unwrap().index(), 1);
/// assert_eq!(info.order(), Some(&["b", "a"][..]));
/// assert!(info.can_default());
/// ```
#[derive(Clone)]
pub struct ObjectInfo {
    ty: Type,
    raw: RawType,
    generics: Generics,
    fields: Box<[FieldInfo]>,
    accessors: Box<[AccessorInfo]>,
    creators: Box<[CreatorInfo]>,
    order: Option<Box<[&'static str]>>,
    default_construct: Option<DefaultFn>,
    customization: Customization,
}

impl ObjectInfo {
    impl_type_fn!(ty);
    impl_generic_fn!(generics);

    /// Creates the information of `T`, whose definition lives at `raw_path`.
    #[inline]
    pub fn new<T: Bind>(raw_path: &'static str, fields: impl Into<Box<[FieldInfo]>>) -> Self {
        Self {
            ty: Type::of::<T>(),
            raw: RawType::new(raw_path),
            generics: Generics::new(),
            fields: fields.into(),
            accessors: Box::new([]),
            creators: Box::new([]),
            order: None,
            default_construct: None,
            customization: Customization::new(),
        }
    }

    #[inline]
    pub fn with_accessors(mut self, accessors: impl Into<Box<[AccessorInfo]>>) -> Self {
        self.accessors = accessors.into();
        self
    }

    #[inline]
    pub fn with_creators(mut self, creators: impl Into<Box<[CreatorInfo]>>) -> Self {
        self.creators = creators.into();
        self
    }

    /// Sets the explicit property order, by logical names.
    #[inline]
    pub fn with_order(mut self, order: impl Into<Box<[&'static str]>>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Enables default construction through `T::default()`.
    #[inline]
    pub fn with_default<T: Bind + Default>(mut self) -> Self {
        self.default_construct = Some(|| Box::new(T::default()));
        self
    }

    #[inline]
    pub fn with_customization(mut self, customization: Customization) -> Self {
        self.customization = customization;
        self
    }

    #[inline]
    pub const fn raw(&self) -> RawType {
        self.raw
    }

    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name() == name)
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldInfo> {
        self.fields.get(index)
    }

    #[inline]
    pub fn accessors(&self) -> &[AccessorInfo] {
        &self.accessors
    }

    /// Returns the accessors of one direction.
    pub fn accessors_of(&self, kind: AccessorKind) -> impl Iterator<Item = &AccessorInfo> {
        self.accessors.iter().filter(move |accessor| accessor.kind() == kind)
    }

    #[inline]
    pub fn creators(&self) -> &[CreatorInfo] {
        &self.creators
    }

    #[inline]
    pub fn order(&self) -> Option<&[&'static str]> {
        self.order.as_deref()
    }

    #[inline]
    pub const fn can_default(&self) -> bool {
        self.default_construct.is_some()
    }

    /// Builds a default instance, if the type supports it.
    #[inline]
    pub fn default_construct(&self) -> Option<Box<dyn DynBind>> {
        self.default_construct.map(|f| f())
    }

    /// The type level customization layer.
    #[inline]
    pub const fn customization(&self) -> &Customization {
        &self.customization
    }
}

impl fmt::Debug for ObjectInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectInfo")
            .field("ty", &self.ty)
            .field("generics", &self.generics)
            .field("fields", &self.fields)
            .field("accessors", &self.accessors)
            .field("creators", &self.creators)
            .field("order", &self.order)
            .field("customization", &self.customization)
            .finish_non_exhaustive()
    }
}
