use alloc::boxed::Box;
use core::ops::Deref;

use crate::Bind;
use crate::info::{TypeExpr, TypeInfo};

// -----------------------------------------------------------------------------
// GenericParam

/// One generic type parameter of an object type, as instantiated.
///
/// # Examples
///
/// ```
/// use vc_bind::Bind;
///
/// #[derive(Bind, Default)]
/// struct Holder<T> {
///     pub field: T,
/// }
///
/// let info = <Holder<f32>>::type_info().as_object().unwrap();
/// let param = info.generics().get("T").unwrap();
/// assert!(param.arg().unwrap().type_is::<f32>());
/// assert!(param.bound().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct GenericParam {
    name: &'static str,
    arg: Option<fn() -> &'static TypeInfo>,
    bound: Option<TypeExpr>,
}

impl GenericParam {
    /// A parameter instantiated with `T`.
    #[inline]
    pub fn new<T: Bind>(name: &'static str) -> Self {
        Self {
            name,
            arg: Some(T::type_info),
            bound: None,
        }
    }

    /// A parameter without a known argument; it resolves through its bound.
    #[inline]
    pub const fn unbound(name: &'static str) -> Self {
        Self {
            name,
            arg: None,
            bound: None,
        }
    }

    /// Sets the declared upper bound.
    #[inline]
    pub fn with_bound(mut self, bound: TypeExpr) -> Self {
        self.bound = Some(bound);
        self
    }

    /// Returns the parameter name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the argument's type information, if known.
    #[inline]
    pub fn arg(&self) -> Option<&'static TypeInfo> {
        self.arg.map(|info| info())
    }

    /// Returns the declared bound.
    #[inline]
    pub const fn bound(&self) -> Option<&TypeExpr> {
        self.bound.as_ref()
    }
}

// -----------------------------------------------------------------------------
// Generics

/// The generic type parameters of an object type, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct Generics(Box<[GenericParam]>);

impl Generics {
    /// No generic parameters.
    #[inline]
    pub fn new() -> Self {
        Self(Box::new([]))
    }

    /// Finds a parameter by name.
    pub fn get(&self, name: &str) -> Option<&GenericParam> {
        self.0.iter().find(|param| param.name == name)
    }
}

impl<const N: usize> From<[GenericParam; N]> for Generics {
    #[inline]
    fn from(value: [GenericParam; N]) -> Self {
        Self(Box::new(value))
    }
}

impl Deref for Generics {
    type Target = [GenericParam];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// -----------------------------------------------------------------------------
// impl_generic_fn

macro_rules! impl_generic_fn {
    ($field:ident) => {
        /// Returns the generic parameters.
        #[inline]
        pub const fn generics(&self) -> &$crate::info::Generics {
            &self.$field
        }

        /// Replaces the generic parameters.
        #[inline]
        pub fn with_generics(mut self, generics: $crate::info::Generics) -> Self {
            self.$field = generics;
            self
        }
    };
}

pub(crate) use impl_generic_fn;
