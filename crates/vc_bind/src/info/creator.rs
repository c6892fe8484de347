use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;

use crate::access::downcast_value;
use crate::error::{BindError, ConstructionError};
use crate::info::{Type, TypeInfo};
use crate::{Bind, DynBind};

// -----------------------------------------------------------------------------
// CreatorParam

/// One parameter of a creator.
///
/// `name` is the JSON property name the parameter is bound to; a parameter
/// without a name cannot be bound and makes the model build fail.
#[derive(Clone, Debug)]
pub struct CreatorParam {
    ty: Type,
    name: Option<&'static str>,
    type_info: fn() -> &'static TypeInfo,
}

impl CreatorParam {
    #[inline]
    pub fn named<T: Bind>(name: &'static str) -> Self {
        Self {
            ty: Type::of::<T>(),
            name: Some(name),
            type_info: T::type_info,
        }
    }

    #[inline]
    pub fn unnamed<T: Bind>() -> Self {
        Self {
            ty: Type::of::<T>(),
            name: None,
            type_info: T::type_info,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn name(&self) -> Option<&'static str> {
        self.name
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}

// -----------------------------------------------------------------------------
// CreatorArgs

/// Decoded creator arguments, in parameter order.
pub struct CreatorArgs {
    owner: &'static str,
    names: Vec<&'static str>,
    values: Vec<Option<Box<dyn DynBind>>>,
}

impl CreatorArgs {
    pub(crate) fn new(
        owner: &'static str,
        names: Vec<&'static str>,
        values: Vec<Option<Box<dyn DynBind>>>,
    ) -> Self {
        Self {
            owner,
            names,
            values,
        }
    }

    /// Takes the argument at `index` as a `T`.
    pub fn take<T: Bind>(&mut self, index: usize) -> Result<T, BindError> {
        match self.values.get_mut(index).and_then(Option::take) {
            Some(value) => downcast_value::<T>(value),
            None => Err(ConstructionError::MissingCreatorParameter {
                ty: self.owner.to_string(),
                name: self.names.get(index).copied().unwrap_or("?").to_string(),
            }
            .into()),
        }
    }
}

impl fmt::Debug for CreatorArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatorArgs")
            .field("owner", &self.owner)
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// CreatorInfo

/// Signature of a type-erased creator.
pub type CreatorFn = fn(CreatorArgs) -> Result<Box<dyn DynBind>, BindError>;

/// An alternate construction routine, used instead of default construction
/// followed by property writes.
#[derive(Clone)]
pub struct CreatorInfo {
    params: Box<[CreatorParam]>,
    designated: bool,
    invoke: CreatorFn,
}

impl CreatorInfo {
    #[inline]
    pub fn new(params: impl Into<Box<[CreatorParam]>>, invoke: CreatorFn) -> Self {
        Self {
            params: params.into(),
            designated: false,
            invoke,
        }
    }

    /// Marks the creator as the designated one.
    #[inline]
    pub fn designated(mut self) -> Self {
        self.designated = true;
        self
    }

    #[inline]
    pub fn params(&self) -> &[CreatorParam] {
        &self.params
    }

    #[inline]
    pub const fn is_designated(&self) -> bool {
        self.designated
    }

    /// Runs the creator.
    #[inline]
    pub fn invoke(&self, args: CreatorArgs) -> Result<Box<dyn DynBind>, BindError> {
        (self.invoke)(args)
    }
}

impl fmt::Debug for CreatorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatorInfo")
            .field("params", &self.params)
            .field("designated", &self.designated)
            .finish_non_exhaustive()
    }
}
