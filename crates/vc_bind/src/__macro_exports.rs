//! Items used by the code that `#[derive(Bind)]` generates.
//!
//! Not part of the public API.

use alloc::string::ToString;
use core::any::Any;
use core::fmt::Display;

use crate::access::downcast_value;
use crate::error::{BindError, ConstructionError};
use crate::{Bind, DynBind};

pub use alloc::boxed::Box;

/// Calls a declared getter and boxes the result.
#[inline]
pub fn invoke_getter<S: Any, T: Bind>(target: &S, getter: fn(&S) -> T) -> Box<dyn DynBind> {
    Box::new(getter(target))
}

/// Passes a decoded value to a declared setter.
#[inline]
pub fn invoke_setter<S: Any, T: Bind>(
    target: &mut S,
    value: Box<dyn DynBind>,
    setter: fn(&mut S, T),
) -> Result<(), BindError> {
    setter(target, downcast_value::<T>(value)?);
    Ok(())
}

/// Replaces a field with a decoded value.
#[inline]
pub fn set_field<T: Bind>(field: &mut T, value: Box<dyn DynBind>) -> Result<(), BindError> {
    *field = downcast_value::<T>(value)?;
    Ok(())
}

#[cold]
pub fn no_member(ty: &str, index: usize) -> BindError {
    ConstructionError::NoMember {
        ty: ty.into(),
        index,
    }
    .into()
}

/// Wraps the error of a fallible creator.
#[cold]
pub fn creator_failed<T: Bind, E: Display>(err: E) -> BindError {
    ConstructionError::Creator {
        ty: T::type_info().type_path().into(),
        message: err.to_string(),
    }
    .into()
}

/// Static registration of `#[bind(auto_register)]` types.
#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::registry::TypeRegistry;

    /// One registration function, submitted by the derive.
    pub struct AutoRegistration(pub fn(&mut TypeRegistry));

    inventory::collect!(AutoRegistration);

    /// Runs every submitted registration.
    pub fn register_types(registry: &mut TypeRegistry) {
        for registration in inventory::iter::<AutoRegistration> {
            (registration.0)(registry);
        }
    }
}
