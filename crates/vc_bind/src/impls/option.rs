use alloc::boxed::Box;

use crate::access::{BindMut, BindRef, downcast_value};
use crate::cell::GenericTypeInfoCell;
use crate::error::BindError;
use crate::info::{OptionalInfo, TypeInfo};
use crate::registry::TypeRegistry;
use crate::{Bind, DynBind};

impl<T: Bind> Bind for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Optional(OptionalInfo::new::<Self, T>(from_option::<T>))
        })
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

impl<T: Bind> DynBind for Option<T> {
    #[inline]
    fn dyn_type_info(&self) -> &'static TypeInfo {
        <Self as Bind>::type_info()
    }

    fn bind_ref(&self) -> BindRef<'_> {
        BindRef::Optional(self.as_ref().map(|value| value as &dyn DynBind))
    }

    #[inline]
    fn bind_mut(&mut self) -> BindMut<'_> {
        BindMut::Value(self)
    }
}

fn from_option<T: Bind>(value: Option<Box<dyn DynBind>>) -> Result<Box<dyn DynBind>, BindError> {
    let value: Option<T> = value.map(downcast_value::<T>).transpose()?;
    Ok(Box::new(value))
}
