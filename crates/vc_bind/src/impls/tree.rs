use serde_json::Value;

use crate::cell::NonGenericTypeInfoCell;
use crate::impls::impl_dyn_bind;
use crate::info::{OpaqueInfo, TypeInfo};
use crate::{Bind, DynBind};

impl Bind for Value {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Tree(OpaqueInfo::new::<Self>()))
    }
}

impl DynBind for Value {
    impl_dyn_bind!(Value, Value);
}
