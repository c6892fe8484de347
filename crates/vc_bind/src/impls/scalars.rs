use alloc::string::String;

macro_rules! impl_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl $crate::Bind for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::cell::NonGenericTypeInfoCell =
                    $crate::cell::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Scalar($crate::info::ScalarInfo::new::<$ty>(
                        $crate::info::ScalarKind::$kind,
                    ))
                })
            }
        }

        impl $crate::DynBind for $ty {
            $crate::impls::impl_dyn_bind!(Value, Value);
        }
    )*};
}

pub(crate) use impl_scalar;

impl_scalar! {
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => String,
    serde_json::Number => Number,
}
