use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use thiserror::Error;

use crate::info::{EnumInfo, ObjectInfo, OpaqueInfo, ScalarInfo};
use crate::info::{MapInfo, OptionalInfo, SequenceInfo};
use crate::info::{Type, TypeDescriptor};

// -----------------------------------------------------------------------------
// TypeKind

/// The binding shape of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Enum,
    Array,
    Collection,
    Map,
    Optional,
    Object,
    Tree,
    Dynamic,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scalar => "Scalar",
            Self::Enum => "Enum",
            Self::Array => "Array",
            Self::Collection => "Collection",
            Self::Map => "Map",
            Self::Optional => "Optional",
            Self::Object => "Object",
            Self::Tree => "Tree",
            Self::Dynamic => "Dynamic",
        };
        f.pad(name)
    }
}

/// Error returned when a `TypeInfo` is not of the expected kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("type kind mismatch: expected {expected}, received {received}")]
pub struct KindError {
    pub expected: TypeKind,
    pub received: TypeKind,
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Static type information of a bindable type.
///
/// Obtained through [`Bind::type_info`](crate::Bind::type_info) or
/// [`DynBind::dyn_type_info`](crate::DynBind::dyn_type_info). Every
/// `TypeInfo` lives for the rest of the program.
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Scalar(ScalarInfo),
    Enum(EnumInfo),
    Array(SequenceInfo),
    Collection(SequenceInfo),
    Map(MapInfo),
    Optional(OptionalInfo),
    Object(ObjectInfo),
    /// `serde_json::Value`, passed through as a token tree.
    Tree(OpaqueInfo),
    /// A value whose type is only known at runtime.
    Dynamic(OpaqueInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $($kind:ident)|+ => $info:ident) => {
        /// Convert [`TypeInfo`] to the specific type information.
        pub fn $name(&self) -> Result<&$info, KindError> {
            match self {
                $(Self::$kind(info))|+ => Ok(info),
                _ => Err(KindError {
                    expected: impl_cast_method!(@first $($kind)|+),
                    received: self.kind(),
                }),
            }
        }
    };
    (@first $kind:ident $(| $rest:ident)*) => {
        TypeKind::$kind
    };
}

impl TypeInfo {
    impl_cast_method!(as_scalar: Scalar => ScalarInfo);
    impl_cast_method!(as_enum: Enum => EnumInfo);
    impl_cast_method!(as_sequence: Array | Collection => SequenceInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_optional: Optional => OptionalInfo);
    impl_cast_method!(as_object: Object => ObjectInfo);

    /// Returns the underlying [`Type`].
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Scalar(info) => info.ty(),
            Self::Enum(info) => info.ty(),
            Self::Array(info) | Self::Collection(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::Object(info) => info.ty(),
            Self::Tree(info) | Self::Dynamic(info) => info.ty(),
        }
    }

    #[inline]
    pub const fn type_id(&self) -> core::any::TypeId {
        self.ty().id()
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    #[inline]
    pub fn type_is<T: core::any::Any>(&self) -> bool {
        self.ty().is::<T>()
    }

    pub const fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Enum(_) => TypeKind::Enum,
            Self::Array(_) => TypeKind::Array,
            Self::Collection(_) => TypeKind::Collection,
            Self::Map(_) => TypeKind::Map,
            Self::Optional(_) => TypeKind::Optional,
            Self::Object(_) => TypeKind::Object,
            Self::Tree(_) => TypeKind::Tree,
            Self::Dynamic(_) => TypeKind::Dynamic,
        }
    }

    /// The resolved descriptor of this instantiation.
    ///
    /// Object arguments come from the instantiated generic parameters; a
    /// parameter without an argument is [`Dynamic`](TypeDescriptor::Dynamic).
    pub fn descriptor(&self) -> TypeDescriptor {
        use alloc::boxed::Box;

        match self {
            Self::Scalar(info) => TypeDescriptor::Scalar(info.kind()),
            Self::Enum(info) => TypeDescriptor::Enum(info.raw()),
            Self::Array(info) => {
                TypeDescriptor::Array(info.kind(), Box::new(info.item().descriptor()))
            }
            Self::Collection(info) => {
                TypeDescriptor::Collection(info.kind(), Box::new(info.item().descriptor()))
            }
            Self::Map(info) => TypeDescriptor::Map(
                info.kind(),
                Box::new(info.key().descriptor()),
                Box::new(info.value().descriptor()),
            ),
            Self::Optional(info) => TypeDescriptor::Optional(Box::new(info.some().descriptor())),
            Self::Object(info) => {
                let args: Vec<TypeDescriptor> = info
                    .generics()
                    .iter()
                    .map(|param| match param.arg() {
                        Some(arg) => arg.descriptor(),
                        None => TypeDescriptor::Dynamic,
                    })
                    .collect();
                TypeDescriptor::Object(info.raw(), Arc::from(args))
            }
            Self::Tree(_) => TypeDescriptor::Tree,
            Self::Dynamic(_) => TypeDescriptor::Dynamic,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{KindError, TypeKind};
    use crate::Bind;

    #[test]
    fn cast_reports_kinds() {
        let info = <Option<u8>>::type_info();
        assert!(info.as_optional().is_ok());
        let err = info.as_object().unwrap_err();
        assert_eq!(
            err,
            KindError {
                expected: TypeKind::Object,
                received: TypeKind::Optional,
            }
        );
        assert_eq!(
            err.to_string(),
            "type kind mismatch: expected Object, received Optional"
        );
    }

    #[test]
    fn sequences_cast_from_both_kinds() {
        assert!(<Vec<i32>>::type_info().as_sequence().is_ok());
        assert!(<alloc::collections::BTreeSet<i32>>::type_info().as_sequence().is_ok());
        assert_eq!(
            <alloc::collections::BTreeSet<i32>>::type_info().kind(),
            TypeKind::Collection
        );
    }
}
