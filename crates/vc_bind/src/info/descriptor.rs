use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::info::RawType;

// -----------------------------------------------------------------------------
// ScalarKind

/// Built-in scalar shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    String,
    /// Arbitrary precision number keeping its lexical form.
    Number,
    /// `chrono::DateTime<Utc>`
    DateTimeUtc,
    /// `chrono::DateTime<FixedOffset>`
    DateTimeOffset,
    /// `chrono::NaiveDate`
    Date,
    /// `chrono::NaiveDateTime`
    DateTime,
    /// `chrono::NaiveTime`
    Time,
}

impl ScalarKind {
    /// Returns the short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "String",
            Self::Number => "Number",
            Self::DateTimeUtc => "DateTime<Utc>",
            Self::DateTimeOffset => "DateTime<FixedOffset>",
            Self::Date => "NaiveDate",
            Self::DateTime => "NaiveDateTime",
            Self::Time => "NaiveTime",
        }
    }

    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::I128
                | Self::Isize
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::U128
                | Self::Usize
        )
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float() || matches!(self, Self::Number)
    }

    pub const fn is_temporal(self) -> bool {
        matches!(
            self,
            Self::DateTimeUtc | Self::DateTimeOffset | Self::Date | Self::DateTime | Self::Time
        )
    }

    /// Scalars that can be written as a JSON object key.
    pub const fn is_key_like(self) -> bool {
        self.is_integer() || matches!(self, Self::Bool | Self::Char | Self::String)
    }
}

// -----------------------------------------------------------------------------
// Container kinds

/// Concrete container behind an array or collection descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    Vec,
    BoxedSlice,
    Fixed(usize),
    VecDeque,
    LinkedList,
    HashSet,
    BTreeSet,
}

impl SequenceKind {
    const fn name(self) -> &'static str {
        match self {
            Self::Vec => "Vec",
            Self::BoxedSlice => "Box<[]>",
            Self::Fixed(_) => "[]",
            Self::VecDeque => "VecDeque",
            Self::LinkedList => "LinkedList",
            Self::HashSet => "HashSet",
            Self::BTreeSet => "BTreeSet",
        }
    }
}

/// Concrete container behind a map descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    HashMap,
    BTreeMap,
}

/// Direction of a wildcard bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundKind {
    /// The value is the bound or one of its implementations.
    Upper,
    /// The value is the bound or one of its generalizations.
    Lower,
}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// A resolved type: its shape and, for containers and objects, its generic
/// argument bindings.
///
/// Descriptors never contain unresolved generic parameters. They are hashable
/// and serve as keys of the model cache and of the type registry.
///
/// # Example
///
/// ```
/// use vc_bind::Bind;
/// use vc_bind::info::{ScalarKind, SequenceKind, TypeDescriptor};
///
/// let descriptor = <Vec<Option<u32>> as Bind>::type_info().descriptor();
/// assert_eq!(
///     descriptor,
///     TypeDescriptor::Array(
///         SequenceKind::Vec,
///         Box::new(TypeDescriptor::Optional(Box::new(TypeDescriptor::Scalar(ScalarKind::U32)))),
///     ),
/// );
/// assert_eq!(descriptor.to_string(), "Vec<Option<u32>>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Scalar(ScalarKind),
    Enum(RawType),
    Array(SequenceKind, Box<TypeDescriptor>),
    Collection(SequenceKind, Box<TypeDescriptor>),
    Map(MapKind, Box<TypeDescriptor>, Box<TypeDescriptor>),
    Optional(Box<TypeDescriptor>),
    Object(RawType, Arc<[TypeDescriptor]>),
    Wildcard(BoundKind, Box<TypeDescriptor>),
    /// Raw token tree, passed through unchanged.
    Tree,
    /// Any value; the runtime type decides.
    Dynamic,
}

impl TypeDescriptor {
    /// Returns the generic argument slots in declaration order.
    pub fn args(&self) -> Vec<&TypeDescriptor> {
        match self {
            Self::Array(_, item) | Self::Collection(_, item) | Self::Optional(item) => {
                alloc::vec![item.as_ref()]
            }
            Self::Map(_, key, value) => alloc::vec![key.as_ref(), value.as_ref()],
            Self::Object(_, args) => args.iter().collect(),
            Self::Wildcard(_, bound) => alloc::vec![bound.as_ref()],
            Self::Scalar(_) | Self::Enum(_) | Self::Tree | Self::Dynamic => Vec::new(),
        }
    }

    /// Rebuilds the descriptor with the given argument slots.
    ///
    /// Missing slots keep their current value, extra arguments are ignored.
    pub fn with_args(&self, args: Vec<TypeDescriptor>) -> TypeDescriptor {
        let mut args = args.into_iter();
        let mut slot = |current: &TypeDescriptor| args.next().unwrap_or_else(|| current.clone());
        match self {
            Self::Array(kind, item) => Self::Array(*kind, Box::new(slot(item))),
            Self::Collection(kind, item) => Self::Collection(*kind, Box::new(slot(item))),
            Self::Optional(item) => Self::Optional(Box::new(slot(item))),
            Self::Map(kind, key, value) => {
                let key = slot(key);
                Self::Map(*kind, Box::new(key), Box::new(slot(value)))
            }
            Self::Object(raw, current) => {
                let rebuilt: Vec<TypeDescriptor> = current.iter().map(&mut slot).collect();
                Self::Object(*raw, rebuilt.into())
            }
            Self::Wildcard(kind, bound) => Self::Wildcard(*kind, Box::new(slot(bound))),
            other => other.clone(),
        }
    }

    /// The same shape with every argument replaced by [`Dynamic`](Self::Dynamic);
    /// objects lose their arguments entirely.
    pub fn erased(&self) -> TypeDescriptor {
        match self {
            Self::Object(raw, _) => Self::Object(*raw, Arc::from(Vec::new())),
            Self::Wildcard(_, bound) => bound.erased(),
            other => {
                let slots = other.args().len();
                other.with_args(alloc::vec![Self::Dynamic; slots])
            }
        }
    }

    /// `false` for [`Dynamic`](Self::Dynamic), which stands for any implementation.
    #[inline]
    pub fn is_concrete(&self) -> bool {
        !matches!(self, Self::Dynamic)
    }

    /// Strips one wildcard level.
    pub fn unwrap_wildcard(&self) -> &TypeDescriptor {
        match self {
            Self::Wildcard(_, bound) => bound,
            other => other,
        }
    }

    /// Map keys of this shape are written as JSON object keys.
    pub fn is_key_like(&self) -> bool {
        match self.unwrap_wildcard() {
            Self::Scalar(kind) => kind.is_key_like(),
            Self::Enum(_) => true,
            _ => false,
        }
    }

    /// Byte sequences follow the configured binary strategy.
    pub fn is_bytes(&self) -> bool {
        matches!(self, Self::Array(_, item) if **item == Self::Scalar(ScalarKind::U8))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => f.write_str(kind.name()),
            Self::Enum(raw) => f.write_str(raw.name()),
            Self::Array(SequenceKind::Fixed(len), item) => write!(f, "[{item}; {len}]"),
            Self::Array(SequenceKind::BoxedSlice, item) => write!(f, "Box<[{item}]>"),
            Self::Array(kind, item) | Self::Collection(kind, item) => {
                write!(f, "{}<{item}>", kind.name())
            }
            Self::Map(MapKind::HashMap, key, value) => write!(f, "HashMap<{key}, {value}>"),
            Self::Map(MapKind::BTreeMap, key, value) => write!(f, "BTreeMap<{key}, {value}>"),
            Self::Optional(item) => write!(f, "Option<{item}>"),
            Self::Object(raw, args) => {
                f.write_str(raw.name())?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (index, arg) in args.iter().enumerate() {
                        if index > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::Wildcard(BoundKind::Upper, bound) => write!(f, "? extends {bound}"),
            Self::Wildcard(BoundKind::Lower, bound) => write!(f, "? super {bound}"),
            Self::Tree => f.write_str("Value"),
            Self::Dynamic => f.write_str("dyn DynBind"),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::sync::Arc;
    use alloc::vec;

    use super::*;

    fn holder(arg: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::Object(RawType::new("shapes::Holder"), Arc::from(vec![arg]))
    }

    #[test]
    fn with_args_replaces_slots() {
        let map = TypeDescriptor::Map(
            MapKind::BTreeMap,
            Box::new(TypeDescriptor::Scalar(ScalarKind::String)),
            Box::new(TypeDescriptor::Dynamic),
        );
        let rebuilt = map.with_args(vec![
            TypeDescriptor::Scalar(ScalarKind::String),
            TypeDescriptor::Scalar(ScalarKind::I64),
        ]);
        assert_eq!(rebuilt.to_string(), "BTreeMap<String, i64>");

        let partial = holder(TypeDescriptor::Dynamic).with_args(vec![]);
        assert_eq!(partial, holder(TypeDescriptor::Dynamic));
    }

    #[test]
    fn erased_drops_object_arguments() {
        let nested = holder(TypeDescriptor::Scalar(ScalarKind::F64));
        assert_eq!(nested.erased().to_string(), "Holder");
        assert!(nested.erased().args().is_empty());
    }

    #[test]
    fn byte_and_key_shapes() {
        let bytes = TypeDescriptor::Array(
            SequenceKind::Vec,
            Box::new(TypeDescriptor::Scalar(ScalarKind::U8)),
        );
        assert!(bytes.is_bytes());
        assert!(!TypeDescriptor::Collection(
            SequenceKind::VecDeque,
            Box::new(TypeDescriptor::Scalar(ScalarKind::U8)),
        )
        .is_bytes());

        assert!(TypeDescriptor::Scalar(ScalarKind::U64).is_key_like());
        assert!(TypeDescriptor::Enum(RawType::new("a::Color")).is_key_like());
        assert!(!TypeDescriptor::Scalar(ScalarKind::F64).is_key_like());
    }
}
