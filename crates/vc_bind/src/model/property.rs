use alloc::boxed::Box;
use alloc::string::String;

use crate::DynBind;
use crate::access::Object;
use crate::config::DateFormat;
use crate::convert::NumberFormat;
use crate::error::{BindError, ConstructionError};
use crate::info::{RawType, TypeDescriptor, TypeInfo};

// -----------------------------------------------------------------------------
// Access

/// The member a property value is read from or written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member {
    Field(usize),
    Getter(usize),
    Setter(usize),
}

/// A member reached through a chain of parent fields.
///
/// `path` lists the indices of the parent fields leading from the root
/// object to the object declaring the member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Access {
    path: Box<[usize]>,
    member: Member,
}

/// A property value, borrowed from a field or returned by a getter.
pub enum Held<'a> {
    Borrowed(&'a dyn DynBind),
    Owned(Box<dyn DynBind>),
}

impl Held<'_> {
    #[inline]
    pub fn get(&self) -> &dyn DynBind {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => &**value,
        }
    }
}

impl Access {
    #[inline]
    pub(crate) fn new(path: &[usize], member: Member) -> Self {
        Self {
            path: path.into(),
            member,
        }
    }

    #[inline]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    #[inline]
    pub const fn member(&self) -> Member {
        self.member
    }

    /// Reads the member from `root`.
    pub fn read<'a>(&self, root: &'a dyn DynBind) -> Result<Held<'a>, BindError> {
        let ty = root.type_path();
        let mut current = root.bind_ref().as_object().ok_or_else(|| no_member(ty, 0))?;
        for &index in self.path.iter() {
            current = current
                .field_at(index)
                .and_then(|parent| parent.bind_ref().as_object())
                .ok_or_else(|| no_member(ty, index))?;
        }

        match self.member {
            Member::Field(index) => current
                .field_at(index)
                .map(Held::Borrowed)
                .ok_or_else(|| no_member(ty, index)),
            Member::Getter(index) => current
                .call_getter(index)
                .map(Held::Owned)
                .ok_or_else(|| no_member(ty, index)),
            Member::Setter(index) => Err(no_member(ty, index)),
        }
    }

    /// Writes `value` to the member of `root`.
    pub fn write(&self, root: &mut dyn DynBind, value: Box<dyn DynBind>) -> Result<(), BindError> {
        let ty = root.type_path();
        let mut current: &mut dyn Object =
            root.bind_mut().into_object().ok_or_else(|| no_member(ty, 0))?;
        for &index in self.path.iter() {
            current = current
                .field_at_mut(index)
                .and_then(|parent| parent.bind_mut().into_object())
                .ok_or_else(|| no_member(ty, index))?;
        }

        match self.member {
            Member::Field(index) => current.set_field_at(index, value),
            Member::Setter(index) => current.call_setter(index, value),
            Member::Getter(index) => Err(no_member(ty, index)),
        }
    }
}

fn no_member(ty: &str, index: usize) -> BindError {
    ConstructionError::NoMember {
        ty: ty.into(),
        index,
    }
    .into()
}

// -----------------------------------------------------------------------------
// SideModel

/// Customization in effect on one side of a property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideModel {
    /// `None` defers to the configuration.
    pub nillable: Option<bool>,
    pub date_format: Option<DateFormat>,
    pub number_format: Option<NumberFormat>,
    pub converter: Option<String>,
}

// -----------------------------------------------------------------------------
// PropertyModel

/// One logical property of a [`ClassModel`](crate::model::ClassModel).
///
/// A property is *readable* when its value can be read from an instance,
/// which makes it part of the encoded output, and *writable* when a decoded
/// value can be stored into an instance. The read name is the JSON key
/// accepted on decode, the write name the key emitted on encode.
#[derive(Debug, Clone)]
pub struct PropertyModel {
    pub(crate) name: &'static str,
    pub(crate) owner: RawType,
    pub(crate) read_name: String,
    pub(crate) write_name: String,
    pub(crate) descriptor: TypeDescriptor,
    pub(crate) storage: &'static TypeInfo,
    pub(crate) getter: Option<Access>,
    pub(crate) setter: Option<Access>,
    pub(crate) serialize: SideModel,
    pub(crate) deserialize: SideModel,
}

impl PropertyModel {
    /// The logical name, before naming strategy and renames.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The type declaring the property.
    #[inline]
    pub const fn owner(&self) -> RawType {
        self.owner
    }

    /// The JSON key matched on decode.
    #[inline]
    pub fn read_name(&self) -> &str {
        &self.read_name
    }

    /// The JSON key written on encode.
    #[inline]
    pub fn write_name(&self) -> &str {
        &self.write_name
    }

    /// The resolved value type.
    #[inline]
    pub const fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Type information of the member's storage type.
    #[inline]
    pub const fn storage(&self) -> &'static TypeInfo {
        self.storage
    }

    #[inline]
    pub const fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    #[inline]
    pub const fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    #[inline]
    pub const fn getter(&self) -> Option<&Access> {
        self.getter.as_ref()
    }

    #[inline]
    pub const fn setter(&self) -> Option<&Access> {
        self.setter.as_ref()
    }

    /// Customization used when encoding.
    #[inline]
    pub const fn serialize(&self) -> &SideModel {
        &self.serialize
    }

    /// Customization used when decoding.
    #[inline]
    pub const fn deserialize(&self) -> &SideModel {
        &self.deserialize
    }
}
