use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use crate::hash::HashMap;
use crate::info::{CreatorInfo, TypeDescriptor, TypeInfo};
use crate::model::PropertyModel;

// -----------------------------------------------------------------------------
// CreatorModel

/// One creator parameter, bound to a JSON key.
#[derive(Debug, Clone)]
pub struct CreatorParamModel {
    pub(crate) name: &'static str,
    pub(crate) descriptor: TypeDescriptor,
    pub(crate) storage: &'static TypeInfo,
    /// The property sharing the key, whose formats and converter apply.
    pub(crate) property: Option<usize>,
}

impl CreatorParamModel {
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    #[inline]
    pub const fn storage(&self) -> &'static TypeInfo {
        self.storage
    }

    #[inline]
    pub const fn property(&self) -> Option<usize> {
        self.property
    }
}

/// The creator selected for a type.
#[derive(Debug, Clone)]
pub struct CreatorModel {
    pub(crate) info: &'static CreatorInfo,
    pub(crate) params: Box<[CreatorParamModel]>,
    pub(crate) case_insensitive: bool,
}

impl CreatorModel {
    #[inline]
    pub const fn info(&self) -> &'static CreatorInfo {
        self.info
    }

    #[inline]
    pub fn params(&self) -> &[CreatorParamModel] {
        &self.params
    }

    /// Index of the parameter bound to `key`.
    ///
    /// Keys are matched ignoring ASCII case under a case-insensitive naming
    /// strategy.
    pub fn param_for_key(&self, key: &str) -> Option<usize> {
        if self.case_insensitive {
            self.params.iter().position(|param| param.name.eq_ignore_ascii_case(key))
        } else {
            self.params.iter().position(|param| param.name == key)
        }
    }
}

// -----------------------------------------------------------------------------
// ClassModel

/// The ordered properties and optional creator of one resolved object type.
///
/// Built once per (type, descriptor) pair by the [`ModelCache`](crate::model::ModelCache)
/// and immutable afterwards.
///
/// # Example
///
/// ```
/// use vc_bind::{Bind, Jsonb};
///
/// #[derive(Bind, Default)]
/// struct Person {
///     pub name: String,
///     #[bind(rename = "years")]
///     pub age: u32,
/// }
///
/// let jsonb = Jsonb::new();
/// let model = jsonb.class_model::<Person>().unwrap();
/// let names: Vec<_> = model.properties().iter().map(|p| p.write_name()).collect();
/// assert_eq!(names, ["name", "years"]);
/// assert_eq!(model.property_for_key("years").unwrap().name(), "age");
/// assert!(model.creator().is_none());
/// ```
pub struct ClassModel {
    pub(crate) info: &'static TypeInfo,
    pub(crate) descriptor: TypeDescriptor,
    pub(crate) properties: Box<[PropertyModel]>,
    pub(crate) read_index: HashMap<String, usize>,
    pub(crate) case_insensitive: bool,
    pub(crate) creator: Option<CreatorModel>,
}

impl ClassModel {
    #[inline]
    pub const fn info(&self) -> &'static TypeInfo {
        self.info
    }

    #[inline]
    pub const fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// The properties, in output order.
    #[inline]
    pub fn properties(&self) -> &[PropertyModel] {
        &self.properties
    }

    /// Looks a property up by logical name.
    pub fn property(&self, name: &str) -> Option<&PropertyModel> {
        self.properties.iter().find(|property| property.name() == name)
    }

    /// Index of the property decoded from the JSON key `key`.
    pub fn index_for_key(&self, key: &str) -> Option<usize> {
        if self.case_insensitive {
            self.read_index.get(&key.to_ascii_lowercase()).copied()
        } else {
            self.read_index.get(key).copied()
        }
    }

    /// The property decoded from the JSON key `key`.
    #[inline]
    pub fn property_for_key(&self, key: &str) -> Option<&PropertyModel> {
        self.index_for_key(key).and_then(|index| self.properties.get(index))
    }

    /// The properties written on encode, in output order.
    pub fn readable(&self) -> impl Iterator<Item = &PropertyModel> {
        self.properties.iter().filter(|property| property.is_readable())
    }

    #[inline]
    pub const fn creator(&self) -> Option<&CreatorModel> {
        self.creator.as_ref()
    }
}

impl fmt::Debug for ClassModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassModel")
            .field("ty", &self.info.type_path())
            .field("descriptor", &self.descriptor)
            .field("properties", &self.properties)
            .field("creator", &self.creator)
            .finish_non_exhaustive()
    }
}
