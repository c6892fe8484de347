//! The encoding walker.
//!
//! A [`Marshaller`] writes one value tree to a [`TokenWriter`]. For every
//! value it asks the [`ConverterRegistry`](crate::convert::ConverterRegistry)
//! how to convert it, then either hands it to a user converter, walks the
//! class model of an object, or writes a built-in kind directly.
//!
//! The runtime type of a value always decides its model, so a `DynValue`
//! holding a `Circle` is written with the properties of `Circle`.

use alloc::string::ToString;
use alloc::vec::Vec;

use log::trace;
use serde_json::Value;

use crate::DynBind;
use crate::access::BindRef;
use crate::config::{BinaryStrategy, DateFormat};
use crate::convert::{Dispatch, Formats, NumberFormat, encode_bytes, encode_scalar, key_to_string};
use crate::error::{BindError, ConstructionError, ResolutionError};
use crate::info::{MapInfo, TypeDescriptor, TypeInfo};
use crate::jsonb::Jsonb;
use crate::model::{PropertyModel, SideModel};
use crate::resolve::reconcile;
use crate::stream::{TokenWriter, write_tree};

// -----------------------------------------------------------------------------
// Scope

/// What the enclosing property or container says about one value.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Scope<'p> {
    /// The resolved descriptor the value is declared as.
    pub hint: Option<&'p TypeDescriptor>,
    pub date: Option<&'p DateFormat>,
    pub number: Option<&'p NumberFormat>,
    /// Converter named on the property; applies to the property value only.
    pub converter: Option<&'p str>,
}

impl<'p> Scope<'p> {
    /// The scope of a property value on one side.
    pub fn property(property: &'p PropertyModel, side: &'p SideModel) -> Self {
        Self {
            hint: Some(property.descriptor()),
            date: side.date_format.as_ref(),
            number: side.number_format.as_ref(),
            converter: side.converter.as_deref(),
        }
    }

    #[inline]
    pub fn with_hint(hint: &'p TypeDescriptor) -> Self {
        Self {
            hint: Some(hint),
            ..Self::default()
        }
    }

    /// The scope of the value in argument slot `slot` of a container.
    ///
    /// Formats carry over to elements, the converter does not.
    pub fn nested(&self, slot: usize) -> Self {
        Self {
            hint: self
                .hint
                .and_then(|hint| hint.unwrap_wildcard().args().get(slot).copied()),
            converter: None,
            ..*self
        }
    }

    /// The concrete descriptor requested for a dynamic value.
    pub fn concrete_hint(&self) -> Option<&'p TypeDescriptor> {
        self.hint
            .map(TypeDescriptor::unwrap_wildcard)
            .filter(|hint| hint.is_concrete())
    }

    pub fn formats<'a>(&self, fallback: &'a DateFormat) -> Formats<'a>
    where
        'p: 'a,
    {
        Formats {
            date: self.date.unwrap_or(fallback),
            number: self.number,
        }
    }
}

/// Map keys are written as object keys when their shape allows it.
pub(crate) fn keys_as_names(map: &MapInfo, key_hint: Option<&TypeDescriptor>) -> bool {
    match map.key() {
        TypeInfo::Dynamic(_) => key_hint.is_some_and(TypeDescriptor::is_key_like),
        key => key.descriptor().is_key_like(),
    }
}

/// Byte sequences honor the binary strategy.
pub(crate) fn is_bytes(info: &TypeInfo) -> bool {
    matches!(info, TypeInfo::Array(seq) if seq.item().type_is::<u8>())
}

fn mismatch(info: &TypeInfo, actual: &str) -> BindError {
    ConstructionError::TypeMismatch {
        expected: info.type_path().into(),
        actual: actual.into(),
    }
    .into()
}

// -----------------------------------------------------------------------------
// Marshaller

/// Writes values to a [`TokenWriter`] under the configuration of a [`Jsonb`].
///
/// User [`Converter`](crate::convert::Converter)s receive the marshaller to
/// write their tokens, or to encode a substitute value.
pub struct Marshaller<'a> {
    jsonb: &'a Jsonb,
    writer: &'a mut dyn TokenWriter,
}

impl<'a> Marshaller<'a> {
    #[inline]
    pub(crate) fn new(jsonb: &'a Jsonb, writer: &'a mut dyn TokenWriter) -> Self {
        Self { jsonb, writer }
    }

    /// The underlying token writer.
    #[inline]
    pub fn writer(&mut self) -> &mut dyn TokenWriter {
        &mut *self.writer
    }

    #[inline]
    pub fn jsonb(&self) -> &'a Jsonb {
        self.jsonb
    }

    /// Writes `value` as one JSON value.
    #[inline]
    pub fn encode(&mut self, value: &dyn DynBind) -> Result<(), BindError> {
        self.encode_value(value, Scope::default())
    }

    pub(crate) fn encode_value(
        &mut self,
        value: &dyn DynBind,
        scope: Scope<'_>,
    ) -> Result<(), BindError> {
        let info = value.dyn_type_info();
        match self.jsonb.converters().dispatch(info, scope.converter)? {
            Dispatch::Custom(converter) => converter
                .encode(value, self)
                .map_err(|err| BindError::conversion(info.type_path(), None, err)),
            Dispatch::Object => self.encode_object(value, info, scope.hint),
            Dispatch::Builtin(_) => self.encode_builtin(value, info, scope),
        }
    }

    fn encode_builtin(
        &mut self,
        value: &dyn DynBind,
        info: &'static TypeInfo,
        scope: Scope<'_>,
    ) -> Result<(), BindError> {
        match value.bind_ref() {
            BindRef::Value(any) => match info {
                TypeInfo::Scalar(scalar) => {
                    let formats = scope.formats(&self.jsonb.config().date_format);
                    encode_scalar(scalar.kind(), any, &formats, &mut *self.writer)
                }
                TypeInfo::Tree(_) => {
                    let tree = any
                        .downcast_ref::<Value>()
                        .ok_or_else(|| mismatch(info, value.type_path()))?;
                    Ok(write_tree(&mut *self.writer, tree)?)
                }
                _ => Err(mismatch(info, value.type_path())),
            },
            BindRef::Enum(variants) => {
                let name = info
                    .as_enum()
                    .ok()
                    .and_then(|info| info.variant_name(variants.variant_index()))
                    .ok_or_else(|| mismatch(info, value.type_path()))?;
                Ok(self.writer.string(name)?)
            }
            BindRef::Sequence(seq) => {
                let strategy = self.jsonb.config().binary_strategy();
                if strategy != BinaryStrategy::Bytes && is_bytes(info) {
                    let bytes = seq
                        .iter()
                        .map(|item| item.downcast_ref::<u8>().copied())
                        .collect::<Option<Vec<u8>>>()
                        .ok_or_else(|| mismatch(info, value.type_path()))?;
                    return encode_bytes(&bytes, strategy, &mut *self.writer);
                }
                let items = scope.nested(0);
                self.writer.start_array()?;
                for item in seq.iter() {
                    self.encode_value(item, items)?;
                }
                Ok(self.writer.end_array()?)
            }
            BindRef::Map(map) => {
                let info = info
                    .as_map()
                    .map_err(|_| mismatch(info, value.type_path()))?;
                let (keys, values) = (scope.nested(0), scope.nested(1));
                if keys_as_names(info, keys.hint) {
                    self.writer.start_object()?;
                    for (key, value) in map.iter() {
                        self.writer.key(&key_to_string(key)?)?;
                        self.encode_value(value, values)?;
                    }
                    Ok(self.writer.end_object()?)
                } else {
                    self.writer.start_array()?;
                    for (key, value) in map.iter() {
                        self.writer.start_object()?;
                        self.writer.key("key")?;
                        self.encode_value(key, keys)?;
                        self.writer.key("value")?;
                        self.encode_value(value, values)?;
                        self.writer.end_object()?;
                    }
                    Ok(self.writer.end_array()?)
                }
            }
            BindRef::Optional(Some(inner)) => self.encode_value(inner, scope.nested(0)),
            BindRef::Optional(None) => Ok(self.writer.null()?),
            BindRef::Object(_) => self.encode_object(value, info, scope.hint),
            BindRef::Dynamic(inner) => {
                if let Some(hint) = scope.concrete_hint() {
                    let actual = inner.dyn_type_info().descriptor();
                    if reconcile(hint, &actual).is_none() {
                        return Err(ResolutionError::IncompatibleRuntime {
                            expected: hint.to_string(),
                            actual: actual.to_string(),
                        }
                        .into());
                    }
                }
                self.encode_value(inner, scope)
            }
        }
    }

    fn encode_object(
        &mut self,
        value: &dyn DynBind,
        info: &'static TypeInfo,
        hint: Option<&TypeDescriptor>,
    ) -> Result<(), BindError> {
        let descriptor = self.jsonb.object_descriptor(info, hint);
        let model = self.jsonb.class_model_of(info, &descriptor)?;
        let default_nillable = self.jsonb.customization().nillable;

        self.writer.start_object()?;
        for property in model.readable() {
            let Some(getter) = property.getter() else {
                continue;
            };
            let held = getter.read(value)?;
            let member = held.get();
            let side = property.serialize();
            if matches!(member.bind_ref(), BindRef::Optional(None))
                && !side.nillable.unwrap_or(default_nillable)
            {
                trace!("omitting absent property `{}`", property.name());
                continue;
            }
            self.writer.key(property.write_name())?;
            self.encode_value(member, Scope::property(property, side))
                .map_err(|err| err.in_property(property.name()))?;
        }
        Ok(self.writer.end_object()?)
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::config::BinaryStrategy;
    use crate::{Bind, DynValue, Jsonb, JsonbConfig};

    #[derive(Bind, Default)]
    #[bind(nillable)]
    struct Sparse {
        pub a: Option<u8>,
        #[bind(nillable = false)]
        pub b: Option<u8>,
    }

    #[derive(Bind, Default)]
    struct Plain {
        pub a: Option<u8>,
        pub tags: Vec<String>,
    }

    #[derive(Bind, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
    enum Side {
        #[default]
        Left,
        #[bind(rename = "R")]
        Right,
    }

    #[test]
    fn absent_values_follow_nillable() {
        let jsonb = Jsonb::new();
        assert_eq!(jsonb.to_json(&Sparse::default()).unwrap(), r#"{"a":null}"#);
        assert_eq!(jsonb.to_json(&Plain::default()).unwrap(), r#"{"tags":[]}"#);

        let jsonb = Jsonb::with_config(JsonbConfig::new().with_null_values(true));
        assert_eq!(
            jsonb.to_json(&Plain::default()).unwrap(),
            r#"{"a":null,"tags":[]}"#
        );
    }

    #[test]
    fn elements_keep_nulls() {
        let jsonb = Jsonb::new();
        let values = vec![Some(1_u8), None];
        assert_eq!(jsonb.to_json(&values).unwrap(), "[1,null]");
    }

    #[test]
    fn enums_and_map_keys() {
        let jsonb = Jsonb::new();
        let mut map = BTreeMap::new();
        map.insert(Side::Right, 1_u8);
        map.insert(Side::Left, 2_u8);
        assert_eq!(jsonb.to_json(&map).unwrap(), r#"{"Left":2,"R":1}"#);

        let mut map = BTreeMap::new();
        map.insert(vec![1_u8], 7_u8);
        assert_eq!(
            jsonb.to_json(&map).unwrap(),
            r#"[{"key":[1],"value":7}]"#
        );
    }

    #[test]
    fn bytes_follow_strategy() {
        let bytes = vec![0xfb_u8, 0xff, 0x01];
        assert_eq!(Jsonb::new().to_json(&bytes).unwrap(), "[251,255,1]");

        let jsonb = Jsonb::with_config(JsonbConfig::new().with_binary(BinaryStrategy::Base64));
        assert_eq!(jsonb.to_json(&bytes).unwrap(), r#""+/8B""#);
    }

    #[test]
    fn dynamic_values_use_runtime_type() {
        let jsonb = Jsonb::new();
        let values = vec![DynValue::new(1_u8), DynValue::new(String::from("x")), DynValue::default()];
        assert_eq!(jsonb.to_json(&values).unwrap(), r#"[1,"x",null]"#);
    }
}
