//! The decoding walker.
//!
//! An [`Unmarshaller`] reads one value from a [`TokenReader`] into a freshly
//! built instance of a [`TypeInfo`]. Objects are built either through their
//! creator, with every other property applied once the creator returned, or
//! through their default constructor followed by one setter call per key.
//!
//! Values stored as [`DynValue`] are decoded as the concrete descriptor the
//! property resolved to, looked up in the type registry. Without a concrete
//! descriptor they are kept as a raw `serde_json::Value`.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use log::trace;

use crate::access::DynValue;
use crate::convert::{Dispatch, decode_base64, decode_scalar, key_from_string};
use crate::error::{BindError, ConstructionError, StreamError};
use crate::info::{CreatorArgs, MapInfo, SequenceInfo, TypeDescriptor, TypeInfo, TypeKind};
use crate::jsonb::Jsonb;
use crate::marshal::{Scope, is_bytes};
use crate::model::ClassModel;
use crate::stream::{Token, TokenKind, TokenReader, read_tree};
use crate::DynBind;

/// Storage kinds that take a JSON `null` as a value.
fn accepts_null(info: &TypeInfo) -> bool {
    matches!(
        info.kind(),
        TypeKind::Optional | TypeKind::Tree | TypeKind::Dynamic
    )
}

fn null_value(info: &TypeInfo) -> BindError {
    ConstructionError::NullValue {
        ty: info.type_path().into(),
    }
    .into()
}

// -----------------------------------------------------------------------------
// Unmarshaller

/// Reads values from a [`TokenReader`] under the configuration of a [`Jsonb`].
///
/// User [`Converter`](crate::convert::Converter)s receive the unmarshaller to
/// read their tokens, or to decode a substitute value.
pub struct Unmarshaller<'a> {
    jsonb: &'a Jsonb,
    reader: &'a mut dyn TokenReader,
}

impl<'a> Unmarshaller<'a> {
    #[inline]
    pub(crate) fn new(jsonb: &'a Jsonb, reader: &'a mut dyn TokenReader) -> Self {
        Self { jsonb, reader }
    }

    /// The underlying token reader.
    #[inline]
    pub fn reader(&mut self) -> &mut dyn TokenReader {
        &mut *self.reader
    }

    #[inline]
    pub fn jsonb(&self) -> &'a Jsonb {
        self.jsonb
    }

    /// Reads the next value as an instance of `info`.
    #[inline]
    pub fn decode(&mut self, info: &'static TypeInfo) -> Result<Box<dyn DynBind>, BindError> {
        self.decode_value(info, Scope::default())
    }

    /// Reads the next value as an instance of `info`, declared as `hint`.
    ///
    /// The hint decides the concrete type of `DynValue` storage and the
    /// arguments of generic objects.
    #[inline]
    pub fn decode_with_hint(
        &mut self,
        info: &'static TypeInfo,
        hint: &TypeDescriptor,
    ) -> Result<Box<dyn DynBind>, BindError> {
        self.decode_value(info, Scope::with_hint(hint))
    }

    pub(crate) fn decode_value(
        &mut self,
        info: &'static TypeInfo,
        scope: Scope<'_>,
    ) -> Result<Box<dyn DynBind>, BindError> {
        match self.jsonb.converters().dispatch(info, scope.converter)? {
            Dispatch::Custom(converter) => converter
                .decode(info, self)
                .map_err(|err| BindError::conversion(info.type_path(), None, err)),
            Dispatch::Object => self.decode_object(info, scope.hint),
            Dispatch::Builtin(_) => self.decode_builtin(info, scope),
        }
    }

    fn decode_builtin(
        &mut self,
        info: &'static TypeInfo,
        scope: Scope<'_>,
    ) -> Result<Box<dyn DynBind>, BindError> {
        match info {
            TypeInfo::Scalar(scalar) => {
                let token = self.reader.read()?;
                if token == Token::Null {
                    return Err(null_value(info));
                }
                let formats = scope.formats(&self.jsonb.config().date_format);
                decode_scalar(scalar.kind(), token, &formats)
            }
            TypeInfo::Enum(variants) => match self.reader.read()? {
                Token::String(name) => variants
                    .index_of(&name)
                    .and_then(|index| variants.from_index(index))
                    .ok_or_else(|| {
                        ConstructionError::Value {
                            ty: info.type_path().into(),
                            message: alloc::format!("unknown variant `{name}`"),
                        }
                        .into()
                    }),
                Token::Null => Err(null_value(info)),
                other => Err(StreamError::unexpected("a variant name", other).into()),
            },
            TypeInfo::Array(seq) | TypeInfo::Collection(seq) => {
                self.decode_sequence(info, seq, scope)
            }
            TypeInfo::Map(map) => self.decode_map(info, map, scope),
            TypeInfo::Optional(optional) => {
                if self.reader.peek()? == Some(TokenKind::Null) {
                    self.reader.read()?;
                    return optional.from_option(None);
                }
                let inner = self.decode_value(optional.some(), scope.nested(0))?;
                optional.from_option(Some(inner))
            }
            TypeInfo::Tree(_) => Ok(Box::new(read_tree(&mut *self.reader)?)),
            TypeInfo::Dynamic(_) => self.decode_dynamic(scope),
            TypeInfo::Object(_) => self.decode_object(info, scope.hint),
        }
    }

    fn decode_sequence(
        &mut self,
        info: &'static TypeInfo,
        seq: &SequenceInfo,
        scope: Scope<'_>,
    ) -> Result<Box<dyn DynBind>, BindError> {
        match self.reader.peek()? {
            Some(TokenKind::Null) => return Err(null_value(info)),
            Some(TokenKind::String) if is_bytes(info) => {
                let text = match self.reader.read()? {
                    Token::String(text) => text,
                    other => return Err(StreamError::unexpected("a base64 string", other).into()),
                };
                let strategy = self.jsonb.config().binary_strategy();
                let items = decode_base64(&text, strategy)?
                    .into_iter()
                    .map(|byte| Box::new(byte) as Box<dyn DynBind>)
                    .collect();
                return seq.from_items(items);
            }
            _ => {}
        }

        self.expect(Token::StartArray)?;
        let scope = scope.nested(0);
        let mut items = Vec::new();
        while !self.reader.at_container_end()? {
            items.push(self.decode_value(seq.item(), scope)?);
        }
        self.expect(Token::EndArray)?;
        seq.from_items(items)
    }

    fn decode_map(
        &mut self,
        info: &'static TypeInfo,
        map: &MapInfo,
        scope: Scope<'_>,
    ) -> Result<Box<dyn DynBind>, BindError> {
        let (keys, values) = (scope.nested(0), scope.nested(1));
        let mut entries = Vec::new();
        match self.reader.read()? {
            Token::StartObject => {
                while !self.reader.at_container_end()? {
                    let name = self.key()?;
                    let key = self.decode_key(map.key(), keys, name)?;
                    let value = self.decode_value(map.value(), values)?;
                    entries.push((key, value));
                }
                self.expect(Token::EndObject)?;
            }
            Token::StartArray => {
                while !self.reader.at_container_end()? {
                    self.expect(Token::StartObject)?;
                    let (mut key, mut value) = (None, None);
                    while !self.reader.at_container_end()? {
                        match self.key()?.as_str() {
                            "key" => key = Some(self.decode_value(map.key(), keys)?),
                            "value" => value = Some(self.decode_value(map.value(), values)?),
                            _ => self.reader.skip_value()?,
                        }
                    }
                    self.expect(Token::EndObject)?;
                    match (key, value) {
                        (Some(key), Some(value)) => entries.push((key, value)),
                        _ => {
                            return Err(ConstructionError::Value {
                                ty: info.type_path().into(),
                                message: "a map entry needs both `key` and `value`".into(),
                            }
                            .into());
                        }
                    }
                }
                self.expect(Token::EndArray)?;
            }
            Token::Null => return Err(null_value(info)),
            other => return Err(StreamError::unexpected("`{` or `[`", other).into()),
        }
        map.from_entries(entries)
    }

    fn decode_key(
        &mut self,
        info: &'static TypeInfo,
        scope: Scope<'_>,
        name: String,
    ) -> Result<Box<dyn DynBind>, BindError> {
        match (info, scope.concrete_hint()) {
            (TypeInfo::Dynamic(_), Some(hint)) => {
                let target = self.jsonb.lookup(hint)?;
                let key = key_from_string(target, name)?;
                Ok(Box::new(DynValue::from_boxed(key)))
            }
            _ => key_from_string(info, name),
        }
    }

    fn decode_dynamic(&mut self, scope: Scope<'_>) -> Result<Box<dyn DynBind>, BindError> {
        let Some(hint) = scope.concrete_hint() else {
            let tree = read_tree(&mut *self.reader)?;
            return Ok(Box::new(DynValue::new(tree)));
        };
        if self.reader.peek()? == Some(TokenKind::Null) {
            self.reader.read()?;
            return Ok(Box::new(DynValue::default()));
        }
        let target = self.jsonb.lookup(hint)?;
        trace!("decoding a dynamic value as `{hint}`");
        let scope = Scope {
            hint: Some(hint),
            converter: None,
            ..scope
        };
        let value = self.decode_value(target, scope)?;
        Ok(Box::new(DynValue::from_boxed(value)))
    }

    fn decode_object(
        &mut self,
        info: &'static TypeInfo,
        hint: Option<&TypeDescriptor>,
    ) -> Result<Box<dyn DynBind>, BindError> {
        if self.reader.peek()? == Some(TokenKind::Null) {
            return Err(null_value(info));
        }
        let descriptor = self.jsonb.object_descriptor(info, hint);
        let model = self.jsonb.class_model_of(info, &descriptor)?;

        self.expect(Token::StartObject)?;
        let value = match model.creator() {
            Some(_) => self.decode_with_creator(&model)?,
            None => self.decode_with_setters(&model)?,
        };
        self.expect(Token::EndObject)?;
        Ok(value)
    }

    fn decode_with_setters(&mut self, model: &ClassModel) -> Result<Box<dyn DynBind>, BindError> {
        let info = model.info();
        let mut value = info
            .as_object()
            .ok()
            .and_then(|object| object.default_construct())
            .ok_or_else(|| ConstructionError::NoDefaultConstructor {
                ty: info.type_path().into(),
            })?;

        while !self.reader.at_container_end()? {
            let key = self.key()?;
            if let Some((index, member)) = self.property_value(model, &key)? {
                Self::apply(model, index, &mut *value, member)?;
            }
        }
        Ok(value)
    }

    fn decode_with_creator(&mut self, model: &ClassModel) -> Result<Box<dyn DynBind>, BindError> {
        let info = model.info();
        let Some(creator) = model.creator() else {
            return self.decode_with_setters(model);
        };
        let params = creator.params();
        let mut args: Vec<Option<Box<dyn DynBind>>> = params.iter().map(|_| None).collect();
        let mut pending = Vec::new();

        while !self.reader.at_container_end()? {
            let key = self.key()?;
            let Some(slot) = creator.param_for_key(&key) else {
                if let Some(member) = self.property_value(model, &key)? {
                    pending.push(member);
                }
                continue;
            };
            let param = &params[slot];
            if self.reader.peek()? == Some(TokenKind::Null) && !accepts_null(param.storage()) {
                self.reader.read()?;
                continue;
            }
            let scope = match param.property().and_then(|index| model.properties().get(index)) {
                Some(property) => Scope {
                    hint: Some(param.descriptor()),
                    ..Scope::property(property, property.deserialize())
                },
                None => Scope::with_hint(param.descriptor()),
            };
            let arg = self
                .decode_value(param.storage(), scope)
                .map_err(|err| err.in_property(param.name()))?;
            args[slot] = Some(arg);
        }

        for (arg, param) in args.iter_mut().zip(params) {
            if let (true, TypeInfo::Optional(optional)) = (arg.is_none(), param.storage()) {
                *arg = Some(optional.from_option(None)?);
            }
        }

        let names = params.iter().map(|param| param.name()).collect();
        let mut value = creator
            .info()
            .invoke(CreatorArgs::new(info.type_path(), names, args))?;
        for (index, member) in pending {
            Self::apply(model, index, &mut *value, member)?;
        }
        Ok(value)
    }

    /// Decodes the value of `key` for its property.
    ///
    /// Returns `None` when the key is skipped: unknown in lenient mode,
    /// read-only, or `null` for a property that cannot hold it.
    fn property_value(
        &mut self,
        model: &ClassModel,
        key: &str,
    ) -> Result<Option<(usize, Box<dyn DynBind>)>, BindError> {
        let Some(index) = model.index_for_key(key) else {
            return self.unknown(model, key).map(|()| None);
        };
        let Some(property) = model.properties().get(index) else {
            return self.unknown(model, key).map(|()| None);
        };
        if !property.is_writable() {
            self.reader.skip_value()?;
            return Ok(None);
        }
        if self.reader.peek()? == Some(TokenKind::Null) && !accepts_null(property.storage()) {
            self.reader.read()?;
            return Ok(None);
        }
        let scope = Scope::property(property, property.deserialize());
        let value = self
            .decode_value(property.storage(), scope)
            .map_err(|err| err.in_property(property.name()))?;
        Ok(Some((index, value)))
    }

    fn apply(
        model: &ClassModel,
        index: usize,
        target: &mut dyn DynBind,
        value: Box<dyn DynBind>,
    ) -> Result<(), BindError> {
        let Some(property) = model.properties().get(index) else {
            return Ok(());
        };
        match property.setter() {
            Some(setter) => setter
                .write(target, value)
                .map_err(|err| err.in_property(property.name())),
            None => Ok(()),
        }
    }

    fn unknown(&mut self, model: &ClassModel, key: &str) -> Result<(), BindError> {
        let ty = model.info().type_path();
        if self.jsonb.customization().fails_on_unknown() {
            return Err(BindError::UnknownProperty {
                ty: ty.into(),
                name: key.into(),
            });
        }
        trace!("skipping unknown property `{key}` of `{ty}`");
        Ok(self.reader.skip_value()?)
    }

    fn key(&mut self) -> Result<String, BindError> {
        match self.reader.read()? {
            Token::Key(key) => Ok(key),
            other => Err(StreamError::unexpected("a key", other).into()),
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), BindError> {
        let token = self.reader.read()?;
        if token == expected {
            Ok(())
        } else {
            Err(StreamError::unexpected(expected, token).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::config::BinaryStrategy;
    use crate::error::{BindError, ConstructionError, StreamError};
    use crate::{Bind, DynValue, Jsonb, JsonbConfig};

    #[derive(Bind, Default, Debug, PartialEq)]
    struct Point {
        pub x: i32,
        pub y: i32,
        pub label: Option<String>,
    }

    #[derive(Bind, Debug, PartialEq)]
    #[bind(no_default, creator(with = Self::new, params("id": u32, "note": Option<String>)))]
    struct Fixed {
        pub id: u32,
        pub note: Option<String>,
        pub extra: u8,
    }

    impl Fixed {
        fn new(id: u32, note: Option<String>) -> Self {
            Self { id, note, extra: 0 }
        }
    }

    #[test]
    fn setters_and_nulls() {
        let jsonb = Jsonb::new();
        let point: Point = jsonb
            .from_json(r#"{"y": 2, "x": null, "label": null, "z": [1, {"a": 2}]}"#)
            .unwrap();
        assert_eq!(
            point,
            Point {
                x: 0,
                y: 2,
                label: None
            }
        );

        let err = jsonb.from_json::<Vec<u8>>("[1, null]").unwrap_err();
        assert!(matches!(
            err,
            BindError::Construction(ConstructionError::NullValue { .. })
        ));
    }

    #[test]
    fn unknown_properties_in_strict_mode() {
        let jsonb = Jsonb::with_config(JsonbConfig::new().with_fail_on_unknown_properties(true));
        let err = jsonb.from_json::<Point>(r#"{"z": 1}"#).unwrap_err();
        assert!(matches!(err, BindError::UnknownProperty { ref name, .. } if name == "z"));
    }

    #[test]
    fn creator_then_setters() {
        let jsonb = Jsonb::new();
        let fixed: Fixed = jsonb.from_json(r#"{"extra": 3, "id": 9}"#).unwrap();
        assert_eq!(
            fixed,
            Fixed {
                id: 9,
                note: None,
                extra: 3
            }
        );

        let err = jsonb.from_json::<Fixed>(r#"{"extra": 3}"#).unwrap_err();
        assert!(matches!(
            err,
            BindError::Construction(ConstructionError::MissingCreatorParameter { ref name, .. })
                if name == "id"
        ));
    }

    #[test]
    fn maps_in_both_forms() {
        let jsonb = Jsonb::new();
        let map: BTreeMap<u8, String> = jsonb.from_json(r#"{"1": "a", "2": "b"}"#).unwrap();
        assert_eq!(map.get(&2).map(String::as_str), Some("b"));

        let map: BTreeMap<u8, String> = jsonb
            .from_json(r#"[{"key": 1, "value": "a"}, {"value": "b", "key": 2}]"#)
            .unwrap();
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn bytes_accept_strings_and_arrays() {
        let jsonb = Jsonb::with_config(JsonbConfig::new().with_binary(BinaryStrategy::Base64Url));
        let bytes: Vec<u8> = jsonb.from_json(r#""-_8B""#).unwrap();
        assert_eq!(bytes, [0xfb, 0xff, 0x01]);
        let bytes: Vec<u8> = jsonb.from_json("[1, 2]").unwrap();
        assert_eq!(bytes, [1, 2]);
    }

    #[test]
    fn dynamic_without_hint_keeps_tree() {
        let jsonb = Jsonb::new();
        let values: Vec<DynValue> = jsonb.from_json(r#"[1, "x", {"a": null}]"#).unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(
            values[1].downcast_ref::<serde_json::Value>(),
            Some(&serde_json::Value::from("x"))
        );
    }

    #[test]
    fn truncated_input() {
        let jsonb = Jsonb::new();
        let tokens = vec![crate::stream::Token::StartArray];
        let mut reader = crate::stream::JsonReader::from_tokens(tokens);
        let err = jsonb.decode::<Vec<u8>>(&mut reader).unwrap_err();
        assert!(matches!(err, BindError::Stream(StreamError::UnexpectedEnd)));
    }
}
