use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::io;

use log::debug;
use serde_json::Value;

use crate::access::{BindRef, downcast_value};
use crate::convert::ConverterRegistry;
use crate::customize::CustomizationRecord;
use crate::error::{BindError, ResolutionError, StreamError};
use crate::info::{TypeDescriptor, TypeInfo};
use crate::marshal::{Marshaller, Scope, is_bytes};
use crate::model::{ClassModel, ModelCache, build};
use crate::registry::TypeRegistryArc;
use crate::resolve::reconcile;
use crate::stream::{JsonReader, JsonWriter, TokenKind, TokenReader, TokenWriter};
use crate::unmarshal::Unmarshaller;
use crate::{Bind, DynBind, DynValue, JsonbConfig};

// -----------------------------------------------------------------------------
// Jsonb

/// A configured JSON binding engine.
///
/// Owns the class models and converters derived from one [`JsonbConfig`],
/// plus a [`TypeRegistryArc`] used to decode dynamic values. Every method
/// takes `&self`; one instance can be shared across threads.
///
/// # Example
///
/// ```
/// use vc_bind::{Bind, Jsonb};
///
/// #[derive(Bind, Default, Debug, PartialEq)]
/// struct Person {
///     pub name: String,
///     pub age: u32,
/// }
///
/// let jsonb = Jsonb::new();
/// let person = Person { name: "Ann".into(), age: 41 };
///
/// let json = jsonb.to_json(&person).unwrap();
/// assert_eq!(json, r#"{"name":"Ann","age":41}"#);
/// assert_eq!(jsonb.from_json::<Person>(&json).unwrap(), person);
/// ```
pub struct Jsonb {
    config: JsonbConfig,
    record: CustomizationRecord,
    models: ModelCache,
    converters: ConverterRegistry,
    registry: TypeRegistryArc,
}

impl Default for Jsonb {
    fn default() -> Self {
        Self::with_config(JsonbConfig::default())
    }
}

impl Jsonb {
    /// An engine with the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: JsonbConfig) -> Self {
        let record = CustomizationRecord::from_config(&config);
        let converters = ConverterRegistry::from_config(&config);
        debug!("created a json binding engine: {config:?}");
        Self {
            config,
            record,
            models: ModelCache::new(),
            converters,
            registry: TypeRegistryArc::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &JsonbConfig {
        &self.config
    }

    /// The customization applied to every model of this engine.
    #[inline]
    pub fn customization(&self) -> &CustomizationRecord {
        &self.record
    }

    #[inline]
    pub fn models(&self) -> &ModelCache {
        &self.models
    }

    #[inline]
    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    /// Makes `T` and its dependencies available to dynamic decoding.
    #[inline]
    pub fn register<T: Bind>(&self) {
        self.registry.ensure::<T>();
    }

    // -------------------------------------------------------------------------
    // Models

    /// The class model of `T`.
    pub fn class_model<T: Bind>(&self) -> Result<Arc<ClassModel>, BindError> {
        let info = T::type_info();
        self.class_model_of(info, &info.descriptor())
    }

    /// The class model of `info` instantiated as `descriptor`.
    pub fn class_model_of(
        &self,
        info: &'static TypeInfo,
        descriptor: &TypeDescriptor,
    ) -> Result<Arc<ClassModel>, BindError> {
        self.models
            .get_or_build(info, descriptor, || build(info, descriptor, &self.record))
    }

    /// The descriptor an object value is modelled as.
    ///
    /// The declared descriptor refines the runtime one when they agree, so a
    /// `Holder<DynValue>` declared as `Holder<Circle>` resolves its members
    /// as `Circle`.
    pub(crate) fn object_descriptor(
        &self,
        info: &'static TypeInfo,
        hint: Option<&TypeDescriptor>,
    ) -> TypeDescriptor {
        let runtime = info.descriptor();
        hint.map(TypeDescriptor::unwrap_wildcard)
            .filter(|hint| hint.is_concrete())
            .and_then(|hint| reconcile(hint, &runtime))
            .unwrap_or(runtime)
    }

    /// The registered type that values declared as `descriptor` decode into.
    ///
    /// Sequences and options without an exact registration fall back to
    /// containers of [`DynValue`] that carry the argument descriptor down.
    pub(crate) fn lookup(&self, descriptor: &TypeDescriptor) -> Result<&'static TypeInfo, BindError> {
        let registry = self.registry.read();
        if let Some(info) = registry.get_by_descriptor(descriptor) {
            return Ok(info);
        }
        let fallback = match descriptor {
            TypeDescriptor::Object(raw, _) => registry.get_by_raw(*raw),
            TypeDescriptor::Array(..) | TypeDescriptor::Collection(..) => {
                Some(<Vec<DynValue>>::type_info())
            }
            TypeDescriptor::Optional(_) => Some(<Option<DynValue>>::type_info()),
            TypeDescriptor::Tree => Some(<Value>::type_info()),
            _ => None,
        };
        fallback.ok_or_else(|| {
            ResolutionError::Unregistered {
                descriptor: descriptor.to_string(),
            }
            .into()
        })
    }

    // -------------------------------------------------------------------------
    // Encode

    /// Writes `value` as a JSON string.
    pub fn to_json<T: Bind>(&self, value: &T) -> Result<String, BindError> {
        self.registry.ensure::<T>();
        let bytes = self.write(value, Some(T::type_info()), Vec::new())?;
        into_string(bytes)
    }

    /// Writes a value whose type is only known at runtime.
    pub fn to_json_dyn(&self, value: &dyn DynBind) -> Result<String, BindError> {
        let bytes = self.write(value, None, Vec::new())?;
        into_string(bytes)
    }

    /// Writes `value` as JSON to `out`.
    pub fn to_writer<T: Bind>(&self, value: &T, out: impl io::Write) -> Result<(), BindError> {
        self.registry.ensure::<T>();
        self.write(value, Some(T::type_info()), out).map(drop)
    }

    fn write<W: io::Write>(
        &self,
        value: &dyn DynBind,
        declared: Option<&'static TypeInfo>,
        out: W,
    ) -> Result<W, BindError> {
        if self.config.formatting {
            let mut writer = JsonWriter::pretty(out);
            self.encode(value, declared, &mut writer)?;
            Ok(writer.finish()?)
        } else {
            let mut writer = JsonWriter::new(out);
            self.encode(value, declared, &mut writer)?;
            Ok(writer.finish()?)
        }
    }

    /// Writes `value` to `writer`.
    ///
    /// `declared` is the static type the caller holds the value as; it
    /// refines the model of generic objects.
    pub fn encode(
        &self,
        value: &dyn DynBind,
        declared: Option<&'static TypeInfo>,
        writer: &mut dyn TokenWriter,
    ) -> Result<(), BindError> {
        if self.record.strict && !is_structured(value) {
            return Err(StreamError::ScalarRoot {
                ty: value.type_path().into(),
            }
            .into());
        }
        let hint = declared.map(TypeInfo::descriptor);
        let scope = hint.as_ref().map(Scope::with_hint).unwrap_or_default();
        Marshaller::new(self, writer).encode_value(value, scope)
    }

    // -------------------------------------------------------------------------
    // Decode

    /// Reads a `T` from a JSON string.
    pub fn from_json<T: Bind>(&self, json: &str) -> Result<T, BindError> {
        let mut reader = JsonReader::parse(json)?;
        self.decode(&mut reader)
    }

    /// Reads a `T` from JSON bytes.
    pub fn from_reader<T: Bind>(&self, input: impl io::Read) -> Result<T, BindError> {
        let mut reader = JsonReader::from_reader(input)?;
        self.decode(&mut reader)
    }

    /// Reads exactly one value as a `T`, leaving `reader` just after it.
    ///
    /// # Example
    ///
    /// ```
    /// use vc_bind::Jsonb;
    /// use vc_bind::stream::{JsonReader, Token, TokenReader};
    ///
    /// let jsonb = Jsonb::new();
    /// let mut reader = JsonReader::parse(r#"[[1, 2], "rest"]"#).unwrap();
    /// assert_eq!(reader.read().unwrap(), Token::StartArray);
    ///
    /// let first: Vec<u8> = jsonb.decode(&mut reader).unwrap();
    /// assert_eq!(first, [1, 2]);
    /// assert_eq!(reader.read().unwrap(), Token::String("rest".into()));
    /// ```
    pub fn decode<T: Bind>(&self, reader: &mut dyn TokenReader) -> Result<T, BindError> {
        self.registry.ensure::<T>();
        let value = self.decode_root(T::type_info(), None, reader)?;
        downcast_value::<T>(value)
    }

    /// Reads exactly one value as the registered type of `descriptor`.
    pub fn decode_as(
        &self,
        reader: &mut dyn TokenReader,
        descriptor: &TypeDescriptor,
    ) -> Result<Box<dyn DynBind>, BindError> {
        let info = self.lookup(descriptor)?;
        self.decode_root(info, Some(descriptor), reader)
    }

    fn decode_root(
        &self,
        info: &'static TypeInfo,
        hint: Option<&TypeDescriptor>,
        reader: &mut dyn TokenReader,
    ) -> Result<Box<dyn DynBind>, BindError> {
        let depth = reader.depth();
        if self.record.strict
            && !matches!(
                reader.peek()?,
                Some(TokenKind::StartObject | TokenKind::StartArray)
            )
        {
            return Err(StreamError::ScalarRoot {
                ty: info.type_path().into(),
            }
            .into());
        }

        let value = {
            let mut unmarshaller = Unmarshaller::new(self, &mut *reader);
            match hint {
                Some(hint) => unmarshaller.decode_with_hint(info, hint)?,
                None => unmarshaller.decode(info)?,
            }
        };

        let actual = reader.depth();
        if actual != depth {
            return Err(StreamError::CursorMisaligned {
                expected: depth,
                actual,
            }
            .into());
        }
        Ok(value)
    }
}

impl core::fmt::Debug for Jsonb {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Jsonb")
            .field("config", &self.config)
            .field("models", &self.models)
            .field("converters", &self.converters)
            .finish_non_exhaustive()
    }
}

/// Roots accepted in strict mode write an object or an array.
fn is_structured(value: &dyn DynBind) -> bool {
    match value.bind_ref() {
        BindRef::Object(_) | BindRef::Map(_) => true,
        // Strict mode writes byte sequences as strings.
        BindRef::Sequence(_) => !is_bytes(value.dyn_type_info()),
        BindRef::Optional(Some(inner)) | BindRef::Dynamic(inner) => is_structured(inner),
        BindRef::Value(any) => any
            .downcast_ref::<Value>()
            .is_some_and(|tree| tree.is_object() || tree.is_array()),
        BindRef::Enum(_) | BindRef::Optional(None) => false,
    }
}

fn into_string(bytes: Vec<u8>) -> Result<String, BindError> {
    String::from_utf8(bytes).map_err(|err| StreamError::Io(err.to_string()).into())
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::Jsonb;
    use crate::error::{BindError, StreamError};
    use crate::info::TypeDescriptor;
    use crate::stream::{JsonReader, Token, TokenReader};
    use crate::{Bind, DynValue, JsonbConfig};

    #[derive(Bind, Default, Debug, PartialEq)]
    struct Pair {
        pub left: u8,
        pub right: u8,
    }

    fn is_send_sync<T: Send + Sync>() {}

    #[test]
    fn engine_is_shareable() {
        is_send_sync::<Jsonb>();
    }

    #[test]
    fn strict_roots() {
        let jsonb = Jsonb::with_config(JsonbConfig::new().with_strict(true));
        assert!(matches!(
            jsonb.to_json(&3_u8),
            Err(BindError::Stream(StreamError::ScalarRoot { .. }))
        ));
        assert!(matches!(
            jsonb.from_json::<u8>("3"),
            Err(BindError::Stream(StreamError::ScalarRoot { .. }))
        ));
        // Byte sequences are written as strings in strict mode.
        assert!(matches!(
            jsonb.to_json(&vec![3_u8, 4]),
            Err(BindError::Stream(StreamError::ScalarRoot { .. }))
        ));
        assert!(matches!(
            jsonb.from_json::<Vec<u8>>(r#""AwQ""#),
            Err(BindError::Stream(StreamError::ScalarRoot { .. }))
        ));
        assert_eq!(jsonb.to_json(&vec![3_u16, 4]).unwrap(), "[3,4]");
        assert_eq!(
            jsonb.to_json(&Pair { left: 1, right: 2 }).unwrap(),
            r#"{"left":1,"right":2}"#
        );

        let lenient = Jsonb::new();
        assert_eq!(lenient.from_json::<u8>("3").unwrap(), 3);
        assert_eq!(lenient.to_json(&String::from("x")).unwrap(), r#""x""#);
    }

    #[test]
    fn pretty_printing() {
        let jsonb = Jsonb::with_config(JsonbConfig::new().with_formatting(true));
        let json = jsonb.to_json(&Pair { left: 1, right: 2 }).unwrap();
        assert_eq!(json, "{\n  \"left\": 1,\n  \"right\": 2\n}");
    }

    #[test]
    fn shared_cursor_keeps_depth() {
        let jsonb = Jsonb::new();
        let mut reader = JsonReader::parse(r#"{"a": {"left": 1, "right": 2}, "b": 5}"#).unwrap();
        assert_eq!(reader.read().unwrap(), Token::StartObject);
        assert_eq!(reader.read().unwrap(), Token::Key("a".into()));
        let pair: Pair = jsonb.decode(&mut reader).unwrap();
        assert_eq!(pair, Pair { left: 1, right: 2 });
        assert_eq!(reader.read().unwrap(), Token::Key("b".into()));
        assert_eq!(reader.depth(), 1);
    }

    #[test]
    fn decode_as_descriptor() {
        let jsonb = Jsonb::new();
        jsonb.register::<Pair>();
        let descriptor = TypeDescriptor::Array(
            crate::info::SequenceKind::Vec,
            alloc::boxed::Box::new(Pair::type_info().descriptor()),
        );
        let mut reader = JsonReader::parse(r#"[{"left": 1, "right": 2}]"#).unwrap();
        let value = jsonb.decode_as(&mut reader, &descriptor).unwrap();
        let values = value.downcast_ref::<Vec<DynValue>>().unwrap();
        assert_eq!(
            values[0].downcast_ref::<Pair>(),
            Some(&Pair { left: 1, right: 2 })
        );
    }

    #[test]
    fn models_are_cached_per_engine() {
        let jsonb = Jsonb::new();
        let first = jsonb.class_model::<Pair>().unwrap();
        let second = jsonb.class_model::<Pair>().unwrap();
        assert!(alloc::sync::Arc::ptr_eq(&first, &second));

        let other = Jsonb::new();
        assert!(!alloc::sync::Arc::ptr_eq(&first, &other.class_model::<Pair>().unwrap()));
    }
}
