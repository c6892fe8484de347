use alloc::boxed::Box;
use alloc::sync::Arc;
use core::marker::PhantomData;

use crate::access::downcast_value;
use crate::error::{BindError, ConstructionError, ConvertError};
use crate::info::TypeInfo;
use crate::marshal::Marshaller;
use crate::unmarshal::Unmarshaller;
use crate::{Bind, DynBind};

// -----------------------------------------------------------------------------
// Converter

/// Token level conversion of one type.
///
/// Errors returned by a converter are reported as
/// [`BindError::Conversion`] with the converted type and property.
///
/// # Example
///
/// ```
/// use vc_bind::{Bind, BindError, DynBind, Jsonb, JsonbConfig};
/// use vc_bind::convert::Converter;
/// use vc_bind::info::TypeInfo;
/// use vc_bind::marshal::Marshaller;
/// use vc_bind::stream::Token;
/// use vc_bind::unmarshal::Unmarshaller;
///
/// #[derive(Bind, Default, Debug, PartialEq)]
/// struct Celsius {
///     pub degrees: f64,
/// }
///
/// struct AsText;
///
/// impl Converter for AsText {
///     fn encode(&self, value: &dyn DynBind, out: &mut Marshaller<'_>) -> Result<(), BindError> {
///         let value = value.downcast_ref::<Celsius>().unwrap();
///         out.writer().string(&format!("{}C", value.degrees))?;
///         Ok(())
///     }
///
///     fn decode(
///         &self,
///         _: &'static TypeInfo,
///         input: &mut Unmarshaller<'_>,
///     ) -> Result<Box<dyn DynBind>, BindError> {
///         let Token::String(text) = input.reader().read()? else {
///             return Err(BindError::conversion("Celsius", None, "expected a string"));
///         };
///         let degrees = text.trim_end_matches('C').parse::<f64>()
///             .map_err(|err| BindError::conversion("Celsius", None, err))?;
///         Ok(Box::new(Celsius { degrees }))
///     }
/// }
///
/// let jsonb = Jsonb::with_config(JsonbConfig::new().with_converter::<Celsius>(AsText));
/// assert_eq!(jsonb.to_json(&Celsius { degrees: 21.5 }).unwrap(), r#""21.5C""#);
/// assert_eq!(jsonb.from_json::<Celsius>(r#""3C""#).unwrap(), Celsius { degrees: 3.0 });
/// ```
pub trait Converter: Send + Sync {
    /// Writes `value`.
    fn encode(&self, value: &dyn DynBind, out: &mut Marshaller<'_>) -> Result<(), BindError>;

    /// Reads a value of the type `target` stands for.
    fn decode(
        &self,
        target: &'static TypeInfo,
        input: &mut Unmarshaller<'_>,
    ) -> Result<Box<dyn DynBind>, BindError>;
}

// -----------------------------------------------------------------------------
// Adapter

/// Maps values of `Original` to `Adapted`, which is encoded in their place.
///
/// # Example
///
/// ```
/// use vc_bind::{Bind, Jsonb, JsonbConfig};
/// use vc_bind::convert::Adapter;
/// use vc_bind::error::ConvertError;
///
/// #[derive(Bind, Default, Debug, PartialEq)]
/// struct Version {
///     pub major: u32,
///     pub minor: u32,
/// }
///
/// struct VersionAsString;
///
/// impl Adapter for VersionAsString {
///     type Original = Version;
///     type Adapted = String;
///
///     fn adapt_to_json(&self, version: &Version) -> Result<String, ConvertError> {
///         Ok(format!("{}.{}", version.major, version.minor))
///     }
///
///     fn adapt_from_json(&self, text: String) -> Result<Version, ConvertError> {
///         let (major, minor) = text.split_once('.').ok_or("missing `.`")?;
///         Ok(Version { major: major.parse()?, minor: minor.parse()? })
///     }
/// }
///
/// let jsonb = Jsonb::with_config(JsonbConfig::new().with_adapter(VersionAsString));
/// assert_eq!(jsonb.to_json(&Version { major: 1, minor: 4 }).unwrap(), r#""1.4""#);
/// assert!(jsonb.from_json::<Version>(r#""1""#).is_err());
/// ```
pub trait Adapter: Send + Sync + 'static {
    type Original: Bind;
    type Adapted: Bind;

    fn adapt_to_json(&self, original: &Self::Original) -> Result<Self::Adapted, ConvertError>;

    fn adapt_from_json(&self, adapted: Self::Adapted) -> Result<Self::Original, ConvertError>;
}

/// The [`Converter`] of an [`Adapter`].
pub struct AdapterConverter<A> {
    adapter: A,
}

impl<A: Adapter> AdapterConverter<A> {
    #[inline]
    pub const fn new(adapter: A) -> Self {
        Self { adapter }
    }
}

impl<A: Adapter> Converter for AdapterConverter<A> {
    fn encode(&self, value: &dyn DynBind, out: &mut Marshaller<'_>) -> Result<(), BindError> {
        let path = <A::Original as Bind>::type_info().type_path();
        let original = value.downcast_ref::<A::Original>().ok_or_else(|| {
            ConstructionError::TypeMismatch {
                expected: path.into(),
                actual: value.type_path().into(),
            }
        })?;
        let adapted = self
            .adapter
            .adapt_to_json(original)
            .map_err(|err| BindError::conversion(path, None, err))?;
        out.encode(&adapted)
    }

    fn decode(
        &self,
        _: &'static TypeInfo,
        input: &mut Unmarshaller<'_>,
    ) -> Result<Box<dyn DynBind>, BindError> {
        let path = <A::Original as Bind>::type_info().type_path();
        let adapted = input.decode(<A::Adapted as Bind>::type_info())?;
        let adapted = downcast_value::<A::Adapted>(adapted)?;
        let original = self
            .adapter
            .adapt_from_json(adapted)
            .map_err(|err| BindError::conversion(path, None, err))?;
        Ok(Box::new(original))
    }
}

// -----------------------------------------------------------------------------
// ComponentFactory

/// Creates the converters that properties select by name.
///
/// Only consulted for names not registered on the configuration; a created
/// converter is kept for the lifetime of the [`Jsonb`](crate::Jsonb).
pub trait ComponentFactory: Send + Sync {
    fn create(&self, name: &str) -> Option<Arc<dyn Converter>>;
}

/// A factory building a converter type through its `Default` implementation.
///
/// # Example
///
/// ```
/// use vc_bind::convert::{ComponentFactory, DefaultFactory};
/// # use vc_bind::convert::AdapterConverter;
/// # use vc_bind::convert::Adapter;
/// # use vc_bind::error::ConvertError;
/// # #[derive(Default)]
/// # struct Upper;
/// # impl Adapter for Upper {
/// #     type Original = String;
/// #     type Adapted = String;
/// #     fn adapt_to_json(&self, s: &String) -> Result<String, ConvertError> { Ok(s.to_uppercase()) }
/// #     fn adapt_from_json(&self, s: String) -> Result<String, ConvertError> { Ok(s) }
/// # }
///
/// let factory = DefaultFactory::<Upper>::new("upper");
/// assert!(factory.create("upper").is_some());
/// assert!(factory.create("lower").is_none());
/// ```
pub struct DefaultFactory<A> {
    name: &'static str,
    marker: PhantomData<fn() -> A>,
}

impl<A: Adapter + Default> DefaultFactory<A> {
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            marker: PhantomData,
        }
    }
}

impl<A: Adapter + Default> ComponentFactory for DefaultFactory<A> {
    fn create(&self, name: &str) -> Option<Arc<dyn Converter>> {
        (name == self.name).then(|| Arc::new(AdapterConverter::new(A::default())) as _)
    }
}
