//! Configuration of a [`Jsonb`](crate::Jsonb) instance.
//!
//! A [`JsonbConfig`] is a plain value built with chained `with_*` methods.
//! Every `Jsonb` built from it owns its own model cache and converter
//! registry, so differently configured instances never share models.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::Bind;
use crate::convert::{Adapter, AdapterConverter, ComponentFactory, Converter};
use crate::customize::{NamingStrategy, PropertyOrdering, PublicOnly, VisibilityStrategy};
use crate::info::{Customization, Type};

// -----------------------------------------------------------------------------
// BinaryStrategy

/// Encoding of byte sequences (`Vec<u8>`, `Box<[u8]>`, `[u8; N]`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BinaryStrategy {
    /// An array of numbers.
    #[default]
    Bytes,
    /// A standard base64 string.
    Base64,
    /// A url-safe base64 string.
    Base64Url,
}

// -----------------------------------------------------------------------------
// DateFormat

/// Encoding of date and time values.
///
/// # Example
///
/// ```
/// use vc_bind::config::DateFormat;
///
/// assert_eq!(DateFormat::parse("iso"), DateFormat::Iso);
/// assert_eq!(DateFormat::parse("millis"), DateFormat::TimeInMillis);
/// assert_eq!(DateFormat::parse("%d.%m.%Y"), DateFormat::Pattern("%d.%m.%Y".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// ISO-8601 / RFC 3339 strings.
    #[default]
    Iso,
    /// Milliseconds since the Unix epoch, as a number.
    TimeInMillis,
    /// A `chrono` format pattern.
    Pattern(Cow<'static, str>),
}

impl DateFormat {
    /// Parses a format declared on a property: `"iso"`, `"millis"` or a pattern.
    pub fn parse(format: &str) -> Self {
        match format {
            "iso" => Self::Iso,
            "millis" => Self::TimeInMillis,
            pattern => Self::Pattern(Cow::Owned(pattern.into())),
        }
    }
}

// -----------------------------------------------------------------------------
// JsonbConfig

/// Configuration of a [`Jsonb`](crate::Jsonb).
///
/// # Example
///
/// ```
/// use vc_bind::JsonbConfig;
/// use vc_bind::config::BinaryStrategy;
/// use vc_bind::customize::{NamingStrategy, PropertyOrdering};
///
/// let config = JsonbConfig::new()
///     .with_naming(NamingStrategy::LowerCaseWithUnderscores)
///     .with_ordering(PropertyOrdering::Lexicographical)
///     .with_binary(BinaryStrategy::Base64)
///     .with_formatting(true);
///
/// assert_eq!(config.binary_strategy(), BinaryStrategy::Base64);
/// assert_eq!(config.with_strict(true).binary_strategy(), BinaryStrategy::Base64Url);
/// ```
#[derive(Clone)]
pub struct JsonbConfig {
    pub naming: NamingStrategy,
    pub ordering: PropertyOrdering,
    pub visibility: Arc<dyn VisibilityStrategy>,
    /// Unknown properties fail, binary data is base64-url, scalar roots fail.
    pub strict: bool,
    pub fail_on_unknown_properties: bool,
    /// Write `null` for absent optional values.
    pub null_values: bool,
    pub binary: BinaryStrategy,
    pub date_format: DateFormat,
    /// Pretty print written JSON.
    pub formatting: bool,
    /// Package layers, keyed by module path prefix.
    pub packages: Vec<(String, Customization)>,
    pub component_factory: Option<Arc<dyn ComponentFactory>>,
    pub(crate) typed: Vec<(Type, Arc<dyn Converter>)>,
    pub(crate) named: Vec<(String, Arc<dyn Converter>)>,
}

impl Default for JsonbConfig {
    fn default() -> Self {
        Self {
            naming: NamingStrategy::Identity,
            ordering: PropertyOrdering::Any,
            visibility: Arc::new(PublicOnly::new()),
            strict: false,
            fail_on_unknown_properties: false,
            null_values: false,
            binary: BinaryStrategy::Bytes,
            date_format: DateFormat::Iso,
            formatting: false,
            packages: Vec::new(),
            component_factory: None,
            typed: Vec::new(),
            named: Vec::new(),
        }
    }
}

impl JsonbConfig {
    /// The default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_naming(mut self, naming: NamingStrategy) -> Self {
        self.naming = naming;
        self
    }

    #[inline]
    pub fn with_ordering(mut self, ordering: PropertyOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    #[inline]
    pub fn with_visibility(mut self, visibility: impl VisibilityStrategy + 'static) -> Self {
        self.visibility = Arc::new(visibility);
        self
    }

    #[inline]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[inline]
    pub fn with_fail_on_unknown_properties(mut self, fail: bool) -> Self {
        self.fail_on_unknown_properties = fail;
        self
    }

    #[inline]
    pub fn with_null_values(mut self, null_values: bool) -> Self {
        self.null_values = null_values;
        self
    }

    #[inline]
    pub fn with_binary(mut self, binary: BinaryStrategy) -> Self {
        self.binary = binary;
        self
    }

    #[inline]
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.date_format = format;
        self
    }

    #[inline]
    pub fn with_formatting(mut self, formatting: bool) -> Self {
        self.formatting = formatting;
        self
    }

    /// Adds the customization layer of every type declared in `module` or below.
    pub fn with_package(mut self, module: impl Into<String>, layer: Customization) -> Self {
        self.packages.push((module.into(), layer));
        self
    }

    #[inline]
    pub fn with_component_factory(mut self, factory: impl ComponentFactory + 'static) -> Self {
        self.component_factory = Some(Arc::new(factory));
        self
    }

    /// Converts every value of type `T` with `converter`.
    pub fn with_converter<T: Bind>(mut self, converter: impl Converter + 'static) -> Self {
        self.typed.push((Type::of::<T>(), Arc::new(converter)));
        self
    }

    /// Converts every value of the adapter's original type through its adapted type.
    pub fn with_adapter<A: Adapter>(mut self, adapter: A) -> Self {
        self.typed
            .push((Type::of::<A::Original>(), Arc::new(AdapterConverter::new(adapter))));
        self
    }

    /// Registers a converter that properties select by name.
    pub fn with_named_converter(
        mut self,
        name: impl Into<String>,
        converter: impl Converter + 'static,
    ) -> Self {
        self.named.push((name.into(), Arc::new(converter)));
        self
    }

    /// The binary strategy in effect; strict mode forces base64-url.
    #[inline]
    pub fn binary_strategy(&self) -> BinaryStrategy {
        if self.strict {
            BinaryStrategy::Base64Url
        } else {
            self.binary
        }
    }
}

impl fmt::Debug for JsonbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonbConfig")
            .field("naming", &self.naming)
            .field("ordering", &self.ordering)
            .field("strict", &self.strict)
            .field("fail_on_unknown_properties", &self.fail_on_unknown_properties)
            .field("null_values", &self.null_values)
            .field("binary", &self.binary)
            .field("date_format", &self.date_format)
            .field("formatting", &self.formatting)
            .field("packages", &self.packages)
            .field("typed", &self.typed.iter().map(|(ty, _)| ty).collect::<Vec<_>>())
            .field("named", &self.named.iter().map(|(name, _)| name).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
