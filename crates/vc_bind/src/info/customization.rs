use alloc::borrow::Cow;

/// One layer of per-member customization.
///
/// Layers are declared at the package, type, field and accessor level. Every
/// attribute is optional; an absent attribute leaves the decision to the less
/// specific layers. See [`customize`](crate::customize) for the merge rules.
///
/// # Example
///
/// ```
/// use vc_bind::info::Customization;
///
/// let layer = Customization::new().with_rename("value").with_nillable(true);
/// assert_eq!(layer.rename.as_deref(), Some("value"));
/// assert_eq!(layer.transient, None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Customization {
    pub rename: Option<Cow<'static, str>>,
    pub transient: Option<bool>,
    pub nillable: Option<bool>,
    pub date_format: Option<Cow<'static, str>>,
    pub number_format: Option<Cow<'static, str>>,
    /// Name of a converter registered on the configuration.
    pub converter: Option<Cow<'static, str>>,
}

impl Customization {
    /// A layer without any attribute.
    #[inline]
    pub const fn new() -> Self {
        Self {
            rename: None,
            transient: None,
            nillable: None,
            date_format: None,
            number_format: None,
            converter: None,
        }
    }

    #[inline]
    pub fn with_rename(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.rename = Some(name.into());
        self
    }

    #[inline]
    pub fn with_transient(mut self, transient: bool) -> Self {
        self.transient = Some(transient);
        self
    }

    #[inline]
    pub fn with_nillable(mut self, nillable: bool) -> Self {
        self.nillable = Some(nillable);
        self
    }

    #[inline]
    pub fn with_date_format(mut self, format: impl Into<Cow<'static, str>>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    #[inline]
    pub fn with_number_format(mut self, format: impl Into<Cow<'static, str>>) -> Self {
        self.number_format = Some(format.into());
        self
    }

    #[inline]
    pub fn with_converter(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.converter = Some(name.into());
        self
    }

    /// Returns `true` if no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::new()
    }
}
