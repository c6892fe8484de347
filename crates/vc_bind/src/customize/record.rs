use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::config::JsonbConfig;
use crate::customize::{NamingStrategy, PropertyOrdering, VisibilityStrategy};
use crate::info::Customization;

static EMPTY: Customization = Customization::new();

/// The customization shared by every model build under one configuration.
#[derive(Clone)]
pub struct CustomizationRecord {
    pub naming: NamingStrategy,
    pub ordering: PropertyOrdering,
    pub visibility: Arc<dyn VisibilityStrategy>,
    pub strict: bool,
    pub fail_on_unknown_properties: bool,
    /// Emit `null` for absent values unless a property says otherwise.
    pub nillable: bool,
    packages: Vec<(String, Customization)>,
}

impl CustomizationRecord {
    /// Extracts the record of a configuration.
    pub fn from_config(config: &JsonbConfig) -> Self {
        let mut packages = config.packages.clone();
        // Longest prefix first.
        packages.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));
        Self {
            naming: config.naming.clone(),
            ordering: config.ordering.clone(),
            visibility: config.visibility.clone(),
            strict: config.strict,
            fail_on_unknown_properties: config.fail_on_unknown_properties,
            nillable: config.null_values,
            packages,
        }
    }

    /// Unknown JSON properties are errors.
    #[inline]
    pub fn fails_on_unknown(&self) -> bool {
        self.strict || self.fail_on_unknown_properties
    }

    /// The package layer of a type declared in `module`.
    ///
    /// A layer applies to its module and every module below it; the longest
    /// matching prefix wins.
    ///
    /// # Example
    ///
    /// ```
    /// use vc_bind::JsonbConfig;
    /// use vc_bind::customize::CustomizationRecord;
    /// use vc_bind::info::Customization;
    ///
    /// let config = JsonbConfig::new()
    ///     .with_package("app", Customization::new().with_nillable(true))
    ///     .with_package("app::model", Customization::new().with_nillable(false));
    /// let record = CustomizationRecord::from_config(&config);
    ///
    /// assert_eq!(record.package_layer("app::model::user").nillable, Some(false));
    /// assert_eq!(record.package_layer("app::api").nillable, Some(true));
    /// assert_eq!(record.package_layer("application").nillable, None);
    /// ```
    pub fn package_layer(&self, module: &str) -> &Customization {
        self.packages
            .iter()
            .find(|(prefix, _)| in_module(module, prefix))
            .map_or(&EMPTY, |(_, layer)| layer)
    }
}

fn in_module(module: &str, prefix: &str) -> bool {
    match module.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}

impl Default for CustomizationRecord {
    fn default() -> Self {
        Self::from_config(&JsonbConfig::default())
    }
}

impl fmt::Debug for CustomizationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomizationRecord")
            .field("naming", &self.naming)
            .field("ordering", &self.ordering)
            .field("strict", &self.strict)
            .field("fail_on_unknown_properties", &self.fail_on_unknown_properties)
            .field("nillable", &self.nillable)
            .field("packages", &self.packages)
            .finish_non_exhaustive()
    }
}
