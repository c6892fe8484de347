use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

/// A user supplied name translation.
pub trait NameTranslator: Send + Sync {
    fn translate(&self, name: &str) -> String;
}

impl<F> NameTranslator for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    #[inline]
    fn translate(&self, name: &str) -> String {
        self(name)
    }
}

/// Translation of logical property names into JSON names.
///
/// A word boundary is a lower case letter followed by an upper case one.
/// Every other character, `_` included, is kept in place.
///
/// # Example
///
/// ```
/// use vc_bind::customize::NamingStrategy;
///
/// let dashes = NamingStrategy::LowerCaseWithDashes;
/// assert_eq!(dashes.translate("internalValue"), "internal-value");
/// assert_eq!(dashes.translate("CAPS_VALUE"), "caps_value");
///
/// let camel = NamingStrategy::UpperCamelCase;
/// assert_eq!(camel.translate("upperCamelCase"), "UpperCamelCase");
/// assert_eq!(camel.reverse("UpperCamelCase", ["a", "upperCamelCase"]), Some("upperCamelCase"));
/// ```
#[derive(Clone, Default)]
pub enum NamingStrategy {
    /// Names are used as declared.
    #[default]
    Identity,
    LowerCaseWithDashes,
    LowerCaseWithUnderscores,
    UpperCamelCase,
    UpperCamelCaseWithSpaces,
    /// Names are used as declared, and matched ignoring ASCII case on decode.
    CaseInsensitive,
    Custom(Arc<dyn NameTranslator>),
}

impl NamingStrategy {
    /// A strategy from a translation function.
    pub fn custom(translator: impl NameTranslator + 'static) -> Self {
        Self::Custom(Arc::new(translator))
    }

    /// Translates a logical name.
    pub fn translate(&self, name: &str) -> String {
        match self {
            Self::Identity | Self::CaseInsensitive => name.into(),
            Self::LowerCaseWithDashes => lower_case(name, "-"),
            Self::LowerCaseWithUnderscores => lower_case(name, "_"),
            Self::UpperCamelCase => upper_camel(name, ""),
            Self::UpperCamelCaseWithSpaces => upper_camel(name, " "),
            Self::Custom(translator) => translator.translate(name),
        }
    }

    /// Finds the candidate whose translation is `json`.
    pub fn reverse<'a>(
        &self,
        json: &str,
        candidates: impl IntoIterator<Item = &'a str>,
    ) -> Option<&'a str> {
        let mut candidates = candidates.into_iter();
        if self.is_case_insensitive() {
            candidates.find(|name| name.eq_ignore_ascii_case(json))
        } else {
            candidates.find(|name| self.translate(name) == json)
        }
    }

    #[inline]
    pub fn is_case_insensitive(&self) -> bool {
        matches!(self, Self::CaseInsensitive)
    }
}

impl fmt::Debug for NamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::LowerCaseWithDashes => f.write_str("LowerCaseWithDashes"),
            Self::LowerCaseWithUnderscores => f.write_str("LowerCaseWithUnderscores"),
            Self::UpperCamelCase => f.write_str("UpperCamelCase"),
            Self::UpperCamelCaseWithSpaces => f.write_str("UpperCamelCaseWithSpaces"),
            Self::CaseInsensitive => f.write_str("CaseInsensitive"),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

// -----------------------------------------------------------------------------
// Word boundaries

/// Copies `name`, inserting `separator` before an upper case letter that
/// follows a lower case one.
fn separate(name: &str, separator: &str, mut map: impl FnMut(char, &mut String)) -> String {
    let mut out = String::with_capacity(name.len() * 2);
    let mut last_lower = false;
    for ch in name.chars() {
        if ch.is_uppercase() && last_lower {
            out.push_str(separator);
        }
        last_lower = ch.is_lowercase();
        map(ch, &mut out);
    }
    out
}

fn lower_case(name: &str, separator: &str) -> String {
    separate(name, separator, |ch, out| out.extend(ch.to_lowercase()))
}

fn upper_camel(name: &str, separator: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper: String = first.to_uppercase().collect();
    upper.push_str(chars.as_str());
    separate(&upper, separator, |ch, out| out.push(ch))
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::NamingStrategy;

    const NAMES: [&str; 6] = [
        "upperCasedProperty",
        "_startingWithUnderscoreProperty",
        "CAPS_UNDERSCORE_PROPERTY",
        "snake_case_name",
        "x",
        "value2",
    ];

    #[test]
    fn lower_case_strategies() {
        let underscores = NamingStrategy::LowerCaseWithUnderscores;
        assert_eq!(underscores.translate("camelCaseProperty"), "camel_case_property");
        assert_eq!(underscores.translate("CamelcaseProperty"), "camelcase_property");
        assert_eq!(underscores.translate("CamelCaseProperty"), "camel_case_property");
        assert_eq!(underscores.translate("_camelCaseProperty"), "_camel_case_property");
        assert_eq!(underscores.translate("_CamelCaseProperty"), "_camel_case_property");
        assert_eq!(underscores.translate("CAPS_UNDERSCORE_PROPERTY"), "caps_underscore_property");

        let dashes = NamingStrategy::LowerCaseWithDashes;
        assert_eq!(dashes.translate("camelCaseProperty"), "camel-case-property");
        assert_eq!(dashes.translate("CamelcaseProperty"), "camelcase-property");
        assert_eq!(dashes.translate("-CamelCaseProperty"), "-camel-case-property");
        assert_eq!(
            dashes.translate("_startingWithUnderscoreProperty"),
            "_starting-with-underscore-property"
        );
        assert_eq!(dashes.translate("CAPS_UNDERSCORE_PROPERTY"), "caps_underscore_property");
        assert_eq!(dashes.translate("snake_case_name"), "snake_case_name");
    }

    #[test]
    fn upper_camel_strategies() {
        let camel = NamingStrategy::UpperCamelCase;
        assert_eq!(camel.translate("upperCamelCase"), "UpperCamelCase");
        assert_eq!(camel.translate("UpperCamelCase"), "UpperCamelCase");
        assert_eq!(camel.translate("upperCasedProperty"), "UpperCasedProperty");
        assert_eq!(camel.translate("CAPS_UNDERSCORE_PROPERTY"), "CAPS_UNDERSCORE_PROPERTY");
        assert_eq!(
            camel.translate("_startingWithUnderscoreProperty"),
            "_startingWithUnderscoreProperty"
        );
        assert_eq!(camel.translate(""), "");

        let spaces = NamingStrategy::UpperCamelCaseWithSpaces;
        assert_eq!(spaces.translate("upperCamelCase"), "Upper Camel Case");
        assert_eq!(spaces.translate("UpperCamelCase"), "Upper Camel Case");
        assert_eq!(spaces.translate("upperCasedProperty"), "Upper Cased Property");
        assert_eq!(spaces.translate("CAPS_UNDERSCORE_PROPERTY"), "CAPS_UNDERSCORE_PROPERTY");
        assert_eq!(
            spaces.translate("_startingWithUnderscoreProperty"),
            "_starting With Underscore Property"
        );
    }

    #[test]
    fn reverse_of_forward_is_identity() {
        let strategies = [
            NamingStrategy::Identity,
            NamingStrategy::LowerCaseWithDashes,
            NamingStrategy::LowerCaseWithUnderscores,
            NamingStrategy::UpperCamelCase,
            NamingStrategy::UpperCamelCaseWithSpaces,
            NamingStrategy::CaseInsensitive,
        ];
        for strategy in strategies {
            for name in NAMES {
                let json = strategy.translate(name);
                assert_eq!(
                    strategy.reverse(&json, NAMES),
                    Some(name),
                    "{strategy:?} on {name}"
                );
            }
        }
    }

    #[test]
    fn case_insensitive_and_custom() {
        let insensitive = NamingStrategy::CaseInsensitive;
        assert_eq!(
            insensitive.reverse("caPS_unDERscore_prOPERty", NAMES),
            Some("CAPS_UNDERSCORE_PROPERTY")
        );
        assert_eq!(NamingStrategy::Identity.reverse("X", NAMES), None);

        let custom = NamingStrategy::custom(|name: &str| {
            let mut out = String::from(name);
            out.push('_');
            out.push_str(&name.to_uppercase());
            out
        });
        assert_eq!(custom.translate("x"), "x_X");
        assert_eq!(custom.reverse("x_X", NAMES), Some("x"));
    }
}
