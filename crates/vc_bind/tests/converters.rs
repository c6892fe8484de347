//! User supplied adapters and converters.

use vc_bind::error::{ConvertError, ResolutionError};
use vc_bind::info::TypeInfo;
use vc_bind::marshal::Marshaller;
use vc_bind::prelude::*;
use vc_bind::stream::Token;
use vc_bind::unmarshal::Unmarshaller;

#[derive(Bind, Default, Debug, PartialEq)]
struct Version {
    pub major: u32,
    pub minor: u32,
}

struct VersionAsString;

impl Adapter for VersionAsString {
    type Original = Version;
    type Adapted = String;

    fn adapt_to_json(&self, version: &Version) -> Result<String, ConvertError> {
        Ok(format!("{}.{}", version.major, version.minor))
    }

    fn adapt_from_json(&self, text: String) -> Result<Version, ConvertError> {
        let (major, minor) = text.split_once('.').ok_or("missing `.`")?;
        Ok(Version {
            major: major.parse()?,
            minor: minor.parse()?,
        })
    }
}

#[derive(Bind, Default, Debug, PartialEq)]
struct Release {
    pub name: String,
    pub version: Version,
}

#[test]
fn adapted_properties_use_the_adapted_type() {
    let jsonb = Jsonb::with_config(JsonbConfig::new().with_adapter(VersionAsString));
    let release = Release {
        name: "spring".into(),
        version: Version { major: 2, minor: 1 },
    };

    let json = jsonb.to_json(&release).unwrap();
    assert_eq!(json, r#"{"name":"spring","version":"2.1"}"#);
    assert_eq!(jsonb.from_json::<Release>(&json).unwrap(), release);

    let err = jsonb
        .from_json::<Release>(r#"{"name":"x","version":"2"}"#)
        .unwrap_err();
    assert!(matches!(err, BindError::Conversion { .. }), "{err}");
    assert!(err.to_string().contains("missing `.`"), "{err}");
}

struct Shouting;

impl Converter for Shouting {
    fn encode(&self, value: &dyn DynBind, out: &mut Marshaller<'_>) -> Result<(), BindError> {
        let text = value
            .downcast_ref::<String>()
            .ok_or_else(|| BindError::conversion("String", None, "not a string"))?;
        out.writer().string(&text.to_uppercase())?;
        Ok(())
    }

    fn decode(
        &self,
        _: &'static TypeInfo,
        input: &mut Unmarshaller<'_>,
    ) -> Result<Box<dyn DynBind>, BindError> {
        match input.reader().read()? {
            Token::String(text) => Ok(Box::new(text.to_lowercase())),
            other => Err(BindError::conversion("String", None, format!("got {other:?}"))),
        }
    }
}

#[derive(Bind, Default, Debug, PartialEq)]
struct Greeting {
    #[bind(converter = "shout")]
    pub loud: String,
    pub quiet: String,
}

#[test]
fn named_converters_apply_to_their_property_only() {
    let jsonb = Jsonb::with_config(JsonbConfig::new().with_named_converter("shout", Shouting));
    let greeting = Greeting {
        loud: "hello".into(),
        quiet: "hello".into(),
    };

    let json = jsonb.to_json(&greeting).unwrap();
    assert_eq!(json, r#"{"loud":"HELLO","quiet":"hello"}"#);
    assert_eq!(jsonb.from_json::<Greeting>(&json).unwrap(), greeting);
}

#[test]
fn missing_named_converter_fails() {
    let jsonb = Jsonb::new();
    let greeting = Greeting::default();
    assert!(matches!(
        jsonb.to_json(&greeting),
        Err(BindError::Resolution(ResolutionError::UnknownConverter { .. }))
    ));
}
