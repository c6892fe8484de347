//! End-to-end conversions of derived types.

use vc_bind::error::{ConstructionError, ModelError};
use vc_bind::prelude::*;

#[derive(Bind, Default, Debug, PartialEq)]
struct Person {
    pub name: String,
    pub age: u32,
}

#[test]
fn plain_object_round_trip() {
    let jsonb = Jsonb::new();
    let person = Person {
        name: "John".into(),
        age: 1,
    };

    let json = jsonb.to_json(&person).unwrap();
    assert_eq!(json, r#"{"name":"John","age":1}"#);
    assert_eq!(jsonb.from_json::<Person>(&json).unwrap(), person);
}

#[derive(Bind, Default, Debug, PartialEq)]
struct Circle {
    pub radius: f64,
}

#[derive(Bind, Default)]
#[bind(bound(T = Circle))]
struct Container<T> {
    pub field: T,
}

#[test]
fn generic_field_follows_its_binding() {
    let jsonb = Jsonb::new();
    let container = Container {
        field: Circle { radius: 2.5 },
    };

    let json = jsonb.to_json(&container).unwrap();
    assert_eq!(json, r#"{"field":{"radius":2.5}}"#);

    let back: Container<Circle> = jsonb.from_json(&json).unwrap();
    assert_eq!(back.field, Circle { radius: 2.5 });

    // A dynamic argument decodes as the declared bound.
    let open: Container<DynValue> = jsonb.from_json(&json).unwrap();
    assert_eq!(open.field.downcast_ref::<Circle>(), Some(&Circle { radius: 2.5 }));
    assert_eq!(jsonb.to_json(&open).unwrap(), json);
}

#[derive(Bind, Default, Debug, PartialEq)]
struct Measure {
    #[bind(rename = "value")]
    pub internal_value: i32,
}

#[test]
fn renamed_property_uses_its_json_name() {
    let jsonb = Jsonb::new();

    let measure: Measure = jsonb.from_json(r#"{"value":5}"#).unwrap();
    assert_eq!(measure, Measure { internal_value: 5 });
    assert_eq!(jsonb.to_json(&measure).unwrap(), r#"{"value":5}"#);
}

#[derive(Bind)]
#[bind(
    no_default,
    creator(with = Self::new, params("x": i32)),
    creator(with = Self::origin, params())
)]
struct Ambiguous {
    pub x: i32,
}

impl Ambiguous {
    fn new(x: i32) -> Self {
        Self { x }
    }

    fn origin() -> Self {
        Self { x: 0 }
    }
}

#[test]
fn two_creators_fail_before_conversion() {
    let jsonb = Jsonb::new();

    assert!(matches!(
        jsonb.class_model::<Ambiguous>(),
        Err(BindError::Model(ModelError::MultipleCreators { count: 2, .. }))
    ));
    assert!(matches!(
        jsonb.to_json(&Ambiguous::new(3)),
        Err(BindError::Model(ModelError::MultipleCreators { .. }))
    ));
    assert!(matches!(
        jsonb.from_json::<Ambiguous>(r#"{"x":3}"#),
        Err(BindError::Model(ModelError::MultipleCreators { .. }))
    ));
    assert_eq!(Ambiguous::origin().x, 0);
}

#[test]
fn unknown_keys_depend_on_strictness() {
    let json = r#"{"name":"John","extra":1,"age":1}"#;

    let strict = Jsonb::with_config(JsonbConfig::new().with_strict(true));
    let err = strict.from_json::<Person>(json).unwrap_err();
    assert!(matches!(err, BindError::UnknownProperty { ref name, .. } if name == "extra"));

    let lenient = Jsonb::new();
    let person: Person = lenient.from_json(json).unwrap();
    assert_eq!(
        person,
        Person {
            name: "John".into(),
            age: 1,
        }
    );

    let failing = Jsonb::with_config(JsonbConfig::new().with_fail_on_unknown_properties(true));
    assert!(matches!(
        failing.from_json::<Person>(json),
        Err(BindError::UnknownProperty { .. })
    ));
}

#[derive(Bind, Debug, PartialEq)]
#[bind(no_default, creator(with = Self::parse, params("code": String), fallible))]
struct Currency {
    pub code: String,
}

impl Currency {
    fn parse(code: String) -> Result<Self, String> {
        if code.len() == 3 {
            Ok(Self { code })
        } else {
            Err(format!("`{code}` is not a currency code"))
        }
    }
}

#[test]
fn creators_build_immutable_values() {
    let jsonb = Jsonb::new();

    let euro: Currency = jsonb.from_json(r#"{"code":"EUR"}"#).unwrap();
    assert_eq!(euro.code, "EUR");
    assert_eq!(jsonb.to_json(&euro).unwrap(), r#"{"code":"EUR"}"#);

    let err = jsonb.from_json::<Currency>(r#"{"code":"EURO"}"#).unwrap_err();
    assert!(err.to_string().contains("is not a currency code"), "{err}");

    assert!(matches!(
        jsonb.from_json::<Currency>("{}"),
        Err(BindError::Construction(ConstructionError::MissingCreatorParameter { .. }))
    ));
}

#[derive(Bind, Default)]
#[bind(getter(name = "secret", with = Self::secret, rename = "exposed"))]
struct Hidden {
    #[bind(transient)]
    pub secret: u8,
}

impl Hidden {
    fn secret(&self) -> u8 {
        self.secret
    }
}

#[test]
fn renamed_getter_cannot_expose_a_transient_field() {
    let jsonb = Jsonb::new();
    assert!(matches!(
        jsonb.to_json(&Hidden { secret: 7 }),
        Err(BindError::Model(ModelError::TransientConflict { ref property, .. })) if property == "secret"
    ));
}

#[derive(Bind, Default, Debug, PartialEq)]
struct Reading {
    pub sensor: String,
    pub value: Option<f64>,
}

#[test]
fn nulls_and_absent_values() {
    let jsonb = Jsonb::new();
    let reading = Reading {
        sensor: "t1".into(),
        value: None,
    };
    assert_eq!(jsonb.to_json(&reading).unwrap(), r#"{"sensor":"t1"}"#);

    let with_nulls = Jsonb::with_config(JsonbConfig::new().with_null_values(true));
    assert_eq!(
        with_nulls.to_json(&reading).unwrap(),
        r#"{"sensor":"t1","value":null}"#
    );

    let back: Reading = jsonb.from_json(r#"{"sensor":"t1","value":null}"#).unwrap();
    assert_eq!(back, reading);

    // `null` leaves a non-optional property untouched.
    let back: Reading = jsonb.from_json(r#"{"sensor":null,"value":1.5}"#).unwrap();
    assert_eq!(
        back,
        Reading {
            sensor: String::new(),
            value: Some(1.5),
        }
    );
}

#[derive(Bind, Debug, PartialEq)]
#[bind(no_default, creator(with = Self::new, params("id": u32)))]
struct Keyed {
    pub id: u32,
}

impl Keyed {
    fn new(id: u32) -> Self {
        Self { id }
    }
}

#[test]
fn creator_keys_follow_case_insensitive_naming() {
    let insensitive = Jsonb::with_config(JsonbConfig::new().with_naming(NamingStrategy::CaseInsensitive));
    assert_eq!(insensitive.from_json::<Keyed>(r#"{"ID": 4}"#).unwrap(), Keyed::new(4));

    let exact = Jsonb::new();
    assert!(matches!(
        exact.from_json::<Keyed>(r#"{"ID": 4}"#),
        Err(BindError::Construction(ConstructionError::MissingCreatorParameter { .. }))
    ));
}
