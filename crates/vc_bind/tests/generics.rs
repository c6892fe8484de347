//! Generic arguments survive nesting in both directions.

use std::collections::BTreeMap;

use vc_bind::prelude::*;
use vc_bind::stream::JsonReader;

#[derive(Bind, Default, Debug, PartialEq)]
struct Pair<A, B> {
    pub first: A,
    pub second: B,
}

#[derive(Bind, Default, Debug, PartialEq)]
struct Wrapper<T> {
    pub items: Vec<T>,
}

type Nested = Pair<Wrapper<Pair<u8, String>>, Wrapper<Option<bool>>>;

#[test]
fn nested_arguments_do_not_mix() {
    let jsonb = Jsonb::new();
    let value: Nested = Pair {
        first: Wrapper {
            items: vec![Pair {
                first: 1,
                second: "a".into(),
            }],
        },
        second: Wrapper {
            items: vec![Some(true), None],
        },
    };

    let json = jsonb.to_json(&value).unwrap();
    assert_eq!(
        json,
        r#"{"first":{"items":[{"first":1,"second":"a"}]},"second":{"items":[true,null]}}"#
    );
    assert_eq!(jsonb.from_json::<Nested>(&json).unwrap(), value);
}

#[test]
fn each_instantiation_has_its_own_model() {
    let jsonb = Jsonb::new();

    let bytes = jsonb.class_model::<Wrapper<u8>>().unwrap();
    let words = jsonb.class_model::<Wrapper<String>>().unwrap();
    assert_eq!(bytes.property("items").unwrap().descriptor().to_string(), "Vec<u8>");
    assert_eq!(words.property("items").unwrap().descriptor().to_string(), "Vec<String>");
}

#[derive(Bind, Default, Debug, PartialEq)]
struct Shape {
    pub sides: u8,
}

#[derive(Bind, Default)]
#[bind(bound(T = Shape))]
struct Catalog<T> {
    pub by_name: BTreeMap<String, T>,
    pub featured: Option<T>,
}

#[test]
fn dynamic_arguments_decode_as_their_bound() {
    let jsonb = Jsonb::new();
    let json = r#"{"by_name":{"square":{"sides":4}},"featured":{"sides":3}}"#;

    let catalog: Catalog<DynValue> = jsonb.from_json(json).unwrap();
    assert_eq!(
        catalog.by_name["square"].downcast_ref::<Shape>(),
        Some(&Shape { sides: 4 })
    );
    let featured = catalog.featured.as_ref().unwrap();
    assert_eq!(featured.downcast_ref::<Shape>(), Some(&Shape { sides: 3 }));

    assert_eq!(jsonb.to_json(&catalog).unwrap(), json);
}

#[test]
fn runtime_values_must_match_the_bound() {
    let jsonb = Jsonb::new();
    let catalog = Catalog::<DynValue> {
        by_name: BTreeMap::new(),
        featured: Some(DynValue::new(7_u32)),
    };

    assert!(matches!(
        jsonb.to_json(&catalog),
        Err(BindError::Resolution(_))
    ));
}

#[test]
fn requested_descriptor_selects_the_arguments() {
    let jsonb = Jsonb::new();
    jsonb.register::<Wrapper<DynValue>>();
    jsonb.register::<Shape>();

    let descriptor = <Wrapper<DynValue>>::type_info()
        .descriptor()
        .with_args(vec![Shape::type_info().descriptor()]);

    let mut reader = JsonReader::parse(r#"{"items":[{"sides":5}]}"#).unwrap();
    let value = jsonb.decode_as(&mut reader, &descriptor).unwrap();
    let wrapper = value.downcast_ref::<Wrapper<DynValue>>().unwrap();
    assert_eq!(wrapper.items[0].downcast_ref::<Shape>(), Some(&Shape { sides: 5 }));
}
