//! Scalar formats, binary strategies and maps.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use vc_bind::config::{BinaryStrategy, DateFormat};
use vc_bind::error::StreamError;
use vc_bind::prelude::*;

#[derive(Bind, Default, Debug, PartialEq)]
#[bind(date_format = "%d.%m.%Y")]
struct Invoice {
    pub issued: NaiveDate,
    #[bind(date_format = "iso")]
    pub due: NaiveDate,
    #[bind(date_format = "millis")]
    pub paid: DateTime<Utc>,
    #[bind(number_format = "#,##0.00")]
    pub amount: f64,
}

fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

#[test]
fn property_formats_override_the_type() {
    let jsonb = Jsonb::new();
    let invoice = Invoice {
        issued: day(2),
        due: day(31),
        paid: DateTime::from_timestamp_millis(1_704_153_600_000).unwrap(),
        amount: 1234.5,
    };

    let json = jsonb.to_json(&invoice).unwrap();
    assert_eq!(
        json,
        r#"{"issued":"02.01.2024","due":"2024-01-31","paid":1704153600000,"amount":"1,234.50"}"#
    );
    assert_eq!(jsonb.from_json::<Invoice>(&json).unwrap(), invoice);
}

#[derive(Bind, Default, Debug, PartialEq)]
struct Log {
    pub at: NaiveDate,
}

#[test]
fn engine_date_format_is_the_fallback() {
    let log = Log { at: day(2) };

    let iso = Jsonb::new();
    assert_eq!(iso.to_json(&log).unwrap(), r#"{"at":"2024-01-02"}"#);

    let millis = Jsonb::with_config(JsonbConfig::new().with_date_format(DateFormat::TimeInMillis));
    let json = millis.to_json(&log).unwrap();
    assert_eq!(json, r#"{"at":1704153600000}"#);
    assert_eq!(millis.from_json::<Log>(&json).unwrap(), log);

    // Millis are accepted in the default format too.
    assert_eq!(iso.from_json::<Log>(&json).unwrap(), log);
}

#[derive(Bind, Default, Debug, PartialEq)]
struct Blob {
    pub data: Vec<u8>,
}

#[test]
fn binary_strategies() {
    let blob = Blob {
        data: vec![1, 2, 255],
    };

    let cases = [
        (JsonbConfig::new(), r#"{"data":[1,2,255]}"#),
        (JsonbConfig::new().with_binary(BinaryStrategy::Base64), r#"{"data":"AQL/"}"#),
        (JsonbConfig::new().with_binary(BinaryStrategy::Base64Url), r#"{"data":"AQL_"}"#),
        (JsonbConfig::new().with_strict(true), r#"{"data":"AQL_"}"#),
    ];
    for (config, expected) in cases {
        let jsonb = Jsonb::with_config(config);
        let json = jsonb.to_json(&blob).unwrap();
        assert_eq!(json, expected);
        assert_eq!(jsonb.from_json::<Blob>(&json).unwrap(), blob);
    }
}

#[test]
fn strict_mode_rejects_scalar_roots() {
    let strict = Jsonb::with_config(JsonbConfig::new().with_strict(true));
    assert!(matches!(
        strict.to_json(&5_u8),
        Err(BindError::Stream(StreamError::ScalarRoot { .. }))
    ));
    assert!(matches!(
        strict.from_json::<u8>("5"),
        Err(BindError::Stream(StreamError::ScalarRoot { .. }))
    ));

    let lenient = Jsonb::new();
    assert_eq!(lenient.to_json(&5_u8).unwrap(), "5");
    assert_eq!(lenient.from_json::<u8>("5").unwrap(), 5);
}

#[derive(Bind, Default, Debug)]
struct Sample {
    pub value: f64,
}

#[test]
fn non_finite_floats_are_strings() {
    let jsonb = Jsonb::new();

    let json = jsonb.to_json(&Sample { value: f64::INFINITY }).unwrap();
    assert_eq!(json, r#"{"value":"Infinity"}"#);
    assert_eq!(jsonb.from_json::<Sample>(&json).unwrap().value, f64::INFINITY);

    let json = jsonb.to_json(&Sample { value: f64::NAN }).unwrap();
    assert_eq!(json, r#"{"value":"NaN"}"#);
    assert!(jsonb.from_json::<Sample>(&json).unwrap().value.is_nan());
}

#[derive(Bind, Default, Debug, PartialEq)]
struct Index {
    pub words: BTreeMap<String, u32>,
    pub chunks: BTreeMap<Vec<u8>, bool>,
}

#[test]
fn maps_use_objects_for_name_like_keys() {
    let jsonb = Jsonb::new();
    let index = Index {
        words: BTreeMap::from([("a".to_string(), 1), ("b".to_string(), 2)]),
        chunks: BTreeMap::from([(vec![7], true)]),
    };

    let json = jsonb.to_json(&index).unwrap();
    assert_eq!(
        json,
        r#"{"words":{"a":1,"b":2},"chunks":[{"key":[7],"value":true}]}"#
    );
    assert_eq!(jsonb.from_json::<Index>(&json).unwrap(), index);

    // Entry arrays are accepted for every key shape.
    let entries = r#"{"words":[{"key":"a","value":1},{"key":"b","value":2}],"chunks":[{"value":true,"key":[7]}]}"#;
    assert_eq!(jsonb.from_json::<Index>(entries).unwrap(), index);
}

#[test]
fn pretty_output() {
    let jsonb = Jsonb::with_config(JsonbConfig::new().with_formatting(true));
    let json = jsonb.to_json(&Log { at: day(2) }).unwrap();
    assert_eq!(json, "{\n  \"at\": \"2024-01-02\"\n}");
}
