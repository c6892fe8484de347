//! Type registration and descriptor-typed decoding.

use core::any::TypeId;

use vc_bind::prelude::*;
use vc_bind::registry::TypeRegistry;
use vc_bind::stream::{JsonReader, Token, TokenReader};

#[derive(Bind, Default, Debug, PartialEq)]
#[bind(auto_register)]
struct Tagged {
    pub id: u32,
    pub color: Color,
}

#[derive(Bind, Default, Debug, PartialEq, Clone, Copy)]
enum Color {
    #[default]
    Red,
    #[bind(rename = "GREEN")]
    Green,
}

#[test]
#[cfg(feature = "auto_register")]
fn marked_types_are_registered_with_their_dependencies() {
    let registry = TypeRegistry::new();
    assert!(registry.contains(TypeId::of::<Tagged>()));
    assert!(registry.contains(TypeId::of::<Color>()));

    let jsonb = Jsonb::new();
    let mut reader = JsonReader::parse(r#"{"id":1,"color":"GREEN"}"#).unwrap();
    let value = jsonb
        .decode_as(&mut reader, &Tagged::type_info().descriptor())
        .unwrap();
    assert_eq!(
        value.downcast_ref::<Tagged>(),
        Some(&Tagged {
            id: 1,
            color: Color::Green,
        })
    );
}

#[test]
fn empty_registry_has_nothing() {
    let mut registry = TypeRegistry::empty();
    assert!(registry.is_empty());

    registry.register::<Tagged>();
    assert!(registry.contains(TypeId::of::<Color>()));
}

#[test]
fn enums_use_variant_names() {
    let jsonb = Jsonb::new();
    assert_eq!(jsonb.to_json(&vec![Color::Red, Color::Green]).unwrap(), r#"["Red","GREEN"]"#);
    assert_eq!(
        jsonb.from_json::<Vec<Color>>(r#"["GREEN","Red"]"#).unwrap(),
        [Color::Green, Color::Red]
    );
    assert!(jsonb.from_json::<Color>(r#""Blue""#).is_err());
}

#[test]
fn caller_owned_cursor_is_left_after_the_value() {
    let jsonb = Jsonb::new();
    let mut reader =
        JsonReader::parse(r#"[{"id":2,"color":"Red"},{"id":3,"color":"GREEN"}]"#).unwrap();

    assert_eq!(reader.read().unwrap(), Token::StartArray);
    let first: Tagged = jsonb.decode(&mut reader).unwrap();
    assert_eq!(first.id, 2);
    assert_eq!(reader.depth(), 1);

    let second: Tagged = jsonb.decode(&mut reader).unwrap();
    assert_eq!(second.color, Color::Green);
    assert_eq!(reader.read().unwrap(), Token::EndArray);
}

#[test]
fn dynamic_encoding_uses_the_runtime_type() {
    let jsonb = Jsonb::new();
    let value: Box<dyn DynBind> = Box::new(Tagged {
        id: 9,
        color: Color::Red,
    });
    assert_eq!(jsonb.to_json_dyn(&*value).unwrap(), r#"{"id":9,"color":"Red"}"#);
}
