//! The facade is enough to derive and convert.

use vc_jsonb::prelude::*;

#[derive(Bind, Default, Debug, PartialEq)]
struct Account {
    pub name: String,
    pub logins: u64,
    pub tags: Vec<String>,
}

#[test]
fn facade_round_trip() {
    let jsonb = Jsonb::with_config(JsonbConfig::new().with_naming(NamingStrategy::UpperCamelCase));
    let account = Account {
        name: "ada".into(),
        logins: 3,
        tags: vec!["admin".into()],
    };

    let json = jsonb.to_json(&account).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "Name": "ada", "Logins": 3, "Tags": ["admin"] })
    );
    assert_eq!(jsonb.from_json::<Account>(&json).unwrap(), account);
}
