//! Property-based round-trip tests for values.

use std::collections::BTreeMap;

use forma_value::{IntrinsicFunction, Value};
use proptest::prelude::*;

/// Property names that never collide with an intrinsic function key.
fn property_name() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z]{0,8}".prop_filter("must not be a function key", |name| {
        IntrinsicFunction::from_key(name).is_none()
    })
}

fn literal() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        // Quarter steps are exact in binary, so text round trips are exact too.
        (-4000i32..4000).prop_map(|n| Value::from(f64::from(n) / 4.0)),
        "[a-zA-Z0-9 ${}:.-]{0,12}".prop_map(Value::string),
        Just(Value::Null),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    literal().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            "[A-Z][a-zA-Z]{0,10}".prop_map(Value::reference),
            ("[-,:]{0,1}", prop::collection::vec(inner.clone(), 0..4))
                .prop_map(|(delimiter, values)| Value::join(delimiter, values)),
            ("[A-Z][a-zA-Z]{0,6}", "[A-Z][a-zA-Z]{0,6}")
                .prop_map(|(id, attr)| Value::get_att(id, attr)),
            inner.clone().prop_map(Value::base64),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::btree_map(property_name(), inner, 0..4)
                .prop_map(|map: BTreeMap<String, Value>| Value::Map(map)),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_decode_encode_round_trip(value in value()) {
        let raw = value.to_json();
        let decoded = Value::decode(raw.clone());
        prop_assert_eq!(&decoded, &value);
        prop_assert_eq!(decoded.to_json(), raw);
    }

    #[test]
    fn test_text_round_trip(value in value()) {
        let text = serde_json::to_string(&value).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(parsed, value);
    }
}
