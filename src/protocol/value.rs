//! JSON value helpers.

use serde_json::Value;

/// Returns `true` if the value counts as set for the `links` and
/// `callbacks` checks.
///
/// Falsy values: `null`, `false`, zero, `""`, `"0"`, `[]` and `{}`.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_falsy_values() {
        for value in [
            json!(null),
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!("0"),
            json!([]),
            json!({}),
        ] {
            assert!(!is_truthy(&value), "{value} should be falsy");
        }
    }

    #[test]
    fn test_truthy_values() {
        for value in [
            json!(true),
            json!(1),
            json!(-1),
            json!(0.5),
            json!("a"),
            json!("00"),
            json!([1]),
            json!([null]),
            json!({"1": [0]}),
        ] {
            assert!(is_truthy(&value), "{value} should be truthy");
        }
    }

    proptest! {
        #[test]
        fn prop_non_empty_arrays_are_truthy(items in proptest::collection::vec(any::<i64>(), 1..8)) {
            prop_assert!(is_truthy(&json!(items)));
        }

        #[test]
        fn prop_non_zero_integers_are_truthy(n in any::<i64>().prop_filter("non-zero", |n| *n != 0)) {
            prop_assert!(is_truthy(&json!(n)));
        }
    }
}
