// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON boundary: `serde_json` text and values to and from [`WireValue`].
//!
//! `serde_json` is built with `preserve_order`, so object key order
//! survives both directions. Integral JSON numbers map to `Int`, everything
//! else to `Float`; integers outside the `i64` range degrade to `Float`.

use crate::value::WireValue;
use serde_json::{Map, Number, Value};

/// Parse a JSON document into a wire value.
pub fn parse(input: &str) -> Result<WireValue, serde_json::Error> {
    let value: Value = serde_json::from_str(input)?;
    Ok(from_json(&value))
}

/// Render a wire value as compact JSON text.
pub fn render(value: &WireValue) -> String {
    to_json(value).to_string()
}

/// Convert a `serde_json` value into a wire value.
pub fn from_json(value: &Value) -> WireValue {
    match value {
        Value::Null => WireValue::Null,
        Value::Bool(v) => WireValue::Bool(*v),
        Value::Number(n) => from_number(n),
        Value::String(s) => WireValue::Str(s.clone()),
        Value::Array(items) => WireValue::List(items.iter().map(from_json).collect()),
        Value::Object(entries) => WireValue::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), from_json(v)))
                .collect(),
        ),
    }
}

/// Convert a wire value into a `serde_json` value.
pub fn to_json(value: &WireValue) -> Value {
    match value {
        WireValue::Null => Value::Null,
        WireValue::Bool(v) => Value::Bool(*v),
        WireValue::Int(v) => Value::Number(Number::from(*v)),
        // JSON has no NaN/infinity; such floats degrade to null.
        WireValue::Float(v) => Number::from_f64(*v).map_or(Value::Null, Value::Number),
        WireValue::Str(v) => Value::String(v.clone()),
        WireValue::List(items) => Value::Array(items.iter().map(to_json).collect()),
        WireValue::Object(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (k, v) in entries {
                map.insert(k.clone(), to_json(v));
            }
            Value::Object(map)
        }
    }
}

fn from_number(n: &Number) -> WireValue {
    if let Some(v) = n.as_i64() {
        return WireValue::Int(v);
    }
    n.as_f64().map_or(WireValue::Null, WireValue::Float)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_distinguishes_int_and_float() {
        let value = parse(r#"{"a": 5, "b": 5.0}"#).expect("parse");
        assert_eq!(value.get("a"), Some(&WireValue::Int(5)));
        assert_eq!(value.get("b"), Some(&WireValue::Float(5.0)));
    }

    #[test]
    fn test_key_order_survives_round_trip() {
        let text = r#"{"zeta":1,"alpha":2,"mid":3}"#;
        let value = parse(text).expect("parse");
        assert_eq!(render(&value), text);
    }

    #[test]
    fn test_empty_object_and_list_stay_distinct() {
        let object = parse("{}").expect("parse");
        let list = parse("[]").expect("parse");
        assert_eq!(object, WireValue::Object(Vec::new()));
        assert_eq!(list, WireValue::List(Vec::new()));
        assert_eq!(render(&object), "{}");
        assert_eq!(render(&list), "[]");
    }

    #[test]
    fn test_huge_integer_degrades_to_float() {
        let value = parse("18446744073709551615").expect("parse");
        assert!(matches!(value, WireValue::Float(_)));
    }

    #[test]
    fn test_nested_round_trip() {
        let text = r#"{"user":{"id":7,"tags":["a","b"]},"ok":true,"extra":null}"#;
        let value = parse(text).expect("parse");
        assert_eq!(render(&value), text);
    }
}
