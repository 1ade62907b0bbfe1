//! Translation between plain JSON and Firestore's typed REST values.
//!
//! ```text
//! JSON              Firestore REST
//! null          ↔   { "nullValue": null }
//! true          ↔   { "booleanValue": true }
//! 42            ↔   { "integerValue": "42" }      (int64 travels as a string)
//! 1.5           ↔   { "doubleValue": 1.5 }
//! "x"           ↔   { "stringValue": "x" }
//! [..]          ↔   { "arrayValue": { "values": [..] } }
//! {..}          ↔   { "mapValue": { "fields": {..} } }
//! ```
//!
//! Timestamps, references, bytes and geo points only appear on the way back
//! and decode to strings (or a lat/lng object). JSON has no NaN or infinity,
//! so the emulator's `"NaN"`, `"Infinity"` and `"-Infinity"` doubles decode to
//! those strings. Unsigned integers past `i64::MAX` do not fit `integerValue`
//! and are sent as their decimal string rather than a rounded double.

use log::warn;
use serde_json::{Map, Number, Value, json};

use super::store::StoreError;

pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else if let Some(u) = n.as_u64() {
                warn!("{} exceeds the int64 range, storing it as a string", u);
                json!({ "stringValue": u.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64().unwrap_or(0.0) })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

pub fn encode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect()
}

pub fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let Some(typed) = value.as_object() else {
        return Err(StoreError::Parse(format!("expected typed value, got {value}")));
    };
    let Some((kind, inner)) = typed.iter().next() else {
        return Err(StoreError::Parse("empty typed value".to_string()));
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => Ok(Value::Bool(inner.as_bool().unwrap_or(false))),
        "integerValue" => {
            // Usually a string, occasionally a bare number.
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                other => other.as_i64(),
            };
            parsed
                .map(|i| Value::Number(i.into()))
                .ok_or_else(|| StoreError::Parse(format!("bad integerValue {inner}")))
        }
        "doubleValue" => match inner {
            Value::String(s) if matches!(s.as_str(), "NaN" | "Infinity" | "-Infinity") => {
                Ok(inner.clone())
            }
            _ => inner
                .as_f64()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| StoreError::Parse(format!("bad doubleValue {inner}"))),
        },
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => Ok(inner.clone()),
        "geoPointValue" => Ok(inner.clone()),
        "arrayValue" => {
            let values = match inner.get("values") {
                Some(Value::Array(values)) => values
                    .iter()
                    .map(decode_value)
                    .collect::<Result<Vec<_>, _>>()?,
                _ => Vec::new(),
            };
            Ok(Value::Array(values))
        }
        "mapValue" => {
            let fields = match inner.get("fields") {
                Some(Value::Object(fields)) => decode_fields(fields)?,
                _ => Map::new(),
            };
            Ok(Value::Object(fields))
        }
        other => Err(StoreError::Parse(format!("unsupported value type '{other}'"))),
    }
}

pub fn decode_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>, StoreError> {
    fields
        .iter()
        .map(|(key, value)| decode_value(value).map(|decoded| (key.clone(), decoded)))
        .collect()
}
