//! Conversions between [`Value`] and `serde_json::Value`.
//!
//! The JSON view is lossy: binary payloads become data URIs, extensions
//! become `{"type", "data"}` objects, non-string map keys are rendered as
//! their JSON text, and non-finite floats become `null`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Number};

use crate::value::{Map, Value};

/// Prefix used when rendering binary values as JSON strings.
pub const BIN_URI_START: &str = "data:application/octet-stream;base64,";

fn float_to_json(f: f64) -> serde_json::Value {
    Number::from_f64(f)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

fn key_to_json(key: Value) -> String {
    match key {
        Value::Str(s) => s,
        other => serde_json::Value::from(other).to_string(),
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Nil => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::UInt(u) => json!(u),
            Value::Int(i) => json!(i),
            Value::F32(f) => float_to_json(f as f64),
            Value::F64(f) => float_to_json(f),
            Value::Str(s) => serde_json::Value::String(s),
            Value::Bin(b) => {
                serde_json::Value::String(format!("{BIN_URI_START}{}", STANDARD.encode(b)))
            }
            Value::Ext { kind, data } => json!({
                "type": kind,
                "data": STANDARD.encode(data)
            }),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (key_to_json(k), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::F64(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Map(
                obj.into_iter()
                    .map(|(k, v)| (Value::Str(k), Value::from(v)))
                    .collect::<Map>(),
            ),
        }
    }
}
