//! Bridge between JSON documents and encodable values.
//!
//! Transaction records that arrive as JSON text (for example from a wallet)
//! are converted here before encoding. JSON has no byte strings, so bytes
//! render as lowercase hex on the way out.

use crate::{EncodingError, Value};

impl TryFrom<&serde_json::Value> for Value {
    type Error = EncodingError;

    fn try_from(json: &serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Null => Err(EncodingError::UnsupportedType("null")),
            serde_json::Value::Bool(_) => Err(EncodingError::UnsupportedType("boolean")),
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Ok(Value::uint(u))
                } else if let Some(i) = n.as_i64() {
                    Ok(Value::Integer(i as i128))
                } else {
                    Err(EncodingError::UnsupportedType("floating point"))
                }
            }
            serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(k, v)| Ok((k.clone(), Value::try_from(v)?)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Map),
        }
    }
}

impl Value {
    /// Render as JSON. Integers beyond the `i64`/`u64` range are written as strings.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Integer(i) => {
                if let Ok(u) = u64::try_from(*i) {
                    serde_json::Value::from(u)
                } else if let Ok(s) = i64::try_from(*i) {
                    serde_json::Value::from(s)
                } else {
                    serde_json::Value::String(i.to_string())
                }
            }
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => serde_json::Value::String(hex::encode(b)),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_supported_json() {
        let doc = json!({"slot": "0a", "balance": 50000, "prevBlock": 0, "delta": -3});
        let v = Value::try_from(&doc).unwrap();
        assert_eq!(v.get("slot").and_then(Value::as_text), Some("0a"));
        assert_eq!(v.get("balance").and_then(Value::as_u64), Some(50_000));
        assert_eq!(v.get("delta"), Some(&Value::Integer(-3)));
    }

    #[test]
    fn rejects_unsupported_json() {
        assert_eq!(
            Value::try_from(&json!(1.5)).unwrap_err(),
            EncodingError::UnsupportedType("floating point")
        );
        assert_eq!(
            Value::try_from(&json!(true)).unwrap_err(),
            EncodingError::UnsupportedType("boolean")
        );
        assert_eq!(
            Value::try_from(&json!({"a": [null]})).unwrap_err(),
            EncodingError::UnsupportedType("null")
        );
    }

    #[test]
    fn bytes_render_as_hex() {
        let v = Value::map([("hash", Value::bytes(vec![0xAB, 0x01]))]);
        assert_eq!(v.to_json(), json!({"hash": "ab01"}));
    }
}
