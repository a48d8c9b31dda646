//! The value tree accepted by the encoder.

/// A representable value.
///
/// Maps keep their entries in insertion order; that order is the byte order
/// produced by [`crate::encode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Integer(i128),
    Text(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Map(Vec<(String, Value)>),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn uint(v: u64) -> Self {
        Self::Integer(v as i128)
    }

    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(b.into())
    }

    /// Build a map from `(key, value)` pairs, preserving their order.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Integer(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(String, Value)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a map entry by key. Returns `None` for non-maps.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::uint(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v as i128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_lookup_preserves_order() {
        let v = Value::map([("b", Value::uint(1)), ("a", Value::text("x"))]);
        let keys: Vec<_> = v.as_map().unwrap().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(v.get("a").and_then(Value::as_text), Some("x"));
        assert_eq!(v.get("b").and_then(Value::as_u64), Some(1));
        assert!(v.get("c").is_none());
    }

    #[test]
    fn negative_is_not_u64() {
        assert_eq!(Value::from(-1i64).as_u64(), None);
        assert_eq!(Value::text("x").get("k"), None);
    }
}
