//! Normalized value tree for parsed configuration documents.
//!
//! Both YAML and JSON documents are parsed into the same [`Value`]
//! representation before any binding happens, so the decode engine never has
//! to care which textual format a document came from. The tree is immutable
//! input for the duration of a decode call.
//!
//! # Integer normalization
//!
//! Parsers report non-negative integers through `u64`, but configuration
//! integers are overwhelmingly signed in practice. Any integer that fits
//! `i64` is normalized to [`Value::Int`]; only magnitudes above `i64::MAX`
//! become [`Value::Uint`]. Unsigned destinations therefore match only
//! genuinely unsigned leaves, which keeps the strict kind-matching rules of
//! the decoder honest.
//!
//! # Examples
//!
//! ```
//! use treebind::{Value, ValueKind};
//!
//! let tree: Value = serde_yaml::from_str("name: api\nport: 8080").unwrap();
//! let Value::Mapping(entries) = &tree else { panic!("expected mapping") };
//! assert_eq!(entries.get("port"), Some(&Value::Int(8080)));
//! assert_eq!(tree.kind(), ValueKind::Mapping);
//! ```

use std::fmt;

use rustc_hash::FxHashMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

/// A single node of a parsed configuration document.
///
/// Scalar leaves carry their value; containers own their children. Mappings
/// are string-keyed and unordered.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(FxHashMap<String, Value>),
}

impl Value {
    /// The kind tag of this node, used throughout diagnostics.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Uint(_) => ValueKind::Uint,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Mapping(_) => ValueKind::Mapping,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the mapping entries if this node is a mapping.
    pub fn as_mapping(&self) -> Option<&FxHashMap<String, Value>> {
        match self {
            Value::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the elements if this node is a sequence.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

/// Kind tag for a [`Value`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Uint,
    Float,
    String,
    Sequence,
    Mapping,
}

impl ValueKind {
    /// Human-readable name used in decode error messages.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "integer",
            ValueKind::Uint => "unsigned integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Uint(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::Sequence(items) => write!(f, "sequence of {} elements", items.len()),
            Value::Mapping(entries) => write!(f, "mapping with {} keys", entries.len()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Mapping(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TreeVisitor;

        impl<'de> Visitor<'de> for TreeVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a configuration value")
            }

            fn visit_bool<E>(self, v: bool) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Bool(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Int(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Value, E>
            where
                E: de::Error,
            {
                // Fold into the signed kind whenever possible; see module docs.
                Ok(match i64::try_from(v) {
                    Ok(signed) => Value::Int(signed),
                    Err(_) => Value::Uint(v),
                })
            }

            fn visit_f64<E>(self, v: f64) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Float(v))
            }

            fn visit_str<E>(self, v: &str) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::String(v.to_owned()))
            }

            fn visit_string<E>(self, v: String) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::String(v))
            }

            fn visit_unit<E>(self) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Value::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element::<Value>()? {
                    items.push(item);
                }
                Ok(Value::Sequence(items))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = FxHashMap::default();
                while let Some(key) = map.next_key::<String>()? {
                    let value = map.next_value::<Value>()?;
                    if entries.insert(key.clone(), value).is_some() {
                        return Err(de::Error::custom(format!("duplicate mapping key: {key}")));
                    }
                }
                Ok(Value::Mapping(entries))
            }
        }

        deserializer.deserialize_any(TreeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_and_json_normalize_to_the_same_tree() {
        let yaml: Value = serde_yaml::from_str("a: 1\nb: true\nc: hello").unwrap();
        let json: Value = serde_json::from_str(r#"{"a": 1, "b": true, "c": "hello"}"#).unwrap();
        assert_eq!(yaml, json);
    }

    #[test]
    fn small_unsigned_integers_fold_to_int() {
        let tree: Value = serde_json::from_str("42").unwrap();
        assert_eq!(tree, Value::Int(42));

        let huge: Value = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(huge, Value::Uint(u64::MAX));
    }

    #[test]
    fn null_and_nested_containers() {
        let tree: Value = serde_yaml::from_str("outer:\n  inner: ~\n  items: [1, 2]").unwrap();
        let outer = tree.as_mapping().unwrap().get("outer").unwrap();
        let entries = outer.as_mapping().unwrap();
        assert!(entries.get("inner").unwrap().is_null());
        assert_eq!(
            entries.get("items").unwrap().as_sequence().unwrap(),
            &[Value::Int(1), Value::Int(2)]
        );
    }

    #[test]
    fn duplicate_keys_are_a_parse_error() {
        let parsed: Result<Value, _> = serde_json::from_str(r#"{"a": 1, "a": 2}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(ValueKind::Uint.to_string(), "unsigned integer");
        assert_eq!(Value::Float(1.5).kind().to_string(), "float");
    }
}
