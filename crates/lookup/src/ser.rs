// SPDX-License-Identifier: MIT OR Apache-2.0
//! Serde integration
//!
//! Values serialize to the plain scalar/map/list shape: absent becomes
//! `null` and reflected records serialize as their flattened map. Decoding
//! maps `null` back to absent, so a tree without embedded JSON text survives
//! a round trip unchanged.

use crate::{Map, Number, Value};
use lookup_core::{LookupError, Result};
use serde::de::{self, DeserializeOwned, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_unit(),
            Self::Number(number) => number.serialize(serializer),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::Mapping(map) | Self::Reflected { fields: map, .. } => serializer.collect_map(map),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON-like value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(Value::Number(Number::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        Ok(Value::Number(Number::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        Ok(Value::Number(Number::Float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::Text(v))
    }

    // Raw bytes follow the same rule as `Value::from_slice`
    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<Value, E> {
        Ok(Value::from_slice(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Absent)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Absent)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Value, A::Error> {
        let mut map = Map::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(key, value);
        }
        Ok(Value::Mapping(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl Value {
    /// Strictly decode JSON text; malformed input is an error, not absence
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Decode`] when `json` is not valid JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Flatten any serializable type through serde.
    ///
    /// Records become mappings and unit enum variants become their name.
    /// Serialization failures normalize to absent.
    #[must_use]
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        serde_json::to_value(value).map_or_else(
            |err| {
                log::trace!("serialization failed, normalizing to absent: {err}");
                Self::Absent
            },
            Self::from,
        )
    }

    /// Convert into a `serde_json::Value`
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Absent => serde_json::Value::Null,
            Self::Number(number) => number.to_json(),
            Self::Text(text) => serde_json::Value::String(text.clone()),
            Self::Sequence(items) => items.iter().map(Self::to_json).collect(),
            Self::Mapping(map) | Self::Reflected { fields: map, .. } => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    /// Decode into a strongly typed structure
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Decode`] when the tree does not have the shape `T` needs.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(self.to_json())?)
    }

    /// Compact JSON rendering
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Decode`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Pretty JSON rendering with two-space indentation
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Decode`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Pretty JSON rendering with `indent` spaces per level
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Decode`] if serialization fails.
    pub fn to_json_pretty_with_indent(&self, indent: usize) -> Result<String> {
        let indent_str = " ".repeat(indent);
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent_str.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|err| LookupError::Decode(err.to_string()))
    }
}

impl FromStr for Value {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        name: String,
        age: u8,
    }

    #[derive(Serialize)]
    enum Kind {
        Dog,
    }

    #[derive(Serialize)]
    struct Pet {
        name: &'static str,
        kind: Kind,
        tags: Vec<&'static str>,
    }

    #[test]
    fn test_serialize_shapes() {
        let value = Value::dict([
            ("absent", Value::Absent),
            ("flag", Value::boolean(true)),
            ("list", Value::array([1, 2])),
        ]);
        assert_eq!(
            value.to_json_string().unwrap(),
            r#"{"absent":null,"flag":true,"list":[1,2]}"#
        );
    }

    #[test]
    fn test_reflected_serializes_as_map() {
        let value = Value::Reflected {
            type_name: "Pet",
            fields: Map::from([("name".to_string(), Value::from("Rex"))]),
        };
        assert_eq!(value.to_json_string().unwrap(), r#"{"name":"Rex"}"#);
    }

    #[test]
    fn test_parse_strict() {
        let value: Value = r#"{"a": [1, null]}"#.parse().unwrap();
        assert_eq!(value, Value::dict([("a", Value::array([Value::from(1), Value::Absent]))]));
        assert!(matches!("{".parse::<Value>(), Err(LookupError::Decode(_))));
    }

    #[test]
    fn test_decode_into_struct() {
        let value = Value::dict([("name", Value::from("wei")), ("age", Value::from(18))]);
        let user: User = value.decode().unwrap();
        assert_eq!(
            user,
            User {
                name: "wei".to_string(),
                age: 18
            }
        );
    }

    #[test]
    fn test_decode_failure_is_reported() {
        let value = Value::dict([("name", 3)]);
        let err = value.decode::<User>().unwrap_err();
        assert!(matches!(err, LookupError::Decode(_)));
    }

    #[test]
    fn test_from_serialize() {
        let pet = Pet {
            name: "Rex",
            kind: Kind::Dog,
            tags: vec!["good"],
        };
        let value = Value::from_serialize(&pet);
        assert_eq!(
            value,
            Value::dict([
                ("name", Value::from("Rex")),
                ("kind", Value::from("Dog")),
                ("tags", Value::array(["good"])),
            ])
        );
    }

    #[test]
    fn test_pretty_with_indent() {
        let value = Value::dict([("a", 1)]);
        assert_eq!(
            value.to_json_pretty_with_indent(4).unwrap(),
            "{\n    \"a\": 1\n}"
        );
    }

    #[test]
    fn test_bytes_visitor_uses_byte_rule() {
        let value = ValueVisitor.visit_bytes::<de::value::Error>(b"[1]").unwrap();
        assert_eq!(value, Value::array([1]));
    }
}
