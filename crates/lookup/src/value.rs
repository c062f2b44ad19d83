// SPDX-License-Identifier: MIT OR Apache-2.0
//! The canonical value tree
//!
//! [`Value`] is a closed sum over the payload shapes of a JSON-like tree.
//! Construction never fails: anything that cannot be understood becomes
//! [`Value::Absent`]. Missing keys and explicit nulls are the same thing.

use crate::Number;
use lookup_core::Tag;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

/// Map payload. Key order carries no meaning; the `BTreeMap` only keeps
/// rendering deterministic.
pub type Map = BTreeMap<String, Value>;

/// A node of a dynamically typed tree
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// No value: missing key, null, or undecodable input
    #[default]
    Absent,
    /// Numeric scalar, booleans included
    Number(Number),
    /// String scalar, never parsed eagerly
    Text(String),
    /// String-keyed map
    Mapping(Map),
    /// Ordered list
    Sequence(Vec<Value>),
    /// Fields of a flattened record; reads and writes treat it as a mapping
    Reflected {
        /// Type the fields were taken from, kept for diagnostics
        type_name: &'static str,
        /// Flattened fields
        fields: Map,
    },
}

/// Shared absent value handed out by borrowing lookups
pub(crate) static ABSENT: Value = Value::Absent;

impl Value {
    /// Normalize raw JSON bytes.
    ///
    /// Bytes that parse as JSON become the decoded tree. Otherwise valid
    /// UTF-8 becomes text, and anything else is absent.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Self>(bytes) {
            Ok(value) => value,
            Err(err) => {
                log::trace!("bytes are not JSON ({err}), falling back to text");
                std::str::from_utf8(bytes).map_or_else(
                    |_| {
                        log::trace!("bytes are not UTF-8, normalizing to absent");
                        Self::Absent
                    },
                    |text| Self::Text(text.to_owned()),
                )
            }
        }
    }

    /// Normalize with explicit [`Options`]
    #[must_use]
    pub fn with_options(raw: impl Into<Self>, options: &Options) -> Self {
        options.normalize(raw)
    }

    /// Build a sequence literal
    #[must_use]
    pub fn array<T, I>(items: I) -> Self
    where
        T: Into<Self>,
        I: IntoIterator<Item = T>,
    {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Build a mapping literal
    #[must_use]
    pub fn dict<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Self>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Build a text literal
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Build a numeric literal
    #[must_use]
    pub fn number(number: impl Into<Number>) -> Self {
        Self::Number(number.into())
    }

    /// Build a boolean literal
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Number(Number::Bool(value))
    }

    /// The absent value
    #[must_use]
    pub const fn null() -> Self {
        Self::Absent
    }

    /// Which payload this value holds
    #[must_use]
    pub const fn tag(&self) -> Tag {
        match self {
            Self::Absent => Tag::Absent,
            Self::Number(_) => Tag::Number,
            Self::Text(_) => Tag::Text,
            Self::Mapping(_) => Tag::Mapping,
            Self::Sequence(_) => Tag::Sequence,
            Self::Reflected { .. } => Tag::Reflected,
        }
    }

    /// Whether nothing is here
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Whether something is here
    #[must_use]
    pub const fn is_present(&self) -> bool {
        !self.is_absent()
    }

    /// Borrow the map payload of a mapping or reflected value
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Map> {
        match self {
            Self::Mapping(map) | Self::Reflected { fields: map, .. } => Some(map),
            _ => None,
        }
    }

    /// Borrow the items of a sequence
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Borrow the text payload
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Borrow the numeric payload
    #[must_use]
    pub const fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(number) => Some(number),
            _ => None,
        }
    }

    /// The type a reflected value was flattened from
    #[must_use]
    pub const fn reflected_type(&self) -> Option<&'static str> {
        match self {
            Self::Reflected { type_name, .. } => Some(*type_name),
            _ => None,
        }
    }

    /// Whether this is an empty mapping, sequence or text
    #[must_use]
    pub fn is_empty_container(&self) -> bool {
        match self {
            Self::Mapping(map) | Self::Reflected { fields: map, .. } => map.is_empty(),
            Self::Sequence(items) => items.is_empty(),
            Self::Text(text) => text.is_empty(),
            Self::Absent | Self::Number(_) => false,
        }
    }

    /// Take the map payload, decoding text that holds a JSON object
    #[must_use]
    pub fn into_mapping(self) -> Option<Map> {
        match self {
            Self::Mapping(map) | Self::Reflected { fields: map, .. } => Some(map),
            Self::Text(text) => match decode_container(&text) {
                Some(Self::Mapping(map)) => Some(map),
                _ => None,
            },
            _ => None,
        }
    }

    /// Take the items, decoding text that holds a JSON array
    #[must_use]
    pub fn into_sequence(self) -> Option<Vec<Self>> {
        match self {
            Self::Sequence(items) => Some(items),
            Self::Text(text) => match decode_container(&text) {
                Some(Self::Sequence(items)) => Some(items),
                _ => None,
            },
            _ => None,
        }
    }

    /// The container a text payload decodes to, if it is one.
    ///
    /// Borrows when the value is already a container.
    pub(crate) fn container_view(&self) -> Option<Cow<'_, Self>> {
        match self {
            Self::Mapping(_) | Self::Sequence(_) | Self::Reflected { .. } => {
                Some(Cow::Borrowed(self))
            }
            Self::Text(text) => decode_container(text).map(Cow::Owned),
            Self::Absent | Self::Number(_) => None,
        }
    }

    /// Replace text holding a JSON container with the decoded container
    pub(crate) fn materialize_text(&mut self) {
        if let Self::Text(text) = self
            && let Some(decoded) = decode_container(text)
        {
            *self = decoded;
        }
    }
}

/// Decode text as a JSON object or array; scalars and malformed text yield `None`
pub(crate) fn decode_container(text: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ (Value::Mapping(_) | Value::Sequence(_))) => Some(value),
        Ok(other) => {
            log::trace!("text decodes to a {} value, not a container", other.tag());
            None
        }
        Err(err) => {
            log::trace!("text is not a JSON container: {err}");
            None
        }
    }
}

/// How top-level text is treated during normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextPolicy {
    /// Text stays text; containers are decoded lazily by accessors
    #[default]
    Opaque,
    /// Text that starts with `{` or `[` and decodes as JSON becomes the decoded tree
    Sniff,
}

/// Normalization options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    /// Treatment of top-level text
    pub text: TextPolicy,
}

impl Options {
    /// Options with eager JSON sniffing of top-level text
    #[must_use]
    pub const fn sniffing() -> Self {
        Self {
            text: TextPolicy::Sniff,
        }
    }

    /// Normalize `raw` under these options
    #[must_use]
    pub fn normalize(&self, raw: impl Into<Value>) -> Value {
        let mut value = raw.into();
        if self.text == TextPolicy::Sniff
            && let Value::Text(text) = &value
            && text.trim_start().starts_with(['{', '['])
        {
            value.materialize_text();
        }
        value
    }
}

impl PartialEq for Value {
    // Reflected and plain mappings with the same entries are equal
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent) => true,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Sequence(a), Self::Sequence(b)) => a == b,
            _ => match (self.as_mapping(), other.as_mapping()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("nil"),
            Self::Number(number) => fmt::Display::fmt(number, f),
            Self::Text(text) => f.write_str(text),
            Self::Mapping(_) | Self::Sequence(_) | Self::Reflected { .. } => {
                let pretty = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
                f.write_str(&pretty)
            }
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

macro_rules! value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Self::Number(Number::from(n))
                }
            }
        )*
    };
}

value_from_number!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, Number
);

impl From<&Value> for Value {
    fn from(value: &Self) -> Self {
        value.clone()
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for Value {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(text: Cow<'_, str>) -> Self {
        Self::Text(text.into_owned())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::Text(c.to_string())
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Absent
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::array(items)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Self::array(items)
    }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Value {
    fn from(map: BTreeMap<String, V>) -> Self {
        Self::dict(map)
    }
}

impl<V: Into<Value>> From<BTreeMap<&str, V>> for Value {
    fn from(map: BTreeMap<&str, V>) -> Self {
        Self::dict(map)
    }
}

impl<V: Into<Value>, S: BuildHasher> From<HashMap<String, V, S>> for Value {
    fn from(map: HashMap<String, V, S>) -> Self {
        Self::dict(map)
    }
}

impl<V: Into<Value>, S: BuildHasher> From<HashMap<&str, V, S>> for Value {
    fn from(map: HashMap<&str, V, S>) -> Self {
        Self::dict(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Absent,
            serde_json::Value::Bool(b) => Self::boolean(b),
            serde_json::Value::Number(n) => Self::Number(Number::from_json(&n)),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => Self::array(items),
            serde_json::Value::Object(map) => Self::from(map),
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Value {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::dict(map)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::array(iter)
    }
}
