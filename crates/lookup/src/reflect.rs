// SPDX-License-Identifier: MIT OR Apache-2.0
//! Field flattening for record types
//!
//! Types that cross into a [`Value`] as records describe their own fields
//! through [`Reflect`]. Inheritance is explicit: a type that extends another
//! returns it from [`Reflect::reflect_base`], and the base chain is walked to
//! the root. Base fields are collected first and a derived field of the same
//! name shadows the inherited one.
//!
//! Nested records are flattened recursively. There is no cycle detection: a
//! type whose fields lead back to itself recurses until the stack runs out.

use crate::{Map, Value};
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A record type that can describe its fields
///
/// ```
/// use lookup::{Fields, Reflect, Value};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Reflect for Point {
///     fn reflect_fields(&self, fields: &mut Fields) {
///         fields.field("x", self.x).field("y", self.y);
///     }
/// }
///
/// let value = Value::reflect(&Point { x: 1, y: 2 });
/// assert_eq!(value.get("y").int(), Some(2));
/// ```
pub trait Reflect {
    /// Name reported by [`Value::reflected_type`]
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Enumerate the fields declared on this type
    fn reflect_fields(&self, fields: &mut Fields);

    /// The base type whose fields this type inherits
    fn reflect_base(&self) -> Option<&dyn Reflect> {
        None
    }

    /// Override the value produced for `key`.
    ///
    /// Called once per flattened entry after this type's fields (and those
    /// of its bases) are collected.
    fn unwrap_field(&self, key: &str, value: Value) -> Value {
        let _ = key;
        value
    }
}

/// An enum type with a textual case name and an optional raw scalar
pub trait ReflectEnum {
    /// Name of the current case
    fn case_name(&self) -> &'static str;

    /// Declared raw scalar; when present it replaces the case name
    fn raw_value(&self) -> Option<Value> {
        None
    }
}

/// A leaf type with a canonical scalar form
pub trait RawValue {
    /// The scalar this value flattens to
    fn raw_value(&self) -> Value;
}

impl RawValue for SystemTime {
    // Seconds since the Unix epoch; negative before it
    fn raw_value(&self) -> Value {
        match self.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => Value::from(elapsed.as_secs_f64()),
            Err(err) => Value::from(-err.duration().as_secs_f64()),
        }
    }
}

impl RawValue for Duration {
    fn raw_value(&self) -> Value {
        Value::from(self.as_secs_f64())
    }
}

#[cfg(feature = "uuid")]
impl RawValue for uuid::Uuid {
    // Uppercase hyphenated form
    fn raw_value(&self) -> Value {
        let mut buf = Self::encode_buffer();
        Value::from(&*self.hyphenated().encode_upper(&mut buf))
    }
}

/// Collects the fields of one record
#[derive(Debug, Default)]
pub struct Fields {
    map: Map,
}

impl Fields {
    fn insert(&mut self, name: &str, value: Value) -> &mut Self {
        if name.is_empty() {
            log::trace!("skipping unnamed field");
        } else {
            self.map.insert(name.to_owned(), value);
        }
        self
    }

    /// A scalar or collection field
    pub fn field(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.insert(name, value.into())
    }

    /// A record-valued field, flattened recursively
    pub fn nested(&mut self, name: &str, value: &dyn Reflect) -> &mut Self {
        self.insert(name, Value::reflect(value))
    }

    /// An optional record-valued field; `None` is absent
    pub fn nested_opt(&mut self, name: &str, value: Option<&dyn Reflect>) -> &mut Self {
        self.insert(name, value.map_or(Value::Absent, Value::reflect))
    }

    /// An enum field: its raw scalar when it declares one, else the case name
    pub fn variant(&mut self, name: &str, value: &dyn ReflectEnum) -> &mut Self {
        let value = value
            .raw_value()
            .unwrap_or_else(|| Value::from(value.case_name()));
        self.insert(name, value)
    }

    /// A leaf with a canonical scalar form
    pub fn raw(&mut self, name: &str, value: &dyn RawValue) -> &mut Self {
        self.insert(name, value.raw_value())
    }
}

/// Flatten a record and its base chain into a map
#[must_use]
pub fn flatten(object: &dyn Reflect) -> Map {
    let mut chain: SmallVec<[&dyn Reflect; 4]> = SmallVec::new();
    let mut current = Some(object);
    while let Some(level) = current {
        chain.push(level);
        current = level.reflect_base();
    }

    let mut fields = Fields::default();
    for level in chain.into_iter().rev() {
        level.reflect_fields(&mut fields);
        fields.map = std::mem::take(&mut fields.map)
            .into_iter()
            .map(|(key, value)| {
                let value = level.unwrap_field(&key, value);
                (key, value)
            })
            .collect();
    }
    fields.map
}

impl Value {
    /// Flatten a record into a [`Value::Reflected`]
    #[must_use]
    pub fn reflect(object: &dyn Reflect) -> Self {
        Self::Reflected {
            type_name: object.type_name(),
            fields: flatten(object),
        }
    }
}

// Integer keys are not field names; these maps flatten to nothing.
macro_rules! value_from_integer_keyed {
    ($($key:ty),*) => {
        $(
            impl<V> From<BTreeMap<$key, V>> for Value {
                fn from(_: BTreeMap<$key, V>) -> Self {
                    log::trace!("integer-keyed map has no field names, flattening to empty");
                    Self::Reflected {
                        type_name: std::any::type_name::<BTreeMap<$key, V>>(),
                        fields: Map::new(),
                    }
                }
            }

            impl<V, S: BuildHasher> From<HashMap<$key, V, S>> for Value {
                fn from(_: HashMap<$key, V, S>) -> Self {
                    log::trace!("integer-keyed map has no field names, flattening to empty");
                    Self::Reflected {
                        type_name: std::any::type_name::<HashMap<$key, V, S>>(),
                        fields: Map::new(),
                    }
                }
            }
        )*
    };
}

value_from_integer_keyed!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;
    use lookup_core::Tag;

    enum Kind {
        Cat,
        Dog,
    }

    impl ReflectEnum for Kind {
        fn case_name(&self) -> &'static str {
            match self {
                Self::Cat => "cat",
                Self::Dog => "dog",
            }
        }
    }

    #[derive(Clone, Copy)]
    enum Level {
        Low = 1,
        High = 5,
    }

    impl ReflectEnum for Level {
        fn case_name(&self) -> &'static str {
            match self {
                Self::Low => "low",
                Self::High => "high",
            }
        }

        fn raw_value(&self) -> Option<Value> {
            Some(Value::from(*self as i32))
        }
    }

    struct Owner {
        name: String,
    }

    impl Reflect for Owner {
        fn reflect_fields(&self, fields: &mut Fields) {
            fields.field("name", &self.name);
        }
    }

    struct Animal {
        name: String,
        age: u8,
        kind: Kind,
        level: Level,
        owner: Owner,
        toys: Vec<String>,
        nickname: Option<String>,
    }

    impl Reflect for Animal {
        fn type_name(&self) -> &'static str {
            "Animal"
        }

        fn reflect_fields(&self, fields: &mut Fields) {
            fields
                .field("name", &self.name)
                .field("age", self.age)
                .variant("kind", &self.kind)
                .variant("level", &self.level)
                .nested("owner", &self.owner)
                .field("toys", self.toys.clone())
                .field("nickname", self.nickname.clone())
                .field("", "ignored");
        }
    }

    fn animal() -> Animal {
        Animal {
            name: "Mimi".to_string(),
            age: 3,
            kind: Kind::Cat,
            level: Level::High,
            owner: Owner {
                name: "wei".to_string(),
            },
            toys: vec!["ball".to_string()],
            nickname: None,
        }
    }

    #[test]
    fn test_flatten_record() {
        let value = Value::reflect(&animal());
        assert_eq!(value.tag(), Tag::Reflected);
        assert_eq!(value.reflected_type(), Some("Animal"));
        assert_eq!(value.get("name").text().as_deref(), Some("Mimi"));
        assert_eq!(value.get("age").u8(), Some(3));
        assert_eq!(value.get("kind"), Value::from("cat"));
        assert_eq!(value.get("owner.name").text().as_deref(), Some("wei"));
        assert_eq!(value.get("toys.0").text().as_deref(), Some("ball"));
        assert!(value.get("nickname").is_absent());
        assert!(!value.as_mapping().unwrap().contains_key(""));
    }

    #[test]
    fn test_enum_raw_value_wins() {
        let value = Value::reflect(&animal());
        assert_eq!(value.get("level"), Value::from(5));
        assert_eq!(Level::Low as i32, 1);
    }

    #[test]
    fn test_enum_case_name() {
        let dog = Animal {
            kind: Kind::Dog,
            level: Level::Low,
            ..animal()
        };
        let value = Value::reflect(&dog);
        assert_eq!(value.get("kind").text().as_deref(), Some("dog"));
        assert_eq!(value.get("level").int(), Some(1));
    }

    #[test]
    fn test_reflected_is_writable_like_a_mapping() {
        let mut value = Value::reflect(&animal());
        value.set("owner.age", 40).unwrap();
        value.set("name", "Momo").unwrap();
        assert_eq!(value.get("owner.age").int(), Some(40));
        assert_eq!(value.get("name").text().as_deref(), Some("Momo"));
    }

    struct Base {
        id: u32,
        label: &'static str,
    }

    impl Reflect for Base {
        fn reflect_fields(&self, fields: &mut Fields) {
            fields.field("id", self.id).field("label", self.label);
        }
    }

    struct Middle {
        base: Base,
        depth: u8,
    }

    impl Reflect for Middle {
        fn reflect_fields(&self, fields: &mut Fields) {
            fields.field("depth", self.depth);
        }

        fn reflect_base(&self) -> Option<&dyn Reflect> {
            Some(&self.base)
        }
    }

    struct Leaf {
        middle: Middle,
        label: &'static str,
    }

    impl Reflect for Leaf {
        fn reflect_fields(&self, fields: &mut Fields) {
            fields.field("label", self.label);
        }

        fn reflect_base(&self) -> Option<&dyn Reflect> {
            Some(&self.middle)
        }
    }

    #[test]
    fn test_inherited_fields_are_included() {
        let leaf = Leaf {
            middle: Middle {
                base: Base {
                    id: 7,
                    label: "base",
                },
                depth: 2,
            },
            label: "leaf",
        };
        let map = flatten(&leaf);
        assert_eq!(map.len(), 3);
        assert_eq!(map["id"], Value::from(7));
        assert_eq!(map["depth"], Value::from(2));
        // derived shadows base
        assert_eq!(map["label"], Value::from("leaf"));
    }

    struct Masked {
        secret: &'static str,
        public: &'static str,
    }

    impl Reflect for Masked {
        fn reflect_fields(&self, fields: &mut Fields) {
            fields.field("secret", self.secret).field("public", self.public);
        }

        fn unwrap_field(&self, key: &str, value: Value) -> Value {
            if key == "secret" {
                Value::from("***")
            } else {
                value
            }
        }
    }

    #[test]
    fn test_unwrap_field_overrides_values() {
        let value = Value::reflect(&Masked {
            secret: "hunter2",
            public: "hello",
        });
        assert_eq!(value.get("secret"), Value::from("***"));
        assert_eq!(value.get("public"), Value::from("hello"));
    }

    #[test]
    fn test_raw_values() {
        let epoch = UNIX_EPOCH + Duration::from_secs(90);
        assert_eq!(epoch.raw_value(), Value::from(90.0));
        assert_eq!(Duration::from_millis(1500).raw_value(), Value::from(1.5));

        let mut fields = Fields::default();
        fields.raw("at", &epoch);
        assert_eq!(fields.map["at"].f64(), Some(90.0));
    }

    #[cfg(feature = "uuid")]
    #[test]
    fn test_uuid_raw_value() {
        let id = uuid::Uuid::from_u128(0x67e5_5044_10b1_426f_9247_bb68_0e5f_e0c8);
        assert_eq!(
            id.raw_value(),
            Value::from("67E55044-10B1-426F-9247-BB680E5FE0C8")
        );

        let mut fields = Fields::default();
        fields.raw("id", &id);
        assert_eq!(
            fields.map["id"].text().as_deref(),
            Some("67E55044-10B1-426F-9247-BB680E5FE0C8")
        );
    }

    #[test]
    fn test_integer_keyed_maps_flatten_to_empty() {
        let value = Value::from(BTreeMap::from([(1i64, "one")]));
        assert_eq!(value.tag(), Tag::Reflected);
        assert!(value.as_mapping().unwrap().is_empty());
        assert!(value.get("1").is_absent());

        let value = Value::from(HashMap::from([(1u32, "one")]));
        assert!(value.is_empty_container());

        assert!(Value::from(BTreeMap::from([(1u8, "one")])).is_empty_container());
        assert!(Value::from(BTreeMap::from([(-1i16, "one")])).is_empty_container());
        assert!(Value::from(HashMap::from([(1isize, 1)])).is_empty_container());
    }
}
