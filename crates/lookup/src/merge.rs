// SPDX-License-Identifier: MIT OR Apache-2.0
//! Structural merge
//!
//! Two values combine only when they have the same shape: mappings merge
//! key-wise with the right side winning, sequences concatenate. Any other
//! pairing has no meaningful result and yields [`Value::Absent`].
//!
//! [`Value::union`] looks at tags only. [`Value::merge_in_place`] first
//! decodes text that holds a JSON object or array, so a mapping can absorb
//! a JSON literal.

use crate::{Map, Value};
use std::collections::btree_map::Entry;
use std::ops::{Add, AddAssign};

impl Value {
    /// Merge two values without modifying either.
    ///
    /// Defined for two mappings (reflected values count as mappings) and for
    /// two sequences. Every other pairing, text included, is absent.
    ///
    /// ```
    /// use lookup::Value;
    ///
    /// let a = Value::dict([("a", 1), ("b", 2)]);
    /// let b = Value::dict([("b", 3)]);
    /// assert_eq!(a.union(&b), Value::dict([("a", 1), ("b", 3)]));
    /// assert!(a.union(&Value::from(r#"{"c": 4}"#)).is_absent());
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.clone().joined(other.clone())
    }

    fn joined(mut self, other: Self) -> Self {
        let tags = (self.tag(), other.tag());
        let joined = match (&mut self, other) {
            (
                Self::Mapping(map) | Self::Reflected { fields: map, .. },
                Self::Mapping(right) | Self::Reflected { fields: right, .. },
            ) => {
                map.extend(right);
                true
            }
            (Self::Sequence(items), Self::Sequence(right)) => {
                items.extend(right);
                true
            }
            _ => false,
        };

        if joined {
            self
        } else {
            log::trace!("no union of {} and {} values", tags.0, tags.1);
            Self::Absent
        }
    }

    /// Merge `other` into this value.
    ///
    /// Text on either side holding a JSON object or array is decoded first.
    /// On a shape mismatch this value becomes absent, as with [`Value::union`].
    pub fn merge_in_place(&mut self, other: impl Into<Self>) {
        let mut other = other.into();
        self.materialize_text();
        other.materialize_text();

        let merged = match (&mut *self, other) {
            (Self::Mapping(map) | Self::Reflected { fields: map, .. }, other) => {
                match other.into_mapping() {
                    Some(right) => {
                        map.extend(right);
                        true
                    }
                    None => false,
                }
            }
            (Self::Sequence(items), Self::Sequence(right)) => {
                items.extend(right);
                true
            }
            _ => false,
        };

        if !merged {
            log::trace!("cannot merge into a {} value, result is absent", self.tag());
            *self = Self::Absent;
        }
    }

    /// Fold many values into one mapping.
    ///
    /// Values that are not mappings (after text decoding) are skipped.
    /// `resolve(old, new)` picks the value for every key seen more than once.
    /// The result is always a mapping, empty when nothing qualified.
    ///
    /// ```
    /// use lookup::Value;
    ///
    /// let merged = Value::merge_many(
    ///     [Value::dict([("n", 1)]), Value::from(7), Value::dict([("n", 2)])],
    ///     |old, new| if old.int() > new.int() { old } else { new },
    /// );
    /// assert_eq!(merged.get("n").int(), Some(2));
    /// ```
    pub fn merge_many<I, F>(values: I, mut resolve: F) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Self>,
        F: FnMut(Self, Self) -> Self,
    {
        let mut merged = Map::new();
        for map in values
            .into_iter()
            .filter_map(|value| Self::into_mapping(value.into()))
        {
            for (key, value) in map {
                match merged.entry(key) {
                    Entry::Vacant(slot) => {
                        slot.insert(value);
                    }
                    Entry::Occupied(mut slot) => {
                        let old = std::mem::take(slot.get_mut());
                        *slot.get_mut() = resolve(old, value);
                    }
                }
            }
        }
        Self::Mapping(merged)
    }
}

/// [`Value::merge_many`] as an iterator adapter
pub trait MergeExt: Iterator + Sized
where
    Self::Item: Into<Value>,
{
    /// Fold the mappings of this iterator into one
    fn merging<F>(self, resolve: F) -> Value
    where
        F: FnMut(Value, Value) -> Value,
    {
        Value::merge_many(self, resolve)
    }
}

impl<I> MergeExt for I
where
    I: Iterator,
    I::Item: Into<Value>,
{
}

impl<T: Into<Value>> Add<T> for Value {
    type Output = Self;

    fn add(self, rhs: T) -> Self {
        self.joined(rhs.into())
    }
}

impl Add for &Value {
    type Output = Value;

    fn add(self, rhs: Self) -> Value {
        self.union(rhs)
    }
}

impl<T: Into<Value>> AddAssign<T> for Value {
    fn add_assign(&mut self, rhs: T) {
        self.merge_in_place(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_mappings_right_wins() {
        let a = Value::dict([("a", 1), ("b", 2)]);
        let b = Value::dict([("b", 3)]);
        assert_eq!(a.union(&b), Value::dict([("a", 1), ("b", 3)]));
        // operands untouched
        assert_eq!(a.get("b").int(), Some(2));
    }

    #[test]
    fn test_union_sequences_concatenate() {
        let a = Value::array([1, 2]);
        let b = Value::array([3]);
        assert_eq!(a.union(&b), Value::array([1, 2, 3]));
    }

    #[test]
    fn test_union_mismatch_is_absent() {
        assert!(Value::array([1]).union(&Value::dict([("a", 1)])).is_absent());
        assert!(Value::from(1).union(&Value::from(2)).is_absent());
        assert!(Value::Absent.union(&Value::dict([("a", 1)])).is_absent());
    }

    #[test]
    fn test_union_does_not_decode_text() {
        let map = Value::dict([("a", 1)]);
        assert!(map.union(&Value::from(r#"{"b": 2}"#)).is_absent());
        assert!(Value::from(r#"{"b": 2}"#).union(&map).is_absent());
        assert!(Value::array([1]).union(&Value::from("[2]")).is_absent());
        assert!(Value::from("[1]").union(&Value::from("[2]")).is_absent());
        assert!(Value::from("a").union(&Value::from("b")).is_absent());
    }

    #[test]
    fn test_union_reflected_with_mapping() {
        let pet = Value::Reflected {
            type_name: "Pet",
            fields: Map::new(),
        };
        let merged = pet.union(&Value::dict([("name", "Rex")]));
        assert_eq!(merged.reflected_type(), Some("Pet"));
        assert_eq!(merged.get("name").text().as_deref(), Some("Rex"));
    }

    #[test]
    fn test_merge_in_place_coerces_text() {
        let mut value = Value::dict([("a", 1)]);
        value.merge_in_place(r#"{"b": 2}"#);
        assert_eq!(value, Value::dict([("a", 1), ("b", 2)]));

        let mut value = Value::from("[1]");
        value.merge_in_place(Value::array([2]));
        assert_eq!(value, Value::array([1, 2]));
    }

    #[test]
    fn test_merge_in_place_mismatch_becomes_absent() {
        let mut value = Value::dict([("a", 1)]);
        value.merge_in_place("plain");
        assert!(value.is_absent());
    }

    #[test]
    fn test_reflected_keeps_its_type() {
        let mut value = Value::Reflected {
            type_name: "Pet",
            fields: Map::new(),
        };
        value += Value::dict([("name", "Rex")]);
        assert_eq!(value.reflected_type(), Some("Pet"));
        assert_eq!(value.get("name").text().as_deref(), Some("Rex"));
    }

    #[test]
    fn test_operators() {
        let a = Value::dict([("a", 1)]);
        let b = Value::dict([("b", 2)]);
        assert_eq!(&a + &b, Value::dict([("a", 1), ("b", 2)]));
        assert_eq!(a.clone() + b.clone(), &a + &b);

        let mut list = Value::array([1]);
        list += vec![2, 3];
        assert_eq!(list, Value::array([1, 2, 3]));

        // `+` is a union; `+=` decodes text
        assert!((Value::array([1]) + "[2]").is_absent());
        let mut list = Value::array([1]);
        list += "[2]";
        assert_eq!(list, Value::array([1, 2]));
    }

    #[test]
    fn test_merge_many_resolves_conflicts() {
        let merged = Value::merge_many(
            [
                Value::dict([("n", 1), ("a", 1)]),
                Value::array([1, 2]),
                Value::from(r#"{"n": 5}"#),
                Value::dict([("n", 3)]),
            ],
            |old, new| Value::from(old.int().unwrap_or(0) + new.int().unwrap_or(0)),
        );
        assert_eq!(merged, Value::dict([("n", 9), ("a", 1)]));
    }

    #[test]
    fn test_merge_many_of_nothing_is_empty_mapping() {
        let merged = Value::merge_many(Vec::<Value>::new(), |_, new| new);
        assert_eq!(merged, Value::dict(Vec::<(String, Value)>::new()));
        assert!(merged.is_present());
    }

    #[test]
    fn test_merging_adapter() {
        let merged = vec![Value::dict([("a", 1)]), Value::dict([("a", 2)])]
            .into_iter()
            .merging(|old, _| old);
        assert_eq!(merged.get("a").int(), Some(1));
    }
}
