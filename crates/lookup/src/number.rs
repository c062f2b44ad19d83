// SPDX-License-Identifier: MIT OR Apache-2.0
//! Canonical numeric scalars
//!
//! Booleans travel as numbers, the way JSON decoders box them, so a value
//! built from `true` carries the `Number` tag.

use serde::{Serialize, Serializer};
use std::fmt;

/// A numeric scalar.
///
/// Unsigned integers that fit in `i64` are stored as [`Number::Int`], so each
/// integer has exactly one representation.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Signed integer
    Int(i64),
    /// Unsigned integer above `i64::MAX`
    UInt(u64),
    /// Floating point
    Float(f64),
    /// Boolean
    Bool(bool),
}

impl Number {
    /// Whether this number holds a floating point value
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    /// Canonical string form; every typed coercion parses this text.
    ///
    /// Integers render in decimal, floats in their shortest round-trip form
    /// with integral values losing the `.0` (`2.0` renders as `2`), booleans
    /// as `1`/`0`. Serialization still emits JSON booleans.
    #[must_use]
    pub fn render(&self) -> String {
        match *self {
            Self::Int(n) => itoa::Buffer::new().format(n).to_owned(),
            Self::UInt(n) => itoa::Buffer::new().format(n).to_owned(),
            Self::Float(f) => {
                let mut buf = ryu::Buffer::new();
                let text = buf.format(f);
                text.strip_suffix(".0").unwrap_or(text).to_owned()
            }
            Self::Bool(b) => String::from(if b { "1" } else { "0" }),
        }
    }

    pub(crate) fn to_json(self) -> serde_json::Value {
        match self {
            Self::Int(n) => serde_json::Value::from(n),
            Self::UInt(n) => serde_json::Value::from(n),
            Self::Float(f) => serde_json::Number::from_f64(f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Bool(b) => serde_json::Value::Bool(b),
        }
    }

    pub(crate) fn from_json(number: &serde_json::Number) -> Self {
        if let Some(n) = number.as_i64() {
            Self::Int(n)
        } else if let Some(n) = number.as_u64() {
            Self::UInt(n)
        } else {
            Self::Float(number.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Int(n) => serializer.serialize_i64(n),
            Self::UInt(n) => serializer.serialize_u64(n),
            Self::Float(f) => serializer.serialize_f64(f),
            Self::Bool(b) => serializer.serialize_bool(b),
        }
    }
}

macro_rules! number_from_lossless {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Self::Int(i64::from(n))
                }
            }
        )*
    };
}

number_from_lossless!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Self::UInt(n), Self::Int)
    }
}

impl From<isize> for Number {
    fn from(n: isize) -> Self {
        // isize is at most 64 bits on every supported target
        Self::Int(n as i64)
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Self::from(n as u64)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<f32> for Number {
    // Widen through the decimal form so 0.1f32 stays 0.1
    fn from(f: f32) -> Self {
        Self::Float(f.to_string().parse().unwrap_or_else(|_| f64::from(f)))
    }
}

impl From<bool> for Number {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_integers() {
        assert_eq!(Number::from(1).render(), "1");
        assert_eq!(Number::from(-5i8).render(), "-5");
        assert_eq!(Number::from(u64::MAX).render(), "18446744073709551615");
    }

    #[test]
    fn test_render_floats() {
        assert_eq!(Number::from(2.0).render(), "2");
        assert_eq!(Number::from(4.5).render(), "4.5");
        assert_eq!(Number::from(-6.0).render(), "-6");
        assert_eq!(Number::from(0.1f32).render(), "0.1");
    }

    #[test]
    fn test_render_bool() {
        assert_eq!(Number::from(true).render(), "1");
        assert_eq!(Number::from(false).to_string(), "0");
    }

    #[test]
    fn test_unsigned_normalizes_to_int() {
        assert_eq!(Number::from(7u64), Number::Int(7));
        assert_eq!(Number::from(7usize), Number::Int(7));
        assert_eq!(Number::from(u64::MAX), Number::UInt(u64::MAX));
    }

    #[test]
    fn test_kinds_do_not_cross_compare() {
        assert_ne!(Number::Int(1), Number::Float(1.0));
        assert_ne!(Number::Int(1), Number::Bool(true));
    }

    #[test]
    fn test_json_conversion() {
        assert_eq!(Number::Int(3).to_json(), serde_json::json!(3));
        assert_eq!(Number::Bool(true).to_json(), serde_json::json!(true));
        assert_eq!(Number::Float(f64::NAN).to_json(), serde_json::Value::Null);
        let big = serde_json::Number::from(u64::MAX);
        assert_eq!(Number::from_json(&big), Number::UInt(u64::MAX));
        let float = serde_json::Number::from_f64(1.5).unwrap();
        assert_eq!(Number::from_json(&float), Number::Float(1.5));
    }
}
