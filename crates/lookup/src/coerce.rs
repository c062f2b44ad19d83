// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed coercion
//!
//! Every scalar accessor goes through the canonical text form of a value:
//! numbers are rendered, text is taken verbatim, and the result is parsed as
//! the target type. A number therefore becomes an `i16` the same way the
//! string `"1"` does, and fractions truncate toward zero while out-of-range
//! values fail.
//!
//! The optional accessors (`text`, `i16`, `f64`, `bool`, ...) return `None`
//! when nothing can be produced. The `require_*` family returns
//! [`LookupError::ValueNotPresent`] instead, for callers that treat absence
//! as a bug.

use crate::{Map, Value};
use lookup_core::{LookupError, Result};
use std::borrow::Cow;

/// A type a [`Value`] can be coerced into
pub trait FromValue: Sized {
    /// Accessor name reported by [`LookupError::ValueNotPresent`]
    const NAME: &'static str;

    /// Coerce, or `None` when the value has no such reading
    fn from_value(value: &Value) -> Option<Self>;
}

/// Parse an integer the way the string-mediated coercion rules require.
///
/// Exact integer text parses directly; other numeric text such as `"4.5"`
/// or `"1e3"` truncates toward zero, provided the result fits.
#[allow(clippy::cast_possible_truncation)]
fn parse_integer<T>(text: &str) -> Option<T>
where
    T: std::str::FromStr + TryFrom<i128>,
{
    let text = text.trim();
    if let Ok(n) = text.parse::<T>() {
        return Some(n);
    }
    let float = text.parse::<f64>().ok().filter(|f| f.is_finite())?;
    // saturating cast; try_from rejects what does not fit
    T::try_from(float.trunc() as i128).ok()
}

/// Permissive boolean reading: `true`, `yes`, `y`, `t` (any case) and any
/// non-zero number are true; everything else is false.
fn parse_bool(text: &str) -> bool {
    let text = text.trim();
    if ["true", "yes", "y", "t"]
        .iter()
        .any(|word| text.eq_ignore_ascii_case(word))
    {
        return true;
    }
    text.parse::<f64>().is_ok_and(|n| n != 0.0)
}

macro_rules! from_value_integer {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                const NAME: &'static str = stringify!($ty);

                fn from_value(value: &Value) -> Option<Self> {
                    parse_integer(&value.text()?)
                }
            }
        )*
    };
}

from_value_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    const NAME: &'static str = "f64";

    fn from_value(value: &Value) -> Option<Self> {
        value.text()?.trim().parse().ok()
    }
}

impl FromValue for f32 {
    const NAME: &'static str = "f32";

    fn from_value(value: &Value) -> Option<Self> {
        value.text()?.trim().parse().ok()
    }
}

impl FromValue for bool {
    const NAME: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        value.text().map(|text| parse_bool(&text))
    }
}

impl FromValue for String {
    const NAME: &'static str = "text";

    fn from_value(value: &Value) -> Option<Self> {
        value.text().map(Cow::into_owned)
    }
}

impl FromValue for Map {
    const NAME: &'static str = "mapping";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Mapping(map) | Value::Reflected { fields: map, .. } => Some(map.clone()),
            Value::Text(_) => value.clone().into_mapping(),
            Value::Absent | Value::Number(_) | Value::Sequence(_) => None,
        }
    }
}

impl FromValue for Vec<Value> {
    const NAME: &'static str = "sequence";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Sequence(items) => Some(items.clone()),
            Value::Text(_) => value.clone().into_sequence(),
            _ => None,
        }
    }
}

impl FromValue for Value {
    const NAME: &'static str = "value";

    fn from_value(value: &Value) -> Option<Self> {
        value.is_present().then(|| value.clone())
    }
}

macro_rules! accessors {
    ($($(#[$doc:meta])* $name:ident / $require:ident -> $ty:ty;)*) => {
        impl Value {
            $(
                $(#[$doc])*
                #[must_use]
                pub fn $name(&self) -> Option<$ty> {
                    <$ty>::from_value(self)
                }

                #[doc = concat!("Like [`Value::", stringify!($name), "`], but absence is an error")]
                ///
                /// # Errors
                ///
                /// Returns [`LookupError::ValueNotPresent`] when the value has no such reading.
                pub fn $require(&self) -> Result<$ty> {
                    self.require::<$ty>()
                }
            )*
        }
    };
}

accessors! {
    /// Pointer-width signed integer
    int / require_int -> isize;
    /// 8-bit signed integer
    i8 / require_i8 -> i8;
    /// 16-bit signed integer
    i16 / require_i16 -> i16;
    /// 32-bit signed integer
    i32 / require_i32 -> i32;
    /// 64-bit signed integer
    i64 / require_i64 -> i64;
    /// Pointer-width unsigned integer
    uint / require_uint -> usize;
    /// 8-bit unsigned integer
    u8 / require_u8 -> u8;
    /// 16-bit unsigned integer
    u16 / require_u16 -> u16;
    /// 32-bit unsigned integer
    u32 / require_u32 -> u32;
    /// 64-bit unsigned integer
    u64 / require_u64 -> u64;
    /// Single precision float
    f32 / require_f32 -> f32;
    /// Double precision float
    f64 / require_f64 -> f64;
    /// Permissive boolean; `None` only when there is no text form at all
    bool / require_bool -> bool;
    /// Map payload; text holding a JSON object is decoded
    mapping / require_mapping -> Map;
    /// Items; text holding a JSON array is decoded
    sequence / require_sequence -> Vec<Value>;
}

impl Value {
    /// Canonical text form: rendered numbers and verbatim text
    #[must_use]
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Number(number) => Some(Cow::Owned(number.render())),
            Self::Text(text) => Some(Cow::Borrowed(text)),
            _ => None,
        }
    }

    /// Like [`Value::text`], but absence is an error
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::ValueNotPresent`] unless this is a number or text.
    pub fn require_text(&self) -> Result<String> {
        self.require::<String>()
    }

    /// Coerce into any [`FromValue`] type
    #[must_use]
    pub fn to<T: FromValue>(&self) -> Option<T> {
        T::from_value(self)
    }

    /// Coerce into any [`FromValue`] type, treating absence as an error
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::ValueNotPresent`] when the coercion yields nothing.
    pub fn require<T: FromValue>(&self) -> Result<T> {
        T::from_value(self).ok_or(LookupError::ValueNotPresent {
            accessor: T::NAME,
            tag: self.tag(),
        })
    }

    /// Navigate and coerce in one step
    #[must_use]
    pub fn get_as<T: FromValue>(&self, path: &str) -> Option<T> {
        T::from_value(&self.lookup(path))
    }
}

/// A model type backed by a [`Value`]
///
/// ```
/// use lookup::{LookupModel, Value};
///
/// struct Profile {
///     raw: Value,
/// }
///
/// impl LookupModel for Profile {
///     fn value(&self) -> &Value {
///         &self.raw
///     }
/// }
///
/// let profile = Profile { raw: Value::dict([("age", "18")]) };
/// assert_eq!(profile.member::<u8>("age"), Some(18));
/// ```
pub trait LookupModel {
    /// The backing value
    fn value(&self) -> &Value;

    /// Read a member by dotted path, coerced to `T`
    fn member<T: FromValue>(&self, name: &str) -> Option<T> {
        self.value().get_as(name)
    }
}
