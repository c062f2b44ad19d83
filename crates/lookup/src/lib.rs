// SPDX-License-Identifier: MIT OR Apache-2.0
//! # lookup
//!
//! Dynamic, forgiving access to JSON-like trees.
//!
//! A [`Value`] is built from anything JSON-shaped (bytes, literals, maps,
//! sequences, serde types, or records that implement [`Reflect`]) and is
//! navigated with dotted paths:
//!
//! ```
//! use lookup::Value;
//!
//! let value = Value::from_slice(br#"{"data": {"list": ["value0", null, "value2"]}}"#);
//! assert_eq!(value.get("data.list.0").text().as_deref(), Some("value0"));
//! assert!(value.get("data.list.1").is_absent());
//! assert!(value.get("data.list.3").is_absent());
//! ```
//!
//! ## Absence instead of errors
//!
//! Missing keys, explicit nulls, out-of-range indexes and undecodable input
//! all collapse to [`Value::Absent`]. Only three entry points report errors:
//!
//! - the `require_*` accessors ([`LookupError::ValueNotPresent`])
//! - strict decoding ([`Value::decode`], [`Value::from_json_str`])
//! - path writes that run into a scalar or past a sequence ([`Value::set`])
//!
//! ## Coercion
//!
//! Scalar accessors parse the canonical text form of a value, so `1` and
//! `"1"` coerce identically:
//!
//! ```
//! use lookup::Value;
//!
//! let value = Value::dict([("n", Value::from(1)), ("s", Value::from("1"))]);
//! assert_eq!(value.get("n").text().as_deref(), Some("1"));
//! assert_eq!(value.get("s").i16(), Some(1));
//! assert_eq!(value.get("s").bool(), Some(true));
//! ```
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`value`] | The tree, construction, normalization options, conversions |
//! | [`number`] | Numeric scalars and their canonical text form |
//! | [`coerce`] | Typed accessors, [`FromValue`], [`LookupModel`] |
//! | [`reflect`] | [`Reflect`] and record flattening |
//! | [`merge`] | `union`, `merge_in_place`, `merge_many`, `+`/`+=` |
//! | [`filter`] | `keep`, `with_nulled`, `compact_pruned` |
//! | [`ser`] | serde integration and JSON rendering |

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Path navigation and mutation
mod access;
/// Typed coercion accessors
pub mod coerce;
/// Projection and pruning
pub mod filter;
/// Structural merge
pub mod merge;
/// Numeric scalars
pub mod number;
/// Record flattening
pub mod reflect;
/// Serde integration
pub mod ser;
/// The value tree
pub mod value;

pub use coerce::{FromValue, LookupModel};
pub use lookup_core::{LookupError, ParsedPath, PathComponent, Result, Tag, path};
pub use merge::MergeExt;
pub use number::Number;
pub use reflect::{Fields, RawValue, Reflect, ReflectEnum, flatten};
pub use value::{Map, Options, TextPolicy, Value};
