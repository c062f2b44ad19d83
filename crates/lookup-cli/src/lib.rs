// SPDX-License-Identifier: MIT OR Apache-2.0
//! # lookup-cli
//!
//! Command-line interface for lookup: read, write, merge and prune JSON
//! documents by dotted path.
//!
//! ## Usage
//!
//! ```bash
//! # Read a value
//! lookup get data.list.0 data.json
//!
//! # Read and coerce
//! lookup get --as int user.age data.json
//!
//! # Write a value (JSON literal, or plain text)
//! lookup set user.name '"wei"' data.json
//!
//! # Merge documents, later keys win
//! lookup merge base.json overlay.json
//!
//! # Project and prune
//! lookup keep name,age data.json
//! lookup null user.token data.json
//! lookup compact data.json
//!
//! # Re-serialize
//! lookup format -c data.json
//! ```
//!
//! ## Subcommands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `get` | Print the value at a path, `nil` when absent |
//! | `set` | Set a path and print the document |
//! | `merge` | Merge mapping documents |
//! | `keep` | Keep only the listed paths |
//! | `null` | Tombstone the listed paths |
//! | `compact` | Drop absent and empty entries |
//! | `format` | Pretty-print or compact a document |
//!
//! The helpers below are the pure part of the binary; they take and return
//! values and strings so they can be tested without spawning a process.

#![warn(missing_docs)]

use clap::ValueEnum;
use lookup::{Options, Value};

/// Scalar view requested by `get --as`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Coercion {
    /// Canonical text form
    Text,
    /// Signed integer
    Int,
    /// Unsigned integer
    Uint,
    /// Double precision float
    Float,
    /// Permissive boolean
    Bool,
}

/// Output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Single-line JSON
    pub compact: bool,
    /// Spaces per level when pretty-printing
    pub indent: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            compact: false,
            indent: 2,
        }
    }
}

/// Normalize input bytes: JSON when it parses, otherwise text
#[must_use]
pub fn parse_document(bytes: &[u8], options: &Options) -> Value {
    options.normalize(Value::from_slice(bytes))
}

/// Interpret a command-line literal: JSON when it parses, otherwise text
#[must_use]
pub fn parse_literal(literal: &str) -> Value {
    Value::from_json_str(literal).unwrap_or_else(|err| {
        log::debug!("literal is not JSON ({err}), storing as text");
        Value::from(literal)
    })
}

/// Split a comma-separated path list, ignoring blanks
#[must_use]
pub fn split_keys(keys: &str) -> Vec<&str> {
    keys.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .collect()
}

/// Coerce a value to the requested scalar view; absent when it has none
#[must_use]
pub fn coerce(value: &Value, coercion: Coercion) -> Value {
    match coercion {
        Coercion::Text => value.text().into(),
        Coercion::Int => value.i64().into(),
        Coercion::Uint => value.u64().into(),
        Coercion::Float => value.f64().into(),
        Coercion::Bool => value.bool().into(),
    }
}

/// Render a looked-up value: scalars verbatim, containers as JSON, `nil` for absent
///
/// # Errors
///
/// Returns an error if a container cannot be serialized.
pub fn render_value(value: &Value, layout: Layout) -> lookup::Result<String> {
    if value.tag().is_container() {
        render_document(value, layout)
    } else {
        Ok(value.to_string())
    }
}

/// Render a whole document as JSON
///
/// # Errors
///
/// Returns an error if the document cannot be serialized.
pub fn render_document(value: &Value, layout: Layout) -> lookup::Result<String> {
    if layout.compact {
        value.to_json_string()
    } else {
        value.to_json_pretty_with_indent(layout.indent)
    }
}

/// Merge documents; later keys win and non-mapping documents are skipped
#[must_use]
pub fn merge_documents(documents: impl IntoIterator<Item = Value>) -> Value {
    Value::merge_many(documents, |_, newer| newer)
}
