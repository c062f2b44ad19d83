// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for lookup operations
//!
//! Navigation and coercion never produce errors; they collapse to absence.
//! Only the entry points that promise a shape or a present value return a
//! [`LookupError`]: the `require_*` accessors, strict decoding, and path writes.

use crate::Tag;
use thiserror::Error;

/// Errors surfaced by the explicit, fallible entry points
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// A `require_*` accessor found nothing to return
    #[error("value not present: `{accessor}` requested from {tag} value")]
    ValueNotPresent {
        /// Name of the accessor that was used
        accessor: &'static str,
        /// Tag of the value it was used on
        tag: Tag,
    },

    /// Strict decoding into a value or an external type failed
    #[error("decode failed: {0}")]
    Decode(String),

    /// A write addressed a sequence slot past its end
    #[error("index {index} out of bounds for sequence of length {len}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Length of the sequence at that point
        len: usize,
    },

    /// A write tried to descend through a value that has no children
    #[error("cannot write through a {tag} value at segment `{segment}`")]
    NotAContainer {
        /// Path segment that could not be applied
        segment: String,
        /// Tag of the value in the way
        tag: Tag,
    },
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for lookup operations
pub type Result<T> = std::result::Result<T, LookupError>;
