// SPDX-License-Identifier: MIT OR Apache-2.0
//! Dotted path parsing
//!
//! A path is a `.`-delimited list of segments. Every segment is a map key;
//! a segment additionally addresses a sequence slot when it consists only of
//! ASCII digits. Signs, fractions and alphabetic characters never index.
//!
//! ```
//! use lookup_core::path::{ParsedPath, parse_index, split};
//!
//! assert_eq!(split("data.list.0").as_slice(), &["data", "list", "0"]);
//! assert_eq!(parse_index("0"), Some(0));
//! assert_eq!(parse_index("-1"), None);
//!
//! let path = ParsedPath::parse("users.12.name");
//! assert_eq!(path.components()[1].index(), Some(12));
//! ```

use smallvec::SmallVec;
use std::fmt;

/// Separator between path segments
pub const SEPARATOR: char = '.';

/// Borrowed path segments; most paths fit inline
pub type Segments<'a> = SmallVec<[&'a str; 8]>;

/// Split a path into its segments.
///
/// The empty path has no segments and addresses the root itself.
#[must_use]
pub fn split(path: &str) -> Segments<'_> {
    if path.is_empty() {
        return SmallVec::new();
    }
    path.split(SEPARATOR).collect()
}

/// Interpret a segment as a sequence index.
///
/// Only non-empty all-digit segments qualify, so `+1`, `-1` and `1.5`
/// never index. Values that overflow `usize` do not index either.
#[must_use]
pub fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// One segment of a [`ParsedPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathComponent {
    name: String,
    index: Option<usize>,
}

impl PathComponent {
    /// Parse a single segment
    #[must_use]
    pub fn parse(segment: &str) -> Self {
        Self {
            name: segment.to_owned(),
            index: parse_index(segment),
        }
    }

    /// The segment text, used as a map key
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sequence index this segment addresses, if any
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }
}

/// A path parsed once and reused across many lookups
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ParsedPath {
    raw: String,
    components: SmallVec<[PathComponent; 8]>,
}

impl ParsedPath {
    /// Parse a dotted path
    #[must_use]
    pub fn parse(path: &str) -> Self {
        Self {
            raw: path.to_owned(),
            components: split(path).into_iter().map(PathComponent::parse).collect(),
        }
    }

    /// The original path text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed components, root first
    #[must_use]
    pub fn components(&self) -> &[PathComponent] {
        &self.components
    }

    /// Borrowed segment names, root first
    #[must_use]
    pub fn segments(&self) -> Segments<'_> {
        self.components.iter().map(PathComponent::name).collect()
    }

    /// Number of components
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether this is the root path
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

}

impl From<&str> for ParsedPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl fmt::Display for ParsedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
