// SPDX-License-Identifier: MIT OR Apache-2.0
//! Value discriminants

use std::fmt;

/// Which payload variant a value currently holds.
///
/// `Reflected` behaves exactly like `Mapping` for every read and write; the
/// distinct tag only survives for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// No value: missing key, explicit null, or failed decode
    Absent,
    /// Numeric scalar (booleans included)
    Number,
    /// String scalar
    Text,
    /// String-keyed map
    Mapping,
    /// Ordered list
    Sequence,
    /// Map produced by flattening a record's fields
    Reflected,
}

impl Tag {
    /// Lowercase name used in diagnostics and error messages
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Number => "number",
            Self::Text => "text",
            Self::Mapping => "mapping",
            Self::Sequence => "sequence",
            Self::Reflected => "reflected",
        }
    }

    /// Whether values with this tag hold children addressable by path
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Mapping | Self::Sequence | Self::Reflected)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names() {
        assert_eq!(Tag::Absent.to_string(), "absent");
        assert_eq!(Tag::Reflected.to_string(), "reflected");
    }

    #[test]
    fn test_containers() {
        assert!(Tag::Mapping.is_container());
        assert!(Tag::Reflected.is_container());
        assert!(Tag::Sequence.is_container());
        assert!(!Tag::Text.is_container());
        assert!(!Tag::Absent.is_container());
    }
}
