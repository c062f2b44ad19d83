// SPDX-License-Identifier: MIT OR Apache-2.0
//! Path navigation and mutation
//!
//! Reads never fail: a segment that cannot be resolved short-circuits to
//! absent. Text holding a JSON object or array is decoded on demand when a
//! path descends into it. Writes auto-create intermediate mappings and
//! report an error only when a path runs into a scalar or past the end of a
//! sequence.

use crate::value::{ABSENT, decode_container};
use crate::{Map, Value};
use lookup_core::path::{self, ParsedPath};
use lookup_core::{LookupError, Result};
use std::borrow::Cow;

impl Value {
    /// Resolve a dotted path, borrowing when possible.
    ///
    /// Only a descent through text that holds JSON allocates.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Cow<'_, Self> {
        self.lookup_segments(&path::split(path))
    }

    /// Resolve a pre-parsed path
    #[must_use]
    pub fn lookup_parsed(&self, path: &ParsedPath) -> Cow<'_, Self> {
        self.lookup_segments(&path.segments())
    }

    /// Resolve a dotted path into an owned value
    #[must_use]
    pub fn get(&self, path: &str) -> Self {
        self.lookup(path).into_owned()
    }

    /// Single-segment access; the name is never split on `.`
    #[must_use]
    pub fn member(&self, name: &str) -> Self {
        self.lookup_segments(&[name]).into_owned()
    }

    /// Single-index access into a sequence, or text holding a JSON array
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        match self {
            Self::Sequence(items) => items.get(index).cloned().unwrap_or_default(),
            Self::Text(text) => match decode_container(text) {
                Some(Self::Sequence(mut items)) if index < items.len() => items.swap_remove(index),
                _ => Self::Absent,
            },
            _ => Self::Absent,
        }
    }

    fn lookup_segments<'a>(&'a self, segments: &[&str]) -> Cow<'a, Self> {
        let mut current = self;
        for (pos, segment) in segments.iter().enumerate() {
            match current {
                Self::Mapping(map) | Self::Reflected { fields: map, .. } => match map.get(*segment) {
                    Some(child) => current = child,
                    None => return Cow::Borrowed(&ABSENT),
                },
                Self::Sequence(items) => {
                    match path::parse_index(segment).and_then(|i| items.get(i)) {
                        Some(child) => current = child,
                        None => return Cow::Borrowed(&ABSENT),
                    }
                }
                Self::Text(text) => {
                    let Some(decoded) = decode_container(text) else {
                        return Cow::Borrowed(&ABSENT);
                    };
                    let child = decoded.into_child(segment);
                    let rest = &segments[pos + 1..];
                    return Cow::Owned(child.lookup_segments(rest).into_owned());
                }
                Self::Number(_) | Self::Absent => return Cow::Borrowed(&ABSENT),
            }
        }
        Cow::Borrowed(current)
    }

    fn into_child(self, segment: &str) -> Self {
        match self {
            Self::Mapping(mut map) | Self::Reflected { fields: mut map, .. } => {
                map.remove(segment).unwrap_or_default()
            }
            Self::Sequence(mut items) => match path::parse_index(segment) {
                Some(i) if i < items.len() => items.swap_remove(i),
                _ => Self::Absent,
            },
            _ => Self::Absent,
        }
    }

    /// Set the value at a dotted path.
    ///
    /// Missing or absent intermediates become empty mappings. On a mapping
    /// the last segment upserts; on a sequence it replaces the slot, or
    /// appends when the index equals the length. Setting absent stores a
    /// tombstone, after which the path reads as absent.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotAContainer`] when the path runs through a
    /// scalar or uses a non-index segment on a sequence, and
    /// [`LookupError::IndexOutOfBounds`] when a sequence index is past the end.
    pub fn set(&mut self, path: &str, value: impl Into<Self>) -> Result<()> {
        self.write_segments(&path::split(path), value.into(), SlotWrite::Replace)
    }

    /// Set the value at a pre-parsed path
    ///
    /// # Errors
    ///
    /// Same as [`Value::set`].
    pub fn set_parsed(&mut self, path: &ParsedPath, value: impl Into<Self>) -> Result<()> {
        self.write_segments(&path.segments(), value.into(), SlotWrite::Replace)
    }

    /// Like [`Value::set`], but a sequence slot is inserted, shifting later
    /// items, instead of replaced
    ///
    /// # Errors
    ///
    /// Same as [`Value::set`].
    pub fn insert(&mut self, path: &str, value: impl Into<Self>) -> Result<()> {
        self.write_segments(&path::split(path), value.into(), SlotWrite::Insert)
    }

    fn write_segments(&mut self, segments: &[&str], value: Self, mode: SlotWrite) -> Result<()> {
        let Some((leaf, parents)) = segments.split_last() else {
            *self = value;
            return Ok(());
        };
        let mut current = self;
        for segment in parents {
            current = current.child_or_vivify(segment)?;
        }
        current.write_member(leaf, value, mode)
    }

    fn vivify(&mut self) {
        if self.is_absent() {
            *self = Self::Mapping(Map::new());
        }
    }

    fn child_or_vivify(&mut self, segment: &str) -> Result<&mut Self> {
        self.vivify();
        let tag = self.tag();
        match self {
            Self::Mapping(map) | Self::Reflected { fields: map, .. } => {
                Ok(map.entry(segment.to_owned()).or_default())
            }
            Self::Sequence(items) => {
                let len = items.len();
                let index = path::parse_index(segment).ok_or_else(|| not_a_container(segment, tag))?;
                items
                    .get_mut(index)
                    .ok_or(LookupError::IndexOutOfBounds { index, len })
            }
            Self::Absent | Self::Number(_) | Self::Text(_) => Err(not_a_container(segment, tag)),
        }
    }

    fn write_member(&mut self, segment: &str, value: Self, mode: SlotWrite) -> Result<()> {
        self.vivify();
        let tag = self.tag();
        match self {
            Self::Mapping(map) | Self::Reflected { fields: map, .. } => {
                if value.is_absent() {
                    log::debug!("tombstoning `{segment}`");
                }
                map.insert(segment.to_owned(), value);
                Ok(())
            }
            Self::Sequence(items) => {
                let len = items.len();
                let index = path::parse_index(segment).ok_or_else(|| not_a_container(segment, tag))?;
                match mode {
                    SlotWrite::Replace if index < len => items[index] = value,
                    SlotWrite::Replace | SlotWrite::Insert if index == len => items.push(value),
                    SlotWrite::Insert if index < len => items.insert(index, value),
                    SlotWrite::Replace | SlotWrite::Insert => {
                        log::debug!("rejecting write to index {index} of a {len}-item sequence");
                        return Err(LookupError::IndexOutOfBounds { index, len });
                    }
                }
                Ok(())
            }
            Self::Absent | Self::Number(_) | Self::Text(_) => Err(not_a_container(segment, tag)),
        }
    }

    /// Borrow an existing child mutably, without creating anything
    pub(crate) fn existing_child_mut(&mut self, segment: &str) -> Option<&mut Self> {
        match self {
            Self::Mapping(map) | Self::Reflected { fields: map, .. } => map.get_mut(segment),
            Self::Sequence(items) => items.get_mut(path::parse_index(segment)?),
            Self::Absent | Self::Number(_) | Self::Text(_) => None,
        }
    }

    /// Replace the value at `path` with a tombstone if the path exists.
    ///
    /// Unlike `set`, nothing is created along the way.
    pub(crate) fn tombstone(&mut self, path: &str) {
        let segments = path::split(path);
        let Some((leaf, parents)) = segments.split_last() else {
            *self = Self::Absent;
            return;
        };
        let mut current = self;
        for segment in parents {
            match current.existing_child_mut(segment) {
                Some(child) => current = child,
                None => return,
            }
        }
        if let Some(slot) = current.existing_child_mut(leaf) {
            log::debug!("tombstoning `{path}`");
            *slot = Self::Absent;
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum SlotWrite {
    Replace,
    Insert,
}

fn not_a_container(segment: &str, tag: lookup_core::Tag) -> LookupError {
    log::debug!("rejecting write through a {tag} value at `{segment}`");
    LookupError::NotAContainer {
        segment: segment.to_owned(),
        tag,
    }
}
