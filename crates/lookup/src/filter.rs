// SPDX-License-Identifier: MIT OR Apache-2.0
//! Projection and pruning

use crate::{Map, Value};

impl Value {
    /// A new mapping holding only the given paths.
    ///
    /// Each path is read with [`Value::get`] and written back at the same
    /// path, so nested paths keep their nesting. Absent paths are left out,
    /// and so is the empty path, which names the whole document.
    #[must_use]
    pub fn keep<I, S>(&self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept = Self::Mapping(Map::new());
        for path in paths {
            let path = path.as_ref();
            if path.is_empty() {
                log::trace!("skipping empty path in projection");
                continue;
            }
            let value = self.get(path);
            if value.is_absent() {
                continue;
            }
            if let Err(err) = kept.set(path, value) {
                log::debug!("dropping `{path}` from projection: {err}");
            }
        }
        kept
    }

    /// A copy with the given paths set to absent.
    ///
    /// Only existing slots are tombstoned; no structure is created.
    #[must_use]
    pub fn with_nulled<I, S>(&self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut nulled = self.clone();
        for path in paths {
            nulled.tombstone(path.as_ref());
        }
        nulled
    }

    /// Rebuild the tree without absent mapping entries.
    ///
    /// Unless `keep_empty_containers` is set, entries that are empty
    /// mappings, sequences or strings after pruning are dropped too.
    /// Sequences are pruned element-wise but never lose elements, and
    /// scalar roots pass through unchanged. Pruning twice is the same as
    /// pruning once.
    #[must_use]
    pub fn compact_pruned(&self, keep_empty_containers: bool) -> Self {
        match self {
            Self::Mapping(map) => Self::Mapping(prune_map(map, keep_empty_containers)),
            Self::Reflected { type_name, fields } => Self::Reflected {
                type_name: *type_name,
                fields: prune_map(fields, keep_empty_containers),
            },
            Self::Sequence(items) => Self::Sequence(
                items
                    .iter()
                    .map(|item| item.compact_pruned(keep_empty_containers))
                    .collect(),
            ),
            Self::Absent | Self::Number(_) | Self::Text(_) => self.clone(),
        }
    }

    /// [`Value::compact_pruned`] dropping empty containers
    #[must_use]
    pub fn compact(&self) -> Self {
        self.compact_pruned(false)
    }
}

fn prune_map(map: &Map, keep_empty_containers: bool) -> Map {
    map.iter()
        .filter(|(_, value)| value.is_present())
        .map(|(key, value)| (key, value.compact_pruned(keep_empty_containers)))
        .filter(|(_, value)| keep_empty_containers || !value.is_empty_container())
        .map(|(key, value)| (key.clone(), value))
        .collect()
}
