// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use crate::nade::{Nade, ParsedNade};
use crate::types::{Map, Side, Vocabulary as _};
use indexmap::IndexMap;
use serde::Serialize;

/// Nades grouped by map, then side, then display name.
///
/// Every map and side combination is present from the start, in canonical
/// order, so empty groups can still be rendered. Names keep the order in
/// which they were first seen rather than being sorted, so a page lists
/// nades in the order their images were listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    nades: IndexMap<Map, IndexMap<Side, IndexMap<String, Nade>>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        let nades = Map::all()
            .into_iter()
            .map(|map| {
                let sides: IndexMap<Side, IndexMap<String, Nade>> = Side::all()
                    .into_iter()
                    .map(|side| (side, IndexMap::new()))
                    .collect();
                (map, sides)
            })
            .collect();
        Self { nades }
    }

    /// Builds a catalog from records in directory listing order.
    pub fn from_records(records: impl IntoIterator<Item = ParsedNade>) -> Self {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert(record);
        }
        catalog
    }

    /// Merges one record into the catalog.
    ///
    /// An existing entry only gains the image; its throw modifiers stay as
    /// they were when the entry was created.
    pub fn insert(&mut self, record: ParsedNade) {
        let group = self
            .nades
            .entry(record.map)
            .or_default()
            .entry(record.side)
            .or_default();

        if let Some(nade) = group.get_mut(&record.name) {
            log::debug!("Adding {} to '{}'", record.image, nade.name);
            nade.images.push(record.image);
        } else {
            log::debug!(
                "New nade '{}' ({} {})",
                record.name,
                record.map,
                record.side
            );
            group.insert(record.name.clone(), Nade::from(record));
        }
    }

    pub fn get(&self, map: Map, side: Side, name: &str) -> Option<&Nade> {
        self.nades.get(&map)?.get(&side)?.get(name)
    }

    /// All nades for one map and side, in first-seen order.
    pub fn nades(&self, map: Map, side: Side) -> impl Iterator<Item = &Nade> {
        self.nades
            .get(&map)
            .and_then(|sides| sides.get(&side))
            .into_iter()
            .flat_map(IndexMap::values)
    }

    pub fn groups(&self) -> &IndexMap<Map, IndexMap<Side, IndexMap<String, Nade>>> {
        &self.nades
    }

    /// Number of distinct nades.
    pub fn len(&self) -> usize {
        self.nades
            .values()
            .flat_map(IndexMap::values)
            .map(IndexMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
