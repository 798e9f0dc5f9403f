//! Content preserved across structural edits.
//!
//! Captured from the cell matrix before any mutation, remapped with the same
//! index algebra as the merged regions, and replayed onto the rebuilt matrix.

use std::collections::BTreeMap;

use crate::error::Axis;
use crate::types::{Cell, CellContent, MergedRegion};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentSnapshot {
    entries: BTreeMap<(u32, u32), CellContent>,
}

impl ContentSnapshot {
    /// Record every non-empty cell payload.
    pub fn capture(cells: &[Cell]) -> Self {
        let entries = cells
            .iter()
            .filter(|cell| !cell.content.is_empty())
            .map(|cell| (cell.coords(), cell.content.clone()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, row: u32, col: u32) -> Option<&CellContent> {
        self.entries.get(&(row, col))
    }

    pub fn insert(&mut self, row: u32, col: u32, content: CellContent) {
        if content.is_empty() {
            self.entries.remove(&(row, col));
        } else {
            self.entries.insert((row, col), content);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(u32, u32), &CellContent)> {
        self.entries.iter()
    }

    /// Move entries at or after `index` one step along `axis`.
    pub fn shift_for_insert(&mut self, axis: Axis, index: u32) {
        let entries = std::mem::take(&mut self.entries);
        self.entries = entries
            .into_iter()
            .map(|((r, c), content)| match axis {
                Axis::Row if r >= index => ((r + 1, c), content),
                Axis::Column if c >= index => ((r, c + 1), content),
                _ => ((r, c), content),
            })
            .collect();
    }

    /// Drop entries on deleted rows/columns (`deleted` sorted, unique) and
    /// pull the survivors back by the number of deletions before them.
    pub fn remap_for_delete(&mut self, axis: Axis, deleted: &[u32]) {
        let remap = |i: u32| -> Option<u32> {
            if deleted.binary_search(&i).is_ok() {
                return None;
            }
            let before = deleted.partition_point(|&d| d < i);
            Some(i - u32::try_from(before).unwrap_or(i))
        };
        let entries = std::mem::take(&mut self.entries);
        self.entries = entries
            .into_iter()
            .filter_map(|((r, c), content)| {
                let key = match axis {
                    Axis::Row => (remap(r)?, c),
                    Axis::Column => (r, remap(c)?),
                };
                Some((key, content))
            })
            .collect();
    }

    /// Discard everything inside `region` except its origin.
    pub fn clear_footprint_except_origin(&mut self, region: &MergedRegion) {
        self.entries
            .retain(|&(r, c), _| !region.contains(r, c) || region.is_origin(r, c));
    }
}

impl IntoIterator for ContentSnapshot {
    type Item = ((u32, u32), CellContent);
    type IntoIter = std::collections::btree_map::IntoIter<(u32, u32), CellContent>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
