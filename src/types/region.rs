//! Merged regions and the index algebra that keeps them valid across
//! row/column insertion and deletion.

use serde::{Deserialize, Serialize};

use super::CellRole;
use crate::error::Axis;

/// A rectangle of unit cells fused into one visual/content cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergedRegion {
    pub row: u32,
    pub col: u32,
    pub rowspan: u32,
    pub colspan: u32,
}

impl MergedRegion {
    pub fn new(row: u32, col: u32, rowspan: u32, colspan: u32) -> Self {
        Self {
            row,
            col,
            rowspan,
            colspan,
        }
    }

    /// Last covered row (inclusive).
    pub fn last_row(&self) -> u32 {
        self.row + self.rowspan.saturating_sub(1)
    }

    /// Last covered column (inclusive).
    pub fn last_col(&self) -> u32 {
        self.col + self.colspan.saturating_sub(1)
    }

    pub fn area(&self) -> u64 {
        u64::from(self.rowspan) * u64::from(self.colspan)
    }

    /// A region covering a single unit cell fuses nothing.
    pub fn is_unit(&self) -> bool {
        self.rowspan <= 1 && self.colspan <= 1
    }

    pub fn is_origin(&self, row: u32, col: u32) -> bool {
        self.row == row && self.col == col
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.row && row < self.row + self.rowspan && col >= self.col && col < self.col + self.colspan
    }

    pub fn overlaps(&self, other: &MergedRegion) -> bool {
        !(self.col + self.colspan <= other.col
            || other.col + other.colspan <= self.col
            || self.row + self.rowspan <= other.row
            || other.row + other.rowspan <= self.row)
    }

    /// Whether the region lies inside a `num_rows` x `num_cols` grid.
    pub fn fits(&self, num_rows: u32, num_cols: u32) -> bool {
        self.rowspan >= 1
            && self.colspan >= 1
            && self.row.checked_add(self.rowspan).is_some_and(|end| end <= num_rows)
            && self.col.checked_add(self.colspan).is_some_and(|end| end <= num_cols)
    }

    /// Every unit cell of the footprint, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.row..self.row + self.rowspan)
            .flat_map(move |r| (self.col..self.col + self.colspan).map(move |c| (r, c)))
    }

    fn span_mut(&mut self, axis: Axis) -> (&mut u32, &mut u32) {
        match axis {
            Axis::Row => (&mut self.row, &mut self.rowspan),
            Axis::Column => (&mut self.col, &mut self.colspan),
        }
    }

    /// Adjust for a row/column inserted before `index`.
    fn shift_for_insert(&mut self, axis: Axis, index: u32) {
        let (start, span) = self.span_mut(axis);
        if *start >= index {
            *start += 1;
        } else if index < *start + *span {
            // Insertion lands inside the region: it grows.
            *span += 1;
        }
    }

    /// Adjust for the removal of `deleted` (sorted, unique) rows/columns.
    /// Returns `false` when the whole span was deleted.
    fn remap_for_delete(&mut self, axis: Axis, deleted: &[u32]) -> bool {
        let (start, span) = self.span_mut(axis);
        let (first, end) = (*start, *start + *span);
        let inside = count_u32(deleted.iter().filter(|&&d| d >= first && d < end));
        if inside >= *span {
            return false;
        }
        let before = count_u32(deleted.iter().filter(|&&d| d < first));
        *span -= inside;
        *start -= before;
        true
    }
}

fn count_u32<I: Iterator>(iter: I) -> u32 {
    u32::try_from(iter.count()).unwrap_or(u32::MAX)
}

/// Ordered collection of pairwise non-overlapping merged regions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeRegionSet {
    regions: Vec<MergedRegion>,
}

impl MergeRegionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a trusted list (caller guarantees no overlaps).
    pub fn from_regions(regions: Vec<MergedRegion>) -> Self {
        Self { regions }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MergedRegion> {
        self.regions.iter()
    }

    pub fn as_slice(&self) -> &[MergedRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn push(&mut self, region: MergedRegion) {
        self.regions.push(region);
    }

    /// Region covering `(row, col)`, if any.
    pub fn region_at(&self, row: u32, col: u32) -> Option<&MergedRegion> {
        self.regions.iter().find(|r| r.contains(row, col))
    }

    /// Region anchored at `(row, col)`, if any.
    pub fn region_with_origin(&self, row: u32, col: u32) -> Option<&MergedRegion> {
        self.regions.iter().find(|r| r.is_origin(row, col))
    }

    /// Remove the region anchored at `(row, col)`.
    pub fn remove_with_origin(&mut self, row: u32, col: u32) -> Option<MergedRegion> {
        let idx = self.regions.iter().position(|r| r.is_origin(row, col))?;
        Some(self.regions.remove(idx))
    }

    /// Remove every region listed in `absorbed`.
    pub fn remove_all(&mut self, absorbed: &[MergedRegion]) {
        self.regions.retain(|r| !absorbed.contains(r));
    }

    /// First region overlapping `candidate`, ignoring regions in `ignored`.
    pub fn find_overlap(&self, candidate: &MergedRegion, ignored: &[MergedRegion]) -> Option<&MergedRegion> {
        self.regions
            .iter()
            .filter(|r| !ignored.contains(r))
            .find(|r| r.overlaps(candidate))
    }

    /// Role of `(row, col)` under the current regions.
    pub fn role_of(&self, row: u32, col: u32) -> CellRole {
        match self.region_at(row, col) {
            Some(region) if region.is_unit() => CellRole::Unit,
            Some(region) if region.is_origin(row, col) => CellRole::Master,
            Some(_) => CellRole::Slave,
            None => CellRole::Unit,
        }
    }

    /// Shift/grow every region for a row or column inserted before `index`.
    pub fn shift_for_insert(&mut self, axis: Axis, index: u32) {
        for region in &mut self.regions {
            region.shift_for_insert(axis, index);
        }
    }

    /// Remap every region for deleted rows/columns; regions that vanish or
    /// collapse to a single unit cell are dropped.
    pub fn remap_for_delete(&mut self, axis: Axis, deleted: &[u32]) {
        self.regions
            .retain_mut(|region| region.remap_for_delete(axis, deleted) && !region.is_unit());
    }

    /// True when no two regions share a unit cell.
    pub fn is_disjoint(&self) -> bool {
        self.regions.iter().enumerate().all(|(i, a)| {
            self.regions
                .iter()
                .skip(i + 1)
                .all(|b| !a.overlaps(b))
        })
    }
}

impl<'a> IntoIterator for &'a MergeRegionSet {
    type Item = &'a MergedRegion;
    type IntoIter = std::slice::Iter<'a, MergedRegion>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
