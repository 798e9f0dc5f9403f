//! Merging selections into regions and splitting them back.

use std::collections::BTreeSet;

use tracing::debug;

use super::{Change, GridLayoutEngine};
use crate::error::{LayoutError, Result};
use crate::types::{CellRole, MergedRegion, Selection};

impl GridLayoutEngine {
    /// Fuse the selected cells into one region.
    ///
    /// A selected master contributes its whole region, which is absorbed into
    /// the new one. The resulting footprint must be a gap-free rectangle that
    /// overlaps no other region. The new master keeps whatever content sat on
    /// the rectangle's origin; everything else inside the footprint is cleared.
    pub fn merge_selection(&mut self, selection: &Selection) -> Result<Change> {
        let mut candidates = BTreeSet::new();
        let mut absorbed: Vec<MergedRegion> = Vec::new();

        for (row, col) in selection.iter().filter(|&(r, c)| self.contains(r, c)) {
            match self.role_of(row, col) {
                Some(CellRole::Slave) => return Err(LayoutError::SlaveCellSelected { row, col }),
                Some(CellRole::Master) => {
                    if let Some(region) = self.regions.region_with_origin(row, col).copied() {
                        candidates.extend(region.cells());
                        absorbed.push(region);
                    }
                }
                _ => {
                    candidates.insert((row, col));
                }
            }
        }

        let region = bounding_region(&candidates)
            .ok_or_else(|| LayoutError::NoEligibleCells("nothing selected to merge".into()))?;
        if region.area() != candidates.len() as u64 {
            return Err(LayoutError::InvalidSelectionShape);
        }
        if region.is_unit() {
            return Err(LayoutError::NoEligibleCells("a merge needs at least two cells".into()));
        }
        if self.regions.find_overlap(&region, &absorbed).is_some() {
            return Err(LayoutError::OverlappingMerge);
        }

        let mut snapshot = self.snapshot();
        snapshot.clear_footprint_except_origin(&region);
        self.regions.remove_all(&absorbed);
        self.regions.push(region);
        self.rebuild(snapshot);
        debug!(?region, absorbed = absorbed.len(), "cells merged");
        Ok(Change::Structure)
    }

    /// Dissolve the region of every selected master. The former master keeps
    /// its content; other selected cells are ignored.
    pub fn split_selection(&mut self, selection: &Selection) -> Result<Change> {
        let mut masters = Vec::new();
        for (row, col) in selection.iter() {
            if self.role_of(row, col) == Some(CellRole::Master) {
                masters.push((row, col));
            } else {
                debug!(row, col, "split ignores a cell that is not a merge master");
            }
        }
        if masters.is_empty() {
            return Err(LayoutError::NoEligibleCells("no merged cells selected".into()));
        }

        let snapshot = self.snapshot();
        for &(row, col) in &masters {
            self.regions.remove_with_origin(row, col);
        }
        self.rebuild(snapshot);
        debug!(split = masters.len(), regions = self.regions.len(), "cells split");
        Ok(Change::Structure)
    }
}

/// Smallest region covering every candidate cell.
fn bounding_region(cells: &BTreeSet<(u32, u32)>) -> Option<MergedRegion> {
    let (mut min_r, mut min_c) = *cells.first()?;
    let (mut max_r, mut max_c) = (min_r, min_c);
    for &(r, c) in cells {
        min_r = min_r.min(r);
        min_c = min_c.min(c);
        max_r = max_r.max(r);
        max_c = max_c.max(c);
    }
    Some(MergedRegion::new(min_r, min_c, max_r - min_r + 1, max_c - min_c + 1))
}
