//! Row and column insertion/deletion.

use tracing::debug;

use super::{Change, GridLayoutEngine};
use crate::error::{Axis, LayoutError, Result};
use crate::types::Selection;

impl GridLayoutEngine {
    /// Append a column, or insert one right after the highest selected column.
    pub fn add_column(&mut self, selection: &Selection) -> Result<Change> {
        let index = self
            .insertion_anchor(selection, Axis::Column)
            .map_or(self.num_cols, |last| last + 1);
        self.insert_column_before(index)
    }

    /// Append a row, or insert one right after the highest selected row.
    pub fn add_row(&mut self, selection: &Selection) -> Result<Change> {
        let index = self
            .insertion_anchor(selection, Axis::Row)
            .map_or(self.num_rows, |last| last + 1);
        self.insert_row_before(index)
    }

    /// Insert a default-width column before `index`. Regions straddling the
    /// insertion point grow; regions at or after it shift right.
    pub fn insert_column_before(&mut self, index: u32) -> Result<Change> {
        if index > self.num_cols {
            debug!(index, num_cols = self.num_cols, "column insertion index outside grid");
            return Ok(Change::Unchanged);
        }
        let mut snapshot = self.snapshot();
        self.column_widths
            .insert(index as usize, self.config.default_column_width);
        self.num_cols += 1;
        self.regions.shift_for_insert(Axis::Column, index);
        snapshot.shift_for_insert(Axis::Column, index);
        self.rebuild(snapshot);
        debug!(index, num_cols = self.num_cols, "column inserted");
        Ok(Change::Structure)
    }

    /// Insert a row before `index`. Rows share one height, so only the count
    /// and the regions change.
    pub fn insert_row_before(&mut self, index: u32) -> Result<Change> {
        if index > self.num_rows {
            debug!(index, num_rows = self.num_rows, "row insertion index outside grid");
            return Ok(Change::Unchanged);
        }
        let mut snapshot = self.snapshot();
        self.num_rows += 1;
        self.regions.shift_for_insert(Axis::Row, index);
        snapshot.shift_for_insert(Axis::Row, index);
        self.rebuild(snapshot);
        debug!(index, num_rows = self.num_rows, "row inserted");
        Ok(Change::Structure)
    }

    /// Delete every listed column. Indices outside the grid are ignored and
    /// duplicates collapse; the last remaining column is never removed.
    pub fn delete_columns(&mut self, indices: &[u32]) -> Result<Change> {
        let deleted = self.validate_deletion(indices, Axis::Column)?;
        let mut snapshot = self.snapshot();
        // Highest first so earlier indices stay valid.
        for &col in deleted.iter().rev() {
            self.column_widths.remove(col as usize);
        }
        self.num_cols -= len_u32(&deleted);
        self.regions.remap_for_delete(Axis::Column, &deleted);
        snapshot.remap_for_delete(Axis::Column, &deleted);
        self.rebuild(snapshot);
        debug!(?deleted, num_cols = self.num_cols, regions = self.regions.len(), "columns deleted");
        Ok(Change::Structure)
    }

    /// Delete every listed row, with the same rules as [`Self::delete_columns`].
    pub fn delete_rows(&mut self, indices: &[u32]) -> Result<Change> {
        let deleted = self.validate_deletion(indices, Axis::Row)?;
        let mut snapshot = self.snapshot();
        self.num_rows -= len_u32(&deleted);
        self.regions.remap_for_delete(Axis::Row, &deleted);
        snapshot.remap_for_delete(Axis::Row, &deleted);
        self.rebuild(snapshot);
        debug!(?deleted, num_rows = self.num_rows, regions = self.regions.len(), "rows deleted");
        Ok(Change::Structure)
    }

    /// Set an explicit column width, clamped to the configured minimum.
    pub fn set_column_width(&mut self, col: u32, width: f32) -> Result<Change> {
        self.ensure_in_bounds(0, col)?;
        if !width.is_finite() {
            return Ok(Change::Unchanged);
        }
        let width = width.max(self.config.min_column_width);
        let Some(slot) = self.column_widths.get_mut(col as usize) else {
            return Err(LayoutError::OutOfBounds { row: 0, col });
        };
        if (*slot - width).abs() < f32::EPSILON {
            return Ok(Change::Unchanged);
        }
        *slot = width;
        let snapshot = self.snapshot();
        self.rebuild(snapshot);
        debug!(col, width, "column width set");
        Ok(Change::Structure)
    }

    /// Highest selected index along `axis`, extended to the far edge of any
    /// selected master's region. `None` when nothing in the grid is selected.
    fn insertion_anchor(&self, selection: &Selection, axis: Axis) -> Option<u32> {
        selection
            .iter()
            .filter(|&(r, c)| self.contains(r, c))
            .map(|(r, c)| {
                let region = self.master_region(r, c);
                match axis {
                    Axis::Row => region.map_or(r, |reg| reg.last_row()),
                    Axis::Column => region.map_or(c, |reg| reg.last_col()),
                }
            })
            .max()
    }

    /// Sorted, unique, in-range indices, or the reason the deletion is refused.
    fn validate_deletion(&self, indices: &[u32], axis: Axis) -> Result<Vec<u32>> {
        let count = match axis {
            Axis::Row => self.num_rows,
            Axis::Column => self.num_cols,
        };
        let mut deleted: Vec<u32> = indices.iter().copied().filter(|&i| i < count).collect();
        deleted.sort_unstable();
        deleted.dedup();
        if deleted.is_empty() {
            return Err(LayoutError::NoEligibleCells(format!("no {axis}s selected for deletion")));
        }
        if len_u32(&deleted) >= count {
            return Err(LayoutError::StructuralFloor(axis));
        }
        Ok(deleted)
    }
}

fn len_u32(items: &[u32]) -> u32 {
    u32::try_from(items.len()).unwrap_or(u32::MAX)
}
