//! Content writes and content-driven column widths.

use tracing::debug;

use super::{Change, GridLayoutEngine};
use crate::error::{LayoutError, Result};
use crate::types::{CellContent, CellRole};

impl GridLayoutEngine {
    /// Write a cell payload. Covered cells are refused. The affected column
    /// (the cell's own, or the last column of its region for a master) is
    /// resized to fit, and the page re-laid out if its width changed. A
    /// master also rechecks its origin column.
    pub fn set_cell_content(&mut self, row: u32, col: u32, content: CellContent) -> Result<Change> {
        self.ensure_in_bounds(row, col)?;
        let (origin_col, column) = match self.master_region(row, col) {
            Some(region) => (region.col, region.last_col()),
            None if self.role_of(row, col) == Some(CellRole::Slave) => {
                return Err(LayoutError::SlaveCellWrite { row, col });
            }
            None => (col, col),
        };
        let Some(cell) = self.cell_index(row, col).and_then(|i| self.cells.get_mut(i)) else {
            return Err(LayoutError::OutOfBounds { row, col });
        };
        cell.content = content;

        // The origin column may still be sized for text the cell held
        // before it became a master.
        let mut width_changed =
            origin_col != column && self.recompute_adaptive_column_width(origin_col);
        width_changed |= self.recompute_adaptive_column_width(column);
        if width_changed {
            let snapshot = self.snapshot();
            self.rebuild(snapshot);
        }
        debug!(row, col, column, width_changed, "cell content set");
        Ok(Change::Content { column, width_changed })
    }

    /// Resize `col` to the widest text requirement among cells ending in it,
    /// never below the configured minimum. Only the width vector is touched;
    /// callers rebuild the layout when this returns `true`.
    pub fn recompute_adaptive_column_width(&mut self, col: u32) -> bool {
        let Some(&current) = self.column_widths.get(col as usize) else {
            return false;
        };
        let font_size = self.config.font_size;
        let margin = self.config.text_margin;
        let mut width = self.config.min_column_width;

        for row in 0..self.num_rows {
            let Some(cell) = self.cell(row, col) else {
                continue;
            };
            if cell.role != CellRole::Unit {
                continue;
            }
            if let Some(text) = cell.content.as_text() {
                width = width.max(self.measure.text_width(text, font_size) + margin);
            }
        }

        for region in self.regions.iter().filter(|r| r.last_col() == col) {
            let Some(text) = self.content_of(region.row, region.col).and_then(CellContent::as_text) else {
                continue;
            };
            let others: f32 = (region.col..col)
                .filter_map(|c| self.column_widths.get(c as usize))
                .sum();
            width = width.max(self.measure.text_width(text, font_size) + margin - others);
        }

        if (width - current).abs() < f32::EPSILON {
            return false;
        }
        if let Some(slot) = self.column_widths.get_mut(col as usize) {
            *slot = width;
        }
        debug!(col, from = current, to = width, "adaptive column width");
        true
    }

    /// Recompute every column and re-lay out once if anything changed.
    pub fn recompute_all_adaptive_widths(&mut self) -> Change {
        let mut changed = false;
        for col in 0..self.num_cols {
            changed |= self.recompute_adaptive_column_width(col);
        }
        if !changed {
            return Change::Unchanged;
        }
        let snapshot = self.snapshot();
        self.rebuild(snapshot);
        Change::Structure
    }
}
