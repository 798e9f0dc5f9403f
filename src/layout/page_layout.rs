//! Pre-computed geometry for a disposition page.
//!
//! Positions are computed once per structural edit so hit testing is a
//! binary search and grid-line suppression is a table lookup.

use std::collections::HashMap;

use crate::types::MergeRegionSet;

/// Axis-aligned rectangle in page or view space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized rectangle spanned by two corner points.
    pub fn from_points(a: (f32, f32), b: (f32, f32)) -> Self {
        Self {
            x: a.0.min(b.0),
            y: a.1.min(b.1),
            width: (a.0 - b.0).abs(),
            height: (a.1 - b.1).abs(),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Overlap with positive area; rectangles that only touch do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }

    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Information about a merged cell region
#[derive(Debug, Clone, PartialEq)]
pub struct MergeInfo {
    /// True if this cell is the top-left origin of the merge
    pub is_origin: bool,
    /// Row of the merge origin
    pub origin_row: u32,
    /// Column of the merge origin
    pub origin_col: u32,
    /// Number of rows in the merge
    pub row_span: u32,
    /// Number of columns in the merge
    pub col_span: u32,
}

/// Rectangle representing a cell's bounds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellRect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    /// Width of the cell
    pub width: f32,
    /// Height of the cell
    pub height: f32,
    /// True if this cell should be skipped (part of merge but not origin)
    pub skip: bool,
}

impl CellRect {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Pre-computed layout data for a page
#[derive(Debug, Clone)]
pub struct PageLayout {
    /// Cumulative column positions (`col_positions[i]` = x of column i's left edge)
    pub col_positions: Vec<f32>,
    /// Cumulative row positions (`row_positions[i]` = y of row i's top edge)
    pub row_positions: Vec<f32>,
    /// Column widths
    pub col_widths: Vec<f32>,
    /// Uniform row height
    pub row_height: f32,
    /// Merge info lookup by (row, col)
    pub merges: HashMap<(u32, u32), MergeInfo>,
    /// Skip ranges (row ranges) for vertical grid lines, indexed by column boundary
    pub merge_vline_skips: Vec<Vec<(u32, u32)>>,
    /// Skip ranges (column ranges) for horizontal grid lines, indexed by row boundary
    pub merge_hline_skips: Vec<Vec<(u32, u32)>>,
    pub num_rows: u32,
    pub num_cols: u32,
}

impl PageLayout {
    /// Create a new layout from the grid shape.
    pub fn new(column_widths: &[f32], num_rows: u32, row_height: f32, regions: &MergeRegionSet) -> Self {
        let num_cols = u32::try_from(column_widths.len()).unwrap_or(u32::MAX);

        let mut col_positions = Vec::with_capacity(column_widths.len() + 1);
        let mut x: f32 = 0.0;
        for &w in column_widths {
            col_positions.push(x);
            x += w;
        }
        col_positions.push(x); // Final edge

        let mut row_positions = Vec::with_capacity(num_rows as usize + 1);
        let mut y: f32 = 0.0;
        for _ in 0..num_rows {
            row_positions.push(y);
            y += row_height;
        }
        row_positions.push(y); // Final edge

        // Build merge map
        let mut merges = HashMap::new();
        for region in regions {
            for (r, c) in region.cells() {
                merges.insert(
                    (r, c),
                    MergeInfo {
                        is_origin: region.is_origin(r, c),
                        origin_row: region.row,
                        origin_col: region.col,
                        row_span: region.rowspan,
                        col_span: region.colspan,
                    },
                );
            }
        }

        let mut merge_vline_skips: Vec<Vec<(u32, u32)>> = vec![Vec::new(); num_cols as usize + 1];
        let mut merge_hline_skips: Vec<Vec<(u32, u32)>> = vec![Vec::new(); num_rows as usize + 1];

        for region in regions {
            let end_row = region.last_row();
            let end_col = region.last_col();
            if region.col < end_col {
                for col in (region.col + 1)..=end_col {
                    if let Some(list) = merge_vline_skips.get_mut(col as usize) {
                        list.push((region.row, end_row + 1));
                    }
                }
            }
            if region.row < end_row {
                for row in (region.row + 1)..=end_row {
                    if let Some(list) = merge_hline_skips.get_mut(row as usize) {
                        list.push((region.col, end_col + 1));
                    }
                }
            }
        }

        for ranges in &mut merge_vline_skips {
            merge_skip_ranges(ranges);
        }
        for ranges in &mut merge_hline_skips {
            merge_skip_ranges(ranges);
        }

        PageLayout {
            col_positions,
            row_positions,
            col_widths: column_widths.to_vec(),
            row_height,
            merges,
            merge_vline_skips,
            merge_hline_skips,
            num_rows,
            num_cols,
        }
    }

    /// Get cell bounds in page coordinates
    pub fn cell_rect(&self, row: u32, col: u32) -> CellRect {
        let x = self.col_positions.get(col as usize).copied().unwrap_or(0.0);
        let y = self.row_positions.get(row as usize).copied().unwrap_or(0.0);
        let mut w = self.col_widths.get(col as usize).copied().unwrap_or(0.0);
        let mut h = self.row_height;

        if let Some(merge) = self.merges.get(&(row, col)) {
            if !merge.is_origin {
                return CellRect {
                    x,
                    y,
                    width: w,
                    height: h,
                    skip: true,
                };
            }
            // Calculate merged size
            let end_col = col + merge.col_span;
            let end_row = row + merge.row_span;
            w = self
                .col_positions
                .get(end_col as usize)
                .copied()
                .unwrap_or(x)
                - x;
            h = self
                .row_positions
                .get(end_row as usize)
                .copied()
                .unwrap_or(y)
                - y;
        }

        CellRect {
            x,
            y,
            width: w,
            height: h,
            skip: false,
        }
    }

    /// Find row at y position (binary search)
    pub fn row_at_y(&self, y: f32) -> Option<u32> {
        if y < 0.0 || y >= self.total_height() {
            return None;
        }
        match self
            .row_positions
            .binary_search_by(|pos| pos.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal))
        {
            Ok(i) => u32::try_from(i).ok(),
            Err(i) => u32::try_from(i.saturating_sub(1)).ok(),
        }
    }

    /// Find column at x position (binary search)
    pub fn col_at_x(&self, x: f32) -> Option<u32> {
        if x < 0.0 || x >= self.total_width() {
            return None;
        }
        match self
            .col_positions
            .binary_search_by(|pos| pos.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal))
        {
            Ok(i) => u32::try_from(i).ok(),
            Err(i) => u32::try_from(i.saturating_sub(1)).ok(),
        }
    }

    /// Visible cell under a page-space point; covered cells resolve to their master.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(u32, u32)> {
        let row = self.row_at_y(y)?;
        let col = self.col_at_x(x)?;
        match self.merges.get(&(row, col)) {
            Some(merge) => Some((merge.origin_row, merge.origin_col)),
            None => Some((row, col)),
        }
    }

    /// Get total width of the page
    pub fn total_width(&self) -> f32 {
        self.col_positions.last().copied().unwrap_or(0.0)
    }

    /// Get total height of the page
    pub fn total_height(&self) -> f32 {
        self.row_positions.last().copied().unwrap_or(0.0)
    }

    /// Get column width at index
    pub fn col_width(&self, col: u32) -> f32 {
        self.col_widths.get(col as usize).copied().unwrap_or(0.0)
    }

    /// Page-space segments `(y1, y2)` of the vertical line at column boundary `col`.
    pub fn vline_segments(&self, col: u32) -> Vec<(f32, f32)> {
        let skips = self
            .merge_vline_skips
            .get(col as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        segments(&self.row_positions, self.num_rows, skips)
    }

    /// Page-space segments `(x1, x2)` of the horizontal line at row boundary `row`.
    pub fn hline_segments(&self, row: u32) -> Vec<(f32, f32)> {
        let skips = self
            .merge_hline_skips
            .get(row as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        segments(&self.col_positions, self.num_cols, skips)
    }
}

/// Split `0..count` into drawn index ranges around `skips` and map them to positions.
fn segments(positions: &[f32], count: u32, skips: &[(u32, u32)]) -> Vec<(f32, f32)> {
    let pos = |i: u32| positions.get(i as usize).copied().unwrap_or(0.0);
    let mut out = Vec::new();
    let mut start = 0u32;
    for &(skip_start, skip_end) in skips {
        if skip_start > start {
            out.push((pos(start), pos(skip_start)));
        }
        start = start.max(skip_end);
    }
    if start < count {
        out.push((pos(start), pos(count)));
    }
    out
}

fn merge_skip_ranges(ranges: &mut Vec<(u32, u32)>) {
    if ranges.len() <= 1 {
        return;
    }

    ranges.sort_by_key(|r| r.0);
    let mut merged: Vec<(u32, u32)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges.drain(..) {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                if end > last.1 {
                    last.1 = end;
                }
                continue;
            }
        }
        merged.push((start, end));
    }
    *ranges = merged;
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::MergedRegion;

    fn grid(widths: &[f32], rows: u32, regions: Vec<MergedRegion>) -> PageLayout {
        PageLayout::new(widths, rows, 50.0, &MergeRegionSet::from_regions(regions))
    }

    #[test]
    fn test_basic_layout() {
        let layout = grid(&[100.0, 150.0, 100.0], 2, vec![]);
        assert_eq!(layout.total_width(), 350.0);
        assert_eq!(layout.total_height(), 100.0);
        assert_eq!(layout.col_positions, vec![0.0, 100.0, 250.0, 350.0]);
    }

    #[test]
    fn test_cell_rect() {
        let layout = grid(&[100.0, 150.0, 100.0], 2, vec![]);
        let rect = layout.cell_rect(1, 2);
        assert_eq!(rect.x, 250.0);
        assert_eq!(rect.y, 50.0);
        assert_eq!(rect.width, 100.0);
        assert_eq!(rect.height, 50.0);
        assert!(!rect.skip);
    }

    #[test]
    fn test_merged_cells() {
        let layout = grid(&[100.0, 150.0, 100.0], 3, vec![MergedRegion::new(0, 0, 2, 2)]);

        // Origin cell should have full merged dimensions
        let rect = layout.cell_rect(0, 0);
        assert!(!rect.skip);
        assert_eq!(rect.width, 250.0);
        assert_eq!(rect.height, 100.0);

        // Non-origin cells should be skipped
        assert!(layout.cell_rect(0, 1).skip);
        assert!(layout.cell_rect(1, 0).skip);
        assert!(layout.cell_rect(1, 1).skip);
        assert!(!layout.cell_rect(2, 2).skip);
    }

    #[test]
    fn test_hit_testing() {
        let layout = grid(&[100.0, 150.0], 2, vec![MergedRegion::new(0, 0, 2, 1)]);
        assert_eq!(layout.row_at_y(0.0), Some(0));
        assert_eq!(layout.row_at_y(50.0), Some(1));
        assert_eq!(layout.row_at_y(100.0), None);
        assert_eq!(layout.col_at_x(99.9), Some(0));
        assert_eq!(layout.col_at_x(100.0), Some(1));
        assert_eq!(layout.col_at_x(-1.0), None);
        // Covered cell resolves to its master
        assert_eq!(layout.cell_at(10.0, 75.0), Some((0, 0)));
        assert_eq!(layout.cell_at(120.0, 75.0), Some((1, 1)));
        assert_eq!(layout.cell_at(400.0, 75.0), None);
    }

    #[test]
    fn test_grid_lines_skip_merge_interiors() {
        let layout = grid(
            &[100.0, 100.0, 100.0],
            3,
            vec![MergedRegion::new(0, 0, 2, 2)],
        );
        // Column boundary 1 is interior to the merge for rows 0..2
        assert_eq!(layout.vline_segments(1), vec![(100.0, 150.0)]);
        assert_eq!(layout.vline_segments(2), vec![(0.0, 150.0)]);
        // Row boundary 1 is interior for cols 0..2
        assert_eq!(layout.hline_segments(1), vec![(200.0, 300.0)]);
        assert_eq!(layout.hline_segments(2), vec![(0.0, 300.0)]);
    }

    #[test]
    fn test_fully_covered_line_has_no_segments() {
        let layout = grid(&[100.0, 100.0], 1, vec![MergedRegion::new(0, 0, 1, 2)]);
        assert!(layout.vline_segments(1).is_empty());
    }

    #[test]
    fn test_skip_ranges_are_merged() {
        let mut ranges = vec![(3, 5), (0, 2), (2, 4)];
        merge_skip_ranges(&mut ranges);
        assert_eq!(ranges, vec![(0, 5)]);
    }

    #[test]
    fn test_marquee_intersection_excludes_touching_edges() {
        let cell = Rect::new(100.0, 0.0, 100.0, 50.0);
        assert!(!Rect::new(0.0, 0.0, 100.0, 50.0).intersects(&cell));
        assert!(Rect::new(0.0, 0.0, 100.5, 50.0).intersects(&cell));
        assert_eq!(
            Rect::from_points((30.0, 40.0), (10.0, 5.0)),
            Rect::new(10.0, 5.0, 20.0, 35.0)
        );
    }
}
