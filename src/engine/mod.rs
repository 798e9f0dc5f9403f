//! The grid layout engine.
//!
//! `GridLayoutEngine` owns the grid shape, the merged regions and the cell
//! matrix. Every structural edit follows the same protocol:
//!
//! 1. validate (nothing is touched if validation fails)
//! 2. snapshot cell contents keyed by `(row, col)`
//! 3. mutate counts, widths and regions
//! 4. rebuild the cell matrix and remap the snapshot onto it
//!
//! Mutations return a [`Change`] instead of repainting; the caller renders once
//! per successful edit.

mod adaptive;
mod merge;
mod snapshot;
mod structure;

use std::fmt;

use tracing::{debug, info};

use crate::config::EditorConfig;
use crate::error::{LayoutError, Result};
use crate::layout::{CharWidthMeasure, PageLayout, TextMeasure};
use crate::types::{cell_key, Cell, CellContent, CellRole, Disposition, MergeRegionSet, MergedRegion};
use crate::units::mm_from_pixels;

pub use snapshot::ContentSnapshot;

/// Outcome of a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Nothing to do (e.g. insertion index outside the grid).
    Unchanged,
    /// Shape, widths or merges changed and the cell matrix was rebuilt.
    Structure,
    /// A cell payload changed. `width_changed` is set when the affected
    /// column was resized and the page re-laid out.
    Content { column: u32, width_changed: bool },
}

impl Change {
    pub fn needs_render(self) -> bool {
        !matches!(self, Change::Unchanged)
    }
}

pub struct GridLayoutEngine {
    config: EditorConfig,
    name: Option<String>,
    num_rows: u32,
    num_cols: u32,
    column_widths: Vec<f32>,
    row_height: f32,
    corner_radius: f32,
    regions: MergeRegionSet,
    /// Row-major, `num_rows * num_cols` entries.
    cells: Vec<Cell>,
    layout: PageLayout,
    measure: Box<dyn TextMeasure>,
}

impl fmt::Debug for GridLayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridLayoutEngine")
            .field("num_rows", &self.num_rows)
            .field("num_cols", &self.num_cols)
            .field("column_widths", &self.column_widths)
            .field("row_height", &self.row_height)
            .field("regions", &self.regions)
            .finish_non_exhaustive()
    }
}

impl Default for GridLayoutEngine {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl GridLayoutEngine {
    /// Empty 1x1 grid, no merges, no content.
    pub fn new(config: EditorConfig) -> Self {
        let column_widths = vec![config.default_column_width];
        let regions = MergeRegionSet::new();
        let layout = PageLayout::new(&column_widths, 1, config.row_height, &regions);
        let mut engine = Self {
            name: None,
            num_rows: 1,
            num_cols: 1,
            column_widths,
            row_height: config.row_height,
            corner_radius: config.corner_radius,
            regions,
            cells: Vec::new(),
            layout,
            measure: Box::new(CharWidthMeasure),
            config,
        };
        engine.rebuild(ContentSnapshot::default());
        engine
    }

    /// Build from a persisted description. The description is sanitised
    /// first, so any input yields a valid grid.
    pub fn from_disposition(disposition: Disposition, config: EditorConfig) -> Self {
        let d = disposition.sanitized(&config);
        let mut snapshot = ContentSnapshot::default();
        for ((row, col), content) in d.contents() {
            snapshot.insert(row, col, content);
        }
        let layout = PageLayout::new(&[], 0, d.row_height, &MergeRegionSet::new());
        let mut engine = Self {
            name: d.name,
            num_rows: d.num_rows,
            num_cols: d.num_cols,
            column_widths: d.column_widths,
            row_height: d.row_height,
            corner_radius: d.corner_radius,
            regions: MergeRegionSet::from_regions(d.merged_regions),
            cells: Vec::new(),
            layout,
            measure: Box::new(CharWidthMeasure),
            config,
        };
        engine.rebuild(snapshot);
        info!(
            rows = engine.num_rows,
            cols = engine.num_cols,
            regions = engine.regions.len(),
            "disposition loaded"
        );
        engine
    }

    /// Replace the text measurer used for adaptive column widths.
    #[must_use]
    pub fn with_text_measure(mut self, measure: Box<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self
    }

    pub fn set_text_measure(&mut self, measure: Box<dyn TextMeasure>) {
        self.measure = measure;
    }

    /// Hand the text measurer over, leaving the built-in table in its place.
    pub(crate) fn take_text_measure(&mut self) -> Box<dyn TextMeasure> {
        std::mem::replace(&mut self.measure, Box::new(CharWidthMeasure))
    }

    /// Re-derive the persisted description from the current state.
    /// Only unit and master cells with content are written.
    pub fn to_disposition(&self) -> Disposition {
        let cell_contents = self
            .cells
            .iter()
            .filter(|cell| cell.role.is_visible())
            .filter_map(|cell| {
                let (kind, text) = cell.content.to_parts()?;
                Some((cell_key(cell.row, cell.col), (kind.as_str().to_string(), text)))
            })
            .collect();
        Disposition {
            name: self.name.clone(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
            column_widths: self.column_widths.clone(),
            row_height: self.row_height,
            corner_radius: self.corner_radius,
            merged_regions: self.regions.as_slice().to_vec(),
            cell_contents,
            cell_width: None,
            zones: Vec::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn num_rows(&self) -> u32 {
        self.num_rows
    }

    pub fn num_cols(&self) -> u32 {
        self.num_cols
    }

    pub fn column_widths(&self) -> &[f32] {
        &self.column_widths
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn regions(&self) -> &MergeRegionSet {
        &self.regions
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// The full cell matrix, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cell_index(row, col).and_then(|i| self.cells.get(i))
    }

    pub fn role_of(&self, row: u32, col: u32) -> Option<CellRole> {
        self.cell(row, col).map(|cell| cell.role)
    }

    pub fn content_of(&self, row: u32, col: u32) -> Option<&CellContent> {
        self.cell(row, col).map(|cell| &cell.content)
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        row < self.num_rows && col < self.num_cols
    }

    /// Page size in pixels.
    pub fn page_size(&self) -> (f32, f32) {
        (self.layout.total_width(), self.layout.total_height())
    }

    /// Page size in millimetres at the configured resolution.
    pub fn page_size_mm(&self) -> (f64, f64) {
        let (w, h) = self.page_size();
        (
            mm_from_pixels(f64::from(w), self.config.dpi),
            mm_from_pixels(f64::from(h), self.config.dpi),
        )
    }

    /// Capture the current cell contents.
    pub fn snapshot(&self) -> ContentSnapshot {
        ContentSnapshot::capture(&self.cells)
    }

    /// Check every grid invariant: width count, region bounds, disjoint
    /// regions, and cell roles agreeing with the regions.
    pub fn invariants_hold(&self) -> bool {
        self.num_rows >= 1
            && self.num_cols >= 1
            && self.column_widths.len() == self.num_cols as usize
            && self.cells.len() == self.num_rows as usize * self.num_cols as usize
            && self
                .regions
                .iter()
                .all(|r| r.fits(self.num_rows, self.num_cols) && !r.is_unit())
            && self.regions.is_disjoint()
            && self
                .cells
                .iter()
                .all(|c| c.role == self.regions.role_of(c.row, c.col))
            && self
                .cells
                .iter()
                .all(|c| c.role.is_visible() || c.content.is_empty())
    }

    fn cell_index(&self, row: u32, col: u32) -> Option<usize> {
        self.contains(row, col)
            .then(|| row as usize * self.num_cols as usize + col as usize)
    }

    fn ensure_in_bounds(&self, row: u32, col: u32) -> Result<()> {
        if self.contains(row, col) {
            Ok(())
        } else {
            Err(LayoutError::OutOfBounds { row, col })
        }
    }

    /// Tear down and rebuild the layout and cell matrix, then replay `snapshot`.
    fn rebuild(&mut self, snapshot: ContentSnapshot) {
        self.layout = PageLayout::new(&self.column_widths, self.num_rows, self.row_height, &self.regions);

        let mut cells = Vec::with_capacity(self.num_rows as usize * self.num_cols as usize);
        for row in 0..self.num_rows {
            for col in 0..self.num_cols {
                cells.push(Cell {
                    row,
                    col,
                    role: self.regions.role_of(row, col),
                    content: CellContent::None,
                    rect: self.layout.cell_rect(row, col),
                });
            }
        }
        self.cells = cells;

        for ((row, col), content) in snapshot {
            let Some(cell) = self.cell_index(row, col).and_then(|i| self.cells.get_mut(i)) else {
                debug!(row, col, "content fell outside the grid");
                continue;
            };
            if cell.role.is_visible() {
                cell.content = content;
            } else {
                debug!(row, col, "content landed on a covered cell and was dropped");
            }
        }
    }

    /// Region anchored at a visible cell, if that cell is a master.
    fn master_region(&self, row: u32, col: u32) -> Option<MergedRegion> {
        match self.role_of(row, col) {
            Some(CellRole::Master) => self.regions.region_with_origin(row, col).copied(),
            _ => None,
        }
    }
}
