//! `GridView` - the interactive front of the editor.
//!
//! This module provides the `GridView` that handles:
//! - Owning the `GridLayoutEngine` and the `SelectionController`
//! - Converting view coordinates (page offset by rulers and margin) to page space
//! - Toolbar actions (add/delete rows and columns, merge, split, set content)
//! - Painting through any `RenderBackend`, once per successful change
//!
//! On wasm32 the `web` submodule wires a canvas element to a `GridView`.

mod selection;
#[cfg(target_arch = "wasm32")]
mod web;

use std::collections::BTreeSet;

use tracing::{info, warn};

pub use selection::{DragState, SelectionController};
#[cfg(target_arch = "wasm32")]
pub use web::DispositionEditor;

use crate::config::EditorConfig;
use crate::engine::{Change, GridLayoutEngine};
use crate::error::{Axis, LayoutError, Result};
use crate::layout::TextMeasure;
use crate::render::{build_scene, RenderBackend, Scene};
use crate::types::{CellContent, Disposition};

#[derive(Debug)]
pub struct GridView {
    engine: GridLayoutEngine,
    selection: SelectionController,
    needs_render: bool,
}

impl Default for GridView {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl GridView {
    /// View over an empty 1x1 grid.
    pub fn new(config: EditorConfig) -> Self {
        Self::from_engine(GridLayoutEngine::new(config))
    }

    pub fn from_engine(engine: GridLayoutEngine) -> Self {
        let threshold = engine.config().drag_threshold;
        Self {
            engine,
            selection: SelectionController::new(threshold),
            needs_render: true,
        }
    }

    /// Replace the grid with a persisted description (leniently parsed).
    pub fn load_json(&mut self, json: &str) {
        let disposition = Disposition::from_json_lenient(json);
        let config = self.engine.config().clone();
        let mut engine = GridLayoutEngine::from_disposition(disposition, config);
        std::mem::swap(&mut self.engine, &mut engine);
        // Keep a host-supplied text measurer across loads.
        self.engine.set_text_measure(engine.take_text_measure());
        self.selection.clear();
        self.needs_render = true;
    }

    pub fn to_json(&self) -> Result<String> {
        let json = self.engine.to_disposition().to_json()?;
        info!(bytes = json.len(), "disposition saved");
        Ok(json)
    }

    pub fn engine(&self) -> &GridLayoutEngine {
        &self.engine
    }

    pub fn set_text_measure(&mut self, measure: Box<dyn TextMeasure>) {
        self.engine.set_text_measure(measure);
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// Selected coordinates, sorted row-major.
    pub fn selected_cells_coordinates(&self) -> Vec<(u32, u32)> {
        self.selection.selected_cells_coordinates()
    }

    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Logical size of the whole view (page, rulers and margins).
    pub fn view_size(&self) -> (f32, f32) {
        let (ox, oy) = self.engine.config().page_origin();
        let (w, h) = self.engine.page_size();
        let margin = self.engine.config().page_margin;
        (ox + w + margin, oy + h + margin)
    }

    fn to_page(&self, x: f32, y: f32) -> (f32, f32) {
        let (ox, oy) = self.engine.config().page_origin();
        (x - ox, y - oy)
    }

    /// Visible cell under a view-space point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<(u32, u32)> {
        let (px, py) = self.to_page(x, y);
        self.engine.layout().cell_at(px, py)
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        let hit = self.hit_test(x, y);
        let (px, py) = self.to_page(x, y);
        self.selection.pointer_down(px, py, hit);
        self.needs_render = true;
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let (px, py) = self.to_page(x, y);
        if self.selection.pointer_move(px, py, self.engine.cells()) {
            self.needs_render = true;
        }
    }

    pub fn pointer_up(&mut self) {
        if self.selection.pointer_up() {
            self.needs_render = true;
        }
    }

    pub fn add_row(&mut self) -> Result<Change> {
        let result = self.engine.add_row(self.selection.selection());
        self.finish("add row", result)
    }

    pub fn add_column(&mut self) -> Result<Change> {
        let result = self.engine.add_column(self.selection.selection());
        self.finish("add column", result)
    }

    /// Delete every row touched by the selection (whole regions for masters).
    pub fn delete_selected_rows(&mut self) -> Result<Change> {
        let rows = self.selected_indices(Axis::Row);
        let result = self.engine.delete_rows(&rows);
        self.finish("delete rows", result)
    }

    /// Delete every column touched by the selection (whole regions for masters).
    pub fn delete_selected_columns(&mut self) -> Result<Change> {
        let cols = self.selected_indices(Axis::Column);
        let result = self.engine.delete_columns(&cols);
        self.finish("delete columns", result)
    }

    pub fn merge_selected(&mut self) -> Result<Change> {
        let result = self.engine.merge_selection(self.selection.selection());
        self.finish("merge", result)
    }

    pub fn split_selected(&mut self) -> Result<Change> {
        let result = self.engine.split_selection(self.selection.selection());
        self.finish("split", result)
    }

    /// The only sanctioned way to change a cell payload from outside.
    pub fn set_cell_content(&mut self, row: u32, col: u32, content: CellContent) -> Result<Change> {
        let result = self.engine.set_cell_content(row, col, content);
        self.finish("set content", result)
    }

    /// Current frame.
    pub fn scene(&self) -> Scene {
        build_scene(&self.engine, self.selection.selection(), self.selection.marquee())
    }

    /// Repaint into `backend` and clear the dirty flag.
    pub fn render(&mut self, backend: &mut dyn RenderBackend) -> Result<()> {
        backend.render(&self.scene())?;
        self.needs_render = false;
        Ok(())
    }

    fn selected_indices(&self, axis: Axis) -> Vec<u32> {
        let mut indices = BTreeSet::new();
        for (row, col) in self.selection.selection().iter() {
            let (first, last) = match (axis, self.engine.regions().region_with_origin(row, col)) {
                (Axis::Row, Some(region)) => (region.row, region.last_row()),
                (Axis::Column, Some(region)) => (region.col, region.last_col()),
                (Axis::Row, None) => (row, row),
                (Axis::Column, None) => (col, col),
            };
            indices.extend(first..=last);
        }
        indices.into_iter().collect()
    }

    /// Log the outcome of an action; structural changes drop the selection
    /// because the cell matrix was rebuilt.
    fn finish(&mut self, action: &str, result: Result<Change>) -> Result<Change> {
        match &result {
            Ok(Change::Structure) => {
                self.selection.clear();
                self.needs_render = true;
            }
            Ok(Change::Content { .. }) => self.needs_render = true,
            Ok(Change::Unchanged) => {}
            Err(e) => log_rejection(action, e),
        }
        result
    }
}

fn log_rejection(action: &str, error: &LayoutError) {
    if error.is_notice() {
        info!(action, %error, "nothing to do");
    } else {
        warn!(action, %error, "action rejected");
    }
}
