//! Click and rubber-band selection.
//!
//! Coordinates are page-space pixels; the view strips its own offsets before
//! forwarding pointer events.

use crate::layout::Rect;
use crate::types::{Cell, Selection};

/// Pointer interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Press {
    origin: (f32, f32),
    cell: Option<(u32, u32)>,
}

/// Tracks the selected cells and the drag marquee.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selection: Selection,
    state: DragState,
    press: Option<Press>,
    pointer: (f32, f32),
    /// Manhattan distance the pointer must exceed before a press becomes a drag.
    threshold: f32,
}

impl SelectionController {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Selected coordinates, sorted row-major.
    pub fn selected_cells_coordinates(&self) -> Vec<(u32, u32)> {
        self.selection.coordinates()
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    /// Pointer pressed. `hit` is the visible cell under the pointer, if any.
    /// A press on a cell selects exactly that cell; a press on empty space
    /// clears the selection.
    pub fn pointer_down(&mut self, x: f32, y: f32, hit: Option<(u32, u32)>) {
        self.selection.clear();
        if let Some((row, col)) = hit {
            self.selection.insert(row, col);
        }
        self.press = Some(Press {
            origin: (x, y),
            cell: hit,
        });
        self.pointer = (x, y);
        self.state = DragState::Idle;
    }

    /// Pointer moved. While dragging, every visible cell whose bounds
    /// intersect the marquee is selected and every other one deselected.
    /// Returns `true` when the selection or marquee changed.
    pub fn pointer_move(&mut self, x: f32, y: f32, cells: &[Cell]) -> bool {
        let Some(press) = self.press else {
            return false;
        };
        self.pointer = (x, y);

        if self.state == DragState::Idle {
            let distance = (x - press.origin.0).abs() + (y - press.origin.1).abs();
            if distance <= self.threshold {
                return false;
            }
            self.state = DragState::Dragging;
            self.selection.clear();
        }

        let marquee = Rect::from_points(press.origin, (x, y));
        for cell in cells.iter().filter(|c| c.role.is_visible()) {
            if marquee.intersects(&cell.rect.bounds()) {
                self.selection.insert(cell.row, cell.col);
            } else {
                self.selection.remove(cell.row, cell.col);
            }
        }
        true
    }

    /// Pointer released. Ends a drag, leaving the final selection in place.
    /// Returns `true` when a drag ended.
    pub fn pointer_up(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        self.press = None;
        was_dragging
    }

    /// Cell the current press started on.
    pub fn pressed_cell(&self) -> Option<(u32, u32)> {
        self.press.and_then(|p| p.cell)
    }

    /// Marquee rectangle, only while dragging.
    pub fn marquee(&self) -> Option<Rect> {
        match (self.state, self.press) {
            (DragState::Dragging, Some(press)) => Some(Rect::from_points(press.origin, self.pointer)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::engine::GridLayoutEngine;
    use crate::types::Disposition;

    fn engine_3x3() -> GridLayoutEngine {
        let d = Disposition {
            num_rows: 3,
            num_cols: 3,
            column_widths: vec![100.0; 3],
            ..Disposition::default()
        };
        GridLayoutEngine::from_disposition(d, EditorConfig::default())
    }

    #[test]
    fn click_selects_exactly_one_cell() {
        let engine = engine_3x3();
        let mut ctl = SelectionController::new(10.0);
        ctl.pointer_down(10.0, 10.0, Some((0, 0)));
        ctl.pointer_up();
        ctl.pointer_down(150.0, 60.0, Some((1, 1)));
        assert!(!ctl.pointer_move(152.0, 62.0, engine.cells()));
        ctl.pointer_up();
        assert_eq!(ctl.selected_cells_coordinates(), vec![(1, 1)]);
        assert_eq!(ctl.state(), DragState::Idle);
    }

    #[test]
    fn drag_starts_only_beyond_threshold() {
        let engine = engine_3x3();
        let mut ctl = SelectionController::new(10.0);
        ctl.pointer_down(50.0, 25.0, Some((0, 0)));
        assert!(!ctl.pointer_move(56.0, 29.0, engine.cells()));
        assert_eq!(ctl.state(), DragState::Idle);
        assert!(ctl.pointer_move(56.0, 30.0, engine.cells()));
        assert!(ctl.is_dragging());
    }

    #[test]
    fn drag_selects_intersecting_cells() {
        let engine = engine_3x3();
        let mut ctl = SelectionController::new(10.0);
        ctl.pointer_down(50.0, 25.0, Some((0, 0)));
        assert!(ctl.pointer_move(150.0, 75.0, engine.cells()));
        assert!(ctl.is_dragging());
        assert_eq!(ctl.selected_cells_coordinates(), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);

        // Shrinking the marquee drops cells again
        ctl.pointer_move(90.0, 40.0, engine.cells());
        assert_eq!(ctl.selected_cells_coordinates(), vec![(0, 0)]);

        assert!(ctl.pointer_up());
        assert_eq!(ctl.selected_cells_coordinates(), vec![(0, 0)]);
        assert!(ctl.marquee().is_none());
    }

    #[test]
    fn drag_skips_covered_cells() {
        let mut engine = engine_3x3();
        engine
            .merge_selection(&Selection::from_coords([(0, 0), (0, 1)]))
            .unwrap();
        let mut ctl = SelectionController::new(10.0);
        ctl.pointer_down(250.0, 10.0, Some((0, 2)));
        ctl.pointer_move(150.0, 20.0, engine.cells());
        assert_eq!(ctl.selected_cells_coordinates(), vec![(0, 0), (0, 2)]);
    }

    #[test]
    fn press_on_empty_space_clears() {
        let mut ctl = SelectionController::new(10.0);
        ctl.set_selection(Selection::from_coords([(0, 0), (2, 2)]));
        ctl.pointer_down(-5.0, -5.0, None);
        ctl.pointer_up();
        assert!(ctl.selection().is_empty());
    }

    #[test]
    fn move_without_press_is_ignored() {
        let engine = engine_3x3();
        let mut ctl = SelectionController::new(10.0);
        assert!(!ctl.pointer_move(200.0, 100.0, engine.cells()));
        assert!(!ctl.pointer_up());
    }
}
