//! Common test utilities and assertion helpers.
//!
//! Builders for engines and selections, a deterministic text measurer, and
//! assertions over the grid invariants.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

use dispogrid::layout::TextMeasure;
use dispogrid::{CellContent, CellRole, Disposition, EditorConfig, GridLayoutEngine, MergedRegion, Selection};

/// Ten pixels per character on the widest line, whatever the font size.
pub struct FixedMeasure;

impl TextMeasure for FixedMeasure {
    fn text_width(&self, text: &str, _font_size: f32) -> f32 {
        text.lines().map(|l| l.chars().count()).max().unwrap_or(0) as f32 * 10.0
    }
}

/// Engine with a `rows` x `cols` grid of default-width columns.
#[must_use]
pub fn grid(rows: u32, cols: u32) -> GridLayoutEngine {
    let d = Disposition {
        num_rows: rows,
        num_cols: cols,
        column_widths: vec![100.0; cols as usize],
        ..Disposition::default()
    };
    GridLayoutEngine::from_disposition(d, EditorConfig::default()).with_text_measure(Box::new(FixedMeasure))
}

/// Grid with `"r,c"` text in every cell.
#[must_use]
pub fn labelled_grid(rows: u32, cols: u32) -> GridLayoutEngine {
    let mut engine = grid(rows, cols);
    for r in 0..rows {
        for c in 0..cols {
            engine.set_cell_content(r, c, label(r, c)).unwrap();
        }
    }
    engine
}

#[must_use]
pub fn label(row: u32, col: u32) -> CellContent {
    CellContent::text(format!("{row},{col}"))
}

#[must_use]
pub fn sel(coords: &[(u32, u32)]) -> Selection {
    Selection::from_coords(coords.iter().copied())
}

/// Every unit cell of the rectangle `rows` x `cols` anchored at `(row, col)`.
#[must_use]
pub fn rect_sel(row: u32, col: u32, rows: u32, cols: u32) -> Selection {
    Selection::from_coords(MergedRegion::new(row, col, rows, cols).cells().collect::<Vec<_>>())
}

pub fn text_at(engine: &GridLayoutEngine, row: u32, col: u32) -> Option<String> {
    engine
        .content_of(row, col)
        .and_then(CellContent::as_text)
        .map(str::to_string)
}

/// Check every grid invariant and that roles match the regions cell by cell.
pub fn assert_invariants(engine: &GridLayoutEngine) {
    assert!(engine.invariants_hold(), "grid invariants violated: {engine:?}");
    assert_eq!(engine.column_widths().len(), engine.num_cols() as usize);
    for region in engine.regions() {
        for (r, c) in region.cells() {
            let expected = if region.is_origin(r, c) {
                CellRole::Master
            } else {
                CellRole::Slave
            };
            assert_eq!(engine.role_of(r, c), Some(expected), "cell ({r}, {c}) in {region:?}");
        }
    }
    let regions: Vec<_> = engine.regions().iter().collect();
    for (i, a) in regions.iter().enumerate() {
        for b in regions.iter().skip(i + 1) {
            assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
        }
    }
}
