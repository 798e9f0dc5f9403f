//! Columns that grow (and shrink back) to fit their text.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{grid, rect_sel, FixedMeasure};
use dispogrid::layout::{CharWidthMeasure, TextMeasure};
use dispogrid::{
    CellContent, Change, Disposition, EditorConfig, GridLayoutEngine, LayoutError,
};

#[test]
fn hello_world_column_fits_its_text() {
    let d = Disposition {
        num_rows: 1,
        num_cols: 3,
        column_widths: vec![100.0; 3],
        ..Disposition::default()
    };
    let mut engine = GridLayoutEngine::from_disposition(d, EditorConfig::default());
    engine.set_cell_content(0, 2, CellContent::text("HELLO WORLD")).unwrap();

    let config = EditorConfig::default();
    let needed = CharWidthMeasure.text_width("HELLO WORLD", config.font_size) + config.text_margin;
    let width = engine.column_widths()[2];
    assert!(width >= needed, "{width} < {needed}");
    assert!(width >= config.min_column_width);
    assert_eq!(&engine.column_widths()[..2], &[100.0, 100.0]);
}

#[test]
fn explicit_recompute_matches_content_write() {
    let mut engine = grid(1, 3);
    engine.set_cell_content(0, 2, CellContent::text("HELLO WORLD HELLO")).unwrap();
    let after_write = engine.column_widths()[2];
    assert!(!engine.recompute_adaptive_column_width(2));
    assert_eq!(engine.column_widths()[2], after_write);
    assert_eq!(after_write, 186.0);
}

#[test]
fn write_reports_width_change_and_relays_out() {
    let mut engine = grid(2, 2);
    let change = engine.set_cell_content(1, 1, CellContent::text("ABCDEFGHIJKLMNOPQRST")).unwrap();
    assert_eq!(
        change,
        Change::Content {
            column: 1,
            width_changed: true
        }
    );
    assert_eq!(engine.column_widths(), &[100.0, 216.0]);
    assert_eq!(engine.page_size(), (316.0, 100.0));
    assert_eq!(engine.cell(0, 1).unwrap().rect.width, 216.0);

    let change = engine.set_cell_content(0, 0, CellContent::text("A")).unwrap();
    assert_eq!(
        change,
        Change::Content {
            column: 0,
            width_changed: false
        }
    );
}

#[test]
fn column_shrinks_back_to_minimum() {
    let mut engine = grid(1, 1);
    engine.set_cell_content(0, 0, CellContent::text("X".repeat(30))).unwrap();
    assert_eq!(engine.column_widths(), &[316.0]);
    engine.set_cell_content(0, 0, CellContent::text("short")).unwrap();
    assert_eq!(engine.column_widths(), &[100.0]);
    engine.set_cell_content(0, 0, CellContent::text("X".repeat(30))).unwrap();
    engine.set_cell_content(0, 0, CellContent::None).unwrap();
    assert_eq!(engine.column_widths(), &[100.0]);
}

#[test]
fn widest_text_in_column_wins() {
    let mut engine = grid(3, 1);
    engine.set_cell_content(0, 0, CellContent::text("X".repeat(12))).unwrap();
    engine.set_cell_content(1, 0, CellContent::text("X".repeat(20))).unwrap();
    engine.set_cell_content(2, 0, CellContent::text("X".repeat(15))).unwrap();
    assert_eq!(engine.column_widths(), &[216.0]);
    // Shortening a narrower cell keeps the widest requirement
    engine.set_cell_content(0, 0, CellContent::text("X")).unwrap();
    assert_eq!(engine.column_widths(), &[216.0]);
}

#[test]
fn multi_line_text_uses_widest_line() {
    let mut engine = grid(1, 1);
    engine
        .set_cell_content(0, 0, CellContent::text("AB\nABCDEFGHIJKLMNOP\nA"))
        .unwrap();
    assert_eq!(engine.column_widths(), &[176.0]);
}

#[test]
fn images_do_not_size_columns() {
    let mut engine = grid(1, 1);
    engine
        .set_cell_content(0, 0, CellContent::image("a-very-long-asset-name-that-is-not-text.png"))
        .unwrap();
    assert_eq!(engine.column_widths(), &[100.0]);
}

#[test]
fn master_text_sizes_last_column_of_region() {
    let mut engine = grid(1, 2);
    engine.merge_selection(&rect_sel(0, 0, 1, 2)).unwrap();
    let change = engine.set_cell_content(0, 0, CellContent::text("X".repeat(25))).unwrap();
    assert_eq!(
        change,
        Change::Content {
            column: 1,
            width_changed: true
        }
    );
    // 250 + 16 needed across both columns, column 0 already gives 100
    assert_eq!(engine.column_widths(), &[100.0, 166.0]);
    assert_eq!(engine.cell(0, 0).unwrap().rect.width, 266.0);
    assert!(!engine.recompute_adaptive_column_width(0));
}

#[test]
fn master_write_releases_width_held_by_origin_column() {
    let mut engine = grid(1, 2);
    engine.set_cell_content(0, 0, CellContent::text("X".repeat(25))).unwrap();
    assert_eq!(engine.column_widths(), &[266.0, 100.0]);

    engine.merge_selection(&rect_sel(0, 0, 1, 2)).unwrap();
    assert_eq!(engine.column_widths(), &[266.0, 100.0]);

    let change = engine.set_cell_content(0, 0, CellContent::text("X".repeat(25))).unwrap();
    assert_eq!(
        change,
        Change::Content {
            column: 1,
            width_changed: true
        }
    );
    assert_eq!(engine.column_widths(), &[100.0, 166.0]);
    assert_eq!(engine.cell(0, 0).unwrap().rect.width, 266.0);
}

#[test]
fn region_that_fits_already_keeps_minimum() {
    let mut engine = grid(1, 3);
    engine.merge_selection(&rect_sel(0, 0, 1, 3)).unwrap();
    engine.set_cell_content(0, 0, CellContent::text("X".repeat(25))).unwrap();
    assert_eq!(engine.column_widths(), &[100.0, 100.0, 100.0]);
}

#[test]
fn covered_cells_refuse_content() {
    let mut engine = grid(2, 2);
    engine.merge_selection(&rect_sel(0, 0, 2, 2)).unwrap();
    let err = engine.set_cell_content(1, 1, CellContent::text("nope")).unwrap_err();
    assert!(matches!(err, LayoutError::SlaveCellWrite { row: 1, col: 1 }));
    assert_eq!(engine.content_of(1, 1), Some(&CellContent::None));
}

#[test]
fn writes_outside_grid_are_refused() {
    let mut engine = grid(2, 2);
    assert!(matches!(
        engine.set_cell_content(2, 0, CellContent::text("x")),
        Err(LayoutError::OutOfBounds { row: 2, col: 0 })
    ));
}

#[test]
fn loaded_text_is_sized_on_demand() {
    let json = r#"{
        "num_rows": 1, "num_cols": 2, "column_widths": [100, 100],
        "cell_contents": {"(0,1)": ["text", "XXXXXXXXXXXXXXXXXXXX"]}
    }"#;
    let mut engine = GridLayoutEngine::from_disposition(
        Disposition::from_json(json).unwrap(),
        EditorConfig::default(),
    )
    .with_text_measure(Box::new(FixedMeasure));
    // Loading keeps the persisted widths
    assert_eq!(engine.column_widths(), &[100.0, 100.0]);
    assert_eq!(engine.recompute_all_adaptive_widths(), Change::Structure);
    assert_eq!(engine.column_widths(), &[100.0, 216.0]);
    assert_eq!(engine.recompute_all_adaptive_widths(), Change::Unchanged);
}

#[test]
fn configured_margin_and_minimum_apply() {
    let config = EditorConfig {
        min_column_width: 40.0,
        text_margin: 4.0,
        ..EditorConfig::default()
    };
    let d = Disposition {
        num_rows: 1,
        num_cols: 1,
        column_widths: vec![40.0],
        ..Disposition::default()
    };
    let mut engine =
        GridLayoutEngine::from_disposition(d, config).with_text_measure(Box::new(FixedMeasure));
    engine.set_cell_content(0, 0, CellContent::text("XX")).unwrap();
    assert_eq!(engine.column_widths(), &[40.0]);
    engine.set_cell_content(0, 0, CellContent::text("XXXXXX")).unwrap();
    assert_eq!(engine.column_widths(), &[64.0]);
}
