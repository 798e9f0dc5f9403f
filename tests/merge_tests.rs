//! Merge and split behaviour of the grid engine.
//!
//! A merge turns a gap-free rectangular selection into one region: the
//! top-left cell becomes the master and keeps its content, the rest become
//! covered (slave) cells with no content. Split dissolves the region again.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{assert_invariants, grid, label, labelled_grid, rect_sel, sel, text_at};
use dispogrid::{CellContent, CellRole, Change, LayoutError, MergedRegion, Selection};

// ============================================================================
// MERGE
// ============================================================================

#[test]
fn merge_two_by_two_square() {
    let mut engine = grid(2, 2);
    let change = engine.merge_selection(&sel(&[(0, 0), (0, 1), (1, 0), (1, 1)])).unwrap();
    assert_eq!(change, Change::Structure);
    assert_eq!(engine.regions().as_slice(), &[MergedRegion::new(0, 0, 2, 2)]);
    assert_eq!(engine.role_of(0, 0), Some(CellRole::Master));
    assert_eq!(engine.role_of(0, 1), Some(CellRole::Slave));
    assert_eq!(engine.role_of(1, 0), Some(CellRole::Slave));
    assert_eq!(engine.role_of(1, 1), Some(CellRole::Slave));
    assert_invariants(&engine);
}

#[test]
fn master_rect_spans_region() {
    let mut engine = grid(3, 3);
    engine.merge_selection(&rect_sel(1, 1, 2, 2)).unwrap();
    let master = engine.cell(1, 1).unwrap();
    assert_eq!(master.rect.x, 100.0);
    assert_eq!(master.rect.y, 50.0);
    assert_eq!(master.rect.width, 200.0);
    assert_eq!(master.rect.height, 100.0);
    assert!(engine.cell(2, 2).unwrap().rect.skip);
}

#[test]
fn merge_keeps_origin_content_and_clears_footprint() {
    let mut engine = labelled_grid(3, 3);
    engine.merge_selection(&rect_sel(0, 1, 2, 2)).unwrap();
    assert_eq!(text_at(&engine, 0, 1).as_deref(), Some("0,1"));
    for (r, c) in [(0, 2), (1, 1), (1, 2)] {
        assert_eq!(engine.content_of(r, c), Some(&CellContent::None), "({r}, {c})");
    }
    // Outside the footprint nothing moves
    assert_eq!(text_at(&engine, 0, 0).as_deref(), Some("0,0"));
    assert_eq!(text_at(&engine, 2, 2).as_deref(), Some("2,2"));
    assert_invariants(&engine);
}

#[test]
fn merge_without_origin_content_leaves_master_empty() {
    let mut engine = grid(1, 3);
    engine.set_cell_content(0, 2, label(0, 2)).unwrap();
    engine.merge_selection(&sel(&[(0, 1), (0, 2)])).unwrap();
    assert_eq!(engine.content_of(0, 1), Some(&CellContent::None));
    assert_eq!(engine.content_of(0, 2), Some(&CellContent::None));
}

#[test]
fn l_shaped_selection_is_rejected() {
    let mut engine = labelled_grid(2, 2);
    let before = engine.to_disposition();
    let err = engine.merge_selection(&sel(&[(0, 0), (0, 1), (1, 0)])).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidSelectionShape));
    assert!(!err.is_notice());
    assert_eq!(engine.to_disposition(), before);
}

#[test]
fn gapped_row_is_rejected() {
    let mut engine = grid(1, 4);
    assert!(matches!(
        engine.merge_selection(&sel(&[(0, 0), (0, 1), (0, 3)])),
        Err(LayoutError::InvalidSelectionShape)
    ));
    assert!(engine.regions().is_empty());
}

#[test]
fn empty_selection_is_a_notice() {
    let mut engine = grid(2, 2);
    let err = engine.merge_selection(&Selection::new()).unwrap_err();
    assert!(matches!(err, LayoutError::NoEligibleCells(_)));
    assert!(err.is_notice());
}

#[test]
fn out_of_grid_coordinates_are_ignored() {
    let mut engine = grid(2, 2);
    engine.merge_selection(&sel(&[(0, 0), (0, 1), (9, 9)])).unwrap();
    assert_eq!(engine.regions().as_slice(), &[MergedRegion::new(0, 0, 1, 2)]);
}

#[test]
fn selecting_a_covered_cell_aborts() {
    let mut engine = grid(2, 2);
    engine.merge_selection(&sel(&[(0, 0), (0, 1)])).unwrap();
    let err = engine.merge_selection(&sel(&[(0, 1), (1, 1)])).unwrap_err();
    assert!(matches!(err, LayoutError::SlaveCellSelected { row: 0, col: 1 }));
    assert_eq!(engine.regions().len(), 1);
    assert_invariants(&engine);
}

#[test]
fn two_masters_merge_into_one_region() {
    let mut engine = labelled_grid(2, 4);
    engine.merge_selection(&rect_sel(0, 0, 2, 2)).unwrap();
    engine.merge_selection(&rect_sel(0, 2, 2, 2)).unwrap();
    assert_eq!(engine.regions().len(), 2);

    engine.merge_selection(&sel(&[(0, 0), (0, 2)])).unwrap();
    assert_eq!(engine.regions().as_slice(), &[MergedRegion::new(0, 0, 2, 4)]);
    assert_eq!(text_at(&engine, 0, 0).as_deref(), Some("0,0"));
    assert_eq!(engine.content_of(0, 2), Some(&CellContent::None));
    assert_invariants(&engine);
}

#[test]
fn master_plus_units_must_still_fill_the_rectangle() {
    let mut engine = grid(3, 3);
    engine.merge_selection(&rect_sel(0, 0, 2, 2)).unwrap();
    // Region plus (0,2) leaves (1,2) uncovered
    assert!(matches!(
        engine.merge_selection(&sel(&[(0, 0), (0, 2)])),
        Err(LayoutError::InvalidSelectionShape)
    ));
    engine.merge_selection(&sel(&[(0, 0), (0, 2), (1, 2)])).unwrap();
    assert_eq!(engine.regions().as_slice(), &[MergedRegion::new(0, 0, 2, 3)]);
}

#[test]
fn merged_grid_survives_json_round_trip() {
    let mut engine = labelled_grid(3, 3);
    engine.merge_selection(&rect_sel(1, 0, 2, 3)).unwrap();
    let json = engine.to_disposition().to_json().unwrap();
    let reloaded = dispogrid::GridLayoutEngine::from_disposition(
        dispogrid::Disposition::from_json(&json).unwrap(),
        dispogrid::EditorConfig::default(),
    );
    assert_eq!(reloaded.to_disposition(), engine.to_disposition());
    assert_invariants(&reloaded);
}

// ============================================================================
// SPLIT
// ============================================================================

#[test]
fn split_restores_unit_cells() {
    let mut engine = grid(2, 2);
    engine.merge_selection(&rect_sel(0, 0, 2, 2)).unwrap();
    engine.set_cell_content(0, 0, CellContent::text("SERIAL")).unwrap();

    assert_eq!(engine.split_selection(&sel(&[(0, 0)])).unwrap(), Change::Structure);
    assert!(engine.regions().is_empty());
    for (r, c) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
        assert_eq!(engine.role_of(r, c), Some(CellRole::Unit));
    }
    assert_eq!(text_at(&engine, 0, 0).as_deref(), Some("SERIAL"));
    for (r, c) in [(0, 1), (1, 0), (1, 1)] {
        assert_eq!(engine.content_of(r, c), Some(&CellContent::None));
    }
    assert_invariants(&engine);
}

#[test]
fn split_only_touches_selected_masters() {
    let mut engine = grid(2, 4);
    engine.merge_selection(&rect_sel(0, 0, 2, 2)).unwrap();
    engine.merge_selection(&rect_sel(0, 2, 2, 2)).unwrap();
    engine.split_selection(&sel(&[(0, 2), (1, 0)])).unwrap();
    assert_eq!(engine.regions().as_slice(), &[MergedRegion::new(0, 0, 2, 2)]);
}

#[test]
fn split_without_masters_is_a_notice() {
    let mut engine = grid(2, 2);
    let err = engine.split_selection(&sel(&[(0, 0), (1, 1)])).unwrap_err();
    assert!(matches!(err, LayoutError::NoEligibleCells(_)));
    assert!(err.is_notice());
}

#[test]
fn split_twice_changes_nothing_the_second_time() {
    let mut engine = labelled_grid(2, 2);
    engine.merge_selection(&rect_sel(0, 0, 2, 2)).unwrap();
    engine.split_selection(&sel(&[(0, 0)])).unwrap();
    let after_first = engine.to_disposition();
    assert!(engine.split_selection(&sel(&[(0, 0)])).is_err());
    assert_eq!(engine.to_disposition(), after_first);
}

#[test]
fn merge_split_merge_is_stable() {
    let mut engine = grid(3, 3);
    for _ in 0..3 {
        engine.merge_selection(&rect_sel(0, 0, 3, 3)).unwrap();
        assert_eq!(engine.regions().len(), 1);
        engine.split_selection(&sel(&[(0, 0)])).unwrap();
        assert!(engine.regions().is_empty());
        assert_invariants(&engine);
    }
}
