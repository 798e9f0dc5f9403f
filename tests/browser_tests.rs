//! Browser-hosted editor on a real canvas.
//!
//! Run with: wasm-pack test --headless --chrome
#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::Cell;
use std::rc::Rc;

use dispogrid::{Disposition, DispositionEditor};
use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> HtmlCanvasElement {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .expect("no document");
    let canvas = document
        .create_element("canvas")
        .expect("create canvas")
        .dyn_into::<HtmlCanvasElement>()
        .expect("not a canvas");
    document
        .body()
        .expect("no body")
        .append_child(&canvas)
        .expect("append canvas");
    canvas
}

#[wasm_bindgen_test]
fn editor_sizes_canvas_to_view() {
    let canvas = canvas();
    let _editor = DispositionEditor::new(canvas.clone(), 2.0, None).unwrap();
    // 1x1 page: 40 + 100 + 20 by 40 + 50 + 20, at 2x device pixels
    assert_eq!(canvas.width(), 320);
    assert_eq!(canvas.height(), 220);
}

#[wasm_bindgen_test]
fn toolbar_actions_edit_and_save() {
    let editor = DispositionEditor::new(canvas(), 1.0, None).unwrap();
    editor
        .load(r#"{"num_rows": 2, "num_cols": 2, "column_widths": [100, 100]}"#)
        .unwrap();
    editor.add_column().unwrap();
    editor.set_cell_content(0, 0, "text", Some("TAG".into())).unwrap();

    let saved = Disposition::from_json(&editor.save().unwrap()).unwrap();
    assert_eq!(saved.num_cols, 3);
    assert_eq!(saved.cell_contents.len(), 1);

    let size = editor.page_size_mm();
    assert!((size[0] - 79.375).abs() < 1e-6);
}

#[wasm_bindgen_test]
fn empty_selection_merge_is_rejected() {
    let editor = DispositionEditor::new(canvas(), 1.0, None).unwrap();
    assert!(editor.merge_selection().is_err());
    assert!(editor.set_cell_content(0, 0, "barcode", None).is_err());
}

#[wasm_bindgen_test]
fn config_json_is_applied() {
    let canvas = canvas();
    let _editor =
        DispositionEditor::new(canvas.clone(), 1.0, Some(r#"{"pageMargin": 0}"#.into())).unwrap();
    assert_eq!(canvas.width(), 120);
}

#[wasm_bindgen_test]
fn render_callback_can_query_the_editor() {
    let editor = Rc::new(DispositionEditor::new(canvas(), 1.0, None).unwrap());
    let calls = Rc::new(Cell::new(0u32));
    let callback = {
        let editor = Rc::downgrade(&editor);
        let calls = calls.clone();
        Closure::wrap(Box::new(move || {
            if let Some(editor) = editor.upgrade() {
                editor.get_selected_cells_coordinates().unwrap();
                editor.save().unwrap();
                editor.page_size_mm();
                calls.set(calls.get() + 1);
            }
        }) as Box<dyn FnMut()>)
    };
    editor.set_render_callback(Some(callback.as_ref().unchecked_ref::<Function>().clone()));

    editor.add_row().unwrap();
    editor.render().unwrap();
    editor.load(r#"{"num_rows": 2, "num_cols": 2}"#).unwrap();
    assert_eq!(calls.get(), 3);
    assert_eq!(editor.page_size_mm().len(), 2);
}
