//! Browser host for a `GridView`.
//!
//! `DispositionEditor` binds a canvas element: mouse events are registered on
//! construction and routed to the view, and every change repaints the canvas
//! immediately. Toolbar buttons call the exported action methods.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::GridView;
use crate::config::EditorConfig;
use crate::engine::Change;
use crate::error::Result;
use crate::render::{CanvasRenderer, RenderBackend};
use crate::types::CellContent;

/// State shared between the exported object and the event closures.
struct SharedState {
    view: GridView,
    renderer: CanvasRenderer,
    dpr: f32,
    /// Called after every repaint (hosts refresh toolbar state from it).
    render_callback: Option<Function>,
}

impl SharedState {
    /// Paint the current frame. Returns the render callback for the caller
    /// to invoke once the state borrow is released.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn repaint(&mut self) -> Result<Option<Function>> {
        let (w, h) = self.view.view_size();
        let physical_w = (w * self.dpr).ceil().max(1.0) as u32;
        let physical_h = (h * self.dpr).ceil().max(1.0) as u32;
        if physical_w != self.renderer.width() || physical_h != self.renderer.height() {
            self.renderer.resize(physical_w, physical_h, self.dpr);
            self.renderer.set_canvas_css_size(w, h);
        }
        self.view.render(&mut self.renderer)?;
        Ok(self.render_callback.clone())
    }

    fn repaint_if_needed(&mut self) -> Option<Function> {
        if !self.view.needs_render() {
            return None;
        }
        self.repaint().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "repaint failed");
            None
        })
    }
}

/// Run the host's render callback. The shared state must not be borrowed,
/// the callback may call back into the editor.
fn notify(callback: Option<Function>) {
    if let Some(callback) = callback {
        let _ = callback.call0(&JsValue::NULL);
    }
}

/// The disposition editor exported to JavaScript
#[wasm_bindgen]
pub struct DispositionEditor {
    state: Rc<RefCell<SharedState>>,
    /// Kept alive for as long as the editor exists.
    #[allow(dead_code)]
    closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
}

#[wasm_bindgen]
impl DispositionEditor {
    /// Create an editor on `canvas`. `config_json` is an optional
    /// `EditorConfig` document; missing fields keep their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        dpr: f32,
        config_json: Option<String>,
    ) -> std::result::Result<DispositionEditor, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config_json.as_deref() {
            Some(json) => EditorConfig::from_json(json)?,
            None => EditorConfig::default(),
        };
        let renderer = CanvasRenderer::new(canvas.clone())?;
        let mut view = GridView::new(config);
        view.set_text_measure(Box::new(renderer.text_measure()));

        let state = Rc::new(RefCell::new(SharedState {
            view,
            renderer,
            dpr: dpr.max(1.0),
            render_callback: None,
        }));

        let mut closures: Vec<Closure<dyn FnMut(MouseEvent)>> = Vec::new();

        // Mouse down
        {
            let state = state.clone();
            let canvas_ref = canvas.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let (x, y) = event_point(&canvas_ref, &event);
                let callback = {
                    let mut s = state.borrow_mut();
                    s.view.pointer_down(x, y);
                    s.repaint_if_needed()
                };
                notify(callback);
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Mouse move (rubber band)
        {
            let state = state.clone();
            let canvas_ref = canvas.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let (x, y) = event_point(&canvas_ref, &event);
                let callback = {
                    let mut s = state.borrow_mut();
                    s.view.pointer_move(x, y);
                    s.repaint_if_needed()
                };
                notify(callback);
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Mouse up and leave both end a drag
        for event_name in ["mouseup", "mouseleave"] {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
                let callback = {
                    let mut s = state.borrow_mut();
                    s.view.pointer_up();
                    s.repaint_if_needed()
                };
                notify(callback);
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        state.borrow_mut().repaint()?;
        Ok(DispositionEditor { state, closures })
    }

    /// Replace the grid with a persisted description. Malformed input
    /// yields an empty 1x1 grid.
    pub fn load(&self, json: &str) -> std::result::Result<(), JsValue> {
        let callback = {
            let mut s = self.state.borrow_mut();
            s.view.load_json(json);
            s.repaint()?
        };
        notify(callback);
        Ok(())
    }

    /// Serialize the current grid.
    pub fn save(&self) -> std::result::Result<String, JsValue> {
        Ok(self.state.borrow().view.to_json()?)
    }

    pub fn render(&self) -> std::result::Result<(), JsValue> {
        let callback = self.state.borrow_mut().repaint()?;
        notify(callback);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setRenderCallback")]
    pub fn set_render_callback(&self, callback: Option<Function>) {
        self.state.borrow_mut().render_callback = callback;
    }

    #[wasm_bindgen(js_name = "addRow")]
    pub fn add_row(&self) -> std::result::Result<(), JsValue> {
        self.apply(GridView::add_row)
    }

    #[wasm_bindgen(js_name = "addColumn")]
    pub fn add_column(&self) -> std::result::Result<(), JsValue> {
        self.apply(GridView::add_column)
    }

    #[wasm_bindgen(js_name = "deleteSelectedRows")]
    pub fn delete_selected_rows(&self) -> std::result::Result<(), JsValue> {
        self.apply(GridView::delete_selected_rows)
    }

    #[wasm_bindgen(js_name = "deleteSelectedColumns")]
    pub fn delete_selected_columns(&self) -> std::result::Result<(), JsValue> {
        self.apply(GridView::delete_selected_columns)
    }

    #[wasm_bindgen(js_name = "mergeSelection")]
    pub fn merge_selection(&self) -> std::result::Result<(), JsValue> {
        self.apply(GridView::merge_selected)
    }

    #[wasm_bindgen(js_name = "splitSelection")]
    pub fn split_selection(&self) -> std::result::Result<(), JsValue> {
        self.apply(GridView::split_selected)
    }

    /// Write a cell payload. `content_type` is `"text"`, `"image"`, or empty
    /// to clear the cell.
    #[wasm_bindgen(js_name = "setCellContent")]
    pub fn set_cell_content(
        &self,
        row: u32,
        col: u32,
        content_type: &str,
        text: Option<String>,
    ) -> std::result::Result<(), JsValue> {
        let content = CellContent::from_tag(content_type, text)?;
        self.apply(|view| view.set_cell_content(row, col, content))
    }

    /// Selected cells as a sorted array of `[row, col]` pairs.
    #[wasm_bindgen(js_name = "getSelectedCellsCoordinates")]
    pub fn get_selected_cells_coordinates(&self) -> std::result::Result<JsValue, JsValue> {
        let coords = self.state.borrow().view.selected_cells_coordinates();
        serde_wasm_bindgen::to_value(&coords)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Page size as `[width_mm, height_mm]`.
    #[wasm_bindgen(js_name = "pageSizeMm")]
    pub fn page_size_mm(&self) -> Vec<f64> {
        let (w, h) = self.state.borrow().view.engine().page_size_mm();
        vec![w, h]
    }

    fn apply<F>(&self, action: F) -> std::result::Result<(), JsValue>
    where
        F: FnOnce(&mut GridView) -> Result<Change>,
    {
        let callback = {
            let mut s = self.state.borrow_mut();
            let change = action(&mut s.view)?;
            if change.needs_render() {
                s.repaint()?
            } else {
                None
            }
        };
        notify(callback);
        Ok(())
    }
}

#[allow(clippy::cast_possible_truncation)]
fn event_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    let x = f64::from(event.client_x()) - rect.left();
    let y = f64::from(event.client_y()) - rect.top();
    (x as f32, y as f32)
}
