//! dispogrid - structural grid editor for label and plate layouts
//!
//! A disposition is a grid of unit cells with independently sized columns, a
//! uniform row height and rectangular merged regions:
//! - Insert/delete rows and columns with merges and contents remapped
//! - Merge gap-free rectangular selections, split them back
//! - Columns that grow to fit their text
//! - Pixel/millimetre conversion and rulers
//! - SVG previews everywhere, Canvas 2D editing in the browser
//!
//! # Usage (Rust)
//!
//! ```
//! use dispogrid::{EditorConfig, GridLayoutEngine, Selection};
//!
//! let mut engine = GridLayoutEngine::new(EditorConfig::default());
//! engine.add_column(&Selection::new()).unwrap();
//! engine.merge_selection(&Selection::from_coords([(0, 0), (0, 1)])).unwrap();
//! assert_eq!(engine.regions().len(), 1);
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { DispositionEditor } from 'dispogrid';
//! await init();
//! const editor = new DispositionEditor(canvas, devicePixelRatio);
//! editor.load(json);
//! editor.mergeSelection();
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod render;
pub mod ruler;
pub mod types;
pub mod units;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use config::EditorConfig;
pub use engine::{Change, GridLayoutEngine};
pub use error::{LayoutError, Result};
#[cfg(target_arch = "wasm32")]
pub use viewer::DispositionEditor;
pub use viewer::{GridView, SelectionController};

pub use types::*;

/// Convert pixels to millimetres at `dpi`.
#[must_use]
#[wasm_bindgen(js_name = "mmFromPixels")]
pub fn mm_from_pixels(px: f64, dpi: f64) -> f64 {
    units::mm_from_pixels(px, dpi)
}

/// Convert millimetres to pixels at `dpi`.
#[must_use]
#[wasm_bindgen(js_name = "pixelsFromMm")]
pub fn pixels_from_mm(mm: f64, dpi: f64) -> f64 {
    units::pixels_from_mm(mm, dpi)
}

/// Load a disposition leniently, repair it, and return it re-serialized.
///
/// # Errors
/// Returns an error only if serialization of the repaired description fails.
#[wasm_bindgen(js_name = "normalizeDisposition")]
pub fn normalize_disposition(json: &str) -> std::result::Result<String, JsValue> {
    let engine = GridLayoutEngine::from_disposition(
        Disposition::from_json_lenient(json),
        EditorConfig::default(),
    );
    engine
        .to_disposition()
        .to_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
