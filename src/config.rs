//! Editor configuration.
//!
//! All sizes are logical pixels unless noted. Every field has a default so a
//! partial JSON document (or none at all) yields a usable configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Screen resolution assumed for pixel/millimetre conversion.
pub const DEFAULT_DPI: f64 = 96.0;

/// Width given to new columns.
pub const DEFAULT_COLUMN_WIDTH: f32 = 100.0;

/// Uniform row height.
pub const DEFAULT_ROW_HEIGHT: f32 = 50.0;

/// Corner radius of the page background.
pub const DEFAULT_CORNER_RADIUS: f32 = 10.0;

/// Configuration shared by the engine, the view and the renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Dots per inch used by the rulers.
    pub dpi: f64,
    /// Width of a freshly inserted column.
    pub default_column_width: f32,
    /// Height of every row in a new disposition.
    pub row_height: f32,
    /// Floor for adaptive column widths.
    pub min_column_width: f32,
    /// Horizontal padding added to measured text (both sides together).
    pub text_margin: f32,
    /// Font size used to measure and draw cell text.
    pub font_size: f32,
    /// Corner radius of a new disposition's page.
    pub corner_radius: f32,
    /// Blank space around the page inside the view.
    pub page_margin: f32,
    /// Thickness of the top and left rulers.
    pub ruler_thickness: f32,
    /// Manhattan distance the pointer must travel before a press becomes a drag.
    pub drag_threshold: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            row_height: DEFAULT_ROW_HEIGHT,
            min_column_width: DEFAULT_COLUMN_WIDTH,
            text_margin: 16.0,
            font_size: 14.0,
            corner_radius: DEFAULT_CORNER_RADIUS,
            page_margin: 20.0,
            ruler_thickness: 20.0,
            drag_threshold: 10.0,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Offset of the page's top-left corner inside the view.
    pub fn page_origin(&self) -> (f32, f32) {
        let offset = self.ruler_thickness + self.page_margin;
        (offset, offset)
    }
}
