//! Page rulers.
//!
//! A ruler shows one centred label with the total length it covers, in
//! millimetres. There are no tick subdivisions.

use crate::layout::Rect;
use crate::units::mm_from_pixels;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Runs along the top edge of the page, measures width.
    Horizontal,
    /// Runs along the left edge of the page, measures height.
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RulerModel {
    pub orientation: Orientation,
    /// Covered length in pixels.
    pub length_px: f32,
    pub dpi: f64,
}

impl RulerModel {
    pub fn new(orientation: Orientation, length_px: f32, dpi: f64) -> Self {
        Self {
            orientation,
            length_px,
            dpi,
        }
    }

    /// Update the covered length (after the page was resized).
    pub fn set_length(&mut self, length_px: f32) {
        self.length_px = length_px;
    }

    pub fn length_mm(&self) -> f64 {
        mm_from_pixels(f64::from(self.length_px.max(0.0)), self.dpi)
    }

    /// Text shown on the ruler, e.g. `"85.0 mm"`.
    pub fn label(&self) -> String {
        format!("{:.1} mm", self.length_mm())
    }

    /// Where the label is anchored (centre point) when the ruler occupies `bounds`.
    pub fn label_anchor(&self, bounds: &Rect) -> (f32, f32) {
        bounds.center()
    }

    /// Ruler band for a page at `page`, `thickness` pixels deep.
    pub fn bounds(&self, page: &Rect, thickness: f32) -> Rect {
        match self.orientation {
            Orientation::Horizontal => Rect::new(page.x, page.y - thickness - 4.0, self.length_px, thickness),
            Orientation::Vertical => Rect::new(page.x - thickness - 4.0, page.y, thickness, self.length_px),
        }
    }
}
