//! Pixel/millimetre conversion.

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Convert a pixel length to millimetres at the given resolution.
#[must_use]
pub fn mm_from_pixels(px: f64, dpi: f64) -> f64 {
    px / dpi * MM_PER_INCH
}

/// Convert a millimetre length to pixels at the given resolution.
#[must_use]
pub fn pixels_from_mm(mm: f64, dpi: f64) -> f64 {
    mm / MM_PER_INCH * dpi
}

/// Converter bound to a fixed resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateConverter {
    pub dpi: f64,
}

impl CoordinateConverter {
    pub fn new(dpi: f64) -> Self {
        Self { dpi }
    }

    pub fn to_mm(&self, px: f64) -> f64 {
        mm_from_pixels(px, self.dpi)
    }

    pub fn to_pixels(&self, mm: f64) -> f64 {
        pixels_from_mm(mm, self.dpi)
    }
}

impl Default for CoordinateConverter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_DPI)
    }
}
