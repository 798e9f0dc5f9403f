//! Color handling for the editor scene.
//!
//! Colors travel as CSS strings, which Canvas 2D and SVG both accept directly.

/// A CSS color string (e.g., "#FF0000", "rgba(255, 0, 0, 0.5)")
pub type CssColor = String;

/// RGB color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from a hex string (with or without #).
    /// Returns None if the format is invalid.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Convert to CSS hex string (#RRGGBB).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// CSS `rgba()` string with the given opacity (clamped to 0..=1).
    pub fn with_alpha(self, alpha: f32) -> CssColor {
        let a = alpha.clamp(0.0, 1.0);
        format!("rgba({}, {}, {}, {a})", self.r, self.g, self.b)
    }
}

/// Colors used by the editor scene (CSS format)
pub mod palette {
    use super::Rgb;

    /// Workspace behind the page
    pub const WORKSPACE: &str = "#E0E0E0";
    /// Page fill
    pub const PAGE: &str = "#FFFFFF";
    /// Page outline
    pub const PAGE_BORDER: &str = "#B0B0B0";
    /// Grid line color (light gray)
    pub const GRID_LINE: &str = "#D0D0D0";
    /// Cell text
    pub const TEXT: &str = "#202124";
    /// Image placeholder outline and caption
    pub const IMAGE_PLACEHOLDER: &str = "#808080";
    /// Ruler background
    pub const RULER_BG: &str = "#F5F5F5";
    /// Ruler outline and label
    pub const RULER_TEXT: &str = "#5F6368";
    /// Selected cell highlight (light blue, drawn translucent)
    pub const SELECTION: Rgb = Rgb::new(173, 216, 230);
    /// Marquee outline
    pub const MARQUEE: &str = "#1A73E8";
}
