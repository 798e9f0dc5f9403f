//! Render backend trait for pluggable rendering implementations.
//!
//! The scene builder produces a flat display list of [`DrawCommand`]s in view
//! coordinates; backends (SVG, Canvas 2D) replay it in order.

use crate::error::Result;
use crate::layout::Rect;
use crate::render::colors::CssColor;

/// Line style for outlines and grid lines
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: CssColor,
    pub width: f32,
    pub dashed: bool,
}

impl Stroke {
    pub fn solid(color: &str, width: f32) -> Self {
        Self {
            color: color.to_string(),
            width,
            dashed: false,
        }
    }

    pub fn dashed(color: &str, width: f32) -> Self {
        Self {
            color: color.to_string(),
            width,
            dashed: true,
        }
    }
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
}

/// One drawing operation in view coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Rectangle with rounded corners (`radius` 0 draws a plain rectangle).
    Rect {
        rect: Rect,
        radius: f32,
        fill: Option<CssColor>,
        stroke: Option<Stroke>,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        stroke: Stroke,
    },
    /// Single line of text, vertically centred on `y`.
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        color: CssColor,
        align: TextAlign,
        /// Rotate 90 degrees counter-clockwise around `(x, y)`.
        vertical: bool,
    },
}

/// A complete frame: view size plus the ordered display list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub background: Option<CssColor>,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

/// Trait for render backends
///
/// Implementations handle the actual drawing operations for different
/// rendering technologies (SVG markup, Canvas 2D).
pub trait RenderBackend {
    /// Resize the render surface
    fn resize(&mut self, _width: u32, _height: u32, _dpr: f32) {}

    /// Render a frame
    fn render(&mut self, scene: &Scene) -> Result<()>;

    /// Get the current width
    fn width(&self) -> u32;

    /// Get the current height
    fn height(&self) -> u32;
}
