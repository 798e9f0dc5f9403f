//! Rendering with pluggable backends.
//!
//! This module provides:
//! - The backend-agnostic display list ([`DrawCommand`], [`Scene`]) and the
//!   [`RenderBackend`] trait
//! - The scene builder that paints the page, grid, cells, rulers and marquee
//! - SVG backend (all targets) and Canvas 2D backend (wasm32)
//! - Color utilities

pub mod backend;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod colors;
mod scene;
pub mod svg;

pub use backend::{DrawCommand, RenderBackend, Scene, Stroke, TextAlign};
#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasRenderer, CanvasTextMeasure};
pub use colors::{palette, CssColor, Rgb};
pub use scene::build_scene;
pub use svg::SvgRenderer;
