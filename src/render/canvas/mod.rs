//! Canvas 2D rendering backend.
//!
//! Replays a [`Scene`](crate::render::Scene) through the HTML Canvas 2D API
//! via web-sys, and measures text with the same context.

mod renderer;

pub use renderer::{CanvasRenderer, CanvasTextMeasure};
