//! Canvas 2D rendering backend.
//!
//! Implements the RenderBackend trait using HTML Canvas 2D API via web-sys.

use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::FRAC_PI_2;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{LayoutError, Result};
use crate::layout::{Rect, TextMeasure};
use crate::render::backend::{DrawCommand, RenderBackend, Scene, Stroke, TextAlign};

const FONT_FAMILY: &str = "sans-serif";
const TEXT_MEASURE_CACHE_CAP: usize = 4096;

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|_| LayoutError::Render("Failed to get 2d context".into()))?
        .ok_or_else(|| LayoutError::Render("No 2d context available".into()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| LayoutError::Render("Failed to cast to CanvasRenderingContext2d".into()))
}

fn font_spec(font_size: f32) -> String {
    format!("{font_size}px {FONT_FAMILY}")
}

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: u32,
    height: u32,
    dpr: f32,
}

impl CanvasRenderer {
    /// Create a new Canvas renderer from an HtmlCanvasElement
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = context_2d(&canvas)?;
        let width = canvas.width();
        let height = canvas.height();
        Ok(Self {
            canvas,
            ctx,
            width,
            height,
            dpr: 1.0,
        })
    }

    /// Set the CSS dimensions of the canvas element (logical pixels).
    pub fn set_canvas_css_size(&self, css_w: f32, css_h: f32) {
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{css_w}px"));
        let _ = style.set_property("height", &format!("{css_h}px"));
    }

    pub fn dpr(&self) -> f32 {
        self.dpr
    }

    /// Text measurer sharing this canvas' context.
    pub fn text_measure(&self) -> CanvasTextMeasure {
        CanvasTextMeasure::new(self.ctx.clone())
    }

    fn set_dash(&self, dashed: bool) {
        let pattern = if dashed {
            js_sys::Array::of2(&JsValue::from_f64(4.0), &JsValue::from_f64(2.0))
        } else {
            js_sys::Array::new()
        };
        let _ = self.ctx.set_line_dash(&pattern);
    }

    fn apply_stroke(&self, stroke: &Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color);
        self.ctx.set_line_width(f64::from(stroke.width));
        self.set_dash(stroke.dashed);
        self.ctx.stroke();
        self.set_dash(false);
    }

    /// Trace a rounded rectangle path with `arc_to` corners.
    fn trace_rect(&self, rect: &Rect, radius: f32) {
        let (x, y) = (f64::from(rect.x), f64::from(rect.y));
        let (w, h) = (f64::from(rect.width), f64::from(rect.height));
        let r = f64::from(radius).min(w / 2.0).min(h / 2.0).max(0.0);
        self.ctx.begin_path();
        if r <= 0.0 {
            self.ctx.rect(x, y, w, h);
            return;
        }
        self.ctx.move_to(x + r, y);
        let _ = self.ctx.arc_to(x + w, y, x + w, y + h, r);
        let _ = self.ctx.arc_to(x + w, y + h, x, y + h, r);
        let _ = self.ctx.arc_to(x, y + h, x, y, r);
        let _ = self.ctx.arc_to(x, y, x + w, y, r);
        self.ctx.close_path();
    }

    fn draw(&self, command: &DrawCommand) {
        match command {
            DrawCommand::Rect {
                rect,
                radius,
                fill,
                stroke,
            } => {
                self.trace_rect(rect, *radius);
                if let Some(fill) = fill {
                    self.ctx.set_fill_style_str(fill);
                    self.ctx.fill();
                }
                if let Some(stroke) = stroke {
                    self.apply_stroke(stroke);
                }
            }
            DrawCommand::Line { from, to, stroke } => {
                self.ctx.begin_path();
                self.ctx.move_to(f64::from(from.0), f64::from(from.1));
                self.ctx.line_to(f64::from(to.0), f64::from(to.1));
                self.apply_stroke(stroke);
            }
            DrawCommand::Text {
                x,
                y,
                text,
                font_size,
                color,
                align,
                vertical,
            } => {
                self.ctx.set_font(&font_spec(*font_size));
                self.ctx.set_fill_style_str(color);
                self.ctx.set_text_align(match align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                });
                self.ctx.set_text_baseline("middle");
                if *vertical {
                    self.ctx.save();
                    let _ = self.ctx.translate(f64::from(*x), f64::from(*y));
                    let _ = self.ctx.rotate(-FRAC_PI_2);
                    let _ = self.ctx.fill_text(text, 0.0, 0.0);
                    self.ctx.restore();
                } else {
                    let _ = self.ctx.fill_text(text, f64::from(*x), f64::from(*y));
                }
            }
        }
    }
}

impl RenderBackend for CanvasRenderer {
    fn resize(&mut self, width: u32, height: u32, dpr: f32) {
        self.width = width;
        self.height = height;
        self.dpr = dpr;

        // Set canvas buffer size to physical pixels
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        // Scale context for DPR (all drawing uses logical coordinates after this)
        let _ = self.ctx.scale(f64::from(dpr), f64::from(dpr));
    }

    fn render(&mut self, scene: &Scene) -> Result<()> {
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        let dpr = f64::from(self.dpr);
        self.ctx.clear_rect(0.0, 0.0, w / dpr, h / dpr);
        if let Some(bg) = &scene.background {
            self.ctx.set_fill_style_str(bg);
            self.ctx.fill_rect(0.0, 0.0, w / dpr, h / dpr);
        }
        for command in &scene.commands {
            self.draw(command);
        }
        Ok(())
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// Measures text with `CanvasRenderingContext2d::measure_text`, cached per
/// font and string.
pub struct CanvasTextMeasure {
    ctx: CanvasRenderingContext2d,
    cache: RefCell<HashMap<String, f32>>,
}

impl CanvasTextMeasure {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            cache: RefCell::new(HashMap::new()),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn measure_line(&self, line: &str, font: &str) -> f32 {
        let key = format!("{font}\n{line}");
        if let Some(width) = self.cache.borrow().get(&key) {
            return *width;
        }
        self.ctx.set_font(font);
        let width = self
            .ctx
            .measure_text(line)
            .map(|m| m.width() as f32)
            .unwrap_or(0.0);
        let mut cache = self.cache.borrow_mut();
        if cache.len() >= TEXT_MEASURE_CACHE_CAP {
            cache.clear();
        }
        cache.insert(key, width);
        width
    }
}

impl TextMeasure for CanvasTextMeasure {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let font = font_spec(font_size);
        text.lines()
            .map(|line| self.measure_line(line, &font))
            .fold(0.0, f32::max)
    }
}
