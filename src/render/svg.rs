//! SVG backend.
//!
//! Serializes a [`Scene`] to a standalone SVG document. Used for previews
//! from the CLI and for inspecting frames in tests.

use std::fmt::Write as _;

use crate::error::{LayoutError, Result};
use crate::render::backend::{DrawCommand, RenderBackend, Scene, Stroke, TextAlign};

const FONT_FAMILY: &str = "sans-serif";

#[derive(Debug, Default)]
pub struct SvgRenderer {
    output: String,
    width: u32,
    height: u32,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the last rendered frame.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }

    fn write_scene(&mut self, scene: &Scene) -> std::fmt::Result {
        let (w, h) = (scene.width, scene.height);
        let out = &mut self.output;
        out.clear();
        write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.2}\" height=\"{h:.2}\" viewBox=\"0 0 {w:.2} {h:.2}\">"
        )?;
        if let Some(bg) = &scene.background {
            write!(out, "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>", escape_xml(bg))?;
        }
        for command in &scene.commands {
            write_command(out, command)?;
        }
        out.push_str("</svg>\n");
        Ok(())
    }
}

impl RenderBackend for SvgRenderer {
    fn render(&mut self, scene: &Scene) -> Result<()> {
        self.write_scene(scene)
            .map_err(|e| LayoutError::Render(format!("svg serialization failed: {e}")))?;
        self.width = px(scene.width);
        self.height = px(scene.height);
        Ok(())
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn px(v: f32) -> u32 {
    v.max(0.0).ceil() as u32
}

fn write_command(out: &mut String, command: &DrawCommand) -> std::fmt::Result {
    match command {
        DrawCommand::Rect {
            rect,
            radius,
            fill,
            stroke,
        } => {
            write!(
                out,
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"",
                rect.x, rect.y, rect.width, rect.height
            )?;
            if *radius > 0.0 {
                write!(out, " rx=\"{radius:.2}\" ry=\"{radius:.2}\"")?;
            }
            write!(out, " fill=\"{}\"", fill.as_deref().map_or("none".into(), escape_xml))?;
            write_stroke(out, stroke.as_ref())?;
            out.push_str("/>");
        }
        DrawCommand::Line { from, to, stroke } => {
            write!(
                out,
                "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"",
                from.0, from.1, to.0, to.1
            )?;
            write_stroke(out, Some(stroke))?;
            out.push_str("/>");
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
            let anchor = match align {
                TextAlign::Left => "start",
                TextAlign::Center => "middle",
            };
            write!(
                out,
                "<text x=\"{x:.2}\" y=\"{y:.2}\" font-family=\"{FONT_FAMILY}\" font-size=\"{font_size}\" fill=\"{}\" text-anchor=\"{anchor}\" dominant-baseline=\"middle\"",
                escape_xml(color)
            )?;
            if *vertical {
                write!(out, " transform=\"rotate(-90 {x:.2} {y:.2})\"")?;
            }
            write!(out, ">{}</text>", escape_xml(text))?;
        }
    }
    Ok(())
}

fn write_stroke(out: &mut String, stroke: Option<&Stroke>) -> std::fmt::Result {
    let Some(stroke) = stroke else {
        return out.write_str(" stroke=\"none\"");
    };
    write!(
        out,
        " stroke=\"{}\" stroke-width=\"{}\"",
        escape_xml(&stroke.color),
        stroke.width
    )?;
    if stroke.dashed {
        out.push_str(" stroke-dasharray=\"4 2\"");
    }
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
