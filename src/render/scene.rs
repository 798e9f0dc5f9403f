//! Turns the engine state into a display list.
//!
//! Paint order: workspace, page, selection highlight, grid lines, cell
//! content, rulers, marquee. Everything is translated from page space into
//! view space by [`EditorConfig::page_origin`].

use crate::config::EditorConfig;
use crate::engine::GridLayoutEngine;
use crate::layout::Rect;
use crate::render::backend::{DrawCommand, Scene, Stroke, TextAlign};
use crate::render::colors::palette;
use crate::ruler::{Orientation, RulerModel};
use crate::types::{Cell, CellContent, Selection};

const GRID_LINE_WIDTH: f32 = 0.5;
const IMAGE_INSET: f32 = 6.0;
const RULER_FONT_SIZE: f32 = 11.0;
const SELECTION_ALPHA: f32 = 0.5;

/// Build the frame for the current engine state, selection and drag marquee
/// (page space).
pub fn build_scene(engine: &GridLayoutEngine, selection: &Selection, marquee: Option<Rect>) -> Scene {
    let config = engine.config();
    let (ox, oy) = config.page_origin();
    let (page_w, page_h) = engine.page_size();
    let page = Rect::new(ox, oy, page_w, page_h);

    let mut scene = Scene {
        width: ox + page_w + config.page_margin,
        height: oy + page_h + config.page_margin,
        background: Some(palette::WORKSPACE.to_string()),
        commands: Vec::new(),
    };

    scene.push(DrawCommand::Rect {
        rect: page,
        radius: engine.corner_radius(),
        fill: Some(palette::PAGE.to_string()),
        stroke: Some(Stroke::solid(palette::PAGE_BORDER, 1.0)),
    });

    let highlight = palette::SELECTION.with_alpha(SELECTION_ALPHA);
    for cell in visible_cells(engine).filter(|c| selection.contains(c.row, c.col)) {
        scene.push(DrawCommand::Rect {
            rect: cell.rect.bounds().translated(ox, oy),
            radius: 0.0,
            fill: Some(highlight.clone()),
            stroke: None,
        });
    }

    push_grid_lines(&mut scene, engine, ox, oy);

    for cell in visible_cells(engine) {
        push_cell_content(&mut scene, cell, config, ox, oy);
    }

    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        let length = match orientation {
            Orientation::Horizontal => page_w,
            Orientation::Vertical => page_h,
        };
        push_ruler(&mut scene, &RulerModel::new(orientation, length, config.dpi), &page, config);
    }

    if let Some(marquee) = marquee {
        scene.push(DrawCommand::Rect {
            rect: marquee.translated(ox, oy),
            radius: 0.0,
            fill: Some(palette::SELECTION.with_alpha(0.2)),
            stroke: Some(Stroke::dashed(palette::MARQUEE, 1.0)),
        });
    }

    scene
}

fn visible_cells(engine: &GridLayoutEngine) -> impl Iterator<Item = &Cell> {
    engine.cells().iter().filter(|c| c.role.is_visible())
}

/// Interior grid lines only; the page outline is the rounded background.
fn push_grid_lines(scene: &mut Scene, engine: &GridLayoutEngine, ox: f32, oy: f32) {
    let layout = engine.layout();
    let stroke = Stroke::solid(palette::GRID_LINE, GRID_LINE_WIDTH);

    for col in 1..engine.num_cols() {
        let Some(&x) = layout.col_positions.get(col as usize) else {
            continue;
        };
        for (y1, y2) in layout.vline_segments(col) {
            scene.push(DrawCommand::Line {
                from: (ox + x, oy + y1),
                to: (ox + x, oy + y2),
                stroke: stroke.clone(),
            });
        }
    }

    for row in 1..engine.num_rows() {
        let Some(&y) = layout.row_positions.get(row as usize) else {
            continue;
        };
        for (x1, x2) in layout.hline_segments(row) {
            scene.push(DrawCommand::Line {
                from: (ox + x1, oy + y),
                to: (ox + x2, oy + y),
                stroke: stroke.clone(),
            });
        }
    }
}

fn push_cell_content(scene: &mut Scene, cell: &Cell, config: &EditorConfig, ox: f32, oy: f32) {
    let bounds = cell.rect.bounds().translated(ox, oy);
    let (cx, cy) = bounds.center();
    match &cell.content {
        CellContent::None => {}
        CellContent::Text(text) => {
            // Multi-line text: one command per line, block centred on the cell.
            let lines: Vec<&str> = text.lines().collect();
            let line_height = config.font_size * 1.2;
            let first = cy - line_height * (lines.len().saturating_sub(1) as f32) / 2.0;
            for (i, line) in lines.into_iter().enumerate() {
                scene.push(DrawCommand::Text {
                    x: cx,
                    y: first + line_height * i as f32,
                    text: line.to_string(),
                    font_size: config.font_size,
                    color: palette::TEXT.to_string(),
                    align: TextAlign::Center,
                    vertical: false,
                });
            }
        }
        CellContent::Image(asset) => {
            let inset = Rect::new(
                bounds.x + IMAGE_INSET,
                bounds.y + IMAGE_INSET,
                (bounds.width - 2.0 * IMAGE_INSET).max(0.0),
                (bounds.height - 2.0 * IMAGE_INSET).max(0.0),
            );
            scene.push(DrawCommand::Rect {
                rect: inset,
                radius: 0.0,
                fill: None,
                stroke: Some(Stroke::dashed(palette::IMAGE_PLACEHOLDER, 1.0)),
            });
            scene.push(DrawCommand::Text {
                x: cx,
                y: cy,
                text: asset.clone().unwrap_or_else(|| "Image".to_string()),
                font_size: config.font_size * 0.8,
                color: palette::IMAGE_PLACEHOLDER.to_string(),
                align: TextAlign::Center,
                vertical: false,
            });
        }
    }
}

fn push_ruler(scene: &mut Scene, ruler: &RulerModel, page: &Rect, config: &EditorConfig) {
    let band = ruler.bounds(page, config.ruler_thickness);
    scene.push(DrawCommand::Rect {
        rect: band,
        radius: 0.0,
        fill: Some(palette::RULER_BG.to_string()),
        stroke: Some(Stroke::solid(palette::RULER_TEXT, 0.5)),
    });
    let (x, y) = ruler.label_anchor(&band);
    scene.push(DrawCommand::Text {
        x,
        y,
        text: ruler.label(),
        font_size: RULER_FONT_SIZE,
        color: palette::RULER_TEXT.to_string(),
        align: TextAlign::Center,
        vertical: ruler.orientation == Orientation::Vertical,
    });
}
