//! Stateless rasterization of strokes and shape primitives onto a
//! [`PixelSurface`]. Pixels are painted when their centre is covered; there is
//! no anti-aliasing, which keeps flood fill boundaries crisp.

use egui::{Color32, Pos2};

mod common;

pub use common::{LineCap, MIN_STROKE_WIDTH, normalize_span};

use crate::surface::PixelSurface;
use crate::tools::{ShapeMode, Tool, ToolStyle};
use common::{distance_to_line_segment, half_width, paint_dot, paint_where, within_butt_segment};

/// A position in surface pixel space (not display space)
pub type Point = Pos2;

/// Draw one segment of a freehand stroke. With round caps, consecutive
/// segments overlap in a disc at each shared point and read as one line.
pub fn stroke_segment(surface: &mut PixelSurface, from: Point, to: Point, color: Color32, width: f32, cap: LineCap) {
    let radius = half_width(width);
    let bounds = normalize_span(from, to).expand(radius);

    match cap {
        LineCap::Round => paint_where(surface, bounds, color, |p| {
            distance_to_line_segment(p, from, to) <= radius
        }),
        LineCap::Butt => paint_where(surface, bounds, color, |p| within_butt_segment(p, from, to, radius)),
    }
}

/// A single straight line with round caps
pub fn straight_line(surface: &mut PixelSurface, from: Point, to: Point, color: Color32, width: f32) {
    stroke_segment(surface, from, to, color, width, LineCap::Round);
}

/// Axis-aligned box spanned by two corners in any order.
///
/// `Fill` paints the interior; `Outline` strokes the border centred on the
/// edges. A zero-area fill leaves a single dot, a zero-area outline nothing.
pub fn rectangle(surface: &mut PixelSurface, from: Point, to: Point, color: Color32, width: f32, mode: ShapeMode) {
    let rect = normalize_span(from, to);

    match mode {
        ShapeMode::Fill => {
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                paint_dot(surface, from, color);
                return;
            }
            paint_where(surface, rect, color, |p| {
                p.x >= rect.min.x && p.x < rect.max.x && p.y >= rect.min.y && p.y < rect.max.y
            });
        }
        ShapeMode::Outline => {
            if rect.width() <= 0.0 && rect.height() <= 0.0 {
                return;
            }
            let hw = half_width(width);
            let outer = rect.expand(hw);
            let inner = rect.shrink(hw);
            paint_where(surface, outer, color, |p| {
                let in_hole = inner.is_positive()
                    && p.x > inner.min.x
                    && p.x < inner.max.x
                    && p.y > inner.min.y
                    && p.y < inner.max.y;
                !in_hole
            });
        }
    }
}

/// Ellipse inscribed in the box spanned by two corners: centre at the
/// midpoint, radii half the absolute extents. Same modes as [`rectangle`].
pub fn ellipse(surface: &mut PixelSurface, from: Point, to: Point, color: Color32, width: f32, mode: ShapeMode) {
    let rect = normalize_span(from, to);
    let centre = rect.center();
    let (rx, ry) = (rect.width() / 2.0, rect.height() / 2.0);

    let inside = move |p: Pos2, rx: f32, ry: f32| {
        let dx = (p.x - centre.x) / rx;
        let dy = (p.y - centre.y) / ry;
        dx * dx + dy * dy <= 1.0
    };

    match mode {
        ShapeMode::Fill => {
            if rx <= 0.0 || ry <= 0.0 {
                paint_dot(surface, centre, color);
                return;
            }
            paint_where(surface, rect, color, |p| inside(p, rx, ry));
        }
        ShapeMode::Outline => {
            if rx <= 0.0 && ry <= 0.0 {
                return;
            }
            let hw = half_width(width);
            let (inner_rx, inner_ry) = (rx - hw, ry - hw);
            paint_where(surface, rect.expand(hw), color, |p| {
                let in_hole = inner_rx > 0.0 && inner_ry > 0.0 && inside(p, inner_rx, inner_ry);
                inside(p, rx + hw, ry + hw) && !in_hole
            });
        }
    }
}

/// Render the committed or previewed shape of a shape-class tool for the
/// span `anchor..point`. Other tools are ignored.
pub fn draw_shape(surface: &mut PixelSurface, style: &ToolStyle, anchor: Point, point: Point) {
    let width = style.brush_size as f32;
    match style.tool {
        Tool::Line => straight_line(surface, anchor, point, style.color, width),
        Tool::Rectangle => rectangle(surface, anchor, point, style.color, width, style.shape_mode),
        Tool::Circle => ellipse(surface, anchor, point, style.color, width, style.shape_mode),
        _ => {}
    }
}
