use egui::{Pos2, Rect};

use crate::surface::PixelSurface;

/// Thinnest stroke the rasterizer will produce, in pixels
pub const MIN_STROKE_WIDTH: f32 = 1.0;

/// How the ends of a stroked segment are finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Half-disc past each endpoint, so consecutive segments join seamlessly
    #[default]
    Round,
    /// Flat end exactly at the endpoint
    Butt,
}

/// Calculate distance from a point to a line segment
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// True when `point` lies inside the band of half-width `radius` around the
/// segment, not counting the area past the endpoints
pub(crate) fn within_butt_segment(point: Pos2, line_start: Pos2, line_end: Pos2, radius: f32) -> bool {
    let line_vec = line_end - line_start;
    let line_len = line_vec.length();
    if line_len == 0.0 {
        return false;
    }

    let point_vec = point - line_start;
    let along = (point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len;
    let across = (point_vec.x * line_vec.y - point_vec.y * line_vec.x).abs() / line_len;
    (0.0..=line_len).contains(&along) && across <= radius
}

/// Canonical rectangle spanned by two corners in any order
pub fn normalize_span(from: Pos2, to: Pos2) -> Rect {
    Rect::from_two_pos(from, to)
}

/// Half the stroke width, never thinner than a single pixel stroke
pub(crate) fn half_width(width: f32) -> f32 {
    width.max(MIN_STROKE_WIDTH) / 2.0
}

/// Visit every pixel whose centre falls inside `bounds` (clipped to the
/// surface) and paint it when `inside` accepts that centre.
pub(crate) fn paint_where(
    surface: &mut PixelSurface,
    bounds: Rect,
    color: egui::Color32,
    inside: impl Fn(Pos2) -> bool,
) {
    if !bounds.min.x.is_finite() || !bounds.min.y.is_finite() || !bounds.max.x.is_finite() || !bounds.max.y.is_finite() {
        return;
    }

    let width = surface.width() as i64;
    let height = surface.height() as i64;
    let x0 = ((bounds.min.x - 0.5).ceil() as i64).max(0);
    let y0 = ((bounds.min.y - 0.5).ceil() as i64).max(0);
    let x1 = ((bounds.max.x - 0.5).floor() as i64 + 1).min(width);
    let y1 = ((bounds.max.y - 0.5).floor() as i64 + 1).min(height);

    for y in y0..y1 {
        for x in x0..x1 {
            let centre = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            if inside(centre) {
                surface.put_pixel(x, y, color);
            }
        }
    }
}

/// Paint the single pixel containing `point`
pub(crate) fn paint_dot(surface: &mut PixelSurface, point: Pos2, color: egui::Color32) {
    if point.x.is_finite() && point.y.is_finite() {
        surface.put_pixel(point.x.floor() as i64, point.y.floor() as i64, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_distance_to_segment() {
        let a = pos2(0.0, 0.0);
        let b = pos2(10.0, 0.0);
        assert_eq!(distance_to_line_segment(pos2(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_line_segment(pos2(13.0, 4.0), a, b), 5.0);
        assert_eq!(distance_to_line_segment(pos2(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn test_butt_segment_excludes_caps() {
        let a = pos2(0.0, 0.0);
        let b = pos2(10.0, 0.0);
        assert!(within_butt_segment(pos2(5.0, 1.0), a, b, 1.5));
        assert!(!within_butt_segment(pos2(-0.5, 0.0), a, b, 1.5));
        assert!(!within_butt_segment(pos2(5.0, 2.0), a, b, 1.5));
    }

    #[test]
    fn test_normalize_span_handles_negative_extents() {
        let rect = normalize_span(pos2(40.0, 30.0), pos2(10.0, 50.0));
        assert_eq!(rect.min, pos2(10.0, 30.0));
        assert_eq!(rect.max, pos2(40.0, 50.0));
    }
}
