//! Shape drawing onto surfaces
//!
//! Standalone functions for stroking and filling rects, circles, lines, arcs
//! and ellipses. Nothing here keeps state between calls: color and stroke
//! width are plain arguments, so a stroke can never leak into a later fill.
//!
//! Each call rasterizes its whole shape into a coverage buffer first and then
//! composites it once (source-over), so overlapping segments of one path do
//! not double-blend translucent colors. Pixels are sampled at their centers
//! and clipped to the target surface.

use crate::color::{Color, Rgba};
use crate::rect::Rect;
use crate::surface::Surface;
use std::f32::consts::TAU;

/// Stroke width used when a caller has no preference
pub const DEFAULT_LINE_WIDTH: f32 = 1.0;

/// Upper bound on segments when flattening a curve
const MAX_CURVE_SEGMENTS: usize = 4096;

/// Stroke a rectangle outline
pub fn rect(surface: &mut Surface, rect: &Rect, color: Color, width: f32) {
    let width = line_width(width);
    let corners = rect_corners(rect);
    let mut cov = Coverage::new(surface, &corners, width * 0.5);

    if width <= 1.0 {
        cov.stroke_polyline(&corners, true, width);
    } else {
        // Mitered corners: inside the outer box but not the inner one
        let half = width * 0.5;
        let (l, r) = min_max(rect.left(), rect.right());
        let (t, b) = min_max(rect.top(), rect.bottom());
        let outer = (l - half, t - half, r + half, b + half);
        let inner = (l + half, t + half, r - half, b - half);
        cov.mark_where(outer, |px, py| {
            !(px >= inner.0 && px < inner.2 && py >= inner.1 && py < inner.3)
        });
    }

    cov.composite(surface, color.to_rgba());
}

/// Fill a rectangle. Negative sizes fill toward the left/top.
pub fn fill_rect(surface: &mut Surface, rect: &Rect, color: Color) {
    let corners = rect_corners(rect);
    let mut cov = Coverage::new(surface, &corners, 0.0);
    cov.fill_polygon(&corners);
    cov.composite(surface, color.to_rgba());
}

/// Stroke a circle outline
pub fn circle(surface: &mut Surface, center: (f32, f32), radius: f32, color: Color, width: f32) {
    ellipse(surface, center, (radius, radius), 0.0, 0.0, TAU, color, width);
}

/// Fill a circle
pub fn fill_circle(surface: &mut Surface, center: (f32, f32), radius: f32, color: Color) {
    fill_ellipse(surface, center, (radius, radius), 0.0, 0.0, TAU, color);
}

/// Stroke a straight segment (butt caps)
pub fn line(surface: &mut Surface, start: (f32, f32), end: (f32, f32), color: Color, width: f32) {
    let width = line_width(width);
    let mut cov = Coverage::new(surface, &[start, end], width * 0.5);
    cov.stroke_polyline(&[start, end], false, width);
    cov.composite(surface, color.to_rgba());
}

/// Stroke a circular arc from `start_angle` to `end_angle` (radians,
/// clockwise on screen)
pub fn arc(
    surface: &mut Surface,
    center: (f32, f32),
    radius: f32,
    start_angle: f32,
    end_angle: f32,
    color: Color,
    width: f32,
) {
    ellipse(surface, center, (radius, radius), 0.0, start_angle, end_angle, color, width);
}

/// Stroke an elliptical arc. `rotation` turns the ellipse's axes; angles are
/// measured in the ellipse's own frame.
#[allow(clippy::too_many_arguments)]
pub fn ellipse(
    surface: &mut Surface,
    center: (f32, f32),
    radii: (f32, f32),
    rotation: f32,
    start_angle: f32,
    end_angle: f32,
    color: Color,
    width: f32,
) {
    let Some((points, closed)) = ellipse_path(center, radii, rotation, start_angle, end_angle) else {
        return;
    };
    let width = line_width(width);
    let mut cov = Coverage::new(surface, &points, width * 0.5);
    cov.stroke_polyline(&points, closed, width);
    cov.composite(surface, color.to_rgba());
}

/// Fill an ellipse, or the region between an elliptical arc and its chord
pub fn fill_ellipse(
    surface: &mut Surface,
    center: (f32, f32),
    radii: (f32, f32),
    rotation: f32,
    start_angle: f32,
    end_angle: f32,
    color: Color,
) {
    let Some((points, _)) = ellipse_path(center, radii, rotation, start_angle, end_angle) else {
        return;
    };
    let mut cov = Coverage::new(surface, &points, 0.0);
    cov.fill_polygon(&points);
    cov.composite(surface, color.to_rgba());
}

// =============================================================================
// Path helpers
// =============================================================================

/// Non-positive or non-finite widths fall back to the default
fn line_width(width: f32) -> f32 {
    if width.is_finite() && width > 0.0 {
        width
    } else {
        DEFAULT_LINE_WIDTH
    }
}

fn min_max(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn rect_corners(rect: &Rect) -> [(f32, f32); 4] {
    [
        (rect.left(), rect.top()),
        (rect.right(), rect.top()),
        (rect.right(), rect.bottom()),
        (rect.left(), rect.bottom()),
    ]
}

/// Sweep from start to end going clockwise. A difference of a full turn or
/// more is the whole ellipse; otherwise it wraps into [0, 2pi).
fn sweep_angle(start: f32, end: f32) -> f32 {
    let diff = end - start;
    if diff >= TAU {
        TAU
    } else {
        diff.rem_euclid(TAU)
    }
}

/// Flatten an elliptical arc into points. Returns `None` for shapes that
/// cover nothing (negative or zero radii, zero sweep).
fn ellipse_path(
    center: (f32, f32),
    radii: (f32, f32),
    rotation: f32,
    start: f32,
    end: f32,
) -> Option<(Vec<(f32, f32)>, bool)> {
    let (rx, ry) = radii;
    if !(rx > 0.0 && ry > 0.0) || !start.is_finite() || !end.is_finite() {
        log::debug!("draw: skipping degenerate ellipse radii {:?}", radii);
        return None;
    }
    let sweep = sweep_angle(start, end);
    if sweep <= 0.0 {
        return None;
    }
    let closed = sweep >= TAU;

    // Roughly one segment per 2 pixels of arc length
    let segments = ((sweep * rx.max(ry)) / 2.0).ceil().max(8.0) as usize;
    let segments = segments.min(MAX_CURVE_SEGMENTS);

    let (sin_r, cos_r) = rotation.sin_cos();
    let points = (0..=segments)
        .map(|i| {
            let theta = start + sweep * i as f32 / segments as f32;
            let lx = rx * theta.cos();
            let ly = ry * theta.sin();
            (
                center.0 + lx * cos_r - ly * sin_r,
                center.1 + lx * sin_r + ly * cos_r,
            )
        })
        .collect();
    Some((points, closed))
}

// =============================================================================
// Coverage buffer
// =============================================================================

/// Per-pixel hit flags for one shape, covering only the part of the target
/// its points (plus stroke padding) can reach
struct Coverage {
    /// Pixel box `[x0, x1) x [y0, y1)` in surface coordinates
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    hits: Vec<bool>,
}

impl Coverage {
    fn new(surface: &Surface, points: &[(f32, f32)], pad: f32) -> Self {
        let (sw, sh) = surface.size();
        let (mut l, mut t, mut r, mut b) =
            (f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in points {
            l = l.min(p.0);
            t = t.min(p.1);
            r = r.max(p.0);
            b = b.max(p.1);
        }

        // One extra pixel for floored Bresenham endpoints
        let pad = pad + 1.0;
        let l = (l - pad).floor().max(0.0);
        let t = (t - pad).floor().max(0.0);
        let r = (r + pad).ceil().min(sw as f32);
        let b = (b + pad).ceil().min(sh as f32);
        if !(l < r && t < b) {
            return Self { x0: 0, y0: 0, x1: 0, y1: 0, hits: Vec::new() };
        }

        let (x0, y0, x1, y1) = (l as i32, t as i32, r as i32, b as i32);
        Self {
            x0,
            y0,
            x1,
            y1,
            hits: vec![false; (x1 - x0) as usize * (y1 - y0) as usize],
        }
    }

    #[inline]
    fn mark(&mut self, x: i32, y: i32) {
        if x >= self.x0 && y >= self.y0 && x < self.x1 && y < self.y1 {
            let w = (self.x1 - self.x0) as usize;
            self.hits[(y - self.y0) as usize * w + (x - self.x0) as usize] = true;
        }
    }

    /// Pixel index range whose centers fall in [lo, hi], clipped to [min, max)
    fn center_range(lo: f32, hi: f32, min: i32, max: i32) -> std::ops::Range<i32> {
        let first = (lo - 0.5).ceil().max(min as f32);
        let last = (hi - 0.5).floor().min(max as f32 - 1.0);
        if last < first {
            return 0..0;
        }
        first as i32..last as i32 + 1
    }

    /// Mark every pixel in `bounds` (l, t, r, b) whose center passes `inside`
    fn mark_where<F: Fn(f32, f32) -> bool>(&mut self, bounds: (f32, f32, f32, f32), inside: F) {
        let xs = Self::center_range(bounds.0, bounds.2, self.x0, self.x1);
        for y in Self::center_range(bounds.1, bounds.3, self.y0, self.y1) {
            let py = y as f32 + 0.5;
            for x in xs.clone() {
                if inside(x as f32 + 0.5, py) {
                    self.mark(x, y);
                }
            }
        }
    }

    /// Bresenham between the pixels containing `a` and `b`, walking only the
    /// part of the segment near the coverage box
    fn mark_thin_segment(&mut self, a: (f32, f32), b: (f32, f32)) {
        let clip = (
            self.x0 as f64 - 1.0,
            self.y0 as f64 - 1.0,
            self.x1 as f64 + 1.0,
            self.y1 as f64 + 1.0,
        );
        let Some((a, b)) = clip_segment(a, b, clip) else {
            return;
        };
        let (mut x, mut y) = (a.0.floor() as i32, a.1.floor() as i32);
        let (x1, y1) = (b.0.floor() as i32, b.1.floor() as i32);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.mark(x, y);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Thick segment as a quad: centers within `half` of the segment and
    /// between its end caps
    fn mark_thick_segment(&mut self, a: (f32, f32), b: (f32, f32), half: f32) {
        let dx = b.0 - a.0;
        let dy = b.1 - a.1;
        let len_sq = dx * dx + dy * dy;
        if !len_sq.is_finite() || len_sq < 1e-6 {
            return;
        }
        let len = len_sq.sqrt();

        let bounds = (
            a.0.min(b.0) - half,
            a.1.min(b.1) - half,
            a.0.max(b.0) + half,
            a.1.max(b.1) + half,
        );
        self.mark_where(bounds, |px, py| {
            let rx = px - a.0;
            let ry = py - a.1;
            let t = (rx * dx + ry * dy) / len_sq;
            let dist = (dx * ry - dy * rx).abs() / len;
            (0.0..=1.0).contains(&t) && dist <= half
        });
    }

    fn mark_disc(&mut self, c: (f32, f32), radius: f32) {
        let r_sq = radius * radius;
        let bounds = (c.0 - radius, c.1 - radius, c.0 + radius, c.1 + radius);
        self.mark_where(bounds, |px, py| {
            let dx = px - c.0;
            let dy = py - c.1;
            dx * dx + dy * dy <= r_sq
        });
    }

    /// Stroke a polyline; wide strokes get round joins at inner vertices
    fn stroke_polyline(&mut self, points: &[(f32, f32)], closed: bool, width: f32) {
        if points.len() < 2 {
            return;
        }
        let mut segments: Vec<((f32, f32), (f32, f32))> =
            points.windows(2).map(|w| (w[0], w[1])).collect();
        if closed {
            segments.push((points[points.len() - 1], points[0]));
        }

        if width <= 1.0 {
            for (a, b) in segments {
                self.mark_thin_segment(a, b);
            }
            return;
        }

        let half = width * 0.5;
        for &(a, b) in &segments {
            self.mark_thick_segment(a, b, half);
        }
        let joins = if closed { points } else { &points[1..points.len() - 1] };
        for &p in joins {
            self.mark_disc(p, half);
        }
    }

    /// Nonzero-winding scanline fill of a closed polygon
    fn fill_polygon(&mut self, points: &[(f32, f32)]) {
        if points.len() < 3 {
            return;
        }
        let (min_y, max_y) = points
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));

        let mut crossings: Vec<(f32, i32)> = Vec::new();
        for y in Self::center_range(min_y, max_y, self.y0, self.y1) {
            let cy = y as f32 + 0.5;
            crossings.clear();

            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                let dir = if a.1 <= cy && b.1 > cy {
                    1
                } else if b.1 <= cy && a.1 > cy {
                    -1
                } else {
                    continue;
                };
                let t = (cy - a.1) / (b.1 - a.1);
                crossings.push((a.0 + t * (b.0 - a.0), dir));
            }
            crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if winding != 0 {
                    // Centers in [left, right)
                    let left = pair[0].0;
                    let right = pair[1].0;
                    let first = (left - 0.5).ceil().max(self.x0 as f32) as i32;
                    let end = (right - 0.5).ceil().min(self.x1 as f32) as i32;
                    for x in first..end {
                        self.mark(x, y);
                    }
                }
            }
        }
    }

    fn composite(self, surface: &mut Surface, color: Rgba) {
        if color.a == 0 {
            return;
        }
        let w = (self.x1 - self.x0).max(1) as usize;
        for (i, &hit) in self.hits.iter().enumerate() {
            if hit {
                let x = self.x0 + (i % w) as i32;
                let y = self.y0 + (i / w) as i32;
                surface.blend_at(x, y, color);
            }
        }
    }
}

/// Liang-Barsky clip of segment `a`-`b` against `(l, t, r, b)`. `None` when
/// the segment misses the box or has a non-finite endpoint. Endpoints that
/// are already inside come back unchanged.
fn clip_segment(
    a: (f32, f32),
    b: (f32, f32),
    bounds: (f64, f64, f64, f64),
) -> Option<((f32, f32), (f32, f32))> {
    if !(a.0.is_finite() && a.1.is_finite() && b.0.is_finite() && b.1.is_finite()) {
        return None;
    }
    let (ax, ay) = (a.0 as f64, a.1 as f64);
    let dx = b.0 as f64 - ax;
    let dy = b.1 as f64 - ay;
    let (l, t, r, bt) = bounds;

    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [(-dx, ax - l), (dx, r - ax), (-dy, ay - t), (dy, bt - ay)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let u = q / p;
        if p < 0.0 {
            if u > t1 {
                return None;
            }
            t0 = t0.max(u);
        } else {
            if u < t0 {
                return None;
            }
            t1 = t1.min(u);
        }
    }

    let start = if t0 > 0.0 {
        ((ax + t0 * dx) as f32, (ay + t0 * dy) as f32)
    } else {
        a
    };
    let end = if t1 < 1.0 {
        ((ax + t1 * dx) as f32, (ay + t1 * dy) as f32)
    } else {
        b
    };
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: usize, h: usize) -> Surface {
        Surface::new(w, h)
    }

    fn lit(s: &Surface) -> usize {
        s.pixels().chunks_exact(4).filter(|p| p[3] != 0).count()
    }

    #[test]
    fn test_fill_rect_exact_pixels() {
        let mut s = canvas(10, 10);
        fill_rect(&mut s, &Rect::new(2.0, 3.0, 4.0, 2.0), Color::RED);
        assert_eq!(lit(&s), 8);
        assert_eq!(s.get_at((2.0, 3.0)), Rgba::opaque(255, 0, 0));
        assert_eq!(s.get_at((5.0, 4.0)), Rgba::opaque(255, 0, 0));
        assert_eq!(s.get_at((6.0, 4.0)), Rgba::TRANSPARENT);
        assert_eq!(s.get_at((2.0, 5.0)), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_fill_rect_negative_size() {
        let mut s = canvas(10, 10);
        fill_rect(&mut s, &Rect::new(6.0, 5.0, -4.0, -2.0), Color::WHITE);
        assert_eq!(lit(&s), 8);
        assert_eq!(s.get_at((2.0, 3.0)), Rgba::WHITE);
    }

    #[test]
    fn test_fill_rect_clipped() {
        let mut s = canvas(4, 4);
        fill_rect(&mut s, &Rect::new(-10.0, -10.0, 100.0, 100.0), Color::BLUE);
        assert_eq!(lit(&s), 16);
    }

    #[test]
    fn test_default_color_is_opaque_black() {
        let mut s = canvas(2, 2);
        fill_rect(&mut s, &Rect::new(0.0, 0.0, 1.0, 1.0), Color::default());
        assert_eq!(s.get_at((0.0, 0.0)), Rgba::BLACK);
    }

    #[test]
    fn test_rect_outline_leaves_interior() {
        let mut s = canvas(12, 12);
        rect(&mut s, &Rect::new(2.0, 2.0, 6.0, 6.0), Color::WHITE, DEFAULT_LINE_WIDTH);
        assert_eq!(s.get_at((2.0, 2.0)), Rgba::WHITE);
        assert_eq!(s.get_at((8.0, 5.0)), Rgba::WHITE);
        assert_eq!(s.get_at((5.0, 5.0)), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_thick_rect_outline() {
        let mut s = canvas(20, 20);
        rect(&mut s, &Rect::new(4.0, 4.0, 10.0, 10.0), Color::WHITE, 4.0);
        // Band is 2px either side of each edge, corners mitered
        assert_eq!(s.get_at((2.0, 2.0)), Rgba::WHITE);
        assert_eq!(s.get_at((5.0, 9.0)), Rgba::WHITE);
        assert_eq!(s.get_at((1.0, 9.0)), Rgba::TRANSPARENT);
        assert_eq!(s.get_at((9.0, 9.0)), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_line_thin_endpoints() {
        let mut s = canvas(10, 10);
        line(&mut s, (1.0, 1.0), (8.0, 1.0), Color::GREEN, 1.0);
        assert_eq!(lit(&s), 8);
        assert_eq!(s.get_at((1.0, 1.0)), Rgba::opaque(0, 255, 0));
        assert_eq!(s.get_at((8.0, 1.0)), Rgba::opaque(0, 255, 0));
    }

    #[test]
    fn test_line_thick_butt_caps() {
        let mut s = canvas(20, 20);
        line(&mut s, (5.0, 10.0), (15.0, 10.0), Color::WHITE, 4.0);
        assert_eq!(s.get_at((10.0, 8.0)), Rgba::WHITE);
        assert_eq!(s.get_at((10.0, 11.0)), Rgba::WHITE);
        assert_eq!(s.get_at((10.0, 12.0)), Rgba::TRANSPARENT);
        // Nothing past the end caps
        assert_eq!(s.get_at((4.0, 10.0)), Rgba::TRANSPARENT);
        assert_eq!(s.get_at((15.0, 10.0)), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_fill_circle_symmetric() {
        let mut s = canvas(21, 21);
        fill_circle(&mut s, (10.5, 10.5), 5.0, Color::WHITE);
        assert_eq!(s.get_at((10.0, 10.0)), Rgba::WHITE);
        assert_eq!(s.get_at((10.0, 6.0)), Rgba::WHITE);
        assert_eq!(s.get_at((10.0, 14.0)), Rgba::WHITE);
        assert_eq!(s.get_at((6.0, 10.0)), Rgba::WHITE);
        assert_eq!(s.get_at((14.0, 10.0)), Rgba::WHITE);
        assert_eq!(s.get_at((10.0, 4.0)), Rgba::TRANSPARENT);
        assert_eq!(s.get_at((6.0, 6.0)), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_circle_outline_hollow() {
        let mut s = canvas(30, 30);
        circle(&mut s, (15.0, 15.0), 10.0, Color::WHITE, 2.0);
        assert_eq!(s.get_at((15.0, 15.0)), Rgba::TRANSPARENT);
        assert_eq!(s.get_at((24.0, 15.0)), Rgba::WHITE);
        assert_eq!(s.get_at((15.0, 5.0)), Rgba::WHITE);
    }

    #[test]
    fn test_arc_quarter_only() {
        let mut s = canvas(30, 30);
        // 0..pi/2 sweeps clockwise from +x down to +y
        arc(&mut s, (15.0, 15.0), 10.0, 0.0, std::f32::consts::FRAC_PI_2, Color::WHITE, 3.0);
        assert_eq!(s.get_at((22.0, 22.0)), Rgba::WHITE);
        assert_eq!(s.get_at((8.0, 8.0)), Rgba::TRANSPARENT);
        assert_eq!(s.get_at((5.0, 15.0)), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_sweep_angle_rules() {
        assert!((sweep_angle(0.0, TAU) - TAU).abs() < 1e-6);
        assert!((sweep_angle(0.0, 3.0 * TAU) - TAU).abs() < 1e-6);
        assert!((sweep_angle(1.0, 0.5) - (TAU - 0.5)).abs() < 1e-4);
        assert_eq!(sweep_angle(1.0, 1.0), 0.0);
    }

    #[test]
    fn test_fill_ellipse_rotated() {
        let mut s = canvas(40, 40);
        // Long axis along y after a quarter turn
        fill_ellipse(&mut s, (20.0, 20.0), (15.0, 4.0), std::f32::consts::FRAC_PI_2, 0.0, TAU, Color::WHITE);
        assert_eq!(s.get_at((20.0, 32.0)), Rgba::WHITE);
        assert_eq!(s.get_at((32.0, 20.0)), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_degenerate_shapes_draw_nothing() {
        let mut s = canvas(10, 10);
        fill_circle(&mut s, (5.0, 5.0), -3.0, Color::WHITE);
        circle(&mut s, (5.0, 5.0), 0.0, Color::WHITE, 1.0);
        arc(&mut s, (5.0, 5.0), 3.0, 1.0, 1.0, Color::WHITE, 1.0);
        fill_rect(&mut s, &Rect::new(2.0, 2.0, 0.0, 5.0), Color::WHITE);
        assert_eq!(lit(&s), 0);
    }

    #[test]
    fn test_translucent_stroke_blends_once() {
        let mut s = canvas(30, 30);
        s.fill("black");
        let half_white = Color::with_alpha(255, 255, 255, 0.5);
        circle(&mut s, (15.0, 15.0), 10.0, half_white, 4.0);
        // Joins overlap segments but each pixel is composited once
        let px = s.get_at((25.0, 15.0));
        assert!((px.r as i32 - 128).abs() <= 1, "{:?}", px);
    }

    #[test]
    fn test_far_off_line_is_clipped() {
        let mut s = canvas(4, 4);
        line(&mut s, (-3e9, 1.0), (3e9, 1.0), Color::WHITE, 1.0);
        assert_eq!(lit(&s), 4);
        assert_eq!(s.get_at((0.0, 1.0)), Rgba::WHITE);
        assert_eq!(s.get_at((3.0, 1.0)), Rgba::WHITE);

        // Entirely outside, in any direction
        let mut s = canvas(4, 4);
        line(&mut s, (-1e8, -5.0), (1e8, -5.0), Color::WHITE, 1.0);
        line(&mut s, (1e30, 1e30), (2e30, -1e30), Color::WHITE, 1.0);
        line(&mut s, (f32::NAN, 0.0), (2.0, 2.0), Color::WHITE, 1.0);
        assert_eq!(lit(&s), 0);
    }

    #[test]
    fn test_clip_segment_keeps_inside_endpoints() {
        let bounds = (-1.0, -1.0, 11.0, 11.0);
        assert_eq!(
            clip_segment((1.5, 2.5), (8.0, 9.0), bounds),
            Some(((1.5, 2.5), (8.0, 9.0)))
        );
        let (a, b) = clip_segment((-100.0, 5.0), (100.0, 5.0), bounds).unwrap();
        assert!((a.0 + 1.0).abs() < 0.001);
        assert!((b.0 - 11.0).abs() < 0.001);
        assert_eq!(clip_segment((-5.0, -5.0), (-2.0, 20.0), bounds), None);
    }

    #[test]
    fn test_coverage_sized_to_shape() {
        let s = canvas(1920, 1080);
        let cov = Coverage::new(&s, &[(100.0, 100.0), (103.0, 102.0)], 0.5);
        assert!(cov.hits.len() <= 8 * 8);

        let off = Coverage::new(&s, &[(-50.0, -50.0), (-40.0, -40.0)], 1.0);
        assert!(off.hits.is_empty());
    }

    #[test]
    fn test_small_shape_far_from_origin() {
        let mut s = canvas(200, 100);
        fill_circle(&mut s, (150.5, 60.5), 2.0, Color::RED);
        assert_eq!(s.get_at((150.0, 60.0)), Rgba::opaque(255, 0, 0));
        assert_eq!(s.get_at((150.0, 57.0)), Rgba::TRANSPARENT);
        fill_rect(&mut s, &Rect::new(190.0, 90.0, 50.0, 50.0), Color::BLUE);
        assert_eq!(s.get_at((199.0, 99.0)), Rgba::opaque(0, 0, 255));
        assert_eq!(s.get_at((189.0, 99.0)), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_transparent_color_is_noop() {
        let mut s = canvas(4, 4);
        s.fill("red");
        fill_rect(&mut s, &Rect::new(0.0, 0.0, 4.0, 4.0), Color::TRANSPARENT);
        assert_eq!(s.get_at((1.0, 1.0)), Rgba::opaque(255, 0, 0));
    }
}
