//! Geometric transforms producing new surfaces
//!
//! All sampling is nearest-neighbor at destination pixel centers (no
//! smoothing). The input surface is never modified.

use crate::surface::Surface;

/// Resample `surf` to exactly `size`. Aspect ratio is not preserved.
pub fn scale(surf: &Surface, size: (usize, usize)) -> Surface {
    let (dw, dh) = size;
    let (sw, sh) = surf.size();
    let mut scaled = Surface::new(dw, dh);
    if sw == 0 || sh == 0 || dw == 0 || dh == 0 {
        log::debug!("scale: degenerate {}x{} -> {}x{}", sw, sh, dw, dh);
        return scaled;
    }

    let fx = sw as f32 / dw as f32;
    let fy = sh as f32 / dh as f32;
    for y in 0..dh {
        let sy = (((y as f32 + 0.5) * fy) as usize).min(sh - 1);
        for x in 0..dw {
            let sx = (((x as f32 + 0.5) * fx) as usize).min(sw - 1);
            scaled.put(x, y, surf.pixel(sx, sy));
        }
    }
    scaled
}

/// Size of the axis-aligned box enclosing a `w x h` rect rotated by `angle` degrees
pub fn rotated_size(w: usize, h: usize, angle: f32) -> (usize, usize) {
    let rad = (angle as f64).to_radians();
    let cos = rad.cos().abs();
    let sin = rad.sin().abs();
    let new_w = snap_ceil(w as f64 * cos + h as f64 * sin);
    let new_h = snap_ceil(w as f64 * sin + h as f64 * cos);
    (new_w, new_h)
}

/// `ceil`, except values within 1e-6 of an integer snap to it first.
/// Keeps `cos(90°)` round-off from growing the box by a pixel.
fn snap_ceil(v: f64) -> usize {
    let r = v.round();
    let v = if (v - r).abs() < 1e-6 { r } else { v.ceil() };
    v.max(0.0) as usize
}

/// Rotate `surf` about its center by `angle` degrees (positive turns
/// clockwise on screen, y pointing down).
///
/// The result is the smallest axis-aligned box holding the whole rotated
/// image; uncovered corners stay transparent.
pub fn rotate(surf: &Surface, angle: f32) -> Surface {
    let (w, h) = surf.size();
    let (new_w, new_h) = rotated_size(w, h, angle);
    let mut rotated = Surface::new(new_w, new_h);
    if w == 0 || h == 0 {
        return rotated;
    }

    let rad = (angle as f64).to_radians();
    let (sin, cos) = rad.sin_cos();
    let cx = new_w as f64 / 2.0;
    let cy = new_h as f64 / 2.0;
    let half_w = w as f64 / 2.0;
    let half_h = h as f64 / 2.0;

    for y in 0..new_h {
        let py = y as f64 + 0.5 - cy;
        for x in 0..new_w {
            let px = x as f64 + 0.5 - cx;
            // Inverse rotation back into source space
            let sx = (px * cos + py * sin + half_w).floor();
            let sy = (-px * sin + py * cos + half_h).floor();
            if sx < 0.0 || sy < 0.0 || sx >= w as f64 || sy >= h as f64 {
                continue;
            }
            rotated.put(x, y, surf.pixel(sx as usize, sy as usize));
        }
    }
    rotated
}

/// Mirror `surf` horizontally and/or vertically. Size is unchanged.
pub fn flip(surf: &Surface, flip: (bool, bool)) -> Surface {
    let (w, h) = surf.size();
    let (flip_x, flip_y) = flip;
    let mut flipped = Surface::new(w, h);
    for y in 0..h {
        let sy = if flip_y { h - 1 - y } else { y };
        for x in 0..w {
            let sx = if flip_x { w - 1 - x } else { x };
            flipped.put(x, y, surf.pixel(sx, sy));
        }
    }
    flipped
}
