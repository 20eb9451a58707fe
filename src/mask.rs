//! Pixel-exact collision masks
//!
//! A `Mask` is a dense bitmap, one byte (0/1) per pixel, row-major with
//! index `y * width + x`. Masks are usually derived once from a surface's
//! alpha channel and then tested against each other with `overlap`.

use crate::color::Color;
use crate::error::{BlitError, Result};
use crate::surface::Surface;

/// Default alpha threshold for `Mask::from_surface` (half range)
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 127;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Mask {
    /// Create a mask with every bit clear
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn get_at(&self, x: i32, y: i32) -> Result<bool> {
        let idx = self.index(x, y)?;
        Ok(self.data[idx] == 1)
    }

    pub fn set_at(&mut self, x: i32, y: i32, value: bool) -> Result<()> {
        let idx = self.index(x, y)?;
        self.data[idx] = value as u8;
        Ok(())
    }

    /// Number of set bits
    pub fn count(&self) -> usize {
        self.data.iter().map(|&b| b as usize).sum()
    }

    /// Set every bit
    pub fn fill(&mut self) {
        self.data.fill(1);
    }

    /// Clear every bit
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// First point where both masks have a set bit, with `other`'s origin
    /// placed at `offset` in this mask's coordinates.
    ///
    /// Offsets are floored and a non-finite offset overlaps nothing. The
    /// overlapping region is scanned row by row (y outer, x inner, both
    /// ascending) and the first hit is returned in this mask's coordinates,
    /// so the result is deterministic.
    pub fn overlap(&self, other: &Mask, offset: (f32, f32)) -> Option<(i32, i32)> {
        if !offset.0.is_finite() || !offset.1.is_finite() {
            return None;
        }
        let ox = offset.0.floor() as i64;
        let oy = offset.1.floor() as i64;

        let x0 = ox.max(0);
        let y0 = oy.max(0);
        let x1 = (self.width as i64).min(ox.saturating_add(other.width as i64));
        let y1 = (self.height as i64).min(oy.saturating_add(other.height as i64));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        for y in y0..y1 {
            let row = y as usize * self.width;
            let other_row = (y - oy) as usize * other.width;
            for x in x0..x1 {
                if self.data[row + x as usize] == 1
                    && other.data[other_row + (x - ox) as usize] == 1
                {
                    return Some((x as i32, y as i32));
                }
            }
        }
        None
    }

    /// Threshold a surface's alpha channel: a bit is set where alpha is
    /// strictly greater than `threshold`.
    ///
    /// Reads the raw buffer, so a color key only matters through the alpha
    /// it already stamped. The mask is a snapshot and does not track later
    /// changes to the surface.
    pub fn from_surface(surf: &Surface, threshold: u8) -> Mask {
        let (w, h) = surf.size();
        let mut mask = Mask::new(w, h);
        for (bit, px) in mask.data.iter_mut().zip(surf.pixels().chunks_exact(4)) {
            *bit = (px[3] > threshold) as u8;
        }
        mask
    }

    /// Render one solid pixel per bit: `set_color` where set, `unset_color`
    /// elsewhere. Pixels are written directly, not blended.
    pub fn to_surface(&self, set_color: Color, unset_color: Color) -> Surface {
        let set = set_color.to_rgba();
        let unset = unset_color.to_rgba();
        let mut surf = Surface::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let bit = self.data[y * self.width + x] == 1;
                surf.put(x, y, if bit { set } else { unset });
            }
        }
        surf
    }

    /// `to_surface` with the usual white-on-black colors
    pub fn to_surface_default(&self) -> Surface {
        self.to_surface(Color::WHITE, Color::BLACK)
    }

    fn index(&self, x: i32, y: i32) -> Result<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return Err(BlitError::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width + x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    fn filled(width: usize, height: usize) -> Mask {
        let mut m = Mask::new(width, height);
        m.fill();
        m
    }

    #[test]
    fn test_bounds_checked_access() {
        let mut m = Mask::new(3, 2);
        assert!(m.set_at(2, 1, true).is_ok());
        assert!(m.get_at(2, 1).unwrap());
        assert!(!m.get_at(0, 0).unwrap());

        assert!(matches!(m.get_at(3, 0), Err(BlitError::IndexOutOfBounds { .. })));
        assert!(matches!(m.get_at(0, 2), Err(BlitError::IndexOutOfBounds { .. })));
        assert!(matches!(m.set_at(-1, 0, true), Err(BlitError::IndexOutOfBounds { .. })));
        assert!(matches!(m.set_at(0, -1, true), Err(BlitError::IndexOutOfBounds { .. })));
    }

    #[test]
    fn test_count_fill_clear() {
        let mut m = Mask::new(4, 3);
        assert_eq!(m.count(), 0);
        m.fill();
        assert_eq!(m.count(), 12);
        m.set_at(1, 1, false).unwrap();
        assert_eq!(m.count(), 11);
        m.clear();
        assert_eq!(m.count(), 0);
    }

    #[test]
    fn test_overlap_first_scan_hit() {
        let a = filled(4, 4);
        let b = filled(2, 2);
        assert_eq!(a.overlap(&b, (1.0, 1.0)), Some((1, 1)));
    }

    #[test]
    fn test_overlap_scan_order_row_major() {
        let mut a = Mask::new(4, 4);
        a.set_at(3, 1, true).unwrap();
        a.set_at(0, 2, true).unwrap();
        let b = filled(4, 4);
        // (3,1) comes before (0,2) in y-outer scan order
        assert_eq!(a.overlap(&b, (0.0, 0.0)), Some((3, 1)));
    }

    #[test]
    fn test_overlap_negative_offset() {
        let mut a = Mask::new(4, 4);
        a.set_at(0, 0, true).unwrap();
        let mut b = Mask::new(4, 4);
        b.set_at(2, 3, true).unwrap();
        assert_eq!(a.overlap(&b, (-2.0, -3.0)), Some((0, 0)));
        assert_eq!(a.overlap(&b, (-2.0, -2.0)), None);
    }

    #[test]
    fn test_overlap_offset_is_floored() {
        let a = filled(4, 4);
        let b = filled(1, 1);
        assert_eq!(a.overlap(&b, (2.7, 1.2)), Some((2, 1)));
        assert_eq!(a.overlap(&b, (-0.5, 0.0)), None);
    }

    #[test]
    fn test_overlap_disjoint_regions() {
        let a = filled(4, 4);
        let b = filled(2, 2);
        assert_eq!(a.overlap(&b, (4.0, 0.0)), None);
        assert_eq!(a.overlap(&b, (0.0, -2.0)), None);
        assert_eq!(a.overlap(&Mask::new(0, 0), (0.0, 0.0)), None);
    }

    #[test]
    fn test_overlap_huge_or_non_finite_offset() {
        let a = filled(4, 4);
        let b = filled(3, 3);
        assert_eq!(a.overlap(&b, (1e20, 0.0)), None);
        assert_eq!(a.overlap(&b, (-1e20, 0.0)), None);
        assert_eq!(a.overlap(&b, (0.0, 1e20)), None);
        assert_eq!(a.overlap(&b, (f32::INFINITY, 0.0)), None);
        assert_eq!(a.overlap(&b, (f32::NAN, 0.0)), None);
        assert_eq!(a.overlap(&b, (0.0, f32::NAN)), None);
    }

    #[test]
    fn test_overlap_no_shared_bits() {
        let mut a = Mask::new(2, 1);
        a.set_at(0, 0, true).unwrap();
        let mut b = Mask::new(2, 1);
        b.set_at(1, 0, true).unwrap();
        assert_eq!(a.overlap(&b, (0.0, 0.0)), None);
    }

    #[test]
    fn test_overlap_hit_is_mutual() {
        let mut a = Mask::new(5, 5);
        a.set_at(4, 4, true).unwrap();
        a.set_at(1, 3, true).unwrap();
        let mut b = Mask::new(3, 3);
        b.set_at(0, 1, true).unwrap();

        for dy in -4..6 {
            for dx in -4..6 {
                let fwd = a.overlap(&b, (dx as f32, dy as f32));
                let back = b.overlap(&a, (-dx as f32, -dy as f32));
                assert_eq!(fwd.is_some(), back.is_some(), "offset ({}, {})", dx, dy);
            }
        }
    }

    #[test]
    fn test_from_surface_transparent_is_empty() {
        let surf = Surface::new(2, 2);
        let m = Mask::from_surface(&surf, DEFAULT_ALPHA_THRESHOLD);
        assert_eq!(m.count(), 0);
        assert_eq!(m.size(), (2, 2));
    }

    #[test]
    fn test_from_surface_threshold_strict() {
        let mut surf = Surface::new(3, 1);
        surf.set_at((0.0, 0.0), [0u8, 0, 0, 127]);
        surf.set_at((1.0, 0.0), [0u8, 0, 0, 128]);
        surf.set_at((2.0, 0.0), [0u8, 0, 0, 255]);
        let m = Mask::from_surface(&surf, DEFAULT_ALPHA_THRESHOLD);
        assert!(!m.get_at(0, 0).unwrap());
        assert!(m.get_at(1, 0).unwrap());
        assert!(m.get_at(2, 0).unwrap());

        let m = Mask::from_surface(&surf, 200);
        assert_eq!(m.count(), 1);
    }

    #[test]
    fn test_from_surface_sees_colorkey_stamp() {
        let mut surf = Surface::new(2, 1);
        surf.fill("magenta");
        surf.set_at((1.0, 0.0), "white");
        surf.set_colorkey(Some(Color::new(255, 0, 255)));
        let m = Mask::from_surface(&surf, DEFAULT_ALPHA_THRESHOLD);
        assert!(!m.get_at(0, 0).unwrap());
        assert!(m.get_at(1, 0).unwrap());
    }

    #[test]
    fn test_to_surface_colors() {
        let mut m = Mask::new(2, 1);
        m.set_at(0, 0, true).unwrap();
        let surf = m.to_surface_default();
        assert_eq!(surf.get_at((0.0, 0.0)), Rgba::WHITE);
        assert_eq!(surf.get_at((1.0, 0.0)), Rgba::BLACK);

        let half = Color::with_alpha(10, 20, 30, 0.5);
        let surf = m.to_surface(half, Color::TRANSPARENT);
        assert_eq!(surf.get_at((0.0, 0.0)), Rgba::new(10, 20, 30, 128));
        assert_eq!(surf.get_at((1.0, 0.0)), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_round_trip_matches_direct_threshold() {
        let mut surf = Surface::new(4, 3);
        let alphas = [0u8, 40, 127, 128, 200, 255];
        for y in 0..3 {
            for x in 0..4 {
                let a = alphas[(x + y * 4) % alphas.len()];
                surf.set_at((x as f32, y as f32), [9u8, 9, 9, a]);
            }
        }

        let t = 100;
        let mask = Mask::from_surface(&surf, t);
        let rendered = mask.to_surface(Color::WHITE, Color::TRANSPARENT);
        let again = Mask::from_surface(&rendered, t);
        assert_eq!(again, mask);

        for y in 0..3 {
            for x in 0..4 {
                let expect = surf.get_at((x as f32, y as f32)).a > t;
                assert_eq!(mask.get_at(x, y).unwrap(), expect);
            }
        }
    }
}
