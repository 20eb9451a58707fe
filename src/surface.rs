//! Software pixel surface
//!
//! A `Surface` owns an RGBA buffer (4 bytes per pixel, row-major) whose size
//! is fixed at construction. Drawing composites with straight-alpha
//! source-over; per-pixel writes replace the pixel outright.

use crate::color::{Color, ColorArg, Rgba};
use crate::error::{BlitError, Result};
use crate::rect::Rect;
use std::path::Path;

pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    /// Cached positioning helper handed out by `get_rect` and moved by `blit`
    rect: Rect,
    colorkey: Option<Color>,
}

impl Surface {
    /// Create a transparent black surface
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
            rect: Rect::new(0.0, 0.0, width as f32, height as f32),
            colorkey: None,
        }
    }

    /// Wrap a raw decoded RGBA buffer
    pub fn from_rgba(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        let expected = width * height * 4;
        if pixels.len() != expected {
            return Err(BlitError::BufferSize { expected, actual: pixels.len() });
        }
        Ok(Self {
            width,
            height,
            pixels,
            rect: Rect::new(0.0, 0.0, width as f32, height as f32),
            colorkey: None,
        })
    }

    /// Load an image file (PNG/JPEG/BMP). Pixels are copied unfiltered.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| BlitError::Image(format!("Failed to load {}: {}", path.display(), e)))?;
        let rgba = img.to_rgba8();
        let (w, h) = rgba.dimensions();
        log::debug!("Loaded {} ({}x{})", path.display(), w, h);
        Self::from_rgba(w as usize, h as usize, rgba.into_raw())
    }

    /// Decode an in-memory image
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        let rgba = img.to_rgba8();
        let (w, h) = rgba.dimensions();
        Self::from_rgba(w as usize, h as usize, rgba.into_raw())
    }

    /// Write the buffer out as a PNG
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        image::save_buffer_with_format(
            path.as_ref(),
            &self.pixels,
            self.width as u32,
            self.height as u32,
            image::ExtendedColorType::Rgba8,
            image::ImageFormat::Png,
        )?;
        Ok(())
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

    /// Raw RGBA bytes, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Composite a flat color over every pixel
    pub fn fill(&mut self, color: impl Into<ColorArg>) {
        let color = color.into().resolve();
        if color.a == 255 {
            let bytes = color.to_bytes();
            for px in self.pixels.chunks_exact_mut(4) {
                px.copy_from_slice(&bytes);
            }
            return;
        }
        for px in self.pixels.chunks_exact_mut(4) {
            let back = Rgba::new(px[0], px[1], px[2], px[3]);
            px.copy_from_slice(&color.over(back).to_bytes());
        }
    }

    /// Composite all of `other` onto this surface with its top-left at `pos`.
    ///
    /// The position is floored and stored into the cached rect. Pixels that
    /// land outside this surface are dropped.
    pub fn blit(&mut self, other: &Surface, pos: (f32, f32)) {
        self.rect.x = pos.0;
        self.rect.y = pos.1;

        if pos.0.is_nan() || pos.1.is_nan() {
            return;
        }
        // Anything further out than one sprite away clips to nothing
        let ox = pos
            .0
            .floor()
            .clamp(-(other.width as f32) - 1.0, self.width as f32 + 1.0) as i64;
        let oy = pos
            .1
            .floor()
            .clamp(-(other.height as f32) - 1.0, self.height as f32 + 1.0) as i64;

        // Source rows/cols that land inside the destination
        let sx0 = (-ox).max(0) as usize;
        let sy0 = (-oy).max(0) as usize;
        let sx1 = (self.width as i64 - ox).clamp(0, other.width as i64) as usize;
        let sy1 = (self.height as i64 - oy).clamp(0, other.height as i64) as usize;
        if sx0 >= sx1 || sy0 >= sy1 {
            return;
        }

        for sy in sy0..sy1 {
            let dy = (sy as i64 + oy) as usize;
            for sx in sx0..sx1 {
                let dx = (sx as i64 + ox) as usize;
                let src = other.pixel(sx, sy);
                if src.a == 0 {
                    continue;
                }
                let back = self.pixel(dx, dy);
                self.put(dx, dy, src.over(back));
            }
        }
    }

    // ------------------------------------------------------------------------
    // Utility
    // ------------------------------------------------------------------------

    /// New blank surface of the same size. Pixel content is NOT copied.
    pub fn copy(&self) -> Surface {
        Surface::new(self.width, self.height)
    }

    /// The surface's cached positioning rect.
    ///
    /// This is shared state: the same rect is returned on every call and
    /// `blit` also moves it. When `pos` is given the rect's origin is moved
    /// there first. Take a `Rect::copy()` to keep an independent value.
    pub fn get_rect(&mut self, pos: Option<(f32, f32)>) -> &mut Rect {
        if let Some((x, y)) = pos {
            self.rect.x = x;
            self.rect.y = y;
        }
        &mut self.rect
    }

    /// Read one pixel. Positions outside the buffer read as transparent black.
    pub fn get_at(&self, pos: (f32, f32)) -> Rgba {
        match self.index_of(pos) {
            Some((x, y)) => self.pixel(x, y),
            None => Rgba::TRANSPARENT,
        }
    }

    /// Replace one pixel. Positions outside the buffer are ignored.
    pub fn set_at(&mut self, pos: (f32, f32), color: impl Into<ColorArg>) {
        let color = color.into().resolve();
        if let Some((x, y)) = self.index_of(pos) {
            self.put(x, y, color);
        }
    }

    /// Set the color key and stamp it onto the current pixels.
    ///
    /// Every pixel whose RGB equals the key's RGB gets alpha 0; the key's own
    /// alpha is not compared. This is a one-time stamp: pixels drawn later are
    /// not keyed, and passing `None` only forgets the key without restoring
    /// alpha that was already zeroed.
    pub fn set_colorkey(&mut self, color: Option<Color>) {
        self.colorkey = color;
        let Some(key) = color else {
            return;
        };
        let key = key.to_rgba();
        for px in self.pixels.chunks_exact_mut(4) {
            if Rgba::new(px[0], px[1], px[2], px[3]).same_rgb(key) {
                px[3] = 0;
            }
        }
    }

    pub fn get_colorkey(&self) -> Option<Color> {
        self.colorkey
    }

    // ------------------------------------------------------------------------
    // Crate-internal pixel access
    // ------------------------------------------------------------------------

    /// Unchecked-by-contract read, callers guarantee `x < width && y < height`
    #[inline]
    pub(crate) fn pixel(&self, x: usize, y: usize) -> Rgba {
        let idx = (y * self.width + x) * 4;
        Rgba::new(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    #[inline]
    pub(crate) fn put(&mut self, x: usize, y: usize, color: Rgba) {
        let idx = (y * self.width + x) * 4;
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
    }

    /// Source-over a single pixel, bounds-checked
    #[inline]
    pub(crate) fn blend_at(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let back = self.pixel(x, y);
        self.put(x, y, color.over(back));
    }

    fn index_of(&self, pos: (f32, f32)) -> Option<(usize, usize)> {
        let x = pos.0.floor();
        let y = pos.1.floor();
        if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
            return None;
        }
        Some((x as usize, y as usize))
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rect", &self.rect)
            .field("colorkey", &self.colorkey)
            .finish()
    }
}
