//! blitkit: software raster surfaces for small 2D games
//!
//! Immediate-mode, single-threaded building blocks in the spirit of classic
//! retained-canvas game libraries:
//! - Rect-based AABB collision with inclusive edges
//! - RGBA surfaces with blit, per-pixel access and color keying
//! - Pixel-exact collision masks derived from surface alpha
//! - Nearest-neighbor scale/rotate/flip
//! - Shape drawing (rects, circles, lines, arcs, ellipses)
//!
//! # Module Organization
//!
//! - `rect` - Rect and edge helpers
//! - `color` - Rgba pixels, record colors, color arguments
//! - `surface` - Surface pixel buffer and compositing
//! - `mask` - collision masks
//! - `transform` - scale, rotate, flip
//! - `draw` - stroke/fill primitives
//! - `config` - RON runtime config for hosts
//! - `error` - BlitError

pub mod color;
pub mod config;
pub mod draw;
pub mod error;
pub mod mask;
pub mod rect;
pub mod surface;
pub mod transform;

// =============================================================================
// Convenience re-exports for commonly used items
// =============================================================================

pub use color::{Color, ColorArg, Rgba};
pub use config::RuntimeConfig;
pub use error::{BlitError, Result};
pub use mask::{Mask, DEFAULT_ALPHA_THRESHOLD};
pub use rect::Rect;
pub use surface::Surface;
