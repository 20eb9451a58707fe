//! Color types
//!
//! - `Rgba` - a raw 8-bit pixel as stored in a `Surface`
//! - `Color` - record color with float alpha, used by drawing and masks
//! - `ColorArg` - what `Surface::fill`/`set_at` accept: a named color string
//!   or an explicit 3/4-channel value

use crate::error::{BlitError, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// Raw pixel
// =============================================================================

/// One RGBA pixel, 8 bits per channel, non-premultiplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };
    pub const BLACK: Rgba = Rgba { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Rgba = Rgba { r: 255, g: 255, b: 255, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Source-over: composite `self` (front) onto `back`
    ///
    /// Works on straight alpha. Opaque fronts replace the back pixel
    /// exactly and fully transparent fronts leave it untouched.
    pub fn over(self, back: Rgba) -> Rgba {
        match self.a {
            255 => return self,
            0 => return back,
            _ => {}
        }

        let sa = self.a as u32;
        let inv = 255 - sa;
        // Output alpha scaled by 255
        let out_a = sa * 255 + back.a as u32 * inv;
        if out_a == 0 {
            return Rgba::TRANSPARENT;
        }

        let mix = |s: u8, d: u8| -> u8 {
            let num = s as u32 * sa * 255 + d as u32 * back.a as u32 * inv;
            ((num + out_a / 2) / out_a).min(255) as u8
        };

        Rgba {
            r: mix(self.r, back.r),
            g: mix(self.g, back.g),
            b: mix(self.b, back.b),
            a: ((out_a + 127) / 255).min(255) as u8,
        }
    }

    /// RGB equality, alpha ignored (used by color keying)
    pub fn same_rgb(self, other: Rgba) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }
}

// =============================================================================
// Record color
// =============================================================================

/// Structured color: 8-bit RGB with a 0.0-1.0 alpha
///
/// Every field is optional when deserializing. Missing channels are 0 and
/// missing alpha is fully opaque, so `Color { r: 255, ..Default::default() }`
/// is opaque red.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 1.0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 1.0 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 1.0 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 1.0 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 1.0 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0.0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to a raw pixel, alpha = round(a * 255)
    pub fn to_rgba(self) -> Rgba {
        let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba::new(self.r, self.g, self.b, a)
    }
}

impl From<Color> for Rgba {
    fn from(c: Color) -> Self {
        c.to_rgba()
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::with_alpha(c.r, c.g, c.b, c.a as f32 / 255.0)
    }
}

// =============================================================================
// Color argument
// =============================================================================

/// Color accepted by `Surface::fill` and `Surface::set_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorArg {
    /// Host color string: CSS keyword, `#hex`, `rgb()` or `rgba()`
    Named(String),
    /// Opaque RGB
    Rgb(u8, u8, u8),
    /// Explicit RGBA
    Rgba(u8, u8, u8, u8),
}

impl ColorArg {
    /// Build from a channel list. Only 3 or 4 channels are valid.
    pub fn from_channels(channels: &[u8]) -> Result<Self> {
        match *channels {
            [r, g, b] => Ok(ColorArg::Rgb(r, g, b)),
            [r, g, b, a] => Ok(ColorArg::Rgba(r, g, b, a)),
            _ => Err(BlitError::InvalidColorFormat(format!(
                "expected 3 or 4 channels, got {}",
                channels.len()
            ))),
        }
    }

    /// Resolve to a concrete pixel. RGB implies alpha 255.
    pub fn resolve(&self) -> Rgba {
        match self {
            ColorArg::Named(name) => resolve_named(name),
            ColorArg::Rgb(r, g, b) => Rgba::opaque(*r, *g, *b),
            ColorArg::Rgba(r, g, b, a) => Rgba::new(*r, *g, *b, *a),
        }
    }
}

impl Default for ColorArg {
    fn default() -> Self {
        ColorArg::Named("black".to_string())
    }
}

impl TryFrom<&[u8]> for ColorArg {
    type Error = BlitError;

    fn try_from(channels: &[u8]) -> Result<Self> {
        ColorArg::from_channels(channels)
    }
}

impl From<&str> for ColorArg {
    fn from(name: &str) -> Self {
        ColorArg::Named(name.to_string())
    }
}

impl From<String> for ColorArg {
    fn from(name: String) -> Self {
        ColorArg::Named(name)
    }
}

impl From<[u8; 3]> for ColorArg {
    fn from(c: [u8; 3]) -> Self {
        ColorArg::Rgb(c[0], c[1], c[2])
    }
}

impl From<[u8; 4]> for ColorArg {
    fn from(c: [u8; 4]) -> Self {
        ColorArg::Rgba(c[0], c[1], c[2], c[3])
    }
}

impl From<Rgba> for ColorArg {
    fn from(c: Rgba) -> Self {
        ColorArg::Rgba(c.r, c.g, c.b, c.a)
    }
}

impl From<Color> for ColorArg {
    fn from(c: Color) -> Self {
        c.to_rgba().into()
    }
}

// =============================================================================
// Named color resolution
// =============================================================================

/// Resolve a host color string the way a 1x1 scratch fill would.
///
/// An unparseable string leaves the fill style at its default (black), so it
/// resolves to opaque black.
pub fn resolve_named(name: &str) -> Rgba {
    match parse_color_str(name) {
        Some(c) => c,
        None => {
            log::warn!("Unrecognized color {:?}, using black", name);
            Rgba::BLACK
        }
    }
}

/// Parse a CSS-style color string. Returns `None` when it is not a color.
pub fn parse_color_str(s: &str) -> Option<Rgba> {
    let s = s.trim().to_ascii_lowercase();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    if let Some(args) = s.strip_prefix("rgba(").or_else(|| s.strip_prefix("rgb(")) {
        return parse_rgb_fn(args.strip_suffix(')')?);
    }

    if s == "transparent" {
        return Some(Rgba::TRANSPARENT);
    }

    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == s)
        .map(|&(_, rgb)| Rgba::opaque((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Rgba::opaque(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Rgba::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_rgb_fn(args: &str) -> Option<Rgba> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    let channel = |p: &str| -> Option<u8> {
        let v: f32 = p.parse().ok()?;
        Some(v.round().clamp(0.0, 255.0) as u8)
    };

    match parts[..] {
        [r, g, b] => Some(Rgba::opaque(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => {
            let a = match a.strip_suffix('%') {
                Some(pct) => pct.parse::<f32>().ok()? / 100.0,
                None => a.parse::<f32>().ok()?,
            };
            let a = (a.clamp(0.0, 1.0) * 255.0).round() as u8;
            Some(Rgba::new(channel(r)?, channel(g)?, channel(b)?, a))
        }
        _ => None,
    }
}

/// CSS color keywords (0xRRGGBB)
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xF0F8FF),
    ("antiquewhite", 0xFAEBD7),
    ("aqua", 0x00FFFF),
    ("aquamarine", 0x7FFFD4),
    ("azure", 0xF0FFFF),
    ("beige", 0xF5F5DC),
    ("bisque", 0xFFE4C4),
    ("black", 0x000000),
    ("blanchedalmond", 0xFFEBCD),
    ("blue", 0x0000FF),
    ("blueviolet", 0x8A2BE2),
    ("brown", 0xA52A2A),
    ("burlywood", 0xDEB887),
    ("cadetblue", 0x5F9EA0),
    ("chartreuse", 0x7FFF00),
    ("chocolate", 0xD2691E),
    ("coral", 0xFF7F50),
    ("cornflowerblue", 0x6495ED),
    ("cornsilk", 0xFFF8DC),
    ("crimson", 0xDC143C),
    ("cyan", 0x00FFFF),
    ("darkblue", 0x00008B),
    ("darkcyan", 0x008B8B),
    ("darkgoldenrod", 0xB8860B),
    ("darkgray", 0xA9A9A9),
    ("darkgreen", 0x006400),
    ("darkgrey", 0xA9A9A9),
    ("darkkhaki", 0xBDB76B),
    ("darkmagenta", 0x8B008B),
    ("darkolivegreen", 0x556B2F),
    ("darkorange", 0xFF8C00),
    ("darkorchid", 0x9932CC),
    ("darkred", 0x8B0000),
    ("darksalmon", 0xE9967A),
    ("darkseagreen", 0x8FBC8F),
    ("darkslateblue", 0x483D8B),
    ("darkslategray", 0x2F4F4F),
    ("darkslategrey", 0x2F4F4F),
    ("darkturquoise", 0x00CED1),
    ("darkviolet", 0x9400D3),
    ("deeppink", 0xFF1493),
    ("deepskyblue", 0x00BFFF),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1E90FF),
    ("firebrick", 0xB22222),
    ("floralwhite", 0xFFFAF0),
    ("forestgreen", 0x228B22),
    ("fuchsia", 0xFF00FF),
    ("gainsboro", 0xDCDCDC),
    ("ghostwhite", 0xF8F8FF),
    ("gold", 0xFFD700),
    ("goldenrod", 0xDAA520),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xADFF2F),
    ("grey", 0x808080),
    ("honeydew", 0xF0FFF0),
    ("hotpink", 0xFF69B4),
    ("indianred", 0xCD5C5C),
    ("indigo", 0x4B0082),
    ("ivory", 0xFFFFF0),
    ("khaki", 0xF0E68C),
    ("lavender", 0xE6E6FA),
    ("lavenderblush", 0xFFF0F5),
    ("lawngreen", 0x7CFC00),
    ("lemonchiffon", 0xFFFACD),
    ("lightblue", 0xADD8E6),
    ("lightcoral", 0xF08080),
    ("lightcyan", 0xE0FFFF),
    ("lightgoldenrodyellow", 0xFAFAD2),
    ("lightgray", 0xD3D3D3),
    ("lightgreen", 0x90EE90),
    ("lightgrey", 0xD3D3D3),
    ("lightpink", 0xFFB6C1),
    ("lightsalmon", 0xFFA07A),
    ("lightseagreen", 0x20B2AA),
    ("lightskyblue", 0x87CEFA),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xB0C4DE),
    ("lightyellow", 0xFFFFE0),
    ("lime", 0x00FF00),
    ("limegreen", 0x32CD32),
    ("linen", 0xFAF0E6),
    ("magenta", 0xFF00FF),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66CDAA),
    ("mediumblue", 0x0000CD),
    ("mediumorchid", 0xBA55D3),
    ("mediumpurple", 0x9370DB),
    ("mediumseagreen", 0x3CB371),
    ("mediumslateblue", 0x7B68EE),
    ("mediumspringgreen", 0x00FA9A),
    ("mediumturquoise", 0x48D1CC),
    ("mediumvioletred", 0xC71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xF5FFFA),
    ("mistyrose", 0xFFE4E1),
    ("moccasin", 0xFFE4B5),
    ("navajowhite", 0xFFDEAD),
    ("navy", 0x000080),
    ("oldlace", 0xFDF5E6),
    ("olive", 0x808000),
    ("olivedrab", 0x6B8E23),
    ("orange", 0xFFA500),
    ("orangered", 0xFF4500),
    ("orchid", 0xDA70D6),
    ("palegoldenrod", 0xEEE8AA),
    ("palegreen", 0x98FB98),
    ("paleturquoise", 0xAFEEEE),
    ("palevioletred", 0xDB7093),
    ("papayawhip", 0xFFEFD5),
    ("peachpuff", 0xFFDAB9),
    ("peru", 0xCD853F),
    ("pink", 0xFFC0CB),
    ("plum", 0xDDA0DD),
    ("powderblue", 0xB0E0E6),
    ("purple", 0x800080),
    ("rebeccapurple", 0x663399),
    ("red", 0xFF0000),
    ("rosybrown", 0xBC8F8F),
    ("royalblue", 0x4169E1),
    ("saddlebrown", 0x8B4513),
    ("salmon", 0xFA8072),
    ("sandybrown", 0xF4A460),
    ("seagreen", 0x2E8B57),
    ("seashell", 0xFFF5EE),
    ("sienna", 0xA0522D),
    ("silver", 0xC0C0C0),
    ("skyblue", 0x87CEEB),
    ("slateblue", 0x6A5ACD),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xFFFAFA),
    ("springgreen", 0x00FF7F),
    ("steelblue", 0x4682B4),
    ("tan", 0xD2B48C),
    ("teal", 0x008080),
    ("thistle", 0xD8BFD8),
    ("tomato", 0xFF6347),
    ("turquoise", 0x40E0D0),
    ("violet", 0xEE82EE),
    ("wheat", 0xF5DEB3),
    ("white", 0xFFFFFF),
    ("whitesmoke", 0xF5F5F5),
    ("yellow", 0xFFFF00),
    ("yellowgreen", 0x9ACD32),
];
