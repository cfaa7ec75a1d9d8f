// filepath: src/color.rs
//! Color values for the pixel sandbox
//!
//! Colors are small immutable values. Every constructor clamps its inputs,
//! so a `Color` in hand always has channels in range.

use std::fmt;

/// Straight-alpha RGBA color.
///
/// `r`, `g`, `b` are integer channels in `[0, 255]`, `a` is opacity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 1.0,
    };

    /// Returned for reads outside the surface.
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    /// Build a color, rounding and clamping each channel.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
            a: clamp_alpha(a),
        }
    }

    /// Opaque color from channel values.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque color from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    pub fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    /// Rebuild a color from stored RGBA bytes.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
            a: bytes[3] as f64 / 255.0,
        }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: clamp_alpha(a),
            ..self
        }
    }

    pub fn opaque(self) -> Self {
        self.with_alpha(1.0)
    }

    /// Raw bytes as stored in a surface cell: alpha becomes `round(a * 255)`.
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, alpha_byte(self.a)]
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn to_hex(self) -> String {
        // The 1 << 24 bias keeps leading zeros; its digit is dropped again.
        let packed = (1u32 << 24) + ((self.r as u32) << 16) + ((self.g as u32) << 8) + self.b as u32;
        let digits = format!("{:x}", packed);
        format!("#{}", &digits[1..])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// A color as handed to `set_pixel`: channels may be out of range and the
/// alpha may be missing altogether.
///
/// A missing alpha is painted opaque, while an explicit `Some(0.0)` stays
/// fully transparent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorInput {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: Option<f64>,
}

impl ColorInput {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: None }
    }

    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a: Some(a) }
    }

    /// Resolve into the four bytes written to the surface.
    pub fn to_bytes(self) -> [u8; 4] {
        let a = match self.a {
            Some(a) if !a.is_nan() => a,
            _ => 1.0,
        };
        [
            clamp_channel(self.r),
            clamp_channel(self.g),
            clamp_channel(self.b),
            alpha_byte(clamp_alpha(a)),
        ]
    }
}

impl From<Color> for ColorInput {
    fn from(c: Color) -> Self {
        Self {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: Some(c.a),
        }
    }
}

fn clamp_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

fn clamp_alpha(a: f64) -> f64 {
    if a.is_nan() {
        return 0.0;
    }
    a.clamp(0.0, 1.0)
}

fn alpha_byte(a: f64) -> u8 {
    (a * 255.0).round() as u8
}
