//! RGB/HSL color conversion and hex color formatting.
//!
//! HSL is the working space of every hue/saturation/lightness adjustment,
//! so the two conversions must invert each other up to rounding:
//! `hsl_to_rgb(rgb_to_hsl(c))` is within one unit of `c` per channel.
//!
//! # Ranges
//!
//! - RGB channels: 0 to 255
//! - Hue: 0.0 to 360.0 (exclusive), in degrees
//! - Saturation and lightness: 0.0 to 100.0, in percent

use serde::{Deserialize, Serialize};

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as a lowercase `#rrggbb` string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A color in hue/saturation/lightness form.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue in degrees (0.0 to 360.0)
    pub h: f64,
    /// Saturation in percent (0.0 to 100.0)
    pub s: f64,
    /// Lightness in percent (0.0 to 100.0)
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

/// Convert an RGB color to HSL.
///
/// Achromatic colors (all channels equal) have hue and saturation 0.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new(h * 60.0, s * 100.0, l * 100.0)
}

/// Convert an HSL color to RGB.
///
/// Hue is wrapped into 0..360; saturation and lightness are clamped to 0..100.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h.rem_euclid(360.0) / 360.0;
    let s = (hsl.s / 100.0).clamp(0.0, 1.0);
    let l = (hsl.l / 100.0).clamp(0.0, 1.0);

    if s == 0.0 {
        let v = to_channel(l);
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Rgb::new(
        to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_rgb(p, q, h)),
        to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

/// Evaluate one channel of the HSL piecewise curve at hue fraction `t`.
#[inline]
fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[inline]
fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Parse a `#rgb` or `#rrggbb` hex color.
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#')?;
    if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match digits.len() {
        3 => {
            let mut channels = [0u8; 3];
            for (channel, c) in channels.iter_mut().zip(digits.chars()) {
                let v = c.to_digit(16)? as u8;
                *channel = v * 16 + v;
            }
            Some(Rgb::new(channels[0], channels[1], channels[2]))
        }
        6 => Some(Rgb::new(
            u8::from_str_radix(&digits[0..2], 16).ok()?,
            u8::from_str_radix(&digits[2..4], 16).ok()?,
            u8::from_str_radix(&digits[4..6], 16).ok()?,
        )),
        _ => None,
    }
}

/// Format a hex color with an opacity as an `rgba(r, g, b, a)` expression.
///
/// `opacity_percent` is 0 to 100. Input that is not `#rgb` or `#rrggbb` is
/// returned unchanged, so callers can pass through colors that are already
/// CSS expressions such as `rgba(...)`.
pub fn hex_to_rgba(hex: &str, opacity_percent: f64) -> String {
    match parse_hex(hex) {
        Some(rgb) => {
            let alpha = (opacity_percent / 100.0).clamp(0.0, 1.0);
            format!("rgba({}, {}, {}, {})", rgb.r, rgb.g, rgb.b, alpha)
        }
        None => hex.to_string(),
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
