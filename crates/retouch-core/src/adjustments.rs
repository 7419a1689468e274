//! Color adjustment algorithms
//!
//! Applies slider-driven color adjustments to RGBA pixel data.
//!
//! ## Adjustment Order
//! 1. Brightness
//! 2. Contrast
//! 3. Hue
//! 4. Saturation
//! 5. Lightness
//!
//! Steps 3 to 5 run in HSL space through [`rgb_to_hsl`] and [`hsl_to_rgb`].
//! Alpha is never modified.

use crate::color::{hsl_to_rgb, rgb_to_hsl, Hsl, Rgb};
use crate::types::PixelBuffer;
use serde::{Deserialize, Serialize};

/// Color adjustments for image editing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorAdjustments {
    /// Brightness offset (-100 to 100)
    pub brightness: f64,
    /// Contrast (-100 to 100)
    pub contrast: f64,
    /// Saturation scale (-100 to 100, -100 removes all color)
    pub saturation: f64,
    /// Hue rotation in degrees (-180 to 180)
    pub hue: f64,
    /// Lightness offset in HSL percent (-100 to 100)
    pub lightness: f64,
}

impl ColorAdjustments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    fn touches_hsl(&self) -> bool {
        self.hue != 0.0 || self.saturation != 0.0 || self.lightness != 0.0
    }
}

/// Apply all adjustments to an image in place.
pub fn apply_color_adjustments(image: &mut PixelBuffer, adjustments: &ColorAdjustments) {
    // Early exit if no adjustments
    if adjustments.is_default() {
        return;
    }

    let use_hsl = adjustments.touches_hsl();

    for chunk in image.pixels.chunks_exact_mut(PixelBuffer::CHANNELS) {
        let mut r = chunk[0] as f64 / 255.0;
        let mut g = chunk[1] as f64 / 255.0;
        let mut b = chunk[2] as f64 / 255.0;

        (r, g, b) = apply_brightness(r, g, b, adjustments.brightness);
        (r, g, b) = apply_contrast(r, g, b, adjustments.contrast);

        let mut rgb = Rgb::new(to_u8(r), to_u8(g), to_u8(b));
        if use_hsl {
            rgb = hsl_to_rgb(apply_hsl(rgb_to_hsl(rgb), adjustments));
        }

        chunk[0] = rgb.r;
        chunk[1] = rgb.g;
        chunk[2] = rgb.b;
    }
}

/// Apply brightness adjustment.
///
/// Formula: `output = input + brightness/100`
#[inline]
fn apply_brightness(r: f64, g: f64, b: f64, brightness: f64) -> (f64, f64, f64) {
    if brightness == 0.0 {
        return (r, g, b);
    }
    let offset = brightness / 100.0;
    (r + offset, g + offset, b + offset)
}

/// Apply contrast adjustment around mid-gray.
///
/// Formula: `output = (input - 0.5) * (1 + contrast/100) + 0.5`
#[inline]
fn apply_contrast(r: f64, g: f64, b: f64, contrast: f64) -> (f64, f64, f64) {
    if contrast == 0.0 {
        return (r, g, b);
    }
    let factor = 1.0 + contrast / 100.0;
    (
        (r - 0.5) * factor + 0.5,
        (g - 0.5) * factor + 0.5,
        (b - 0.5) * factor + 0.5,
    )
}

/// Hue rotation, saturation scale and lightness offset.
#[inline]
fn apply_hsl(hsl: Hsl, adjustments: &ColorAdjustments) -> Hsl {
    Hsl::new(
        hsl.h + adjustments.hue,
        (hsl.s * (1.0 + adjustments.saturation / 100.0)).clamp(0.0, 100.0),
        (hsl.l + adjustments.lightness).clamp(0.0, 100.0),
    )
}

#[inline]
fn to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
