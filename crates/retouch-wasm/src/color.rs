//! Color conversion WASM bindings.

use retouch_core::color::{self, Hsl, Rgb};
use wasm_bindgen::prelude::*;

/// Convert an RGB triple to `[h, s, l]` (degrees, percent, percent).
#[wasm_bindgen]
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Vec<f64> {
    let hsl = color::rgb_to_hsl(Rgb::new(r, g, b));
    vec![hsl.h, hsl.s, hsl.l]
}

/// Convert HSL to an `[r, g, b]` byte triple.
#[wasm_bindgen]
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Vec<u8> {
    let rgb = color::hsl_to_rgb(Hsl::new(h, s, l));
    vec![rgb.r, rgb.g, rgb.b]
}

/// Format a hex color with an opacity (0 to 100) as a CSS `rgba()` string.
///
/// Unparseable input is returned unchanged.
#[wasm_bindgen]
pub fn hex_to_rgba(hex: &str, opacity_percent: f64) -> String {
    color::hex_to_rgba(hex, opacity_percent)
}
