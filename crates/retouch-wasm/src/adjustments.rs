//! Color adjustments WASM bindings.
//!
//! This module provides JavaScript bindings for the ColorAdjustments type,
//! allowing slider values to be set from TypeScript and applied to images.

use crate::types::JsPixelBuffer;
use retouch_core::adjustments::apply_color_adjustments as core_apply;
use wasm_bindgen::prelude::*;

/// Color adjustments wrapper for JavaScript
#[wasm_bindgen]
#[derive(Default)]
pub struct ColorAdjustments {
    inner: retouch_core::ColorAdjustments,
}

#[wasm_bindgen]
impl ColorAdjustments {
    /// Create new color adjustments with default values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f64 {
        self.inner.brightness
    }

    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: f64) {
        self.inner.brightness = value;
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f64 {
        self.inner.contrast
    }

    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f64) {
        self.inner.contrast = value;
    }

    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> f64 {
        self.inner.saturation
    }

    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: f64) {
        self.inner.saturation = value;
    }

    /// Hue rotation in degrees
    #[wasm_bindgen(getter)]
    pub fn hue(&self) -> f64 {
        self.inner.hue
    }

    #[wasm_bindgen(setter)]
    pub fn set_hue(&mut self, value: f64) {
        self.inner.hue = value;
    }

    #[wasm_bindgen(getter)]
    pub fn lightness(&self) -> f64 {
        self.inner.lightness
    }

    #[wasm_bindgen(setter)]
    pub fn set_lightness(&mut self, value: f64) {
        self.inner.lightness = value;
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }
}

/// Apply color adjustments to an image.
///
/// Returns a new image; the source is not modified.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const adj = new ColorAdjustments();
/// adj.hue = 30;
/// const preview = apply_color_adjustments(image, adj);
/// ```
#[wasm_bindgen]
pub fn apply_color_adjustments(
    image: &JsPixelBuffer,
    adjustments: &ColorAdjustments,
) -> JsPixelBuffer {
    let mut buffer = image.to_buffer();
    core_apply(&mut buffer, &adjustments.inner);
    JsPixelBuffer::from_buffer(buffer)
}
