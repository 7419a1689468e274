//! WASM-compatible wrapper types for image and mask data.
//!
//! This module provides JavaScript-friendly types that wrap the core Retouch types,
//! handling the conversion between Rust and JavaScript data representations.

use retouch_core::{AlphaMask, PixelBuffer};
use wasm_bindgen::prelude::*;

/// An RGBA image wrapper for JavaScript.
///
/// The layout matches canvas `ImageData`: 4 bytes per pixel, row-major.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`. Keep images in WASM memory across
/// operations and only extract pixels when drawing.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a new JsPixelBuffer from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    ///
    /// Fails if `pixels` does not hold exactly `width * height * 4` bytes.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsPixelBuffer, JsValue> {
        let buffer = PixelBuffer::from_raw(width, height, pixels)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_buffer(buffer))
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            width: buffer.width,
            height: buffer.height,
            pixels: buffer.pixels,
        }
    }

    /// Convert to a core PixelBuffer.
    ///
    /// Note: This clones the pixel data.
    pub(crate) fn to_buffer(&self) -> PixelBuffer {
        PixelBuffer::new(self.width, self.height, self.pixels.clone())
    }
}

/// A selection mask wrapper for JavaScript, one byte of coverage per pixel.
#[wasm_bindgen]
pub struct JsAlphaMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

#[wasm_bindgen]
impl JsAlphaMask {
    /// Create a mask from dimensions and coverage bytes (0 to 255).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<JsAlphaMask, JsValue> {
        let mask = AlphaMask::from_raw(width, height, data)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_mask(mask))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns coverage bytes as Uint8Array (copy).
    pub fn data(&self) -> Vec<u8> {
        self.data.clone()
    }

    /// Expand to RGBA with the coverage in every channel, for drawing a
    /// mask overlay onto a canvas.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.data.iter().flat_map(|&a| [a, a, a, a]).collect()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsAlphaMask {
    pub(crate) fn from_mask(mask: AlphaMask) -> Self {
        Self {
            width: mask.width,
            height: mask.height,
            data: mask.data,
        }
    }

    pub(crate) fn to_mask(&self) -> AlphaMask {
        AlphaMask::new(self.width, self.height, self.data.clone())
    }
}
