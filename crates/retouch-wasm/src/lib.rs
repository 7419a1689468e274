//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate provides WASM bindings to expose the retouch-core functionality
//! to the editor's TypeScript front end.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for RGBA images and masks
//! - `color` - RGB/HSL conversion and CSS color formatting
//! - `geometry` - Crop handle hit testing and Bézier flattening
//! - `transform` - Perspective transforms, warping and cropping
//! - `mask` - Feathered selection masks and masked compositing
//! - `adjustments` - Color adjustments (brightness, contrast, HSL)
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsPixelBuffer, perspective_crop } from '@retouch/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const data = ctx.getImageData(0, 0, canvas.width, canvas.height);
//! const image = new JsPixelBuffer(data.width, data.height, data.data);
//! const rectified = perspective_crop(image, [x0, y0, x1, y1, x2, y2, x3, y3]);
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod color;
mod geometry;
mod mask;
mod transform;
mod types;

// Re-export public types
pub use adjustments::{apply_color_adjustments, ColorAdjustments};
pub use color::{hex_to_rgba, hsl_to_rgb, rgb_to_hsl};
pub use geometry::{
    approximate_cubic_bezier, get_handle_at_point, handle_cursor, is_point_in_rect,
    resize_crop_rect,
};
pub use mask::{apply_mask_to_alpha, build_feathered_mask, composite_masked};
pub use transform::{apply_crop, compute_perspective_transform, perspective_crop, warp_perspective};
pub use types::{JsAlphaMask, JsPixelBuffer};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
