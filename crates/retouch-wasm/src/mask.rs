//! Selection mask WASM bindings.
//!
//! This module provides JavaScript bindings for feathered selection masks,
//! allowing vector selections drawn in TypeScript to be rasterized and used
//! to composite edits.

use crate::types::{JsAlphaMask, JsPixelBuffer};
use retouch_core::mask::{self as core_mask, FeatherSpec, SelectionShape, DEFAULT_FEATHER_PADDING};
use wasm_bindgen::prelude::*;

fn feather_spec(radius: f64, padding_factor: Option<f64>) -> FeatherSpec {
    FeatherSpec {
        radius,
        padding_factor: padding_factor.unwrap_or(DEFAULT_FEATHER_PADDING),
    }
}

/// Build a feathered alpha mask from a selection shape.
///
/// # Arguments
/// * `shape_data` - JavaScript object matching `SelectionShape`
/// * `width` - Mask width in pixels (the image width)
/// * `height` - Mask height in pixels (the image height)
/// * `feather_radius` - Blur radius in pixels, 0 for a hard edge
/// * `padding_factor` - Halo padding in units of the radius (default 2)
///
/// # Example (TypeScript)
/// ```typescript
/// const shape = {
///   commands: [
///     { type: 'moveTo', to: { x: 10, y: 10 } },
///     { type: 'lineTo', to: { x: 200, y: 40 } },
///     { type: 'lineTo', to: { x: 120, y: 180 } },
///     { type: 'close' },
///   ],
///   fill_rule: 'nonZero',
/// };
///
/// const mask = build_feathered_mask(shape, image.width, image.height, 8);
/// ```
#[wasm_bindgen]
pub fn build_feathered_mask(
    shape_data: JsValue,
    width: u32,
    height: u32,
    feather_radius: f64,
    padding_factor: Option<f64>,
) -> Result<JsAlphaMask, JsValue> {
    // Parse the shape from JavaScript
    let shape: SelectionShape = serde_wasm_bindgen::from_value(shape_data)
        .map_err(|e| JsValue::from_str(&format!("Invalid selection shape: {}", e)))?;

    let spec = feather_spec(feather_radius, padding_factor);
    let mask = core_mask::build_feathered_mask(&shape, width, height, &spec);
    Ok(JsAlphaMask::from_mask(mask))
}

/// Blend `edited` over `original` through `mask`.
///
/// Where the mask is 255 the edited pixel is used, where it is 0 the
/// original is kept, and partial coverage mixes the two.
#[wasm_bindgen]
pub fn composite_masked(
    original: &JsPixelBuffer,
    edited: &JsPixelBuffer,
    mask: &JsAlphaMask,
) -> Result<JsPixelBuffer, JsValue> {
    let (original, edited) = (original.to_buffer(), edited.to_buffer());
    let result = core_mask::composite_masked(&original, &edited, &mask.to_mask())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(JsPixelBuffer::from_buffer(result))
}

/// Cut the selection out of an image by multiplying its alpha by `mask`.
#[wasm_bindgen]
pub fn apply_mask_to_alpha(
    image: &JsPixelBuffer,
    mask: &JsAlphaMask,
) -> Result<JsPixelBuffer, JsValue> {
    let mut buffer = image.to_buffer();
    core_mask::apply_mask_to_alpha(&mut buffer, &mask.to_mask())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(JsPixelBuffer::from_buffer(buffer))
}
