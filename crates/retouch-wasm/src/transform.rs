//! WASM bindings for image transformation operations.
//!
//! This module provides JavaScript bindings for perspective correction and
//! crop operations used by the crop tool's preview and commit paths.
//!
//! Quadrilaterals cross the boundary as flat `[x0, y0, x1, y1, x2, y2, x3, y3]`
//! arrays in top-left, top-right, bottom-left, bottom-right order, and
//! transforms as 9 row-major numbers.

use crate::types::JsPixelBuffer;
use retouch_core::linalg::Matrix3x3;
use retouch_core::transform::{
    apply_crop as core_crop, compute_transform, perspective_crop as core_perspective_crop,
    warp as core_warp,
};
use retouch_core::{Point, Rect};
use wasm_bindgen::prelude::*;

/// Parse a flat coordinate array into four points.
fn parse_quad(coords: &[f64]) -> Result<[Point; 4], String> {
    if coords.len() != 8 {
        return Err(format!("Expected 8 coordinates (4 points), got {}", coords.len()));
    }
    Ok(std::array::from_fn(|i| Point::new(coords[2 * i], coords[2 * i + 1])))
}

fn parse_matrix(values: &[f64]) -> Result<Matrix3x3, String> {
    let m: [f64; 9] = values
        .try_into()
        .map_err(|_| format!("Expected 9 matrix values, got {}", values.len()))?;
    Ok(Matrix3x3(m))
}

/// Compute the perspective transform mapping `src` onto `dst`.
///
/// # Arguments
///
/// * `src` - Four source points as 8 numbers
/// * `dst` - Four destination points as 8 numbers
///
/// # Returns
///
/// The 3x3 matrix as 9 row-major numbers, or an error string when the points
/// are degenerate (collinear or duplicated).
///
/// # Example (TypeScript)
///
/// ```typescript
/// const m = compute_perspective_transform(picked, [0, 0, w, 0, 0, h, w, h]);
/// ```
#[wasm_bindgen]
pub fn compute_perspective_transform(src: &[f64], dst: &[f64]) -> Result<Vec<f64>, JsValue> {
    let src = parse_quad(src).map_err(|e| JsValue::from_str(&e))?;
    let dst = parse_quad(dst).map_err(|e| JsValue::from_str(&e))?;
    let m = compute_transform(&src, &dst).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(m.0.to_vec())
}

/// Warp an image through a perspective transform.
///
/// `transform` maps source to destination coordinates (as returned by
/// [`compute_perspective_transform`]). Output pixels that map outside the
/// source are transparent.
#[wasm_bindgen]
pub fn warp_perspective(
    image: &JsPixelBuffer,
    dest_width: u32,
    dest_height: u32,
    transform: &[f64],
) -> Result<JsPixelBuffer, JsValue> {
    let m = parse_matrix(transform).map_err(|e| JsValue::from_str(&e))?;
    let result = core_warp(&image.to_buffer(), dest_width, dest_height, &m)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(JsPixelBuffer::from_buffer(result))
}

/// Rectify the quadrilateral `quad` of an image into an upright rectangle.
///
/// The output size is the longer of each pair of opposite quad edges.
#[wasm_bindgen]
pub fn perspective_crop(image: &JsPixelBuffer, quad: &[f64]) -> Result<JsPixelBuffer, JsValue> {
    let quad = parse_quad(quad).map_err(|e| JsValue::from_str(&e))?;
    let result = core_perspective_crop(&image.to_buffer(), &quad)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(JsPixelBuffer::from_buffer(result))
}

/// Apply an axis-aligned crop in pixel coordinates.
///
/// The rectangle is clamped to the image and the result is at least 1x1.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cropped = apply_crop(sourceImage, crop.x, crop.y, crop.width, crop.height);
/// ```
#[wasm_bindgen]
pub fn apply_crop(image: &JsPixelBuffer, x: f64, y: f64, width: f64, height: f64) -> JsPixelBuffer {
    let result = core_crop(&image.to_buffer(), &Rect::new(x, y, width, height));
    JsPixelBuffer::from_buffer(result)
}
