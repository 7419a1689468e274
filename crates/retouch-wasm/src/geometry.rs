//! WASM bindings for crop tool geometry.
//!
//! Rectangles cross the boundary as `(x, y, width, height)` numbers and
//! handles as their camelCase names (`"topLeft"`, `"right"`, ...).

use retouch_core::geometry::{self, CropResizeHandle, DEFAULT_HANDLE_TOLERANCE};
use retouch_core::{Point, Rect};
use wasm_bindgen::prelude::*;

/// Check whether `(px, py)` lies inside the rectangle, edges included.
#[wasm_bindgen]
pub fn is_point_in_rect(px: f64, py: f64, x: f64, y: f64, width: f64, height: f64) -> bool {
    geometry::is_point_in_rect(Point::new(px, py), &Rect::new(x, y, width, height))
}

/// Find the crop handle under the pointer.
///
/// Returns the handle name, or `undefined` when the pointer is not near any
/// handle. A non-positive or missing `tolerance` uses the default hit size.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const handle = get_handle_at_point(e.offsetX, e.offsetY, crop.x, crop.y, crop.w, crop.h);
/// canvas.style.cursor = handle ? handle_cursor(handle) : 'default';
/// ```
#[wasm_bindgen]
pub fn get_handle_at_point(
    px: f64,
    py: f64,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    tolerance: Option<f64>,
) -> Option<String> {
    let tolerance = tolerance
        .filter(|t| *t > 0.0)
        .unwrap_or(DEFAULT_HANDLE_TOLERANCE);
    let rect = Rect::new(x, y, width, height);
    geometry::get_handle_at_point(Point::new(px, py), &rect, tolerance)
        .map(|h| h.name().to_string())
}

/// CSS cursor for a handle name, or `undefined` for an unknown name.
#[wasm_bindgen]
pub fn handle_cursor(handle: &str) -> Option<String> {
    CropResizeHandle::from_name(handle).map(|h| h.cursor().as_css().to_string())
}

/// Resize a crop rectangle by dragging `handle` by `(dx, dy)`.
///
/// Returns `[x, y, width, height]`.
#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn resize_crop_rect(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    handle: &str,
    dx: f64,
    dy: f64,
    min_size: f64,
) -> Result<Vec<f64>, JsValue> {
    let handle = CropResizeHandle::from_name(handle)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown handle: {}", handle)))?;
    let r = geometry::resize_rect(&Rect::new(x, y, width, height), handle, dx, dy, min_size);
    Ok(vec![r.x, r.y, r.width, r.height])
}

/// Flatten a cubic Bézier into `steps` segments.
///
/// Returns a flat `[x0, y0, x1, y1, ...]` array of `steps + 1` points that
/// starts at `p0` and ends at `p3`.
#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn approximate_cubic_bezier(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    x3: f64,
    y3: f64,
    steps: u32,
) -> Vec<f64> {
    geometry::approximate_cubic_bezier(
        Point::new(x0, y0),
        Point::new(x1, y1),
        Point::new(x2, y2),
        Point::new(x3, y3),
        steps as usize,
    )
    .into_iter()
    .flat_map(|p| [p.x, p.y])
    .collect()
}
