//! Axis-aligned image cropping.
//!
//! The crop region is a [`Rect`] in image-space pixels, the same space the
//! crop box handles are hit tested in. Fractional edges are rounded to the
//! nearest pixel boundary.
//!
//! # Example
//!
//! ```ignore
//! // Crop a 50x50 region starting at (25, 25)
//! let cropped = apply_crop(&image, &Rect::new(25.0, 25.0, 50.0, 50.0));
//! ```

use crate::types::{PixelBuffer, Rect};

/// Crop an image to a pixel-space rectangle.
///
/// # Behavior
///
/// - Regions extending beyond the image bounds are clamped
/// - Minimum output dimension is 1x1 pixels
/// - A rectangle covering the whole image returns a copy of the original
pub fn apply_crop(image: &PixelBuffer, rect: &Rect) -> PixelBuffer {
    let src_w = image.width as f64;
    let src_h = image.height as f64;

    // Fast path: full crop returns a clone
    if image.is_empty()
        || (rect.x <= 0.0 && rect.y <= 0.0 && rect.right() >= src_w && rect.bottom() >= src_h)
    {
        return image.clone();
    }

    let px_left = (rect.x.round().clamp(0.0, src_w) as u32).min(image.width - 1);
    let px_top = (rect.y.round().clamp(0.0, src_h) as u32).min(image.height - 1);
    let px_right = rect.right().round().clamp(0.0, src_w) as u32;
    let px_bottom = rect.bottom().round().clamp(0.0, src_h) as u32;

    // Ensure minimum dimensions
    let out_width = px_right.saturating_sub(px_left).max(1);
    let out_height = px_bottom.saturating_sub(px_top).max(1);

    let row_bytes = out_width as usize * PixelBuffer::CHANNELS;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Copy pixel data row by row
    for y in 0..out_height {
        let start = image.index_of(px_left, px_top + y);
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    PixelBuffer::new(out_width, out_height, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
