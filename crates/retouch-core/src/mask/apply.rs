//! Masked compositing
//!
//! This module blends an edited copy of an image back over the original
//! through a selection mask, so edits only land inside the soft-edged
//! selection.

use crate::types::{AlphaMask, EngineError, EngineResult, PixelBuffer};

/// Check that a mask and buffer describe the same pixel grid.
fn check_mask(image: &PixelBuffer, mask: &AlphaMask) -> EngineResult<()> {
    if mask.width != image.width || mask.height != image.height {
        return Err(EngineError::DimensionMismatch {
            expected: image.pixel_count(),
            actual: mask.width as usize * mask.height as usize,
        });
    }
    Ok(())
}

/// Blend `t` of the way from `a` to `b`, both in 0..=255.
#[inline]
fn lerp_u8(a: u8, b: u8, t: u8) -> u8 {
    let t = t as u32;
    ((a as u32 * (255 - t) + b as u32 * t + 127) / 255) as u8
}

/// Blend `edited` over `original` through `mask`.
///
/// Every channel, alpha included, is interpolated:
/// `out = original × (1 - a) + edited × a` with `a = mask / 255`.
///
/// # Errors
/// [`EngineError::DimensionMismatch`] if the three inputs are not the
/// same size.
pub fn composite_masked(
    original: &PixelBuffer,
    edited: &PixelBuffer,
    mask: &AlphaMask,
) -> EngineResult<PixelBuffer> {
    if edited.width != original.width || edited.height != original.height {
        return Err(EngineError::DimensionMismatch {
            expected: original.pixels.len(),
            actual: edited.pixels.len(),
        });
    }
    check_mask(original, mask)?;

    let pixels = original
        .pixels
        .chunks_exact(PixelBuffer::CHANNELS)
        .zip(edited.pixels.chunks_exact(PixelBuffer::CHANNELS))
        .zip(&mask.data)
        .flat_map(|((o, e), &a)| match a {
            0 => [o[0], o[1], o[2], o[3]],
            255 => [e[0], e[1], e[2], e[3]],
            _ => [
                lerp_u8(o[0], e[0], a),
                lerp_u8(o[1], e[1], a),
                lerp_u8(o[2], e[2], a),
                lerp_u8(o[3], e[3], a),
            ],
        })
        .collect();

    Ok(PixelBuffer::new(original.width, original.height, pixels))
}

/// Multiply the alpha channel of `image` by `mask`, cutting out the selection.
pub fn apply_mask_to_alpha(image: &mut PixelBuffer, mask: &AlphaMask) -> EngineResult<()> {
    check_mask(image, mask)?;

    for (px, &a) in image
        .pixels
        .chunks_exact_mut(PixelBuffer::CHANNELS)
        .zip(&mask.data)
    {
        px[3] = lerp_u8(0, px[3], a);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to create a uniform image
    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> PixelBuffer {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        PixelBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_mask_extremes_select_inputs() {
        let original = solid(2, 1, [10, 20, 30, 255]);
        let edited = solid(2, 1, [200, 100, 50, 255]);
        let mask = AlphaMask::new(2, 1, vec![0, 255]);

        let out = composite_masked(&original, &edited, &mask).unwrap();
        assert_eq!(out.pixel(0, 0), [10, 20, 30, 255]);
        assert_eq!(out.pixel(1, 0), [200, 100, 50, 255]);
    }

    #[test]
    fn test_half_mask_blends() {
        let original = solid(1, 1, [0, 0, 0, 0]);
        let edited = solid(1, 1, [255, 100, 200, 255]);
        let mask = AlphaMask::new(1, 1, vec![128]);

        let out = composite_masked(&original, &edited, &mask).unwrap();
        assert_eq!(out.pixel(0, 0), [128, 50, 100, 128]);
    }

    #[test]
    fn test_empty_mask_keeps_original() {
        let original = solid(4, 4, [1, 2, 3, 4]);
        let edited = solid(4, 4, [9, 9, 9, 9]);
        let out = composite_masked(&original, &edited, &AlphaMask::empty(4, 4)).unwrap();
        assert_eq!(out, original);
    }

    #[test]
    fn test_composite_size_mismatch() {
        let original = solid(4, 4, [0; 4]);
        let edited = solid(4, 3, [0; 4]);
        assert_eq!(
            composite_masked(&original, &edited, &AlphaMask::empty(4, 4)),
            Err(EngineError::DimensionMismatch {
                expected: 64,
                actual: 48
            })
        );
        assert!(composite_masked(&original, &original, &AlphaMask::empty(2, 2)).is_err());
    }

    #[test]
    fn test_apply_mask_to_alpha() {
        let mut image = solid(3, 1, [50, 60, 70, 200]);
        let mask = AlphaMask::new(3, 1, vec![0, 255, 128]);

        apply_mask_to_alpha(&mut image, &mask).unwrap();
        assert_eq!(image.pixel(0, 0), [50, 60, 70, 0]);
        assert_eq!(image.pixel(1, 0), [50, 60, 70, 200]);
        assert_eq!(image.pixel(2, 0), [50, 60, 70, 100]);
    }

    #[test]
    fn test_apply_mask_to_alpha_mismatch_leaves_image() {
        let mut image = solid(3, 1, [1, 1, 1, 1]);
        let before = image.clone();
        assert!(apply_mask_to_alpha(&mut image, &AlphaMask::empty(1, 3)).is_err());
        assert_eq!(image, before);
    }
}
