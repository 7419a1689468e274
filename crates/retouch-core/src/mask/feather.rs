//! Feathered selection masks.

use super::blur::gaussian_blur;
use super::path::SelectionShape;
use super::raster::rasterize;
use crate::types::AlphaMask;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Halo padding as a multiple of the feather radius.
pub const DEFAULT_FEATHER_PADDING: f64 = 2.0;

fn default_padding_factor() -> f64 {
    DEFAULT_FEATHER_PADDING
}

/// How soft a selection edge should be.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatherSpec {
    /// Blur radius in pixels. `0` gives a hard edge.
    pub radius: f64,
    /// Padding added on each side before blurring, in units of `radius`.
    #[serde(default = "default_padding_factor")]
    pub padding_factor: f64,
}

impl Default for FeatherSpec {
    fn default() -> Self {
        Self::hard()
    }
}

impl FeatherSpec {
    pub fn hard() -> Self {
        Self::new(0.0)
    }

    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            padding_factor: DEFAULT_FEATHER_PADDING,
        }
    }

    pub fn is_hard(&self) -> bool {
        !(self.radius.is_finite() && self.radius > 0.0)
    }

    /// Pixels of halo added on every side of the working surface.
    ///
    /// Saturates at `u32::MAX`; [`build_feathered_mask`] further limits it to
    /// the image extent.
    pub fn padding(&self) -> u32 {
        if self.is_hard() {
            return 0;
        }
        let factor = if self.padding_factor.is_finite() {
            self.padding_factor.max(0.0)
        } else {
            DEFAULT_FEATHER_PADDING
        };
        (self.radius * factor).ceil() as u32
    }
}

/// Build an alpha mask for `shape` over a `width × height` image.
///
/// # Algorithm
///
/// 1. Rasterize the shape onto a surface padded by [`FeatherSpec::padding`]
///    on every side, so the blur has room for the halo
/// 2. Blur the padded surface with `sigma = radius`
/// 3. Copy the centre window back and quantize to `round(v × 255)`
///
/// Hard specs skip the blur and produce only 0 and 255. The radius and the
/// padding are both capped at the larger image dimension.
pub fn build_feathered_mask(
    shape: &SelectionShape,
    width: u32,
    height: u32,
    feather: &FeatherSpec,
) -> AlphaMask {
    if width == 0 || height == 0 {
        return AlphaMask::empty(width, height);
    }

    if feather.is_hard() {
        let coverage = rasterize(shape, width, height, 0.0, 0.0);
        return AlphaMask::new(width, height, quantize(&coverage));
    }

    let extent = width.max(height);
    let radius = feather.radius.min(extent as f64);
    let pad = feather.padding().min(extent);
    let (Some(padded_w), Some(padded_h)) = (padded_len(width, pad), padded_len(height, pad))
    else {
        debug!(width, height, pad, "padded surface overflows u32");
        let coverage = rasterize(shape, width, height, 0.0, 0.0);
        return AlphaMask::new(width, height, quantize(&coverage));
    };
    debug!(width, height, radius, pad, "building feathered mask");

    let coverage = rasterize(shape, padded_w, padded_h, pad as f64, pad as f64);
    let blurred = gaussian_blur(&coverage, padded_w, padded_h, radius);

    let (w, pw, pad) = (width as usize, padded_w as usize, pad as usize);
    let mut window = Vec::with_capacity(w * height as usize);
    for y in 0..height as usize {
        let start = (y + pad) * pw + pad;
        window.extend_from_slice(&blurred[start..start + w]);
    }

    AlphaMask::new(width, height, quantize(&window))
}

/// `len + 2 × pad`, or `None` on overflow.
fn padded_len(len: u32, pad: u32) -> Option<u32> {
    pad.checked_mul(2)?.checked_add(len)
}

fn quantize(coverage: &[f32]) -> Vec<u8> {
    coverage
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect()
}


// ===== Property-Based Tests =====
