//! Separable Gaussian blur over single-channel coverage maps.
//!
//! # Algorithm
//!
//! A 2D Gaussian factors into a horizontal and a vertical 1D pass, so the
//! cost per pixel is `2 × (2r + 1)` taps instead of `(2r + 1)²`. Samples
//! outside the surface contribute 0, which is why callers pad the surface
//! when the shape touches its border.

use tracing::trace;

/// Largest radius [`gaussian_kernel`] builds weights for.
pub const MAX_BLUR_RADIUS: f64 = 4096.0;

/// Normalized 1D Gaussian weights for `radius`.
///
/// Uses `sigma = radius` and a half-width of `ceil(3σ)`, which keeps
/// more than 99.7% of the distribution. The returned kernel has odd length
/// and sums to 1. A non-positive radius yields the identity kernel `[1.0]`,
/// and radii above [`MAX_BLUR_RADIUS`] are clamped to it.
pub fn gaussian_kernel(radius: f64) -> Vec<f32> {
    if !radius.is_finite() || radius <= 0.0 {
        return vec![1.0];
    }

    let sigma = radius.min(MAX_BLUR_RADIUS);
    let half = ((3.0 * sigma).ceil() as i64).max(1);
    let denom = 2.0 * sigma * sigma;

    let weights: Vec<f64> = (-half..=half)
        .map(|i| {
            let x = i as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();

    weights.iter().map(|w| (w / sum) as f32).collect()
}

/// Blur a `width × height` coverage map with a Gaussian of `radius`.
///
/// Returns a new buffer; `data` is left untouched. A non-positive radius
/// returns a copy, and a radius wider than the surface is clamped to its
/// larger side.
pub fn gaussian_blur(data: &[f32], width: u32, height: u32, radius: f64) -> Vec<f32> {
    let kernel = gaussian_kernel(radius.min(width.max(height) as f64));
    if kernel.len() == 1 || data.is_empty() {
        return data.to_vec();
    }

    trace!(width, height, taps = kernel.len(), "gaussian blur");

    let mut tmp = vec![0.0f32; data.len()];
    let mut out = vec![0.0f32; data.len()];
    horizontal_pass(data, &mut tmp, width as usize, height as usize, &kernel);
    vertical_pass(&tmp, &mut out, width as usize, height as usize, &kernel);
    out
}

/// Kernel indices whose tap lands inside `0..len` when centred on `pos`.
fn taps_in_bounds(pos: usize, len: usize, k: &[f32]) -> std::ops::Range<usize> {
    let half = k.len() / 2;
    half.saturating_sub(pos)..(len + half - pos).min(k.len())
}

fn horizontal_pass(src: &[f32], dst: &mut [f32], w: usize, h: usize, k: &[f32]) {
    let half = k.len() / 2;
    for y in 0..h {
        let row = &src[y * w..(y + 1) * w];
        for x in 0..w {
            let mut acc = 0.0f32;
            for ki in taps_in_bounds(x, w, k) {
                acc += k[ki] * row[x + ki - half];
            }
            dst[y * w + x] = acc;
        }
    }
}

fn vertical_pass(src: &[f32], dst: &mut [f32], w: usize, h: usize, k: &[f32]) {
    let half = k.len() / 2;
    for y in 0..h {
        let taps = taps_in_bounds(y, h, k);
        for x in 0..w {
            let mut acc = 0.0f32;
            for ki in taps.clone() {
                acc += k[ki] * src[(y + ki - half) * w + x];
            }
            dst[y * w + x] = acc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_normalized() {
        for radius in [0.5, 1.0, 2.5, 8.0] {
            let k = gaussian_kernel(radius);
            let sum: f32 = k.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "radius {}: sum {}", radius, sum);
            assert_eq!(k.len() % 2, 1);
        }
    }

    #[test]
    fn test_kernel_width() {
        assert_eq!(gaussian_kernel(1.0).len(), 7);
        assert_eq!(gaussian_kernel(2.0).len(), 13);
        // ceil(3 * 0.1) = 1
        assert_eq!(gaussian_kernel(0.1).len(), 3);
    }

    #[test]
    fn test_kernel_symmetric_and_peaked() {
        let k = gaussian_kernel(3.0);
        let mid = k.len() / 2;
        for i in 0..mid {
            assert!((k[i] - k[k.len() - 1 - i]).abs() < 1e-7);
            assert!(k[i] < k[i + 1]);
        }
    }

    #[test]
    fn test_kernel_non_positive_radius_is_identity() {
        assert_eq!(gaussian_kernel(0.0), vec![1.0]);
        assert_eq!(gaussian_kernel(-3.0), vec![1.0]);
        assert_eq!(gaussian_kernel(f64::NAN), vec![1.0]);
    }

    #[test]
    fn test_kernel_radius_is_capped() {
        let expected = 2 * (3.0 * MAX_BLUR_RADIUS).ceil() as usize + 1;
        assert_eq!(gaussian_kernel(1.0e12).len(), expected);
        assert_eq!(gaussian_kernel(f64::INFINITY), vec![1.0]);
    }

    #[test]
    fn test_taps_in_bounds() {
        let k = gaussian_kernel(1.0);
        assert_eq!(taps_in_bounds(0, 10, &k), 3..7);
        assert_eq!(taps_in_bounds(5, 10, &k), 0..7);
        assert_eq!(taps_in_bounds(9, 10, &k), 0..4);
        assert_eq!(taps_in_bounds(0, 1, &k), 3..4);
    }

    #[test]
    fn test_huge_radius_on_small_surface() {
        let data = vec![1.0f32; 9];
        let out = gaussian_blur(&data, 3, 3, 3.0e9);
        assert_eq!(out.len(), 9);
        assert!(out.iter().all(|v| v.is_finite() && *v > 0.0 && *v < 1.0));
        assert!((out[0] - out[8]).abs() < 1e-6);
    }

    #[test]
    fn test_zero_radius_copies() {
        let data = vec![0.0, 1.0, 0.5, 0.25];
        assert_eq!(gaussian_blur(&data, 2, 2, 0.0), data);
    }

    #[test]
    fn test_blur_preserves_mass_away_from_border() {
        let (w, h) = (21u32, 21u32);
        let mut data = vec![0.0f32; 21 * 21];
        data[10 * 21 + 10] = 1.0;

        let out = gaussian_blur(&data, w, h, 2.0);
        let sum: f32 = out.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
        assert!(out[10 * 21 + 10] < 1.0);
        assert!(out[10 * 21 + 11] > 0.0);
        assert!((out[10 * 21 + 9] - out[10 * 21 + 11]).abs() < 1e-6);
        assert!((out[9 * 21 + 10] - out[10 * 21 + 9]).abs() < 1e-6);
    }

    #[test]
    fn test_border_falls_off() {
        let data = vec![1.0f32; 16 * 16];
        let out = gaussian_blur(&data, 16, 16, 1.5);
        // Corner loses about half its weight in each direction
        assert!(out[0] > 0.35 && out[0] < 0.45, "corner {}", out[0]);
        assert!(out[8 * 16 + 8] > 0.999);
    }
}
