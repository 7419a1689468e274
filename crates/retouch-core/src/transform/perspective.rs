//! Perspective (homography) transforms with bilinear resampling.
//!
//! # Algorithm
//!
//! A projective transform maps `(x, y)` to `(u, v)`:
//! ```text
//! u = (a*x + b*y + c) / (g*x + h*y + 1)
//! v = (d*x + e*y + f) / (g*x + h*y + 1)
//! ```
//! Four point correspondences give eight linear equations in the eight
//! unknowns `a..h`, solved with [`crate::linalg::solve`].
//!
//! Warping uses inverse mapping: for each pixel in the output image, the
//! inverse transform gives the source position, which is bilinearly
//! interpolated from its four neighbours. Positions that fall outside the
//! source leave the output pixel transparent.

use crate::linalg::{invert_3x3, solve, Matrix3x3};
use crate::types::{EngineResult, PixelBuffer, Point};
use tracing::{debug, trace};

/// Sample positions this close outside the source are snapped onto its edge.
const EDGE_EPSILON: f64 = 1e-6;

/// Compute the projective transform mapping each `src` point onto the
/// matching `dst` point.
///
/// Points are expected in the same order in both sets (for example
/// top-left, top-right, bottom-left, bottom-right). A mismatched order
/// produces a valid but geometrically wrong transform.
///
/// # Errors
///
/// [`crate::EngineError::Singular`] when the correspondences are degenerate
/// (three or more collinear points, duplicates, or NaN coordinates), or the
/// solved matrix is not invertible.
///
/// # Example
///
/// ```ignore
/// let square = [
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
/// ];
/// let m = compute_transform(&square, &square)?;
/// assert!(m.approx_eq(&Matrix3x3::IDENTITY, 1e-9));
/// ```
pub fn compute_transform(src: &[Point; 4], dst: &[Point; 4]) -> EngineResult<Matrix3x3> {
    let mut a = Vec::with_capacity(8);
    let mut b = Vec::with_capacity(8);

    for (s, d) in src.iter().zip(dst.iter()) {
        a.push(vec![s.x, s.y, 1.0, 0.0, 0.0, 0.0, -s.x * d.x, -s.y * d.x]);
        b.push(d.x);
        a.push(vec![0.0, 0.0, 0.0, s.x, s.y, 1.0, -s.x * d.y, -s.y * d.y]);
        b.push(d.y);
    }

    let h = solve(&a, &b).inspect_err(|_| {
        debug!(?src, ?dst, "perspective correspondences are degenerate");
    })?;

    let m = Matrix3x3([h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0]);

    // Nearly collinear points can pass pivoting and still leave a rank
    // deficient matrix.
    invert_3x3(&m).inspect_err(|_| {
        debug!(?src, ?dst, "perspective transform is not invertible");
    })?;

    Ok(m)
}

/// Resample `source` through a perspective transform.
///
/// `transform` maps source coordinates to destination coordinates; it is
/// inverted once and every destination pixel is pulled from the source.
/// Pixels whose source position lies outside the source image stay
/// transparent (all channels 0).
///
/// # Errors
///
/// [`crate::EngineError::Singular`] if `transform` cannot be inverted. No
/// output is allocated in that case.
pub fn warp(
    source: &PixelBuffer,
    dest_width: u32,
    dest_height: u32,
    transform: &Matrix3x3,
) -> EngineResult<PixelBuffer> {
    let inverse = invert_3x3(transform)?.normalized();
    let mut output = PixelBuffer::transparent(dest_width, dest_height);

    if source.is_empty() {
        return Ok(output);
    }

    trace!(
        src_w = source.width,
        src_h = source.height,
        dest_width,
        dest_height,
        "warping through perspective transform"
    );

    for dst_y in 0..dest_height {
        for dst_x in 0..dest_width {
            let Some(src) = inverse.transform_point(Point::new(dst_x as f64, dst_y as f64)) else {
                continue;
            };

            if let Some(pixel) = sample_bilinear(source, src.x, src.y) {
                output.set_pixel(dst_x, dst_y, pixel);
            }
        }
    }

    Ok(output)
}

/// Compute the output size for rectifying a quadrilateral.
///
/// Uses the longer of each pair of opposite edges. Corners are in
/// top-left, top-right, bottom-left, bottom-right order.
pub fn perspective_output_size(quad: &[Point; 4]) -> (u32, u32) {
    let [tl, tr, bl, br] = *quad;
    let width = tl.distance(tr).max(bl.distance(br));
    let height = tl.distance(bl).max(tr.distance(br));
    ((width.round() as u32).max(1), (height.round() as u32).max(1))
}

/// Rectify the quadrilateral `quad` of `source` into an upright image.
///
/// Corners are in top-left, top-right, bottom-left, bottom-right order. The
/// output size comes from [`perspective_output_size`].
///
/// # Errors
///
/// [`crate::EngineError::Singular`] when the quad is degenerate.
pub fn perspective_crop(source: &PixelBuffer, quad: &[Point; 4]) -> EngineResult<PixelBuffer> {
    let (width, height) = perspective_output_size(quad);
    let (w, h) = (width as f64, height as f64);
    let target = [
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(0.0, h),
        Point::new(w, h),
    ];

    debug!(width, height, "perspective crop");
    let transform = compute_transform(quad, &target)?;
    warp(source, width, height, &transform)
}

/// Sample a pixel using bilinear interpolation.
///
/// Valid positions are `[0, width-1] × [0, height-1]`. The right and bottom
/// neighbours are clamped to the last column and row, so reads never leave
/// the buffer. Returns `None` outside the footprint.
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> Option<[u8; 4]> {
    let max_x = (image.width - 1) as f64;
    let max_y = (image.height - 1) as f64;

    let inside = (-EDGE_EPSILON..=max_x + EDGE_EPSILON).contains(&x)
        && (-EDGE_EPSILON..=max_y + EDGE_EPSILON).contains(&y);
    if !inside {
        return None;
    }
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.round().clamp(0.0, 255.0) as u8;
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EngineError;

    const UNIT_SQUARE: [Point; 4] = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(1.0, 1.0),
    ];

    /// Create a test image where every pixel is distinct.
    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 16 % 256) as u8);
                pixels.push((y * 16 % 256) as u8);
                pixels.push(((x + y) * 8 % 256) as u8);
                pixels.push(255);
            }
        }
        PixelBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_identity_from_unit_square() {
        let m = compute_transform(&UNIT_SQUARE, &UNIT_SQUARE).unwrap();
        assert!(m.approx_eq(&Matrix3x3::IDENTITY, 1e-9), "{:?}", m);
    }

    #[test]
    fn test_identity_warp_2x2_is_unchanged() {
        let pixels = vec![
            10, 20, 30, 255, 40, 50, 60, 200, 70, 80, 90, 150, 100, 110, 120, 100,
        ];
        let img = PixelBuffer::new(2, 2, pixels);
        let m = compute_transform(&UNIT_SQUARE, &UNIT_SQUARE).unwrap();
        let out = warp(&img, 2, 2, &m).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_identity_warp_larger_image() {
        let img = test_image(17, 9);
        let quad = [
            Point::new(2.0, 1.0),
            Point::new(15.0, 0.5),
            Point::new(1.0, 8.0),
            Point::new(16.0, 7.5),
        ];
        let m = compute_transform(&quad, &quad).unwrap();
        let out = warp(&img, 17, 9, &m).unwrap();
        assert_eq!(out.pixels, img.pixels);
    }

    #[test]
    fn test_translation() {
        let src = UNIT_SQUARE;
        let dst = src.map(|p| Point::new(p.x + 3.0, p.y - 2.0));
        let m = compute_transform(&src, &dst).unwrap();
        let expected = Matrix3x3([1.0, 0.0, 3.0, 0.0, 1.0, -2.0, 0.0, 0.0, 1.0]);
        assert!(m.approx_eq(&expected, 1e-9), "{:?}", m);
    }

    #[test]
    fn test_maps_correspondences() {
        let src = [
            Point::new(10.0, 10.0),
            Point::new(90.0, 20.0),
            Point::new(5.0, 80.0),
            Point::new(95.0, 95.0),
        ];
        let dst = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 100.0),
            Point::new(100.0, 100.0),
        ];
        let m = compute_transform(&src, &dst).unwrap();
        for (s, d) in src.iter().zip(dst.iter()) {
            let mapped = m.transform_point(*s).unwrap();
            assert!(mapped.distance(*d) < 1e-6, "{:?} -> {:?}", s, mapped);
        }
    }

    #[test]
    fn test_collinear_points_are_singular() {
        let line = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
        ];
        assert_eq!(
            compute_transform(&line, &UNIT_SQUARE),
            Err(EngineError::Singular)
        );
    }

    #[test]
    fn test_diagonal_collinear_points_are_singular() {
        let line = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 3.0),
        ];
        assert_eq!(compute_transform(&line, &line), Err(EngineError::Singular));
    }

    #[test]
    fn test_three_collinear_fractional_points_are_singular() {
        // First three points lie on y = 0.5x + 0.25
        let src = [
            Point::new(0.1, 0.3),
            Point::new(1.7, 1.1),
            Point::new(3.3, 1.9),
            Point::new(5.0, 7.0),
        ];
        assert_eq!(
            compute_transform(&src, &UNIT_SQUARE),
            Err(EngineError::Singular)
        );
    }

    #[test]
    fn test_nan_coordinate_is_singular() {
        let src = [
            Point::new(f64::NAN, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
        ];
        assert_eq!(
            compute_transform(&src, &UNIT_SQUARE),
            Err(EngineError::Singular)
        );
    }

    #[test]
    fn test_duplicated_points_are_singular() {
        let same = [Point::new(5.0, 5.0); 4];
        assert_eq!(
            compute_transform(&same, &UNIT_SQUARE),
            Err(EngineError::Singular)
        );
    }

    #[test]
    fn test_warp_rejects_singular_transform() {
        let img = test_image(4, 4);
        let singular = Matrix3x3([1.0, 2.0, 0.0, 2.0, 4.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(warp(&img, 4, 4, &singular), Err(EngineError::Singular));
    }

    #[test]
    fn test_top_left_sample_is_exact() {
        let img = test_image(5, 5);
        // Destination (2, 3) maps back to source (0, 0)
        let shift = Matrix3x3([1.0, 0.0, 2.0, 0.0, 1.0, 3.0, 0.0, 0.0, 1.0]);
        let out = warp(&img, 6, 6, &shift).unwrap();
        assert_eq!(out.pixel(2, 3), img.pixel(0, 0));
        // Left of and above the footprint stays transparent
        assert_eq!(out.pixel(1, 3), [0, 0, 0, 0]);
        assert_eq!(out.pixel(2, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn test_outside_footprint_is_transparent() {
        let img = test_image(4, 4);
        let out = warp(&img, 10, 10, &Matrix3x3::IDENTITY).unwrap();
        assert_eq!(out.pixel(3, 3), img.pixel(3, 3));
        assert_eq!(out.pixel(4, 0), [0, 0, 0, 0]);
        assert_eq!(out.pixel(9, 9), [0, 0, 0, 0]);
    }

    #[test]
    fn test_half_pixel_interpolation() {
        let img = PixelBuffer::new(2, 1, vec![0, 100, 200, 255, 100, 200, 0, 55]);
        // Destination x = 1 maps back to source x = 0.5
        let shift = Matrix3x3([1.0, 0.0, 0.5, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        let out = warp(&img, 2, 1, &shift).unwrap();
        assert_eq!(out.pixel(1, 0), [50, 150, 100, 155]);
    }

    #[test]
    fn test_channels_are_independent() {
        // Transparent neighbour does not darken the color channels
        let img = PixelBuffer::new(2, 1, vec![200, 200, 200, 255, 200, 200, 200, 0]);
        let shift = Matrix3x3([1.0, 0.0, 0.5, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        let out = warp(&img, 2, 1, &shift).unwrap();
        assert_eq!(out.pixel(1, 0), [200, 200, 200, 128]);
    }

    #[test]
    fn test_scale_down() {
        let pixels = vec![0, 0, 0, 255, 100, 100, 100, 255, 200, 200, 200, 255];
        let img = PixelBuffer::new(3, 1, pixels);
        let half = Matrix3x3([0.5, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        let out = warp(&img, 2, 1, &half).unwrap();
        assert_eq!(out.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(out.pixel(1, 0), [200, 200, 200, 255]);
    }

    #[test]
    fn test_warp_empty_source() {
        let img = PixelBuffer::transparent(0, 0);
        let out = warp(&img, 3, 2, &Matrix3x3::IDENTITY).unwrap();
        assert_eq!(out.width, 3);
        assert!(out.pixels.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_output_size() {
        let quad = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 40.0),
            Point::new(120.0, 50.0),
        ];
        // Bottom edge is ~120.4 long, right edge ~53.9
        let (w, h) = perspective_output_size(&quad);
        assert_eq!(w, 120);
        assert_eq!(h, 54);
    }

    #[test]
    fn test_perspective_crop_axis_aligned() {
        let img = test_image(8, 8);
        let quad = [
            Point::new(2.0, 2.0),
            Point::new(6.0, 2.0),
            Point::new(2.0, 6.0),
            Point::new(6.0, 6.0),
        ];
        let out = perspective_crop(&img, &quad).unwrap();
        assert_eq!((out.width, out.height), (4, 4));
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(out.pixel(x, y), img.pixel(x + 2, y + 2));
            }
        }
    }

    #[test]
    fn test_perspective_crop_degenerate_quad() {
        let img = test_image(8, 8);
        let quad = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(4.0, 4.0),
            Point::new(6.0, 6.0),
        ];
        assert_eq!(perspective_crop(&img, &quad), Err(EngineError::Singular));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for a convex quad: a jittered axis-aligned rectangle.
    fn quad_strategy() -> impl Strategy<Value = [Point; 4]> {
        (
            0.0f64..50.0,
            0.0f64..50.0,
            20.0f64..200.0,
            20.0f64..200.0,
            prop::array::uniform8(-5.0f64..5.0),
        )
            .prop_map(|(x, y, w, h, j)| {
                [
                    Point::new(x + j[0], y + j[1]),
                    Point::new(x + w + j[2], y + j[3]),
                    Point::new(x + j[4], y + h + j[5]),
                    Point::new(x + w + j[6], y + h + j[7]),
                ]
            })
    }

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=24, 1u32..=24)
    }

    fn create_test_image(width: u32, height: u32) -> PixelBuffer {
        let pixels = (0..width * height * 4).map(|i| (i * 7 % 256) as u8).collect();
        PixelBuffer::new(width, height, pixels)
    }

    proptest! {
        /// Property: mapping a quad onto itself yields the identity.
        #[test]
        fn prop_self_transform_is_identity(quad in quad_strategy()) {
            let m = compute_transform(&quad, &quad).unwrap();
            prop_assert!(m.approx_eq(&Matrix3x3::IDENTITY, 1e-6), "{:?}", m);
        }

        /// Property: the solved transform maps every source corner onto its target.
        #[test]
        fn prop_corners_map_to_targets(src in quad_strategy(), dst in quad_strategy()) {
            let m = compute_transform(&src, &dst).unwrap();
            for (s, d) in src.iter().zip(dst.iter()) {
                let mapped = m.transform_point(*s).unwrap();
                prop_assert!(mapped.distance(*d) < 1e-4);
            }
        }

        /// Property: identity warp reproduces any buffer exactly.
        #[test]
        fn prop_identity_warp_reproduces_source((width, height) in dimensions_strategy()) {
            let img = create_test_image(width, height);
            let out = warp(&img, width, height, &Matrix3x3::IDENTITY).unwrap();
            prop_assert_eq!(out, img);
        }

        /// Property: warp never panics for arbitrary well-conditioned transforms.
        #[test]
        fn prop_warp_stays_in_bounds(
            (width, height) in dimensions_strategy(),
            src in quad_strategy(),
            dst in quad_strategy(),
        ) {
            let img = create_test_image(width, height);
            let m = compute_transform(&src, &dst).unwrap();
            let out = warp(&img, 32, 32, &m).unwrap();
            prop_assert_eq!(out.pixels.len(), 32 * 32 * 4);
        }
    }
}
