//! Computational geometry for the interactive tools.
//!
//! - Point containment tests for rectangles
//! - Crop resize handle hit testing and drag resizing
//! - Cubic Bézier flattening for selection and pen paths
//!
//! # Coordinate System
//!
//! - Coordinates are image-space pixels
//! - Origin is top-left corner, y grows downwards

mod bezier;
mod handle;

pub use bezier::{approximate_cubic_bezier, BezierSegment, DEFAULT_BEZIER_STEPS};
pub use handle::{
    get_handle_at_point, resize_rect, translate_within, CropResizeHandle, ResizeCursor,
    DEFAULT_HANDLE_TOLERANCE, HANDLE_HIT_SIZE,
};

use crate::types::{Point, Rect};

/// Check whether a point lies inside a rectangle.
///
/// All four edges are inclusive, so boundary points count as inside.
#[inline]
pub fn is_point_in_rect(point: Point, rect: &Rect) -> bool {
    point.x >= rect.x && point.x <= rect.right() && point.y >= rect.y && point.y <= rect.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_inside() {
        let rect = Rect::new(10.0, 10.0, 20.0, 10.0);
        assert!(is_point_in_rect(Point::new(15.0, 15.0), &rect));
    }

    #[test]
    fn test_point_outside() {
        let rect = Rect::new(10.0, 10.0, 20.0, 10.0);
        assert!(!is_point_in_rect(Point::new(5.0, 15.0), &rect));
        assert!(!is_point_in_rect(Point::new(15.0, 20.5), &rect));
        assert!(!is_point_in_rect(Point::new(30.01, 15.0), &rect));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let rect = Rect::new(10.0, 10.0, 20.0, 10.0);
        for p in [
            Point::new(10.0, 10.0),
            Point::new(30.0, 10.0),
            Point::new(30.0, 20.0),
            Point::new(10.0, 20.0),
            Point::new(20.0, 10.0),
        ] {
            assert!(is_point_in_rect(p, &rect), "{:?} should be inside", p);
        }
    }

    #[test]
    fn test_zero_size_rect_contains_its_origin() {
        let rect = Rect::new(3.0, 4.0, 0.0, 0.0);
        assert!(is_point_in_rect(Point::new(3.0, 4.0), &rect));
        assert!(!is_point_in_rect(Point::new(3.0, 4.1), &rect));
    }
}
