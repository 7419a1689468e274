//! Cubic Bézier flattening.
//!
//! Curves are sampled at uniform parameter steps of the cubic Bernstein form:
//! ```text
//! B(t) = (1-t)³·p0 + 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³·p3
//! ```
//! Samples are uniform in `t`, not in arc length.

use crate::types::Point;
use serde::{Deserialize, Serialize};

/// Default number of subdivision steps per curve segment.
pub const DEFAULT_BEZIER_STEPS: usize = 20;

/// A cubic Bézier segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierSegment {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl BezierSegment {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Point on the curve at parameter `t` (0.0 to 1.0).
    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point::new(
            a * self.p0.x + b * self.p1.x + c * self.p2.x + d * self.p3.x,
            a * self.p0.y + b * self.p1.y + c * self.p2.y + d * self.p3.y,
        )
    }

    /// Flatten into `steps + 1` points. See [`approximate_cubic_bezier`].
    pub fn flatten(&self, steps: usize) -> Vec<Point> {
        approximate_cubic_bezier(self.p0, self.p1, self.p2, self.p3, steps)
    }
}

/// Approximate a cubic Bézier curve with a polyline.
///
/// Returns `steps + 1` points sampled at `t = i / steps`. The first and last
/// points are exactly `p0` and `p3`. A `steps` of 0 is treated as 1.
pub fn approximate_cubic_bezier(
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    steps: usize,
) -> Vec<Point> {
    let steps = steps.max(1);
    let segment = BezierSegment::new(p0, p1, p2, p3);

    let mut points = Vec::with_capacity(steps + 1);
    points.push(p0);
    for i in 1..steps {
        points.push(segment.point_at(i as f64 / steps as f64));
    }
    points.push(p3);
    points
}
