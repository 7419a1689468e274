//! Scanline rasterization of selection shapes.
//!
//! Each pixel is sampled once at its centre `(x + 0.5, y + 0.5)`, so the
//! result is a hard 0/1 coverage map that does not depend on any host
//! path-filling implementation. Softness comes from the feather blur, not
//! from anti-aliasing here.

use super::path::SelectionShape;
use crate::geometry::DEFAULT_BEZIER_STEPS;
use crate::types::Point;

/// A non-horizontal polygon edge, stored top to bottom.
#[derive(Debug, Clone, Copy)]
struct Edge {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    /// +1 for edges drawn downwards, -1 for upwards.
    winding: i32,
}

impl Edge {
    fn new(a: Point, b: Point) -> Option<Self> {
        if a.y == b.y {
            return None;
        }
        Some(if a.y < b.y {
            Edge {
                x0: a.x,
                y0: a.y,
                x1: b.x,
                y1: b.y,
                winding: 1,
            }
        } else {
            Edge {
                x0: b.x,
                y0: b.y,
                x1: a.x,
                y1: a.y,
                winding: -1,
            }
        })
    }

    /// X position where the edge crosses scanline `y`, if it does.
    ///
    /// Edges are half-open in y so a shared vertex is counted once.
    #[inline]
    fn crossing(&self, y: f64) -> Option<f64> {
        if y < self.y0 || y >= self.y1 {
            return None;
        }
        let t = (y - self.y0) / (self.y1 - self.y0);
        Some(self.x0 + t * (self.x1 - self.x0))
    }
}

/// Rasterize `shape` into a `width × height` coverage map.
///
/// The shape is shifted by (`offset_x`, `offset_y`) before sampling. Each
/// entry is 1.0 if the pixel centre is inside under the shape's fill rule,
/// else 0.0.
pub fn rasterize(
    shape: &SelectionShape,
    width: u32,
    height: u32,
    offset_x: f64,
    offset_y: f64,
) -> Vec<f32> {
    let (w, h) = (width as usize, height as usize);
    let mut coverage = vec![0.0f32; w * h];
    if w == 0 || h == 0 {
        return coverage;
    }

    let edges: Vec<Edge> = shape
        .flatten(DEFAULT_BEZIER_STEPS)
        .iter()
        .flat_map(|poly| {
            // Closing edge from the last point back to the first
            let closing = std::iter::once((poly[poly.len() - 1], poly[0]));
            poly.windows(2)
                .map(|pair| (pair[0], pair[1]))
                .chain(closing)
        })
        .filter_map(|(a, b)| {
            Edge::new(
                Point::new(a.x + offset_x, a.y + offset_y),
                Point::new(b.x + offset_x, b.y + offset_y),
            )
        })
        .collect();

    if edges.is_empty() {
        return coverage;
    }

    let top = edges.iter().map(|e| e.y0).fold(f64::INFINITY, f64::min);
    let bottom = edges.iter().map(|e| e.y1).fold(f64::NEG_INFINITY, f64::max);

    let mut crossings: Vec<(f64, i32)> = Vec::with_capacity(edges.len());

    for y in 0..h {
        let sample_y = y as f64 + 0.5;
        if sample_y < top || sample_y >= bottom {
            continue;
        }

        crossings.clear();
        crossings.extend(
            edges
                .iter()
                .filter_map(|e| e.crossing(sample_y).map(|x| (x, e.winding))),
        );
        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

        let row = &mut coverage[y * w..(y + 1) * w];
        let mut winding = 0;
        for pair in crossings.windows(2) {
            winding += pair[0].1;
            if !shape.fill_rule.is_inside(winding) {
                continue;
            }
            // Pixels whose centre lies in [start, end)
            let first = (pair[0].0 - 0.5).ceil().clamp(0.0, w as f64) as usize;
            let last = (pair[1].0 - 0.5).ceil().clamp(0.0, w as f64) as usize;
            for v in &mut row[first..last.max(first)] {
                *v = 1.0;
            }
        }
    }

    coverage
}
