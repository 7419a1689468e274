//! Vector selection shapes.
//!
//! A selection is a list of path commands with an explicit fill rule. The
//! engine only reads shapes; builders return new values.

use crate::geometry::approximate_cubic_bezier;
use crate::types::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Control point distance for approximating a quarter ellipse with a cubic.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Rule deciding which regions of a self-overlapping path are inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FillRule {
    /// Inside where the winding number is non-zero.
    #[default]
    NonZero,
    /// Inside where a ray crosses the outline an odd number of times.
    EvenOdd,
}

impl FillRule {
    #[inline]
    pub fn is_inside(self, winding: i32) -> bool {
        match self {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}

/// One path command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PathCommand {
    /// Start a new subpath.
    MoveTo { to: Point },
    /// Straight segment from the current point.
    LineTo { to: Point },
    /// Cubic Bézier segment from the current point.
    CubicTo { c1: Point, c2: Point, to: Point },
    /// Close the current subpath back to its first point.
    Close,
}

/// A vector selection region.
///
/// Every subpath is treated as closed when filling.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectionShape {
    pub commands: Vec<PathCommand>,
    #[serde(default)]
    pub fill_rule: FillRule,
}

impl SelectionShape {
    pub fn new(commands: Vec<PathCommand>, fill_rule: FillRule) -> Self {
        Self {
            commands,
            fill_rule,
        }
    }

    /// Rectangular selection.
    pub fn rectangle(rect: &Rect) -> Self {
        Self::polygon(&[
            Point::new(rect.x, rect.y),
            Point::new(rect.right(), rect.y),
            Point::new(rect.right(), rect.bottom()),
            Point::new(rect.x, rect.bottom()),
        ])
    }

    /// Closed polygon through `points`, e.g. a lasso selection.
    pub fn polygon(points: &[Point]) -> Self {
        let mut commands = Vec::with_capacity(points.len() + 1);
        if let Some((first, rest)) = points.split_first() {
            commands.push(PathCommand::MoveTo { to: *first });
            commands.extend(rest.iter().map(|&to| PathCommand::LineTo { to }));
            commands.push(PathCommand::Close);
        }
        Self::new(commands, FillRule::NonZero)
    }

    /// Elliptical selection built from four cubic arcs.
    pub fn ellipse(center: Point, radius_x: f64, radius_y: f64) -> Self {
        let (cx, cy) = (center.x, center.y);
        let (kx, ky) = (radius_x * KAPPA, radius_y * KAPPA);
        let p = Point::new;

        Self::new(
            vec![
                PathCommand::MoveTo {
                    to: p(cx + radius_x, cy),
                },
                PathCommand::CubicTo {
                    c1: p(cx + radius_x, cy + ky),
                    c2: p(cx + kx, cy + radius_y),
                    to: p(cx, cy + radius_y),
                },
                PathCommand::CubicTo {
                    c1: p(cx - kx, cy + radius_y),
                    c2: p(cx - radius_x, cy + ky),
                    to: p(cx - radius_x, cy),
                },
                PathCommand::CubicTo {
                    c1: p(cx - radius_x, cy - ky),
                    c2: p(cx - kx, cy - radius_y),
                    to: p(cx, cy - radius_y),
                },
                PathCommand::CubicTo {
                    c1: p(cx + kx, cy - radius_y),
                    c2: p(cx + radius_x, cy - ky),
                    to: p(cx + radius_x, cy),
                },
                PathCommand::Close,
            ],
            FillRule::NonZero,
        )
    }

    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    /// Copy of the shape shifted by (`dx`, `dy`).
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let shift = |p: Point| Point::new(p.x + dx, p.y + dy);
        let commands = self
            .commands
            .iter()
            .map(|cmd| match *cmd {
                PathCommand::MoveTo { to } => PathCommand::MoveTo { to: shift(to) },
                PathCommand::LineTo { to } => PathCommand::LineTo { to: shift(to) },
                PathCommand::CubicTo { c1, c2, to } => PathCommand::CubicTo {
                    c1: shift(c1),
                    c2: shift(c2),
                    to: shift(to),
                },
                PathCommand::Close => PathCommand::Close,
            })
            .collect();
        Self::new(commands, self.fill_rule)
    }

    /// Flatten into closed polygons, one per subpath.
    ///
    /// Curves are subdivided into `steps` line segments. A `LineTo` or
    /// `CubicTo` with no current point acts as a `MoveTo` to its end point,
    /// and after `Close` drawing continues from the closed subpath's first
    /// point. Subpaths with fewer than three points enclose no area and are
    /// dropped.
    pub fn flatten(&self, steps: usize) -> Vec<Vec<Point>> {
        let mut polygons = Vec::new();
        let mut current: Vec<Point> = Vec::new();

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo { to } => {
                    finish_subpath(&mut polygons, &mut current);
                    current.push(to);
                }
                PathCommand::LineTo { to } => current.push(to),
                PathCommand::CubicTo { c1, c2, to } => match current.last() {
                    Some(&from) => {
                        let curve = approximate_cubic_bezier(from, c1, c2, to, steps);
                        current.extend(curve.into_iter().skip(1));
                    }
                    None => current.push(to),
                },
                PathCommand::Close => {
                    let start = current.first().copied();
                    finish_subpath(&mut polygons, &mut current);
                    current.extend(start);
                }
            }
        }
        finish_subpath(&mut polygons, &mut current);

        polygons
    }

    /// Bounding box of the flattened outline, or `None` for an empty shape.
    pub fn bounds(&self, steps: usize) -> Option<Rect> {
        let mut points = self.flatten(steps).into_iter().flatten();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Rect::from_points(min, max))
    }
}

fn finish_subpath(polygons: &mut Vec<Vec<Point>>, current: &mut Vec<Point>) {
    if current.len() >= 3 {
        polygons.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_flattens_to_one_quad() {
        let shape = SelectionShape::rectangle(&Rect::new(1.0, 2.0, 3.0, 4.0));
        let polys = shape.flatten(8);
        assert_eq!(polys.len(), 1);
        assert_eq!(
            polys[0],
            vec![
                Point::new(1.0, 2.0),
                Point::new(4.0, 2.0),
                Point::new(4.0, 6.0),
                Point::new(1.0, 6.0),
            ]
        );
    }

    #[test]
    fn test_multiple_subpaths() {
        let mut shape = SelectionShape::rectangle(&Rect::new(0.0, 0.0, 2.0, 2.0));
        shape
            .commands
            .extend(SelectionShape::rectangle(&Rect::new(5.0, 5.0, 2.0, 2.0)).commands);
        assert_eq!(shape.flatten(8).len(), 2);
    }

    #[test]
    fn test_degenerate_subpaths_dropped() {
        let shape = SelectionShape::new(
            vec![
                PathCommand::MoveTo {
                    to: Point::new(0.0, 0.0),
                },
                PathCommand::LineTo {
                    to: Point::new(1.0, 1.0),
                },
                PathCommand::MoveTo {
                    to: Point::new(3.0, 3.0),
                },
            ],
            FillRule::NonZero,
        );
        assert!(shape.flatten(8).is_empty());
        assert_eq!(shape.bounds(8), None);
    }

    #[test]
    fn test_curve_subdivision_count() {
        let shape = SelectionShape::new(
            vec![
                PathCommand::MoveTo {
                    to: Point::new(0.0, 0.0),
                },
                PathCommand::CubicTo {
                    c1: Point::new(0.0, 10.0),
                    c2: Point::new(10.0, 10.0),
                    to: Point::new(10.0, 0.0),
                },
                PathCommand::Close,
            ],
            FillRule::NonZero,
        );
        let polys = shape.flatten(5);
        // MoveTo point plus five curve samples
        assert_eq!(polys[0].len(), 6);
        assert_eq!(polys[0][5], Point::new(10.0, 0.0));
    }

    #[test]
    fn test_leading_cubic_starts_at_its_end_point() {
        let shape = SelectionShape::new(
            vec![
                PathCommand::CubicTo {
                    c1: Point::new(50.0, 50.0),
                    c2: Point::new(60.0, 60.0),
                    to: Point::new(0.0, 0.0),
                },
                PathCommand::LineTo {
                    to: Point::new(4.0, 0.0),
                },
                PathCommand::LineTo {
                    to: Point::new(4.0, 4.0),
                },
                PathCommand::Close,
            ],
            FillRule::NonZero,
        );
        let polys = shape.flatten(8);
        assert_eq!(polys.len(), 1);
        assert_eq!(
            polys[0],
            vec![
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(4.0, 4.0),
            ]
        );
        // Control points of the leading curve are not part of the outline
        let b = shape.bounds(8).unwrap();
        assert_eq!(b.right(), 4.0);
    }

    #[test]
    fn test_line_after_close_continues_from_start() {
        let shape = SelectionShape::new(
            vec![
                PathCommand::MoveTo {
                    to: Point::new(0.0, 0.0),
                },
                PathCommand::LineTo {
                    to: Point::new(4.0, 0.0),
                },
                PathCommand::LineTo {
                    to: Point::new(4.0, 4.0),
                },
                PathCommand::Close,
                PathCommand::LineTo {
                    to: Point::new(-4.0, 0.0),
                },
                PathCommand::LineTo {
                    to: Point::new(-4.0, -4.0),
                },
            ],
            FillRule::NonZero,
        );
        let polys = shape.flatten(8);
        assert_eq!(polys.len(), 2);
        assert_eq!(polys[1][0], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_ellipse_bounds() {
        let shape = SelectionShape::ellipse(Point::new(50.0, 40.0), 20.0, 10.0);
        let b = shape.bounds(32).unwrap();
        assert!((b.x - 30.0).abs() < 1e-9);
        assert!((b.right() - 70.0).abs() < 1e-9);
        assert!((b.y - 30.0).abs() < 1e-9);
        assert!((b.bottom() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_translated() {
        let shape = SelectionShape::rectangle(&Rect::new(0.0, 0.0, 2.0, 2.0))
            .with_fill_rule(FillRule::EvenOdd)
            .translated(10.0, 5.0);
        assert_eq!(shape.fill_rule, FillRule::EvenOdd);
        assert_eq!(shape.bounds(8), Some(Rect::new(10.0, 5.0, 2.0, 2.0)));
    }

    #[test]
    fn test_fill_rules() {
        assert!(FillRule::NonZero.is_inside(2));
        assert!(!FillRule::EvenOdd.is_inside(2));
        assert!(FillRule::EvenOdd.is_inside(-1));
        assert!(!FillRule::NonZero.is_inside(0));
    }

    #[test]
    fn test_deserialize_from_editor_json() {
        let json = r#"{
            "commands": [
                {"type": "moveTo", "to": {"x": 0.0, "y": 0.0}},
                {"type": "lineTo", "to": {"x": 10.0, "y": 0.0}},
                {
                    "type": "cubicTo",
                    "c1": {"x": 10.0, "y": 5.0},
                    "c2": {"x": 5.0, "y": 10.0},
                    "to": {"x": 0.0, "y": 10.0}
                },
                {"type": "close"}
            ],
            "fill_rule": "evenOdd"
        }"#;
        let shape: SelectionShape = serde_json::from_str(json).unwrap();
        assert_eq!(shape.commands.len(), 4);
        assert_eq!(shape.commands[3], PathCommand::Close);
        assert_eq!(shape.fill_rule, FillRule::EvenOdd);
    }

    #[test]
    fn test_fill_rule_defaults_to_non_zero() {
        let shape: SelectionShape = serde_json::from_str(r#"{"commands": []}"#).unwrap();
        assert_eq!(shape.fill_rule, FillRule::NonZero);
    }
}
