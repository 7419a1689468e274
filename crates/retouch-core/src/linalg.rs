//! Dense linear algebra for the perspective engine.
//!
//! - [`solve`]: Gaussian elimination with partial pivoting for n×n systems
//! - [`invert_3x3`]: closed-form adjugate inversion
//!
//! Both reject systems whose pivot (or determinant) magnitude falls below
//! [`SINGULAR_EPSILON`]. That signals degenerate input such as collinear
//! points; retrying gives the same answer.

use crate::types::{EngineError, EngineResult, Point};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Smallest pivot or determinant magnitude accepted as non-singular.
pub const SINGULAR_EPSILON: f64 = 1e-10;

/// True when `v` is too small (or NaN) to divide by.
#[inline]
fn is_negligible(v: f64) -> bool {
    v.is_nan() || v.abs() < SINGULAR_EPSILON
}

/// Row-major 3×3 matrix representing a homogeneous 2D projective transform.
///
/// ```text
/// | a b c |
/// | d e f |
/// | g h i |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix3x3(pub [f64; 9]);

impl Default for Matrix3x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3x3 {
    pub const IDENTITY: Matrix3x3 = Matrix3x3([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// Entry at row `r`, column `c`.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.0[r * 3 + c]
    }

    /// Matrix product `self * rhs`.
    pub fn multiply(&self, rhs: &Matrix3x3) -> Matrix3x3 {
        let mut out = [0.0f64; 9];
        for r in 0..3 {
            for c in 0..3 {
                out[r * 3 + c] = (0..3).map(|k| self.get(r, k) * rhs.get(k, c)).sum();
            }
        }
        Matrix3x3(out)
    }

    /// Scale so the bottom-right entry is 1.
    ///
    /// Matrices whose bottom-right entry is near zero are returned unchanged.
    pub fn normalized(&self) -> Matrix3x3 {
        let i = self.0[8];
        if is_negligible(i) {
            return *self;
        }
        let mut out = self.0;
        for v in &mut out {
            *v /= i;
        }
        Matrix3x3(out)
    }

    /// Map a point through the transform with homogeneous division.
    ///
    /// Returns `None` when the point maps to infinity.
    #[inline]
    pub fn transform_point(&self, p: Point) -> Option<Point> {
        let m = &self.0;
        let denominator = m[6] * p.x + m[7] * p.y + m[8];
        if is_negligible(denominator) {
            return None;
        }
        Some(Point::new(
            (m[0] * p.x + m[1] * p.y + m[2]) / denominator,
            (m[3] * p.x + m[4] * p.y + m[5]) / denominator,
        ))
    }

    /// Check element-wise closeness to another matrix.
    pub fn approx_eq(&self, other: &Matrix3x3, tolerance: f64) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

/// Solve `A·x = b` for a square matrix `A`.
///
/// Uses Gaussian elimination with partial pivoting: at each column the row
/// with the largest absolute entry is swapped into the pivot position. The
/// inputs are not modified.
///
/// # Errors
///
/// - [`EngineError::Singular`] if any pivot magnitude is below [`SINGULAR_EPSILON`]
///   or NaN, or the solution is not finite
/// - [`EngineError::DimensionMismatch`] if `A` is not n×n or `b` is not length n
pub fn solve(a: &[Vec<f64>], b: &[f64]) -> EngineResult<Vec<f64>> {
    let n = b.len();
    if a.len() != n {
        return Err(EngineError::DimensionMismatch {
            expected: n,
            actual: a.len(),
        });
    }
    if let Some(row) = a.iter().find(|row| row.len() != n) {
        return Err(EngineError::DimensionMismatch {
            expected: n,
            actual: row.len(),
        });
    }

    // Augmented matrix [A | b]
    let mut m: Vec<Vec<f64>> = a
        .iter()
        .zip(b.iter())
        .map(|(row, &rhs)| {
            let mut r = row.clone();
            r.push(rhs);
            r
        })
        .collect();

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| m[i][col].abs().total_cmp(&m[j][col].abs()))
            .unwrap_or(col);

        let pivot = m[pivot_row][col];
        if is_negligible(pivot) {
            debug!(col, pivot, "rejecting singular linear system");
            return Err(EngineError::Singular);
        }
        m.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = m[row][col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..=n {
                m[row][k] -= factor * m[col][k];
            }
        }
    }

    // Back substitution
    let mut x = vec![0.0f64; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| m[row][k] * x[k]).sum();
        x[row] = (m[row][n] - tail) / m[row][row];
    }

    if x.iter().any(|v| !v.is_finite()) {
        debug!("rejecting linear system with non-finite solution");
        return Err(EngineError::Singular);
    }

    Ok(x)
}

/// Invert a 3×3 matrix using the adjugate.
///
/// # Errors
///
/// [`EngineError::Singular`] if the determinant magnitude is below
/// [`SINGULAR_EPSILON`] or NaN.
pub fn invert_3x3(matrix: &Matrix3x3) -> EngineResult<Matrix3x3> {
    let [a, b, c, d, e, f, g, h, i] = matrix.0;

    let co_a = e * i - f * h;
    let co_b = -(d * i - f * g);
    let co_c = d * h - e * g;

    let det = a * co_a + b * co_b + c * co_c;
    if is_negligible(det) {
        debug!(det, "rejecting singular 3x3 matrix");
        return Err(EngineError::Singular);
    }

    let inv_det = 1.0 / det;
    Ok(Matrix3x3([
        co_a * inv_det,
        (c * h - b * i) * inv_det,
        (b * f - c * e) * inv_det,
        co_b * inv_det,
        (a * i - c * g) * inv_det,
        (c * d - a * f) * inv_det,
        co_c * inv_det,
        (b * g - a * h) * inv_det,
        (a * e - b * d) * inv_det,
    ]))
}
