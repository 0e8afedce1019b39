//! 3x3 matrix type for color transformations.
//!
//! [`Mat3`] holds the sRGB/XYZ matrices and anything derived from
//! primaries.
//!
//! # Convention
//!
//! Matrices are stored in **row-major** order and use **column vectors**:
//!
//! ```text
//! | m00 m01 m02 |   | x |   | m00*x + m01*y + m02*z |
//! | m10 m11 m12 | * | y | = | m10*x + m11*y + m12*z |
//! | m20 m21 m22 |   | z |   | m20*x + m21*y + m22*z |
//! ```

use glam::DMat3;
use std::ops::{Index, Mul};

/// Determinant magnitude below which a matrix counts as singular.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// A 3x3 `f64` matrix, row-major.
///
/// # Example
///
/// ```rust
/// use chromat_math::Mat3;
///
/// let v = [1.0, 2.0, 3.0];
/// assert_eq!(Mat3::IDENTITY.transform(v), v);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    /// Matrix elements in row-major order: [row0, row1, row2]
    pub m: [[f64; 3]; 3],
}

impl Mat3 {
    /// Zero matrix.
    pub const ZERO: Self = Self { m: [[0.0; 3]; 3] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self::diagonal(1.0, 1.0, 1.0);

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self { m: rows }
    }

    /// Creates a matrix from column arrays.
    #[inline]
    pub const fn from_cols(cols: [[f64; 3]; 3]) -> Self {
        Self {
            m: [
                [cols[0][0], cols[1][0], cols[2][0]],
                [cols[0][1], cols[1][1], cols[2][1]],
                [cols[0][2], cols[1][2], cols[2][2]],
            ],
        }
    }

    /// Creates a diagonal matrix.
    #[inline]
    pub const fn diagonal(d0: f64, d1: f64, d2: f64) -> Self {
        Self::from_rows([[d0, 0.0, 0.0], [0.0, d1, 0.0], [0.0, 0.0, d2]])
    }

    /// Creates a uniform scale matrix.
    #[inline]
    pub const fn scale(s: f64) -> Self {
        Self::diagonal(s, s, s)
    }

    /// Row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> [f64; 3] {
        self.m[i]
    }

    /// Column `i`.
    #[inline]
    pub fn col(&self, i: usize) -> [f64; 3] {
        [self.m[0][i], self.m[1][i], self.m[2][i]]
    }

    /// Returns the transpose.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols(self.m)
    }

    /// Computes the determinant.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.to_glam().determinant()
    }

    /// Computes the inverse.
    ///
    /// Returns `None` if the determinant is below [`SINGULAR_EPSILON`].
    ///
    /// ```rust
    /// use chromat_math::Mat3;
    ///
    /// let inv = Mat3::scale(2.0).inverse().unwrap();
    /// assert_eq!(inv, Mat3::scale(0.5));
    /// assert!(Mat3::ZERO.inverse().is_none());
    /// ```
    pub fn inverse(&self) -> Option<Self> {
        let g = self.to_glam();
        if g.determinant().abs() < SINGULAR_EPSILON {
            return None;
        }
        Some(Self::from_glam(g.inverse()))
    }

    /// Multiplies a column vector: `self * v`.
    #[inline]
    pub fn transform(&self, v: [f64; 3]) -> [f64; 3] {
        let m = &self.m;
        [
            m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
            m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
            m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
        ]
    }

    /// Matrix product `self * other`.
    #[inline]
    pub fn mul_mat(&self, other: &Self) -> Self {
        Self::from_glam(self.to_glam() * other.to_glam())
    }

    /// Returns true if all elements are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|x| x.is_finite())
    }

    /// Largest absolute element-wise difference to `other`.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    /// Converts to glam (column-major).
    #[inline]
    pub fn to_glam(&self) -> DMat3 {
        DMat3::from_cols_array_2d(&self.transpose().m)
    }

    /// Creates from glam.
    #[inline]
    pub fn from_glam(m: DMat3) -> Self {
        Self::from_cols(m.to_cols_array_2d())
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<[f64; 3]> for Mat3 {
    type Output = [f64; 3];

    #[inline]
    fn mul(self, rhs: [f64; 3]) -> [f64; 3] {
        self.transform(rhs)
    }
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

impl Index<usize> for Mat3 {
    type Output = [f64; 3];

    #[inline]
    fn index(&self, i: usize) -> &[f64; 3] {
        &self.m[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: Mat3 = Mat3::from_rows([[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]);

    #[test]
    fn test_mat3_scale() {
        assert_eq!(Mat3::scale(2.0) * [1.0, 2.0, 3.0], [2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_mat3_transpose() {
        let t = M.transpose();
        assert_eq!(t.m[0][1], 0.0);
        assert_eq!(t.m[1][0], 2.0);
        assert_eq!(t.col(2), M.row(2));
    }

    #[test]
    fn test_mat3_glam_layout() {
        // glam is column-major; a roundtrip must not transpose.
        assert_eq!(Mat3::from_glam(M.to_glam()), M);
        let v = [0.3, -1.5, 2.0];
        let g = M.to_glam() * glam::DVec3::from_array(v);
        let ours = M.transform(v);
        for i in 0..3 {
            assert!((g.to_array()[i] - ours[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_mat3_determinant() {
        assert!((M.determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mat3_inverse() {
        let inv = M.inverse().unwrap();
        assert!((M * inv).max_abs_diff(&Mat3::IDENTITY) < 1e-12);
    }

    #[test]
    fn test_mat3_singular() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 1.0, 1.0]]);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn test_mat3_mul_order() {
        let a = Mat3::from_rows([[0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]]);
        let v = [1.0, 2.0, 3.0];
        assert_eq!((a * M).transform(v), a.transform(M.transform(v)));
    }
}
