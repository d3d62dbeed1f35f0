//! 2x2 matrix (single precision, row-major).

use crate::error::AlgebraError;
use glam::Vec2;

/// 2x2 matrix stored in row-major order.
///
/// Used for the rotation/scale part of a 2D affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat2 {
    /// Row 0, column 0.
    pub m00: f32,
    /// Row 0, column 1.
    pub m01: f32,
    /// Row 1, column 0.
    pub m10: f32,
    /// Row 1, column 1.
    pub m11: f32,
}

impl Mat2 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    /// Zero matrix.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new matrix from individual elements in row-major order.
    #[inline]
    pub const fn new(m00: f32, m01: f32, m10: f32, m11: f32) -> Self {
        Self { m00, m01, m10, m11 }
    }

    /// Create a new matrix from column vectors.
    #[inline]
    pub const fn from_cols(x_axis: Vec2, y_axis: Vec2) -> Self {
        Self::new(x_axis.x, y_axis.x, x_axis.y, y_axis.y)
    }

    /// Create a new matrix from a flat row-major array.
    #[inline]
    pub const fn from_array(arr: &[f32; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Convert to a flat row-major array.
    #[inline]
    pub const fn to_array(&self) -> [f32; 4] {
        [self.m00, self.m01, self.m10, self.m11]
    }

    /// Diagonal matrix from a vector.
    #[inline]
    pub const fn from_diagonal(diagonal: Vec2) -> Self {
        Self::new(diagonal.x, 0.0, 0.0, diagonal.y)
    }

    /// Per-axis scaling matrix.
    #[inline]
    pub const fn from_scale(scale: Vec2) -> Self {
        Self::from_diagonal(scale)
    }

    /// Uniform scaling matrix.
    #[inline]
    pub const fn from_scale_uniform(scale: f32) -> Self {
        Self::new(scale, 0.0, 0.0, scale)
    }

    /// Rotation matrix for an angle in radians.
    pub fn from_angle(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, -sin, sin, cos)
    }

    /// Rotation matrix for an angle in degrees.
    pub fn from_angle_deg(degrees: f32) -> Self {
        Self::from_angle(degrees.to_radians())
    }

    /// Element at `(row, col)`, bounds-checked.
    pub fn get(&self, row: usize, col: usize) -> Result<f32, AlgebraError> {
        Ok(self.row(row)?[col_checked(col, 2)?])
    }

    /// Set the element at `(row, col)`, bounds-checked.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<(), AlgebraError> {
        col_checked(col, 2)?;
        match (row, col) {
            (0, 0) => self.m00 = value,
            (0, 1) => self.m01 = value,
            (1, 0) => self.m10 = value,
            (1, 1) => self.m11 = value,
            _ => return Err(row_out_of_range(row, 2)),
        }
        Ok(())
    }

    /// Row `row` as a vector, bounds-checked.
    pub fn row(&self, row: usize) -> Result<[f32; 2], AlgebraError> {
        match row {
            0 => Ok([self.m00, self.m01]),
            1 => Ok([self.m10, self.m11]),
            _ => Err(row_out_of_range(row, 2)),
        }
    }

    /// Set row `row` from a pair of elements, bounds-checked.
    pub fn set_row(&mut self, row: usize, value: [f32; 2]) -> Result<(), AlgebraError> {
        match row {
            0 => {
                self.m00 = value[0];
                self.m01 = value[1];
            }
            1 => {
                self.m10 = value[0];
                self.m11 = value[1];
            }
            _ => return Err(row_out_of_range(row, 2)),
        }
        Ok(())
    }

    /// Column `col` as a vector, bounds-checked.
    pub fn col(&self, col: usize) -> Result<Vec2, AlgebraError> {
        match col {
            0 => Ok(Vec2::new(self.m00, self.m10)),
            1 => Ok(Vec2::new(self.m01, self.m11)),
            _ => Err(col_out_of_range(col, 2)),
        }
    }

    /// Set column `col` from a vector, bounds-checked.
    pub fn set_col(&mut self, col: usize, value: Vec2) -> Result<(), AlgebraError> {
        match col {
            0 => {
                self.m00 = value.x;
                self.m10 = value.y;
            }
            1 => {
                self.m01 = value.x;
                self.m11 = value.y;
            }
            _ => return Err(col_out_of_range(col, 2)),
        }
        Ok(())
    }

    /// Determinant: `m00 * m11 - m01 * m10`.
    #[inline]
    pub fn determinant(&self) -> f32 {
        self.m00 * self.m11 - self.m01 * self.m10
    }

    /// Trace (sum of diagonal elements).
    #[inline]
    pub fn trace(&self) -> f32 {
        self.m00 + self.m11
    }

    /// Transposed matrix.
    #[inline]
    pub const fn transpose(&self) -> Self {
        Self::new(self.m00, self.m10, self.m01, self.m11)
    }

    /// Adjugate (transpose of the cofactor matrix).
    #[inline]
    pub const fn adjugate(&self) -> Self {
        Self::new(self.m11, -self.m01, -self.m10, self.m00)
    }

    /// Inverse of the matrix.
    ///
    /// The 2x2 singularity test is an exact zero comparison on the
    /// determinant, unlike the epsilon test used by [`crate::Mat3`] and
    /// [`crate::Mat4`].
    pub fn inverse(&self) -> Result<Self, AlgebraError> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(AlgebraError::SingularMatrix { det });
        }
        Ok(Self::new(
            self.m11 / det,
            -self.m01 / det,
            -self.m10 / det,
            self.m00 / det,
        ))
    }

    /// Non-erroring probe form of [`Self::inverse`].
    pub fn try_inverse(&self) -> Option<Self> {
        self.inverse().ok()
    }

    /// Checked scalar division. Fails when `|scalar|` is below epsilon.
    pub fn checked_div(&self, scalar: f32) -> Result<Self, AlgebraError> {
        if scalar.abs() < crate::EPSILON {
            return Err(AlgebraError::DivisionByZero);
        }
        Ok(*self / scalar)
    }

    /// Whether the determinant is non-zero (exact test, matching
    /// [`Self::inverse`]).
    #[inline]
    pub fn is_invertible(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Whether all elements are within epsilon of zero.
    pub fn is_zero(&self, epsilon: f32) -> bool {
        self.approx_eq(&Self::ZERO, epsilon)
    }

    /// Whether the matrix is within epsilon of the identity.
    pub fn is_identity(&self, epsilon: f32) -> bool {
        self.approx_eq(&Self::IDENTITY, epsilon)
    }

    /// Whether `transpose * self` is within epsilon of the identity.
    pub fn is_orthogonal(&self, epsilon: f32) -> bool {
        (self.transpose() * *self).is_identity(epsilon)
    }

    /// Element-wise epsilon comparison.
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.m00 - other.m00).abs() < epsilon
            && (self.m01 - other.m01).abs() < epsilon
            && (self.m10 - other.m10).abs() < epsilon
            && (self.m11 - other.m11).abs() < epsilon
    }

    /// Normalize both columns to unit length.
    ///
    /// Fails with [`AlgebraError::SingularMatrix`] when either column has
    /// zero length.
    pub fn orthogonalize(&self) -> Result<Self, AlgebraError> {
        let len0 = (self.m00 * self.m00 + self.m10 * self.m10).sqrt();
        let len1 = (self.m01 * self.m01 + self.m11 * self.m11).sqrt();

        if len0 == 0.0 || len1 == 0.0 {
            return Err(AlgebraError::SingularMatrix {
                det: self.determinant(),
            });
        }

        Ok(Self::new(
            self.m00 / len0,
            self.m01 / len1,
            self.m10 / len0,
            self.m11 / len1,
        ))
    }

    /// Per-element linear interpolation with `t` clamped to `[0, 1]`.
    ///
    /// Naive: a rotation matrix interpolated this way is not generally
    /// orthogonal.
    pub fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            a.m00 + (b.m00 - a.m00) * t,
            a.m01 + (b.m01 - a.m01) * t,
            a.m10 + (b.m10 - a.m10) * t,
            a.m11 + (b.m11 - a.m11) * t,
        )
    }

    /// Post-multiply by a rotation of `radians`.
    pub fn rotated(&self, radians: f32) -> Self {
        *self * Self::from_angle(radians)
    }

    /// Scale the columns by the given per-axis factors.
    pub const fn scaled(&self, scale_x: f32, scale_y: f32) -> Self {
        Self::new(
            self.m00 * scale_x,
            self.m01 * scale_y,
            self.m10 * scale_x,
            self.m11 * scale_y,
        )
    }

    /// Apply a shear along both axes.
    pub const fn sheared(&self, shear_x: f32, shear_y: f32) -> Self {
        Self::new(
            self.m00 + shear_x * self.m10,
            self.m01 + shear_x * self.m11,
            self.m10 + shear_y * self.m00,
            self.m11 + shear_y * self.m01,
        )
    }
}

impl Default for Mat2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

pub(crate) fn row_out_of_range(index: usize, len: usize) -> AlgebraError {
    AlgebraError::IndexOutOfRange {
        axis: "row",
        index,
        len,
    }
}

pub(crate) fn col_out_of_range(index: usize, len: usize) -> AlgebraError {
    AlgebraError::IndexOutOfRange {
        axis: "column",
        index,
        len,
    }
}

pub(crate) fn col_checked(col: usize, len: usize) -> Result<usize, AlgebraError> {
    if col < len {
        Ok(col)
    } else {
        Err(col_out_of_range(col, len))
    }
}

impl std::ops::Mul<Mat2> for Mat2 {
    type Output = Mat2;

    fn mul(self, rhs: Mat2) -> Self::Output {
        Mat2::new(
            self.m00 * rhs.m00 + self.m01 * rhs.m10,
            self.m00 * rhs.m01 + self.m01 * rhs.m11,
            self.m10 * rhs.m00 + self.m11 * rhs.m10,
            self.m10 * rhs.m01 + self.m11 * rhs.m11,
        )
    }
}

impl std::ops::MulAssign<Mat2> for Mat2 {
    #[inline]
    fn mul_assign(&mut self, rhs: Mat2) {
        *self = *self * rhs;
    }
}

impl std::ops::Mul<Vec2> for Mat2 {
    type Output = Vec2;

    #[inline]
    fn mul(self, rhs: Vec2) -> Self::Output {
        Vec2::new(
            self.m00 * rhs.x + self.m01 * rhs.y,
            self.m10 * rhs.x + self.m11 * rhs.y,
        )
    }
}

impl std::ops::Mul<f32> for Mat2 {
    type Output = Mat2;

    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Mat2::new(
            self.m00 * rhs,
            self.m01 * rhs,
            self.m10 * rhs,
            self.m11 * rhs,
        )
    }
}

impl std::ops::Mul<Mat2> for f32 {
    type Output = Mat2;

    #[inline]
    fn mul(self, rhs: Mat2) -> Self::Output {
        rhs * self
    }
}

impl std::ops::MulAssign<f32> for Mat2 {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl std::ops::Add for Mat2 {
    type Output = Mat2;

    #[inline]
    fn add(self, rhs: Mat2) -> Self::Output {
        Mat2::new(
            self.m00 + rhs.m00,
            self.m01 + rhs.m01,
            self.m10 + rhs.m10,
            self.m11 + rhs.m11,
        )
    }
}

impl std::ops::AddAssign for Mat2 {
    #[inline]
    fn add_assign(&mut self, rhs: Mat2) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for Mat2 {
    type Output = Mat2;

    #[inline]
    fn sub(self, rhs: Mat2) -> Self::Output {
        Mat2::new(
            self.m00 - rhs.m00,
            self.m01 - rhs.m01,
            self.m10 - rhs.m10,
            self.m11 - rhs.m11,
        )
    }
}

impl std::ops::SubAssign for Mat2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Mat2) {
        *self = *self - rhs;
    }
}

impl std::ops::Neg for Mat2 {
    type Output = Mat2;

    #[inline]
    fn neg(self) -> Self::Output {
        Mat2::new(-self.m00, -self.m01, -self.m10, -self.m11)
    }
}

// IEEE division, no zero guard. Use `checked_div` for the erroring form.
impl std::ops::Div<f32> for Mat2 {
    type Output = Mat2;

    #[inline]
    fn div(self, rhs: f32) -> Self::Output {
        Mat2::new(
            self.m00 / rhs,
            self.m01 / rhs,
            self.m10 / rhs,
            self.m11 / rhs,
        )
    }
}

impl std::ops::DivAssign<f32> for Mat2 {
    #[inline]
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

impl std::fmt::Display for Mat2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[{}, {}]", self.m00, self.m01)?;
        write!(f, "[{}, {}]", self.m10, self.m11)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_determinant() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.determinant(), -2.0);
    }

    #[test]
    fn test_mul_identity() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m * Mat2::IDENTITY, m);
        assert_eq!(Mat2::IDENTITY * m, m);
    }

    #[test]
    fn test_mul_vec2() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        let v = Vec2::new(1.0, 1.0);
        assert_eq!(m * v, Vec2::new(3.0, 7.0));
    }

    #[test]
    fn test_inverse_roundtrip() {
        let m = Mat2::new(4.0, 7.0, 2.0, 6.0);
        let inv = m.inverse().unwrap();
        let product = m * inv;
        assert!(product.is_identity(1e-5));

        let back = inv.inverse().unwrap();
        assert!(back.approx_eq(&m, 1e-5));
    }

    #[test]
    fn test_inverse_singular() {
        let m = Mat2::new(1.0, 2.0, 2.0, 4.0);
        assert!(!m.is_invertible());
        assert!(matches!(
            m.inverse(),
            Err(AlgebraError::SingularMatrix { .. })
        ));
        assert!(m.try_inverse().is_none());
    }

    #[test]
    fn test_adjugate() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.adjugate(), Mat2::new(4.0, -2.0, -3.0, 1.0));
    }

    #[test]
    fn test_transpose_involution() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_rotation_is_orthogonal() {
        let r = Mat2::from_angle(std::f32::consts::FRAC_PI_3);
        assert!(r.is_orthogonal(EPSILON));
        assert_relative_eq!(r.determinant(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_deg_quarter_turn() {
        let r = Mat2::from_angle_deg(90.0);
        let v = r * Vec2::new(1.0, 0.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_checked_div() {
        let m = Mat2::new(2.0, 4.0, 6.0, 8.0);
        let half = m.checked_div(2.0).unwrap();
        assert_eq!(half, Mat2::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(m.checked_div(0.0), Err(AlgebraError::DivisionByZero));
    }

    #[test]
    fn test_orthogonalize() {
        let m = Mat2::new(2.0, 0.0, 0.0, 3.0);
        let o = m.orthogonalize().unwrap();
        assert!(o.is_identity(EPSILON));

        let degenerate = Mat2::new(0.0, 1.0, 0.0, 1.0);
        assert!(degenerate.orthogonalize().is_err());
    }

    #[test]
    fn test_accessors_bounds() {
        let mut m = Mat2::IDENTITY;
        assert_eq!(m.get(1, 0).unwrap(), 0.0);
        assert!(matches!(
            m.get(2, 0),
            Err(AlgebraError::IndexOutOfRange { axis: "row", .. })
        ));
        assert!(matches!(
            m.set(0, 2, 1.0),
            Err(AlgebraError::IndexOutOfRange { axis: "column", .. })
        ));
        m.set(0, 1, 5.0).unwrap();
        assert_eq!(m.m01, 5.0);
    }

    #[test]
    fn test_set_row_and_col() {
        let mut m = Mat2::IDENTITY;
        m.set_row(0, [2.0, 3.0]).unwrap();
        assert_eq!(m.row(0).unwrap(), [2.0, 3.0]);
        m.set_col(1, Vec2::new(4.0, 5.0)).unwrap();
        assert_eq!(m.col(1).unwrap(), Vec2::new(4.0, 5.0));
        assert!(m.set_row(2, [0.0, 0.0]).is_err());
        assert!(m.set_col(2, Vec2::ZERO).is_err());
    }

    #[test]
    fn test_lerp_clamps_and_interpolates() {
        let a = Mat2::ZERO;
        let b = Mat2::from_scale_uniform(2.0);
        assert_eq!(Mat2::lerp(&a, &b, -1.0), a);
        assert_eq!(Mat2::lerp(&a, &b, 2.0), b);
        assert!(Mat2::lerp(&a, &b, 0.5).is_identity(EPSILON));
    }

    #[test]
    fn test_from_scale() {
        let m = Mat2::from_scale(Vec2::new(2.0, 3.0));
        assert_eq!(m * Vec2::new(1.0, 1.0), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_array_roundtrip() {
        let m = Mat2::from_array(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(m.to_array(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(m.row(0).unwrap(), [1.0, 2.0]);
        assert_eq!(m.col(1).unwrap(), Vec2::new(2.0, 4.0));
    }
}
