//! 4x4 matrix (single precision, row-major).
//!
//! Homogeneous 3D transforms and camera projections. Translation lives in
//! column 3; row 3 carries the perspective terms.

use crate::error::AlgebraError;
use crate::mat2::{col_out_of_range, row_out_of_range};
use crate::mat3::Mat3;
use glam::{Vec3, Vec4};

/// 4x4 matrix stored in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    /// Row 0, column 0.
    pub m00: f32,
    /// Row 0, column 1.
    pub m01: f32,
    /// Row 0, column 2.
    pub m02: f32,
    /// Row 0, column 3.
    pub m03: f32,
    /// Row 1, column 0.
    pub m10: f32,
    /// Row 1, column 1.
    pub m11: f32,
    /// Row 1, column 2.
    pub m12: f32,
    /// Row 1, column 3.
    pub m13: f32,
    /// Row 2, column 0.
    pub m20: f32,
    /// Row 2, column 1.
    pub m21: f32,
    /// Row 2, column 2.
    pub m22: f32,
    /// Row 2, column 3.
    pub m23: f32,
    /// Row 3, column 0.
    pub m30: f32,
    /// Row 3, column 1.
    pub m31: f32,
    /// Row 3, column 2.
    pub m32: f32,
    /// Row 3, column 3.
    pub m33: f32,
}

impl Mat4 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self::from_diagonal_elements(1.0, 1.0, 1.0, 1.0);

    /// Zero matrix.
    pub const ZERO: Self = Self::from_diagonal_elements(0.0, 0.0, 0.0, 0.0);

    /// Create a new matrix from individual elements in row-major order.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        m00: f32,
        m01: f32,
        m02: f32,
        m03: f32,
        m10: f32,
        m11: f32,
        m12: f32,
        m13: f32,
        m20: f32,
        m21: f32,
        m22: f32,
        m23: f32,
        m30: f32,
        m31: f32,
        m32: f32,
        m33: f32,
    ) -> Self {
        Self {
            m00,
            m01,
            m02,
            m03,
            m10,
            m11,
            m12,
            m13,
            m20,
            m21,
            m22,
            m23,
            m30,
            m31,
            m32,
            m33,
        }
    }

    /// Diagonal matrix from four scalars.
    #[inline]
    pub const fn from_diagonal_elements(d0: f32, d1: f32, d2: f32, d3: f32) -> Self {
        Self::new(
            d0, 0.0, 0.0, 0.0, //
            0.0, d1, 0.0, 0.0, //
            0.0, 0.0, d2, 0.0, //
            0.0, 0.0, 0.0, d3,
        )
    }

    /// Diagonal matrix from a vector.
    ///
    /// Not `const`: `Vec4` is SIMD-backed and its fields are only
    /// reachable through a non-const deref.
    #[inline]
    pub fn from_diagonal(diagonal: Vec4) -> Self {
        Self::from_diagonal_elements(diagonal.x, diagonal.y, diagonal.z, diagonal.w)
    }

    /// Create a new matrix from column vectors.
    pub fn from_cols(col0: Vec4, col1: Vec4, col2: Vec4, col3: Vec4) -> Self {
        Self::new(
            col0.x, col1.x, col2.x, col3.x, //
            col0.y, col1.y, col2.y, col3.y, //
            col0.z, col1.z, col2.z, col3.z, //
            col0.w, col1.w, col2.w, col3.w,
        )
    }

    /// Create a new matrix from a flat row-major array.
    pub const fn from_array(arr: &[f32; 16]) -> Self {
        Self::new(
            arr[0], arr[1], arr[2], arr[3], arr[4], arr[5], arr[6], arr[7], arr[8], arr[9],
            arr[10], arr[11], arr[12], arr[13], arr[14], arr[15],
        )
    }

    /// Convert to a flat row-major array.
    pub const fn to_array(&self) -> [f32; 16] {
        [
            self.m00, self.m01, self.m02, self.m03, //
            self.m10, self.m11, self.m12, self.m13, //
            self.m20, self.m21, self.m22, self.m23, //
            self.m30, self.m31, self.m32, self.m33,
        ]
    }

    /// Convert to nested row-major arrays.
    pub const fn to_rows(&self) -> [[f32; 4]; 4] {
        [
            [self.m00, self.m01, self.m02, self.m03],
            [self.m10, self.m11, self.m12, self.m13],
            [self.m20, self.m21, self.m22, self.m23],
            [self.m30, self.m31, self.m32, self.m33],
        ]
    }

    /// Embed a 3x3 linear map in the upper-left block.
    pub const fn from_mat3(linear: &Mat3) -> Self {
        Self::new(
            linear.m00, linear.m01, linear.m02, 0.0, //
            linear.m10, linear.m11, linear.m12, 0.0, //
            linear.m20, linear.m21, linear.m22, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Translation matrix.
    pub const fn from_translation(translation: Vec3) -> Self {
        Self::new(
            1.0,
            0.0,
            0.0,
            translation.x,
            0.0,
            1.0,
            0.0,
            translation.y,
            0.0,
            0.0,
            1.0,
            translation.z,
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }

    /// Per-axis scaling matrix.
    pub const fn from_scale(scale: Vec3) -> Self {
        Self::from_diagonal_elements(scale.x, scale.y, scale.z, 1.0)
    }

    /// Uniform scaling matrix.
    pub const fn from_scale_uniform(scale: f32) -> Self {
        Self::from_diagonal_elements(scale, scale, scale, 1.0)
    }

    /// Rotation matrix around the X axis.
    pub fn from_rotation_x(radians: f32) -> Self {
        Self::from_mat3(&Mat3::from_rotation_x(radians))
    }

    /// Rotation matrix around the Y axis.
    pub fn from_rotation_y(radians: f32) -> Self {
        Self::from_mat3(&Mat3::from_rotation_y(radians))
    }

    /// Rotation matrix around the Z axis.
    pub fn from_rotation_z(radians: f32) -> Self {
        Self::from_mat3(&Mat3::from_rotation_z(radians))
    }

    /// Rotation matrix around an arbitrary axis.
    pub fn from_axis_angle(axis: Vec3, radians: f32) -> Self {
        Self::from_mat3(&Mat3::from_axis_angle(axis, radians))
    }

    /// Affine transform composed as translate * rotate * scale, so scaling
    /// is applied first and translation last.
    pub fn from_trs(position: Vec3, rotation_axis: Vec3, rotation_radians: f32, scale: Vec3) -> Self {
        Self::from_translation(position)
            * Self::from_axis_angle(rotation_axis, rotation_radians)
            * Self::from_scale(scale)
    }

    /// Right-handed perspective projection.
    ///
    /// Fails with [`AlgebraError::InvalidProjection`] when the near plane
    /// is not positive or the far plane does not lie beyond it.
    pub fn perspective(
        fov_y_radians: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Result<Self, AlgebraError> {
        if near <= 0.0 {
            return Err(AlgebraError::InvalidProjection("near plane must be positive"));
        }
        if far <= near {
            return Err(AlgebraError::InvalidProjection(
                "far plane must be greater than near plane",
            ));
        }

        let f = 1.0 / (fov_y_radians * 0.5).tan();
        let nf = 1.0 / (near - far);

        Ok(Self::new(
            f / aspect_ratio,
            0.0,
            0.0,
            0.0,
            0.0,
            f,
            0.0,
            0.0,
            0.0,
            0.0,
            (far + near) * nf,
            2.0 * far * near * nf,
            0.0,
            0.0,
            -1.0,
            0.0,
        ))
    }

    /// Right-handed orthographic projection.
    ///
    /// Fails with [`AlgebraError::InvalidProjection`] when any pair of
    /// opposing planes coincides.
    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Result<Self, AlgebraError> {
        if left == right {
            return Err(AlgebraError::InvalidProjection("left cannot equal right"));
        }
        if bottom == top {
            return Err(AlgebraError::InvalidProjection("bottom cannot equal top"));
        }
        if near == far {
            return Err(AlgebraError::InvalidProjection(
                "near plane cannot equal far plane",
            ));
        }

        let inv_width = 1.0 / (right - left);
        let inv_height = 1.0 / (top - bottom);
        let inv_depth = 1.0 / (far - near);

        Ok(Self::new(
            2.0 * inv_width,
            0.0,
            0.0,
            -(right + left) * inv_width,
            0.0,
            2.0 * inv_height,
            0.0,
            -(top + bottom) * inv_height,
            0.0,
            0.0,
            -2.0 * inv_depth,
            -(far + near) * inv_depth,
            0.0,
            0.0,
            0.0,
            1.0,
        ))
    }

    /// Right-handed view matrix looking from `eye` towards `target`.
    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let s = f.cross(up).normalize();
        let u = s.cross(f);

        Self::new(
            s.x,
            s.y,
            s.z,
            -s.dot(eye),
            u.x,
            u.y,
            u.z,
            -u.dot(eye),
            -f.x,
            -f.y,
            -f.z,
            f.dot(eye),
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }

    /// Element at `(row, col)`, bounds-checked.
    pub fn get(&self, row: usize, col: usize) -> Result<f32, AlgebraError> {
        if col > 3 {
            return Err(col_out_of_range(col, 4));
        }
        Ok(self.to_rows()[row_checked(row)?][col])
    }

    /// Set the element at `(row, col)`, bounds-checked.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<(), AlgebraError> {
        if col > 3 {
            return Err(col_out_of_range(col, 4));
        }
        let mut rows = self.to_rows();
        rows[row_checked(row)?][col] = value;
        *self = Self::from_rows(&rows);
        Ok(())
    }

    /// Row `row` as a vector, bounds-checked.
    pub fn row(&self, row: usize) -> Result<Vec4, AlgebraError> {
        let r = self.to_rows()[row_checked(row)?];
        Ok(Vec4::new(r[0], r[1], r[2], r[3]))
    }

    /// Set row `row` from a vector, bounds-checked.
    pub fn set_row(&mut self, row: usize, value: Vec4) -> Result<(), AlgebraError> {
        let mut rows = self.to_rows();
        rows[row_checked(row)?] = [value.x, value.y, value.z, value.w];
        *self = Self::from_rows(&rows);
        Ok(())
    }

    /// Column `col` as a vector, bounds-checked.
    pub fn col(&self, col: usize) -> Result<Vec4, AlgebraError> {
        if col > 3 {
            return Err(col_out_of_range(col, 4));
        }
        let rows = self.to_rows();
        Ok(Vec4::new(
            rows[0][col],
            rows[1][col],
            rows[2][col],
            rows[3][col],
        ))
    }

    /// Set column `col` from a vector, bounds-checked.
    pub fn set_col(&mut self, col: usize, value: Vec4) -> Result<(), AlgebraError> {
        if col > 3 {
            return Err(col_out_of_range(col, 4));
        }
        let mut rows = self.to_rows();
        rows[0][col] = value.x;
        rows[1][col] = value.y;
        rows[2][col] = value.z;
        rows[3][col] = value.w;
        *self = Self::from_rows(&rows);
        Ok(())
    }

    const fn from_rows(rows: &[[f32; 4]; 4]) -> Self {
        Self::new(
            rows[0][0], rows[0][1], rows[0][2], rows[0][3], //
            rows[1][0], rows[1][1], rows[1][2], rows[1][3], //
            rows[2][0], rows[2][1], rows[2][2], rows[2][3], //
            rows[3][0], rows[3][1], rows[3][2], rows[3][3],
        )
    }

    /// Transform a point (w = 1), applying translation and the perspective
    /// divide. Returns the origin when the transformed w is exactly zero.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        let w = self.m30 * point.x + self.m31 * point.y + self.m32 * point.z + self.m33;
        if w == 0.0 {
            return Vec3::ZERO;
        }

        let inv_w = 1.0 / w;
        Vec3::new(
            (self.m00 * point.x + self.m01 * point.y + self.m02 * point.z + self.m03) * inv_w,
            (self.m10 * point.x + self.m11 * point.y + self.m12 * point.z + self.m13) * inv_w,
            (self.m20 * point.x + self.m21 * point.y + self.m22 * point.z + self.m23) * inv_w,
        )
    }

    /// Transform a direction (w = 0), ignoring translation.
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        Vec3::new(
            self.m00 * vector.x + self.m01 * vector.y + self.m02 * vector.z,
            self.m10 * vector.x + self.m11 * vector.y + self.m12 * vector.z,
            self.m20 * vector.x + self.m21 * vector.y + self.m22 * vector.z,
        )
    }

    /// Determinant via cofactor expansion along the first row.
    pub fn determinant(&self) -> f32 {
        let c00 = self.m11 * (self.m22 * self.m33 - self.m23 * self.m32)
            - self.m12 * (self.m21 * self.m33 - self.m23 * self.m31)
            + self.m13 * (self.m21 * self.m32 - self.m22 * self.m31);
        let c01 = self.m10 * (self.m22 * self.m33 - self.m23 * self.m32)
            - self.m12 * (self.m20 * self.m33 - self.m23 * self.m30)
            + self.m13 * (self.m20 * self.m32 - self.m22 * self.m30);
        let c02 = self.m10 * (self.m21 * self.m33 - self.m23 * self.m31)
            - self.m11 * (self.m20 * self.m33 - self.m23 * self.m30)
            + self.m13 * (self.m20 * self.m31 - self.m21 * self.m30);
        let c03 = self.m10 * (self.m21 * self.m32 - self.m22 * self.m31)
            - self.m11 * (self.m20 * self.m32 - self.m22 * self.m30)
            + self.m12 * (self.m20 * self.m31 - self.m21 * self.m30);

        self.m00 * c00 - self.m01 * c01 + self.m02 * c02 - self.m03 * c03
    }

    /// Trace (sum of diagonal elements).
    #[inline]
    pub fn trace(&self) -> f32 {
        self.m00 + self.m11 + self.m22 + self.m33
    }

    /// Transposed matrix.
    pub const fn transpose(&self) -> Self {
        Self::new(
            self.m00, self.m10, self.m20, self.m30, //
            self.m01, self.m11, self.m21, self.m31, //
            self.m02, self.m12, self.m22, self.m32, //
            self.m03, self.m13, self.m23, self.m33,
        )
    }

    /// Transpose in place.
    pub fn transpose_in_place(&mut self) {
        std::mem::swap(&mut self.m01, &mut self.m10);
        std::mem::swap(&mut self.m02, &mut self.m20);
        std::mem::swap(&mut self.m03, &mut self.m30);
        std::mem::swap(&mut self.m12, &mut self.m21);
        std::mem::swap(&mut self.m13, &mut self.m31);
        std::mem::swap(&mut self.m23, &mut self.m32);
    }

    /// Adjugate (transpose of the cofactor matrix), built from 3x3 minors.
    pub fn adjugate(&self) -> Self {
        let rows = self.to_rows();

        let minor = |skip_row: usize, skip_col: usize| -> f32 {
            let mut s = [[0.0f32; 3]; 3];
            let mut si = 0;
            for (i, row) in rows.iter().enumerate() {
                if i == skip_row {
                    continue;
                }
                let mut sj = 0;
                for (j, value) in row.iter().enumerate() {
                    if j == skip_col {
                        continue;
                    }
                    s[si][sj] = *value;
                    sj += 1;
                }
                si += 1;
            }

            s[0][0] * (s[1][1] * s[2][2] - s[1][2] * s[2][1])
                - s[0][1] * (s[1][0] * s[2][2] - s[1][2] * s[2][0])
                + s[0][2] * (s[1][0] * s[2][1] - s[1][1] * s[2][0])
        };

        let mut out = [[0.0f32; 4]; 4];
        for (i, _) in rows.iter().enumerate() {
            for j in 0..4 {
                let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
                // Cofactors land transposed.
                out[j][i] = sign * minor(i, j);
            }
        }

        Self::from_rows(&out)
    }

    /// Inverse of the matrix, `adjugate / determinant`.
    ///
    /// Fails with [`AlgebraError::SingularMatrix`] when `|det| < 1e-6`.
    pub fn inverse(&self) -> Result<Self, AlgebraError> {
        let det = self.determinant();
        if det.abs() < crate::EPSILON {
            return Err(AlgebraError::SingularMatrix { det });
        }
        Ok(self.adjugate() * (1.0 / det))
    }

    /// Non-erroring probe form of [`Self::inverse`].
    pub fn try_inverse(&self) -> Option<Self> {
        self.inverse().ok()
    }

    /// Invert in place.
    pub fn invert_in_place(&mut self) -> Result<(), AlgebraError> {
        *self = self.inverse()?;
        Ok(())
    }

    /// Checked scalar division. Fails when `|scalar|` is below epsilon.
    pub fn checked_div(&self, scalar: f32) -> Result<Self, AlgebraError> {
        if scalar.abs() < crate::EPSILON {
            return Err(AlgebraError::DivisionByZero);
        }
        Ok(*self / scalar)
    }

    /// Whether `|det| >= epsilon`.
    pub fn is_invertible(&self, epsilon: f32) -> bool {
        self.determinant().abs() >= epsilon
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

    /// Whether the matrix equals its transpose within epsilon.
    pub fn is_symmetric(&self, epsilon: f32) -> bool {
        self.approx_eq(&self.transpose(), epsilon)
    }

    /// Whether every off-diagonal element is within epsilon of zero.
    pub fn is_diagonal(&self, epsilon: f32) -> bool {
        let rows = self.to_rows();
        rows.iter().enumerate().all(|(i, row)| {
            row.iter()
                .enumerate()
                .all(|(j, v)| i == j || v.abs() < epsilon)
        })
    }

    /// Element-wise epsilon comparison.
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        let a = self.to_array();
        let b = other.to_array();
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < epsilon)
    }

    /// Per-element linear interpolation with `t` clamped to `[0, 1]`.
    ///
    /// Naive: a rotation matrix interpolated this way is not generally
    /// orthogonal.
    pub fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let av = a.to_array();
        let bv = b.to_array();
        let mut out = [0.0f32; 16];
        for (o, (x, y)) in out.iter_mut().zip(av.iter().zip(bv.iter())) {
            *o = x + (y - x) * t;
        }
        Self::from_array(&out)
    }

    /// Upper-left 3x3 linear block.
    pub const fn to_mat3(&self) -> Mat3 {
        Mat3::new(
            self.m00, self.m01, self.m02, //
            self.m10, self.m11, self.m12, //
            self.m20, self.m21, self.m22,
        )
    }
}

fn row_checked(row: usize) -> Result<usize, AlgebraError> {
    if row > 3 {
        return Err(row_out_of_range(row, 4));
    }
    Ok(row)
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let a = self.to_rows();
        let b = rhs.to_rows();
        let mut out = [[0.0f32; 4]; 4];
        for (i, row) in a.iter().enumerate() {
            for j in 0..4 {
                out[i][j] =
                    row[0] * b[0][j] + row[1] * b[1][j] + row[2] * b[2][j] + row[3] * b[3][j];
            }
        }
        Mat4::from_rows(&out)
    }
}

impl std::ops::MulAssign<Mat4> for Mat4 {
    #[inline]
    fn mul_assign(&mut self, rhs: Mat4) {
        *self = *self * rhs;
    }
}

impl std::ops::Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Self::Output {
        Vec4::new(
            self.m00 * rhs.x + self.m01 * rhs.y + self.m02 * rhs.z + self.m03 * rhs.w,
            self.m10 * rhs.x + self.m11 * rhs.y + self.m12 * rhs.z + self.m13 * rhs.w,
            self.m20 * rhs.x + self.m21 * rhs.y + self.m22 * rhs.z + self.m23 * rhs.w,
            self.m30 * rhs.x + self.m31 * rhs.y + self.m32 * rhs.z + self.m33 * rhs.w,
        )
    }
}

impl std::ops::Mul<f32> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: f32) -> Self::Output {
        let mut arr = self.to_array();
        for v in arr.iter_mut() {
            *v *= rhs;
        }
        Mat4::from_array(&arr)
    }
}

impl std::ops::Mul<Mat4> for f32 {
    type Output = Mat4;

    #[inline]
    fn mul(self, rhs: Mat4) -> Self::Output {
        rhs * self
    }
}

impl std::ops::MulAssign<f32> for Mat4 {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl std::ops::Add for Mat4 {
    type Output = Mat4;

    fn add(self, rhs: Mat4) -> Self::Output {
        let a = self.to_array();
        let b = rhs.to_array();
        let mut out = [0.0f32; 16];
        for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
            *o = x + y;
        }
        Mat4::from_array(&out)
    }
}

impl std::ops::AddAssign for Mat4 {
    #[inline]
    fn add_assign(&mut self, rhs: Mat4) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for Mat4 {
    type Output = Mat4;

    fn sub(self, rhs: Mat4) -> Self::Output {
        let a = self.to_array();
        let b = rhs.to_array();
        let mut out = [0.0f32; 16];
        for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
            *o = x - y;
        }
        Mat4::from_array(&out)
    }
}

impl std::ops::SubAssign for Mat4 {
    #[inline]
    fn sub_assign(&mut self, rhs: Mat4) {
        *self = *self - rhs;
    }
}

impl std::ops::Neg for Mat4 {
    type Output = Mat4;

    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

// IEEE division, no zero guard. Use `checked_div` for the erroring form.
impl std::ops::Div<f32> for Mat4 {
    type Output = Mat4;

    #[inline]
    fn div(self, rhs: f32) -> Self::Output {
        self * (1.0 / rhs)
    }
}

impl std::ops::DivAssign<f32> for Mat4 {
    #[inline]
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

impl std::fmt::Display for Mat4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.to_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[{}, {}, {}, {}]", row[0], row[1], row[2], row[3])?;
        }
        Ok(())
    }
}
