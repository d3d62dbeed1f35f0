//! 3x3 matrix (single precision, row-major).
//!
//! The workhorse of the kernel: rotation/scale/shear in 3D and homogeneous
//! 2D affine transforms. The symmetric eigenvalue solver lives in
//! [`crate::eigen`].

use crate::error::AlgebraError;
use crate::mat2::{col_checked, col_out_of_range, row_out_of_range};
use glam::Vec3;

/// 3x3 matrix stored in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    /// Row 0, column 0.
    pub m00: f32,
    /// Row 0, column 1.
    pub m01: f32,
    /// Row 0, column 2.
    pub m02: f32,
    /// Row 1, column 0.
    pub m10: f32,
    /// Row 1, column 1.
    pub m11: f32,
    /// Row 1, column 2.
    pub m12: f32,
    /// Row 2, column 0.
    pub m20: f32,
    /// Row 2, column 1.
    pub m21: f32,
    /// Row 2, column 2.
    pub m22: f32,
}

impl Mat3 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self::from_diagonal_elements(1.0, 1.0, 1.0);

    /// Zero matrix.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);

    /// Create a new matrix from individual elements in row-major order.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        m00: f32,
        m01: f32,
        m02: f32,
        m10: f32,
        m11: f32,
        m12: f32,
        m20: f32,
        m21: f32,
        m22: f32,
    ) -> Self {
        Self {
            m00,
            m01,
            m02,
            m10,
            m11,
            m12,
            m20,
            m21,
            m22,
        }
    }

    /// Create a new matrix from column vectors.
    #[inline]
    pub const fn from_cols(col0: Vec3, col1: Vec3, col2: Vec3) -> Self {
        Self::new(
            col0.x, col1.x, col2.x, //
            col0.y, col1.y, col2.y, //
            col0.z, col1.z, col2.z,
        )
    }

    /// Create a new matrix from a flat row-major array.
    #[inline]
    pub const fn from_array(arr: &[f32; 9]) -> Self {
        Self::new(
            arr[0], arr[1], arr[2], arr[3], arr[4], arr[5], arr[6], arr[7], arr[8],
        )
    }

    /// Convert to a flat row-major array.
    #[inline]
    pub const fn to_array(&self) -> [f32; 9] {
        [
            self.m00, self.m01, self.m02, //
            self.m10, self.m11, self.m12, //
            self.m20, self.m21, self.m22,
        ]
    }

    /// Diagonal matrix from three scalars.
    #[inline]
    pub const fn from_diagonal_elements(d0: f32, d1: f32, d2: f32) -> Self {
        Self::new(d0, 0.0, 0.0, 0.0, d1, 0.0, 0.0, 0.0, d2)
    }

    /// Diagonal matrix from a vector.
    #[inline]
    pub const fn from_diagonal(diagonal: Vec3) -> Self {
        Self::from_diagonal_elements(diagonal.x, diagonal.y, diagonal.z)
    }

    /// Per-axis scaling matrix.
    #[inline]
    pub const fn from_scale(scale: Vec3) -> Self {
        Self::from_diagonal(scale)
    }

    /// Uniform scaling matrix.
    #[inline]
    pub const fn from_scale_uniform(scale: f32) -> Self {
        Self::from_diagonal_elements(scale, scale, scale)
    }

    /// Rotation matrix around the X axis.
    pub fn from_rotation_x(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(1.0, 0.0, 0.0, 0.0, cos, -sin, 0.0, sin, cos)
    }

    /// Rotation matrix around the Y axis.
    pub fn from_rotation_y(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, 0.0, sin, 0.0, 1.0, 0.0, -sin, 0.0, cos)
    }

    /// Rotation matrix around the Z axis.
    pub fn from_rotation_z(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0)
    }

    /// Rotation matrix around the X axis, angle in degrees.
    pub fn from_rotation_x_deg(degrees: f32) -> Self {
        Self::from_rotation_x(degrees.to_radians())
    }

    /// Rotation matrix around the Y axis, angle in degrees.
    pub fn from_rotation_y_deg(degrees: f32) -> Self {
        Self::from_rotation_y(degrees.to_radians())
    }

    /// Rotation matrix around the Z axis, angle in degrees.
    pub fn from_rotation_z_deg(degrees: f32) -> Self {
        Self::from_rotation_z(degrees.to_radians())
    }

    /// Rotation matrix around an arbitrary axis (Rodrigues' formula).
    ///
    /// The axis is normalized internally before use.
    pub fn from_axis_angle(axis: Vec3, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        let t = 1.0 - cos;

        let n = axis.normalize();
        let (x, y, z) = (n.x, n.y, n.z);

        Self::new(
            cos + x * x * t,
            x * y * t - z * sin,
            x * z * t + y * sin,
            x * y * t + z * sin,
            cos + y * y * t,
            y * z * t - x * sin,
            x * z * t - y * sin,
            y * z * t + x * sin,
            cos + z * z * t,
        )
    }

    /// Rotation from Euler angles in radians, composed as `Rx * Ry * Rz`.
    pub fn from_euler(x_radians: f32, y_radians: f32, z_radians: f32) -> Self {
        Self::from_rotation_x(x_radians)
            * Self::from_rotation_y(y_radians)
            * Self::from_rotation_z(z_radians)
    }

    /// Rotation from Euler angles in degrees.
    pub fn from_euler_deg(x_degrees: f32, y_degrees: f32, z_degrees: f32) -> Self {
        Self::from_euler(
            x_degrees.to_radians(),
            y_degrees.to_radians(),
            z_degrees.to_radians(),
        )
    }

    /// Rotation aligning the Z axis with `direction`.
    pub fn look_at(direction: Vec3, up: Vec3) -> Self {
        let forward = direction.normalize();
        let right = up.cross(forward).normalize();
        let new_up = forward.cross(right);

        Self::new(
            right.x, right.y, right.z, //
            new_up.x, new_up.y, new_up.z, //
            forward.x, forward.y, forward.z,
        )
    }

    /// Reflection across the plane with the given normal.
    ///
    /// The normal is normalized internally.
    pub fn reflection(normal: Vec3) -> Self {
        let n = normal.normalize();
        let (x, y, z) = (n.x, n.y, n.z);

        Self::new(
            1.0 - 2.0 * x * x,
            -2.0 * x * y,
            -2.0 * x * z,
            -2.0 * x * y,
            1.0 - 2.0 * y * y,
            -2.0 * y * z,
            -2.0 * x * z,
            -2.0 * y * z,
            1.0 - 2.0 * z * z,
        )
    }

    /// Orthogonal projection onto the plane with the given normal.
    pub fn projection_onto_plane(normal: Vec3) -> Self {
        let n = normal.normalize();
        let (x, y, z) = (n.x, n.y, n.z);

        Self::new(
            1.0 - x * x,
            -x * y,
            -x * z,
            -x * y,
            1.0 - y * y,
            -y * z,
            -x * z,
            -y * z,
            1.0 - z * z,
        )
    }

    /// Shearing matrix. Each parameter shears one axis by another, e.g.
    /// `shear_xy` adds `y` into `x`.
    pub const fn from_shear(
        shear_xy: f32,
        shear_xz: f32,
        shear_yx: f32,
        shear_yz: f32,
        shear_zx: f32,
        shear_zy: f32,
    ) -> Self {
        Self::new(
            1.0, shear_xy, shear_xz, //
            shear_yx, 1.0, shear_yz, //
            shear_zx, shear_zy, 1.0,
        )
    }

    /// Skew-symmetric (cross-product) matrix of a vector: `v × w = S(v) * w`.
    pub const fn skew_symmetric(v: Vec3) -> Self {
        Self::new(0.0, -v.z, v.y, v.z, 0.0, -v.x, -v.y, v.x, 0.0)
    }

    /// Element at `(row, col)`, bounds-checked.
    pub fn get(&self, row: usize, col: usize) -> Result<f32, AlgebraError> {
        let r = self.row(row)?;
        Ok(r[col_checked(col, 3)?])
    }

    /// Set the element at `(row, col)`, bounds-checked.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<(), AlgebraError> {
        if row > 2 {
            return Err(row_out_of_range(row, 3));
        }
        col_checked(col, 3)?;
        let elements = [
            [&mut self.m00, &mut self.m01, &mut self.m02],
            [&mut self.m10, &mut self.m11, &mut self.m12],
            [&mut self.m20, &mut self.m21, &mut self.m22],
        ];
        let [r0, r1, r2] = elements;
        let row_refs = match row {
            0 => r0,
            1 => r1,
            _ => r2,
        };
        let [c0, c1, c2] = row_refs;
        match col {
            0 => *c0 = value,
            1 => *c1 = value,
            _ => *c2 = value,
        }
        Ok(())
    }

    /// Row `row` as a vector, bounds-checked.
    pub fn row(&self, row: usize) -> Result<Vec3, AlgebraError> {
        match row {
            0 => Ok(Vec3::new(self.m00, self.m01, self.m02)),
            1 => Ok(Vec3::new(self.m10, self.m11, self.m12)),
            2 => Ok(Vec3::new(self.m20, self.m21, self.m22)),
            _ => Err(row_out_of_range(row, 3)),
        }
    }

    /// Set row `row` from a vector, bounds-checked.
    pub fn set_row(&mut self, row: usize, value: Vec3) -> Result<(), AlgebraError> {
        match row {
            0 => {
                self.m00 = value.x;
                self.m01 = value.y;
                self.m02 = value.z;
            }
            1 => {
                self.m10 = value.x;
                self.m11 = value.y;
                self.m12 = value.z;
            }
            2 => {
                self.m20 = value.x;
                self.m21 = value.y;
                self.m22 = value.z;
            }
            _ => return Err(row_out_of_range(row, 3)),
        }
        Ok(())
    }

    /// Column `col` as a vector, bounds-checked.
    pub fn col(&self, col: usize) -> Result<Vec3, AlgebraError> {
        match col {
            0 => Ok(Vec3::new(self.m00, self.m10, self.m20)),
            1 => Ok(Vec3::new(self.m01, self.m11, self.m21)),
            2 => Ok(Vec3::new(self.m02, self.m12, self.m22)),
            _ => Err(col_out_of_range(col, 3)),
        }
    }

    /// Set column `col` from a vector, bounds-checked.
    pub fn set_col(&mut self, col: usize, value: Vec3) -> Result<(), AlgebraError> {
        match col {
            0 => {
                self.m00 = value.x;
                self.m10 = value.y;
                self.m20 = value.z;
            }
            1 => {
                self.m01 = value.x;
                self.m11 = value.y;
                self.m21 = value.z;
            }
            2 => {
                self.m02 = value.x;
                self.m12 = value.y;
                self.m22 = value.z;
            }
            _ => return Err(col_out_of_range(col, 3)),
        }
        Ok(())
    }

    /// Determinant via cofactor expansion along the first row.
    pub fn determinant(&self) -> f32 {
        self.m00 * (self.m11 * self.m22 - self.m12 * self.m21)
            - self.m01 * (self.m10 * self.m22 - self.m12 * self.m20)
            + self.m02 * (self.m10 * self.m21 - self.m11 * self.m20)
    }

    /// Trace (sum of diagonal elements).
    #[inline]
    pub fn trace(&self) -> f32 {
        self.m00 + self.m11 + self.m22
    }

    /// Transposed matrix.
    #[inline]
    pub const fn transpose(&self) -> Self {
        Self::new(
            self.m00, self.m10, self.m20, //
            self.m01, self.m11, self.m21, //
            self.m02, self.m12, self.m22,
        )
    }

    /// Transpose in place.
    pub fn transpose_in_place(&mut self) {
        std::mem::swap(&mut self.m01, &mut self.m10);
        std::mem::swap(&mut self.m02, &mut self.m20);
        std::mem::swap(&mut self.m12, &mut self.m21);
    }

    /// Adjugate (transpose of the cofactor matrix).
    pub fn adjugate(&self) -> Self {
        let c00 = self.m11 * self.m22 - self.m12 * self.m21;
        let c01 = self.m10 * self.m22 - self.m12 * self.m20;
        let c02 = self.m10 * self.m21 - self.m11 * self.m20;

        let c10 = self.m01 * self.m22 - self.m02 * self.m21;
        let c11 = self.m00 * self.m22 - self.m02 * self.m20;
        let c12 = self.m00 * self.m21 - self.m01 * self.m20;

        let c20 = self.m01 * self.m12 - self.m02 * self.m11;
        let c21 = self.m00 * self.m12 - self.m02 * self.m10;
        let c22 = self.m00 * self.m11 - self.m01 * self.m10;

        Self::new(
            c00, -c10, c20, //
            -c01, c11, -c21, //
            c02, -c12, c22,
        )
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

    /// Whether the matrix equals its transpose within epsilon.
    pub fn is_symmetric(&self, epsilon: f32) -> bool {
        (self.m01 - self.m10).abs() < epsilon
            && (self.m02 - self.m20).abs() < epsilon
            && (self.m12 - self.m21).abs() < epsilon
    }

    /// Whether every off-diagonal element is within epsilon of zero.
    pub fn is_diagonal(&self, epsilon: f32) -> bool {
        self.m01.abs() < epsilon
            && self.m02.abs() < epsilon
            && self.m10.abs() < epsilon
            && self.m12.abs() < epsilon
            && self.m20.abs() < epsilon
            && self.m21.abs() < epsilon
    }

    /// Whether `transpose * self` is within epsilon of the identity.
    pub fn is_orthogonal(&self, epsilon: f32) -> bool {
        (self.transpose() * *self).is_identity(epsilon)
    }

    /// Element-wise epsilon comparison.
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        let a = self.to_array();
        let b = other.to_array();
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < epsilon)
    }

    /// Per-column lengths, interpreting the columns as scaled axes.
    pub fn extract_scale(&self) -> Vec3 {
        Vec3::new(
            Vec3::new(self.m00, self.m10, self.m20).length(),
            Vec3::new(self.m01, self.m11, self.m21).length(),
            Vec3::new(self.m02, self.m12, self.m22).length(),
        )
    }

    /// Rotation part with scaling removed (each column divided by its
    /// length). Returns the identity when any column is near-degenerate.
    pub fn extract_rotation(&self) -> Self {
        let scale = self.extract_scale();

        if scale.x < crate::EPSILON || scale.y < crate::EPSILON || scale.z < crate::EPSILON {
            return Self::IDENTITY;
        }

        Self::new(
            self.m00 / scale.x,
            self.m01 / scale.y,
            self.m02 / scale.z,
            self.m10 / scale.x,
            self.m11 / scale.y,
            self.m12 / scale.z,
            self.m20 / scale.x,
            self.m21 / scale.y,
            self.m22 / scale.z,
        )
    }

    /// Classic Gram-Schmidt over the three column vectors.
    ///
    /// When the second column is numerically parallel to the first, an
    /// arbitrary orthogonal seed is substituted so the result is always a
    /// full orthonormal basis.
    pub fn orthogonalize(&self) -> Self {
        let v1 = Vec3::new(self.m00, self.m10, self.m20);
        let v2 = Vec3::new(self.m01, self.m11, self.m21);

        let u1 = v1.normalize();

        let mut u2 = v2 - u1 * v2.dot(u1);
        let len2 = u2.length();
        if len2 > crate::EPSILON {
            u2 /= len2;
        } else {
            // Seed with the basis axis least aligned with u1.
            u2 = if u1.x.abs() < u1.y.abs() {
                if u1.x.abs() < u1.z.abs() {
                    Vec3::X - u1 * u1.x
                } else {
                    Vec3::Z - u1 * u1.z
                }
            } else if u1.y.abs() < u1.z.abs() {
                Vec3::Y - u1 * u1.y
            } else {
                Vec3::Z - u1 * u1.z
            };
            u2 = u2.normalize();
        }

        let u3 = u1.cross(u2);

        Self::from_cols(u1, u2, u3)
    }

    /// Per-element linear interpolation with `t` clamped to `[0, 1]`.
    ///
    /// Naive: a rotation matrix interpolated this way is not generally
    /// orthogonal.
    pub fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let av = a.to_array();
        let bv = b.to_array();
        let mut out = [0.0f32; 9];
        for (o, (x, y)) in out.iter_mut().zip(av.iter().zip(bv.iter())) {
            *o = x + (y - x) * t;
        }
        Self::from_array(&out)
    }

    /// Scale the columns by the given per-axis factors.
    pub const fn scaled(&self, scale_x: f32, scale_y: f32, scale_z: f32) -> Self {
        Self::new(
            self.m00 * scale_x,
            self.m01 * scale_y,
            self.m02 * scale_z,
            self.m10 * scale_x,
            self.m11 * scale_y,
            self.m12 * scale_z,
            self.m20 * scale_x,
            self.m21 * scale_y,
            self.m22 * scale_z,
        )
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul<Mat3> for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Self::Output {
        Mat3::new(
            // Row 0
            self.m00 * rhs.m00 + self.m01 * rhs.m10 + self.m02 * rhs.m20,
            self.m00 * rhs.m01 + self.m01 * rhs.m11 + self.m02 * rhs.m21,
            self.m00 * rhs.m02 + self.m01 * rhs.m12 + self.m02 * rhs.m22,
            // Row 1
            self.m10 * rhs.m00 + self.m11 * rhs.m10 + self.m12 * rhs.m20,
            self.m10 * rhs.m01 + self.m11 * rhs.m11 + self.m12 * rhs.m21,
            self.m10 * rhs.m02 + self.m11 * rhs.m12 + self.m12 * rhs.m22,
            // Row 2
            self.m20 * rhs.m00 + self.m21 * rhs.m10 + self.m22 * rhs.m20,
            self.m20 * rhs.m01 + self.m21 * rhs.m11 + self.m22 * rhs.m21,
            self.m20 * rhs.m02 + self.m21 * rhs.m12 + self.m22 * rhs.m22,
        )
    }
}

impl std::ops::MulAssign<Mat3> for Mat3 {
    #[inline]
    fn mul_assign(&mut self, rhs: Mat3) {
        *self = *self * rhs;
    }
}

impl std::ops::Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        Vec3::new(
            self.m00 * rhs.x + self.m01 * rhs.y + self.m02 * rhs.z,
            self.m10 * rhs.x + self.m11 * rhs.y + self.m12 * rhs.z,
            self.m20 * rhs.x + self.m21 * rhs.y + self.m22 * rhs.z,
        )
    }
}

impl std::ops::Mul<f32> for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: f32) -> Self::Output {
        let mut arr = self.to_array();
        for v in arr.iter_mut() {
            *v *= rhs;
        }
        Mat3::from_array(&arr)
    }
}

impl std::ops::Mul<Mat3> for f32 {
    type Output = Mat3;

    #[inline]
    fn mul(self, rhs: Mat3) -> Self::Output {
        rhs * self
    }
}

impl std::ops::MulAssign<f32> for Mat3 {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl std::ops::Add for Mat3 {
    type Output = Mat3;

    fn add(self, rhs: Mat3) -> Self::Output {
        let a = self.to_array();
        let b = rhs.to_array();
        let mut out = [0.0f32; 9];
        for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
            *o = x + y;
        }
        Mat3::from_array(&out)
    }
}

impl std::ops::AddAssign for Mat3 {
    #[inline]
    fn add_assign(&mut self, rhs: Mat3) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for Mat3 {
    type Output = Mat3;

    fn sub(self, rhs: Mat3) -> Self::Output {
        let a = self.to_array();
        let b = rhs.to_array();
        let mut out = [0.0f32; 9];
        for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
            *o = x - y;
        }
        Mat3::from_array(&out)
    }
}

impl std::ops::SubAssign for Mat3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Mat3) {
        *self = *self - rhs;
    }
}

impl std::ops::Neg for Mat3 {
    type Output = Mat3;

    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

// IEEE division, no zero guard. Use `checked_div` for the erroring form.
impl std::ops::Div<f32> for Mat3 {
    type Output = Mat3;

    #[inline]
    fn div(self, rhs: f32) -> Self::Output {
        self * (1.0 / rhs)
    }
}

impl std::ops::DivAssign<f32> for Mat3 {
    #[inline]
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

impl std::fmt::Display for Mat3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[{}, {}, {}]", self.m00, self.m01, self.m02)?;
        writeln!(f, "[{}, {}, {}]", self.m10, self.m11, self.m12)?;
        write!(f, "[{}, {}, {}]", self.m20, self.m21, self.m22)
    }
}
