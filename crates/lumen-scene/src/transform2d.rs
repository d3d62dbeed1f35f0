//! 2D affine transform decomposed as translation, rotation and scale.

use std::cell::Cell;
use std::f32::consts::{PI, TAU};

use glam::Vec2;
use lumen_algebra::{Mat2, Mat3};

/// A 2D transform with position, rotation (radians) and non-uniform scale.
///
/// The equivalent 3x3 homogeneous matrix applies scale first, then
/// rotation, then translation. It is computed lazily and cached; every
/// setter invalidates the cache. The cache uses interior mutability, so
/// the type is deliberately not `Sync`.
///
/// Parent relationships are not stored here. Hierarchies live in
/// [`crate::TransformGraph`], which owns transforms and resolves world
/// matrices through stable ids.
#[derive(Debug, Clone)]
pub struct Transform2D {
    position: Vec2,
    rotation: f32,
    scale: Vec2,
    cached_matrix: Cell<Option<Mat3>>,
}

impl Transform2D {
    /// Create a transform from position, rotation in radians and scale.
    pub fn new(position: Vec2, rotation: f32, scale: Vec2) -> Self {
        Self {
            position,
            rotation,
            scale,
            cached_matrix: Cell::new(None),
        }
    }

    /// Create a transform with the same scale on both axes.
    pub fn from_uniform(position: Vec2, rotation: f32, scale: f32) -> Self {
        Self::new(position, rotation, Vec2::splat(scale))
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self::new(Vec2::ZERO, 0.0, Vec2::ONE)
    }

    /// A pure translation.
    pub fn from_translation(translation: Vec2) -> Self {
        Self::new(translation, 0.0, Vec2::ONE)
    }

    /// A pure rotation, angle in radians.
    pub fn from_rotation(radians: f32) -> Self {
        Self::new(Vec2::ZERO, radians, Vec2::ONE)
    }

    /// A pure rotation, angle in degrees.
    pub fn from_rotation_deg(degrees: f32) -> Self {
        Self::from_rotation(degrees.to_radians())
    }

    /// A pure non-uniform scaling.
    pub fn from_scale(scale: Vec2) -> Self {
        Self::new(Vec2::ZERO, 0.0, scale)
    }

    /// A pure uniform scaling.
    pub fn from_scale_uniform(scale: f32) -> Self {
        Self::from_scale(Vec2::splat(scale))
    }

    /// Linear interpolation with `t` clamped to `[0, 1]`.
    ///
    /// Position and scale interpolate per component. Rotation takes the
    /// shortest angular path, so 350 degrees to 10 degrees passes through
    /// zero rather than sweeping backwards.
    pub fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);

        let position = a.position + (b.position - a.position) * t;
        let scale = a.scale + (b.scale - a.scale) * t;

        let mut rot_a = a.rotation;
        let mut rot_b = b.rotation;
        while rot_b - rot_a > PI {
            rot_a += TAU;
        }
        while rot_a - rot_b > PI {
            rot_b += TAU;
        }
        let rotation = rot_a + (rot_b - rot_a) * t;

        Self::new(position, rotation, scale)
    }

    /// Current position.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current rotation in radians.
    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Current rotation in degrees.
    #[inline]
    pub fn rotation_deg(&self) -> f32 {
        self.rotation.to_degrees()
    }

    /// Current scale.
    #[inline]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Replace the position.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.invalidate();
    }

    /// Replace the rotation, in radians.
    pub fn set_rotation(&mut self, radians: f32) {
        self.rotation = radians;
        self.invalidate();
    }

    /// Replace the rotation, in degrees.
    pub fn set_rotation_deg(&mut self, degrees: f32) {
        self.set_rotation(degrees.to_radians());
    }

    /// Replace the scale.
    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
        self.invalidate();
    }

    /// Replace the scale with a uniform value.
    pub fn set_scale_uniform(&mut self, scale: f32) {
        self.set_scale(Vec2::splat(scale));
    }

    /// Move by the given offset.
    pub fn translate(&mut self, translation: Vec2) {
        self.position += translation;
        self.invalidate();
    }

    /// Rotate by the given angle in radians.
    pub fn rotate(&mut self, radians: f32) {
        self.rotation += radians;
        self.invalidate();
    }

    /// Rotate by the given angle in degrees.
    pub fn rotate_deg(&mut self, degrees: f32) {
        self.rotate(degrees.to_radians());
    }

    /// Multiply the scale per component.
    pub fn scale_by(&mut self, scale: Vec2) {
        self.scale *= scale;
        self.invalidate();
    }

    /// Multiply the scale uniformly.
    pub fn scale_uniform(&mut self, scale: f32) {
        self.scale_by(Vec2::splat(scale));
    }

    fn invalidate(&mut self) {
        self.cached_matrix.set(None);
    }

    /// Homogeneous 3x3 matrix for this transform (scale, then rotation,
    /// then translation). Cached until the next mutation.
    pub fn local_matrix(&self) -> Mat3 {
        if let Some(m) = self.cached_matrix.get() {
            return m;
        }

        let (sin, cos) = self.rotation.sin_cos();
        let m = Mat3::new(
            self.scale.x * cos,
            -self.scale.y * sin,
            self.position.x,
            self.scale.x * sin,
            self.scale.y * cos,
            self.position.y,
            0.0,
            0.0,
            1.0,
        );

        self.cached_matrix.set(Some(m));
        m
    }

    /// Rotation and scale as a 2x2 matrix, dropping translation.
    pub fn to_mat2(&self) -> Mat2 {
        let m = self.local_matrix();
        Mat2::new(m.m00, m.m01, m.m10, m.m11)
    }

    /// Transform a point, applying translation.
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        let m = self.local_matrix();
        Vec2::new(
            m.m00 * point.x + m.m01 * point.y + m.m02,
            m.m10 * point.x + m.m11 * point.y + m.m12,
        )
    }

    /// Transform a vector, ignoring translation.
    pub fn transform_vector(&self, vector: Vec2) -> Vec2 {
        let m = self.local_matrix();
        Vec2::new(
            m.m00 * vector.x + m.m01 * vector.y,
            m.m10 * vector.x + m.m11 * vector.y,
        )
    }

    /// Alias for [`Self::transform_vector`].
    #[inline]
    pub fn transform_direction(&self, direction: Vec2) -> Vec2 {
        self.transform_vector(direction)
    }

    /// Map a point back into local space.
    pub fn inverse_transform_point(&self, point: Vec2) -> Vec2 {
        self.inverse().transform_point(point)
    }

    /// Map a vector back into local space.
    pub fn inverse_transform_vector(&self, vector: Vec2) -> Vec2 {
        self.inverse().transform_vector(vector)
    }

    /// Analytic inverse of the transform.
    ///
    /// Rotation negates, scale reciprocates, and the position is the
    /// original translation pushed through the inverted rotation and
    /// scale. A zero scale component produces an infinite inverse scale
    /// rather than an error; see [`Self::has_valid_scale`].
    pub fn inverse(&self) -> Self {
        let inv_rotation = -self.rotation;
        let inv_scale = Vec2::new(1.0 / self.scale.x, 1.0 / self.scale.y);

        let (sin, cos) = inv_rotation.sin_cos();
        let inv_position = Vec2::new(
            -(cos * self.position.x - sin * self.position.y) * inv_scale.x,
            -(sin * self.position.x + cos * self.position.y) * inv_scale.y,
        );

        Self::new(inv_position, inv_rotation, inv_scale)
    }

    /// Compose two transforms: the result applies `other` first, then
    /// `self`.
    ///
    /// The matrices are multiplied and the product decomposed back into
    /// translation, rotation and scale. The decomposition is lossy: a
    /// product that contains shear (for example from non-uniform scale
    /// under rotation) cannot be represented and gets flattened into the
    /// nearest pure TRS form.
    pub fn compose(&self, other: &Self) -> Self {
        let product = self.local_matrix() * other.local_matrix();

        let position = Vec2::new(product.m02, product.m12);

        let scale_x = (product.m00 * product.m00 + product.m10 * product.m10).sqrt();
        let scale_y = (product.m01 * product.m01 + product.m11 * product.m11).sqrt();

        let rotation = (product.m10 / scale_x).atan2(product.m00 / scale_x);

        Self::new(position, rotation, Vec2::new(scale_x, scale_y))
    }

    /// Whether the transform is within epsilon of the identity.
    pub fn is_identity(&self, epsilon: f32) -> bool {
        self.position.length() < epsilon
            && self.rotation.abs() < epsilon
            && (self.scale.x - 1.0).abs() < epsilon
            && (self.scale.y - 1.0).abs() < epsilon
    }

    /// Whether the x and y scale components are equal within epsilon.
    pub fn is_uniform(&self) -> bool {
        (self.scale.x - self.scale.y).abs() < lumen_algebra::EPSILON
    }

    /// Whether the rotation is a finite number.
    pub fn has_valid_rotation(&self) -> bool {
        self.rotation.is_finite()
    }

    /// Whether both scale components are finite and not near zero.
    pub fn has_valid_scale(&self) -> bool {
        self.scale.x.is_finite()
            && self.scale.y.is_finite()
            && self.scale.x.abs() > lumen_algebra::EPSILON
            && self.scale.y.abs() > lumen_algebra::EPSILON
    }

    /// Component-wise epsilon comparison.
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.position - other.position).length() < epsilon
            && (self.rotation - other.rotation).abs() < epsilon
            && (self.scale - other.scale).length() < epsilon
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for &Transform2D {
    type Output = Transform2D;

    fn mul(self, rhs: &Transform2D) -> Self::Output {
        self.compose(rhs)
    }
}

impl std::ops::Mul for Transform2D {
    type Output = Transform2D;

    fn mul(self, rhs: Transform2D) -> Self::Output {
        self.compose(&rhs)
    }
}

impl std::ops::MulAssign for Transform2D {
    fn mul_assign(&mut self, rhs: Transform2D) {
        *self = self.compose(&rhs);
    }
}

impl std::fmt::Display for Transform2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Transform2D(position: ({}, {}), rotation: {} rad ({} deg), scale: ({}, {}))",
            self.position.x,
            self.position.y,
            self.rotation,
            self.rotation_deg(),
            self.scale.x,
            self.scale.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_default_is_identity() {
        let t = Transform2D::default();
        assert!(t.is_identity(1e-6));
        assert!(t.local_matrix().is_identity(1e-6));
    }

    #[test]
    fn test_translation_moves_points_not_vectors() {
        let t = Transform2D::from_translation(Vec2::new(3.0, -2.0));
        assert_eq!(t.transform_point(Vec2::ZERO), Vec2::new(3.0, -2.0));
        assert_eq!(t.transform_vector(Vec2::X), Vec2::X);
    }

    #[test]
    fn test_rotation_deg_quarter_turn() {
        let t = Transform2D::from_rotation_deg(90.0);
        let v = t.transform_vector(Vec2::new(1.0, 0.0));
        assert_relative_eq!(v.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(v.y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_local_matrix_layout() {
        let t = Transform2D::new(Vec2::new(5.0, 6.0), 0.0, Vec2::new(2.0, 3.0));
        let m = t.local_matrix();
        assert_relative_eq!(m.m00, 2.0, epsilon = EPSILON);
        assert_relative_eq!(m.m11, 3.0, epsilon = EPSILON);
        assert_relative_eq!(m.m02, 5.0, epsilon = EPSILON);
        assert_relative_eq!(m.m12, 6.0, epsilon = EPSILON);
        assert_relative_eq!(m.m22, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_cache_invalidation_on_mutation() {
        let mut t = Transform2D::identity();
        let before = t.local_matrix();
        assert!(before.is_identity(1e-6));

        t.set_position(Vec2::new(1.0, 0.0));
        let after = t.local_matrix();
        assert_relative_eq!(after.m02, 1.0, epsilon = EPSILON);

        t.rotate_deg(90.0);
        t.scale_by(Vec2::splat(2.0));
        let m = t.local_matrix();
        assert_relative_eq!(m.m10, 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_compose_inverse_is_identity() {
        let t = Transform2D::new(Vec2::new(2.0, -1.0), 0.7, Vec2::new(1.5, 1.5));
        let roundtrip = t.compose(&t.inverse());
        assert!(roundtrip.is_identity(1e-4));
    }

    #[test]
    fn test_inverse_transform_point_roundtrip() {
        let t = Transform2D::new(Vec2::new(4.0, 1.0), 0.3, Vec2::new(2.0, 2.0));
        let p = Vec2::new(1.5, -0.5);
        let back = t.inverse_transform_point(t.transform_point(p));
        assert_relative_eq!(back.x, p.x, epsilon = 1e-4);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-4);
    }

    #[test]
    fn test_compose_applies_right_operand_first() {
        // Translate after scaling: (1,0) -> (2,0) -> (3,0).
        let translate = Transform2D::from_translation(Vec2::new(1.0, 0.0));
        let scale = Transform2D::from_scale_uniform(2.0);
        let composed = translate.compose(&scale);
        let p = composed.transform_point(Vec2::new(1.0, 0.0));
        assert_relative_eq!(p.x, 3.0, epsilon = EPSILON);
        assert_relative_eq!(p.y, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_compose_matches_operator() {
        let a = Transform2D::new(Vec2::new(1.0, 2.0), 0.4, Vec2::new(1.0, 1.0));
        let b = Transform2D::from_rotation(0.3);
        let by_method = a.compose(&b);
        let by_operator = &a * &b;
        assert!(by_method.approx_eq(&by_operator, 1e-6));

        let mut c = a.clone();
        c *= b;
        assert!(c.approx_eq(&by_method, 1e-6));
    }

    #[test]
    fn test_lerp_boundaries_are_exact() {
        let a = Transform2D::new(Vec2::new(1.0, 1.0), 0.5, Vec2::new(2.0, 2.0));
        let b = Transform2D::new(Vec2::new(-3.0, 4.0), 2.0, Vec2::new(0.5, 1.0));

        assert!(Transform2D::lerp(&a, &b, 0.0).approx_eq(&a, 1e-6));
        assert!(Transform2D::lerp(&a, &b, 1.0).approx_eq(&b, 1e-6));
        // Out-of-range t clamps to the boundaries.
        assert!(Transform2D::lerp(&a, &b, -2.0).approx_eq(&a, 1e-6));
        assert!(Transform2D::lerp(&a, &b, 3.0).approx_eq(&b, 1e-6));
    }

    #[test]
    fn test_lerp_rotation_shortest_path() {
        let a = Transform2D::from_rotation_deg(350.0);
        let b = Transform2D::from_rotation_deg(10.0);
        let mid = Transform2D::lerp(&a, &b, 0.5);
        // Halfway lands on 360 degrees, not 180.
        assert_relative_eq!(mid.rotation_deg(), 360.0, epsilon = 1e-3);
    }

    #[test]
    fn test_to_mat2_drops_translation() {
        let t = Transform2D::new(Vec2::new(9.0, 9.0), 0.0, Vec2::new(2.0, 3.0));
        let m = t.to_mat2();
        assert_relative_eq!(m.m00, 2.0, epsilon = EPSILON);
        assert_relative_eq!(m.m11, 3.0, epsilon = EPSILON);
        assert_relative_eq!(m.m01, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_from_uniform() {
        let t = Transform2D::from_uniform(Vec2::new(1.0, 2.0), 0.5, 3.0);
        assert_eq!(t.position(), Vec2::new(1.0, 2.0));
        assert_relative_eq!(t.rotation(), 0.5, epsilon = 1e-6);
        assert_eq!(t.scale(), Vec2::splat(3.0));
        assert!(t.is_uniform());
    }

    #[test]
    fn test_validity_predicates() {
        let mut t = Transform2D::identity();
        assert!(t.is_uniform());
        assert!(t.has_valid_rotation());
        assert!(t.has_valid_scale());

        t.set_scale(Vec2::new(1.0, 2.0));
        assert!(!t.is_uniform());

        t.set_scale(Vec2::new(0.0, 1.0));
        assert!(!t.has_valid_scale());

        t.set_rotation(f32::NAN);
        assert!(!t.has_valid_rotation());
    }

    #[test]
    fn test_display() {
        let t = Transform2D::from_translation(Vec2::new(1.0, 2.0));
        let s = t.to_string();
        assert!(s.contains("position: (1, 2)"));
        assert!(s.contains("rotation: 0 rad"));
    }
}
