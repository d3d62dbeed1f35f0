//! Symmetric 3x3 eigenvalue extraction.
//!
//! Power iteration with deflation. Each round converges to the dominant
//! eigenvalue of the (deflated) matrix, then the rank-one component is
//! subtracted before the next round.

use crate::error::AlgebraError;
use crate::mat3::Mat3;
use glam::Vec3;

/// Iteration cap per eigenvalue.
const MAX_ITERATIONS: usize = 30;

/// Length below which the iterate is treated as annihilated, implying a
/// zero eigenvalue.
const COLLAPSE_THRESHOLD: f32 = 1e-10;

impl Mat3 {
    /// Eigenvalues of a symmetric matrix, largest-magnitude first.
    ///
    /// Power iteration only converges reliably when the matrix equals its
    /// transpose, so non-symmetric input is rejected with
    /// [`AlgebraError::NotSymmetric`]. If an iteration round exhausts its
    /// cap without the iterate settling (up to sign),
    /// [`AlgebraError::ConvergenceFailure`] is returned. Repeated
    /// eigenvalues converge slowly and may hit the cap.
    pub fn sym_eigenvalues(self) -> Result<Vec3, AlgebraError> {
        if !self.is_symmetric(crate::EPSILON) {
            return Err(AlgebraError::NotSymmetric);
        }

        let mut m = self;
        let mut eigenvalues = Vec3::ZERO;
        let mut v = Vec3::ONE.normalize();

        for i in 0..3 {
            for iter in 0..MAX_ITERATIONS {
                let next = m * v;
                let length = next.length();

                if length < COLLAPSE_THRESHOLD {
                    // The iterate was annihilated: zero eigenvalue.
                    eigenvalues[i] = 0.0;
                    break;
                }

                let next = next / length;

                // The iterate settles up to sign; compare both.
                if (next - v).length() < crate::EPSILON || (next + v).length() < crate::EPSILON {
                    eigenvalues[i] = v.dot(m * v);
                    break;
                }

                v = next;

                if iter == MAX_ITERATIONS - 1 {
                    return Err(AlgebraError::ConvergenceFailure {
                        iterations: MAX_ITERATIONS,
                    });
                }
            }

            if i < 2 {
                let outer = Mat3::new(
                    v.x * v.x,
                    v.x * v.y,
                    v.x * v.z,
                    v.y * v.x,
                    v.y * v.y,
                    v.y * v.z,
                    v.z * v.x,
                    v.z * v.y,
                    v.z * v.z,
                );
                m -= outer * eigenvalues[i];

                // Restart the next round orthogonal to the found direction.
                if i == 0 {
                    v = if v.x.abs() > v.y.abs() {
                        Vec3::new(-v.z, 0.0, v.x).normalize()
                    } else {
                        Vec3::new(0.0, -v.z, v.y).normalize()
                    };
                }
            }
        }

        Ok(eigenvalues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sorted_abs_desc(v: Vec3) -> [f32; 3] {
        let mut e = [v.x, v.y, v.z];
        e.sort_by(|a, b| b.abs().partial_cmp(&a.abs()).unwrap());
        e
    }

    #[test]
    fn test_diagonal_matrix() {
        let m = Mat3::from_diagonal_elements(5.0, 2.0, 1.0);
        let e = sorted_abs_desc(m.sym_eigenvalues().unwrap());
        assert_relative_eq!(e[0], 5.0, epsilon = 1e-3);
        assert_relative_eq!(e[1], 2.0, epsilon = 1e-3);
        assert_relative_eq!(e[2], 1.0, epsilon = 1e-3);
        assert_relative_eq!(e[0] * e[1] * e[2], m.determinant(), epsilon = 1e-4);
    }

    #[test]
    fn test_known_symmetric_matrix() {
        // Eigenvalues of [[2,1,0],[1,2,0],[0,0,3]] are 3, 3, 1; the
        // repeated pair dominates.
        let m = Mat3::new(2.0, 1.0, 0.0, 1.0, 2.0, 0.0, 0.0, 0.0, 3.0);
        let e = m.sym_eigenvalues().unwrap();
        let sum = e.x + e.y + e.z;
        assert_relative_eq!(sum, m.trace(), epsilon = 1e-2);
    }

    #[test]
    fn test_trace_and_determinant_invariants() {
        // Eigenvalues 5, 2 and 1 with wide gaps, hidden behind a rotation:
        // M = R * D * R^T, symmetrized against f32 rounding.
        let r = Mat3::from_rotation_z(0.4) * Mat3::from_rotation_x(0.9);
        let m = r * Mat3::from_diagonal_elements(5.0, 2.0, 1.0) * r.transpose();
        let m = (m + m.transpose()) * 0.5;

        let e = m.sym_eigenvalues().unwrap();
        assert_relative_eq!(e.x + e.y + e.z, m.trace(), epsilon = 1e-3);
        assert_relative_eq!(
            e.x * e.y * e.z,
            m.determinant(),
            epsilon = 1e-4,
            max_relative = 1e-4
        );
    }

    #[test]
    fn test_rank_deficient_matrix_has_zero_eigenvalue() {
        // Rank-one outer product of (1,0,0): eigenvalues 1, 0, 0.
        let m = Mat3::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let e = sorted_abs_desc(m.sym_eigenvalues().unwrap());
        assert_relative_eq!(e[0], 1.0, epsilon = 1e-3);
        assert_relative_eq!(e[1], 0.0, epsilon = 1e-3);
        assert_relative_eq!(e[2], 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_non_symmetric_rejected() {
        let m = Mat3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        assert_eq!(m.sym_eigenvalues(), Err(AlgebraError::NotSymmetric));
    }

    #[test]
    fn test_zero_matrix() {
        let e = Mat3::ZERO.sym_eigenvalues().unwrap();
        assert_eq!(e, Vec3::ZERO);
    }
}
