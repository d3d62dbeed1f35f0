use thiserror::Error;

/// Error types for the matrix algebra kernel.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum AlgebraError {
    /// Inversion was requested for a matrix whose determinant is within
    /// epsilon of zero.
    #[error("matrix is singular and cannot be inverted (det = {det})")]
    SingularMatrix {
        /// Determinant of the offending matrix.
        det: f32,
    },

    /// A row or column index was outside the matrix dimension.
    #[error("{axis} index {index} out of range for a {len}x{len} matrix")]
    IndexOutOfRange {
        /// Which axis was indexed ("row" or "column").
        axis: &'static str,
        /// The offending index.
        index: usize,
        /// Matrix dimension.
        len: usize,
    },

    /// The eigenvalue solver was invoked on a non-symmetric matrix.
    #[error("eigenvalue calculation requires a symmetric matrix")]
    NotSymmetric,

    /// Power iteration exceeded its iteration cap without converging.
    #[error("eigenvalue calculation failed to converge after {iterations} iterations")]
    ConvergenceFailure {
        /// The iteration cap that was exhausted.
        iterations: usize,
    },

    /// Checked scalar division by a near-zero divisor.
    #[error("matrix scalar division by zero")]
    DivisionByZero,

    /// Degenerate parameters passed to a projection builder.
    #[error("invalid projection parameters: {0}")]
    InvalidProjection(&'static str),
}
