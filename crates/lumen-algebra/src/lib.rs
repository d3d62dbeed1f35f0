#![deny(missing_docs)]
//! Fixed-size square matrix kernel for the lumen engine.
//!
//! This crate provides:
//! - Row-major `Mat2`, `Mat3` and `Mat4` types with full arithmetic,
//!   decomposition and inversion routines
//! - A power-iteration eigenvalue solver for symmetric 3x3 matrices
//! - Rotation, scaling, shearing, reflection and projection builders
//!
//! Vectors come from glam and are re-exported at the crate root.

mod eigen;
mod error;
mod mat2;
mod mat3;
mod mat4;

pub use error::AlgebraError;
pub use mat2::Mat2;
pub use mat3::Mat3;
pub use mat4::Mat4;

// Re-export glam vector types that appear in public signatures
pub use glam::{Vec2, Vec3, Vec4};

/// Default tolerance for singularity tests and approximate comparisons.
pub const EPSILON: f32 = 1e-6;

/// Multiply by this to convert degrees to radians.
pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;

/// Multiply by this to convert radians to degrees.
pub const RAD_TO_DEG: f32 = 180.0 / std::f32::consts::PI;
