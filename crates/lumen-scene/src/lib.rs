#![deny(missing_docs)]
//! 2D scene transforms for the lumen engine.
//!
//! This crate provides:
//! - [`Transform2D`], a translation/rotation/scale transform with a lazily
//!   cached homogeneous matrix
//! - [`TransformGraph`], an arena of transforms with parent links and
//!   world-space resolution

mod graph;
mod transform2d;

pub use graph::{SceneError, TransformGraph, TransformId};
pub use transform2d::Transform2D;
