//! Top-level re-exports for the lumen math crates.

#[doc(inline)]
pub use lumen_algebra as algebra;

#[doc(inline)]
pub use lumen_scene as scene;
