//! Fixed-size vector and matrix math
//!
//! This module provides:
//! - `Vector2`, `Vector3` and `Vector4` (vec submodule)
//! - `Matrix33` and `Matrix44` (matrix submodule)
//! - vector by matrix transforms (transform submodule)
//!
//! Matrices are stored row-major and transform row vectors: `v * M`.

mod matrix;
mod transform;
mod vec;

pub use matrix::*;
pub use transform::*;
pub use vec::*;

/// Lengths at or below this value are treated as zero by
/// [`VectorOps::normalize`].
pub const EPSILON: f32 = 1.0e-6;
