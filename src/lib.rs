//!
//! Raymath is the numeric base layer for 2D/3D graphics code.
//!
//! It provides fixed-size `f32` vectors (`Vector2`, `Vector3`, `Vector4`) and square
//! matrices (`Matrix33`, `Matrix44`) with the usual operators. Matrices are row-major and
//! transform row vectors from the left, so `v * m` transforms `v` by `m` and `v * (a * b)`
//! applies `a` before `b`.
//!
//! ```
//! use raymath::{Matrix44, Vector3, VectorOps};
//!
//! let m = Matrix44::rotate_z(std::f32::consts::FRAC_PI_2) * Matrix44::translate(0.0, 0.0, 5.0);
//! let p = Vector3::UNIT_X * m;
//! assert!((p.y - 1.0).abs() < 1e-6);
//! assert!((p.z - 5.0).abs() < 1e-6);
//! assert_eq!(Vector3::new(3.0, 4.0, 0.0).length(), 5.0);
//! ```

pub mod buffer;
pub mod math;

pub use buffer::SliceLengthError;
pub use math::{
    EPSILON, Matrix33, Matrix44, Vector2, Vector3, Vector4, VectorOps, transform_normals,
    transform_points, vector_length, vector_normalize, vector2_dot, vector3_cross, vector3_dot,
    vector4_dot,
};
