//! Vector by matrix transforms
//!
//! Vectors are row vectors multiplied on the left of the matrix: `v * M`.
//! A `Vector3` multiplied by a `Matrix44` is treated as a point with an
//! implicit `w` of 1, so the translation row is applied and the resulting
//! `w` is dropped. Use [`Matrix44::transform_normal`] for directions.

use std::ops::{Mul, MulAssign};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

use super::matrix::{Matrix33, Matrix44};
use super::vec::{Vector3, Vector4};

impl Mul<Matrix33> for Vector3 {
    type Output = Vector3;
    fn mul(self, mat: Matrix33) -> Vector3 {
        let m = &mat.m;
        Vector3 {
            x: self.x * m[0][0] + self.y * m[1][0] + self.z * m[2][0],
            y: self.x * m[0][1] + self.y * m[1][1] + self.z * m[2][1],
            z: self.x * m[0][2] + self.y * m[1][2] + self.z * m[2][2],
        }
    }
}

impl Mul<Matrix44> for Vector3 {
    type Output = Vector3;
    fn mul(self, mat: Matrix44) -> Vector3 {
        let m = &mat.m;
        Vector3 {
            x: self.x * m[0][0] + self.y * m[1][0] + self.z * m[2][0] + m[3][0],
            y: self.x * m[0][1] + self.y * m[1][1] + self.z * m[2][1] + m[3][1],
            z: self.x * m[0][2] + self.y * m[1][2] + self.z * m[2][2] + m[3][2],
        }
    }
}

impl Mul<Matrix44> for Vector4 {
    type Output = Vector4;
    fn mul(self, mat: Matrix44) -> Vector4 {
        let m = &mat.m;
        Vector4 {
            x: self.x * m[0][0] + self.y * m[1][0] + self.z * m[2][0] + self.w * m[3][0],
            y: self.x * m[0][1] + self.y * m[1][1] + self.z * m[2][1] + self.w * m[3][1],
            z: self.x * m[0][2] + self.y * m[1][2] + self.z * m[2][2] + self.w * m[3][2],
            w: self.x * m[0][3] + self.y * m[1][3] + self.z * m[2][3] + self.w * m[3][3],
        }
    }
}

impl MulAssign<Matrix33> for Vector3 {
    fn mul_assign(&mut self, mat: Matrix33) {
        *self = *self * mat;
    }
}

impl MulAssign<Matrix44> for Vector3 {
    fn mul_assign(&mut self, mat: Matrix44) {
        *self = *self * mat;
    }
}

impl MulAssign<Matrix44> for Vector4 {
    fn mul_assign(&mut self, mat: Matrix44) {
        *self = *self * mat;
    }
}

/// Transforms points in place, including the translation row.
#[instrument(skip_all, fields(count = points.len()))]
pub fn transform_points(points: &mut [Vector3], mat: &Matrix44) {
    let mat = *mat;
    #[cfg(feature = "parallel")]
    points.par_iter_mut().for_each(|p| *p *= mat);

    #[cfg(not(feature = "parallel"))]
    points.iter_mut().for_each(|p| *p *= mat);
}

/// Transforms directions in place, the translation row is ignored.
#[instrument(skip_all, fields(count = normals.len()))]
pub fn transform_normals(normals: &mut [Vector3], mat: &Matrix44) {
    #[cfg(feature = "parallel")]
    normals
        .par_iter_mut()
        .for_each(|n| *n = mat.transform_normal(*n));

    #[cfg(not(feature = "parallel"))]
    normals
        .iter_mut()
        .for_each(|n| *n = mat.transform_normal(*n));
}
