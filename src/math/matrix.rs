//! Square matrices for 2D/3D transformations
//!
//! Matrices are row-major and pre-multiplied by row vectors, so for a vector
//! `v` the expression `v * (A * B)` applies `A` first, then `B`.
//!
//! Layout of a `Matrix44`:
//! ```text
//! [ _11 _12 _13 _14 ]   [ m[0][0] m[0][1] m[0][2] m[0][3] ]
//! [ _21 _22 _23 _24 ] = [ m[1][0] m[1][1] m[1][2] m[1][3] ]
//! [ _31 _32 _33 _34 ]   [ m[2][0] m[2][1] m[2][2] m[2][3] ]
//! [ _41 _42 _43 _44 ]   [ m[3][0] m[3][1] m[3][2] m[3][3] ]
//! ```
//!
//! Translation is stored in row 4 (`_41`, `_42`, `_43`).

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use super::vec::{Vector3, Vector4};

/// 3x3 matrix, mostly used for rotations and scales of `Vector3`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(C)]
pub struct Matrix33 {
    /// Row-major 3x3 matrix data
    pub m: [[f32; 3]; 3],
}

impl Default for Matrix33 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix33 {
    pub const IDENTITY: Matrix33 = Matrix33::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
    pub const ZERO: Matrix33 = Matrix33::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);

    /// Create a new matrix with explicit values (row-major order)
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m11: f32,
        m12: f32,
        m13: f32,
        m21: f32,
        m22: f32,
        m23: f32,
        m31: f32,
        m32: f32,
        m33: f32,
    ) -> Self {
        Self {
            m: [[m11, m12, m13], [m21, m22, m23], [m31, m32, m33]],
        }
    }

    /// Create a rotation matrix around the Z axis
    ///
    /// Counter-clockwise for a right-handed system: `UNIT_X` rotated by 90°
    /// becomes `UNIT_Y`.
    pub fn rotate_z(ang_rad: f32) -> Self {
        let (sin, cos) = ang_rad.sin_cos();
        Self::new(cos, sin, 0.0, -sin, cos, 0.0, 0.0, 0.0, 1.0)
    }

    /// Create a non-uniform scale matrix
    pub const fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, sz)
    }

    /// Row `i` (zero-based) as a vector
    pub fn row(&self, i: usize) -> Vector3 {
        let [x, y, z] = self.m[i];
        Vector3::new(x, y, z)
    }

    /// Column `j` (zero-based) as a vector
    pub fn col(&self, j: usize) -> Vector3 {
        Vector3::new(self.m[0][j], self.m[1][j], self.m[2][j])
    }

    /// Swap rows and columns
    pub fn transpose(&self) -> Self {
        let mut result = [[0.0f32; 3]; 3];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.m[j][i];
            }
        }
        Matrix33 { m: result }
    }

    fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Matrix33 {
            m: self.m.map(|row| row.map(&f)),
        }
    }

    fn zip(&self, other: &Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let mut result = self.m;
        for (row, other_row) in result.iter_mut().zip(other.m.iter()) {
            for (cell, other_cell) in row.iter_mut().zip(other_row.iter()) {
                *cell = f(*cell, *other_cell);
            }
        }
        Matrix33 { m: result }
    }

    fn product(&self, mult: &Self) -> Self {
        let mut result = [[0.0f32; 3]; 3];
        for (i, row) in result.iter_mut().enumerate() {
            for (l, cell) in row.iter_mut().enumerate() {
                *cell = self.m[i][0] * mult.m[0][l]
                    + self.m[i][1] * mult.m[1][l]
                    + self.m[i][2] * mult.m[2][l];
            }
        }
        Matrix33 { m: result }
    }
}

impl Index<(usize, usize)> for Matrix33 {
    type Output = f32;
    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.m[row][col]
    }
}

impl IndexMut<(usize, usize)> for Matrix33 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.m[row][col]
    }
}

impl fmt::Display for Matrix33 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, row) in self.m.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, "{},{},{}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

impl Neg for Matrix33 {
    type Output = Self;
    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

impl Add for Matrix33 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        self.zip(&other, |a, b| a + b)
    }
}

impl Sub for Matrix33 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        self.zip(&other, |a, b| a - b)
    }
}

/// Matrix product, `(A * B)` applies `A` first, then `B`
impl Mul for Matrix33 {
    type Output = Self;
    fn mul(self, mult: Self) -> Self {
        self.product(&mult)
    }
}

impl Mul for &Matrix33 {
    type Output = Matrix33;
    fn mul(self, mult: &Matrix33) -> Matrix33 {
        self.product(mult)
    }
}

impl Mul<f32> for Matrix33 {
    type Output = Self;
    fn mul(self, s: f32) -> Self {
        self.map(|a| a * s)
    }
}

impl AddAssign for Matrix33 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl SubAssign for Matrix33 {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl MulAssign for Matrix33 {
    fn mul_assign(&mut self, mult: Self) {
        // every element reads a full row of self, so build the product first
        let result = self.product(&mult);
        *self = result;
    }
}

impl MulAssign<f32> for Matrix33 {
    fn mul_assign(&mut self, s: f32) {
        *self = *self * s;
    }
}

/// 4x4 matrix for representing affine and projective transformations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(C)]
pub struct Matrix44 {
    /// Row-major 4x4 matrix data
    pub m: [[f32; 4]; 4],
}

impl Default for Matrix44 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix44 {
    pub const IDENTITY: Matrix44 = Matrix44::new(
        1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
    );
    pub const ZERO: Matrix44 = Matrix44::new(
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    );

    /// Create a new matrix with explicit values (row-major order)
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m11: f32,
        m12: f32,
        m13: f32,
        m14: f32,
        m21: f32,
        m22: f32,
        m23: f32,
        m24: f32,
        m31: f32,
        m32: f32,
        m33: f32,
        m34: f32,
        m41: f32,
        m42: f32,
        m43: f32,
        m44: f32,
    ) -> Self {
        Self {
            m: [
                [m11, m12, m13, m14],
                [m21, m22, m23, m24],
                [m31, m32, m33, m34],
                [m41, m42, m43, m44],
            ],
        }
    }

    /// Create a rotation matrix around the X axis
    pub fn rotate_x(ang_rad: f32) -> Self {
        let (sin, cos) = ang_rad.sin_cos();
        Self::new(
            1.0, 0.0, 0.0, 0.0, 0.0, cos, sin, 0.0, 0.0, -sin, cos, 0.0, 0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a rotation matrix around the Y axis
    pub fn rotate_y(ang_rad: f32) -> Self {
        let (sin, cos) = ang_rad.sin_cos();
        Self::new(
            cos, 0.0, -sin, 0.0, 0.0, 1.0, 0.0, 0.0, sin, 0.0, cos, 0.0, 0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a rotation matrix around the Z axis
    pub fn rotate_z(ang_rad: f32) -> Self {
        let (sin, cos) = ang_rad.sin_cos();
        Self::new(
            cos, sin, 0.0, 0.0, -sin, cos, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a uniform scale matrix
    pub const fn scale_uniform(scale: f32) -> Self {
        Self::scale(scale, scale, scale)
    }

    /// Create a non-uniform scale matrix
    pub const fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self::new(
            sx, 0.0, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 0.0, sz, 0.0, 0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a translation matrix
    pub const fn translate(x: f32, y: f32, z: f32) -> Self {
        Self::new(
            1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, x, y, z, 1.0,
        )
    }

    /// Row `i` (zero-based) as a vector
    pub fn row(&self, i: usize) -> Vector4 {
        let [x, y, z, w] = self.m[i];
        Vector4::new(x, y, z, w)
    }

    /// Column `j` (zero-based) as a vector
    pub fn col(&self, j: usize) -> Vector4 {
        Vector4::new(self.m[0][j], self.m[1][j], self.m[2][j], self.m[3][j])
    }

    /// Swap rows and columns
    pub fn transpose(&self) -> Self {
        let mut result = [[0.0f32; 4]; 4];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.m[j][i];
            }
        }
        Matrix44 { m: result }
    }

    /// Transform a point by this matrix, followed by the perspective divide
    pub fn transform_coord(&self, v: Vector3) -> Vector3 {
        let xp = self.m[0][0] * v.x + self.m[1][0] * v.y + self.m[2][0] * v.z + self.m[3][0];
        let yp = self.m[0][1] * v.x + self.m[1][1] * v.y + self.m[2][1] * v.z + self.m[3][1];
        let zp = self.m[0][2] * v.x + self.m[1][2] * v.y + self.m[2][2] * v.z + self.m[3][2];
        let wp = self.m[0][3] * v.x + self.m[1][3] * v.y + self.m[2][3] * v.z + self.m[3][3];

        let inv_wp = 1.0 / wp;
        Vector3::new(xp * inv_wp, yp * inv_wp, zp * inv_wp)
    }

    /// Transform a direction by this matrix, ignoring the translation row
    pub fn transform_normal(&self, v: Vector3) -> Vector3 {
        let xp = self.m[0][0] * v.x + self.m[1][0] * v.y + self.m[2][0] * v.z;
        let yp = self.m[0][1] * v.x + self.m[1][1] * v.y + self.m[2][1] * v.z;
        let zp = self.m[0][2] * v.x + self.m[1][2] * v.y + self.m[2][2] * v.z;
        Vector3::new(xp, yp, zp)
    }

    fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Matrix44 {
            m: self.m.map(|row| row.map(&f)),
        }
    }

    fn zip(&self, other: &Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let mut result = self.m;
        for (row, other_row) in result.iter_mut().zip(other.m.iter()) {
            for (cell, other_cell) in row.iter_mut().zip(other_row.iter()) {
                *cell = f(*cell, *other_cell);
            }
        }
        Matrix44 { m: result }
    }

    fn product(&self, mult: &Self) -> Self {
        let mut result = [[0.0f32; 4]; 4];
        for (i, row) in result.iter_mut().enumerate() {
            for (l, cell) in row.iter_mut().enumerate() {
                *cell = self.m[i][0] * mult.m[0][l]
                    + self.m[i][1] * mult.m[1][l]
                    + self.m[i][2] * mult.m[2][l]
                    + self.m[i][3] * mult.m[3][l];
            }
        }
        Matrix44 { m: result }
    }
}

impl Index<(usize, usize)> for Matrix44 {
    type Output = f32;
    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.m[row][col]
    }
}

impl IndexMut<(usize, usize)> for Matrix44 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.m[row][col]
    }
}

impl fmt::Display for Matrix44 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, row) in self.m.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, "{},{},{},{}", row[0], row[1], row[2], row[3])?;
        }
        Ok(())
    }
}

impl Neg for Matrix44 {
    type Output = Self;
    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

impl Add for Matrix44 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        self.zip(&other, |a, b| a + b)
    }
}

impl Sub for Matrix44 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        self.zip(&other, |a, b| a - b)
    }
}

/// Matrix product, `(A * B)` applies `A` first, then `B`
impl Mul for Matrix44 {
    type Output = Self;
    fn mul(self, mult: Self) -> Self {
        self.product(&mult)
    }
}

impl Mul for &Matrix44 {
    type Output = Matrix44;
    fn mul(self, mult: &Matrix44) -> Matrix44 {
        self.product(mult)
    }
}

impl Mul<f32> for Matrix44 {
    type Output = Self;
    fn mul(self, s: f32) -> Self {
        self.map(|a| a * s)
    }
}

impl AddAssign for Matrix44 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl SubAssign for Matrix44 {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl MulAssign for Matrix44 {
    fn mul_assign(&mut self, mult: Self) {
        // every element reads a full row of self, so build the product first
        let result = self.product(&mult);
        *self = result;
    }
}

impl MulAssign<f32> for Matrix44 {
    fn mul_assign(&mut self, s: f32) {
        *self = *self * s;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn sample33() -> Matrix33 {
        Matrix33::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0)
    }

    fn sample44() -> Matrix44 {
        Matrix44::new(
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
        )
    }

    #[test]
    fn test_constants() {
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(Matrix44::IDENTITY[(i, j)], expected);
                assert_eq!(Matrix44::ZERO[(i, j)], 0.0);
            }
        }
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(Matrix33::IDENTITY[(i, j)], expected);
                assert_eq!(Matrix33::ZERO[(i, j)], 0.0);
            }
        }
        assert_eq!(Matrix44::default(), Matrix44::IDENTITY);
    }

    #[test]
    fn test_identity_product() {
        let a = sample33();
        assert_eq!(a * Matrix33::IDENTITY, a);
        assert_eq!(Matrix33::IDENTITY * a, a);
        let b = sample44();
        assert_eq!(b * Matrix44::IDENTITY, b);
        assert_eq!(Matrix44::IDENTITY * b, b);
    }

    #[test]
    fn test_matrix33_product() {
        let a = sample33();
        let b = Matrix33::new(9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0);
        assert_eq!(
            a * b,
            Matrix33::new(30.0, 24.0, 18.0, 84.0, 69.0, 54.0, 138.0, 114.0, 90.0)
        );
        assert_eq!(&a * &b, a * b);
    }

    #[test]
    fn test_matrix44_product_is_not_elementwise() {
        let a = sample44();
        let product = a * a;
        // row 1 of a dotted with column 1 of a
        assert_eq!(product[(0, 0)], 1.0 + 10.0 + 27.0 + 52.0);
        assert_eq!(product[(3, 3)], 52.0 + 112.0 + 180.0 + 256.0);
        assert_eq!(&a * &a, product);
    }

    #[test]
    fn test_elementwise_add_sub() {
        let a = sample44();
        let sum = a + a;
        assert_eq!(sum, a * 2.0);
        // the whole third row must be touched, including _33
        assert_eq!(sum[(2, 2)], 22.0);
        assert_eq!(a - a, Matrix44::ZERO);
        assert_eq!(a + (-a), Matrix44::ZERO);

        let b = sample33();
        assert_eq!((b + b)[(2, 2)], 18.0);
        assert_eq!(b - b, Matrix33::ZERO);
    }

    #[test]
    fn test_assign_operators() {
        let mut a = sample44();
        a += Matrix44::IDENTITY;
        assert_eq!(a[(0, 0)], 2.0);
        assert_eq!(a[(3, 3)], 17.0);
        assert_eq!(a[(3, 0)], 13.0);
        a -= Matrix44::IDENTITY;
        assert_eq!(a, sample44());
        a *= 0.5;
        assert_eq!(a[(3, 3)], 8.0);
        assert_eq!(a[(2, 2)], 5.5);

        let mut b = sample33();
        b *= 2.0;
        b -= sample33();
        assert_eq!(b, sample33());
    }

    #[test]
    fn test_mul_assign_matches_product() {
        let a = sample44();
        let b = Matrix44::rotate_x(0.3) * Matrix44::translate(1.0, 2.0, 3.0);
        let mut c = a;
        c *= b;
        assert_eq!(c, a * b);

        let mut d = sample33();
        d *= sample33();
        assert_eq!(d, sample33() * sample33());
    }

    #[test]
    fn test_transpose() {
        let a = sample44();
        assert_eq!(a.transpose()[(0, 3)], 13.0);
        assert_eq!(a.transpose().transpose(), a);
        assert_eq!(sample33().transpose().row(0), sample33().col(0));
    }

    #[test]
    fn test_rotate_z_90() {
        let m = Matrix44::rotate_z(std::f32::consts::FRAC_PI_2);
        let result = Vector3::new(1.0, 0.0, 0.0) * m;
        // Rotating (1,0,0) by 90 degrees around Z should give (0,1,0)
        assert!(approx_eq(result.x, 0.0), "x: expected 0, got {}", result.x);
        assert!(approx_eq(result.y, 1.0), "y: expected 1, got {}", result.y);
        assert!(approx_eq(result.z, 0.0), "z: expected 0, got {}", result.z);
    }

    #[test]
    fn test_rotate_x_90() {
        let m = Matrix44::rotate_x(std::f32::consts::FRAC_PI_2);
        let result = Vector3::new(0.0, 1.0, 0.0) * m;
        assert!(approx_eq(result.x, 0.0), "x: expected 0, got {}", result.x);
        assert!(approx_eq(result.y, 0.0), "y: expected 0, got {}", result.y);
        assert!(approx_eq(result.z, 1.0), "z: expected 1, got {}", result.z);
    }

    #[test]
    fn test_rotate_y_90() {
        let m = Matrix44::rotate_y(std::f32::consts::FRAC_PI_2);
        let result = Vector3::new(1.0, 0.0, 0.0) * m;
        assert!(approx_eq(result.x, 0.0), "x: expected 0, got {}", result.x);
        assert!(approx_eq(result.y, 0.0), "y: expected 0, got {}", result.y);
        assert!(
            approx_eq(result.z, -1.0),
            "z: expected -1, got {}",
            result.z
        );
    }

    #[test]
    fn test_multiplication_order() {
        // scale first, then translate: (1,0,0) -> (2,0,0) -> (12,0,0)
        let combined = Matrix44::scale(2.0, 1.0, 1.0) * Matrix44::translate(10.0, 0.0, 0.0);
        let v = Vector3::new(1.0, 0.0, 0.0);
        assert_eq!(v * combined, Vector3::new(12.0, 0.0, 0.0));
        // same result as applying the matrices one after the other
        let stepwise = (v * Matrix44::scale(2.0, 1.0, 1.0)) * Matrix44::translate(10.0, 0.0, 0.0);
        assert_eq!(v * combined, stepwise);
        // the other order translates first: (11,0,0) -> (22,0,0)
        let reversed = Matrix44::translate(10.0, 0.0, 0.0) * Matrix44::scale(2.0, 1.0, 1.0);
        assert_eq!(v * reversed, Vector3::new(22.0, 0.0, 0.0));
    }

    #[test]
    fn test_transform_coord_matches_affine_transform() {
        // with w staying 1 the perspective divide is a no-op
        let m = Matrix44::rotate_x(0.4) * Matrix44::translate(1.0, 2.0, 3.0);
        let v = Vector3::new(0.5, -1.5, 2.0);
        let coord = m.transform_coord(v);
        let affine = v * m;
        assert!(
            approx_eq(coord.x, affine.x),
            "x: expected {}, got {}",
            affine.x,
            coord.x
        );
        assert!(
            approx_eq(coord.y, affine.y),
            "y: expected {}, got {}",
            affine.y,
            coord.y
        );
        assert!(
            approx_eq(coord.z, affine.z),
            "z: expected {}, got {}",
            affine.z,
            coord.z
        );
    }

    #[test]
    fn test_transform_coord_perspective_divide() {
        let mut m = Matrix44::scale_uniform(2.0);
        m[(3, 3)] = 2.0;
        let result = m.transform_coord(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(result, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_transform_normal_no_translation() {
        let m = Matrix44::translate(10.0, 20.0, 30.0);
        let result = m.transform_normal(Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(result, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Matrix33::IDENTITY.to_string(), "1,0,0;0,1,0;0,0,1");
    }
}
