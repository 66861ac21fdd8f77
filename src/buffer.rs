//! Conversions between the math types and raw float buffers
//!
//! All types are `#[repr(C)]` and laid out as their components in declared
//! order (matrices row by row), so converting to and from `[f32; N]` or a
//! little-endian byte stream is bit-exact.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::warn;

use crate::math::{Matrix33, Matrix44, Vector2, Vector3, Vector4};

/// A float slice was too short to build the requested value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceLengthError {
    pub expected: usize,
    pub actual: usize,
}

impl Error for SliceLengthError {}

impl Display for SliceLengthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected at least {} floats, got {}",
            self.expected, self.actual
        )
    }
}

/// Copies the first `N` floats of `data`, ignoring anything after them.
fn leading<const N: usize>(data: &[f32]) -> Result<[f32; N], SliceLengthError> {
    data.get(..N)
        .and_then(|head| head.try_into().ok())
        .ok_or(SliceLengthError {
            expected: N,
            actual: data.len(),
        })
}

/// Number of `f32` components in a value, used to size byte buffers.
pub trait Components {
    const COUNT: usize;

    /// Size in bytes when packed as little-endian floats
    const BYTES: usize = Self::COUNT * 4;
}

impl Components for Vector2 {
    const COUNT: usize = 2;
}

impl Components for Vector3 {
    const COUNT: usize = 3;
}

impl Components for Vector4 {
    const COUNT: usize = 4;
}

impl Components for Matrix33 {
    const COUNT: usize = 9;
}

impl Components for Matrix44 {
    const COUNT: usize = 16;
}

impl Vector2 {
    pub fn to_array(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl From<[f32; 2]> for Vector2 {
    fn from([x, y]: [f32; 2]) -> Self {
        Vector2 { x, y }
    }
}

impl TryFrom<&[f32]> for Vector2 {
    type Error = SliceLengthError;
    fn try_from(data: &[f32]) -> Result<Self, Self::Error> {
        leading::<2>(data).map(Vector2::from)
    }
}

impl Vector3 {
    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Vector3 { x, y, z }
    }
}

impl TryFrom<&[f32]> for Vector3 {
    type Error = SliceLengthError;
    fn try_from(data: &[f32]) -> Result<Self, Self::Error> {
        leading::<3>(data).map(Vector3::from)
    }
}

impl Vector4 {
    pub fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl From<[f32; 4]> for Vector4 {
    fn from([x, y, z, w]: [f32; 4]) -> Self {
        Vector4 { x, y, z, w }
    }
}

impl TryFrom<&[f32]> for Vector4 {
    type Error = SliceLengthError;
    fn try_from(data: &[f32]) -> Result<Self, Self::Error> {
        leading::<4>(data).map(Vector4::from)
    }
}

impl Matrix33 {
    /// Elements in row-major order
    pub fn to_array(&self) -> [f32; 9] {
        let mut out = [0.0f32; 9];
        for (chunk, row) in out.chunks_exact_mut(3).zip(self.m.iter()) {
            chunk.copy_from_slice(row);
        }
        out
    }
}

impl From<[[f32; 3]; 3]> for Matrix33 {
    fn from(m: [[f32; 3]; 3]) -> Self {
        Matrix33 { m }
    }
}

impl From<[f32; 9]> for Matrix33 {
    fn from(data: [f32; 9]) -> Self {
        let mut m = [[0.0f32; 3]; 3];
        for (row, chunk) in m.iter_mut().zip(data.chunks_exact(3)) {
            row.copy_from_slice(chunk);
        }
        Matrix33 { m }
    }
}

impl TryFrom<&[f32]> for Matrix33 {
    type Error = SliceLengthError;
    fn try_from(data: &[f32]) -> Result<Self, Self::Error> {
        leading::<9>(data).map(Matrix33::from)
    }
}

impl Matrix44 {
    /// Elements in row-major order
    pub fn to_array(&self) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        for (chunk, row) in out.chunks_exact_mut(4).zip(self.m.iter()) {
            chunk.copy_from_slice(row);
        }
        out
    }
}

impl From<[[f32; 4]; 4]> for Matrix44 {
    fn from(m: [[f32; 4]; 4]) -> Self {
        Matrix44 { m }
    }
}

impl From<[f32; 16]> for Matrix44 {
    fn from(data: [f32; 16]) -> Self {
        let mut m = [[0.0f32; 4]; 4];
        for (row, chunk) in m.iter_mut().zip(data.chunks_exact(4)) {
            row.copy_from_slice(chunk);
        }
        Matrix44 { m }
    }
}

impl TryFrom<&[f32]> for Matrix44 {
    type Error = SliceLengthError;
    fn try_from(data: &[f32]) -> Result<Self, Self::Error> {
        leading::<16>(data).map(Matrix44::from)
    }
}

/// Reads a value packed as consecutive little-endian `f32`s
pub trait ReadLe: Sized {
    fn read_le<R: Read>(reader: &mut R) -> io::Result<Self>;
}

/// Writes a value as consecutive little-endian `f32`s
pub trait WriteLe {
    fn write_le<W: Write>(&self, writer: &mut W) -> io::Result<()>;
}

fn read_floats<const N: usize, R: Read>(reader: &mut R) -> io::Result<[f32; N]> {
    let mut data = [0.0f32; N];
    reader.read_f32_into::<LittleEndian>(&mut data)?;
    Ok(data)
}

fn write_floats<W: Write>(data: &[f32], writer: &mut W) -> io::Result<()> {
    for value in data {
        writer.write_f32::<LittleEndian>(*value)?;
    }
    Ok(())
}

impl ReadLe for Vector2 {
    fn read_le<R: Read>(reader: &mut R) -> io::Result<Self> {
        read_floats::<2, R>(reader).map(Vector2::from)
    }
}

impl WriteLe for Vector2 {
    fn write_le<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_floats(&self.to_array(), writer)
    }
}

impl ReadLe for Vector3 {
    fn read_le<R: Read>(reader: &mut R) -> io::Result<Self> {
        read_floats::<3, R>(reader).map(Vector3::from)
    }
}

impl WriteLe for Vector3 {
    fn write_le<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_floats(&self.to_array(), writer)
    }
}

impl ReadLe for Vector4 {
    fn read_le<R: Read>(reader: &mut R) -> io::Result<Self> {
        read_floats::<4, R>(reader).map(Vector4::from)
    }
}

impl WriteLe for Vector4 {
    fn write_le<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_floats(&self.to_array(), writer)
    }
}

impl ReadLe for Matrix33 {
    fn read_le<R: Read>(reader: &mut R) -> io::Result<Self> {
        read_floats::<9, R>(reader).map(Matrix33::from)
    }
}

impl WriteLe for Matrix33 {
    fn write_le<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_floats(&self.to_array(), writer)
    }
}

impl ReadLe for Matrix44 {
    fn read_le<R: Read>(reader: &mut R) -> io::Result<Self> {
        read_floats::<16, R>(reader).map(Matrix44::from)
    }
}

impl WriteLe for Matrix44 {
    fn write_le<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_floats(&self.to_array(), writer)
    }
}

/// Decodes a tightly packed buffer of values.
///
/// Trailing bytes that do not make up a whole value are skipped.
pub fn read_all<T: ReadLe + Components>(bytes: &[u8]) -> io::Result<Vec<T>> {
    let count = bytes.len() / T::BYTES;
    let remainder = bytes.len() % T::BYTES;
    if remainder != 0 {
        warn!(
            "Ignoring {} trailing bytes after {} values of {} bytes",
            remainder,
            count,
            T::BYTES
        );
    }
    let mut reader = io::Cursor::new(bytes);
    (0..count).map(|_| T::read_le(&mut reader)).collect()
}

pub fn write_all<T: WriteLe, W: Write>(values: &[T], writer: &mut W) -> io::Result<()> {
    for value in values {
        value.write_le(writer)?;
    }
    Ok(())
}
