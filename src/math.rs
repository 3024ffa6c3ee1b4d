//! Geometric value types shared with the native wire format.
//!
//! These mirror the engine's fixed-layout vector, matrix and rect records
//! byte-for-byte and carry no behavior beyond construction and conversions
//! from the `cgmath` types used on the caller side.

use bytemuck::{Pod, Zeroable};

/// Two-component float vector, used for UV coordinates.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Float2 {
    pub x: f32,
    pub y: f32,
}

impl Float2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Three-component float vector, used for positions, normals and radiance.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Float3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Float3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Four-component float vector.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Float4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Float4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

/// Integer rectangle in screen coordinates.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Rect2D {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Affine transform as a 3x4 row-major matrix, DirectX convention.
///
/// The fourth column is the translation. I.e. moving 3 units along +X:
///
/// ```
/// # use rtx_remix::math::Transform;
/// let t = Transform::new([
///     [1.0, 0.0, 0.0, 3.0],
///     [0.0, 1.0, 0.0, 0.0],
///     [0.0, 0.0, 1.0, 0.0],
/// ]);
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Transform {
    pub matrix: [[f32; 4]; 3],
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        matrix: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ],
    };

    pub const fn new(matrix: [[f32; 4]; 3]) -> Self {
        Self { matrix }
    }

    pub fn from_translation(translation: cgmath::Vector3<f32>) -> Self {
        let mut t = Self::IDENTITY;
        t.matrix[0][3] = translation.x;
        t.matrix[1][3] = translation.y;
        t.matrix[2][3] = translation.z;
        t
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// cgmath matrices are column-major, the engine wants the top three rows of
// the row-major equivalent. The dropped fourth row is assumed affine.
impl From<cgmath::Matrix4<f32>> for Transform {
    fn from(m: cgmath::Matrix4<f32>) -> Self {
        let mut matrix = [[0.0f32; 4]; 3];
        for (row, out) in matrix.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = m[col][row];
            }
        }
        Self { matrix }
    }
}

impl From<cgmath::Vector2<f32>> for Float2 {
    fn from(v: cgmath::Vector2<f32>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<[f32; 2]> for Float2 {
    fn from(v: [f32; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<cgmath::Vector3<f32>> for Float3 {
    fn from(v: cgmath::Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Float3> for cgmath::Vector3<f32> {
    fn from(v: Float3) -> Self {
        cgmath::Vector3::new(v.x, v.y, v.z)
    }
}

impl From<[f32; 3]> for Float3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Float3> for [f32; 3] {
    fn from(v: Float3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl From<cgmath::Vector4<f32>> for Float4 {
    fn from(v: cgmath::Vector4<f32>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}
