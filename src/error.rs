//! Error types for asset loading and mesh construction.

use thiserror::Error;

/// A mesh whose index stream cannot be drawn safely.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("index count {0} is not a multiple of 3")]
    IndexCountNotMultipleOfThree(usize),
    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertex_count: usize,
    },
}

/// Failure to turn an external asset into a [`Bitmap`](crate::Bitmap) or
/// [`Mesh`](crate::Mesh).
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("OBJ load error: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("bitmap must be at least 1x1, got {width}x{height}")]
    EmptyBitmap { width: u32, height: u32 },
    #[error("bitmap of {width}x{height} needs {expected} texels, got {actual}")]
    TexelCountMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("invalid mesh: {0}")]
    Mesh(#[from] MeshError),
}
