//! A CPU-only scanline rasterizer.
//!
//! Meshes, a camera matrix and textures go in; a depth-tested ARGB pixel
//! buffer comes out. Texture coordinates are interpolated perspective-correct
//! and triangles crossing the clip volume are clipped in homogeneous space.
//! Presentation is left to the caller: [`Renderer::as_bytes`] is ready for an
//! ARGB8888 streaming texture (see the `window` feature's demo binary).
//!
//! # Quick Start
//!
//! ```no_run
//! use kubus::prelude::*;
//!
//! let mut renderer = Renderer::new(640, 480);
//! let texture = Bitmap::from_file_or_fallback("assets/crate.png");
//! let cube = Mesh::cube();
//!
//! let projection = Projection::from_degrees(60.0, 640.0 / 480.0, 0.1, 100.0);
//! let mut transform = Transform::new();
//! transform.set_position_xyz(0.0, 0.0, 4.0).rotate_y(0.5);
//!
//! renderer.fill(colors::BACKGROUND);
//! renderer.clear_depth_buffer();
//! cube.draw(&mut renderer, &projection.matrix(), &transform.to_matrix(), &texture);
//! let _pixels: &[u32] = renderer.color_buffer();
//! ```

pub mod bitmap;
pub mod colors;
pub mod error;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod transform;
pub mod vertex;

pub use bitmap::{Bitmap, WrapMode};
pub use error::{AssetError, MeshError};
pub use mesh::Mesh;
pub use projection::Projection;
pub use render::Renderer;
pub use transform::Transform;
pub use vertex::Vertex;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use kubus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bitmap::{Bitmap, WrapMode};
    pub use crate::colors;
    pub use crate::error::{AssetError, MeshError};
    pub use crate::math::{Mat4, Vec4};
    pub use crate::mesh::Mesh;
    pub use crate::projection::Projection;
    pub use crate::render::Renderer;
    pub use crate::transform::Transform;
    pub use crate::vertex::Vertex;
}
