//! Vector and matrix primitives.
//!
//! Everything here is plain `Copy` value algebra with no hidden state.

pub mod mat4;
pub mod vec4;

pub use mat4::Mat4;
pub use vec4::Vec4;
