//! The triangle pipeline after the vertex transform: clipping, the viewport
//! transform, scan conversion and the depth-tested surfaces.

pub mod clipper;
pub mod edge;
pub mod framebuffer;
pub mod gradient;
pub mod renderer;
pub mod scanline;

pub use clipper::{ClipPlane, ClipPolygon};
pub use edge::Edge;
pub use framebuffer::{FrameBuffer, FAR_DEPTH};
pub use gradient::{Gradient, Interpolants};
pub use renderer::Renderer;
pub use scanline::{Fragment, ScanlineRasterizer};
