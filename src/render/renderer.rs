//! Color and depth surfaces plus the clip-space triangle entry point.
//!
//! [`Renderer::draw_triangle`] takes clip-space vertices through the rest of
//! the fixed-function pipeline:
//!
//! ```text
//! clip space --(clip)--> clip space --(screen_space * v, /w)--> pixels --(scanline)--> buffers
//! ```

use log::trace;

use super::clipper::ClipPolygon;
use super::framebuffer::{FrameBuffer, FAR_DEPTH};
use super::scanline::ScanlineRasterizer;
use crate::bitmap::Bitmap;
use crate::colors;
use crate::math::Mat4;
use crate::vertex::Vertex;

pub struct Renderer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
    screen_space: Mat4,
    rasterizer: ScanlineRasterizer,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            depth_buffer: vec![FAR_DEPTH; size],
            width,
            height,
            screen_space: Mat4::screen_space(width, height),
            rasterizer: ScanlineRasterizer::new(),
        }
    }

    /// Reallocate both surfaces. Contents are reset.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Clear the color buffer to a constant color.
    pub fn fill(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    /// Reset every depth entry to the far sentinel.
    #[inline]
    pub fn clear_depth_buffer(&mut self) {
        self.depth_buffer.fill(FAR_DEPTH);
    }

    /// Draw a triangle given in clip space (after the MVP transform, before
    /// the perspective divide).
    ///
    /// Triangles entirely behind the camera are dropped; triangles crossing
    /// the clip volume are clipped and re-triangulated. Degenerate triangles
    /// produce no pixels. Returns the number of pixels written.
    pub fn draw_triangle(
        &mut self,
        v0: &Vertex,
        v1: &Vertex,
        v2: &Vertex,
        texture: &Bitmap,
    ) -> usize {
        if v0.w() <= 0.0 && v1.w() <= 0.0 && v2.w() <= 0.0 {
            trace!("rejecting triangle behind the camera");
            return 0;
        }

        let inside = [v0, v1, v2].iter().all(|v| v.is_inside_view_frustum());
        if inside {
            return self.fill_clipped(v0, v1, v2, texture);
        }

        let polygon = ClipPolygon::from_triangle(*v0, *v1, *v2).clip();
        if polygon.is_empty() {
            trace!("triangle clipped away entirely");
            return 0;
        }

        polygon
            .triangles()
            .map(|(a, b, c)| self.fill_clipped(a, b, c, texture))
            .sum()
    }

    /// Viewport transform, perspective divide, then scan conversion.
    fn fill_clipped(&mut self, v0: &Vertex, v1: &Vertex, v2: &Vertex, texture: &Bitmap) -> usize {
        // Clipping keeps w >= 0; w == 0 is only reachable at the eye point.
        if v0.w() <= 0.0 || v1.w() <= 0.0 || v2.w() <= 0.0 {
            return 0;
        }

        let screen = |v: &Vertex| v.transform(&self.screen_space).perspective_divide();
        let (s0, s1, s2) = (screen(v0), screen(v1), screen(v2));

        let rasterizer = self.rasterizer;
        let mut fb = self.as_framebuffer();
        rasterizer.fill_triangle(&s0, &s1, &s2, texture, &mut fb)
    }

    /// The color buffer, row-major ARGB.
    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    /// The depth buffer, row-major `z/w`.
    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// Color at (x, y), or None if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width && y < self.height)
            .then(|| self.color_buffer[(y * self.width + x) as usize])
    }

    /// The color buffer as raw bytes for an ARGB8888 streaming texture.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and stricter alignment than u8; the
        // slice covers exactly the buffer's bytes and borrows `self`.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Get a mutable FrameBuffer view into the color and depth buffers.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            self.height,
        )
    }
}
