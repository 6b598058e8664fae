//! Scanline-based triangle rasterization with perspective-correct texturing.
//!
//! # Algorithm Overview
//!
//! 1. **Sort vertices** by screen Y (top to bottom)
//! 2. **Build a [`Gradient`]**, rejecting degenerate triangles
//! 3. **Pick handedness**: is the middle vertex left or right of the long edge?
//! 4. **Walk two [`Edge`]s** per half: the long edge `min -> max` paired with
//!    `min -> mid` for the top half and `mid -> max` for the bottom half
//! 5. **Fill each span**, stepping the interpolants by the gradient's X step
//!
//! ```text
//!        min                    min
//!        /|                     |\
//!       / |                     | \
//!  mid /  |  long edge     long |  \ mid
//!      \  |  on the right  edge |  /
//!       \ |                     | /
//!        \|                     |/
//!        max                    max
//! ```
//!
//! # Fill Convention
//!
//! Pixel centers sit on integer coordinates. A pixel `(x, y)` is covered when
//! `ceil(start.y) <= y < ceil(end.y)` for the edges and
//! `ceil(left.x) <= x < ceil(right.x)` for the span. Two triangles sharing an
//! edge compute that edge identically, so each pixel along it is claimed by
//! exactly one of them.
//!
//! Vertices with equal Y keep their argument order (the sort is stable).

use log::trace;

use super::edge::Edge;
use super::framebuffer::FrameBuffer;
use super::gradient::Gradient;
use crate::bitmap::Bitmap;
use crate::vertex::Vertex;

/// Interpolated values at one covered pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    /// Perspective-correct texture coordinate.
    pub u: f32,
    /// Perspective-correct texture coordinate.
    pub v: f32,
    /// Post-divide `z/w`, smaller is nearer.
    pub depth: f32,
}

/// Scanline triangle rasterizer.
///
/// Works on screen-space vertices: x and y in pixels, z holding `z/w` depth
/// and w holding the clip-space `w` (needed for `1/w`).
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Sorts three vertices by ascending Y.
    ///
    /// Three compare-and-swaps with strict comparisons; vertices with equal Y
    /// keep their argument order.
    fn sort_vertices(v0: &Vertex, v1: &Vertex, v2: &Vertex) -> [Vertex; 3] {
        let (mut a, mut b, mut c) = (*v0, *v1, *v2);
        if b.y() < a.y() {
            std::mem::swap(&mut a, &mut b);
        }
        if c.y() < b.y() {
            std::mem::swap(&mut b, &mut c);
        }
        if b.y() < a.y() {
            std::mem::swap(&mut a, &mut b);
        }
        [a, b, c]
    }

    /// Visit every pixel the triangle covers inside a `width x height` area.
    ///
    /// Returns `false` when the triangle was rejected as degenerate.
    pub fn for_each_fragment<F>(
        &self,
        v0: &Vertex,
        v1: &Vertex,
        v2: &Vertex,
        width: u32,
        height: u32,
        mut visit: F,
    ) -> bool
    where
        F: FnMut(i32, i32, Fragment),
    {
        let [min_y, mid_y, max_y] = Self::sort_vertices(v0, v1, v2);

        let Some(gradient) = Gradient::new(&min_y, &mid_y, &max_y) else {
            trace!(
                "skipping degenerate triangle ({}, {}) ({}, {}) ({}, {})",
                min_y.x(),
                min_y.y(),
                mid_y.x(),
                mid_y.y(),
                max_y.x(),
                max_y.y()
            );
            return false;
        };

        let mid_on_right = min_y.triangle_area_times_two(&mid_y, &max_y) > 0.0;

        let mut long_edge = Edge::new(&gradient, &min_y, &max_y, 0);
        let mut top_edge = Edge::new(&gradient, &min_y, &mid_y, 0);
        let mut bottom_edge = Edge::new(&gradient, &mid_y, &max_y, 1);

        let bounds = (width as i32, height as i32);
        for short_edge in [&mut top_edge, &mut bottom_edge] {
            Self::scan_edges(
                &gradient,
                &mut long_edge,
                short_edge,
                mid_on_right,
                bounds,
                &mut visit,
            );
        }
        true
    }

    /// Walk the rows covered by `short_edge`, pairing it with the long edge.
    fn scan_edges<F>(
        gradient: &Gradient,
        long_edge: &mut Edge,
        short_edge: &mut Edge,
        mid_on_right: bool,
        (width, height): (i32, i32),
        visit: &mut F,
    ) where
        F: FnMut(i32, i32, Fragment),
    {
        let y_start = short_edge.y_start();
        let y_end = short_edge.y_end();

        let (left, right) = if mid_on_right {
            (long_edge, short_edge)
        } else {
            (short_edge, long_edge)
        };

        // Rows above the framebuffer are skipped in one jump.
        let first = y_start.max(0).min(y_end);
        left.advance(first - y_start);
        right.advance(first - y_start);

        for y in first..y_end.min(height) {
            Self::draw_scanline(gradient, left, right, y, width, visit);
            left.step();
            right.step();
        }
    }

    fn draw_scanline<F>(
        gradient: &Gradient,
        left: &Edge,
        right: &Edge,
        y: i32,
        width: i32,
        visit: &mut F,
    ) where
        F: FnMut(i32, i32, Fragment),
    {
        let x_min = left.x().ceil() as i32;
        let x_max = right.x().ceil() as i32;

        let x_start = x_min.max(0);
        let x_end = x_max.min(width);
        if x_start >= x_end {
            return;
        }

        let x_step = gradient.x_step();
        let mut attrs = left.attrs() + x_step * (x_start as f32 - left.x());

        for x in x_start..x_end {
            let (u, v) = attrs.tex_coords();
            visit(
                x,
                y,
                Fragment {
                    u,
                    v,
                    depth: attrs.depth,
                },
            );
            attrs += x_step;
        }
    }

    /// Fill a screen-space triangle with `texture`, depth-testing every pixel.
    ///
    /// Returns the number of pixels that passed the depth test.
    pub fn fill_triangle(
        &self,
        v0: &Vertex,
        v1: &Vertex,
        v2: &Vertex,
        texture: &Bitmap,
        buffer: &mut FrameBuffer,
    ) -> usize {
        let (width, height) = (buffer.width(), buffer.height());
        let mut written = 0;
        self.for_each_fragment(v0, v1, v2, width, height, |x, y, fragment| {
            let color = texture.sample(fragment.u, fragment.v);
            if buffer.set_pixel_with_depth(x, y, fragment.depth, color) {
                written += 1;
            }
        });
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use crate::render::framebuffer::FAR_DEPTH;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn screen_vertex(x: f32, y: f32, depth: f32, w: f32, u: f32, v: f32) -> Vertex {
        Vertex::new(Vec4::new(x, y, depth, w), Vec4::new(u, v, 0.0, 0.0))
    }

    fn coverage(
        rasterizer: &ScanlineRasterizer,
        tri: [Vertex; 3],
        size: u32,
    ) -> HashMap<(i32, i32), Fragment> {
        let mut pixels = HashMap::new();
        rasterizer.for_each_fragment(&tri[0], &tri[1], &tri[2], size, size, |x, y, f| {
            assert!(pixels.insert((x, y), f).is_none(), "pixel ({x}, {y}) visited twice");
        });
        pixels
    }

    /// Screen-space barycentric weights of `(px, py)`.
    fn barycentric(tri: &[Vertex; 3], px: f32, py: f32) -> [f32; 3] {
        let [a, b, c] = tri;
        let area = a.triangle_area_times_two(b, c);
        let p = screen_vertex(px, py, 0.0, 1.0, 0.0, 0.0);
        let l0 = p.triangle_area_times_two(b, c) / area;
        let l1 = a.triangle_area_times_two(&p, c) / area;
        [l0, l1, 1.0 - l0 - l1]
    }

    #[test]
    fn sort_is_stable_for_equal_y() {
        let a = screen_vertex(0.0, 1.0, 0.0, 1.0, 0.0, 0.0);
        let b = screen_vertex(5.0, 1.0, 0.0, 1.0, 0.0, 0.0);
        let c = screen_vertex(2.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        let [min, mid, max] = ScanlineRasterizer::sort_vertices(&a, &b, &c);
        assert_eq!(min, c);
        assert_eq!(mid, a);
        assert_eq!(max, b);
    }

    #[test]
    fn vertex_order_does_not_change_coverage() {
        let r = ScanlineRasterizer::new();
        let a = screen_vertex(1.2, 0.7, 0.5, 1.0, 0.0, 0.0);
        let b = screen_vertex(9.6, 3.1, 0.5, 1.0, 0.0, 0.0);
        let c = screen_vertex(4.4, 8.8, 0.5, 1.0, 0.0, 0.0);

        let reference: Vec<_> = {
            let mut keys: Vec<_> = coverage(&r, [a, b, c], 12).into_keys().collect();
            keys.sort();
            keys
        };
        assert!(!reference.is_empty());
        for tri in [[a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]] {
            let mut keys: Vec<_> = coverage(&r, tri, 12).into_keys().collect();
            keys.sort();
            assert_eq!(keys, reference);
        }
    }

    #[test]
    fn perspective_correct_matches_barycentric_reference() {
        let r = ScanlineRasterizer::new();
        let tri = [
            screen_vertex(2.0, 1.0, 0.2, 1.0, 0.0, 0.0),
            screen_vertex(30.0, 6.0, 0.6, 4.0, 1.0, 0.0),
            screen_vertex(8.0, 28.0, 0.9, 10.0, 0.0, 1.0),
        ];

        let pixels = coverage(&r, tri, 32);
        assert!(pixels.len() > 100);

        for (&(x, y), fragment) in &pixels {
            let l = barycentric(&tri, x as f32, y as f32);
            let inv_w: [f32; 3] = [1.0 / tri[0].w(), 1.0 / tri[1].w(), 1.0 / tri[2].w()];
            let denom = l[0] * inv_w[0] + l[1] * inv_w[1] + l[2] * inv_w[2];
            let expected_u = (l[0] * tri[0].tex_coord.x * inv_w[0]
                + l[1] * tri[1].tex_coord.x * inv_w[1]
                + l[2] * tri[2].tex_coord.x * inv_w[2])
                / denom;
            let expected_v = (l[0] * tri[0].tex_coord.y * inv_w[0]
                + l[1] * tri[1].tex_coord.y * inv_w[1]
                + l[2] * tri[2].tex_coord.y * inv_w[2])
                / denom;

            assert_relative_eq!(fragment.u, expected_u, epsilon = 1e-3);
            assert_relative_eq!(fragment.v, expected_v, epsilon = 1e-3);
        }
    }

    #[test]
    fn linear_depth_matches_perspective_corrected_clip_depth() {
        // Clip-space z varies linearly in 3D; the perspective-correct z/w at
        // a pixel must equal the screen-linear interpolation of per-vertex z/w.
        let r = ScanlineRasterizer::new();
        let clip_z = [0.5f32, 3.0, 8.0];
        let clip_w = [1.0f32, 4.0, 9.0];
        let tri = [
            screen_vertex(1.0, 2.0, clip_z[0] / clip_w[0], clip_w[0], 0.0, 0.0),
            screen_vertex(28.0, 4.0, clip_z[1] / clip_w[1], clip_w[1], 0.0, 0.0),
            screen_vertex(6.0, 30.0, clip_z[2] / clip_w[2], clip_w[2], 0.0, 0.0),
        ];

        for (&(x, y), fragment) in &coverage(&r, tri, 32) {
            let l = barycentric(&tri, x as f32, y as f32);
            let inv_w = [1.0 / clip_w[0], 1.0 / clip_w[1], 1.0 / clip_w[2]];
            let denom = l[0] * inv_w[0] + l[1] * inv_w[1] + l[2] * inv_w[2];
            let z = (l[0] * clip_z[0] * inv_w[0]
                + l[1] * clip_z[1] * inv_w[1]
                + l[2] * clip_z[2] * inv_w[2])
                / denom;
            let w = 1.0 / denom;
            assert_relative_eq!(fragment.depth, z / w, epsilon = 1e-4);
        }
    }

    #[test]
    fn degenerate_triangles_write_nothing() {
        let r = ScanlineRasterizer::new();
        let texture = Bitmap::solid(0xFFFFFFFF);
        let mut color = vec![0u32; 64];
        let mut depth = vec![FAR_DEPTH; 64];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 8, 8);

        let p = screen_vertex(3.0, 3.0, 0.5, 1.0, 0.0, 0.0);
        assert_eq!(r.fill_triangle(&p, &p, &p, &texture, &mut fb), 0);

        let a = screen_vertex(0.0, 0.0, 0.5, 1.0, 0.0, 0.0);
        let b = screen_vertex(3.0, 3.0, 0.5, 1.0, 0.0, 0.0);
        let c = screen_vertex(7.0, 7.0, 0.5, 1.0, 0.0, 0.0);
        assert_eq!(r.fill_triangle(&a, &b, &c, &texture, &mut fb), 0);

        let flat = screen_vertex(7.0, 0.0, 0.5, 1.0, 0.0, 0.0);
        assert_eq!(r.fill_triangle(&a, &flat, &flat, &texture, &mut fb), 0);

        assert!(color.iter().all(|&c| c == 0));
        assert!(depth.iter().all(|&d| d == FAR_DEPTH));
    }

    #[test]
    fn partially_offscreen_triangle_is_clamped() {
        let r = ScanlineRasterizer::new();
        let tri = [
            screen_vertex(-20.0, -20.0, 0.5, 1.0, 0.0, 0.0),
            screen_vertex(40.0, -5.0, 0.5, 1.0, 0.0, 0.0),
            screen_vertex(-5.0, 40.0, 0.5, 1.0, 0.0, 0.0),
        ];
        let pixels = coverage(&r, tri, 4);
        assert_eq!(pixels.len(), 16);
        assert!(pixels.keys().all(|&(x, y)| (0..4).contains(&x) && (0..4).contains(&y)));
    }

    #[test]
    fn rows_far_above_the_buffer_are_skipped() {
        // Walking a billion offscreen rows one at a time would stall here.
        let r = ScanlineRasterizer::new();
        let tri = [
            screen_vertex(0.0, -1.0e9, 0.5, 1.0, 0.0, 0.0),
            screen_vertex(4.0, 4.0, 0.5, 1.0, 0.0, 0.0),
            screen_vertex(-4.0, 4.0, 0.5, 1.0, 0.0, 0.0),
        ];
        let pixels = coverage(&r, tri, 4);
        assert_eq!(pixels.len(), 16);
        assert!(pixels.values().all(|f| f.depth.is_finite()));
    }
}
