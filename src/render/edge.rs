//! Incremental edge walker for the scanline rasterizer.

use super::gradient::{Gradient, Interpolants};
use crate::vertex::Vertex;

/// Walks one edge of a Y-sorted triangle from top to bottom, one scanline
/// per [`Edge::step`].
///
/// The edge covers scanlines `ceil(start.y) .. ceil(end.y)`; the last row is
/// exclusive. X and the interpolants are pre-stepped from the vertex to the
/// first covered scanline so that every row samples at integer Y.
///
/// Values at a row are evaluated from the first row rather than accumulated,
/// so an edge reaches the same X on a given row however it got there.
#[derive(Clone, Copy, Debug)]
pub struct Edge {
    x_first: f32,
    x_step: f32,
    x: f32,
    y_start: i32,
    y_end: i32,
    row: i32,
    attrs_first: Interpolants,
    attrs_step: Interpolants,
    attrs: Interpolants,
}

impl Edge {
    /// `start_index` is the position of `start` in the gradient's sorted
    /// vertex order (0, 1 or 2).
    pub fn new(gradient: &Gradient, start: &Vertex, end: &Vertex, start_index: usize) -> Self {
        let y_start = start.y().ceil() as i32;
        let y_end = end.y().ceil() as i32;

        let y_dist = end.y() - start.y();
        let x_dist = end.x() - start.x();

        // A flat edge covers no scanlines; keep its slope finite anyway.
        let x_step = if y_dist > 0.0 { x_dist / y_dist } else { 0.0 };

        let y_prestep = y_start as f32 - start.y();
        let x = start.x() + y_prestep * x_step;
        let x_prestep = x - start.x();

        let attrs = gradient.values(start_index)
            + gradient.x_step() * x_prestep
            + gradient.y_step() * y_prestep;
        let attrs_step = gradient.y_step() + gradient.x_step() * x_step;

        Self {
            x_first: x,
            x_step,
            x,
            y_start,
            y_end,
            row: 0,
            attrs_first: attrs,
            attrs_step,
            attrs,
        }
    }

    /// Advance to the next scanline.
    #[inline]
    pub fn step(&mut self) {
        self.advance(1);
    }

    /// Advance by `rows` scanlines at once.
    #[inline]
    pub fn advance(&mut self, rows: i32) {
        self.row += rows;
        let k = self.row as f32;
        self.x = self.x_first + self.x_step * k;
        self.attrs = self.attrs_first + self.attrs_step * k;
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y_start(&self) -> i32 {
        self.y_start
    }

    #[inline]
    pub fn y_end(&self) -> i32 {
        self.y_end
    }

    /// Interpolants at the current scanline, at X = [`Edge::x`].
    #[inline]
    pub fn attrs(&self) -> Interpolants {
        self.attrs
    }
}
