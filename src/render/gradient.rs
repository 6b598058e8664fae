//! Per-triangle attribute planes.
//!
//! A [`Gradient`] turns each interpolated attribute into a plane over the
//! triangle's screen-space area:
//!
//! ```text
//! value(x, y) = value(min) + x_step * (x - min.x) + y_step * (y - min.y)
//! ```
//!
//! Texture coordinates are stored divided by `w` together with `1/w` itself.
//! Both are affine in screen space, so they can be stepped linearly and the
//! true coordinate recovered per pixel as `(u/w) / (1/w)`. Depth is the
//! post-divide `z/w`, which is already affine in screen space.

use std::ops::{Add, AddAssign, Mul, Sub};

use crate::vertex::Vertex;

/// The set of values carried across a triangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Interpolants {
    pub u_over_w: f32,
    pub v_over_w: f32,
    pub one_over_w: f32,
    pub depth: f32,
}

impl Interpolants {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(u_over_w: f32, v_over_w: f32, one_over_w: f32, depth: f32) -> Self {
        Self {
            u_over_w,
            v_over_w,
            one_over_w,
            depth,
        }
    }

    /// Values at a screen-space vertex. The caller guarantees `w > 0`.
    fn at_vertex(vertex: &Vertex) -> Self {
        let one_over_w = 1.0 / vertex.w();
        Self::new(
            vertex.tex_coord.x * one_over_w,
            vertex.tex_coord.y * one_over_w,
            one_over_w,
            vertex.z(),
        )
    }

    /// Recover perspective-correct texture coordinates.
    #[inline]
    pub fn tex_coords(&self) -> (f32, f32) {
        let w = 1.0 / self.one_over_w;
        (self.u_over_w * w, self.v_over_w * w)
    }
}

impl Add for Interpolants {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.u_over_w + rhs.u_over_w,
            self.v_over_w + rhs.v_over_w,
            self.one_over_w + rhs.one_over_w,
            self.depth + rhs.depth,
        )
    }
}

impl AddAssign for Interpolants {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Interpolants {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.u_over_w - rhs.u_over_w,
            self.v_over_w - rhs.v_over_w,
            self.one_over_w - rhs.one_over_w,
            self.depth - rhs.depth,
        )
    }
}

impl Mul<f32> for Interpolants {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(
            self.u_over_w * rhs,
            self.v_over_w * rhs,
            self.one_over_w * rhs,
            self.depth * rhs,
        )
    }
}

/// Attribute values at the three sorted vertices plus their screen-space
/// rates of change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gradient {
    values: [Interpolants; 3],
    x_step: Interpolants,
    y_step: Interpolants,
}

impl Gradient {
    /// Build the gradient for a triangle whose vertices are already sorted by
    /// ascending screen Y.
    ///
    /// Returns `None` for triangles that cannot be interpolated: zero area
    /// (identical or collinear vertices), any `w <= 0`, or non-finite input.
    pub fn new(min_y: &Vertex, mid_y: &Vertex, max_y: &Vertex) -> Option<Self> {
        if min_y.w() <= 0.0 || mid_y.w() <= 0.0 || max_y.w() <= 0.0 {
            return None;
        }

        let denominator = ((mid_y.x() - max_y.x()) * (min_y.y() - max_y.y()))
            - ((min_y.x() - max_y.x()) * (mid_y.y() - max_y.y()));
        if denominator == 0.0 || !denominator.is_finite() {
            return None;
        }

        let one_over_dx = 1.0 / denominator;
        let one_over_dy = -one_over_dx;

        let values = [
            Interpolants::at_vertex(min_y),
            Interpolants::at_vertex(mid_y),
            Interpolants::at_vertex(max_y),
        ];

        // Same shared formula, once against the Y coordinates and once against X.
        let step = |a: fn(&Vertex) -> f32, scale: f32| {
            let d0 = a(min_y) - a(max_y);
            let d1 = a(mid_y) - a(max_y);
            ((values[1] - values[2]) * d0 - (values[0] - values[2]) * d1) * scale
        };
        let x_step = step(Vertex::y, one_over_dx);
        let y_step = step(Vertex::x, one_over_dy);

        let gradient = Self {
            values,
            x_step,
            y_step,
        };
        gradient.is_finite().then_some(gradient)
    }

    /// Values at vertex `index` (0 = min Y, 1 = mid Y, 2 = max Y).
    #[inline]
    pub fn values(&self, index: usize) -> Interpolants {
        self.values[index]
    }

    /// Change per unit of screen X.
    #[inline]
    pub fn x_step(&self) -> Interpolants {
        self.x_step
    }

    /// Change per unit of screen Y.
    #[inline]
    pub fn y_step(&self) -> Interpolants {
        self.y_step
    }

    fn is_finite(&self) -> bool {
        self.values
            .iter()
            .chain([&self.x_step, &self.y_step])
            .all(|i| {
                i.u_over_w.is_finite()
                    && i.v_over_w.is_finite()
                    && i.one_over_w.is_finite()
                    && i.depth.is_finite()
            })
    }
}
