//! Mesh vertices.

use crate::math::{Mat4, Vec4};

/// A position plus a texture coordinate.
///
/// The position is whatever space the vertex currently lives in: model space
/// inside a [`Mesh`](crate::Mesh), clip space after the MVP transform, and
/// screen space (pixels, with `z/w` depth and the clip `w` kept) once the
/// renderer has run the viewport transform and perspective divide.
///
/// Only `tex_coord.x` (u) and `tex_coord.y` (v) are meaningful.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec4,
    pub tex_coord: Vec4,
}

impl Vertex {
    pub const fn new(position: Vec4, tex_coord: Vec4) -> Self {
        Self {
            position,
            tex_coord,
        }
    }

    /// Build a vertex from a point and a (u, v) pair.
    pub const fn from_xyz_uv(x: f32, y: f32, z: f32, u: f32, v: f32) -> Self {
        Self::new(Vec4::point(x, y, z), Vec4::new(u, v, 0.0, 0.0))
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.position.z
    }

    #[inline]
    pub fn w(&self) -> f32 {
        self.position.w
    }

    /// Transform the position by `matrix`. Texture coordinates pass through.
    #[inline]
    pub fn transform(&self, matrix: &Mat4) -> Self {
        Self::new(*matrix * self.position, self.tex_coord)
    }

    /// Divide x, y and z by w. `w` itself is kept so `1/w` stays available
    /// for perspective-correct interpolation.
    ///
    /// The caller guarantees `w > 0`.
    #[inline]
    pub fn perspective_divide(&self) -> Self {
        let p = self.position;
        Self::new(Vec4::new(p.x / p.w, p.y / p.w, p.z / p.w, p.w), self.tex_coord)
    }

    /// Inside the canonical clip volume `-w <= x, y, z <= w`.
    pub fn is_inside_view_frustum(&self) -> bool {
        let p = self.position;
        p.x.abs() <= p.w && p.y.abs() <= p.w && p.z.abs() <= p.w
    }

    /// Interpolate position and texture coordinate.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self::new(
            self.position.lerp(other.position, t),
            self.tex_coord.lerp(other.tex_coord, t),
        )
    }

    /// Twice the signed screen-space area of `(self, b, c)`.
    ///
    /// With screen Y growing downward the result is positive when `b` lies to
    /// the right of the directed line `self -> c`.
    pub fn triangle_area_times_two(&self, b: &Self, c: &Self) -> f32 {
        (b.x() - self.x()) * (c.y() - self.y()) - (c.x() - self.x()) * (b.y() - self.y())
    }
}
