//! Clip-space clipping against the homogeneous clip cube.
//!
//! Clipping happens after the MVP transform and before the perspective
//! divide. The clip volume is:
//!
//! ```text
//! -w <= x <= w
//! -w <= y <= w
//! -w <= z <= w
//! ```
//!
//! Clipping against the near plane is what keeps `w` strictly positive for
//! everything that reaches the rasterizer.

use crate::vertex::Vertex;

/// The 6 planes of the canonical clip-space cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

impl ClipPlane {
    pub const ALL: [ClipPlane; 6] = [
        ClipPlane::Left,
        ClipPlane::Right,
        ClipPlane::Bottom,
        ClipPlane::Top,
        ClipPlane::Near,
        ClipPlane::Far,
    ];

    /// Signed distance to the plane. Positive = inside the clip volume.
    pub fn signed_distance(&self, v: &Vertex) -> f32 {
        let p = v.position;
        match self {
            Self::Left => p.w + p.x,
            Self::Right => p.w - p.x,
            Self::Bottom => p.w + p.y,
            Self::Top => p.w - p.y,
            Self::Near => p.w + p.z,
            Self::Far => p.w - p.z,
        }
    }
}

/// A convex polygon in clip space, used as the intermediate form while
/// clipping one triangle.
#[derive(Clone, Debug, Default)]
pub struct ClipPolygon {
    pub vertices: Vec<Vertex>,
}

impl ClipPolygon {
    pub fn from_triangle(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: vec![v0, v1, v2],
        }
    }

    /// True once the polygon has been clipped away entirely.
    pub fn is_empty(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Sutherland-Hodgman against a single plane.
    pub fn clip_against_plane(&self, plane: ClipPlane) -> Self {
        if self.is_empty() {
            return Self::default();
        }

        let mut output = Vec::with_capacity(self.vertices.len() + 1);

        for (i, current) in self.vertices.iter().enumerate() {
            let next = &self.vertices[(i + 1) % self.vertices.len()];

            let d1 = plane.signed_distance(current);
            let d2 = plane.signed_distance(next);

            let current_inside = d1 >= 0.0;
            let next_inside = d2 >= 0.0;

            if current_inside {
                output.push(*current);
            }
            if current_inside != next_inside {
                let t = d1 / (d1 - d2);
                output.push(current.lerp(next, t));
            }
        }

        Self { vertices: output }
    }

    /// Clip against all six planes.
    pub fn clip(self) -> Self {
        let mut result = self;
        for plane in ClipPlane::ALL {
            if result.is_empty() {
                break;
            }
            result = result.clip_against_plane(plane);
        }
        result
    }

    /// Fan-triangulate the convex polygon: `[0, i, i + 1]`.
    pub fn triangles(&self) -> impl Iterator<Item = (&Vertex, &Vertex, &Vertex)> {
        (1..self.vertices.len().saturating_sub(1))
            .map(move |i| (&self.vertices[0], &self.vertices[i], &self.vertices[i + 1]))
    }
}
