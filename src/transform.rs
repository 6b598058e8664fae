//! Placement of a mesh in the world.

use std::f32::consts::TAU;

use crate::math::Mat4;

/// Position, Euler rotation (radians) and per-axis scale of an object.
///
/// Setters return `&mut Self` so they can be chained:
///
/// ```ignore
/// transform.set_position_xyz(0.0, 0.0, 5.0).rotate_y(0.1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: [f32; 3],
    rotation: [f32; 3],
    scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = [x, y, z];
        self
    }

    /// Euler angles about X, Y and Z.
    pub fn rotation(&self) -> [f32; 3] {
        self.rotation
    }

    pub fn set_rotation_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.rotation = [x, y, z].map(wrap_angle);
        self
    }

    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.rotation[0] = wrap_angle(self.rotation[0] + angle);
        self
    }

    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotation[1] = wrap_angle(self.rotation[1] + angle);
        self
    }

    pub fn scale(&self) -> [f32; 3] {
        self.scale
    }

    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = [s; 3];
        self
    }

    /// The model matrix `T * R(x, y, z) * S`: scale first, then rotate
    /// (X, then Y, then Z), then translate.
    pub fn to_matrix(&self) -> Mat4 {
        let [tx, ty, tz] = self.position;
        let [rx, ry, rz] = self.rotation;
        let [sx, sy, sz] = self.scale;
        Mat4::translation(tx, ty, tz) * Mat4::rotation(rx, ry, rz) * Mat4::scaling(sx, sy, sz)
    }
}

/// Keep a continuously spun angle in `[0, TAU)` so it never loses precision.
fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}
