//! 4x4 transformation matrix.
//!
//! # Convention
//! - Storage is **row-major**: `data[row][col]`
//! - Vectors are **column vectors** on the right: `Mat4 * Vec4`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Rotations are right-handed; the projection is left-handed (+Z into the screen)
//!
//! # Example
//! ```ignore
//! let mvp = view_projection * model;  // model applied first
//! let clip = mvp * position;          // w is carried, never divided here
//! ```

use std::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};

use super::vec4::Vec4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Euler rotation. X is applied first, then Y, then Z: `Rz * Ry * Rx`.
    pub fn rotation(x: f32, y: f32, z: f32) -> Self {
        Mat4::rotation_z(z) * Mat4::rotation_y(y) * Mat4::rotation_x(x)
    }

    /// Rotation of `angle` radians around an arbitrary unit `axis`.
    ///
    /// Agrees with [`Vec4::rotate`] for the same axis and angle.
    pub fn rotation_axis_angle(axis: Vec4, angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);
        Mat4::new([
            [t * x * x + c, t * x * y - s * z, t * x * z + s * y, 0.0],
            [t * x * y + s * z, t * y * y + c, t * y * z - s * x, 0.0],
            [t * x * z - s * y, t * y * z + s * x, t * z * z + c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Left-handed perspective projection.
    ///
    /// Clip-space `w` equals view-space `z`; the near plane maps to NDC
    /// `z = -1` and the far plane to `z = 1`.
    pub fn perspective(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let tan_half_fov = (fov_y / 2.0).tan();
        let z_range = near - far;
        Mat4::new([
            [1.0 / (tan_half_fov * aspect_ratio), 0.0, 0.0, 0.0],
            [0.0, 1.0 / tan_half_fov, 0.0, 0.0],
            [0.0, 0.0, (-near - far) / z_range, 2.0 * far * near / z_range],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// Left-handed orthographic projection onto the `[-1, 1]` cube.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;
        Mat4::new([
            [2.0 / width, 0.0, 0.0, -(right + left) / width],
            [0.0, 2.0 / height, 0.0, -(top + bottom) / height],
            [0.0, 0.0, 2.0 / depth, -(far + near) / depth],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Maps clip space to pixel space, to be followed by the perspective divide.
    ///
    /// NDC `x = -1` lands on the left edge of pixel column 0 and NDC `y = 1`
    /// on the top edge of row 0. The half-pixel offset puts pixel centers on
    /// integer coordinates. Z passes through.
    pub fn screen_space(width: u32, height: u32) -> Self {
        let half_width = width as f32 / 2.0;
        let half_height = height as f32 / 2.0;
        Mat4::new([
            [half_width, 0.0, 0.0, half_width - 0.5],
            [0.0, -half_height, 0.0, half_height - 0.5],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn transpose(&self) -> Self {
        let mut data = [[0.0f32; 4]; 4];
        for (row, values) in data.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[col][row];
            }
        }
        Mat4::new(data)
    }

    /// Transform a vector. Same as `self * v`.
    #[inline]
    pub fn transform(&self, v: Vec4) -> Vec4 {
        *self * v
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
///
/// `w` is carried through; no perspective divide happens here.
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: usize| {
            self.data[r][0] * v.x
                + self.data[r][1] * v.y
                + self.data[r][2] * v.z
                + self.data[r][3] * v.w
        };
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Mat4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn sample_matrix() -> Mat4 {
        Mat4::translation(1.0, -2.0, 3.5)
            * Mat4::rotation(0.3, -1.1, 2.0)
            * Mat4::scaling(2.0, 0.5, 3.0)
    }

    #[test]
    fn identity_composition_is_a_no_op() {
        let m = sample_matrix();
        assert_eq!(m * Mat4::identity(), m);
        assert_eq!(Mat4::identity() * m, m);
    }

    #[test]
    fn identity_transform_returns_input() {
        let v = Vec4::new(1.5, -2.0, 7.0, 0.25);
        assert_eq!(Mat4::identity() * v, v);
        assert_eq!(Mat4::identity().transform(v), v);
    }

    #[test]
    fn multiplication_is_not_commutative() {
        let t = Mat4::translation(5.0, 0.0, 0.0);
        let r = Mat4::rotation_z(FRAC_PI_2);
        let p = Vec4::point(1.0, 0.0, 0.0);
        // Rotate then translate vs translate then rotate.
        assert_abs_diff_eq!((t * r) * p, Vec4::point(5.0, 1.0, 0.0), epsilon = 1e-5);
        assert_abs_diff_eq!((r * t) * p, Vec4::point(0.0, 6.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn translation_moves_points_not_directions() {
        let t = Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(t * Vec4::point(0.0, 0.0, 0.0), Vec4::point(1.0, 2.0, 3.0));
        assert_eq!(t * Vec4::UNIT_X, Vec4::UNIT_X);
    }

    #[test]
    fn single_axis_rotations_are_right_handed() {
        assert_abs_diff_eq!(Mat4::rotation_x(FRAC_PI_2) * Vec4::UNIT_Y, Vec4::UNIT_Z, epsilon = 1e-6);
        assert_abs_diff_eq!(Mat4::rotation_y(FRAC_PI_2) * Vec4::UNIT_Z, Vec4::UNIT_X, epsilon = 1e-6);
        assert_abs_diff_eq!(Mat4::rotation_z(FRAC_PI_2) * Vec4::UNIT_X, Vec4::UNIT_Y, epsilon = 1e-6);
    }

    #[test]
    fn euler_rotation_applies_x_then_y_then_z() {
        let (x, y, z) = (0.4, -0.7, 1.3);
        let v = Vec4::direction(0.2, 1.0, -3.0);
        let expected = Mat4::rotation_z(z) * (Mat4::rotation_y(y) * (Mat4::rotation_x(x) * v));
        assert_abs_diff_eq!(Mat4::rotation(x, y, z) * v, expected, epsilon = 1e-5);
    }

    #[test]
    fn axis_angle_matches_vector_rotate() {
        let axis = Vec4::direction(1.0, -2.0, 0.5).normalize();
        let v = Vec4::direction(3.0, 0.5, -1.0);
        let angle = 0.9;
        assert_abs_diff_eq!(
            Mat4::rotation_axis_angle(axis, angle) * v,
            v.rotate(axis, angle),
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            Mat4::rotation_axis_angle(Vec4::UNIT_X, angle),
            Mat4::rotation_x(angle),
            epsilon = 1e-6
        );
    }

    #[test]
    fn perspective_maps_near_and_far_planes() {
        let near = 0.1;
        let far = 100.0;
        let p = Mat4::perspective(FRAC_PI_4, 1.0, near, far);

        let at_near = p * Vec4::point(0.0, 0.0, near);
        let at_far = p * Vec4::point(0.0, 0.0, far);

        assert_relative_eq!(at_near.w, near);
        assert_relative_eq!(at_near.z / at_near.w, -1.0, epsilon = 1e-5);
        assert_relative_eq!(at_far.z / at_far.w, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn orthographic_maps_box_to_unit_cube() {
        let o = Mat4::orthographic(-2.0, 2.0, -1.0, 1.0, 0.0, 10.0);
        assert_abs_diff_eq!(o * Vec4::point(2.0, 1.0, 10.0), Vec4::ONE, epsilon = 1e-6);
        assert_abs_diff_eq!(
            o * Vec4::point(-2.0, -1.0, 0.0),
            Vec4::new(-1.0, -1.0, -1.0, 1.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn screen_space_puts_pixel_centers_on_integers() {
        let s = Mat4::screen_space(4, 2);
        let top_left = s * Vec4::point(-1.0, 1.0, 0.5);
        let bottom_right = s * Vec4::point(1.0, -1.0, 0.5);
        assert_relative_eq!(top_left, Vec4::point(-0.5, -0.5, 0.5));
        assert_relative_eq!(bottom_right, Vec4::point(3.5, 1.5, 0.5));
    }

    #[test]
    fn transpose_twice_is_identity() {
        let m = sample_matrix();
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose().get(0, 3), m.get(3, 0));
    }
}
