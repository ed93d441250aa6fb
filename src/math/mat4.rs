//! 4x4 transformation matrix using column-vector convention.
//!
//! # Convention
//! - Storage is row-major: `data[row][col]`
//! - Vectors are **column vectors** on the right: `Mat4 * Vec4`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! # Example
//! ```ignore
//! let transform = rotation * scale;  // scale applied first, then rotation
//! let result = transform * vertex;   // transform the vertex
//! ```

use std::ops::Mul;

use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    pub const ZERO: Mat4 = Mat4::new([[0.0; 4]; 4]);

    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Creates a translation matrix.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis (radians).
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis (radians).
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis (radians).
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates the rotation for Euler angles given in **degrees**.
    ///
    /// The X rotation is applied first, then Y, then Z (`Rz * Ry * Rx`).
    /// Axes whose angle is exactly zero are left out of the product, so a
    /// single nonzero axis yields exactly that axis' matrix and all-zero
    /// angles yield the identity.
    pub fn rotation_euler(x_deg: f32, y_deg: f32, z_deg: f32) -> Self {
        let mut result = Mat4::IDENTITY;
        let mut composed = false;
        for (angle, build) in [
            (x_deg, Mat4::rotation_x as fn(f32) -> Mat4),
            (y_deg, Mat4::rotation_y),
            (z_deg, Mat4::rotation_z),
        ] {
            if angle == 0.0 {
                continue;
            }
            let axis = build(angle.to_radians());
            result = if composed { axis * result } else { axis };
            composed = true;
        }
        result
    }

    /// Creates a view matrix for a left-handed camera at `eye` looking at
    /// `target`, from the orthonormal basis (u, v, n).
    ///
    /// Returns the matrix together with the basis. When `up` is parallel to
    /// the viewing direction the world Z axis stands in for it.
    pub fn look_at_lh(eye: Vec4, target: Vec4, up: Vec4) -> (Self, [Vec4; 3]) {
        let n = (target - eye).normalize();
        let mut u = up.cross(n);
        if u.magnitude() <= f32::EPSILON {
            u = Vec4::FORWARD.cross(n);
        }
        let u = u.normalize();
        let v = n.cross(u).normalize();

        // Rotation matrix (basis vectors as rows) combined with translation to eye
        let view = Self::new([
            [u.x, u.y, u.z, -u.dot(eye)],
            [v.x, v.y, v.z, -v.dot(eye)],
            [n.x, n.y, n.z, -n.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        (view, [u, v, n])
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column-vector convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, line) in result.iter_mut().enumerate() {
            for (col, value) in line.iter_mut().enumerate() {
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
/// `w` participates, so points (w=1) are translated and directions (w=0)
/// are not.
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let d = &self.data;
        Vec4::new(
            d[0][0] * v.x + d[0][1] * v.y + d[0][2] * v.z + d[0][3] * v.w,
            d[1][0] * v.x + d[1][1] * v.y + d[1][2] * v.z + d[1][3] * v.w,
            d[2][0] * v.x + d[2][1] * v.y + d[2][2] * v.z + d[2][3] * v.w,
            d[3][0] * v.x + d[3][1] * v.y + d[3][2] * v.z + d[3][3] * v.w,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_leaves_vectors_unchanged() {
        for v in [
            Vec4::point(1.0, -2.0, 3.5),
            Vec4::direction(0.0, 7.0, -1.0),
            Vec4::new(4.0, 5.0, 6.0, 2.0),
        ] {
            assert_eq!(Mat4::IDENTITY * v, v);
        }
    }

    #[test]
    fn zero_euler_rotation_is_identity() {
        assert_eq!(Mat4::rotation_euler(0.0, 0.0, 0.0), Mat4::IDENTITY);
    }

    #[test]
    fn single_axis_euler_matches_axis_matrix() {
        assert_eq!(
            Mat4::rotation_euler(30.0, 0.0, 0.0),
            Mat4::rotation_x(30.0f32.to_radians())
        );
        assert_eq!(
            Mat4::rotation_euler(0.0, -45.0, 0.0),
            Mat4::rotation_y((-45.0f32).to_radians())
        );
        assert_eq!(
            Mat4::rotation_euler(0.0, 0.0, 120.0),
            Mat4::rotation_z(120.0f32.to_radians())
        );
    }

    #[test]
    fn euler_rotation_applies_x_then_y_then_z() {
        let composed = Mat4::rotation_euler(90.0, 90.0, 0.0);
        let expected = Mat4::rotation_y(90.0f32.to_radians()) * Mat4::rotation_x(90.0f32.to_radians());
        let v = Vec4::point(1.0, 2.0, 3.0);
        let a = composed * v;
        let b = expected * v;
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn translation_moves_points_but_not_directions() {
        let t = Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(t * Vec4::point(0.0, 0.0, 0.0), Vec4::point(1.0, 2.0, 3.0));
        assert_eq!(
            t * Vec4::direction(0.0, 0.0, 1.0),
            Vec4::direction(0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn look_at_puts_target_on_positive_z() {
        let (view, [u, v, n]) = Mat4::look_at_lh(
            Vec4::point(0.0, 0.0, -5.0),
            Vec4::point(0.0, 0.0, 0.0),
            Vec4::UP,
        );
        let origin = view * Vec4::point(0.0, 0.0, 0.0);
        assert_relative_eq!(origin.z, 5.0, epsilon = 1e-5);
        assert_relative_eq!(u.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-6);
    }
}
