//! Transform component for scene objects.
//!
//! Provides a [`Transform`] struct with a fluent API for managing world
//! position, rotation (Euler angles in degrees), and uniform scale.

use crate::math::{Mat4, Vec4};

/// A 3D transform with position, rotation (Euler angles), and uniform scale.
///
/// Provides a fluent API where mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position_xyz(5.0, 2.0, 100.0)
///     .rotate_y(45.0)
///     .set_scale(25.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec4,
    rotation: Vec4, // Euler angles in degrees, w unused
    scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec4::point(0.0, 0.0, 0.0),
            rotation: Vec4::direction(0.0, 0.0, 0.0),
            scale: 1.0,
        }
    }
}

impl Transform {
    /// Create a new transform with default values (position=0, rotation=0, scale=1).
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Position ============

    pub fn position(&self) -> Vec4 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec4) -> &mut Self {
        self.position = position.as_point();
        self
    }

    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec4::point(x, y, z);
        self
    }

    // ============ Rotation ============

    /// Get the rotation (Euler angles in degrees).
    pub fn rotation(&self) -> Vec4 {
        self.rotation
    }

    /// Set the rotation (Euler angles in degrees).
    pub fn set_rotation(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.rotation = Vec4::direction(x, y, z);
        self
    }

    /// Rotate around the X axis by `degrees`.
    pub fn rotate_x(&mut self, degrees: f32) -> &mut Self {
        self.rotation.x += degrees;
        self
    }

    /// Rotate around the Y axis by `degrees`.
    pub fn rotate_y(&mut self, degrees: f32) -> &mut Self {
        self.rotation.y += degrees;
        self
    }

    /// Rotate around the Z axis by `degrees`.
    pub fn rotate_z(&mut self, degrees: f32) -> &mut Self {
        self.rotation.z += degrees;
        self
    }

    // ============ Scale ============

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) -> &mut Self {
        self.scale = scale;
        self
    }

    // ============ Matrix Generation ============

    /// The rotation part alone, used for normals.
    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::rotation_euler(self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Generate the model-to-world matrix.
    ///
    /// Order: Translation * Rotation * Scale
    /// (Scale applied first, then rotation, then translation)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * self.rotation_matrix()
            * Mat4::scaling(self.scale, self.scale, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default() {
        let t = Transform::default();
        assert_eq!(t.position(), Vec4::point(0.0, 0.0, 0.0));
        assert!(t.rotation().is_zero());
        assert_eq!(t.scale(), 1.0);
        assert_eq!(t.to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_fluent_api() {
        let mut t = Transform::new();
        t.set_position_xyz(1.0, 2.0, 3.0).rotate_y(45.0).set_scale(2.0);

        assert_eq!(t.position(), Vec4::point(1.0, 2.0, 3.0));
        assert_relative_eq!(t.rotation().y, 45.0);
        assert_eq!(t.scale(), 2.0);
    }

    #[test]
    fn scale_then_rotate_then_translate() {
        let mut t = Transform::new();
        t.set_scale(2.0).set_rotation(0.0, 0.0, 90.0).set_position_xyz(10.0, 0.0, 0.0);

        // (1,0,0) scaled to (2,0,0), rotated a quarter turn about Z, then moved
        let p = t.to_matrix() * Vec4::point(1.0, 0.0, 0.0);
        let rotated = Mat4::rotation_z(90.0f32.to_radians()) * Vec4::point(2.0, 0.0, 0.0);
        assert_relative_eq!(p.x, rotated.x + 10.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, rotated.y, epsilon = 1e-5);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn rotations_accumulate_per_axis() {
        let mut t = Transform::new();
        t.rotate_x(30.0).rotate_x(15.0).rotate_z(-90.0);
        assert_relative_eq!(t.rotation().x, 45.0);
        assert_relative_eq!(t.rotation().y, 0.0);
        assert_relative_eq!(t.rotation().z, -90.0);
    }
}
