//! 4D vector for homogeneous coordinates.
//!
//! `w` is carried through matrix multiplication but ignored by every metric
//! operation: magnitude, normalization, dot and cross products all treat the
//! vector as a 3D vector.

use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Vec4 {
    /// The origin as a point (w = 1).
    fn default() -> Self {
        Self::point(0.0, 0.0, 0.0)
    }
}

impl Vec4 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const UP: Self = Self::direction(0.0, 1.0, 0.0);
    pub const FORWARD: Self = Self::direction(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a point (w=1) from x, y, z coordinates.
    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 1.0)
    }

    /// Create a direction vector (w=0) from x, y, z coordinates.
    pub const fn direction(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 0.0)
    }

    /// Returns the same x, y, z with w=0, so translation no longer applies.
    pub const fn as_direction(self) -> Self {
        Self::direction(self.x, self.y, self.z)
    }

    /// Returns the same x, y, z with w=1.
    pub const fn as_point(self) -> Self {
        Self::point(self.x, self.y, self.z)
    }

    /// True when x, y and z are all exactly zero (w is ignored).
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Returns the unit vector in the same direction, keeping `w`.
    ///
    /// The zero vector has no direction and is returned unchanged.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag <= f32::EPSILON {
            return *self;
        }
        Self::new(self.x / mag, self.y / mag, self.z / mag, self.w)
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product of two vectors as a direction (w=0).
    pub fn cross(&self, other: Self) -> Self {
        Self::direction(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn scale(&self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar, self.w)
    }

    /// Linearly interpolate x, y, z between two vectors; `w` comes from `self`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
            self.w,
        )
    }
}

/// Point + vector. `w` comes from the left operand.
impl Add<Vec4> for Vec4 {
    type Output = Vec4;

    fn add(self, rhs: Vec4) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w)
    }
}

/// Point - point yields a direction (w=0).
impl Sub<Vec4> for Vec4 {
    type Output = Vec4;

    fn sub(self, rhs: Vec4) -> Self::Output {
        Self::direction(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec4 {
    type Output = Vec4;

    fn mul(self, rhs: f32) -> Self::Output {
        self.scale(rhs)
    }
}

impl Div<f32> for Vec4 {
    type Output = Vec4;

    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs, self.w)
    }
}

impl Neg for Vec4 {
    type Output = Vec4;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }
}

impl From<[f32; 3]> for Vec4 {
    /// Convert an `[x, y, z]` triple to a point (w=1).
    fn from(v: [f32; 3]) -> Self {
        Self::point(v[0], v[1], v[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cross_is_anti_commutative() {
        let u = Vec4::point(1.0, 2.0, 3.0);
        let v = Vec4::point(-4.0, 0.5, 2.0);
        let uv = u.cross(v);
        let vu = v.cross(u);
        assert_relative_eq!(uv.x, -vu.x);
        assert_relative_eq!(uv.y, -vu.y);
        assert_relative_eq!(uv.z, -vu.z);
    }

    #[test]
    fn dot_is_commutative() {
        let u = Vec4::point(1.5, -2.0, 3.0);
        let v = Vec4::point(4.0, 5.0, -6.0);
        assert_eq!(u.dot(v), v.dot(u));
    }

    #[test]
    fn dot_ignores_w() {
        let u = Vec4::new(1.0, 0.0, 0.0, 7.0);
        let v = Vec4::new(1.0, 0.0, 0.0, 9.0);
        assert_eq!(u.dot(v), 1.0);
    }

    #[test]
    fn normalize_unit_vector_is_idempotent() {
        let v = Vec4::point(3.0, -4.0, 12.0).normalize();
        let again = v.normalize();
        assert_relative_eq!(v.magnitude(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(again.x, v.x, epsilon = 1e-6);
        assert_relative_eq!(again.y, v.y, epsilon = 1e-6);
        assert_relative_eq!(again.z, v.z, epsilon = 1e-6);
    }

    #[test]
    fn normalize_zero_vector_is_a_no_op() {
        let zero = Vec4::ZERO.normalize();
        assert!(zero.is_zero());
        assert!(!zero.x.is_nan());
    }

    #[test]
    fn magnitude_ignores_w() {
        let v = Vec4::new(3.0, 4.0, 0.0, 100.0);
        assert_relative_eq!(v.magnitude(), 5.0);
    }

    #[test]
    fn point_difference_is_a_direction() {
        let d = Vec4::point(5.0, 5.0, 5.0) - Vec4::point(1.0, 2.0, 3.0);
        assert_eq!(d, Vec4::direction(4.0, 3.0, 2.0));
    }
}
