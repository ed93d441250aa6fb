//! Vertices and their per-frame clip classification.

use crate::colors::Color;
use crate::math::{Vec2, Vec4};

/// Where a coordinate lies relative to a pair of opposing frustum planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisClip {
    #[default]
    Between,
    /// Beyond the maximum plane (right, top or far).
    Greater,
    /// Below the minimum plane (left, bottom or near).
    Less,
}

impl AxisClip {
    pub fn classify(value: f32, min: f32, max: f32) -> Self {
        if value > max {
            AxisClip::Greater
        } else if value < min {
            AxisClip::Less
        } else {
            AxisClip::Between
        }
    }
}

/// Clip classification of one vertex against all three plane pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClipCode {
    pub x: AxisClip,
    pub y: AxisClip,
    pub z: AxisClip,
}

/// A single axis fix-up applied to positions while loading assets authored
/// in a different coordinate convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexAdjust {
    InvertX,
    InvertY,
    InvertZ,
    SwapYZ,
    SwapXZ,
    SwapXY,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec4,
    pub normal: Vec4,
    pub uv: Vec2,
    /// Shaded color, written by the lighting stage.
    pub color: Color,
    pub clip_code: ClipCode,
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: Vec4::default(),
            normal: Vec4::direction(0.0, 0.0, 0.0),
            uv: Vec2::ZERO,
            color: Color::BLACK,
            clip_code: ClipCode::default(),
        }
    }
}

impl Vertex {
    pub fn new(position: Vec4) -> Self {
        Self {
            position: position.as_point(),
            ..Default::default()
        }
    }

    pub fn with_normal(mut self, normal: Vec4) -> Self {
        self.normal = normal.as_direction();
        self
    }

    pub fn with_uv(mut self, uv: Vec2) -> Self {
        self.uv = uv;
        self
    }

    /// Copy that carries only the position and normal.
    ///
    /// Texture coordinates and color are invariant under rigid transforms, so
    /// the transformed-space copy of an object vertex leaves them at default.
    pub fn geometry_copy(&self) -> Self {
        Self {
            position: self.position,
            normal: self.normal,
            ..Default::default()
        }
    }

    pub fn adjust(&mut self, adjust: VertexAdjust) {
        let p = &mut self.position;
        match adjust {
            VertexAdjust::InvertX => p.x = -p.x,
            VertexAdjust::InvertY => p.y = -p.y,
            VertexAdjust::InvertZ => p.z = -p.z,
            VertexAdjust::SwapYZ => std::mem::swap(&mut p.y, &mut p.z),
            VertexAdjust::SwapXZ => std::mem::swap(&mut p.x, &mut p.z),
            VertexAdjust::SwapXY => std::mem::swap(&mut p.x, &mut p.y),
        }
    }

    /// Interpolates position and texture coordinate toward `other`.
    ///
    /// Used to place a vertex on a clip plane. Normal and color are kept.
    pub fn lerp_toward(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            uv: self.uv.lerp(other.uv, t),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_copy_drops_uv_and_color() {
        let mut v = Vertex::new(Vec4::point(1.0, 2.0, 3.0))
            .with_normal(Vec4::direction(0.0, 1.0, 0.0))
            .with_uv(Vec2::new(0.25, 0.75));
        v.color = Color::RED;

        let copy = v.geometry_copy();
        assert_eq!(copy.position, v.position);
        assert_eq!(copy.normal, v.normal);
        assert_eq!(copy.uv, Vec2::ZERO);
        assert_eq!(copy.color, Color::BLACK);
    }

    #[test]
    fn adjust_swaps_axes() {
        let mut v = Vertex::new(Vec4::point(1.0, 2.0, 3.0));
        v.adjust(VertexAdjust::SwapYZ);
        assert_eq!(v.position, Vec4::point(1.0, 3.0, 2.0));
        v.adjust(VertexAdjust::InvertX);
        assert_eq!(v.position, Vec4::point(-1.0, 3.0, 2.0));
    }

    #[test]
    fn classify_axis() {
        assert_eq!(AxisClip::classify(5.0, -1.0, 1.0), AxisClip::Greater);
        assert_eq!(AxisClip::classify(-5.0, -1.0, 1.0), AxisClip::Less);
        assert_eq!(AxisClip::classify(1.0, -1.0, 1.0), AxisClip::Between);
    }

    #[test]
    fn lerp_toward_moves_position_and_uv() {
        let a = Vertex::new(Vec4::point(0.0, 0.0, 0.0)).with_uv(Vec2::new(0.0, 0.0));
        let b = Vertex::new(Vec4::point(10.0, 0.0, 20.0)).with_uv(Vec2::new(1.0, 0.5));
        let mid = a.lerp_toward(&b, 0.5);
        assert_eq!(mid.position, Vec4::point(5.0, 0.0, 10.0));
        assert_eq!(mid.uv, Vec2::new(0.5, 0.25));
    }
}
