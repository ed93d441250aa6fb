//! Scanline rasterization into a frame buffer.
//!
//! The [`Rasterizer`] owns the frame buffer, an optional Z-buffer and the
//! clip region every drawing entry point honors:
//! - [`Rasterizer::draw_line`]: Bresenham lines for wireframes
//! - [`Rasterizer::draw_triangle`]: flat or Gouraud filled triangles
//! - [`Rasterizer::draw_textured_triangle`]: textured triangles modulated by
//!   the lit vertex colors

mod line;
mod scanline;

use super::framebuffer::{FrameBuffer, ZBuffer};
use crate::colors::Color;
use crate::math::Vec2;

/// A screen-space vertex ready for rasterization.
///
/// `z` holds the depth value compared in the Z-buffer (1/z of camera space,
/// larger is closer). Every attribute is interpolated linearly in screen
/// space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub color: Color,
    pub uv: Vec2,
}

impl RasterVertex {
    pub fn new(x: f32, y: f32, z: f32, color: Color) -> Self {
        Self {
            x,
            y,
            z,
            color,
            uv: Vec2::ZERO,
        }
    }

    pub fn with_uv(mut self, uv: Vec2) -> Self {
        self.uv = uv;
        self
    }

    /// Per-unit rate of change of every attribute from `self` to `to`,
    /// over a distance of `span`.
    fn gradient(&self, to: &Self, span: f32) -> Self {
        let inv = 1.0 / span;
        Self {
            x: (to.x - self.x) * inv,
            y: (to.y - self.y) * inv,
            z: (to.z - self.z) * inv,
            color: Color::new(
                (to.color.r - self.color.r) * inv,
                (to.color.g - self.color.g) * inv,
                (to.color.b - self.color.b) * inv,
                (to.color.a - self.color.a) * inv,
            ),
            uv: Vec2::new((to.uv.x - self.uv.x) * inv, (to.uv.y - self.uv.y) * inv),
        }
    }

    /// `self + rate * n` for every attribute.
    fn advanced(&self, rate: &Self, n: f32) -> Self {
        Self {
            x: self.x + rate.x * n,
            y: self.y + rate.y * n,
            z: self.z + rate.z * n,
            color: Color::new(
                self.color.r + rate.color.r * n,
                self.color.g + rate.color.g * n,
                self.color.b + rate.color.b * n,
                self.color.a + rate.color.a * n,
            ),
            uv: Vec2::new(self.uv.x + rate.uv.x * n, self.uv.y + rate.uv.y * n),
        }
    }

    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        self.advanced(&self.gradient(other, 1.0), t)
    }
}

/// Inclusive pixel rectangle drawing is restricted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClipRegion {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl ClipRegion {
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

pub struct Rasterizer {
    frame: FrameBuffer,
    zbuffer: Option<ZBuffer>,
    clip: ClipRegion,
}

impl Rasterizer {
    /// Create a rasterizer over a fresh frame buffer, without depth testing.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            frame: FrameBuffer::new(width, height, background),
            zbuffer: None,
            clip: Self::full_region(width, height),
        }
    }

    fn full_region(width: u32, height: u32) -> ClipRegion {
        ClipRegion {
            min_x: 0,
            min_y: 0,
            max_x: width as i32 - 1,
            max_y: height as i32 - 1,
        }
    }

    /// Turns depth testing on or off. Turning it on starts from a cleared
    /// Z-buffer.
    pub fn set_zbuffer(&mut self, enabled: bool) -> &mut Self {
        self.zbuffer = enabled.then(|| ZBuffer::new(self.frame.width(), self.frame.height()));
        self
    }

    pub fn zbuffer(&self) -> Option<&ZBuffer> {
        self.zbuffer.as_ref()
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn into_frame(self) -> FrameBuffer {
        self.frame
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    /// Clears the frame to `background` and resets the Z-buffer, if any.
    pub fn clear(&mut self, background: Color) {
        self.frame.clear(background);
        if let Some(zb) = self.zbuffer.as_mut() {
            zb.clear();
        }
    }

    /// Restricts drawing to the rectangle spanned by two corners (inclusive),
    /// intersected with the buffer.
    pub fn set_clip_region(&mut self, p1: (i32, i32), p2: (i32, i32)) {
        let full = Self::full_region(self.frame.width(), self.frame.height());
        self.clip = ClipRegion {
            min_x: p1.0.min(p2.0).max(full.min_x),
            min_y: p1.1.min(p2.1).max(full.min_y),
            max_x: p1.0.max(p2.0).min(full.max_x),
            max_y: p1.1.max(p2.1).min(full.max_y),
        };
    }

    pub fn reset_clip_region(&mut self) {
        self.clip = Self::full_region(self.frame.width(), self.frame.height());
    }

    pub fn clip_region(&self) -> ClipRegion {
        self.clip
    }

    /// Writes one fragment, depth tested when a Z-buffer is active.
    #[inline]
    fn plot(&mut self, x: i32, y: i32, z: f32, color: Color) {
        if let Some(zb) = self.zbuffer.as_mut() {
            if !zb.test_and_set(x, y, z) {
                return;
            }
        }
        self.frame.set(x, y, color);
    }
}
