//! RGBA color with channel values in `[0, 255]`.
//!
//! Channels are stored as `f32` so lighting can scale a light color by a
//! fractional intensity before it is modulated into a surface color. They are
//! quantized to bytes only when the frame is exported.

use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// Largest value a channel can hold.
pub const MAX_CHANNEL: f32 = 255.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(255.0, 255.0, 255.0);
    pub const GRAY: Self = Self::rgb(128.0, 128.0, 128.0);
    pub const RED: Self = Self::rgb(255.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 255.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 255.0);
    pub const YELLOW: Self = Self::rgb(255.0, 255.0, 0.0);
    pub const MAGENTA: Self = Self::rgb(255.0, 0.0, 255.0);

    /// Creates a color from raw channel values. Values are not clamped.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, MAX_CHANNEL)
    }

    /// Creates a color from channels in `[0, 1]`, scaled to `[0, 255]`.
    pub fn from_unit(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(r * MAX_CHANNEL, g * MAX_CHANNEL, b * MAX_CHANNEL, a * MAX_CHANNEL).clamped()
    }

    pub fn from_rgba8([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r as f32, g as f32, b as f32, a as f32)
    }

    /// Quantizes the color to bytes, rounding to the nearest value.
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = self.clamped();
        [
            c.r.round() as u8,
            c.g.round() as u8,
            c.b.round() as u8,
            c.a.round() as u8,
        ]
    }

    /// Returns the color with every channel clamped to `[0, 255]`.
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, MAX_CHANNEL),
            self.g.clamp(0.0, MAX_CHANNEL),
            self.b.clamp(0.0, MAX_CHANNEL),
            self.a.clamp(0.0, MAX_CHANNEL),
        )
    }

    /// Linearly interpolates from `a` to `b`. `t` is clamped to `[0, 1]`.
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            a.r + (b.r - a.r) * t,
            a.g + (b.g - a.g) * t,
            a.b + (b.b - a.b) * t,
            a.a + (b.a - a.a) * t,
        )
    }

    /// Modulates `c1` by `c2` and accumulates the product into `self`.
    ///
    /// Each RGB channel becomes `self + c1 * c2 / 256`, saturating at 255.
    /// This is how light intensity is combined with surface albedo: several
    /// lights modulate into the same accumulator one after another. Alpha is
    /// left untouched.
    pub fn modulate(&mut self, c1: Self, c2: Self) {
        self.r = (self.r + c1.r * c2.r / 256.0).min(MAX_CHANNEL);
        self.g = (self.g + c1.g * c2.g / 256.0).min(MAX_CHANNEL);
        self.b = (self.b + c1.b * c2.b / 256.0).min(MAX_CHANNEL);
    }

    /// Returns `c1` modulated by `c2` into a fresh black accumulator.
    pub fn modulated(c1: Self, c2: Self) -> Self {
        let mut result = Self::BLACK;
        result.modulate(c1, c2);
        result
    }
}

/// Saturating channel-wise addition.
impl Add<Color> for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Self::Output {
        Color::new(
            (self.r + rhs.r).min(MAX_CHANNEL),
            (self.g + rhs.g).min(MAX_CHANNEL),
            (self.b + rhs.b).min(MAX_CHANNEL),
            (self.a + rhs.a).min(MAX_CHANNEL),
        )
    }
}

/// Scales the RGB channels by an intensity, clamped to `[0, 255]`.
impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Self::Output {
        Color::new(
            (self.r * rhs).clamp(0.0, MAX_CHANNEL),
            (self.g * rhs).clamp(0.0, MAX_CHANNEL),
            (self.b * rhs).clamp(0.0, MAX_CHANNEL),
            self.a,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn modulating_black_contributes_nothing() {
        for other in [Color::WHITE, Color::MAGENTA, Color::rgb(12.0, 200.0, 99.0)] {
            let mut result = Color::BLACK;
            result.modulate(Color::BLACK, other);
            assert_eq!(result, Color::BLACK);

            let mut result = Color::BLACK;
            result.modulate(other, Color::BLACK);
            assert_eq!(result, Color::BLACK);
        }
    }

    #[test]
    fn modulate_accumulates_instead_of_overwriting() {
        let mut result = Color::rgb(10.0, 20.0, 30.0);
        result.modulate(Color::rgb(128.0, 128.0, 128.0), Color::rgb(256.0, 0.0, 128.0));
        assert_relative_eq!(result.r, 10.0 + 128.0);
        assert_relative_eq!(result.g, 20.0);
        assert_relative_eq!(result.b, 30.0 + 64.0);
    }

    #[test]
    fn modulate_saturates_when_accumulated_repeatedly() {
        let mut result = Color::BLACK;
        for _ in 0..10 {
            result.modulate(Color::WHITE, Color::WHITE);
            assert!(result.r <= MAX_CHANNEL);
            assert!(result.g <= MAX_CHANNEL);
            assert!(result.b <= MAX_CHANNEL);
        }
        assert_eq!(result.r, MAX_CHANNEL);
    }

    #[test]
    fn lerp_endpoints() {
        let a = Color::rgb(10.0, 200.0, 30.0);
        let b = Color::rgb(250.0, 0.0, 30.0);
        assert_eq!(Color::lerp(a, b, 0.0), a);
        assert_eq!(Color::lerp(a, b, 1.0), b);
    }

    #[test]
    fn lerp_clamps_t() {
        let a = Color::rgb(10.0, 200.0, 30.0);
        let b = Color::rgb(250.0, 0.0, 30.0);
        assert_eq!(Color::lerp(a, b, -3.0), a);
        assert_eq!(Color::lerp(a, b, 7.5), b);
    }

    #[test]
    fn lerp_is_monotonic_per_channel() {
        let a = Color::rgb(10.0, 200.0, 30.0);
        let b = Color::rgb(250.0, 0.0, 30.0);
        let mut previous = a;
        for step in 1..=20 {
            let c = Color::lerp(a, b, step as f32 / 20.0);
            assert!(c.r >= previous.r);
            assert!(c.g <= previous.g);
            assert_eq!(c.b, 30.0);
            previous = c;
        }
    }

    #[test]
    fn scaling_clamps_and_keeps_alpha() {
        let c = Color::rgb(200.0, 100.0, 0.0) * 2.0;
        assert_eq!(c, Color::rgb(255.0, 200.0, 0.0));
        assert_eq!((Color::WHITE * -1.0).r, 0.0);
    }

    #[test]
    fn rgba8_quantization_rounds() {
        assert_eq!(Color::new(0.4, 0.6, 254.5, 255.0).to_rgba8(), [0, 1, 255, 255]);
        assert_eq!(Color::from_unit(1.0, 0.5, 0.0, 1.0).to_rgba8(), [255, 128, 0, 255]);
    }
}
