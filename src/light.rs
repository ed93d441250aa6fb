//! Lighting types for the renderer.
//!
//! Lights never overwrite a color: each contribution is modulated with the
//! surface color and accumulated into a caller-supplied color, saturating at
//! the channel maximum. Several lights simply add up.

use crate::colors::Color;
use crate::math::{Mat4, Vec4};

const EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Lights every surface equally.
    Ambient { color: Color },
    /// Infinitely distant light. `direction` points *toward* the light.
    Directional { color: Color, direction: Vec4 },
    /// Positional light with `k0 + k1*d + k2*d²` attenuation.
    Point {
        color: Color,
        position: Vec4,
        k0: f32,
        k1: f32,
        k2: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    on: bool,
    pub kind: LightKind,
}

impl Light {
    pub fn ambient(color: Color) -> Self {
        Self {
            on: true,
            kind: LightKind::Ambient { color },
        }
    }

    /// Create a directional light shining from `direction`.
    /// The direction will be normalized automatically.
    pub fn directional(color: Color, direction: Vec4) -> Self {
        Self {
            on: true,
            kind: LightKind::Directional {
                color,
                direction: direction.as_direction().normalize(),
            },
        }
    }

    pub fn point(color: Color, position: Vec4, attenuation: (f32, f32, f32)) -> Self {
        let (k0, k1, k2) = attenuation;
        Self {
            on: true,
            kind: LightKind::Point {
                color,
                position: position.as_point(),
                k0,
                k1,
                k2,
            },
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Switches the light on or off.
    pub fn turn(&mut self, on: bool) {
        self.on = on;
    }

    /// The same light expressed in the space `view` maps into.
    pub fn to_camera_space(&self, view: &Mat4) -> Self {
        let kind = match self.kind {
            LightKind::Ambient { color } => LightKind::Ambient { color },
            LightKind::Directional { color, direction } => LightKind::Directional {
                color,
                direction: (*view * direction).normalize(),
            },
            LightKind::Point {
                color,
                position,
                k0,
                k1,
                k2,
            } => LightKind::Point {
                color,
                position: *view * position,
                k0,
                k1,
                k2,
            },
        };
        Self { on: self.on, kind }
    }

    /// Accumulates this light's contribution at a surface point into `result`.
    ///
    /// `normal` must be unit length. Surfaces facing away from the light get
    /// nothing.
    pub fn contribute(&self, result: &mut Color, normal: Vec4, position: Vec4, surface: Color) {
        if !self.on {
            return;
        }
        match self.kind {
            LightKind::Ambient { color } => result.modulate(color, surface),
            LightKind::Directional { color, direction } => {
                let dp = normal.dot(direction);
                if dp > 0.0 {
                    result.modulate(color * dp, surface);
                }
            }
            LightKind::Point {
                color,
                position: light_position,
                k0,
                k1,
                k2,
            } => {
                let to_light = light_position - position;
                let dist = to_light.magnitude();
                if dist <= EPSILON {
                    return;
                }
                let dp = normal.dot(to_light / dist);
                if dp > 0.0 {
                    let attenuation = k0 + k1 * dist + k2 * dist * dist;
                    let intensity = if attenuation > EPSILON {
                        dp / attenuation
                    } else {
                        dp
                    };
                    result.modulate(color * intensity, surface);
                }
            }
        }
    }
}
