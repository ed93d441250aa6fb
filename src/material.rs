//! Surface materials.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::colors::Color;
use crate::texture::{Texture, TextureFilter};

/// How a polygon's vertex colors are produced by the lighting stage.
///
/// Exactly one mode applies to a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadeMode {
    /// Not shaded at all; vertex colors are left as they were inserted.
    Null,
    /// Material color everywhere, lights ignored.
    Constant,
    /// One lit color per polygon from the face normal.
    #[default]
    Flat,
    /// One lit color per vertex, interpolated across the triangle.
    Gouraud,
    /// Per-pixel lighting is not implemented; shaded as [`ShadeMode::Gouraud`].
    Phong,
}

#[derive(Debug, Clone)]
pub struct Material {
    pub mode: ShadeMode,
    pub color: Color,
    pub ka: f32,
    pub kd: f32,
    pub ks: f32,
    pub texture: Option<Arc<Texture>>,
    pub texture_filter: TextureFilter,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            mode: ShadeMode::Flat,
            color: Color::WHITE,
            ka: 0.0,
            kd: 0.0,
            ks: 0.0,
            texture: None,
            texture_filter: TextureFilter::Point,
        }
    }
}

impl Material {
    pub fn new(mode: ShadeMode, color: Color) -> Self {
        Self {
            mode,
            color,
            ..Default::default()
        }
    }

    pub fn with_texture(mut self, texture: Arc<Texture>, filter: TextureFilter) -> Self {
        self.texture = Some(texture);
        self.texture_filter = filter;
        self
    }
}
