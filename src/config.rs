//! Render configuration loaded from RON.
//!
//! ```ron
//! (
//!     width: 640,
//!     height: 480,
//!     camera: "uvn",
//!     position: (0.0, 2.0, -6.0),
//!     target: (0.0, 0.0, 0.0),
//!     render_mode: Wire,
//! )
//! ```
//!
//! Every field is optional; missing fields take their [`Default`] value.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, CameraKind};
use crate::colors::Color;
use crate::error::RenderError;
use crate::math::Vec4;
use crate::render::Rasterizer;
use crate::render_list::{RenderList, SortMethod};

/// Whether polygons are filled or outlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    #[default]
    Solid,
    Wire,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    /// `"euler"` or `"uvn"`, case-insensitive.
    pub camera: String,
    pub position: [f32; 3],
    /// Euler angles in degrees; only read by the Euler camera.
    pub direction: [f32; 3],
    /// Look-at point; only read by the UVN camera.
    pub target: [f32; 3],
    /// Field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub sort_method: SortMethod,
    pub backface_culling: bool,
    pub zbuffer: bool,
    pub render_mode: RenderMode,
    /// Inclusive pixel rectangle `((x1, y1), (x2, y2))`; the whole frame when
    /// absent.
    pub clip: Option<((i32, i32), (i32, i32))>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            background: Color::BLACK,
            camera: "euler".to_string(),
            position: [0.0, 0.0, 0.0],
            direction: [0.0, 0.0, 0.0],
            target: [0.0, 0.0, 1.0],
            fov: 90.0,
            near: 0.3,
            far: 1000.0,
            sort_method: SortMethod::AverageZ,
            backface_culling: true,
            zbuffer: true,
            render_mode: RenderMode::Solid,
            clip: None,
        }
    }
}

impl RenderConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, RenderError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_ron_str(&text)?;
        log::info!("Loaded render config from {}", path.display());
        Ok(config)
    }

    /// Builds the configured camera.
    ///
    /// Fails with [`RenderError::UnknownCameraKind`] when `camera` names
    /// neither kind.
    pub fn camera(&self) -> Result<Camera, RenderError> {
        let kind = CameraKind::from_name(
            &self.camera,
            Vec4::from(self.direction),
            Vec4::from(self.target),
        )?;
        Ok(Camera::new(
            Vec4::from(self.position),
            kind,
            self.fov,
            self.near,
            self.far,
            self.width,
            self.height,
        ))
    }

    /// A cleared rasterizer with the configured depth test and clip region.
    pub fn rasterizer(&self) -> Rasterizer {
        let mut rasterizer = Rasterizer::new(self.width, self.height, self.background);
        rasterizer.set_zbuffer(self.zbuffer);
        if let Some((p1, p2)) = self.clip {
            rasterizer.set_clip_region(p1, p2);
        }
        rasterizer
    }

    /// An empty render list with the configured ordering and culling.
    pub fn render_list(&self) -> RenderList {
        let mut list = RenderList::new();
        list.sort_method = self.sort_method;
        list.backface_culling = self.backface_culling;
        list
    }
}
