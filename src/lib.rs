//! A CPU-only 3D graphics pipeline.
//!
//! Objects are transformed into world space, culled against the view frustum,
//! flattened into a [`RenderList`] of triangles, back-face culled, clipped
//! against the near plane, lit, depth sorted, projected and finally handed to
//! a scanline [`Rasterizer`] that fills a frame buffer in memory.
//!
//! # Quick Start
//!
//! ```no_run
//! use polyraster::prelude::*;
//!
//! let camera = Camera::uvn(Vec4::point(0.0, 2.0, -6.0), Vec4::ZERO, 90.0, (640, 480));
//! let lights = [Light::ambient(Color::GRAY)];
//! let mut cube = GameObject::cube("cube", 1.0, Color::WHITE);
//!
//! let mut list = RenderList::new();
//! list.add_object(&mut cube, &camera, false);
//! list.pre_render(&camera, &lights);
//!
//! let mut rasterizer = Rasterizer::new(640, 480, Color::BLACK);
//! rasterizer.set_zbuffer(true);
//! list.render_solid(&mut rasterizer);
//! rasterizer.frame().save("cube.png")?;
//! # Ok::<(), polyraster::RenderError>(())
//! ```

pub mod camera;
pub mod clipper;
pub mod colors;
pub mod config;
pub mod error;
pub mod light;
pub mod loader;
pub mod material;
pub mod math;
pub mod object;
pub mod polygon;
pub mod render;
pub mod render_list;
pub mod texture;
pub mod transform;
pub mod vertex;

// Re-export commonly needed types at crate root for convenience
pub use camera::{Camera, CameraKind};
pub use colors::Color;
pub use config::{RenderConfig, RenderMode};
pub use error::RenderError;
pub use light::Light;
pub use object::GameObject;
pub use render::{FrameBuffer, Rasterizer};
pub use render_list::{RenderList, SortMethod};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use polyraster::prelude::*;
/// ```
pub mod prelude {
    // Scene
    pub use crate::camera::{Camera, CameraKind};
    pub use crate::light::{Light, LightKind};
    pub use crate::material::{Material, ShadeMode};
    pub use crate::object::GameObject;
    pub use crate::texture::{Texture, TextureFilter};
    pub use crate::transform::Transform;

    // Pipeline
    pub use crate::config::{RenderConfig, RenderMode};
    pub use crate::render_list::{RenderList, SortMethod};

    // Rendering
    pub use crate::colors::Color;
    pub use crate::render::{FrameBuffer, RasterVertex, Rasterizer};

    // Assets
    pub use crate::loader::{load_obj, load_plg, LoadOptions};

    // Math
    pub use crate::math::{Mat4, Vec2, Vec4};

    pub use crate::error::RenderError;
}
