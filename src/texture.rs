use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::colors::Color;

/// How texels are looked up between pixel centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextureFilter {
    /// Nearest texel.
    #[default]
    Point,
    /// Weighted blend of the four surrounding texels.
    Bilinear,
}

/// Represents a 2D texture for texture mapping.
///
/// Texel (0, 0) is the top-left corner of the image; UV (0, 0) maps to it.
#[derive(Debug, Clone)]
pub struct Texture {
    data: Vec<Color>, // Row-major texels.
    width: u32,
    height: u32,
}

impl Texture {
    /// Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();
        let data = img.pixels().map(|p| Color::from_rgba8(p.0)).collect();

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Build a texture from row-major texels.
    ///
    /// # Panics
    /// Panics in debug builds if `data.len() != width * height` or either
    /// dimension is zero.
    pub fn from_colors(width: u32, height: u32, data: Vec<Color>) -> Self {
        debug_assert!(width > 0 && height > 0, "Texture must not be empty");
        debug_assert_eq!(
            data.len(),
            (width * height) as usize,
            "Texel count doesn't match dimensions"
        );
        Self {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn texel(&self, x: u32, y: u32) -> Color {
        self.data[(y * self.width + x) as usize]
    }

    /// Sample the texture at UV coordinates.
    ///
    /// UVs outside `[0, 1)` wrap around (tiling) using `rem_euclid`, which
    /// handles negative values correctly unlike the `%` operator.
    #[inline]
    pub fn sample(&self, u: f32, v: f32, filter: TextureFilter) -> Color {
        let u = u.rem_euclid(1.0);
        let v = v.rem_euclid(1.0);
        match filter {
            TextureFilter::Point => self.sample_point(u, v),
            TextureFilter::Bilinear => self.sample_bilinear(u, v),
        }
    }

    fn sample_point(&self, u: f32, v: f32) -> Color {
        // Convert normalized [0,1) UV to pixel coordinates [0, width-1]
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.texel(x, y)
    }

    fn sample_bilinear(&self, u: f32, v: f32) -> Color {
        let fx = u * (self.width - 1) as f32;
        let fy = v * (self.height - 1) as f32;
        let x0 = fx.floor() as u32;
        let y0 = fy.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let top = Color::lerp(self.texel(x0, y0), self.texel(x1, y0), tx);
        let bottom = Color::lerp(self.texel(x0, y1), self.texel(x1, y1), tx);
        Color::lerp(top, bottom, ty)
    }
}
