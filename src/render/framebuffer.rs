//! Frame and depth buffers.
//!
//! Both are flat row-major arrays with width/height metadata and
//! bounds-checked 2D access. Writes outside the buffer are silently dropped,
//! so imperfect clipping at the edges never fails a frame.

use std::path::Path;

use image::RgbaImage;

use crate::colors::Color;
use crate::error::RenderError;

/// An owned grid of colors.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Create a buffer filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            pixels: vec![background; (width * height) as usize],
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
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    /// Set the pixel at (x, y). Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// The buffer as row-major `(r, g, b, a)` bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba8()).collect()
    }

    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(self.pixels[(y * self.width + x) as usize].to_rgba8())
        })
    }

    /// Encodes the buffer to an image file. The format follows the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        let path = path.as_ref();
        self.to_image().save(path)?;
        log::info!(
            "Saved {}x{} frame to {}",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }
}

/// Per-pixel depth for hidden surface removal.
///
/// Stores 1/z (reciprocal camera-space depth), so larger values are closer to
/// the camera. A cleared cell holds 0: nothing drawn, any fragment in front of
/// the camera wins.
#[derive(Debug, Clone)]
pub struct ZBuffer {
    depth: Vec<f32>,
    width: u32,
    height: u32,
}

impl ZBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            depth: vec![0.0; (width * height) as usize],
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

    pub fn clear(&mut self) {
        self.depth.fill(0.0);
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.depth[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }

    /// Depth test: stores `depth` and returns true only when it is greater
    /// than the value already at (x, y). Out-of-bounds always fails.
    #[inline]
    pub fn test_and_set(&mut self, x: i32, y: i32, depth: f32) -> bool {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let idx = (y as u32 * self.width + x as u32) as usize;
            if depth > self.depth[idx] {
                self.depth[idx] = depth;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut fb = FrameBuffer::new(4, 3, Color::BLACK);
        fb.set(-1, 0, Color::WHITE);
        fb.set(4, 0, Color::WHITE);
        fb.set(0, 3, Color::WHITE);
        assert!(fb.pixels().iter().all(|&c| c == Color::BLACK));
        assert_eq!(fb.get(4, 0), None);

        fb.set(3, 2, Color::RED);
        assert_eq!(fb.get(3, 2), Some(Color::RED));
    }

    #[test]
    fn rgba_bytes_are_row_major() {
        let mut fb = FrameBuffer::new(2, 2, Color::BLACK);
        fb.set(1, 0, Color::RED);
        fb.set(0, 1, Color::BLUE);
        let bytes = fb.to_rgba_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[4..8], &[255, 0, 0, 255]);
        assert_eq!(&bytes[8..12], &[0, 0, 255, 255]);
    }

    #[test]
    fn save_png_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("frame.png");
        let mut fb = FrameBuffer::new(3, 2, Color::GRAY);
        fb.set(2, 1, Color::GREEN);
        fb.save(&path).expect("save");

        let img = image::open(&path).expect("open").to_rgba8();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [0, 255, 0, 255]);
    }

    #[test]
    fn depth_test_prefers_larger_values() {
        let mut zb = ZBuffer::new(2, 2);
        assert!(zb.test_and_set(0, 0, 0.1));
        assert!(!zb.test_and_set(0, 0, 0.05));
        assert!(zb.test_and_set(0, 0, 0.5));
        assert_eq!(zb.get(0, 0), Some(0.5));
        assert!(!zb.test_and_set(5, 5, 1.0));
        zb.clear();
        assert_eq!(zb.get(0, 0), Some(0.0));
    }
}
