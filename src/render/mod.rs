//! Pixel output: frame and depth buffers plus the scanline rasterizer.

pub mod framebuffer;
pub mod rasterizer;

pub use framebuffer::{FrameBuffer, ZBuffer};
pub use rasterizer::{ClipRegion, RasterVertex, Rasterizer};
