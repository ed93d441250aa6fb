//! Bresenham line drawing, clipped to the rasterizer's clip region.

use super::{ClipRegion, Rasterizer};
use crate::colors::Color;

// Outcode bits, one per side of the region.
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const ABOVE: u8 = 4;
const BELOW: u8 = 8;

// Absorbs rounding left by an intersection that lands on a boundary.
const EDGE_TOLERANCE: f64 = 1e-6;

impl ClipRegion {
    fn outcode(&self, x: f64, y: f64) -> u8 {
        let mut code = 0;
        if x < self.min_x as f64 - EDGE_TOLERANCE {
            code |= LEFT;
        } else if x > self.max_x as f64 + EDGE_TOLERANCE {
            code |= RIGHT;
        }
        if y < self.min_y as f64 - EDGE_TOLERANCE {
            code |= ABOVE;
        } else if y > self.max_y as f64 + EDGE_TOLERANCE {
            code |= BELOW;
        }
        code
    }

    /// Cohen-Sutherland: cuts the segment to the part inside the region,
    /// rounding the new endpoints to pixels. `None` when nothing is inside.
    pub fn clip_line(&self, from: (i32, i32), to: (i32, i32)) -> Option<((i32, i32), (i32, i32))> {
        if self.min_x > self.max_x || self.min_y > self.max_y {
            return None;
        }
        let (mut x0, mut y0) = (from.0 as f64, from.1 as f64);
        let (mut x1, mut y1) = (to.0 as f64, to.1 as f64);
        let mut code0 = self.outcode(x0, y0);
        let mut code1 = self.outcode(x1, y1);

        loop {
            if code0 | code1 == 0 {
                let pixel = |x: f64, y: f64| (x.round() as i32, y.round() as i32);
                return Some((pixel(x0, y0), pixel(x1, y1)));
            }
            if code0 & code1 != 0 {
                return None;
            }

            // Move an outside endpoint onto the first boundary it is beyond.
            // Both ends beyond one boundary was rejected above, so the
            // divisor is never zero.
            let code = if code0 != 0 { code0 } else { code1 };
            let (x, y) = if code & ABOVE != 0 {
                let y = self.min_y as f64;
                (x0 + (x1 - x0) * (y - y0) / (y1 - y0), y)
            } else if code & BELOW != 0 {
                let y = self.max_y as f64;
                (x0 + (x1 - x0) * (y - y0) / (y1 - y0), y)
            } else if code & LEFT != 0 {
                let x = self.min_x as f64;
                (x, y0 + (y1 - y0) * (x - x0) / (x1 - x0))
            } else {
                let x = self.max_x as f64;
                (x, y0 + (y1 - y0) * (x - x0) / (x1 - x0))
            };

            if code == code0 {
                (x0, y0) = (x, y);
                code0 = self.outcode(x0, y0);
            } else {
                (x1, y1) = (x, y);
                code1 = self.outcode(x1, y1);
            }
        }
    }
}

impl Rasterizer {
    /// Draws a line between two pixels, both endpoints included.
    ///
    /// The segment is first cut to the clip region, so only pixels inside it
    /// are walked. For each step along the major axis, an accumulated
    /// (doubled) error term decides whether to also step along the minor
    /// axis. Lines are not depth tested.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let Some(((x0, y0), (x1, y1))) = self.clip.clip_line((x0, y0), (x1, y1)) else {
            return;
        };

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        // +1 or -1 per axis, so every octant walks the same loop
        let x_step = if x0 < x1 { 1 } else { -1 };
        let y_step = if y0 < y1 { 1 } else { -1 };

        let mut err = dx - dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.frame.set(x, y, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_step;
            }
            if e2 < dx {
                err += dx;
                y += y_step;
            }
        }
    }
}
