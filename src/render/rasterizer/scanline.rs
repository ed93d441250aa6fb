//! Scanline triangle filling.
//!
//! # Algorithm Overview
//!
//! 1. **Reject** degenerate (zero-area) triangles and triangles entirely
//!    outside the clip region
//! 2. **Sort vertices** by Y coordinate (top to bottom in screen space)
//! 3. **Decompose** into a flat-bottom and a flat-top triangle by splitting
//!    the long edge at the middle vertex's Y
//! 4. **Walk edges** one scanline at a time, stepping X and every attribute
//!    (depth, color, UV) by a fixed per-scanline rate
//! 5. **Fill spans** between the left and right edges
//!
//! ```text
//!        v0                   v0
//!        /\                   /\
//!       /  \                 /  \
//!      /    \       =>      /----\<- split at v1.y
//!     /      \             v1   split
//!    /________\             \    /
//!   v1        v2             \  /
//!                             \/
//!                             v2
//! ```
//!
//! # Coverage
//!
//! Pixel centers sit on integer coordinates. A triangle covers rows
//! `ceil(y_top)..ceil(y_bottom)` and, on each row, columns
//! `ceil(x_left)..ceil(x_right)` (end exclusive). Triangles sharing an edge
//! therefore never write the same pixel twice and leave no gaps.

use approx::abs_diff_eq;

use super::{RasterVertex, Rasterizer};
use crate::colors::Color;
use crate::texture::{Texture, TextureFilter};

/// Twice the signed area below which a triangle is considered degenerate.
const DEGENERATE_AREA: f32 = 1e-4;
const EPSILON: f32 = 1e-6;

#[derive(Clone, Copy)]
struct Sampler<'a> {
    texture: &'a Texture,
    filter: TextureFilter,
}

impl Rasterizer {
    /// Fills a triangle, interpolating vertex colors across it.
    ///
    /// Equal vertex colors give flat shading; different ones give Gouraud
    /// shading.
    pub fn draw_triangle(&mut self, vertices: [RasterVertex; 3]) {
        self.fill_triangle(vertices, None);
    }

    /// Fills a triangle with `texture`, each texel modulated by the
    /// interpolated vertex color.
    pub fn draw_textured_triangle(
        &mut self,
        vertices: [RasterVertex; 3],
        texture: &Texture,
        filter: TextureFilter,
    ) {
        self.fill_triangle(vertices, Some(Sampler { texture, filter }));
    }

    fn fill_triangle(&mut self, vertices: [RasterVertex; 3], sampler: Option<Sampler>) {
        let [a, b, c] = vertices;

        // Collinear or zero-area, including all X or all Y equal
        let area = (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y);
        if abs_diff_eq!(area, 0.0, epsilon = DEGENERATE_AREA) {
            return;
        }

        let mut sorted = vertices;
        sorted.sort_by(|p, q| p.y.total_cmp(&q.y));
        let [top, mid, bottom] = sorted;

        // Entirely above/below or left/right of the clip region
        let clip = self.clip;
        if top.y.ceil() > clip.max_y as f32 || bottom.y.ceil() <= clip.min_y as f32 {
            return;
        }
        let min_x = a.x.min(b.x).min(c.x);
        let max_x = a.x.max(b.x).max(c.x);
        if min_x.ceil() > clip.max_x as f32 || max_x.ceil() <= clip.min_x as f32 {
            return;
        }

        if top.y == mid.y {
            self.draw_flat_top(top, mid, bottom, sampler);
        } else if mid.y == bottom.y {
            self.draw_flat_bottom(top, mid, bottom, sampler);
        } else {
            // Point on the long edge at the middle vertex's height
            let t = (mid.y - top.y) / (bottom.y - top.y);
            let mut split = top.lerp(&bottom, t);
            split.y = mid.y;

            self.draw_flat_bottom(top, mid, split, sampler);
            self.draw_flat_top(mid, split, bottom, sampler);
        }
    }

    /// `top` above the horizontal edge `b`-`c`.
    fn draw_flat_bottom(
        &mut self,
        top: RasterVertex,
        b: RasterVertex,
        c: RasterVertex,
        sampler: Option<Sampler>,
    ) {
        let height = b.y - top.y;
        if height < EPSILON {
            return;
        }
        let (left, right) = if b.x <= c.x { (b, c) } else { (c, b) };
        let left_rate = top.gradient(&left, height);
        let right_rate = top.gradient(&right, height);
        self.walk_edges(top, left_rate, top, right_rate, top.y, b.y, sampler);
    }

    /// Horizontal edge `a`-`b` above `bottom`.
    fn draw_flat_top(
        &mut self,
        a: RasterVertex,
        b: RasterVertex,
        bottom: RasterVertex,
        sampler: Option<Sampler>,
    ) {
        let height = bottom.y - a.y;
        if height < EPSILON {
            return;
        }
        let (left, right) = if a.x <= b.x { (a, b) } else { (b, a) };
        let left_rate = left.gradient(&bottom, height);
        let right_rate = right.gradient(&bottom, height);
        self.walk_edges(left, left_rate, right, right_rate, a.y, bottom.y, sampler);
    }

    /// Steps both edges down from `y_top` to `y_bottom`, filling one span per
    /// scanline. Rows above the clip region are skipped by advancing the edge
    /// start values by the clipped distance times their rate.
    #[allow(clippy::too_many_arguments)]
    fn walk_edges(
        &mut self,
        left_start: RasterVertex,
        left_rate: RasterVertex,
        right_start: RasterVertex,
        right_rate: RasterVertex,
        y_top: f32,
        y_bottom: f32,
        sampler: Option<Sampler>,
    ) {
        let first_row = (y_top.ceil() as i32).max(self.clip.min_y);
        let end_row = (y_bottom.ceil() as i32).min(self.clip.max_y + 1);
        if first_row >= end_row {
            return;
        }

        let skipped = first_row as f32 - y_top;
        let mut left = left_start.advanced(&left_rate, skipped);
        let mut right = right_start.advanced(&right_rate, skipped);

        for y in first_row..end_row {
            self.draw_span(y, &left, &right, sampler);
            left = left.advanced(&left_rate, 1.0);
            right = right.advanced(&right_rate, 1.0);
        }
    }

    /// Fills columns `ceil(left.x)..ceil(right.x)` of row `y`.
    fn draw_span(
        &mut self,
        y: i32,
        left: &RasterVertex,
        right: &RasterVertex,
        sampler: Option<Sampler>,
    ) {
        let x_start = left.x.ceil() as i32;
        let x_end = right.x.ceil() as i32;
        if x_end <= x_start {
            return;
        }

        let width = right.x - left.x;
        let rate = left.gradient(right, width.max(EPSILON));

        // Clip against the region, starting at the interpolated values there
        let first = x_start.max(self.clip.min_x);
        let end = x_end.min(self.clip.max_x + 1);
        if first >= end {
            return;
        }
        let mut fragment = left.advanced(&rate, first as f32 - left.x);

        match sampler {
            None if left.color == right.color => {
                let color = left.color;
                for x in first..end {
                    self.plot(x, y, fragment.z, color);
                    fragment.z += rate.z;
                }
            }
            None => {
                for x in first..end {
                    self.plot(x, y, fragment.z, fragment.color);
                    fragment = fragment.advanced(&rate, 1.0);
                }
            }
            Some(Sampler { texture, filter }) => {
                for x in first..end {
                    let texel = texture.sample(fragment.uv.x, fragment.uv.y, filter);
                    self.plot(x, y, fragment.z, Color::modulated(texel, fragment.color));
                    fragment = fragment.advanced(&rate, 1.0);
                }
            }
        }
    }
}
