//! The per-frame polygon pipeline.
//!
//! A [`RenderList`] holds working copies of every polygon that survives
//! object culling, and walks them through the pipeline in a fixed order:
//!
//! 1. [`RenderList::add_object`]: cull, transform to world, copy polygons
//! 2. [`RenderList::check_backface`]: reset state, recompute normals, flag
//!    polygons facing away from the camera
//! 3. [`RenderList::transform_world_to_camera`]
//! 4. [`RenderList::clip_polygons`]: reject and split against the frustum
//! 5. [`RenderList::calculate_lighting`]
//! 6. [`RenderList::sort`]: painter's order, farthest first
//! 7. [`RenderList::transform_camera_to_perspective`]
//! 8. [`RenderList::transform_perspective_to_screen`]
//! 9. [`RenderList::render_solid`] or [`RenderList::render_wire`]
//!
//! Steps 2 to 8 are run together by [`RenderList::pre_render`]. Each stage
//! relies on the previous one having run: clipping needs camera space,
//! projection needs every vertex in front of the near plane.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::clipper::{ClipOutcome, ClipVolume};
use crate::colors::Color;
use crate::light::Light;
use crate::material::ShadeMode;
use crate::math::{Mat4, Vec4};
use crate::object::GameObject;
use crate::polygon::Polygon;
use crate::render::rasterizer::{RasterVertex, Rasterizer};
use crate::vertex::Vertex;

const EPSILON: f32 = 1e-6;

/// Depth key used to order polygons back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortMethod {
    /// Mean camera-space Z of the three vertices
    #[default]
    AverageZ,
    /// Nearest vertex
    NearZ,
    /// Farthest vertex
    FarZ,
}

/// Counters for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub objects_added: usize,
    pub objects_culled: usize,
    pub polygons_added: usize,
    pub backfaces: usize,
    pub clipped: usize,
    pub trimmed: usize,
    pub split: usize,
}

#[derive(Debug, Clone)]
pub struct RenderList {
    polygons: Vec<Polygon>,
    pub backface_culling: bool,
    pub sort_method: SortMethod,
    stats: FrameStats,
}

impl Default for RenderList {
    fn default() -> Self {
        Self {
            polygons: Vec::new(),
            backface_culling: true,
            sort_method: SortMethod::AverageZ,
            stats: FrameStats::default(),
        }
    }
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Discards every polygon and counter. Call at the start of each frame.
    pub fn reset(&mut self) {
        self.polygons.clear();
        self.stats = FrameStats::default();
    }

    fn enabled_mut(&mut self) -> impl Iterator<Item = &mut Polygon> {
        self.polygons.iter_mut().filter(|p| p.is_enabled())
    }

    // =========================================================================
    // Stage 1: Insertion
    // =========================================================================

    /// Culls the object, brings it to world space and copies its enabled
    /// polygons into the list.
    ///
    /// The object's per-frame culled flag is reset first. Positions and
    /// normals come from the freshly transformed vertices, texture
    /// coordinates and colors from the polygon's own source vertices. With
    /// `use_object_material` every polygon takes the object's material
    /// instead of its own.
    ///
    /// Returns false when the object was disabled or culled.
    pub fn add_object(
        &mut self,
        object: &mut GameObject,
        camera: &Camera,
        use_object_material: bool,
    ) -> bool {
        object.reset();
        if !object.is_enabled() {
            return false;
        }
        if camera.cull_object(object) {
            self.stats.objects_culled += 1;
            return false;
        }
        object.transform_model_to_world();

        let transformed = object.transformed_vertices();
        let before = self.polygons.len();
        for poly in object.polygons().iter().filter(|p| p.is_enabled()) {
            let mut vertices = [Vertex::default(); 3];
            for (slot, (source, &index)) in poly.vertices.iter().zip(&poly.indices).enumerate() {
                let world = &transformed[index];
                vertices[slot] = Vertex {
                    position: world.position,
                    normal: world.normal,
                    uv: source.uv,
                    color: source.color,
                    ..Default::default()
                };
            }
            let material = if use_object_material {
                Arc::clone(&object.material)
            } else {
                Arc::clone(&poly.material)
            };
            self.polygons.push(Polygon::new(poly.indices, vertices, material));
        }

        self.stats.objects_added += 1;
        self.stats.polygons_added += self.polygons.len() - before;
        log::trace!(
            "Added object {:?}: {} polygons",
            object.name(),
            self.polygons.len() - before
        );
        true
    }

    // =========================================================================
    // Stage 2: Back-face culling (world space)
    // =========================================================================

    /// Resets every polygon's state, recomputes its face normal and, when
    /// back-face culling is on, flags polygons whose front side is turned
    /// away from `camera_position`.
    pub fn check_backface(&mut self, camera_position: Vec4) {
        let culling = self.backface_culling;
        let mut backfaces = 0;
        for poly in &mut self.polygons {
            poly.state.reset();
            let normal = poly.compute_normal();
            if !culling {
                continue;
            }
            let to_camera = camera_position - poly.vertices[0].position;
            if to_camera.dot(normal) <= 0.0 {
                poly.state.backface = true;
                backfaces += 1;
            }
        }
        self.stats.backfaces = backfaces;
    }

    // =========================================================================
    // Stage 3: World -> camera
    // =========================================================================

    pub fn transform_world_to_camera(&mut self, view: &Mat4) {
        for poly in self.enabled_mut() {
            for vertex in &mut poly.vertices {
                vertex.position = *view * vertex.position;
                vertex.normal = *view * vertex.normal;
            }
        }
    }

    // =========================================================================
    // Stage 4: Clipping (camera space)
    // =========================================================================

    /// Rejects polygons entirely outside the frustum and clips the rest
    /// against the near plane. Polygons split in two append their second
    /// half to the list; appended halves are already clipped and are not
    /// visited again.
    pub fn clip_polygons(&mut self, camera: &Camera) {
        let volume = ClipVolume::from_camera(camera);
        let count = self.polygons.len();
        for i in 0..count {
            if !self.polygons[i].is_enabled() {
                continue;
            }
            match volume.clip(&mut self.polygons[i]) {
                ClipOutcome::Inside => {}
                ClipOutcome::Rejected => self.stats.clipped += 1,
                ClipOutcome::Trimmed => self.stats.trimmed += 1,
                ClipOutcome::Split(second) => {
                    self.stats.split += 1;
                    self.polygons.push(second);
                }
            }
        }
    }

    // =========================================================================
    // Stage 5: Lighting (camera space)
    // =========================================================================

    /// Shades every enabled polygon according to its material.
    ///
    /// Lights are given in world space and brought into camera space with
    /// `view`. Phong materials are shaded per vertex like Gouraud ones.
    pub fn calculate_lighting(&mut self, lights: &[Light], view: &Mat4) {
        let lights: Vec<Light> = lights
            .iter()
            .filter(|l| l.is_on())
            .map(|l| l.to_camera_space(view))
            .collect();

        for poly in self.enabled_mut() {
            let material = Arc::clone(&poly.material);
            let base = material.color;
            let unlit = Color::new(0.0, 0.0, 0.0, base.a);

            match material.mode {
                ShadeMode::Null => continue,
                ShadeMode::Constant => {
                    for vertex in &mut poly.vertices {
                        vertex.color = base;
                    }
                }
                ShadeMode::Flat => {
                    let normal = poly.compute_normal();
                    let position = poly.vertices[0].position;
                    let mut color = unlit;
                    for light in &lights {
                        light.contribute(&mut color, normal, position, base);
                    }
                    for vertex in &mut poly.vertices {
                        vertex.color = color;
                    }
                }
                ShadeMode::Gouraud | ShadeMode::Phong => {
                    let face = poly.compute_normal();
                    for vertex in &mut poly.vertices {
                        let normal = if vertex.normal.is_zero() {
                            face
                        } else {
                            vertex.normal.normalize()
                        };
                        let mut color = unlit;
                        for light in &lights {
                            light.contribute(&mut color, normal, vertex.position, base);
                        }
                        vertex.color = color;
                    }
                }
            }
            poly.state.lit = true;
        }
    }

    // =========================================================================
    // Stage 6: Painter's sort
    // =========================================================================

    /// Orders polygons farthest first by the configured depth key.
    pub fn sort(&mut self) {
        let key: fn(&Polygon) -> f32 = match self.sort_method {
            SortMethod::AverageZ => Polygon::average_z,
            SortMethod::NearZ => Polygon::min_z,
            SortMethod::FarZ => Polygon::max_z,
        };
        self.polygons.sort_by(|a, b| key(b).total_cmp(&key(a)));
    }

    // =========================================================================
    // Stages 7-8: Projection
    // =========================================================================

    /// Projects x and y onto the view plane. Y is scaled by the aspect ratio
    /// so both land in [-1, 1]. Z keeps its camera-space value.
    pub fn transform_camera_to_perspective(&mut self, camera: &Camera) {
        let view_dist = camera.view_dist();
        let aspect = camera.aspect();
        for poly in self.enabled_mut() {
            for vertex in &mut poly.vertices {
                let p = &mut vertex.position;
                if p.z <= EPSILON {
                    continue;
                }
                p.x = view_dist * p.x / p.z;
                p.y = view_dist * p.y * aspect / p.z;
            }
        }
    }

    /// Maps [-1, 1] onto pixel coordinates, flipping Y so it grows downward.
    pub fn transform_perspective_to_screen(&mut self, camera: &Camera) {
        let alpha = 0.5 * camera.viewport_width() as f32 - 0.5;
        let beta = 0.5 * camera.viewport_height() as f32 - 0.5;
        for poly in self.enabled_mut() {
            for vertex in &mut poly.vertices {
                vertex.position.x = alpha + alpha * vertex.position.x;
                vertex.position.y = beta - beta * vertex.position.y;
            }
        }
    }

    /// Runs back-face culling through screen projection, in order, for the
    /// polygons already added this frame.
    pub fn pre_render(&mut self, camera: &Camera, lights: &[Light]) {
        let view = camera.view_matrix();
        self.check_backface(camera.position());
        self.transform_world_to_camera(&view);
        self.clip_polygons(camera);
        self.calculate_lighting(lights, &view);
        self.sort();
        self.transform_camera_to_perspective(camera);
        self.transform_perspective_to_screen(camera);

        let s = self.stats;
        log::debug!(
            "Frame: {} objects ({} culled), {} polygons, {} back-faced, {} clipped, {} trimmed, {} split",
            s.objects_added,
            s.objects_culled,
            self.polygons.len(),
            s.backfaces,
            s.clipped,
            s.trimmed,
            s.split
        );
    }

    // =========================================================================
    // Stage 9: Rasterization
    // =========================================================================

    /// Fills every enabled polygon, textured when its material carries a
    /// texture. Returns the number of polygons handed to the rasterizer.
    pub fn render_solid(&self, rasterizer: &mut Rasterizer) -> usize {
        let mut drawn = 0;
        for poly in self.polygons.iter().filter(|p| p.is_enabled()) {
            let vertices = poly.vertices.map(|v| {
                let depth = if v.position.z > EPSILON {
                    1.0 / v.position.z
                } else {
                    0.0
                };
                RasterVertex::new(v.position.x, v.position.y, depth, v.color).with_uv(v.uv)
            });
            match &poly.material.texture {
                Some(texture) => rasterizer.draw_textured_triangle(
                    vertices,
                    texture,
                    poly.material.texture_filter,
                ),
                None => rasterizer.draw_triangle(vertices),
            }
            drawn += 1;
        }
        log::debug!("Rendered {} solid polygons", drawn);
        drawn
    }

    /// Outlines every enabled polygon in its material color. Returns the
    /// number of polygons drawn.
    pub fn render_wire(&self, rasterizer: &mut Rasterizer) -> usize {
        let mut drawn = 0;
        for poly in self.polygons.iter().filter(|p| p.is_enabled()) {
            let points = poly
                .vertices
                .map(|v| (v.position.x.round() as i32, v.position.y.round() as i32));
            let color = poly.material.color;
            for i in 0..3 {
                let (x0, y0) = points[i];
                let (x1, y1) = points[(i + 1) % 3];
                rasterizer.draw_line(x0, y0, x1, y1, color);
            }
            drawn += 1;
        }
        log::debug!("Rendered {} wire polygons", drawn);
        drawn
    }
}
