//! Scene objects.
//!
//! A [`GameObject`] keeps two parallel vertex arrays sharing the same
//! indices: `local` is the immutable reference pose loaded from the asset,
//! `transformed` is recomputed from it by
//! [`GameObject::transform_model_to_world`]. That call is the only way the
//! transformed array is brought back in sync and must run every frame before
//! the object's polygons are read.

use std::sync::Arc;

use crate::colors::Color;
use crate::error::RenderError;
use crate::material::{Material, ShadeMode};
use crate::math::{Vec2, Vec4};
use crate::polygon::Polygon;
use crate::transform::Transform;
use crate::vertex::Vertex;

/// Per-frame visibility state of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectState {
    pub active: bool,
    pub visible: bool,
    pub culled: bool,
}

impl Default for ObjectState {
    fn default() -> Self {
        Self {
            active: true,
            visible: true,
            culled: false,
        }
    }
}

/// A named triangle mesh placed in the world by its [`Transform`].
#[derive(Debug, Clone)]
pub struct GameObject {
    name: String,
    transform: Transform,
    local: Vec<Vertex>,
    transformed: Vec<Vertex>,
    polygons: Vec<Polygon>,
    /// Object-wide material, used instead of the per-polygon ones when the
    /// object is inserted with `use_object_material`.
    pub material: Arc<Material>,
    average_radius: f32,
    max_radius: f32,
    pub state: ObjectState,
}

impl GameObject {
    /// Create a new empty object with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            local: Vec::new(),
            transformed: Vec::new(),
            polygons: Vec::new(),
            material: Arc::new(Material::default()),
            average_radius: 0.0,
            max_radius: 0.0,
            state: ObjectState::default(),
        }
    }

    /// Name from the asset file or constructor.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scale, rotation and world position.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable transform; call [`GameObject::transform_model_to_world`] after
    /// changing it.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Vertices in model space, as loaded.
    pub fn local_vertices(&self) -> &[Vertex] {
        &self.local
    }

    /// World-space positions and normals from the last
    /// [`GameObject::transform_model_to_world`].
    pub fn transformed_vertices(&self) -> &[Vertex] {
        &self.transformed
    }

    /// Triangles with their own copies of the local vertices.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Mutable triangles, for per-polygon material or state changes.
    pub fn polygons_mut(&mut self) -> &mut [Polygon] {
        &mut self.polygons
    }

    /// Mean distance of the scaled vertices from the origin.
    pub fn average_radius(&self) -> f32 {
        self.average_radius
    }

    /// Bounding sphere radius used for culling.
    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }

    // ============ Construction ============

    /// Appends a vertex to the local pose and returns its index.
    ///
    /// The transformed array receives an independent copy holding only the
    /// position and normal.
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        self.transformed.push(vertex.geometry_copy());
        self.local.push(vertex);
        self.local.len() - 1
    }

    /// Adds a triangle over three local vertices, copying them into the
    /// polygon.
    pub fn add_polygon(
        &mut self,
        indices: [usize; 3],
        material: Arc<Material>,
    ) -> Result<(), RenderError> {
        let vertices = self.fetch_local(indices)?;
        self.polygons.push(Polygon::new(indices, vertices, material));
        Ok(())
    }

    fn fetch_local(&self, indices: [usize; 3]) -> Result<[Vertex; 3], RenderError> {
        let count = self.local.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= count) {
            return Err(RenderError::InvalidVertexIndex { index, count });
        }
        Ok(indices.map(|i| self.local[i]))
    }

    /// Sets scale, Euler rotation (degrees) and world position together.
    ///
    /// Neither the transformed vertices nor the radius are recomputed here;
    /// call [`GameObject::transform_model_to_world`] and
    /// [`GameObject::calculate_radius`] afterwards.
    pub fn set_transform(&mut self, scale: f32, rotation: [f32; 3], position: Vec4) {
        self.transform
            .set_scale(scale)
            .set_rotation(rotation[0], rotation[1], rotation[2])
            .set_position(position);
    }

    /// Moves the object's origin in world space.
    pub fn set_world_position(&mut self, position: Vec4) {
        self.transform.set_position(position);
    }

    /// Sets the rotation as Euler angles in degrees.
    pub fn set_euler_rotation(&mut self, x: f32, y: f32, z: f32) {
        self.transform.set_rotation(x, y, z);
    }

    // ============ Per-frame ============

    /// Active, visible and not culled.
    pub fn is_enabled(&self) -> bool {
        self.state.active && self.state.visible && !self.state.culled
    }

    /// Clears the transient culled flag. Call once per frame before culling.
    pub fn reset(&mut self) {
        self.state.culled = false;
    }

    /// Recomputes every transformed vertex from the local pose:
    /// scale, then rotate, then translate.
    pub fn transform_model_to_world(&mut self) {
        let world = self.transform.to_matrix();
        let rotation = self.transform.rotation_matrix();
        for (local, transformed) in self.local.iter().zip(self.transformed.iter_mut()) {
            transformed.position = world * local.position;
            transformed.normal = rotation * local.normal;
        }
    }

    /// Computes the average and maximum bounding radius of the scaled local
    /// vertices, as linear distances from the object origin.
    ///
    /// The object must have at least one vertex.
    pub fn calculate_radius(&mut self) {
        debug_assert!(!self.local.is_empty(), "radius of an object without vertices");
        let scale = self.transform.scale().abs();
        let mut sum = 0.0;
        let mut max = 0.0f32;
        for v in &self.local {
            let d = v.position.magnitude() * scale;
            sum += d;
            max = max.max(d);
        }
        self.average_radius = sum / self.local.len() as f32;
        self.max_radius = max;
    }

    /// Sets every vertex normal to the normalized sum of the face normals
    /// touching it. Used when an asset carries no normals of its own.
    pub fn compute_vertex_normals(&mut self) {
        let mut sums = vec![Vec4::direction(0.0, 0.0, 0.0); self.local.len()];
        for poly in &self.polygons {
            let n = poly.face_normal();
            for &i in &poly.indices {
                sums[i] = sums[i] + n;
            }
        }
        for (i, sum) in sums.into_iter().enumerate() {
            let normal = sum.normalize().as_direction();
            self.local[i].normal = normal;
            self.transformed[i].normal = normal;
        }
        for poly in &mut self.polygons {
            for (vertex, &i) in poly.vertices.iter_mut().zip(poly.indices.iter()) {
                vertex.normal = self.local[i].normal;
            }
        }
    }

    // ============ Primitives ============

    /// An axis-aligned cube centered on the origin: 8 vertices, 12 triangles
    /// wound so that every face normal points outward.
    pub fn cube(name: impl Into<String>, half_size: f32, color: Color) -> Self {
        const CORNERS: [[f32; 3]; 8] = [
            [-1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [1.0, 1.0, -1.0],
            [1.0, -1.0, -1.0],
            [1.0, 1.0, 1.0],
            [1.0, -1.0, 1.0],
            [-1.0, 1.0, 1.0],
            [-1.0, -1.0, 1.0],
        ];
        // Each quad as (bottom-left, top-left, top-right, bottom-right)
        const QUADS: [[usize; 4]; 6] = [
            [0, 1, 2, 3], // front (-Z)
            [3, 2, 4, 5], // right
            [5, 4, 6, 7], // back
            [7, 6, 1, 0], // left
            [1, 6, 4, 2], // top
            [5, 7, 0, 3], // bottom
        ];
        let uv = [
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
        ];

        let mut cube = Self::new(name);
        cube.material = Arc::new(Material::new(ShadeMode::Flat, color));
        for [x, y, z] in CORNERS {
            cube.add_vertex(Vertex::new(Vec4::point(
                x * half_size,
                y * half_size,
                z * half_size,
            )));
        }
        for [a, b, c, d] in QUADS {
            let material = Arc::clone(&cube.material);
            let first = cube.quad_half([a, b, c], [uv[0], uv[1], uv[2]], &material);
            let second = cube.quad_half([a, c, d], [uv[0], uv[2], uv[3]], &material);
            cube.polygons.push(first);
            cube.polygons.push(second);
        }
        cube.compute_vertex_normals();
        cube.calculate_radius();
        cube
    }

    fn quad_half(&self, indices: [usize; 3], uvs: [Vec2; 3], material: &Arc<Material>) -> Polygon {
        let mut vertices = indices.map(|i| self.local[i]);
        for (vertex, uv) in vertices.iter_mut().zip(uvs) {
            vertex.uv = uv;
        }
        Polygon::new(indices, vertices, Arc::clone(material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Mat4;
    use approx::assert_relative_eq;

    fn triangle_object() -> GameObject {
        let mut obj = GameObject::new("tri");
        obj.add_vertex(Vertex::new(Vec4::point(0.0, 0.0, 0.0)));
        obj.add_vertex(Vertex::new(Vec4::point(0.0, 1.0, 0.0)));
        obj.add_vertex(Vertex::new(Vec4::point(1.0, 0.0, 0.0)));
        obj.add_polygon([0, 1, 2], Arc::new(Material::default()))
            .expect("indices are valid");
        obj
    }

    #[test]
    fn add_polygon_rejects_bad_indices() {
        let mut obj = triangle_object();
        let err = obj
            .add_polygon([0, 1, 7], Arc::new(Material::default()))
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidVertexIndex { index: 7, count: 3 }
        ));
    }

    #[test]
    fn model_to_world_scales_rotates_then_translates() {
        let mut obj = triangle_object();
        obj.set_transform(2.0, [0.0, 90.0, 0.0], Vec4::point(0.0, 0.0, 100.0));
        obj.transform_model_to_world();

        // Local (1,0,0) -> scaled (2,0,0) -> rotated about Y -> moved to z=100
        let expected = Mat4::rotation_y(90.0f32.to_radians()) * Vec4::point(2.0, 0.0, 0.0);
        let p = obj.transformed_vertices()[2].position;
        assert_relative_eq!(p.x, expected.x, epsilon = 1e-4);
        assert_relative_eq!(p.z, expected.z + 100.0, epsilon = 1e-4);
        // The local pose is untouched
        assert_eq!(obj.local_vertices()[2].position, Vec4::point(1.0, 0.0, 0.0));
    }

    #[test]
    fn transform_is_recomputed_from_local_every_time() {
        let mut obj = triangle_object();
        obj.set_world_position(Vec4::point(0.0, 0.0, 10.0));
        obj.transform_model_to_world();
        obj.transform_model_to_world();
        assert_eq!(
            obj.transformed_vertices()[0].position,
            Vec4::point(0.0, 0.0, 10.0)
        );
    }

    #[test]
    fn radius_uses_scaled_linear_distance() {
        let mut obj = GameObject::new("r");
        obj.add_vertex(Vertex::new(Vec4::point(3.0, 4.0, 0.0)));
        obj.add_vertex(Vertex::new(Vec4::point(1.0, 0.0, 0.0)));
        obj.set_transform(2.0, [0.0; 3], Vec4::point(0.0, 0.0, 0.0));
        obj.calculate_radius();
        assert_relative_eq!(obj.max_radius(), 10.0);
        assert_relative_eq!(obj.average_radius(), 6.0);
    }

    #[test]
    fn reset_clears_culled_only() {
        let mut obj = triangle_object();
        obj.state.culled = true;
        assert!(!obj.is_enabled());
        obj.reset();
        assert!(obj.is_enabled());
        obj.state.visible = false;
        obj.reset();
        assert!(!obj.is_enabled());
    }

    #[test]
    fn cube_faces_point_outward() {
        let cube = GameObject::cube("cube", 1.0, Color::WHITE);
        assert_eq!(cube.local_vertices().len(), 8);
        assert_eq!(cube.polygons().len(), 12);
        for poly in cube.polygons() {
            let n = poly.face_normal();
            let centroid = poly
                .vertices
                .iter()
                .fold(Vec4::direction(0.0, 0.0, 0.0), |acc, v| acc + v.position.as_direction());
            assert!(n.dot(centroid) > 0.0, "inward face {:?}", poly.indices);
        }
    }

    #[test]
    fn vertex_normals_are_unit_length() {
        let cube = GameObject::cube("cube", 1.0, Color::WHITE);
        for v in cube.local_vertices() {
            assert_relative_eq!(v.normal.magnitude(), 1.0, epsilon = 1e-5);
            assert_eq!(v.normal.w, 0.0);
        }
    }

    #[test]
    fn cube_face_uvs_belong_to_the_polygon() {
        let cube = GameObject::cube("cube", 1.0, Color::WHITE);
        // Front face, first half: bottom-left, top-left, top-right
        let front = &cube.polygons()[0];
        assert_eq!(front.vertices[0].position, Vec4::point(-1.0, -1.0, -1.0));
        assert_eq!(front.vertices[0].uv, Vec2::new(0.0, 1.0));
        assert_eq!(front.vertices[2].uv, Vec2::new(1.0, 0.0));
        // Corner 1 is top-left on the front face but bottom-left on the top
        assert_eq!(front.indices[1], 1);
        assert_eq!(front.vertices[1].uv, Vec2::new(0.0, 0.0));
        let top = &cube.polygons()[8];
        assert_eq!(top.indices[0], 1);
        assert_eq!(top.vertices[0].uv, Vec2::new(0.0, 1.0));
        // Shared vertices keep no coordinates of their own
        assert!(cube.local_vertices().iter().all(|v| v.uv == Vec2::ZERO));
    }

    #[test]
    fn transform_accessors_drive_model_to_world() {
        let mut obj = triangle_object();
        obj.set_euler_rotation(0.0, 0.0, 90.0);
        obj.transform_mut().set_position_xyz(0.0, 0.0, 5.0);
        obj.transform_model_to_world();

        // (1,0,0) turned a quarter about Z lands on the Y axis
        let p = obj.transformed_vertices()[2].position;
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.y.abs(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, 5.0, epsilon = 1e-5);
        assert_eq!(obj.transform().position(), Vec4::point(0.0, 0.0, 5.0));
    }

    #[test]
    fn cube_comes_with_its_radius() {
        let cube = GameObject::cube("cube", 2.0, Color::RED);
        assert_relative_eq!(cube.max_radius(), 12.0f32.sqrt(), epsilon = 1e-5);
        assert_eq!(cube.material.color, Color::RED);
    }
}
