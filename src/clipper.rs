//! Camera-space frustum clipping.
//!
//! Vertices are classified against three plane pairs: left/right
//! (`|x| <= z * tan(fov/2)`), bottom/top (`|y| <= z * tan(fov/2) / aspect`)
//! and near/far. A polygon whose three vertices are all beyond the same plane
//! is rejected outright. Only the near plane actually cuts geometry, because
//! the projection divides by z; the side planes are left to the rasterizer's
//! clip region.

use crate::camera::Camera;
use crate::polygon::Polygon;
use crate::vertex::{AxisClip, Vertex};

/// What clipping did to a polygon.
#[derive(Debug)]
pub enum ClipOutcome {
    /// Nothing to clip.
    Inside,
    /// Entirely outside one plane; the polygon is flagged clipped.
    Rejected,
    /// One vertex in front of the near plane: the other two were moved onto
    /// it, leaving a smaller triangle.
    Trimmed,
    /// Two vertices in front of the near plane: the polygon now holds one
    /// half of the clipped quadrilateral and the returned one holds the other.
    Split(Polygon),
}

/// The camera-space clip volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipVolume {
    x_slope: f32,
    y_slope: f32,
    near: f32,
    far: f32,
}

impl ClipVolume {
    pub fn new(x_slope: f32, y_slope: f32, near: f32, far: f32) -> Self {
        Self {
            x_slope,
            y_slope,
            near,
            far,
        }
    }

    pub fn from_camera(camera: &Camera) -> Self {
        let tan = camera.tan_half_fov();
        Self::new(tan, tan / camera.aspect(), camera.near(), camera.far())
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    /// Writes the vertex's clip code.
    pub fn classify(&self, vertex: &mut Vertex) {
        let p = vertex.position;
        let x_limit = p.z * self.x_slope;
        let y_limit = p.z * self.y_slope;
        vertex.clip_code.x = AxisClip::classify(p.x, -x_limit, x_limit);
        vertex.clip_code.y = AxisClip::classify(p.y, -y_limit, y_limit);
        vertex.clip_code.z = AxisClip::classify(p.z, self.near, self.far);
    }

    /// Classifies the polygon's vertices and clips it against the volume.
    pub fn clip(&self, poly: &mut Polygon) -> ClipOutcome {
        for vertex in &mut poly.vertices {
            self.classify(vertex);
        }

        let codes = poly.vertices.map(|v| v.clip_code);
        let rejected = [AxisClip::Greater, AxisClip::Less].into_iter().any(|side| {
            codes.iter().all(|c| c.x == side)
                || codes.iter().all(|c| c.y == side)
                || codes.iter().all(|c| c.z == side)
        });
        if rejected {
            poly.state.clipped = true;
            return ClipOutcome::Rejected;
        }

        let outside: Vec<usize> = (0..3).filter(|&i| codes[i].z == AxisClip::Less).collect();
        match outside.as_slice() {
            [o] => ClipOutcome::Split(self.split_at_near(poly, *o)),
            [a, b] => {
                self.trim_to_near(poly, 3 - a - b);
                ClipOutcome::Trimmed
            }
            _ => ClipOutcome::Inside,
        }
    }

    /// Point where the edge from `inside` to `outside` crosses the near
    /// plane. Every attribute except position and texture coordinate comes
    /// from `outside`.
    fn near_intersection(&self, inside: &Vertex, outside: &Vertex) -> Vertex {
        let z_out = outside.position.z;
        let t = (z_out - self.near) / (z_out - inside.position.z);
        let mut vertex = outside.lerp_toward(inside, t);
        vertex.position.z = self.near;
        self.classify(&mut vertex);
        vertex
    }

    fn trim_to_near(&self, poly: &mut Polygon, keep: usize) {
        let inside = poly.vertices[keep];
        for i in (0..3).filter(|&i| i != keep) {
            poly.vertices[i] = self.near_intersection(&inside, &poly.vertices[i]);
            poly.indices[i] = Polygon::NO_SOURCE;
        }
    }

    /// With `O` the outside vertex and `A`, `B` following it in winding
    /// order, the quad `i1 A B i2` becomes `(i1, A, B)` in place plus a new
    /// `(i1, B, i2)`. Both keep the original winding, and `A`, `B` keep their
    /// source indices.
    fn split_at_near(&self, poly: &mut Polygon, outside: usize) -> Polygon {
        let a = (outside + 1) % 3;
        let b = (outside + 2) % 3;
        let o = poly.vertices[outside];
        let i1 = self.near_intersection(&poly.vertices[a], &o);
        let i2 = self.near_intersection(&poly.vertices[b], &o);

        poly.vertices[outside] = i1;
        poly.indices[outside] = Polygon::NO_SOURCE;

        let mut second = poly.clone();
        second.vertices = [i1, poly.vertices[b], i2];
        second.indices = [Polygon::NO_SOURCE, poly.indices[b], Polygon::NO_SOURCE];
        second
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::math::Vec4;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn volume() -> ClipVolume {
        ClipVolume::new(1.0, 1.0, 1.0, 100.0)
    }

    fn triangle(points: [[f32; 3]; 3]) -> Polygon {
        Polygon::from_vertices(
            points.map(|p| Vertex::new(Vec4::from(p))),
            Arc::new(Material::default()),
        )
    }

    #[test]
    fn classify_each_axis() {
        let mut v = Vertex::new(Vec4::point(6.0, -6.0, 5.0));
        volume().classify(&mut v);
        assert_eq!(v.clip_code.x, AxisClip::Greater);
        assert_eq!(v.clip_code.y, AxisClip::Less);
        assert_eq!(v.clip_code.z, AxisClip::Between);
    }

    #[test]
    fn fully_outside_one_side_is_rejected() {
        let mut poly = triangle([[20.0, 0.0, 10.0], [30.0, 1.0, 10.0], [25.0, 5.0, 12.0]]);
        assert!(matches!(volume().clip(&mut poly), ClipOutcome::Rejected));
        assert!(poly.state.clipped);
        assert!(!poly.is_enabled());

        let mut behind = triangle([[0.0, 0.0, -1.0], [0.0, 1.0, -2.0], [1.0, 0.0, 0.5]]);
        assert!(matches!(volume().clip(&mut behind), ClipOutcome::Rejected));
    }

    #[test]
    fn spanning_left_and_right_is_kept() {
        let mut poly = triangle([[-20.0, 0.0, 10.0], [0.0, 1.0, 10.0], [20.0, 0.0, 10.0]]);
        assert!(matches!(volume().clip(&mut poly), ClipOutcome::Inside));
        assert!(!poly.state.clipped);
    }

    #[test]
    fn one_vertex_inside_trims_in_place() {
        let mut poly = triangle([[0.0, 0.0, 5.0], [-1.0, 0.0, 0.0], [1.0, 0.0, -3.0]]);
        assert!(matches!(volume().clip(&mut poly), ClipOutcome::Trimmed));
        for v in &poly.vertices {
            assert!(v.position.z >= 1.0 - 1e-5);
        }
        // t = (1 - 5) / (0 - 5) along (0,0,5) -> (-1,0,0)
        assert_relative_eq!(poly.vertices[1].position.x, -0.8, epsilon = 1e-5);
        assert_eq!(poly.vertices[0].position, Vec4::point(0.0, 0.0, 5.0));
    }

    #[test]
    fn texture_coordinates_follow_the_cut() {
        let mut poly = triangle([[0.0, 0.0, 3.0], [0.0, 1.0, -1.0], [1.0, 0.0, -1.0]]);
        poly.vertices[0].uv = crate::math::Vec2::new(0.0, 0.0);
        poly.vertices[1].uv = crate::math::Vec2::new(0.0, 1.0);
        volume().clip(&mut poly);
        // Halfway along the edge in z
        assert_relative_eq!(poly.vertices[1].uv.y, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn two_vertices_inside_split_into_two() {
        let mut poly = triangle([[0.0, 0.0, -1.0], [-1.0, 1.0, 5.0], [1.0, 1.0, 5.0]]);
        let winding = poly.face_normal();
        let second = match volume().clip(&mut poly) {
            ClipOutcome::Split(second) => second,
            other => panic!("expected a split, got {:?}", other),
        };
        for v in poly.vertices.iter().chain(second.vertices.iter()) {
            assert!(v.position.z >= 1.0 - 1e-5, "vertex in front of near plane");
        }
        assert_relative_eq!(poly.face_normal().dot(winding), 1.0, epsilon = 1e-4);
        assert_relative_eq!(second.face_normal().dot(winding), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn clipping_marks_made_vertices_as_sourceless() {
        const NONE: usize = Polygon::NO_SOURCE;

        let mut poly = triangle([[0.0, 0.0, -1.0], [-1.0, 1.0, 5.0], [1.0, 1.0, 5.0]]);
        poly.indices = [7, 8, 9];
        let second = match volume().clip(&mut poly) {
            ClipOutcome::Split(second) => second,
            other => panic!("expected a split, got {:?}", other),
        };
        assert_eq!(poly.indices, [NONE, 8, 9]);
        assert_eq!(second.indices, [NONE, 9, NONE]);
        // The kept slot of the new half is the original third vertex
        assert_eq!(second.vertices[1].position, Vec4::point(1.0, 1.0, 5.0));

        let mut trimmed = triangle([[0.0, 0.0, 5.0], [-1.0, 0.0, 0.0], [1.0, 0.0, -3.0]]);
        trimmed.indices = [4, 5, 6];
        volume().clip(&mut trimmed);
        assert_eq!(trimmed.indices, [4, NONE, NONE]);
    }

    #[test]
    fn cut_vertex_keeps_the_outside_normal_and_color() {
        let mut poly = triangle([[0.0, 0.0, 5.0], [-1.0, 0.0, 0.0], [1.0, 0.0, -3.0]]);
        poly.vertices[1].normal = Vec4::direction(0.0, 1.0, 0.0);
        poly.vertices[1].color = crate::colors::Color::RED;
        volume().clip(&mut poly);
        assert_eq!(poly.vertices[1].normal, Vec4::direction(0.0, 1.0, 0.0));
        assert_eq!(poly.vertices[1].color, crate::colors::Color::RED);
        assert_relative_eq!(poly.vertices[1].position.z, 1.0);
    }
}
