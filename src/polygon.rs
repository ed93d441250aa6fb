//! Triangular polygons and their per-frame pipeline state.

use std::sync::Arc;

use crate::material::Material;
use crate::math::Vec4;
use crate::vertex::Vertex;

/// Per-frame pipeline state of a polygon.
///
/// Reset to the active baseline once per frame before the back-face and
/// clipping stages re-derive the other flags, so nothing carries over from
/// the previous frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolyState {
    pub active: bool,
    pub clipped: bool,
    pub backface: bool,
    pub lit: bool,
}

impl Default for PolyState {
    fn default() -> Self {
        Self {
            active: true,
            clipped: false,
            backface: false,
            lit: false,
        }
    }
}

impl PolyState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A triangle.
///
/// `vertices` are owned copies. For a polygon stored on a
/// [`GameObject`](crate::object::GameObject) they are the local-space source
/// vertices (carrying texture coordinates); for a polygon in the render list
/// they are the working copies the pipeline transforms in place.
/// `indices` map each slot to the owning object's vertex arrays. A vertex made
/// by near-plane clipping has no source vertex; its slot holds
/// [`Polygon::NO_SOURCE`].
#[derive(Debug, Clone)]
pub struct Polygon {
    pub indices: [usize; 3],
    pub vertices: [Vertex; 3],
    /// Unit face normal, valid only after [`Polygon::compute_normal`] ran on
    /// the current vertex positions.
    pub normal: Vec4,
    pub state: PolyState,
    pub material: Arc<Material>,
}

impl Polygon {
    /// Index of a vertex that was not read from the owning object.
    pub const NO_SOURCE: usize = usize::MAX;

    pub fn new(indices: [usize; 3], vertices: [Vertex; 3], material: Arc<Material>) -> Self {
        Self {
            indices,
            vertices,
            normal: Vec4::direction(0.0, 0.0, 0.0),
            state: PolyState::default(),
            material,
        }
    }

    /// A free-standing triangle not tied to an object's vertex arrays.
    pub fn from_vertices(vertices: [Vertex; 3], material: Arc<Material>) -> Self {
        Self::new([0, 1, 2], vertices, material)
    }

    /// Active, not clipped and not back-facing.
    pub fn is_enabled(&self) -> bool {
        self.state.active && !self.state.clipped && !self.state.backface
    }

    /// Unit normal of the current vertex positions: `(v1 - v0) x (v2 - v0)`.
    pub fn face_normal(&self) -> Vec4 {
        let [v0, v1, v2] = &self.vertices;
        let e1 = v1.position - v0.position;
        let e2 = v2.position - v0.position;
        e1.cross(e2).normalize()
    }

    /// Recomputes and stores the face normal from the current positions.
    pub fn compute_normal(&mut self) -> Vec4 {
        self.normal = self.face_normal();
        self.normal
    }

    pub fn average_z(&self) -> f32 {
        self.vertices.iter().map(|v| v.position.z).sum::<f32>() / 3.0
    }

    pub fn min_z(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.position.z)
            .fold(f32::INFINITY, f32::min)
    }

    pub fn max_z(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.position.z)
            .fold(f32::NEG_INFINITY, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle(points: [[f32; 3]; 3]) -> Polygon {
        Polygon::from_vertices(
            points.map(|p| Vertex::new(Vec4::from(p))),
            Arc::new(Material::default()),
        )
    }

    #[test]
    fn clockwise_triangle_normal_points_toward_negative_z() {
        let mut poly = triangle([[0.0, 0.0, 5.0], [0.0, 1.0, 5.0], [1.0, 0.0, 5.0]]);
        let n = poly.compute_normal();
        assert_relative_eq!(n.z, -1.0, epsilon = 1e-6);
        assert_eq!(poly.normal, n);
    }

    #[test]
    fn enabled_only_when_active_and_not_culled() {
        let mut poly = triangle([[0.0; 3], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]);
        assert!(poly.is_enabled());
        poly.state.backface = true;
        assert!(!poly.is_enabled());
        poly.state.reset();
        poly.state.clipped = true;
        assert!(!poly.is_enabled());
        poly.state.reset();
        assert!(poly.is_enabled());
    }

    #[test]
    fn depth_keys() {
        let poly = triangle([[0.0, 0.0, 3.0], [0.0, 1.0, 9.0], [1.0, 0.0, 6.0]]);
        assert_relative_eq!(poly.average_z(), 6.0);
        assert_eq!(poly.min_z(), 3.0);
        assert_eq!(poly.max_z(), 9.0);
    }
}
