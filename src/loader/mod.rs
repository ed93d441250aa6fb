//! Scene asset readers.
//!
//! - [`plg`]: the plain-text PLG polygon format
//! - [`obj`]: Wavefront OBJ, through `tobj`
//!
//! Both produce ready-to-cull [`GameObject`]s: vertex normals are filled in
//! when the source has none and the bounding radius is computed.

pub mod obj;
pub mod plg;

use std::sync::Arc;

use crate::material::Material;
use crate::object::GameObject;
use crate::vertex::{Vertex, VertexAdjust};

pub use obj::load_obj;
pub use plg::{load_plg, parse_plg};

/// Options shared by every reader.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Material given to every loaded polygon and to the object itself.
    pub material: Arc<Material>,
    /// Axis fix-ups applied in order to every vertex position.
    pub adjust: Vec<VertexAdjust>,
}

impl LoadOptions {
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Arc::new(material);
        self
    }

    pub fn with_adjust(mut self, adjust: VertexAdjust) -> Self {
        self.adjust.push(adjust);
        self
    }

    fn apply(&self, vertex: &mut Vertex) {
        for &adjust in &self.adjust {
            vertex.adjust(adjust);
        }
    }
}

/// Last step of every reader.
fn finish(object: &mut GameObject, has_normals: bool) {
    if !has_normals {
        object.compute_vertex_normals();
    }
    if !object.local_vertices().is_empty() {
        object.calculate_radius();
    }
    log::info!(
        "Loaded {:?}: {} vertices, {} polygons",
        object.name(),
        object.local_vertices().len(),
        object.polygons().len()
    );
}
