//! Wavefront OBJ reader.
//!
//! Every object or group in the file becomes its own [`GameObject`]. Faces
//! are triangulated and re-indexed by `tobj` so that position, normal and
//! texture coordinate share one index.
//!
//! Materials come from the file's MTL library when it has one:
//!
//! | MTL        | [`Material`]                                   |
//! |------------|------------------------------------------------|
//! | `Kd`, `d`  | `color`, from `[0, 1]` scaled to `[0, 255]`    |
//! | `Ka`, `Ks` | `ka`, `ks` (mean of the three channels)        |
//! | `illum`    | `0` Constant, `1` Flat, `2` and up Phong       |
//! | `map_Kd`   | `texture`, relative to the OBJ file            |
//!
//! Anything the library leaves out is taken from [`LoadOptions::material`],
//! which is also used for faces with no material at all.

use std::path::Path;
use std::sync::Arc;

use super::{finish, LoadOptions};
use crate::colors::Color;
use crate::error::RenderError;
use crate::material::{Material, ShadeMode};
use crate::math::{Vec2, Vec4};
use crate::object::GameObject;
use crate::texture::Texture;
use crate::vertex::Vertex;

pub fn load_obj<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Vec<GameObject>, RenderError> {
    let path = path.as_ref();
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        },
    )?;

    let table = match materials {
        Ok(materials) => {
            let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
            materials
                .iter()
                .map(|m| convert_material(m, base_dir, &options.material).map(Arc::new))
                .collect::<Result<Vec<_>, _>>()?
        }
        Err(e) => {
            log::warn!("No materials for {}: {}", path.display(), e);
            Vec::new()
        }
    };

    // tobj starts a new model whenever the material changes inside an object,
    // so consecutive models with one name are parts of the same object
    let mut objects: Vec<(GameObject, bool)> = Vec::new();
    for model in models {
        let mesh = &model.mesh;
        if mesh.positions.is_empty() {
            log::warn!("Skipping empty OBJ model {:?} in {}", model.name, path.display());
            continue;
        }

        let material = match mesh.material_id.and_then(|id| table.get(id)) {
            Some(material) => Arc::clone(material),
            None => Arc::clone(&options.material),
        };

        let continues_last = matches!(objects.last(), Some((last, _)) if last.name() == model.name);
        if !continues_last {
            let mut object = GameObject::new(model.name.clone());
            object.material = Arc::clone(&material);
            objects.push((object, true));
        }
        let Some((object, has_normals)) = objects.last_mut() else {
            continue;
        };
        *has_normals &= !mesh.normals.is_empty();
        append_mesh(object, mesh, material, options)?;
    }

    Ok(objects
        .into_iter()
        .map(|(mut object, has_normals)| {
            finish(&mut object, has_normals);
            object
        })
        .collect())
}

/// Adds the mesh's vertices after the object's existing ones, and its faces
/// with `material`.
fn append_mesh(
    object: &mut GameObject,
    mesh: &tobj::Mesh,
    material: Arc<Material>,
    options: &LoadOptions,
) -> Result<(), RenderError> {
    let has_normals = !mesh.normals.is_empty();
    let has_uvs = !mesh.texcoords.is_empty();
    let base = object.local_vertices().len();

    for (i, p) in mesh.positions.chunks_exact(3).enumerate() {
        let mut vertex = Vertex::new(Vec4::point(p[0], p[1], p[2]));
        if has_normals {
            let n = &mesh.normals[3 * i..3 * i + 3];
            vertex.normal = Vec4::direction(n[0], n[1], n[2]);
        }
        if has_uvs {
            // OBJ puts v = 0 at the bottom of the image
            let t = &mesh.texcoords[2 * i..2 * i + 2];
            vertex.uv = Vec2::new(t[0], 1.0 - t[1]);
        }
        options.apply(&mut vertex);
        object.add_vertex(vertex);
    }

    for face in mesh.indices.chunks_exact(3) {
        let indices = [
            base + face[0] as usize,
            base + face[1] as usize,
            base + face[2] as usize,
        ];
        object.add_polygon(indices, Arc::clone(&material))?;
    }
    Ok(())
}

fn mean([r, g, b]: [f32; 3]) -> f32 {
    (r + g + b) / 3.0
}

fn convert_material(
    source: &tobj::Material,
    base_dir: &Path,
    fallback: &Material,
) -> Result<Material, RenderError> {
    let alpha = source.dissolve.unwrap_or(fallback.color.a / 255.0);
    let color = match source.diffuse {
        Some([r, g, b]) => Color::from_unit(r, g, b, alpha),
        None => Color::new(fallback.color.r, fallback.color.g, fallback.color.b, alpha * 255.0),
    };
    let mode = match source.illumination_model {
        Some(0) => ShadeMode::Constant,
        Some(1) => ShadeMode::Flat,
        Some(_) => ShadeMode::Phong,
        None => fallback.mode,
    };

    let mut material = Material {
        mode,
        color,
        ka: source.ambient.map_or(fallback.ka, mean),
        kd: source.diffuse.map_or(fallback.kd, mean),
        ks: source.specular.map_or(fallback.ks, mean),
        ..fallback.clone()
    };
    if let Some(file) = &source.diffuse_texture {
        let texture = Texture::from_file(base_dir.join(file))?;
        material.texture = Some(Arc::new(texture));
    }

    log::debug!("OBJ material {:?}: {:?} {:?}", source.name, material.mode, material.color);
    Ok(material)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;
    use std::io::Write;

    fn write_obj(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".obj")
            .tempfile()
            .expect("temp file");
        file.write_all(text.as_bytes()).expect("write");
        file
    }

    #[test]
    fn loads_a_textured_quad_as_two_triangles() {
        let file = write_obj(
            "o quad\n\
             v -1 -1 0\n\
             v 1 -1 0\n\
             v 1 1 0\n\
             v -1 1 0\n\
             vt 0 0\n\
             vt 1 0\n\
             vt 1 1\n\
             vt 0 1\n\
             f 1/1 4/4 3/3 2/2\n",
        );
        let objects = load_obj(file.path(), &LoadOptions::default()).expect("load");
        assert_eq!(objects.len(), 1);

        let quad = &objects[0];
        assert_eq!(quad.name(), "quad");
        assert_eq!(quad.polygons().len(), 2);
        assert_relative_eq!(quad.max_radius(), 2.0f32.sqrt(), epsilon = 1e-5);

        // Bottom-left corner: v flipped so the image top is uv.y = 0
        let corner = quad
            .local_vertices()
            .iter()
            .find(|v| v.position == Vec4::point(-1.0, -1.0, 0.0))
            .expect("corner vertex");
        assert_eq!(corner.uv, Vec2::new(0.0, 1.0));

        // No normals in the file, so they were generated from the faces
        assert!(quad.local_vertices().iter().all(|v| !v.normal.is_zero()));
    }

    #[test]
    fn file_normals_are_kept() {
        let file = write_obj(
            "v 0 0 0\n\
             v 1 0 0\n\
             v 0 1 0\n\
             vn 0 0 -1\n\
             f 1//1 3//1 2//1\n",
        );
        let objects = load_obj(file.path(), &LoadOptions::default()).expect("load");
        let tri = &objects[0];
        for v in tri.local_vertices() {
            assert_eq!(v.normal, Vec4::direction(0.0, 0.0, -1.0));
        }
    }

    #[test]
    fn missing_file_is_an_obj_error() {
        let err = load_obj("/definitely/not/here.obj", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, RenderError::Obj(_)));
    }

    #[test]
    fn mtl_materials_are_applied_per_face() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(
            dir.path().join("scene.mtl"),
            "newmtl red\n\
             Kd 1 0 0\n\
             Ka 0.2 0.2 0.2\n\
             Ks 0.5 0.5 0.5\n\
             d 0.5\n\
             illum 1\n\
             \n\
             newmtl shiny\n\
             Kd 0 0 1\n\
             illum 2\n",
        )
        .expect("write mtl");
        fs::write(
            dir.path().join("scene.obj"),
            "mtllib scene.mtl\n\
             o pair\n\
             v 0 0 0\n\
             v 0 1 0\n\
             v 1 0 0\n\
             v 2 0 0\n\
             v 2 1 0\n\
             v 3 0 0\n\
             usemtl red\n\
             f 1 2 3\n\
             usemtl shiny\n\
             f 4 5 6\n",
        )
        .expect("write obj");

        let objects = load_obj(dir.path().join("scene.obj"), &LoadOptions::default()).expect("load");
        assert_eq!(objects.len(), 1);
        let pair = &objects[0];
        assert_eq!(pair.name(), "pair");
        assert_eq!(pair.polygons().len(), 2);

        let red = &pair.polygons()[0].material;
        assert_eq!(red.color, Color::new(255.0, 0.0, 0.0, 127.5));
        assert_eq!(red.mode, ShadeMode::Flat);
        assert_relative_eq!(red.ka, 0.2, epsilon = 1e-6);
        assert_relative_eq!(red.ks, 0.5, epsilon = 1e-6);
        assert_eq!(pair.material.color, red.color);

        let shiny = &pair.polygons()[1].material;
        assert_eq!(shiny.color, Color::BLUE);
        assert_eq!(shiny.mode, ShadeMode::Phong);

        // The second face indexes the vertices appended after the first face's
        assert_eq!(pair.polygons()[1].vertices[0].position, Vec4::point(2.0, 0.0, 0.0));
    }

    #[test]
    fn mtl_texture_is_loaded_next_to_the_obj() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut img = image::RgbaImage::new(1, 1);
        img.put_pixel(0, 0, image::Rgba([0, 255, 0, 255]));
        img.save(dir.path().join("grass.png")).expect("save png");
        fs::write(dir.path().join("tile.mtl"), "newmtl grass\nmap_Kd grass.png\n").expect("write mtl");
        fs::write(
            dir.path().join("tile.obj"),
            "mtllib tile.mtl\n\
             v 0 0 0\n\
             v 0 1 0\n\
             v 1 0 0\n\
             usemtl grass\n\
             f 1 2 3\n",
        )
        .expect("write obj");

        let options = LoadOptions::default().with_material(Material::new(ShadeMode::Gouraud, Color::GRAY));
        let objects = load_obj(dir.path().join("tile.obj"), &options).expect("load");
        let material = &objects[0].polygons()[0].material;
        let texture = material.texture.as_ref().expect("diffuse map");
        assert_eq!((texture.width(), texture.height()), (1, 1));
        // Unspecified fields come from the load options
        assert_eq!(material.mode, ShadeMode::Gouraud);
        assert_eq!(material.color, Color::GRAY);
    }

    #[test]
    fn faces_without_material_use_the_load_options() {
        let file = write_obj("v 0 0 0\nv 0 1 0\nv 1 0 0\nf 1 2 3\n");
        let options = LoadOptions::default().with_material(Material::new(ShadeMode::Constant, Color::YELLOW));
        let objects = load_obj(file.path(), &options).expect("load");
        let material = &objects[0].polygons()[0].material;
        assert_eq!(material.color, Color::YELLOW);
        assert_eq!(material.mode, ShadeMode::Constant);
    }
}
