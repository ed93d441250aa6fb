//! PLG reader.
//!
//! ```text
//! # comment
//! name num_vertices num_polygons
//! x y z                      (num_vertices lines)
//! descriptor 3 i0 i1 i2      (num_polygons lines, 0-based indices)
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. The descriptor is
//! read but not interpreted.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::{finish, LoadOptions};
use crate::error::RenderError;
use crate::math::Vec4;
use crate::object::GameObject;
use crate::vertex::Vertex;

pub fn load_plg<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<GameObject, RenderError> {
    let text = fs::read_to_string(path)?;
    parse_plg(&text, options)
}

/// Significant lines with their 1-based line numbers.
struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate(),
        }
    }

    fn next_fields(&mut self, what: &str) -> Result<(usize, Vec<&'a str>), RenderError> {
        for (index, line) in self.inner.by_ref() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            return Ok((index + 1, line.split_whitespace().collect()));
        }
        Err(RenderError::Parse {
            line: 0,
            message: format!("unexpected end of file, expected {}", what),
        })
    }
}

fn field<T: FromStr>(fields: &[&str], at: usize, line: usize, what: &str) -> Result<T, RenderError> {
    fields
        .get(at)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| RenderError::Parse {
            line,
            message: format!("expected {} in field {}", what, at + 1),
        })
}

pub fn parse_plg(text: &str, options: &LoadOptions) -> Result<GameObject, RenderError> {
    let mut lines = Lines::new(text);

    let (line, header) = lines.next_fields("object header")?;
    if header.len() != 3 {
        return Err(RenderError::Parse {
            line,
            message: "header must be `name num_vertices num_polygons`".to_string(),
        });
    }
    let num_vertices: usize = field(&header, 1, line, "vertex count")?;
    let num_polygons: usize = field(&header, 2, line, "polygon count")?;

    let mut object = GameObject::new(header[0]);
    object.material = Arc::clone(&options.material);

    for _ in 0..num_vertices {
        let (line, fields) = lines.next_fields("vertex")?;
        let x = field(&fields, 0, line, "x")?;
        let y = field(&fields, 1, line, "y")?;
        let z = field(&fields, 2, line, "z")?;
        let mut vertex = Vertex::new(Vec4::point(x, y, z));
        options.apply(&mut vertex);
        object.add_vertex(vertex);
    }

    for _ in 0..num_polygons {
        let (line, fields) = lines.next_fields("polygon")?;
        let count: usize = field(&fields, 1, line, "vertex count")?;
        if count != 3 {
            return Err(RenderError::Parse {
                line,
                message: format!("only triangles are supported, got {} vertices", count),
            });
        }
        let indices = [
            field(&fields, 2, line, "vertex index")?,
            field(&fields, 3, line, "vertex index")?,
            field(&fields, 4, line, "vertex index")?,
        ];
        object.add_polygon(indices, Arc::clone(&options.material))?;
    }

    finish(&mut object, false);
    Ok(object)
}
