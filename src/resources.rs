//! Asset import helpers. Only OBJ for now; other formats go through the
//! same [`Mesh`] descriptors once converted.

use std::path::Path;
use std::rc::Rc;

use anyhow::Context;

use crate::hash64;
use crate::math::{Float2, Float3};
use crate::scene::material::Material;
use crate::scene::mesh::{Mesh, MeshSurface, Vertex};

/// Loads an OBJ file into mesh descriptors, one mesh per model in the file.
///
/// Each mesh carries a single surface with `material` attached (the OBJ's
/// own .mtl materials are ignored; Remix materials are richer than what
/// .mtl can express) and a freshly generated identity hash. The caller
/// registers the returned meshes with the session before drawing them.
pub fn load_obj(path: &Path, material: Option<Rc<Material>>) -> anyhow::Result<Vec<Mesh>> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .with_context(|| format!("failed to load OBJ file {}", path.display()))?;
    log::debug!("loaded {} models from {}", models.len(), path.display());

    models
        .into_iter()
        .map(|m| {
            let vertices = (0..m.mesh.positions.len() / 3)
                .map(|i| Vertex {
                    position: Float3::new(
                        m.mesh.positions[i * 3],
                        m.mesh.positions[i * 3 + 1],
                        m.mesh.positions[i * 3 + 2],
                    ),
                    normal: Float3::new(
                        m.mesh.normals.get(i * 3).map_or(0.0, |f| *f),
                        m.mesh.normals.get(i * 3 + 1).map_or(0.0, |f| *f),
                        m.mesh.normals.get(i * 3 + 2).map_or(1.0, |f| *f),
                    ),
                    texcoord: Float2::new(
                        m.mesh.texcoords.get(i * 2).map_or(0.0, |f| *f),
                        1.0 - m.mesh.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f),
                    ),
                    ..Vertex::default()
                })
                .collect::<Vec<_>>();

            let surface = MeshSurface::new(vertices, m.mesh.indices, None, material.clone())
                .with_context(|| format!("model {:?} in {}", m.name, path.display()))?;
            Ok(Mesh::new(vec![surface], hash64()))
        })
        .collect()
}
