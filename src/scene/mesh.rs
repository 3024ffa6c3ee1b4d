//! Asset-level geometry: vertices, surfaces and meshes.
//!
//! A [`Mesh`] is a local descriptor until the session registers it with the
//! engine; only then does it carry a native handle and become usable from a
//! [`crate::scene::MeshInstance`].

use std::cell::Cell;
use std::rc::Rc;

use crate::error::{RemixError, Result};
use crate::ffi::records::{HardcodedVertex, MeshInfo, MeshInfoSurfaceTriangles};
use crate::ffi::{Handle, StructType};
use crate::math::{Float2, Float3};
use crate::scene::material::Material;
use crate::scene::skinning::{RawSkinning, SkinningData};

/// One vertex: position, normal, one UV pair and a packed RGBA color
/// (fully-opaque white by default).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Float3,
    pub normal: Float3,
    pub texcoord: Float2,
    pub color: u32,
}

impl Vertex {
    pub fn new(position: Float3, normal: Float3, texcoord: Float2) -> Self {
        Self {
            position,
            normal,
            texcoord,
            ..Self::default()
        }
    }

    pub fn to_raw(&self) -> HardcodedVertex {
        HardcodedVertex {
            position: self.position.into(),
            normal: self.normal.into(),
            texcoord: [self.texcoord.x, self.texcoord.y],
            color: self.color,
            _pad: [0; 7],
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: Float3::new(0.0, 0.0, 0.0),
            normal: Float3::new(0.0, 0.0, 1.0),
            texcoord: Float2::new(0.0, 0.0),
            color: 0xFFFF_FFFF,
        }
    }
}

/// One surface of a mesh: a vertex/index buffer pair with optional skinning
/// data and an optional material.
///
/// Meshes can have multiple surfaces, e.g. to assign different materials or
/// skinning info within a single asset. Index triples form triangles; the
/// triangulation itself is the engine's concern, not checked here.
#[derive(Debug, Clone)]
pub struct MeshSurface {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    skinning: Option<SkinningData>,
    material: Option<Rc<Material>>,
}

impl MeshSurface {
    /// Builds a surface, validating its cross-references.
    ///
    /// Fails with [`RemixError::WrongSkinningDataCount`] when the skinning
    /// buffers don't describe exactly one weight tuple per vertex, and with
    /// [`RemixError::ResourceNotInitialized`] when `material` has not been
    /// registered yet.
    pub fn new(
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        skinning: Option<SkinningData>,
        material: Option<Rc<Material>>,
    ) -> Result<Self> {
        let surface = Self {
            vertices,
            indices,
            skinning,
            material,
        };
        surface.check()?;
        Ok(surface)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn skinning(&self) -> Option<&SkinningData> {
        self.skinning.as_ref()
    }

    pub fn material(&self) -> Option<&Rc<Material>> {
        self.material.as_ref()
    }

    // Re-run at bake time as well: the material can be destroyed between
    // construction and serialization.
    fn check(&self) -> Result<()> {
        if let Some(skinning) = &self.skinning
            && skinning.vertex_count() != self.vertices.len()
        {
            return Err(RemixError::WrongSkinningDataCount {
                expected: self.vertices.len(),
                actual: skinning.vertex_count(),
            });
        }
        if let Some(material) = &self.material
            && material.handle().is_null()
        {
            return Err(RemixError::ResourceNotInitialized(
                "MeshSurface material has a null handle; was create_material called?",
            ));
        }
        Ok(())
    }

    pub(crate) fn to_raw(&self) -> Result<RawSurface> {
        self.check()?;
        let vertices: Vec<HardcodedVertex> = self.vertices.iter().map(Vertex::to_raw).collect();
        let indices = self.indices.clone();
        let skinning = match &self.skinning {
            Some(data) => Some(data.to_raw()?),
            None => None,
        };
        let record = MeshInfoSurfaceTriangles {
            vertices_values: vertices.as_ptr(),
            vertices_count: vertices.len() as u64,
            indices_values: indices.as_ptr(),
            indices_count: indices.len() as u64,
            skinning_hasvalue: skinning.is_some() as i32,
            skinning_value: skinning
                .as_ref()
                .map(RawSkinning::record)
                .unwrap_or_default(),
            material: self
                .material
                .as_ref()
                .map_or(Handle::NULL, |m| m.handle()),
        };
        Ok(RawSurface {
            record,
            _vertices: vertices,
            _indices: indices,
            _skinning: skinning,
        })
    }
}

/// Baked surface record plus the buffers it borrows.
#[derive(Debug)]
pub struct RawSurface {
    pub(crate) record: MeshInfoSurfaceTriangles,
    _vertices: Vec<HardcodedVertex>,
    _indices: Vec<u32>,
    _skinning: Option<RawSkinning>,
}

/// A mesh asset: one or more surfaces plus a 64-bit identity hash.
///
/// Owns no native resource until the session registers it; the session is
/// the only component that assigns or clears the handle.
#[derive(Debug)]
pub struct Mesh {
    surfaces: Vec<MeshSurface>,
    hash: u64,
    pub(crate) handle: Cell<Handle>,
}

impl Mesh {
    pub fn new(surfaces: Vec<MeshSurface>, hash: u64) -> Self {
        Self {
            surfaces,
            hash,
            handle: Cell::new(Handle::NULL),
        }
    }

    pub fn surfaces(&self) -> &[MeshSurface] {
        &self.surfaces
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn set_hash(&mut self, hash: u64) {
        self.hash = hash;
    }

    /// Native handle, null until registered.
    pub fn handle(&self) -> Handle {
        self.handle.get()
    }

    /// Bakes the mesh record and the per-surface buffers for a
    /// `create_mesh` call. Each call yields an independent chain.
    pub fn to_raw(&self) -> Result<RawMesh> {
        let backing: Vec<RawSurface> = self
            .surfaces
            .iter()
            .map(MeshSurface::to_raw)
            .collect::<Result<_>>()?;
        let surfaces: Vec<MeshInfoSurfaceTriangles> =
            backing.iter().map(|raw| raw.record).collect();
        let head = MeshInfo {
            s_type: StructType::MeshInfo,
            p_next: std::ptr::null(),
            hash: self.hash,
            surfaces_values: surfaces.as_ptr(),
            surfaces_count: surfaces.len() as u32,
        };
        Ok(RawMesh {
            head,
            surfaces,
            _backing: backing,
        })
    }
}

/// Baked mesh descriptor. Valid only while this value is alive; the head
/// record must not outlive it.
#[derive(Debug)]
pub struct RawMesh {
    head: MeshInfo,
    surfaces: Vec<MeshInfoSurfaceTriangles>,
    _backing: Vec<RawSurface>,
}

impl RawMesh {
    pub fn head(&self) -> &MeshInfo {
        &self.head
    }

    pub fn surfaces(&self) -> &[MeshInfoSurfaceTriangles] {
        &self.surfaces
    }
}
