//! Skeletal deformation data: per-vertex bone weights/indices and the flat
//! bone-transform array bound to a mesh instance.

use crate::error::{RemixError, Result};
use crate::ffi::records::{InstanceInfoBoneTransformsExt, MeshInfoSkinning};
use crate::ffi::StructType;
use crate::math::Transform;

/// Per-vertex bone influences for one mesh surface.
///
/// The layout of both buffers depends on `bones_per_vertex`: each group of
/// `bones_per_vertex` entries describes one vertex, in vertex order. Weights
/// are consumed by the engine against a budget of 1.0 in declaration order,
/// so normalize them per vertex; this layer checks counts, not sums.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinningData {
    bones_per_vertex: u32,
    blend_weights: Vec<f32>,
    blend_indices: Vec<u32>,
}

impl SkinningData {
    /// Builds skinning data, rejecting malformed buffers immediately.
    ///
    /// Fails with [`RemixError::InvalidSkinningData`] when either buffer is
    /// empty, when a length is not a multiple of `bones_per_vertex`, or when
    /// the two lengths differ.
    pub fn new(
        bones_per_vertex: u32,
        blend_weights: Vec<f32>,
        blend_indices: Vec<u32>,
    ) -> Result<Self> {
        let data = Self {
            bones_per_vertex,
            blend_weights,
            blend_indices,
        };
        data.validate()?;
        Ok(data)
    }

    pub fn bones_per_vertex(&self) -> u32 {
        self.bones_per_vertex
    }

    pub fn blend_weights(&self) -> &[f32] {
        &self.blend_weights
    }

    pub fn blend_indices(&self) -> &[u32] {
        &self.blend_indices
    }

    /// Number of vertices these buffers describe.
    pub fn vertex_count(&self) -> usize {
        self.blend_weights.len() / self.bones_per_vertex.max(1) as usize
    }

    /// Fail-fast check: returns the first violation as an error.
    pub fn validate(&self) -> Result<()> {
        match self.violations().into_iter().next() {
            Some(msg) => Err(RemixError::InvalidSkinningData(msg)),
            None => Ok(()),
        }
    }

    /// Collect-all check: returns every violation without failing, for
    /// asset-pipeline style diagnostics.
    pub fn violations(&self) -> Vec<String> {
        Self::check_buffers(
            self.bones_per_vertex,
            &self.blend_weights,
            &self.blend_indices,
        )
    }

    /// Collect-all check over candidate buffers that have not been wrapped
    /// in a [`SkinningData`] yet.
    pub fn check_buffers(
        bones_per_vertex: u32,
        blend_weights: &[f32],
        blend_indices: &[u32],
    ) -> Vec<String> {
        let mut violations = Vec::new();
        if bones_per_vertex == 0 {
            violations.push("bones_per_vertex must be positive".to_string());
            return violations;
        }

        let bones = bones_per_vertex as usize;
        if blend_weights.is_empty() {
            violations.push("blend_weights must not be empty".to_string());
        } else if blend_weights.len() % bones != 0 {
            violations.push(format!(
                "blend_weights (length {}) must be a multiple of bones_per_vertex ({})",
                blend_weights.len(),
                bones,
            ));
        }

        if blend_indices.is_empty() {
            violations.push("blend_indices must not be empty".to_string());
        } else if blend_indices.len() % bones != 0 {
            violations.push(format!(
                "blend_indices (length {}) must be a multiple of bones_per_vertex ({})",
                blend_indices.len(),
                bones,
            ));
        }

        if blend_weights.len() != blend_indices.len() {
            violations.push(format!(
                "blend_weights (length {}) and blend_indices (length {}) must match",
                blend_weights.len(),
                blend_indices.len(),
            ));
        }
        violations
    }

    /// Re-validates and bakes the skinning record plus its flattened
    /// buffers. Weights cross the boundary exactly as given.
    pub fn to_raw(&self) -> Result<RawSkinning> {
        self.validate()?;
        let weights = self.blend_weights.clone();
        let indices = self.blend_indices.clone();
        let record = MeshInfoSkinning {
            bones_per_vertex: self.bones_per_vertex,
            blend_weights_values: weights.as_ptr(),
            blend_weights_count: weights.len() as u32,
            blend_indices_values: indices.as_ptr(),
            blend_indices_count: indices.len() as u32,
        };
        Ok(RawSkinning {
            record,
            weights,
            indices,
        })
    }
}

/// Baked skinning record and the buffers it points into. The record may be
/// copied into a surface record, but stays valid only while this value is
/// alive.
#[derive(Debug)]
pub struct RawSkinning {
    record: MeshInfoSkinning,
    weights: Vec<f32>,
    indices: Vec<u32>,
}

impl RawSkinning {
    pub fn record(&self) -> MeshInfoSkinning {
        self.record
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
}

/// A flat array of bone transforms referenced by a surface's blend indices.
///
/// Bones start out as identity transforms and are overwritten in bulk each
/// time the host animates the skeleton.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    bone_transforms: Vec<Transform>,
}

impl Skeleton {
    pub fn new(bone_count: usize) -> Self {
        Self {
            bone_transforms: vec![Transform::IDENTITY; bone_count],
        }
    }

    pub fn bone_count(&self) -> usize {
        self.bone_transforms.len()
    }

    pub fn bone_transforms(&self) -> &[Transform] {
        &self.bone_transforms
    }

    /// Bulk-copies a full set of bone transforms.
    ///
    /// # Panics
    ///
    /// Panics if `transforms` does not hold exactly `bone_count` entries; a
    /// partial pose is never valid.
    pub fn set_bone_transforms(&mut self, transforms: &[Transform]) {
        assert_eq!(
            transforms.len(),
            self.bone_transforms.len(),
            "pose must cover all {} bones",
            self.bone_transforms.len(),
        );
        self.bone_transforms.copy_from_slice(transforms);
    }

    pub(crate) fn to_raw(&self) -> RawSkeleton {
        let bones = self.bone_transforms.clone();
        let record = InstanceInfoBoneTransformsExt {
            s_type: StructType::InstanceInfoBoneTransformsExt,
            p_next: std::ptr::null(),
            bone_transforms_values: bones.as_ptr(),
            bone_transforms_count: bones.len() as u32,
        };
        RawSkeleton {
            record,
            _bones: bones,
        }
    }
}

/// Baked bone-transform extension record and its backing array.
#[derive(Debug)]
pub struct RawSkeleton {
    pub(crate) record: InstanceInfoBoneTransformsExt,
    _bones: Vec<Transform>,
}

impl RawSkeleton {
    pub fn record(&self) -> &InstanceInfoBoneTransformsExt {
        &self.record
    }
}
