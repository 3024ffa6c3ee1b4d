//! Placement of a registered mesh in the scene: transform, category flags
//! and an optional skeleton pose for skinned meshes.

use std::ffi::c_void;
use std::ptr;
use std::rc::Rc;

use bitflags::bitflags;

use crate::error::{RemixError, Result};
use crate::ffi::records::InstanceInfo;
use crate::ffi::StructType;
use crate::math::Transform;
use crate::scene::mesh::Mesh;
use crate::scene::skinning::{RawSkeleton, Skeleton};

bitflags! {
    /// Renderer category overrides for a drawn instance. These mirror the
    /// categories the runtime otherwise assigns from capture heuristics.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CategoryFlags: u32 {
        const WORLD_UI = 1 << 0;
        const WORLD_MATTE = 1 << 1;
        const SKY = 1 << 2;
        const IGNORE = 1 << 3;
        const IGNORE_LIGHTS = 1 << 4;
        const IGNORE_ANTI_CULLING = 1 << 5;
        const IGNORE_MOTION_BLUR = 1 << 6;
        const IGNORE_OPACITY_MICROMAP = 1 << 7;
        const HIDDEN = 1 << 8;
        const PARTICLE = 1 << 9;
        const BEAM = 1 << 10;
        const DECAL_STATIC = 1 << 11;
        const DECAL_DYNAMIC = 1 << 12;
        const DECAL_SINGLE_OFFSET = 1 << 13;
        const DECAL_NO_OFFSET = 1 << 14;
        const ALPHA_BLEND_TO_CUTOUT = 1 << 15;
        const TERRAIN = 1 << 16;
        const ANIMATED_WATER = 1 << 17;
        const THIRD_PERSON_PLAYER_MODEL = 1 << 18;
        const THIRD_PERSON_PLAYER_BODY = 1 << 19;
        const IGNORE_BAKED_LIGHTING = 1 << 20;
        const IGNORE_ALPHA_CHANNEL = 1 << 21;
    }
}

/// One drawn occurrence of a mesh. The mesh must already be registered
/// with the session; several instances may share one [`Mesh`].
#[derive(Debug)]
pub struct MeshInstance {
    mesh: Rc<Mesh>,
    category_flags: CategoryFlags,
    transform: Transform,
    double_sided: bool,
    skeleton: Option<Skeleton>,
}

impl MeshInstance {
    /// Builds an instance over a registered mesh. Instances start
    /// double-sided with no category overrides.
    ///
    /// Fails with [`RemixError::ResourceNotInitialized`] when the mesh has
    /// not been registered yet.
    pub fn new(mesh: Rc<Mesh>, transform: Transform) -> Result<Self> {
        if mesh.handle().is_null() {
            return Err(RemixError::ResourceNotInitialized("mesh"));
        }
        Ok(Self {
            mesh,
            category_flags: CategoryFlags::empty(),
            transform,
            double_sided: true,
            skeleton: None,
        })
    }

    pub fn mesh(&self) -> &Rc<Mesh> {
        &self.mesh
    }

    pub fn category_flags(&self) -> CategoryFlags {
        self.category_flags
    }

    pub fn set_category_flags(&mut self, flags: CategoryFlags) {
        self.category_flags = flags;
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn double_sided(&self) -> bool {
        self.double_sided
    }

    pub fn set_double_sided(&mut self, double_sided: bool) {
        self.double_sided = double_sided;
    }

    pub fn skeleton(&self) -> Option<&Skeleton> {
        self.skeleton.as_ref()
    }

    /// Pose animated per frame through this accessor.
    pub fn skeleton_mut(&mut self) -> Option<&mut Skeleton> {
        self.skeleton.as_mut()
    }

    pub fn set_skeleton(&mut self, skeleton: Option<Skeleton>) {
        self.skeleton = skeleton;
    }

    /// Cross-checks every skinned surface against the attached skeleton.
    ///
    /// A blend index at or past the skeleton's bone count would read out of
    /// bounds on the native side, so it is rejected here. This walks every
    /// index buffer; call it when wiring a skeleton up, not per frame.
    pub fn validate(&self) -> Result<()> {
        let Some(skeleton) = &self.skeleton else {
            return Ok(());
        };
        let bone_count = skeleton.bone_count() as u32;
        for (surface_idx, surface) in self.mesh.surfaces().iter().enumerate() {
            let Some(skinning) = surface.skinning() else {
                continue;
            };
            if skinning.blend_indices().iter().any(|&idx| idx >= bone_count) {
                return Err(RemixError::SkinningDataOutOfSkeletonRange {
                    surface: surface_idx,
                });
            }
        }
        Ok(())
    }

    /// Bakes the instance record and, when a skeleton is attached, its bone
    /// transform extension.
    ///
    /// Only the mesh handle is re-checked here; the skeleton-range walk
    /// stays in [`MeshInstance::validate`] so per-frame bakes don't pay for
    /// it.
    pub fn to_raw(&self) -> Result<RawInstance> {
        if self.mesh.handle().is_null() {
            return Err(RemixError::ResourceNotInitialized("mesh"));
        }

        let skeleton = self.skeleton.as_ref().map(|s| Box::new(s.to_raw()));
        let p_next = skeleton
            .as_deref()
            .map_or(ptr::null(), |raw| &raw.record as *const _ as *const c_void);
        let head = InstanceInfo {
            s_type: StructType::InstanceInfo,
            p_next,
            category_flags: self.category_flags.bits(),
            mesh: self.mesh.handle(),
            transform: self.transform,
            double_sided: self.double_sided as u32,
        };
        Ok(RawInstance { head, skeleton })
    }
}

/// Baked instance record plus its optional bone transform extension. Valid
/// only while this value is alive.
#[derive(Debug)]
pub struct RawInstance {
    head: InstanceInfo,
    skeleton: Option<Box<RawSkeleton>>,
}

impl RawInstance {
    pub fn head(&self) -> &InstanceInfo {
        &self.head
    }

    pub fn skeleton_ext(&self) -> Option<&RawSkeleton> {
        self.skeleton.as_deref()
    }
}
