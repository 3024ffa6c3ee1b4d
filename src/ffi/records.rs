//! Fixed-layout records crossing the native engine boundary.
//!
//! Field order, fixed-size arrays and the `{ s_type, p_next }` prefix of
//! every chained record reproduce the engine's C headers exactly; nothing in
//! here may be reordered or padded differently. The `p_next` pointer forms a
//! singly linked chain where a base record points to at most one extension.
//!
//! Records holding raw pointers are only valid while the baked descriptor
//! set that produced them is alive (see the `Raw*` types in [`crate::scene`]).
//! Pointer-free records derive `bytemuck::Pod` the same way vertex data does
//! elsewhere in the stack.

use std::ffi::c_void;
use std::path::Path;
use std::ptr;

use bytemuck::{Pod, Zeroable};

use crate::math::{Float3, Transform};

/// `sType` tag identifying the concrete payload of a chained record.
///
/// The tag/payload pairing is produced by construction in the baking layer,
/// never inferred: the wire format is not self-describing.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructType {
    None = 0,
    InitializeLibraryInfo = 1,
    MaterialInfo = 2,
    MaterialInfoPortalExt = 3,
    MaterialInfoTranslucentExt = 4,
    MaterialInfoOpaqueExt = 5,
    LightInfo = 6,
    LightInfoDistantExt = 7,
    LightInfoCylinderExt = 8,
    LightInfoDiskExt = 9,
    LightInfoRectExt = 10,
    LightInfoSphereExt = 11,
    MeshInfo = 12,
    InstanceInfo = 13,
    InstanceInfoBoneTransformsExt = 14,
    InstanceInfoBlendExt = 15,
    CameraInfo = 16,
    CameraInfoParameterizedExt = 17,
    MaterialInfoOpaqueSubsurfaceExt = 18,
    InstanceInfoObjectPickingExt = 19,
    LightInfoDomeExt = 20,
    LightInfoUsdExt = 21,
    StartupInfo = 22,
    PresentInfo = 23,
}

/// Opaque native resource identifier assigned by the engine on successful
/// registration of a mesh, material or light. Null before registration and
/// after destruction.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle(*mut c_void);

impl Handle {
    pub const NULL: Handle = Handle(ptr::null_mut());

    pub fn from_raw(raw: *mut c_void) -> Self {
        Self(raw)
    }

    pub fn as_raw(self) -> *mut c_void {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::NULL
    }
}

/// Nul-terminated UTF-16 string backing a wide-text pointer in a record.
///
/// The engine consumes texture paths as Windows wide strings; the buffer must
/// outlive every record pointing into it.
#[derive(Debug, Clone)]
pub struct WideString(Vec<u16>);

impl WideString {
    pub fn new(path: &Path) -> Self {
        let mut buf: Vec<u16> = path.to_string_lossy().encode_utf16().collect();
        buf.push(0);
        Self(buf)
    }

    pub fn as_ptr(&self) -> *const u16 {
        self.0.as_ptr()
    }

    /// Code units including the trailing nul.
    pub fn units(&self) -> &[u16] {
        &self.0
    }
}

#[repr(C)]
#[derive(Debug)]
pub struct StartupInfo {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub hwnd: *mut c_void,
    pub disable_srgb_conversion_for_output: i32,
    pub force_no_vk_swapchain: i32,
    pub editor_mode_enabled: i32,
}

#[repr(C)]
#[derive(Debug)]
pub struct PresentInfo {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub hwnd_override: *mut c_void,
}

/// Base camera record. Either `view`/`projection` carry caller-computed
/// matrices, or `p_next` points to a [`CameraInfoParameterizedExt`] and the
/// matrices are ignored.
#[repr(C)]
#[derive(Debug)]
pub struct CameraInfo {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub camera_type: i32,
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug)]
pub struct CameraInfoParameterizedExt {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub position: Float3,
    pub forward: Float3,
    pub up: Float3,
    pub right: Float3,
    pub fov_y_in_degrees: f32,
    pub aspect: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

/// Vertex layout the engine expects: position, normal, one UV pair and a
/// packed 32-bit color, padded to 64 bytes.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct HardcodedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: [f32; 2],
    pub color: u32,
    pub _pad: [u32; 7],
}

/// Per-surface skinning buffers. Weight and index buffers hold
/// `bones_per_vertex` entries per vertex, in declaration order.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct MeshInfoSkinning {
    pub bones_per_vertex: u32,
    pub blend_weights_values: *const f32,
    pub blend_weights_count: u32,
    pub blend_indices_values: *const u32,
    pub blend_indices_count: u32,
}

impl Default for MeshInfoSkinning {
    fn default() -> Self {
        Self {
            bones_per_vertex: 0,
            blend_weights_values: ptr::null(),
            blend_weights_count: 0,
            blend_indices_values: ptr::null(),
            blend_indices_count: 0,
        }
    }
}

/// One surface of a mesh: vertex and index buffers, optional skinning and an
/// optional material handle. The buffers are borrowed for the duration of the
/// `create_mesh` call only.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct MeshInfoSurfaceTriangles {
    pub vertices_values: *const HardcodedVertex,
    pub vertices_count: u64,
    pub indices_values: *const u32,
    pub indices_count: u64,
    pub skinning_hasvalue: i32,
    pub skinning_value: MeshInfoSkinning,
    pub material: Handle,
}

#[repr(C)]
#[derive(Debug)]
pub struct MeshInfo {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub hash: u64,
    pub surfaces_values: *const MeshInfoSurfaceTriangles,
    pub surfaces_count: u32,
}

#[repr(C)]
#[derive(Debug)]
pub struct InstanceInfo {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub category_flags: u32,
    pub mesh: Handle,
    pub transform: Transform,
    pub double_sided: u32,
}

/// Skeleton extension for [`InstanceInfo`]: a flat array of bone transforms
/// referenced by the surfaces' blend indices.
#[repr(C)]
#[derive(Debug)]
pub struct InstanceInfoBoneTransformsExt {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub bone_transforms_values: *const Transform,
    pub bone_transforms_count: u32,
}

#[repr(C)]
#[derive(Debug)]
pub struct LightInfo {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub hash: u64,
    pub radiance: Float3,
}

/// Focal cone shaping for sphere, rect and disk lights, embedded by value
/// behind a has-value flag.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightInfoShaping {
    pub direction: Float3,
    pub cone_angle_degrees: f32,
    pub cone_softness: f32,
    pub focus_exponent: f32,
}

#[repr(C)]
#[derive(Debug)]
pub struct LightInfoSphereExt {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub position: Float3,
    pub radius: f32,
    pub shaping_hasvalue: u32,
    pub shaping_value: LightInfoShaping,
}

#[repr(C)]
#[derive(Debug)]
pub struct LightInfoRectExt {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub position: Float3,
    pub x_axis: Float3,
    pub x_size: f32,
    pub y_axis: Float3,
    pub y_size: f32,
    pub direction: Float3,
    pub shaping_hasvalue: u32,
    pub shaping_value: LightInfoShaping,
}

#[repr(C)]
#[derive(Debug)]
pub struct LightInfoDiskExt {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub position: Float3,
    pub x_axis: Float3,
    pub x_radius: f32,
    pub y_axis: Float3,
    pub y_radius: f32,
    pub direction: Float3,
    pub shaping_hasvalue: u32,
    pub shaping_value: LightInfoShaping,
}

#[repr(C)]
#[derive(Debug)]
pub struct LightInfoCylinderExt {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub position: Float3,
    pub radius: f32,
    pub axis: Float3,
    pub axis_length: f32,
}

#[repr(C)]
#[derive(Debug)]
pub struct LightInfoDistantExt {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub direction: Float3,
    pub angular_diameter_degrees: f32,
}

#[repr(C)]
#[derive(Debug)]
pub struct LightInfoDomeExt {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub transform: Transform,
    pub color_texture: *const u16,
}

/// Shared base payload for all material kinds. `p_next` points to exactly one
/// of the opaque, translucent or portal extensions.
#[repr(C)]
#[derive(Debug)]
pub struct MaterialInfo {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub hash: u64,
    pub albedo_texture: *const u16,
    pub normal_texture: *const u16,
    pub tangent_texture: *const u16,
    pub emissive_texture: *const u16,
    pub emissive_intensity: f32,
    pub emissive_color_constant: Float3,
    pub sprite_sheet_row: u8,
    pub sprite_sheet_col: u8,
    pub sprite_sheet_fps: u8,
    pub filter_mode: u8,
    pub wrap_mode_u: u8,
    pub wrap_mode_v: u8,
}

/// OpacityPBR shader parameters. May chain a
/// [`MaterialInfoOpaqueSubsurfaceExt`] through its own `p_next`.
#[repr(C)]
#[derive(Debug)]
pub struct MaterialInfoOpaqueExt {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub roughness_texture: *const u16,
    pub anisotropy: f32,
    pub albedo_constant: Float3,
    pub opacity_constant: f32,
    pub roughness_constant: f32,
    pub metallic_constant: f32,
    pub thin_film_thickness_hasvalue: u32,
    pub thin_film_thickness_value: f32,
    pub alpha_is_thin_film_thickness: u32,
    pub height_texture: *const u16,
    pub height_texture_strength: f32,
    pub use_draw_call_alpha_state: u32,
    pub blend_type_hasvalue: u32,
    pub blend_type_value: u32,
    pub inverted_blend: u32,
    pub alpha_test_type: u32,
    pub alpha_reference_value: u8,
}

#[repr(C)]
#[derive(Debug)]
pub struct MaterialInfoOpaqueSubsurfaceExt {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub subsurface_transmittance_texture: *const u16,
    pub subsurface_thickness_texture: *const u16,
    pub subsurface_single_scattering_albedo_texture: *const u16,
    pub subsurface_transmittance_color: Float3,
    pub subsurface_measurement_distance: f32,
    pub subsurface_single_scattering_albedo: Float3,
    pub subsurface_volumetric_anisotropy: f32,
}

#[repr(C)]
#[derive(Debug)]
pub struct MaterialInfoTranslucentExt {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub transmittance_texture: *const u16,
    pub refractive_index: f32,
    pub transmittance_color: Float3,
    pub transmittance_measurement_distance: f32,
    pub thin_wall_thickness_hasvalue: u32,
    pub thin_wall_thickness_value: f32,
    pub use_diffuse_layer: u32,
}

#[repr(C)]
#[derive(Debug)]
pub struct MaterialInfoPortalExt {
    pub s_type: StructType,
    pub p_next: *const c_void,
    pub ray_portal_index: u8,
    pub rotation_speed: f32,
}
