//! Material descriptors for the engine's three shader families.
//!
//! Materials are a closed variant set sharing a common base payload. The
//! in-memory model is a plain tagged union; the `pNext`-chained wire form is
//! only produced at the serialization boundary, with tag/link correctness
//! guaranteed by construction.

use std::cell::Cell;
use std::ffi::c_void;
use std::path::PathBuf;
use std::ptr;

use crate::ffi::records::{
    MaterialInfo, MaterialInfoOpaqueExt, MaterialInfoOpaqueSubsurfaceExt, MaterialInfoPortalExt,
    MaterialInfoTranslucentExt,
};
use crate::ffi::{Handle, StructType, WideString};
use crate::math::Float3;

/// Texture sampling filter.
#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest = 0,
    #[default]
    Linear = 1,
}

/// Behavior for UV coordinates outside the 0..1 range.
#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Clamp = 0,
    #[default]
    Repeat = 1,
    MirroredRepeat = 2,
    Clip = 3,
}

/// Alpha blend operation, matching the engine's instance-manager alpha
/// state calculation.
#[repr(u32)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BlendType {
    #[default]
    Alpha = 0,
    AlphaEmissive = 1,
    ReverseAlphaEmissive = 2,
    Color = 3,
    ColorEmissive = 4,
    ReverseColorEmissive = 5,
    Emissive = 6,
    Multiplicative = 7,
    DoubleMultiplicative = 8,
    ReverseAlpha = 9,
    ReverseColor = 10,
}

/// Alpha test comparison.
#[repr(u32)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AlphaTestType {
    #[default]
    Never = 0,
    Less = 1,
    Equal = 2,
    LessOrEqual = 3,
    Greater = 4,
    NotEqual = 5,
    GreaterOrEqual = 6,
    Always = 7,
}

/// Fields shared by every material kind: textures, emissive controls,
/// sprite-sheet animation and sampling modes.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialBase {
    /// Path to the albedo texture (.dds BC7).
    pub albedo_texture: PathBuf,
    /// Path to the octahedral-encoded normal texture (.dds BC5).
    pub normal_texture: PathBuf,
    pub tangent_texture: PathBuf,
    pub emissive_texture: PathBuf,
    pub emissive_intensity: f32,
    /// Emissive color used when no emissive texture is set.
    pub emissive_color_constant: Float3,
    pub sprite_sheet_row: u8,
    pub sprite_sheet_col: u8,
    pub sprite_sheet_fps: u8,
    pub filter_mode: FilterMode,
    pub wrap_mode_u: WrapMode,
    pub wrap_mode_v: WrapMode,
}

impl Default for MaterialBase {
    fn default() -> Self {
        Self {
            albedo_texture: PathBuf::new(),
            normal_texture: PathBuf::new(),
            tangent_texture: PathBuf::new(),
            emissive_texture: PathBuf::new(),
            emissive_intensity: 0.0,
            emissive_color_constant: Float3::new(0.0, 0.0, 0.0),
            sprite_sheet_row: 0,
            sprite_sheet_col: 0,
            sprite_sheet_fps: 0,
            filter_mode: FilterMode::Linear,
            wrap_mode_u: WrapMode::Repeat,
            wrap_mode_v: WrapMode::Repeat,
        }
    }
}

/// Subsurface-scattering extension for opaque materials.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubsurfaceScattering {
    pub transmittance_texture: PathBuf,
    pub thickness_texture: PathBuf,
    pub single_scattering_albedo_texture: PathBuf,
    pub transmittance_color: Float3,
    pub measurement_distance: f32,
    pub single_scattering_albedo: Float3,
    pub volumetric_anisotropy: f32,
}

/// Parameters of the OpacityPBR shader.
#[derive(Debug, Clone, PartialEq)]
pub struct OpaqueMaterial {
    /// Path to the roughness map (.dds BC4).
    pub roughness_texture: PathBuf,
    pub anisotropy: f32,
    pub albedo_constant: Float3,
    /// Opacity used when the albedo texture provides none.
    pub opacity_constant: f32,
    pub roughness_constant: f32,
    pub metallic_constant: f32,
    /// Thin-film interference thickness; absent means no thin film.
    pub thin_film_thickness: Option<f32>,
    /// Drive thin-film thickness from the albedo alpha channel instead.
    pub alpha_is_thin_film_thickness: bool,
    /// Height/displacement (POM) texture (.dds BC4).
    pub height_texture: PathBuf,
    /// Max displacement depth in world-space texture units.
    pub height_texture_strength: f32,
    /// When injected into a D3D9 title, reuse the alpha flags of the
    /// original draw call.
    pub use_draw_call_alpha_state: bool,
    pub blend_type: Option<BlendType>,
    pub inverted_blend: bool,
    pub alpha_test_type: AlphaTestType,
    pub alpha_reference_value: u8,
    pub subsurface: Option<SubsurfaceScattering>,
}

impl Default for OpaqueMaterial {
    fn default() -> Self {
        Self {
            roughness_texture: PathBuf::new(),
            anisotropy: 0.0,
            albedo_constant: Float3::new(1.0, 1.0, 1.0),
            opacity_constant: 1.0,
            roughness_constant: 1.0,
            metallic_constant: 0.0,
            thin_film_thickness: None,
            alpha_is_thin_film_thickness: false,
            height_texture: PathBuf::new(),
            height_texture_strength: 0.0,
            use_draw_call_alpha_state: true,
            blend_type: None,
            inverted_blend: false,
            alpha_test_type: AlphaTestType::Never,
            alpha_reference_value: 0,
            subsurface: None,
        }
    }
}

/// Parameters of the TranslucentPBR shader.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslucentMaterial {
    pub transmittance_texture: PathBuf,
    pub refractive_index: f32,
    pub transmittance_color: Float3,
    pub transmittance_measurement_distance: f32,
    /// Treat the geometry as a thin wall of this thickness; absent means a
    /// solid volume.
    pub thin_wall_thickness: Option<f32>,
    pub use_diffuse_layer: bool,
}

impl Default for TranslucentMaterial {
    fn default() -> Self {
        Self {
            transmittance_texture: PathBuf::new(),
            refractive_index: 0.0,
            transmittance_color: Float3::new(0.0, 0.0, 0.0),
            transmittance_measurement_distance: 0.1,
            thin_wall_thickness: None,
            use_diffuse_layer: false,
        }
    }
}

/// Parameters of the Portal shader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortalMaterial {
    pub ray_portal_index: u8,
    pub rotation_speed: f32,
}

/// The closed set of material kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialKind {
    Opaque(OpaqueMaterial),
    Translucent(TranslucentMaterial),
    Portal(PortalMaterial),
}

/// A material descriptor: identity hash, shared base payload and exactly one
/// kind-specific payload.
///
/// Local until registered through the session; surfaces referencing it must
/// wait for `create_material` to assign the handle.
#[derive(Debug)]
pub struct Material {
    hash: u64,
    base: MaterialBase,
    kind: MaterialKind,
    pub(crate) handle: Cell<Handle>,
}

impl Material {
    pub fn new(hash: u64, base: MaterialBase, kind: MaterialKind) -> Self {
        Self {
            hash,
            base,
            kind,
            handle: Cell::new(Handle::NULL),
        }
    }

    /// OpacityPBR material.
    pub fn opaque(hash: u64, base: MaterialBase, params: OpaqueMaterial) -> Self {
        Self::new(hash, base, MaterialKind::Opaque(params))
    }

    /// TranslucentPBR material.
    pub fn translucent(hash: u64, base: MaterialBase, params: TranslucentMaterial) -> Self {
        Self::new(hash, base, MaterialKind::Translucent(params))
    }

    /// Portal material.
    pub fn portal(hash: u64, base: MaterialBase, params: PortalMaterial) -> Self {
        Self::new(hash, base, MaterialKind::Portal(params))
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn base(&self) -> &MaterialBase {
        &self.base
    }

    pub fn kind(&self) -> &MaterialKind {
        &self.kind
    }

    /// Native handle, null until registered.
    pub fn handle(&self) -> Handle {
        self.handle.get()
    }

    /// Bakes the base record and its kind-specific extension chain.
    ///
    /// Optional numeric fields serialize a false has-value flag and a
    /// neutral default when absent, never garbage.
    pub fn to_raw(&self) -> RawMaterial {
        let mut strings = Vec::new();
        let mut wide = |path: &PathBuf| -> *const u16 {
            let s = WideString::new(path);
            let ptr = s.as_ptr();
            strings.push(s);
            ptr
        };

        let (ext, subsurface) = match &self.kind {
            MaterialKind::Opaque(params) => {
                let subsurface = params.subsurface.as_ref().map(|sss| {
                    Box::new(MaterialInfoOpaqueSubsurfaceExt {
                        s_type: StructType::MaterialInfoOpaqueSubsurfaceExt,
                        p_next: ptr::null(),
                        subsurface_transmittance_texture: wide(&sss.transmittance_texture),
                        subsurface_thickness_texture: wide(&sss.thickness_texture),
                        subsurface_single_scattering_albedo_texture: wide(
                            &sss.single_scattering_albedo_texture,
                        ),
                        subsurface_transmittance_color: sss.transmittance_color,
                        subsurface_measurement_distance: sss.measurement_distance,
                        subsurface_single_scattering_albedo: sss.single_scattering_albedo,
                        subsurface_volumetric_anisotropy: sss.volumetric_anisotropy,
                    })
                });
                let ext = Box::new(MaterialInfoOpaqueExt {
                    s_type: StructType::MaterialInfoOpaqueExt,
                    p_next: subsurface
                        .as_deref()
                        .map_or(ptr::null(), |sss| sss as *const _ as *const c_void),
                    roughness_texture: wide(&params.roughness_texture),
                    anisotropy: params.anisotropy,
                    albedo_constant: params.albedo_constant,
                    opacity_constant: params.opacity_constant,
                    roughness_constant: params.roughness_constant,
                    metallic_constant: params.metallic_constant,
                    thin_film_thickness_hasvalue: params.thin_film_thickness.is_some() as u32,
                    thin_film_thickness_value: params.thin_film_thickness.unwrap_or(0.0),
                    alpha_is_thin_film_thickness: params.alpha_is_thin_film_thickness as u32,
                    height_texture: wide(&params.height_texture),
                    height_texture_strength: params.height_texture_strength,
                    use_draw_call_alpha_state: params.use_draw_call_alpha_state as u32,
                    blend_type_hasvalue: params.blend_type.is_some() as u32,
                    blend_type_value: params.blend_type.unwrap_or_default() as u32,
                    inverted_blend: params.inverted_blend as u32,
                    alpha_test_type: params.alpha_test_type as u32,
                    alpha_reference_value: params.alpha_reference_value,
                });
                (RawMaterialExt::Opaque(ext), subsurface)
            }
            MaterialKind::Translucent(params) => {
                let ext = Box::new(MaterialInfoTranslucentExt {
                    s_type: StructType::MaterialInfoTranslucentExt,
                    p_next: ptr::null(),
                    transmittance_texture: wide(&params.transmittance_texture),
                    refractive_index: params.refractive_index,
                    transmittance_color: params.transmittance_color,
                    transmittance_measurement_distance: params.transmittance_measurement_distance,
                    thin_wall_thickness_hasvalue: params.thin_wall_thickness.is_some() as u32,
                    thin_wall_thickness_value: params.thin_wall_thickness.unwrap_or(0.0),
                    use_diffuse_layer: params.use_diffuse_layer as u32,
                });
                (RawMaterialExt::Translucent(ext), None)
            }
            MaterialKind::Portal(params) => {
                let ext = Box::new(MaterialInfoPortalExt {
                    s_type: StructType::MaterialInfoPortalExt,
                    p_next: ptr::null(),
                    ray_portal_index: params.ray_portal_index,
                    rotation_speed: params.rotation_speed,
                });
                (RawMaterialExt::Portal(ext), None)
            }
        };

        let head = MaterialInfo {
            s_type: StructType::MaterialInfo,
            p_next: ext.as_void_ptr(),
            hash: self.hash,
            albedo_texture: wide(&self.base.albedo_texture),
            normal_texture: wide(&self.base.normal_texture),
            tangent_texture: wide(&self.base.tangent_texture),
            emissive_texture: wide(&self.base.emissive_texture),
            emissive_intensity: self.base.emissive_intensity,
            emissive_color_constant: self.base.emissive_color_constant,
            sprite_sheet_row: self.base.sprite_sheet_row,
            sprite_sheet_col: self.base.sprite_sheet_col,
            sprite_sheet_fps: self.base.sprite_sheet_fps,
            filter_mode: self.base.filter_mode as u8,
            wrap_mode_u: self.base.wrap_mode_u as u8,
            wrap_mode_v: self.base.wrap_mode_v as u8,
        };

        RawMaterial {
            head,
            ext,
            subsurface,
            _strings: strings,
        }
    }
}

#[derive(Debug)]
enum RawMaterialExt {
    Opaque(Box<MaterialInfoOpaqueExt>),
    Translucent(Box<MaterialInfoTranslucentExt>),
    Portal(Box<MaterialInfoPortalExt>),
}

impl RawMaterialExt {
    fn as_void_ptr(&self) -> *const c_void {
        match self {
            Self::Opaque(ext) => &**ext as *const _ as *const c_void,
            Self::Translucent(ext) => &**ext as *const _ as *const c_void,
            Self::Portal(ext) => &**ext as *const _ as *const c_void,
        }
    }
}

/// Baked material chain: the base record, its boxed extension and the
/// wide-string buffers every texture pointer refers to. Valid only while
/// this value is alive.
#[derive(Debug)]
pub struct RawMaterial {
    head: MaterialInfo,
    ext: RawMaterialExt,
    subsurface: Option<Box<MaterialInfoOpaqueSubsurfaceExt>>,
    _strings: Vec<WideString>,
}

impl RawMaterial {
    pub fn head(&self) -> &MaterialInfo {
        &self.head
    }

    pub fn opaque_ext(&self) -> Option<&MaterialInfoOpaqueExt> {
        match &self.ext {
            RawMaterialExt::Opaque(ext) => Some(ext),
            _ => None,
        }
    }

    pub fn translucent_ext(&self) -> Option<&MaterialInfoTranslucentExt> {
        match &self.ext {
            RawMaterialExt::Translucent(ext) => Some(ext),
            _ => None,
        }
    }

    pub fn portal_ext(&self) -> Option<&MaterialInfoPortalExt> {
        match &self.ext {
            RawMaterialExt::Portal(ext) => Some(ext),
            _ => None,
        }
    }

    pub fn subsurface_ext(&self) -> Option<&MaterialInfoOpaqueSubsurfaceExt> {
        self.subsurface.as_deref()
    }
}
