//! Light descriptors: the closed set of analytic light kinds the engine
//! supports, plus the optional focal shaping shared by sphere, rect and
//! disk lights.

use std::cell::Cell;
use std::ffi::c_void;
use std::path::PathBuf;
use std::ptr;

use cgmath::InnerSpace;

use crate::error::{RemixError, Result};
use crate::ffi::records::{
    LightInfo, LightInfoCylinderExt, LightInfoDiskExt, LightInfoDistantExt, LightInfoDomeExt,
    LightInfoRectExt, LightInfoShaping, LightInfoSphereExt,
};
use crate::ffi::{Handle, StructType, WideString};
use crate::math::{Float3, Transform};

/// Distant-light directions may be off unit length by this much before
/// construction rejects them.
const UNIT_LENGTH_TOLERANCE: f32 = 1e-3;

/// Focal cone shaping for sphere, rect and disk lights.
#[derive(Debug, Clone, PartialEq)]
pub struct LightShaping {
    pub direction: Float3,
    pub cone_angle: f32,
    pub cone_softness: f32,
    pub focus_exponent: f32,
}

impl Default for LightShaping {
    fn default() -> Self {
        Self {
            direction: Float3::new(0.0, -1.0, 0.0),
            cone_angle: 0.0,
            cone_softness: 0.0,
            focus_exponent: 0.0,
        }
    }
}

impl LightShaping {
    fn to_raw(&self) -> LightInfoShaping {
        LightInfoShaping {
            direction: self.direction,
            cone_angle_degrees: self.cone_angle,
            cone_softness: self.cone_softness,
            focus_exponent: self.focus_exponent,
        }
    }
}

/// Point-like emitter with a radius; anything inside the sphere is unlit.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereLight {
    pub position: Float3,
    pub radius: f32,
    pub shaping: Option<LightShaping>,
}

impl Default for SphereLight {
    fn default() -> Self {
        Self {
            position: Float3::new(0.0, 0.0, 0.0),
            radius: 0.1,
            shaping: None,
        }
    }
}

/// Rectangular area light spanned by two axes.
#[derive(Debug, Clone, PartialEq)]
pub struct RectLight {
    pub position: Float3,
    pub x_axis: Float3,
    pub x_size: f32,
    pub y_axis: Float3,
    pub y_size: f32,
    pub direction: Float3,
    pub shaping: Option<LightShaping>,
}

impl Default for RectLight {
    fn default() -> Self {
        Self {
            position: Float3::new(0.0, 0.0, 0.0),
            x_axis: Float3::new(1.0, 0.0, 0.0),
            x_size: 1.0,
            y_axis: Float3::new(0.0, 1.0, 0.0),
            y_size: 1.0,
            direction: Float3::new(0.0, 0.0, 1.0),
            shaping: None,
        }
    }
}

/// Elliptic area light; like a rect light but disk-shaped.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskLight {
    pub position: Float3,
    pub x_axis: Float3,
    pub x_radius: f32,
    pub y_axis: Float3,
    pub y_radius: f32,
    pub direction: Float3,
    pub shaping: Option<LightShaping>,
}

impl Default for DiskLight {
    fn default() -> Self {
        Self {
            position: Float3::new(0.0, 0.0, 0.0),
            x_axis: Float3::new(1.0, 0.0, 0.0),
            x_radius: 1.0,
            y_axis: Float3::new(0.0, 1.0, 0.0),
            y_radius: 1.0,
            direction: Float3::new(0.0, 0.0, 1.0),
            shaping: None,
        }
    }
}

/// Tube light, e.g. neon or fluorescent lamps. `axis_length` is the
/// half-length of the tube.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderLight {
    pub position: Float3,
    pub radius: f32,
    pub axis: Float3,
    pub axis_length: f32,
}

impl Default for CylinderLight {
    fn default() -> Self {
        Self {
            position: Float3::new(0.0, 0.0, 0.0),
            radius: 0.1,
            axis: Float3::new(0.0, 1.0, 0.0),
            axis_length: 1.0,
        }
    }
}

/// Sun-or-moon style light, so far away only its direction matters.
///
/// `angular_diameter` (degrees) maps to the apparent size of the source,
/// producing soft shadows. `direction` must already be unit length;
/// construction rejects anything else rather than normalizing silently.
#[derive(Debug, Clone, PartialEq)]
pub struct DistantLight {
    pub direction: Float3,
    pub angular_diameter: f32,
}

impl Default for DistantLight {
    fn default() -> Self {
        Self {
            direction: Float3::new(0.0, -1.0, 0.0),
            angular_diameter: 0.1,
        }
    }
}

/// Skybox/HDRI light. The transform orients the dome texture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomeLight {
    pub transform: Transform,
    pub color_texture: PathBuf,
}

/// The closed set of light kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum LightKind {
    Sphere(SphereLight),
    Rect(RectLight),
    Disk(DiskLight),
    Cylinder(CylinderLight),
    Distant(DistantLight),
    Dome(DomeLight),
}

/// A light descriptor: non-zero identity hash, RGB radiance and exactly one
/// kind-specific payload. Local until registered through the session.
#[derive(Debug)]
pub struct Light {
    hash: u64,
    radiance: Float3,
    kind: LightKind,
    pub(crate) handle: Cell<Handle>,
}

impl Light {
    /// Builds a light, enforcing the shared and kind-specific invariants.
    ///
    /// Fails with [`RemixError::LightHashZero`] on a zero hash, and with
    /// [`RemixError::DirectionNotUnit`] when a distant light's direction is
    /// not unit length.
    pub fn new(hash: u64, radiance: Float3, kind: LightKind) -> Result<Self> {
        if hash == 0 {
            return Err(RemixError::LightHashZero);
        }
        if let LightKind::Distant(distant) = &kind {
            let length = cgmath::Vector3::from(distant.direction).magnitude();
            if (length - 1.0).abs() > UNIT_LENGTH_TOLERANCE {
                return Err(RemixError::DirectionNotUnit { length });
            }
        }
        Ok(Self {
            hash,
            radiance,
            kind,
            handle: Cell::new(Handle::NULL),
        })
    }

    pub fn sphere(hash: u64, radiance: Float3, params: SphereLight) -> Result<Self> {
        Self::new(hash, radiance, LightKind::Sphere(params))
    }

    pub fn rect(hash: u64, radiance: Float3, params: RectLight) -> Result<Self> {
        Self::new(hash, radiance, LightKind::Rect(params))
    }

    pub fn disk(hash: u64, radiance: Float3, params: DiskLight) -> Result<Self> {
        Self::new(hash, radiance, LightKind::Disk(params))
    }

    pub fn cylinder(hash: u64, radiance: Float3, params: CylinderLight) -> Result<Self> {
        Self::new(hash, radiance, LightKind::Cylinder(params))
    }

    pub fn distant(hash: u64, radiance: Float3, params: DistantLight) -> Result<Self> {
        Self::new(hash, radiance, LightKind::Distant(params))
    }

    pub fn dome(hash: u64, radiance: Float3, params: DomeLight) -> Result<Self> {
        Self::new(hash, radiance, LightKind::Dome(params))
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn radiance(&self) -> Float3 {
        self.radiance
    }

    pub fn kind(&self) -> &LightKind {
        &self.kind
    }

    /// Native handle, null until registered.
    pub fn handle(&self) -> Handle {
        self.handle.get()
    }

    /// Bakes the base record and its kind-specific extension.
    pub fn to_raw(&self) -> RawLight {
        let mut texture = None;
        let ext = match &self.kind {
            LightKind::Sphere(params) => RawLightExt::Sphere(Box::new(LightInfoSphereExt {
                s_type: StructType::LightInfoSphereExt,
                p_next: ptr::null(),
                position: params.position,
                radius: params.radius,
                shaping_hasvalue: params.shaping.is_some() as u32,
                shaping_value: params
                    .shaping
                    .as_ref()
                    .map(LightShaping::to_raw)
                    .unwrap_or_default(),
            })),
            LightKind::Rect(params) => RawLightExt::Rect(Box::new(LightInfoRectExt {
                s_type: StructType::LightInfoRectExt,
                p_next: ptr::null(),
                position: params.position,
                x_axis: params.x_axis,
                x_size: params.x_size,
                y_axis: params.y_axis,
                y_size: params.y_size,
                direction: params.direction,
                shaping_hasvalue: params.shaping.is_some() as u32,
                shaping_value: params
                    .shaping
                    .as_ref()
                    .map(LightShaping::to_raw)
                    .unwrap_or_default(),
            })),
            LightKind::Disk(params) => RawLightExt::Disk(Box::new(LightInfoDiskExt {
                s_type: StructType::LightInfoDiskExt,
                p_next: ptr::null(),
                position: params.position,
                x_axis: params.x_axis,
                x_radius: params.x_radius,
                y_axis: params.y_axis,
                y_radius: params.y_radius,
                direction: params.direction,
                shaping_hasvalue: params.shaping.is_some() as u32,
                shaping_value: params
                    .shaping
                    .as_ref()
                    .map(LightShaping::to_raw)
                    .unwrap_or_default(),
            })),
            LightKind::Cylinder(params) => RawLightExt::Cylinder(Box::new(LightInfoCylinderExt {
                s_type: StructType::LightInfoCylinderExt,
                p_next: ptr::null(),
                position: params.position,
                radius: params.radius,
                axis: params.axis,
                axis_length: params.axis_length,
            })),
            LightKind::Distant(params) => RawLightExt::Distant(Box::new(LightInfoDistantExt {
                s_type: StructType::LightInfoDistantExt,
                p_next: ptr::null(),
                direction: params.direction,
                angular_diameter_degrees: params.angular_diameter,
            })),
            LightKind::Dome(params) => {
                let wide = WideString::new(&params.color_texture);
                let color_texture = wide.as_ptr();
                texture = Some(wide);
                RawLightExt::Dome(Box::new(LightInfoDomeExt {
                    s_type: StructType::LightInfoDomeExt,
                    p_next: ptr::null(),
                    transform: params.transform,
                    color_texture,
                }))
            }
        };

        let head = LightInfo {
            s_type: StructType::LightInfo,
            p_next: ext.as_void_ptr(),
            hash: self.hash,
            radiance: self.radiance,
        };
        RawLight {
            head,
            ext,
            _texture: texture,
        }
    }
}

#[derive(Debug)]
enum RawLightExt {
    Sphere(Box<LightInfoSphereExt>),
    Rect(Box<LightInfoRectExt>),
    Disk(Box<LightInfoDiskExt>),
    Cylinder(Box<LightInfoCylinderExt>),
    Distant(Box<LightInfoDistantExt>),
    Dome(Box<LightInfoDomeExt>),
}

impl RawLightExt {
    fn as_void_ptr(&self) -> *const c_void {
        match self {
            Self::Sphere(ext) => &**ext as *const _ as *const c_void,
            Self::Rect(ext) => &**ext as *const _ as *const c_void,
            Self::Disk(ext) => &**ext as *const _ as *const c_void,
            Self::Cylinder(ext) => &**ext as *const _ as *const c_void,
            Self::Distant(ext) => &**ext as *const _ as *const c_void,
            Self::Dome(ext) => &**ext as *const _ as *const c_void,
        }
    }
}

/// Baked light chain: base record, boxed extension and the dome texture
/// buffer when present. Valid only while this value is alive.
#[derive(Debug)]
pub struct RawLight {
    head: LightInfo,
    ext: RawLightExt,
    _texture: Option<WideString>,
}

impl RawLight {
    pub fn head(&self) -> &LightInfo {
        &self.head
    }

    pub fn sphere_ext(&self) -> Option<&LightInfoSphereExt> {
        match &self.ext {
            RawLightExt::Sphere(ext) => Some(ext),
            _ => None,
        }
    }

    pub fn rect_ext(&self) -> Option<&LightInfoRectExt> {
        match &self.ext {
            RawLightExt::Rect(ext) => Some(ext),
            _ => None,
        }
    }

    pub fn disk_ext(&self) -> Option<&LightInfoDiskExt> {
        match &self.ext {
            RawLightExt::Disk(ext) => Some(ext),
            _ => None,
        }
    }

    pub fn cylinder_ext(&self) -> Option<&LightInfoCylinderExt> {
        match &self.ext {
            RawLightExt::Cylinder(ext) => Some(ext),
            _ => None,
        }
    }

    pub fn distant_ext(&self) -> Option<&LightInfoDistantExt> {
        match &self.ext {
            RawLightExt::Distant(ext) => Some(ext),
            _ => None,
        }
    }

    pub fn dome_ext(&self) -> Option<&LightInfoDomeExt> {
        match &self.ext {
            RawLightExt::Dome(ext) => Some(ext),
            _ => None,
        }
    }
}
