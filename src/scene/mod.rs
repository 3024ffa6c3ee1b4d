//! Scene-side descriptors: everything the caller assembles locally before
//! handing it to the session for registration or drawing.

pub mod camera;
pub mod instance;
pub mod light;
pub mod material;
pub mod mesh;
pub mod skinning;

pub use camera::{Camera, CameraProjection, CameraType};
pub use instance::{CategoryFlags, MeshInstance};
pub use light::{
    CylinderLight, DiskLight, DistantLight, DomeLight, Light, LightKind, LightShaping, RectLight,
    SphereLight,
};
pub use material::{
    AlphaTestType, BlendType, FilterMode, Material, MaterialBase, MaterialKind, OpaqueMaterial,
    PortalMaterial, SubsurfaceScattering, TranslucentMaterial, WrapMode,
};
pub use mesh::{Mesh, MeshSurface, Vertex};
pub use skinning::{Skeleton, SkinningData};
