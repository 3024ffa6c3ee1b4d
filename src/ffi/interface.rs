//! Entry points of the native engine.
//!
//! The engine is an opaque collaborator reached through a fixed set of
//! C-ABI functions. [`Engine`] is the safe-signature seam the session façade
//! talks to (tests substitute their own implementation); [`FnTable`] adapts a
//! resolved set of native function pointers onto that seam. How the library
//! itself gets loaded and its symbols resolved is the host application's
//! business.

use std::ptr;

use super::codes::ReturnCode;
use super::records::{
    CameraInfo, Handle, InstanceInfo, LightInfo, MaterialInfo, MeshInfo, PresentInfo, StartupInfo,
};

/// The native engine boundary, one method per exported entry point.
///
/// All calls are synchronous and single-threaded; a record passed by
/// reference is only borrowed for the duration of the call.
pub trait Engine {
    fn init(&mut self, info: &StartupInfo) -> ReturnCode;
    fn setup_camera(&mut self, info: &CameraInfo) -> ReturnCode;
    fn create_mesh(&mut self, info: &MeshInfo, handle: &mut Handle) -> ReturnCode;
    fn destroy_mesh(&mut self, handle: Handle) -> ReturnCode;
    fn create_light(&mut self, info: &LightInfo, handle: &mut Handle) -> ReturnCode;
    fn destroy_light(&mut self, handle: Handle) -> ReturnCode;
    fn create_material(&mut self, info: &MaterialInfo, handle: &mut Handle) -> ReturnCode;
    fn destroy_material(&mut self, handle: Handle) -> ReturnCode;
    fn draw_instance(&mut self, info: &InstanceInfo) -> ReturnCode;
    fn draw_light_instance(&mut self, handle: Handle) -> ReturnCode;
    fn present(&mut self, info: Option<&PresentInfo>);
    fn destroy(&mut self) -> ReturnCode;
}

/// Resolved function pointers of the `remixapi` shim library.
///
/// The caller is responsible for resolving each symbol against a loaded
/// library; every pointer must refer to the exported function of the same
/// name for the lifetime of the table.
#[derive(Clone, Copy)]
pub struct FnTable {
    pub init: unsafe extern "C" fn(*const StartupInfo) -> u32,
    pub setup_camera: unsafe extern "C" fn(*const CameraInfo) -> u32,
    pub create_mesh: unsafe extern "C" fn(*const MeshInfo, *mut Handle) -> u32,
    pub destroy_mesh: unsafe extern "C" fn(Handle) -> u32,
    pub create_light: unsafe extern "C" fn(*const LightInfo, *mut Handle) -> u32,
    pub destroy_light: unsafe extern "C" fn(Handle) -> u32,
    pub create_material: unsafe extern "C" fn(*const MaterialInfo, *mut Handle) -> u32,
    pub destroy_material: unsafe extern "C" fn(Handle) -> u32,
    pub draw_instance: unsafe extern "C" fn(*const InstanceInfo) -> u32,
    pub draw_light_instance: unsafe extern "C" fn(Handle) -> u32,
    pub present: unsafe extern "C" fn(*const PresentInfo),
    pub destroy: unsafe extern "C" fn() -> u32,
}

impl Engine for FnTable {
    fn init(&mut self, info: &StartupInfo) -> ReturnCode {
        // SAFETY: the record and its chain are alive for the whole call; the
        // baking layer guarantees tag/link correctness by construction.
        ReturnCode(unsafe { (self.init)(info) })
    }

    fn setup_camera(&mut self, info: &CameraInfo) -> ReturnCode {
        // SAFETY: as `init`.
        ReturnCode(unsafe { (self.setup_camera)(info) })
    }

    fn create_mesh(&mut self, info: &MeshInfo, handle: &mut Handle) -> ReturnCode {
        // SAFETY: as `init`; `handle` is a valid out pointer.
        ReturnCode(unsafe { (self.create_mesh)(info, handle) })
    }

    fn destroy_mesh(&mut self, handle: Handle) -> ReturnCode {
        // SAFETY: handles are passed by value.
        ReturnCode(unsafe { (self.destroy_mesh)(handle) })
    }

    fn create_light(&mut self, info: &LightInfo, handle: &mut Handle) -> ReturnCode {
        // SAFETY: as `create_mesh`.
        ReturnCode(unsafe { (self.create_light)(info, handle) })
    }

    fn destroy_light(&mut self, handle: Handle) -> ReturnCode {
        // SAFETY: handles are passed by value.
        ReturnCode(unsafe { (self.destroy_light)(handle) })
    }

    fn create_material(&mut self, info: &MaterialInfo, handle: &mut Handle) -> ReturnCode {
        // SAFETY: as `create_mesh`.
        ReturnCode(unsafe { (self.create_material)(info, handle) })
    }

    fn destroy_material(&mut self, handle: Handle) -> ReturnCode {
        // SAFETY: handles are passed by value.
        ReturnCode(unsafe { (self.destroy_material)(handle) })
    }

    fn draw_instance(&mut self, info: &InstanceInfo) -> ReturnCode {
        // SAFETY: as `init`.
        ReturnCode(unsafe { (self.draw_instance)(info) })
    }

    fn draw_light_instance(&mut self, handle: Handle) -> ReturnCode {
        // SAFETY: handles are passed by value.
        ReturnCode(unsafe { (self.draw_light_instance)(handle) })
    }

    fn present(&mut self, info: Option<&PresentInfo>) {
        let ptr = info.map_or(ptr::null(), |i| i as *const PresentInfo);
        // SAFETY: a null pointer selects the engine's default present target.
        unsafe { (self.present)(ptr) }
    }

    fn destroy(&mut self) -> ReturnCode {
        // SAFETY: teardown takes no arguments.
        ReturnCode(unsafe { (self.destroy)() })
    }
}
