//! Session façade over the native engine: owns the engine boundary, tracks
//! whether the API is up, and moves descriptors across the boundary in their
//! baked wire form.

use std::ffi::c_void;
use std::ptr;

use crate::error::{RemixError, Result};
use crate::ffi::records::{PresentInfo, StartupInfo};
use crate::ffi::{Engine, Handle, ReturnCode, StructType};
use crate::scene::camera::Camera;
use crate::scene::instance::MeshInstance;
use crate::scene::light::Light;
use crate::scene::material::Material;
use crate::scene::mesh::Mesh;

/// Startup settings passed to [`Session::init`].
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Win32 HWND of the output window; 0 lets the engine create its own.
    pub hwnd: isize,
    pub disable_srgb_conversion_for_output: bool,
    /// Disables swapchain presentation; the host retrieves the raw frame
    /// image itself, e.g. to composite it through another graphics API.
    pub force_no_vk_swapchain: bool,
    pub editor_mode_enabled: bool,
}

impl StartupConfig {
    fn to_raw(&self) -> StartupInfo {
        StartupInfo {
            s_type: StructType::StartupInfo,
            p_next: ptr::null(),
            hwnd: self.hwnd as *mut c_void,
            disable_srgb_conversion_for_output: self.disable_srgb_conversion_for_output as i32,
            force_no_vk_swapchain: self.force_no_vk_swapchain as i32,
            editor_mode_enabled: self.editor_mode_enabled as i32,
        }
    }
}

/// A connection to the engine. All resource registration and per-frame
/// drawing goes through here; the session is the only writer of the
/// descriptor handles it mints.
pub struct Session {
    engine: Box<dyn Engine>,
    initialized: bool,
}

impl Session {
    /// Wraps an engine boundary. No native call happens until [`Session::init`].
    pub fn new(engine: Box<dyn Engine>) -> Self {
        Self {
            engine,
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Starts the engine.
    ///
    /// `ALREADY_EXISTS` means a previous init in this process already stands
    /// and is treated as success.
    // TODO: confirm against a dxvk-remix build whether re-init after destroy
    // also reports ALREADY_EXISTS.
    pub fn init(&mut self, config: &StartupConfig) -> Result<()> {
        let info = config.to_raw();
        let code = self.engine.init(&info);
        if !code.is_success() && code != ReturnCode::ALREADY_EXISTS {
            log::error!("engine init failed: {code}");
            return Err(RemixError::FailedToInitializeApi { code });
        }
        self.initialized = true;
        log::info!("remix session initialized (hwnd {:#x})", config.hwnd);
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(RemixError::ApiNotInitialized)
        }
    }

    /// Maps a native status to a crate error. The engine reporting an
    /// unregistered device means our local `initialized` flag lied, so that
    /// status folds into [`RemixError::ApiNotInitialized`].
    fn check(call: &'static str, code: ReturnCode) -> Result<()> {
        if code.is_success() {
            return Ok(());
        }
        if code == ReturnCode::REMIX_DEVICE_WAS_NOT_REGISTERED {
            return Err(RemixError::ApiNotInitialized);
        }
        Err(RemixError::NativeCall { call, code })
    }

    /// Binds `camera` for the frame being assembled. Call every frame.
    pub fn setup_camera(&mut self, camera: &Camera) -> Result<()> {
        self.ensure_initialized()?;
        let raw = camera.to_raw();
        Self::check("setup_camera", self.engine.setup_camera(raw.head()))
    }

    /// Registers `mesh` with the engine and stores the minted handle on it.
    pub fn create_mesh(&mut self, mesh: &Mesh) -> Result<()> {
        self.ensure_initialized()?;
        let raw = mesh.to_raw()?;
        let mut handle = Handle::NULL;
        Self::check("create_mesh", self.engine.create_mesh(raw.head(), &mut handle))?;
        mesh.handle.set(handle);
        log::debug!("created mesh {:#x}", mesh.hash());
        Ok(())
    }

    /// Releases a registered mesh and clears its handle. A mesh that was
    /// never registered is left alone.
    pub fn destroy_mesh(&mut self, mesh: &Mesh) -> Result<()> {
        self.ensure_initialized()?;
        let handle = mesh.handle.get();
        if handle.is_null() {
            return Ok(());
        }
        Self::check("destroy_mesh", self.engine.destroy_mesh(handle))?;
        mesh.handle.set(Handle::NULL);
        log::debug!("destroyed mesh {:#x}", mesh.hash());
        Ok(())
    }

    /// Registers `light` with the engine and stores the minted handle on it.
    pub fn create_light(&mut self, light: &Light) -> Result<()> {
        self.ensure_initialized()?;
        let raw = light.to_raw();
        let mut handle = Handle::NULL;
        Self::check("create_light", self.engine.create_light(raw.head(), &mut handle))?;
        light.handle.set(handle);
        log::debug!("created light {:#x}", light.hash());
        Ok(())
    }

    /// Releases a registered light and clears its handle. A light that was
    /// never registered is left alone.
    pub fn destroy_light(&mut self, light: &Light) -> Result<()> {
        self.ensure_initialized()?;
        let handle = light.handle.get();
        if handle.is_null() {
            return Ok(());
        }
        Self::check("destroy_light", self.engine.destroy_light(handle))?;
        light.handle.set(Handle::NULL);
        log::debug!("destroyed light {:#x}", light.hash());
        Ok(())
    }

    /// Registers `material` with the engine and stores the minted handle on
    /// it. Registration must precede attaching the material to a surface.
    pub fn create_material(&mut self, material: &Material) -> Result<()> {
        self.ensure_initialized()?;
        let raw = material.to_raw();
        let mut handle = Handle::NULL;
        Self::check(
            "create_material",
            self.engine.create_material(raw.head(), &mut handle),
        )?;
        material.handle.set(handle);
        log::debug!("created material {:#x}", material.hash());
        Ok(())
    }

    /// Releases a registered material and clears its handle. A material that
    /// was never registered is left alone.
    pub fn destroy_material(&mut self, material: &Material) -> Result<()> {
        self.ensure_initialized()?;
        let handle = material.handle.get();
        if handle.is_null() {
            return Ok(());
        }
        Self::check("destroy_material", self.engine.destroy_material(handle))?;
        material.handle.set(Handle::NULL);
        log::debug!("destroyed material {:#x}", material.hash());
        Ok(())
    }

    /// Submits one occurrence of a registered mesh for the current frame.
    pub fn draw_instance(&mut self, instance: &MeshInstance) -> Result<()> {
        self.ensure_initialized()?;
        let raw = instance.to_raw()?;
        Self::check("draw_instance", self.engine.draw_instance(raw.head()))
    }

    /// Submits a registered light for the current frame.
    pub fn draw_light_instance(&mut self, light: &Light) -> Result<()> {
        self.ensure_initialized()?;
        let handle = light.handle.get();
        if handle.is_null() {
            return Err(RemixError::ResourceNotInitialized("light"));
        }
        Self::check("draw_light_instance", self.engine.draw_light_instance(handle))
    }

    /// Renders the assembled frame. `hwnd_override` redirects presentation to
    /// another window, for multi-window hosts.
    pub fn present(&mut self, hwnd_override: Option<isize>) -> Result<()> {
        self.ensure_initialized()?;
        match hwnd_override {
            None => self.engine.present(None),
            Some(hwnd) => {
                let info = PresentInfo {
                    s_type: StructType::PresentInfo,
                    p_next: ptr::null(),
                    hwnd_override: hwnd as *mut c_void,
                };
                self.engine.present(Some(&info));
            }
        }
        Ok(())
    }

    /// Tears the engine down. The session is marked uninitialized whether or
    /// not the native teardown reports success, so a failed shutdown cannot
    /// leave a session that still accepts calls.
    pub fn shutdown(&mut self) -> Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;
        let code = self.engine.destroy();
        Self::check("destroy", code)?;
        log::info!("remix session shut down");
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.initialized {
            self.initialized = false;
            let code = self.engine.destroy();
            if !code.is_success() {
                log::error!("engine teardown on drop failed: {code}");
            }
        }
    }
}
