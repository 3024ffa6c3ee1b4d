use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::c_void;
use std::rc::Rc;

use rtx_remix::ffi::records::{
    CameraInfo, InstanceInfo, LightInfo, MaterialInfo, MeshInfo, PresentInfo, StartupInfo,
};
use rtx_remix::math::Transform;
use rtx_remix::{Engine, Handle, ReturnCode};

/// Enables log capture for a test; safe to call from every test.
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// What an engine saw when an instance was drawn.
#[derive(Debug, Clone)]
pub(crate) struct InstanceSnapshot {
    pub category_flags: u32,
    pub mesh: Handle,
    pub transform: Transform,
    pub double_sided: u32,
    pub has_skeleton: bool,
}

/// Everything the recording engine observed, shared between the test body
/// and the engine boxed into the session.
#[derive(Default)]
pub(crate) struct EngineLog {
    pub calls: Vec<&'static str>,
    scripted: HashMap<&'static str, ReturnCode>,
    next_handle: usize,
    pub startup_hwnd: Option<usize>,
    pub camera_types: Vec<i32>,
    pub created_mesh_hashes: Vec<u64>,
    pub created_light_hashes: Vec<u64>,
    pub created_material_hashes: Vec<u64>,
    pub destroyed_handles: Vec<Handle>,
    pub instances: Vec<InstanceSnapshot>,
    pub drawn_light_handles: Vec<Handle>,
    pub presents: Vec<Option<usize>>,
}

impl EngineLog {
    /// Makes `call` return `code` instead of success.
    pub fn script(&mut self, call: &'static str, code: ReturnCode) {
        self.scripted.insert(call, code);
    }

    pub fn call_count(&self, call: &'static str) -> usize {
        self.calls.iter().filter(|&&c| c == call).count()
    }

    fn record(&mut self, call: &'static str) -> ReturnCode {
        self.calls.push(call);
        self.scripted
            .get(call)
            .copied()
            .unwrap_or(ReturnCode::SUCCESS)
    }

    fn mint_handle(&mut self) -> Handle {
        self.next_handle += 1;
        Handle::from_raw(self.next_handle as *mut c_void)
    }
}

/// Engine double that logs every call into a shared [`EngineLog`] and mints
/// sequential non-null handles.
pub(crate) struct RecordingEngine(pub(crate) Rc<RefCell<EngineLog>>);

impl RecordingEngine {
    pub fn new() -> (Self, Rc<RefCell<EngineLog>>) {
        let log = Rc::new(RefCell::new(EngineLog::default()));
        (Self(Rc::clone(&log)), log)
    }
}

impl Engine for RecordingEngine {
    fn init(&mut self, info: &StartupInfo) -> ReturnCode {
        let mut log = self.0.borrow_mut();
        log.startup_hwnd = Some(info.hwnd as usize);
        log.record("init")
    }

    fn setup_camera(&mut self, info: &CameraInfo) -> ReturnCode {
        let mut log = self.0.borrow_mut();
        log.camera_types.push(info.camera_type);
        log.record("setup_camera")
    }

    fn create_mesh(&mut self, info: &MeshInfo, handle: &mut Handle) -> ReturnCode {
        let mut log = self.0.borrow_mut();
        log.created_mesh_hashes.push(info.hash);
        let code = log.record("create_mesh");
        if code.is_success() {
            *handle = log.mint_handle();
        }
        code
    }

    fn destroy_mesh(&mut self, handle: Handle) -> ReturnCode {
        let mut log = self.0.borrow_mut();
        log.destroyed_handles.push(handle);
        log.record("destroy_mesh")
    }

    fn create_light(&mut self, info: &LightInfo, handle: &mut Handle) -> ReturnCode {
        let mut log = self.0.borrow_mut();
        log.created_light_hashes.push(info.hash);
        let code = log.record("create_light");
        if code.is_success() {
            *handle = log.mint_handle();
        }
        code
    }

    fn destroy_light(&mut self, handle: Handle) -> ReturnCode {
        let mut log = self.0.borrow_mut();
        log.destroyed_handles.push(handle);
        log.record("destroy_light")
    }

    fn create_material(&mut self, info: &MaterialInfo, handle: &mut Handle) -> ReturnCode {
        let mut log = self.0.borrow_mut();
        log.created_material_hashes.push(info.hash);
        let code = log.record("create_material");
        if code.is_success() {
            *handle = log.mint_handle();
        }
        code
    }

    fn destroy_material(&mut self, handle: Handle) -> ReturnCode {
        let mut log = self.0.borrow_mut();
        log.destroyed_handles.push(handle);
        log.record("destroy_material")
    }

    fn draw_instance(&mut self, info: &InstanceInfo) -> ReturnCode {
        let mut log = self.0.borrow_mut();
        log.instances.push(InstanceSnapshot {
            category_flags: info.category_flags,
            mesh: info.mesh,
            transform: info.transform,
            double_sided: info.double_sided,
            has_skeleton: !info.p_next.is_null(),
        });
        log.record("draw_instance")
    }

    fn draw_light_instance(&mut self, handle: Handle) -> ReturnCode {
        let mut log = self.0.borrow_mut();
        log.drawn_light_handles.push(handle);
        log.record("draw_light_instance")
    }

    fn present(&mut self, info: Option<&PresentInfo>) {
        let mut log = self.0.borrow_mut();
        let hwnd = info.map(|i| i.hwnd_override as usize);
        log.presents.push(hwnd);
        log.record("present");
    }

    fn destroy(&mut self) -> ReturnCode {
        let mut log = self.0.borrow_mut();
        log.record("destroy")
    }
}
