use std::rc::Rc;

use rtx_remix::error::RemixError;
use rtx_remix::math::{Float2, Float3, Transform};
use rtx_remix::scene::{
    Camera, CategoryFlags, Light, Material, MaterialBase, Mesh, MeshInstance, MeshSurface,
    OpaqueMaterial, SphereLight, Vertex,
};
use rtx_remix::{ReturnCode, Session, StartupConfig};

mod common;

use crate::common::test_utils::{init_logging, RecordingEngine};

fn triangle(hash: u64, material: Option<Rc<Material>>) -> Rc<Mesh> {
    let vertices = vec![
        Vertex::new(
            Float3::new(0.0, 0.0, 0.0),
            Float3::new(0.0, 0.0, -1.0),
            Float2::new(0.0, 0.0),
        ),
        Vertex::new(
            Float3::new(1.0, 0.0, 0.0),
            Float3::new(0.0, 0.0, -1.0),
            Float2::new(1.0, 0.0),
        ),
        Vertex::new(
            Float3::new(0.0, 1.0, 0.0),
            Float3::new(0.0, 0.0, -1.0),
            Float2::new(0.0, 1.0),
        ),
    ];
    let surface = MeshSurface::new(vertices, vec![0, 1, 2], None, material).unwrap();
    Rc::new(Mesh::new(vec![surface], hash))
}

#[test]
fn init_marks_the_session_ready() {
    let (engine, log) = RecordingEngine::new();
    let mut session = Session::new(Box::new(engine));
    assert!(!session.is_initialized());

    session
        .init(&StartupConfig {
            hwnd: 0x1234,
            ..StartupConfig::default()
        })
        .unwrap();
    assert!(session.is_initialized());
    assert_eq!(log.borrow().startup_hwnd, Some(0x1234));
}

#[test]
fn failed_init_leaves_the_session_unusable() {
    let (engine, log) = RecordingEngine::new();
    log.borrow_mut()
        .script("init", ReturnCode::LOAD_LIBRARY_FAILURE);
    let mut session = Session::new(Box::new(engine));

    let err = session.init(&StartupConfig::default()).unwrap_err();
    assert_eq!(
        err,
        RemixError::FailedToInitializeApi {
            code: ReturnCode::LOAD_LIBRARY_FAILURE
        }
    );
    assert!(!session.is_initialized());

    let mesh = triangle(1, None);
    let err = session.create_mesh(&mesh).unwrap_err();
    assert_eq!(err, RemixError::ApiNotInitialized);
    // Short-circuited before reaching the engine.
    assert_eq!(log.borrow().call_count("create_mesh"), 0);
}

#[test]
fn init_treats_already_exists_as_success() {
    let (engine, log) = RecordingEngine::new();
    let mut session = Session::new(Box::new(engine));
    session.init(&StartupConfig::default()).unwrap();

    // A second init finds the engine already running and still succeeds.
    log.borrow_mut().script("init", ReturnCode::ALREADY_EXISTS);
    session.init(&StartupConfig::default()).unwrap();
    assert!(session.is_initialized());
    assert_eq!(log.borrow().call_count("init"), 2);
}

#[test]
fn create_mesh_assigns_a_handle() {
    let (engine, log) = RecordingEngine::new();
    let mut session = Session::new(Box::new(engine));
    session.init(&StartupConfig::default()).unwrap();

    let mesh = triangle(0xC0FFEE, None);
    assert!(mesh.handle().is_null());
    session.create_mesh(&mesh).unwrap();
    assert!(!mesh.handle().is_null());
    assert_eq!(log.borrow().created_mesh_hashes, vec![0xC0FFEE]);
}

#[test]
fn failed_create_leaves_the_handle_null() {
    let (engine, log) = RecordingEngine::new();
    let mut session = Session::new(Box::new(engine));
    session.init(&StartupConfig::default()).unwrap();
    log.borrow_mut()
        .script("create_mesh", ReturnCode::INVALID_ARGUMENTS);

    let mesh = triangle(1, None);
    let err = session.create_mesh(&mesh).unwrap_err();
    assert_eq!(
        err,
        RemixError::NativeCall {
            call: "create_mesh",
            code: ReturnCode::INVALID_ARGUMENTS
        }
    );
    assert!(mesh.handle().is_null());
}

#[test]
fn destroying_twice_only_reaches_the_engine_once() {
    let (engine, log) = RecordingEngine::new();
    let mut session = Session::new(Box::new(engine));
    session.init(&StartupConfig::default()).unwrap();

    let mesh = triangle(1, None);
    session.create_mesh(&mesh).unwrap();
    session.destroy_mesh(&mesh).unwrap();
    assert!(mesh.handle().is_null());

    // The handle was cleared, so this is a no-op.
    session.destroy_mesh(&mesh).unwrap();
    assert_eq!(log.borrow().call_count("destroy_mesh"), 1);
}

#[test]
fn unregistered_device_status_folds_into_api_not_initialized() {
    let (engine, log) = RecordingEngine::new();
    let mut session = Session::new(Box::new(engine));
    session.init(&StartupConfig::default()).unwrap();
    log.borrow_mut()
        .script("setup_camera", ReturnCode::REMIX_DEVICE_WAS_NOT_REGISTERED);

    let err = session.setup_camera(&Camera::default()).unwrap_err();
    assert_eq!(err, RemixError::ApiNotInitialized);
}

#[test]
fn drawing_an_unregistered_light_fails_fast() {
    let (engine, log) = RecordingEngine::new();
    let mut session = Session::new(Box::new(engine));
    session.init(&StartupConfig::default()).unwrap();

    let light = Light::sphere(9, Float3::new(1.0, 1.0, 1.0), SphereLight::default()).unwrap();
    let err = session.draw_light_instance(&light).unwrap_err();
    assert_eq!(err, RemixError::ResourceNotInitialized("light"));
    assert_eq!(log.borrow().call_count("draw_light_instance"), 0);
}

#[test]
fn present_passes_the_override_through() {
    let (engine, log) = RecordingEngine::new();
    let mut session = Session::new(Box::new(engine));
    session.init(&StartupConfig::default()).unwrap();

    session.present(None).unwrap();
    session.present(Some(0xBEEF)).unwrap();
    assert_eq!(log.borrow().presents, vec![None, Some(0xBEEF)]);
}

#[test]
fn shutdown_tears_down_once() {
    let (engine, log) = RecordingEngine::new();
    let mut session = Session::new(Box::new(engine));
    session.init(&StartupConfig::default()).unwrap();

    session.shutdown().unwrap();
    assert!(!session.is_initialized());
    session.shutdown().unwrap();
    assert_eq!(log.borrow().call_count("destroy"), 1);

    // Dropping after an explicit shutdown must not call destroy again.
    drop(session);
    assert_eq!(log.borrow().call_count("destroy"), 1);
}

#[test]
fn dropping_a_live_session_tears_the_engine_down() {
    let (engine, log) = RecordingEngine::new();
    {
        let mut session = Session::new(Box::new(engine));
        session.init(&StartupConfig::default()).unwrap();
    }
    assert_eq!(log.borrow().call_count("destroy"), 1);
}

#[test]
fn full_frame_reaches_the_engine_in_order() {
    init_logging();
    let (engine, log) = RecordingEngine::new();
    let mut session = Session::new(Box::new(engine));
    session.init(&StartupConfig::default()).unwrap();

    let material = Rc::new(Material::opaque(
        0x4A,
        MaterialBase::default(),
        OpaqueMaterial::default(),
    ));
    session.create_material(&material).unwrap();

    let mesh = triangle(0x7E57, Some(Rc::clone(&material)));
    session.create_mesh(&mesh).unwrap();

    let light = Light::sphere(0x11, Float3::new(25.0, 25.0, 20.0), SphereLight::default()).unwrap();
    session.create_light(&light).unwrap();

    session.setup_camera(&Camera::default()).unwrap();

    let transform = Transform::from_translation(cgmath::Vector3::new(0.0, 1.0, 4.0));
    let mut instance = MeshInstance::new(Rc::clone(&mesh), transform).unwrap();
    instance.set_category_flags(CategoryFlags::WORLD_MATTE);
    session.draw_instance(&instance).unwrap();
    session.draw_light_instance(&light).unwrap();
    session.present(None).unwrap();

    let log = log.borrow();
    assert_eq!(
        log.calls,
        vec![
            "init",
            "create_material",
            "create_mesh",
            "create_light",
            "setup_camera",
            "draw_instance",
            "draw_light_instance",
            "present",
        ]
    );

    let snapshot = &log.instances[0];
    assert_eq!(snapshot.mesh, mesh.handle());
    assert_eq!(snapshot.transform, transform);
    assert_eq!(snapshot.category_flags, CategoryFlags::WORLD_MATTE.bits());
    assert!(!snapshot.has_skeleton);
    assert_eq!(log.drawn_light_handles, vec![light.handle()]);
}
