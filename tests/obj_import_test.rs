use std::fs;
use std::path::PathBuf;

use rtx_remix::resources::load_obj;

const QUAD_OBJ: &str = "\
o quad
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/1 3/3/1 4/4/1
";

fn write_temp_obj(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("rtx_remix_{name}_{}.obj", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_a_quad_as_a_triangulated_mesh() {
    let path = write_temp_obj("quad", QUAD_OBJ);
    let meshes = load_obj(&path, None).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(meshes.len(), 1);
    let mesh = &meshes[0];
    assert_ne!(mesh.hash(), 0);
    assert_eq!(mesh.surfaces().len(), 1);

    let surface = &mesh.surfaces()[0];
    // The quad triangulates into two triangles.
    assert_eq!(surface.indices().len(), 6);
    assert!(surface.vertices().len() >= 4);
    assert!(surface.material().is_none());

    let v = &surface.vertices()[0];
    assert_eq!(v.position, rtx_remix::math::Float3::new(0.0, 0.0, 0.0));
    // OBJ texture coordinates are flipped vertically on import.
    assert_eq!(v.texcoord.y, 1.0);
    assert_eq!(v.color, 0xFFFF_FFFF);
}

#[test]
fn each_obj_object_becomes_its_own_mesh() {
    let two_objects = format!("{QUAD_OBJ}\no second\nv 2.0 0.0 0.0\nv 3.0 0.0 0.0\nv 2.0 1.0 0.0\nf 5 6 7\n");
    let path = write_temp_obj("two", &two_objects);
    let meshes = load_obj(&path, None).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(meshes.len(), 2);
    assert_ne!(meshes[0].hash(), meshes[1].hash());
}

#[test]
fn missing_file_is_an_error() {
    let path = std::env::temp_dir().join("rtx_remix_does_not_exist.obj");
    assert!(load_obj(&path, None).is_err());
}
