use rtx_remix::error::RemixError;
use rtx_remix::math::Transform;
use rtx_remix::scene::{Skeleton, SkinningData};

#[test]
fn accepts_well_formed_buffers() {
    let skinning = SkinningData::new(
        2,
        vec![0.5, 0.5, 1.0, 0.0, 0.25, 0.75],
        vec![0, 1, 1, 0, 2, 3],
    )
    .unwrap();
    assert_eq!(skinning.vertex_count(), 3);
    assert_eq!(skinning.bones_per_vertex(), 2);
}

#[test]
fn rejects_empty_weights() {
    let err = SkinningData::new(1, vec![], vec![0]).unwrap_err();
    match err {
        RemixError::InvalidSkinningData(msg) => {
            assert!(msg.contains("blend_weights"), "unexpected message: {msg}")
        }
        other => panic!("expected InvalidSkinningData, got {other:?}"),
    }
}

#[test]
fn rejects_zero_bones_per_vertex() {
    let err = SkinningData::new(0, vec![1.0], vec![0]).unwrap_err();
    assert!(matches!(err, RemixError::InvalidSkinningData(_)));
}

#[test]
fn rejects_length_not_multiple_of_bones_per_vertex() {
    let err = SkinningData::new(4, vec![1.0, 0.0, 0.0], vec![0, 1, 2]).unwrap_err();
    match err {
        RemixError::InvalidSkinningData(msg) => {
            assert!(msg.contains("multiple"), "unexpected message: {msg}")
        }
        other => panic!("expected InvalidSkinningData, got {other:?}"),
    }
}

#[test]
fn rejects_mismatched_buffer_lengths() {
    let err = SkinningData::new(1, vec![1.0, 1.0], vec![0]).unwrap_err();
    assert!(matches!(err, RemixError::InvalidSkinningData(_)));
}

#[test]
fn collect_all_check_reports_every_problem_at_once() {
    // 3 weights (not a multiple of 2) against 4 indices: the divisibility
    // violation plus the length mismatch.
    let violations = SkinningData::check_buffers(2, &[1.0, 0.0, 0.5], &[0, 1, 2, 3]);
    assert_eq!(violations.len(), 2);
    assert!(violations[0].contains("multiple"));
    assert!(violations[1].contains("must match"));

    let skinning = SkinningData::new(2, vec![1.0, 0.0], vec![0, 1]).unwrap();
    assert!(skinning.violations().is_empty());
}

#[test]
fn baked_record_mirrors_the_buffers() {
    let skinning = SkinningData::new(2, vec![0.6, 0.4, 1.0, 0.0], vec![0, 1, 2, 0]).unwrap();
    let raw = skinning.to_raw().unwrap();
    let record = raw.record();
    assert_eq!(record.bones_per_vertex, 2);
    assert_eq!(record.blend_weights_count, 4);
    assert_eq!(record.blend_indices_count, 4);
    assert_eq!(record.blend_weights_values, raw.weights().as_ptr());
    assert_eq!(record.blend_indices_values, raw.indices().as_ptr());
    assert_eq!(raw.weights(), &[0.6, 0.4, 1.0, 0.0]);
}

#[test]
fn skeleton_starts_as_identity_bones() {
    let skeleton = Skeleton::new(3);
    assert_eq!(skeleton.bone_count(), 3);
    assert!(skeleton
        .bone_transforms()
        .iter()
        .all(|t| *t == Transform::IDENTITY));
}

#[test]
#[should_panic(expected = "pose must cover all 2 bones")]
fn partial_pose_is_rejected() {
    let mut skeleton = Skeleton::new(2);
    skeleton.set_bone_transforms(&[Transform::IDENTITY]);
}

#[test]
fn skeleton_pose_updates_in_bulk() {
    let mut skeleton = Skeleton::new(2);
    let pose = [
        Transform::from_translation(cgmath::Vector3::new(1.0, 2.0, 3.0)),
        Transform::IDENTITY,
    ];
    skeleton.set_bone_transforms(&pose);
    assert_eq!(skeleton.bone_transforms(), &pose);
}
