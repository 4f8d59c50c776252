use approx::assert_relative_eq;
use skelwalk_core::{
    math::{Mat4, Vec3},
    rigs, Joint, JointId, JointResolver, RigError, Skeleton,
};

fn origin(m: &Mat4) -> Vec3 {
    Vec3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
}

/// Every joint's cached transforms must match a fresh recomputation from its parent.
fn assert_consistent(skeleton: &Skeleton) {
    fn check(joint: &Joint, parent: &Mat4) {
        assert_eq!(joint.parent_transform(), parent, "stale parent on {}", joint.name());
        let expected = parent * joint.rest_basis() * joint.pose_rotation();
        assert_eq!(joint.world_transform(), &expected, "stale world on {}", joint.name());
        let tip = joint.attachment_transform();
        for child in joint.children() {
            check(child, &tip);
        }
    }
    for root in skeleton.roots() {
        check(root, skeleton.base_transform());
    }
}

const NAMES: [&str; 19] = [
    "pelvis",
    "spine",
    "neck",
    "clavicle_l",
    "shoulder_l",
    "elbow_l",
    "wrist_l",
    "clavicle_r",
    "shoulder_r",
    "elbow_r",
    "wrist_r",
    "hip_l",
    "leg_l",
    "knee_l",
    "ankle_l",
    "hip_r",
    "leg_r",
    "knee_r",
    "ankle_r",
];

/// it should build the humanoid with three roots and pre-order handles
#[test]
fn humanoid_structure() {
    let skeleton = rigs::humanoid().unwrap();
    let roots: Vec<&str> = skeleton.roots().iter().map(|j| j.name()).collect();
    assert_eq!(roots, ["pelvis", "hip_l", "hip_r"]);
    assert_eq!(skeleton.len(), 19);

    let order: Vec<&str> = skeleton.iter().map(|(_, j)| j.name()).collect();
    assert_eq!(order, NAMES);
    for (i, name) in NAMES.iter().enumerate() {
        assert_eq!(skeleton.resolve(name), Some(JointId(i as u32)));
        assert_eq!(skeleton.joint(JointId(i as u32)).unwrap().name(), *name);
    }
    assert_eq!(skeleton.resolve("tail"), None);
    assert!(skeleton.joint(JointId(19)).is_none());
    assert_consistent(&skeleton);
}

/// it should place the rest pose legs under the base, feet pointing forward
#[test]
fn rest_pose_geometry() {
    let skeleton = rigs::humanoid().unwrap();
    assert_relative_eq!(origin(skeleton.base_transform()), Vec3::new(0.0, 1.0, 0.0));

    let knee = skeleton.find_by_name("knee_l").unwrap();
    assert_relative_eq!(
        origin(knee.world_transform()),
        Vec3::new(0.25, 0.45, 0.0),
        epsilon = 1e-6
    );
    let ankle = skeleton.find_by_name("ankle_l").unwrap();
    assert_relative_eq!(
        origin(&ankle.attachment_transform()),
        Vec3::new(0.25, 0.05, 0.25),
        epsilon = 1e-6
    );
    let ankle_r = skeleton.find_by_name("ankle_r").unwrap();
    assert_relative_eq!(
        origin(ankle_r.world_transform()),
        Vec3::new(-0.25, 0.05, 0.0),
        epsilon = 1e-6
    );
}

/// it should push base changes to every descendant without stale transforms
#[test]
fn base_changes_reach_every_joint() {
    let mut skeleton = rigs::humanoid().unwrap();
    skeleton.set_pose_by_name("leg_l", 30.0, 10.0, 0.0);
    skeleton.set_pose_by_name("elbow_r", -45.0, 0.0, 20.0);
    let before = skeleton.world_transforms();

    skeleton.translate(Vec3::new(0.0, 0.0, 0.5));
    assert_consistent(&skeleton);
    let after = skeleton.world_transforms();
    for (b, a) in before.iter().zip(&after) {
        assert_relative_eq!(origin(a), origin(b) + Vec3::new(0.0, 0.0, 0.5), epsilon = 1e-6);
        assert_relative_eq!(
            a.fixed_view::<3, 3>(0, 0).into_owned(),
            b.fixed_view::<3, 3>(0, 0).into_owned(),
            epsilon = 1e-6
        );
    }

    skeleton.rotate(90.0, Vec3::y()).unwrap();
    assert_consistent(&skeleton);
    let rotated = skeleton.world_transforms();
    assert!(rotated.iter().zip(&after).all(|(r, a)| r != a));

    skeleton.reset_base();
    assert_eq!(skeleton.base_transform(), &Mat4::identity());
    assert_consistent(&skeleton);

    let m = Mat4::new_translation(&Vec3::new(3.0, 0.0, 0.0));
    skeleton.set_base_transform(m);
    assert_consistent(&skeleton);
    assert_eq!(skeleton.roots()[1].parent_transform(), &m);
}

/// it should refuse a zero rotation axis and keep the base
#[test]
fn rotate_with_zero_axis_fails() {
    let mut skeleton = rigs::humanoid().unwrap();
    let base = *skeleton.base_transform();
    assert_eq!(skeleton.rotate(10.0, Vec3::zeros()), Err(RigError::ZeroAxis));
    assert_eq!(skeleton.base_transform(), &base);
}

/// it should reject non-finite base moves and keep every joint finite
#[test]
fn non_finite_base_moves_are_rejected() {
    let mut skeleton = rigs::humanoid().unwrap();
    let base = *skeleton.base_transform();
    let before = skeleton.world_transforms();

    assert_eq!(
        skeleton.rotate(10.0, Vec3::new(f32::INFINITY, 0.0, 0.0)),
        Err(RigError::ZeroAxis)
    );
    assert_eq!(
        skeleton.rotate(10.0, Vec3::new(0.0, f32::NAN, 1.0)),
        Err(RigError::ZeroAxis)
    );
    skeleton.translate(Vec3::new(0.0, f32::NEG_INFINITY, 0.0));

    assert_eq!(skeleton.base_transform(), &base);
    assert_eq!(skeleton.world_transforms(), before);
    assert!(skeleton
        .world_transforms()
        .iter()
        .all(|m| m.iter().all(|c| c.is_finite())));
}

/// it should keep the first pre-order match when names repeat
#[test]
fn duplicate_names_resolve_to_first_preorder_match() {
    let a = Joint::new("a", 1.0).with_child(Joint::new("dup", 1.0));
    let b = Joint::new("dup", 2.0);
    let mut skeleton = Skeleton::new("dups", vec![a, b], Mat4::identity());

    assert_eq!(skeleton.resolve("dup"), Some(JointId(1)));
    assert_eq!(skeleton.find_by_name("dup").unwrap().length(), 1.0);
    skeleton.set_pose_by_name("dup", 15.0, 0.0, 0.0);
    assert_eq!(skeleton.joint(JointId(1)).unwrap().angles()[0], 15.0);
    assert_eq!(skeleton.joint(JointId(2)).unwrap().angles()[0], 0.0);
}

/// it should zero every pose on reset
#[test]
fn reset_pose_restores_rest() {
    let mut skeleton = rigs::humanoid().unwrap();
    let rest = skeleton.world_transforms();
    skeleton.set_pose_by_name("spine", 10.0, 20.0, 30.0);
    skeleton.set_pose_by_name("knee_r", -90.0, 0.0, 0.0);
    skeleton.reset_pose();
    assert!(skeleton.iter().all(|(_, j)| j.angles() == [0.0; 3]));
    assert_eq!(skeleton.world_transforms(), rest);
}

/// it should reject a degenerate base frame
#[test]
fn degenerate_frame_rejected() {
    let err = Skeleton::with_frame("bad", Vec3::zeros(), Vec3::y(), Vec3::y(), vec![]).unwrap_err();
    assert!(matches!(err, RigError::DegenerateBasis { .. }));
}
