use approx::assert_relative_eq;
use proptest::prelude::*;
use skelwalk_core::{
    math::{self, Mat4, Vec3},
    rigs, Axis, Joint, JointResolver, RigError,
};

fn origin(m: &Mat4) -> Vec3 {
    Vec3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
}

fn arbitrary_parent(angles: [f32; 3], offset: [f32; 3]) -> Mat4 {
    math::translate(&math::pose_rotation(angles), &Vec3::from(offset))
}

proptest! {
    /// it should keep world == parent × rest × pose after any parent/pose update
    #[test]
    fn world_transform_is_parent_rest_pose(
        parent_angles in prop::array::uniform3(-180.0f32..180.0),
        parent_offset in prop::array::uniform3(-5.0f32..5.0),
        angles in prop::array::uniform3(-180.0f32..=180.0),
        offset in prop::array::uniform3(-1.0f32..1.0),
    ) {
        let forward = Vec3::new(0.0, -1.0, 0.0);
        let up = Vec3::new(-1.0, 0.0, 0.0);
        let mut joint = Joint::new("leg_l", 0.5)
            .with_offset(Vec3::from(offset))
            .with_orientation(forward, up)
            .unwrap()
            .with_child(Joint::new("knee_l", 0.4));

        let parent = arbitrary_parent(parent_angles, parent_offset);
        joint.set_parent_transform(parent);
        joint.set_pose(angles[0], angles[1], angles[2]);

        let rest = math::rest_basis(&up.cross(&forward), &up, &forward, &Vec3::from(offset));
        let expected = parent * rest * math::pose_rotation(angles);
        prop_assert_eq!(*joint.world_transform(), expected);
        prop_assert_eq!(joint.angles(), angles);

        let child = &joint.children()[0];
        let tip = math::forward(&expected, 0.5);
        prop_assert_eq!(*child.parent_transform(), tip);
        prop_assert_eq!(*child.world_transform(), tip * child.rest_basis() * child.pose_rotation());
    }

    /// it should store the violated bound, never the raw input
    #[test]
    fn pose_saturates_at_limits(
        x in -1000.0f32..1000.0,
        y in -1000.0f32..1000.0,
        z in -1000.0f32..1000.0,
    ) {
        let mut joint = Joint::new("knee_l", 0.4);
        joint.set_limit_x(0.0, 90.0).unwrap();
        joint.set_limit_y(-10.0, 10.0).unwrap();
        joint.set_pose(x, y, z);
        let a = joint.angles();
        prop_assert_eq!(a[0], x.clamp(0.0, 90.0));
        prop_assert_eq!(a[1], y.clamp(-10.0, 10.0));
        prop_assert_eq!(a[2], z.clamp(-180.0, 180.0));
    }
}

/// it should clamp knee_l x to 90 when limited to [0, 90]
#[test]
fn knee_limit_scenario() {
    let mut skeleton = rigs::humanoid().unwrap();
    skeleton.set_limits("knee_l", Axis::X, 0.0, 90.0).unwrap();
    assert_eq!(
        skeleton.set_pose_by_name("knee_l", 120.0, 0.0, 0.0),
        Some([90.0, 0.0, 0.0])
    );
    assert_eq!(skeleton.joint_by_name("knee_l").unwrap().angles()[0], 90.0);
}

/// it should reject limits for joints that do not exist
#[test]
fn limits_on_unknown_joint() {
    let mut skeleton = rigs::humanoid().unwrap();
    assert_eq!(
        skeleton.set_limits("tail", Axis::X, 0.0, 1.0),
        Err(RigError::UnknownJoint {
            name: "tail".into()
        })
    );
}

/// it should move the bone tip when the pose changes while keeping bone length
#[test]
fn pose_rotates_bone_about_pivot() {
    let mut skeleton = rigs::humanoid().unwrap();
    let id = skeleton.resolve("leg_r").unwrap();
    let pivot = origin(skeleton.joint(id).unwrap().world_transform());
    let rest_tip = origin(&skeleton.joint(id).unwrap().attachment_transform());

    skeleton.set_pose(id, 90.0, 0.0, 0.0);
    let leg = skeleton.joint(id).unwrap();
    let tip = origin(&leg.attachment_transform());

    assert_relative_eq!(origin(leg.world_transform()), pivot, epsilon = 1e-6);
    assert_relative_eq!((tip - pivot).norm(), 0.5, epsilon = 1e-5);
    assert_relative_eq!((tip - pivot).dot(&(rest_tip - pivot)), 0.0, epsilon = 1e-5);

    let knee = skeleton.joint_by_name("knee_r").unwrap();
    assert_eq!(knee.parent_transform(), &leg.attachment_transform());
}
