//! Built-in content: the humanoid ball-joint rig and its walk clips.

use crate::data::{AnimationClip, Keyframe};
use crate::error::RigError;
use crate::joint::Joint;
use crate::math::Vec3;
use crate::skeleton::Skeleton;

/// Channel order of the walk clips.
pub const WALK_CHANNELS: [&str; 4] = ["leg_l", "leg_r", "knee_l", "knee_r"];

/// Length of one leg swing in the walk clip, seconds.
pub const STEP_TIME: f32 = 0.7;

fn v(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

fn joint(
    name: &str,
    length: f32,
    offset: Vec3,
    forward: Vec3,
    up: Vec3,
) -> Result<Joint, RigError> {
    Joint::new(name, length)
        .with_offset(offset)
        .with_orientation(forward, up)
}

/// Arm chain hanging off the spine: clavicle → shoulder → elbow → wrist.
fn arm(side: &str, offset: Vec3, outward: Vec3, shoulder_up: Vec3) -> Result<Joint, RigError> {
    let z = v(0.0, 0.0, 1.0);
    let y = v(0.0, 1.0, 0.0);
    let wrist = joint(&format!("wrist_{side}"), 0.20, Vec3::zeros(), z, y)?;
    let elbow = joint(&format!("elbow_{side}"), 0.30, Vec3::zeros(), z, y)?.with_child(wrist);
    let shoulder =
        joint(&format!("shoulder_{side}"), 0.35, Vec3::zeros(), z, shoulder_up)?.with_child(elbow);
    Ok(joint(&format!("clavicle_{side}"), 0.25, offset, outward, y)?.with_child(shoulder))
}

/// Leg chain anchored at the base: hip → leg → knee → ankle.
fn leg(side: &str, offset: Vec3, outward: Vec3, leg_up: Vec3) -> Result<Joint, RigError> {
    let ankle = joint(
        &format!("ankle_{side}"),
        0.25,
        Vec3::zeros(),
        v(0.0, 1.0, 0.0),
        v(0.0, 0.0, -1.0),
    )?;
    let knee = joint(
        &format!("knee_{side}"),
        0.4,
        Vec3::zeros(),
        v(0.0, 0.0, 1.0),
        v(0.0, 1.0, 0.0),
    )?
    .with_child(ankle);
    let upper = joint(
        &format!("leg_{side}"),
        0.5,
        Vec3::zeros(),
        v(0.0, -1.0, 0.0),
        leg_up,
    )?
    .with_child(knee);
    Ok(joint(&format!("hip_{side}"), 0.2, offset, outward, v(0.0, 1.0, 0.0))?.with_child(upper))
}

/// The humanoid rig: three root chains (`pelvis` upper body, `hip_l`,
/// `hip_r`) anchored one unit above the origin, facing +Z.
///
/// No rotation limits are set; every joint keeps the full range.
pub fn humanoid() -> Result<Skeleton, RigError> {
    let z = v(0.0, 0.0, 1.0);
    let y = v(0.0, 1.0, 0.0);

    let neck = joint("neck", 0.35, Vec3::zeros(), z, y)?;
    let arm_l = arm("l", v(-0.05, 0.0, -0.05), v(-1.0, 0.0, 0.0), v(1.0, 0.0, 0.0))?;
    let arm_r = arm("r", v(0.05, 0.0, -0.05), v(1.0, 0.0, 0.0), v(-1.0, 0.0, 0.0))?;
    let spine = joint("spine", 0.4, Vec3::zeros(), z, y)?
        .with_child(neck)
        .with_child(arm_l)
        .with_child(arm_r);
    let pelvis = joint("pelvis", 0.3, Vec3::zeros(), y, z)?.with_child(spine);

    let hip_l = leg("l", v(0.05, -0.05, 0.0), v(1.0, 0.0, 0.0), v(-1.0, 0.0, 0.0))?;
    let hip_r = leg("r", v(-0.05, -0.05, 0.0), v(-1.0, 0.0, 0.0), v(1.0, 0.0, 0.0))?;

    Skeleton::with_frame("body", v(0.0, 1.0, 0.0), z, y, vec![pelvis, hip_l, hip_r])
}

/// Walking in place: rest, right leg raised with the knee bent, rest, left
/// leg raised, rest. Loops cleanly since it starts and ends at rest.
pub fn walk_in_place() -> Result<AnimationClip, RigError> {
    let rest = [[0.0, 0.0]; 4];
    let right_up = [[0.0, 0.0], [90.0, 0.0], [0.0, 0.0], [-90.0, 0.0]];
    let left_up = [[90.0, 0.0], [0.0, 0.0], [-90.0, 0.0], [0.0, 0.0]];
    AnimationClip::from_keyframes(
        "walk_in_place",
        4.0 * STEP_TIME,
        &WALK_CHANNELS,
        [
            Keyframe::new(0.0, rest),
            Keyframe::new(STEP_TIME, right_up),
            Keyframe::new(2.0 * STEP_TIME, rest),
            Keyframe::new(3.0 * STEP_TIME, left_up),
            Keyframe::new(4.0 * STEP_TIME, rest),
        ],
    )
}

/// The single-keyframe pose (right leg raised at t = 0.7). With only one
/// keyframe there is no bracketing pair, so under `Extrapolation::None` it
/// never moves the skeleton.
pub fn raised_leg_pose() -> Result<AnimationClip, RigError> {
    AnimationClip::from_keyframes(
        "raised_leg",
        STEP_TIME,
        &WALK_CHANNELS,
        [Keyframe::new(
            STEP_TIME,
            [[0.0, 0.0], [90.0, 0.0], [0.0, 0.0], [-90.0, 0.0]],
        )],
    )
}
