//! Matrix helpers for the joint transform chain.
//!
//! Matrices are column-major `nalgebra::Matrix4<f32>` (same layout as the
//! uniform blocks a GPU backend uploads). Angles are in degrees everywhere in
//! the public API and converted with `f32::to_radians` at the last moment.

use nalgebra::{Matrix4, Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};

pub type Mat4 = Matrix4<f32>;
pub type Vec3 = Vector3<f32>;

/// Rotation axis of a ball joint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Rest basis of a joint: `right`, `up` and `dir` as the first three columns,
/// the local pivot offset as translation.
#[rustfmt::skip]
pub fn rest_basis(right: &Vec3, up: &Vec3, dir: &Vec3, location: &Vec3) -> Mat4 {
    Matrix4::new(
        right.x, up.x, dir.x, location.x,
        right.y, up.y, dir.y, location.y,
        right.z, up.z, dir.z, location.z,
        0.0,     0.0,  0.0,   1.0,
    )
}

/// Pose rotation for intrinsic x/y/z angles in degrees.
///
/// This is the fused closed form of `Rz · Ry · Rx`. It is written out term by
/// term instead of composing three rotations so that the float operations
/// (and therefore the resulting bits) are fixed.
#[rustfmt::skip]
pub fn pose_rotation(angles: [f32; 3]) -> Mat4 {
    let (sx, cx) = angles[0].to_radians().sin_cos();
    let (sy, cy) = angles[1].to_radians().sin_cos();
    let (sz, cz) = angles[2].to_radians().sin_cos();

    Matrix4::new(
        cz * cy, -sz * cx + cz * sy * sx,  sz * sx + cz * sy * cx, 0.0,
        sz * cy,  cz * cx + sz * sy * sx, -cz * sx + sz * sy * cx, 0.0,
        -sy,      cy * sx,                 cy * cx,                0.0,
        0.0,      0.0,                     0.0,                    1.0,
    )
}

/// `m × T(offset)`: translation expressed in the local frame of `m`.
#[inline]
pub fn translate(m: &Mat4, offset: &Vec3) -> Mat4 {
    m * Matrix4::new_translation(offset)
}

/// `m` moved `distance` along its local forward (+Z) axis.
#[inline]
pub fn forward(m: &Mat4, distance: f32) -> Mat4 {
    translate(m, &Vec3::new(0.0, 0.0, distance))
}

/// `m × R(axis, angle)`. Returns `None` when `axis` cannot be normalized
/// or any input is non-finite.
pub fn rotate(m: &Mat4, angle_deg: f32, axis: &Vec3) -> Option<Mat4> {
    if !angle_deg.is_finite() || !axis.iter().all(|c| c.is_finite()) {
        return None;
    }
    let axis = Unit::try_new(*axis, f32::EPSILON)?;
    let rotation = Rotation3::from_axis_angle(&axis, angle_deg.to_radians());
    Some(m * rotation.to_homogeneous())
}

/// True when `forward` and `up` cannot span a basis (non-finite, zero, or parallel).
pub fn is_degenerate_basis(forward: &Vec3, up: &Vec3) -> bool {
    if !forward.iter().chain(up.iter()).all(|c| c.is_finite()) {
        return true;
    }
    let scale = forward.norm() * up.norm();
    if scale <= f32::EPSILON {
        return true;
    }
    up.cross(forward).norm() <= scale * 1e-6
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_pose_is_identity() {
        assert_eq!(pose_rotation([0.0, 0.0, 0.0]), Mat4::identity());
    }

    #[test]
    fn pose_rotation_matches_composed_euler() {
        let angles = [30.0f32, -45.0, 60.0];
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), angles[0].to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), angles[1].to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), angles[2].to_radians());
        let composed = (rz * ry * rx).to_homogeneous();
        assert_relative_eq!(pose_rotation(angles), composed, epsilon = 1e-6);
    }

    #[test]
    fn quarter_turn_about_x_maps_forward_to_down() {
        let m = pose_rotation([90.0, 0.0, 0.0]);
        let fwd = m.transform_vector(&Vec3::z());
        assert_relative_eq!(fwd, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn forward_moves_along_local_z() {
        let m = rest_basis(
            &Vec3::new(0.0, 0.0, -1.0),
            &Vec3::y(),
            &Vec3::x(),
            &Vec3::new(1.0, 2.0, 3.0),
        );
        let tip = forward(&m, 0.5).transform_point(&nalgebra::Point3::origin());
        assert_relative_eq!(tip.coords, Vec3::new(1.5, 2.0, 3.0), epsilon = 1e-6);
    }

    #[test]
    fn rotate_rejects_zero_axis() {
        assert!(rotate(&Mat4::identity(), 45.0, &Vec3::zeros()).is_none());
        assert!(rotate(&Mat4::identity(), 45.0, &Vec3::y()).is_some());
        assert!(rotate(&Mat4::identity(), 45.0, &Vec3::new(f32::INFINITY, 0.0, 0.0)).is_none());
        assert!(rotate(&Mat4::identity(), 45.0, &Vec3::new(0.0, f32::NAN, 1.0)).is_none());
    }

    #[test]
    fn degenerate_basis_detection() {
        assert!(is_degenerate_basis(&Vec3::z(), &Vec3::z()));
        assert!(is_degenerate_basis(&Vec3::zeros(), &Vec3::y()));
        assert!(is_degenerate_basis(&Vec3::new(f32::NAN, 0.0, 1.0), &Vec3::y()));
        assert!(!is_degenerate_basis(&Vec3::z(), &Vec3::y()));
        // Independent but not orthogonal is accepted.
        assert!(!is_degenerate_basis(&Vec3::new(0.0, 0.5, 1.0), &Vec3::y()));
    }
}
