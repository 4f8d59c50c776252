//! Ball joint: one node of the skeletal tree with three rotational degrees of freedom.
//!
//! A joint owns its children. Every setter recomputes the cached world
//! transform and pushes the joint's attachment transform (its tip) down to
//! the children, so the whole subtree is consistent when a setter returns:
//!
//! ```text
//! world      = parent × rest_basis(right, up, dir, location) × pose_rotation(angles)
//! attachment = world × T(0, 0, length)      // parent transform of every child
//! bone       = world × T(0, 0, length / 2)  // rendering only
//! ```

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::RigError;
use crate::math::{self, Axis, Mat4, Vec3};

/// Default per-axis range in degrees.
pub const FULL_RANGE: (f32, f32) = (-180.0, 180.0);

/// Closed per-axis rotation range, in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointLimits {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Default for JointLimits {
    fn default() -> Self {
        Self {
            min: [FULL_RANGE.0; 3],
            max: [FULL_RANGE.1; 3],
        }
    }
}

impl JointLimits {
    /// Saturate `value` into `[min, max]` for `axis`.
    #[inline]
    pub fn clamp(&self, axis: Axis, value: f32) -> f32 {
        let i = axis.index();
        if value < self.min[i] {
            self.min[i]
        } else if value > self.max[i] {
            self.max[i]
        } else {
            value
        }
    }

    #[inline]
    pub fn range(&self, axis: Axis) -> (f32, f32) {
        (self.min[axis.index()], self.max[axis.index()])
    }
}

#[derive(Clone, Debug)]
pub struct Joint {
    name: String,
    length: f32,
    location: Vec3,
    direction: Vec3,
    up: Vec3,
    right: Vec3,
    angles: [f32; 3],
    limits: JointLimits,
    parent_transform: Mat4,
    world_transform: Mat4,
    children: Vec<Joint>,
}

impl Joint {
    /// New joint with identity rest basis (forward +Z, up +Y), zero pose and full-range limits.
    pub fn new(name: impl Into<String>, length: f32) -> Self {
        let mut joint = Self {
            name: name.into(),
            length,
            location: Vec3::zeros(),
            direction: Vec3::z(),
            up: Vec3::y(),
            right: Vec3::x(),
            angles: [0.0; 3],
            limits: JointLimits::default(),
            parent_transform: Mat4::identity(),
            world_transform: Mat4::identity(),
            children: Vec::new(),
        };
        joint.recompute();
        joint
    }

    /// Builder form of [`Joint::set_local_offset`].
    pub fn with_offset(mut self, location: Vec3) -> Self {
        self.set_local_offset(location);
        self
    }

    /// Builder form of [`Joint::set_static_orientation`].
    pub fn with_orientation(mut self, forward: Vec3, up: Vec3) -> Result<Self, RigError> {
        self.set_static_orientation(forward, up)?;
        Ok(self)
    }

    /// Builder form of [`Joint::add_child`].
    pub fn with_child(mut self, child: Joint) -> Self {
        self.add_child(child);
        self
    }

    /// Set the rest basis. `right` is derived as `up × forward`.
    ///
    /// The vectors are stored as given (no normalization); only inputs that
    /// cannot span a basis are rejected.
    pub fn set_static_orientation(&mut self, forward: Vec3, up: Vec3) -> Result<(), RigError> {
        if math::is_degenerate_basis(&forward, &up) {
            return Err(RigError::DegenerateBasis {
                joint: self.name.clone(),
            });
        }
        self.direction = forward;
        self.up = up;
        self.right = up.cross(&forward);
        self.recompute();
        Ok(())
    }

    /// Set the pivot offset from the parent's attachment point.
    pub fn set_local_offset(&mut self, location: Vec3) {
        self.location = location;
        self.recompute();
    }

    /// Set the rotation range of one axis. The current pose is not re-clamped.
    pub fn set_limits(&mut self, axis: Axis, min: f32, max: f32) -> Result<(), RigError> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(RigError::InvalidLimit {
                joint: self.name.clone(),
                axis,
                min,
                max,
            });
        }
        let i = axis.index();
        self.limits.min[i] = min;
        self.limits.max[i] = max;
        Ok(())
    }

    pub fn set_limit_x(&mut self, min: f32, max: f32) -> Result<(), RigError> {
        self.set_limits(Axis::X, min, max)
    }

    pub fn set_limit_y(&mut self, min: f32, max: f32) -> Result<(), RigError> {
        self.set_limits(Axis::Y, min, max)
    }

    pub fn set_limit_z(&mut self, min: f32, max: f32) -> Result<(), RigError> {
        self.set_limits(Axis::Z, min, max)
    }

    /// Set the pose angles (degrees), clamped into the joint limits, and
    /// recompute this joint and its subtree.
    ///
    /// A NaN component leaves that axis at its current angle.
    pub fn set_pose(&mut self, x: f32, y: f32, z: f32) {
        for (axis, value) in Axis::ALL.into_iter().zip([x, y, z]) {
            if value.is_nan() {
                warn!("joint '{}': ignoring NaN {:?} angle", self.name, axis);
                continue;
            }
            self.angles[axis.index()] = self.limits.clamp(axis, value);
        }
        self.recompute();
    }

    /// Receive a new parent transform and cascade to the subtree.
    pub fn set_parent_transform(&mut self, parent: Mat4) {
        self.parent_transform = parent;
        self.recompute();
    }

    /// Append a child; the child immediately receives this joint's attachment transform.
    pub fn add_child(&mut self, child: Joint) {
        self.children.push(child);
        self.recompute();
    }

    /// Pre-order search (self first, then children in insertion order).
    /// The first match wins.
    pub fn find_by_name(&self, name: &str) -> Option<&Joint> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_name(name))
    }

    /// Mutable variant of [`Joint::find_by_name`] with the same traversal order.
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Joint> {
        if self.name == name {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|c| c.find_by_name_mut(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn location(&self) -> Vec3 {
        self.location
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Current pose angles in degrees (already clamped).
    pub fn angles(&self) -> [f32; 3] {
        self.angles
    }

    pub fn limits(&self) -> &JointLimits {
        &self.limits
    }

    pub fn children(&self) -> &[Joint] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Joint] {
        &mut self.children
    }

    pub fn parent_transform(&self) -> &Mat4 {
        &self.parent_transform
    }

    /// Cached world transform. Always current; reading it has no side effects.
    pub fn world_transform(&self) -> &Mat4 {
        &self.world_transform
    }

    pub fn rest_basis(&self) -> Mat4 {
        math::rest_basis(&self.right, &self.up, &self.direction, &self.location)
    }

    pub fn pose_rotation(&self) -> Mat4 {
        math::pose_rotation(self.angles)
    }

    /// Transform pushed to children: the world transform moved to the bone tip.
    pub fn attachment_transform(&self) -> Mat4 {
        math::forward(&self.world_transform, self.length)
    }

    /// Midpoint of the bone, where the connecting cylinder is drawn.
    pub fn bone_transform(&self) -> Mat4 {
        math::forward(&self.world_transform, self.length / 2.0)
    }

    /// Number of joints in this subtree, self included.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Joint::subtree_len).sum::<usize>()
    }

    fn recompute(&mut self) {
        self.world_transform = self.parent_transform * self.rest_basis() * self.pose_rotation();
        let attachment = self.attachment_transform();
        for child in &mut self.children {
            child.set_parent_transform(attachment);
        }
    }
}
