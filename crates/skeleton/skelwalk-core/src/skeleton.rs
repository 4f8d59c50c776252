//! Skeleton: owner of the root joints and of the shared base transform.
//!
//! The hierarchy is fixed when the skeleton is built. At that point every
//! joint gets a [`JointId`] in pre-order and the name index is populated, so
//! animation can address joints without walking the tree each frame.

use hashbrown::HashMap;
use log::{debug, warn};

use crate::binding::JointResolver;
use crate::error::RigError;
use crate::ids::{IdAllocator, JointId};
use crate::joint::Joint;
use crate::math::{self, Axis, Mat4, Vec3};

#[derive(Clone, Debug)]
pub struct Skeleton {
    name: String,
    base: Mat4,
    roots: Vec<Joint>,
    /// First pre-order occurrence of each name.
    index: HashMap<String, JointId>,
    /// Child-index path from the root list to each joint, by JointId.
    paths: Vec<Vec<usize>>,
}

impl Skeleton {
    /// Take ownership of `roots` and anchor all of them to `base`.
    pub fn new(name: impl Into<String>, roots: Vec<Joint>, base: Mat4) -> Self {
        let mut skeleton = Self {
            name: name.into(),
            base,
            roots,
            index: HashMap::new(),
            paths: Vec::new(),
        };
        skeleton.build_index();
        skeleton.propagate();
        skeleton
    }

    /// Anchor the roots to a frame given by an offset and forward/up axes.
    ///
    /// The axes are normalized and `right = normalize(up × forward)`.
    pub fn with_frame(
        name: impl Into<String>,
        offset: Vec3,
        forward: Vec3,
        up: Vec3,
        roots: Vec<Joint>,
    ) -> Result<Self, RigError> {
        let name = name.into();
        if math::is_degenerate_basis(&forward, &up) || !offset.iter().all(|c| c.is_finite()) {
            return Err(RigError::DegenerateBasis { joint: name });
        }
        let dir = forward.normalize();
        let up = up.normalize();
        let right = up.cross(&dir).normalize();
        let base = math::rest_basis(&right, &up, &dir, &offset);
        Ok(Self::new(name, roots, base))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_transform(&self) -> &Mat4 {
        &self.base
    }

    /// Replace the base transform and push it to every root.
    pub fn set_base_transform(&mut self, base: Mat4) {
        self.base = base;
        self.propagate();
    }

    /// Move the base along its own local axes. A non-finite offset is ignored.
    pub fn translate(&mut self, offset: Vec3) {
        if !offset.iter().all(|c| c.is_finite()) {
            warn!("skeleton '{}': ignoring non-finite offset {offset:?}", self.name);
            return;
        }
        self.base = math::translate(&self.base, &offset);
        self.propagate();
    }

    /// Rotate the base about a local axis (degrees).
    pub fn rotate(&mut self, angle_deg: f32, axis: Vec3) -> Result<(), RigError> {
        self.base = math::rotate(&self.base, angle_deg, &axis).ok_or(RigError::ZeroAxis)?;
        self.propagate();
        Ok(())
    }

    /// Reset the base to identity.
    pub fn reset_base(&mut self) {
        self.set_base_transform(Mat4::identity());
    }

    /// Root-level joints only; descendants are reached through the tree or by id/name.
    pub fn roots(&self) -> &[Joint] {
        &self.roots
    }

    /// Total number of joints.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Pre-order search across roots in order; the first match wins.
    pub fn find_by_name(&self, name: &str) -> Option<&Joint> {
        self.roots.iter().find_map(|r| r.find_by_name(name))
    }

    pub fn joint(&self, id: JointId) -> Option<&Joint> {
        let (first, rest) = self.paths.get(id.index())?.split_first()?;
        let mut joint = self.roots.get(*first)?;
        for &i in rest {
            joint = joint.children().get(i)?;
        }
        Some(joint)
    }

    pub fn joint_by_name(&self, name: &str) -> Option<&Joint> {
        self.resolve(name).and_then(|id| self.joint(id))
    }

    /// Pose a joint (clamped to its limits). Returns the stored angles.
    pub fn set_pose(&mut self, id: JointId, x: f32, y: f32, z: f32) -> Option<[f32; 3]> {
        let joint = self.joint_mut(id)?;
        joint.set_pose(x, y, z);
        Some(joint.angles())
    }

    /// Name-addressed [`Skeleton::set_pose`]. `None` when no joint has that name.
    pub fn set_pose_by_name(&mut self, name: &str, x: f32, y: f32, z: f32) -> Option<[f32; 3]> {
        let id = self.resolve(name)?;
        self.set_pose(id, x, y, z)
    }

    /// Set a named joint's rotation range for one axis.
    pub fn set_limits(
        &mut self,
        name: &str,
        axis: Axis,
        min: f32,
        max: f32,
    ) -> Result<(), RigError> {
        let joint = self
            .resolve(name)
            .and_then(|id| self.joint_mut(id))
            .ok_or_else(|| RigError::UnknownJoint {
                name: name.to_string(),
            })?;
        joint.set_limits(axis, min, max)
    }

    /// Zero every joint's pose.
    pub fn reset_pose(&mut self) {
        for id in 0..self.paths.len() {
            self.set_pose(JointId(id as u32), 0.0, 0.0, 0.0);
        }
    }

    /// Pre-order iteration over `(JointId, &Joint)`.
    pub fn iter(&self) -> Joints<'_> {
        Joints {
            stack: self.roots.iter().rev().collect(),
            next: 0,
        }
    }

    /// World transforms of all joints, indexed by JointId.
    pub fn world_transforms(&self) -> Vec<Mat4> {
        self.iter().map(|(_, j)| *j.world_transform()).collect()
    }

    fn joint_mut(&mut self, id: JointId) -> Option<&mut Joint> {
        let (first, rest) = self.paths.get(id.index())?.split_first()?;
        let mut joint = self.roots.get_mut(*first)?;
        for &i in rest {
            joint = joint.children_mut().get_mut(i)?;
        }
        Some(joint)
    }

    fn propagate(&mut self) {
        debug!("skeleton '{}': propagating base transform", self.name);
        for root in &mut self.roots {
            root.set_parent_transform(self.base);
        }
    }

    fn build_index(&mut self) {
        fn visit(
            joint: &Joint,
            path: &mut Vec<usize>,
            ids: &mut IdAllocator,
            index: &mut HashMap<String, JointId>,
            paths: &mut Vec<Vec<usize>>,
        ) {
            let id = ids.alloc_joint();
            paths.push(path.clone());
            if index.contains_key(joint.name()) {
                warn!(
                    "duplicate joint name '{}'; name lookups keep the first occurrence",
                    joint.name()
                );
            } else {
                index.insert(joint.name().to_string(), id);
            }
            for (i, child) in joint.children().iter().enumerate() {
                path.push(i);
                visit(child, path, ids, index, paths);
                path.pop();
            }
        }

        let mut ids = IdAllocator::new();
        let mut index = HashMap::new();
        let mut paths = Vec::new();
        let mut path = Vec::new();
        for (i, root) in self.roots.iter().enumerate() {
            path.push(i);
            visit(root, &mut path, &mut ids, &mut index, &mut paths);
            path.pop();
        }
        self.index = index;
        self.paths = paths;
    }
}

impl JointResolver for Skeleton {
    fn resolve(&self, name: &str) -> Option<JointId> {
        self.index.get(name).copied()
    }
}

/// Pre-order iterator returned by [`Skeleton::iter`].
pub struct Joints<'a> {
    stack: Vec<&'a Joint>,
    next: u32,
}

impl<'a> Iterator for Joints<'a> {
    type Item = (JointId, &'a Joint);

    fn next(&mut self) -> Option<Self::Item> {
        let joint = self.stack.pop()?;
        self.stack.extend(joint.children().iter().rev());
        let id = JointId(self.next);
        self.next += 1;
        Some((id, joint))
    }
}
