//! Stable joint handles.

use serde::{Deserialize, Serialize};

/// Handle of a joint inside one [`Skeleton`](crate::skeleton::Skeleton).
///
/// Handles are dense and assigned in pre-order (parent before children,
/// children in insertion order, roots in order) when the skeleton is built.
/// They are only meaningful for the skeleton that issued them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct JointId(pub u32);

impl JointId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Monotonic allocator for JointId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_joint: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_joint(&mut self) -> JointId {
        let id = JointId(self.next_joint);
        self.next_joint = self.next_joint.wrapping_add(1);
        id
    }

    #[inline]
    pub fn allocated(&self) -> usize {
        self.next_joint as usize
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_joint(), JointId(0));
        assert_eq!(alloc.alloc_joint(), JointId(1));
        assert_eq!(alloc.allocated(), 2);
        alloc.reset();
        assert_eq!(alloc.alloc_joint(), JointId(0));
    }
}
