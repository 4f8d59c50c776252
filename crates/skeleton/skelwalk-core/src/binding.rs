//! Binding table and resolver trait.
//!
//! Clip channels name their target joints. Resolving those names walks the
//! skeleton, so it happens once in `Animation::prebind` and the per-channel
//! result is cached here as a [`JointId`].

use crate::ids::JointId;

/// Resolves joint names into handles. [`Skeleton`](crate::skeleton::Skeleton)
/// implements it; hosts can wrap it to alias or hide joints.
pub trait JointResolver {
    fn resolve(&self, name: &str) -> Option<JointId>;
}

/// Per-channel resolved handles, indexed by channel position in the clip.
#[derive(Clone, Debug, Default)]
pub struct BindingTable {
    rows: Vec<Option<JointId>>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Look up the bound handle for a channel.
    #[inline]
    pub fn get(&self, channel: usize) -> Option<JointId> {
        self.rows.get(channel).copied().flatten()
    }

    /// Insert or replace the binding for a channel.
    pub fn upsert(&mut self, channel: usize, handle: Option<JointId>) {
        if channel >= self.rows.len() {
            self.rows.resize(channel + 1, None);
        }
        self.rows[channel] = handle;
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Number of channels that resolved to a joint.
    pub fn bound_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
