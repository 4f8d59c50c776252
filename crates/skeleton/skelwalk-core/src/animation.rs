//! Animation: drives a skeleton from a keyframe clip.
//!
//! Methods:
//! - new, prebind (resolver), animate (sample → apply poses → report)
//!
//! Sampling has no hidden state: `animate` is a function of the clip, the
//! time and the skeleton, so repeating a call yields identical transforms.

use log::{debug, warn};

use crate::binding::{BindingTable, JointResolver};
use crate::data::AnimationClip;
use crate::ids::JointId;
use crate::outputs::{AppliedPose, SampleReport};
use crate::sampling::sample_clip;
use crate::skeleton::Skeleton;

#[derive(Clone, Debug)]
pub struct Animation {
    clip: AnimationClip,
    binds: BindingTable,
}

impl Animation {
    pub fn new(clip: AnimationClip) -> Self {
        Self {
            clip,
            binds: BindingTable::new(),
        }
    }

    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.binds
    }

    /// One-time binding of every channel's joint name against `resolver`.
    /// Returns the number of channels that resolved.
    pub fn prebind(&mut self, resolver: &dyn JointResolver) -> usize {
        self.binds.clear();
        for (idx, channel) in self.clip.channels().iter().enumerate() {
            let handle = resolver.resolve(&channel.joint);
            if handle.is_none() {
                warn!(
                    "clip '{}': channel {idx} targets unknown joint '{}'",
                    self.clip.name(),
                    channel.joint
                );
            }
            self.binds.upsert(idx, handle);
        }
        self.binds.bound_count()
    }

    /// Sample the clip at `time` and pose the targeted joints (z = 0).
    ///
    /// Channels whose joint cannot be found are skipped and listed in
    /// `SampleReport::missing`. When the clip yields no sample at this time,
    /// the skeleton is left untouched.
    pub fn animate(&self, skeleton: &mut Skeleton, time: f32) -> SampleReport {
        let Some(sample) = sample_clip(&self.clip, time) else {
            return SampleReport::skipped(time);
        };

        let mut report = SampleReport {
            time,
            sampled_time: Some(sample.time),
            segment: sample.segment.map(|s| (s.left, s.right)),
            fraction: sample.segment.map(|s| s.fraction),
            applied: Vec::with_capacity(sample.values.len()),
            missing: Vec::new(),
        };

        for (idx, (value, channel)) in sample
            .values
            .iter()
            .zip(self.clip.channels())
            .enumerate()
        {
            let handle = self.handle_for(skeleton, idx, &channel.joint);
            match handle.and_then(|id| skeleton.set_pose(id, value[0], value[1], 0.0)) {
                Some(angles) => report.applied.push(AppliedPose {
                    channel: idx,
                    joint: channel.joint.clone(),
                    angles,
                }),
                None => {
                    warn!(
                        "clip '{}': no joint '{}', channel {idx} skipped",
                        self.clip.name(),
                        channel.joint
                    );
                    report.missing.push(channel.joint.clone());
                }
            }
        }

        debug!(
            "clip '{}': t={time} sampled at {:?}, {} poses applied",
            self.clip.name(),
            report.sampled_time,
            report.applied.len()
        );
        report
    }

    /// Prebound handle when it still names the expected joint, else a fresh lookup.
    fn handle_for(&self, skeleton: &Skeleton, channel: usize, name: &str) -> Option<JointId> {
        self.binds
            .get(channel)
            .filter(|id| skeleton.joint(*id).is_some_and(|j| j.name() == name))
            .or_else(|| skeleton.resolve(name))
    }
}
