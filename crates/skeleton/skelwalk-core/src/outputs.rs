//! Per-tick report produced by `Animation::animate`.

use serde::{Deserialize, Serialize};

/// Pose written to one joint this tick.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AppliedPose {
    pub channel: usize,
    pub joint: String,
    /// Angles actually stored (after clamping), degrees.
    pub angles: [f32; 3],
}

/// What one sampling call did.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SampleReport {
    /// Time passed in by the caller.
    pub time: f32,
    /// Time after extrapolation; `None` when nothing was sampled.
    pub sampled_time: Option<f32>,
    /// Bracketing keyframe indices, when interpolation happened.
    pub segment: Option<(usize, usize)>,
    /// Interpolation fraction within `segment`.
    pub fraction: Option<f32>,
    #[serde(default)]
    pub applied: Vec<AppliedPose>,
    /// Channels whose joint does not exist in the skeleton.
    #[serde(default)]
    pub missing: Vec<String>,
}

impl SampleReport {
    pub fn skipped(time: f32) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    /// True when no joint was touched.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn pose_of(&self, joint: &str) -> Option<[f32; 3]> {
        self.applied
            .iter()
            .find(|p| p.joint == joint)
            .map(|p| p.angles)
    }
}
