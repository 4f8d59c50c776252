//! Keyframe clip data model.
//!
//! A clip is an ordered list of keyframes. Each keyframe carries one 2D
//! rotation (x, y degrees; z is always 0) per channel, and the clip maps
//! channel positions to joint names explicitly. All invariants are checked
//! when keyframes are added, so sampling never divides by a zero-length
//! segment.

use serde::{Deserialize, Serialize};

use crate::error::RigError;

/// One timestamped sample of every channel.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Keyframe {
    pub time: f32,
    /// Per-channel (x, y) rotation in degrees.
    pub channels: Vec<[f32; 2]>,
}

impl Keyframe {
    pub fn new(time: f32, channels: impl Into<Vec<[f32; 2]>>) -> Self {
        Self {
            time,
            channels: channels.into(),
        }
    }
}

/// Target joint of one channel.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelBinding {
    pub joint: String,
}

impl From<&str> for ChannelBinding {
    fn from(joint: &str) -> Self {
        Self {
            joint: joint.to_string(),
        }
    }
}

/// What sampling does for a time outside `[first.time, last.time]`.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolation {
    /// Leave every joint untouched.
    #[default]
    None,
    /// Clamp the time into the keyed range (hold the first/last pose).
    Hold,
    /// Wrap the time around the keyed range.
    Loop,
    /// Reflect the time back and forth across the keyed range.
    PingPong,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClip {
    name: String,
    /// Nominal length in seconds. Sampling is driven by keyframe times only.
    duration: f32,
    channels: Vec<ChannelBinding>,
    keyframes: Vec<Keyframe>,
    extrapolation: Extrapolation,
}

impl AnimationClip {
    /// Empty clip animating the given joints, one channel each, in order.
    pub fn new(name: &str, duration: f32, channels: &[&str]) -> Result<Self, RigError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(RigError::InvalidDuration { duration });
        }
        Ok(Self {
            name: name.to_string(),
            duration,
            channels: channels.iter().map(|c| ChannelBinding::from(*c)).collect(),
            keyframes: Vec::new(),
            extrapolation: Extrapolation::None,
        })
    }

    /// Clip built from a full keyframe list, validated in order.
    pub fn from_keyframes(
        name: &str,
        duration: f32,
        channels: &[&str],
        keyframes: impl IntoIterator<Item = Keyframe>,
    ) -> Result<Self, RigError> {
        let mut clip = Self::new(name, duration, channels)?;
        for kf in keyframes {
            clip.add_keyframe(kf)?;
        }
        Ok(clip)
    }

    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    pub fn set_extrapolation(&mut self, extrapolation: Extrapolation) {
        self.extrapolation = extrapolation;
    }

    /// Append a keyframe. Rejects non-finite data, a channel count that does
    /// not match the bindings, and times not strictly after the last keyframe.
    pub fn add_keyframe(&mut self, keyframe: Keyframe) -> Result<(), RigError> {
        let index = self.keyframes.len();
        let finite = keyframe.time.is_finite()
            && keyframe
                .channels
                .iter()
                .all(|c| c[0].is_finite() && c[1].is_finite());
        if !finite {
            return Err(RigError::NonFiniteKeyframe { index });
        }
        if keyframe.channels.len() != self.channels.len() {
            return Err(RigError::ChannelCountMismatch {
                index,
                expected: self.channels.len(),
                actual: keyframe.channels.len(),
            });
        }
        if let Some(last) = self.keyframes.last() {
            if keyframe.time <= last.time {
                return Err(RigError::NonMonotonicKeyframes {
                    index,
                    previous: last.time,
                    time: keyframe.time,
                });
            }
        }
        self.keyframes.push(keyframe);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn channels(&self) -> &[ChannelBinding] {
        &self.channels
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// Keyed time range `(first, last)`, if any keyframe exists.
    pub fn time_range(&self) -> Option<(f32, f32)> {
        let first = self.keyframes.first()?;
        let last = self.keyframes.last()?;
        Some((first.time, last.time))
    }
}
