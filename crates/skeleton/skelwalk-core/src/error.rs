//! Error types for rig construction, clip authoring and configuration.

use serde::{Deserialize, Serialize};

use crate::math::Axis;

/// Errors raised while building skeletons and clips or loading configuration.
///
/// Runtime conditions are not errors: out-of-range poses are clamped and
/// channels that target a missing joint are skipped.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RigError {
    /// Keyframe times must be strictly increasing.
    #[error("keyframe {index} at t={time} does not come after t={previous}")]
    NonMonotonicKeyframes { index: usize, previous: f32, time: f32 },

    /// Keyframe time or channel value is NaN/infinite.
    #[error("keyframe {index} contains a non-finite time or channel value")]
    NonFiniteKeyframe { index: usize },

    /// Keyframe channel count differs from the clip's channel bindings.
    #[error("keyframe {index} has {actual} channels, clip binds {expected}")]
    ChannelCountMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// Clip duration is negative or non-finite.
    #[error("clip duration {duration} must be finite and non-negative")]
    InvalidDuration { duration: f32 },

    /// Forward and up vectors do not span a basis.
    #[error("joint '{joint}': forward and up vectors are degenerate")]
    DegenerateBasis { joint: String },

    /// Rotation limit with min > max or NaN bounds.
    #[error("joint '{joint}': invalid {axis:?} limit [{min}, {max}]")]
    InvalidLimit {
        joint: String,
        axis: Axis,
        min: f32,
        max: f32,
    },

    /// No joint with this name exists in the skeleton.
    #[error("no joint named '{name}'")]
    UnknownJoint { name: String },

    /// Rotation axis of zero length.
    #[error("rotation axis must be non-zero and finite")]
    ZeroAxis,

    /// Configuration could not be parsed.
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

impl RigError {
    /// Error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::NonMonotonicKeyframes { .. }
            | Self::NonFiniteKeyframe { .. }
            | Self::ChannelCountMismatch { .. }
            | Self::InvalidDuration { .. } => "clip",
            Self::DegenerateBasis { .. }
            | Self::InvalidLimit { .. }
            | Self::UnknownJoint { .. }
            | Self::ZeroAxis => "rig",
            Self::Config { .. } => "config",
        }
    }
}

impl From<serde_json::Error> for RigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config {
            reason: err.to_string(),
        }
    }
}
