//! Runtime configuration.

use serde::{Deserialize, Serialize};

use crate::clock::ClockMode;
use crate::data::Extrapolation;
use crate::error::RigError;

/// Sizes of the rigid primitives drawn per joint.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PrimitiveDims {
    /// Sphere drawn at each joint.
    pub joint_radius: f32,
    /// Cylinder drawn along each bone; its half-length is half the bone length.
    pub bone_radius: f32,
}

impl Default for PrimitiveDims {
    fn default() -> Self {
        Self {
            joint_radius: 0.1,
            bone_radius: 0.05,
        }
    }
}

/// Scene configuration. Missing fields fall back to their defaults.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub clock: ClockMode,
    /// Out-of-range policy applied to the scene's walk clip.
    pub extrapolation: Extrapolation,
    pub primitives: PrimitiveDims,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clock: ClockMode::default(),
            extrapolation: Extrapolation::Loop,
            primitives: PrimitiveDims::default(),
        }
    }
}

impl Config {
    pub fn from_json_str(s: &str) -> Result<Self, RigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_string(&self) -> Result<String, RigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
