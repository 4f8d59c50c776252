//! skelwalk-core: ball-joint skeleton hierarchy and keyframe animation (renderer-agnostic).
//!
//! A [`Skeleton`] owns a fixed tree of [`Joint`]s anchored to one base
//! transform. Every joint caches its world transform
//! (`parent × rest basis × pose rotation`) and pushes its tip transform to
//! its children whenever it changes. An [`Animation`] samples an
//! [`AnimationClip`] at a time value and poses the targeted joints. A host
//! renders the result through the [`RenderBackend`] trait.

pub mod animation;
pub mod binding;
pub mod clock;
pub mod config;
pub mod data;
pub mod error;
pub mod ids;
pub mod joint;
pub mod math;
pub mod outputs;
pub mod render;
pub mod rigs;
pub mod sampling;
pub mod scene;
pub mod skeleton;

// Re-exports for hosts
pub use animation::Animation;
pub use binding::{BindingTable, JointResolver};
pub use clock::{Clock, ClockMode};
pub use config::{Config, PrimitiveDims};
pub use data::{AnimationClip, ChannelBinding, Extrapolation, Keyframe};
pub use error::RigError;
pub use ids::JointId;
pub use joint::{Joint, JointLimits};
pub use math::{Axis, Mat4, Vec3};
pub use outputs::{AppliedPose, SampleReport};
pub use render::{
    render_skeleton, DrawItem, Light, Material, Piece, Primitive, RenderBackend, RenderParams,
    TransformBlock, UniformTarget, Uniforms,
};
pub use sampling::{sample_clip, ClipSample, Segment};
pub use scene::Scene;
pub use skeleton::Skeleton;
