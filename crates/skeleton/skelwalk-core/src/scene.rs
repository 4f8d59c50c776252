//! Scene: the walking figure plus its clock, ready for a host render loop.
//!
//! Per frame the host calls [`Scene::advance_time`] and then
//! [`Scene::render`]. Sampling and transform propagation finish inside
//! `advance_time`, so rendering always reads a complete pose.

use log::info;

use crate::animation::Animation;
use crate::clock::Clock;
use crate::config::Config;
use crate::data::AnimationClip;
use crate::error::RigError;
use crate::math::Mat4;
use crate::outputs::SampleReport;
use crate::render::{render_skeleton, Light, Material, RenderBackend, RenderParams};
use crate::rigs;
use crate::skeleton::Skeleton;

#[derive(Clone, Debug)]
pub struct Scene {
    config: Config,
    skeleton: Skeleton,
    animation: Animation,
    clock: Clock,
    light: Light,
    body_material: Material,
    joint_material: Material,
    bone_material: Material,
}

impl Scene {
    /// Humanoid rig walking in place. The clip's extrapolation comes from `config`.
    pub fn new(config: Config) -> Result<Self, RigError> {
        let skeleton = rigs::humanoid()?;
        let clip = rigs::walk_in_place()?.with_extrapolation(config.extrapolation);
        Ok(Self::with_parts(config, skeleton, clip))
    }

    /// Scene from any skeleton and clip. Channels are bound once here.
    pub fn with_parts(config: Config, skeleton: Skeleton, clip: AnimationClip) -> Self {
        let mut animation = Animation::new(clip);
        let bound = animation.prebind(&skeleton);
        info!(
            "scene: skeleton '{}' ({} joints), clip '{}' ({}/{} channels bound)",
            skeleton.name(),
            skeleton.len(),
            animation.clip().name(),
            bound,
            animation.clip().channels().len()
        );
        Self {
            clock: Clock::new(config.clock),
            config,
            skeleton,
            animation,
            light: Light::default(),
            body_material: Material::bone(),
            joint_material: Material::joint(),
            bone_material: Material::bone(),
        }
    }

    /// Tick the clock and apply the clip at the new time.
    pub fn advance_time(&mut self, elapsed: f32) -> SampleReport {
        let t = self.clock.tick(elapsed);
        self.animation.animate(&mut self.skeleton, t)
    }

    /// Apply the clip at an explicit time without touching the clock.
    pub fn sample_at(&mut self, time: f32) -> SampleReport {
        self.animation.animate(&mut self.skeleton, time)
    }

    /// Emit this frame's uniforms and draw calls.
    pub fn render(&self, backend: &mut dyn RenderBackend, view: &Mat4, projection: &Mat4) {
        let params = RenderParams {
            view: *view,
            projection: *projection,
            light: self.light,
            body_material: self.body_material,
            joint_material: self.joint_material,
            bone_material: self.bone_material,
            primitives: self.config.primitives,
        };
        render_skeleton(&self.skeleton, backend, &params);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Mutable skeleton access for moving the base (translate/rotate) or
    /// adjusting limits. The hierarchy itself cannot be changed.
    pub fn skeleton_mut(&mut self) -> &mut Skeleton {
        &mut self.skeleton
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn light(&self) -> &Light {
        &self.light
    }

    pub fn set_light(&mut self, light: Light) {
        self.light = light;
    }

    /// Material of the skeleton body block.
    pub fn set_material(&mut self, material: Material) {
        self.body_material = material;
    }

    pub fn set_joint_material(&mut self, material: Material) {
        self.joint_material = material;
    }

    pub fn set_bone_material(&mut self, material: Material) {
        self.bone_material = material;
    }
}
