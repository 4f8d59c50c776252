//! Rendering seam.
//!
//! The core never talks to a graphics API. A host implements
//! [`RenderBackend`] and [`render_skeleton`] feeds it, once per frame, the
//! uniform blocks, the world transform of every drawable piece, and a draw
//! trigger per piece. Each joint is two rigid pieces: a sphere at the joint
//! and a cylinder centred on the bone midpoint.

use serde::{Deserialize, Serialize};

use crate::config::PrimitiveDims;
use crate::ids::JointId;
use crate::joint::Joint;
use crate::math::{Mat4, Vec3};
use crate::skeleton::Skeleton;

/// Directional light block.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Light {
    pub direction: [f32; 3],
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
}

impl Default for Light {
    fn default() -> Self {
        let d = Vec3::new(1.0, -0.8, -0.7).normalize();
        Self {
            direction: [d.x, d.y, d.z],
            ambient: [0.2, 0.2, 0.2],
            diffuse: [0.8, 0.8, 0.8],
            specular: [1.0, 1.0, 1.0],
        }
    }
}

/// Phong material block.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Material {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
}

impl Material {
    pub const fn solid(color: [f32; 3]) -> Self {
        Self {
            ambient: color,
            diffuse: color,
            specular: [0.8, 0.8, 0.8],
            shininess: 16.0,
        }
    }

    /// Red, used for joint spheres.
    pub const fn joint() -> Self {
        Self::solid([1.0, 0.0, 0.0])
    }

    /// Blue, used for bones and the skeleton body.
    pub const fn bone() -> Self {
        Self::solid([0.0, 0.0, 0.8])
    }
}

/// Drawable part of a joint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    Joint,
    Bone,
}

/// Geometry of a piece, in the piece's local frame (cylinders run along +Z).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Sphere { radius: f32 },
    Cylinder { radius: f32, half_length: f32 },
}

/// Owner of a uniform block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UniformTarget {
    Skeleton,
    Piece(JointId, Piece),
}

/// Transform uniform block.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformBlock {
    pub mvp: Mat4,
    pub model_view: Mat4,
    pub view: Mat4,
}

impl TransformBlock {
    pub fn new(model: &Mat4, view: &Mat4, projection: &Mat4) -> Self {
        let model_view = view * model;
        Self {
            mvp: projection * model_view,
            model_view,
            view: *view,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Uniforms {
    pub transform: TransformBlock,
    pub light: Light,
    pub material: Material,
}

/// One piece to draw this frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawItem {
    pub joint: JointId,
    pub piece: Piece,
    pub primitive: Primitive,
    pub model: Mat4,
}

/// Narrow interface to a graphics backend.
pub trait RenderBackend {
    /// Upload the transform/light/material blocks for one target.
    fn push_uniforms(&mut self, target: UniformTarget, uniforms: &Uniforms);
    /// World transform and geometry of one piece.
    fn submit_transform(&mut self, item: &DrawItem);
    /// Record the draw call for one piece.
    fn draw(&mut self, joint: JointId, piece: Piece);
}

/// Per-frame inputs to [`render_skeleton`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderParams {
    pub view: Mat4,
    pub projection: Mat4,
    pub light: Light,
    pub body_material: Material,
    pub joint_material: Material,
    pub bone_material: Material,
    pub primitives: PrimitiveDims,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            view: Mat4::identity(),
            projection: Mat4::identity(),
            light: Light::default(),
            body_material: Material::bone(),
            joint_material: Material::joint(),
            bone_material: Material::bone(),
            primitives: PrimitiveDims::default(),
        }
    }
}

/// Draw items for one joint: the sphere at its world transform and the bone
/// cylinder at its midpoint.
pub fn draw_items(id: JointId, joint: &Joint, dims: &PrimitiveDims) -> [DrawItem; 2] {
    [
        DrawItem {
            joint: id,
            piece: Piece::Joint,
            primitive: Primitive::Sphere {
                radius: dims.joint_radius,
            },
            model: *joint.world_transform(),
        },
        DrawItem {
            joint: id,
            piece: Piece::Bone,
            primitive: Primitive::Cylinder {
                radius: dims.bone_radius,
                half_length: joint.length() / 2.0,
            },
            model: joint.bone_transform(),
        },
    ]
}

/// Emit one frame: skeleton uniforms first, then every joint in pre-order.
pub fn render_skeleton(skeleton: &Skeleton, backend: &mut dyn RenderBackend, params: &RenderParams) {
    backend.push_uniforms(
        UniformTarget::Skeleton,
        &Uniforms {
            transform: TransformBlock::new(
                skeleton.base_transform(),
                &params.view,
                &params.projection,
            ),
            light: params.light,
            material: params.body_material,
        },
    );

    for (id, joint) in skeleton.iter() {
        for item in draw_items(id, joint, &params.primitives) {
            let material = match item.piece {
                Piece::Joint => params.joint_material,
                Piece::Bone => params.bone_material,
            };
            backend.push_uniforms(
                UniformTarget::Piece(id, item.piece),
                &Uniforms {
                    transform: TransformBlock::new(&item.model, &params.view, &params.projection),
                    light: params.light,
                    material,
                },
            );
            backend.submit_transform(&item);
            backend.draw(id, item.piece);
        }
    }
}
