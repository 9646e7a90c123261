//! Computed world-space transform for entities in a hierarchy.
//!
//! When an entity has a [`ChildOf`](bevy_ecs::hierarchy::ChildOf) parent, its
//! [`Transform3D`](super::transform3d::Transform3D) is interpreted as local to
//! the parent. The
//! [`propagate_transforms`](crate::systems::propagate_transforms::propagate_transforms)
//! system computes the resulting world-space values and stores them here.

use bevy_ecs::prelude::*;
use raylib::math::Vector3;

use super::transform3d::{Transform3D, forward_of, rotate_yaw_pitch, up_of};

/// Computed world-space transform for hierarchical entities.
///
/// For root entities it mirrors the local [`Transform3D`]. For children it
/// holds the composed result of the full ancestor chain.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct GlobalTransform3D {
    /// World-space position.
    pub position: Vector3,
    /// World-space yaw in degrees.
    pub yaw: f32,
    /// World-space pitch in degrees.
    pub pitch: f32,
}

impl Default for GlobalTransform3D {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl From<Transform3D> for GlobalTransform3D {
    fn from(t: Transform3D) -> Self {
        Self {
            position: t.position,
            yaw: t.yaw,
            pitch: t.pitch,
        }
    }
}

impl GlobalTransform3D {
    /// Compose a child's local transform onto this (parent) transform.
    pub fn compose(&self, local: &Transform3D) -> Self {
        Self {
            position: self.transform_point(local.position),
            yaw: self.yaw + local.yaw,
            pitch: self.pitch + local.pitch,
        }
    }

    /// Map a point expressed in this transform's local space to world space.
    pub fn transform_point(&self, local: Vector3) -> Vector3 {
        self.position + rotate_yaw_pitch(local, self.yaw, self.pitch)
    }

    pub fn forward(&self) -> Vector3 {
        forward_of(self.yaw, self.pitch)
    }

    pub fn up(&self) -> Vector3 {
        up_of(self.yaw, self.pitch)
    }
}
