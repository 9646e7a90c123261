//! Dynamic body component for the player.
//!
//! The [`RigidBody3D`] component stores the velocity integrated by
//! [`physics_step`](crate::systems::physics::physics_step). Gameplay systems
//! write the horizontal components and leave the vertical one to gravity,
//! except when jumping.
//!
//! The `frozen` flag disables integration, useful when the position is driven
//! externally.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

/// Body moved by gravity and velocity, resolved against static colliders.
#[derive(Component, Clone, Copy, Debug)]
pub struct RigidBody3D {
    /// Current velocity in world units per second.
    pub velocity: Vector3,
    /// When true, the physics step skips this body entirely.
    pub frozen: bool,
}

impl Default for RigidBody3D {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody3D {
    pub fn new() -> Self {
        Self {
            velocity: Vector3::zero(),
            frozen: false,
        }
    }

    /// Replace the horizontal velocity, keeping the vertical component.
    pub fn set_horizontal_velocity(&mut self, x: f32, z: f32) {
        self.velocity.x = x;
        self.velocity.z = z;
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_velocity_keeps_vertical() {
        let mut rb = RigidBody3D::new();
        rb.velocity.y = -3.0;
        rb.set_horizontal_velocity(1.0, 2.0);
        assert_eq!(rb.velocity, Vector3::new(1.0, -3.0, 2.0));
    }

    #[test]
    fn freeze_toggles() {
        let mut rb = RigidBody3D::default();
        assert!(!rb.frozen);
        rb.freeze();
        assert!(rb.frozen);
        rb.unfreeze();
        assert!(!rb.frozen);
    }
}
