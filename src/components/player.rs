//! Player locomotion components.
//!
//! The player is a rig of entities rooted at the body (the entity carrying
//! [`Player`], [`LocomotionController`] and a
//! [`RigidBody3D`](super::rigidbody::RigidBody3D)). The visual model is a
//! child tagged [`ModelRoot`]; its yaw is the player's facing and its local
//! forward/right axes are the basis for movement input.

use bevy_ecs::prelude::*;

/// Marker for the player body (the rig root).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;

/// Marker for the visual model root that carries the player's facing yaw.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct ModelRoot;

/// Movement tuning and state for keyboard-driven locomotion.
///
/// `rotate_speed` is in degrees per tick while a turn key is held, so turning
/// speed depends on the frame rate. Move and jump speeds are in world units
/// per second.
#[derive(Component, Clone, Copy, Debug)]
pub struct LocomotionController {
    /// The model root whose yaw is turned and whose axes drive movement.
    pub model_root: Entity,
    /// The ground sensor consulted before jumping.
    pub ground_sensor: Entity,
    /// Speed currently applied to movement.
    pub move_speed: f32,
    /// Speed restored when sprint is toggled off.
    pub base_move_speed: f32,
    pub rotate_speed: f32,
    pub jump_speed: f32,
    pub sprint_multiplier: f32,
    pub sprint_enabled: bool,
}

impl LocomotionController {
    pub fn new(model_root: Entity, ground_sensor: Entity) -> Self {
        Self {
            model_root,
            ground_sensor,
            move_speed: 5.0,
            base_move_speed: 5.0,
            rotate_speed: 3.0,
            jump_speed: 5.0,
            sprint_multiplier: 2.0,
            sprint_enabled: false,
        }
    }

    pub fn with_speeds(mut self, move_speed: f32, rotate_speed: f32, jump_speed: f32) -> Self {
        self.move_speed = move_speed;
        self.base_move_speed = move_speed;
        self.rotate_speed = rotate_speed;
        self.jump_speed = jump_speed;
        self
    }

    pub fn with_sprint_multiplier(mut self, multiplier: f32) -> Self {
        self.sprint_multiplier = multiplier;
        self
    }

    /// Flip sprint on or off and return the new state.
    pub fn toggle_sprint(&mut self) -> bool {
        self.sprint_enabled = !self.sprint_enabled;
        self.move_speed = if self.sprint_enabled {
            self.base_move_speed * self.sprint_multiplier
        } else {
            self.base_move_speed
        };
        self.sprint_enabled
    }
}
