//! Trigger volume enter/exit events.
//!
//! Emitted by [`trigger_detector`](crate::systems::physics::trigger_detector)
//! when a solid collider starts or stops overlapping a trigger volume. The
//! ground sensor, teleporters and text triggers observe them.

use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEnterEvent {
    /// Entity owning the trigger collider.
    pub trigger: Entity,
    /// The solid collider that entered. It may belong to the player body.
    pub other: Entity,
}

/// Also emitted when either entity was despawned while in contact.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerExitEvent {
    pub trigger: Entity,
    pub other: Entity,
}
