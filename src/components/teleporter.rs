use bevy_ecs::prelude::*;

/// Trigger volume that moves the player to `target`'s world position.
#[derive(Component, Clone, Copy, Debug)]
pub struct Teleporter {
    pub target: Entity,
}

/// Marker for teleporter destinations.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct TeleportTarget;
