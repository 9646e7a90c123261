//! Time-to-live component for automatic entity despawning.
//!
//! [`ttl_system`](crate::systems::ttl::ttl_system) counts the remaining time
//! down with the scaled world delta and despawns the entity once it reaches
//! zero. Text triggers receive one after firing.

use bevy_ecs::prelude::Component;

/// Remaining lifetime in seconds.
#[derive(Component, Clone, Copy, Debug)]
pub struct Ttl {
    pub remaining: f32,
}

impl Ttl {
    pub fn new(seconds: f32) -> Self {
        Ttl { remaining: seconds }
    }
}
