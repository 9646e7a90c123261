//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component survive scene changes. Global
//! observers and registered scene hooks are tagged with it.

use bevy_ecs::prelude::Component;

/// Tag component for entities that are not despawned when switching scenes.
#[derive(Component, Clone, Copy, Debug)]
pub struct Persistent;
