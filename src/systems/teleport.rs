//! Teleporter volumes.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::globaltransform3d::GlobalTransform3D;
use crate::components::player::Player;
use crate::components::teleporter::Teleporter;
use crate::components::transform3d::Transform3D;
use crate::events::trigger::TriggerEnterEvent;

/// Move the player to the teleporter's target when it enters the volume.
pub fn teleport_observer(
    trigger: On<TriggerEnterEvent>,
    teleporters: Query<&Teleporter>,
    targets: Query<&GlobalTransform3D>,
    mut players: Query<&mut Transform3D, With<Player>>,
) {
    let event = trigger.event();
    let Ok(teleporter) = teleporters.get(event.trigger) else {
        return;
    };
    let Ok(mut player) = players.get_mut(event.other) else {
        return;
    };
    let Ok(target) = targets.get(teleporter.target) else {
        warn!("Teleporter {:?} points at missing target {:?}", event.trigger, teleporter.target);
        return;
    };
    info!(
        "Teleporting player from ({:.1}, {:.1}, {:.1}) to ({:.1}, {:.1}, {:.1})",
        player.position.x,
        player.position.y,
        player.position.z,
        target.position.x,
        target.position.y,
        target.position.z
    );
    player.position = target.position;
}
