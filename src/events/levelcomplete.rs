//! Level completion request and its observer.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::resources::scene::SceneStates;
use crate::resources::scenetransition::PendingTransition;

/// Ask for a scene change after `delay` seconds.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LevelCompleteEvent {
    pub scene: SceneStates,
    pub delay: f32,
}

/// Arms [`PendingTransition`]. A request made while one is already pending
/// is ignored.
pub fn arm_scene_transition_observer(
    trigger: On<LevelCompleteEvent>,
    mut pending: ResMut<PendingTransition>,
) {
    let event = trigger.event();
    pending.arm(event.scene, event.delay);
}
