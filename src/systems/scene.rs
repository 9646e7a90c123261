//! Scene flow systems.
//!
//! - [`check_pending_scene`] emits [`SceneChangedEvent`] when a scene was
//!   requested.
//! - [`scene_transition_timer`] counts down the deferred transition.
//! - [`menu_controller`] starts the level or quits from the menu.

use bevy_ecs::prelude::*;
use log::info;

use crate::events::scene::SceneChangedEvent;
use crate::resources::input::InputState;
use crate::resources::scene::{ActiveScene, NextScene, NextScenes, SceneStates};
use crate::resources::scenetransition::PendingTransition;
use crate::resources::worldtime::WorldTime;

pub fn check_pending_scene(mut commands: Commands, next_scene: Res<NextScene>) {
    if let NextScenes::Pending(_) = next_scene.get() {
        commands.trigger(SceneChangedEvent {});
    }
}

pub fn scene_transition_timer(
    time: Res<WorldTime>,
    mut pending: ResMut<PendingTransition>,
    mut next_scene: ResMut<NextScene>,
) {
    if let Some(target) = pending.tick(time.delta) {
        info!("Deferred transition elapsed, loading {:?}", target);
        next_scene.set(target);
    }
}

pub fn menu_controller(
    input: Res<InputState>,
    active_scene: Res<ActiveScene>,
    mut next_scene: ResMut<NextScene>,
) {
    if active_scene.get() != SceneStates::Menu {
        return;
    }
    if input.action_confirm.just_pressed {
        next_scene.set(SceneStates::Level);
    } else if input.action_back.just_pressed {
        next_scene.set(SceneStates::Quitting);
    }
}
