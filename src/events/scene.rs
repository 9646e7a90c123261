//! Scene transition event and observer.
//!
//! Systems request a scene by updating [`NextScene`]. Emitting a
//! [`SceneChangedEvent`] then triggers [`observe_scene_change_event`], which
//! applies the request to [`ActiveScene`] and runs the exit and enter hooks
//! registered in [`SystemsStore`].
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, error, info, warn};

use crate::resources::scene::NextScenes::{Pending, Unchanged};
use crate::resources::scene::{ActiveScene, NextScene, SceneStates};
use crate::resources::scenetransition::PendingTransition;
use crate::resources::systemsstore::SystemsStore;

/// Apply the pending [`NextScene`] value, if any.
#[derive(Event, Debug, Clone, Copy)]
pub struct SceneChangedEvent {}

/// Observer that applies a pending scene transition.
///
/// - Copies the pending value into [`ActiveScene`] and clears [`NextScene`].
/// - Leaving a scene despawns every non-persistent entity (`"clean_scene"`
///   hook); leaving the level also cancels a deferred transition.
/// - Entering a scene runs its hook (`"setup"`, `"enter_menu"`,
///   `"enter_level"`, `"quit_game"`).
pub fn observe_scene_change_event(
    _trigger: On<SceneChangedEvent>,
    mut commands: Commands,
    mut next_scene: Option<ResMut<NextScene>>,
    mut active_scene: Option<ResMut<ActiveScene>>,
    pending: Option<ResMut<PendingTransition>>,
    systems_store: Res<SystemsStore>,
) {
    debug!("SceneChangedEvent triggered");

    if let (Some(next_scene), Some(active_scene)) =
        (next_scene.as_deref_mut(), active_scene.as_deref_mut())
    {
        match next_scene.get() {
            Pending(new_scene) => {
                let old_scene = active_scene.get();
                info!("Transitioning from {:?} to {:?}", old_scene, new_scene);
                active_scene.set(new_scene);
                next_scene.reset();
                on_scene_exit(old_scene, &mut commands, &systems_store, pending);
                on_scene_enter(new_scene, &mut commands, &systems_store);
            }
            Unchanged => debug!("No scene change pending."),
        }
    } else {
        warn!(
            "One or more resources missing in observe_scene_change_event. next_scene: {:?}, active_scene: {:?}",
            next_scene.is_some(),
            active_scene.is_some()
        );
    }
}

fn run_hook(name: &str, commands: &mut Commands, systems_store: &SystemsStore) {
    match systems_store.get(name) {
        Some(id) => commands.run_system(id),
        None => error!("Scene hook '{}' not found in SystemsStore", name),
    }
}

fn on_scene_enter(scene: SceneStates, commands: &mut Commands, systems_store: &SystemsStore) {
    match scene {
        SceneStates::None => debug!("Entered None scene"),
        SceneStates::Setup => run_hook("setup", commands, systems_store),
        SceneStates::Menu => run_hook("enter_menu", commands, systems_store),
        SceneStates::Level => run_hook("enter_level", commands, systems_store),
        SceneStates::Quitting => run_hook("quit_game", commands, systems_store),
    }
}

fn on_scene_exit(
    scene: SceneStates,
    commands: &mut Commands,
    systems_store: &SystemsStore,
    pending: Option<ResMut<PendingTransition>>,
) {
    match scene {
        SceneStates::None | SceneStates::Setup => debug!("Exited {:?} scene", scene),
        SceneStates::Menu => run_hook("clean_scene", commands, systems_store),
        SceneStates::Level => {
            if let Some(mut pending) = pending {
                pending.cancel();
            }
            run_hook("clean_scene", commands, systems_store);
        }
        SceneStates::Quitting => debug!("Exited Quitting scene"),
    }
}
