//! Per-tick update pipeline.
//!
//! The simulation is one chained [`Schedule`]; the order below is the
//! contract every system relies on:
//!
//! 1. scene bookkeeping and rig validation
//! 2. locomotion (sprint/quit keys, move and turn, jump)
//! 3. physics step, propagation, snapshot, trigger events
//! 4. camera yaw and pitch, propagation
//! 5. zoom, occlusion, special occluders, propagation
//!
//! The host runs input polling before it and rendering after it.

use bevy_ecs::prelude::*;

use crate::components::persistent::Persistent;
use crate::events::levelcomplete::arm_scene_transition_observer;
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::materialstore::MaterialStore;
use crate::resources::physicsscene::{PhysicsScene, TriggerContacts};
use crate::resources::scene::{ActiveScene, NextScene};
use crate::resources::scenetransition::PendingTransition;
use crate::resources::worldtime::WorldTime;
use crate::systems::camera::{camera_pitch, camera_yaw, validate_camera_rigs};
use crate::systems::groundsensor::{ground_sensor_enter_observer, ground_sensor_exit_observer};
use crate::systems::locomotion::{player_jump, player_move, player_toggles};
use crate::systems::occlusion::{
    camera_zoom, occlusion_check, special_occluder_apply, special_occluder_reset,
};
use crate::systems::physics::{physics_step, sync_physics_scene, trigger_detector};
use crate::systems::propagate_transforms::propagate_transforms;
use crate::systems::scene::{check_pending_scene, menu_controller, scene_transition_timer};
use crate::systems::teleport::teleport_observer;
use crate::systems::texttrigger::text_trigger_observer;
use crate::systems::ttl::ttl_system;

/// Resources every simulation system expects.
pub fn insert_simulation_resources(world: &mut World, config: &GameConfig) {
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(PhysicsScene::new(config.gravity));
    world.insert_resource(TriggerContacts::default());
    world.insert_resource(PendingTransition::default());
    world.insert_resource(ActiveScene::new());
    world.insert_resource(NextScene::new());
    world.insert_resource(MaterialStore::default());
    world.insert_resource(config.clone());
}

/// Global observers for trigger volumes, the deferred transition and the
/// debug toggle.
pub fn spawn_gameplay_observers(world: &mut World) {
    world.spawn((Observer::new(ground_sensor_enter_observer), Persistent));
    world.spawn((Observer::new(ground_sensor_exit_observer), Persistent));
    world.spawn((Observer::new(teleport_observer), Persistent));
    world.spawn((Observer::new(text_trigger_observer), Persistent));
    world.spawn((Observer::new(arm_scene_transition_observer), Persistent));
    world.spawn((Observer::new(switch_debug_observer), Persistent));
    world.flush();
}

pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            (
                check_pending_scene,
                validate_camera_rigs,
                menu_controller,
                scene_transition_timer,
                ttl_system,
            )
                .chain(),
            (player_toggles, player_move, player_jump).chain(),
            (
                physics_step,
                propagate_transforms,
                sync_physics_scene,
                trigger_detector,
            )
                .chain(),
            (camera_yaw, camera_pitch, propagate_transforms).chain(),
            (
                camera_zoom,
                special_occluder_reset,
                occlusion_check,
                special_occluder_apply,
                propagate_transforms,
            )
                .chain(),
        )
            .chain(),
    );
    schedule
}
